//!  Storage is organized through [item_storage::ItemStorageImpl].
//!  The basic idea is:
//!   - There is a directory with all the records, see [config::StoreConfig].
//!   - Every local calendar day that has items gets one JSON record file named after the date.
//!   - Records are only ever appended to, by rewriting the whole file and atomically renaming it
//!     into place.

pub mod config;
pub mod entities;
pub mod item_storage;
