//! Keep track of what you did today.
//! Items are short notes stamped with the local time they were written at. They are stored in one
//! JSON file per calendar day, so showing the last week only ever touches a week's worth of files.
//!

pub mod cli;
pub mod fs;
pub mod storage;
pub mod utils;
