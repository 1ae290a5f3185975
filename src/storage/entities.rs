use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::text::remove_extra_newlines;

/// A single thing the user did. `time` is local wall-clock time and is serialized as an ISO-8601
/// string, e.g. `2024-03-01T09:00:00` or `2024-03-01T09:00:00.123456`.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct ItemEntity {
    pub message: String,
    #[serde(with = "iso_time_ser")]
    pub time: NaiveDateTime,
}

impl ItemEntity {
    pub fn new(time: NaiveDateTime, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            time,
        }
    }

    /// First line of the message.
    pub fn headline(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }

    /// Every line after the headline.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.message.split('\n').skip(1)
    }

    pub fn normalized(self) -> Self {
        Self {
            message: remove_extra_newlines(&self.message),
            ..self
        }
    }
}

mod iso_time_ser {
    use chrono::NaiveDateTime;
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    use crate::utils::time::{parse_iso_timestamp, to_iso_timestamp};

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_iso_timestamp(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_iso_timestamp(&s).map_err(D::Error::custom)
    }
}

/// Contents of a single day record file. Items are kept in the order they were appended.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
pub struct DayRecordEntity {
    pub items: Vec<ItemEntity>,
}
