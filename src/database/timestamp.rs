//! Stores `chrono` timestamps as BSON dates, the type existing board documents carry.
//!
//! Use with `#[serde(with = "crate::database::timestamp")]`.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn to_bson(value: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    to_bson(value).serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = bson::DateTime::deserialize(deserializer)?.timestamp_millis();
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| D::Error::custom(format!("date out of range: {millis}ms")))
}
