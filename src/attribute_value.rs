use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fmt::Display;
use strum_macros::{EnumIter, EnumString};

pub const TIMESTAMP_FORMAT_WITHOUT_OFFSET: &str = "%Y-%m-%d %H:%M:%S";

/// The value of an event or object attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    String(String),
    Numeric(f64),
    Time(DateTime<FixedOffset>),
    Boolean(bool),
}

impl AttributeValue {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Numeric(_) => AttributeType::Numeric,
            AttributeValue::Time(_) => AttributeType::Time,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            AttributeValue::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            AttributeValue::Time(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Numeric(n) => write!(f, "{}", n),
            AttributeValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Time(value)
    }
}

/// Parses a timestamp in RFC 3339, or without offset (then it is taken as UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time);
    }
    match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_WITHOUT_OFFSET) {
        Ok(time) => Ok(time.and_utc().fixed_offset()),
        Err(_) => Err(anyhow!("cannot read `{}` as a timestamp", value)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttributeType {
    String,
    Numeric,
    Time,
    Boolean,
}
