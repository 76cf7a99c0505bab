use std::collections::HashMap;

pub const DEFAULT_EVENT_ID_COLUMN: &str = "event_id";
pub const DEFAULT_ACTIVITY_COLUMN: &str = "event_activity";
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "event_timestamp";
pub const EVENT_COLUMN_PREFIX: &str = "event_";

/// How a comma-separated log was read.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvParseParameters {
    pub object_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub event_id_column: String,
    pub activity_column: String,
    pub timestamp_column: String,
    pub separator: u8,
}

impl Default for CsvParseParameters {
    fn default() -> Self {
        Self {
            object_columns: vec![],
            value_columns: vec![],
            event_id_column: DEFAULT_EVENT_ID_COLUMN.to_string(),
            activity_column: DEFAULT_ACTIVITY_COLUMN.to_string(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            separator: b',',
        }
    }
}

/// How a JSON-OCEL log was read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonParseParameters {
    pub object_types: Vec<String>,
    pub attribute_names: Vec<String>,
    /// Renames of attributes from the file to the log.
    pub attribute_renames: HashMap<String, String>,
}

/// The parameters a log was parsed with. Kept with the log, not consumed by it.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseParameters {
    Csv(CsvParseParameters),
    Json(JsonParseParameters),
}

impl Default for ParseParameters {
    fn default() -> Self {
        Self::Csv(CsvParseParameters::default())
    }
}
