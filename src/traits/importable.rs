use anyhow::{Result, anyhow};
use std::{collections::HashMap, hash::Hash, io::BufRead};
use strum_macros::Display;

pub trait Importable {
    ///Defines the parameters that the importer expects.
    const IMPORTER_PARAMETERS: &[ImporterParameter];

    ///A short description of the file format.
    const FILE_FORMAT_SPECIFICATION: &str;

    ///Attempts to import from the reader.
    ///Parameters missing from `parameter_values` take their default value.
    fn import(reader: &mut dyn BufRead, parameter_values: &ImporterParameterValues) -> Result<Self>
    where
        Self: Sized;

    fn default_importer_parameter_values() -> ImporterParameterValues {
        let mut result = HashMap::new();
        for parameter in Self::IMPORTER_PARAMETERS {
            result.insert(*parameter, parameter.default());
        }
        result
    }
}

macro_rules! from_string {
    ($t:ident) => {
        impl std::str::FromStr for $t {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut reader = std::io::Cursor::new(s);
                let default_parameter_values = $t::default_importer_parameter_values();
                Self::import(&mut reader, &default_parameter_values)
            }
        }
    };
}
pub(crate) use from_string;

pub type ImporterParameterValues = HashMap<ImporterParameter, ImporterParameterValue>;

/// Parameters that can be given to an importer.
/// Every parameter has a default, so every importer works without user interaction.
#[derive(Copy, Clone, Debug, Display)]
pub enum ImporterParameter {
    Flag {
        name: &'static str,
        short_name: &'static str,
        explanation: &'static str,
    },
    String {
        name: &'static str,
        short_name: &'static str,
        explanation: &'static str,
        allowed_values: Option<&'static [&'static str]>,
        default_value: &'static str,
    },
}

impl ImporterParameter {
    pub fn name(&self) -> &'static str {
        match self {
            ImporterParameter::Flag { name, .. } | ImporterParameter::String { name, .. } => name,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            ImporterParameter::Flag { short_name, .. }
            | ImporterParameter::String { short_name, .. } => short_name,
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            ImporterParameter::Flag { explanation, .. }
            | ImporterParameter::String { explanation, .. } => explanation,
        }
    }

    pub fn default(&self) -> ImporterParameterValue {
        match self {
            ImporterParameter::Flag { .. } => ImporterParameterValue::Boolean(false),
            ImporterParameter::String { default_value, .. } => {
                ImporterParameterValue::String(default_value.to_string())
            }
        }
    }

    /// Looks the parameter up, falling back to its default.
    pub fn get(&self, parameter_values: &ImporterParameterValues) -> ImporterParameterValue {
        parameter_values
            .get(self)
            .cloned()
            .unwrap_or_else(|| self.default())
    }
}

impl Eq for ImporterParameter {}

impl PartialEq for ImporterParameter {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Hash for ImporterParameter {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state)
    }
}

impl Ord for ImporterParameter {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name().cmp(other.name())
    }
}

impl PartialOrd for ImporterParameter {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug)]
pub enum ImporterParameterValue {
    Boolean(bool),
    String(String),
}

impl ImporterParameterValue {
    pub fn as_string(&self) -> Result<String> {
        match self {
            ImporterParameterValue::String(s) => Ok(s.clone()),
            _ => Err(anyhow!("cannot read importer parameter as string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            ImporterParameterValue::Boolean(s) => Ok(*s),
            _ => Err(anyhow!("cannot read importer parameter as bool")),
        }
    }

    /// Reads a parameter that must be a single one-byte character.
    pub fn as_byte(&self) -> Result<u8> {
        let s = self.as_string()?;
        if s.len() != 1 {
            return Err(anyhow!(
                "expected a one one-byte character, found `{}`",
                s
            ));
        }
        Ok(s.as_bytes()[0])
    }
}
