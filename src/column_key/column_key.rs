use crate::{Column, Infoable, error::OcelError};
use std::{borrow::Borrow, collections::HashMap};

/// Maps column names to columns and back.
#[derive(Clone, Debug, Default)]
pub struct ColumnKey {
    pub(crate) name2column: HashMap<String, Column>,
    pub(crate) column2name: Vec<String>,
}

impl ColumnKey {
    pub fn new() -> Self {
        Self {
            name2column: HashMap::new(),
            column2name: vec![],
        }
    }

    pub fn column_to_label(&self, column: impl Borrow<Column>) -> Option<&String> {
        self.column2name.get(column.borrow().id)
    }

    pub fn label_to_column(&self, label: &str) -> Option<Column> {
        self.name2column.get(label).copied()
    }

    pub fn id_to_column(&self, column_id: usize) -> Column {
        Column { id: column_id }
    }

    pub fn column_to_id(&self, column: impl Borrow<Column>) -> usize {
        column.borrow().id
    }

    /// Appends a column. Column names must be unique in a table.
    pub fn add_column(&mut self, label: &str) -> Result<Column, OcelError> {
        if self.name2column.contains_key(label) {
            return Err(OcelError::schema(format!(
                "column `{}` appears more than once",
                label
            )));
        }
        let result = Column {
            id: self.column2name.len(),
        };
        self.column2name.push(label.to_string());
        self.name2column.insert(label.to_string(), result);
        Ok(result)
    }

    pub fn get_columns(&self) -> impl Iterator<Item = Column> + '_ {
        (0..self.len()).map(|id| self.id_to_column(id))
    }

    pub fn get_labels(&self) -> &[String] {
        &self.column2name
    }

    pub fn len(&self) -> usize {
        self.column2name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column2name.is_empty()
    }
}

impl Infoable for ColumnKey {
    fn info(&self, f: &mut impl std::io::Write) -> anyhow::Result<()> {
        for (id, label) in self.column2name.iter().enumerate() {
            writeln!(f, "\t{}\t{}", id, label)?;
        }

        Ok(write!(f, "")?)
    }
}
