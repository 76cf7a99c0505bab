use crate::{AttributeValue, Column, ColumnKey, error::OcelError};

/// A cell of an event table.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Value(AttributeValue),
    /// The identifiers of the objects of one object type that an event refers to.
    Objects(Vec<String>),
}

impl Cell {
    pub fn objects<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::Objects(ids.into_iter().map(|id| id.into()).collect())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Value(AttributeValue::String(value.into()))
    }

    pub fn as_value(&self) -> Option<&AttributeValue> {
        match self {
            Cell::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Read-only, row-ordered access to an object-centric log in tabular form.
///
/// Rows are visited in storage order, which consumers trust to be chronological.
pub trait TabularLogView {
    fn column_key(&self) -> &ColumnKey;

    fn number_of_rows(&self) -> usize;

    fn cell(&self, row: usize, column: Column) -> Option<&Cell>;

    fn event_id_column(&self) -> Option<Column>;

    /// The identifier of the event of the row.
    fn event_id(&self, row: usize) -> Result<&str, OcelError> {
        let column = self
            .event_id_column()
            .ok_or_else(|| OcelError::schema("the table has no event identifier column"))?;
        match self.cell(row, column) {
            Some(Cell::Value(AttributeValue::String(id))) => Ok(id.as_str()),
            _ => Err(OcelError::schema(format!(
                "row {} has no event identifier",
                row
            ))),
        }
    }

    /// The identifiers of the objects in a column of a row.
    /// An empty cell is read as a row without objects.
    fn objects(&self, row: usize, column: Column) -> Result<&[String], OcelError> {
        match self.cell(row, column) {
            Some(Cell::Objects(ids)) => Ok(ids.as_slice()),
            Some(Cell::Empty) => Ok(&[]),
            _ => Err(OcelError::schema(format!(
                "the cell of row {} in column `{}` is not a list of object identifiers",
                row,
                self.column_key()
                    .column_to_label(column)
                    .map_or("?", |label| label.as_str())
            ))),
        }
    }
}
