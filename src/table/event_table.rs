use crate::{
    AttributeValue, Cell, Column, ColumnKey, Exportable, Importable, Infoable, TabularLogView,
    attribute_value::parse_timestamp,
    error::OcelError,
    ocel::parse_parameters::{
        DEFAULT_EVENT_ID_COLUMN, DEFAULT_TIMESTAMP_COLUMN, EVENT_COLUMN_PREFIX,
    },
    traits::{
        importable::{ImporterParameter, ImporterParameterValues, from_string},
        infoable::write_count_statistics,
    },
};
use anyhow::{Context, Result};
use std::{
    fmt,
    io::{BufRead, Write},
};

pub const DEFAULT_SEPARATOR: &str = ",";
pub const DEFAULT_QUOTE_CHARACTER: &str = "\"";
pub const DEFAULT_OBJECT_SEPARATOR: &str = ",";

pub const CSV_IMPORTER_PARAMETER_OBJECT_TYPES: ImporterParameter = ImporterParameter::String {
    name: "csv_object_types",
    short_name: "ot",
    explanation: "Comma-separated names of the columns that hold object identifiers. If empty, every column that does not start with `event_` is an object-type column",
    allowed_values: None,
    default_value: "",
};
pub const CSV_IMPORTER_PARAMETER_SEPARATOR: ImporterParameter = ImporterParameter::String {
    name: "csv_separator",
    short_name: "sep",
    explanation: "The character that separates the columns",
    allowed_values: None,
    default_value: DEFAULT_SEPARATOR,
};
pub const CSV_IMPORTER_PARAMETER_QUOTE_CHARACTER: ImporterParameter = ImporterParameter::String {
    name: "csv_quote_character",
    short_name: "qc",
    explanation: "The character that begins and ends a quote",
    allowed_values: None,
    default_value: DEFAULT_QUOTE_CHARACTER,
};
pub const CSV_IMPORTER_PARAMETER_OBJECT_SEPARATOR: ImporterParameter =
    ImporterParameter::String {
        name: "csv_object_separator",
        short_name: "os",
        explanation: "The character that separates object identifiers within a cell. A cell may be wrapped in [] or {}",
        allowed_values: None,
        default_value: DEFAULT_OBJECT_SEPARATOR,
    };
pub const CSV_IMPORTER_PARAMETER_SORT_BY_TIME: ImporterParameter = ImporterParameter::Flag {
    name: "csv_sort_by_time",
    short_name: "st",
    explanation: "With this flag set, the rows are ordered by ascending timestamp after reading. Rows with equal timestamps keep their order",
};

/// An object-centric log as a rectangular table: one row per event.
#[derive(Clone, Debug)]
pub struct EventTable {
    pub(crate) column_key: ColumnKey,
    pub(crate) rows: Vec<Vec<Cell>>,
    /// The object-type columns chosen when the table was created, if any.
    pub(crate) object_types: Option<Vec<String>>,

    pub(crate) separator: u8,
    pub(crate) quote_character: u8,
    pub(crate) object_separator: u8,
}

impl EventTable {
    pub fn new(column_labels: &[&str]) -> Result<Self, OcelError> {
        let mut column_key = ColumnKey::new();
        for label in column_labels {
            column_key.add_column(label)?;
        }
        Ok(Self {
            column_key,
            rows: vec![],
            object_types: None,
            separator: DEFAULT_SEPARATOR.as_bytes()[0],
            quote_character: DEFAULT_QUOTE_CHARACTER.as_bytes()[0],
            object_separator: DEFAULT_OBJECT_SEPARATOR.as_bytes()[0],
        })
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), OcelError> {
        if row.len() != self.column_key.len() {
            return Err(OcelError::schema(format!(
                "row {} has {} cells, but the table has {} columns",
                self.rows.len(),
                row.len(),
                self.column_key.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_labels(&self) -> &[String] {
        self.column_key.get_labels()
    }

    pub fn object_types(&self) -> Option<&[String]> {
        self.object_types.as_deref()
    }

    /// Declares which columns hold object identifiers.
    pub fn set_object_types(&mut self, object_types: Vec<String>) -> Result<(), OcelError> {
        if let Some(object_type) = object_types.iter().find(|t| !self.has_column(t)) {
            return Err(OcelError::schema(format!(
                "object type `{}` is not a column",
                object_type
            )));
        }
        self.object_types = Some(object_types);
        Ok(())
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column_key.label_to_column(label).is_some()
    }

    pub fn get_rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get_cell(&self, row: usize, label: &str) -> Option<&Cell> {
        let column = self.column_key.label_to_column(label)?;
        self.cell(row, column)
    }

    /// Orders the rows by ascending `event_timestamp`.
    /// Rows with equal timestamps keep their relative order.
    pub fn sort_by_timestamp(&mut self) -> Result<(), OcelError> {
        let column = self
            .column_key
            .label_to_column(DEFAULT_TIMESTAMP_COLUMN)
            .ok_or_else(|| {
                OcelError::schema(format!("column `{}` not found", DEFAULT_TIMESTAMP_COLUMN))
            })?;

        let mut keys = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            match row.get(column.id) {
                Some(Cell::Value(AttributeValue::Time(time))) => keys.push((*time, i)),
                _ => return Err(OcelError::schema(format!("row {} has no timestamp", i))),
            }
        }
        keys.sort_by_key(|(time, _)| *time);

        let mut rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        self.rows = keys
            .into_iter()
            .filter_map(|(_, i)| rows[i].take())
            .collect();
        Ok(())
    }

    /// The event identifiers, in row order.
    pub fn event_ids(&self) -> Result<Vec<String>, OcelError> {
        (0..self.number_of_rows())
            .map(|row| self.event_id(row).map(|id| id.to_string()))
            .collect()
    }

    /// Splits a cell into object identifiers.
    pub fn parse_object_list(cell: &str, separator: char) -> Vec<String> {
        let cell = cell.trim();
        let inner = cell
            .strip_prefix('[')
            .and_then(|c| c.strip_suffix(']'))
            .or_else(|| cell.strip_prefix('{').and_then(|c| c.strip_suffix('}')))
            .unwrap_or(cell);
        inner
            .split(separator)
            .map(|id| id.trim().trim_matches(|c: char| c == '\'' || c == '"'))
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .collect()
    }
}

impl TabularLogView for EventTable {
    fn column_key(&self) -> &ColumnKey {
        &self.column_key
    }

    fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: Column) -> Option<&Cell> {
        self.rows.get(row)?.get(column.id)
    }

    fn event_id_column(&self) -> Option<Column> {
        self.column_key.label_to_column(DEFAULT_EVENT_ID_COLUMN)
    }
}

impl Importable for EventTable {
    const FILE_FORMAT_SPECIFICATION: &str =
        "A text file, of which each row is a separated list of cells; the first row holds the column names.
    The columns `event_id`, `event_activity` and `event_timestamp` describe the event.
    Each object-type column holds a list of object identifiers, such as `[o1, o2]`.
    Other columns hold event attributes.";

    const IMPORTER_PARAMETERS: &[ImporterParameter] = &[
        CSV_IMPORTER_PARAMETER_OBJECT_TYPES,
        CSV_IMPORTER_PARAMETER_SEPARATOR,
        CSV_IMPORTER_PARAMETER_QUOTE_CHARACTER,
        CSV_IMPORTER_PARAMETER_OBJECT_SEPARATOR,
        CSV_IMPORTER_PARAMETER_SORT_BY_TIME,
    ];

    fn import(reader: &mut dyn BufRead, parameter_values: &ImporterParameterValues) -> Result<Self>
    where
        Self: Sized,
    {
        let separator = CSV_IMPORTER_PARAMETER_SEPARATOR
            .get(parameter_values)
            .as_byte()
            .with_context(|| "reading the separator")?;
        let quote_character = CSV_IMPORTER_PARAMETER_QUOTE_CHARACTER
            .get(parameter_values)
            .as_byte()
            .with_context(|| "reading the quote character")?;
        let object_separator = CSV_IMPORTER_PARAMETER_OBJECT_SEPARATOR
            .get(parameter_values)
            .as_byte()
            .with_context(|| "reading the object separator")?;

        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(separator)
            .quote(quote_character)
            .from_reader(reader);

        //columns
        let mut column_key = ColumnKey::new();
        for head in csv.headers()?.iter() {
            column_key.add_column(head.trim())?;
        }
        if column_key.is_empty() {
            return Err(OcelError::schema("the table has no columns").into());
        }

        //object-type columns
        let object_types = CSV_IMPORTER_PARAMETER_OBJECT_TYPES
            .get(parameter_values)
            .as_string()?;
        let mut is_object_column = vec![false; column_key.len()];
        let object_types = if object_types.trim().is_empty() {
            for (id, label) in column_key.get_labels().iter().enumerate() {
                is_object_column[id] = !label.starts_with(EVENT_COLUMN_PREFIX);
            }
            None
        } else {
            let mut declared = vec![];
            for object_type in object_types.split(',').map(str::trim) {
                let column = column_key.label_to_column(object_type).ok_or_else(|| {
                    OcelError::schema(format!("object type `{}` is not a column", object_type))
                })?;
                is_object_column[column.id] = true;
                declared.push(object_type.to_string());
            }
            Some(declared)
        };
        let timestamp_column = column_key.label_to_column(DEFAULT_TIMESTAMP_COLUMN);

        //rows
        let mut rows = vec![];
        for (row_index, record) in csv.records().enumerate() {
            let record = record.with_context(|| format!("reading row {}", row_index))?;

            let mut row = Vec::with_capacity(column_key.len());
            for (column_index, cell) in record.iter().enumerate() {
                if is_object_column[column_index] {
                    row.push(Cell::Objects(Self::parse_object_list(
                        cell,
                        object_separator as char,
                    )));
                } else if timestamp_column.is_some_and(|c| c.id == column_index) {
                    let time = parse_timestamp(cell)
                        .with_context(|| format!("reading the timestamp of row {}", row_index))?;
                    row.push(Cell::Value(AttributeValue::Time(time)));
                } else if cell.is_empty() {
                    row.push(Cell::Empty);
                } else {
                    row.push(Cell::string(cell));
                }
            }
            rows.push(row);
        }

        let mut result = Self {
            column_key,
            rows,
            object_types,
            separator,
            quote_character,
            object_separator,
        };

        if CSV_IMPORTER_PARAMETER_SORT_BY_TIME
            .get(parameter_values)
            .as_bool()?
        {
            result.sort_by_timestamp()?;
        }

        log::debug!(
            "read event table with {} rows and {} columns",
            result.rows.len(),
            result.column_key.len()
        );
        Ok(result)
    }
}
from_string!(EventTable);

impl Exportable for EventTable {
    fn export(&self, f: &mut dyn Write) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.separator)
            .quote(self.quote_character)
            .from_writer(f);

        //write header
        wtr.write_record(self.column_key.get_labels())?;

        //write rows
        let object_separator = (self.object_separator as char).to_string();
        for row in &self.rows {
            for cell in row {
                match cell {
                    Cell::Empty => wtr.write_field("")?,
                    Cell::Value(value) => wtr.write_field(value.to_string())?,
                    Cell::Objects(ids) => {
                        wtr.write_field(format!("[{}]", ids.join(&object_separator)))?
                    }
                }
            }
            wtr.write_record(None::<&[u8]>)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Infoable for EventTable {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "Number of rows\t\t\t{}", self.rows.len())?;
        writeln!(f, "Number of columns\t\t{}", self.column_key.len())?;
        write_count_statistics(
            f,
            "Objects per row\t\t",
            self.rows.iter().map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Objects(ids) => ids.len(),
                        _ => 0,
                    })
                    .sum()
            }),
        )?;

        writeln!(f, "")?;
        writeln!(f, "Columns")?;
        self.column_key.info(f)?;

        Ok(writeln!(f, "")?)
    }
}

impl fmt::Display for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event table with {} rows", self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CSV_IMPORTER_PARAMETER_OBJECT_TYPES, CSV_IMPORTER_PARAMETER_SEPARATOR,
        CSV_IMPORTER_PARAMETER_SORT_BY_TIME, EventTable,
    };
    use crate::{
        AttributeValue, Cell, Exportable, Importable, Infoable, TabularLogView,
        attribute_value::parse_timestamp, traits::importable::ImporterParameterValue,
    };
    use std::{
        fs::{self, File},
        io::BufReader,
    };

    #[test]
    fn csv_import() {
        let fin = fs::read_to_string("testfiles/orders.csv").unwrap();
        let table = fin.parse::<EventTable>().unwrap();

        assert_eq!(table.number_of_rows(), 5);
        assert_eq!(
            table.column_labels(),
            &[
                "event_id",
                "event_activity",
                "event_timestamp",
                "event_price",
                "order",
                "item"
            ]
        );
        assert_eq!(table.event_id(0).unwrap(), "e1");
        assert_eq!(
            table.get_cell(0, "item").unwrap(),
            &Cell::objects(["i1", "i2"])
        );
        assert_eq!(table.get_cell(3, "order").unwrap(), &Cell::Objects(vec![]));
        assert_eq!(table.get_cell(3, "event_price").unwrap(), &Cell::Empty);
    }

    #[test]
    fn csv_parameters() {
        //explicit object types: `item` is read as an attribute
        let mut parameter_values = EventTable::default_importer_parameter_values();
        parameter_values.insert(
            CSV_IMPORTER_PARAMETER_OBJECT_TYPES,
            ImporterParameterValue::String("order".to_string()),
        );
        let table = EventTable::import(
            &mut BufReader::new(File::open("testfiles/orders.csv").unwrap()),
            &parameter_values,
        )
        .unwrap();
        assert_eq!(table.get_cell(0, "item").unwrap(), &Cell::string("[i1,i2]"));
        assert_eq!(table.object_types(), Some(&["order".to_string()][..]));

        //unknown object type
        parameter_values.insert(
            CSV_IMPORTER_PARAMETER_OBJECT_TYPES,
            ImporterParameterValue::String("package".to_string()),
        );
        assert!(
            EventTable::import(
                &mut BufReader::new(File::open("testfiles/orders.csv").unwrap()),
                &parameter_values,
            )
            .is_err()
        );

        //invalid separator
        let mut parameter_values = EventTable::default_importer_parameter_values();
        parameter_values.insert(
            CSV_IMPORTER_PARAMETER_SEPARATOR,
            ImporterParameterValue::String(";;".to_string()),
        );
        assert!(
            EventTable::import(
                &mut BufReader::new(File::open("testfiles/orders.csv").unwrap()),
                &parameter_values,
            )
            .is_err()
        );
    }

    #[test]
    fn csv_sort_by_time() {
        let mut parameter_values = EventTable::default_importer_parameter_values();
        parameter_values.insert(
            CSV_IMPORTER_PARAMETER_SORT_BY_TIME,
            ImporterParameterValue::Boolean(true),
        );
        let table = EventTable::import(
            &mut BufReader::new(File::open("testfiles/orders_unsorted.csv").unwrap()),
            &parameter_values,
        )
        .unwrap();

        assert_eq!(table.event_ids().unwrap(), vec!["e1", "e2", "e3", "e4"]);
        assert!(
            table
                .get_cell(0, "event_timestamp")
                .and_then(Cell::as_value)
                .and_then(AttributeValue::as_time)
                .is_some()
        );
    }

    #[test]
    fn failed_sort_keeps_rows() {
        let mut table = EventTable::new(&["event_id", "event_timestamp"]).unwrap();
        table
            .push_row(vec![
                Cell::string("e2"),
                Cell::Value(parse_timestamp("2024-01-02 10:00:00").unwrap().into()),
            ])
            .unwrap();
        table
            .push_row(vec![
                Cell::string("e1"),
                Cell::Value(parse_timestamp("2024-01-01 10:00:00").unwrap().into()),
            ])
            .unwrap();
        table.push_row(vec![Cell::string("e3"), Cell::Empty]).unwrap();

        assert!(table.sort_by_timestamp().unwrap_err().is_schema());
        assert_eq!(table.number_of_rows(), 3);
        assert_eq!(table.event_ids().unwrap(), vec!["e2", "e1", "e3"]);
    }

    #[test]
    fn csv_bad_timestamp() {
        let fin = "event_id,event_activity,event_timestamp,order\ne1,a,soon,[o1]\n";
        assert!(fin.parse::<EventTable>().is_err());
    }

    #[test]
    fn object_lists() {
        assert_eq!(
            EventTable::parse_object_list("['o1', 'o2']", ','),
            vec!["o1", "o2"]
        );
        assert_eq!(EventTable::parse_object_list("{o1}", ','), vec!["o1"]);
        assert_eq!(EventTable::parse_object_list("o1;o2", ';'), vec!["o1", "o2"]);
        assert!(EventTable::parse_object_list("[]", ',').is_empty());
        assert!(EventTable::parse_object_list("", ',').is_empty());
    }

    #[test]
    fn push_row_checks_width() {
        let mut table = EventTable::new(&["event_id", "order"]).unwrap();
        table
            .push_row(vec![Cell::string("e1"), Cell::objects(["o1"])])
            .unwrap();
        assert!(table.push_row(vec![Cell::string("e2")]).is_err());
        assert_eq!(table.number_of_rows(), 1);

        assert!(EventTable::new(&["order", "order"]).is_err());

        assert!(table.set_object_types(vec!["item".to_string()]).is_err());
        assert_eq!(table.object_types(), None);
        table.set_object_types(vec!["order".to_string()]).unwrap();
        assert_eq!(table.object_types(), Some(&["order".to_string()][..]));
    }

    #[test]
    fn export_import() {
        let fin = fs::read_to_string("testfiles/orders.csv").unwrap();
        let table = fin.parse::<EventTable>().unwrap();

        let mut out = vec![];
        table.export(&mut out).unwrap();
        let table2 = String::from_utf8(out).unwrap().parse::<EventTable>().unwrap();
        assert_eq!(table.get_rows(), table2.get_rows());

        let mut info = vec![];
        table.info(&mut info).unwrap();
        assert!(String::from_utf8(info).unwrap().contains("Number of rows\t\t\t5"));
    }
}
