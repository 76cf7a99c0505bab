use crate::{
    EventObjectGraph, EventTable, Infoable, ObjectCentricData, TabularLogView,
    eog::builder::build_event_object_graph,
    error::{IdentifierKind, OcelError},
    ocel::parse_parameters::{
        DEFAULT_ACTIVITY_COLUMN, DEFAULT_EVENT_ID_COLUMN, DEFAULT_TIMESTAMP_COLUMN,
        EVENT_COLUMN_PREFIX,
    },
};
use anyhow::Result;
use std::{
    collections::HashSet,
    fmt::Display,
    sync::{Mutex, OnceLock},
};

/// An object-centric log in tabular form, with its event-object graph.
///
/// The graph is built on first request and kept for the lifetime of the log. The table can
/// only be read through the log; to change it, take it back with [Ocel::into_table] and create
/// a new log, which builds a new graph.
#[derive(Debug)]
pub struct Ocel {
    table: EventTable,
    object_types: Vec<String>,
    eog: OnceLock<EventObjectGraph>,
    eog_build: Mutex<()>,
}

impl Ocel {
    /// Without `object_types`, the object types declared on the table are used; if the table
    /// declares none, every column that does not start with `event_` is an object type.
    /// With `precompute`, the event-object graph is built immediately.
    pub fn new(
        table: EventTable,
        object_types: Option<Vec<String>>,
        precompute: bool,
    ) -> Result<Self, OcelError> {
        if table.column_labels().is_empty() {
            return Err(OcelError::schema("the table has no columns"));
        }

        for column in [
            DEFAULT_EVENT_ID_COLUMN,
            DEFAULT_ACTIVITY_COLUMN,
            DEFAULT_TIMESTAMP_COLUMN,
        ] {
            if !table.has_column(column) {
                return Err(OcelError::schema(format!(
                    "required column `{}` not found",
                    column
                )));
            }
        }

        let object_types =
            object_types.or_else(|| table.object_types().map(<[String]>::to_vec));
        let object_types = match object_types {
            Some(object_types) => {
                let mut seen = HashSet::new();
                for object_type in &object_types {
                    if !table.has_column(object_type) {
                        return Err(OcelError::schema(format!(
                            "object type `{}` is not a column",
                            object_type
                        )));
                    }
                    if !seen.insert(object_type) {
                        return Err(OcelError::schema(format!(
                            "object type `{}` is declared more than once",
                            object_type
                        )));
                    }
                }
                object_types
            }
            None => table
                .column_labels()
                .iter()
                .filter(|label| !label.starts_with(EVENT_COLUMN_PREFIX))
                .cloned()
                .collect(),
        };

        let mut event_ids = HashSet::new();
        for row in 0..table.number_of_rows() {
            let event_id = table.event_id(row)?;
            if !event_ids.insert(event_id) {
                return Err(OcelError::DuplicateIdentifier {
                    kind: IdentifierKind::Event,
                    id: event_id.to_string(),
                });
            }
        }

        let result = Self {
            table,
            object_types,
            eog: OnceLock::new(),
            eog_build: Mutex::new(()),
        };

        if precompute {
            result.event_object_graph()?;
        }
        Ok(result)
    }

    /// Creates the tabular form of an object-centric log; the object types are those declared
    /// in its metadata.
    pub fn from_object_centric_data(
        data: &ObjectCentricData,
        precompute: bool,
    ) -> Result<Self, OcelError> {
        Self::new(EventTable::try_from(data)?, None, precompute)
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    pub fn into_table(self) -> EventTable {
        self.table
    }

    pub fn object_types(&self) -> &[String] {
        &self.object_types
    }

    pub fn is_event_object_graph_computed(&self) -> bool {
        self.eog.get().is_some()
    }

    /// The event-object graph, built on the first call.
    /// Concurrent first calls build the graph once.
    pub fn event_object_graph(&self) -> Result<&EventObjectGraph, OcelError> {
        if let Some(graph) = self.eog.get() {
            return Ok(graph);
        }

        let _build = self
            .eog_build
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(graph) = self.eog.get() {
            return Ok(graph);
        }
        let graph = build_event_object_graph(&self.table, &self.object_types)?;
        Ok(self.eog.get_or_init(|| graph))
    }
}

impl Display for Ocel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "object-centric event log with {} events and {} object types",
            self.table.number_of_rows(),
            self.object_types.len()
        )
    }
}

impl Infoable for Ocel {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(
            f,
            "Object types\n\t{}",
            self.object_types.join("\n\t")
        )?;
        writeln!(f, "")?;

        self.table.info(f)?;

        writeln!(f, "Event-object graph")?;
        self.event_object_graph()?.info(f)?;

        Ok(writeln!(f, "")?)
    }
}

#[cfg(test)]
mod tests {
    use super::Ocel;
    use crate::{
        Cell, Event, EventObjectGraph, EventTable, Importable, Infoable, MetaObjectCentricData,
        Object, ObjectCentricData, ParseParameters, RawObjectCentricData,
        attribute_value::parse_timestamp,
        ocel::object_centric_data::sort_events,
        table::event_table::CSV_IMPORTER_PARAMETER_OBJECT_TYPES,
        traits::importable::ImporterParameterValue,
    };
    use std::{
        collections::HashMap,
        fs::{self, File},
        io::BufReader,
        sync::Arc,
        thread,
    };

    fn orders() -> EventTable {
        let fin = fs::read_to_string("testfiles/orders.csv").unwrap();
        fin.parse::<EventTable>().unwrap()
    }

    #[test]
    fn inferred_object_types() {
        let ocel = Ocel::new(orders(), None, false).unwrap();
        assert_eq!(ocel.object_types(), &["order", "item"]);
        assert!(!ocel.is_event_object_graph_computed());

        let graph = ocel.event_object_graph().unwrap();
        assert_eq!(graph.number_of_nodes(), 5);
        assert!(ocel.is_event_object_graph_computed());

        //cached
        let again = ocel.event_object_graph().unwrap();
        assert!(std::ptr::eq(graph, again));
    }

    #[test]
    fn explicit_object_types() {
        let ocel = Ocel::new(orders(), Some(vec!["order".to_string()]), true).unwrap();
        assert!(ocel.is_event_object_graph_computed());
        let graph = ocel.event_object_graph().unwrap();
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("e1", "e5")]);

        let err = Ocel::new(orders(), Some(vec!["package".to_string()]), false).unwrap_err();
        assert!(err.is_schema());

        let err = Ocel::new(
            orders(),
            Some(vec!["order".to_string(), "order".to_string()]),
            false,
        )
        .unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn object_types_from_import() {
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

        //`item` holds plain strings and is not inferred as an object type
        let ocel = Ocel::new(table, None, false).unwrap();
        assert_eq!(ocel.object_types(), &["order"]);
        assert_eq!(
            ocel.event_object_graph().unwrap().edges().collect::<Vec<_>>(),
            vec![("e1", "e5")]
        );
    }

    #[test]
    fn schema_errors() {
        let table = EventTable::new(&[]).unwrap();
        assert!(Ocel::new(table, None, false).unwrap_err().is_schema());

        let table = EventTable::new(&["event_id", "event_activity", "order"]).unwrap();
        assert!(Ocel::new(table, None, false).unwrap_err().is_schema());
    }

    #[test]
    fn duplicate_events() {
        let mut table =
            EventTable::new(&["event_id", "event_activity", "event_timestamp", "order"]).unwrap();
        for _ in 0..2 {
            table
                .push_row(vec![
                    Cell::string("e1"),
                    Cell::string("a"),
                    Cell::Empty,
                    Cell::objects(["o1"]),
                ])
                .unwrap();
        }
        assert!(
            Ocel::new(table, None, false)
                .unwrap_err()
                .is_duplicate_identifier()
        );
    }

    #[test]
    fn concurrent_first_access() {
        let ocel = Arc::new(Ocel::new(orders(), None, false).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ocel = Arc::clone(&ocel);
                thread::spawn(move || {
                    let graph = ocel.event_object_graph().unwrap();
                    (graph as *const EventObjectGraph as usize, graph.number_of_edges())
                })
            })
            .collect();
        let results = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();

        //one graph, built once
        let cached = ocel.event_object_graph().unwrap() as *const EventObjectGraph as usize;
        for (address, edges) in results {
            assert_eq!(address, cached);
            assert_eq!(edges, 7);
        }
    }

    #[test]
    fn from_object_centric_data() {
        let t = |s| parse_timestamp(s).unwrap();
        let events = vec![
            Event::new("e2", "pay", t("2024-01-02 10:00:00"), vec!["o1".to_string()]),
            Event::new(
                "e1",
                "place",
                t("2024-01-01 10:00:00"),
                vec!["o1".to_string(), "i1".to_string()],
            )
            .with_attribute("price", 12.5f64.into()),
            Event::new("e3", "ship", t("2024-01-03 10:00:00"), vec!["i1".to_string()]),
        ];
        let objects = vec![Object::new("o1", "order"), Object::new("i1", "item")];
        let meta = MetaObjectCentricData::new(
            vec!["price".to_string()],
            HashMap::new(),
            vec!["order".to_string(), "item".to_string()],
            HashMap::from([
                ("place".to_string(), vec!["price".to_string()]),
                ("pay".to_string(), vec![]),
                ("ship".to_string(), vec![]),
            ]),
        );
        let raw = RawObjectCentricData::new(events, objects).unwrap();
        let mut data = ObjectCentricData::new(meta, raw, ParseParameters::default()).unwrap();
        sort_events(&mut data);

        let ocel = Ocel::from_object_centric_data(&data, false).unwrap();
        let graph = ocel.event_object_graph().unwrap();
        assert_eq!(graph.nodes(), &["e1", "e2", "e3"]);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("e1", "e2"), ("e1", "e3")]
        );

        let mut info = vec![];
        ocel.info(&mut info).unwrap();
        assert!(String::from_utf8(info).unwrap().contains("Number of nodes\t\t\t3"));
    }
}
