pub mod column_key {
    pub mod column;
    pub mod column_key;
}
pub mod conversions {
    pub mod to_event_table;
}
pub mod eog {
    pub mod builder;
    pub mod event_object_graph;
}
pub mod ocel {
    pub mod event;
    pub mod meta;
    pub mod object;
    pub mod object_centric_data;
    pub mod ocel;
    pub mod parse_parameters;
    pub mod raw;
}
pub mod table {
    pub mod event_table;
    pub mod tabular_log_view;
}
pub mod traits {
    pub mod exportable;
    pub mod importable;
    pub mod infoable;
}
pub mod attribute_value;
pub mod error;

pub use crate::attribute_value::{AttributeType, AttributeValue};
pub use crate::column_key::column::Column;
pub use crate::column_key::column_key::ColumnKey;
pub use crate::eog::builder::{build_event_object_graph, build_event_object_graph_parallel};
pub use crate::eog::event_object_graph::{Edge, EventObjectGraph};
pub use crate::error::{IdentifierKind, OcelError};
pub use crate::ocel::event::Event;
pub use crate::ocel::meta::MetaObjectCentricData;
pub use crate::ocel::object::Object;
pub use crate::ocel::object_centric_data::{ObjectCentricData, sort_events};
pub use crate::ocel::ocel::Ocel;
pub use crate::ocel::parse_parameters::{CsvParseParameters, JsonParseParameters, ParseParameters};
pub use crate::ocel::raw::RawObjectCentricData;
pub use crate::table::event_table::EventTable;
pub use crate::table::tabular_log_view::{Cell, TabularLogView};
pub use crate::traits::exportable::Exportable;
pub use crate::traits::importable::Importable;
pub use crate::traits::infoable::Infoable;
