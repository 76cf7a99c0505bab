use crate::{
    AttributeValue, Cell, EventTable, ObjectCentricData,
    error::OcelError,
    ocel::parse_parameters::{
        DEFAULT_ACTIVITY_COLUMN, DEFAULT_EVENT_ID_COLUMN, DEFAULT_TIMESTAMP_COLUMN,
        EVENT_COLUMN_PREFIX,
    },
};
use std::collections::HashMap;

impl TryFrom<&ObjectCentricData> for EventTable {
    type Error = OcelError;

    /// One row per event, in the order of the event collection. Attributes become `event_`
    /// columns; each declared object type becomes a column of object identifiers.
    fn try_from(value: &ObjectCentricData) -> Result<Self, Self::Error> {
        log::info!("convert object-centric log to event table");

        let attribute_columns = value
            .meta
            .attribute_names
            .iter()
            .map(|name| {
                if name.starts_with(EVENT_COLUMN_PREFIX) {
                    name.clone()
                } else {
                    format!("{}{}", EVENT_COLUMN_PREFIX, name)
                }
            })
            .collect::<Vec<_>>();

        let mut labels = vec![
            DEFAULT_EVENT_ID_COLUMN,
            DEFAULT_ACTIVITY_COLUMN,
            DEFAULT_TIMESTAMP_COLUMN,
        ];
        labels.extend(attribute_columns.iter().map(String::as_str));
        labels.extend(value.meta.object_types.iter().map(String::as_str));
        let mut result = EventTable::new(&labels)?;
        result.set_object_types(value.meta.object_types.clone())?;

        let object_type2position: HashMap<&str, usize> = value
            .meta
            .object_types
            .iter()
            .enumerate()
            .map(|(i, object_type)| (object_type.as_str(), i))
            .collect();

        for event in value.raw.events() {
            let mut row = Vec::with_capacity(labels.len());
            row.push(Cell::string(event.id.as_str()));
            row.push(Cell::string(event.activity.as_str()));
            row.push(Cell::Value(AttributeValue::Time(event.time)));

            for name in &value.meta.attribute_names {
                match event.get_attribute(name) {
                    Some(attribute_value) => row.push(Cell::Value(attribute_value.clone())),
                    None => row.push(Cell::Empty),
                }
            }

            let mut objects = vec![vec![]; value.meta.object_types.len()];
            for object_id in &event.omap {
                let object = value.raw.get_object(object_id).ok_or_else(|| {
                    OcelError::schema(format!(
                        "event `{}` refers to unknown object `{}`",
                        event.id, object_id
                    ))
                })?;
                let position = object_type2position
                    .get(object.object_type.as_str())
                    .copied()
                    .ok_or_else(|| {
                        OcelError::schema(format!(
                            "object `{}` has undeclared object type `{}`",
                            object.id, object.object_type
                        ))
                    })?;
                objects[position].push(object_id.clone());
            }
            row.extend(objects.into_iter().map(Cell::Objects));

            result.push_row(row)?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AttributeValue, Cell, Event, EventTable, MetaObjectCentricData, Object,
        ObjectCentricData, ParseParameters, RawObjectCentricData, TabularLogView,
        attribute_value::parse_timestamp,
    };
    use std::collections::HashMap;

    fn meta() -> MetaObjectCentricData {
        MetaObjectCentricData::new(
            vec!["price".to_string()],
            HashMap::new(),
            vec!["order".to_string(), "item".to_string()],
            HashMap::from([("place".to_string(), vec!["price".to_string()])]),
        )
    }

    #[test]
    fn raw_log_to_table() {
        let time = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let events = vec![
            Event::new(
                "e1",
                "place",
                time,
                vec!["i1".to_string(), "o1".to_string(), "i2".to_string()],
            )
            .with_attribute("price", AttributeValue::Numeric(3.0)),
        ];
        let objects = vec![
            Object::new("o1", "order"),
            Object::new("i1", "item"),
            Object::new("i2", "item"),
        ];
        let raw = RawObjectCentricData::new(events, objects).unwrap();
        let data = ObjectCentricData::new(meta(), raw, ParseParameters::default()).unwrap();

        let table = EventTable::try_from(&data).unwrap();
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
        assert_eq!(table.number_of_rows(), 1);
        assert_eq!(
            table.object_types(),
            Some(&["order".to_string(), "item".to_string()][..])
        );
        assert_eq!(table.event_id(0).unwrap(), "e1");
        assert_eq!(
            table.get_cell(0, "event_price").unwrap(),
            &Cell::Value(AttributeValue::Numeric(3.0))
        );
        assert_eq!(table.get_cell(0, "order").unwrap(), &Cell::objects(["o1"]));
        assert_eq!(
            table.get_cell(0, "item").unwrap(),
            &Cell::objects(["i1", "i2"])
        );
    }

    #[test]
    fn unknown_object() {
        let time = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let events = vec![Event::new("e1", "place", time, vec!["o9".to_string()])];
        let raw = RawObjectCentricData::new(events, vec![]).unwrap();
        let data = ObjectCentricData::new(meta(), raw, ParseParameters::default()).unwrap();

        assert!(EventTable::try_from(&data).unwrap_err().is_schema());
    }
}
