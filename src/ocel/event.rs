use crate::AttributeValue;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id: String,
    pub activity: String,
    pub time: DateTime<FixedOffset>,
    /// Identifiers of the objects this event refers to, in order of reference.
    pub omap: Vec<String>,
    pub vmap: HashMap<String, AttributeValue>,
    /// Marks the event as correlated; carried for logs that still record it.
    pub corr: bool,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        activity: impl Into<String>,
        time: DateTime<FixedOffset>,
        omap: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            activity: activity.into(),
            time,
            omap,
            vmap: HashMap::new(),
            corr: false,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.vmap.insert(name.into(), value);
        self
    }

    pub fn with_corr(mut self, corr: bool) -> Self {
        self.corr = corr;
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.vmap.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::{AttributeValue, attribute_value::parse_timestamp};

    #[test]
    fn event_fields() {
        let time = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let event = Event::new("e1", "place", time, vec!["o1".to_string()])
            .with_attribute("price", AttributeValue::Numeric(2.0));
        assert!(!event.corr);
        assert_eq!(
            event.get_attribute("price").and_then(AttributeValue::as_numeric),
            Some(2.0)
        );
        assert!(event.get_attribute("weight").is_none());

        assert!(event.with_corr(true).corr);
    }
}
