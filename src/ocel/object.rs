use crate::AttributeValue;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub id: String,
    pub object_type: String,
    pub ovmap: HashMap<String, AttributeValue>,
}

impl Object {
    pub fn new(id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
            ovmap: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.ovmap.insert(name.into(), value);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.ovmap.get(name)
    }
}
