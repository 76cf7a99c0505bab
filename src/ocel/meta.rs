use crate::{AttributeType, Infoable};
use anyhow::Result;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Log-wide schema information of an object-centric log.
#[derive(Clone, Debug)]
pub struct MetaObjectCentricData {
    pub attribute_names: Vec<String>,
    pub attribute_types: HashMap<String, AttributeType>,
    pub object_types: Vec<String>,
    /// activity -> attributes that events of the activity may carry
    pub activity_attributes: HashMap<String, Vec<String>>,
    /// Attribute names shown for events.
    pub attr_events: Vec<String>,
    activities: HashSet<String>,
    pub resources: HashSet<String>,
    pub(crate) locations: HashSet<String>,
}

impl MetaObjectCentricData {
    pub fn new(
        attribute_names: Vec<String>,
        attribute_types: HashMap<String, AttributeType>,
        object_types: Vec<String>,
        activity_attributes: HashMap<String, Vec<String>>,
    ) -> Self {
        let activities = activity_attributes.keys().cloned().collect();
        Self {
            attribute_names,
            attribute_types,
            object_types,
            activity_attributes,
            attr_events: vec![],
            activities,
            resources: HashSet::new(),
            locations: HashSet::new(),
        }
    }

    pub fn with_attr_events(mut self, attr_events: Vec<String>) -> Self {
        self.attr_events = attr_events;
        self
    }

    pub fn with_resources(mut self, resources: impl IntoIterator<Item = String>) -> Self {
        self.resources = resources.into_iter().collect();
        self
    }

    /// The activities, as declared when the metadata was created.
    pub fn activities(&self) -> &HashSet<String> {
        &self.activities
    }

    pub fn locations(&self) -> &HashSet<String> {
        &self.locations
    }

    pub fn is_object_type(&self, object_type: &str) -> bool {
        self.object_types.iter().any(|t| t == object_type)
    }

    pub fn attribute_type(&self, attribute_name: &str) -> Option<AttributeType> {
        self.attribute_types.get(attribute_name).copied()
    }

    pub fn is_legal_attribute(&self, activity: &str, attribute_name: &str) -> bool {
        self.activity_attributes
            .get(activity)
            .is_some_and(|attributes| attributes.iter().any(|a| a == attribute_name))
    }
}

impl Infoable for MetaObjectCentricData {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "Number of activities\t\t{}", self.activities.len())?;
        writeln!(f, "Number of object types\t\t{}", self.object_types.len())?;
        writeln!(f, "Number of attributes\t\t{}", self.attribute_names.len())?;
        writeln!(f, "Number of resources\t\t{}", self.resources.len())?;

        writeln!(f, "")?;
        writeln!(
            f,
            "Activities\n\t{}",
            self.activities.iter().sorted().join("\n\t")
        )?;

        writeln!(f, "")?;
        writeln!(f, "Object types\n\t{}", self.object_types.join("\n\t"))?;

        writeln!(f, "")?;
        writeln!(f, "Attributes")?;
        for name in &self.attribute_names {
            match self.attribute_types.get(name) {
                Some(typee) => writeln!(f, "\t{}\t{}", name, typee)?,
                None => writeln!(f, "\t{}\tunknown", name)?,
            }
        }

        Ok(write!(f, "")?)
    }
}
