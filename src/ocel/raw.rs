use crate::{
    Event, Object,
    error::{IdentifierKind, OcelError},
};
use std::collections::{HashMap, hash_map::Entry};

/// The events and objects of an object-centric log.
/// Both collections keep their insertion order and are indexed by identifier.
#[derive(Clone, Debug)]
pub struct RawObjectCentricData {
    events: Vec<Event>,
    event_index: HashMap<String, usize>,
    objects: Vec<Object>,
    object_index: HashMap<String, usize>,
}

impl RawObjectCentricData {
    pub fn new(events: Vec<Event>, objects: Vec<Object>) -> Result<Self, OcelError> {
        let event_index = Self::index(&events, |event| &event.id, IdentifierKind::Event)?;
        let object_index = Self::index(&objects, |object| &object.id, IdentifierKind::Object)?;
        Ok(Self {
            events,
            event_index,
            objects,
            object_index,
        })
    }

    fn index<T>(
        elements: &[T],
        id: impl Fn(&T) -> &String,
        kind: IdentifierKind,
    ) -> Result<HashMap<String, usize>, OcelError> {
        let mut result = HashMap::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            match result.entry(id(element).clone()) {
                Entry::Occupied(occupied_entry) => {
                    return Err(OcelError::DuplicateIdentifier {
                        kind,
                        id: occupied_entry.key().clone(),
                    });
                }
                Entry::Vacant(vacant_entry) => {
                    vacant_entry.insert(i);
                }
            }
        }
        Ok(result)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn get_event(&self, id: &str) -> Option<&Event> {
        self.event_index.get(id).map(|i| &self.events[*i])
    }

    pub fn get_object(&self, id: &str) -> Option<&Object> {
        self.object_index.get(id).map(|i| &self.objects[*i])
    }

    pub fn object_ids(&self) -> Vec<&str> {
        self.objects.iter().map(|object| object.id.as_str()).collect()
    }

    pub fn number_of_events(&self) -> usize {
        self.events.len()
    }

    pub fn number_of_objects(&self) -> usize {
        self.objects.len()
    }

    /// Re-orders the events. Stable: events that compare equal keep their order.
    pub(crate) fn sort_events_by_key<K: Ord>(&mut self, key: impl FnMut(&Event) -> K) {
        self.events.sort_by_key(key);
        for (i, event) in self.events.iter().enumerate() {
            self.event_index.insert(event.id.clone(), i);
        }
    }
}
