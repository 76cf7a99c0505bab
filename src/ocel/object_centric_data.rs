use crate::{
    Infoable, MetaObjectCentricData, ParseParameters, RawObjectCentricData, error::OcelError,
    traits::infoable::write_count_statistics,
};
use anyhow::Result;
use std::fmt::Display;

/// An object-centric log: schema, events and objects, and how it was parsed.
#[derive(Clone, Debug)]
pub struct ObjectCentricData {
    pub meta: MetaObjectCentricData,
    pub(crate) raw: RawObjectCentricData,
    pub parse_parameters: ParseParameters,
}

impl ObjectCentricData {
    pub fn new(
        mut meta: MetaObjectCentricData,
        raw: RawObjectCentricData,
        parse_parameters: ParseParameters,
    ) -> Result<Self, OcelError> {
        //locations are not part of the schema anymore
        meta.locations.clear();

        for object in raw.objects() {
            if !meta.is_object_type(&object.object_type) {
                return Err(OcelError::schema(format!(
                    "object `{}` has undeclared object type `{}`",
                    object.id, object.object_type
                )));
            }
        }

        Ok(Self {
            meta,
            raw,
            parse_parameters,
        })
    }

    pub fn raw(&self) -> &RawObjectCentricData {
        &self.raw
    }
}

/// Orders the events of the log by ascending timestamp.
/// Events with equal timestamps keep their relative order; nothing else changes.
pub fn sort_events(data: &mut ObjectCentricData) {
    log::info!("sort {} events by timestamp", data.raw.number_of_events());
    data.raw.sort_events_by_key(|event| event.time);
}

impl Display for ObjectCentricData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "object-centric log with {} events and {} objects",
            self.raw.number_of_events(),
            self.raw.number_of_objects()
        )
    }
}

impl Infoable for ObjectCentricData {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "Number of events\t\t{}", self.raw.number_of_events())?;
        writeln!(f, "Number of objects\t\t{}", self.raw.number_of_objects())?;
        write_count_statistics(
            f,
            "Objects per event\t",
            self.raw.events().iter().map(|event| event.omap.len()),
        )?;

        writeln!(f, "")?;
        self.meta.info(f)?;

        Ok(writeln!(f, "")?)
    }
}
