use crate::{Column, EventObjectGraph, TabularLogView, error::OcelError};
use fnv::FnvHashMap;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::collections::HashSet;

/// Builds the event-object graph of a table in one scan over its rows.
///
/// The rows are taken to be in chronological order. For each object type and each object
/// in a row, an edge is added from the row that last mentioned that (object type, object)
/// pair. Identifiers are only compared within an object type.
///
/// The table is validated entirely before the scan starts, so on an error no graph is
/// produced.
pub fn build_event_object_graph(
    view: &impl TabularLogView,
    object_types: &[String],
) -> Result<EventObjectGraph, OcelError> {
    log::info!(
        "build event-object graph over {} rows and {} object types",
        view.number_of_rows(),
        object_types.len()
    );
    let (columns, mut graph) = validate(view, object_types)?;

    let mut last_seen: FnvHashMap<(usize, &str), usize> = FnvHashMap::default();
    for row in 0..view.number_of_rows() {
        for (object_type, column) in columns.iter().enumerate() {
            for object in view.objects(row, *column)? {
                match last_seen.insert((object_type, object.as_str()), row) {
                    Some(previous) if previous != row => {
                        graph.add_edge(previous, row, object_type, object)
                    }
                    _ => {}
                }
            }
        }
    }

    log::debug!(
        "event-object graph has {} nodes and {} edges",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );
    Ok(graph)
}

/// Builds the same graph as [build_event_object_graph], scanning the object types in parallel.
///
/// Every object type has its own last-seen index and edge buffer; the buffers are merged
/// into the order of the sequential build.
pub fn build_event_object_graph_parallel(
    view: &(impl TabularLogView + Sync),
    object_types: &[String],
) -> Result<EventObjectGraph, OcelError> {
    log::info!(
        "build event-object graph over {} rows and {} object types in parallel",
        view.number_of_rows(),
        object_types.len()
    );
    let (columns, mut graph) = validate(view, object_types)?;

    let buffers = columns
        .par_iter()
        .enumerate()
        .map(|(object_type, column)| {
            let mut last_seen: FnvHashMap<&str, usize> = FnvHashMap::default();
            let mut edges = vec![];
            for row in 0..view.number_of_rows() {
                for (position, object) in view.objects(row, *column)?.iter().enumerate() {
                    match last_seen.insert(object.as_str(), row) {
                        Some(previous) if previous != row => edges.push(BufferedEdge {
                            target: row,
                            object_type,
                            position,
                            source: previous,
                            object: object.as_str(),
                        }),
                        _ => {}
                    }
                }
            }
            Ok::<_, OcelError>(edges)
        })
        .collect::<Result<Vec<_>, OcelError>>()?;

    let mut edges = buffers.into_iter().flatten().collect::<Vec<_>>();
    edges.sort_unstable_by_key(|edge| (edge.target, edge.object_type, edge.position));
    for edge in edges {
        graph.add_edge(edge.source, edge.target, edge.object_type, edge.object);
    }

    Ok(graph)
}

struct BufferedEdge<'a> {
    target: usize,
    object_type: usize,
    position: usize,
    source: usize,
    object: &'a str,
}

/// Checks the object types and every cell the scan will read, and creates the nodes.
fn validate(
    view: &impl TabularLogView,
    object_types: &[String],
) -> Result<(Vec<Column>, EventObjectGraph), OcelError> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(object_types.len());
    for object_type in object_types {
        if !seen.insert(object_type) {
            return Err(OcelError::schema(format!(
                "object type `{}` is declared more than once",
                object_type
            )));
        }
        let column = view
            .column_key()
            .label_to_column(object_type)
            .ok_or_else(|| {
                OcelError::schema(format!("object type `{}` is not a column", object_type))
            })?;
        columns.push(column);
    }

    let mut graph = EventObjectGraph::new(object_types.to_vec());
    for row in 0..view.number_of_rows() {
        graph.add_node(view.event_id(row)?);
        for column in &columns {
            view.objects(row, *column)?;
        }
    }

    Ok((columns, graph))
}
