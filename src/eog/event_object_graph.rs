use crate::{Exportable, Infoable, traits::infoable::write_count_statistics};
use anyhow::Result;
use serde_json::Value;
use std::{collections::HashMap, fmt::Display, io::Write};

/// An edge of an event-object graph, with the object that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub object_type: &'a str,
    pub object: &'a str,
}

/// The event-object graph of a log: a node per event, and an edge from an event to the next
/// event of each of its objects.
///
/// Two events that share several objects are connected by several parallel edges, one per
/// shared object.
#[derive(Clone, Debug, PartialEq)]
pub struct EventObjectGraph {
    pub(crate) nodes: Vec<String>, //node -> event id
    pub(crate) node_index: HashMap<String, usize>,
    pub(crate) object_types: Vec<String>,
    pub(crate) sources: Vec<usize>,      //edge -> source node
    pub(crate) targets: Vec<usize>,      //edge -> target node
    pub(crate) edge_types: Vec<usize>,   //edge -> object type
    pub(crate) edge_objects: Vec<String>, //edge -> object
}

impl EventObjectGraph {
    pub fn new(object_types: Vec<String>) -> Self {
        Self {
            nodes: vec![],
            node_index: HashMap::new(),
            object_types,
            sources: vec![],
            targets: vec![],
            edge_types: vec![],
            edge_objects: vec![],
        }
    }

    pub(crate) fn add_node(&mut self, event_id: &str) -> usize {
        let node = self.nodes.len();
        self.nodes.push(event_id.to_string());
        self.node_index.entry(event_id.to_string()).or_insert(node);
        node
    }

    pub(crate) fn add_edge(&mut self, source: usize, target: usize, object_type: usize, object: &str) {
        self.sources.push(source);
        self.targets.push(target);
        self.edge_types.push(object_type);
        self.edge_objects.push(object.to_string());
    }

    /// The event identifiers, in the order of the rows they came from.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn object_types(&self) -> &[String] {
        &self.object_types
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.sources.len()
    }

    pub fn contains_node(&self, event_id: &str) -> bool {
        self.node_index.contains_key(event_id)
    }

    /// The edges as (source event, target event) pairs, parallel edges included.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.sources
            .iter()
            .zip(self.targets.iter())
            .map(|(source, target)| (self.nodes[*source].as_str(), self.nodes[*target].as_str()))
    }

    pub fn edges_with_objects(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        (0..self.number_of_edges()).map(|edge| self.edge(edge))
    }

    pub fn edge(&self, edge: usize) -> Edge<'_> {
        Edge {
            source: &self.nodes[self.sources[edge]],
            target: &self.nodes[self.targets[edge]],
            object_type: &self.object_types[self.edge_types[edge]],
            object: &self.edge_objects[edge],
        }
    }

    /// The number of edges from `source` to `target`.
    pub fn edge_multiplicity(&self, source: &str, target: &str) -> usize {
        self.edges()
            .filter(|(s, t)| *s == source && *t == target)
            .count()
    }

    pub fn successors(&self, event_id: &str) -> Vec<&str> {
        match self.node_index.get(event_id) {
            Some(node) => self
                .sources
                .iter()
                .zip(self.targets.iter())
                .filter(|(source, _)| *source == node)
                .map(|(_, target)| self.nodes[*target].as_str())
                .collect(),
            None => vec![],
        }
    }

    pub fn predecessors(&self, event_id: &str) -> Vec<&str> {
        match self.node_index.get(event_id) {
            Some(node) => self
                .targets
                .iter()
                .zip(self.sources.iter())
                .filter(|(target, _)| *target == node)
                .map(|(_, source)| self.nodes[*source].as_str())
                .collect(),
            None => vec![],
        }
    }

    /// Writes the edges as a comma-separated table with a header.
    pub fn export_edge_list(&self, f: &mut dyn Write) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(f);
        wtr.write_record(["source", "target", "object_type", "object"])?;
        for edge in self.edges_with_objects() {
            wtr.write_record([edge.source, edge.target, edge.object_type, edge.object])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        let nodes = Value::Array(
            self.nodes
                .iter()
                .map(|node| Value::String(node.clone()))
                .collect(),
        );
        let edges = Value::Array(
            self.edges_with_objects()
                .map(|edge| {
                    serde_json::json!({
                        "source": edge.source,
                        "target": edge.target,
                        "object_type": edge.object_type,
                        "object": edge.object,
                    })
                })
                .collect(),
        );
        serde_json::json!(
            {
                "object_types": self.object_types,
                "nodes": nodes,
                "edges": edges
            }
        )
    }
}

impl Display for EventObjectGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Exportable for EventObjectGraph {
    fn export(&self, f: &mut dyn Write) -> Result<()> {
        Ok(serde_json::to_writer_pretty(f, &self.to_json())?)
    }
}

impl Infoable for EventObjectGraph {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "Number of nodes\t\t\t{}", self.number_of_nodes())?;
        writeln!(f, "Number of edges\t\t\t{}", self.number_of_edges())?;

        let mut out_degrees = vec![0; self.number_of_nodes()];
        let mut in_degrees = vec![0; self.number_of_nodes()];
        for (source, target) in self.sources.iter().zip(self.targets.iter()) {
            out_degrees[*source] += 1;
            in_degrees[*target] += 1;
        }
        write_count_statistics(f, "Outgoing edges\t\t", out_degrees.into_iter())?;
        write_count_statistics(f, "Incoming edges\t\t", in_degrees.iter().copied())?;
        writeln!(
            f,
            "Events without predecessor\t{}",
            in_degrees.iter().filter(|d| **d == 0).count()
        )?;

        writeln!(f, "")?;
        writeln!(f, "Edges per object type")?;
        for (i, object_type) in self.object_types.iter().enumerate() {
            writeln!(
                f,
                "\t{}\t{}",
                object_type,
                self.edge_types.iter().filter(|t| **t == i).count()
            )?;
        }

        Ok(writeln!(f, "")?)
    }
}
