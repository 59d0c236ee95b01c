use crate::catalog::{Catalog, FormatEntry, canonical_mime, normalize_mime};
use crate::error::{BuildError, SnapshotError};
use crate::plan::ConversionStep;
use crate::search::{PathSearch, SearchTarget};
use ahash::AHashMap;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::info;

pub mod cost;
mod snapshot;

pub use cost::{CategoryPenalty, CostPolicy};

/// One distinct format identity, keyed by its normalized MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub mime: String,
    /// Indices into [`Graph::edges`] of every conversion leaving this node.
    pub edges: Vec<usize>,
}

/// Points at a stored format entry and the node it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRef {
    /// Index into the graph's format table.
    pub format: usize,
    /// Index into [`Graph::nodes`].
    pub node: usize,
}

/// A direct conversion offered by a single handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: FormatRef,
    pub to: FormatRef,
    /// Name of the handler performing the conversion.
    pub handler: String,
    pub cost: f64,
}

/// An immutable graph of format identities and handler-provided conversions.
///
/// Built once from a [`Catalog`]; when the catalog changes, build a new graph.
///
/// Deserializing checks that every index points inside the graph and rebuilds the MIME
/// lookup table, whatever the data format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    formats: Vec<FormatEntry>,
    #[serde(skip)]
    index: AHashMap<String, usize>,
}

impl Graph {
    pub fn builder(catalog: &Catalog) -> GraphBuilder<'_> {
        GraphBuilder::new(catalog)
    }

    /// Builds a graph with the default cost policy.
    pub fn build(catalog: &Catalog) -> Result<Self, BuildError> {
        GraphBuilder::new(catalog).build()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Looks up a node by MIME type. Aliases are normalized first.
    pub fn node_index(&self, mime: &str) -> Option<usize> {
        self.index.get(&normalize_mime(mime)).copied()
    }

    /// The format entry behind one end of an edge.
    pub fn format(&self, format: FormatRef) -> Option<&FormatEntry> {
        self.formats.get(format.format)
    }

    /// Like [`Graph::format`], for references taken from this graph's own edges.
    pub(crate) fn edge_format(&self, format: FormatRef) -> &FormatEntry {
        &self.formats[format.format]
    }

    /// Edges leaving the node with the given MIME type, in insertion order.
    pub fn outgoing(&self, mime: &str) -> impl Iterator<Item = &Edge> {
        self.node_index(mime)
            .map(|index| self.nodes[index].edges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&edge| &self.edges[edge])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Starts a cheapest-first search for conversion plans.
    ///
    /// With `simple_mode` set, any plan reaching the target format is accepted; otherwise a
    /// plan must end with the target's handler when one is given.
    pub fn search(
        &self,
        from: ConversionStep,
        to: SearchTarget,
        simple_mode: bool,
    ) -> PathSearch<'_> {
        PathSearch::builder(self, from, to)
            .simple_mode(simple_mode)
            .build()
    }

    fn intern_node(&mut self, mime: String) -> usize {
        let nodes = &mut self.nodes;
        *self.index.entry(mime).or_insert_with_key(|mime| {
            nodes.push(Node {
                mime: mime.clone(),
                edges: Vec::new(),
            });
            nodes.len() - 1
        })
    }

}

/// The serialized shape of a [`Graph`], before its indices are checked.
#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    formats: Vec<FormatEntry>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = SnapshotError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        let RawGraph {
            nodes,
            edges,
            formats,
        } = raw;
        let corrupt =
            |message: String| SnapshotError::Generic(format!("Corrupt graph: {}", message));

        let mut index = AHashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.mime.clone(), position).is_some() {
                return Err(corrupt(format!("duplicate node '{}'", node.mime)));
            }
            for &edge in &node.edges {
                match edges.get(edge) {
                    Some(e) if e.from.node == position => {}
                    Some(_) => {
                        return Err(corrupt(format!(
                            "edge {} is listed on node {} but starts elsewhere",
                            edge, position
                        )));
                    }
                    None => {
                        return Err(corrupt(format!(
                            "node {} lists missing edge {}",
                            position, edge
                        )));
                    }
                }
            }
        }

        for (position, edge) in edges.iter().enumerate() {
            for end in [edge.from, edge.to] {
                let node = nodes.get(end.node).ok_or_else(|| {
                    corrupt(format!(
                        "edge {} points at missing node {}",
                        position, end.node
                    ))
                })?;
                let format = formats.get(end.format).ok_or_else(|| {
                    corrupt(format!(
                        "edge {} points at missing format {}",
                        position, end.format
                    ))
                })?;
                if format.mime != node.mime {
                    return Err(corrupt(format!(
                        "edge {} pairs format '{}' with node '{}'",
                        position, format.mime, node.mime
                    )));
                }
            }
            if !nodes[edge.from.node].edges.contains(&position) {
                return Err(corrupt(format!(
                    "edge {} is missing from its source node",
                    position
                )));
            }
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(corrupt(format!(
                    "edge {} has invalid cost {}",
                    position, edge.cost
                )));
            }
        }

        Ok(Graph {
            nodes,
            edges,
            formats,
            index,
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for (index, node) in self.nodes.iter().enumerate() {
            writeln!(f, "{}: {}", index, node.mime)?;
        }
        writeln!(f, "Edges:")?;
        for (index, edge) in self.edges.iter().enumerate() {
            writeln!(
                f,
                "{}: {} -> {} (handler: {}, cost: {})",
                index,
                self.nodes[edge.from.node].mime,
                self.nodes[edge.to.node].mime,
                edge.handler,
                edge.cost
            )?;
        }
        Ok(())
    }
}

/// Configures and runs graph construction.
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
    policy: CostPolicy,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            policy: CostPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the graph, failing on the first malformed handler or format entry.
    #[tracing::instrument(skip_all, fields(handlers = self.catalog.len()))]
    pub fn build(self) -> Result<Graph, BuildError> {
        self.policy.validate()?;
        self.catalog.validate()?;

        let start = Instant::now();
        let mut graph = Graph::default();

        for handler in self.catalog.handlers() {
            let mut inputs = Vec::new();
            let mut outputs = Vec::new();

            for (position, entry) in handler.formats.iter().enumerate() {
                let mime = canonical_mime(&handler.name, position, &entry.mime)?;
                let node = graph.intern_node(mime.clone());
                let format = graph.formats.len();
                graph.formats.push(FormatEntry {
                    mime,
                    ..entry.clone()
                });

                let slot = (position, FormatRef { format, node });
                if entry.accepts_input {
                    inputs.push(slot);
                }
                if entry.produces_output {
                    outputs.push(slot);
                }
            }

            for (&(position, from), &(_, to)) in iproduct!(&inputs, &outputs) {
                if from.node == to.node {
                    continue;
                }
                let cost = self.policy.edge_cost(
                    &graph.formats[from.format],
                    &graph.formats[to.format],
                    position,
                );
                let edge_index = graph.edges.len();
                graph.edges.push(Edge {
                    from,
                    to,
                    handler: handler.name.clone(),
                    cost,
                });
                graph.nodes[from.node].edges.push(edge_index);
            }
        }

        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Conversion graph built in {:.2?}",
            start.elapsed()
        );
        Ok(graph)
    }
}
