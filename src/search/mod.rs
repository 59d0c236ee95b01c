//! Cheapest-first enumeration of conversion plans.
//!
//! The search is a Dijkstra variant that keeps going after the first hit. Every node except
//! the destination is expanded at most once, so the number of expansions is bounded by the
//! edge count even when the format graph has cycles. The destination is never closed, which
//! lets costlier plans reach it through other handlers or other routes.

use crate::catalog::normalize_mime;
use crate::graph::Graph;
use crate::plan::{ConversionPlan, ConversionStep};
use ahash::AHashSet;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

mod frontier;

use frontier::Candidate;

/// Emit a progress line every this many iterations.
const PROGRESS_INTERVAL: usize = 100;

/// The format a search should end in, optionally with the handler that must produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub mime: String,
    pub handler: Option<String>,
}

impl SearchTarget {
    pub fn format(mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
            handler: None,
        }
    }

    /// Requires plans to end with `handler`. Ignored in simple mode.
    pub fn via(mut self, handler: &str) -> Self {
        self.handler = Some(handler.to_string());
        self
    }
}

/// Configures a [`PathSearch`].
pub struct PathSearchBuilder<'g> {
    graph: &'g Graph,
    from: ConversionStep,
    to: SearchTarget,
    simple_mode: bool,
    available: Option<AHashSet<String>>,
}

impl<'g> PathSearchBuilder<'g> {
    pub fn new(graph: &'g Graph, from: ConversionStep, to: SearchTarget) -> Self {
        Self {
            graph,
            from,
            to,
            simple_mode: false,
            available: None,
        }
    }

    /// When set, plans are accepted regardless of which handler produced the final step.
    pub fn simple_mode(mut self, simple_mode: bool) -> Self {
        self.simple_mode = simple_mode;
        self
    }

    /// Restricts the search to edges owned by the named handlers.
    pub fn with_available_handlers<I, S>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available = Some(handlers.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> PathSearch<'g> {
        let source = self.graph.node_index(&self.from.format.mime);
        let target = self.graph.node_index(&self.to.mime);

        debug!(
            "Starting path search from {}({}) to {}({}) (simple mode: {})",
            normalize_mime(&self.from.format.mime),
            self.from.handler,
            normalize_mime(&self.to.mime),
            self.to.handler.as_deref().unwrap_or("any"),
            self.simple_mode
        );

        let mut search = PathSearch {
            graph: self.graph,
            origin: self.from,
            target: None,
            required_handler: self.to.handler,
            simple_mode: self.simple_mode,
            available: self.available,
            frontier: BinaryHeap::new(),
            closed: AHashSet::new(),
            next_sequence: 0,
            iterations: 0,
            plans_found: 0,
            finished: false,
        };

        match (source, target) {
            (Some(source), Some(target)) => {
                search.target = Some(target);
                search.push(0.0, source, Vec::new());
            }
            _ => {
                debug!("Source or target format is not part of the graph");
                search.finished = true;
            }
        }
        search
    }
}

/// A lazy, cheapest-first stream of conversion plans.
///
/// Each call to [`Iterator::next`] runs the search until the next accepted plan or until
/// the work set is exhausted. Plans come out in non-decreasing cost order. Dropping the
/// iterator abandons the search.
pub struct PathSearch<'g> {
    graph: &'g Graph,
    origin: ConversionStep,
    target: Option<usize>,
    required_handler: Option<String>,
    simple_mode: bool,
    available: Option<AHashSet<String>>,
    frontier: BinaryHeap<Candidate>,
    closed: AHashSet<usize>,
    next_sequence: u64,
    iterations: usize,
    plans_found: usize,
    finished: bool,
}

impl<'g> PathSearch<'g> {
    pub fn builder(
        graph: &'g Graph,
        from: ConversionStep,
        to: SearchTarget,
    ) -> PathSearchBuilder<'g> {
        PathSearchBuilder::new(graph, from, to)
    }

    /// Number of work-set entries popped so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of plans yielded so far.
    pub fn plans_found(&self) -> usize {
        self.plans_found
    }

    fn push(&mut self, cost: f64, node: usize, hops: Vec<usize>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.frontier.push(Candidate {
            cost,
            sequence,
            node,
            hops,
        });
    }

    fn final_handler(&self, candidate: &Candidate) -> &str {
        candidate
            .hops
            .last()
            .map_or(self.origin.handler.as_str(), |&edge| {
                self.graph.edges()[edge].handler.as_str()
            })
    }

    fn accepts(&self, candidate: &Candidate) -> bool {
        self.simple_mode
            || self
                .required_handler
                .as_deref()
                .is_none_or(|required| required == self.final_handler(candidate))
    }

    fn expand(&mut self, current: &Candidate) {
        let graph = self.graph;
        for &edge_index in &graph.nodes()[current.node].edges {
            let edge = &graph.edges()[edge_index];
            if self.closed.contains(&edge.to.node) {
                continue;
            }
            if self
                .available
                .as_ref()
                .is_some_and(|available| !available.contains(&edge.handler))
            {
                continue;
            }
            let mut hops = current.hops.clone();
            hops.push(edge_index);
            self.push(current.cost + edge.cost, edge.to.node, hops);
        }
    }

    fn materialize(&self, candidate: &Candidate) -> ConversionPlan {
        let graph = self.graph;
        let steps = std::iter::once(self.origin.clone())
            .chain(candidate.hops.iter().map(|&edge_index| {
                let edge = &graph.edges()[edge_index];
                ConversionStep {
                    handler: edge.handler.clone(),
                    format: graph.edge_format(edge.to).clone(),
                }
            }))
            .collect();
        ConversionPlan::new(steps, candidate.cost)
    }
}

impl Iterator for PathSearch<'_> {
    type Item = ConversionPlan;

    fn next(&mut self) -> Option<ConversionPlan> {
        let target = self.target?;

        while let Some(current) = self.frontier.pop() {
            self.iterations += 1;
            if self.iterations % PROGRESS_INTERVAL == 0 {
                debug!(
                    iterations = self.iterations,
                    plans_found = self.plans_found,
                    queued = self.frontier.len(),
                    "Still searching"
                );
            }

            if current.node == target {
                let accepted = self.accepts(&current);
                debug!(
                    iteration = self.iterations,
                    cost = current.cost,
                    hops = current.hops.len(),
                    handler = self.final_handler(&current),
                    accepted,
                    "Reached target format"
                );
                if accepted {
                    self.plans_found += 1;
                    return Some(self.materialize(&current));
                }
                continue;
            }

            if !self.closed.insert(current.node) {
                trace!(node = current.node, "Skipping closed node");
                continue;
            }
            self.expand(&current);
        }

        if !self.finished {
            self.finished = true;
            debug!(
                iterations = self.iterations,
                plans_found = self.plans_found,
                "Path search completed"
            );
        }
        None
    }
}
