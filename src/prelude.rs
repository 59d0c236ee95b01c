//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the convroute crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use convroute::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = Catalog::from_file("path/to/format-cache.json")?;
//! let policy = CostPolicy::from_file("path/to/policy.json")?;
//! let graph = Graph::builder(&catalog).with_policy(policy).build()?;
//!
//! let origin = ConversionStep::new("upload", FormatEntry::from_mime("image/svg+xml"));
//! if let Some(plan) = graph.search(origin, SearchTarget::format("image/png"), true).next() {
//!     println!("Best plan: {}", PlanFormatter::format_plan(&plan));
//! } else {
//!     println!("No conversion path available");
//! }
//! # Ok(())
//! # }
//! ```

// Catalog
pub use crate::catalog::{Catalog, FormatEntry, HandlerDescriptor, IntoCatalog, normalize_mime};

// Graph construction
pub use crate::graph::{CategoryPenalty, CostPolicy, Edge, Graph, GraphBuilder, Node};

// Search and plans
pub use crate::plan::{ConversionPlan, ConversionStep, PlanFormatter};
pub use crate::search::{PathSearch, SearchTarget};

// Error types
pub use crate::error::{BuildError, CatalogError, PolicyError, SnapshotError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
