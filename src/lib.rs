//! # convroute - Conversion Path Finding
//!
//! **convroute** finds ways to turn a file of one format into another by chaining format
//! handlers, each of which only converts directly between a handful of formats. It builds a
//! graph whose nodes are MIME types and whose edges are the direct conversions each handler
//! offers, prices every edge with a tunable cost policy, and enumerates multi-step plans from
//! the cheapest upwards.
//!
//! ## Core Workflow
//!
//! 1.  **Describe Your Handlers**: Build a [`Catalog`](catalog::Catalog) of
//!     [`HandlerDescriptor`](catalog::HandlerDescriptor)s, load one from a JSON format cache,
//!     or implement [`IntoCatalog`](catalog::IntoCatalog) for your own registry.
//! 2.  **Build**: Use [`Graph::builder`](graph::Graph::builder) to turn the catalog into an
//!     immutable graph, optionally with a custom [`CostPolicy`](graph::CostPolicy).
//! 3.  **Search**: Call [`Graph::search`](graph::Graph::search) and pull plans from the
//!     returned iterator. Plans arrive cheapest first; stop pulling once you have one you like.
//! 4.  **Execute**: Resolve each step's handler name to your own handler objects and run the
//!     conversions in order. Executing plans is up to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convroute::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let svg = FormatEntry::new("Scalable Vector Graphics", "svg", "svg", "image/svg+xml");
//!     let png = FormatEntry::new("Portable Network Graphics", "png", "png", "image/png")
//!         .with_category("image");
//!     let jpeg = FormatEntry::new("JPEG", "jpeg", "jpg", "image/jpeg").with_category("image");
//!
//!     let catalog = Catalog::from_handlers(vec![
//!         HandlerDescriptor::new(
//!             "rasterizer",
//!             vec![svg.clone().allow_from(), png.clone().allow_to().mark_lossless()],
//!         ),
//!         HandlerDescriptor::new("encoder", vec![png.allow_from(), jpeg.allow_to()]),
//!     ]);
//!
//!     let graph = Graph::builder(&catalog).build()?;
//!
//!     let origin = ConversionStep::new("upload", svg);
//!     for plan in graph.search(origin, SearchTarget::format("image/jpeg"), true).take(3) {
//!         println!("{} (cost {})", PlanFormatter::format_plan(&plan), plan.cost());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod plan;
pub mod prelude;
pub mod search;
