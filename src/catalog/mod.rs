use crate::error::CatalogError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

mod cache;
pub mod conversion;
pub mod definition;
mod media_type;

pub use cache::FormatCache;
pub use conversion::IntoCatalog;
pub use definition::{FormatEntry, HandlerDescriptor};
pub use media_type::normalize_mime;
pub(crate) use media_type::canonical_mime;

/// The ordered list of handlers a graph is built from.
///
/// Order matters: handlers and their format lists are visited in catalog order during graph
/// construction, which keeps edge indices reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    handlers: Vec<HandlerDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a handler list as-is. Call [`Catalog::validate`] or go through
    /// [`IntoCatalog`] to reject malformed input early.
    pub fn from_handlers(handlers: Vec<HandlerDescriptor>) -> Self {
        Self { handlers }
    }

    /// Adds a handler at runtime.
    ///
    /// A handler already registered under the same name is dropped, and the new one is
    /// appended at the end of the catalog. Graphs built earlier are not affected; rebuild to
    /// pick up the change.
    pub fn register(&mut self, handler: HandlerDescriptor) {
        self.handlers.retain(|h| h.name != handler.name);
        self.handlers.push(handler);
    }

    /// Removes the named handler, returning it if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<HandlerDescriptor> {
        let position = self.handlers.iter().position(|h| h.name == name)?;
        Some(self.handlers.remove(position))
    }

    pub fn handlers(&self) -> &[HandlerDescriptor] {
        &self.handlers
    }

    pub fn handler(&self, name: &str) -> Option<&HandlerDescriptor> {
        self.handlers.iter().find(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Checks handler names and every entry's MIME type.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = AHashSet::new();
        for (position, handler) in self.handlers.iter().enumerate() {
            if handler.name.trim().is_empty() {
                return Err(CatalogError::EmptyHandlerName { position });
            }
            if !seen.insert(handler.name.as_str()) {
                return Err(CatalogError::DuplicateHandler {
                    handler: handler.name.clone(),
                });
            }
            for (index, entry) in handler.formats.iter().enumerate() {
                canonical_mime(&handler.name, index, &entry.mime)?;
            }
        }
        Ok(())
    }
}

impl From<Vec<HandlerDescriptor>> for Catalog {
    fn from(handlers: Vec<HandlerDescriptor>) -> Self {
        Self::from_handlers(handlers)
    }
}
