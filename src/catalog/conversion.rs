use super::{Catalog, HandlerDescriptor};
use crate::error::CatalogError;

/// A trait for custom handler listings that can be converted into a [`Catalog`].
///
/// This is the extension point for feeding the path finder from whatever registry an
/// application already has. Implement it on your own types and the graph builder can
/// consume them.
///
/// # Example
///
/// ```rust,no_run
/// use convroute::prelude::*;
/// use convroute::error::CatalogError;
///
/// struct MyCodec { id: &'static str, reads: Vec<&'static str>, writes: Vec<&'static str> }
///
/// struct MyRegistry { codecs: Vec<MyCodec> }
///
/// impl IntoCatalog for MyRegistry {
///     fn into_catalog(self) -> std::result::Result<Catalog, CatalogError> {
///         let handlers = self
///             .codecs
///             .into_iter()
///             .map(|codec| {
///                 let mut formats: Vec<FormatEntry> = codec
///                     .reads
///                     .iter()
///                     .map(|mime| FormatEntry::from_mime(mime).allow_from())
///                     .collect();
///                 formats.extend(
///                     codec.writes.iter().map(|mime| FormatEntry::from_mime(mime).allow_to()),
///                 );
///                 HandlerDescriptor::new(codec.id, formats)
///             })
///             .collect::<Vec<_>>();
///         handlers.into_catalog()
///     }
/// }
/// ```
pub trait IntoCatalog {
    /// Consumes the object and converts it into a validated handler catalog.
    fn into_catalog(self) -> Result<Catalog, CatalogError>;
}

impl IntoCatalog for Vec<HandlerDescriptor> {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog::from_handlers(self);
        catalog.validate()?;
        Ok(catalog)
    }
}

impl IntoCatalog for Catalog {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        self.validate()?;
        Ok(self)
    }
}
