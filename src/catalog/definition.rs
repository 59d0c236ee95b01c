use serde::{Deserialize, Serialize};

/// A single file format as declared by one handler.
///
/// Only `mime`, `categories`, the direction flags and `lossless` take part in path finding.
/// The remaining fields are carried through for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEntry {
    /// Format description (long name) for displaying to the user.
    pub name: String,
    /// Short, "formal" name of the format.
    pub format: String,
    /// File extension, without the leading dot.
    pub extension: String,
    /// MIME type. This is the identity of the format inside the graph.
    pub mime: String,
    /// Free-form category tags such as `"image"` or `"audio"`.
    pub categories: Vec<String>,
    /// Whether the handler accepts this format as input.
    pub accepts_input: bool,
    /// Whether the handler produces this format as output.
    pub produces_output: bool,
    /// Identifier the handler uses internally for this format.
    pub internal: String,
    /// Whether producing this format keeps all information of the source.
    pub lossless: bool,
}

impl FormatEntry {
    /// Creates an entry that is neither accepted nor produced, without categories.
    pub fn new(name: &str, format: &str, extension: &str, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            format: format.to_string(),
            extension: extension.to_string(),
            mime: mime.to_string(),
            categories: Vec::new(),
            accepts_input: false,
            produces_output: false,
            internal: format.to_string(),
            lossless: false,
        }
    }

    /// Shorthand for an entry where every descriptive field is derived from the MIME type.
    pub fn from_mime(mime: &str) -> Self {
        let subtype = mime.rsplit('/').next().unwrap_or(mime);
        Self::new(subtype, subtype, subtype, mime)
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.categories.push(category.to_string());
        self
    }

    pub fn with_internal(mut self, internal: &str) -> Self {
        self.internal = internal.to_string();
        self
    }

    pub fn allow_from(mut self) -> Self {
        self.accepts_input = true;
        self
    }

    pub fn allow_to(mut self) -> Self {
        self.produces_output = true;
        self
    }

    pub fn mark_lossless(mut self) -> Self {
        self.lossless = true;
        self
    }

    /// Returns `true` if the two entries have at least one category in common.
    pub fn shares_category_with(&self, other: &FormatEntry) -> bool {
        self.categories.iter().any(|c| other.categories.contains(c))
    }
}

/// A converter as seen by the path finder: a stable name and its ordered format list.
///
/// The position of an entry in `formats` expresses preference: earlier inputs are cheaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    pub name: String,
    pub formats: Vec<FormatEntry>,
}

impl HandlerDescriptor {
    pub fn new(name: &str, formats: Vec<FormatEntry>) -> Self {
        Self {
            name: name.to_string(),
            formats,
        }
    }

    /// Entries this handler accepts as input, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &FormatEntry> {
        self.formats.iter().filter(|f| f.accepts_input)
    }

    /// Entries this handler produces as output, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &FormatEntry> {
        self.formats.iter().filter(|f| f.produces_output)
    }
}
