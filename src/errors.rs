//! Error types with rich diagnostics using miette
//!
//! Parse errors carry source spans into the profile JSON; validation and
//! render errors name the offending branch or node.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<profile>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column pair, clamped to the source length
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (idx, text) in self.source.split_inclusive('\n').enumerate() {
            if idx + 1 == line {
                return (offset + column.saturating_sub(1)).min(self.source.len());
            }
            offset += text.len();
        }
        self.source.len()
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading profile JSON
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("invalid profile JSON: {message}")]
    #[diagnostic(code(persona_sunburst::parse::invalid_json))]
    InvalidJson {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid chart options: {message}")]
    #[diagnostic(code(persona_sunburst::parse::invalid_options))]
    InvalidOptions {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn json(ctx: &SourceContext, err: &serde_json::Error) -> Self {
        let offset = ctx.offset_of(err.line(), err.column());
        ParseError::InvalidJson {
            message: err.to_string(),
            src: ctx.named_source(),
            span: (offset, 0).into(),
        }
    }

    pub(crate) fn options(ctx: &SourceContext, err: &serde_json::Error) -> Self {
        let offset = ctx.offset_of(err.line(), err.column());
        ParseError::InvalidOptions {
            message: err.to_string(),
            src: ctx.named_source(),
            span: (offset, 0).into(),
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Malformed profile records, detected before any tree is built
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ValidationError {
    #[error("profile is missing the required `{branch}` branch")]
    #[diagnostic(
        code(persona_sunburst::profile::missing_branch),
        help("`personality`, `needs` and `values` must all be present")
    )]
    MissingBranch { branch: &'static str },

    #[error("profile branch `{branch}` has no entries")]
    #[diagnostic(code(persona_sunburst::profile::empty_branch))]
    EmptyBranch { branch: &'static str },

    #[error("score of `{id}` is not a finite number ({value})")]
    #[diagnostic(code(persona_sunburst::profile::invalid_score))]
    InvalidScore { id: String, value: f64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering or interaction
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid chart dimensions: {width}x{height}")]
    #[diagnostic(code(persona_sunburst::render::invalid_dimensions))]
    InvalidDimensions { width: f64, height: f64 },

    #[error("no sector with key `{key}`")]
    #[diagnostic(
        code(persona_sunburst::render::unknown_node),
        help("events can only target sectors of the last rendered layout")
    )]
    UnknownNode { key: String },

    #[error("nothing has been rendered yet")]
    #[diagnostic(code(persona_sunburst::render::not_rendered))]
    NotRendered,

    #[error("XML serialization error: {message}")]
    #[diagnostic(code(persona_sunburst::render::serialize))]
    Serialize { message: String },
}
