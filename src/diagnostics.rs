//! # Diagnostics
//!
//! The unified, `miette`-based error type for the syntax-object layer. There are
//! three failure kinds and nothing here catches or retries them:
//!
//! - **MalformedTemplate**: `datum_to_syntax` and friends were handed a template
//!   that is not an identifier.
//! - **MalformedSyntaxList**: a traversal met an improper tail, an index past the
//!   end, or two parallel lists of different lengths.
//! - **InvalidStructure**: a representation invariant did not hold, or host
//!   configuration could not be read. These are defects, not user errors.
//!
//! Every error carries the offending syntax object when there is one, and its
//! source location feeds the primary label.
//!
//! # Error Construction Macros
//!
//! - `err_stx!(MalformedSyntaxList, &stx, "expected a list, got {}", stx)`
//!   builds an error located at `stx`.
//! - `err_msg!(InvalidStructure, "bad options: {}", reason)` builds one with no
//!   syntax attached.
//!
//! Attach the original program text with [`StxError::with_source`] so reports
//! can render a snippet.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::{SourceLocation, Span, Stx};

pub type SourceArc = Arc<NamedSource<String>>;

pub type StxResult<T> = Result<T, StxError>;

/// Type-safe classification of [`StxError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    MalformedTemplate,
    MalformedSyntaxList,
    InvalidStructure,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedTemplate => "MalformedTemplate",
            ErrorType::MalformedSyntaxList => "MalformedSyntaxList",
            ErrorType::InvalidStructure => "InvalidStructure",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An extra label pointing at related syntax.
#[derive(Debug, Clone)]
pub struct RelatedLabel {
    pub span: Span,
    pub label: String,
}

/// Source, location, and help for one diagnostic.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub location: Option<SourceLocation>,
    pub help: Option<String>,
    pub related: Vec<RelatedLabel>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    /// Context located wherever `stx` says it came from.
    pub fn for_stx(stx: &Stx) -> Self {
        Self {
            location: crate::syntax::stx_source(stx),
            ..Self::default()
        }
    }
}

/// Errors raised by syntax-object operations.
#[derive(Debug, Error)]
pub enum StxError {
    #[error("Malformed template: {message}")]
    MalformedTemplate {
        message: String,
        stx: Option<Stx>,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Malformed syntax list: {message}")]
    MalformedSyntaxList {
        message: String,
        stx: Option<Stx>,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Invalid structure: {message}")]
    InvalidStructure {
        message: String,
        stx: Option<Stx>,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl StxError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            StxError::MalformedTemplate { ctx, .. }
            | StxError::MalformedSyntaxList { ctx, .. }
            | StxError::InvalidStructure { ctx, .. } => ctx,
        }
    }

    fn get_ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            StxError::MalformedTemplate { ctx, .. }
            | StxError::MalformedSyntaxList { ctx, .. }
            | StxError::InvalidStructure { ctx, .. } => ctx,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            StxError::MalformedTemplate { .. } => ErrorType::MalformedTemplate,
            StxError::MalformedSyntaxList { .. } => ErrorType::MalformedSyntaxList,
            StxError::InvalidStructure { .. } => ErrorType::InvalidStructure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StxError::MalformedTemplate { message, .. }
            | StxError::MalformedSyntaxList { message, .. }
            | StxError::InvalidStructure { message, .. } => message,
        }
    }

    /// The offending syntax object, if the error was raised against one.
    pub fn stx(&self) -> Option<&Stx> {
        match self {
            StxError::MalformedTemplate { stx, .. }
            | StxError::MalformedSyntaxList { stx, .. }
            | StxError::InvalidStructure { stx, .. } => stx.as_ref(),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.get_ctx().location.as_ref()
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.get_ctx_mut().help = Some(help.into());
        self
    }

    pub fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.get_ctx_mut().related.push(RelatedLabel {
            span,
            label: label.into(),
        });
        self
    }

    /// Attaches program text so the report can render a snippet.
    pub fn with_source(mut self, name: impl AsRef<str>, text: impl AsRef<str>) -> Self {
        self.get_ctx_mut().source = Some(Arc::new(NamedSource::new(
            name.as_ref(),
            text.as_ref().to_string(),
        )));
        self
    }

    pub fn with_cause(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        let boxed: Box<dyn std::error::Error + Send + Sync + 'static> = Box::new(cause);
        match self {
            StxError::MalformedTemplate { message, stx, ctx, .. } => StxError::MalformedTemplate {
                message,
                stx,
                ctx,
                source: Some(boxed),
            },
            StxError::MalformedSyntaxList { message, stx, ctx, .. } => {
                StxError::MalformedSyntaxList {
                    message,
                    stx,
                    ctx,
                    source: Some(boxed),
                }
            }
            StxError::InvalidStructure { message, stx, ctx, .. } => StxError::InvalidStructure {
                message,
                stx,
                ctx,
                source: Some(boxed),
            },
        }
    }
}

impl Diagnostic for StxError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("stx::{}", self.error_type())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.get_ctx();
        let mut labels = Vec::new();
        if let Some(loc) = &ctx.location {
            labels.push(LabeledSpan::new(
                Some(self.message().to_string()),
                loc.span.start,
                loc.span.label_len(),
            ));
        }
        for rel in &ctx.related {
            labels.push(LabeledSpan::new(
                Some(rel.label.clone()),
                rel.span.start,
                rel.span.label_len(),
            ));
        }
        if labels.is_empty() {
            None
        } else {
            Some(Box::new(labels.into_iter()))
        }
    }
}

/// Builds a [`StxError`] variant located at a syntax object.
#[macro_export]
macro_rules! err_stx {
    ($variant:ident, $stx:expr, $($fmt:tt)+) => {{
        let stx: &$crate::Stx = $stx;
        $crate::StxError::$variant {
            message: format!($($fmt)+),
            stx: Some(stx.clone()),
            ctx: $crate::ErrorContext::for_stx(stx),
            source: None,
        }
    }};
}

/// Builds a [`StxError`] variant with a message and no syntax attached.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($fmt:tt)+) => {
        $crate::StxError::$variant {
            message: format!($($fmt)+),
            stx: None,
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    fn located(start: usize, end: usize) -> Stx {
        Stx::source_node(
            Stx::int(1),
            Some(SourceLocation::new(Span::new(start, end), 1, start as u32 + 1)),
        )
    }

    #[test]
    fn test_err_stx_captures_location_and_syntax() {
        let stx = located(4, 7);
        let err = err_stx!(MalformedSyntaxList, &stx, "not a list: {}", stx);
        assert_eq!(err.error_type(), ErrorType::MalformedSyntaxList);
        assert_eq!(err.message(), "not a list: 1");
        assert_eq!(err.location().map(|l| l.span), Some(Span::new(4, 7)));
        assert!(err.stx().is_some_and(|s| s.ptr_eq(&stx)));
    }

    #[test]
    fn test_err_msg_has_no_location() {
        let err = err_msg!(InvalidStructure, "bad {}", "options");
        assert_eq!(err.to_string(), "Invalid structure: bad options");
        assert!(err.location().is_none());
        assert!(err.stx().is_none());
    }

    #[test]
    fn test_report_renders_label_help_and_related() {
        let stx = located(0, 3);
        let err = err_stx!(MalformedTemplate, &stx, "expected identifier")
            .with_help("pass an identifier as the template")
            .with_related(Span::new(4, 7), "used here")
            .with_source("macro.sutra", "abc def");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("expected identifier"));
        assert!(output.contains("pass an identifier as the template"));
        assert!(output.contains("used here"));
        assert!(output.contains("stx::MalformedTemplate"));
    }

    #[test]
    fn test_error_chaining() {
        let cause = err_msg!(InvalidStructure, "inner defect");
        let err = err_stx!(MalformedSyntaxList, &located(0, 1), "outer").with_cause(cause);
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("outer"));
        assert!(output.contains("inner defect"));
    }
}
