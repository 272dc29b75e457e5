//! Syntax-object representation for the Sutra macro expander.
//!
//! A [`Stx`] is either a raw [`Datum`] or one of four syntax nodes:
//!
//! - **source node**: a value tagged with an optional [`SourceLocation`];
//! - **identifier**: a [`Symbol`] with its ordered mark sequence;
//! - **deferred wrap**: "apply this mark to everything inside", not yet pushed down;
//! - **sealed quote**: a template datum frozen with its definition-site context.
//!
//! Nodes are immutable once built and shared through `Arc`, so the same subtree
//! can sit in several expansion attempts at once. The variant tag is private to
//! the crate: callers inspect syntax through the accessors in [`crate::syntax`]
//! and rebuild it through the constructors in [`builder`].

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hygiene::{Mark, Marks};

pub mod builder;
pub mod value;

pub use value::{Datum, HostLiteral, Pair, Symbol};

// ============================================================================
// SOURCE LOCATIONS
// ============================================================================

/// Byte range in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Length for diagnostic labels; empty spans still get a one-byte caret.
    pub fn label_len(&self) -> usize {
        if self.end > self.start {
            self.end - self.start
        } else {
            1
        }
    }
}

/// Where a piece of syntax came from. Opaque to the hygiene algorithm, which
/// only threads it through unwraps.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::{SourceLocation, Span};
/// let loc = SourceLocation::new(Span::new(4, 9), 1, 5).with_file("story.sutra");
/// assert_eq!(loc.to_string(), "story.sutra:1:5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: Option<Arc<str>>,
    pub span: Span,
    pub line: u32,
    pub col: u32,
}

impl SourceLocation {
    pub fn new(span: Span, line: u32, col: u32) -> Self {
        SourceLocation {
            file: None,
            span,
            line,
            col,
        }
    }

    pub fn with_file(mut self, file: impl AsRef<str>) -> Self {
        self.file = Some(Arc::from(file.as_ref()));
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A syntax object: raw data or a syntax node.
///
/// Cloning is cheap (reference counts only).
#[derive(Clone)]
pub struct Stx(pub(crate) Repr);

/// Variant classification. Every other module in the crate branches on this;
/// nothing outside the crate can.
#[derive(Clone)]
pub(crate) enum Repr {
    Datum(Datum),
    Source(Arc<SourceNode>),
    Ident(Arc<Identifier>),
    Wrap(Arc<DeferredWrap>),
    Quote(Arc<SealedQuote>),
}

/// Provenance only; no hygiene context.
pub(crate) struct SourceNode {
    pub e: Stx,
    pub loc: Option<SourceLocation>,
}

pub(crate) struct Identifier {
    pub sym: Symbol,
    pub loc: Option<SourceLocation>,
    pub marks: Marks,
}

/// `mark` applies to every identifier eventually found under `e`.
/// `e` is never an identifier or a sealed quote.
pub(crate) struct DeferredWrap {
    pub e: Stx,
    pub loc: Option<SourceLocation>,
    pub mark: Mark,
}

/// Template syntax frozen at its definition site. Terminal for mark application.
pub(crate) struct SealedQuote {
    pub e: Stx,
    pub loc: Option<SourceLocation>,
    pub context: Option<Stx>,
    pub marks: Marks,
}

impl Stx {
    /// True for every syntax node; false for raw data.
    pub fn is_syntax(&self) -> bool {
        !matches!(self.0, Repr::Datum(_))
    }

    /// The raw datum, if this object carries no syntax node at the top.
    pub fn as_datum(&self) -> Option<&Datum> {
        match &self.0 {
            Repr::Datum(d) => Some(d),
            _ => None,
        }
    }

    /// Node identity. Two handles are `ptr_eq` when they share the same
    /// allocation (or are the same immediate value).
    pub fn ptr_eq(&self, other: &Stx) -> bool {
        match (&self.0, &other.0) {
            (Repr::Source(a), Repr::Source(b)) => Arc::ptr_eq(a, b),
            (Repr::Ident(a), Repr::Ident(b)) => Arc::ptr_eq(a, b),
            (Repr::Wrap(a), Repr::Wrap(b)) => Arc::ptr_eq(a, b),
            (Repr::Quote(a), Repr::Quote(b)) => Arc::ptr_eq(a, b),
            (Repr::Datum(a), Repr::Datum(b)) => a.eq(b),
            _ => false,
        }
    }

    pub(crate) fn from_identifier(id: Identifier) -> Stx {
        Stx(Repr::Ident(Arc::new(id)))
    }

    /// Only the hygiene algorithm builds deferred wraps, and only over
    /// structural data.
    pub(crate) fn deferred_wrap(e: Stx, loc: Option<SourceLocation>, mark: Mark) -> Stx {
        debug_assert!(!matches!(e.0, Repr::Ident(_) | Repr::Quote(_)));
        Stx(Repr::Wrap(Arc::new(DeferredWrap { e, loc, mark })))
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl fmt::Display for Stx {
    /// Prints the stripped s-expression; marks and locations are not shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Datum(d) => fmt_datum(f, d, false),
            Repr::Source(s) => fmt::Display::fmt(&s.e, f),
            Repr::Ident(id) => write!(f, "{}", id.sym),
            Repr::Wrap(w) => fmt::Display::fmt(&w.e, f),
            Repr::Quote(q) => fmt::Display::fmt(&q.e, f),
        }
    }
}

impl fmt::Debug for Stx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Datum(d) => fmt_datum(f, d, true),
            Repr::Source(s) => match &s.loc {
                Some(loc) => write!(f, "#<syntax {:?} @{}>", s.e, loc),
                None => write!(f, "#<syntax {:?}>", s.e),
            },
            Repr::Ident(id) => {
                write!(f, "#<identifier {} ", id.sym)?;
                fmt_marks(f, &id.marks)?;
                write!(f, ">")
            }
            Repr::Wrap(w) => write!(f, "#<wrap {} {:?}>", w.mark, w.e),
            Repr::Quote(q) => {
                write!(f, "#<quote {:?} ", q.e)?;
                fmt_marks(f, &q.marks)?;
                write!(f, ">")
            }
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_datum(f, self, false)
    }
}

fn fmt_marks(f: &mut fmt::Formatter<'_>, marks: &Marks) -> fmt::Result {
    write!(f, "[")?;
    for (i, m) in marks.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", m)?;
    }
    write!(f, "]")
}

fn fmt_child(f: &mut fmt::Formatter<'_>, stx: &Stx, debug: bool) -> fmt::Result {
    if debug {
        fmt::Debug::fmt(stx, f)
    } else {
        fmt::Display::fmt(stx, f)
    }
}

/// Peels syntax nodes off a list tail so `(a . #<wrap (b)>)` still prints as a
/// list in display mode.
fn display_tail(stx: &Stx) -> Option<&Datum> {
    let mut cur = stx;
    loop {
        match &cur.0 {
            Repr::Datum(d) => return Some(d),
            Repr::Source(s) => cur = &s.e,
            Repr::Wrap(w) => cur = &w.e,
            Repr::Quote(q) => cur = &q.e,
            Repr::Ident(_) => return None,
        }
    }
}

fn fmt_datum(f: &mut fmt::Formatter<'_>, datum: &Datum, debug: bool) -> fmt::Result {
    match datum {
        Datum::Null => write!(f, "()"),
        Datum::Void => write!(f, "#!void"),
        Datum::Bool(true) => write!(f, "#t"),
        Datum::Bool(false) => write!(f, "#f"),
        Datum::Char(c) => write!(f, "#\\{}", c),
        Datum::Int(n) => write!(f, "{}", n),
        Datum::Float(n) => write!(f, "{:?}", n),
        Datum::Symbol(s) => write!(f, "{}", s),
        Datum::Keyword(k) => write!(f, "{}:", k),
        Datum::String(s) => write!(f, "{:?}", s),
        Datum::Host(h) => write!(f, "#<{} {:?}>", h.type_name(), h),
        Datum::Boxed(b) => {
            write!(f, "#&")?;
            fmt_child(f, b, debug)
        }
        Datum::Vector(items) => {
            write!(f, "#(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                fmt_child(f, item, debug)?;
            }
            write!(f, ")")
        }
        Datum::Pair(pair) => {
            write!(f, "(")?;
            fmt_child(f, &pair.car, debug)?;
            let mut rest = pair.cdr.clone();
            loop {
                let tail = if debug {
                    rest.as_datum()
                } else {
                    display_tail(&rest)
                };
                match tail {
                    Some(Datum::Null) => break,
                    Some(Datum::Pair(next)) => {
                        write!(f, " ")?;
                        fmt_child(f, &next.car, debug)?;
                        let cdr = next.cdr.clone();
                        rest = cdr;
                    }
                    _ => {
                        write!(f, " . ")?;
                        fmt_child(f, &rest, debug)?;
                        break;
                    }
                }
            }
            write!(f, ")")
        }
    }
}
