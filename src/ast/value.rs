//! Host data carried inside syntax objects.
//!
//! A [`Datum`] is a literal value with no syntax metadata attached: booleans,
//! characters, numbers, symbols, strings, keywords, void, and the compound
//! shapes (pairs, vectors, boxes) whose children are themselves [`Stx`] so that
//! partially wrapped trees can be represented without copying.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ast::{Repr, Stx};

// ============================================================================
// SYMBOLS
// ============================================================================

/// A symbol name.
///
/// Interned symbols compare by name. Generated symbols (see
/// [`Gensym::fresh_symbol`](crate::hygiene::Gensym::fresh_symbol)) also carry a
/// process-unique serial, so they never equal a symbol the programmer wrote,
/// even when the printed stem is the same.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::Symbol;
/// let a = Symbol::intern("tmp");
/// assert_eq!(a, Symbol::intern("tmp"));
/// assert_eq!(a.name(), "tmp");
/// assert!(!a.is_generated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    name: Arc<str>,
    serial: Option<u64>,
}

impl Symbol {
    pub fn intern(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            serial: None,
        }
    }

    pub(crate) fn generated(stem: &str, serial: u64) -> Self {
        Self {
            name: Arc::from(stem),
            serial: Some(serial),
        }
    }

    /// The printed stem, without any generated suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_generated(&self) -> bool {
        self.serial.is_some()
    }

    pub fn serial(&self) -> Option<u64> {
        self.serial
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.serial {
            Some(n) => write!(f, "{}%{}", self.name, n),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::intern(name)
    }
}

// ============================================================================
// HOST LITERAL EXTENSION POINT
// ============================================================================

/// Additional opaque literal kinds defined outside this crate.
///
/// The host registers its own literal types (byte vectors, records, foreign
/// handles...) by implementing this trait and wrapping values with
/// [`Stx::host`]. Self-quoting host literals count as data for
/// [`stx_is_datum`](crate::syntax::stx_is_datum).
pub trait HostLiteral: fmt::Debug + Send + Sync + 'static {
    /// Short type name used in diagnostics.
    fn type_name(&self) -> &'static str;

    fn is_self_quoting(&self) -> bool {
        true
    }

    /// Value equivalence against another host literal (`eqv?`).
    fn eqv(&self, other: &dyn HostLiteral) -> bool;

    fn as_any(&self) -> &dyn Any;
}

// ============================================================================
// DATUM
// ============================================================================

/// A cons cell. Both halves are syntax objects so wrapped children can live
/// under a raw pair.
#[derive(Debug, Clone)]
pub struct Pair {
    pub car: Stx,
    pub cdr: Stx,
}

impl Drop for Pair {
    /// Unlinks the cdr chain one node at a time. Nodes still referenced
    /// elsewhere stop the walk and are left to their other owners.
    fn drop(&mut self) {
        let mut next = std::mem::replace(&mut self.cdr, Stx::null());
        while let Some(rest) = unlink(next) {
            next = rest;
        }
    }
}

/// Takes the spine child out of a uniquely owned node.
fn unlink(stx: Stx) -> Option<Stx> {
    match stx.0 {
        Repr::Datum(Datum::Pair(p)) => Arc::try_unwrap(p)
            .ok()
            .map(|mut p| std::mem::replace(&mut p.cdr, Stx::null())),
        Repr::Source(s) => Arc::try_unwrap(s).ok().map(|s| s.e),
        Repr::Wrap(w) => Arc::try_unwrap(w).ok().map(|w| w.e),
        _ => None,
    }
}

/// A raw host value with no provenance or hygiene context.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::Datum;
/// assert_eq!(Datum::Int(3).type_name(), "number");
/// assert!(Datum::Bool(false).is_self_quoting());
/// assert!(!Datum::Null.is_self_quoting());
/// ```
#[derive(Debug, Clone)]
pub enum Datum {
    /// The empty list.
    Null,
    Void,
    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    Symbol(Symbol),
    Keyword(Symbol),
    String(Arc<str>),
    Pair(Arc<Pair>),
    Vector(im::Vector<Stx>),
    Boxed(Arc<Stx>),
    Host(Arc<dyn HostLiteral>),
}

impl Datum {
    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Void => "void",
            Datum::Bool(_) => "boolean",
            Datum::Char(_) => "char",
            Datum::Int(_) | Datum::Float(_) => "number",
            Datum::Symbol(_) => "symbol",
            Datum::Keyword(_) => "keyword",
            Datum::String(_) => "string",
            Datum::Pair(_) => "pair",
            Datum::Vector(_) => "vector",
            Datum::Boxed(_) => "box",
            Datum::Host(h) => h.type_name(),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Datum::Bool(_))
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Datum::Char(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Datum::Int(_) | Datum::Float(_))
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Datum::Keyword(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Datum::String(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Datum::Void)
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Datum::Symbol(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// Literals that evaluate to themselves and carry no identifiers.
    pub fn is_self_quoting(&self) -> bool {
        match self {
            Datum::Bool(_)
            | Datum::Char(_)
            | Datum::Int(_)
            | Datum::Float(_)
            | Datum::Keyword(_)
            | Datum::String(_)
            | Datum::Void => true,
            Datum::Host(h) => h.is_self_quoting(),
            _ => false,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Datum::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Datum::Pair(p) => Some(p),
            _ => None,
        }
    }

    /// `eq?`: identity for heap data, value for immediates.
    pub fn eq(&self, other: &Datum) -> bool {
        match (self, other) {
            (Datum::Null, Datum::Null) | (Datum::Void, Datum::Void) => true,
            (Datum::Bool(a), Datum::Bool(b)) => a == b,
            (Datum::Char(a), Datum::Char(b)) => a == b,
            (Datum::Int(a), Datum::Int(b)) => a == b,
            (Datum::Float(a), Datum::Float(b)) => a.to_bits() == b.to_bits(),
            (Datum::Symbol(a), Datum::Symbol(b)) => a == b,
            (Datum::Keyword(a), Datum::Keyword(b)) => a == b,
            (Datum::String(a), Datum::String(b)) => Arc::ptr_eq(a, b),
            (Datum::Pair(a), Datum::Pair(b)) => Arc::ptr_eq(a, b),
            (Datum::Vector(a), Datum::Vector(b)) => a.ptr_eq(b),
            (Datum::Boxed(a), Datum::Boxed(b)) => Arc::ptr_eq(a, b),
            (Datum::Host(a), Datum::Host(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }

    /// `eqv?`: like [`Datum::eq`], but host literals compare by their own
    /// equivalence.
    pub fn eqv(&self, other: &Datum) -> bool {
        match (self, other) {
            (Datum::Host(a), Datum::Host(b)) => a.eqv(b.as_ref()),
            _ => self.eq(other),
        }
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<i64> for Datum {
    fn from(n: i64) -> Self {
        Datum::Int(n)
    }
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Datum::Float(n)
    }
}

impl From<char> for Datum {
    fn from(c: char) -> Self {
        Datum::Char(c)
    }
}

impl From<Symbol> for Datum {
    fn from(s: Symbol) -> Self {
        Datum::Symbol(s)
    }
}
