//! # Syntax Object Constructors
//!
//! Pure data construction for every public kind of [`Stx`]. Nothing here can
//! fail and nothing here touches the gensym counter; fresh identifiers come from
//! [`crate::syntax::genident`].
//!
//! Deferred wraps have no public constructor. They are produced only by
//! [`crate::hygiene::stx_apply_mark`], which keeps them off identifiers and
//! sealed quotes.

use std::sync::Arc;

use crate::ast::{
    Datum, HostLiteral, Identifier, Pair, Repr, SealedQuote, SourceLocation, SourceNode, Stx,
    Symbol,
};
use crate::hygiene::Marks;

impl Stx {
    // ------------------------------------------------------------------------
    // Raw data
    // ------------------------------------------------------------------------

    pub fn datum(datum: Datum) -> Stx {
        Stx(Repr::Datum(datum))
    }

    pub fn null() -> Stx {
        Stx::datum(Datum::Null)
    }

    pub fn void() -> Stx {
        Stx::datum(Datum::Void)
    }

    pub fn bool(b: bool) -> Stx {
        Stx::datum(Datum::Bool(b))
    }

    pub fn char(c: char) -> Stx {
        Stx::datum(Datum::Char(c))
    }

    pub fn int(n: i64) -> Stx {
        Stx::datum(Datum::Int(n))
    }

    pub fn float(n: f64) -> Stx {
        Stx::datum(Datum::Float(n))
    }

    /// A bare (unwrapped) symbol.
    pub fn symbol(name: impl Into<Symbol>) -> Stx {
        Stx::datum(Datum::Symbol(name.into()))
    }

    pub fn keyword(name: impl Into<Symbol>) -> Stx {
        Stx::datum(Datum::Keyword(name.into()))
    }

    pub fn string(s: impl AsRef<str>) -> Stx {
        Stx::datum(Datum::String(Arc::from(s.as_ref())))
    }

    pub fn cons(car: Stx, cdr: Stx) -> Stx {
        Stx::datum(Datum::Pair(Arc::new(Pair { car, cdr })))
    }

    /// A proper list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sutra_stx::Stx;
    /// let form = Stx::list([Stx::symbol("f"), Stx::int(1)]);
    /// assert_eq!(form.to_string(), "(f 1)");
    /// ```
    pub fn list(items: impl IntoIterator<Item = Stx>) -> Stx {
        Stx::list_with_tail(items, Stx::null())
    }

    /// A list whose final cdr is `tail` instead of `()`.
    pub fn list_with_tail(items: impl IntoIterator<Item = Stx>, tail: Stx) -> Stx {
        let items: Vec<Stx> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Stx::cons(item, acc))
    }

    pub fn vector(items: impl IntoIterator<Item = Stx>) -> Stx {
        Stx::datum(Datum::Vector(items.into_iter().collect()))
    }

    pub fn boxed(value: Stx) -> Stx {
        Stx::datum(Datum::Boxed(Arc::new(value)))
    }

    pub fn host(literal: impl HostLiteral) -> Stx {
        Stx::datum(Datum::Host(Arc::new(literal)))
    }

    // ------------------------------------------------------------------------
    // Syntax nodes
    // ------------------------------------------------------------------------

    /// Tags `e` with a source location. This is what the reader produces.
    pub fn source_node(e: Stx, loc: Option<SourceLocation>) -> Stx {
        Stx(Repr::Source(Arc::new(SourceNode { e, loc })))
    }

    pub fn identifier(sym: impl Into<Symbol>, loc: Option<SourceLocation>, marks: Marks) -> Stx {
        Stx::from_identifier(Identifier {
            sym: sym.into(),
            loc,
            marks,
        })
    }

    /// Seals a template datum with the definition-site `context` and `marks`.
    /// The result ignores every later mark application.
    pub fn sealed_quote(
        e: Stx,
        loc: Option<SourceLocation>,
        context: Option<Stx>,
        marks: Marks,
    ) -> Stx {
        Stx(Repr::Quote(Arc::new(SealedQuote {
            e,
            loc,
            context,
            marks,
        })))
    }
}

impl From<Datum> for Stx {
    fn from(datum: Datum) -> Self {
        Stx::datum(datum)
    }
}

impl From<i64> for Stx {
    fn from(n: i64) -> Self {
        Stx::int(n)
    }
}

impl From<bool> for Stx {
    fn from(b: bool) -> Self {
        Stx::bool(b)
    }
}

impl From<Symbol> for Stx {
    fn from(s: Symbol) -> Self {
        Stx::symbol(s)
    }
}
