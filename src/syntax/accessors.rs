//! Accessors and predicates over syntax objects.
//!
//! All of these are pure and total. Shape predicates look at the deep datum
//! ([`stx_e`]) and never allocate; navigation ([`stx_car`], [`stx_cdr`]) goes
//! through [`syntax_e`] so hygiene follows the children.

use crate::ast::{Datum, Repr, SourceLocation, Stx, Symbol};
use crate::err_stx;
use crate::hygiene::{source_of, stx_unwrap, syntax_e, Marks};
use crate::StxResult;

// ============================================================================
// DATUM EXTRACTION
// ============================================================================

/// Deep datum: peels every syntax node down to the raw value. Identifiers
/// give their symbol; marks are not resolved.
pub fn stx_e(stx: &Stx) -> Datum {
    let mut cur = stx;
    loop {
        match &cur.0 {
            Repr::Datum(d) => return d.clone(),
            Repr::Ident(id) => return Datum::Symbol(id.sym.clone()),
            Repr::Source(s) => cur = &s.e,
            Repr::Wrap(w) => cur = &w.e,
            Repr::Quote(q) => cur = &q.e,
        }
    }
}

/// The location attached to the outermost node, or `None` for raw data.
pub fn stx_source(stx: &Stx) -> Option<SourceLocation> {
    source_of(stx)
}

// ============================================================================
// LITERAL PREDICATES
// ============================================================================

pub fn stx_is_boolean(stx: &Stx) -> bool {
    stx_e(stx).is_boolean()
}

pub fn stx_is_char(stx: &Stx) -> bool {
    stx_e(stx).is_char()
}

pub fn stx_is_number(stx: &Stx) -> bool {
    stx_e(stx).is_number()
}

pub fn stx_is_keyword(stx: &Stx) -> bool {
    stx_e(stx).is_keyword()
}

pub fn stx_is_string(stx: &Stx) -> bool {
    stx_e(stx).is_string()
}

pub fn stx_is_void(stx: &Stx) -> bool {
    stx_e(stx).is_void()
}

/// Self-quoting literal, including host literal kinds that declare themselves
/// self-quoting.
pub fn stx_is_datum(stx: &Stx) -> bool {
    stx_e(stx).is_self_quoting()
}

// ============================================================================
// STRUCTURAL PREDICATES
// ============================================================================

pub fn stx_is_pair(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Pair(_))
}

pub fn stx_is_null(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Null)
}

pub fn stx_is_pair_or_null(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Pair(_) | Datum::Null)
}

/// Loose list test: a pair or the empty list.
pub fn stx_is_list(stx: &Stx) -> bool {
    stx_is_pair_or_null(stx)
}

/// The whole cdr chain ends in `()`, through any amount of wrapping.
pub fn stx_is_proper_list(stx: &Stx) -> bool {
    let mut cur = stx_e(stx);
    loop {
        match cur {
            Datum::Null => return true,
            Datum::Pair(p) => cur = stx_e(&p.cdr),
            _ => return false,
        }
    }
}

pub fn stx_is_vector(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Vector(_))
}

pub fn stx_is_box(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Boxed(_))
}

// ============================================================================
// EQUALITY
// ============================================================================

pub fn stx_eq(a: &Stx, b: &Stx) -> bool {
    stx_e(a).eq(&stx_e(b))
}

pub fn stx_eqv(a: &Stx, b: &Stx) -> bool {
    stx_e(a).eqv(&stx_e(b))
}

/// Structural equality on deep data; marks and locations are ignored.
pub fn stx_equal(a: &Stx, b: &Stx) -> bool {
    let mut left = stx_e(a);
    let mut right = stx_e(b);
    loop {
        match (&left, &right) {
            (Datum::Pair(x), Datum::Pair(y)) => {
                if !stx_equal(&x.car, &y.car) {
                    return false;
                }
                let (next_left, next_right) = (stx_e(&x.cdr), stx_e(&y.cdr));
                left = next_left;
                right = next_right;
            }
            (Datum::Vector(x), Datum::Vector(y)) => {
                return x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| stx_equal(p, q));
            }
            (Datum::Boxed(x), Datum::Boxed(y)) => return stx_equal(x, y),
            (Datum::String(x), Datum::String(y)) => return x == y,
            _ => return left.eqv(&right),
        }
    }
}

pub fn stx_false(stx: &Stx) -> bool {
    matches!(stx_e(stx), Datum::Bool(false))
}

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Anything whose deep datum is a symbol: bare symbols, identifiers, and
/// quote-sealed symbols.
pub fn is_identifier(stx: &Stx) -> bool {
    stx_e(stx).is_symbol()
}

/// A sealed quote wrapping a bare symbol.
pub fn is_identifier_quote(stx: &Stx) -> bool {
    match &stx_unwrap(stx).0 {
        Repr::Quote(q) => stx_e(&q.e).is_symbol(),
        _ => false,
    }
}

/// Any sealed quote, possibly under source or wrap nodes.
pub fn is_sealed_syntax(stx: &Stx) -> bool {
    let mut cur = stx;
    loop {
        match &cur.0 {
            Repr::Quote(_) => return true,
            Repr::Source(s) => cur = &s.e,
            Repr::Wrap(w) => cur = &w.e,
            _ => return false,
        }
    }
}

/// A proper list, at any depth of wrapping, whose elements are all identifiers.
pub fn is_identifier_list(stx: &Stx) -> bool {
    let mut cur = syntax_e(stx);
    loop {
        match cur {
            Datum::Null => return true,
            Datum::Pair(p) => {
                if !is_identifier(&p.car) {
                    return false;
                }
                cur = syntax_e(&p.cdr);
            }
            _ => return false,
        }
    }
}

/// The symbol an identifier names.
pub fn identifier_symbol(stx: &Stx) -> Option<Symbol> {
    match stx_e(stx) {
        Datum::Symbol(sym) => Some(sym),
        _ => None,
    }
}

/// The resolved mark sequence of a (non-sealed) identifier.
pub fn identifier_marks(stx: &Stx) -> Option<Marks> {
    match &stx_unwrap(stx).0 {
        Repr::Ident(id) => Some(id.marks.clone()),
        _ => None,
    }
}

/// The definition-site context captured by a quote-sealed identifier.
pub fn quote_context(stx: &Stx) -> Option<Stx> {
    match &stx_unwrap(stx).0 {
        Repr::Quote(q) => q.context.clone(),
        _ => None,
    }
}

/// The definition-site marks captured by a sealed quote.
pub fn quote_marks(stx: &Stx) -> Option<Marks> {
    match &stx_unwrap(stx).0 {
        Repr::Quote(q) => Some(q.marks.clone()),
        _ => None,
    }
}

/// Same binding occurrence: same symbol and same net marks. Sealed
/// identifiers also need the same captured context, and never equal an
/// unsealed one.
pub fn identifier_eq(a: &Stx, b: &Stx) -> bool {
    match (&stx_unwrap(a).0, &stx_unwrap(b).0) {
        (Repr::Ident(x), Repr::Ident(y)) => x.sym == y.sym && x.marks == y.marks,
        (Repr::Quote(x), Repr::Quote(y)) => {
            let same_context = match (&x.context, &y.context) {
                (Some(p), Some(q)) => p.ptr_eq(q),
                (None, None) => true,
                _ => false,
            };
            stx_e(&x.e).is_symbol()
                && stx_e(&x.e).eq(&stx_e(&y.e))
                && x.marks == y.marks
                && same_context
        }
        _ => false,
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

pub fn stx_car(stx: &Stx) -> StxResult<Stx> {
    match syntax_e(stx) {
        Datum::Pair(p) => Ok(p.car.clone()),
        _ => Err(err_stx!(MalformedSyntaxList, stx, "expected a pair, got {}", stx)),
    }
}

pub fn stx_cdr(stx: &Stx) -> StxResult<Stx> {
    match syntax_e(stx) {
        Datum::Pair(p) => Ok(p.cdr.clone()),
        _ => Err(err_stx!(MalformedSyntaxList, stx, "expected a pair, got {}", stx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::hygiene::{stx_apply_mark, Gensym};
    use crate::ErrorType;

    fn at(start: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(Span::new(start, start + 2), 1, 1))
    }

    #[test]
    fn test_stx_e_peels_everything() {
        let gensym = Gensym::new();
        let inner = Stx::source_node(Stx::int(7), at(0));
        let wrapped = stx_apply_mark(&Stx::source_node(inner, None), &gensym.fresh_mark());
        assert!(matches!(stx_e(&wrapped), Datum::Int(7)));
        let id = Stx::identifier("x", None, Marks::new());
        assert_eq!(stx_e(&id).as_symbol().map(Symbol::name), Some("x"));
    }

    #[test]
    fn test_stx_source() {
        assert_eq!(stx_source(&Stx::int(1)), None);
        assert_eq!(stx_source(&Stx::source_node(Stx::int(1), at(5))), at(5));
    }

    #[test]
    fn test_literal_predicates_see_through_nodes() {
        let wrapped = |s: Stx| Stx::source_node(s, at(0));
        assert!(stx_is_boolean(&wrapped(Stx::bool(true))));
        assert!(stx_is_char(&wrapped(Stx::char('c'))));
        assert!(stx_is_number(&wrapped(Stx::float(2.5))));
        assert!(stx_is_keyword(&wrapped(Stx::keyword("k"))));
        assert!(stx_is_string(&wrapped(Stx::string("s"))));
        assert!(stx_is_void(&wrapped(Stx::void())));
        assert!(stx_is_datum(&wrapped(Stx::int(1))));
        assert!(!stx_is_datum(&wrapped(Stx::symbol("x"))));
        assert!(!stx_is_datum(&Stx::null()));
    }

    #[test]
    fn test_structural_predicates() {
        let lst = Stx::list([Stx::int(1), Stx::int(2)]);
        let dotted = Stx::list_with_tail([Stx::int(1)], Stx::int(2));
        assert!(stx_is_pair(&lst));
        assert!(stx_is_null(&Stx::null()));
        assert!(stx_is_pair_or_null(&Stx::null()));
        assert!(stx_is_list(&dotted));
        assert!(stx_is_proper_list(&lst));
        assert!(!stx_is_proper_list(&dotted));
        assert!(stx_is_vector(&Stx::vector(Vec::<Stx>::new())));
        assert!(stx_is_box(&Stx::boxed(Stx::null())));
    }

    #[test]
    fn test_proper_list_through_wraps() {
        let gensym = Gensym::new();
        let tail = stx_apply_mark(&Stx::list([Stx::symbol("b")]), &gensym.fresh_mark());
        let lst = Stx::cons(Stx::symbol("a"), Stx::source_node(tail, None));
        assert!(stx_is_proper_list(&lst));
    }

    #[test]
    fn test_equality_levels() {
        let a = Stx::list([Stx::symbol("x"), Stx::string("s")]);
        let b = Stx::source_node(
            Stx::list([Stx::identifier("x", None, Marks::new()), Stx::string("s")]),
            None,
        );
        assert!(stx_equal(&a, &b));
        assert!(!stx_eq(&a, &b));
        assert!(stx_eq(&a, &Stx::source_node(a.clone(), None)));
        assert!(stx_eqv(&Stx::int(3), &Stx::source_node(Stx::int(3), None)));
        assert!(stx_false(&Stx::source_node(Stx::bool(false), None)));
        assert!(!stx_false(&Stx::null()));
        assert!(!stx_equal(
            &Stx::vector([Stx::int(1)]),
            &Stx::vector([Stx::int(1), Stx::int(2)])
        ));
    }

    #[test]
    fn test_identifier_predicates() {
        let q = Stx::sealed_quote(Stx::symbol("x"), None, Some(Stx::symbol("ctx")), Marks::new());
        let q_list = Stx::sealed_quote(Stx::list([Stx::symbol("x")]), None, None, Marks::new());
        assert!(is_identifier(&Stx::symbol("x")));
        assert!(is_identifier(&q));
        assert!(is_identifier_quote(&Stx::source_node(q.clone(), None)));
        assert!(!is_identifier_quote(&q_list));
        assert!(is_sealed_syntax(&Stx::source_node(q_list, None)));
        assert!(!is_sealed_syntax(&Stx::symbol("x")));
        assert!(quote_context(&q).is_some_and(|c| stx_eq(&c, &Stx::symbol("ctx"))));
        assert_eq!(quote_marks(&q), Some(Marks::new()));
    }

    #[test]
    fn test_identifier_list() {
        let gensym = Gensym::new();
        let ids = Stx::list([Stx::symbol("a"), Stx::identifier("b", None, Marks::new())]);
        assert!(is_identifier_list(&stx_apply_mark(&ids, &gensym.fresh_mark())));
        assert!(is_identifier_list(&Stx::null()));
        assert!(!is_identifier_list(&Stx::list([Stx::symbol("a"), Stx::int(1)])));
        assert!(!is_identifier_list(&Stx::list_with_tail([Stx::symbol("a")], Stx::symbol("b"))));
    }

    #[test]
    fn test_identifier_eq_needs_same_marks() {
        let gensym = Gensym::new();
        let m = gensym.fresh_mark();
        let plain = Stx::identifier("x", None, Marks::new());
        let marked = stx_apply_mark(&plain, &m);
        assert!(identifier_eq(&plain, &Stx::symbol("x")));
        assert!(!identifier_eq(&plain, &marked));
        assert!(identifier_eq(&stx_apply_mark(&marked, &m), &plain));
        assert_eq!(identifier_marks(&marked), Some(Marks::unit(m)));
        assert_eq!(identifier_symbol(&marked), Some(Symbol::intern("x")));
    }

    #[test]
    fn test_car_cdr() {
        let lst = Stx::list([Stx::int(1), Stx::int(2)]);
        assert!(stx_eqv(&stx_car(&lst).unwrap(), &Stx::int(1)));
        assert!(stx_is_pair(&stx_cdr(&lst).unwrap()));
        let err = stx_car(&Stx::int(3)).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedSyntaxList);
    }
}
