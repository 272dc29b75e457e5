//! Moving between raw data and syntax.

use tracing::debug;

use crate::ast::{Datum, Repr, SourceLocation, Stx};
use crate::err_stx;
use crate::hygiene::{stx_unwrap, Marks};
use crate::syntax::accessors::stx_e;
use crate::StxResult;

/// Promotes a raw value produced by a transformer into syntax.
///
/// - A value that is already syntax comes back unchanged.
/// - With no template, the value is tagged with `src`.
/// - A quote-sealed template seals the value with the template's captured
///   context and marks.
/// - Otherwise every symbol in the value becomes an identifier carrying the
///   template's marks, so generated code inherits the macro-use context.
///
/// `src` wins over the template's own location when both are present.
///
/// # Errors
///
/// `MalformedTemplate` when `template` is present but is not an identifier.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::{datum_to_syntax, identifier_marks, Gensym, Marks, Stx};
/// let a = Gensym::new().fresh_mark();
/// let x = Stx::identifier("x", None, Marks::unit(a.clone()));
/// let foo = datum_to_syntax(Some(&x), &Stx::symbol("foo"), None).unwrap();
/// assert_eq!(foo.to_string(), "foo");
/// assert_eq!(identifier_marks(&foo), Some(Marks::unit(a)));
/// ```
pub fn datum_to_syntax(
    template: Option<&Stx>,
    datum: &Stx,
    src: Option<SourceLocation>,
) -> StxResult<Stx> {
    if datum.is_syntax() {
        return Ok(datum.clone());
    }
    let Some(template) = template else {
        return Ok(Stx::source_node(datum.clone(), src));
    };

    let unwrapped = stx_unwrap(template);
    match &unwrapped.0 {
        Repr::Quote(q) if stx_e(&q.e).is_symbol() => Ok(Stx::sealed_quote(
            datum.clone(),
            src.or_else(|| q.loc.clone()),
            q.context.clone(),
            q.marks.clone(),
        )),
        Repr::Ident(id) => {
            let src = src.or_else(|| id.loc.clone());
            let wrapped = wrap_datum(datum, &id.marks, &src);
            if matches!(wrapped.0, Repr::Ident(_)) {
                Ok(wrapped)
            } else {
                Ok(Stx::source_node(wrapped, src))
            }
        }
        _ => {
            debug!(template = %template, "rejected non-identifier template");
            Err(err_stx!(
                MalformedTemplate,
                template,
                "bad template syntax; expected identifier, got {}",
                template
            )
            .with_help("datum->syntax takes an identifier whose context the new syntax inherits"))
        }
    }
}

/// Re-mints every bare symbol in `datum` as an identifier with `marks`.
/// Syntax already inside the value is left alone.
fn wrap_datum(datum: &Stx, marks: &Marks, src: &Option<SourceLocation>) -> Stx {
    let Some(d) = datum.as_datum() else {
        return datum.clone();
    };
    match d {
        Datum::Symbol(sym) => Stx::identifier(sym.clone(), src.clone(), marks.clone()),
        Datum::Pair(_) => {
            let mut cars = Vec::new();
            let mut rest = datum.clone();
            while let Some(Datum::Pair(p)) = rest.as_datum() {
                cars.push(wrap_datum(&p.car, marks, src));
                let cdr = p.cdr.clone();
                rest = cdr;
            }
            Stx::list_with_tail(cars, wrap_datum(&rest, marks, src))
        }
        Datum::Vector(items) => Stx::datum(Datum::Vector(
            items.iter().map(|x| wrap_datum(x, marks, src)).collect(),
        )),
        Datum::Boxed(b) => Stx::boxed(wrap_datum(b, marks, src)),
        _ => datum.clone(),
    }
}

/// Strips every syntax node, recursively, leaving plain data. Marks and
/// locations are dropped, not resolved.
pub fn stx_to_datum(stx: &Stx) -> Stx {
    match stx_e(stx) {
        Datum::Pair(_) => {
            let mut cars = Vec::new();
            let mut rest = stx_e(stx);
            while let Datum::Pair(p) = rest {
                cars.push(stx_to_datum(&p.car));
                rest = stx_e(&p.cdr);
            }
            Stx::list_with_tail(cars, stx_to_datum(&Stx::datum(rest)))
        }
        Datum::Vector(items) => {
            Stx::datum(Datum::Vector(items.iter().map(stx_to_datum).collect()))
        }
        Datum::Boxed(b) => Stx::boxed(stx_to_datum(&b)),
        other => Stx::datum(other),
    }
}
