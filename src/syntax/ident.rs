//! Minting identifiers.

use tracing::trace;

use crate::ast::{Datum, SourceLocation, Stx};
use crate::err_stx;
use crate::hygiene::{Gensym, Marks};
use crate::syntax::accessors::{stx_e, stx_source};
use crate::syntax::datum::datum_to_syntax;
use crate::syntax::list::stx_map;
use crate::StxResult;

/// A fresh identifier no other identifier in this compilation can equal.
///
/// Named after `template` when it is a symbol, keyword or string (at any
/// depth of wrapping), otherwise after the counter's stem. Located at the
/// template's source when it has one, else at `src`. Carries no marks.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::{genident, identifier_eq, Gensym, Stx};
/// let gensym = Gensym::new();
/// let a = genident(&gensym, Some(&Stx::symbol("tmp")), None);
/// let b = genident(&gensym, Some(&Stx::symbol("tmp")), None);
/// assert!(!identifier_eq(&a, &b));
/// ```
pub fn genident(gensym: &Gensym, template: Option<&Stx>, src: Option<SourceLocation>) -> Stx {
    let stem = match template.map(stx_e) {
        Some(Datum::Symbol(sym)) | Some(Datum::Keyword(sym)) => sym.name().to_string(),
        Some(Datum::String(s)) => s.to_string(),
        _ => String::new(),
    };
    let loc = template.and_then(stx_source).or(src);
    let sym = gensym.fresh_symbol(&stem);
    trace!(%sym, "generated identifier");
    Stx::identifier(sym, loc, Marks::new())
}

/// One fresh identifier per element of `list`, named after each element.
pub fn gentemps(gensym: &Gensym, list: &Stx) -> StxResult<Vec<Stx>> {
    stx_map(list, |item| Ok(genident(gensym, Some(&item), None)))
}

/// Builds an identifier by concatenating the printed values of `parts`,
/// giving it `template`'s context.
///
/// Parts may be symbols, keywords, strings, characters or integers.
///
/// # Errors
///
/// `MalformedTemplate` for any other part, or when `template` is not an
/// identifier.
pub fn stx_identifier(template: &Stx, parts: &[Stx]) -> StxResult<Stx> {
    let mut name = String::new();
    for part in parts {
        match stx_e(part) {
            Datum::Symbol(sym) | Datum::Keyword(sym) => name.push_str(sym.name()),
            Datum::String(s) => name.push_str(&s),
            Datum::Char(c) => name.push(c),
            Datum::Int(n) => name.push_str(&n.to_string()),
            other => {
                return Err(err_stx!(
                    MalformedTemplate,
                    part,
                    "cannot use a {} in an identifier name",
                    other.type_name()
                )
                .with_help("identifier parts must be symbols, keywords, strings, characters or integers"))
            }
        }
    }
    datum_to_syntax(Some(template), &Stx::symbol(name.as_str()), None)
}
