//! # Hygiene: mark application, cancellation, and unwrapping
//!
//! Marking a subtree never walks it. [`stx_apply_mark`] puts an O(1) deferred
//! wrap on top. The mark only reaches identifiers when someone looks inside
//! ([`stx_unwrap`] / [`syntax_e`]), and then only one layer at a time.
//!
//! ## Invariants
//!
//! - A mark sequence never has two equal adjacent marks ([`apply_mark`] cancels).
//! - Sealed quotes are terminal: applying a mark returns the same node.
//! - Identifiers absorb marks directly and never sit under a deferred wrap.
//! - Unwrapping forwards the most specific source location it has seen and
//!   never invents one.

use crate::ast::{Datum, Identifier, Repr, SourceLocation, Stx};

mod gensym;
mod mark;
mod strategy;

pub use gensym::{Gensym, DEFAULT_GENSYM_STEM};
pub use mark::{apply_mark, Mark, Marks};
pub use strategy::{Deferred, Eager, WrapStrategy};

// ============================================================================
// MARK APPLICATION
// ============================================================================

/// Applies one mark to an arbitrary syntax object.
///
/// - sealed quote: returned unchanged;
/// - deferred wrap carrying the same mark: the wrap is peeled (cancellation);
/// - identifier: the mark folds into its sequence;
/// - anything else: a new deferred wrap, located where `stx` is.
pub fn stx_apply_mark(stx: &Stx, mark: &Mark) -> Stx {
    match &stx.0 {
        Repr::Quote(_) => stx.clone(),
        Repr::Wrap(w) if w.mark == *mark => w.e.clone(),
        Repr::Ident(id) => Stx::from_identifier(Identifier {
            sym: id.sym.clone(),
            loc: id.loc.clone(),
            marks: apply_mark(mark, &id.marks),
        }),
        _ => Stx::deferred_wrap(stx.clone(), source_of(stx), mark.clone()),
    }
}

/// Applies `marks` front to back.
pub fn stx_wrap(stx: &Stx, marks: &Marks) -> Stx {
    marks
        .iter()
        .fold(stx.clone(), |acc, mark| stx_apply_mark(&acc, mark))
}

/// Applies `marks` back to front.
pub fn stx_rewrap(stx: &Stx, marks: &Marks) -> Stx {
    marks
        .iter()
        .rev()
        .fold(stx.clone(), |acc, mark| stx_apply_mark(&acc, mark))
}

// ============================================================================
// UNWRAPPING
// ============================================================================

/// Full unwrap with no pending marks. See [`stx_unwrap_with`].
pub fn stx_unwrap(stx: &Stx) -> Stx {
    stx_unwrap_with(stx, &Marks::new())
}

/// Peels provenance and deferred wraps until something concrete is exposed.
///
/// The result is an identifier (with every pending mark folded in), a sealed
/// quote, or raw data whose immediate children already carry the pending
/// marks. No marks are ever left pending above an unresolved pair or vector.
///
/// `pending` is in application order: its head was applied first.
pub fn stx_unwrap_with(stx: &Stx, pending: &Marks) -> Stx {
    let mut e = stx.clone();
    let mut marks = pending.clone();
    let mut loc = source_of(stx);

    loop {
        let next = match &e.0 {
            Repr::Wrap(w) => {
                marks = apply_mark(&w.mark, &marks);
                forward(&mut loc, &w.loc);
                w.e.clone()
            }
            Repr::Source(s) => {
                forward(&mut loc, &s.loc);
                s.e.clone()
            }
            Repr::Ident(id) => {
                if marks.is_empty() {
                    return e;
                }
                let folded = marks
                    .iter()
                    .fold(id.marks.clone(), |acc, mark| apply_mark(mark, &acc));
                return Stx::from_identifier(Identifier {
                    sym: id.sym.clone(),
                    loc: id.loc.clone().or(loc),
                    marks: folded,
                });
            }
            Repr::Quote(_) => return e,
            Repr::Datum(d) => return push_down(d, &e, loc, &marks),
        };
        e = next;
    }
}

/// Shallow datum: unwraps, then exposes the immediate value.
///
/// Identifiers yield their symbol and sealed quotes yield their template. Pairs
/// and vectors come back with any pending marks moved onto their children, so
/// a traversal can keep walking without losing hygiene.
pub fn syntax_e(stx: &Stx) -> Datum {
    let mut cur = stx_unwrap(stx);
    loop {
        let next = match &cur.0 {
            Repr::Datum(d) => return d.clone(),
            Repr::Ident(id) => return Datum::Symbol(id.sym.clone()),
            Repr::Quote(q) => stx_unwrap(&q.e),
            Repr::Source(_) | Repr::Wrap(_) => stx_unwrap(&cur),
        };
        cur = next;
    }
}

/// The location carried directly by `stx`, if any.
pub(crate) fn source_of(stx: &Stx) -> Option<SourceLocation> {
    match &stx.0 {
        Repr::Datum(_) => None,
        Repr::Source(s) => s.loc.clone(),
        Repr::Ident(id) => id.loc.clone(),
        Repr::Wrap(w) => w.loc.clone(),
        Repr::Quote(q) => q.loc.clone(),
    }
}

fn forward(loc: &mut Option<SourceLocation>, layer: &Option<SourceLocation>) {
    if layer.is_some() {
        *loc = layer.clone();
    }
}

fn push_down(datum: &Datum, e: &Stx, loc: Option<SourceLocation>, marks: &Marks) -> Stx {
    match datum {
        Datum::Symbol(sym) => Stx::identifier(
            sym.clone(),
            loc,
            marks.iter().rev().cloned().collect(),
        ),
        _ if marks.is_empty() => e.clone(),
        Datum::Pair(p) => Stx::cons(stx_wrap(&p.car, marks), stx_wrap(&p.cdr, marks)),
        Datum::Vector(items) => {
            Stx::datum(Datum::Vector(items.iter().map(|x| stx_wrap(x, marks)).collect()))
        }
        Datum::Boxed(b) => Stx::boxed(stx_wrap(b, marks)),
        _ => e.clone(),
    }
}
