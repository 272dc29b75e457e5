//! Interchangeable ways of applying marks.
//!
//! [`Deferred`] is the production strategy: O(1) per application, resolved on
//! demand by unwrapping. [`Eager`] pushes a mark through the whole subtree the
//! moment it is applied. Both must agree on every identifier's net marks; the
//! property suite in `tests/hygiene_properties.rs` checks that.

use crate::ast::{Datum, Identifier, Repr, SourceLocation, Stx};
use crate::hygiene::{apply_mark, stx_apply_mark, stx_unwrap, Mark, Marks};

/// How marks get attached to syntax.
pub trait WrapStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply_mark(&self, stx: &Stx, mark: &Mark) -> Stx;

    /// Applies `marks` front to back.
    fn wrap(&self, stx: &Stx, marks: &Marks) -> Stx {
        marks
            .iter()
            .fold(stx.clone(), |acc, mark| self.apply_mark(&acc, mark))
    }

    /// Applies `marks` back to front.
    fn rewrap(&self, stx: &Stx, marks: &Marks) -> Stx {
        marks
            .iter()
            .rev()
            .fold(stx.clone(), |acc, mark| self.apply_mark(&acc, mark))
    }
}

/// Lazy wrapping via deferred-wrap nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred;

/// Immediate wrapping: every identifier under the node is rebuilt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eager;

impl WrapStrategy for Deferred {
    fn name(&self) -> &'static str {
        "deferred"
    }

    fn apply_mark(&self, stx: &Stx, mark: &Mark) -> Stx {
        stx_apply_mark(stx, mark)
    }
}

impl WrapStrategy for Eager {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn apply_mark(&self, stx: &Stx, mark: &Mark) -> Stx {
        self.apply_at(stx, mark, None)
    }
}

impl Eager {
    /// `loc` is the nearest location on the chain of source nodes directly
    /// above `stx`. A bare symbol takes it, as unwrapping would give it.
    fn apply_at(&self, stx: &Stx, mark: &Mark, loc: Option<SourceLocation>) -> Stx {
        match &stx.0 {
            Repr::Quote(_) => stx.clone(),
            Repr::Wrap(w) if w.mark == *mark => w.e.clone(),
            // Built elsewhere under the deferred strategy: resolve one layer, then
            // push through what it exposes.
            Repr::Wrap(_) => self.apply_at(&stx_unwrap(stx), mark, loc),
            Repr::Ident(id) => Stx::from_identifier(Identifier {
                sym: id.sym.clone(),
                loc: id.loc.clone().or(loc),
                marks: apply_mark(mark, &id.marks),
            }),
            Repr::Source(s) => {
                let inner = self.apply_at(&s.e, mark, s.loc.clone().or(loc));
                Stx::source_node(inner, s.loc.clone())
            }
            Repr::Datum(d) => match d {
                Datum::Symbol(sym) => Stx::identifier(sym.clone(), loc, Marks::unit(mark.clone())),
                Datum::Pair(_) => self.apply_to_spine(stx, mark),
                Datum::Vector(items) => Stx::datum(Datum::Vector(
                    items.iter().map(|x| self.apply_mark(x, mark)).collect(),
                )),
                Datum::Boxed(b) => Stx::boxed(self.apply_mark(b, mark)),
                _ => stx.clone(),
            },
        }
    }

    /// Walks the cdr chain in a loop so long lists do not grow the stack.
    fn apply_to_spine(&self, list: &Stx, mark: &Mark) -> Stx {
        let mut cars = Vec::new();
        let mut rest = list.clone();
        while let Some(Datum::Pair(p)) = rest.as_datum() {
            cars.push(self.apply_mark(&p.car, mark));
            let cdr = p.cdr.clone();
            rest = cdr;
        }
        let tail = self.apply_mark(&rest, mark);
        Stx::list_with_tail(cars, tail)
    }
}
