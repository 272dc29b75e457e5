//! The process-wide counter behind marks and generated symbols.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::ast::Symbol;
use crate::hygiene::Mark;

/// Stem for generated identifiers when the template has no usable name.
pub const DEFAULT_GENSYM_STEM: &str = "g";

static GLOBAL: Gensym = Gensym::new();

/// Monotonic, thread-safe source of marks and fresh symbols.
///
/// One counter should live as long as one compilation process. It is passed
/// explicitly to the operations that mint things; [`Gensym::global`] is the
/// shared instance for hosts that only ever run one compilation per process.
#[derive(Debug)]
pub struct Gensym {
    next: AtomicU64,
    stem: Cow<'static, str>,
}

impl Gensym {
    pub const fn new() -> Self {
        Gensym {
            next: AtomicU64::new(1),
            stem: Cow::Borrowed(DEFAULT_GENSYM_STEM),
        }
    }

    pub fn with_stem(stem: impl Into<String>) -> Self {
        Gensym {
            next: AtomicU64::new(1),
            stem: Cow::Owned(stem.into()),
        }
    }

    pub fn global() -> &'static Gensym {
        &GLOBAL
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Advances the counter. Serials are never reused.
    pub fn next_serial(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    pub fn fresh_mark(&self) -> Mark {
        let mark = Mark::new(self.next_serial());
        trace!(%mark, "minted mark");
        mark
    }

    /// A generated symbol printed as `stem%serial`, distinct from every
    /// interned symbol.
    pub fn fresh_symbol(&self, stem: &str) -> Symbol {
        let stem = if stem.is_empty() { self.stem() } else { stem };
        let sym = Symbol::generated(stem, self.next_serial());
        trace!(%sym, "generated symbol");
        sym
    }
}

impl Default for Gensym {
    fn default() -> Self {
        Gensym::new()
    }
}
