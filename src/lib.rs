//! Syntax objects and mark-based hygiene for a macro expander.
//!
//! Source data is tagged with locations ([`Stx`]), identifiers carry mark
//! sequences that record which expansion steps produced them, and macro
//! transformers take syntax apart and rebuild it through the accessors and
//! list library in [`syntax`]. Mark application is lazy; see [`hygiene`].

pub mod diagnostics;

pub mod ast;
pub mod config;
pub mod hygiene;
pub mod syntax;

pub use crate::ast::{Datum, HostLiteral, Pair, SourceLocation, Span, Stx, Symbol};
pub use crate::config::{StxOptions, WrapMode};
pub use crate::diagnostics::{ErrorContext, ErrorType, StxError, StxResult};
pub use crate::hygiene::{
    apply_mark, stx_apply_mark, stx_rewrap, stx_unwrap, stx_unwrap_with, stx_wrap, syntax_e,
    Deferred, Eager, Gensym, Mark, Marks, WrapStrategy,
};
pub use crate::syntax::*;
