//! # Syntax: accessors, conversion, and the list library
//!
//! Everything a macro transformer uses to take syntax apart and put it back
//! together. Nothing here knows about binding resolution or expansion order.
//!
//! ## Module Structure
//!
//! - **`accessors`**: datum extraction, shape predicates, identifier queries
//! - **`datum`**: `datum_to_syntax` and `stx_to_datum`
//! - **`list`**: iteration, maps, folds, lookup over syntax lists
//! - **`ident`**: fresh and composed identifiers

pub mod accessors;
pub mod datum;
pub mod ident;
pub mod list;

pub use accessors::{
    identifier_eq, identifier_marks, identifier_symbol, is_identifier, is_identifier_list,
    is_identifier_quote, is_sealed_syntax, quote_context, quote_marks, stx_car, stx_cdr, stx_e,
    stx_eq, stx_equal, stx_eqv, stx_false, stx_is_boolean, stx_is_box, stx_is_char,
    stx_is_datum, stx_is_keyword, stx_is_list, stx_is_null, stx_is_number, stx_is_pair,
    stx_is_pair_or_null, stx_is_proper_list, stx_is_string, stx_is_vector, stx_is_void,
    stx_source,
};
pub use datum::{datum_to_syntax, stx_to_datum};
pub use ident::{genident, gentemps, stx_identifier};
pub use list::{
    stx_andmap, stx_foldl, stx_foldr, stx_for_each, stx_for_each2, stx_getq, stx_getq_by,
    stx_iter, stx_last, stx_last_pair, stx_length, stx_list_ref, stx_list_tail, stx_map,
    stx_map2, stx_ormap, stx_plist, stx_plist_by, stx_reverse, syntax_to_list, StxIter,
};
