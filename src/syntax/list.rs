//! List operations over syntax.
//!
//! Every traversal walks the cdr spine through [`syntax_e`], so marks pending
//! on a wrapped list reach each element before the callback sees it. Loops are
//! iterative; a list of any length is safe.
//!
//! Callbacks are fallible. Any error type that can absorb a [`StxError`] works,
//! which lets a transformer use `?` on both its own failures and list-shape
//! failures raised here.
//!
//! Shape rules:
//!
//! - An improper tail is a `MalformedSyntaxList` failure, raised when the
//!   traversal reaches it. Callbacks for earlier elements have already run.
//! - Two-list operations fail the same way when one list runs out first.
//!   Nothing is silently truncated.

use std::iter::FusedIterator;

use tracing::debug;

use crate::ast::{Datum, Stx};
use crate::err_stx;
use crate::hygiene::syntax_e;
use crate::syntax::accessors::stx_is_keyword;
use crate::{StxError, StxResult};

// ============================================================================
// ITERATION
// ============================================================================

/// Yields the elements of a syntax list, head to tail.
///
/// Ends after the null terminator, or after yielding one error for an
/// improper tail.
#[derive(Debug, Clone)]
pub struct StxIter {
    list: Stx,
    rest: Option<Stx>,
}

pub fn stx_iter(list: &Stx) -> StxIter {
    StxIter {
        list: list.clone(),
        rest: Some(list.clone()),
    }
}

impl Iterator for StxIter {
    type Item = StxResult<Stx>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.rest.take()?;
        match syntax_e(&cur) {
            Datum::Pair(p) => {
                self.rest = Some(p.cdr.clone());
                Some(Ok(p.car.clone()))
            }
            Datum::Null => None,
            _ => {
                debug!(list = %self.list, tail = %cur, "improper syntax list");
                Some(Err(err_stx!(
                    MalformedSyntaxList,
                    &self.list,
                    "expected a proper list, got {} (tail {})",
                    self.list,
                    cur
                )))
            }
        }
    }
}

impl FusedIterator for StxIter {}

/// The elements of a proper syntax list, in order.
pub fn syntax_to_list(list: &Stx) -> StxResult<Vec<Stx>> {
    stx_iter(list).collect()
}

fn length_mismatch(a: &Stx, b: &Stx) -> StxError {
    debug!(left = %a, right = %b, "parallel lists differ in length");
    let err = err_stx!(
        MalformedSyntaxList,
        a,
        "lists of different lengths: {} and {}",
        a,
        b
    );
    match crate::syntax::stx_source(b) {
        Some(loc) => err.with_related(loc.span, "other list"),
        None => err,
    }
}

// ============================================================================
// TRAVERSALS
// ============================================================================

/// Applies `f` to each element, left to right, collecting the results.
pub fn stx_map<T, E, F>(list: &Stx, mut f: F) -> Result<Vec<T>, E>
where
    E: From<StxError>,
    F: FnMut(Stx) -> Result<T, E>,
{
    stx_iter(list).map(|item| f(item?)).collect()
}

/// Applies `f` to corresponding elements of two lists of equal length.
pub fn stx_map2<T, E, F>(a: &Stx, b: &Stx, mut f: F) -> Result<Vec<T>, E>
where
    E: From<StxError>,
    F: FnMut(Stx, Stx) -> Result<T, E>,
{
    let mut out = Vec::new();
    stx_for_each2::<E, _>(a, b, |x, y| {
        out.push(f(x, y)?);
        Ok(())
    })?;
    Ok(out)
}

pub fn stx_for_each<E, F>(list: &Stx, mut f: F) -> Result<(), E>
where
    E: From<StxError>,
    F: FnMut(Stx) -> Result<(), E>,
{
    for item in stx_iter(list) {
        f(item?)?;
    }
    Ok(())
}

pub fn stx_for_each2<E, F>(a: &Stx, b: &Stx, mut f: F) -> Result<(), E>
where
    E: From<StxError>,
    F: FnMut(Stx, Stx) -> Result<(), E>,
{
    let mut xs = stx_iter(a);
    let mut ys = stx_iter(b);
    loop {
        match (xs.next(), ys.next()) {
            (None, None) => return Ok(()),
            (Some(x), Some(y)) => f(x?, y?)?,
            (Some(Err(e)), None) | (None, Some(Err(e))) => return Err(e.into()),
            _ => return Err(length_mismatch(a, b).into()),
        }
    }
}

/// True when `pred` holds for every element. Stops at the first false.
pub fn stx_andmap<E, F>(list: &Stx, mut pred: F) -> Result<bool, E>
where
    E: From<StxError>,
    F: FnMut(Stx) -> Result<bool, E>,
{
    for item in stx_iter(list) {
        if !pred(item?)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The first `Some` produced by `f`. Stops there.
pub fn stx_ormap<T, E, F>(list: &Stx, mut f: F) -> Result<Option<T>, E>
where
    E: From<StxError>,
    F: FnMut(Stx) -> Result<Option<T>, E>,
{
    for item in stx_iter(list) {
        if let Some(found) = f(item?)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Head-to-tail fold: `f(acc, element)`.
pub fn stx_foldl<A, E, F>(list: &Stx, init: A, mut f: F) -> Result<A, E>
where
    E: From<StxError>,
    F: FnMut(A, Stx) -> Result<A, E>,
{
    let mut acc = init;
    for item in stx_iter(list) {
        acc = f(acc, item?)?;
    }
    Ok(acc)
}

/// Tail-to-head fold: `f(element, folded_tail)`.
///
/// The whole list is checked before `f` runs, so an improper list fails
/// without any callback having been made.
pub fn stx_foldr<A, E, F>(list: &Stx, init: A, mut f: F) -> Result<A, E>
where
    E: From<StxError>,
    F: FnMut(Stx, A) -> Result<A, E>,
{
    let items = syntax_to_list(list)?;
    items.into_iter().rev().try_fold(init, |acc, item| f(item, acc))
}

// ============================================================================
// STRUCTURE
// ============================================================================

/// A raw list of the same elements in reverse order.
pub fn stx_reverse(list: &Stx) -> StxResult<Stx> {
    stx_foldl(list, Stx::null(), |acc, item| Ok(Stx::cons(item, acc)))
}

pub fn stx_length(list: &Stx) -> StxResult<usize> {
    stx_foldl(list, 0usize, |n, _| Ok(n + 1))
}

/// The list after dropping `k` elements. The tail itself need not be proper.
pub fn stx_list_tail(list: &Stx, k: usize) -> StxResult<Stx> {
    let mut cur = list.clone();
    for _ in 0..k {
        match syntax_e(&cur) {
            Datum::Pair(p) => cur = p.cdr.clone(),
            _ => {
                debug!(list = %list, index = k, "list index out of range");
                return Err(err_stx!(
                    MalformedSyntaxList,
                    list,
                    "index {} is out of range for {}",
                    k,
                    list
                ));
            }
        }
    }
    Ok(cur)
}

pub fn stx_list_ref(list: &Stx, k: usize) -> StxResult<Stx> {
    let tail = stx_list_tail(list, k)?;
    match syntax_e(&tail) {
        Datum::Pair(p) => Ok(p.car.clone()),
        _ => Err(err_stx!(
            MalformedSyntaxList,
            list,
            "index {} is out of range for {}",
            k,
            list
        )),
    }
}

/// The final pair of a non-empty list, unwrapped. For `(a b . c)` that is
/// `(b . c)`.
pub fn stx_last_pair(list: &Stx) -> StxResult<Stx> {
    let Datum::Pair(mut last) = syntax_e(list) else {
        debug!(list = %list, "last pair of a non-pair");
        return Err(err_stx!(
            MalformedSyntaxList,
            list,
            "expected a non-empty list, got {}",
            list
        ));
    };
    while let Datum::Pair(next) = syntax_e(&last.cdr) {
        last = next;
    }
    Ok(Stx::datum(Datum::Pair(last)))
}

pub fn stx_last(list: &Stx) -> StxResult<Stx> {
    match syntax_e(&stx_last_pair(list)?) {
        Datum::Pair(p) => Ok(p.car.clone()),
        _ => Err(err_stx!(InvalidStructure, list, "last pair of {} is not a pair", list)),
    }
}

// ============================================================================
// ASSOCIATION AND PROPERTY LISTS
// ============================================================================

/// The value of the first `(key . value)` entry whose key is `eqv` to `key`.
///
/// Keys are compared by their shallow datum, so an identifier matches a bare
/// symbol of the same name whatever its marks.
pub fn stx_getq(key: &Stx, alist: &Stx) -> StxResult<Option<Stx>> {
    stx_getq_by(key, alist, |a, b| syntax_e(a).eqv(&syntax_e(b)))
}

/// Like [`stx_getq`] with a caller-supplied key equality.
pub fn stx_getq_by<F>(key: &Stx, alist: &Stx, mut same_key: F) -> StxResult<Option<Stx>>
where
    F: FnMut(&Stx, &Stx) -> bool,
{
    for entry in stx_iter(alist) {
        let entry = entry?;
        match syntax_e(&entry) {
            Datum::Pair(p) => {
                if same_key(key, &p.car) {
                    return Ok(Some(p.cdr.clone()));
                }
            }
            _ => {
                debug!(entry = %entry, "association list entry is not a pair");
                return Err(err_stx!(
                    MalformedSyntaxList,
                    &entry,
                    "expected a (key . value) entry, got {}",
                    entry
                ));
            }
        }
    }
    Ok(None)
}

/// A flat `key value key value ...` list with keyword keys.
pub fn stx_plist(list: &Stx) -> bool {
    stx_plist_by(list, stx_is_keyword)
}

/// A proper, even-length list whose key positions satisfy `is_key`.
pub fn stx_plist_by<F>(list: &Stx, mut is_key: F) -> bool
where
    F: FnMut(&Stx) -> bool,
{
    let mut cur = syntax_e(list);
    loop {
        match cur {
            Datum::Null => return true,
            Datum::Pair(entry) => {
                if !is_key(&entry.car) {
                    return false;
                }
                match syntax_e(&entry.cdr) {
                    Datum::Pair(value) => cur = syntax_e(&value.cdr),
                    _ => return false,
                }
            }
            _ => return false,
        }
    }
}
