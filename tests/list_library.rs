//! The list library as a transformer sees it: wrapped inputs, fallible
//! callbacks, and malformed shapes.

mod common;

use common::{loc, read_list, read_sym};
use sutra_stx::{
    identifier_marks, stx_andmap, stx_apply_mark, stx_e, stx_foldl, stx_for_each,
    stx_for_each2, stx_getq, stx_getq_by, stx_is_keyword, stx_last, stx_length, stx_map,
    stx_map2, stx_ormap, stx_plist_by, stx_reverse, stx_to_datum, Datum, ErrorType, Gensym,
    Marks, Stx, StxError,
};

#[derive(Debug)]
enum ExpandError {
    Syntax(StxError),
    Rejected(String),
}

impl From<StxError> for ExpandError {
    fn from(e: StxError) -> Self {
        ExpandError::Syntax(e)
    }
}

fn ints(ns: &[i64]) -> Stx {
    Stx::list(ns.iter().map(|&n| Stx::int(n)))
}

fn as_int(stx: &Stx) -> i64 {
    match stx_e(stx) {
        Datum::Int(n) => n,
        other => panic!("expected integer, got {}", other),
    }
}

#[test]
fn callback_errors_propagate_unchanged() {
    let res: Result<Vec<i64>, ExpandError> = stx_map(&ints(&[1, 2, 3]), |x| {
        let n = as_int(&x);
        if n == 2 {
            Err(ExpandError::Rejected(format!("no {}", n)))
        } else {
            Ok(n)
        }
    });
    match res {
        Err(ExpandError::Rejected(msg)) => assert_eq!(msg, "no 2"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn improper_tail_is_reported_after_earlier_elements() {
    let dotted = Stx::list_with_tail([Stx::int(1), Stx::int(2)], Stx::int(3));
    let mut seen = Vec::new();
    let res: Result<(), ExpandError> = stx_for_each(&dotted, |x| {
        seen.push(as_int(&x));
        Ok(())
    });
    assert_eq!(seen, [1, 2]);
    match res {
        Err(ExpandError::Syntax(e)) => assert_eq!(e.error_type(), ErrorType::MalformedSyntaxList),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn parallel_traversal_refuses_to_truncate() {
    let mut pairs = Vec::new();
    let res = stx_for_each2(&ints(&[1, 2, 3]), &ints(&[10, 20]), |a, b| {
        pairs.push((as_int(&a), as_int(&b)));
        Ok::<_, StxError>(())
    });
    assert_eq!(pairs, [(1, 10), (2, 20)]);
    assert_eq!(res.unwrap_err().error_type(), ErrorType::MalformedSyntaxList);

    let sums = stx_map2(&ints(&[1, 2]), &ints(&[10, 20]), |a, b| {
        Ok::<_, StxError>(as_int(&a) + as_int(&b))
    })
    .unwrap();
    assert_eq!(sums, [11, 22]);
}

#[test]
fn mismatch_error_renders_both_lists() {
    let a = read_list([read_sym("x", 1)], 0, 3);
    let b = read_list([read_sym("y", 5), read_sym("z", 7)], 4, 9);
    let err = stx_map2(&a, &b, |x, _| Ok::<_, StxError>(x)).unwrap_err();
    let report = format!("{:?}", miette::Report::new(err.with_source("m.sutra", "(x) (y z)")));
    assert!(report.contains("different lengths"));
    assert!(report.contains("other list"));
}

#[test]
fn short_circuiting_stops_early() {
    let mut visited = 0;
    let all_small = stx_andmap(&ints(&[1, 50, 2]), |x| {
        visited += 1;
        Ok::<_, StxError>(as_int(&x) < 10)
    })
    .unwrap();
    assert!(!all_small);
    assert_eq!(visited, 2);

    let found = stx_ormap(&ints(&[1, 50, 70]), |x| {
        let n = as_int(&x);
        Ok::<_, StxError>((n > 10).then_some(n))
    })
    .unwrap();
    assert_eq!(found, Some(50));
    assert!(stx_andmap(&Stx::null(), |_| Ok::<_, StxError>(false)).unwrap());
}

#[test]
fn folds_and_structure_see_wrapped_elements() {
    let gensym = Gensym::new();
    let m = gensym.fresh_mark();
    let wrapped = stx_apply_mark(
        &read_list([read_sym("a", 1), read_sym("b", 3), read_sym("c", 5)], 0, 7),
        &m,
    );
    assert_eq!(stx_length(&wrapped).unwrap(), 3);

    let reversed = stx_reverse(&wrapped).unwrap();
    assert_eq!(reversed.to_string(), "(c b a)");
    let first = stx_foldl(&reversed, None, |acc, x| Ok::<_, StxError>(acc.or(Some(x)))).unwrap();
    let first = first.unwrap();
    assert_eq!(identifier_marks(&first), Some(Marks::unit(m.clone())));
    assert_eq!(common::resolve(&first), format!("c[{}]", m));

    let last = stx_last(&wrapped).unwrap();
    assert_eq!(stx_to_datum(&last).to_string(), "c");
    assert_eq!(sutra_stx::stx_source(&last), loc(5, 6));
}

#[test]
fn association_and_property_lists() {
    let alist = Stx::list([
        Stx::cons(Stx::keyword("name"), Stx::string("swap")),
        Stx::cons(Stx::keyword("arity"), Stx::int(2)),
    ]);
    let arity = stx_getq(&Stx::keyword("arity"), &alist).unwrap();
    assert_eq!(arity.map(|v| as_int(&v)), Some(2));
    assert!(stx_getq(&Stx::keyword("missing"), &alist).unwrap().is_none());

    let by_name = stx_getq_by(&Stx::string("ARITY"), &alist, |k, candidate| {
        match (stx_e(k), stx_e(candidate)) {
            (Datum::String(s), Datum::Keyword(kw)) => s.eq_ignore_ascii_case(kw.name()),
            _ => false,
        }
    })
    .unwrap();
    assert!(by_name.is_some());

    let plist = Stx::list([Stx::keyword("a"), Stx::int(1), Stx::symbol("b"), Stx::int(2)]);
    assert!(!stx_plist_by(&plist, stx_is_keyword));
    assert!(stx_plist_by(&plist, |k| matches!(
        stx_e(k),
        Datum::Keyword(_) | Datum::Symbol(_)
    )));
}

#[test]
fn million_element_lists_build_traverse_and_drop() {
    let n = 1_000_000;
    let big = Stx::list((0..n).map(Stx::int));
    assert_eq!(stx_length(&big).unwrap(), n as usize);

    let gensym = Gensym::new();
    let marked = stx_apply_mark(&big, &gensym.fresh_mark());
    let reversed = stx_reverse(&marked).unwrap();
    assert_eq!(stx_last(&reversed).map(|x| as_int(&x)).unwrap(), 0);

    let doubled = stx_map(&big, |x| Ok::<_, StxError>(Stx::int(as_int(&x) * 2))).unwrap();
    let doubled = Stx::list(doubled);
    assert_eq!(stx_length(&doubled).unwrap(), n as usize);

    drop(reversed);
    drop(marked);
    drop(doubled);
    drop(big);
}
