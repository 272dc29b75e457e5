//! Shared helpers for the integration suites.
#![allow(dead_code)]

use sutra_stx::{
    identifier_marks, identifier_symbol, is_sealed_syntax, stx_to_datum, syntax_e, Datum,
    SourceLocation, Span, Stx,
};

/// Routes `tracing` output to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn loc(start: usize, end: usize) -> Option<SourceLocation> {
    Some(SourceLocation::new(Span::new(start, end), 1, start as u32 + 1))
}

/// A symbol as the reader would hand it over.
pub fn read_sym(name: &str, start: usize) -> Stx {
    Stx::source_node(Stx::symbol(name), loc(start, start + name.len()))
}

/// A list as the reader would hand it over.
pub fn read_list(items: impl IntoIterator<Item = Stx>, start: usize, end: usize) -> Stx {
    Stx::source_node(Stx::list(items), loc(start, end))
}

/// Strategy-independent rendering: every identifier shows its net marks, a
/// bare symbol counts as an identifier with none, and sealed syntax is opaque.
pub fn resolve(stx: &Stx) -> String {
    if is_sealed_syntax(stx) {
        return format!("'{}", stx_to_datum(stx));
    }
    if let (Some(sym), Some(marks)) = (identifier_symbol(stx), identifier_marks(stx)) {
        let serials: Vec<String> = marks.iter().map(|m| m.to_string()).collect();
        return format!("{}[{}]", sym, serials.join(" "));
    }
    match syntax_e(stx) {
        Datum::Pair(p) => {
            let mut parts = vec![resolve(&p.car)];
            let mut rest = p.cdr.clone();
            loop {
                match syntax_e(&rest) {
                    Datum::Pair(next) => {
                        parts.push(resolve(&next.car));
                        rest = next.cdr.clone();
                    }
                    Datum::Null => break,
                    _ => {
                        parts.push(".".to_string());
                        parts.push(resolve(&rest));
                        break;
                    }
                }
            }
            format!("({})", parts.join(" "))
        }
        Datum::Vector(items) => {
            let parts: Vec<String> = items.iter().map(resolve).collect();
            format!("#({})", parts.join(" "))
        }
        Datum::Boxed(b) => format!("#&{}", resolve(&b)),
        other => Stx::datum(other).to_string(),
    }
}
