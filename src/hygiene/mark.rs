//! Marks: identity tokens for expansion steps.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One hygiene-relevant expansion step.
///
/// Marks compare by allocation identity, never by value. The serial is the
/// counter value at minting time and exists only for printing; two marks
/// minted by separate counters may share a serial and still differ.
#[derive(Clone)]
pub struct Mark(Arc<MarkToken>);

struct MarkToken {
    serial: u64,
}

/// Ordered mark sequence, most recently applied first.
pub type Marks = im::Vector<Mark>;

impl Mark {
    pub(crate) fn new(serial: u64) -> Self {
        Mark(Arc::new(MarkToken { serial }))
    }

    pub fn serial(&self) -> u64 {
        self.0.serial
    }
}

impl PartialEq for Mark {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Mark {}

impl Hash for Mark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0.serial)
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Pushes `mark` onto `marks`, or cancels it against an equal head.
///
/// This is the cancellation law that makes a mark applied on the way out of a
/// transformer and again on the way back in disappear.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::hygiene::{apply_mark, Gensym, Marks};
/// let a = Gensym::new().fresh_mark();
/// let once = apply_mark(&a, &Marks::new());
/// assert_eq!(once, Marks::unit(a.clone()));
/// assert!(apply_mark(&a, &once).is_empty());
/// ```
pub fn apply_mark(mark: &Mark, marks: &Marks) -> Marks {
    match marks.front() {
        Some(head) if head == mark => marks.skip(1),
        _ => {
            let mut out = marks.clone();
            out.push_front(mark.clone());
            out
        }
    }
}
