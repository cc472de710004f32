//! Cooperative cancellation.
//!
//! A run receives an `Option<Arc<AtomicBool>>`; any thread may set the flag
//! and the run polls it between chromosome constructions.

use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) fn is_cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::Relaxed))
}
