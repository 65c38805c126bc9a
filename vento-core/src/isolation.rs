//! Panic isolation for user-supplied callbacks.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Run `f`, logging and swallowing a panic instead of unwinding into the
/// caller. Returns whether `f` completed.
pub(crate) fn run_isolated(site: &'static str, f: impl FnOnce()) -> bool {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(payload) => {
            tracing::error!(
                site,
                panic = %panic_message(payload.as_ref()),
                "callback panicked; continuing with remaining callbacks"
            );
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
