//! The fatal failure channel.
//!
//! A violated precondition means the calling code is wrong, not that the
//! input was bad, so it is never turned into a [`SpanError`]. The check runs
//! in every build profile and panics with the caller's location.
//!
//! [`SpanError`]: crate::SpanError

use std::fmt;

/// Panics unless `$cond` holds.
///
/// ```should_panic
/// bytespan::precondition!(1 > 2, "one is not greater than {}", 2);
/// ```
#[macro_export]
macro_rules! precondition {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::contract::violated(format_args!($($arg)+));
        }
    };
}

#[cold]
#[inline(never)]
#[track_caller]
pub fn violated(message: fmt::Arguments<'_>) -> ! {
    panic!("precondition violated: {message}")
}
