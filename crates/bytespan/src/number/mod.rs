//! ASCII number conversion.
//!
//! Parsing takes the whole span or nothing: `"12"` parses, `"12 "` and
//! `" 12"` do not. Formatting writes plain decimal with no grouping and
//! never leaves a partial number behind when the destination is too small.

mod format;
mod parse;

pub use format::{
    MAX_SAFE_INTEGER, MAX_SUPPORTED_FRACTIONAL_DIGITS, dtoa, i32toa, i64toa, u32toa, u64toa,
};
pub use parse::{MAX_NUMBER_TEXT_LEN, atod, atoi32, atoi64, atou32, atou64};
