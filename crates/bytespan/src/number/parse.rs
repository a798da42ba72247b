use crate::{Result, Span, SpanError, precondition};

/// Longest text the parsers accept.
pub const MAX_NUMBER_TEXT_LEN: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    Unsigned,
    Signed,
    Float,
}

/// Whether `first` can begin a number of the given kind.
///
/// `".5"` and `" 5"` are rejected here, before the grammar runs.
fn is_valid_start_of_number(first: u8, kind: NumberKind) -> bool {
    match first {
        b'0'..=b'9' | b'+' => true,
        b'-' => kind != NumberKind::Unsigned,
        b'n' | b'N' | b'i' | b'I' => kind == NumberKind::Float,
        _ => false,
    }
}

#[track_caller]
fn number_text(source: Span<'_>, kind: NumberKind) -> Result<&[u8]> {
    precondition!(
        (1..=MAX_NUMBER_TEXT_LEN).contains(&source.len()),
        "number text must be 1..={MAX_NUMBER_TEXT_LEN} bytes, got {}",
        source.len()
    );
    let text = source.as_bytes();
    if !is_valid_start_of_number(text[0], kind) {
        return Err(SpanError::UnexpectedCharacter);
    }
    Ok(text)
}

fn parse_u64(text: &[u8]) -> Result<u64> {
    lexical_core::parse::<u64>(text).map_err(|err| {
        log::trace!("integer text \"{}\" rejected: {err}", text.escape_ascii());
        SpanError::UnexpectedCharacter
    })
}

fn parse_i64(text: &[u8]) -> Result<i64> {
    lexical_core::parse::<i64>(text).map_err(|err| {
        log::trace!("integer text \"{}\" rejected: {err}", text.escape_ascii());
        SpanError::UnexpectedCharacter
    })
}

/// A finite literal that came out infinite, or a literal with significant
/// digits that came out as zero, overflowed or underflowed the double range.
/// Subnormal results count as underflow too.
fn is_out_of_range(text: &[u8], value: f64) -> bool {
    if value.is_infinite() {
        return !text.iter().any(|b| matches!(b, b'i' | b'I'));
    }
    if value.is_subnormal() {
        return true;
    }
    if value == 0.0 {
        let mantissa = text
            .split(|b| matches!(b, b'e' | b'E'))
            .next()
            .unwrap_or(text);
        return mantissa.iter().any(|b| matches!(b, b'1'..=b'9'));
    }
    false
}

/// Parses the whole span as an unsigned 64-bit decimal.
///
/// # Panics
/// If `source` is empty or longer than [`MAX_NUMBER_TEXT_LEN`].
#[track_caller]
pub fn atou64(source: Span<'_>) -> Result<u64> {
    parse_u64(number_text(source, NumberKind::Unsigned)?)
}

#[track_caller]
pub fn atou32(source: Span<'_>) -> Result<u32> {
    let value = parse_u64(number_text(source, NumberKind::Unsigned)?)?;
    u32::try_from(value).map_err(|_| SpanError::UnexpectedCharacter)
}

#[track_caller]
pub fn atoi64(source: Span<'_>) -> Result<i64> {
    parse_i64(number_text(source, NumberKind::Signed)?)
}

#[track_caller]
pub fn atoi32(source: Span<'_>) -> Result<i32> {
    let value = parse_i64(number_text(source, NumberKind::Signed)?)?;
    i32::try_from(value).map_err(|_| SpanError::UnexpectedCharacter)
}

/// Parses the whole span as a double: decimal or exponent notation, or
/// `nan` / `inf` / `infinity` in any case, each with an optional sign.
///
/// Values outside the double range are rejected rather than saturated.
#[track_caller]
pub fn atod(source: Span<'_>) -> Result<f64> {
    let text = number_text(source, NumberKind::Float)?;
    let value = lexical_core::parse::<f64>(text).map_err(|err| {
        log::trace!("double text \"{}\" rejected: {err}", text.escape_ascii());
        SpanError::UnexpectedCharacter
    })?;
    if is_out_of_range(text, value) {
        log::debug!("double text \"{}\" is out of range", text.escape_ascii());
        return Err(SpanError::UnexpectedCharacter);
    }
    Ok(value)
}
