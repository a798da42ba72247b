use anyhow::{Context, Result, bail, ensure};
use bytespan::number::MAX_NUMBER_TEXT_LEN;
use bytespan::{Span, SpanMut, SpanWriter};
use clap::ValueEnum;

/// Room for a sign, sixteen integer digits, the point and fifteen fraction
/// digits, with slack.
const DOUBLE_BUFFER_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumberKind {
    U32,
    U64,
    I32,
    I64,
    F64,
}

/// Percent-encodes `text`.
pub fn encode(text: &str) -> Result<String> {
    let mut buffer = vec![0u8; text.len() * 3];
    let len = bytespan::url_encode(SpanMut::new(&mut buffer), Span::from(text))
        .context("Failed to percent-encode text")?;
    buffer.truncate(len);
    Ok(String::from_utf8(buffer)?)
}

pub fn find(source: &str, target: &str) -> Option<usize> {
    bytespan::find(Span::from(source), Span::from(target))
}

/// Trims white space and brackets the result so the edges are visible.
pub fn trim(text: &str) -> String {
    let trimmed = Span::from(text).trim_white_space();
    format!("[{}]", String::from_utf8_lossy(trimmed.as_bytes()))
}

pub fn split(text: &str, delimiter: &str) -> Result<Vec<String>> {
    ensure!(!delimiter.is_empty(), "Delimiter must not be empty");
    Ok(bytespan::tokens(Span::from(text), Span::from(delimiter))
        .map(|piece| String::from_utf8_lossy(piece.as_bytes()).into_owned())
        .collect())
}

fn number_span(text: &str) -> Result<Span<'_>> {
    ensure!(
        (1..=MAX_NUMBER_TEXT_LEN).contains(&text.len()),
        "Number text must be between 1 and {MAX_NUMBER_TEXT_LEN} bytes, got {}",
        text.len()
    );
    Ok(Span::from(text))
}

/// Parses `text` as `kind` and renders the value back with Rust formatting.
pub fn parse(kind: NumberKind, text: &str) -> Result<String> {
    let span = number_span(text)?;
    let context = || format!("Failed to parse '{text}' as {kind:?}");
    let rendered = match kind {
        NumberKind::U32 => bytespan::atou32(span).with_context(context)?.to_string(),
        NumberKind::U64 => bytespan::atou64(span).with_context(context)?.to_string(),
        NumberKind::I32 => bytespan::atoi32(span).with_context(context)?.to_string(),
        NumberKind::I64 => bytespan::atoi64(span).with_context(context)?.to_string(),
        NumberKind::F64 => bytespan::atod(span).with_context(context)?.to_string(),
    };
    Ok(rendered)
}

pub fn format_double(value: &str, digits: u32) -> Result<String> {
    let value = bytespan::atod(number_span(value)?)
        .with_context(|| format!("Failed to parse '{value}' as a double"))?;
    let mut buffer = [0u8; DOUBLE_BUFFER_LEN];
    let mut writer = SpanWriter::new(SpanMut::new(&mut buffer));
    writer
        .append_f64(value, digits)
        .with_context(|| format!("Failed to format {value}"))?;
    let len = writer.written();
    Ok(String::from_utf8_lossy(&buffer[..len]).into_owned())
}

/// Replaces `[start, end)` of `text` inside a buffer of `capacity` bytes.
///
/// Without a capacity the buffer is sized to always fit the result.
pub fn replace(
    text: &str,
    start: usize,
    end: usize,
    replacement: &str,
    capacity: Option<usize>,
) -> Result<String> {
    let capacity = capacity.unwrap_or(text.len() + replacement.len());
    if text.len() > capacity {
        bail!(
            "Text of {} bytes does not fit in a capacity of {capacity}",
            text.len()
        );
    }

    let mut buffer = vec![0u8; capacity];
    buffer[..text.len()].copy_from_slice(text.as_bytes());
    bytespan::replace(
        SpanMut::new(&mut buffer),
        text.len(),
        start,
        end,
        Span::from(replacement),
    )
    .with_context(|| {
        format!("Failed to replace [{start}, {end}) of {} bytes", text.len())
    })?;

    let new_len = text.len() - (end - start) + replacement.len();
    log::debug!("replace: {} -> {new_len} bytes in {capacity}", text.len());
    buffer.truncate(new_len);
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a b/c", "a%20b%2Fc")]
    #[case("safe-_.~", "safe-_.~")]
    #[case("", "")]
    fn encode_text(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(encode(text).unwrap(), expected);
    }

    #[test]
    fn find_reports_offset_or_nothing() {
        assert_eq!(find("hello world", "world"), Some(6));
        assert_eq!(find("hello", ""), Some(0));
        assert_eq!(find("hello", "xyz"), None);
    }

    #[rstest]
    #[case("  padded\t", "[padded]")]
    #[case(" \r\n ", "[]")]
    fn trim_brackets_result(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(trim(text), expected);
    }

    #[test]
    fn split_keeps_empty_pieces() {
        assert_eq!(split("a,,b", ",").unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn split_rejects_empty_delimiter() {
        let err = split("a,b", "").unwrap_err();
        assert_eq!(err.to_string(), "Delimiter must not be empty");
    }

    #[rstest]
    #[case(NumberKind::U32, "4294967295", "4294967295")]
    #[case(NumberKind::U64, "+007", "7")]
    #[case(NumberKind::I32, "-2147483648", "-2147483648")]
    #[case(NumberKind::I64, "-42", "-42")]
    #[case(NumberKind::F64, "-3.500", "-3.5")]
    #[case(NumberKind::F64, "1e3", "1000")]
    fn parse_numbers(#[case] kind: NumberKind, #[case] text: &str, #[case] expected: &str) {
        assert_eq!(parse(kind, text).unwrap(), expected);
    }

    #[test]
    fn parse_failure_keeps_cause() {
        let err = parse(NumberKind::U32, "4294967296").unwrap_err();
        assert_snapshot!(format!("{err:#}"), @"Failed to parse '4294967296' as U32: unexpected character in input");
    }

    #[test]
    fn parse_rejects_bad_lengths() {
        for text in [String::new(), "1".repeat(MAX_NUMBER_TEXT_LEN + 1)] {
            let err = parse(NumberKind::U64, &text).unwrap_err();
            assert!(err.to_string().starts_with("Number text must be between"));
        }
    }

    #[rstest]
    #[case("-3.500", 2, "-3.5")]
    #[case("0.125", 6, "0.125")]
    #[case("2.0625", 1, "2")]
    #[case("inf", 3, "inf")]
    #[case("nan", 3, "nan")]
    fn format_doubles(#[case] value: &str, #[case] digits: u32, #[case] expected: &str) {
        assert_eq!(format_double(value, digits).unwrap(), expected);
    }

    #[test]
    fn format_double_beyond_safe_integer_fails() {
        assert!(format_double("1e300", 2).is_err());
    }

    #[test]
    fn replace_in_default_capacity() {
        assert_eq!(
            replace("hello world", 6, 11, "there!", None).unwrap(),
            "hello there!"
        );
    }

    #[rstest]
    #[case("abc", 3, 3, "def", Some(6), "abcdef")]
    #[case("abc", 0, 3, "", Some(3), "")]
    #[case("abcdef", 1, 5, "X", Some(6), "aXf")]
    fn replace_cases(
        #[case] text: &str,
        #[case] start: usize,
        #[case] end: usize,
        #[case] replacement: &str,
        #[case] capacity: Option<usize>,
        #[case] expected: &str,
    ) {
        assert_eq!(
            replace(text, start, end, replacement, capacity).unwrap(),
            expected
        );
    }

    #[test]
    fn replace_beyond_capacity_fails() {
        let err = replace("hello world", 6, 11, "there!", Some(11)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to replace [6, 11)"));
    }

    #[test]
    fn replace_with_text_larger_than_capacity_fails() {
        assert!(replace("hello", 0, 0, "", Some(3)).is_err());
    }
}
