use crate::{Result, SpanError, SpanMut, SpanWriter};

/// Fractional digits beyond this are clamped; a double carries about 15
/// significant decimal digits.
pub const MAX_SUPPORTED_FRACTIONAL_DIGITS: u32 = 15;

/// Largest integer a double holds exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

const MAX_U64_DIGITS: usize = 20;

/// Renders `value` right-aligned into `buffer` and returns the digits.
fn decimal_digits(mut value: u64, buffer: &mut [u8; MAX_U64_DIGITS]) -> &[u8] {
    let mut start = buffer.len();
    loop {
        start -= 1;
        buffer[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buffer[start..]
}

/// Leading zero count and significant digits of `fraction` (in `[0, 1)`)
/// kept to `digits` places, or `None` if nothing significant remains.
///
/// Digits come from repeated multiplication by ten and truncation, so the
/// last digit is not rounded.
fn split_fraction(fraction: f64, digits: u32) -> Option<(usize, u64)> {
    if digits == 0 {
        return None;
    }
    let mut leading_zeros = 0;
    let mut shifted = fraction;
    for _ in 0..digits {
        shifted *= 10.0;
        if shifted < 1.0 {
            leading_zeros += 1;
        }
    }
    // At most 15 digits, so this stays below 2^53.
    let mut significant = shifted.trunc() as u64;
    if significant == 0 {
        return None;
    }
    while significant % 10 == 0 {
        significant /= 10;
    }
    Some((leading_zeros, significant))
}

impl SpanWriter<'_> {
    pub fn append_u64(&mut self, value: u64) -> Result<()> {
        let mut buffer = [0u8; MAX_U64_DIGITS];
        self.append(decimal_digits(value, &mut buffer))
    }

    pub fn append_u32(&mut self, value: u32) -> Result<()> {
        self.append_u64(u64::from(value))
    }

    /// Sign and digits are checked together, so a failure never leaves a
    /// lone `-` behind.
    pub fn append_i64(&mut self, value: i64) -> Result<()> {
        let mut buffer = [0u8; MAX_U64_DIGITS];
        let digits = decimal_digits(value.unsigned_abs(), &mut buffer);
        let negative = value < 0;
        self.ensure(usize::from(negative) + digits.len())?;
        if negative {
            self.put(b"-");
        }
        self.put(digits);
        Ok(())
    }

    pub fn append_i32(&mut self, value: i32) -> Result<()> {
        self.append_i64(i64::from(value))
    }

    /// Appends `value` with up to `fractional_digits` digits after the point.
    ///
    /// Non-finite values are written as `nan`, `inf` or `-inf`. The point is
    /// omitted when no non-zero digit survives truncation, and trailing zeros
    /// are never written: `3.500` with two digits is `3.5`. Integer parts
    /// above [`MAX_SAFE_INTEGER`] are [`SpanError::NotSupported`].
    pub fn append_f64(&mut self, value: f64, fractional_digits: u32) -> Result<()> {
        if !value.is_finite() {
            let literal: &[u8] = if value.is_nan() {
                b"nan"
            } else if value < 0.0 {
                b"-inf"
            } else {
                b"inf"
            };
            return self.append(literal);
        }

        let negative = value < 0.0;
        let magnitude = value.abs();
        let integer_part = magnitude.trunc();
        if integer_part > MAX_SAFE_INTEGER as f64 {
            log::debug!("dtoa: integer part of {value} is beyond exact double precision");
            return Err(SpanError::NotSupported);
        }

        let mut integer_buffer = [0u8; MAX_U64_DIGITS];
        let integer_digits = decimal_digits(integer_part as u64, &mut integer_buffer);

        let digits = fractional_digits.min(MAX_SUPPORTED_FRACTIONAL_DIGITS);
        let mut fraction_buffer = [0u8; MAX_U64_DIGITS];
        let (leading_zeros, fraction_digits): (usize, &[u8]) =
            match split_fraction(magnitude - integer_part, digits) {
                Some((zeros, significant)) => {
                    (zeros, decimal_digits(significant, &mut fraction_buffer))
                }
                None => (0, &[][..]),
            };
        let fraction_len = if fraction_digits.is_empty() {
            0
        } else {
            1 + leading_zeros + fraction_digits.len()
        };
        self.ensure(usize::from(negative) + integer_digits.len() + fraction_len)?;

        if negative {
            self.put(b"-");
        }
        self.put(integer_digits);
        if !fraction_digits.is_empty() {
            self.put(b".");
            for _ in 0..leading_zeros {
                self.put(b"0");
            }
            self.put(fraction_digits);
        }
        Ok(())
    }
}

/// Writes `source` in decimal and returns the unwritten remainder.
pub fn u64toa(destination: SpanMut<'_>, source: u64) -> Result<SpanMut<'_>> {
    let mut writer = SpanWriter::new(destination);
    writer.append_u64(source)?;
    Ok(writer.into_remainder())
}

pub fn u32toa(destination: SpanMut<'_>, source: u32) -> Result<SpanMut<'_>> {
    let mut writer = SpanWriter::new(destination);
    writer.append_u32(source)?;
    Ok(writer.into_remainder())
}

pub fn i64toa(destination: SpanMut<'_>, source: i64) -> Result<SpanMut<'_>> {
    let mut writer = SpanWriter::new(destination);
    writer.append_i64(source)?;
    Ok(writer.into_remainder())
}

pub fn i32toa(destination: SpanMut<'_>, source: i32) -> Result<SpanMut<'_>> {
    let mut writer = SpanWriter::new(destination);
    writer.append_i32(source)?;
    Ok(writer.into_remainder())
}

/// Writes `source` with at most `fractional_digits` (clamped to
/// [`MAX_SUPPORTED_FRACTIONAL_DIGITS`]) truncated fractional digits.
/// See [`SpanWriter::append_f64`].
pub fn dtoa(
    destination: SpanMut<'_>,
    source: f64,
    fractional_digits: u32,
) -> Result<SpanMut<'_>> {
    let mut writer = SpanWriter::new(destination);
    writer.append_f64(source, fractional_digits)?;
    Ok(writer.into_remainder())
}
