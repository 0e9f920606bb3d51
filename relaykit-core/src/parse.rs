//! Separator-delimited byte list parsing
//!
//! Turns strings such as `"192.168.1.1"` (base 10, `.`) or
//! `"DE:AD:BE:EF"` (base 16, `:`) into bytes.
//!
//! Two flavours are provided:
//!
//! - [`parse_bytes`] is permissive. Each token is converted with C `strtoul`
//!   rules and truncated to 8 bits, malformed tokens become 0, and nothing is
//!   ever reported. Slots past the last parsed token are left untouched; the
//!   return value is the number of slots written.
//! - [`parse_bytes_strict`] validates every token and reports the first
//!   problem as a [`ParseError`]. [`parse_ipv4`], [`parse_mac`] and
//!   [`parse_byte_vec`] build on it.
//!
//! Input ends at the first NUL character, if any.

use core::fmt;

use heapless::Vec;

/// Errors reported by the strict parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Base outside 2..=36
    InvalidBase,
    /// Nothing to parse
    EmptyInput,
    /// Token is empty or contains a character that is not a digit in the base
    InvalidToken { index: usize },
    /// Token value does not fit in a byte
    ValueOutOfRange { index: usize },
    /// More tokens than output slots
    TooManyTokens,
    /// Fewer tokens than a fixed-size format requires
    TooFewTokens,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidBase => write!(f, "invalid numeric base"),
            ParseError::EmptyInput => write!(f, "empty input"),
            ParseError::InvalidToken { index } => write!(f, "invalid token at position {}", index),
            ParseError::ValueOutOfRange { index } => {
                write!(f, "value out of byte range at position {}", index)
            }
            ParseError::TooManyTokens => write!(f, "too many tokens"),
            ParseError::TooFewTokens => write!(f, "too few tokens"),
        }
    }
}

/// Parse up to `max_bytes` separator-delimited numbers into `bytes`
///
/// Never fails. Returns how many leading slots were written, which is the
/// number of separators plus one, capped at `max_bytes` and `bytes.len()`.
/// Empty input writes nothing. A trailing separator yields a final 0.
pub fn parse_bytes(
    input: &str,
    separator: char,
    bytes: &mut [u8],
    max_bytes: usize,
    base: u32,
) -> usize {
    let mut rest = until_nul(input);
    if rest.is_empty() {
        return 0;
    }

    let mut count = 0;
    for slot in bytes.iter_mut().take(max_bytes) {
        *slot = strtoul(rest.as_bytes(), base) as u8;
        count += 1;

        match rest.find(separator) {
            Some(pos) => rest = &rest[pos + separator.len_utf8()..],
            None => break,
        }
    }
    count
}

/// Parse separator-delimited numbers, rejecting anything malformed
///
/// Every token must be a non-empty run of digits valid in `base` (a `0x`
/// prefix is accepted for base 16) with a value of at most 255, and there
/// must be no more tokens than `bytes` has slots. On error the buffer may
/// hold the tokens parsed before the failing one.
pub fn parse_bytes_strict(
    input: &str,
    separator: char,
    bytes: &mut [u8],
    base: u32,
) -> Result<usize, ParseError> {
    if !(2..=36).contains(&base) {
        return Err(ParseError::InvalidBase);
    }
    let input = until_nul(input);
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut count = 0;
    for (index, token) in input.split(separator).enumerate() {
        let slot = bytes.get_mut(index).ok_or(ParseError::TooManyTokens)?;
        *slot = parse_token(token, base, index)?;
        count += 1;
    }
    Ok(count)
}

/// Strict parse into an owned fixed-capacity vector
pub fn parse_byte_vec<const N: usize>(
    input: &str,
    separator: char,
    base: u32,
) -> Result<Vec<u8, N>, ParseError> {
    let mut buf = [0u8; N];
    let count = parse_bytes_strict(input, separator, &mut buf, base)?;
    Vec::from_slice(&buf[..count]).map_err(|_| ParseError::TooManyTokens)
}

/// Parse a dotted-decimal IPv4 address (`"192.168.1.1"`)
pub fn parse_ipv4(input: &str) -> Result<[u8; 4], ParseError> {
    parse_exact(input, '.', 10)
}

/// Parse a colon-separated MAC address (`"DE:AD:BE:EF:00:01"`)
pub fn parse_mac(input: &str) -> Result<[u8; 6], ParseError> {
    parse_exact(input, ':', 16)
}

fn parse_exact<const N: usize>(
    input: &str,
    separator: char,
    base: u32,
) -> Result<[u8; N], ParseError> {
    let mut out = [0u8; N];
    let count = parse_bytes_strict(input, separator, &mut out, base)?;
    if count != N {
        return Err(ParseError::TooFewTokens);
    }
    Ok(out)
}

fn parse_token(token: &str, base: u32, index: usize) -> Result<u8, ParseError> {
    let digits = if base == 16 {
        token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token)
    } else {
        token
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return Err(ParseError::InvalidToken { index });
    }
    // Only overflow is left once every character is a digit
    u8::from_str_radix(digits, base).map_err(|_| ParseError::ValueOutOfRange { index })
}

fn until_nul(input: &str) -> &str {
    match input.find('\0') {
        Some(end) => &input[..end],
        None => input,
    }
}

/// C `strtoul` on a 32-bit target
///
/// Skips leading whitespace, takes an optional sign and, for base 0 or 16, an
/// optional `0x` prefix. Base 0 picks 16, 8 or 10 from the prefix. Stops at
/// the first non-digit. Overflow saturates to `u32::MAX`; a `-` sign negates
/// modulo 2^32. Invalid bases and inputs without digits give 0.
fn strtoul(s: &[u8], base: u32) -> u32 {
    if base == 1 || base > 36 {
        return 0;
    }

    let mut i = 0;
    while i < s.len() && is_c_space(s[i]) {
        i += 1;
    }

    let mut negative = false;
    if matches!(s.get(i), Some(b'+' | b'-')) {
        negative = s[i] == b'-';
        i += 1;
    }

    let mut base = base;
    if (base == 0 || base == 16) && has_hex_prefix(&s[i..]) {
        i += 2;
        base = 16;
    } else if base == 0 {
        base = if s.get(i) == Some(&b'0') { 8 } else { 10 };
    }

    let mut acc: u32 = 0;
    let mut overflow = false;
    while let Some(digit) = s.get(i).and_then(|&c| (c as char).to_digit(base)) {
        match acc.checked_mul(base).and_then(|v| v.checked_add(digit)) {
            Some(v) => acc = v,
            None => overflow = true,
        }
        i += 1;
    }

    if overflow {
        u32::MAX
    } else if negative {
        acc.wrapping_neg()
    } else {
        acc
    }
}

fn has_hex_prefix(s: &[u8]) -> bool {
    matches!(s, [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit())
}

fn is_c_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
