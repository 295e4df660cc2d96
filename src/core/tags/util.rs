//! core/tags/util.rs
//! Small parsing helpers shared by the container implementations.

use crate::core::error::TagFault;

/// Parse operator text into the number half of an MP4 `(number, total)` pair.
///
/// - "3" / " 3 " -> 3
/// - "3/12", "three", "-1", "" -> error
/// - values above 65535 don't fit the 16-bit atom field -> error
pub(crate) fn parse_pair_number(s: &str) -> Result<u32, TagFault> {
    let n: u32 = s
        .trim()
        .parse()
        .map_err(|_| TagFault::InvalidNumber(s.to_string()))?;

    if n > u32::from(u16::MAX) {
        return Err(TagFault::InvalidNumber(s.to_string()));
    }
    Ok(n)
}

/// First entry of a multi-value text field. ID3v2.4 separates values with NUL.
pub(crate) fn first_value(s: &str) -> &str {
    s.split('\0').next().unwrap_or(s)
}
