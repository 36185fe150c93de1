//! Lenient integer parsing for user-supplied numeric text.

/// Value of the leading decimal digits of `value`, after optional leading
/// whitespace and a `+` sign. A leading `-` or any other character yields 0.
/// Overflow saturates at `u64::MAX`.
pub fn leading_integer(value: &str) -> u64 {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    value
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
}
