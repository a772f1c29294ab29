// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Numeric text-input parsing with silent fallbacks.

use std::str::FromStr;

/// Parse a user-typed number, substituting `fallback` for anything that
/// does not parse (empty string, garbage, trailing junk). Invalid input is
/// never reported back to the user.
pub fn parse_with_fallback<T: FromStr>(input: &str, fallback: T) -> T {
    input.trim().parse().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(parse_with_fallback("", 1000u32), 1000);
        assert_eq!(parse_with_fallback("   ", 5u32), 5);
    }

    #[test]
    fn test_non_numeric_input_falls_back() {
        assert_eq!(parse_with_fallback("abc", 1000u32), 1000);
        assert_eq!(parse_with_fallback("12px", 60u32), 60);
        assert_eq!(parse_with_fallback("1.5", 5u32), 5);
    }

    #[test]
    fn test_valid_input_is_parsed() {
        assert_eq!(parse_with_fallback("800", 1000u32), 800);
        assert_eq!(parse_with_fallback(" 42 ", 5u32), 42);
        assert_eq!(parse_with_fallback("2.5", 1.0f32), 2.5);
    }
}
