// SPDX-License-Identifier: MIT OR Apache-2.0

//! `<minutes>m<seconds>s` duration strings.

use crate::domain::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MINUTES_FIRST: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?:(?P<minutes>[0-9]+)m)?(?:(?P<seconds>[0-9]+)s)?$").ok());

static SECONDS_FIRST: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?:(?P<seconds>[0-9]+)s)?(?:(?P<minutes>[0-9]+)m)?$").ok());

/// Parses a duration such as `1m30s`, `30s1m`, `90s` or `2m` into seconds.
///
/// Either component may be omitted and counts as zero, so the empty string is
/// zero seconds. Usable directly as a clap `value_parser`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] if the input matches neither order
/// or the total does not fit in a `u64`.
///
/// # Examples
///
/// ```rust
/// use cfgchain::cli::duration_in_seconds;
///
/// assert_eq!(duration_in_seconds("2m3s").unwrap(), 123);
/// assert_eq!(duration_in_seconds("3s2m").unwrap(), 123);
/// assert!(duration_in_seconds("bogus").is_err());
/// ```
pub fn duration_in_seconds(time_str: &str) -> Result<u64> {
    let invalid = || ConfigError::InvalidDuration {
        input: time_str.to_string(),
    };

    let captures = match_with(&MINUTES_FIRST, time_str)
        .or_else(|| match_with(&SECONDS_FIRST, time_str))
        .ok_or_else(invalid)?;

    let minutes = component(&captures, "minutes").ok_or_else(invalid)?;
    let seconds = component(&captures, "seconds").ok_or_else(invalid)?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)
}

fn match_with<'t>(pattern: &Option<Regex>, text: &'t str) -> Option<Captures<'t>> {
    pattern.as_ref()?.captures(text)
}

// None only when the digits overflow.
fn component(captures: &Captures<'_>, name: &str) -> Option<u64> {
    match captures.name(name) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seconds_only() {
        assert_eq!(duration_in_seconds("47s").unwrap(), 47);
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(duration_in_seconds("1m").unwrap(), 60);
    }

    #[test]
    fn test_both_orders() {
        assert_eq!(duration_in_seconds("2m3s").unwrap(), 123);
        assert_eq!(duration_in_seconds("3s2m").unwrap(), 123);
        assert_eq!(duration_in_seconds("1m9s").unwrap(), 69);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(duration_in_seconds("").unwrap(), 0);
    }

    #[test]
    fn test_rejects_garbage() {
        for input in ["bogus", "1h", "1m2m", "m", "s", "1 m", "-1s", "1m2s3m", "1.5s"] {
            match duration_in_seconds(input) {
                Err(ConfigError::InvalidDuration { input: rejected }) => assert_eq!(rejected, input),
                other => panic!("{:?} parsed as {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        for input in ["\u{0663}s", "\u{0661}m", "1m\u{0662}s"] {
            assert!(matches!(
                duration_in_seconds(input),
                Err(ConfigError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(duration_in_seconds("99999999999999999999s").is_err());
        assert!(duration_in_seconds(&format!("{}m", u64::MAX)).is_err());
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(m in 0u64..100_000, s in 0u64..100_000) {
            let expected = m * 60 + s;
            prop_assert_eq!(duration_in_seconds(&format!("{}m{}s", m, s)).unwrap(), expected);
            prop_assert_eq!(duration_in_seconds(&format!("{}s{}m", s, m)).unwrap(), expected);
        }

        #[test]
        fn prop_never_panics(input in "\\PC*") {
            let _ = duration_in_seconds(&input);
        }
    }
}
