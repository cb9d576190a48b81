//! Validation of CSS length values injected into generated stylesheets.

use std::fmt;

use tracing::warn;

/// Units accepted in a [`CssSize`].
const UNITS: &[&str] = &["px", "%", "em", "rem", "vh", "vw"];

/// A CSS length such as `16px`, `1.5rem` or `80%`.
///
/// Only a plain decimal number followed by one of a small set of units is
/// accepted, so the value can be written into a stylesheet verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssSize(String);

impl CssSize {
    /// Parse `value`, which must match `digits(.digits)?unit` exactly.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let mut rest = &value[digits..];

        if let Some(fraction) = rest.strip_prefix('.') {
            let frac_digits = fraction.bytes().take_while(u8::is_ascii_digit).count();
            if frac_digits == 0 {
                return None;
            }
            rest = &fraction[frac_digits..];
        }

        UNITS
            .contains(&rest)
            .then(|| CssSize(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `value` is an acceptable CSS length.
///
/// # Examples
///
/// ```
/// use quire::sanitize::validate_css_size;
///
/// assert!(validate_css_size("16px"));
/// assert!(validate_css_size("1.5rem"));
/// assert!(!validate_css_size("100"));
/// assert!(!validate_css_size("16px; background: red"));
/// ```
pub fn validate_css_size(value: &str) -> bool {
    CssSize::parse(value).is_some()
}

/// Return `value` if it is a valid CSS length, otherwise `default`.
///
/// A rejected value is logged as a warning.
pub fn sanitize_css_size<'a>(value: &'a str, default: &'a str) -> &'a str {
    if validate_css_size(value) {
        value
    } else {
        warn!(value, default, "invalid CSS size, using default");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sizes() {
        for value in ["16px", "1.5rem", "100%", "2em", "50vh", "100vw", "0px", "12.25px"] {
            assert!(validate_css_size(value), "{value}");
        }
    }

    #[test]
    fn test_invalid_sizes() {
        for value in [
            "",
            "100",
            "px",
            "16 px",
            " 16px",
            "16px ",
            "-16px",
            "+16px",
            "1.px",
            ".5em",
            "1.2.3px",
            "16PX",
            "16pt",
            "16px;",
            "16px; background: url(evil)",
            "expression(alert(1))",
            "16px\0",
            "１６px",
        ] {
            assert!(!validate_css_size(value), "{value:?}");
        }
    }

    #[test]
    fn test_sanitize_css_size() {
        assert_eq!(sanitize_css_size("18px", "16px"), "18px");
        assert_eq!(sanitize_css_size("18px;}", "16px"), "16px");
    }

    #[test]
    fn test_display() {
        let size = CssSize::parse("42rem").unwrap();
        assert_eq!(size.to_string(), "42rem");
        assert_eq!(size.as_str(), "42rem");
    }
}
