//! Blank-string normalisation shared by the guards and the payload formatters.

/// Returns `true` when `value` is empty or contains only whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `value` unchanged unless it is blank, in which case `default` is
/// returned instead.
///
/// The value is not trimmed: `" x "` is returned as-is.
#[must_use]
pub fn sanitize_value<'a>(value: &'a str, default: &'a str) -> &'a str {
    if is_blank(value) {
        default
    } else {
        value
    }
}

/// Like [`sanitize_value`] with an absent default.
#[must_use]
pub fn non_blank(value: &str) -> Option<&str> {
    (!is_blank(value)).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_falls_back_to_default() {
        assert_eq!(sanitize_value("   ", "default"), "default");
        assert_eq!(sanitize_value("", "default"), "default");
        assert_eq!(sanitize_value("\t\n", "default"), "default");
    }

    #[test]
    fn non_blank_value_is_kept_verbatim() {
        assert_eq!(sanitize_value("x", "default"), "x");
        assert_eq!(sanitize_value(" x ", "default"), " x ");
    }

    #[test]
    fn non_blank_maps_blank_to_none() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank("apt 4"), Some("apt 4"));
    }
}
