//! Backend session cookie value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Value of the backend session cookie, masked in logs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionCookie {
    value: String,
}

impl SessionCookie {
    /// Creates a cookie value, rejecting blanks and header-breaking characters.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return None;
        }

        if raw
            .chars()
            .any(|c| !c.is_ascii_graphic() || c == ';' || c == ',')
        {
            return None;
        }

        Some(Self {
            value: raw.to_string(),
        })
    }

    /// Like [`Self::new`], but a pasted `cookie_name=value` pair keeps only
    /// the value. Any other `=` belongs to the value.
    #[must_use]
    pub fn from_pasted(value: impl AsRef<str>, cookie_name: &str) -> Option<Self> {
        let raw = value.as_ref().trim();
        let raw = raw
            .strip_prefix(cookie_name)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|_| !cookie_name.is_empty())
            .unwrap_or(raw);
        Self::new(raw)
    }

    /// Creates cookie without validation.
    #[cfg(test)]
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked value for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "eyJ1c2VyX2lkIjo0Mn0.ZmFrZS1zaWduYXR1cmU";

    #[test]
    fn test_rejects_blank_and_separators() {
        assert!(SessionCookie::new("   ").is_none());
        assert!(SessionCookie::new("abc; Path=/").is_none());
        assert!(SessionCookie::new("a b").is_none());
    }

    #[test]
    fn test_strips_configured_cookie_name() {
        let cookie = SessionCookie::from_pasted(format!("session={RAW}"), "session").unwrap();
        assert_eq!(cookie.as_str(), RAW);

        let cookie = SessionCookie::from_pasted("session=abc", "session").unwrap();
        assert_eq!(cookie.as_str(), "abc");
    }

    #[test]
    fn test_other_equals_signs_are_part_of_the_value() {
        let cookie = SessionCookie::from_pasted("abc=def.ghi", "session").unwrap();
        assert_eq!(cookie.as_str(), "abc=def.ghi");

        let cookie = SessionCookie::from_pasted("eyJ1IjoxfQ=.c2ln", "session").unwrap();
        assert_eq!(cookie.as_str(), "eyJ1IjoxfQ=.c2ln");

        let cookie = SessionCookie::new("session=abc").unwrap();
        assert_eq!(cookie.as_str(), "session=abc");
    }

    #[test]
    fn test_pasted_name_without_value_is_rejected() {
        assert!(SessionCookie::from_pasted("session=", "session").is_none());
    }

    #[test]
    fn test_keeps_base64_padding() {
        let cookie = SessionCookie::new("c2Vzc2lvbg==").unwrap();
        assert_eq!(cookie.as_str(), "c2Vzc2lvbg==");
    }

    #[test]
    fn test_debug_does_not_leak_value() {
        let cookie = SessionCookie::new(RAW).unwrap();
        let debug_output = format!("{cookie:?}");

        assert!(!debug_output.contains(RAW));
        assert!(cookie.masked().contains("..."));
    }

    #[test]
    fn test_short_value_fully_masked() {
        let cookie = SessionCookie::new_unchecked("abc");
        assert_eq!(cookie.masked(), "***");
    }
}
