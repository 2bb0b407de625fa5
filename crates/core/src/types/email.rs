//! Staff email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain a single @ symbol")]
    MalformedAt,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// A staff member's email address.
///
/// Surrounding whitespace is trimmed and the address is lowercased, so the
/// same person logging in as `Elena@Example.com ` and `elena@example.com`
/// resolves to the same identity.
///
/// ```
/// use tavola_core::Email;
///
/// let email = Email::parse(" Nikos.Papadopoulos@Mykonos.gr ").unwrap();
/// assert_eq!(email.as_str(), "nikos.papadopoulos@mykonos.gr");
/// assert_eq!(email.display_name(), "Nikos Papadopoulos");
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("a@b@c").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, does not contain exactly one @, or has an empty local part
    /// or domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MalformedAt)?;
        if domain.contains('@') {
            return Err(EmailError::MalformedAt);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }

    /// Synthesize a display name from the local part.
    ///
    /// The auth backend only hands back a token, so the console derives a
    /// human-readable name: separators (`.`, `_`, `-`, `+`) become spaces and
    /// each word is capitalized.
    #[must_use]
    pub fn display_name(&self) -> String {
        let words: Vec<String> = self
            .local_part()
            .split(['.', '_', '-', '+'])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect();

        if words.is_empty() {
            self.local_part().to_owned()
        } else {
            words.join(" ")
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_lowercases() {
        let email = Email::parse("  Elena.Vasquez@Mykonos.GR\n").unwrap();
        assert_eq!(email.as_str(), "elena.vasquez@mykonos.gr");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("nobody"), Err(EmailError::MalformedAt));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::MalformedAt));
        assert_eq!(Email::parse("@mykonos.gr"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("elena@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn test_display_name_from_separators() {
        let email = Email::parse("marco_rossi-jr@example.com").unwrap();
        assert_eq!(email.display_name(), "Marco Rossi Jr");
    }

    #[test]
    fn test_display_name_single_word() {
        let email = Email::parse("chef@example.com").unwrap();
        assert_eq!(email.display_name(), "Chef");
    }

    #[test]
    fn test_display_name_only_separators() {
        let email = Email::parse("._@example.com").unwrap();
        assert_eq!(email.display_name(), "._");
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: Email = serde_json::from_str("\"Ops@Example.com\"").unwrap();
        assert_eq!(parsed.as_str(), "ops@example.com");
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }
}
