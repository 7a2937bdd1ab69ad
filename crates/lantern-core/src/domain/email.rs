use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase form of an email address, used as the unique index into the
/// user store.
///
/// Only letter case is normalized. The input is not trimmed or validated, so
/// anything that is not a stored address simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EmailKey(String);

impl EmailKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EmailKey {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<EmailKey> for String {
    fn from(key: EmailKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::EmailKey;

    #[test]
    fn email_key_lowercases() {
        let key = EmailKey::new("Alice@Example.COM");
        assert_eq!(key.as_str(), "alice@example.com");
    }

    #[test]
    fn email_key_keeps_surrounding_whitespace() {
        let key = EmailKey::new(" Bob@example.com");
        assert_eq!(key.as_str(), " bob@example.com");
    }

    #[test]
    fn email_key_lowercases_non_ascii() {
        let key = EmailKey::new("ÉLODIE@Example.fr");
        assert_eq!(key.as_str(), "élodie@example.fr");
    }

    #[test]
    fn deserialized_email_key_is_lowercased() {
        let key: EmailKey = serde_json::from_str("\"Ada@Example.COM\"").expect("parse");
        assert_eq!(key.as_str(), "ada@example.com");
        assert_eq!(
            serde_json::to_string(&key).expect("serialize"),
            "\"ada@example.com\""
        );
    }

    #[test]
    fn casing_variants_share_a_key() {
        let variants = ["carol@example.com", "CAROL@EXAMPLE.COM", "cArOl@ExAmPlE.cOm"];
        for variant in variants {
            assert_eq!(EmailKey::new(variant), EmailKey::new("carol@example.com"));
        }
    }
}
