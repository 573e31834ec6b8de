//! The client configuration schema and its parser.
//!
//! # Schema
//!
//! ```text
//! // ~/.vaultrc
//! token_helper = "/usr/local/bin/vault-token-helper"
//! ```
//!
//! `token_helper` is the executable the CLI hands token storage to. When it
//! is empty the CLI uses its built-in token store.

use crate::config::validation::check_keys;
use crate::syntax::{self, Document};
use crate::Result;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// The resolved client configuration.
///
/// Values are built by the parser and never modified afterwards; there are
/// no setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(deserialize_with = "string_like")]
    token_helper: String,
}

impl ClientConfig {
    /// Top-level keys accepted in a configuration file.
    ///
    /// Must list exactly the serialized field names of this struct;
    /// `test_fields_match_schema` enforces that.
    pub const FIELDS: &'static [&'static str] = &["token_helper"];

    /// A configuration with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that delegates token storage to `helper`.
    pub fn with_token_helper(helper: impl Into<String>) -> Self {
        Self {
            token_helper: helper.into(),
        }
    }

    /// The configured token helper, or `None` to use the built-in store.
    pub fn token_helper(&self) -> Option<&str> {
        if self.token_helper.is_empty() {
            None
        } else {
            Some(&self.token_helper)
        }
    }

    /// Decode a parsed document into a configuration.
    ///
    /// Unknown keys are ignored here; run [`check_keys`] first to reject them.
    pub fn from_document(document: Document) -> Result<Self> {
        Ok(serde_json::from_value(document.into_value())?)
    }
}

/// Parse configuration text into a [`ClientConfig`].
///
/// Accepts an HCL body or a JSON object. Empty input yields
/// the default configuration. Unknown top-level keys fail with
/// [`crate::Error::InvalidKeys`] listing all of them.
pub fn parse_client_config(contents: &str) -> Result<ClientConfig> {
    let document = syntax::parse(contents)?;
    check_keys(document.root(), ClientConfig::FIELDS)?;
    ClientConfig::from_document(document)
}

/// Accept a string, a number (kept as its text) or null (empty).
fn string_like<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringLike;

    impl Visitor<'_> for StringLike {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringLike)
}
