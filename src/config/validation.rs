//! Strict top-level key checking.
//!
//! Typed decoding ignores fields it does not know, so a typo such as
//! `token_hlper` would otherwise be dropped without a word. [`check_keys`]
//! reports every such key together with the line it appears on.

use crate::syntax::SyntaxNode;
use crate::{Error, Result};
use std::collections::HashSet;

/// A key that is not part of the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey {
    pub key: String,
    /// 1-based line of the item's key.
    pub line: usize,
}

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid key '{}' on line {}", self.key, self.line)
    }
}

/// Check every item in `node` against `permitted`.
///
/// Each offending item is reported, so a key repeated twice is listed
/// twice. All offending items are collected, in source order, into a single
/// [`Error::InvalidKeys`]. Returns `Ok(())` when every key is permitted,
/// including when there are no items at all.
pub fn check_keys(node: &SyntaxNode, permitted: &[&str]) -> Result<()> {
    let permitted: HashSet<&str> = permitted.iter().copied().collect();

    let invalid: Vec<InvalidKey> = node
        .items()
        .iter()
        .filter(|item| !permitted.contains(item.key.as_str()))
        .map(|item| InvalidKey {
            key: item.key.clone(),
            line: item.line,
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidKeys(invalid))
    }
}

pub(crate) fn format_invalid_keys(keys: &[InvalidKey]) -> String {
    let lines: Vec<String> = keys.iter().map(ToString::to_string).collect();
    format!(
        "invalid keys in client configuration:\n  {}",
        lines.join("\n  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ObjectItem, ObjectList, parse};

    const PERMITTED: &[&str] = &["token_helper"];

    fn invalid_keys(src: &str, permitted: &[&str]) -> Vec<InvalidKey> {
        let doc = parse(src).unwrap();
        match check_keys(doc.root(), permitted) {
            Err(Error::InvalidKeys(keys)) => keys,
            other => panic!("expected invalid keys, got {:?}", other),
        }
    }

    #[test]
    fn test_all_keys_permitted() {
        let doc = parse(r#"token_helper = "/bin/helper""#).unwrap();
        assert!(check_keys(doc.root(), PERMITTED).is_ok());
    }

    #[test]
    fn test_empty_list_is_valid() {
        let doc = parse("").unwrap();
        assert!(check_keys(doc.root(), PERMITTED).is_ok());

        let doc = parse("{}").unwrap();
        assert!(check_keys(doc.root(), PERMITTED).is_ok());
    }

    #[test]
    fn test_reports_every_invalid_key_in_order() {
        let src = "foo = 1\ntoken_helper = \"x\"\n\nbar = \"y\"\nbaz { }\n";
        let keys = invalid_keys(src, PERMITTED);
        assert_eq!(
            keys,
            vec![
                InvalidKey {
                    key: "foo".to_string(),
                    line: 1,
                },
                InvalidKey {
                    key: "bar".to_string(),
                    line: 4,
                },
                InvalidKey {
                    key: "baz".to_string(),
                    line: 5,
                },
            ]
        );
    }

    #[test]
    fn test_object_node_uses_key_line() {
        let src = "{\"token_helper\": \"x\",\n \"bogus_key\": 1}";
        let keys = invalid_keys(src, PERMITTED);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key, "bogus_key");
        assert_eq!(keys[0].line, 2);
    }

    #[test]
    fn test_line_counts_comment_lines() {
        let src = "# comment\n/* two\n lines */\n\nbogus = 1";
        let keys = invalid_keys(src, PERMITTED);
        assert_eq!(keys[0].line, 5);
    }

    #[test]
    fn test_items_are_checked_directly() {
        let node = SyntaxNode::ObjectList(ObjectList {
            items: vec![
                ObjectItem {
                    key: "bogus".to_string(),
                    line: 1,
                },
                ObjectItem {
                    key: "bogus".to_string(),
                    line: 2,
                },
            ],
        });
        match check_keys(&node, PERMITTED) {
            Err(Error::InvalidKeys(keys)) => {
                let lines: Vec<usize> = keys.iter().map(|k| k.line).collect();
                assert_eq!(lines, vec![1, 2]);
            }
            other => panic!("expected invalid keys, got {:?}", other),
        }
    }

    #[test]
    fn test_only_top_level_keys_are_checked() {
        let src = "token_helper = \"x\"\nnested { anything = 1 }";
        let keys = invalid_keys(src, &[]);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].key, "nested");

        let doc = parse(src).unwrap();
        assert!(check_keys(doc.root(), &["token_helper", "nested"]).is_ok());
    }

    #[test]
    fn test_error_text_is_deterministic() {
        let src = "a = 1\nb = 2";
        let doc = parse(src).unwrap();
        let first = check_keys(doc.root(), PERMITTED).unwrap_err().to_string();
        let second = check_keys(doc.root(), PERMITTED).unwrap_err().to_string();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "invalid keys in client configuration:\n  invalid key 'a' on line 1\n  invalid key 'b' on line 2"
        );
    }
}
