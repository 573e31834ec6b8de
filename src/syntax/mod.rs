//! Reading the configuration language.
//!
//! A configuration file is either an HCL body or a single JSON object:
//!
//! ```text
//! # ~/.vaultrc
//! token_helper = "/usr/local/bin/vault-token-helper"
//! ```
//!
//! is equivalent to
//!
//! ```text
//! {"token_helper": "/usr/local/bin/vault-token-helper"}
//! ```
//!
//! [`parse`] returns a [`Document`]: the top-level items with their source
//! lines, for key checking, plus the decoded data. HCL is parsed with
//! `hcl-edit`, which keeps spans, and decoded with `hcl-rs`. JSON is decoded
//! with `serde_json`; its key positions come from `hcl-edit` reading the
//! same text as an object expression.

use crate::{Error, Result};
use hcl_edit::expr::{Expression, ObjectKey};
use hcl_edit::repr::Span;
use hcl_edit::structure::Structure;
use serde::de::Error as _;
use std::ops::Range;

/// The root of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Bare items, as in an HCL body.
    ObjectList(ObjectList),
    /// Items inside a top-level `{ ... }`, as in a JSON document.
    Object(ObjectList),
}

impl SyntaxNode {
    pub fn items(&self) -> &[ObjectItem] {
        match self {
            SyntaxNode::ObjectList(list) | SyntaxNode::Object(list) => &list.items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectList {
    pub items: Vec<ObjectItem>,
}

/// A top-level item: its key and the 1-based line the key starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectItem {
    pub key: String,
    pub line: usize,
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: SyntaxNode,
    value: serde_json::Value,
}

impl Document {
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// The decoded data, shaped like JSON.
    pub fn into_value(self) -> serde_json::Value {
        self.value
    }
}

/// Parse configuration text.
///
/// Text whose first non-blank character is `{` is read as JSON; anything
/// else as an HCL body. Syntax errors carry the line and column reported by
/// the underlying parser.
pub fn parse(contents: &str) -> Result<Document> {
    let src = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    if src.trim_start().starts_with('{') {
        parse_json(src)
    } else {
        parse_body(src)
    }
}

fn parse_body(src: &str) -> Result<Document> {
    let body = hcl_edit::parser::parse_body(src).map_err(syntax_error)?;

    let items = body
        .iter()
        .map(|structure| match structure {
            Structure::Attribute(attr) => ObjectItem {
                key: attr.key.as_str().to_string(),
                line: line_of(src, attr.key.span().or_else(|| attr.span())),
            },
            Structure::Block(block) => ObjectItem {
                key: block.ident.as_str().to_string(),
                line: line_of(src, block.ident.span().or_else(|| block.span())),
            },
        })
        .collect();

    // hcl-edit accepted the text, so a failure here is about the values.
    let value = hcl::from_str(src).map_err(|err| Error::Decode(serde_json::Error::custom(err)))?;

    Ok(Document {
        root: SyntaxNode::ObjectList(ObjectList { items }),
        value,
    })
}

fn parse_json(src: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(src).map_err(json_syntax_error)?;

    let expr = hcl_edit::parser::parse_expr(src).map_err(syntax_error)?;
    let Expression::Object(object) = &expr else {
        return Err(Error::Parse {
            line: 1,
            column: 1,
            message: "expected an object at the top level".to_string(),
        });
    };

    let items = object
        .iter()
        .map(|(key, _)| match key {
            ObjectKey::Ident(ident) => ObjectItem {
                key: ident.as_str().to_string(),
                line: line_of(src, ident.span()),
            },
            ObjectKey::Expression(Expression::String(name)) => ObjectItem {
                key: name.as_str().to_string(),
                line: line_of(src, name.span()),
            },
            ObjectKey::Expression(other) => ObjectItem {
                key: other.to_string().trim().to_string(),
                line: line_of(src, other.span()),
            },
        })
        .collect();

    Ok(Document {
        root: SyntaxNode::Object(ObjectList { items }),
        value,
    })
}

/// 1-based line of the start of `span`.
fn line_of(src: &str, span: Option<Range<usize>>) -> usize {
    let start = span.map_or(0, |span| span.start.min(src.len()));
    src.as_bytes()[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

fn syntax_error(err: hcl_edit::parser::Error) -> Error {
    let location = err.location();
    Error::Parse {
        line: location.line(),
        column: location.column(),
        message: err.message().to_string(),
    }
}

fn json_syntax_error(err: serde_json::Error) -> Error {
    // serde_json appends " at line L column C"; the position is kept separately.
    let text = err.to_string();
    let message = match text.rsplit_once(" at line ") {
        Some((message, _)) => message.to_string(),
        None => text,
    };
    Error::Parse {
        line: err.line(),
        column: err.column(),
        message,
    }
}
