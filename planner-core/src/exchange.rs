//! JSON import/export of whole board documents.
//!
//! Import only checks shape: the payload must be a JSON object with `lists`
//! and a non-empty `title`, and must deserialize into a `Board`. Missing
//! `tags`/`templates` default to empty. Ids are never regenerated here.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::types::Board;

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Document is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Document has an invalid shape: {0}")]
    Shape(serde_json::Error),
}

/// Parse and shape-check an exported document.
pub fn parse_document(raw: &str) -> Result<Board, ExchangeError> {
    let value: Value = serde_json::from_str(raw)?;
    board_from_value(value)
}

pub fn board_from_value(value: Value) -> Result<Board, ExchangeError> {
    let Some(object) = value.as_object() else {
        return Err(ExchangeError::NotAnObject);
    };
    if object.get("lists").map_or(true, Value::is_null) {
        return Err(ExchangeError::MissingField("lists"));
    }
    if !object.get("title").is_some_and(is_truthy) {
        return Err(ExchangeError::MissingField("title"));
    }
    serde_json::from_value(value).map_err(ExchangeError::Shape)
}

/// Pretty-printed (two-space) JSON of the whole document.
pub fn export_document(board: &Board) -> Result<String, ExchangeError> {
    Ok(serde_json::to_string_pretty(board)?)
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s").expect("valid whitespace regex"))
}

/// Download name for an export: every whitespace char becomes `_`.
pub fn export_file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", whitespace_regex().replace_all(title, "_"), extension)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_defaults_collections() {
        let board = parse_document(r#"{"title": "T", "lists": []}"#).unwrap();
        assert_eq!(board.title, "T");
        assert!(board.tags.is_empty());
        assert!(board.templates.is_empty());
        assert_eq!(board.schema_version, 0);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(parse_document("nope"), Err(ExchangeError::Json(_))));
        assert!(matches!(parse_document("[]"), Err(ExchangeError::NotAnObject)));
        assert!(matches!(
            parse_document(r#"{"title": "T"}"#),
            Err(ExchangeError::MissingField("lists"))
        ));
        assert!(matches!(
            parse_document(r#"{"title": "T", "lists": null}"#),
            Err(ExchangeError::MissingField("lists"))
        ));
        assert!(matches!(
            parse_document(r#"{"title": "", "lists": []}"#),
            Err(ExchangeError::MissingField("title"))
        ));
        assert!(matches!(
            parse_document(r#"{"title": "T", "lists": {"a": 1}}"#),
            Err(ExchangeError::Shape(_))
        ));
        assert!(matches!(
            parse_document(r#"{"title": "T", "lists": [{"name": "no id"}]}"#),
            Err(ExchangeError::Shape(_))
        ));
    }

    #[test]
    fn test_export_is_pretty_and_camel_case() {
        let board = parse_document(
            r#"{"title": "T", "lists": [{"id": "l1", "name": "L", "cards": [
                {"id": "c1", "text": "x", "tagIds": ["t1"]}
            ]}]}"#,
        )
        .unwrap();
        let out = export_document(&board).unwrap();
        assert!(out.contains("\n  \"title\": \"T\""));
        assert!(out.contains("\"tagIds\""));
        assert!(out.contains("\"schemaVersion\""));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("My Project", "plnpro"), "My_Project.plnpro");
        assert_eq!(export_file_name("a  b\tc", "plnpro"), "a__b_c.plnpro");
        assert_eq!(export_file_name("Plain", "json"), "Plain.json");
    }
}
