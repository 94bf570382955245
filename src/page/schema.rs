// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};

use crate::page::types::PageView;

/// JSON Schema (draft-04) of the page resource.
///
/// `future_image` is declared as `array` although the served value is a URL
/// string or null. Clients already validate against this document, so the
/// declared type stays as published.
pub fn describe_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "title": "page",
        "type": "object",
        "properties": {
            "id": {
                "description": "Unique identifier for the object.",
                "type": "integer",
                "context": ["view", "edit", "embed"],
                "readonly": true,
            },
            "title": {
                "description": "The content title.",
                "type": "string",
            },
            "future_image": {
                "description": "The content future image.",
                "type": "array",
            },
            "content": {
                "description": "The content for the object.",
                "type": "string",
            },
        },
    })
}

/// Names of the fields a response is allowed to carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet(BTreeSet<String>);

impl FieldSet {
    pub fn from_schema(schema: &Value) -> Self {
        let fields = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| properties.keys().cloned().collect())
            .unwrap_or_default();
        FieldSet(fields)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSet(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Keeps only the view fields present in `fields`.
pub fn project(view: &PageView, fields: &FieldSet) -> Map<String, Value> {
    let candidates = [
        ("id", json!(view.id)),
        ("title", json!(view.title)),
        ("content", json!(view.content)),
        ("future_image", json!(view.future_image)),
    ];
    candidates
        .into_iter()
        .filter(|(name, _)| fields.contains(name))
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> PageView {
        PageView {
            id: 5,
            title: "Hello".to_string(),
            content: "Body".to_string(),
            future_image: None,
        }
    }

    #[test]
    fn test_schema_document() {
        let schema = describe_schema();
        assert_eq!(schema["$schema"], "http://json-schema.org/draft-04/schema#");
        assert_eq!(schema["title"], "page");
        assert_eq!(schema["properties"]["id"]["type"], "integer");
        assert_eq!(schema["properties"]["id"]["readonly"], true);
        assert_eq!(schema["properties"]["title"]["type"], "string");
        assert_eq!(schema["properties"]["content"]["type"], "string");
        assert_eq!(schema["properties"]["future_image"]["type"], "array");
    }

    #[test]
    fn test_field_set_from_schema() {
        let fields = FieldSet::from_schema(&describe_schema());
        assert_eq!(fields.len(), 4);
        for name in ["id", "title", "content", "future_image"] {
            assert!(fields.contains(name), "missing {}", name);
        }
        assert!(FieldSet::from_schema(&json!({"type": "object"})).is_empty());
    }

    #[test]
    fn test_project_all_fields() {
        let fields = FieldSet::from_schema(&describe_schema());
        let data = project(&view(), &fields);
        assert_eq!(
            Value::Object(data),
            json!({"id": 5, "title": "Hello", "content": "Body", "future_image": null})
        );
    }

    #[test]
    fn test_project_subset() {
        let fields = FieldSet::from_names(["id", "title", "unknown"]);
        let data = project(&view(), &fields);
        assert_eq!(Value::Object(data), json!({"id": 5, "title": "Hello"}));
    }
}
