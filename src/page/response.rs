// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub embeddable: bool,
}

/// A single item response together with its hypermedia links.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub data: Value,
    pub links: BTreeMap<String, Vec<Link>>,
}

impl ResourceResponse {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            links: BTreeMap::new(),
        }
    }

    pub fn with_link(mut self, rel: &str, href: &str, embeddable: bool) -> Self {
        self.links.entry(rel.to_string()).or_default().push(Link {
            href: href.to_string(),
            embeddable,
        });
        self
    }

    /// Flattens the item into a plain map fit for a collection body, links
    /// under `_links`. Non object payloads are returned untouched.
    pub fn for_collection(&self) -> Value {
        let mut data = self.data.clone();
        if let Value::Object(map) = &mut data {
            if !self.links.is_empty() {
                // Link only holds strings and bools
                let links = serde_json::to_value(&self.links).unwrap_or(Value::Null);
                map.insert("_links".to_string(), links);
            }
        }
        data
    }
}
