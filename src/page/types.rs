// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use serde::{Deserialize, Serialize};

pub const PAGE_KIND: &str = "page";

fn default_kind() -> String {
    PAGE_KIND.to_string()
}

/// A content record as persisted by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: u64,
    /// Record type; only `page` records are served by the resource.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Store relative path of the thumbnail media, if any.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Page {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            kind: default_kind(),
            title: String::new(),
            content: String::new(),
            thumbnail: None,
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: &str) -> Self {
        self.thumbnail = Some(thumbnail.to_string());
        self
    }

    pub fn is_page(&self) -> bool {
        self.kind == PAGE_KIND
    }
}

/// The sanitized representation handed out by the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub future_image: Option<String>,
}

/// Joins a media base URL and a store relative path.
pub fn media_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
