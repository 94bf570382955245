// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::page::types::{media_url, Page};
use crate::store::traits::PageStore;

pub struct MemoryStore {
    name: String,
    media_base_url: String,
    pages: RwLock<HashMap<u64, Page>>,
}

impl MemoryStore {
    pub fn new(name: &str, media_base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            media_base_url: media_base_url.to_string(),
            pages: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, page: Page) {
        self.pages.write().await.insert(page.id, page);
    }

    pub async fn remove(&self, id: u64) -> Option<Page> {
        self.pages.write().await.remove(&id)
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_page(&self, id: u64) -> anyhow::Result<Option<Page>> {
        Ok(self.pages.read().await.get(&id).cloned())
    }

    async fn thumbnail_url(&self, id: u64) -> anyhow::Result<Option<String>> {
        let pages = self.pages.read().await;
        Ok(pages
            .get(&id)
            .and_then(|page| page.thumbnail.as_deref())
            .map(|path| media_url(&self.media_base_url, path)))
    }
}
