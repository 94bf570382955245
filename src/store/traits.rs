// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use async_trait::async_trait;

use crate::page::types::Page;

/// Read access to the content store that owns page records.
#[async_trait]
pub trait PageStore: Send + Sync {
    fn name(&self) -> &str;

    /// Record with the given id, whatever its kind.
    async fn get_page(&self, id: u64) -> anyhow::Result<Option<Page>>;

    /// Full size URL of the thumbnail attached to record `id`.
    async fn thumbnail_url(&self, _id: u64) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}
