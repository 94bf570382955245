// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use tracing::info;

use crate::config::StoreConfig;
use crate::store::{DbStore, FileStore, MemoryStore, PageStore};

/// Opens the store described by the `store` section of the config file.
pub async fn store_from_config(config: &StoreConfig) -> anyhow::Result<Arc<dyn PageStore>> {
    let store: Arc<dyn PageStore> = match config.store_type.as_str() {
        "sqlite" => Arc::new(DbStore::new("sqlite", &config.url, &config.media_base_url).await?),
        "file" => Arc::new(FileStore::new("file", &config.path, &config.media_base_url)?),
        "memory" => Arc::new(MemoryStore::new("memory", &config.media_base_url)),
        other => return Err(anyhow::anyhow!("Invalid store type: {}", other)),
    };
    info!("Opened page store type={}", store.name());
    Ok(store)
}
