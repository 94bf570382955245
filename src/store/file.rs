// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::page::types::{media_url, Page};
use crate::store::traits::PageStore;

/// Page records kept as `<id>.yaml` files in one directory.
pub struct FileStore {
    name: String,
    path: PathBuf,
    media_base_url: String,
}

impl FileStore {
    pub fn new(name: &str, path: &str, media_base_url: &str) -> anyhow::Result<Self> {
        let path = Path::new(path).to_path_buf();
        if !path.is_dir() {
            return Err(anyhow::anyhow!(
                "Page directory not found, path={}",
                path.display()
            ));
        }
        info!("Using file store name={} path={}", name, path.display());
        Ok(Self {
            name: name.to_string(),
            path,
            media_base_url: media_base_url.to_string(),
        })
    }

    fn load(&self, id: u64) -> anyhow::Result<Option<Page>> {
        let path = self.path.join(format!("{}.yaml", id));
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No page record at path={}", path.display());
                return Ok(None);
            }
            Err(e) => {
                error!("Error opening page record path={}: {}", path.display(), e);
                return Err(e.into());
            }
        };
        let mut page: Page = serde_yaml::from_reader(file).map_err(|e| {
            anyhow::anyhow!("Invalid page record path={}: {}", path.display(), e)
        })?;
        // the file name is the identity of the record
        page.id = id;
        Ok(Some(page))
    }

    pub fn save(&self, page: &Page) -> anyhow::Result<()> {
        let path = self.path.join(format!("{}.yaml", page.id));
        let file = File::create(path)?;
        serde_yaml::to_writer(file, page)?;
        Ok(())
    }
}

#[async_trait]
impl PageStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_page(&self, id: u64) -> anyhow::Result<Option<Page>> {
        self.load(id)
    }

    async fn thumbnail_url(&self, id: u64) -> anyhow::Result<Option<String>> {
        Ok(self
            .load(id)?
            .and_then(|page| page.thumbnail)
            .map(|path| media_url(&self.media_base_url, &path)))
    }
}
