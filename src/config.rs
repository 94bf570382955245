// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;
use std::{fs::File, io::BufReader};
use tokio::sync::{RwLock, RwLockReadGuard};

use notify::{RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

pub const DEFAULT_NAMESPACE: &str = "tech-labs/v1";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8006,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Read-gate for the page resource. When set every read is refused.
    #[serde(default)]
    pub close_json_pages: bool,
    #[serde(default)]
    pub title_filters: Vec<String>,
    #[serde(default)]
    pub content_filters: Vec<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            close_json_pages: false,
            title_filters: Vec::new(),
            content_filters: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub media_base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: "memory".to_string(),
            url: String::new(),
            path: String::new(),
            media_base_url: String::new(),
        }
    }
}

impl Config {
    pub fn read(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open config file {}: {}", path, e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_yaml::from_reader(reader)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path, e))?;
        Ok(config.postprocess())
    }

    fn postprocess(mut self) -> Self {
        let namespace = self.api.namespace.trim_matches('/');
        self.api.namespace = if namespace.is_empty() {
            default_namespace()
        } else {
            namespace.to_string()
        };
        if self.store.path.starts_with("$HOME") {
            if let Ok(home) = std::env::var("HOME") {
                self.store.path = self.store.path.replace("$HOME", &home);
            }
        }
        self
    }

    pub fn empty() -> Self {
        Self {
            debug: false,
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            store: StoreConfig::default(),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<Config>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_config(Config::empty())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub async fn load_config(&self, path: &str) -> anyhow::Result<()> {
        let config = Config::read(path)?;
        let mut write_lock = self.config.write().await;
        *write_lock = config;
        Ok(())
    }

    pub async fn get_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().await
    }

    /// Current value of the page read-gate.
    pub async fn close_json_pages(&self) -> bool {
        self.config.read().await.api.close_json_pages
    }

    pub async fn set_close_json_pages(&self, closed: bool) {
        self.config.write().await.api.close_json_pages = closed;
    }

    /// Start watching the config file for changes and automatically reload it
    pub async fn watch_config(&self, path: &str) -> anyhow::Result<()> {
        let config_path = Path::new(path).to_path_buf();
        let config = self.config.clone();
        let path_string = path.to_string();

        let (tx, mut rx) = tokio::sync::mpsc::channel(100);
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    let _ = tx.blocking_send(event);
                }
                Err(e) => {
                    error!("Error receiving event: {}", e);
                }
            })?;
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;
        info!("Started watching config_file={}", path_string);

        tokio::spawn(async move {
            // the watcher stops when dropped
            let _watcher = watcher;
            while let Some(event) = rx.recv().await {
                if let notify::EventKind::Access(notify::event::AccessKind::Close(
                    notify::event::AccessMode::Write,
                )) = event.kind
                {
                    info!("Write close event detected, reloading config...");
                    Self::reload_config_static(&config, &path_string).await;
                }
            }
            error!("Config watcher channel closed, config_file={}", path_string);
        });

        Ok(())
    }

    async fn reload_config_static(config: &Arc<RwLock<Config>>, path: &str) {
        let new_config = match Config::read(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to reload config: {}", e);
                return;
            }
        };
        let mut write_lock = config.write().await;
        *write_lock = new_config;
        info!(
            "Config reloaded from {} close_json_pages={}",
            path, write_lock.api.close_json_pages
        );
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
