// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use techlabs_pages::{
    server, store_from_config, utils::setup_logging, ConfigManager, PageFilters, PageResource,
};

#[derive(Parser, Debug)]
#[command(version, about = "Read-only JSON view of content pages")]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Listen address, overrides server.host and server.port
    #[arg(short, long)]
    listen: Option<String>,

    #[arg(short, long)]
    debug: bool,

    /// Reload the config file when it changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_manager = Arc::new(ConfigManager::new());
    config_manager.load_config(&args.config).await?;
    let config = config_manager.get_config().await.clone();

    setup_logging(args.debug || config.debug);
    info!("Loaded config_file={}", args.config);

    if args.watch {
        config_manager.watch_config(&args.config).await?;
    }

    let store = store_from_config(&config.store).await?;
    let filters = PageFilters::from_config(&config.api)?;
    let resource = PageResource::new(store).with_filters(filters);

    let listen = args.listen.unwrap_or_else(|| config.listen_addr());
    server::start(&listen, &config.api.namespace, config_manager, resource).await
}
