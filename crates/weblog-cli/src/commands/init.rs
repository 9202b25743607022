//! `init` handler: write a config file and create the data directory.

use weblog_core::Store;

use crate::config::{self, StoreSection, WeblogConfig};
use crate::context::AppContext;

pub fn handle_init(ctx: &AppContext, dir: Option<&str>) -> anyhow::Result<()> {
    let data_dir = match dir {
        Some(dir) => dir.to_string(),
        None => ctx.store().data_dir().display().to_string(),
    };

    let config = WeblogConfig {
        store: StoreSection {
            data_dir: data_dir.clone(),
        },
        ..WeblogConfig::default()
    };
    config::write_config(ctx.config_path(), &config)?;

    let store = Store::new(&data_dir);
    std::fs::create_dir_all(store.data_dir()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create data directory {}: {}",
            store.data_dir().display(),
            e
        )
    })?;

    if !ctx.quiet() {
        println!("Initialized weblog data directory at {}", data_dir);
        println!("Config written to {}", ctx.config_path().display());
    }
    Ok(())
}
