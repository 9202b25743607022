//! Resolved runtime context shared by every command handler.

use std::path::{Path, PathBuf};

use weblog_core::query::Page;
use weblog_core::Store;

use crate::cli::Cli;
use crate::config;

pub struct AppContext {
    store: Store,
    config_path: PathBuf,
    quiet: bool,
    items_per_page: usize,
}

impl AppContext {
    /// Resolve config and flags into a ready context.
    ///
    /// Data directory precedence: `--data-dir` flag (or `WEBLOG_DATA_DIR`)
    /// over the config file over the built-in default.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = match cli.config.as_deref() {
            Some(path) => PathBuf::from(path),
            None => config::default_config_path()?,
        };
        let config = config::load(cli.config.as_deref())?;
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.store.data_dir.clone());
        Ok(Self {
            store: Store::new(data_dir),
            config_path,
            quiet: cli.quiet,
            items_per_page: config.ui.items_per_page,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Page for a list command, falling back to the configured size.
    pub fn page(&self, limit: Option<usize>, offset: usize) -> Page {
        Page::new(limit.unwrap_or(self.items_per_page), offset)
    }
}
