//! # Configuration
//!
//! Configuration is loaded with [`confique`] from layered sources.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Environment variables**: `ADMINBOARD_SEED`, `ADMINBOARD_THREADS_PAGE_SIZE`, etc.
//! 2. **Explicit file**: `--config <path>`. Must exist when given.
//! 3. **User file**: `adminboard.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `seed` | `42` | Seed for the mock data generator |
//! | `thread_count` | `37` | Number of seeded threads |
//! | `user_count` | `25` | Number of seeded users |
//! | `threads_page_size` | `9` | Threads per page |
//! | `users_page_size` | `10` | Users per page |
//! | `site_name` | `"Mos Social"` | Initial site name on the Settings view |
//! | `loading_delay_ms` | `0` | Simulated loading time on first visit to a view |

use crate::error::{AdminError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILENAME: &str = "adminboard.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Seed for the mock data generator.
    #[config(default = 42, env = "ADMINBOARD_SEED")]
    pub seed: u64,

    #[config(default = 37, env = "ADMINBOARD_THREAD_COUNT")]
    pub thread_count: u32,

    #[config(default = 25, env = "ADMINBOARD_USER_COUNT")]
    pub user_count: u32,

    /// Threads per page. Values below 1 are raised to 1.
    #[config(default = 9, env = "ADMINBOARD_THREADS_PAGE_SIZE")]
    pub threads_page_size: usize,

    /// Users per page. Values below 1 are raised to 1.
    #[config(default = 10, env = "ADMINBOARD_USERS_PAGE_SIZE")]
    pub users_page_size: usize,

    #[config(default = "Mos Social", env = "ADMINBOARD_SITE_NAME")]
    pub site_name: String,

    #[config(default = 0, env = "ADMINBOARD_LOADING_DELAY_MS")]
    pub loading_delay_ms: u64,
}

impl Default for AdminConfig {
    /// The compiled `#[config(default = ...)]` values, with no file or env layer.
    fn default() -> Self {
        // Every field has a compiled default, so a sourceless load cannot fail.
        AdminConfig::builder()
            .load()
            .expect("every config field has a default")
    }
}

impl AdminConfig {
    /// Loads the layered configuration. `explicit` is the `--config` path.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(explicit, user_config_path())
    }

    fn load_from(explicit: Option<&Path>, user_file: Option<PathBuf>) -> Result<Self> {
        let mut builder = AdminConfig::builder().env();

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(AdminError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        if let Some(path) = user_file {
            builder = builder.file(path);
        }

        let config = builder.load()?.normalized();
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn normalized(mut self) -> Self {
        self.threads_page_size = self.threads_page_size.max(1);
        self.users_page_size = self.users_page_size.max(1);
        self
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "adminboard", "adminboard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
