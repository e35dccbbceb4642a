//! Configuration management for `shelf`.
//!
//! Settings are layered, lowest precedence first:
//! - Built-in defaults
//! - Workspace config (`.shelf/config.yaml`, or `--config <PATH>`)
//! - Environment (`SHELF_DATA`, applied by clap on the `--data` flag)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shelf_lib::{Catalog, ShelfError, SortKey};

use crate::error::Result;

/// Workspace directory holding the catalog and its config.
pub const SHELF_DIR: &str = ".shelf";
/// Config file name inside the workspace directory.
pub const CONFIG_FILE: &str = "config.yaml";
/// Catalog file name inside the workspace directory.
pub const DEFAULT_DATA_FILE: &str = "catalog.json";
/// Environment variable naming the catalog file.
pub const DATA_ENV: &str = "SHELF_DATA";

/// What to do when the catalog file exists but cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Refuse to run (exit 1).
    #[default]
    Fail,
    /// Move the bad file aside and continue with an empty catalog.
    StartEmpty,
}

/// Contents of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Catalog path; relative paths resolve against `.shelf/`.
    pub data_file: Option<PathBuf>,
    pub on_corrupt: Option<CorruptPolicy>,
    pub list_sort: Option<SortKey>,
}

/// Values supplied on the command line (or through clap's env fallback).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub on_corrupt: Option<CorruptPolicy>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    pub data_file: PathBuf,
    pub on_corrupt: CorruptPolicy,
    pub list_sort: SortKey,
}

/// Template written by `shelf init`.
pub const CONFIG_TEMPLATE: &str = r"# shelf configuration
# data_file: catalog.json     # relative to this directory
# on_corrupt: fail            # fail | start_empty
# list_sort: key              # key | title | author
";

/// Path of the workspace directory under `root`.
#[must_use]
pub fn shelf_dir(root: &Path) -> PathBuf {
    root.join(SHELF_DIR)
}

/// Parse a YAML config file.
///
/// # Errors
///
/// Returns `Config` if the file cannot be read or parsed.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| ShelfError::Config(format!("cannot read {}: {e}", path.display())))?;
    if text.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml_ng::from_str(&text)
        .map_err(|e| ShelfError::Config(format!("{}: {e}", path.display())))
}

/// Resolve settings for a workspace rooted at `root`.
///
/// # Errors
///
/// Returns `Config` if an explicitly named config file is missing, or any
/// config file is malformed.
pub fn resolve(root: &Path, cli: &CliOverrides) -> Result<ShelfConfig> {
    let dir = shelf_dir(root);

    let file = match &cli.config {
        Some(path) => {
            let path = root.join(path);
            if !path.is_file() {
                return Err(ShelfError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            load_file_config(&path)?
        }
        None => {
            let path = dir.join(CONFIG_FILE);
            if path.is_file() {
                load_file_config(&path)?
            } else {
                FileConfig::default()
            }
        }
    };

    let data_file = cli.data.as_ref().map_or_else(
        || {
            file.data_file
                .as_ref()
                .map_or_else(|| dir.join(DEFAULT_DATA_FILE), |p| dir.join(p))
        },
        |p| root.join(p),
    );

    let config = ShelfConfig {
        data_file,
        on_corrupt: cli.on_corrupt.or(file.on_corrupt).unwrap_or_default(),
        list_sort: file.list_sort.unwrap_or_default(),
    };
    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Resolve settings relative to the current directory.
///
/// # Errors
///
/// Returns an error if the current directory is unavailable or the config is invalid.
pub fn load_config(cli: &CliOverrides) -> Result<ShelfConfig> {
    let root = std::env::current_dir()?;
    resolve(&root, cli)
}

/// The loaded catalog plus the settings it was opened with.
///
/// Every command receives this explicitly; there is no global catalog.
#[derive(Debug)]
pub struct CatalogContext {
    pub catalog: Catalog,
    pub config: ShelfConfig,
}

impl CatalogContext {
    /// Persist the catalog if any command changed it.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns `Storage` or `Io` if the catalog file cannot be written.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.catalog.is_dirty() {
            return Ok(false);
        }
        let changed = self.catalog.dirty_count();
        self.catalog.save_to(&self.config.data_file)?;
        self.catalog.clear_dirty();
        tracing::debug!(changed, "Wrote {}", self.config.data_file.display());
        Ok(true)
    }
}

/// Load the catalog named by `config`, applying the corrupt-data policy.
///
/// A missing file is an empty catalog.
///
/// # Errors
///
/// Returns `CorruptData` under `CorruptPolicy::Fail`, or `Io` when the file
/// cannot be read, moved aside or rewritten.
pub fn open_catalog(config: ShelfConfig) -> Result<CatalogContext> {
    let path = config.data_file.clone();
    let catalog = match Catalog::open_or_empty(&path) {
        Ok(catalog) => catalog,
        Err(ShelfError::CorruptData { reason }) if config.on_corrupt == CorruptPolicy::StartEmpty => {
            let backup = quarantine(&path)?;
            tracing::warn!(
                "Catalog is corrupt ({reason}); moved aside to {} and starting empty",
                backup.display()
            );
            let catalog = Catalog::empty_at(&path);
            catalog.save()?;
            catalog
        }
        Err(err) => return Err(err),
    };
    Ok(CatalogContext { catalog, config })
}

/// Resolve config from CLI overrides and open the catalog.
///
/// # Errors
///
/// Returns an error if configuration or loading fails.
pub fn open_catalog_with_cli(cli: &CliOverrides) -> Result<CatalogContext> {
    open_catalog(load_config(cli)?)
}

/// Move an unreadable catalog to `<name>.corrupt-<timestamp>`.
fn quarantine(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .map_or_else(|| DEFAULT_DATA_FILE.into(), |n| n.to_string_lossy());
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let backup = path.with_file_name(format!("{name}.corrupt-{stamp}"));
    fs::rename(path, &backup)?;
    Ok(backup)
}
