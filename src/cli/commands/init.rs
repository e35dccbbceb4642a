use std::fs;

use shelf_lib::Catalog;

use crate::cli::InitArgs;
use crate::config::{self, CONFIG_FILE, CliOverrides};
use crate::error::Result;

/// Execute the init command.
///
/// Creates `.shelf/`, a commented `config.yaml`, and an empty catalog.
/// An existing catalog is never overwritten; `--force` only rewrites the
/// config template.
///
/// # Errors
///
/// Returns an error if the directory or files cannot be created.
pub fn execute(args: &InitArgs, cli: &CliOverrides) -> Result<()> {
    let root = std::env::current_dir()?;
    let shelf_dir = config::shelf_dir(&root);
    if !shelf_dir.exists() {
        fs::create_dir_all(&shelf_dir)?;
    }

    let config_path = shelf_dir.join(CONFIG_FILE);
    if !config_path.exists() || args.force {
        fs::write(&config_path, config::CONFIG_TEMPLATE)?;
    }

    let settings = config::resolve(&root, cli)?;
    if settings.data_file.exists() {
        println!(
            "Catalog already present at {}; left unchanged",
            settings.data_file.display()
        );
    } else {
        Catalog::empty_at(&settings.data_file).save()?;
        println!("Created empty catalog at {}", settings.data_file.display());
    }

    println!("Initialized shelf workspace in {}", shelf_dir.display());
    Ok(())
}
