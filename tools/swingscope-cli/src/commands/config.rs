//! Show or initialize configuration.

use std::path::Path;

use swingscope_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path: Option<&Path>, init: bool, force: bool) -> anyhow::Result<()> {
    let target = path.map_or_else(config_file_path, Path::to_path_buf);

    if init {
        if target.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                target.display()
            );
        }
        let defaults = AppConfig::default();
        let written = match path {
            Some(path) => defaults.save_to(path).map(|()| path.to_path_buf()),
            None => defaults.save(),
        }
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default config to {}", written.display());
        return Ok(());
    }

    let source = if target.exists() { "file" } else { "defaults" };
    println!("Config: {} ({source})", target.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
