//! Config command: print the effective merged configuration

use anyhow::Result;

use crate::config::ResolvedConfig;
use crate::ui;

pub fn execute(config: &ResolvedConfig) -> Result<()> {
    match &config.source {
        Some(path) => ui::print_info(&format!("Loaded from {}", path.display())),
        None => ui::print_info("No config file found, showing defaults"),
    }
    ui::print_info(&format!("Project directory: {}", config.project_dir.display()));
    println!();
    print!("{}", config.to_yaml()?);
    Ok(())
}
