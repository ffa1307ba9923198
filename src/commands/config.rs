//! Show the configuration file, creating it with defaults on first run.

use crate::config::{get_config_path, PolyscribeConfig};

/// Prints the config file path and its current contents.
///
/// Writes the default configuration first if no file exists yet, so there is
/// always something to edit.
pub fn handle_config() -> Result<(), anyhow::Error> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        PolyscribeConfig::default().save()?;
        println!("Created default configuration.");
    }

    let contents = std::fs::read_to_string(&config_path)?;
    println!("Configuration file: {}", config_path.display());
    println!();
    print!("{contents}");
    Ok(())
}
