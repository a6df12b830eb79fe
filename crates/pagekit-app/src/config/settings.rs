//! Settings parser for .pagekit/config.toml

use super::types::Settings;
use pagekit_core::prelude::*;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const PAGEKIT_DIR: &str = ".pagekit";

/// Load settings from `<base>/.pagekit/config.toml`
///
/// A missing or unparsable file falls back to defaults.
pub fn load_settings(base_path: &Path) -> Settings {
    let config_path = base_path.join(PAGEKIT_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write settings to `<base>/.pagekit/config.toml`, creating the directory
pub fn save_settings(base_path: &Path, settings: &Settings) -> Result<()> {
    let pagekit_dir = base_path.join(PAGEKIT_DIR);
    std::fs::create_dir_all(&pagekit_dir)
        .map_err(|e| Error::config(format!("Failed to create .pagekit dir: {}", e)))?;

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;

    std::fs::write(pagekit_dir.join(CONFIG_FILENAME), content)
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;

    Ok(())
}

/// Create a commented default config file in .pagekit/ if none exists
pub fn init_config_dir(base_path: &Path) -> Result<()> {
    let pagekit_dir = base_path.join(PAGEKIT_DIR);

    if !pagekit_dir.exists() {
        std::fs::create_dir_all(&pagekit_dir)
            .map_err(|e| Error::config(format!("Failed to create .pagekit dir: {}", e)))?;
    }

    let config_path = pagekit_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# pagekit configuration

[observers]
# Lazy images start loading this many pixels before they enter the viewport
lazy_root_margin_px = 200.0
# Fraction of a section that must be visible before it is revealed
reveal_threshold = 0.15
# Extra pixels added to the nav height for the sticky trigger
sticky_extra_offset_px = 0.0

[hover]
dim_opacity = 0.5

[scroll]
# Animation frames a smooth scroll takes
smooth_frames = 12

[images]
# Report image loads immediately after the source is swapped
simulate_load = true

[cookie]
enabled = true
message = "We use cookies for improved functionality and analytics."
button_text = "Got it!"

# Structural selectors and state classes can be overridden in
# [markers] and [classes]; see the defaults in the documentation.
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
