//! Loading sketch settings from TOML files and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use grid_sketch_system_sketches::SketchConfig;

/// Command-line values that take precedence over the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) scale: Option<f32>,
}

/// Reads the config file when one is given, applies overrides and validates.
pub(crate) fn load(path: Option<&Path>, overrides: Overrides) -> Result<SketchConfig> {
    let config = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read sketch config at {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("invalid sketch config at {}", path.display()))?
        }
        None => SketchConfig::default(),
    };
    resolve(config, overrides)
}

fn parse(contents: &str) -> Result<SketchConfig> {
    toml::from_str(contents).context("failed to parse sketch config toml contents")
}

fn resolve(mut config: SketchConfig, overrides: Overrides) -> Result<SketchConfig> {
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(scale) = overrides.scale {
        config.scale = scale;
    }
    config.validate().context("sketch config failed validation")?;
    Ok(config)
}
