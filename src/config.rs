//! Engine resource configuration.
//!
//! The engine itself is owned by caller-side glue; this type is the
//! crate's input contract for the two resource files a voice needs.

use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Locations of the engine's voice resource files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Text-analysis resource file.
    pub ta_file: String,
    /// Signal-generation resource file.
    pub sg_file: String,
}

impl EngineOptions {
    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(p.as_ref())
            .with_context(|| format!("Failed to load {}", p.as_ref().display()))?;
        let opts: Self =
            serde_json::from_str(&text).with_context(|| "options file is not valid JSON")?;
        opts.validate()?;
        Ok(opts)
    }

    /// Both resource paths must be set.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ta_file.is_empty() {
            bail!("ta_file is empty");
        }
        if self.sg_file.is_empty() {
            bail!("sg_file is empty");
        }
        Ok(())
    }
}
