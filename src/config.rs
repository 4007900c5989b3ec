// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Composition setup from YAML files.
//!
//! Lets a caller describe tempo, key, mode, and time signature in a
//! small config file and build a ready-to-use [`Composition`] from it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::error::Error;
use crate::music::KeyName;

/// Composition-level settings loaded from a config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompositionConfig {
    /// Composition name
    #[serde(default = "default_name")]
    pub name: String,
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Root of the key (e.g., "C", "F#", "Bb")
    #[serde(default = "default_key")]
    pub key: String,
    /// Mode (e.g., "major", "minor", "dorian")
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Time signature numerator
    #[serde(default = "default_time_sig_num")]
    pub time_signature_num: u32,
    /// Time signature denominator
    #[serde(default = "default_time_sig_den")]
    pub time_signature_den: u32,
}

fn default_name() -> String {
    "Untitled".to_string()
}
fn default_tempo() -> u32 {
    120
}
fn default_key() -> String {
    "C".to_string()
}
fn default_mode() -> String {
    "major".to_string()
}
fn default_time_sig_num() -> u32 {
    4
}
fn default_time_sig_den() -> u32 {
    4
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            tempo: default_tempo(),
            key: default_key(),
            mode: default_mode(),
            time_signature_num: default_time_sig_num(),
            time_signature_den: default_time_sig_den(),
        }
    }
}

impl CompositionConfig {
    /// Load a composition configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a composition configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Build a composition configured per this file
    pub fn build(&self) -> Result<Composition> {
        let mut composition = Composition::with_settings(
            self.tempo,
            (self.time_signature_num, self.time_signature_den),
            None,
        )?;
        let root = KeyName::parse(&self.key).ok_or_else(|| Error::InvalidKey {
            name: self.key.clone(),
            mode: self.mode.clone(),
            valid: KeyName::ALL.map(|n| n.to_string()).join(", "),
        })?;
        composition.set_mode(root, &self.mode)?;
        Ok(composition)
    }
}
