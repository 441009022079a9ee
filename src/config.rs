use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::matrix::DEFAULT_MATRIX_NAME;
use crate::ui::UI_DEFAULT_ADDR;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub receiver: ReceiverConfig,
    #[serde(default)]
    pub osc: OscConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReceiverConfig {
    /// Matrix planes (tracked users)
    #[serde(default = "default_num_users")]
    pub num_users: usize,
    /// Matrix rows (joints)
    #[serde(default = "default_num_joints")]
    pub num_joints: usize,
    /// Matrix columns (features per joint)
    #[serde(default = "default_num_features")]
    pub num_features: usize,
    /// Non-negative forces every sample onto this user plane (debugging)
    #[serde(default = "default_override_user_id")]
    pub override_user_id: i32,
    /// Dump every inbound message to the console
    #[serde(default)]
    pub verbose: bool,
    /// Handle the matrix is announced under
    #[serde(default = "default_matrix_name")]
    pub matrix_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OscConfig {
    /// Where skeleton/config messages arrive
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Where label updates and the matrix announcement go
    #[serde(default = "default_ui_addr")]
    pub ui_addr: String,
}

fn default_num_users() -> usize { 10 }
fn default_num_joints() -> usize { 25 }
fn default_num_features() -> usize { 11 }
fn default_override_user_id() -> i32 { -1 }
fn default_matrix_name() -> String { DEFAULT_MATRIX_NAME.to_string() }
fn default_listen_addr() -> String { "0.0.0.0:7000".to_string() }
fn default_ui_addr() -> String { UI_DEFAULT_ADDR.to_string() }

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            num_users: default_num_users(),
            num_joints: default_num_joints(),
            num_features: default_num_features(),
            override_user_id: default_override_user_id(),
            verbose: false,
            matrix_name: default_matrix_name(),
        }
    }
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            ui_addr: default_ui_addr(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing or unreadable file falls back to defaults with a note.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "config: {} not loaded ({}), using defaults",
                    path.as_ref().display(),
                    e
                );
                Config::default()
            }
        }
    }
}
