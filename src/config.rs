//! Session parameters.
//!
//! ```toml
//! name = "robot"
//! model_dir = "/opt/openrobots/share/talos/model"
//! xml_dir = "/opt/openrobots/share/talos/xml"
//! dynamic_type = "jrl-dynamics"
//! ```

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::DynamicsEngine;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("cannot load the parameter file: {0}")]
    FileLoad(#[from] std::io::Error),

    #[error("cannot read the parameter file: {0}")]
    Deserialise(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    pub name: String,
    pub model_dir: PathBuf,
    pub xml_dir: PathBuf,
    pub dynamic_type: DynamicsEngine,
}

impl SessionParams {
    pub fn from_toml_str(s: &str) -> Result<Self, ParamsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let params_str = read_to_string(path)?;
        Self::from_toml_str(&params_str)
    }
}
