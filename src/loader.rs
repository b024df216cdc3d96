//! Interface to the model-loading service.
//!
//! The robot initialization never builds a dynamic model itself: it hands a
//! [`LoadRequest`] to a [`ModelLoader`] and works with whatever
//! [`DynamicModel`] comes back.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::NamedFrame;

/// Selects the numerical dynamics backend the loader instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DynamicsEngine {
    JrlDynamics,
    AbstractRobotDynamics,
    Urdf,
}

impl DynamicsEngine {
    pub fn token(&self) -> &'static str {
        match self {
            DynamicsEngine::JrlDynamics => "jrl-dynamics",
            DynamicsEngine::AbstractRobotDynamics => "abstract-robot-dynamics",
            DynamicsEngine::Urdf => "urdf",
        }
    }
}

impl fmt::Display for DynamicsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Error)]
#[error("unknown dynamics engine `{0}`")]
pub struct UnknownEngine(pub String);

impl FromStr for DynamicsEngine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jrl-dynamics" => Ok(DynamicsEngine::JrlDynamics),
            "abstract-robot-dynamics" => Ok(DynamicsEngine::AbstractRobotDynamics),
            "urdf" => Ok(DynamicsEngine::Urdf),
            other => Err(UnknownEngine(other.to_owned())),
        }
    }
}

/// Everything the loader needs to build the dynamic model of one robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// name of the dynamic entity, `<session>_dynamic`
    pub name: String,
    pub model_dir: PathBuf,
    pub model_file: String,
    pub specificities_path: PathBuf,
    pub joint_rank_path: PathBuf,
    pub engine: DynamicsEngine,
}

impl LoadRequest {
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }
}

/// A loaded dynamic model, as far as robot initialization is concerned.
pub trait DynamicModel {
    type Error;

    /// Degrees of freedom, free-flyer included.
    fn dimension(&self) -> usize;

    fn create_operational_point(&mut self, name: &str) -> Result<(), Self::Error>;

    fn create_frame(&mut self, frame: &NamedFrame) -> Result<(), Self::Error>;
}

pub trait ModelLoader {
    type Model: DynamicModel;

    fn load(
        &self,
        request: &LoadRequest,
    ) -> Result<Self::Model, <Self::Model as DynamicModel>::Error>;
}
