//! TALOS humanoid description.

use std::path::{Path, PathBuf};

use crate::frame::NamedFrame;
use crate::loader::{DynamicModel, DynamicsEngine, ModelLoader};
use crate::robot::{HumanoidRobot, InitError, RobotConfig, RobotDescription};
use nalgebra::Matrix4;

use crate::transform::{matrix_to_tuple, translation, RigidTransform};

pub const FORCE_SENSOR_IN_LEFT_ANKLE: RigidTransform = translation(0., 0., -0.105);
pub const FORCE_SENSOR_IN_RIGHT_ANKLE: RigidTransform = translation(0., 0., -0.105);

#[rustfmt::skip]
pub fn accelerometer_position() -> Matrix4<f64> {
    Matrix4::new(
        1., 0., 0., -0.13,
        0., 1., 0., 0.,
        0., 0., 1., 0.118,
        0., 0., 0., 1.,
    )
}

#[rustfmt::skip]
pub fn gyrometer_position() -> Matrix4<f64> {
    Matrix4::new(
        1., 0., 0., -0.13,
        0., 1., 0., 0.,
        0., 0., 1., 0.118,
        0., 0., 0., 1.,
    )
}

/// Hand joints missing from the small model.
pub const HAND_DOF: usize = 10;

#[rustfmt::skip]
pub const HALF_SITTING: [f64; 38] = [
    // free flyer
    0.0, 0.0, 1.018213, 0.0, 0.0, 0.0,
    // left leg
    0.0, 0.0, -0.411354, 0.859395, -0.448041, -0.001708,
    // right leg
    0.0, 0.0, -0.411354, 0.859395, -0.448041, -0.001708,
    // chest
    0.0, 0.006761,
    // left arm
    0.25847, 0.173046, -0.0002, -0.525366, 0.0, 0.0, 0.1, -0.005,
    // right arm
    -0.25847, -0.173046, 0.0002, -0.525366, 0.0, 0.0, 0.1, -0.005,
    // head
    0.0, 0.0,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Talos;

impl Talos {
    /// Loads and checks the TALOS model for a control session.
    pub fn initialize<L, D, T>(
        name: impl Into<String>,
        model_dir: impl Into<PathBuf>,
        xml_dir: impl AsRef<Path>,
        device: D,
        engine: DynamicsEngine,
        tracer: Option<T>,
        loader: &L,
    ) -> Result<HumanoidRobot<L::Model, D, T>, InitError<<L::Model as DynamicModel>::Error>>
    where
        L: ModelLoader,
    {
        let config = RobotConfig::new(&Talos, name, model_dir, xml_dir, engine);
        HumanoidRobot::initialize(config, loader, device, tracer)
    }

    /// Pads a posture without hand joints with zeros for the hands.
    pub fn small_to_full(config: &[f64]) -> Vec<f64> {
        let mut full = config.to_vec();
        full.resize(config.len() + HAND_DOF, 0.);
        full
    }
}

impl RobotDescription for Talos {
    const MODEL_FILE: &'static str = "talos.wrl";
    const SPECIFICITIES_FILE: &'static str = "TALOSSpecificitiesSmall.xml";
    const JOINT_RANK_FILE: &'static str = "TALOSLinkJointRankSmall.xml";

    fn operational_points(&self) -> &[&str] {
        &["waist", "chest"]
    }

    fn additional_frames(&self) -> Vec<NamedFrame> {
        vec![
            NamedFrame::new("accelerometer", matrix_to_tuple(&accelerometer_position()), "chest"),
            NamedFrame::new("gyrometer", matrix_to_tuple(&gyrometer_position()), "chest"),
            NamedFrame::new("leftFootForceSensor", FORCE_SENSOR_IN_LEFT_ANKLE, "left-ankle"),
            NamedFrame::new("rightFootForceSensor", FORCE_SENSOR_IN_RIGHT_ANKLE, "right-ankle"),
        ]
    }

    fn half_sitting(&self) -> &[f64] {
        &HALF_SITTING
    }
}
