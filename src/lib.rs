use hashbrown::HashMap;
use nalgebra::Isometry3;
use petgraph::prelude::*;

mod bfs;
pub mod config;
pub mod frame;
pub mod loader;
pub mod robot;
pub mod talos;
pub mod transform;
mod urdf;
mod utils;

pub use config::{ParamsError, SessionParams};
pub use frame::NamedFrame;
pub use loader::{DynamicModel, DynamicsEngine, LoadRequest, ModelLoader};
pub use robot::{HumanoidRobot, InitError, RobotConfig, RobotDescription, DEFAULT_OPERATIONAL_POINTS};
pub use talos::Talos;
pub use transform::{matrix_to_tuple, tuple_to_matrix, RigidTransform};
pub use urdf::{UrdfError, UrdfLoader, UrdfModel, FREE_FLYER_DIM};

#[derive(Debug, Clone)]
pub struct Joint {
    // None for the root link
    pub urdf_joint: Option<urdf_rs::Joint>,
}

impl Joint {
    pub fn is_actuated(&self) -> bool {
        self.urdf_joint.as_ref().is_some_and(|j| {
            matches!(
                j.joint_type,
                urdf_rs::JointType::Revolute
                    | urdf_rs::JointType::Continuous
                    | urdf_rs::JointType::Prismatic
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct Link {
    pub name: String,

    pub global_zero_pose: Isometry3<f64>,

    // zero pose relative to parent link
    pub parent_zero_pose: Isometry3<f64>,

    // joint moving this link relative to its parent
    pub joint: Joint,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    // kinematic tree, link ids index `links`
    pub links: Vec<Link>,
    pub link_graph: DiGraphMap<usize, ()>,
    pub bfs: Vec<usize>,
    link_index: HashMap<String, usize>,
}
