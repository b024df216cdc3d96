use std::path::{Path, PathBuf};

use nalgebra::Matrix4;
use thiserror::Error;
use urdf_rs::read_from_string;

use super::bfs::bfs;
use super::frame::NamedFrame;
use super::loader::{DynamicModel, DynamicsEngine, LoadRequest, ModelLoader};
use super::transform::{is_rigid, tuple_to_matrix};
use super::utils::*;
use super::{Link, Model};

/// Configuration entries of the floating base.
pub const FREE_FLYER_DIM: usize = 6;

#[derive(Debug, Error)]
pub enum UrdfError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse urdf: {0}")]
    Parse(#[from] urdf_rs::UrdfError),

    #[error("`{0}` is not a urdf file")]
    NotUrdf(PathBuf),

    #[error("missing file `{0}`")]
    MissingFile(PathBuf),

    #[error("dynamics engine `{0}` is not handled by the urdf loader")]
    UnsupportedEngine(DynamicsEngine),

    #[error("no link named `{0}` in the model")]
    UnknownLink(String),

    #[error("urdf has no root link")]
    NoRoot,

    #[error("links not connected to the root: {0:?}")]
    DisconnectedLinks(Vec<String>),

    #[error("transform of frame `{0}` is not rigid")]
    NotRigid(String),
}

impl Model {
    pub fn from_urdf_string(str: &str) -> Result<Self, UrdfError> {
        let robot = read_from_string(str)?;

        // link_name -> link_id
        let link_index = link_index_map(&robot);
        // child_link_name -> joint
        let mut joints = joint_by_child(&robot);

        // link_id -> link_id
        let link_graph = construct_link_graph(&link_index, &joints);

        let root = find_root(&link_graph, robot.links.len()).ok_or(UrdfError::NoRoot)?;
        let bfs = bfs(&link_graph, root);

        let mut links = construct_links(&robot, &mut joints);
        // every link must hang below the root to get a zero pose
        if bfs.len() != links.len() {
            let unreached = links
                .iter()
                .enumerate()
                .filter(|(index, _)| !bfs.contains(index))
                .map(|(_, link)| link.name.clone())
                .collect();
            return Err(UrdfError::DisconnectedLinks(unreached));
        }
        fullfill_zero_poses(&mut links, &link_graph, &bfs);

        Ok(Self {
            name: robot.name,
            links,
            link_graph,
            bfs,
            link_index,
        })
    }

    pub fn from_urdf(path: impl AsRef<Path>) -> Result<Self, UrdfError> {
        let path = path.as_ref();
        if !is_urdf_file(path) {
            return Err(UrdfError::NotUrdf(path.to_path_buf()));
        }
        let str = std::fs::read_to_string(path).map_err(|source| UrdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_urdf_string(&str)
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        self.link_index.get(name).map(|index| &self.links[*index])
    }

    pub fn actuated_joint_count(&self) -> usize {
        self.links.iter().filter(|link| link.joint.is_actuated()).count()
    }

    /// Configuration size: free-flyer plus one entry per actuated joint.
    pub fn dimension(&self) -> usize {
        FREE_FLYER_DIM + self.actuated_joint_count()
    }
}

/// Dynamic model backed by a parsed urdf tree.
#[derive(Debug, Clone)]
pub struct UrdfModel {
    pub name: String,
    pub model: Model,
    operational_points: Vec<String>,
    frames: Vec<NamedFrame>,
}

impl UrdfModel {
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
            operational_points: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn operational_points(&self) -> &[String] {
        &self.operational_points
    }

    pub fn frames(&self) -> &[NamedFrame] {
        &self.frames
    }

    /// World pose of a registered frame with every joint at zero.
    pub fn frame_zero_pose(&self, name: &str) -> Option<Matrix4<f64>> {
        let frame = self.frames.iter().find(|f| f.name == name)?;
        let parent = self.model.link(&frame.parent)?;
        Some(parent.global_zero_pose.to_homogeneous() * tuple_to_matrix(&frame.transform))
    }

    fn require_link(&self, name: &str) -> Result<(), UrdfError> {
        match self.model.link(name) {
            Some(_) => Ok(()),
            None => Err(UrdfError::UnknownLink(name.to_owned())),
        }
    }
}

impl DynamicModel for UrdfModel {
    type Error = UrdfError;

    fn dimension(&self) -> usize {
        self.model.dimension()
    }

    fn create_operational_point(&mut self, name: &str) -> Result<(), UrdfError> {
        self.require_link(name)?;
        self.operational_points.push(name.to_owned());
        Ok(())
    }

    fn create_frame(&mut self, frame: &NamedFrame) -> Result<(), UrdfError> {
        self.require_link(&frame.parent)?;
        if !is_rigid(&frame.transform) {
            return Err(UrdfError::NotRigid(frame.name.clone()));
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Loads dynamic models from urdf files.
///
/// The specificities and joint-rank descriptions must exist next to the
/// model, but link naming and joint order come from the urdf itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrdfLoader;

impl ModelLoader for UrdfLoader {
    type Model = UrdfModel;

    fn load(&self, request: &LoadRequest) -> Result<UrdfModel, UrdfError> {
        if request.engine != DynamicsEngine::Urdf {
            return Err(UrdfError::UnsupportedEngine(request.engine));
        }

        let model_path = request.model_path();
        for path in [
            &model_path,
            &request.specificities_path,
            &request.joint_rank_path,
        ] {
            if !path.is_file() {
                return Err(UrdfError::MissingFile(path.clone()));
            }
        }

        let model = Model::from_urdf(&model_path)?;
        tracing::info!(
            dynamic = %request.name,
            robot = %model.name,
            links = model.links.len(),
            path = %model_path.display(),
            "parsed urdf model"
        );
        Ok(UrdfModel::new(request.name.clone(), model))
    }
}
