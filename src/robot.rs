//! Generic humanoid robot initialization.
//!
//! A robot type only describes itself through [`RobotDescription`]; the
//! initialization sequence is the same for every robot:
//! base operational points, robot operational points, named frames, model
//! loading, dimension check against the half-sitting posture, then the
//! post-load registration of points and frames on the dynamic model.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SessionParams;
use crate::frame::NamedFrame;
use crate::loader::{DynamicModel, DynamicsEngine, LoadRequest, ModelLoader};

/// Operational points every humanoid exposes, before robot-specific ones.
pub const DEFAULT_OPERATIONAL_POINTS: [&str; 5] =
    ["left-wrist", "right-wrist", "left-ankle", "right-ankle", "gaze"];

pub trait RobotDescription {
    /// Model file name, looked up in the model directory.
    const MODEL_FILE: &'static str;
    /// Specificities description, looked up in the xml directory.
    const SPECIFICITIES_FILE: &'static str;
    /// Link/joint rank description, looked up in the xml directory.
    const JOINT_RANK_FILE: &'static str;

    fn operational_points(&self) -> &[&str];

    fn additional_frames(&self) -> Vec<NamedFrame>;

    /// Reference posture; its length is the expected model dimension.
    fn half_sitting(&self) -> &[f64];
}

#[derive(Debug, Error)]
pub enum InitError<E> {
    #[error(transparent)]
    Loader(E),

    #[error("dimension of half-sitting: {expected} differs from dimension of robot: {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Configuration of one robot session, fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotConfig {
    name: String,
    model_dir: PathBuf,
    model_file: String,
    specificities_path: PathBuf,
    joint_rank_path: PathBuf,
    engine: DynamicsEngine,
    operational_points: Vec<String>,
    additional_frames: Vec<NamedFrame>,
    half_sitting: Vec<f64>,
}

impl RobotConfig {
    pub fn new<R: RobotDescription>(
        robot: &R,
        name: impl Into<String>,
        model_dir: impl Into<PathBuf>,
        xml_dir: impl AsRef<Path>,
        engine: DynamicsEngine,
    ) -> Self {
        let xml_dir = xml_dir.as_ref();

        let mut operational_points = DEFAULT_OPERATIONAL_POINTS.map(String::from).to_vec();
        operational_points.extend(robot.operational_points().iter().map(|p| p.to_string()));

        Self {
            name: name.into(),
            model_dir: model_dir.into(),
            model_file: R::MODEL_FILE.to_owned(),
            specificities_path: xml_dir.join(R::SPECIFICITIES_FILE),
            joint_rank_path: xml_dir.join(R::JOINT_RANK_FILE),
            engine,
            operational_points,
            additional_frames: robot.additional_frames(),
            half_sitting: robot.half_sitting().to_vec(),
        }
    }

    pub fn from_params<R: RobotDescription>(robot: &R, params: &SessionParams) -> Self {
        Self::new(
            robot,
            params.name.clone(),
            params.model_dir.clone(),
            &params.xml_dir,
            params.dynamic_type,
        )
    }

    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            name: format!("{}_dynamic", self.name),
            model_dir: self.model_dir.clone(),
            model_file: self.model_file.clone(),
            specificities_path: self.specificities_path.clone(),
            joint_rank_path: self.joint_rank_path.clone(),
            engine: self.engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn model_file(&self) -> &str {
        &self.model_file
    }

    pub fn specificities_path(&self) -> &Path {
        &self.specificities_path
    }

    pub fn joint_rank_path(&self) -> &Path {
        &self.joint_rank_path
    }

    pub fn engine(&self) -> DynamicsEngine {
        self.engine
    }

    pub fn operational_points(&self) -> &[String] {
        &self.operational_points
    }

    pub fn additional_frames(&self) -> &[NamedFrame] {
        &self.additional_frames
    }

    pub fn half_sitting(&self) -> &[f64] {
        &self.half_sitting
    }
}

/// A humanoid whose dynamic model is loaded and checked.
///
/// `device` and `tracer` are held for the control framework and never inspected here.
#[derive(Debug)]
pub struct HumanoidRobot<M, D, T = ()> {
    config: RobotConfig,
    dynamic: M,
    dimension: usize,
    device: D,
    tracer: Option<T>,
    plug_velocity_from_device: bool,
}

impl<M: DynamicModel, D, T> HumanoidRobot<M, D, T> {
    pub fn initialize<L>(
        config: RobotConfig,
        loader: &L,
        device: D,
        tracer: Option<T>,
    ) -> Result<Self, InitError<M::Error>>
    where
        L: ModelLoader<Model = M>,
    {
        let request = config.load_request();
        let dynamic = loader.load(&request).map_err(InitError::Loader)?;
        let dimension = dynamic.dimension();

        tracing::info!(
            robot = %config.name,
            dynamic = %request.name,
            engine = %request.engine,
            dimension,
            "loaded dynamic model"
        );

        let expected = config.half_sitting.len();
        if dimension != expected {
            tracing::error!(
                robot = %config.name,
                expected,
                actual = dimension,
                "half-sitting does not match model dimension"
            );
            return Err(InitError::DimensionMismatch {
                expected,
                actual: dimension,
            });
        }

        let mut robot = Self {
            config,
            dynamic,
            dimension,
            device,
            tracer,
            plug_velocity_from_device: true,
        };
        robot.initialize_robot()?;
        Ok(robot)
    }

    // post-load step shared by every humanoid
    fn initialize_robot(&mut self) -> Result<(), InitError<M::Error>> {
        for point in &self.config.operational_points {
            tracing::debug!(point = %point, "creating operational point");
            self.dynamic
                .create_operational_point(point)
                .map_err(InitError::Loader)?;
        }
        for frame in &self.config.additional_frames {
            tracing::debug!(frame = %frame.name, parent = %frame.parent, "creating frame");
            self.dynamic.create_frame(frame).map_err(InitError::Loader)?;
        }
        tracing::info!(robot = %self.config.name, "robot initialized");
        Ok(())
    }
}

impl<M, D, T> HumanoidRobot<M, D, T> {
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn dynamic(&self) -> &M {
        &self.dynamic
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn tracer(&self) -> Option<&T> {
        self.tracer.as_ref()
    }

    pub fn plug_velocity_from_device(&self) -> bool {
        self.plug_velocity_from_device
    }

    pub fn half_sitting(&self) -> &[f64] {
        &self.config.half_sitting
    }

    pub fn operational_points(&self) -> &[String] {
        &self.config.operational_points
    }

    pub fn additional_frames(&self) -> &[NamedFrame] {
        &self.config.additional_frames
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::transform::{translation, IDENTITY};

    #[derive(Debug, PartialEq, Error)]
    pub(crate) enum MockError {
        #[error("no model to load")]
        MissingModel,
        #[error("rejected `{0}`")]
        Rejected(String),
    }

    #[derive(Debug, Default, PartialEq)]
    pub(crate) struct MockModel {
        pub dimension: usize,
        pub points: Vec<String>,
        pub frames: Vec<String>,
        pub reject: Option<String>,
    }

    impl DynamicModel for MockModel {
        type Error = MockError;

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn create_operational_point(&mut self, name: &str) -> Result<(), MockError> {
            if self.reject.as_deref() == Some(name) {
                return Err(MockError::Rejected(name.to_owned()));
            }
            self.points.push(name.to_owned());
            Ok(())
        }

        fn create_frame(&mut self, frame: &NamedFrame) -> Result<(), MockError> {
            if self.reject.as_deref() == Some(frame.name.as_str()) {
                return Err(MockError::Rejected(frame.name.clone()));
            }
            self.frames.push(frame.name.clone());
            Ok(())
        }
    }

    pub(crate) struct MockLoader {
        pub dimension: Option<usize>,
        pub reject: Option<String>,
        pub requests: RefCell<Vec<LoadRequest>>,
    }

    impl MockLoader {
        pub fn with_dimension(dimension: usize) -> Self {
            Self {
                dimension: Some(dimension),
                reject: None,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModelLoader for MockLoader {
        type Model = MockModel;

        fn load(&self, request: &LoadRequest) -> Result<MockModel, MockError> {
            self.requests.borrow_mut().push(request.clone());
            let dimension = self.dimension.ok_or(MockError::MissingModel)?;
            Ok(MockModel {
                dimension,
                reject: self.reject.clone(),
                ..Default::default()
            })
        }
    }

    struct Biped {
        posture: Vec<f64>,
    }

    impl RobotDescription for Biped {
        const MODEL_FILE: &'static str = "biped.wrl";
        const SPECIFICITIES_FILE: &'static str = "BIPEDSpecificities.xml";
        const JOINT_RANK_FILE: &'static str = "BIPEDLinkJointRank.xml";

        fn operational_points(&self) -> &[&str] {
            &["waist"]
        }

        fn additional_frames(&self) -> Vec<NamedFrame> {
            vec![
                NamedFrame::new("imu", translation(0., 0., 0.1), "waist"),
                NamedFrame::new("sole", IDENTITY, "left-ankle"),
            ]
        }

        fn half_sitting(&self) -> &[f64] {
            &self.posture
        }
    }

    fn biped_config(dof: usize) -> RobotConfig {
        let biped = Biped {
            posture: vec![0.; dof],
        };
        RobotConfig::new(&biped, "bip", "/models", "/xml", DynamicsEngine::JrlDynamics)
    }

    #[test]
    fn initialize_with_matching_dimension() {
        let loader = MockLoader::with_dimension(36);
        let robot = HumanoidRobot::initialize(biped_config(36), &loader, "device", None::<()>).unwrap();

        assert_eq!(robot.dimension(), 36);
        assert!(robot.plug_velocity_from_device());
        assert_eq!(*robot.device(), "device");
        assert!(robot.tracer().is_none());
        assert_eq!(robot.dynamic().points, robot.operational_points());
        assert_eq!(robot.dynamic().frames, vec!["imu", "sole"]);
    }

    #[test]
    fn initialize_with_mismatched_dimension() {
        let loader = MockLoader::with_dimension(30);
        let err = HumanoidRobot::initialize(biped_config(36), &loader, (), None::<()>).unwrap_err();

        match err {
            InitError::DimensionMismatch { expected, actual } => {
                assert_eq!((expected, actual), (36, 30));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn mismatch_message_names_both_dimensions() {
        let err: InitError<MockError> = InitError::DimensionMismatch {
            expected: 36,
            actual: 30,
        };
        assert_eq!(
            err.to_string(),
            "dimension of half-sitting: 36 differs from dimension of robot: 30"
        );
    }

    #[test]
    fn loader_error_is_passed_through() {
        let loader = MockLoader {
            dimension: None,
            reject: None,
            requests: RefCell::new(Vec::new()),
        };
        let err = HumanoidRobot::initialize(biped_config(36), &loader, (), None::<()>).unwrap_err();
        assert!(matches!(err, InitError::Loader(MockError::MissingModel)));
    }

    #[test]
    fn model_error_during_registration_is_passed_through() {
        let loader = MockLoader {
            dimension: Some(12),
            reject: Some("sole".to_owned()),
            requests: RefCell::new(Vec::new()),
        };
        let err = HumanoidRobot::initialize(biped_config(12), &loader, (), None::<()>).unwrap_err();
        assert!(matches!(err, InitError::Loader(MockError::Rejected(name)) if name == "sole"));
    }

    #[test]
    fn load_request_uses_description_files() {
        let loader = MockLoader::with_dimension(8);
        HumanoidRobot::initialize(biped_config(8), &loader, (), None::<()>).unwrap();

        let requests = loader.requests.borrow();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.name, "bip_dynamic");
        assert_eq!(request.model_dir, PathBuf::from("/models"));
        assert_eq!(request.model_file, "biped.wrl");
        assert_eq!(request.specificities_path, PathBuf::from("/xml/BIPEDSpecificities.xml"));
        assert_eq!(request.joint_rank_path, PathBuf::from("/xml/BIPEDLinkJointRank.xml"));
        assert_eq!(request.engine, DynamicsEngine::JrlDynamics);
    }

    #[test]
    fn operational_points_follow_defaults() {
        let config = biped_config(1);
        let points = config.operational_points();
        assert_eq!(points.len(), DEFAULT_OPERATIONAL_POINTS.len() + 1);
        assert_eq!(&points[..5], DEFAULT_OPERATIONAL_POINTS);
        assert_eq!(points[5], "waist");
    }

    #[test]
    fn tracer_is_kept() {
        let loader = MockLoader::with_dimension(4);
        let robot = HumanoidRobot::initialize(biped_config(4), &loader, (), Some("tracer")).unwrap();
        assert_eq!(robot.tracer(), Some(&"tracer"));
    }
}
