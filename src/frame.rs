use crate::transform::RigidTransform;

/// A reference frame rigidly attached to a link of the robot, usually a sensor mount.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedFrame {
    pub name: String,
    // pose of the frame in the parent link frame
    pub transform: RigidTransform,
    pub parent: String,
}

impl NamedFrame {
    pub fn new(name: impl Into<String>, transform: RigidTransform, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform,
            parent: parent.into(),
        }
    }
}
