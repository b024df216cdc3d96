use nalgebra::{Isometry3, SMatrix, Translation3, UnitQuaternion};

/// Homogeneous 4x4 transform as nested rows, the form frames are registered with.
pub type RigidTransform = [[f64; 4]; 4];

pub const IDENTITY: RigidTransform = [
    [1., 0., 0., 0.],
    [0., 1., 0., 0.],
    [0., 0., 1., 0.],
    [0., 0., 0., 1.],
];

const RIGID_TOLERANCE: f64 = 1e-9;

/// Pure translation, usable in constant tables.
pub const fn translation(x: f64, y: f64, z: f64) -> RigidTransform {
    [
        [1., 0., 0., x],
        [0., 1., 0., y],
        [0., 0., 1., z],
        [0., 0., 0., 1.],
    ]
}

/// Copies a matrix into nested row arrays, row by row, without touching values.
pub fn matrix_to_tuple<const R: usize, const C: usize>(m: &SMatrix<f64, R, C>) -> [[f64; C]; R] {
    let mut rows = [[0.; C]; R];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = m[(i, j)];
        }
    }
    rows
}

pub fn tuple_to_matrix<const R: usize, const C: usize>(rows: &[[f64; C]; R]) -> SMatrix<f64, R, C> {
    SMatrix::from_fn(|i, j| rows[i][j])
}

// last row is (0, 0, 0, 1) and the rotation block is orthonormal
pub fn is_rigid(t: &RigidTransform) -> bool {
    if t[3] != [0., 0., 0., 1.] {
        return false;
    }
    let m = tuple_to_matrix(t);
    let rotation = m.fixed_view::<3, 3>(0, 0).into_owned();
    let gram = rotation.transpose() * rotation;
    (gram - nalgebra::Matrix3::identity()).abs().max() < RIGID_TOLERANCE
        && (rotation.determinant() - 1.).abs() < RIGID_TOLERANCE
}

pub(crate) fn pose_to_isometry(pose: &urdf_rs::Pose) -> Isometry3<f64> {
    let rpy = &pose.rpy;
    let xyz = &pose.xyz;
    Isometry3::from_parts(
        Translation3::new(xyz[0], xyz[1], xyz[2]),
        UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
    )
}
