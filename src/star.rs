use glam::Vec3;
use thiserror::Error;

use crate::traits::RenderBackend;

pub const VERTEX_COUNT: usize = 15;
pub const FACE_COUNT: usize = 22;
pub const MAIN_FACE_COUNT: usize = 2;
pub const POINT_COUNT: usize = 5;
pub const FACETS_PER_POINT: usize = 4;

/// Pentagonal waist at z = +1 and z = -1, five outer points in the z = 0 plane
static VERTICES: [[f32; 3]; VERTEX_COUNT] = [
    [0.0, 5.5, 0.0],
    [-5.0, 2.0, 0.0],
    [-3.0, -4.0, 0.0],
    [3.0, -4.0, 0.0],
    [5.0, 2.0, 0.0],
    [1.0, 2.0, 1.0],
    [-1.0, 2.0, 1.0],
    [-2.0, 0.0, 1.0],
    [0.0, -1.5, 1.0],
    [2.0, 0.0, 1.0],
    [1.0, 2.0, -1.0],
    [-1.0, 2.0, -1.0],
    [-2.0, 0.0, -1.0],
    [0.0, -2.0, -1.0],
    [2.0, 0.0, -1.0],
];

static FACES: [&[usize]; FACE_COUNT] = [
    // main faces
    &[5, 6, 7, 8, 9],
    &[14, 13, 12, 11, 10],
    // top point
    &[0, 6, 5],
    &[0, 5, 10],
    &[0, 10, 11],
    &[0, 11, 6],
    // top left
    &[1, 7, 6],
    &[1, 6, 11],
    &[1, 11, 12],
    &[1, 12, 7],
    // bottom left
    &[2, 8, 7],
    &[2, 7, 12],
    &[2, 12, 13],
    &[2, 13, 8],
    // bottom right
    &[3, 9, 8],
    &[3, 8, 13],
    &[3, 13, 14],
    &[3, 14, 9],
    // top right
    &[4, 5, 9],
    &[4, 9, 14],
    &[4, 14, 10],
    &[4, 10, 5],
];

static NORMALS: [[f32; 3]; FACE_COUNT] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [-0.690942, -0.212598, 0.690942],
    [-0.690942, -0.212598, -0.690942],
    [0.690942, -0.212598, -0.690942],
    [0.690942, -0.212598, 0.690942],
    [-0.11547, -0.80829, 0.57735],
    [-0.0873704, -0.611593, -0.786334],
    [0.362143, 0.452679, -0.814822],
    [0.492366, 0.615457, 0.615457],
    [0.618853, -0.309426, 0.721995],
    [0.534522, -0.267261, -0.801784],
    [-0.362143, 0.452679, -0.814822],
    [-0.421637, 0.527046, 0.737865],
    [0.362143, 0.452679, 0.814822],
    [0.421637, 0.527046, -0.737865],
    [-0.618853, -0.309426, -0.721995],
    [-0.534522, -0.267261, 0.801784],
    [-0.362143, 0.452679, 0.814822],
    [-0.492366, 0.615457, -0.615457],
    [0.11547, -0.80829, -0.57735],
    [0.0873704, -0.611593, 0.786334],
];

/// First violation found in a face/vertex/normal table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("face count {faces} does not match normal count {normals}")]
    NormalCountMismatch { faces: usize, normals: usize },

    #[error("face {face} has {len} vertices, expected 3 to 5")]
    FaceArity { face: usize, len: usize },

    #[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("normal {face} has length {length}, expected unit length")]
    NonUnitNormal { face: usize, length: f32 },
}

/// Check a fan-encoded polyhedron table for internal consistency
pub fn validate_dataset(
    vertices: &[[f32; 3]],
    faces: &[&[usize]],
    normals: &[[f32; 3]],
) -> Result<(), DatasetError> {
    if faces.len() != normals.len() {
        return Err(DatasetError::NormalCountMismatch {
            faces: faces.len(),
            normals: normals.len(),
        });
    }

    for (i, face) in faces.iter().enumerate() {
        if !(3..=5).contains(&face.len()) {
            return Err(DatasetError::FaceArity {
                face: i,
                len: face.len(),
            });
        }
        if let Some(&index) = face.iter().find(|&&v| v >= vertices.len()) {
            return Err(DatasetError::IndexOutOfRange {
                face: i,
                index,
                vertex_count: vertices.len(),
            });
        }
    }

    for (i, n) in normals.iter().enumerate() {
        let length = Vec3::from_array(*n).length();
        if (length - 1.0).abs() > 1e-3 {
            return Err(DatasetError::NonUnitNormal { face: i, length });
        }
    }

    Ok(())
}

/// Five-pointed star polyhedron with flat-shaded faces
///
/// The geometry is a fixed, shared table; instances carry no state, so one
/// value can be rendered any number of times under different transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarSolid;

impl StarSolid {
    pub const fn new() -> Self {
        Self
    }

    pub fn vertices(&self) -> &'static [[f32; 3]] {
        &VERTICES
    }

    pub fn faces(&self) -> &'static [&'static [usize]] {
        &FACES
    }

    pub fn normals(&self) -> &'static [[f32; 3]] {
        &NORMALS
    }

    /// Triangles produced when every face is expanded as a fan
    pub fn triangle_count(&self) -> usize {
        FACES.iter().map(|face| face.len() - 2).sum()
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        validate_dataset(&VERTICES, &FACES, &NORMALS)
    }

    /// Submit every face as one normal followed by a vertex fan, in table order
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        for (face, normal) in FACES.iter().zip(NORMALS.iter()) {
            backend.set_normal(Vec3::from_array(*normal));
            backend.begin_fan();
            for &v in face.iter() {
                backend.emit_vertex(Vec3::from_array(VERTICES[v]));
            }
            backend.end_fan();
        }
    }
}
