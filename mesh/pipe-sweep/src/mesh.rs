//! Flat vertex/normal buffers for pipe meshes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pipe mesh as flat quad-group vertex and normal buffers.
///
/// Vertices come in groups of four per quad, ordered for a triangle-strip
/// style draw (`[p10, p00, p11, p01]`: next-ring point, current-ring point,
/// next-ring neighbor, current-ring neighbor). Each vertex carries the
/// quad's flat normal, repeated four times, so `vertices` and `normals`
/// always have the same length.
///
/// The buffers are plain data; uploading them to the GPU is the renderer's
/// concern.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipeMesh {
    /// Vertex positions, four per quad.
    pub vertices: Vec<Point3<f64>>,
    /// Per-vertex flat normals, matching `vertices` one to one.
    pub normals: Vec<Vector3<f64>>,
}

impl PipeMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create an empty mesh with room for `quads` quads.
    #[must_use]
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(4 * quads),
            normals: Vec::with_capacity(4 * quads),
        }
    }

    /// Append one quad with a shared flat normal.
    pub fn push_quad(&mut self, corners: [Point3<f64>; 4], normal: Vector3<f64>) {
        self.vertices.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
    }

    /// Number of vertices in the buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads in the buffer.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append all geometry from `other`.
    pub fn merge(&mut self, other: Self) {
        self.vertices.extend(other.vertices);
        self.normals.extend(other.normals);
    }

    /// Drop all geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> ([Point3<f64>; 4], Vector3<f64>) {
        (
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            Vector3::z(),
        )
    }

    #[test]
    fn push_quad_keeps_buffers_matched() {
        let mut mesh = PipeMesh::new();
        let (corners, normal) = unit_quad();
        mesh.push_quad(corners, normal);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.quad_count(), 1);
        assert!(mesh.normals.iter().all(|n| *n == Vector3::z()));
    }

    #[test]
    fn merge_concatenates() {
        let (corners, normal) = unit_quad();
        let mut a = PipeMesh::new();
        a.push_quad(corners, normal);
        let mut b = PipeMesh::new();
        b.push_quad(corners, normal);
        b.push_quad(corners, normal);

        a.merge(b);
        assert_eq!(a.quad_count(), 3);
        assert_eq!(a.vertices.len(), a.normals.len());
    }

    #[test]
    fn clear_empties() {
        let (corners, normal) = unit_quad();
        let mut mesh = PipeMesh::new();
        mesh.push_quad(corners, normal);
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.normals.len(), 0);
    }
}
