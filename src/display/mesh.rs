use anyhow::{anyhow, bail};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use itertools::izip;

use crate::document::MeshGeometry;
use crate::math::AABB;
use crate::resources::{ResourceHandle, ResourceKind, ResourceTracker};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Triangulated, renderable representation of an object.
#[derive(Debug)]
pub struct DisplayMesh {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    bounding_box: AABB,
    buffers: Option<ResourceHandle>,
}

impl DisplayMesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
    ) -> anyhow::Result<Self> {
        let name = name.into();

        if indices.is_empty() {
            bail!("Mesh without triangles: {}", name);
        }

        if indices.len() / 3 > u32::MAX as usize {
            bail!("Mesh {} has more than {} triangles", name, u32::MAX);
        }

        if indices.len() % 3 != 0 {
            bail!(
                "Index count {} of mesh {} is not a multiple of 3",
                indices.len(),
                name
            );
        }

        if let Some(index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            bail!(
                "Index {} out of bounds in mesh {} ({} vertices)",
                index,
                name,
                vertices.len()
            );
        }

        let bounding_box = AABB::from_points(vertices.iter().map(|vertex| vertex.position))
            .ok_or_else(|| anyhow!("Mesh without vertices: {}", name))?;

        Ok(Self {
            name,
            vertices,
            indices,
            bounding_box,
            buffers: None,
        })
    }

    /// Builds a triangle mesh from document geometry, splitting quads and
    /// computing vertex normals when the document has none.
    pub fn from_geometry(
        name: impl Into<String>,
        geometry: &MeshGeometry,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        let vertex_count = geometry.vertices.len();

        let mut indices = Vec::with_capacity(geometry.faces.len() * 6);
        for (face_index, face) in geometry.faces.iter().enumerate() {
            if let Some(index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                bail!(
                    "Face {} of mesh {} references vertex {} ({} vertices)",
                    face_index,
                    name,
                    index,
                    vertex_count
                );
            }

            let [a, b, c, d] = *face;
            indices.extend_from_slice(&[a, b, c]);
            if c != d {
                indices.extend_from_slice(&[a, c, d]);
            }
        }

        let normals = match &geometry.normals {
            Some(normals) if normals.len() == vertex_count => normals.clone(),
            Some(normals) => bail!(
                "Mesh {} has {} normals for {} vertices",
                name,
                normals.len(),
                vertex_count
            ),
            None => compute_vertex_normals(&geometry.vertices, &indices),
        };

        let vertices = izip!(&geometry.vertices, &normals)
            .map(|(position, normal)| Vertex {
                position: *position,
                normal: *normal,
            })
            .collect();

        Self::new(name, vertices, indices)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> u32 {
        // Bounded by the check in `new`.
        (self.indices.len() / 3) as u32
    }

    pub fn bounding_box(&self) -> &AABB {
        &self.bounding_box
    }

    /// Allocates the native vertex/index buffers. Does nothing if already uploaded.
    pub fn upload(&mut self, tracker: &ResourceTracker) {
        if self.buffers.is_none() {
            self.buffers = Some(tracker.allocate(ResourceKind::MeshBuffers, self.name.clone()));
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.buffers.is_some()
    }
}

fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        // Unnormalized, so larger faces weigh more.
        let face_normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);

        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }

    normals.iter().map(|normal| normal.normalize_or_zero()).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn unit_quad() -> MeshGeometry {
        MeshGeometry {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: None,
            faces: vec![[0, 1, 2, 3]],
        }
    }

    #[test]
    fn quads_are_split_and_triangles_kept() {
        let mut geometry = unit_quad();
        geometry.faces.push([0, 1, 2, 2]);

        let mesh = DisplayMesh::from_geometry("quad", &geometry).unwrap();

        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn missing_normals_are_computed() {
        let mesh = DisplayMesh::from_geometry("quad", &unit_quad()).unwrap();

        for vertex in mesh.vertices() {
            assert!(vertex.normal.abs_diff_eq(Vec3::Z, 1e-6));
        }
        assert_eq!(mesh.bounding_box().max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn out_of_range_face_is_rejected() {
        let mut geometry = unit_quad();
        geometry.faces.push([0, 1, 7, 7]);

        let error = DisplayMesh::from_geometry("broken", &geometry).unwrap_err();
        assert!(error.to_string().contains("references vertex 7"));
    }

    #[test]
    fn normal_count_must_match() {
        let mut geometry = unit_quad();
        geometry.normals = Some(vec![Vec3::Z]);

        assert!(DisplayMesh::from_geometry("quad", &geometry).is_err());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert!(DisplayMesh::new("empty", Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn upload_is_idempotent_and_drop_frees() {
        let tracker = ResourceTracker::new();
        let mut mesh = DisplayMesh::from_geometry("quad", &unit_quad()).unwrap();

        mesh.upload(&tracker);
        mesh.upload(&tracker);
        assert!(mesh.is_uploaded());
        assert_eq!(tracker.live(), 1);

        drop(mesh);
        assert_eq!(tracker.live(), 0);
    }
}
