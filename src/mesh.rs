//! The triangle mesh store.
use crate::geometry::Vertex;
use crate::material::{Material, MaterialId, SharedMaterials};

/// A triangle. There is no way to store anything with more or fewer corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Face {
  /// The corners, in winding order.
  pub vertices: [Vertex; 3],
  /// The face's material, if it has one. Resolve it through the owning mesh.
  pub material: Option<MaterialId>,
}

/// Errors from indexing into a mesh.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
  /// A face index was not below the face count.
  #[error("face index {index} is out of range for a mesh of {count} faces")]
  FaceOutOfRange {
    /// The index asked for.
    index: usize,
    /// How many faces the mesh has.
    count: usize,
  },
}

/// An ordered list of triangles plus the materials they refer to.
///
/// `clone()` is a deep copy of the faces, but the materials stay shared with
/// the original: editing a material through one mesh shows up in the other.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
  faces: Vec<Face>,
  materials: SharedMaterials,
}

impl Mesh {
  /// An empty mesh with no materials.
  pub fn new() -> Mesh {
    Mesh::default()
  }

  /// An empty mesh whose faces may refer to `materials`.
  pub fn with_materials(materials: SharedMaterials) -> Mesh {
    Mesh {
      faces: Vec::new(),
      materials,
    }
  }

  /// Appends a triangle and returns its index. Indices of earlier faces stay
  /// valid.
  pub fn add_face(&mut self, vertices: [Vertex; 3], material: Option<MaterialId>) -> usize {
    self.faces.push(Face { vertices, material });
    self.faces.len() - 1
  }

  /// Number of faces.
  pub fn num_faces(&self) -> usize {
    self.faces.len()
  }

  /// True if the mesh has no faces.
  pub fn is_empty(&self) -> bool {
    self.faces.is_empty()
  }

  /// The face at `index`.
  pub fn face(&self, index: usize) -> Result<&Face, MeshError> {
    let count = self.faces.len();
    self
      .faces
      .get(index)
      .ok_or(MeshError::FaceOutOfRange { index, count })
  }

  /// Mutable access to the face at `index`.
  pub fn face_mut(&mut self, index: usize) -> Result<&mut Face, MeshError> {
    let count = self.faces.len();
    self
      .faces
      .get_mut(index)
      .ok_or(MeshError::FaceOutOfRange { index, count })
  }

  /// All faces in the order they were added.
  pub fn faces(&self) -> &[Face] {
    &self.faces
  }

  /// The materials this mesh's faces refer to.
  pub fn materials(&self) -> &SharedMaterials {
    &self.materials
  }

  /// A snapshot of the material assigned to `face`.
  pub fn material_of(&self, face: &Face) -> Option<Material> {
    face.material.and_then(|id| self.materials.get(id))
  }

  /// A new mesh holding `f` applied to every face, sharing this mesh's
  /// materials.
  pub(crate) fn map_faces<F>(&self, f: F) -> Mesh
  where
    F: FnMut(&Face) -> Face,
  {
    Mesh {
      faces: self.faces.iter().map(f).collect(),
      materials: self.materials.clone(),
    }
  }

  pub(crate) fn set_materials(&mut self, materials: SharedMaterials) {
    self.materials = materials;
  }
}
