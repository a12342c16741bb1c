//! Picking the mesh a renderer should draw.
//!
//! A viewer keeps the mesh it loaded and derives what it draws from it,
//! recomputing only when the display mode or camera changes. Caching the
//! result is up to the caller.
use crate::geometry::Point3D;
use crate::mesh::Mesh;
use crate::normals::{flat_normals, normals_facing};

/// How a mesh is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayMode {
  /// Edges only. Normals are left as loaded.
  Wireframe,
  /// Lit with one normal per face, computed from the geometry.
  FlatNormals,
  /// Lit with the normals from the file.
  Shaded,
}

impl Default for DisplayMode {
  fn default() -> DisplayMode {
    DisplayMode::Shaded
  }
}

/// The mesh to draw for `mode`. With a `camera`, faces are also turned to face
/// it (see `normals_facing`). Diagnostics describe degenerate faces found
/// while computing flat normals.
pub fn displayed_mesh(
  mesh: &Mesh,
  mode: DisplayMode,
  camera: Option<Point3D>,
) -> (Mesh, Vec<String>) {
  let (derived, diagnostics) = match mode {
    DisplayMode::FlatNormals => flat_normals(mesh),
    DisplayMode::Wireframe | DisplayMode::Shaded => (mesh.clone(), Vec::new()),
  };

  match camera {
    Some(camera) => (normals_facing(&derived, camera), diagnostics),
    None => (derived, diagnostics),
  }
}
