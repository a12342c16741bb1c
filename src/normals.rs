//! Normals derived from a mesh's geometry.
//!
//! Every function here leaves its input alone and returns a new mesh that
//! shares the input's materials.
use crate::geometry::{Point3D, Vector3D};
use crate::mesh::{Face, Mesh};
use crate::util::EPSILON;

/// The unit normal of the plane through `face`'s positions, or `None` for a
/// degenerate (zero area) triangle.
///
/// Counter-clockwise corners, seen from the side the normal points to:
/// `(0,0,0), (1,0,0), (0,1,0)` gives `(0,0,1)`.
pub fn flat_normal(face: &Face) -> Option<Vector3D> {
  let [a, b, c] = face.vertices;
  let e1 = b.point - a.point;
  let e2 = c.point - a.point;
  e1.cross(&e2).normalize()
}

/// Sets all three vertex normals of `face` to its flat normal.
///
/// A degenerate face gets zero normals and `false` is returned.
pub fn compute_flat_normal(face: &mut Face) -> bool {
  let normal = flat_normal(face);
  for vertex in face.vertices.iter_mut() {
    vertex.normal = normal.unwrap_or_default();
  }
  normal.is_some()
}

/// A copy of `mesh` with flat normals on every face, plus a diagnostic for
/// each degenerate face.
pub fn flat_normals(mesh: &Mesh) -> (Mesh, Vec<String>) {
  let mut diagnostics = Vec::new();
  let mut index = 0;
  let derived = mesh.map_faces(|face| {
    let mut face = *face;
    if !compute_flat_normal(&mut face) {
      diagnostics.push(format!("face {} is degenerate; normal set to zero", index));
    }
    index += 1;
    face
  });
  (derived, diagnostics)
}

fn centroid(face: &Face) -> Point3D {
  let [a, b, c] = face.vertices;
  Point3D::new(
    (a.point.x + b.point.x + c.point.x) / 3.,
    (a.point.y + b.point.y + c.point.y) / 3.,
    (a.point.z + b.point.z + c.point.z) / 3.,
  )
}

/// True if `face` is turned away from `camera`, judging by its flat normal.
///
/// Degenerate faces never are, and neither are faces seen (nearly) edge-on.
fn faces_away(face: &Face, camera: Point3D) -> bool {
  let normal = match flat_normal(face) {
    Some(normal) => normal,
    None => return false,
  };
  // The centroid doesn't move when the corners are reversed.
  let to_camera = camera - centroid(face);
  let along = normal.dot(&to_camera);
  along < 0. && along.abs() > EPSILON * to_camera.length()
}

/// A copy of `mesh` in which every face is turned towards `camera`.
///
/// A face turned away has its vertex normals negated and its corners
/// reversed, so the winding agrees with the flipped normals. Other faces are
/// copied as they are. Only the flip decision uses the flat normal; the vertex
/// normals carried over are the mesh's own.
pub fn normals_facing(mesh: &Mesh, camera: Point3D) -> Mesh {
  mesh.map_faces(|face| {
    let mut face = *face;
    if faces_away(&face, camera) {
      face.vertices.reverse();
      for vertex in face.vertices.iter_mut() {
        vertex.normal = -vertex.normal;
      }
    }
    face
  })
}
