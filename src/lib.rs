//! Parsers for wavefront's `.obj` and `.mtl` file format for loading meshes.
//!
//! `obj::parse_file` (or `obj::parse_with`, for callers that supply their own
//! file access) turns an `.obj` file into a `Mesh` of triangles, pulling in the
//! materials of every `mtllib` it names. Parsing never gives up half way:
//! anything malformed is skipped and described in a list of diagnostics that
//! comes back with the mesh.
//!
//! The `normals` module derives flat-shaded or camera-facing copies of a mesh.
#![crate_type = "lib"]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]

pub use error::LoadError;
pub use fs::{FileLoader, FsLoader};
pub use geometry::{Point2D, Point3D, Vector3D, Vertex};
pub use material::{Color, Material, MaterialId, MaterialLibrary, SharedMaterials};
pub use mesh::{Face, Mesh, MeshError};

mod lex;
mod util;

mod context;
pub mod display;
pub mod error;
pub mod fs;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod mtl;
pub mod normals;
pub mod obj;
