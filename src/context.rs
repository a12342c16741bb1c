use crate::geometry::{Point2D, Point3D, Vector3D, Vertex};
use crate::lex::ParseError;
use crate::material::{MaterialId, MaterialLibrary, SharedMaterials};
use crate::mesh::Mesh;

/// Running state of an `.obj` parse: the attribute pools faces index into,
/// the materials seen so far, and the mesh being built.
pub(crate) struct Context {
  positions: Vec<Point3D>,
  tex_coords: Vec<Point2D>,
  normals: Vec<Vector3D>,

  library: MaterialLibrary,
  current_material: Option<MaterialId>,

  mesh: Mesh,
  diagnostics: Vec<String>,
  line_number: usize,
}

/// Turns a 1-based or negative (counting back from the end) index into a
/// position in a pool of `len` entries.
pub(crate) fn resolve_index(raw: isize, len: usize) -> Option<usize> {
  if raw > 0 {
    let i = (raw - 1) as usize;
    if i < len {
      Some(i)
    } else {
      None
    }
  } else if raw < 0 {
    let back = raw.checked_neg()? as usize;
    if back <= len {
      Some(len - back)
    } else {
      None
    }
  } else {
    None
  }
}

fn lookup<T: Copy>(pool: &[T], raw: isize, what: (&str, &str)) -> Result<T, String> {
  resolve_index(raw, pool.len())
    .map(|i| pool[i])
    .ok_or_else(|| {
      format!(
        "{} index {} is out of range; {} {} defined so far",
        what.0,
        raw,
        pool.len(),
        what.1
      )
    })
}

impl Context {
  pub(crate) fn new() -> Self {
    Context {
      positions: vec![],
      tex_coords: vec![],
      normals: vec![],
      library: MaterialLibrary::new(),
      current_material: None,
      mesh: Mesh::new(),
      diagnostics: vec![],
      line_number: 0,
    }
  }

  pub(crate) fn set_line(&mut self, line_number: usize) {
    self.line_number = line_number;
  }

  pub(crate) fn error<E: Into<String>>(&mut self, msg: E) {
    let error = ParseError {
      line_number: self.line_number,
      message: msg.into(),
    };
    self.diagnostics.push(error.to_string());
  }

  /// Records diagnostics from a material library, tagged with its file name.
  pub(crate) fn library_errors(&mut self, file: &str, errors: Vec<ParseError>) {
    self
      .diagnostics
      .extend(errors.into_iter().map(|e| format!("{}: {}", file, e)));
  }

  pub(crate) fn add_position(&mut self, p: Point3D) {
    self.positions.push(p);
  }

  pub(crate) fn add_tex_coord(&mut self, t: Point2D) {
    self.tex_coords.push(t);
  }

  pub(crate) fn add_normal(&mut self, n: Vector3D) {
    self.normals.push(n);
  }

  pub(crate) fn position(&self, raw: isize) -> Result<Point3D, String> {
    lookup(&self.positions, raw, ("vertex", "vertices"))
  }

  pub(crate) fn tex_coord(&self, raw: isize) -> Result<Point2D, String> {
    lookup(&self.tex_coords, raw, ("texture coordinate", "texture coordinates"))
  }

  pub(crate) fn normal(&self, raw: isize) -> Result<Vector3D, String> {
    lookup(&self.normals, raw, ("normal", "normals"))
  }

  /// Merges a loaded material library into the running one. Later
  /// definitions replace earlier ones of the same name.
  pub(crate) fn add_materials(&mut self, file: &str, library: MaterialLibrary) {
    for material in library {
      let name = material.name().to_owned();
      let (_, previous) = self.library.insert(material);
      if previous.is_some() {
        self.error(format!(
          "material `{}` from {} replaces an earlier definition",
          name, file
        ));
      }
    }
  }

  /// Switches the current material. An unknown name clears it, so following
  /// faces get no material rather than the previous one.
  pub(crate) fn set_material(&mut self, name: &str) {
    self.current_material = self.library.lookup(name);
    if self.current_material.is_none() {
      self.error(format!("unknown material `{}`", name));
    }
  }

  pub(crate) fn clear_material(&mut self) {
    self.current_material = None;
  }

  pub(crate) fn add_face(&mut self, vertices: [Vertex; 3]) {
    self.mesh.add_face(vertices, self.current_material);
  }

  pub(crate) fn finish(self) -> (Mesh, Vec<String>) {
    let mut mesh = self.mesh;
    mesh.set_materials(SharedMaterials::new(self.library));
    (mesh, self.diagnostics)
  }
}
