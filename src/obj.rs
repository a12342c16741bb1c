//! A parser for Wavefront's `.obj` file format for storing 3D meshes.
//!
//! The parser is tolerant: given complete garbage it still returns a (probably
//! empty) mesh, along with a diagnostic for everything it could not make sense
//! of.
use std::io;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::context::Context;
use crate::error::LoadError;
use crate::fs::{read_top_level, FileLoader, FsLoader};
use crate::geometry::{Point2D, Point3D, Vector3D, Vertex};
use crate::lex::{self, Scanner};
use crate::mesh::Mesh;
use crate::mtl;

/// What to do with faces that have more than three corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Triangulation {
  /// Split an n-gon into n-2 triangles fanning out from its first corner.
  Fan,
  /// Report such faces and skip them.
  TrianglesOnly,
}

impl Default for Triangulation {
  fn default() -> Triangulation {
    Triangulation::Fan
  }
}

/// Settings for an `.obj` parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
  /// How polygons are broken into triangles.
  pub triangulation: Triangulation,
}

/// Fans `xs` around its first element: `0,1,2`, `0,2,3`, ...
fn to_triangles(xs: &[Vertex]) -> Vec<[Vertex; 3]> {
  let first = match xs.first() {
    Some(&first) => first,
    None => return vec![],
  };

  xs[1..]
    .iter()
    .zip(xs.iter().skip(2))
    .map(|(&x, &y)| [first, x, y])
    .collect()
}

fn parse_index(s: &str) -> Result<isize, String> {
  lexical::parse(s).map_err(|_| format!("expected an index but got `{}`", s))
}

fn parse_xyz(scanner: &mut Scanner<'_>) -> Result<(f64, f64, f64), String> {
  let x = scanner.expect_double()?;
  let y = scanner.expect_double()?;
  let z = scanner.expect_double()?;
  Ok((x, y, z))
}

struct Parser<'a, L: ?Sized> {
  material_dir: &'a Path,
  loader: &'a L,
  options: &'a Options,
  context: Context,
}

impl<'a, L> Parser<'a, L>
where
  L: FileLoader + ?Sized,
{
  fn parse_line(&mut self, line_number: usize, line: &str) {
    self.context.set_line(line_number);
    let mut scanner = Scanner::new(line);
    let tag = match scanner.scan_word() {
      Some(tag) => tag,
      None => return,
    };

    match tag {
      "v" => self.parse_vertex(&mut scanner),
      "vt" => self.parse_tex_vertex(&mut scanner),
      "vn" => self.parse_normal(&mut scanner),
      "f" => self.parse_face(&mut scanner),
      "mtllib" => self.parse_mtllib(&mut scanner),
      "usemtl" => self.parse_usemtl(&mut scanner),
      "s" => self.parse_smoothing(line_number, &mut scanner),
      "g" | "o" => {
        let name = scanner.remainder().unwrap_or("");
        trace!(line = line_number, tag, name, "ignoring grouping directive");
      }
      _ => trace!(line = line_number, tag, "ignoring unsupported directive"),
    }
  }

  /// Trailing words are reported, but don't undo the directive.
  fn check_end(&mut self, scanner: &mut Scanner<'_>) {
    if let Err(e) = scanner.expect_end() {
      self.context.error(e);
    }
  }

  fn parse_vertex(&mut self, scanner: &mut Scanner<'_>) {
    match parse_xyz(scanner) {
      Ok((x, y, z)) => {
        // w
        let _ = scanner.scan_double();
        self.context.add_position(Point3D::new(x, y, z));
        self.check_end(scanner);
      }
      Err(e) => self.context.error(format!("`v`: {}", e)),
    }
  }

  fn parse_tex_vertex(&mut self, scanner: &mut Scanner<'_>) {
    let u = match scanner.expect_double() {
      Ok(u) => u,
      Err(e) => return self.context.error(format!("`vt`: {}", e)),
    };
    let v = if scanner.is_at_end() {
      0.
    } else {
      match scanner.expect_double() {
        Ok(v) => v,
        Err(e) => return self.context.error(format!("`vt`: {}", e)),
      }
    };
    // w
    let _ = scanner.scan_double();
    self.context.add_tex_coord(Point2D::new(u, v));
    self.check_end(scanner);
  }

  fn parse_normal(&mut self, scanner: &mut Scanner<'_>) {
    match parse_xyz(scanner) {
      Ok((x, y, z)) => {
        self.context.add_normal(Vector3D::new(x, y, z));
        self.check_end(scanner);
      }
      Err(e) => self.context.error(format!("`vn`: {}", e)),
    }
  }

  /// One `v`, `v/vt`, `v/vt/vn` or `v//vn` corner of a face.
  fn parse_corner(&self, token: &str) -> Result<Vertex, String> {
    if token.matches('/').count() > 2 {
      return Err(format!("face vertex `{}` has more than 3 indices", token));
    }
    let mut splits = token.split('/');

    let point = match splits.next() {
      Some(s) if !s.is_empty() => self.context.position(parse_index(s)?)?,
      _ => return Err(format!("face vertex `{}` has no position index", token)),
    };
    let texcoord = match splits.next() {
      Some(s) if !s.is_empty() => self.context.tex_coord(parse_index(s)?)?,
      _ => Point2D::default(),
    };
    let normal = match splits.next() {
      Some(s) if !s.is_empty() => self.context.normal(parse_index(s)?)?,
      _ => Vector3D::default(),
    };

    Ok(Vertex {
      point,
      texcoord,
      normal,
    })
  }

  fn parse_face(&mut self, scanner: &mut Scanner<'_>) {
    let mut corners = Vec::new();
    while let Some(token) = scanner.scan_word() {
      match self.parse_corner(token) {
        Ok(corner) => corners.push(corner),
        Err(e) => return self.context.error(format!("{}; face skipped", e)),
      }
    }

    if corners.len() < 3 {
      return self.context.error(format!(
        "face needs at least 3 vertices but has {}; face skipped",
        corners.len()
      ));
    }
    if corners.len() > 3 && self.options.triangulation == Triangulation::TrianglesOnly {
      return self.context.error(format!(
        "face has {} vertices but only triangles are accepted; face skipped",
        corners.len()
      ));
    }

    for triangle in to_triangles(&corners) {
      self.context.add_face(triangle);
    }
  }

  fn parse_mtllib(&mut self, scanner: &mut Scanner<'_>) {
    let names = match scanner.remainder() {
      Some(names) => names,
      None => return self.context.error("mtllib issued, but no file name provided"),
    };

    if !names.contains(char::is_whitespace) {
      return match self.loader.load(&self.material_dir.join(names)) {
        Ok(data) => self.add_library(names, &data),
        Err(e) => self.library_not_loaded(names, &e),
      };
    }

    // A file name with spaces in it, or a list of names?
    let whole = match self.loader.load(&self.material_dir.join(names)) {
      Ok(data) => return self.add_library(names, &data),
      Err(e) => e,
    };
    let loaded: Vec<_> = names
      .split_whitespace()
      .map(|name| (name, self.loader.load(&self.material_dir.join(name))))
      .collect();

    // Nothing loaded either way: report the line as the one file it names.
    if loaded.iter().all(|(_, result)| result.is_err()) {
      return self.library_not_loaded(names, &whole);
    }
    for (name, result) in loaded {
      match result {
        Ok(data) => self.add_library(name, &data),
        Err(e) => self.library_not_loaded(name, &e),
      }
    }
  }

  fn library_not_loaded(&mut self, name: &str, e: &io::Error) {
    warn!(file = name, error = %e, "could not load material library");
    self
      .context
      .error(format!("could not load material library {}: {}", name, e));
  }

  fn add_library(&mut self, name: &str, data: &[u8]) {
    let (library, errors) = mtl::parse_with_errors(data);
    debug!(
      file = name,
      materials = library.len(),
      diagnostics = errors.len(),
      "loaded material library"
    );
    self.context.library_errors(name, errors);
    self.context.add_materials(name, library);
  }

  fn parse_usemtl(&mut self, scanner: &mut Scanner<'_>) {
    match scanner.remainder() {
      Some(name) => self.context.set_material(name),
      None => {
        self.context.clear_material();
        self.context.error("usemtl issued, but no material name provided");
      }
    }
  }

  fn parse_smoothing(&mut self, line_number: usize, scanner: &mut Scanner<'_>) {
    let smooth = scanner.scan_on_off().or_else(|| {
      scanner
        .scan_word()
        .and_then(|w| lexical::parse::<u32, _>(w).ok())
        .map(|group| group != 0)
    });
    trace!(line = line_number, ?smooth, "ignoring smoothing group");
  }
}

/// Parses `.obj` data, loading any `mtllib` files it names from
/// `material_dir` on the local file system.
///
/// See `parse_with`.
pub fn parse<B: AsRef<[u8]>>(input: B, material_dir: &Path) -> (Mesh, Vec<String>) {
  parse_with(input, material_dir, &FsLoader, &Options::default())
}

/// Parses `.obj` data into a mesh.
///
/// `mtllib` files are resolved against `material_dir` and read through
/// `loader`. This never fails: whatever could be understood ends up in the
/// mesh, and everything else is described by the returned diagnostics, in the
/// order it was found.
pub fn parse_with<B, L>(
  input: B,
  material_dir: &Path,
  loader: &L,
  options: &Options,
) -> (Mesh, Vec<String>)
where
  B: AsRef<[u8]>,
  L: FileLoader + ?Sized,
{
  let text = String::from_utf8_lossy(input.as_ref());
  let mut parser = Parser {
    material_dir,
    loader,
    options,
    context: Context::new(),
  };
  for (line_number, line) in lex::lines(&text) {
    parser.parse_line(line_number, line);
  }

  let (mesh, diagnostics) = parser.context.finish();
  debug!(
    faces = mesh.num_faces(),
    materials = mesh.materials().len(),
    diagnostics = diagnostics.len(),
    "parsed mesh"
  );
  (mesh, diagnostics)
}

/// Reads and parses the `.obj` file at `path`, looking for material libraries
/// next to it.
///
/// Fails only if `path` itself cannot be read.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(Mesh, Vec<String>), LoadError> {
  let path = path.as_ref();
  let data = read_top_level(path)?;
  let material_dir = path.parent().unwrap_or_else(|| Path::new(""));
  Ok(parse(data, material_dir))
}
