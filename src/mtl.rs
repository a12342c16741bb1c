//! A parser for Wavefront's `.mtl` material library format.
//!
//! Supported directives are `newmtl`, `Ka`, `Kd`, `Ks`, `Ns`, `d` and `Tr`.
//! Anything else is reported and skipped; parsing never stops early.
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::fs::read_top_level;
use crate::lex::{self, ParseError, Scanner};
use crate::material::{Color, Material, MaterialId, MaterialLibrary};

#[derive(Clone, Copy, Debug)]
enum ColorSlot {
  Ambient,
  Diffuse,
  Specular,
}

struct Parser {
  line_number: usize,
  library: MaterialLibrary,
  current: Option<MaterialId>,
  errors: Vec<ParseError>,
}

impl Parser {
  fn new() -> Parser {
    Parser {
      line_number: 0,
      library: MaterialLibrary::new(),
      current: None,
      errors: Vec::new(),
    }
  }

  fn error<E: Into<String>>(&mut self, msg: E) {
    self.errors.push(ParseError {
      line_number: self.line_number,
      message: msg.into(),
    });
  }

  fn parse_line(&mut self, line_number: usize, line: &str) {
    self.line_number = line_number;
    let mut scanner = Scanner::new(line);
    let tag = match scanner.scan_word() {
      Some(tag) => tag,
      None => return,
    };

    match tag {
      "newmtl" => self.parse_newmtl(&mut scanner),
      "Ka" | "Kd" | "Ks" | "Ns" | "d" | "Tr" => {
        let id = match self.current {
          Some(id) => id,
          None => {
            self.error(format!("`{}` directive outside any material", tag));
            return;
          }
        };
        match tag {
          "Ka" => self.parse_color(id, ColorSlot::Ambient, &mut scanner),
          "Kd" => self.parse_color(id, ColorSlot::Diffuse, &mut scanner),
          "Ks" => self.parse_color(id, ColorSlot::Specular, &mut scanner),
          "Ns" => self.parse_scalar(tag, &mut scanner, |m, x| m.specular_exponent = x, id),
          // `d` is dissolve: 1 is fully opaque.
          "d" => self.parse_scalar(tag, &mut scanner, |m, x| m.transparency = 1. - x, id),
          _ => self.parse_scalar(tag, &mut scanner, |m, x| m.transparency = x, id),
        }
      }
      _ => self.error(format!("unsupported directive `{}`", tag)),
    }
  }

  fn parse_newmtl(&mut self, scanner: &mut Scanner<'_>) {
    let name = match scanner.remainder() {
      Some(name) => name,
      None => {
        self.error("newmtl issued, but no name provided");
        self.current = None;
        return;
      }
    };

    let (id, previous) = self.library.insert(Material::new(name));
    if previous.is_some() {
      self.error(format!(
        "material `{}` is defined more than once; the later definition replaces the earlier one",
        name
      ));
    }
    self.current = Some(id);
  }

  /// `r g b`, or a single value used for all three channels.
  fn parse_color(&mut self, id: MaterialId, slot: ColorSlot, scanner: &mut Scanner<'_>) {
    let r = match scanner.expect_double() {
      Ok(r) => r,
      Err(e) => return self.error(e),
    };
    let (g, b) = if scanner.is_at_end() {
      (r, r)
    } else {
      match (scanner.expect_double(), scanner.expect_double()) {
        (Ok(g), Ok(b)) => (g, b),
        (Err(e), _) | (_, Err(e)) => return self.error(e),
      }
    };

    let color = Color::rgb(r as f32, g as f32, b as f32);
    if let Some(material) = self.library.get_mut(id) {
      match slot {
        ColorSlot::Ambient => material.ambient_color = color,
        ColorSlot::Diffuse => material.diffuse_color = color,
        ColorSlot::Specular => material.specular_color = color,
      }
    }

    if let Err(e) = scanner.expect_end() {
      self.error(e);
    }
  }

  fn parse_scalar<F>(&mut self, tag: &str, scanner: &mut Scanner<'_>, set: F, id: MaterialId)
  where
    F: FnOnce(&mut Material, f32),
  {
    let value = match scanner.expect_double() {
      Ok(value) => value,
      Err(e) => return self.error(format!("`{}`: {}", tag, e)),
    };
    if let Some(material) = self.library.get_mut(id) {
      set(material, value as f32);
    }

    if let Err(e) = scanner.expect_end() {
      self.error(e);
    }
  }

  fn finish(self) -> (MaterialLibrary, Vec<ParseError>) {
    (self.library, self.errors)
  }
}

pub(crate) fn parse_with_errors(input: &[u8]) -> (MaterialLibrary, Vec<ParseError>) {
  let text = String::from_utf8_lossy(input);
  let mut parser = Parser::new();
  for (line_number, line) in lex::lines(&text) {
    parser.parse_line(line_number, line);
  }
  parser.finish()
}

/// Parses a material library.
///
/// Always produces a library, possibly empty. Problems are described in the
/// returned diagnostics, in the order they were found.
pub fn parse<B: AsRef<[u8]>>(input: B) -> (MaterialLibrary, Vec<String>) {
  let (library, errors) = parse_with_errors(input.as_ref());
  debug!(
    materials = library.len(),
    diagnostics = errors.len(),
    "parsed material library"
  );
  (library, errors.iter().map(ToString::to_string).collect())
}

/// Reads and parses the material library at `path`.
///
/// Fails only if the file itself cannot be read.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(MaterialLibrary, Vec<String>), LoadError> {
  let data = read_top_level(path.as_ref())?;
  Ok(parse(data))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_every_supported_directive() {
    let input = "
# a comment
newmtl Red Brick
Ka 0.1 0.0 0.0
Kd 0.8 0.1 0.1
Ks 1 1 1
Ns 96.5
d 0.25
";
    let (lib, errors) = parse(input);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(lib.len(), 1);

    let m = lib.by_name("Red Brick").unwrap();
    assert_eq!(m.ambient_color, Color::rgb(0.1, 0., 0.));
    assert_eq!(m.diffuse_color, Color::rgb(0.8, 0.1, 0.1));
    assert_eq!(m.specular_color, Color::rgb(1., 1., 1.));
    assert_eq!(m.specular_exponent, 96.5);
    assert_eq!(m.transparency, 0.75);
  }

  #[test]
  fn defaults_apply_until_set() {
    let (lib, errors) = parse("newmtl plain\nnewmtl shiny\nNs 10\n");
    assert!(errors.is_empty());
    assert_eq!(lib.by_name("plain"), Some(&Material::new("plain")));
    assert_eq!(lib.by_name("shiny").unwrap().specular_exponent, 10.);
  }

  #[test]
  fn last_transparency_directive_wins() {
    let (lib, _) = parse("newmtl glass\nd 0.5\nTr 0.75\n");
    assert_eq!(lib.by_name("glass").unwrap().transparency, 0.75);

    let (lib, _) = parse("newmtl glass\nTr 0.75\nd 0.25\n");
    assert_eq!(lib.by_name("glass").unwrap().transparency, 0.75);

    let (lib, _) = parse("newmtl glass\nTr 0.75\nd 0.9\n");
    assert!((lib.by_name("glass").unwrap().transparency - 0.1).abs() < 1e-6);
  }

  #[test]
  fn full_dissolve_is_opaque() {
    let (lib, errors) = parse("newmtl solid\nd 1.0\n");
    assert!(errors.is_empty());
    assert_eq!(lib.by_name("solid").unwrap().transparency, 0.);

    let (lib, _) = parse("newmtl ghost\nd 0\n");
    assert_eq!(lib.by_name("ghost").unwrap().transparency, 1.);
  }

  #[test]
  fn single_value_colors_fill_every_channel() {
    let (lib, errors) = parse("newmtl grey\nKd 0.5\n");
    assert!(errors.is_empty());
    assert_eq!(lib.by_name("grey").unwrap().diffuse_color, Color::rgb(0.5, 0.5, 0.5));
  }

  #[test]
  fn malformed_colors_leave_the_old_value() {
    let (lib, errors) = parse("newmtl m\nKd 0.2 0.2 0.2\nKd 1 x 1\nKa 1 1\n");
    assert_eq!(
      errors,
      vec![
        "line 3: expected a number but got `x`".to_owned(),
        "line 4: expected a number but got end of line".to_owned(),
      ]
    );
    let m = lib.by_name("m").unwrap();
    assert_eq!(m.diffuse_color, Color::rgb(0.2, 0.2, 0.2));
    assert_eq!(m.ambient_color, Color::BLACK);
  }

  #[test]
  fn directives_before_newmtl_are_ignored() {
    let (lib, errors) = parse("Kd 1 0 0\nNs 4\nnewmtl m\n");
    assert_eq!(
      errors,
      vec![
        "line 1: `Kd` directive outside any material".to_owned(),
        "line 2: `Ns` directive outside any material".to_owned(),
      ]
    );
    assert_eq!(lib.by_name("m").unwrap().diffuse_color, Color::BLACK);
  }

  #[test]
  fn unknown_directives_are_reported_and_skipped() {
    let (lib, errors) = parse("newmtl m\nillum 2\nmap_Kd brick.png\nKd 1 1 1\n");
    assert_eq!(
      errors,
      vec![
        "line 2: unsupported directive `illum`".to_owned(),
        "line 3: unsupported directive `map_Kd`".to_owned(),
      ]
    );
    assert_eq!(lib.by_name("m").unwrap().diffuse_color, Color::rgb(1., 1., 1.));
  }

  #[test]
  fn redefinition_replaces_and_warns() {
    let (lib, errors) = parse("newmtl m\nKd 1 0 0\nnewmtl m\nKd 0 1 0\n");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("line 3: material `m` is defined more than once"));
    assert_eq!(lib.len(), 1);
    assert_eq!(lib.by_name("m").unwrap().diffuse_color, Color::rgb(0., 1., 0.));
  }

  #[test]
  fn trailing_tokens_are_reported_but_applied() {
    let (lib, errors) = parse("newmtl m\nNs 5 6\n");
    assert_eq!(errors, vec!["line 2: unexpected `6` at end of directive".to_owned()]);
    assert_eq!(lib.by_name("m").unwrap().specular_exponent, 5.);
  }

  #[test]
  fn scalar_errors_name_the_directive() {
    let (_, errors) = parse("newmtl m\nNs\nd high\n");
    assert_eq!(
      errors,
      vec![
        "line 2: `Ns`: expected a number but got end of line".to_owned(),
        "line 3: `d`: expected a number but got `high`".to_owned(),
      ]
    );
  }

  #[test]
  fn garbage_yields_an_empty_library() {
    let (lib, errors) = parse(&b"\xff\xfe garbage\nnewmtl\n"[..]);
    assert!(lib.is_empty());
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1], "line 2: newmtl issued, but no name provided");
  }

  #[test]
  fn files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mtl");
    std::fs::write(&path, "newmtl m\nKd 1 1 1\n").unwrap();
    let (lib, errors) = parse_file(&path).unwrap();
    assert!(errors.is_empty());
    assert_eq!(lib.len(), 1);

    assert!(parse_file(dir.path().join("nope.mtl")).is_err());
  }
}
