//! Points, vectors and vertices.
use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use crate::util::fuzzy_cmp_all;

/// A position in 3D space.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Point3D {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// A point on a 2D texture.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Point2D {
  pub x: f64,
  pub y: f64,
}

/// A direction (or displacement) in 3D space.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Vector3D {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// One corner of a face. Vertices are plain values; every face owns its own
/// three copies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
  /// Where the corner is.
  pub point: Point3D,
  /// Texture coordinate, zero if the file gave none.
  pub texcoord: Point2D,
  /// Vertex normal, zero if the file gave none.
  pub normal: Vector3D,
}

impl Point3D {
  /// Builds a point from its coordinates.
  pub fn new(x: f64, y: f64, z: f64) -> Point3D {
    Point3D { x, y, z }
  }
}

impl Point2D {
  /// Builds a texture coordinate.
  pub fn new(x: f64, y: f64) -> Point2D {
    Point2D { x, y }
  }
}

impl Vector3D {
  /// Builds a vector from its components.
  pub fn new(x: f64, y: f64, z: f64) -> Vector3D {
    Vector3D { x, y, z }
  }

  /// Dot product.
  pub fn dot(&self, other: &Vector3D) -> f64 {
    self.x * other.x + self.y * other.y + self.z * other.z
  }

  /// Cross product, following the right hand rule.
  pub fn cross(&self, other: &Vector3D) -> Vector3D {
    Vector3D {
      x: self.y * other.z - self.z * other.y,
      y: self.z * other.x - self.x * other.z,
      z: self.x * other.y - self.y * other.x,
    }
  }

  /// Euclidean length.
  pub fn length(&self) -> f64 {
    self.dot(self).sqrt()
  }

  /// The unit vector pointing the same way, or `None` if this vector has no
  /// direction (zero length, or non-finite components).
  pub fn normalize(&self) -> Option<Vector3D> {
    let length = self.length();
    if length == 0.0 || !length.is_finite() {
      None
    } else {
      Some(*self * (1.0 / length))
    }
  }

  /// True if every component is exactly zero.
  pub fn is_zero(&self) -> bool {
    self.x == 0.0 && self.y == 0.0 && self.z == 0.0
  }
}

impl Sub for Point3D {
  type Output = Vector3D;

  fn sub(self, other: Point3D) -> Vector3D {
    Vector3D {
      x: self.x - other.x,
      y: self.y - other.y,
      z: self.z - other.z,
    }
  }
}

impl Add<Vector3D> for Point3D {
  type Output = Point3D;

  fn add(self, v: Vector3D) -> Point3D {
    Point3D {
      x: self.x + v.x,
      y: self.y + v.y,
      z: self.z + v.z,
    }
  }
}

impl Neg for Vector3D {
  type Output = Vector3D;

  fn neg(self) -> Vector3D {
    Vector3D {
      x: -self.x,
      y: -self.y,
      z: -self.z,
    }
  }
}

impl Mul<f64> for Vector3D {
  type Output = Vector3D;

  fn mul(self, s: f64) -> Vector3D {
    Vector3D {
      x: self.x * s,
      y: self.y * s,
      z: self.z * s,
    }
  }
}

// Coordinates come out of text and arithmetic, so equality is approximate.
impl PartialEq for Point3D {
  fn eq(&self, other: &Point3D) -> bool {
    self.partial_cmp(other) == Some(Ordering::Equal)
  }
}

impl PartialOrd for Point3D {
  fn partial_cmp(&self, other: &Point3D) -> Option<Ordering> {
    fuzzy_cmp_all(&[self.x, self.y, self.z], &[other.x, other.y, other.z])
  }
}

impl PartialEq for Point2D {
  fn eq(&self, other: &Point2D) -> bool {
    self.partial_cmp(other) == Some(Ordering::Equal)
  }
}

impl PartialOrd for Point2D {
  fn partial_cmp(&self, other: &Point2D) -> Option<Ordering> {
    fuzzy_cmp_all(&[self.x, self.y], &[other.x, other.y])
  }
}

impl PartialEq for Vector3D {
  fn eq(&self, other: &Vector3D) -> bool {
    self.partial_cmp(other) == Some(Ordering::Equal)
  }
}

impl PartialOrd for Vector3D {
  fn partial_cmp(&self, other: &Vector3D) -> Option<Ordering> {
    fuzzy_cmp_all(&[self.x, self.y, self.z], &[other.x, other.y, other.z])
  }
}
