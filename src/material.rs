//! Surface materials and the registries that own them.
//!
//! Materials live in an arena (`MaterialLibrary`). Faces refer to them by
//! `MaterialId`, so any number of faces can share one material without
//! copying it.
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An RGBA color with components nominally in `[0, 1]`.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  pub a: f32,
}

impl Color {
  /// Opaque black, the starting value of every material color.
  pub const BLACK: Color = Color {
    r: 0.,
    g: 0.,
    b: 0.,
    a: 1.,
  };

  /// An opaque color.
  pub fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1. }
  }
}

impl Default for Color {
  fn default() -> Color {
    Color::BLACK
  }
}

/// The lighting properties of a surface, as declared by one `newmtl` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
  name: String,
  /// `Ka`
  pub ambient_color: Color,
  /// `Kd`
  pub diffuse_color: Color,
  /// `Ks`
  pub specular_color: Color,
  /// `Ns`
  pub specular_exponent: f32,
  /// `Tr`, or `1 - d`, whichever came last. `0` is fully opaque.
  pub transparency: f32,
}

impl Material {
  /// A material with black colors, no specular exponent and no transparency.
  pub fn new<S: Into<String>>(name: S) -> Material {
    Material {
      name: name.into(),
      ambient_color: Color::BLACK,
      diffuse_color: Color::BLACK,
      specular_color: Color::BLACK,
      specular_exponent: 0.,
      transparency: 0.,
    }
  }

  /// The material's name. Names never change once a material exists.
  pub fn name(&self) -> &str {
    &self.name
  }
}

/// A handle to a material stored in a `MaterialLibrary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MaterialId {
  /// Position of the material in its library's arena.
  pub fn index(self) -> usize {
    self.0
  }
}

/// Materials keyed by name. Names are case sensitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialLibrary {
  materials: Vec<Material>,
  by_name: HashMap<String, MaterialId>,
}

impl MaterialLibrary {
  /// An empty library.
  pub fn new() -> MaterialLibrary {
    MaterialLibrary::default()
  }

  /// Adds `material` under its name. A material already registered under that
  /// name is overwritten in place, keeping its id, and is handed back.
  pub fn insert(&mut self, material: Material) -> (MaterialId, Option<Material>) {
    match self.by_name.get(material.name()) {
      Some(&id) => {
        let previous = std::mem::replace(&mut self.materials[id.0], material);
        (id, Some(previous))
      }
      None => {
        let id = MaterialId(self.materials.len());
        self.by_name.insert(material.name.clone(), id);
        self.materials.push(material);
        (id, None)
      }
    }
  }

  /// Finds the id of the material called `name`.
  pub fn lookup(&self, name: &str) -> Option<MaterialId> {
    self.by_name.get(name).copied()
  }

  /// The material called `name`.
  pub fn by_name(&self, name: &str) -> Option<&Material> {
    self.lookup(name).and_then(|id| self.get(id))
  }

  /// The material behind `id`.
  pub fn get(&self, id: MaterialId) -> Option<&Material> {
    self.materials.get(id.0)
  }

  /// Mutable access to the material behind `id`. The name stays fixed.
  pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
    self.materials.get_mut(id.0)
  }

  /// Number of distinct material names.
  pub fn len(&self) -> usize {
    self.materials.len()
  }

  /// True if the library holds no materials.
  pub fn is_empty(&self) -> bool {
    self.materials.is_empty()
  }

  /// All materials with their ids, in arena order.
  pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
    self
      .materials
      .iter()
      .enumerate()
      .map(|(i, m)| (MaterialId(i), m))
  }
}

impl IntoIterator for MaterialLibrary {
  type Item = Material;
  type IntoIter = std::vec::IntoIter<Material>;

  fn into_iter(self) -> Self::IntoIter {
    self.materials.into_iter()
  }
}

/// A material library owned jointly by a mesh and all of its copies.
///
/// Cloning this shares the library: a change made through one clone is seen by
/// every other.
#[derive(Clone, Debug, Default)]
pub struct SharedMaterials(Arc<RwLock<MaterialLibrary>>);

impl SharedMaterials {
  /// Wraps `library` for sharing.
  pub fn new(library: MaterialLibrary) -> SharedMaterials {
    SharedMaterials(Arc::new(RwLock::new(library)))
  }

  /// Read access to the whole library.
  pub fn read(&self) -> RwLockReadGuard<'_, MaterialLibrary> {
    // Materials have no invariants a panicking writer could break.
    self.0.read().unwrap_or_else(PoisonError::into_inner)
  }

  /// Write access to the whole library.
  pub fn write(&self) -> RwLockWriteGuard<'_, MaterialLibrary> {
    self.0.write().unwrap_or_else(PoisonError::into_inner)
  }

  /// A snapshot of the material behind `id`.
  pub fn get(&self, id: MaterialId) -> Option<Material> {
    self.read().get(id).cloned()
  }

  /// Finds the id of the material called `name`.
  pub fn lookup(&self, name: &str) -> Option<MaterialId> {
    self.read().lookup(name)
  }

  /// Runs `f` on the material behind `id`, returning its result, or `None`
  /// if there is no such material.
  pub fn update<R, F>(&self, id: MaterialId, f: F) -> Option<R>
  where
    F: FnOnce(&mut Material) -> R,
  {
    self.write().get_mut(id).map(f)
  }

  /// Number of materials.
  pub fn len(&self) -> usize {
    self.read().len()
  }

  /// True if there are no materials.
  pub fn is_empty(&self) -> bool {
    self.read().is_empty()
  }

  /// True if both handles point at the same library.
  pub fn ptr_eq(&self, other: &SharedMaterials) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl From<MaterialLibrary> for SharedMaterials {
  fn from(library: MaterialLibrary) -> SharedMaterials {
    SharedMaterials::new(library)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_materials_are_opaque_black() {
    let m = Material::new("Red Brick");
    assert_eq!(m.name(), "Red Brick");
    assert_eq!(m.ambient_color, Color::BLACK);
    assert_eq!(m.diffuse_color, Color::rgb(0., 0., 0.));
    assert_eq!(m.specular_color.a, 1.);
    assert_eq!(m.specular_exponent, 0.);
    assert_eq!(m.transparency, 0.);
  }

  #[test]
  fn insert_and_lookup() {
    let mut lib = MaterialLibrary::new();
    let (red, previous) = lib.insert(Material::new("red"));
    assert!(previous.is_none());
    let (blue, _) = lib.insert(Material::new("blue"));

    assert_ne!(red, blue);
    assert_eq!(lib.len(), 2);
    assert_eq!(lib.lookup("red"), Some(red));
    assert_eq!(lib.lookup("Red"), None);
    assert_eq!(lib.by_name("blue").map(Material::name), Some("blue"));
  }

  #[test]
  fn duplicate_names_overwrite_the_slot() {
    let mut lib = MaterialLibrary::new();
    let mut first = Material::new("red");
    first.diffuse_color = Color::rgb(1., 0., 0.);
    let (id, _) = lib.insert(first.clone());

    let (again, previous) = lib.insert(Material::new("red"));
    assert_eq!(again, id);
    assert_eq!(previous, Some(first));
    assert_eq!(lib.len(), 1);
    assert_eq!(lib.get(id).unwrap().diffuse_color, Color::BLACK);
  }

  #[test]
  fn shared_updates_are_visible_through_every_clone() {
    let mut lib = MaterialLibrary::new();
    let (id, _) = lib.insert(Material::new("red"));
    let a = SharedMaterials::new(lib);
    let b = a.clone();
    assert!(a.ptr_eq(&b));

    a.update(id, |m| m.diffuse_color = Color::rgb(1., 0., 0.));
    assert_eq!(b.get(id).unwrap().diffuse_color, Color::rgb(1., 0., 0.));
    assert_eq!(b.lookup("red"), Some(id));
    assert_eq!(b.update(MaterialId(9), |_| ()), None);
  }
}
