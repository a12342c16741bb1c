use std::io;
use std::path::Path;

use proptest::prelude::*;

use wavefront_mesh::normals::{compute_flat_normal, normals_facing};
use wavefront_mesh::obj::{self, Options};
use wavefront_mesh::{Face, Mesh, Point3D, Vertex};

fn no_files(path: &Path) -> io::Result<Vec<u8>> {
  Err(io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
}

fn parse(input: &str) -> (Mesh, Vec<String>) {
  obj::parse_with(input, Path::new(""), &no_files, &Options::default())
}

fn coord() -> impl Strategy<Value = f64> {
  -100.0..100.0f64
}

fn point() -> impl Strategy<Value = Point3D> {
  (coord(), coord(), coord()).prop_map(|(x, y, z)| Point3D::new(x, y, z))
}

fn triangle() -> impl Strategy<Value = Face> {
  (point(), point(), point()).prop_map(|(a, b, c)| {
    let corner = |point| Vertex {
      point,
      ..Vertex::default()
    };
    Face {
      vertices: [corner(a), corner(b), corner(c)],
      material: None,
    }
  })
}

proptest! {
  #[test]
  fn faces_copy_the_referenced_positions(points in prop::collection::vec(point(), 3..12), picks in prop::collection::vec(0usize..1000, 3)) {
    let mut input = String::new();
    for p in &points {
      input.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
    }
    let picks: Vec<usize> = picks.iter().map(|i| i % points.len()).collect();
    input.push_str(&format!("f {} {} {}\n", picks[0] + 1, picks[1] + 1, picks[2] + 1));

    let (mesh, errors) = parse(&input);
    prop_assert!(errors.is_empty());
    prop_assert_eq!(mesh.num_faces(), 1);
    let face = mesh.face(0).unwrap();
    for (vertex, &pick) in face.vertices.iter().zip(picks.iter()) {
      prop_assert_eq!(vertex.point, points[pick]);
    }
  }

  #[test]
  fn negative_indices_mirror_positive_ones(count in 3usize..20, picks in prop::collection::vec(0usize..1000, 3)) {
    let mut input = String::new();
    for i in 0..count {
      input.push_str(&format!("v {} {} 0\n", i, i * i));
    }
    let picks: Vec<usize> = picks.iter().map(|i| i % count).collect();
    input.push_str(&format!("f {} {} {}\n", picks[0] + 1, picks[1] + 1, picks[2] + 1));
    let back = |i: usize| count as isize - i as isize;
    input.push_str(&format!("f -{} -{} -{}\n", back(picks[0]), back(picks[1]), back(picks[2])));

    let (mesh, errors) = parse(&input);
    prop_assert!(errors.is_empty());
    prop_assert_eq!(mesh.face(0).unwrap(), mesh.face(1).unwrap());
  }

  #[test]
  fn flat_normals_are_unit_and_orthogonal(mut face in triangle()) {
    let [a, b, c] = face.vertices;
    if compute_flat_normal(&mut face) {
      let n = face.vertices[0].normal;
      prop_assert!((n.length() - 1.).abs() < 1e-9);
      let e1 = b.point - a.point;
      let e2 = c.point - a.point;
      prop_assert!(n.dot(&e1).abs() <= 1e-9 * e1.length().max(1.));
      prop_assert!(n.dot(&e2).abs() <= 1e-9 * e2.length().max(1.));
    } else {
      prop_assert!(face.vertices.iter().all(|v| v.normal.is_zero()));
    }
  }

  #[test]
  fn facing_twice_changes_nothing(faces in prop::collection::vec(triangle(), 1..8), camera in point()) {
    let mut mesh = Mesh::new();
    for face in &faces {
      let mut face = *face;
      compute_flat_normal(&mut face);
      mesh.add_face(face.vertices, None);
    }
    let once = normals_facing(&mesh, camera);
    let twice = normals_facing(&once, camera);
    prop_assert_eq!(once.faces(), twice.faces());
  }

  #[test]
  fn facing_twice_changes_nothing_edge_on(face in triangle(), s in -10.0..10.0f64, t in -10.0..10.0f64) {
    let [a, b, c] = face.vertices;
    let camera = a.point + (b.point - a.point) * s + (c.point - a.point) * t;
    let mut mesh = Mesh::new();
    mesh.add_face(face.vertices, None);

    let once = normals_facing(&mesh, camera);
    let twice = normals_facing(&once, camera);
    prop_assert_eq!(once.faces(), twice.faces());
  }
}
