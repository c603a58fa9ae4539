use log::debug;
use serde_derive::Serialize;
use smallvec::SmallVec;

use crate::cube::{CubeGeometry, CUBE_CORNERS};
use crate::geometry::{Triangle, Vec3};
use crate::utils::fnv_hashmap;

/// Vertices closer than this are merged by `finalize`.
pub const WELD_EPSILON: f32 = 1e-4;

/// Accumulates cube geometry into one vertex array and one triangle array.
///
/// Cubes are appended verbatim, only remapping their face indices past the vertices already held.
/// All comparison work is deferred to `finalize`, which welds coincident vertices and hands the
/// packed buffer over. `finalize` consumes the builder, so nothing can be added to a finished mesh
/// and a mesh can't be finished twice.
#[derive(Debug, Default, Clone)]
pub struct MeshBuilder {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    cubes: usize,
}

impl MeshBuilder {
    pub fn new() -> MeshBuilder {
        MeshBuilder::default()
    }

    /// Pre-reserve room for `n_cubes` fully visible cubes.
    pub fn with_cube_capacity(n_cubes: usize) -> MeshBuilder {
        MeshBuilder {
            vertices: Vec::with_capacity(n_cubes * CUBE_CORNERS),
            triangles: Vec::with_capacity(n_cubes * 12),
            cubes: 0,
        }
    }

    /// Append one cube's vertices and faces. Face indices are local to `vertices`.
    ///
    /// Panics if a face refers to a vertex outside `vertices`.
    pub fn add_cube(&mut self, vertices: &[Vec3], faces: &[Triangle]) {
        let base = self.vertices.len() as u32;
        for face in faces {
            for &index in face.iter() {
                assert!((index as usize) < vertices.len(),
                        "face index {} out of range for {} cube vertices",
                        index,
                        vertices.len());
            }
            self.triangles.push([face[0] + base, face[1] + base, face[2] + base]);
        }
        self.vertices.extend_from_slice(vertices);
        self.cubes += 1;
    }

    #[inline]
    pub fn add_cube_geometry(&mut self, cube: &CubeGeometry) {
        self.add_cube(&cube.vertices, &cube.faces);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cubes == 0
    }

    /// Weld coincident vertices and return the finished mesh.
    pub fn finalize(self) -> MeshBuffer {
        let raw_vertices = self.vertices.len();
        let (vertices, triangles) = weld_vertices(&self.vertices, &self.triangles, WELD_EPSILON);
        debug!("finalized mesh of {} cubes: {} -> {} vertices, {} triangles",
               self.cubes,
               raw_vertices,
               vertices.len(),
               triangles.len());
        MeshBuffer { vertices, triangles }
    }
}

/// Render ready geometry: vertex positions and triangles indexing them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MeshBuffer {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl MeshBuffer {
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flat `[x, y, z, x, y, z, ...]` vertex buffer.
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array().to_vec()).collect()
    }

    /// Flat index buffer, three indices per triangle.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.to_vec()).collect()
    }

    /// Run the weld pass again with a different tolerance.
    pub fn welded(&self, epsilon: f32) -> MeshBuffer {
        let (vertices, triangles) = weld_vertices(&self.vertices, &self.triangles, epsilon);
        MeshBuffer { vertices, triangles }
    }
}

type BucketKey = (i64, i64, i64);

#[inline]
fn bucket_key(v: Vec3, epsilon: f32) -> BucketKey {
    let q = |c: f32| (f64::from(c) / f64::from(epsilon)).floor() as i64;
    (q(v.x), q(v.y), q(v.z))
}

/// Merge vertices lying within `epsilon` of each other and remap the triangles to match.
///
/// Vertices are hashed into cubic buckets `epsilon` wide, so a vertex only needs comparing with
/// the canonical vertices of its own and the 26 surrounding buckets. The first vertex seen at a
/// position becomes canonical and keeps its relative order. Canonical vertices end up more than
/// `epsilon` apart, so running the pass again on its own output changes nothing.
///
/// Panics if `epsilon` is not positive.
pub fn weld_vertices(vertices: &[Vec3],
                     triangles: &[Triangle],
                     epsilon: f32)
                     -> (Vec<Vec3>, Vec<Triangle>) {
    assert!(epsilon > 0.0, "weld epsilon must be positive, got {}", epsilon);

    let epsilon_squared = epsilon * epsilon;
    let mut buckets = fnv_hashmap::<BucketKey, SmallVec<[u32; 2]>>(vertices.len());
    let mut canonical: Vec<Vec3> = Vec::with_capacity(vertices.len());
    let mut remap: Vec<u32> = Vec::with_capacity(vertices.len());

    for &vertex in vertices {
        let (kx, ky, kz) = bucket_key(vertex, epsilon);

        let mut existing = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = buckets.get(&(kx + dx, ky + dy, kz + dz)) {
                        let found = bucket.iter()
                            .cloned()
                            .find(|&i| (canonical[i as usize] - vertex).length_squared() <= epsilon_squared);
                        if found.is_some() {
                            existing = found;
                            break 'search;
                        }
                    }
                }
            }
        }

        let index = match existing {
            Some(i) => i,
            None => {
                let i = canonical.len() as u32;
                canonical.push(vertex);
                buckets.entry((kx, ky, kz)).or_insert_with(SmallVec::new).push(i);
                i
            }
        };
        remap.push(index);
    }

    let welded_triangles = triangles.iter()
        .map(|t| [remap[t[0] as usize], remap[t[1] as usize], remap[t[2] as usize]])
        .collect();

    (canonical, welded_triangles)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cube::{cube_faces, CulledFaces};

    #[test]
    fn add_cube_offsets_face_indices() {
        let mut builder = MeshBuilder::new();
        let a = cube_faces(Vec3::ZERO, CulledFaces::none());
        let b = cube_faces(Vec3::new(5.0, 0.0, 0.0), CulledFaces::none());
        builder.add_cube_geometry(&a);
        builder.add_cube_geometry(&b);

        assert_eq!(builder.vertex_count(), 16);
        assert_eq!(builder.triangle_count(), 24);
        assert!(builder.triangles[12..].iter().all(|t| t.iter().all(|&i| i >= 8 && i < 16)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn add_cube_rejects_dangling_face_indices() {
        let mut builder = MeshBuilder::new();
        builder.add_cube(&[Vec3::ZERO; 3], &[[0, 1, 3]]);
    }

    #[test]
    fn empty_builder_gives_empty_mesh() {
        let builder = MeshBuilder::new();
        assert!(builder.is_empty());
        let mesh = builder.finalize();
        assert_eq!(mesh, MeshBuffer::default());
    }

    #[test]
    fn lone_cube_welds_nothing() {
        let mut builder = MeshBuilder::new();
        builder.add_cube_geometry(&cube_faces(Vec3::ZERO, CulledFaces::none()));
        let mesh = builder.finalize();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn adjacent_cubes_share_corner_vertices() {
        let mut builder = MeshBuilder::new();
        builder.add_cube_geometry(&cube_faces(Vec3::new(-0.5, 0.0, 0.0),
                                              CulledFaces { px: true, ..CulledFaces::none() }));
        builder.add_cube_geometry(&cube_faces(Vec3::new(0.5, 0.0, 0.0),
                                              CulledFaces { nx: true, ..CulledFaces::none() }));
        let mesh = builder.finalize();

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn nearly_coincident_vertices_are_merged() {
        let vertices = [Vec3::new(1.0, 1.0, 1.0),
                        Vec3::new(1.0 + 4e-5, 1.0, 1.0 - 4e-5),
                        Vec3::new(2.0, 1.0, 1.0)];
        let triangles = [[0, 2, 1]];
        let (welded, remapped) = weld_vertices(&vertices, &triangles, WELD_EPSILON);
        assert_eq!(welded, vec![vertices[0], vertices[2]]);
        assert_eq!(remapped, vec![[0, 1, 0]]);
    }

    #[test]
    fn vertices_straddling_a_bucket_edge_are_merged() {
        let edge = 3.0 * WELD_EPSILON;
        let vertices = [Vec3::new(edge - 1e-5, 0.0, 0.0), Vec3::new(edge + 1e-5, 0.0, 0.0)];
        let (welded, _) = weld_vertices(&vertices, &[], WELD_EPSILON);
        assert_eq!(welded.len(), 1);
    }

    #[test]
    fn distinct_vertices_survive() {
        let vertices = [Vec3::ZERO, Vec3::new(2e-4, 0.0, 0.0), Vec3::new(0.0, 0.0, -2e-4)];
        let (welded, _) = weld_vertices(&vertices, &[], WELD_EPSILON);
        assert_eq!(welded.len(), 3);
    }

    #[test]
    fn welding_is_idempotent() {
        let mut builder = MeshBuilder::new();
        for x in 0..4 {
            for z in 0..3 {
                let culled = CulledFaces {
                    px: x < 3,
                    nx: x > 0,
                    pz: z < 2,
                    nz: z > 0,
                    ..CulledFaces::none()
                };
                builder.add_cube_geometry(&cube_faces(Vec3::new(x as f32, 0.0, z as f32), culled));
            }
        }
        let once = builder.finalize();
        let twice = once.welded(WELD_EPSILON);
        assert_eq!(once, twice);
        // A 4x3 slab has 5x4 corner columns, top and bottom.
        assert_eq!(once.vertex_count(), 40);
    }

    #[test]
    fn no_two_vertices_within_epsilon_after_finalize() {
        let mut builder = MeshBuilder::new();
        for i in 0..6 {
            builder.add_cube_geometry(&cube_faces(Vec3::new(i as f32 * 0.1, 0.0, 0.0),
                                                  CulledFaces::none()));
        }
        let mesh = builder.finalize();
        let v = mesh.vertices();
        for i in 0..v.len() {
            for j in (i + 1)..v.len() {
                assert!((v[i] - v[j]).length_squared() > WELD_EPSILON * WELD_EPSILON);
            }
        }
    }

    #[test]
    fn flat_buffers() {
        let mut builder = MeshBuilder::new();
        builder.add_cube_geometry(&cube_faces(Vec3::ZERO, CulledFaces::none()));
        let mesh = builder.finalize();
        assert_eq!(mesh.positions().len(), 24);
        assert_eq!(&mesh.positions()[..3], &[-0.5, -0.5, -0.5]);
        assert_eq!(mesh.indices().len(), 36);
    }
}
