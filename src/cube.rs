use smallvec::SmallVec;

use crate::geometry::{Triangle, Vec3};

/// Distance from a cube's centre to each of its faces.
pub const HALF_EXTENT: f32 = 0.5;

pub const CUBE_CORNERS: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::PosX, Face::NegX, Face::PosY, Face::NegY, Face::PosZ, Face::NegZ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The four cube corners of this face, counter-clockwise seen from outside the cube.
    ///
    /// Corner `i` sits on the positive side of x when bit 0 of `i` is set, of y for bit 1
    /// and of z for bit 2.
    #[inline]
    pub fn corners(self) -> [u32; 4] {
        match self {
            Face::PosX => [1, 3, 7, 5],
            Face::NegX => [0, 4, 6, 2],
            Face::PosY => [2, 6, 7, 3],
            Face::NegY => [0, 1, 5, 4],
            Face::PosZ => [4, 5, 7, 6],
            Face::NegZ => [0, 2, 3, 1],
        }
    }

    /// The face's quad split into two triangles along the `corners[0]`-`corners[2]` diagonal.
    #[inline]
    pub fn triangles(self) -> [Triangle; 2] {
        let [a, b, c, d] = self.corners();
        [[a, b, c], [a, c, d]]
    }
}

/// Which faces of a cube are hidden behind a neighbour and must not be emitted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CulledFaces {
    pub px: bool,
    pub nx: bool,
    pub py: bool,
    pub ny: bool,
    pub pz: bool,
    pub nz: bool,
}

impl CulledFaces {
    /// Nothing culled: a free standing cube.
    pub fn none() -> CulledFaces {
        CulledFaces::default()
    }

    pub fn all() -> CulledFaces {
        CulledFaces {
            px: true,
            nx: true,
            py: true,
            ny: true,
            pz: true,
            nz: true,
        }
    }

    #[inline]
    pub fn is_culled(&self, face: Face) -> bool {
        match face {
            Face::PosX => self.px,
            Face::NegX => self.nx,
            Face::PosY => self.py,
            Face::NegY => self.ny,
            Face::PosZ => self.pz,
            Face::NegZ => self.nz,
        }
    }

    pub fn visible_faces(&self) -> SmallVec<[Face; 6]> {
        Face::ALL.iter().cloned().filter(|face| !self.is_culled(*face)).collect()
    }

    pub fn visible_count(&self) -> usize {
        Face::ALL.iter().filter(|face| !self.is_culled(**face)).count()
    }
}

/// A unit cube's corners and the triangles of its visible faces.
/// Triangle indices refer to `vertices`.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeGeometry {
    pub vertices: [Vec3; CUBE_CORNERS],
    pub faces: SmallVec<[Triangle; 12]>,
}

/// Build a unit cube centred on `center`, leaving out every face marked in `culled`.
///
/// All 8 corners are always returned, even when every face is culled, so the mesh builder can
/// still weld against them.
pub fn cube_faces(center: Vec3, culled: CulledFaces) -> CubeGeometry {
    let mut vertices = [Vec3::ZERO; CUBE_CORNERS];
    for (i, vertex) in vertices.iter_mut().enumerate() {
        let sign = |bit: usize| if i & bit != 0 { HALF_EXTENT } else { -HALF_EXTENT };
        *vertex = center + Vec3::new(sign(1), sign(2), sign(4));
    }

    let mut faces = SmallVec::new();
    for face in culled.visible_faces() {
        faces.extend_from_slice(&face.triangles());
    }

    CubeGeometry { vertices, faces }
}
