use crate::Mesh;

use mosaic_core::prelude::*;

/// A point on a surface together with its texture coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedPoint {
    pub position: Point3f,
    pub uv: Point2f,
}

impl TexturedPoint {
    pub fn new(position: Point3f, uv: Point2f) -> Self {
        Self { position, uv }
    }

    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            uv: self.uv.lerp(&other.uv, t),
        }
    }
}

/// Uniform scale followed by a translation, applied to mesh vertices before voxelization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    pub origin: Point3f,
    pub scale: f32,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            origin: Point3f::ZERO,
            scale: 1.0,
        }
    }
}

impl MeshTransform {
    #[inline]
    pub fn apply(&self, p: Point3f) -> Point3f {
        self.origin + p * self.scale
    }
}

// Interpolation steps for a segment: one per unit of length, and at least one. Indices `i` run
// over `0..ceil(steps)`, which is every integer `i < steps`.
#[inline]
fn segment_steps(a: &Point3f, b: &Point3f) -> (f32, usize) {
    let steps = a.l2_distance(b).max(1.0);

    (steps, steps.ceil() as usize)
}

/// Visits voxels along the segment from `a` toward `b`, excluding `b` itself unless the segment
/// is shorter than one unit, in which case only `a` is visited.
///
/// `visitor` gets each voxel (the interpolated position floored on every axis) and the
/// interpolated texture coordinate. Returning `false` from `visitor` stops the traversal, and
/// then this returns `false` as well.
pub fn voxelize_line(
    a: TexturedPoint,
    b: TexturedPoint,
    visitor: &mut impl FnMut(Point3i, Point2f) -> bool,
) -> bool {
    let (steps, count) = segment_steps(&a.position, &b.position);
    for i in 0..count {
        let p = a.lerp(&b, i as f32 / steps);
        if !visitor(p.position.in_voxel(), p.uv) {
            return false;
        }
    }

    true
}

/// Sweeps lines to `c` from evenly spaced points along edge `ab`.
///
/// Density only follows the length of `ab`, so a triangle with a short `ab` and long opposite
/// sides can leave gaps near `c`. Callers that care draw the edges as well, like
/// [`voxelize_quad`] and [`voxelize_mesh`] do.
pub fn voxelize_triangle(
    a: TexturedPoint,
    b: TexturedPoint,
    c: TexturedPoint,
    visitor: &mut impl FnMut(Point3i, Point2f) -> bool,
) -> bool {
    let (steps, count) = segment_steps(&a.position, &b.position);
    for i in 0..count {
        let p = a.lerp(&b, i as f32 / steps);
        if !voxelize_line(p, c, visitor) {
            return false;
        }
    }

    true
}

/// Voxelizes the quad `abcd` as triangles `abc` and `cda`, then its four edges to fill seams.
pub fn voxelize_quad(
    a: TexturedPoint,
    b: TexturedPoint,
    c: TexturedPoint,
    d: TexturedPoint,
    visitor: &mut impl FnMut(Point3i, Point2f) -> bool,
) -> bool {
    voxelize_triangle(a, b, c, visitor)
        && voxelize_triangle(c, d, a, visitor)
        && voxelize_line(a, b, visitor)
        && voxelize_line(b, c, visitor)
        && voxelize_line(c, d, visitor)
        && voxelize_line(d, a, visitor)
}

/// Voxelizes every face in source order, followed by that face's boundary edges. Each voxel
/// goes to `visitor` as soon as it is computed.
pub fn voxelize_mesh(
    mesh: &Mesh,
    transform: &MeshTransform,
    visitor: &mut impl FnMut(Point3i, Point2f) -> bool,
) -> bool {
    let mut corners = Vec::with_capacity(4);
    for face in mesh.faces.iter() {
        corners.clear();
        corners.extend((0..face.arity()).map(|i| {
            TexturedPoint::new(
                transform.apply(mesh.face_position(face, i)),
                mesh.face_uv(face, i),
            )
        }));

        let filled = match corners[..] {
            [a, b, c] => voxelize_triangle(a, b, c, visitor),
            [a, b, c, d] => voxelize_quad(a, b, c, d, visitor),
            // Parsing only produces triangles and quads.
            _ => true,
        };
        if !filled {
            return false;
        }

        let n = corners.len();
        for i in 0..n {
            if !voxelize_line(corners[i], corners[(i + 1) % n], visitor) {
                return false;
            }
        }
    }

    true
}

/// Visits the voxel of every mesh vertex, ignoring faces and texture.
pub fn voxelize_points(
    mesh: &Mesh,
    transform: &MeshTransform,
    visitor: &mut impl FnMut(Point3i) -> bool,
) -> bool {
    mesh.vertices
        .iter()
        .all(|v| visitor(transform.apply(*v).in_voxel()))
}

/// Number of voxels [`voxelize_mesh`] would visit, duplicates included.
pub fn count_mesh_voxels(mesh: &Mesh, transform: &MeshTransform) -> usize {
    let mut count = 0;
    voxelize_mesh(mesh, transform, &mut |_, _| {
        count += 1;
        true
    });

    count
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
