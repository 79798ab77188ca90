use super::point::*;

use core::ops::{Add, Mul, Sub};

/// A 3-dimensional point with scalar type `T`.
pub type Point3<T> = PointN<[T; 3]>;
/// A 3-dimensional point with scalar type `i32`. This is a voxel.
pub type Point3i = PointN<[i32; 3]>;
/// A 3-dimensional point with scalar type `f32`.
pub type Point3f = PointN<[f32; 3]>;

impl<T> Point3<T>
where
    T: Copy,
{
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    pub fn map_components(&self, f: impl Fn(T) -> T) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }
}

impl Point3f {
    #[inline]
    pub fn floor(&self) -> Self {
        self.map_components(|c| c.floor())
    }

    #[inline]
    pub fn as_3i(&self) -> Point3i {
        PointN([self.x() as i32, self.y() as i32, self.z() as i32])
    }

    /// Returns the voxel containing this point. Each axis is floored independently, so
    /// `-0.5` lands in voxel `-1`, not `0`.
    #[inline]
    pub fn in_voxel(&self) -> Point3i {
        self.floor().as_3i()
    }

    /// Returns `true` if no component is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl From<Point3i> for Point3f {
    #[inline]
    fn from(p: Point3i) -> Self {
        PointN([p.x() as f32, p.y() as f32, p.z() as f32])
    }
}

/// Returns the voxel containing `p`.
#[inline]
pub fn voxel_containing_point3f(p: &Point3f) -> Point3i {
    p.in_voxel()
}

impl<T> SmallZero for Point3<T>
where
    T: SmallZero,
{
    const ZERO: Self = PointN([T::ZERO; 3]);
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        PointN([self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z()])
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        PointN([self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z()])
    }
}

impl<T> Mul<T> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        PointN([self.x() * rhs, self.y() * rhs, self.z() * rhs])
    }
}

impl<T> DotProduct for Point3<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn dot(&self, other: &Self) -> Self::Scalar {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }
}

impl NormSquared for Point3i {
    #[inline]
    fn norm_squared(&self) -> f32 {
        self.dot(self) as f32
    }
}

impl NormSquared for Point3f {
    #[inline]
    fn norm_squared(&self) -> f32 {
        self.dot(self)
    }
}

impl Lerp for Point3f {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_truncates_toward_negative_infinity_per_axis() {
        let p = PointN([-0.5, 1.999, -2.0]);
        assert_eq!(p.in_voxel(), PointN([-1, 1, -2]));
        assert_eq!(voxel_containing_point3f(&PointN([0.0, -0.0001, 3.5])), PointN([0, -1, 3]));
    }

    #[test]
    fn distance_and_lerp() {
        let a = PointN([0.0, 0.0, 0.0]);
        let b = PointN([3.0, 4.0, 0.0]);
        assert_eq!(a.l2_distance(&b), 5.0);
        assert_eq!(a.lerp(&b, 0.5), PointN([1.5, 2.0, 0.0]));
        assert_eq!(a.lerp(&b, 0.0), a);
    }
}
