use super::point::*;

use core::ops::{Add, Mul, Sub};

/// A 2-dimensional point with scalar type `T`.
pub type Point2<T> = PointN<[T; 2]>;
/// A 2-dimensional point with scalar type `f32`. Used for texture coordinates, AKA UVs.
pub type Point2f = PointN<[f32; 2]>;

impl<T> Point2<T>
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
}

impl<T> SmallZero for Point2<T>
where
    T: SmallZero,
{
    const ZERO: Self = PointN([T::ZERO; 2]);
}

impl<T> Add for Point2<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        PointN([self.x() + rhs.x(), self.y() + rhs.y()])
    }
}

impl<T> Sub for Point2<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        PointN([self.x() - rhs.x(), self.y() - rhs.y()])
    }
}

impl<T> Mul<T> for Point2<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        PointN([self.x() * rhs, self.y() * rhs])
    }
}

impl<T> DotProduct for Point2<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn dot(&self, other: &Self) -> T {
        self.x() * other.x() + self.y() * other.y()
    }
}

impl NormSquared for Point2f {
    #[inline]
    fn norm_squared(&self) -> f32 {
        self.dot(self)
    }
}

impl Lerp for Point2f {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}
