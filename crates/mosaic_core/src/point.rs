use core::ops::{AddAssign, Sub, SubAssign};
use num::Zero;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An N-dimensional point (where N=2 or N=3), which is usually just a primitive array of type `N`.
///
/// ```
/// use mosaic_core::PointN;
///
/// let uv = PointN([0.25, 0.5]); // 2D
/// let p = PointN([1.0, 2.0, 3.0]); // 3D
/// ```
///
/// Points support addition, subtraction and scalar multiplication, which is all that
/// interpolating along lines and triangles needs.
///
/// ```
/// use mosaic_core::PointN;
///
/// let a = PointN([1.0, 2.0, 3.0]);
/// let b = PointN([3.0, 2.0, 1.0]);
///
/// assert_eq!(a + b, PointN([4.0, 4.0, 4.0]));
/// assert_eq!(a - b, PointN([-2.0, 0.0, 2.0]));
/// assert_eq!(a * 2.0, PointN([2.0, 4.0, 6.0]));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PointN<N>(pub N);

impl<N> AddAssign for PointN<N>
where
    N: Copy,
    PointN<N>: core::ops::Add<Output = Self>,
{
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<N> SubAssign for PointN<N>
where
    N: Copy,
    PointN<N>: Sub<Output = Self>,
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// `Zero` trait doesn't allow associated constants for zero because of bignums.
pub trait SmallZero: Copy {
    const ZERO: Self;
}

impl SmallZero for i32 {
    const ZERO: Self = 0;
}

impl SmallZero for f32 {
    const ZERO: Self = 0.0;
}

impl<N> Zero for PointN<N>
where
    Self: SmallZero + PartialEq + core::ops::Add<Output = Self>,
{
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

pub trait DotProduct {
    type Scalar: Copy;

    /// The vector dot product.
    fn dot(&self, other: &Self) -> Self::Scalar;
}

pub trait NormSquared {
    fn norm_squared(&self) -> f32;
}

pub trait Norm {
    fn norm(&self) -> f32;
}

impl<T> Norm for T
where
    T: NormSquared,
{
    fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }
}

pub trait Distance {
    /// The L2 (Euclidean) distance between points.
    fn l2_distance(&self, other: &Self) -> f32;
}

impl<T> Distance for T
where
    T: Copy + Sub<Output = T> + NormSquared,
{
    #[inline]
    fn l2_distance(&self, other: &Self) -> f32 {
        (*self - *other).norm()
    }
}

/// Linear interpolation between two values.
pub trait Lerp {
    /// Returns `self` when `t == 0` and `other` when `t == 1`.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}
