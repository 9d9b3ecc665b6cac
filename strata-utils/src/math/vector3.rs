use std::ops::{Add, Sub};

/// A three component vector.
///
/// Ordering is lexicographic over `(x, y, z)`, which gives the positions
/// built on it a stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Vector3<T> {
    /// The x component.
    pub x: T,
    /// The y component.
    pub y: T,
    /// The z component.
    pub z: T,
}

impl<T> Vector3<T> {
    /// Creates a new vector.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Vector3<T> {
    /// Applies `f` to every component.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Vector3<U> {
        Vector3::new(f(self.x), f(self.y), f(self.z))
    }
}

impl<T: Add<Output = T>> Add for Vector3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Sub<Output = T>> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector3::new(1, -2, 3);
        let b = Vector3::new(4, 5, -6);
        assert_eq!(a + b, Vector3::new(5, 3, -3));
        assert_eq!(b - a, Vector3::new(3, 7, -9));
        assert_eq!(a.map(|v| v * 2), Vector3::new(2, -4, 6));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Vector3::new(0, 9, 9) < Vector3::new(1, 0, 0));
        assert!(Vector3::new(1, 0, 9) < Vector3::new(1, 1, 0));
    }
}
