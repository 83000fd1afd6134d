#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn scaled(self, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn distance(a: Vec2, b: Vec2) -> f32 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Local transform: position plus scale and skew terms for the affine
/// matrix emitted before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub skew: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            skew: Vec2::ZERO,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Matrix2D {
        Matrix2D {
            a: self.scale.x,
            b: self.skew.x,
            c: self.skew.y,
            d: self.scale.y,
            e: self.position.x,
            f: self.position.y,
        }
    }
}

/// 2D affine matrix in drawing-surface `transform(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix2D {
    pub const IDENTITY: Matrix2D = Matrix2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub_return_new_values() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);

        assert_eq!(a.add(b), Vec2::new(4.0, -2.0));
        assert_eq!(a.sub(b), Vec2::new(-2.0, 6.0));
        assert_eq!(a, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((Vec2::distance(a, b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn default_transform_is_identity_matrix() {
        assert_eq!(Transform::default().matrix(), Matrix2D::IDENTITY);
    }

    #[test]
    fn matrix_places_position_in_translation_terms() {
        let transform = Transform::from_position(Vec2::new(7.0, -3.0));
        let matrix = transform.matrix();
        assert_eq!(matrix.e, 7.0);
        assert_eq!(matrix.f, -3.0);
        assert_eq!(matrix.a, 1.0);
        assert_eq!(matrix.d, 1.0);
    }

    #[test]
    fn matrix_carries_scale_and_skew() {
        let transform = Transform {
            position: Vec2::ZERO,
            scale: Vec2::new(2.0, 3.0),
            skew: Vec2::new(0.5, -0.5),
        };
        let matrix = transform.matrix();
        assert_eq!(matrix.a, 2.0);
        assert_eq!(matrix.b, 0.5);
        assert_eq!(matrix.c, -0.5);
        assert_eq!(matrix.d, 3.0);
    }

    #[test]
    fn finite_check_rejects_nan_components() {
        assert!(Vec2::new(1.0, 2.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
    }
}
