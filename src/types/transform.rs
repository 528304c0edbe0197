use super::box2d::Box2D;
use super::color::ColorTransform;

/// Row-major 2D affine matrix.
///
/// Points transform as row vectors, so `a.mult(b)` applies `a` first and
/// `b` second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

impl Transform2D {
    #[must_use]
    pub fn identity() -> Self {
        Self::scale(1.0, 1.0)
    }

    #[must_use]
    pub fn translate(x: f32, y: f32) -> Self {
        Self { m11: 1.0, m12: 0.0, m21: 0.0, m22: 1.0, m31: x, m32: y }
    }

    #[must_use]
    pub fn scale(x: f32, y: f32) -> Self {
        Self { m11: x, m12: 0.0, m21: 0.0, m22: y, m31: 0.0, m32: 0.0 }
    }

    /// The four rotation floats come straight out of the transform table;
    /// they are never derived from an angle.
    #[must_use]
    pub fn rotate(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { m11: x0, m12: y0, m21: x1, m22: y1, m31: 0.0, m32: 0.0 }
    }

    #[must_use]
    pub fn mult(self, other: Self) -> Self {
        Self {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
            m31: self.m31 * other.m11 + self.m32 * other.m21 + other.m31,
            m32: self.m31 * other.m12 + self.m32 * other.m22 + other.m32,
        }
    }

    #[must_use]
    pub fn transform_point(self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.m11 + y * self.m21 + self.m31,
            x * self.m12 + y * self.m22 + self.m32,
        )
    }

    /// Axis-aligned bound of the four transformed corners.
    #[must_use]
    pub fn outer_transformed_box(self, b: Box2D) -> Box2D {
        let corners = [
            self.transform_point(b.min_x, b.min_y),
            self.transform_point(b.max_x, b.min_y),
            self.transform_point(b.min_x, b.max_y),
            self.transform_point(b.max_x, b.max_y),
        ];
        let mut out = Box2D::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1);
        for &(x, y) in &corners[1..] {
            out.min_x = out.min_x.min(x);
            out.min_y = out.min_y.min(y);
            out.max_x = out.max_x.max(x);
            out.max_y = out.max_y.max(y);
        }
        out
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Affine matrix and colour transform combined along a walk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteTransform {
    pub position: Transform2D,
    pub color: ColorTransform,
}

impl SpriteTransform {
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_position(position: Transform2D) -> Self {
        Self { position, color: ColorTransform::identity() }
    }

    #[must_use]
    pub fn from_color(color: ColorTransform) -> Self {
        Self { position: Transform2D::identity(), color }
    }

    /// Field-wise combination; `self` applies before `other`.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position.mult(other.position),
            color: self.color.clone().combine(other.color.clone()),
        }
    }
}
