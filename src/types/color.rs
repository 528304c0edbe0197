/// RGBA components in normalised `[0, 1]` space.
pub type Rgba = [f32; 4];

/// Colour half of a sprite transform.
///
/// Combining two transforms of the same kind collapses component-wise;
/// mixed kinds nest. Nesting depth follows sprite nesting depth, which the
/// walker keeps shallow, so folding stays cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorTransform {
    Multiply(Rgba),
    Add(Rgba),
    Combine(Box<ColorTransform>, Box<ColorTransform>),
}

impl ColorTransform {
    #[must_use]
    pub fn identity() -> Self {
        ColorTransform::Multiply([1.0; 4])
    }

    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (ColorTransform::Multiply(a), ColorTransform::Multiply(b)) => {
                ColorTransform::Multiply([a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]])
            }
            (ColorTransform::Add(a), ColorTransform::Add(b)) => {
                ColorTransform::Add([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
            }
            (a, b) => ColorTransform::Combine(Box::new(a), Box::new(b)),
        }
    }

    /// Applies this transform to `color`. `Combine` folds inner-first:
    /// `Combine(a, b)` is `a.fold(b.fold(color))`.
    #[must_use]
    pub fn fold(&self, color: Rgba) -> Rgba {
        match self {
            ColorTransform::Multiply(m) => {
                [color[0] * m[0], color[1] * m[1], color[2] * m[2], color[3] * m[3]]
            }
            ColorTransform::Add(a) => {
                [color[0] + a[0], color[1] + a[1], color[2] + a[2], color[3] + a[3]]
            }
            ColorTransform::Combine(first, second) => first.fold(second.fold(color)),
        }
    }

    #[must_use]
    pub fn to_color(&self) -> Rgba {
        self.fold([1.0; 4])
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_identity_is_neutral() {
        let c = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(ColorTransform::Multiply([1.0; 4]).fold(c), c);
    }

    #[test]
    fn add_identity_is_neutral() {
        let c = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(ColorTransform::Add([0.0; 4]).fold(c), c);
    }

    #[test]
    fn homogeneous_kinds_collapse() {
        let a = ColorTransform::Multiply([0.5, 0.5, 0.5, 1.0]);
        let b = ColorTransform::Multiply([0.5, 1.0, 2.0, 1.0]);
        assert_eq!(
            a.combine(b),
            ColorTransform::Multiply([0.25, 0.5, 1.0, 1.0])
        );

        let a = ColorTransform::Add([0.1, 0.2, 0.3, 0.0]);
        let b = ColorTransform::Add([0.3, 0.2, 0.1, 0.0]);
        match a.combine(b) {
            ColorTransform::Add(sum) => {
                for (got, want) in sum.iter().zip(&[0.4, 0.4, 0.4, 0.0]) {
                    assert!((got - want).abs() < 1e-6);
                }
            }
            other => panic!("expected Add, got {:?}", other),
        }
    }

    #[test]
    fn mixed_kinds_fold_inner_first() {
        let mul = ColorTransform::Multiply([0.5, 0.5, 0.5, 0.5]);
        let add = ColorTransform::Add([0.2, 0.2, 0.2, 0.2]);
        let combined = mul.combine(add);
        assert!(matches!(combined, ColorTransform::Combine(_, _)));
        // Multiply folds the already-added colour.
        assert_eq!(combined.fold([1.0; 4]), [0.6; 4]);
    }
}
