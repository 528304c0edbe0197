use image::RgbaImage;

use crate::error::Result;
use crate::resources::Shape;
use crate::types::{Box2D, SpriteTransform};

/// Receives every shape the walker reaches. Rasterisation and
/// measurement share one walk and differ only here.
pub trait BlitSink {
    fn draw_shape(
        &mut self,
        shape: &Shape,
        transform: &SpriteTransform,
        atlas: Option<&RgbaImage>,
    ) -> Result<()>;
}

/// Accumulates the axis-aligned bound of everything the raster sink
/// would draw.
#[derive(Debug, Default)]
pub struct Measurer {
    bounds: Box2D,
}

impl Measurer {
    #[must_use]
    pub fn bounds(&self) -> Box2D {
        self.bounds
    }
}

impl BlitSink for Measurer {
    fn draw_shape(
        &mut self,
        shape: &Shape,
        transform: &SpriteTransform,
        _atlas: Option<&RgbaImage>,
    ) -> Result<()> {
        let local = Box2D::from_rect(
            shape.offset_x,
            shape.offset_y,
            f32::from(shape.width),
            f32::from(shape.height),
        );
        self.bounds = self
            .bounds
            .union(transform.position.outer_transformed_box(local));
        Ok(())
    }
}
