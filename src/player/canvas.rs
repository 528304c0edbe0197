use image::RgbaImage;

use super::sink::BlitSink;
use crate::error::{Error, Result};
use crate::resources::Shape;
use crate::types::{SpriteTransform, Transform2D};

/// Matrices this flat are not invertible in any useful way.
const DEGENERATE: f32 = 1e-6;

/// Raster sink drawing into a fresh RGBA canvas, one per render pass.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Draws the atlas crop `(sx, sy, sw, sh)` through `matrix`, which
    /// maps crop-pixel coordinates onto the canvas. Alpha is scaled by
    /// `color[3]`; when the colour is a real tint it is multiplied into
    /// covered pixels afterwards, like a multiply-composite fill over the
    /// destination rectangle.
    #[allow(clippy::too_many_lines)]
    fn blit(
        &mut self,
        atlas: &RgbaImage,
        crop: (f32, f32, f32, f32),
        matrix: Transform2D,
        color: [f32; 4],
    ) {
        let (sx, sy, sw, sh) = crop;
        if sw <= 0.0 || sh <= 0.0 {
            return;
        }

        let (a, b, c, d) = (matrix.m11, matrix.m12, matrix.m21, matrix.m22);
        let (tx, ty) = (matrix.m31, matrix.m32);
        let det = a * d - b * c;
        if det.abs() < DEGENERATE {
            return;
        }
        let inv_a = d / det;
        let inv_b = -b / det;
        let inv_c = -c / det;
        let inv_d = a / det;
        let inv_tx = (c * ty - d * tx) / det;
        let inv_ty = (b * tx - a * ty) / det;

        // Destination bound: the crop corners pushed through the matrix.
        let corners = [
            matrix.transform_point(0.0, 0.0),
            matrix.transform_point(sw, 0.0),
            matrix.transform_point(0.0, sh),
            matrix.transform_point(sw, sh),
        ];
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for &(x, y) in &corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if self.image.width() == 0 || self.image.height() == 0 {
            return;
        }
        let x0 = (min_x.floor().max(0.0)) as u32;
        let y0 = (min_y.floor().max(0.0)) as u32;
        let x1 = (max_x.ceil().min((self.image.width() - 1) as f32)).max(0.0) as u32;
        let y1 = (max_y.ceil().min((self.image.height() - 1) as f32)).max(0.0) as u32;
        if x0 > x1 || y0 > y1 {
            return;
        }

        let alpha = color[3].clamp(0.0, 1.0);
        let tinted = !is_grayscale(color) && alpha > 0.0;

        let atlas_w = atlas.width() as i32;
        let atlas_h = atlas.height() as i32;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let u = inv_a * px + inv_c * py + inv_tx;
                let v = inv_b * px + inv_d * py + inv_ty;
                if u < 0.0 || u >= sw || v < 0.0 || v >= sh {
                    continue;
                }

                let sample = sample_bilinear(atlas, atlas_w, atlas_h, sx + u, sy + v);
                let src_a = sample[3] * alpha;
                if src_a > 0.0 {
                    let dst = self.image.get_pixel_mut(x, y);
                    let inv = 1.0 - src_a;
                    for channel in 0..3 {
                        let blended =
                            sample[channel] * src_a + f32::from(dst[channel]) / 255.0 * inv * f32::from(dst[3]) / 255.0;
                        let out_a = src_a + f32::from(dst[3]) / 255.0 * inv;
                        dst[channel] = if out_a > 0.0 {
                            ((blended / out_a) * 255.0).clamp(0.0, 255.0) as u8
                        } else {
                            0
                        };
                    }
                    let out_a = src_a + f32::from(dst[3]) / 255.0 * inv;
                    dst[3] = (out_a * 255.0).clamp(0.0, 255.0) as u8;
                }

                if tinted {
                    let dst = self.image.get_pixel_mut(x, y);
                    if dst[3] > 0 {
                        for channel in 0..3 {
                            let base = f32::from(dst[channel]) / 255.0;
                            let multiplied = base * color[channel];
                            let mixed = base * (1.0 - alpha) + multiplied * alpha;
                            dst[channel] = (mixed * 255.0).clamp(0.0, 255.0) as u8;
                        }
                    }
                }
            }
        }
    }
}

// Alpha is deliberately left out: an alpha-only fade is still grayscale
// and must not trigger the tint fill.
fn is_grayscale(color: [f32; 4]) -> bool {
    let first = color[0];
    color[..3]
        .iter()
        .all(|&component| (component - first).abs() < f32::EPSILON)
}

fn sample_bilinear(atlas: &RgbaImage, width: i32, height: i32, x: f32, y: f32) -> [f32; 4] {
    let xf = (x - 0.5).floor();
    let yf = (y - 0.5).floor();
    let dx = (x - 0.5) - xf;
    let dy = (y - 0.5) - yf;
    let x0 = xf as i32;
    let y0 = yf as i32;

    let fetch = |px: i32, py: i32| -> [f32; 4] {
        if px < 0 || py < 0 || px >= width || py >= height {
            return [0.0; 4];
        }
        let pixel = atlas.get_pixel(px as u32, py as u32);
        [
            f32::from(pixel[0]) / 255.0,
            f32::from(pixel[1]) / 255.0,
            f32::from(pixel[2]) / 255.0,
            f32::from(pixel[3]) / 255.0,
        ]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0.0; 4];
    for channel in 0..4 {
        let top = p00[channel] * (1.0 - dx) + p10[channel] * dx;
        let bottom = p01[channel] * (1.0 - dx) + p11[channel] * dx;
        out[channel] = top * (1.0 - dy) + bottom * dy;
    }
    out
}

impl BlitSink for Canvas {
    fn draw_shape(
        &mut self,
        shape: &Shape,
        transform: &SpriteTransform,
        atlas: Option<&RgbaImage>,
    ) -> Result<()> {
        let atlas = atlas.ok_or(Error::MissingTexture)?;
        let color = transform.color.to_color();
        if color[3] == 0.0 {
            return Ok(());
        }

        let tex_w = atlas.width() as f32;
        let tex_h = atlas.height() as f32;
        let sx = shape.left * tex_w;
        let sy = shape.top * tex_h;
        let sw = (shape.right - shape.left) * tex_w;
        let sh = (shape.bottom - shape.top) * tex_h;

        let width = f32::from(shape.width);
        let height = f32::from(shape.height);
        if sw <= 0.0 || sh <= 0.0 || width <= 0.0 || height <= 0.0 {
            return Ok(());
        }

        // Crop pixels map into the shape rectangle with the vertical axis
        // flipped, so the crop's top row lands at the rectangle's bottom
        // edge before the walk transform applies.
        let local = Transform2D::scale(width / sw, -height / sh)
            .mult(Transform2D::translate(shape.offset_x, shape.offset_y + height));
        let matrix = local.mult(transform.position);
        self.blit(atlas, (sx, sy, sw, sh), matrix, color);
        Ok(())
    }
}
