mod canvas;
mod frame;
mod sink;
mod video;
mod walker;

pub use canvas::Canvas;
pub use sink::{BlitSink, Measurer};

use std::fs;
use std::path::Path;

use image::RgbaImage;
use once_cell::sync::Lazy;
use regex::Regex;
use strum_macros::{Display, EnumString};

use crate::error::{Error, Result};
use crate::resources::{Animation, Sprite};
use crate::types::{Box2D, SpriteTransform, Transform2D};
use walker::Scope;

/// Default display scale applied on top of any file-declared scale.
const DISPLAY_SCALE: f32 = 2.0;

/// Padding around a measured sprite before rasterising, in pixels.
const CANVAS_MARGIN: f32 = 16.0;

/// The closed set of animation directories shipped by the game data.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum AnimationKind {
    Npcs,
    Dynamics,
    Equipments,
    Gui,
    Interactives,
    Pets,
    Players,
    Resources,
}

/// Name patterns marking a sprite as the default still pose, in
/// precedence order.
static STATIC_SPRITE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "1_AnimStatique-Boucle$",
        "1_AnimStatic-Boucle$",
        "1_AnimStatique$",
        "1_AnimStatic$",
        "1_AnimStatique",
        "1_AnimStatic",
        "1_AnimMarche",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static sprite pattern"))
    .collect()
});

/// Where a discovered sprite lives relative to the renderer that found
/// it: locally, or in the n-th child renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpriteHandle {
    pub id: i16,
    pub reference: Option<usize>,
}

/// Owns one decoded animation, its atlas image, and a renderer for every
/// sibling file the local index names. The tree has a single owning
/// root; dropping it releases all children and textures.
pub struct AnimationRenderer {
    animation: Animation,
    texture: Option<RgbaImage>,
    children: Vec<AnimationRenderer>,
}

impl AnimationRenderer {
    /// Wraps an already-decoded animation with no atlas and no children.
    #[must_use]
    pub fn new(animation: Animation) -> Self {
        Self { animation, texture: None, children: Vec::new() }
    }

    /// Wraps a decoded animation together with an atlas image.
    #[must_use]
    pub fn with_texture(animation: Animation, texture: RgbaImage) -> Self {
        Self { animation, texture: Some(texture), children: Vec::new() }
    }

    /// Loads `animations/<kind>/<id>.anm` under `root`, then every
    /// sibling file its index names, and finally the atlas image.
    pub fn load(root: &Path, kind: AnimationKind, id: &str) -> Result<Self> {
        let dir = root.join("animations").join(kind.to_string());
        let path = dir.join(format!("{}.anm", id));
        Self::load_file(&dir, &path)
    }

    fn load_file(dir: &Path, path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading animation");
        let bytes = fs::read(path)?;
        let animation = Animation::decode(&bytes)?;

        let mut children = Vec::new();
        if let Some(index) = &animation.index {
            for name in &index.file_names {
                let file = if name.ends_with(".anm") {
                    name.clone()
                } else {
                    format!("{}.anm", name)
                };
                children.push(Self::load_file(dir, &dir.join(file))?);
            }
        }

        let texture = match &animation.texture {
            Some(texture) => {
                let path = dir.join("Atlas").join(format!("{}.png", texture.name));
                tracing::debug!(path = %path.display(), "loading atlas");
                Some(image::open(&path)?.into_rgba8())
            }
            None => None,
        };

        Ok(Self { animation, texture, children })
    }

    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[must_use]
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub(crate) fn texture(&self) -> Option<&RgbaImage> {
        self.texture.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[AnimationRenderer] {
        &self.children
    }

    /// Scale to render at: the file's own scale times the display
    /// default.
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        let scale = self
            .animation
            .index
            .as_ref()
            .and_then(|index| index.scale)
            .unwrap_or(1.0);
        scale * DISPLAY_SCALE
    }

    /// Finds the default still sprite: every pattern is tried against the
    /// local sprites first, then against each child renderer in order.
    pub fn find_static_sprite(&self) -> Result<SpriteHandle> {
        for pattern in STATIC_SPRITE_PATTERNS.iter() {
            if let Some(sprite) = match_sprite(&self.animation, pattern) {
                return Ok(SpriteHandle { id: sprite.id, reference: None });
            }
        }
        for (at, child) in self.children.iter().enumerate() {
            for pattern in STATIC_SPRITE_PATTERNS.iter() {
                if let Some(sprite) = match_sprite(&child.animation, pattern) {
                    return Ok(SpriteHandle { id: sprite.id, reference: Some(at) });
                }
            }
        }
        Err(Error::NoStaticSprite)
    }

    /// Frames in one loop of the referenced sprite.
    pub fn frame_count(&self, handle: SpriteHandle) -> Result<usize> {
        let (_, _, sprite) = self.resolve(handle)?;
        Ok(sprite.frame_count())
    }

    /// Bound of everything the sprite draws, at effective scale, for one
    /// frame or across all of them.
    pub fn measure(&self, handle: SpriteHandle, frame: Option<usize>) -> Result<Box2D> {
        let (renderer, parent, sprite) = self.resolve(handle)?;
        let scope = Scope { current: renderer, parent };
        let scale = self.effective_scale();
        let root = SpriteTransform::from_position(Transform2D::scale(scale, scale));
        let mut measurer = Measurer::default();
        match frame {
            Some(frame) => walker::render_sprite(scope, &mut measurer, sprite, &root, frame)?,
            None => {
                for frame in 0..sprite.frame_count().max(1) {
                    walker::render_sprite(scope, &mut measurer, sprite, &root, frame)?;
                }
            }
        }
        Ok(measurer.bounds())
    }

    /// Renders one frame to PNG bytes. With `frame` unset the canvas is
    /// sized across all frames and frame 0 is drawn.
    pub fn render_still(&self, handle: SpriteHandle, frame: Option<usize>) -> Result<Vec<u8>> {
        let bounds = self.measure(handle, frame)?;
        self.render_into(handle, frame.unwrap_or(0), bounds)
    }

    /// Renders every frame at a fixed canvas size and hands the PNG
    /// sequence to the external video encoder.
    pub fn render_video(&self, handle: SpriteHandle) -> Result<Vec<u8>> {
        let bounds = self.measure(handle, None)?;
        let frame_count = self.frame_count(handle)?.max(1);
        let mut frames = Vec::with_capacity(frame_count);
        for frame in 0..frame_count {
            frames.push(self.render_into(handle, frame, bounds)?);
        }
        video::encode_webm(&frames, self.animation.frame_rate)
    }

    fn render_into(&self, handle: SpriteHandle, frame: usize, bounds: Box2D) -> Result<Vec<u8>> {
        let (renderer, parent, sprite) = self.resolve(handle)?;
        let bounds = bounds.inflate(CANVAS_MARGIN, CANVAS_MARGIN);
        let width = bounds.width().ceil().max(1.0) as u32;
        let height = bounds.height().ceil().max(1.0) as u32;
        let (center_x, center_y) = bounds.center();

        let scale = self.effective_scale();
        let position = Transform2D::scale(scale, scale).mult(Transform2D::translate(
            width as f32 / 2.0 - center_x,
            height as f32 / 2.0 - center_y,
        ));
        let root = SpriteTransform::from_position(position);

        let mut canvas = Canvas::new(width, height);
        let scope = Scope { current: renderer, parent };
        walker::render_sprite(scope, &mut canvas, sprite, &root, frame)?;
        canvas.encode_png()
    }

    fn resolve(
        &self,
        handle: SpriteHandle,
    ) -> Result<(&AnimationRenderer, Option<&AnimationRenderer>, &Sprite)> {
        let (renderer, parent) = match handle.reference {
            None => (self, None),
            Some(at) => (
                self.children
                    .get(at)
                    .ok_or(Error::UnresolvedId { id: handle.id })?,
                Some(self),
            ),
        };
        let sprite = renderer
            .animation
            .sprite(handle.id)
            .ok_or(Error::UnresolvedId { id: handle.id })?;
        Ok((renderer, parent, sprite))
    }
}

fn match_sprite<'a>(animation: &'a Animation, pattern: &Regex) -> Option<&'a Sprite> {
    animation.sprites.iter().find(|sprite| {
        sprite
            .name
            .as_deref()
            .map_or(false, |name| pattern.is_match(name))
    })
}
