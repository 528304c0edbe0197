pub mod box2d;
pub mod color;
pub mod transform;

pub use box2d::Box2D;
pub use color::ColorTransform;
pub use transform::{SpriteTransform, Transform2D};
