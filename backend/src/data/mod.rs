pub mod transform;
pub mod settings;
pub mod dirty_flag;
pub mod color;

use lyon::geom::euclid;

pub mod prelude {
    pub use super::transform::{ AffineTransform, ViewTransform };
    pub use super::settings::{ AxisStyle, Settings };
    pub use super::color::Rgba8;

    pub use lyon::path::Path;

    /// The grid's own logical frame, before the view transform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GridSpace;
    pub type GridPoint = super::euclid::Point2D<f32, GridSpace>;
    pub type GridVector = super::euclid::Vector2D<f32, GridSpace>;

    /// Pixels on the drawing surface.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScreenSpace;
    pub type ScreenPoint = super::euclid::Point2D<f32, ScreenSpace>;
    pub type ScreenVector = super::euclid::Vector2D<f32, ScreenSpace>;
    pub type ScreenSize = super::euclid::Size2D<f32, ScreenSpace>;
    pub type ScreenRect = super::euclid::Rect<f32, ScreenSpace>;

    pub use super::dirty_flag::DirtyFlag;
}
