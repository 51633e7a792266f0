//! Geometry projection of elastics onto tooth rectangles

pub mod projector;
pub mod types;

pub use projector::{
    project, Drawing, Marker, Polyline, Primitive, Projection, RectProvider, RectRegistry,
    StrokeRole,
};
pub use types::{Point, Rect};
