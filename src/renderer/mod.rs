//! Reference render surface
//!
//! Lays teeth out on a fixed grid, supplies their rectangles to the
//! projector, and renders the grid plus the projected drawing as SVG. The
//! share link itself can be rendered as a QR code.

pub mod config;
pub mod qr;
pub mod surface;
pub mod svg;

pub use config::{SurfaceConfig, SvgConfig};
pub use qr::render_qr_svg;
pub use surface::ArchLayout;
pub use svg::render_svg;
