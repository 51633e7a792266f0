//! Elastistent - plan orthodontic elastics on a dental arch and share them as a link
//!
//! This library provides the tooth catalogue, the configuration store, the
//! locator codec that turns a configuration into a short URL query and back,
//! and the geometry projector that turns elastics into drawable polylines.
//!
//! # Example
//!
//! ```rust
//! use elastistent::render;
//!
//! let svg = render("?e=[[13,43]]");
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("ea-elastic"));
//! ```

pub mod catalogue;
pub mod effects;
pub mod error;
pub mod features;
pub mod geometry;
pub mod locator;
pub mod palette;
pub mod renderer;
pub mod session;
pub mod store;

pub use catalogue::{classify, Tooth};
pub use effects::{Effects, MemoryEffects, ShareOutcome};
pub use error::{CatalogueError, ConfigError, LocatorError, QrError, ShareError};
pub use features::Features;
pub use geometry::{project, Drawing, Point, Projection, Rect, RectProvider, RectRegistry};
pub use locator::{decode, encode, Decoded, Locator};
pub use palette::Palette;
pub use renderer::{render_qr_svg, render_svg, ArchLayout, SurfaceConfig, SvgConfig};
pub use session::Session;
pub use store::{Action, ConfigStore, Elastic, ElasticPoint, Snapshot, TimeScope};

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Store and codec policies
    pub features: Features,
    /// Elastic type palette
    pub palette: Palette,
    /// Tooth layout of the surface
    pub surface: SurfaceConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Elastic to draw highlighted
    pub highlighted: Option<usize>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the feature switches
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Set the elastic type palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the surface layout
    pub fn with_surface(mut self, surface: SurfaceConfig) -> Self {
        self.surface = surface;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    /// Highlight one elastic
    pub fn with_highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }
}

/// Render a locator to SVG with default configuration
///
/// Invalid parts of the locator are dropped (and logged); rendering itself
/// never fails.
pub fn render(locator: &str) -> String {
    render_with_config(locator, RenderConfig::default())
}

/// Render a locator to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use elastistent::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_svg(SvgConfig::default().with_standalone(false))
///     .with_highlighted(Some(0));
///
/// let svg = render_with_config("e=[[11,41]]&m=1", config);
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("ea-marker"));
/// ```
pub fn render_with_config(locator: &str, config: RenderConfig) -> String {
    let session = Session::start(MemoryEffects::new(locator), config.features, config.palette);
    render_session(session, &config.surface, &config.svg, config.highlighted)
}

/// Paint a session onto the reference arch surface
pub fn render_session<E: Effects>(
    mut session: Session<E>,
    surface: &SurfaceConfig,
    svg: &SvgConfig,
    highlighted: Option<usize>,
) -> String {
    let layout = ArchLayout::new(surface.clone());
    session.set_highlighted(highlighted);
    session.on_paint(&layout.registry());
    render_svg(
        session.snapshot(),
        session.drawing(),
        &layout,
        session.store().features(),
        svg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_locator() {
        let svg = render("");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("ea-elastic"));
    }

    #[test]
    fn test_render_elastics() {
        let svg = render("e=[[11,12],[31,32,33]]");
        assert_eq!(svg.matches("ea-elastic ea-stroke").count(), 2);
    }

    #[test]
    fn test_render_ignores_garbage() {
        let svg = render("e=not-json&t=[99]&m=maybe");
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("ea-disabled"));
    }

    #[test]
    fn test_render_disabled_teeth() {
        let svg = render("t=[18,28]");
        assert_eq!(svg.matches("ea-disabled").count(), 2);
    }

    #[test]
    fn test_render_highlight() {
        let config = RenderConfig::new().with_highlighted(Some(0));
        let svg = render_with_config("e=[[11,12,13]]", config);
        assert_eq!(svg.matches("ea-marker").count(), 3);
        assert!(svg.contains("ea-shadow"));
    }

    #[test]
    fn test_render_highlight_out_of_range() {
        let config = RenderConfig::new().with_highlighted(Some(4));
        let svg = render_with_config("e=[[11,12]]", config);
        assert!(!svg.contains("ea-marker"));
    }

    #[test]
    fn test_render_without_disable_capability() {
        let config = RenderConfig::new().with_features(Features::new().with_disable_teeth(false));
        let svg = render_with_config("t=[18,28]", config);
        assert!(!svg.contains("ea-disabled"));
    }
}
