//! Configuration for the arch surface and SVG rendering

use crate::geometry::Point;

/// Where and how large teeth are laid out
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Width of one tooth button
    pub tooth_width: f64,

    /// Height of one tooth button; each side gets half
    pub tooth_height: f64,

    /// Spacing between neighbouring teeth
    pub gap: f64,

    /// Padding between the surface edge and the teeth
    pub padding: f64,

    /// Page position of the surface's top-left corner
    pub origin: Point,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tooth_width: 40.0,
            tooth_height: 56.0,
            gap: 8.0,
            padding: 16.0,
            origin: Point::new(0.0, 0.0),
        }
    }
}

impl SurfaceConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tooth size
    pub fn with_tooth_size(mut self, width: f64, height: f64) -> Self {
        self.tooth_width = width;
        self.tooth_height = height;
        self
    }

    /// Set the spacing between teeth
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the surface padding
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Place the surface at a page position
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Point::new(x, y);
        self
    }
}

/// How the arch surface is written out as SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Emit the XML declaration before the root element
    pub standalone: bool,

    /// One element per line, indented
    pub pretty_print: bool,

    /// Print the tooth number in the middle of every tooth
    pub tooth_labels: bool,

    /// Corner radius of the tooth buttons
    pub corner_radius: f64,

    /// Prefix for CSS class names (e.g., "ea-" for "ea-tooth")
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            tooth_labels: true,
            corner_radius: 4.0,
            class_prefix: Some("ea-".to_string()),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_tooth_labels(mut self, labels: bool) -> Self {
        self.tooth_labels = labels;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Emit bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}
