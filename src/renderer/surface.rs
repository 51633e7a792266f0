//! Static arch layout
//!
//! Lays the catalogue out as two rows of sixteen teeth, the way the browser
//! grid does, and registers a rectangle for every tooth side. The outer side
//! of a tooth is the half facing the lips: the top half in the upper arch and
//! the bottom half in the lower arch.

use crate::catalogue::Tooth;
use crate::geometry::{Rect, RectRegistry};
use crate::store::ElasticPoint;

use super::SurfaceConfig;

/// Tooth rectangles in page coordinates
#[derive(Debug, Clone)]
pub struct ArchLayout {
    config: SurfaceConfig,
}

impl ArchLayout {
    pub fn new(config: SurfaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Bounding rectangle of the whole surface
    pub fn surface(&self) -> Rect {
        let c = &self.config;
        Rect::new(
            c.origin.x,
            c.origin.y,
            2.0 * c.padding + 16.0 * c.tooth_width + 15.0 * c.gap,
            2.0 * c.padding + 2.0 * c.tooth_height + c.gap,
        )
    }

    /// Rectangle of the whole tooth button
    pub fn tooth_rect(&self, tooth: Tooth) -> Rect {
        let c = &self.config;
        let (row, column) = tooth.grid_position();
        Rect::new(
            c.origin.x + c.padding + column as f64 * (c.tooth_width + c.gap),
            c.origin.y + c.padding + row as f64 * (c.tooth_height + c.gap),
            c.tooth_width,
            c.tooth_height,
        )
    }

    /// Rectangle of one side of a tooth
    pub fn side_rect(&self, point: ElasticPoint) -> Rect {
        let (top, bottom) = self.tooth_rect(point.tooth).split_horizontally();
        if point.outside == point.tooth.is_upper() {
            top
        } else {
            bottom
        }
    }

    /// Register every tooth side, as the surface does after layout
    pub fn registry(&self) -> RectRegistry {
        let mut registry = RectRegistry::new(self.surface());
        for tooth in Tooth::ALL {
            for outside in [true, false] {
                let point = ElasticPoint::new(tooth, outside);
                registry.register(point, self.side_rect(point));
            }
        }
        registry
    }
}

impl Default for ArchLayout {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}
