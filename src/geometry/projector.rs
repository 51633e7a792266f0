//! Projection of elastics onto live tooth rectangles
//!
//! The render surface owns where teeth are drawn. It hands the projector a
//! [`RectProvider`], and the projector turns every elastic into drawing
//! primitives in paint order. Projection is always a full recompute from the
//! current rectangles.

use std::collections::HashMap;

use log::debug;

use crate::palette::Palette;
use crate::store::{Elastic, ElasticPoint};

use super::types::{Point, Rect};

/// Extra stroke width of the shadow drawn under a highlighted elastic
pub const SHADOW_EXTRA_WIDTH: f64 = 4.0;
/// Opacity of the shadow drawn under a highlighted elastic
pub const SHADOW_OPACITY: f64 = 0.35;
/// Marker radius in excess of the elastic thickness
pub const MARKER_EXTRA_RADIUS: f64 = 2.0;

/// Source of live tooth-side rectangles
pub trait RectProvider {
    /// Rectangle of a tooth side, if it is currently laid out
    fn rect(&self, point: ElasticPoint) -> Option<Rect>;

    /// Bounding rectangle of the drawing surface
    fn surface(&self) -> Rect;
}

/// A mutable rectangle lookup the render surface registers into
#[derive(Debug, Clone, Default)]
pub struct RectRegistry {
    rects: HashMap<ElasticPoint, Rect>,
    surface: Rect,
}

impl RectRegistry {
    pub fn new(surface: Rect) -> Self {
        Self {
            rects: HashMap::new(),
            surface,
        }
    }

    pub fn register(&mut self, point: ElasticPoint, rect: Rect) {
        self.rects.insert(point, rect);
    }

    pub fn unregister(&mut self, point: ElasticPoint) -> Option<Rect> {
        self.rects.remove(&point)
    }

    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl RectProvider for RectRegistry {
    fn rect(&self, point: ElasticPoint) -> Option<Rect> {
        self.rects.get(&point).copied()
    }

    fn surface(&self) -> Rect {
        self.surface
    }
}

/// What a polyline stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeRole {
    /// Wide translucent stroke under a highlighted elastic
    Shadow,
    /// The elastic itself
    Main,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Index of the elastic this stroke belongs to
    pub elastic: usize,
    pub role: StrokeRole,
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

/// Filled circle drawn on each point of a highlighted elastic
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub elastic: usize,
    pub center: Point,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline(Polyline),
    Marker(Marker),
}

/// Everything the surface has to draw, in paint order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub primitives: Vec<Primitive>,
}

impl Drawing {
    /// Main strokes only, in elastic order
    pub fn strokes(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polyline(line) if line.role == StrokeRole::Main => Some(line),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Inputs to one projection pass
pub struct Projection<'a> {
    pub elastics: &'a [Elastic],
    pub mirror: bool,
    pub palette: &'a Palette,
    pub highlighted: Option<usize>,
}

/// Project every elastic onto the current rectangles
pub fn project(projection: &Projection<'_>, rects: &dyn RectProvider) -> Drawing {
    let surface = rects.surface();
    let mut drawing = Drawing::default();

    for (index, elastic) in projection.elastics.iter().enumerate() {
        let points: Vec<Point> = elastic
            .teeth
            .iter()
            .filter_map(|&point| rects.rect(point))
            .map(|rect| to_surface(rect.center(), surface, projection.mirror))
            .collect();

        if points.len() < 2 {
            debug!("elastic #{index} has {} laid out points, skipped", points.len());
            continue;
        }

        let ty = projection.palette.get_or_first(elastic.kind);
        let highlighted = projection.highlighted == Some(index);

        if highlighted {
            drawing.primitives.push(Primitive::Polyline(Polyline {
                elastic: index,
                role: StrokeRole::Shadow,
                points: points.clone(),
                color: ty.color.clone(),
                width: ty.thickness + SHADOW_EXTRA_WIDTH,
                opacity: SHADOW_OPACITY,
            }));
        }

        drawing.primitives.push(Primitive::Polyline(Polyline {
            elastic: index,
            role: StrokeRole::Main,
            points: points.clone(),
            color: ty.color.clone(),
            width: ty.thickness,
            opacity: 1.0,
        }));

        if highlighted {
            drawing
                .primitives
                .extend(points.into_iter().map(|center| {
                    Primitive::Marker(Marker {
                        elastic: index,
                        center,
                        radius: ty.thickness + MARKER_EXTRA_RADIUS,
                        color: ty.color.clone(),
                    })
                }));
        }
    }

    drawing
}

/// Translate a page point into surface coordinates, reflecting x when mirrored
fn to_surface(point: Point, surface: Rect, mirror: bool) -> Point {
    let x = point.x - surface.x;
    let y = point.y - surface.y;
    if mirror {
        Point::new(surface.width - x, y)
    } else {
        Point::new(x, y)
    }
}
