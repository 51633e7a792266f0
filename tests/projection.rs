//! Projection tests against a hand-built surface

use elastistent::catalogue::Tooth;
use elastistent::geometry::{Primitive, StrokeRole};
use elastistent::{
    project, Elastic, ElasticPoint, Palette, Point, Projection, Rect, RectProvider, TimeScope,
};
use pretty_assertions::assert_eq;

fn tooth(code: u8) -> Tooth {
    Tooth::new(code).unwrap()
}

/// A surface that lays every tooth side out on a fixed grid, offset on the page
struct GridSurface {
    origin: Point,
    missing: Option<ElasticPoint>,
}

impl RectProvider for GridSurface {
    fn rect(&self, point: ElasticPoint) -> Option<Rect> {
        if self.missing == Some(point) {
            return None;
        }
        let (row, column) = point.tooth.grid_position();
        let y = if point.outside == point.tooth.is_upper() {
            0.0
        } else {
            10.0
        };
        Some(Rect::new(
            self.origin.x + column as f64 * 20.0,
            self.origin.y + row as f64 * 40.0 + y,
            20.0,
            10.0,
        ))
    }

    fn surface(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, 320.0, 80.0)
    }
}

fn surface() -> GridSurface {
    GridSurface {
        origin: Point::new(500.0, 300.0),
        missing: None,
    }
}

fn elastic(points: &[ElasticPoint], kind: u32) -> Elastic {
    Elastic::new(points.to_vec(), kind, TimeScope::AllDay)
}

#[test]
fn test_points_are_surface_relative_centers() {
    let palette = Palette::default();
    let elastics = [elastic(
        &[ElasticPoint::outer(tooth(11)), ElasticPoint::outer(tooth(41))],
        1,
    )];
    let drawing = project(
        &Projection {
            elastics: &elastics,
            mirror: false,
            palette: &palette,
            highlighted: None,
        },
        &surface(),
    );

    let stroke = drawing.strokes().next().unwrap();
    // 11 is column 7 in the upper row, 41 column 7 in the lower row with its
    // outer side at the bottom
    assert_eq!(stroke.points, vec![Point::new(150.0, 5.0), Point::new(150.0, 55.0)]);
}

#[test]
fn test_mirror_reflects_around_surface_width() {
    let palette = Palette::default();
    let elastics = [elastic(
        &[ElasticPoint::outer(tooth(18)), ElasticPoint::outer(tooth(28))],
        1,
    )];
    let projection = |mirror| Projection {
        elastics: &elastics,
        mirror,
        palette: &palette,
        highlighted: None,
    };

    let plain = project(&projection(false), &surface());
    let mirrored = project(&projection(true), &surface());
    let plain: Vec<f64> = plain.strokes().next().unwrap().points.iter().map(|p| p.x).collect();
    let mirrored: Vec<f64> = mirrored
        .strokes()
        .next()
        .unwrap()
        .points
        .iter()
        .map(|p| p.x)
        .collect();

    assert_eq!(plain, vec![10.0, 310.0]);
    assert_eq!(mirrored, vec![310.0, 10.0]);
}

#[test]
fn test_highlight_paint_order() {
    let palette = Palette::default();
    let elastics = [
        elastic(
            &[ElasticPoint::outer(tooth(13)), ElasticPoint::outer(tooth(43))],
            1,
        ),
        elastic(
            &[
                ElasticPoint::outer(tooth(23)),
                ElasticPoint::inner(tooth(33)),
                ElasticPoint::outer(tooth(34)),
            ],
            3,
        ),
    ];
    let drawing = project(
        &Projection {
            elastics: &elastics,
            mirror: false,
            palette: &palette,
            highlighted: Some(1),
        },
        &surface(),
    );

    let order: Vec<&str> = drawing
        .primitives
        .iter()
        .map(|p| match p {
            Primitive::Polyline(line) if line.role == StrokeRole::Shadow => "shadow",
            Primitive::Polyline(_) => "stroke",
            Primitive::Marker(_) => "marker",
        })
        .collect();
    assert_eq!(
        order,
        vec!["stroke", "shadow", "stroke", "marker", "marker", "marker"]
    );

    let heavy = palette.get(3).unwrap();
    let Primitive::Polyline(shadow) = &drawing.primitives[1] else {
        panic!("expected shadow polyline");
    };
    assert_eq!(shadow.width, heavy.thickness + 4.0);
    assert_eq!(shadow.opacity, 0.35);
    let marker = drawing.markers().next().unwrap();
    assert_eq!(marker.radius, heavy.thickness + 2.0);
    assert_eq!(marker.color, heavy.color);
}

#[test]
fn test_unlaid_points_are_skipped() {
    let palette = Palette::default();
    let elastics = [
        elastic(
            &[ElasticPoint::outer(tooth(11)), ElasticPoint::outer(tooth(12))],
            1,
        ),
        elastic(
            &[
                ElasticPoint::outer(tooth(21)),
                ElasticPoint::outer(tooth(22)),
                ElasticPoint::outer(tooth(23)),
            ],
            1,
        ),
    ];
    let rects = GridSurface {
        missing: Some(ElasticPoint::outer(tooth(12))),
        ..surface()
    };
    let drawing = project(
        &Projection {
            elastics: &elastics,
            mirror: false,
            palette: &palette,
            highlighted: None,
        },
        &rects,
    );

    let strokes: Vec<_> = drawing.strokes().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].elastic, 1);
}

#[test]
fn test_no_elastics_no_primitives() {
    let palette = Palette::default();
    let drawing = project(
        &Projection {
            elastics: &[],
            mirror: true,
            palette: &palette,
            highlighted: Some(0),
        },
        &surface(),
    );
    assert!(drawing.is_empty());
}
