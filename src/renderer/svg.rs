//! SVG generation for the arch surface
//!
//! Draws the tooth grid from a snapshot and overlays the projector's
//! primitives exactly as given, with no further geometric interpretation.

use crate::catalogue::{SpecialTooth, Tooth};
use crate::features::Features;
use crate::geometry::{Drawing, Point, Primitive, Rect, StrokeRole};
use crate::store::{ElasticPoint, Snapshot};

use super::{ArchLayout, SvgConfig};

const DISABLED_FILL: &str = "#d1d5db";
const SELECTED_FILL: &str = "#3b82f6";
const MIDDLE_INCISOR_FILL: &str = "#bbf7d0";
const CANINE_FILL: &str = "#e9d5ff";
const TOOTH_FILL: &str = "#fefce8";

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    overlays: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            overlays: vec![],
            indent: 1,
        }
    }

    /// Add a CSS rule to the style block
    pub fn add_style(&mut self, css: impl Into<String>) {
        self.styles.push(css.into());
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, base: &str, classes: &[String]) -> String {
        let prefix = self.prefix();
        std::iter::once(format!("{}{}", prefix, base))
            .chain(classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, rect: Rect, classes: &[String], fill: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            self.indent_str(),
            id_attr,
            self.class_list("tooth", classes),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.config.corner_radius,
            fill
        ));
    }

    /// Add centered text
    pub fn add_text(&mut self, text: &str, at: Point, fill: &str) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="12" fill="{}">{}</text>"#,
            self.indent_str(),
            self.class_list("label", &[]),
            at.x,
            at.y,
            fill,
            escape_xml(text)
        ));
    }

    /// Add a stroked polyline on top of the teeth
    pub fn add_polyline(&mut self, points: &[Point], classes: &[String], styles: &str) {
        self.overlays.push(format!(
            r#"{}<path class="{}" d="{}" fill="none" stroke-linecap="round" stroke-linejoin="round"{}/>"#,
            self.indent_str(),
            self.class_list("elastic", classes),
            path_to_d(points),
            styles
        ));
    }

    /// Add a filled circle on top of the teeth
    pub fn add_marker(&mut self, center: Point, radius: f64, fill: &str) {
        self.overlays.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            self.indent_str(),
            self.class_list("marker", &[]),
            center.x,
            center.y,
            radius,
            fill
        ));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Elastics are drawn over the teeth
        for overlay in &self.overlays {
            svg.push_str(overlay);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render the tooth grid and a projected drawing to an SVG string
///
/// The drawing must have been projected against `layout`'s rectangles.
pub fn render_svg(
    snapshot: &Snapshot,
    drawing: &Drawing,
    layout: &ArchLayout,
    features: &Features,
    config: &SvgConfig,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let surface = layout.surface();
    let prefix = config.class_prefix.clone().unwrap_or_default();
    builder.add_style(format!(".{prefix}label {{ font-family: sans-serif; }}"));

    for tooth in Tooth::ALL {
        render_tooth(tooth, snapshot, layout, surface, features, config, &mut builder);
    }

    for primitive in &drawing.primitives {
        match primitive {
            Primitive::Polyline(line) => {
                let role = match line.role {
                    StrokeRole::Shadow => "shadow",
                    StrokeRole::Main => "stroke",
                };
                let styles = format!(
                    r#" stroke="{}" stroke-width="{}" opacity="{}" data-elastic="{}""#,
                    line.color, line.width, line.opacity, line.elastic
                );
                builder.add_polyline(&line.points, &[role.to_string()], &styles);
            }
            Primitive::Marker(marker) => {
                builder.add_marker(marker.center, marker.radius, &marker.color);
            }
        }
    }

    builder.build(surface.width, surface.height)
}

/// Draw one tooth, reflected like the rest of the surface when mirrored
fn render_tooth(
    tooth: Tooth,
    snapshot: &Snapshot,
    layout: &ArchLayout,
    surface: Rect,
    features: &Features,
    config: &SvgConfig,
    builder: &mut SvgBuilder,
) {
    let place = |rect: Rect| {
        let local = Rect::new(rect.x - surface.x, rect.y - surface.y, rect.width, rect.height);
        if snapshot.mirror {
            local.mirrored(surface.width)
        } else {
            local
        }
    };

    let disabled = features.disable_teeth && snapshot.is_disabled(tooth);
    let mut classes = Vec::new();
    if disabled {
        classes.push("disabled".to_string());
    }
    if features.tooth_icons {
        classes.push(format!("{:?}", tooth.tooth_type().family()).to_lowercase());
    }

    let rect = place(layout.tooth_rect(tooth));
    let id = format!("tooth-{}", tooth);
    builder.add_rect(Some(&id), rect, &classes, tooth_fill(tooth, disabled, features));

    for outside in [true, false] {
        let point = ElasticPoint::new(tooth, outside);
        if snapshot.is_selected(point) {
            let side = place(layout.side_rect(point));
            let side_class = if outside { "outside" } else { "inside" };
            let classes = ["selected".to_string(), side_class.to_string()];
            builder.add_rect(None, side, &classes, SELECTED_FILL);
        }
    }

    if config.tooth_labels {
        let text_fill = if snapshot.selection.iter().any(|p| p.tooth == tooth) {
            "#ffffff"
        } else {
            "#374151"
        };
        builder.add_text(&tooth.to_string(), rect.center(), text_fill);
    }
}

fn tooth_fill(tooth: Tooth, disabled: bool, features: &Features) -> &'static str {
    if disabled {
        return DISABLED_FILL;
    }
    if features.highlight_special_teeth {
        match tooth.special() {
            Some(SpecialTooth::MiddleIncisor) => return MIDDLE_INCISOR_FILL,
            Some(SpecialTooth::Canine) => return CANINE_FILL,
            None => {}
        }
    }
    TOOTH_FILL
}

/// Convert a path of points to an SVG path d attribute
fn path_to_d(path: &[Point]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", path[0].x, path[0].y);
    for point in &path[1..] {
        d.push_str(&format!(" L{} {}", point.x, point.y));
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{project, Projection};
    use crate::palette::Palette;
    use crate::store::{Elastic, TimeScope};

    fn tooth(code: u8) -> Tooth {
        Tooth::new(code).unwrap()
    }

    fn render(snapshot: &Snapshot, highlighted: Option<usize>) -> String {
        let layout = ArchLayout::default();
        let palette = Palette::default();
        let drawing = project(
            &Projection {
                elastics: &snapshot.elastics,
                mirror: snapshot.mirror,
                palette: &palette,
                highlighted,
            },
            &layout.registry(),
        );
        render_svg(
            snapshot,
            &drawing,
            &layout,
            &Features::default(),
            &SvgConfig::default(),
        )
    }

    fn with_elastic() -> Snapshot {
        Snapshot {
            elastics: vec![Elastic::new(
                vec![ElasticPoint::outer(tooth(13)), ElasticPoint::outer(tooth(43))],
                2,
                TimeScope::AllDay,
            )],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_path_to_d() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        assert_eq!(path_to_d(&path), "M0 0 L100 0 L100 100");
        assert_eq!(path_to_d(&[]), "");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_renders_all_teeth() {
        let svg = render(&Snapshot::default(), None);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"id="tooth-"#).count(), 32);
        assert!(svg.contains(r#"viewBox="0 0 792 152""#));
        assert!(!svg.contains("ea-elastic"));
    }

    #[test]
    fn test_renders_elastic_path() {
        let svg = render(&with_elastic(), None);
        // 13 sits in column 5, 43 in column 5 of the lower row
        assert!(svg.contains(r#"d="M276 30 L276 122""#), "{svg}");
        assert!(svg.contains(r##"stroke="#f97316""##));
        assert!(!svg.contains("ea-marker"));
    }

    #[test]
    fn test_mirrored_elastic_path() {
        let mut snapshot = with_elastic();
        snapshot.mirror = true;
        let svg = render(&snapshot, None);
        assert!(svg.contains(r#"d="M516 30 L516 122""#), "{svg}");
    }

    #[test]
    fn test_highlight_renders_shadow_and_markers() {
        let svg = render(&with_elastic(), Some(0));
        assert!(svg.contains("ea-elastic ea-shadow"));
        assert_eq!(svg.matches("ea-marker").count(), 2);
    }

    #[test]
    fn test_tooth_fills() {
        let mut snapshot = Snapshot::default();
        snapshot.disabled.insert(tooth(11));
        snapshot.selection.push(ElasticPoint::inner(tooth(24)));
        let svg = render(&snapshot, None);
        assert!(svg.contains(r#"id="tooth-11" class="ea-tooth ea-disabled""#));
        assert!(svg.contains(r#"class="ea-tooth ea-selected ea-inside""#));
        assert!(svg.contains(&format!(r#"fill="{}""#, CANINE_FILL)));
    }

    #[test]
    fn test_labels_and_corners_follow_config() {
        let layout = ArchLayout::default();
        let config = SvgConfig::default()
            .with_tooth_labels(false)
            .with_corner_radius(0.0);
        let svg = render_svg(
            &Snapshot::default(),
            &Drawing::default(),
            &layout,
            &Features::default(),
            &config,
        );
        assert!(!svg.contains("<text"));
        assert!(svg.contains(r#"rx="0""#));
    }
}
