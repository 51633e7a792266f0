//! Historical shapes of the elastics parameter
//!
//! Each entry of the elastics array is matched against the known shapes in
//! [`ElasticShape::DETECTION_ORDER`] and upgraded in memory to the current
//! `{teeth: [{tooth, outside}], type, time}` form. New schema generations are
//! supported by adding a variant and appending it to the detection order.

use serde_json::{Map, Value};

use crate::catalogue::Tooth;
use crate::error::LocatorError;
use crate::palette::{ElasticTypeId, Palette};
use crate::store::{Elastic, ElasticPoint, TimeScope};

static MISSING: Value = Value::Null;

/// A known encoding of a single elastic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElasticShape {
    /// Oldest links: a bare array of tooth ids
    Legacy,
    /// Object whose `teeth` is a flat array of tooth ids
    FlatTeeth,
    /// Object whose `teeth` is an array of `{tooth, outside}` pairs
    Current,
}

/// Shared state while upgrading the entries of one elastics array
pub struct Upgrade<'a> {
    pub palette: &'a Palette,
    pub diagnostics: &'a mut Vec<LocatorError>,
}

impl ElasticShape {
    pub const DETECTION_ORDER: [ElasticShape; 3] = [
        ElasticShape::Legacy,
        ElasticShape::FlatTeeth,
        ElasticShape::Current,
    ];

    /// Find the first shape that recognises the value
    pub fn detect(value: &Value) -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|shape| shape.matches(value))
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            ElasticShape::Legacy => value.is_array(),
            ElasticShape::FlatTeeth => teeth_array(value)
                .is_some_and(|teeth| !teeth.is_empty() && teeth.iter().all(Value::is_number)),
            ElasticShape::Current => {
                teeth_array(value).is_some_and(|teeth| teeth.iter().all(Value::is_object))
            }
        }
    }

    /// Convert a matching value into a current-shape elastic
    ///
    /// Returns `None` when fewer than two valid points remain.
    pub fn upgrade(self, index: usize, value: &Value, cx: &mut Upgrade<'_>) -> Option<Elastic> {
        let points = match self {
            ElasticShape::Legacy => {
                let ids = value.as_array()?;
                ids.iter()
                    .filter_map(|id| tooth_from_json(id, index, cx))
                    .map(ElasticPoint::outer)
                    .collect()
            }
            ElasticShape::FlatTeeth => {
                let object = value.as_object()?;
                // Elastics of this generation had a single side for all teeth
                let outside = object.get("outer").and_then(Value::as_bool).unwrap_or(true);
                teeth_array(value)?
                    .iter()
                    .filter_map(|id| tooth_from_json(id, index, cx))
                    .map(|tooth| ElasticPoint::new(tooth, outside))
                    .collect()
            }
            ElasticShape::Current => teeth_array(value)?
                .iter()
                .filter_map(|pair| {
                    let pair = pair.as_object()?;
                    let tooth = tooth_from_json(pair.get("tooth").unwrap_or(&MISSING), index, cx)?;
                    let outside = pair.get("outside").and_then(Value::as_bool).unwrap_or(true);
                    Some(ElasticPoint::new(tooth, outside))
                })
                .collect(),
        };

        let points = dedup_points(points, index, cx);
        if points.len() < 2 {
            cx.diagnostics.push(LocatorError::TooFewPoints { index });
            return None;
        }

        let (kind, time) = match value.as_object() {
            Some(object) => (resolve_type(object, index, cx), resolve_time(object, index, cx)),
            None => (cx.palette.first().id, TimeScope::default()),
        };
        Some(Elastic::new(points, kind, time))
    }
}

fn teeth_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_object()?.get("teeth")?.as_array()
}

fn tooth_from_json(value: &Value, index: usize, cx: &mut Upgrade<'_>) -> Option<Tooth> {
    match value.as_i64().map(Tooth::try_from) {
        Some(Ok(tooth)) => Some(tooth),
        _ => {
            cx.diagnostics.push(LocatorError::UnknownTooth {
                context: format!("elastic #{index}"),
                value: value.to_string(),
            });
            None
        }
    }
}

fn dedup_points(points: Vec<ElasticPoint>, index: usize, cx: &mut Upgrade<'_>) -> Vec<ElasticPoint> {
    let mut unique: Vec<ElasticPoint> = Vec::with_capacity(points.len());
    for point in points {
        if unique.contains(&point) {
            cx.diagnostics.push(LocatorError::DuplicatePoint {
                index,
                tooth: point.tooth.code(),
            });
        } else {
            unique.push(point);
        }
    }
    unique
}

/// Resolve a numeric id or display name against the palette
fn resolve_type(object: &Map<String, Value>, index: usize, cx: &mut Upgrade<'_>) -> ElasticTypeId {
    let fallback = cx.palette.first().id;
    let resolved = match object.get("type") {
        None | Some(Value::Null) => return fallback,
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|id| ElasticTypeId::try_from(id).ok())
            .filter(|id| cx.palette.contains(*id)),
        Some(Value::String(s)) => cx.palette.resolve_name(s).or_else(|| {
            s.trim()
                .parse::<ElasticTypeId>()
                .ok()
                .filter(|id| cx.palette.contains(*id))
        }),
        Some(_) => None,
    };
    resolved.unwrap_or_else(|| {
        cx.diagnostics.push(LocatorError::UnknownType {
            index,
            value: object.get("type").map(Value::to_string).unwrap_or_default(),
        });
        fallback
    })
}

fn resolve_time(object: &Map<String, Value>, index: usize, cx: &mut Upgrade<'_>) -> TimeScope {
    match object.get("time") {
        None | Some(Value::Null) => TimeScope::default(),
        Some(value) => match value.as_str().and_then(TimeScope::from_code) {
            Some(time) => time,
            None => {
                cx.diagnostics.push(LocatorError::UnknownTime {
                    index,
                    value: value.to_string(),
                });
                TimeScope::default()
            }
        },
    }
}
