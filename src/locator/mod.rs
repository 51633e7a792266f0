//! Locator codec
//!
//! Maps the shareable part of the configuration to and from a short URL
//! query string:
//!
//! | key   | meaning           | encoding                                     |
//! |-------|-------------------|----------------------------------------------|
//! | `e`   | elastics          | JSON array of `{teeth, type, time}` objects  |
//! | `t`   | disabled teeth    | JSON array of tooth ids                      |
//! | `m`   | mirror flag       | `1`, omitted when off                        |
//! | `lng` | language override | two-letter code                              |
//!
//! Decoding never fails. Anything that cannot be understood is dropped and
//! reported as a [`LocatorError`] diagnostic.

pub mod shapes;

pub use shapes::ElasticShape;

use std::collections::BTreeSet;

use log::{debug, warn};
use serde_json::Value;
use url::{form_urlencoded, Url};

use crate::catalogue::Tooth;
use crate::error::LocatorError;
use crate::features::Features;
use crate::palette::Palette;
use crate::store::Elastic;

use shapes::Upgrade;

pub const ELASTICS_KEY: &str = "e";
pub const DISABLED_KEY: &str = "t";
pub const MIRROR_KEY: &str = "m";
pub const LANGUAGE_KEY: &str = "lng";
/// Parameter name used by the first published links
pub const LEGACY_ELASTICS_KEY: &str = "elastics";

/// The serializable part of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locator {
    pub elastics: Vec<Elastic>,
    pub disabled: BTreeSet<Tooth>,
    pub mirror: bool,
    pub language: Option<String>,
}

/// Result of decoding a locator: the valid state plus everything that was dropped
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub locator: Locator,
    pub diagnostics: Vec<LocatorError>,
}

impl Locator {
    /// Whether encoding would produce an empty query
    pub fn is_empty(&self) -> bool {
        self.elastics.is_empty()
            && self.disabled.is_empty()
            && !self.mirror
            && self.language.is_none()
    }
}

/// Encode a locator into a canonical query string (without the leading `?`)
///
/// Default values are omitted, so the empty configuration encodes to `""`.
pub fn encode(locator: &Locator, features: &Features) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !locator.elastics.is_empty() {
        let json = serde_json::to_string(&locator.elastics).expect("elastics always serialize");
        query.append_pair(ELASTICS_KEY, &json);
    }
    if !locator.disabled.is_empty() {
        let json = serde_json::to_string(&locator.disabled).expect("teeth always serialize");
        query.append_pair(DISABLED_KEY, &json);
    }
    if locator.mirror && features.mirror_in_locator {
        query.append_pair(MIRROR_KEY, "1");
    }
    if let Some(language) = &locator.language {
        query.append_pair(LANGUAGE_KEY, language);
    }

    query.finish()
}

/// Decode a full URL or a bare query string
pub fn decode(input: &str, palette: &Palette, features: &Features) -> Decoded {
    let mut decoded = Decoded::default();
    let query = match query_part(input) {
        Ok(query) => query,
        Err(err) => {
            report(&err);
            decoded.diagnostics.push(err);
            return decoded;
        }
    };

    let mut elastics: Option<String> = None;
    let mut legacy_elastics: Option<String> = None;
    let mut disabled: Option<String> = None;
    let mut mirror: Option<String> = None;
    let mut language: Option<String> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins, like URLSearchParams::get
        let slot = match key.as_ref() {
            ELASTICS_KEY => &mut elastics,
            LEGACY_ELASTICS_KEY => &mut legacy_elastics,
            DISABLED_KEY => &mut disabled,
            MIRROR_KEY => &mut mirror,
            LANGUAGE_KEY => &mut language,
            other => {
                debug!("ignoring locator parameter '{other}'");
                decoded
                    .diagnostics
                    .push(LocatorError::UnknownParameter(other.to_string()));
                continue;
            }
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let mut diagnostics = Vec::new();
    let elastics_param = match (elastics, legacy_elastics) {
        (Some(value), _) => Some((ELASTICS_KEY, value)),
        (None, Some(value)) => Some((LEGACY_ELASTICS_KEY, value)),
        (None, None) => None,
    };
    if let Some((param, raw)) = elastics_param {
        decoded.locator.elastics = decode_elastics(param, &raw, palette, &mut diagnostics);
    }
    if let Some(raw) = disabled {
        decoded.locator.disabled = decode_disabled(&raw, &mut diagnostics);
    }
    if let Some(raw) = mirror {
        if features.mirror_in_locator {
            decoded.locator.mirror = decode_mirror(&raw, &mut diagnostics);
        } else {
            debug!("mirror flag in locator ignored");
        }
    }
    if let Some(raw) = language {
        decoded.locator.language = decode_language(&raw, &mut diagnostics);
    }

    for err in &diagnostics {
        report(err);
    }
    decoded.diagnostics.extend(diagnostics);
    decoded
}

/// Extract the query from a full URL, or take whatever follows the first `?`
fn query_part(input: &str) -> Result<String, LocatorError> {
    let input = input.trim();
    if input.contains("://") {
        let url = Url::parse(input).map_err(|e| LocatorError::InvalidUrl(e.to_string()))?;
        return Ok(url.query().unwrap_or_default().to_string());
    }
    let input = input.split('#').next().unwrap_or_default();
    // Host-style locators like `example.org/app?e=...` carry a path before the query
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    Ok(query.to_string())
}

fn parse_array(param: &str, raw: &str, diagnostics: &mut Vec<LocatorError>) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => {
            diagnostics.push(LocatorError::NotAnArray {
                param: param.to_string(),
            });
            None
        }
        Err(e) => {
            diagnostics.push(LocatorError::MalformedJson {
                param: param.to_string(),
                message: e.to_string(),
            });
            None
        }
    }
}

fn decode_elastics(
    param: &str,
    raw: &str,
    palette: &Palette,
    diagnostics: &mut Vec<LocatorError>,
) -> Vec<Elastic> {
    let Some(items) = parse_array(param, raw, diagnostics) else {
        return Vec::new();
    };

    let mut cx = Upgrade {
        palette,
        diagnostics,
    };
    let mut elastics = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match ElasticShape::detect(item) {
            Some(shape) => {
                if let Some(elastic) = shape.upgrade(index, item, &mut cx) {
                    elastics.push(elastic);
                }
            }
            None => cx
                .diagnostics
                .push(LocatorError::UnrecognisedShape { index }),
        }
    }
    elastics
}

fn decode_disabled(raw: &str, diagnostics: &mut Vec<LocatorError>) -> BTreeSet<Tooth> {
    let Some(items) = parse_array(DISABLED_KEY, raw, diagnostics) else {
        return BTreeSet::new();
    };

    items
        .iter()
        .filter_map(|item| match item.as_i64().map(Tooth::try_from) {
            Some(Ok(tooth)) => Some(tooth),
            _ => {
                diagnostics.push(LocatorError::UnknownTooth {
                    context: "disabled teeth".to_string(),
                    value: item.to_string(),
                });
                None
            }
        })
        .collect()
}

fn decode_mirror(raw: &str, diagnostics: &mut Vec<LocatorError>) -> bool {
    match raw {
        "1" => true,
        "0" => false,
        other => {
            diagnostics.push(LocatorError::InvalidMirror(other.to_string()));
            false
        }
    }
}

fn decode_language(raw: &str, diagnostics: &mut Vec<LocatorError>) -> Option<String> {
    if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(raw.to_ascii_lowercase())
    } else {
        diagnostics.push(LocatorError::InvalidLanguage(raw.to_string()));
        None
    }
}

fn report(err: &LocatorError) {
    match err {
        LocatorError::UnknownParameter(_) => {}
        _ => warn!("locator: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ElasticPoint, TimeScope};
    use pretty_assertions::assert_eq;

    fn tooth(code: u8) -> Tooth {
        Tooth::new(code).unwrap()
    }

    fn dec(input: &str) -> Decoded {
        decode(input, &Palette::default(), &Features::default())
    }

    fn sample() -> Locator {
        Locator {
            elastics: vec![
                Elastic::new(
                    vec![ElasticPoint::outer(tooth(13)), ElasticPoint::outer(tooth(43))],
                    1,
                    TimeScope::AllDay,
                ),
                Elastic::new(
                    vec![
                        ElasticPoint::inner(tooth(16)),
                        ElasticPoint::outer(tooth(46)),
                        ElasticPoint::outer(tooth(45)),
                    ],
                    3,
                    TimeScope::Nighttime,
                ),
            ],
            disabled: [tooth(18), tooth(28)].into_iter().collect(),
            mirror: true,
            language: Some("nl".to_string()),
        }
    }

    #[test]
    fn test_empty_locator_encodes_to_empty_query() {
        assert_eq!(encode(&Locator::default(), &Features::default()), "");
    }

    #[test]
    fn test_defaults_are_omitted() {
        let locator = Locator {
            disabled: [tooth(11), tooth(21)].into_iter().collect(),
            ..Locator::default()
        };
        assert_eq!(encode(&locator, &Features::default()), "t=%5B11%2C21%5D");
    }

    #[test]
    fn test_encode_single_elastic() {
        let locator = Locator {
            elastics: vec![Elastic::new(
                vec![ElasticPoint::outer(tooth(11)), ElasticPoint::inner(tooth(12))],
                2,
                TimeScope::Daytime,
            )],
            ..Locator::default()
        };
        insta::assert_snapshot!(
            encode(&locator, &Features::default()),
            @"e=%5B%7B%22teeth%22%3A%5B%7B%22tooth%22%3A11%2C%22outside%22%3Atrue%7D%2C%7B%22tooth%22%3A12%2C%22outside%22%3Afalse%7D%5D%2C%22type%22%3A2%2C%22time%22%3A%22d%22%7D%5D"
        );
    }

    #[test]
    fn test_parameter_order() {
        let query = encode(&sample(), &Features::default());
        let keys: Vec<String> = form_urlencoded::parse(query.as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, vec!["e", "t", "m", "lng"]);
    }

    #[test]
    fn test_round_trip_locator() {
        let decoded = dec(&encode(&sample(), &Features::default()));
        assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
        assert_eq!(decoded.locator, sample());
    }

    #[test]
    fn test_mirror_policy_off() {
        let features = Features::default().with_mirror_in_locator(false);
        let query = encode(&sample(), &features);
        assert!(!query.contains("m=1"));

        let decoded = decode("m=1", &Palette::default(), &features);
        assert!(!decoded.locator.mirror);
    }

    #[test]
    fn test_mirror_values() {
        assert!(dec("m=1").locator.mirror);
        assert!(!dec("m=0").locator.mirror);
        let decoded = dec("m=yes");
        assert!(!decoded.locator.mirror);
        assert_eq!(
            decoded.diagnostics,
            vec![LocatorError::InvalidMirror("yes".to_string())]
        );
    }

    #[test]
    fn test_decode_legacy_bare_arrays() {
        let decoded = dec("?e=[[11,12]]");
        assert_eq!(
            decoded.locator.elastics,
            vec![Elastic::new(
                vec![ElasticPoint::outer(tooth(11)), ElasticPoint::outer(tooth(12))],
                1,
                TimeScope::AllDay,
            )]
        );
    }

    #[test]
    fn test_decode_legacy_parameter_name() {
        let decoded = dec("elastics=[[31,32,33]]");
        assert_eq!(decoded.locator.elastics.len(), 1);
        assert_eq!(decoded.locator.elastics[0].teeth.len(), 3);

        // The current key takes precedence
        let decoded = dec("elastics=[[31,32,33]]&e=[[11,21]]");
        assert_eq!(decoded.locator.elastics[0].teeth.len(), 2);
    }

    #[test]
    fn test_decode_full_url() {
        let decoded = dec("https://example.org/app/?e=%5B%5B11%2C41%5D%5D&m=1#top");
        assert_eq!(decoded.locator.elastics.len(), 1);
        assert!(decoded.locator.mirror);
    }

    #[test]
    fn test_decode_locator_without_scheme() {
        let decoded = dec("example.org/app?e=[[11,12]]&m=1#top");
        assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
        assert_eq!(decoded.locator.elastics.len(), 1);
        assert!(decoded.locator.mirror);
    }

    #[test]
    fn test_malformed_json_is_dropped() {
        let decoded = dec("e=[[11,12]&t=[18]");
        assert!(decoded.locator.elastics.is_empty());
        assert_eq!(decoded.locator.disabled, [tooth(18)].into_iter().collect());
        assert!(matches!(
            decoded.diagnostics[..],
            [LocatorError::MalformedJson { .. }]
        ));
    }

    #[test]
    fn test_non_array_is_dropped() {
        let decoded = dec("e={\"teeth\":[11,12]}");
        assert!(decoded.locator.elastics.is_empty());
        assert_eq!(
            decoded.diagnostics,
            vec![LocatorError::NotAnArray {
                param: "e".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_teeth_in_disabled_set() {
        let decoded = dec("t=[11,\"x\",99,21]");
        assert_eq!(
            decoded.locator.disabled,
            [tooth(11), tooth(21)].into_iter().collect()
        );
        assert_eq!(decoded.diagnostics.len(), 2);
    }

    #[test]
    fn test_unknown_parameters_are_ignored() {
        let decoded = dec("utm_source=mail&e=[[11,12]]");
        assert_eq!(decoded.locator.elastics.len(), 1);
        assert_eq!(
            decoded.diagnostics,
            vec![LocatorError::UnknownParameter("utm_source".to_string())]
        );
    }

    #[test]
    fn test_language_override() {
        assert_eq!(dec("lng=EN").locator.language.as_deref(), Some("en"));
        let decoded = dec("lng=english");
        assert_eq!(decoded.locator.language, None);
        assert_eq!(decoded.diagnostics.len(), 1);
    }

    #[test]
    fn test_mixed_generations_in_one_link() {
        let raw = r#"[[11,21],{"teeth":[13,43],"type":"Medium","time":"d"},{"teeth":[{"tooth":16,"outside":false},{"tooth":46,"outside":true}],"type":3,"time":"n"},"junk"]"#;
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("e", raw)
            .finish();
        let decoded = dec(&query);
        let kinds: Vec<u32> = decoded.locator.elastics.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![1, 2, 3]);
        assert_eq!(
            decoded.diagnostics,
            vec![LocatorError::UnrecognisedShape { index: 3 }]
        );
    }

    #[test]
    fn test_invalid_url() {
        let decoded = dec("http://[broken");
        assert!(decoded.locator.is_empty());
        assert!(matches!(decoded.diagnostics[..], [LocatorError::InvalidUrl(_)]));
    }
}
