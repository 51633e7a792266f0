//! Core types for the configuration store

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalogue::Tooth;
use crate::palette::ElasticTypeId;

/// One addressable side of a tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElasticPoint {
    pub tooth: Tooth,
    /// Outer (cheek) face when true, inner (tongue) face when false
    pub outside: bool,
}

impl ElasticPoint {
    pub fn new(tooth: Tooth, outside: bool) -> Self {
        Self { tooth, outside }
    }

    pub fn outer(tooth: Tooth) -> Self {
        Self::new(tooth, true)
    }

    pub fn inner(tooth: Tooth) -> Self {
        Self::new(tooth, false)
    }
}

impl fmt::Display for ElasticPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outside {
            write!(f, "{}", self.tooth)
        } else {
            write!(f, "{}i", self.tooth)
        }
    }
}

/// When during the day an elastic is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeScope {
    #[default]
    #[serde(rename = "a")]
    AllDay,
    #[serde(rename = "d")]
    Daytime,
    #[serde(rename = "n")]
    Nighttime,
}

impl TimeScope {
    /// Single-letter code used in the locator
    pub fn code(self) -> &'static str {
        match self {
            TimeScope::AllDay => "a",
            TimeScope::Daytime => "d",
            TimeScope::Nighttime => "n",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(TimeScope::AllDay),
            "d" => Some(TimeScope::Daytime),
            "n" => Some(TimeScope::Nighttime),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            TimeScope::AllDay => "🏪",
            TimeScope::Daytime => "☀️",
            TimeScope::Nighttime => "😴",
        }
    }
}

impl FromStr for TimeScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "24h" | "all" | "allday" => Ok(TimeScope::AllDay),
            "d" | "day" | "daytime" => Ok(TimeScope::Daytime),
            "n" | "night" | "nighttime" => Ok(TimeScope::Nighttime),
            other => Err(format!("unknown time scope '{other}'")),
        }
    }
}

impl fmt::Display for TimeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A committed elastic: an ordered path over at least two tooth sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elastic {
    pub teeth: Vec<ElasticPoint>,
    #[serde(rename = "type")]
    pub kind: ElasticTypeId,
    pub time: TimeScope,
}

impl Elastic {
    pub fn new(teeth: Vec<ElasticPoint>, kind: ElasticTypeId, time: TimeScope) -> Self {
        Self { teeth, kind, time }
    }

    pub fn uses_tooth(&self, tooth: Tooth) -> bool {
        self.teeth.iter().any(|p| p.tooth == tooth)
    }
}

impl fmt::Display for Elastic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .teeth
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        write!(f, "{} {}", path, self.time.emoji())
    }
}

/// An immutable view of the whole configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub elastics: Vec<Elastic>,
    /// The elastic being built, in click order
    pub selection: Vec<ElasticPoint>,
    pub disabled: BTreeSet<Tooth>,
    pub mirror: bool,
}

impl Snapshot {
    /// Whether any committed elastic passes through the tooth
    pub fn tooth_in_use(&self, tooth: Tooth) -> bool {
        self.elastics.iter().any(|e| e.uses_tooth(tooth))
    }

    pub fn is_selected(&self, point: ElasticPoint) -> bool {
        self.selection.contains(&point)
    }

    pub fn is_disabled(&self, tooth: Tooth) -> bool {
        self.disabled.contains(&tooth)
    }

    /// Whether the selection is long enough to commit
    pub fn can_commit(&self) -> bool {
        self.selection.len() >= 2
    }
}
