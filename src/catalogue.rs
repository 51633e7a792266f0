//! Fixed tooth catalogue
//!
//! Teeth are addressed by their FDI code: the tens digit names the quadrant
//! and the units digit the position counted from the midline. Everything else
//! about a tooth (where it is drawn, what kind of tooth it is) is derived from
//! that code and never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;

/// A tooth from the fixed 32-tooth catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Tooth(u8);

/// Display rows as seen by the orthodontist, upper arch first
pub const ARCH_ROWS: [[u8; 16]; 2] = [
    [18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28],
    [48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38],
];

impl Tooth {
    /// Every tooth in the catalogue, in ascending code order
    pub const ALL: [Tooth; 32] = [
        Tooth(11), Tooth(12), Tooth(13), Tooth(14), Tooth(15), Tooth(16), Tooth(17), Tooth(18),
        Tooth(21), Tooth(22), Tooth(23), Tooth(24), Tooth(25), Tooth(26), Tooth(27), Tooth(28),
        Tooth(31), Tooth(32), Tooth(33), Tooth(34), Tooth(35), Tooth(36), Tooth(37), Tooth(38),
        Tooth(41), Tooth(42), Tooth(43), Tooth(44), Tooth(45), Tooth(46), Tooth(47), Tooth(48),
    ];

    /// Look up a tooth by FDI code
    pub fn new(code: u8) -> Result<Self, CatalogueError> {
        let quadrant = code / 10;
        let position = code % 10;
        if (1..=4).contains(&quadrant) && (1..=8).contains(&position) {
            Ok(Self(code))
        } else {
            Err(CatalogueError::UnknownTooth(i64::from(code)))
        }
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Position counted from the midline, 1 through 8
    pub fn position(self) -> u8 {
        self.0 % 10
    }

    pub fn quadrant(self) -> Quadrant {
        match self.0 / 10 {
            1 => Quadrant::TopLeft,
            2 => Quadrant::TopRight,
            3 => Quadrant::BottomRight,
            _ => Quadrant::BottomLeft,
        }
    }

    pub fn tooth_type(self) -> ToothType {
        match self.position() {
            1 => ToothType::CentralIncisor,
            2 => ToothType::LateralIncisor,
            3 => ToothType::Canine,
            4 => ToothType::FirstPremolar,
            5 => ToothType::SecondPremolar,
            6 => ToothType::FirstMolar,
            7 => ToothType::SecondMolar,
            _ => ToothType::ThirdMolar,
        }
    }

    /// Whether the tooth sits in the upper arch
    pub fn is_upper(self) -> bool {
        self.quadrant().is_upper()
    }

    /// Middle incisors and canines get their own highlight color
    pub fn special(self) -> Option<SpecialTooth> {
        match self.tooth_type() {
            ToothType::CentralIncisor => Some(SpecialTooth::MiddleIncisor),
            ToothType::Canine => Some(SpecialTooth::Canine),
            _ => None,
        }
    }

    /// Row and column of the tooth in [`ARCH_ROWS`]
    pub fn grid_position(self) -> (usize, usize) {
        let row = if self.is_upper() { 0 } else { 1 };
        let offset = usize::from(self.position());
        let column = match self.quadrant() {
            Quadrant::TopLeft | Quadrant::BottomLeft => 8 - offset,
            Quadrant::TopRight | Quadrant::BottomRight => 7 + offset,
        };
        (row, column)
    }
}

impl TryFrom<i64> for Tooth {
    type Error = CatalogueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| CatalogueError::UnknownTooth(value))
            .and_then(Tooth::new)
    }
}

impl From<Tooth> for u8 {
    fn from(tooth: Tooth) -> Self {
        tooth.0
    }
}

impl fmt::Display for Tooth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quadrant of the arch as drawn from the orthodontist's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub fn is_upper(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }
}

/// Anatomical type of a tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToothType {
    CentralIncisor,
    LateralIncisor,
    Canine,
    FirstPremolar,
    SecondPremolar,
    FirstMolar,
    SecondMolar,
    ThirdMolar,
}

impl ToothType {
    /// Coarse family, used to pick a tooth icon
    pub fn family(self) -> ToothFamily {
        match self {
            ToothType::CentralIncisor | ToothType::LateralIncisor => ToothFamily::Incisor,
            ToothType::Canine => ToothFamily::Canine,
            ToothType::FirstPremolar | ToothType::SecondPremolar => ToothFamily::Premolar,
            ToothType::FirstMolar | ToothType::SecondMolar | ToothType::ThirdMolar => {
                ToothFamily::Molar
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToothFamily {
    Incisor,
    Canine,
    Premolar,
    Molar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialTooth {
    MiddleIncisor,
    Canine,
}

/// Derived classification of a tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub quadrant: Quadrant,
    pub tooth_type: ToothType,
}

/// Classify a tooth by its code
pub fn classify(tooth: Tooth) -> Classification {
    Classification {
        quadrant: tooth.quadrant(),
        tooth_type: tooth.tooth_type(),
    }
}

/// Classify a raw code, rejecting anything outside the catalogue
pub fn classify_code(code: i64) -> Result<Classification, CatalogueError> {
    Tooth::try_from(code).map(classify)
}
