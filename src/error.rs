//! Error types for the catalogue, locator decoding, configuration files and sharing

use thiserror::Error;

/// Errors raised when a raw code does not name a catalogue tooth
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("unknown tooth {0}")]
    UnknownTooth(i64),
}

/// A problem found while decoding a locator
///
/// These never abort decoding: the offending field or entry is dropped and
/// decoding continues with whatever is still valid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocatorError {
    /// A parameter did not contain valid JSON
    #[error("parameter '{param}' is not valid JSON: {message}")]
    MalformedJson { param: String, message: String },

    /// A parameter held JSON of the wrong kind
    #[error("parameter '{param}' must be a JSON array")]
    NotAnArray { param: String },

    /// No detector recognised an elastic entry
    #[error("elastic #{index} has an unrecognised shape")]
    UnrecognisedShape { index: usize },

    /// A tooth id outside the catalogue
    #[error("{context} references unknown tooth {value}")]
    UnknownTooth { context: String, value: String },

    /// The same tooth side appeared twice in one elastic
    #[error("elastic #{index} repeats tooth {tooth}")]
    DuplicatePoint { index: usize, tooth: u8 },

    /// An elastic lost too many points to remain drawable
    #[error("elastic #{index} has fewer than 2 valid points")]
    TooFewPoints { index: usize },

    /// An elastic type could not be resolved against the palette
    #[error("elastic #{index} has unknown type {value}, using default")]
    UnknownType { index: usize, value: String },

    /// An elastic time scope was not one of `a`, `d` or `n`
    #[error("elastic #{index} has unknown time {value}, using default")]
    UnknownTime { index: usize, value: String },

    /// The mirror flag was neither `0` nor `1`
    #[error("mirror flag '{0}' is not '0' or '1'")]
    InvalidMirror(String),

    /// The language override was not a two-letter code
    #[error("language '{0}' is not a two-letter code")]
    InvalidLanguage(String),

    /// A parameter this codec does not know
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// The locator looked like a URL but could not be parsed as one
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur when loading palette or feature files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Palette must define at least one elastic type")]
    EmptyPalette,
    #[error("Palette defines elastic type {0} more than once")]
    DuplicateType(u32),
}

/// Errors raised when a share link cannot be drawn as a QR code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("link of {0} bytes is too long for a QR code")]
    LinkTooLong(usize),
}

/// Errors surfaced when a link cannot be handed to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The environment has no native share facility
    #[error("sharing is not supported here")]
    Unsupported,

    /// The user dismissed the share sheet
    #[error("sharing was cancelled: {0}")]
    Cancelled(String),

    /// Copying to the clipboard failed
    #[error("could not copy the link: {0}")]
    Clipboard(String),
}
