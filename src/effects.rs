//! External effects: address bar, share sheet and clipboard
//!
//! The core never touches global environment state directly. Whatever hosts
//! it implements [`Effects`]; tests and the CLI use [`MemoryEffects`].

use log::{debug, info};

use crate::error::ShareError;

/// How a link reached the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share facility
    Shared,
    /// Copied to the clipboard
    Copied,
}

/// Side effects the session needs from its host
pub trait Effects {
    /// Current locator: a full URL or a bare query string
    fn read_locator(&self) -> String;

    /// Replace the current locator with a new link
    fn write_locator(&mut self, link: &str);

    /// Hand a link to the native share facility
    fn share(&mut self, url: &str) -> Result<(), ShareError>;

    fn copy_to_clipboard(&mut self, url: &str) -> Result<(), ShareError>;

    /// Share natively, falling back to the clipboard when sharing is unsupported
    fn share_or_copy(&mut self, url: &str) -> Result<ShareOutcome, ShareError> {
        match self.share(url) {
            Ok(()) => Ok(ShareOutcome::Shared),
            Err(ShareError::Unsupported) => {
                debug!("native share unavailable, copying link instead");
                self.copy_to_clipboard(url)?;
                Ok(ShareOutcome::Copied)
            }
            Err(err) => Err(err),
        }
    }
}

/// In-memory host used by tests and the command line
#[derive(Debug, Clone, Default)]
pub struct MemoryEffects {
    /// What the address bar currently shows
    pub location: String,
    /// Every link written, oldest first
    pub history: Vec<String>,
    /// Links handed to the share facility
    pub shared: Vec<String>,
    pub clipboard: Option<String>,
    pub share_supported: bool,
    /// The user dismisses the share sheet instead of picking a target
    pub share_cancelled: bool,
    pub clipboard_available: bool,
}

impl MemoryEffects {
    /// A host with no share facility and a working clipboard
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            clipboard_available: true,
            ..Self::default()
        }
    }

    pub fn with_share(mut self, supported: bool) -> Self {
        self.share_supported = supported;
        self
    }

    pub fn with_share_cancelled(mut self, cancelled: bool) -> Self {
        self.share_cancelled = cancelled;
        self
    }

    pub fn with_clipboard(mut self, available: bool) -> Self {
        self.clipboard_available = available;
        self
    }
}

impl Effects for MemoryEffects {
    fn read_locator(&self) -> String {
        self.location.clone()
    }

    fn write_locator(&mut self, link: &str) {
        self.location = link.to_string();
        self.history.push(link.to_string());
    }

    fn share(&mut self, url: &str) -> Result<(), ShareError> {
        if !self.share_supported {
            return Err(ShareError::Unsupported);
        }
        if self.share_cancelled {
            return Err(ShareError::Cancelled("share sheet dismissed".to_string()));
        }
        self.shared.push(url.to_string());
        Ok(())
    }

    fn copy_to_clipboard(&mut self, url: &str) -> Result<(), ShareError> {
        if !self.clipboard_available {
            return Err(ShareError::Clipboard("clipboard access denied".to_string()));
        }
        info!("link copied to clipboard");
        self.clipboard = Some(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_share_preferred() {
        let mut effects = MemoryEffects::new("").with_share(true);
        assert_eq!(effects.share_or_copy("https://x/?m=1"), Ok(ShareOutcome::Shared));
        assert_eq!(effects.shared, vec!["https://x/?m=1".to_string()]);
        assert_eq!(effects.clipboard, None);
    }

    #[test]
    fn test_falls_back_to_clipboard() {
        let mut effects = MemoryEffects::new("");
        assert_eq!(effects.share_or_copy("https://x/"), Ok(ShareOutcome::Copied));
        assert_eq!(effects.clipboard.as_deref(), Some("https://x/"));
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let mut effects = MemoryEffects::new("").with_clipboard(false);
        assert!(matches!(
            effects.share_or_copy("https://x/"),
            Err(ShareError::Clipboard(_))
        ));
    }

    #[test]
    fn test_cancelled_share_does_not_copy() {
        let mut effects = MemoryEffects::new("")
            .with_share(true)
            .with_share_cancelled(true);
        assert!(matches!(
            effects.share_or_copy("https://x/"),
            Err(ShareError::Cancelled(_))
        ));
        assert!(effects.shared.is_empty());
        assert_eq!(effects.clipboard, None);
    }

    #[test]
    fn test_write_locator_records_history() {
        let mut effects = MemoryEffects::new("https://x/");
        effects.write_locator("https://x/?m=1");
        effects.write_locator("https://x/");
        assert_eq!(effects.read_locator(), "https://x/");
        assert_eq!(effects.history.len(), 2);
    }
}
