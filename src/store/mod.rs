//! Configuration store
//!
//! Holds the committed elastics, the elastic being built, the disabled teeth
//! and the mirror flag. Every operation either replaces the snapshot with a
//! new one or leaves it untouched; nothing is ever half-applied. The store
//! performs no I/O.

pub mod types;

pub use types::{Elastic, ElasticPoint, Snapshot, TimeScope};

use log::{debug, warn};

use crate::catalogue::Tooth;
use crate::features::Features;
use crate::locator::Locator;
use crate::palette::{ElasticTypeId, Palette};

/// A user-level mutation of the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleSelection { tooth: Tooth, outside: bool },
    ToggleDisabled(Tooth),
    Commit { kind: ElasticTypeId, time: TimeScope },
    Remove(usize),
    ResetAll,
    SetMirror(bool),
    ToggleMirror,
}

/// Owner of the current configuration snapshot
#[derive(Debug, Clone)]
pub struct ConfigStore {
    features: Features,
    palette: Palette,
    snapshot: Snapshot,
    revision: u64,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new(features: Features, palette: Palette) -> Self {
        Self {
            features,
            palette,
            snapshot: Snapshot::default(),
            revision: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Incremented every time a new snapshot is installed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The locator-visible part of the current snapshot
    pub fn locator(&self) -> Locator {
        Locator {
            elastics: self.snapshot.elastics.clone(),
            disabled: self.snapshot.disabled.clone(),
            mirror: self.snapshot.mirror,
            language: None,
        }
    }

    /// Dispatch an action to the matching operation
    pub fn apply(&mut self, action: &Action) -> bool {
        match *action {
            Action::ToggleSelection { tooth, outside } => {
                self.toggle_anchor_selection(tooth, outside)
            }
            Action::ToggleDisabled(tooth) => self.toggle_anchor_disabled(tooth),
            Action::Commit { kind, time } => self.commit_connection(kind, time),
            Action::Remove(index) => self.remove_connection(index),
            Action::ResetAll => self.reset_all(),
            Action::SetMirror(mirror) => self.set_mirror(mirror),
            Action::ToggleMirror => self.toggle_mirror(),
        }
    }

    /// Replace the whole configuration with a decoded locator
    ///
    /// Disabled teeth are only kept when the capability is enabled.
    pub fn hydrate(&mut self, locator: Locator) -> bool {
        let disabled = if self.features.disable_teeth {
            locator.disabled
        } else {
            if !locator.disabled.is_empty() {
                debug!("ignoring {} disabled teeth, capability is off", locator.disabled.len());
            }
            Default::default()
        };
        self.install(Snapshot {
            elastics: locator.elastics,
            selection: Vec::new(),
            disabled,
            mirror: locator.mirror,
        })
    }

    /// Add the tooth side to the selection, or remove it if already there
    pub fn toggle_anchor_selection(&mut self, tooth: Tooth, outside: bool) -> bool {
        let point = ElasticPoint::new(tooth, outside);
        let mut next = self.snapshot.clone();

        if let Some(pos) = next.selection.iter().position(|p| *p == point) {
            next.selection.remove(pos);
            return self.install(next);
        }

        if self.features.disable_teeth && next.is_disabled(tooth) {
            debug!("tooth {tooth} is disabled, ignoring selection");
            return false;
        }
        if !self.features.multiple_elastics_per_tooth && next.tooth_in_use(tooth) {
            debug!("tooth {tooth} already carries an elastic, ignoring selection");
            return false;
        }

        next.selection.push(point);
        self.install(next)
    }

    /// Flip whether a tooth is disabled
    ///
    /// Disabling purges both sides of the tooth from the selection but leaves
    /// committed elastics alone.
    pub fn toggle_anchor_disabled(&mut self, tooth: Tooth) -> bool {
        if !self.features.disable_teeth {
            return false;
        }
        let mut next = self.snapshot.clone();
        if !next.disabled.remove(&tooth) {
            next.disabled.insert(tooth);
            next.selection.retain(|p| p.tooth != tooth);
        }
        self.install(next)
    }

    /// Turn the selection into a committed elastic
    pub fn commit_connection(&mut self, kind: ElasticTypeId, time: TimeScope) -> bool {
        if !self.snapshot.can_commit() {
            return false;
        }
        if !self.palette.contains(kind) {
            warn!("refusing to commit elastic with unknown type {kind}");
            return false;
        }
        let mut next = self.snapshot.clone();
        let teeth = std::mem::take(&mut next.selection);
        next.elastics.push(Elastic::new(teeth, kind, time));
        self.install(next)
    }

    /// Delete the elastic at `index`; out of range is a no-op
    pub fn remove_connection(&mut self, index: usize) -> bool {
        if index >= self.snapshot.elastics.len() {
            debug!("no elastic at index {index}");
            return false;
        }
        let mut next = self.snapshot.clone();
        next.elastics.remove(index);
        self.install(next)
    }

    /// Return to the empty configuration
    pub fn reset_all(&mut self) -> bool {
        self.install(Snapshot::default())
    }

    pub fn set_mirror(&mut self, mirror: bool) -> bool {
        let mut next = self.snapshot.clone();
        next.mirror = mirror;
        self.install(next)
    }

    pub fn toggle_mirror(&mut self) -> bool {
        self.set_mirror(!self.snapshot.mirror)
    }

    fn install(&mut self, next: Snapshot) -> bool {
        if next == self.snapshot {
            return false;
        }
        self.snapshot = next;
        self.revision += 1;
        debug!(
            "snapshot r{}: {} elastics, {} selected, {} disabled, mirror={}",
            self.revision,
            self.snapshot.elastics.len(),
            self.snapshot.selection.len(),
            self.snapshot.disabled.len(),
            self.snapshot.mirror
        );
        true
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Features::default(), Palette::default())
    }
}
