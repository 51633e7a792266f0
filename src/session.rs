//! Session controller
//!
//! Ties the store, the locator codec and the host's effects together. After
//! every change the session re-encodes the locator, writes it through the
//! host, and marks the drawing dirty. The drawing itself is recomputed on the
//! next paint, once the surface has laid out its rectangles.

use std::cmp::Ordering;

use log::{debug, warn};
use url::Url;

use crate::effects::{Effects, ShareOutcome};
use crate::error::{LocatorError, QrError, ShareError};
use crate::features::Features;
use crate::geometry::{project, Drawing, Projection, RectProvider};
use crate::locator::{self, Locator};
use crate::palette::Palette;
use crate::renderer::{render_qr_svg, SvgConfig};
use crate::store::{Action, ConfigStore, Snapshot};

/// One user's live configuration plus its host
pub struct Session<E: Effects> {
    store: ConfigStore,
    effects: E,
    base: Option<Url>,
    language: Option<String>,
    highlighted: Option<usize>,
    redraw_pending: bool,
    drawing: Drawing,
    diagnostics: Vec<LocatorError>,
    /// What the host's locator currently shows
    written: String,
}

impl<E: Effects> Session<E> {
    /// Hydrate a session from the host's current locator
    ///
    /// If the link was in an older or non-canonical form, the canonical link
    /// is written back.
    pub fn start(effects: E, features: Features, palette: Palette) -> Self {
        let current = effects.read_locator();
        let decoded = locator::decode(&current, &palette, &features);
        let base = base_url(&current);

        let mut store = ConfigStore::new(features, palette);
        store.hydrate(decoded.locator.clone());

        let mut session = Self {
            store,
            effects,
            base,
            language: decoded.locator.language,
            highlighted: None,
            redraw_pending: true,
            drawing: Drawing::default(),
            diagnostics: decoded.diagnostics,
            written: current.trim().to_string(),
        };

        if !session.written.is_empty() {
            session.sync_locator();
        } else {
            session.written = session.link();
        }
        session
    }

    /// Override where links point to
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Problems found while decoding the starting locator
    pub fn diagnostics(&self) -> &[LocatorError] {
        &self.diagnostics
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Apply an action; on change a redraw is scheduled and a changed link is written
    pub fn dispatch(&mut self, action: Action) -> bool {
        if !self.store.apply(&action) {
            debug!("{action:?} left the configuration unchanged");
            return false;
        }
        if let (Action::Remove(removed), Some(index)) = (&action, self.highlighted) {
            // Keep the highlight on the same elastic
            self.highlighted = match index.cmp(removed) {
                Ordering::Less => Some(index),
                Ordering::Equal => None,
                Ordering::Greater => Some(index - 1),
            };
        }
        let count = self.store.snapshot().elastics.len();
        if self.highlighted.is_some_and(|index| index >= count) {
            self.highlighted = None;
        }
        self.sync_locator();
        self.redraw_pending = true;
        true
    }

    /// Write the link through the host if it differs from what the host shows
    fn sync_locator(&mut self) {
        let link = self.link();
        if link != self.written {
            debug!("writing locator {link}");
            self.effects.write_locator(&link);
            self.written = link;
        }
    }

    /// Highlight (hover) an elastic, or clear the highlight
    pub fn set_highlighted(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.store.snapshot().elastics.len());
        if index != self.highlighted {
            self.highlighted = index;
            self.redraw_pending = true;
        }
    }

    /// The surface was resized; rectangles may have moved
    pub fn notify_resize(&mut self) {
        self.redraw_pending = true;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Called by the surface after layout; recomputes the drawing if needed
    pub fn on_paint(&mut self, rects: &dyn RectProvider) -> &Drawing {
        if self.redraw_pending {
            let snapshot = self.store.snapshot();
            self.drawing = project(
                &Projection {
                    elastics: &snapshot.elastics,
                    mirror: snapshot.mirror,
                    palette: self.store.palette(),
                    highlighted: self.highlighted,
                },
                rects,
            );
            self.redraw_pending = false;
            debug!("redrew {} primitives", self.drawing.primitives.len());
        }
        &self.drawing
    }

    /// The most recently painted drawing
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// The locator for the current configuration
    pub fn locator(&self) -> Locator {
        Locator {
            language: self.language.clone(),
            ..self.store.locator()
        }
    }

    /// Canonical query string without the leading `?`
    pub fn query(&self) -> String {
        locator::encode(&self.locator(), self.store.features())
    }

    /// Shareable link for the current configuration
    pub fn link(&self) -> String {
        let query = self.query();
        let query = (!query.is_empty()).then_some(query.as_str());
        match &self.base {
            Some(base) => {
                let mut url = base.clone();
                url.set_query(query);
                url.to_string()
            }
            None => query.map(|q| format!("?{q}")).unwrap_or_default(),
        }
    }

    /// The current link as a QR code SVG
    pub fn qr_svg(&self, config: &SvgConfig) -> Result<String, QrError> {
        render_qr_svg(&self.link(), config)
    }

    /// Share the current link; failures never touch the configuration
    pub fn share(&mut self) -> Result<ShareOutcome, ShareError> {
        let link = self.link();
        self.effects.share_or_copy(&link).inspect_err(|err| {
            warn!("sharing failed: {err}");
        })
    }
}

/// The locator's URL without query and fragment, if it is a full URL
fn base_url(locator: &str) -> Option<Url> {
    let mut url = Url::parse(locator.trim()).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}
