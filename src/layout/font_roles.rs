//! Document-wide font role classification.
//!
//! Body text is the font size carrying the most characters in the document.
//! Every distinct size larger than that is a heading level, ranked from the
//! largest (level 1) down. Weighting by characters instead of run counts keeps
//! a short, frequently repeated heading from outvoting pages of prose.
//!
//! Classification is keyed by size rather than font id, since extractors that
//! declare fonts per page do not keep ids stable across the document.

use crate::fonts::FontLookup;
use crate::layout::fragment::Fragment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sizes are compared after rounding to this many steps per unit.
const SIZE_KEY_SCALE: f32 = 100.0;

fn size_key(size: f32) -> i64 {
    (size * SIZE_KEY_SCALE).round() as i64
}

fn key_size(key: i64) -> f32 {
    key as f32 / SIZE_KEY_SCALE
}

/// Structural role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Body text
    Body,
    /// Heading of the given level; 1 is the most prominent
    Header(u32),
}

impl Role {
    /// Heading level, or `None` for body text.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::layout::Role;
    ///
    /// assert_eq!(Role::Header(2).level(), Some(2));
    /// assert_eq!(Role::Body.level(), None);
    /// ```
    pub fn level(&self) -> Option<u32> {
        match self {
            Role::Body => None,
            Role::Header(level) => Some(*level),
        }
    }

    /// True for any heading level.
    pub fn is_header(&self) -> bool {
        matches!(self, Role::Header(_))
    }
}

/// Font size → role mapping for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleMap {
    body_key: Option<i64>,
    /// Header size keys, largest first
    header_keys: Vec<i64>,
}

impl RoleMap {
    /// Role of a font size.
    pub fn role_for_size(&self, size: f32) -> Role {
        let key = size_key(size);
        match self.header_keys.iter().position(|k| *k == key) {
            Some(idx) => Role::Header(idx as u32 + 1),
            None => Role::Body,
        }
    }

    /// Role of a font id; unresolvable ids are body text.
    pub fn role_for_font(&self, font_id: &str, fonts: &FontLookup<'_>) -> Role {
        match fonts.size_of(font_id) {
            Some(size) => self.role_for_size(size),
            None => {
                log::debug!("Font id '{}' not in font table, treating as body", font_id);
                Role::Body
            },
        }
    }

    /// Classified body size, if the document had any countable text.
    pub fn body_size(&self) -> Option<f32> {
        self.body_key.map(key_size)
    }

    /// Header sizes, level 1 first.
    pub fn header_sizes(&self) -> Vec<f32> {
        self.header_keys.iter().copied().map(key_size).collect()
    }

    /// Number of header levels (K).
    pub fn header_depth(&self) -> u32 {
        self.header_keys.len() as u32
    }
}

/// Accumulates character volume per font size, then ranks the sizes.
///
/// # Examples
///
/// ```
/// use pdf_sections::layout::{FontRoleClassifier, Role};
///
/// let mut classifier = FontRoleClassifier::new();
/// classifier.add(12.0, 2500);
/// classifier.add(20.0, 40);
/// classifier.add(16.0, 120);
/// classifier.add(9.0, 300);
/// let roles = classifier.finish();
///
/// assert_eq!(roles.body_size(), Some(12.0));
/// assert_eq!(roles.role_for_size(20.0), Role::Header(1));
/// assert_eq!(roles.role_for_size(16.0), Role::Header(2));
/// assert_eq!(roles.role_for_size(9.0), Role::Body);
/// assert_eq!(roles.header_depth(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FontRoleClassifier {
    volume: BTreeMap<i64, usize>,
}

impl FontRoleClassifier {
    /// Create an empty classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `chars` characters of text set at `size`.
    pub fn add(&mut self, size: f32, chars: usize) {
        if chars == 0 || !size.is_finite() {
            return;
        }
        *self.volume.entry(size_key(size)).or_insert(0) += chars;
    }

    /// Add one fragment, resolving its size through `fonts`.
    ///
    /// Fragments with an unresolvable font id carry no size and are skipped.
    pub fn add_fragment(&mut self, fragment: &Fragment, fonts: &FontLookup<'_>) {
        if let Some(size) = fonts.size_of(&fragment.font_id) {
            self.add(size, fragment.char_count());
        }
    }

    /// Rank the accumulated sizes into a role map.
    pub fn finish(self) -> RoleMap {
        // Ascending scan with strict `>` keeps the smaller size on ties
        let mut body: Option<(i64, usize)> = None;
        for (&key, &chars) in &self.volume {
            if body.map_or(true, |(_, best)| chars > best) {
                body = Some((key, chars));
            }
        }

        let body_key = match body {
            Some((key, _)) => key,
            None => return RoleMap::default(),
        };

        let header_keys: Vec<i64> = self
            .volume
            .keys()
            .rev()
            .copied()
            .filter(|key| *key > body_key)
            .collect();

        log::info!(
            "Detected {} header levels above body size {}",
            header_keys.len(),
            key_size(body_key)
        );

        RoleMap {
            body_key: Some(body_key),
            header_keys,
        }
    }
}
