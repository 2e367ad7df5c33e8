//! Cascade level state

use crate::geo::{GeoError, GeoLevel, GeoOption};

/// Load status of a cascade level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SliceStatus {
    /// Nothing requested (or reset by a parent change).
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading,

    /// Options are available for selection.
    Loaded,

    /// The last fetch failed; carries the user-facing message.
    Failed(String),
}

/// One cascade level: its status, options and current selection.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    status: SliceStatus,
    options: Vec<T>,
    selected: Option<String>,
    generation: u64,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            status: SliceStatus::Idle,
            options: Vec::new(),
            selected: None,
            generation: 0,
        }
    }
}

impl<T: GeoOption> Slice<T> {
    /// Current status.
    pub const fn status(&self) -> &SliceStatus {
        &self.status
    }

    /// Loaded options; empty unless loaded.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Selected option name.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selected option.
    pub fn selected_option(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|name| self.find(name))
    }

    /// Find a loaded option by name (case-insensitive, surrounding whitespace ignored).
    pub fn find(&self, name: &str) -> Option<&T> {
        let name = name.trim();

        self.options
            .iter()
            .find(|option| option.name().eq_ignore_ascii_case(name))
    }

    /// Whether options can be chosen from this level.
    pub fn is_selectable(&self) -> bool {
        self.status == SliceStatus::Loaded
    }

    /// Failure message of the last fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SliceStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(super) const fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop options and selection, invalidating any in-flight fetch.
    pub(super) fn reset(&mut self) {
        self.status = SliceStatus::Idle;
        self.options.clear();
        self.selected = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Reset and mark loading; returns the generation the fetch belongs to.
    pub(super) fn begin(&mut self) -> u64 {
        self.reset();
        self.status = SliceStatus::Loading;
        self.generation
    }

    pub(super) fn resolve(&mut self, options: Vec<T>) {
        self.status = SliceStatus::Loaded;
        self.options = options;
        self.selected = None;
    }

    pub(super) fn fail(&mut self, message: String) {
        self.status = SliceStatus::Failed(message);
        self.options.clear();
        self.selected = None;
    }

    pub(super) fn select(&mut self, level: GeoLevel, name: &str) -> Result<(), GeoError> {
        if !self.is_selectable() {
            return Err(GeoError::NotReady(level));
        }

        let canonical = self
            .find(name)
            .map(|option| option.name().to_string())
            .ok_or_else(|| GeoError::UnknownOption {
                level,
                name: name.to_string(),
            })?;

        self.selected = Some(canonical);

        Ok(())
    }
}
