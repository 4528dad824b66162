//! Version selection for the history viewer.
//!
//! The whole selection lives in one `Selection` value. Every user action is
//! a pure transition that consumes the old value and returns the new one, so
//! there is no way to observe a half-updated compare pair.

use super::types::CompareSlot;

/// Version numbers identify versions within one note
pub type VersionNumber = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected, compare mode off
    #[default]
    Idle,
    /// A single version shown in full
    Single(VersionNumber),
    /// Compare mode on, pair not complete yet
    Collecting {
        first: Option<VersionNumber>,
        second: Option<VersionNumber>,
    },
    /// Compare mode on with both sides picked, `first` is the left side
    Ready {
        first: VersionNumber,
        second: VersionNumber,
    },
}

impl Selection {
    /// Build a compare state from a possibly partial pair
    fn pair(first: Option<VersionNumber>, second: Option<VersionNumber>) -> Self {
        match (first, second) {
            (Some(first), Some(second)) => Selection::Ready { first, second },
            (first, second) => Selection::Collecting { first, second },
        }
    }

    pub fn is_compare_mode(&self) -> bool {
        matches!(self, Selection::Collecting { .. } | Selection::Ready { .. })
    }

    /// Turning compare mode on or off always drops the current selection
    #[must_use]
    pub fn toggle_compare(self) -> Self {
        if self.is_compare_mode() {
            Selection::Idle
        } else {
            Selection::pair(None, None)
        }
    }

    /// React to a click on a version in the list.
    ///
    /// Outside compare mode the click replaces the single selection. In
    /// compare mode it fills the first empty slot; once both slots are full
    /// the next click starts a new pair with itself as `first`.
    #[must_use]
    pub fn select(self, version: VersionNumber) -> Self {
        match self {
            Selection::Idle | Selection::Single(_) => Selection::Single(version),
            Selection::Collecting { first: None, second } => Selection::pair(Some(version), second),
            Selection::Collecting {
                first: Some(first),
                second: None,
            } => Selection::pair(Some(first), Some(version)),
            Selection::Collecting {
                first: Some(_),
                second: Some(_),
            }
            | Selection::Ready { .. } => Selection::pair(Some(version), None),
        }
    }

    /// Drop references to versions that are not in `available`.
    /// Compare mode stays on even if both slots get cleared.
    #[must_use]
    pub fn retain<F>(self, is_available: F) -> Self
    where
        F: Fn(VersionNumber) -> bool,
    {
        let keep = |v: Option<VersionNumber>| v.filter(|v| is_available(*v));
        match self {
            Selection::Idle => Selection::Idle,
            Selection::Single(v) if is_available(v) => Selection::Single(v),
            Selection::Single(_) => Selection::Idle,
            Selection::Collecting { first, second } => Selection::pair(keep(first), keep(second)),
            Selection::Ready { first, second } => {
                Selection::pair(keep(Some(first)), keep(Some(second)))
            }
        }
    }

    /// Is `version` highlighted in the list
    pub fn is_selected(&self, version: VersionNumber) -> bool {
        match *self {
            Selection::Idle => false,
            Selection::Single(v) => v == version,
            Selection::Collecting { .. } | Selection::Ready { .. } => {
                self.slot_of(version).is_some()
            }
        }
    }

    /// Compare slot `version` occupies; the first slot wins if it is in both
    pub fn slot_of(&self, version: VersionNumber) -> Option<CompareSlot> {
        let (first, second) = match *self {
            Selection::Collecting { first, second } => (first, second),
            Selection::Ready { first, second } => (Some(first), Some(second)),
            Selection::Idle | Selection::Single(_) => return None,
        };
        if first == Some(version) {
            Some(CompareSlot::First)
        } else if second == Some(version) {
            Some(CompareSlot::Second)
        } else {
            None
        }
    }

    pub fn compare_pair(&self) -> (Option<VersionNumber>, Option<VersionNumber>) {
        match *self {
            Selection::Collecting { first, second } => (first, second),
            Selection::Ready { first, second } => (Some(first), Some(second)),
            Selection::Idle | Selection::Single(_) => (None, None),
        }
    }
}
