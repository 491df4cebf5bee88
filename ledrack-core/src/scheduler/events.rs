//! Scheduler tick results
//!
//! A tick either blanks the panel, is pre-empted by a message, or reports
//! the active item plus the transition that made it active if one happened
//! during the tick.

use crate::config::ModeKind;

/// How a due transition was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionOutcome {
    /// Moved to the next item
    Advanced,
    /// Passed the end and wrapped to the first item
    Wrapped,
    /// Passed the end with looping off; the last item stays active
    Held,
    /// Exhausted item deleted; the next item slid into its slot
    Deleted,
    /// Exhausted item deleted and the index reset to 0 (it was the last
    /// item, or the playlist had to be refilled with the fallback)
    DeletedLast,
}

impl TransitionOutcome {
    pub fn is_deletion(self) -> bool {
        matches!(self, Self::Deleted | Self::DeletedLast)
    }
}

/// A completed item transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Index of the outgoing item before the transition
    pub from_index: usize,
    /// Index of the incoming item
    pub to_index: usize,
    /// Mode of the outgoing item
    pub previous_mode: ModeKind,
    pub outcome: TransitionOutcome,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Display is off: clear the panel and render nothing
    Blank,
    /// A message or banner owns the panel; the playlist is paused
    Suspended,
    /// Render the item at `index`
    Active {
        index: usize,
        transition: Option<Transition>,
    },
}

impl TickOutcome {
    /// Transition that happened this tick, if any
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Self::Active {
                transition: Some(t),
                ..
            } => Some(t),
            _ => None,
        }
    }
}
