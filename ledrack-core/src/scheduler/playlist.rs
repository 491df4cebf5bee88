//! Playlist aggregate
//!
//! Owns the ordered items, the active index, the active item's start time
//! and the global loop/display flags. Every operation leaves the playlist
//! non-empty with a valid active index.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{ItemPatch, PlaylistError, PlaylistItem, MAX_ITEMS};

/// Ordered playlist with its playback state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Playlist {
    items: Vec<PlaylistItem, MAX_ITEMS>,
    current_index: usize,
    /// When the active item became active (ms); `None` until first stamped
    #[cfg_attr(feature = "serde", serde(skip))]
    item_started_at: Option<u32>,
    loop_items: bool,
    display_on: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    save_requested: bool,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    /// Playlist holding only the fallback item, looping and displayed
    pub fn new() -> Self {
        let mut playlist = Self {
            items: Vec::new(),
            current_index: 0,
            item_started_at: None,
            loop_items: true,
            display_on: true,
            save_requested: false,
        };
        playlist.repair();
        // A fresh default is not an edit worth saving
        playlist.save_requested = false;
        playlist
    }

    /// Build from externally loaded items
    ///
    /// Items past capacity are dropped. An empty input yields the fallback
    /// item.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = PlaylistItem>,
    {
        let mut playlist = Self::new();
        playlist.items.clear();
        for item in items {
            if playlist.items.push(item).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Playlist full, dropping loaded items past {}", MAX_ITEMS);
                break;
            }
        }
        playlist.repair();
        playlist
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` once constructed
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Active item
    pub fn active(&self) -> Option<&PlaylistItem> {
        self.items.get(self.current_index)
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut PlaylistItem> {
        self.items.get_mut(self.current_index)
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistItem> {
        self.items.get(index)
    }

    pub fn play_count(&self, index: usize) -> Option<u32> {
        self.items.get(index).map(|item| item.play_count)
    }

    /// Play counts in playback order
    pub fn play_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().map(|item| item.play_count)
    }

    pub fn item_started_at(&self) -> Option<u32> {
        self.item_started_at
    }

    /// Restart the active item's timer at `now`
    pub fn restart_timer(&mut self, now: u32) {
        self.item_started_at = Some(now);
    }

    /// Forget the active item's start time; the next tick stamps it
    pub fn clear_timer(&mut self) {
        self.item_started_at = None;
    }

    pub fn loop_items(&self) -> bool {
        self.loop_items
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    pub fn set_loop(&mut self, loop_items: bool) {
        self.loop_items = loop_items;
        self.request_save();
    }

    pub fn set_display_on(&mut self, on: bool) {
        self.display_on = on;
        self.request_save();
    }

    /// Append an item, returning its index
    pub fn push(&mut self, item: PlaylistItem) -> Result<usize, PlaylistError> {
        self.items.push(item).map_err(|_| PlaylistError::Full)?;
        self.request_save();
        Ok(self.items.len() - 1)
    }

    /// Replace every item
    ///
    /// Playback restarts at index 0 with an unset start time. Fails without
    /// touching the playlist if the items do not fit.
    pub fn replace_all<I>(&mut self, items: I) -> Result<(), PlaylistError>
    where
        I: IntoIterator<Item = PlaylistItem>,
    {
        let mut next: Vec<PlaylistItem, MAX_ITEMS> = Vec::new();
        for item in items {
            next.push(item).map_err(|_| PlaylistError::Full)?;
        }
        self.items = next;
        self.current_index = 0;
        self.item_started_at = None;
        self.repair();
        self.request_save();
        Ok(())
    }

    /// Delete the item at `index`
    ///
    /// Deleting at or before the active item moves the active index back by
    /// one so the same item stays active where possible.
    pub fn remove(&mut self, index: usize) -> Result<PlaylistItem, PlaylistError> {
        if index >= self.items.len() {
            return Err(PlaylistError::IndexOutOfRange);
        }
        let removed = self.items.remove(index);
        if index <= self.current_index && self.current_index > 0 {
            self.current_index -= 1;
        }
        self.repair();
        self.item_started_at = None;
        self.request_save();

        #[cfg(feature = "defmt")]
        defmt::info!("Deleted item {}, {} left", index, self.items.len());

        Ok(removed)
    }

    /// Move an item to a new position; the active item stays active
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), PlaylistError> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(PlaylistError::IndexOutOfRange);
        }
        if from == to {
            return Ok(());
        }
        let item = self.items.remove(from);
        // Cannot overflow: one slot was just freed
        if self.items.insert(to, item).is_err() {
            return Err(PlaylistError::Full);
        }

        let current = self.current_index;
        self.current_index = if current == from {
            to
        } else if from < current && to >= current {
            current - 1
        } else if from > current && to <= current {
            current + 1
        } else {
            current
        };
        self.request_save();
        Ok(())
    }

    /// Edit the active item, returning `true` if its mode kind changed
    pub fn update_active(&mut self, patch: &ItemPatch) -> bool {
        let index = self.current_index;
        self.update_at(index, patch).unwrap_or(false)
    }

    /// Edit the item at `index`, returning `true` if its mode kind changed
    pub fn update_at(&mut self, index: usize, patch: &ItemPatch) -> Result<bool, PlaylistError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(PlaylistError::IndexOutOfRange)?;
        let changed = patch.apply(item);
        self.request_save();
        Ok(changed)
    }

    /// Make `index` the active item, starting its timer at `now`
    pub fn jump_to(&mut self, index: usize, now: u32) -> Result<(), PlaylistError> {
        if index >= self.items.len() {
            return Err(PlaylistError::IndexOutOfRange);
        }
        self.current_index = index;
        self.item_started_at = Some(now);
        Ok(())
    }

    /// Drain the pending save request
    pub fn take_save_request(&mut self) -> bool {
        core::mem::take(&mut self.save_requested)
    }

    pub fn save_pending(&self) -> bool {
        self.save_requested
    }

    pub(crate) fn request_save(&mut self) {
        #[cfg(feature = "defmt")]
        if !self.save_requested {
            defmt::debug!("Playlist save requested");
        }
        self.save_requested = true;
    }

    /// Enforce the structural invariants
    ///
    /// An empty playlist gets the fallback item; an out-of-range index is
    /// reset to 0. Returns `true` if anything was repaired.
    pub fn repair(&mut self) -> bool {
        let mut repaired = false;
        if self.items.is_empty() {
            // Capacity is at least one, so this cannot fail
            let _ = self.items.push(PlaylistItem::fallback());
            self.current_index = 0;
            self.request_save();
            repaired = true;

            #[cfg(feature = "defmt")]
            defmt::warn!("Playlist empty, synthesized fallback item");
        }
        if self.current_index >= self.items.len() {
            self.current_index = 0;
            repaired = true;
        }
        repaired
    }

    /// Remove the active item after it was exhausted
    ///
    /// Returns `true` if the index had to be reset to 0.
    pub(crate) fn remove_active(&mut self) -> bool {
        let index = self.current_index;
        if index < self.items.len() {
            self.items.remove(index);
        }
        let wrapped = index >= self.items.len();
        self.repair();
        wrapped
    }

    /// Step to the next item honouring the loop flag
    pub(crate) fn step_forward(&mut self) -> StepResult {
        let next = self.current_index + 1;
        if next < self.items.len() {
            self.current_index = next;
            StepResult::Advanced
        } else if self.loop_items {
            self.current_index = 0;
            StepResult::Wrapped
        } else {
            self.current_index = self.items.len().saturating_sub(1);
            StepResult::Held
        }
    }
}

/// Outcome of [`Playlist::step_forward`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepResult {
    Advanced,
    Wrapped,
    Held,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, ModeKind, TwinkleParams};

    fn text(s: &str) -> PlaylistItem {
        PlaylistItem::text(s).unwrap()
    }

    fn three() -> Playlist {
        Playlist::from_items([text("a"), text("b"), text("c")])
    }

    fn label(item: &PlaylistItem) -> &str {
        match &item.mode {
            Mode::Text(p) => p.text.as_str(),
            _ => "",
        }
    }

    #[test]
    fn test_new_holds_fallback() {
        let mut p = Playlist::new();
        assert_eq!(p.len(), 1);
        assert_eq!(p.current_index(), 0);
        assert!(p.loop_items());
        assert!(p.display_on());
        assert_eq!(p.active(), Some(&PlaylistItem::fallback()));
        assert!(!p.take_save_request());
    }

    #[test]
    fn test_from_empty_items_synthesizes_fallback() {
        let p = Playlist::from_items(core::iter::empty());
        assert_eq!(p.len(), 1);
        assert_eq!(p.active(), Some(&PlaylistItem::fallback()));
    }

    #[test]
    fn test_from_items_drops_overflow() {
        let p = Playlist::from_items((0..MAX_ITEMS + 5).map(|_| text("x")));
        assert_eq!(p.len(), MAX_ITEMS);
    }

    #[test]
    fn test_push_full() {
        let mut p = Playlist::from_items((0..MAX_ITEMS).map(|_| text("x")));
        assert_eq!(p.push(text("y")), Err(PlaylistError::Full));
    }

    #[test]
    fn test_push_returns_index_and_requests_save() {
        let mut p = Playlist::new();
        let _ = p.take_save_request();
        assert_eq!(p.push(text("b")), Ok(1));
        assert!(p.take_save_request());
        assert!(!p.take_save_request());
    }

    #[test]
    fn test_remove_before_active_keeps_same_item_active() {
        let mut p = three();
        p.jump_to(2, 0).unwrap();
        p.remove(0).unwrap();
        assert_eq!(p.current_index(), 1);
        assert_eq!(label(p.active().unwrap()), "c");
        assert_eq!(p.item_started_at(), None);
    }

    #[test]
    fn test_remove_active_steps_back() {
        let mut p = three();
        p.jump_to(1, 0).unwrap();
        p.remove(1).unwrap();
        assert_eq!(p.current_index(), 0);
        assert_eq!(label(p.active().unwrap()), "a");
    }

    #[test]
    fn test_remove_after_active_keeps_index() {
        let mut p = three();
        p.remove(2).unwrap();
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_remove_last_item_synthesizes_fallback() {
        let mut p = Playlist::from_items([text("only")]);
        p.remove(0).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.active(), Some(&PlaylistItem::fallback()));
        assert!(p.take_save_request());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut p = three();
        assert_eq!(p.remove(3), Err(PlaylistError::IndexOutOfRange));
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_replace_all_with_nothing_leaves_fallback() {
        let mut p = three();
        p.jump_to(2, 100).unwrap();
        p.replace_all(core::iter::empty()).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.item_started_at(), None);
        assert_eq!(p.active(), Some(&PlaylistItem::fallback()));
    }

    #[test]
    fn test_replace_all_overflow_leaves_playlist_untouched() {
        let mut p = three();
        let result = p.replace_all((0..MAX_ITEMS + 1).map(|_| text("x")));
        assert_eq!(result, Err(PlaylistError::Full));
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_move_active_item_follows() {
        let mut p = three();
        p.move_item(0, 2).unwrap();
        assert_eq!(p.current_index(), 2);
        assert_eq!(label(p.active().unwrap()), "a");
    }

    #[test]
    fn test_move_across_active_item_shifts_index() {
        let mut p = three();
        p.jump_to(1, 0).unwrap();
        p.move_item(2, 0).unwrap();
        assert_eq!(label(p.active().unwrap()), "b");
        assert_eq!(p.current_index(), 2);

        p.move_item(0, 2).unwrap();
        assert_eq!(label(p.active().unwrap()), "b");
        assert_eq!(p.current_index(), 1);
    }

    #[test]
    fn test_update_active_reports_mode_change() {
        let mut p = three();
        let patch = ItemPatch {
            mode: Some(ModeKind::Twinkle),
            ..ItemPatch::default()
        };
        assert!(p.update_active(&patch));
        assert_eq!(
            p.active().unwrap().mode,
            Mode::Twinkle(TwinkleParams::default())
        );
        assert!(!p.update_active(&patch));
        assert!(p.take_save_request());
    }

    #[test]
    fn test_update_at_out_of_range() {
        let mut p = three();
        assert_eq!(
            p.update_at(7, &ItemPatch::default()),
            Err(PlaylistError::IndexOutOfRange)
        );
    }

    #[test]
    fn test_step_forward_wraps_or_holds() {
        let mut p = Playlist::from_items([text("a"), text("b")]);
        assert_eq!(p.step_forward(), StepResult::Advanced);
        assert_eq!(p.step_forward(), StepResult::Wrapped);
        assert_eq!(p.current_index(), 0);

        p.set_loop(false);
        p.step_forward();
        assert_eq!(p.step_forward(), StepResult::Held);
        assert_eq!(p.current_index(), 1);
    }

    #[test]
    fn test_remove_active_reports_wrap() {
        let mut p = three();
        p.jump_to(2, 0).unwrap();
        assert!(p.remove_active());
        assert_eq!(p.current_index(), 0);

        p.jump_to(0, 0).unwrap();
        assert!(!p.remove_active());
        assert_eq!(label(p.active().unwrap()), "b");
    }
}
