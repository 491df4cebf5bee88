//! Playlist edit commands
//!
//! One variant per controller edit. The configuration side (web handler,
//! serial console, ...) builds these and queues them; nothing else touches
//! the controller between ticks.

use heapless::Vec;
use rand::Rng;

use ledrack_core::config::{ItemPatch, ItemText, PlaylistError, PlaylistItem};
use ledrack_core::Controller;

/// Items carried by one replace command
///
/// Every command is as large as its largest variant, so a full playlist is
/// never sent inline. Longer playlists follow up with `AddItem`s; the queue
/// is drained in one go before each tick.
pub const REPLACE_BATCH: usize = 4;

pub type ItemBatch = Vec<PlaylistItem, REPLACE_BATCH>;

/// A queued playlist edit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaylistCommand {
    /// Append an item
    AddItem(PlaylistItem),
    /// Replace the whole playlist with the first items of a new one
    ReplaceItems(ItemBatch),
    RemoveItem(usize),
    MoveItem { from: usize, to: usize },
    /// Edit the active item
    UpdateActive(ItemPatch),
    UpdateItem { index: usize, patch: ItemPatch },
    SetDisplayOn(bool),
    SetLoop(bool),
    JumpTo(usize),
    /// Scroll a temporary message; `None` uses the configured duration
    ShowMessage {
        text: ItemText,
        duration_ms: Option<u32>,
    },
    /// Show or clear the suspending banner
    SetBanner(Option<ItemText>),
}

/// Apply one command to the controller
///
/// Failures are logged and dropped; returns `true` if the edit took effect.
pub fn apply_command<R: Rng>(
    controller: &mut Controller<R>,
    command: PlaylistCommand,
    now: u32,
) -> bool {
    let result: Result<(), PlaylistError> = match command {
        PlaylistCommand::AddItem(item) => controller.add_item(item).map(|_| ()),
        PlaylistCommand::ReplaceItems(items) => controller.replace_items(items),
        PlaylistCommand::RemoveItem(index) => controller.remove_item(index).map(|_| ()),
        PlaylistCommand::MoveItem { from, to } => controller.move_item(from, to),
        PlaylistCommand::UpdateActive(patch) => {
            controller.update_active(&patch);
            Ok(())
        }
        PlaylistCommand::UpdateItem { index, patch } => {
            controller.update_item(index, &patch).map(|_| ())
        }
        PlaylistCommand::SetDisplayOn(on) => {
            controller.set_display_on(on);
            Ok(())
        }
        PlaylistCommand::SetLoop(on) => {
            controller.set_loop(on);
            Ok(())
        }
        PlaylistCommand::JumpTo(index) => controller.jump_to(index, now),
        PlaylistCommand::ShowMessage { text, duration_ms } => {
            let duration_ms = duration_ms.unwrap_or(controller.config().message_duration_ms);
            controller.show_message(&text, now, duration_ms)
        }
        PlaylistCommand::SetBanner(text) => controller.set_banner(text.as_deref()),
    };

    match result {
        Ok(()) => true,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Playlist command rejected: {:?}", _e);
            false
        }
    }
}
