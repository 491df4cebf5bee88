//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared by the configuration side, the
//! tick loop and the display loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::commands::PlaylistCommand;

/// Channel capacity for playlist edits
pub const COMMAND_CHANNEL_SIZE: usize = 4;

/// Playlist edits from the configuration side
pub static COMMAND_CHANNEL: Channel<
    CriticalSectionRawMutex,
    PlaylistCommand,
    COMMAND_CHANNEL_SIZE,
> = Channel::new();

/// Signal that the playlist changed and should be persisted
pub static SAVE_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Tick signal; the value is milliseconds since boot
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

#[cfg(test)]
mod tests {
    use super::*;
    use ledrack_core::config::{item_text, ItemPatch};

    #[test]
    fn test_command_channel_is_fifo() {
        COMMAND_CHANNEL
            .try_send(PlaylistCommand::SetBanner(Some(item_text("UPDATING").unwrap())))
            .unwrap();
        COMMAND_CHANNEL
            .try_send(PlaylistCommand::UpdateActive(ItemPatch::default()))
            .unwrap();
        assert!(matches!(
            COMMAND_CHANNEL.try_receive(),
            Ok(PlaylistCommand::SetBanner(Some(_)))
        ));
        assert!(matches!(
            COMMAND_CHANNEL.try_receive(),
            Ok(PlaylistCommand::UpdateActive(_))
        ));
        assert!(COMMAND_CHANNEL.try_receive().is_err());
    }
}
