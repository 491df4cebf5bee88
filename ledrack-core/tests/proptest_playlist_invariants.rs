//! Property-based invariant tests for the playlist and its scheduler.
//!
//! 1. After any mix of ticks, transitions and edits the playlist is never
//!    empty and the active index is valid.
//! 2. A single looping item re-enters itself every `duration` ms.
//! 3. Two looping items advance and wrap.
//! 4. An item limited to N plays is deleted exactly when its count reaches N.
//! 5. Deleting before the active item keeps the same item active.
//! 6. Replacing everything with nothing leaves exactly the fallback item.

use ledrack_core::config::{Mode, PlaylistItem};
use ledrack_core::scheduler::{Playlist, Scheduler, TickOutcome, TransitionOutcome};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn text_item(label: &str, duration_ms: u32) -> PlaylistItem {
    PlaylistItem::text(label).unwrap().with_duration(duration_ms)
}

fn label(item: &PlaylistItem) -> String {
    match &item.mode {
        Mode::Text(p) => p.text.as_str().to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Tick(u32),
    Advance,
    Push { duration: u32, max_plays: u32, delete: bool },
    Remove(usize),
    Move(usize, usize),
    ReplaceAll(usize),
    Jump(usize),
    SetLoop(bool),
}

fn item_strategy() -> impl Strategy<Value = PlaylistItem> {
    (0u32..3000, 0u32..4, any::<bool>()).prop_map(|(duration, max_plays, delete)| {
        text_item("p", duration).with_max_plays(max_plays, delete)
    })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u32..5000).prop_map(Op::Tick),
        2 => Just(Op::Advance),
        2 => (0u32..3000, 0u32..4, any::<bool>())
            .prop_map(|(duration, max_plays, delete)| Op::Push { duration, max_plays, delete }),
        2 => (0usize..40).prop_map(Op::Remove),
        1 => (0usize..40, 0usize..40).prop_map(|(a, b)| Op::Move(a, b)),
        1 => (0usize..5).prop_map(Op::ReplaceAll),
        1 => (0usize..40).prop_map(Op::Jump),
        1 => any::<bool>().prop_map(Op::SetLoop),
    ]
}

fn assert_structure(playlist: &Playlist) -> Result<(), TestCaseError> {
    prop_assert!(!playlist.is_empty(), "playlist went empty");
    prop_assert!(
        playlist.current_index() < playlist.len(),
        "index {} out of range for {} items",
        playlist.current_index(),
        playlist.len()
    );
    prop_assert!(playlist.active().is_some());
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Never empty, index always valid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn playlist_never_empty_and_index_valid(
        initial in prop::collection::vec(item_strategy(), 0..6),
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let scheduler = Scheduler::default();
        let mut playlist = Playlist::from_items(initial);
        let mut now = 0u32;
        scheduler.start(&mut playlist, now);
        assert_structure(&playlist)?;

        for op in ops {
            match op {
                Op::Tick(dt) => {
                    now = now.wrapping_add(dt);
                    let outcome = scheduler.tick(&mut playlist, now);
                    if let TickOutcome::Active { index, .. } = outcome {
                        prop_assert_eq!(index, playlist.current_index());
                    }
                }
                Op::Advance => {
                    let t = scheduler.advance(&mut playlist, now);
                    prop_assert_eq!(t.to_index, playlist.current_index());
                }
                Op::Push { duration, max_plays, delete } => {
                    let _ = playlist.push(text_item("n", duration).with_max_plays(max_plays, delete));
                }
                Op::Remove(i) => {
                    let _ = playlist.remove(i);
                }
                Op::Move(a, b) => {
                    let _ = playlist.move_item(a, b);
                }
                Op::ReplaceAll(n) => {
                    let _ = playlist.replace_all((0..n).map(|_| text_item("r", 100)));
                }
                Op::Jump(i) => {
                    let _ = playlist.jump_to(i, now);
                }
                Op::SetLoop(on) => playlist.set_loop(on),
            }
            assert_structure(&playlist)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Single looping item re-enters itself
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_looping_item_reenters_itself(duration in 1u32..10_000, rounds in 1u32..20) {
        let scheduler = Scheduler::default();
        let mut playlist = Playlist::from_items([text_item("solo", duration)]);
        scheduler.start(&mut playlist, 0);

        let mut last_start = 0u32;
        for k in 1..=rounds {
            let now = k * (duration + 1);
            let outcome = scheduler.tick(&mut playlist, now);
            let t = outcome.transition().copied();
            prop_assert!(t.is_some(), "expected a transition at {}", now);
            prop_assert_eq!(playlist.current_index(), 0);
            let started = playlist.item_started_at().unwrap();
            prop_assert!(started - last_start >= duration);
            last_start = started;
        }
        prop_assert_eq!(playlist.play_count(0), Some(rounds));
    }
}

#[test]
fn single_item_5000ms_schedule() {
    let scheduler = Scheduler::default();
    let mut playlist = Playlist::from_items([text_item("solo", 5000)]);
    scheduler.start(&mut playlist, 0);
    assert!(scheduler.tick(&mut playlist, 0).transition().is_none());
    for (k, now) in [5001u32, 10_002, 15_003, 20_004].into_iter().enumerate() {
        let t = scheduler.tick(&mut playlist, now).transition().copied().unwrap();
        assert_eq!(t.outcome, TransitionOutcome::Wrapped);
        assert_eq!(playlist.current_index(), 0);
        assert_eq!(playlist.item_started_at(), Some(now));
        assert_eq!(playlist.play_count(0), Some(k as u32 + 1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Two looping items advance then wrap
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn two_items_advance_then_wrap() {
    let scheduler = Scheduler::default();
    let mut playlist = Playlist::from_items([text_item("A", 1000), text_item("B", 1000)]);
    playlist.set_loop(true);
    scheduler.start(&mut playlist, 0);

    scheduler.tick(&mut playlist, 1001);
    assert_eq!(playlist.current_index(), 1);
    scheduler.tick(&mut playlist, 2002);
    assert_eq!(playlist.current_index(), 0);
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Delete after max plays
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn limited_item_deleted_exactly_at_max_plays(
        max_plays in 1u32..5,
        others in 0usize..4,
    ) {
        let scheduler = Scheduler::default();
        let mut items = vec![text_item("limited", 1000).with_max_plays(max_plays, true)];
        items.extend((0..others).map(|_| text_item("other", 1000)));
        let mut playlist = Playlist::from_items(items);
        scheduler.start(&mut playlist, 0);

        let total = playlist.len();
        let mut now = 0u32;
        let mut plays = 0u32;
        let mut deleted = false;
        // Each full pass over the playlist plays the limited item once
        while !deleted {
            prop_assert_eq!(label(&playlist.items()[0]), "limited");
            for _ in 0..total {
                now += 1001;
                let outcome = scheduler.tick(&mut playlist, now);
                let t = outcome.transition().copied().unwrap();
                prop_assert!(!playlist.is_empty());
                if t.from_index != 0 {
                    continue;
                }
                plays += 1;
                if t.outcome.is_deletion() {
                    prop_assert_eq!(plays, max_plays);
                    deleted = true;
                    break;
                }
                prop_assert!(plays < max_plays);
                prop_assert_eq!(playlist.play_count(0), Some(plays));
            }
        }
        prop_assert!(playlist.items().iter().all(|item| label(item) != "limited"));
        prop_assert_eq!(playlist.len(), others.max(1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Deleting before the active item keeps it active
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delete_before_active_keeps_item(len in 2usize..10, active_seed in 0usize..100, del_seed in 0usize..100) {
        let labels: Vec<String> = (0..len).map(|i| format!("item{i}")).collect();
        let mut playlist = Playlist::from_items(labels.iter().map(|l| text_item(l, 1000)));
        let active = 1 + active_seed % (len - 1);
        let delete = del_seed % active;
        playlist.jump_to(active, 0).unwrap();

        playlist.remove(delete).unwrap();
        prop_assert_eq!(playlist.current_index(), active - 1);
        prop_assert_eq!(label(playlist.active().unwrap()), labels[active].clone());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Replace with nothing leaves the fallback
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn replace_with_nothing_leaves_fallback(initial in prop::collection::vec(item_strategy(), 0..8)) {
        let mut playlist = Playlist::from_items(initial);
        playlist.replace_all(std::iter::empty()).unwrap();
        prop_assert_eq!(playlist.len(), 1);
        prop_assert_eq!(playlist.current_index(), 0);
        prop_assert_eq!(playlist.active(), Some(&PlaylistItem::fallback()));
    }
}
