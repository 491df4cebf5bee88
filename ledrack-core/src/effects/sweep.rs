//! Knight rider sweep
//!
//! A head pixel bounces between the first and last column on the middle
//! row, dragging a dithered tail behind it.

use rand::Rng;

use crate::config::{PanelGeometry, SweepParams};
use crate::traits::{DisplayExt, MatrixDisplay};

/// Sweep state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepStore {
    /// Head column
    position: u8,
    /// +1 moving right, -1 moving left
    direction: i8,
    last_update: Option<u32>,
}

impl Default for SweepStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepStore {
    pub const fn new() -> Self {
        Self {
            position: 0,
            direction: 1,
            last_update: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Let the next update draw immediately, keeping the current state
    pub fn force_update(&mut self) {
        self.last_update = None;
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Step the head and redraw, if the update interval has passed
    ///
    /// Returns `true` if the frame was redrawn.
    pub fn update<D, R>(
        &mut self,
        params: &SweepParams,
        now: u32,
        geometry: &PanelGeometry,
        display: &mut D,
        rng: &mut R,
    ) -> bool
    where
        D: MatrixDisplay + ?Sized,
        R: Rng,
    {
        let params = params.clamped();
        if let Some(last) = self.last_update {
            if now.wrapping_sub(last) < u32::from(params.interval_ms) {
                return false;
            }
        }
        self.last_update = Some(now);

        let step = self.direction;
        self.step(geometry);

        let row = i32::from(geometry.mid_row());
        let head = i32::from(self.position);
        display.clear();
        display.light(geometry, row, head);

        // Tail points back along the step just taken
        for i in 1..u32::from(params.tail_len) {
            if rng.random_range(0..=i) == 0 {
                let col = head - i32::from(step) * i as i32;
                display.light(geometry, row, col);
            }
        }
        true
    }

    /// Move one column, reversing at the edges
    fn step(&mut self, geometry: &PanelGeometry) {
        let last = i16::from(geometry.last_col());
        let current = i16::from(self.position).min(last);
        let next = current + i16::from(self.direction);
        if next <= 0 {
            self.position = 0;
            self.direction = 1;
        } else if next >= last {
            self.position = last as u8;
            self.direction = -1;
        } else {
            self.position = next as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDisplay;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounces_between_edges() {
        let mut store = SweepStore::new();
        let geo = PanelGeometry::new(8, 5);
        let mut seen = [0u8; 12];
        for slot in seen.iter_mut() {
            store.step(&geo);
            *slot = store.position();
        }
        assert_eq!(seen, [1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_direction_flips_exactly_at_bounds() {
        let mut store = SweepStore::new();
        let geo = PanelGeometry::new(8, 5);
        for _ in 0..40 {
            store.step(&geo);
            match store.position() {
                0 => assert_eq!(store.direction(), 1),
                4 => assert_eq!(store.direction(), -1),
                _ => {}
            }
        }
    }

    #[test]
    fn test_single_column_panel() {
        let mut store = SweepStore::new();
        let geo = PanelGeometry::new(8, 1);
        for _ in 0..4 {
            store.step(&geo);
            assert_eq!(store.position(), 0);
        }
    }

    #[test]
    fn test_rate_limited() {
        let mut store = SweepStore::new();
        let mut display = MockDisplay::new();
        let mut rng = SmallRng::seed_from_u64(2);
        let geo = PanelGeometry::default();
        let params = SweepParams {
            interval_ms: 50,
            tail_len: 4,
        };
        assert!(store.update(&params, 0, &geo, &mut display, &mut rng));
        assert!(!store.update(&params, 49, &geo, &mut display, &mut rng));
        assert_eq!(store.position(), 1);
        assert!(store.update(&params, 50, &geo, &mut display, &mut rng));
        assert_eq!(store.position(), 2);
    }

    #[test]
    fn test_head_on_middle_row_with_tail_behind() {
        let mut store = SweepStore::new();
        let mut display = MockDisplay::new();
        let mut rng = SmallRng::seed_from_u64(11);
        let geo = PanelGeometry::default();
        let params = SweepParams {
            interval_ms: 10,
            tail_len: 4,
        };
        for t in 0..10 {
            store.update(&params, t * 10, &geo, &mut display, &mut rng);
        }
        let head = store.position();
        assert!(display.is_lit(4, head));
        for col in 0..geo.cols() {
            for row in 0..geo.rows() {
                if display.is_lit(row, col) {
                    assert_eq!(row, 4);
                    assert!(col <= head && head - col < 4);
                }
            }
        }
    }

    #[test]
    fn test_position_clamped_after_geometry_shrinks() {
        let mut store = SweepStore::new();
        for _ in 0..50 {
            store.step(&PanelGeometry::new(8, 96));
        }
        store.step(&PanelGeometry::new(8, 10));
        assert!(store.position() <= 9);
    }
}
