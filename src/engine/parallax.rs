//! Scroll-linked offset of the hero background.

use super::scroll::ScrollState;
use serde::Serialize;

/// Maps a scroll offset onto a bounded background offset.
///
/// Inside `scroll_range` the mapping is linear; outside it the output is
/// pinned to the nearest end of `offset_range`, so a long page or a fast
/// fling can never push the background further than the range allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxController {
    scroll_range: [f64; 2],
    offset_range: [f64; 2],
}

impl Default for ParallaxController {
    fn default() -> Self {
        Self {
            scroll_range: [0.0, 500.0],
            offset_range: [0.0, 150.0],
        }
    }
}

impl ParallaxController {
    pub fn new(scroll_range: [f64; 2], offset_range: [f64; 2]) -> Self {
        Self {
            scroll_range,
            offset_range,
        }
    }

    pub fn offset(&self, scroll: ScrollState) -> ParallaxOffset {
        let [scroll_start, scroll_end] = self.scroll_range;
        let [offset_start, offset_end] = self.offset_range;
        let y = scroll.offset_y();

        // A zero-width scroll range degenerates to a step at its start.
        let px = if y >= scroll_end {
            offset_end
        } else if y <= scroll_start {
            offset_start
        } else {
            let t = (y - scroll_start) / (scroll_end - scroll_start);
            offset_start + t * (offset_end - offset_start)
        };
        ParallaxOffset(px)
    }
}

/// Vertical translation of the hero background, in px.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct ParallaxOffset(f64);

impl ParallaxOffset {
    pub fn px(self) -> f64 {
        self.0
    }

    pub fn css_transform(self) -> String {
        format!("translate3d(0, {}px, 0)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(offset: f64) -> f64 {
        ParallaxController::default()
            .offset(ScrollState::new(offset))
            .px()
    }

    #[test]
    fn maps_range_endpoints() {
        assert_eq!(at(0.0), 0.0);
        assert_eq!(at(500.0), 150.0);
    }

    #[test]
    fn midpoint_is_linear() {
        assert_eq!(at(250.0), 75.0);
    }

    #[test]
    fn clamps_instead_of_extrapolating() {
        assert_eq!(at(1000.0), 150.0);
        assert_eq!(at(f64::INFINITY), 150.0);
    }

    #[test]
    fn degenerate_range_is_a_step() {
        let controller = ParallaxController::new([100.0, 100.0], [0.0, 40.0]);
        assert_eq!(controller.offset(ScrollState::new(99.0)).px(), 0.0);
        assert_eq!(controller.offset(ScrollState::new(100.0)).px(), 40.0);
    }

    #[test]
    fn css_transform_uses_pixels() {
        let offset = ParallaxController::default().offset(ScrollState::new(250.0));
        assert_eq!(offset.css_transform(), "translate3d(0, 75px, 0)");
    }

    proptest! {
        #[test]
        fn output_stays_within_offset_range(offset in -1_000.0f64..100_000.0) {
            let px = at(offset);
            prop_assert!((0.0..=150.0).contains(&px));
        }

        #[test]
        fn mapping_is_monotonic(a in 0.0f64..2_000.0, b in 0.0f64..2_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(at(lo) <= at(hi));
        }
    }
}
