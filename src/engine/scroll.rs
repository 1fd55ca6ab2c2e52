//! Scroll position as an explicit value.
//!
//! Consumers never read the document's scroll position themselves; each
//! sample is wrapped in a [`ScrollState`] and handed to them.

/// Vertical scroll offset of the document, in CSS pixels. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ScrollState {
    offset_y: f64,
}

impl ScrollState {
    /// The document scrolled to the very top.
    pub const TOP: ScrollState = ScrollState { offset_y: 0.0 };

    /// Wrap a raw scroll sample.
    ///
    /// Touch devices report negative offsets while rubber-banding past the
    /// top; those, and NaN, are read as the top of the page.
    pub fn new(offset_y: f64) -> Self {
        if offset_y.is_nan() || offset_y < 0.0 {
            Self::TOP
        } else {
            Self { offset_y }
        }
    }

    pub fn offset_y(self) -> f64 {
        self.offset_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_positive_offsets() {
        assert_eq!(ScrollState::new(42.5).offset_y(), 42.5);
    }

    #[test]
    fn negative_offset_reads_as_top() {
        assert_eq!(ScrollState::new(-30.0), ScrollState::TOP);
    }

    #[test]
    fn nan_offset_reads_as_top() {
        assert_eq!(ScrollState::new(f64::NAN), ScrollState::TOP);
    }
}
