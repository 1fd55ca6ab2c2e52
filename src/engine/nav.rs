//! Navigation state machine: header appearance and the mobile menu.
//!
//! The machine has two orthogonal axes, so all four combinations of
//! [`HeaderMode`] and [`MenuState`] are reachable:
//!
//! ```text
//!              menu Closed          menu Open
//! Default   (initial state)     toggle from Default
//! Scrolled  scroll past 20px    scroll with menu open
//! ```
//!
//! Only the scroll offset and the menu are stored. The header mode is
//! recomputed from the offset whenever it is asked for, so it cannot drift
//! away from the scroll position it describes.

use super::scroll::ScrollState;
use serde::Serialize;

/// Offset (px) past which the header switches to its scrolled styling.
pub const DEFAULT_HEADER_THRESHOLD: f64 = 20.0;

/// Visual mode of the fixed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderMode {
    Default,
    Scrolled,
}

impl HeaderMode {
    /// `Scrolled` iff the offset is strictly greater than `threshold`.
    ///
    /// No hysteresis: a page hovering around the threshold toggles on every
    /// sample, the CSS transition on the header smooths it out.
    pub fn for_scroll(scroll: ScrollState, threshold: f64) -> Self {
        if scroll.offset_y() > threshold {
            HeaderMode::Scrolled
        } else {
            HeaderMode::Default
        }
    }

    /// Class applied to the `<header>` element.
    pub fn css_class(self) -> &'static str {
        match self {
            HeaderMode::Default => "header-default",
            HeaderMode::Scrolled => "header-scrolled",
        }
    }
}

/// Mobile menu panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Inputs of the navigation state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// A new scroll sample.
    Scroll(ScrollState),
    /// Click on the menu button.
    ToggleMenu,
    /// Click on one of the navigation links. The browser performs the
    /// in-page scroll itself.
    FollowLink(String),
}

/// Source-of-truth state of the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavState {
    pub scroll: ScrollState,
    pub menu: MenuState,
}

impl NavState {
    pub fn header_mode(&self, threshold: f64) -> HeaderMode {
        HeaderMode::for_scroll(self.scroll, threshold)
    }
}

/// Apply one event to the navigation state.
///
/// Scrolling never touches the menu; following a link always leaves it
/// closed; the toggle button is a plain flip.
pub fn transition(state: NavState, event: &NavEvent) -> NavState {
    match event {
        NavEvent::Scroll(scroll) => NavState {
            scroll: *scroll,
            ..state
        },
        NavEvent::ToggleMenu => NavState {
            menu: state.menu.toggled(),
            ..state
        },
        NavEvent::FollowLink(_) => NavState {
            menu: MenuState::Closed,
            ..state
        },
    }
}
