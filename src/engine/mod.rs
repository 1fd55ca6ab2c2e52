//! Scroll-reactive presentation engine.
//!
//! Decides what the header, the hero and the content sections look like as a
//! function of the scroll position, of which elements have been seen, and of
//! the menu button. Everything here is plain state and pure transitions: no
//! module reads the document, a clock or a global. The host (the generated
//! page's script, the `trace` command, the tests) feeds explicit samples in.
//!
//! | Module | Role |
//! |--------|------|
//! | [`scroll`] | [`ScrollState`], the injected scroll sample |
//! | [`observer`] | One-shot "has entered the viewport" latches |
//! | [`nav`] | Header mode and mobile menu state machine |
//! | [`parallax`] | Clamped scroll → background offset mapping |
//! | [`reveal`] | Entrance animations and sibling staggering |
//! | [`session`] | Wiring of the above for one page session |

pub mod nav;
pub mod observer;
pub mod parallax;
pub mod reveal;
pub mod scroll;
pub mod session;

pub use nav::{HeaderMode, MenuState, NavEvent, NavState};
pub use observer::{IntersectionSupport, Rect, Viewport, ViewportObserver};
pub use parallax::{ParallaxController, ParallaxOffset};
pub use reveal::{Offset, RevealAnimator, RevealKind, RevealSpec, ScheduledAnimation, Transition};
pub use scroll::ScrollState;
pub use session::{EngineSettings, EventKind, Frame, PageEvent, PageLayout, PageSession};
