//! # garage-site
//!
//! Static site generator and scroll-reactive presentation engine for the
//! single-page storefront of a local auto-repair shop: fixed navigation
//! header, parallax hero, services catalog, about block, contacts with a map
//! link, footer.
//!
//! # Architecture: Load → Plan → Generate
//!
//! ```text
//! 1. Load      content/config.toml + env  →  SiteConfig
//!              content/catalog.toml       →  Catalog + CatalogReport
//! 2. Plan      Catalog + SiteConfig       →  RevealPlan, NominalLayout
//! 3. Generate  everything above           →  dist/index.html + assets
//! ```
//!
//! The page behaves according to the [`engine`]: plain state values and pure
//! transitions deciding the header mode, the mobile menu, the hero offset and
//! which sections have played their entrance. The engine never reads a
//! global. The generated page carries a small event shim that feeds browser
//! events through the same thresholds and ranges; the `trace` command and
//! the tests feed scripted events instead.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Viewport observer, navigation state machine, parallax, reveal animator, page session |
//! | [`catalog`] | `catalog.toml` loading; per-entry validation of services |
//! | [`config`] | `config.toml` loading, merging over stock defaults, env override, theme CSS |
//! | [`page`] | Section order, reveal plan, nominal layout, scripted traces |
//! | [`generate`] | Maud rendering of the page and asset copying |
//! | [`icons`] | Inline SVG icons |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//! | [`types`] | Identifiers shared across modules (`Section`, `TargetId`) |
//!
//! # Design Decisions
//!
//! ## Bad Entries Don't Break The Page
//!
//! A malformed service entry is left out and reported; the rest of the grid
//! renders. Only a broken page structure (unparseable file, wrong
//! navigation links) fails the build.
//!
//! ## One-Shot Entrances
//!
//! Once a section has been seen it stays revealed. Scrolling back up never
//! hides it again, and the observer stops watching it.
//!
//! ## Fail Open
//!
//! Without an intersection observer, or with scripting disabled, every
//! section is shown immediately instead of staying invisible.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod generate;
pub mod icons;
pub mod logging;
pub mod output;
pub mod page;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
