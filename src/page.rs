//! Composition root: what the page is made of and in which order.
//!
//! The page is a fixed stack of sections ([`PAGE_ORDER`]). Nothing about the
//! order depends on the catalog. This module also decides which elements
//! get an entrance animation ([`reveal_plan`]) and estimates where they sit
//! on a reference desktop viewport ([`nominal_layout`]), which is what the
//! `trace` command and the end-to-end tests run the engine against.

use crate::catalog::{self, Catalog, CatalogError, CatalogReport, ServiceEntry};
use crate::config::{self, ConfigError, SiteConfig};
use crate::engine::{
    Frame, IntersectionSupport, Offset, PageEvent, PageLayout, PageSession, Rect, RevealSpec,
    ScrollState, Transition, Viewport,
};
use crate::types::{Section, TargetId};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Vertical order of the page.
pub const PAGE_ORDER: [Section; 6] = [
    Section::Header,
    Section::Hero,
    Section::Services,
    Section::About,
    Section::Contacts,
    Section::Footer,
];

/// Reveal target ids used by the page.
pub mod targets {
    pub const HERO_CONTENT: &str = "hero-content";
    pub const SERVICES_HEADING: &str = "services-heading";
    pub const SERVICES_GRID: &str = "services-grid";
    pub const SERVICES_CTA: &str = "services-cta";
    pub const ABOUT_TEXT: &str = "about-text";
    pub const ABOUT_GALLERY: &str = "about-gallery";
    pub const CONTACTS_HEADING: &str = "contacts-heading";
    pub const CONTACTS_CARD: &str = "contacts-card";
    pub const CONTACTS_MAP: &str = "contacts-map";
}

/// Children of the hero content group, in display order.
pub const HERO_PARTS: [&str; 4] = ["title", "subtitle", "actions", "facts"];

const HERO_DELAY: Duration = Duration::from_millis(200);
const HERO_INTERVAL: Duration = Duration::from_millis(200);
const HERO_RISE: f64 = 30.0;
const SERVICES_CTA_DELAY: Duration = Duration::from_millis(300);

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Everything needed to render the page.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub catalog: Catalog,
    pub report: CatalogReport,
}

impl Site {
    /// Load `config.toml` and `catalog.toml` from the content directory and
    /// apply environment overrides through `env`.
    pub fn load(root: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self, SiteError> {
        let config = config::load_config(root)?.with_env(env);
        let (catalog, report) = catalog::load_catalog(root)?;
        Ok(Self {
            config,
            catalog,
            report,
        })
    }

    pub fn reveal_plan(&self) -> RevealPlan {
        reveal_plan(&self.catalog, &self.config)
    }

    /// Mount a page session on the nominal layout for `viewport`.
    pub fn mount(
        &self,
        viewport: Viewport,
        support: IntersectionSupport,
    ) -> (PageSession, Frame, NominalLayout) {
        let layout = nominal_layout(&self.catalog, viewport.height);
        let (session, frame) = PageSession::mount(
            self.config.engine_settings(),
            self.reveal_plan().into_specs(),
            &layout.targets,
            viewport,
            support,
            Duration::ZERO,
        );
        (session, frame, layout)
    }
}

/// The entrance animations of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealPlan {
    specs: Vec<RevealSpec>,
}

impl RevealPlan {
    pub fn specs(&self) -> &[RevealSpec] {
        &self.specs
    }

    pub fn into_specs(self) -> Vec<RevealSpec> {
        self.specs
    }

    pub fn get(&self, id: &str) -> Option<&RevealSpec> {
        self.specs.iter().find(|s| s.id.as_str() == id)
    }

    /// Start offset of an element relative to its target's trigger.
    ///
    /// `child` is `None` for single elements.
    pub fn start_offset(&self, id: &str, child: Option<&str>) -> Option<Duration> {
        self.get(id)?
            .start_offsets()
            .into_iter()
            .find(|(key, _)| *key == child)
            .map(|(_, offset)| offset)
    }
}

/// Build the reveal plan for the page.
///
/// Grid children are the service ids in catalog order, so the stagger
/// follows the order the cards are displayed in.
pub fn reveal_plan(catalog: &Catalog, config: &SiteConfig) -> RevealPlan {
    let duration = config.reveal.duration();
    let distance = config.reveal.distance;
    let rise = Transition::new(duration, Offset::below(distance));
    let from_left = Transition::new(duration, Offset::beside(-distance));
    let from_right = Transition::new(duration, Offset::beside(distance));

    let specs = vec![
        RevealSpec::group(
            targets::HERO_CONTENT,
            Transition::new(duration, Offset::below(HERO_RISE)).with_delay(HERO_DELAY),
            HERO_INTERVAL,
            HERO_PARTS.iter().map(|p| p.to_string()).collect(),
        ),
        RevealSpec::single(targets::SERVICES_HEADING, rise),
        RevealSpec::group(
            targets::SERVICES_GRID,
            rise,
            config.reveal.stagger(),
            service_keys(&catalog.services),
        ),
        RevealSpec::single(targets::SERVICES_CTA, rise.with_delay(SERVICES_CTA_DELAY)),
        RevealSpec::single(targets::ABOUT_TEXT, from_left),
        RevealSpec::single(targets::ABOUT_GALLERY, from_right),
        RevealSpec::single(targets::CONTACTS_HEADING, rise),
        RevealSpec::single(targets::CONTACTS_CARD, from_left),
        RevealSpec::single(targets::CONTACTS_MAP, from_right),
    ];
    RevealPlan { specs }
}

/// Stable grid key of a service card.
pub fn service_key(service: &ServiceEntry) -> String {
    service.id.to_string()
}

fn service_keys(services: &[ServiceEntry]) -> Vec<String> {
    services.iter().map(service_key).collect()
}

// ============================================================================
// Trace
// ============================================================================

/// Session time between two replayed events.
pub const TRACE_STEP: Duration = Duration::from_secs(1);

/// One step of a replayed session.
#[derive(Debug, Clone)]
pub struct TraceStep {
    /// `None` for the mount.
    pub event: Option<PageEvent>,
    /// Session time of the step.
    pub at: Duration,
    pub frame: Frame,
}

/// Mount the page at the top of a `viewport_height` px viewport and replay
/// `events` one [`TRACE_STEP`] apart, recording the frame after each.
pub fn trace(
    site: &Site,
    viewport_height: f64,
    support: IntersectionSupport,
    events: Vec<PageEvent>,
) -> Vec<TraceStep> {
    let viewport = Viewport::new(ScrollState::TOP, viewport_height);
    let (mut session, frame, _) = site.mount(viewport, support);
    let mut steps = vec![TraceStep {
        event: None,
        at: Duration::ZERO,
        frame,
    }];

    let mut at = Duration::ZERO;
    for event in events {
        at += TRACE_STEP;
        let Some(frame) = session.dispatch(event.clone(), at) else {
            break;
        };
        steps.push(TraceStep {
            event: Some(event),
            at,
            frame,
        });
    }
    session.unmount();
    steps
}

// ============================================================================
// Nominal layout
// ============================================================================

/// Viewport height used when no real one is known (rendering, `trace`).
pub const REFERENCE_VIEWPORT_HEIGHT: f64 = 800.0;

/// Reference desktop metrics, in px.
const HEADER_HEIGHT: f64 = 80.0;
const HERO_MIN_HEIGHT: f64 = 640.0;
const HERO_CONTENT_HEIGHT: f64 = 480.0;
const SECTION_PADDING: f64 = 128.0;
const HEADING_HEIGHT: f64 = 140.0;
const HEADING_GAP: f64 = 64.0;
const GRID_COLUMNS: usize = 4;
const CARD_HEIGHT: f64 = 380.0;
const GRID_GAP: f64 = 24.0;
const CTA_GAP: f64 = 48.0;
const CTA_HEIGHT: f64 = 120.0;
const ABOUT_HEIGHT: f64 = 620.0;
const CONTACT_CARDS_HEIGHT: f64 = 400.0;
const FOOTER_HEIGHT: f64 = 320.0;

/// Estimated geometry of the page on a desktop viewport.
#[derive(Debug, Clone)]
pub struct NominalLayout {
    /// Boxes of every reveal target.
    pub targets: PageLayout,
    /// Boxes of the page sections, in page order.
    pub sections: Vec<(Section, Rect)>,
    pub document_height: f64,
}

/// Estimate where sections and reveal targets sit for a desktop viewport
/// of `viewport_height` px.
pub fn nominal_layout(catalog: &Catalog, viewport_height: f64) -> NominalLayout {
    let mut boxes = PageLayout::default();
    let mut sections = Vec::with_capacity(PAGE_ORDER.len());
    let mut place = |id: &str, top: f64, height: f64| {
        boxes.insert(TargetId::new(id), Rect::new(top, height));
    };
    let mut y = 0.0;

    for section in PAGE_ORDER {
        let top = y;
        let height = match section {
            // Fixed header overlays the hero; it takes no document space.
            Section::Header => {
                sections.push((section, Rect::new(0.0, HEADER_HEIGHT)));
                continue;
            }
            Section::Hero => {
                let height = viewport_height.max(HERO_MIN_HEIGHT);
                let free = (height - HEADER_HEIGHT - HERO_CONTENT_HEIGHT).max(0.0);
                place(
                    targets::HERO_CONTENT,
                    top + HEADER_HEIGHT + free / 2.0,
                    HERO_CONTENT_HEIGHT,
                );
                height
            }
            Section::Services => {
                let heading = top + SECTION_PADDING;
                let grid = heading + HEADING_HEIGHT + HEADING_GAP;
                let rows = grid_rows(&catalog.services, GRID_COLUMNS) as f64;
                let grid_height = (rows * CARD_HEIGHT + (rows - 1.0).max(0.0) * GRID_GAP).max(0.0);
                let cta = grid + grid_height + CTA_GAP;
                place(targets::SERVICES_HEADING, heading, HEADING_HEIGHT);
                place(targets::SERVICES_GRID, grid, grid_height);
                place(targets::SERVICES_CTA, cta, CTA_HEIGHT);
                cta + CTA_HEIGHT + SECTION_PADDING - top
            }
            Section::About => {
                let content = top + SECTION_PADDING;
                place(targets::ABOUT_TEXT, content, ABOUT_HEIGHT);
                place(targets::ABOUT_GALLERY, content, ABOUT_HEIGHT);
                2.0 * SECTION_PADDING + ABOUT_HEIGHT
            }
            Section::Contacts => {
                let heading = top + SECTION_PADDING;
                let cards = heading + HEADING_HEIGHT + HEADING_GAP;
                place(targets::CONTACTS_HEADING, heading, HEADING_HEIGHT);
                place(targets::CONTACTS_CARD, cards, CONTACT_CARDS_HEIGHT);
                place(targets::CONTACTS_MAP, cards, CONTACT_CARDS_HEIGHT);
                cards + CONTACT_CARDS_HEIGHT + SECTION_PADDING - top
            }
            Section::Footer => FOOTER_HEIGHT,
        };
        sections.push((section, Rect::new(top, height)));
        y += height;
    }

    NominalLayout {
        targets: boxes,
        sections,
        document_height: y,
    }
}

/// Rows used by the services grid with row-major auto placement: a featured
/// card spans two columns and wraps to a new row when it does not fit.
pub fn grid_rows(services: &[ServiceEntry], columns: usize) -> usize {
    let columns = columns.max(1);
    let mut rows = 0;
    let mut col = columns;
    for service in services {
        let span = if service.featured { 2.min(columns) } else { 1 };
        if col + span > columns {
            rows += 1;
            col = 0;
        }
        col += span;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        EngineSettings, HeaderMode, IntersectionSupport, MenuState, PageEvent, PageSession,
        ScrollState, Viewport,
    };
    use crate::test_helpers::stock_catalog;

    #[test]
    fn page_order_is_fixed() {
        assert_eq!(
            PAGE_ORDER,
            [
                Section::Header,
                Section::Hero,
                Section::Services,
                Section::About,
                Section::Contacts,
                Section::Footer
            ]
        );
    }

    #[test]
    fn grid_children_follow_catalog_order() {
        let mut catalog = stock_catalog();
        catalog.services.reverse();
        let plan = reveal_plan(&catalog, &SiteConfig::default());
        let keys: Vec<&str> = plan
            .get(targets::SERVICES_GRID)
            .unwrap()
            .start_offsets()
            .into_iter()
            .filter_map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["8", "7", "6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn grid_stagger_is_index_times_interval() {
        let plan = reveal_plan(&stock_catalog(), &SiteConfig::default());
        for i in 0..8u32 {
            let key = (i + 1).to_string();
            assert_eq!(
                plan.start_offset(targets::SERVICES_GRID, Some(key.as_str())),
                Some(Duration::from_millis(100) * i)
            );
        }
    }

    #[test]
    fn hero_parts_are_staggered_after_delay() {
        let plan = reveal_plan(&stock_catalog(), &SiteConfig::default());
        let starts: Vec<Option<Duration>> = HERO_PARTS
            .iter()
            .map(|p| plan.start_offset(targets::HERO_CONTENT, Some(*p)))
            .collect();
        assert_eq!(
            starts,
            [200, 400, 600, 800]
                .map(|ms| Some(Duration::from_millis(ms)))
                .to_vec()
        );
    }

    #[test]
    fn services_cta_is_delayed() {
        let plan = reveal_plan(&stock_catalog(), &SiteConfig::default());
        assert_eq!(
            plan.start_offset(targets::SERVICES_CTA, None),
            Some(Duration::from_millis(300))
        );
    }

    #[test]
    fn grid_rows_pack_featured_cards() {
        let catalog = stock_catalog();
        // Featured card takes two columns: [1 1 2 3] [4 5 6 7] [8]
        assert_eq!(grid_rows(&catalog.services, 4), 3);
        assert_eq!(grid_rows(&catalog.services, 1), 8);
        assert_eq!(grid_rows(&[], 4), 0);
    }

    #[test]
    fn layout_stacks_sections_in_order() {
        let layout = nominal_layout(&stock_catalog(), 800.0);
        let order: Vec<Section> = layout.sections.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, PAGE_ORDER.to_vec());
        let tops: Vec<f64> = layout.sections.iter().skip(1).map(|(_, r)| r.top).collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        let plan = reveal_plan(&stock_catalog(), &SiteConfig::default());
        assert_eq!(layout.targets.iter().count(), plan.specs().len());
    }

    #[test]
    fn trace_records_mount_then_each_event() {
        let site = crate::test_helpers::stock_site();
        let steps = trace(
            &site,
            REFERENCE_VIEWPORT_HEIGHT,
            IntersectionSupport::Available,
            vec![
                PageEvent::Scroll { offset_y: 10.0 },
                PageEvent::Scroll { offset_y: 250.0 },
                PageEvent::ToggleMenu,
            ],
        );
        assert_eq!(steps.len(), 4);
        assert!(steps[0].event.is_none());
        assert_eq!(steps[1].frame.header, HeaderMode::Default);
        assert_eq!(steps[2].frame.header, HeaderMode::Scrolled);
        assert_eq!(steps[2].frame.parallax.px(), 75.0);
        assert_eq!(steps[2].at, TRACE_STEP * 2);
        assert_eq!(steps[3].frame.menu, MenuState::Open);
    }

    #[test]
    fn trace_without_intersection_reveals_everything_at_mount() {
        let site = crate::test_helpers::stock_site();
        let steps = trace(&site, 800.0, IntersectionSupport::Unavailable, vec![]);
        // 4 hero parts + heading + 8 cards + cta + 2 about + 3 contacts
        assert_eq!(steps[0].frame.started.len(), 19);
    }

    #[test]
    fn loading_at_top_is_default_closed_and_plays_hero() {
        let catalog = stock_catalog();
        let config = SiteConfig::default();
        let layout = nominal_layout(&catalog, 800.0);
        let (mut session, frame) = PageSession::mount(
            EngineSettings::default(),
            reveal_plan(&catalog, &config).into_specs(),
            &layout.targets,
            Viewport::new(ScrollState::TOP, 800.0),
            IntersectionSupport::Available,
            Duration::ZERO,
        );

        assert_eq!(frame.header, HeaderMode::Default);
        assert_eq!(frame.menu, MenuState::Closed);
        let started: Vec<&str> = frame.started.iter().map(|a| a.target.as_str()).collect();
        assert_eq!(started, vec![targets::HERO_CONTENT; 4]);

        // Scrolling through the whole page reveals every target exactly once.
        let mut revealed = 0;
        let mut offset = 0.0;
        while offset < layout.document_height {
            offset += 200.0;
            let frame = session
                .dispatch(PageEvent::Scroll { offset_y: offset }, Duration::ZERO)
                .unwrap();
            revealed += frame.started.len();
        }
        for offset in [0.0, layout.document_height] {
            let frame = session
                .dispatch(PageEvent::Scroll { offset_y: offset }, Duration::ZERO)
                .unwrap();
            assert!(frame.started.is_empty());
        }
        // 1 heading + 8 cards + cta + 2 about + 3 contacts
        assert_eq!(revealed, 15);
    }
}
