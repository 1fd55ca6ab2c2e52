//! HTML site generation.
//!
//! Final stage of the build. Takes the loaded [`Site`] and writes the page:
//!
//! ```text
//! dist/
//! ├── index.html      # the whole site: markup, inline CSS, engine data, shim
//! └── favicon.svg     # everything under content/assets/, copied verbatim
//! ```
//!
//! ## The page
//!
//! Sections are emitted in [`PAGE_ORDER`]. Every element with an entrance
//! animation carries `data-reveal` (the target id) and its start offset and
//! starting position as CSS custom properties, taken from the reveal plan.
//! Group members carry the `reveal-item` class and animate when their group
//! is revealed.
//!
//! The initial header class, menu state and hero offset come from mounting a
//! [`PageSession`](crate::engine::PageSession) at the top of the page, so the
//! HTML already looks the way the engine says the first frame looks.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined:
//! - `static/site.css`: layout and animation styles (theme variables injected
//!   from config)
//! - `static/engine.js`: event shim that feeds scroll, resize, click and
//!   intersection events through the same thresholds and ranges, read from
//!   the `engine-config` JSON document
//!
//! With scripting disabled a `<noscript>` style shows every reveal target.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::catalog::{Catalog, IconKind, ServiceEntry};
use crate::config::{self, SiteConfig};
use crate::engine::reveal::EASING;
use crate::engine::{Frame, IntersectionSupport, ParallaxController, ScrollState, Viewport};
use crate::icons::icon;
use crate::page::{self, PAGE_ORDER, REFERENCE_VIEWPORT_HEIGHT, RevealPlan, Site, targets};
use crate::types::Section;
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    pub page: PathBuf,
    pub services: usize,
    pub assets: usize,
    pub api_root: Option<String>,
}

const CSS_STATIC: &str = include_str!("../static/site.css");
const JS: &str = include_str!("../static/engine.js");

/// Shown when scripting is off: nothing waits for an observer.
const NOSCRIPT_CSS: &str =
    ".reveal, .reveal-item { opacity: 1 !important; transform: none !important; }";

/// Data the shim needs to reproduce the engine in the browser.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EngineDocument {
    header_threshold: f64,
    parallax: ParallaxController,
    root_margin_bottom: f64,
    easing: &'static str,
    api_root: Option<String>,
}

pub fn generate(site: &Site, source: &Path, output: &Path) -> Result<GenerateOutput, GenerateError> {
    fs::create_dir_all(output)?;

    let year = chrono::Local::now().year();
    let html = render_page(site, year)?;
    let page = output.join("index.html");
    fs::write(&page, html.into_string())?;
    info!(path = %page.display(), services = site.catalog.services.len(), "generated page");

    let assets = copy_assets(&source.join("assets"), output)?;

    Ok(GenerateOutput {
        page,
        services: site.catalog.services.len(),
        assets,
        api_root: site.config.api_root(),
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        debug!(path = %src.display(), "no assets directory");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            debug!(asset = %rel.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

/// The engine document as JSON that is safe inside a `<script>` element.
fn engine_json(config: &SiteConfig) -> Result<String, serde_json::Error> {
    let settings = config.engine_settings();
    let doc = EngineDocument {
        header_threshold: settings.header_threshold,
        parallax: settings.parallax,
        root_margin_bottom: settings.bottom_margin,
        easing: EASING,
        api_root: config.api_root(),
    };
    Ok(serde_json::to_string(&doc)?.replace('<', "\\u003c"))
}

/// Markdown to HTML.
fn markdown(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

/// Custom properties placing an element at the start of its entrance.
fn reveal_style(plan: &RevealPlan, id: &str, child: Option<&str>) -> Option<String> {
    let from = plan.get(id)?.transition.from;
    let start = plan.start_offset(id, child)?;
    Some(format!(
        "--reveal-x: {}px; --reveal-y: {}px; --reveal-delay: {}ms;",
        from.x,
        from.y,
        start.as_millis()
    ))
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(catalog: &Catalog, css: &str, engine: &str, content: Markup) -> Markup {
    let business = &catalog.business;
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(business.tagline);
                title { (business.name) " | " (business.tagline) }
                link rel="icon" href="favicon.svg" type="image/svg+xml";
                style { (PreEscaped(css)) }
                noscript { style { (PreEscaped(NOSCRIPT_CSS)) } }
            }
            body {
                (content)
                script type="application/json" id="engine-config" { (PreEscaped(engine)) }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn brand(catalog: &Catalog) -> Markup {
    html! {
        a.brand href="#hero" {
            span.brand-mark { (icon(IconKind::Wrench, "icon")) }
            span.brand-name { (catalog.business.name) }
        }
    }
}

/// Fixed header: brand, desktop navigation, phone, and the mobile menu.
fn site_header(catalog: &Catalog, frame: &Frame) -> Markup {
    let contacts = &catalog.contacts;
    let labels = &catalog.labels;
    let open = frame.menu.is_open();
    html! {
        header id="site-header" class={ "site-header " (frame.header.css_class()) } data-header {
            div.container.header-bar {
                (brand(catalog))
                nav.desktop-nav aria-label=(labels.footer_nav) {
                    @for link in &catalog.nav {
                        a.nav-link href=(link.href()) data-nav-link { (link.label) }
                    }
                }
                a.header-phone href=(contacts.phone_href) {
                    (icon(IconKind::Phone, "icon"))
                    span { (contacts.phone) }
                }
                button.menu-toggle type="button" data-menu-toggle
                    aria-controls="mobile-menu"
                    aria-expanded=(if open { "true" } else { "false" })
                    aria-label=(labels.menu_toggle) {
                    span.menu-icon-open { (icon(IconKind::Menu, "icon")) }
                    span.menu-icon-close { (icon(IconKind::Close, "icon")) }
                }
            }
            div id="mobile-menu" class="mobile-menu" data-menu hidden[!open] {
                nav.container.mobile-nav {
                    @for link in &catalog.nav {
                        a.mobile-link href=(link.href()) data-nav-link { (link.label) }
                    }
                    a.button.button-accent href=(contacts.phone_href) {
                        (icon(IconKind::Phone, "icon"))
                        span { (labels.call) }
                    }
                }
            }
        }
    }
}

fn hero(catalog: &Catalog, plan: &RevealPlan, frame: &Frame) -> Markup {
    let hero = &catalog.hero;
    let contacts = &catalog.contacts;
    let labels = &catalog.labels;
    let part = |name: &str| reveal_style(plan, targets::HERO_CONTENT, Some(name));
    html! {
        section id="hero" class="hero" {
            div.hero-backdrop data-parallax style={ "transform: " (frame.parallax.css_transform()) } {
                img.hero-image src=(hero.image) alt=(hero.image_alt) fetchpriority="high";
                div.hero-overlay {}
            }
            div.container.hero-content data-reveal=(targets::HERO_CONTENT) {
                h1.hero-title.reveal-item style=[part("title")] { (hero.title) }
                p.hero-subtitle.reveal-item style=[part("subtitle")] { (hero.subtitle) }
                div.hero-actions.reveal-item style=[part("actions")] {
                    a.button.button-accent href=(contacts.phone_href) {
                        (icon(IconKind::Phone, "icon"))
                        span { (labels.call) }
                    }
                    a.button.button-outline href="#services" { (labels.services_button) }
                }
                div.hero-facts.reveal-item style=[part("facts")] {
                    span.hero-fact {
                        (icon(IconKind::Clock, "icon"))
                        span { (contacts.hours_short) }
                    }
                    span.hero-fact {
                        (icon(IconKind::MapPin, "icon"))
                        span { (contacts.address_short) }
                    }
                }
            }
        }
    }
}

fn service_card(service: &ServiceEntry, plan: &RevealPlan) -> Markup {
    let key = page::service_key(service);
    html! {
        article.service-card.reveal-item.service-card-featured[service.featured]
            data-key=(key)
            data-testid={ "service-card-" (service.id) }
            style=[reveal_style(plan, targets::SERVICES_GRID, Some(key.as_str()))] {
            div.service-media {
                img src=(service.image) alt=(service.title) loading="lazy" decoding="async";
            }
            div.service-body {
                span.service-icon { (icon(service.icon, "icon")) }
                h3.service-title { (service.title) }
                p.service-description { (service.description) }
            }
        }
    }
}

fn services(catalog: &Catalog, plan: &RevealPlan) -> Markup {
    let copy = &catalog.services_section;
    html! {
        section id="services" class="section services" {
            div.container {
                div.section-heading.reveal data-reveal=(targets::SERVICES_HEADING)
                    style=[reveal_style(plan, targets::SERVICES_HEADING, None)] {
                    h2 { (copy.title) }
                    p { (copy.subtitle) }
                }
                div.services-grid data-reveal=(targets::SERVICES_GRID) {
                    @for service in &catalog.services {
                        (service_card(service, plan))
                    }
                }
                div.services-cta.reveal data-reveal=(targets::SERVICES_CTA)
                    style=[reveal_style(plan, targets::SERVICES_CTA, None)] {
                    p { (copy.cta_text) }
                    a.button.button-accent href=(catalog.contacts.phone_href) {
                        (icon(IconKind::Phone, "icon"))
                        span { (copy.cta_label) }
                    }
                }
            }
        }
    }
}

fn about(catalog: &Catalog, plan: &RevealPlan) -> Markup {
    let about = &catalog.about;
    html! {
        section id="about" class="section about" {
            div.container.about-grid {
                div.about-text.reveal data-reveal=(targets::ABOUT_TEXT)
                    style=[reveal_style(plan, targets::ABOUT_TEXT, None)] {
                    h2 { (about.title) }
                    div.prose { (PreEscaped(markdown(&about.body))) }
                    @if !about.features.is_empty() {
                        ul.feature-list {
                            @for feature in &about.features {
                                li.feature {
                                    (icon(feature.icon, "icon"))
                                    span { (feature.label) }
                                }
                            }
                        }
                    }
                }
                div.about-gallery.reveal data-reveal=(targets::ABOUT_GALLERY)
                    style=[reveal_style(plan, targets::ABOUT_GALLERY, None)] {
                    @for image in &about.gallery {
                        figure.gallery-item style={ "height: " (image.height) "px" } {
                            img src=(image.src) alt=(image.alt) loading="lazy" decoding="async";
                        }
                    }
                }
            }
        }
    }
}

fn contacts(catalog: &Catalog, plan: &RevealPlan) -> Markup {
    let copy = &catalog.contacts_section;
    let facts = &catalog.contacts;
    let labels = &catalog.labels;
    html! {
        section id="contacts" class="section contacts" {
            div.container {
                div.section-heading.reveal data-reveal=(targets::CONTACTS_HEADING)
                    style=[reveal_style(plan, targets::CONTACTS_HEADING, None)] {
                    h2 { (copy.title) }
                    p { (copy.subtitle) }
                }
                div.contacts-grid {
                    div.contacts-card.reveal data-reveal=(targets::CONTACTS_CARD)
                        style=[reveal_style(plan, targets::CONTACTS_CARD, None)] {
                        h3 { (labels.contacts_card) }
                        dl.contact-list {
                            div.contact-row {
                                dt { (icon(IconKind::MapPin, "icon")) (labels.address) }
                                dd { (facts.address) }
                            }
                            div.contact-row {
                                dt { (icon(IconKind::Phone, "icon")) (labels.phone) }
                                dd { a href=(facts.phone_href) { (facts.phone) } }
                            }
                            div.contact-row {
                                dt { (icon(IconKind::Clock, "icon")) (labels.hours) }
                                dd { (facts.hours) }
                            }
                            div.contact-row {
                                dt { (icon(IconKind::Mail, "icon")) (labels.email) }
                                dd { a href=(facts.email_href) { (facts.email) } }
                            }
                        }
                    }
                    a.contacts-map.reveal data-reveal=(targets::CONTACTS_MAP)
                        style=[reveal_style(plan, targets::CONTACTS_MAP, None)]
                        href=(facts.map_url) target="_blank" rel="noopener noreferrer" {
                        img src=(facts.map_image) alt=(facts.address) loading="lazy" decoding="async";
                        span.map-label {
                            (icon(IconKind::Send, "icon"))
                            span { (labels.map_open) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(catalog: &Catalog, year: i32) -> Markup {
    let facts = &catalog.contacts;
    let labels = &catalog.labels;
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div.footer-brand {
                    (brand(catalog))
                    p { (catalog.business.tagline) }
                }
                nav.footer-nav aria-label=(labels.footer_nav) {
                    h4 { (labels.footer_nav) }
                    ul {
                        @for link in &catalog.nav {
                            li { a href=(link.href()) { (link.label) } }
                        }
                    }
                }
                div.footer-contacts {
                    h4 { (labels.footer_contacts) }
                    ul {
                        li { a href=(facts.phone_href) { (facts.phone) } }
                        li { a href=(facts.email_href) { (facts.email) } }
                        li { (facts.address_short) }
                        li { (facts.hours_short) }
                    }
                }
            }
            div.container.footer-bottom {
                "© " (year) " " (catalog.business.name) ". " (labels.rights)
            }
        }
    }
}

fn section(section: Section, catalog: &Catalog, plan: &RevealPlan, frame: &Frame) -> Markup {
    match section {
        Section::Hero => hero(catalog, plan, frame),
        Section::Services => services(catalog, plan),
        Section::About => about(catalog, plan),
        Section::Contacts => contacts(catalog, plan),
        // Outside <main>.
        Section::Header | Section::Footer => html! {},
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the whole page.
pub fn render_page(site: &Site, year: i32) -> Result<Markup, GenerateError> {
    let catalog = &site.catalog;
    let plan = site.reveal_plan();
    let (_, frame, _) = site.mount(
        Viewport::new(ScrollState::TOP, REFERENCE_VIEWPORT_HEIGHT),
        IntersectionSupport::Available,
    );

    let css = format!(
        "{}\n\n{}",
        config::generate_theme_css(&site.config),
        CSS_STATIC
    );
    let engine = engine_json(&site.config)?;

    let content = html! {
        (site_header(catalog, &frame))
        main {
            @for s in PAGE_ORDER {
                (section(s, catalog, &plan, &frame))
            }
        }
        (site_footer(catalog, year))
    };

    Ok(base_document(catalog, &css, &engine, content))
}

// ============================================================================
// Tests
// ============================================================================
