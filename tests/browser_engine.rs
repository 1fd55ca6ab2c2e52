//! Browser tests of the generated page's scroll behavior.
//!
//! Builds the stock content once, opens it over file:// in headless Chrome
//! and drives scrolling and clicks through JavaScript.
//!
//! Run with: `cargo test --test browser_engine -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// ===========================================================================
// Setup helpers
// ===========================================================================

fn generated_page() -> &'static PathBuf {
    static OUT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, page) = OUT.get_or_init(|| {
        let out = TempDir::new().unwrap();
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let status = Command::new(env!("CARGO_BIN_EXE_garage-site"))
            .args([
                "build",
                "--source",
                root.join("content").to_str().unwrap(),
                "--output",
                out.path().to_str().unwrap(),
            ])
            .status()
            .expect("failed to run garage-site");
        assert!(status.success(), "page generation failed");
        let page = out.path().join("index.html");
        (out, page)
    });
    page
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn open_page() -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    let url = format!("file://{}", generated_page().display());
    tab.navigate_to(&url).unwrap().wait_until_navigated().unwrap();
    tab
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_bool()
        .unwrap()
}

fn eval_string(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

/// Scroll and give the page a couple of frames to react.
fn scroll_to(tab: &Tab, y: u32) {
    tab.evaluate(&format!("window.scrollTo(0, {y})"), false).unwrap();
    thread::sleep(Duration::from_millis(250));
}

fn revealed(tab: &Tab, id: &str) -> bool {
    eval_bool(
        tab,
        &format!(r#"document.querySelector('[data-reveal="{id}"]').classList.contains('is-revealed')"#),
    )
}

// ===========================================================================
// Header
// ===========================================================================

#[test]
#[ignore]
fn header_switches_past_threshold() {
    let tab = open_page();
    let class = "document.getElementById('site-header').className";
    assert!(eval_string(&tab, class).contains("header-default"));

    scroll_to(&tab, 10);
    assert!(eval_string(&tab, class).contains("header-default"));

    scroll_to(&tab, 100);
    assert!(eval_string(&tab, class).contains("header-scrolled"));

    scroll_to(&tab, 0);
    assert!(eval_string(&tab, class).contains("header-default"));
}

// ===========================================================================
// Parallax
// ===========================================================================

#[test]
#[ignore]
fn hero_backdrop_follows_scroll_and_clamps() {
    let tab = open_page();
    let transform = "document.querySelector('[data-parallax]').style.transform";

    scroll_to(&tab, 250);
    assert!(eval_string(&tab, transform).contains("75px"));

    scroll_to(&tab, 2000);
    assert!(eval_string(&tab, transform).contains("150px"));
}

// ===========================================================================
// Reveal
// ===========================================================================

#[test]
#[ignore]
fn hero_plays_on_load_and_sections_on_scroll() {
    let tab = open_page();
    thread::sleep(Duration::from_millis(250));
    assert!(revealed(&tab, "hero-content"));
    assert!(!revealed(&tab, "contacts-card"));

    let contacts_top = eval_string(
        &tab,
        "String(document.getElementById('contacts').offsetTop)",
    );
    let top: u32 = contacts_top.parse().unwrap();
    scroll_to(&tab, top);
    assert!(revealed(&tab, "contacts-card"));

    // Revealed sections stay revealed.
    scroll_to(&tab, 0);
    assert!(revealed(&tab, "contacts-card"));
}

// ===========================================================================
// Mobile menu
// ===========================================================================

#[test]
#[ignore]
fn menu_toggles_and_closes_on_link() {
    let tab = open_page();
    let hidden = "document.getElementById('mobile-menu').hidden";
    assert!(eval_bool(&tab, hidden));

    tab.evaluate("document.querySelector('[data-menu-toggle]').click()", false)
        .unwrap();
    assert!(!eval_bool(&tab, hidden));
    assert_eq!(
        eval_string(
            &tab,
            "document.querySelector('[data-menu-toggle]').getAttribute('aria-expanded')"
        ),
        "true"
    );

    tab.evaluate("document.querySelector('.mobile-link').click()", false)
        .unwrap();
    assert!(eval_bool(&tab, hidden));
}
