//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output describes the page, not the files: sections, cards and entrance
//! animations lead with their position and title, and details follow on
//! indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Header
//! 002 Hero → #hero
//! 003 Services → #services
//!
//! Services
//! 001 СТО (featured)
//!     Icon: wrench
//!     Reveal: +0ms
//!
//! Excluded
//!     entry 3 (id 5): missing field `title`
//!
//! 8 of 9 services valid
//! ```
//!
//! ## Build
//!
//! ```text
//! Page → dist/index.html
//!     Services: 8
//!     Assets: 1
//!     API root: not set
//! ```
//!
//! ## Trace
//!
//! ```text
//! 000 mount
//!     Header: default, menu: closed, parallax: 0px
//!     Started: hero-content/title +200ms
//! 001 scroll 600
//!     Header: scrolled, menu: closed, parallax: 150px
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::CatalogReport;
use crate::engine::{HeaderMode, MenuState, PageEvent, RevealKind, ScheduledAnimation};
use crate::generate::GenerateOutput;
use crate::page::{self, PAGE_ORDER, Site, TraceStep};
use std::time::Duration;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn offset_ms(offset: Duration) -> String {
    format!("+{}ms", offset.as_millis())
}

fn header_name(mode: HeaderMode) -> &'static str {
    match mode {
        HeaderMode::Default => "default",
        HeaderMode::Scrolled => "scrolled",
    }
}

fn menu_name(menu: MenuState) -> &'static str {
    if menu.is_open() { "open" } else { "closed" }
}

fn event_line(event: &PageEvent) -> String {
    match event {
        PageEvent::Scroll { offset_y } => format!("scroll {offset_y}"),
        PageEvent::Resize { height } => format!("resize {height}"),
        PageEvent::ToggleMenu => "toggle menu".to_string(),
        PageEvent::FollowLink(anchor) => format!("follow #{anchor}"),
    }
}

fn animation_label(animation: &ScheduledAnimation) -> String {
    match &animation.child {
        Some(child) => format!("{}/{}", animation.target, child),
        None => animation.target.to_string(),
    }
}

fn report_lines(report: &CatalogReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.is_clean() {
        lines.push("Excluded".to_string());
        for issue in &report.issues {
            let id = issue.id.map(|id| format!(" (id {id})")).unwrap_or_default();
            lines.push(format!(
                "{}entry {}{}: {}",
                indent(1),
                issue.position,
                id,
                issue.reason
            ));
        }
        lines.push(String::new());
    }
    lines.push(format!(
        "{} of {} services valid",
        report.valid(),
        report.total
    ));
    lines
}

// ============================================================================
// check
// ============================================================================

/// Format the `check` report: page structure, services, reveal plan, config.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();
    let plan = site.reveal_plan();

    lines.push("Sections".to_string());
    for (i, section) in PAGE_ORDER.iter().enumerate() {
        match section.anchor() {
            Some(anchor) => lines.push(format!("{} {} → #{}", format_index(i + 1), section, anchor)),
            None => lines.push(format!("{} {}", format_index(i + 1), section)),
        }
    }

    lines.push(String::new());
    lines.push("Services".to_string());
    for (i, service) in site.catalog.services.iter().enumerate() {
        let featured = if service.featured { " (featured)" } else { "" };
        lines.push(format!("{} {}{}", format_index(i + 1), service.title, featured));
        lines.push(format!("{}Icon: {}", indent(1), service.icon.name()));
        let key = page::service_key(service);
        if let Some(start) = plan.start_offset(page::targets::SERVICES_GRID, Some(key.as_str())) {
            lines.push(format!("{}Reveal: {}", indent(1), offset_ms(start)));
        }
    }

    lines.push(String::new());
    lines.push("Reveal plan".to_string());
    for spec in plan.specs() {
        let from = spec.transition.from;
        let detail = match &spec.kind {
            RevealKind::Single => offset_ms(spec.transition.delay),
            RevealKind::Group { interval, children } => format!(
                "{} items from {}, every {}ms",
                children.len(),
                offset_ms(spec.transition.delay),
                interval.as_millis()
            ),
        };
        lines.push(format!(
            "{}{}: {} from ({}, {})",
            indent(1),
            spec.id,
            detail,
            from.x,
            from.y
        ));
    }

    let config = &site.config;
    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!(
        "{}Header threshold: {}px",
        indent(1),
        config.header.scroll_threshold
    ));
    lines.push(format!(
        "{}Parallax: {}..{} → {}..{}px",
        indent(1),
        config.parallax.scroll_range[0],
        config.parallax.scroll_range[1],
        config.parallax.offset_range[0],
        config.parallax.offset_range[1]
    ));
    lines.push(format!(
        "{}API root: {}",
        indent(1),
        config.api_root().as_deref().unwrap_or("not set")
    ));

    lines.push(String::new());
    lines.extend(report_lines(&site.report));
    lines
}

pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(output: &GenerateOutput, report: &CatalogReport) -> Vec<String> {
    let mut lines = vec![
        format!("Page → {}", output.page.display()),
        format!("{}Services: {}", indent(1), output.services),
        format!("{}Assets: {}", indent(1), output.assets),
        format!(
            "{}API root: {}",
            indent(1),
            output.api_root.as_deref().unwrap_or("not set")
        ),
    ];
    if !report.is_clean() {
        lines.push(String::new());
        lines.extend(report_lines(report));
    }
    lines
}

pub fn print_build_output(output: &GenerateOutput, report: &CatalogReport) {
    for line in format_build_output(output, report) {
        println!("{}", line);
    }
}

// ============================================================================
// trace
// ============================================================================

/// Format a replayed session, one entry per step.
///
/// Animation starts are shown relative to the step that triggered them.
pub fn format_trace_output(steps: &[TraceStep]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let title = step
            .event
            .as_ref()
            .map(event_line)
            .unwrap_or_else(|| "mount".to_string());
        lines.push(format!("{:0>3} {}", i, title));

        let frame = &step.frame;
        lines.push(format!(
            "{}Header: {}, menu: {}, parallax: {}px",
            indent(1),
            header_name(frame.header),
            menu_name(frame.menu),
            frame.parallax.px()
        ));
        if !frame.started.is_empty() {
            let started: Vec<String> = frame
                .started
                .iter()
                .map(|a| {
                    format!(
                        "{} {}",
                        animation_label(a),
                        offset_ms(a.start.saturating_sub(step.at))
                    )
                })
                .collect();
            lines.push(format!("{}Started: {}", indent(1), started.join(", ")));
        }
    }
    lines
}

pub fn print_trace_output(steps: &[TraceStep]) {
    for line in format_trace_output(steps) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
