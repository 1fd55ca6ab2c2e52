//! Inline SVG icons.
//!
//! Every [`IconKind`] is drawn as a 24×24 stroke icon that inherits the text
//! colour (`currentColor`), so CSS decides how it looks. Icons are
//! decorative: they carry `aria-hidden` and the surrounding markup provides
//! the accessible name.

use crate::catalog::IconKind;
use maud::{Markup, PreEscaped, html};

/// Path data of an icon, in a 24×24 view box.
fn paths(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Wrench => {
            r#"<path d="M14.7 6.3a1 1 0 0 0 0 1.4l1.6 1.6a1 1 0 0 0 1.4 0l3.77-3.77a6 6 0 0 1-7.94 7.94l-6.91 6.91a2.12 2.12 0 0 1-3-3l6.91-6.91a6 6 0 0 1 7.94-7.94z"/>"#
        }
        IconKind::Zap => r#"<path d="M13 2 3 14h9l-1 8 10-12h-9l1-8z"/>"#,
        IconKind::ShoppingBag => {
            r#"<path d="M6 2 3 6v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2V6l-3-4z"/><path d="M3 6h18"/><path d="M16 10a4 4 0 0 1-8 0"/>"#
        }
        IconKind::Sparkles => {
            r#"<path d="M12 3l1.9 5.1L19 10l-5.1 1.9L12 17l-1.9-5.1L5 10l5.1-1.9z"/><path d="M19 3v4"/><path d="M21 5h-4"/>"#
        }
        IconKind::Cog => {
            r#"<circle cx="12" cy="12" r="3"/><path d="M12 2v3"/><path d="M12 19v3"/><path d="M2 12h3"/><path d="M19 12h3"/><path d="m4.9 4.9 2.1 2.1"/><path d="m17 17 2.1 2.1"/><path d="m4.9 19.1 2.1-2.1"/><path d="m17 7 2.1-2.1"/>"#
        }
        IconKind::Settings => {
            r#"<circle cx="12" cy="12" r="3"/><circle cx="12" cy="12" r="8"/>"#
        }
        IconKind::PaintBucket => {
            r#"<path d="m19 11-8-8-8.6 8.6a2 2 0 0 0 0 2.8l5.2 5.2c.8.8 2 .8 2.8 0L19 11z"/><path d="m5 2 5 5"/><path d="M2 13h15"/><path d="M22 20a2 2 0 1 1-4 0c0-1.6 1.7-2.4 2-4 .3 1.6 2 2.4 2 4z"/>"#
        }
        IconKind::CheckCircle => {
            r#"<path d="M22 11.08V12a10 10 0 1 1-5.93-9.14"/><path d="m9 11 3 3L22 4"/>"#
        }
        IconKind::Car => {
            r#"<path d="M5 17H3v-5l2-5h14l2 5v5h-2"/><path d="M3 12h18"/><circle cx="7" cy="17" r="2"/><circle cx="17" cy="17" r="2"/><path d="M9 17h6"/>"#
        }
        IconKind::Phone => {
            r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72c.13.96.36 1.9.7 2.81a2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45c.91.34 1.85.57 2.81.7A2 2 0 0 1 22 16.92z"/>"#
        }
        IconKind::Clock => r#"<circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/>"#,
        IconKind::MapPin => {
            r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0z"/><circle cx="12" cy="10" r="3"/>"#
        }
        IconKind::Mail => {
            r#"<rect x="2" y="4" width="20" height="16" rx="2"/><path d="m22 7-10 6L2 7"/>"#
        }
        IconKind::Menu => r#"<path d="M4 6h16"/><path d="M4 12h16"/><path d="M4 18h16"/>"#,
        IconKind::Close => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
        IconKind::Send => r#"<path d="m22 2-7 20-4-9-9-4z"/><path d="M22 2 11 13"/>"#,
    }
}

/// Render `kind` as an inline SVG with the given CSS class.
pub fn icon(kind: IconKind, class: &str) -> Markup {
    html! {
        svg class=(class) xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"
            width="24" height="24" fill="none" stroke="currentColor" stroke-width="2"
            stroke-linecap="round" stroke-linejoin="round" aria-hidden="true" focusable="false" {
            (PreEscaped(paths(kind)))
        }
    }
}
