//! Content catalog: everything the page says.
//!
//! The catalog is a single `catalog.toml` in the content directory. It holds
//! the business facts, the copy of every section, the three navigation links
//! and the list of services:
//!
//! ```toml
//! [business]
//! name = "Автосервис Южный"
//! tagline = "Профессиональный ремонт и обслуживание автомобилей любой сложности"
//!
//! [[nav]]
//! anchor = "services"
//! label = "Услуги"
//!
//! [[services]]
//! id = 1
//! title = "СТО"
//! description = "Полное техническое обслуживание и ремонт"
//! image = "https://images.example/sto.jpg"
//! icon = "wrench"
//! featured = true
//! ```
//!
//! ## Entry-level failures
//!
//! Services are validated one by one. An entry with a missing or mistyped
//! field, an unknown icon, an empty title or an id already used by an earlier
//! entry is left out of the page and recorded as an [`EntryIssue`] in the
//! [`CatalogReport`]; the remaining entries are unaffected. Only problems
//! with the page structure itself (malformed file, wrong navigation links,
//! contact links with the wrong scheme) fail the load.

use crate::types::Section;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("navigation error: {0}")]
    Navigation(String),
    #[error("contact error: {0}")]
    Contact(String),
}

/// Icons the page can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Wrench,
    Zap,
    ShoppingBag,
    Sparkles,
    Cog,
    Settings,
    PaintBucket,
    CheckCircle,
    Car,
    Phone,
    Clock,
    MapPin,
    Mail,
    Menu,
    Close,
    Send,
}

impl IconKind {
    /// Name used in `catalog.toml`.
    pub fn name(self) -> &'static str {
        match self {
            IconKind::Wrench => "wrench",
            IconKind::Zap => "zap",
            IconKind::ShoppingBag => "shopping-bag",
            IconKind::Sparkles => "sparkles",
            IconKind::Cog => "cog",
            IconKind::Settings => "settings",
            IconKind::PaintBucket => "paint-bucket",
            IconKind::CheckCircle => "check-circle",
            IconKind::Car => "car",
            IconKind::Phone => "phone",
            IconKind::Clock => "clock",
            IconKind::MapPin => "map-pin",
            IconKind::Mail => "mail",
            IconKind::Menu => "menu",
            IconKind::Close => "close",
            IconKind::Send => "send",
        }
    }
}

/// One card of the services grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceEntry {
    /// Unique and stable; keys the card in the grid and in the reveal plan.
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub icon: IconKind,
    /// Featured cards span two grid columns.
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Fragment id of the target section, without `#`.
    pub anchor: String,
    pub label: String,
}

impl NavLink {
    pub fn href(&self) -> String {
        format!("#{}", self.anchor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Business {
    pub name: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroCopy {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub image_alt: String,
}

/// Heading block shared by the services and contacts sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionCopy {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicesCopy {
    pub title: String,
    pub subtitle: String,
    /// Line above the call-to-action button under the grid.
    pub cta_text: String,
    pub cta_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub label: String,
    pub icon: IconKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    /// Reserved box height in px; the box keeps it even if the image fails.
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutCopy {
    pub title: String,
    /// Markdown.
    pub body: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactFacts {
    pub address: String,
    pub address_short: String,
    pub hours: String,
    pub hours_short: String,
    pub phone: String,
    /// `tel:` URI.
    pub phone_href: String,
    pub email: String,
    /// `mailto:` URI.
    pub email_href: String,
    /// External map page, opened in a new browsing context.
    pub map_url: String,
    pub map_image: String,
}

/// Small UI strings that are not part of any section's copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Labels {
    pub menu_toggle: String,
    pub call: String,
    pub services_button: String,
    pub contacts_card: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub email: String,
    pub map_open: String,
    pub footer_nav: String,
    pub footer_contacts: String,
    pub rights: String,
}

/// The validated catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub business: Business,
    pub hero: HeroCopy,
    pub nav: Vec<NavLink>,
    pub services_section: ServicesCopy,
    /// Valid services, in file order.
    pub services: Vec<ServiceEntry>,
    pub about: AboutCopy,
    pub contacts_section: SectionCopy,
    pub contacts: ContactFacts,
    pub labels: Labels,
}

/// Why a service entry was left out.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueReason {
    MissingField(&'static str),
    EmptyField(&'static str),
    DuplicateId(u32),
    Malformed(String),
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueReason::MissingField(name) => write!(f, "missing field `{name}`"),
            IssueReason::EmptyField(name) => write!(f, "field `{name}` is empty"),
            IssueReason::DuplicateId(id) => write!(f, "id {id} is already used"),
            IssueReason::Malformed(msg) => write!(f, "malformed entry: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryIssue {
    /// 1-based position of the entry in the file.
    pub position: usize,
    pub id: Option<u32>,
    pub reason: IssueReason,
}

/// Outcome of validating the services list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogReport {
    pub total: usize,
    pub issues: Vec<EntryIssue>,
}

impl CatalogReport {
    pub fn valid(&self) -> usize {
        self.total - self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    business: Business,
    hero: HeroCopy,
    nav: Vec<NavLink>,
    services_section: ServicesCopy,
    #[serde(default)]
    services: Vec<toml::Value>,
    about: AboutCopy,
    contacts_section: SectionCopy,
    contacts: ContactFacts,
    labels: Labels,
}

/// A services entry before validation; every field may be absent.
#[derive(Deserialize)]
struct RawService {
    id: Option<u32>,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    icon: Option<IconKind>,
    #[serde(default)]
    featured: bool,
}

/// Load `catalog.toml` from the content directory.
pub fn load_catalog(root: &Path) -> Result<(Catalog, CatalogReport), CatalogError> {
    let path = root.join("catalog.toml");
    debug!(path = %path.display(), "loading catalog");
    let content = fs::read_to_string(&path)?;
    parse_catalog(&content)
}

/// Parse and validate catalog TOML.
pub fn parse_catalog(content: &str) -> Result<(Catalog, CatalogReport), CatalogError> {
    let mut file: CatalogFile = toml::from_str(content)?;

    for link in &mut file.nav {
        link.anchor = link.anchor.trim_start_matches('#').to_string();
    }
    validate_nav(&file.nav)?;
    validate_contacts(&file.contacts)?;
    let (services, report) = validate_services(file.services);

    for issue in &report.issues {
        warn!(
            position = issue.position,
            id = ?issue.id,
            reason = %issue.reason,
            "service entry excluded"
        );
    }

    let catalog = Catalog {
        business: file.business,
        hero: file.hero,
        nav: file.nav,
        services_section: file.services_section,
        services,
        about: file.about,
        contacts_section: file.contacts_section,
        contacts: file.contacts,
        labels: file.labels,
    };
    Ok((catalog, report))
}

/// Exactly one link per navigable section, nothing else.
fn validate_nav(nav: &[NavLink]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for link in nav {
        let section = Section::from_nav_anchor(&link.anchor).ok_or_else(|| {
            CatalogError::Navigation(format!("`{}` is not a section of the page", link.anchor))
        })?;
        if !seen.insert(section) {
            return Err(CatalogError::Navigation(format!(
                "`{}` is linked more than once",
                link.anchor
            )));
        }
    }
    if let Some(missing) = Section::NAVIGABLE.iter().find(|s| !seen.contains(*s)) {
        return Err(CatalogError::Navigation(format!(
            "no link to `{}`",
            missing.anchor().unwrap_or_default()
        )));
    }
    Ok(())
}

fn validate_contacts(contacts: &ContactFacts) -> Result<(), CatalogError> {
    let checks = [
        ("phone_href", &contacts.phone_href, &["tel:"][..]),
        ("email_href", &contacts.email_href, &["mailto:"][..]),
        ("map_url", &contacts.map_url, &["https://", "http://"][..]),
    ];
    for (field, value, schemes) in checks {
        if !schemes.iter().any(|s| value.starts_with(s)) {
            return Err(CatalogError::Contact(format!(
                "`{field}` must start with {}",
                schemes.join(" or ")
            )));
        }
    }
    Ok(())
}

fn validate_services(entries: Vec<toml::Value>) -> (Vec<ServiceEntry>, CatalogReport) {
    let mut report = CatalogReport {
        total: entries.len(),
        issues: Vec::new(),
    };
    let mut ids = BTreeSet::new();
    let mut services = Vec::with_capacity(entries.len());

    for (i, value) in entries.into_iter().enumerate() {
        let position = i + 1;
        let raw_id = value
            .get("id")
            .and_then(toml::Value::as_integer)
            .and_then(|id| u32::try_from(id).ok());

        let result = value
            .try_into::<RawService>()
            .map_err(|e| IssueReason::Malformed(e.message().to_string()))
            .and_then(service_from_raw);

        match result {
            Ok(entry) if !ids.insert(entry.id) => report.issues.push(EntryIssue {
                position,
                id: Some(entry.id),
                reason: IssueReason::DuplicateId(entry.id),
            }),
            Ok(entry) => services.push(entry),
            Err(reason) => report.issues.push(EntryIssue {
                position,
                id: raw_id,
                reason,
            }),
        }
    }
    (services, report)
}

fn service_from_raw(raw: RawService) -> Result<ServiceEntry, IssueReason> {
    fn text(value: Option<String>, name: &'static str) -> Result<String, IssueReason> {
        let value = value.ok_or(IssueReason::MissingField(name))?;
        if value.trim().is_empty() {
            return Err(IssueReason::EmptyField(name));
        }
        Ok(value)
    }

    Ok(ServiceEntry {
        id: raw.id.ok_or(IssueReason::MissingField("id"))?,
        title: text(raw.title, "title")?,
        description: text(raw.description, "description")?,
        image: text(raw.image, "image")?,
        icon: raw.icon.ok_or(IssueReason::MissingField("icon"))?,
        featured: raw.featured,
    })
}
