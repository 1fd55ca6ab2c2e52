use clap::{Parser, Subcommand};
use garage_site::engine::{IntersectionSupport, PageEvent};
use garage_site::logging::{LogConfig, init_logging};
use garage_site::page::{self, REFERENCE_VIEWPORT_HEIGHT, Site};
use garage_site::{config, generate, output};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{info, warn};

fn version_string() -> &'static str {
    let commit = env!("GARAGE_SITE_COMMIT");
    if commit.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{} ({commit})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "garage-site")]
#[command(about = "Static site generator for a single-page auto-repair storefront")]
#[command(long_about = "\
Static site generator for a single-page auto-repair storefront

The page is one document: fixed header, parallax hero, services grid, about
block, contacts and footer. Scroll behavior (header style, hero parallax,
section entrances, mobile menu) is decided by the presentation engine and
applied in the browser by a small script.

Content structure:

  content/
  ├── config.toml     # Thresholds, ranges, timing, colors (optional, sparse)
  ├── catalog.toml    # Business facts, copy, navigation, services
  └── assets/         # Copied verbatim to the output root (favicon, ...)

Environment:
  GARAGE_SITE_BACKEND_URL   overrides [backend] url

Run 'garage-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log detail (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page into the output directory
    Build,
    /// Validate the content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Replay scroll and menu events through the engine and print each frame
    Trace(TraceArgs),
}

#[derive(clap::Args)]
struct TraceArgs {
    /// Scroll offsets to visit, in order (px)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    scroll: Vec<f64>,

    /// Viewport height (px)
    #[arg(long, default_value_t = REFERENCE_VIEWPORT_HEIGHT)]
    viewport: f64,

    /// Simulate a browser without IntersectionObserver
    #[arg(long)]
    no_intersection: bool,

    /// Toggle the mobile menu after the last scroll
    #[arg(long)]
    toggle_menu: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(std::io::stderr().is_terminal()));

    match cli.command {
        Command::Build => {
            let site = load_site(&cli.source)?;
            info!(source = %cli.source.display(), output = %cli.output.display(), "building");
            let result = generate::generate(&site, &cli.source, &cli.output)?;
            output::print_build_output(&result, &site.report);
        }
        Command::Check => {
            let site = load_site(&cli.source)?;
            output::print_check_output(&site);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Trace(args) => {
            let site = load_site(&cli.source)?;
            let mut events: Vec<PageEvent> = args
                .scroll
                .iter()
                .map(|&offset_y| PageEvent::Scroll { offset_y })
                .collect();
            if args.toggle_menu {
                events.push(PageEvent::ToggleMenu);
            }
            let support = if args.no_intersection {
                IntersectionSupport::Unavailable
            } else {
                IntersectionSupport::Available
            };
            let steps = page::trace(&site, args.viewport, support, events);
            output::print_trace_output(&steps);
        }
    }

    Ok(())
}

fn load_site(source: &std::path::Path) -> Result<Site, page::SiteError> {
    let site = Site::load(source, |key| std::env::var(key).ok())?;
    if !site.report.is_clean() {
        warn!(
            excluded = site.report.issues.len(),
            "some services were left out of the page"
        );
    }
    Ok(site)
}
