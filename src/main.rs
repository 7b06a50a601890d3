use clap::{Parser, Subcommand};
use docnav::config::{self, IndexConfig};
use docnav::engine::Engine;
use docnav::ordering::SortMode;
use docnav::output;
use docnav::report::Indexed;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("DOCNAV_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DOCNAV_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Sidebar navigation and page ordering for documentation trees")]
#[command(long_about = "\
Sidebar navigation and page ordering for documentation trees

Your filesystem is the manifest. Directories become sidebar groups, content
files become pages, and optional meta.json sidecars pin order and titles.

Content structure:

  src/content/
  ├── meta.json                    # Root sidecar: top-level pages and sections
  ├── introduction.mdx             # Top-level page → introduction
  ├── pwa-plus/
  │   ├── meta.json                # {\"title\", \"order\", \"pages\", \"folders\"}
  │   ├── index.mdx                # Section index → pwa-plus
  │   ├── setup.mdx                # → pwa-plus/setup
  │   └── advanced/
  │       └── caching.mdx          # → pwa-plus/advanced/caching
  └── .drafts/                     # Hidden: skipped

Order resolution (first available wins):
  Page:   sidecar pages[\"setup.mdx\"] → pages[\"setup\"] → header `order` → title
  Folder: parent pages[\"advanced\"] → own sidecar `order` → name
  Pages always precede folders within one level.

Run 'docnav gen-config' to generate a documented docnav.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content root (overrides `content_root` from the config file)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Config file [default: ./docnav.toml when present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of the text listing
    #[arg(long, global = true)]
    json: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the navigation tree
    Tree,
    /// Print the sidebar sequence, top to bottom
    Flatten,
    /// Print the pages before and after a slug
    Adjacent {
        /// Slug of the current page, e.g. `pwa-plus/setup`
        slug: String,
    },
    /// Print units grouped by top-level section
    Sections {
        /// Sort mode inside each section [default: from config]
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
    },
    /// Print every unit as one flat list
    Units {
        #[arg(long, value_enum, default_value_t = SortMode::Order)]
        sort: SortMode,
    },
    /// Index the content tree and report problems
    Check,
    /// Print a stock docnav.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref(), cli.source.as_deref())?;
    let default_sort = config.sections.sort;
    let mut engine = Engine::new(config);

    match cli.command {
        Command::Tree => {
            let nav = engine.navigation();
            emit(cli.json, &nav, |nav| output::print_tree(nav))?;
        }
        Command::Flatten => {
            let sequence = engine.flattened();
            emit(cli.json, &sequence, |units| output::print_units(units))?;
        }
        Command::Adjacent { slug } => {
            let around = engine.adjacent(&slug);
            emit(cli.json, &around, output::print_adjacent)?;
        }
        Command::Sections { sort } => {
            let sections = engine.sections(sort.unwrap_or(default_sort));
            emit(cli.json, &sections, |s| output::print_sections(s))?;
        }
        Command::Units { sort } => {
            let units = engine.sorted_units(sort);
            emit(cli.json, &units, |units| output::print_units(units))?;
        }
        Command::Check => {
            println!("==> Checking {}", engine.root().display());
            let sequence = engine.flattened();
            let tree = engine.navigation();
            let mut report = sequence.report.clone();
            report.absorb(tree.report.clone());
            println!(
                "{} pages, {} top-level entries",
                sequence.value.len(),
                tree.value.len()
            );
            output::print_report(&report);
            if report.has_duplicate_slugs() {
                return Err("duplicate slugs found".into());
            }
            println!("==> Content is valid");
        }
        // printed before any config is loaded
        Command::GenConfig => {}
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "docnav=debug" } else { "docnav=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file, then apply `--source`.
fn resolve_config(
    config_path: Option<&Path>,
    source: Option<&Path>,
) -> Result<IndexConfig, config::ConfigError> {
    let mut config = match config_path {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };
    if let Some(source) = source {
        config.content_root = source.to_string_lossy().into_owned();
    }
    Ok(config)
}

/// Print a result as JSON (value and report together) or as text.
fn emit<T: Serialize>(
    json: bool,
    indexed: &Indexed<T>,
    print_text: impl Fn(&T),
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(indexed)?);
    } else {
        print_text(&indexed.value);
        output::print_report(&indexed.report);
    }
    Ok(())
}
