use catalog_press::assemble::CatalogLoader;
use catalog_press::config::{self, CONFIG_FILE_NAME, LoaderConfig};
use catalog_press::generate::{self, AssetSource};
use catalog_press::global::get_global_config;
use catalog_press::index::{list_catalog_ids, list_catalog_summaries};
use catalog_press::output;
use catalog_press::source::{ContentSource, DirSource, HttpSource};
use catalog_press::types::CatalogId;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "catalog-press")]
#[command(about = "Resolve product catalogues from JSON and images, render them as a static site")]
#[command(long_about = "\
Resolve product catalogues from JSON and images, render them as a static site

The content tree is the data source. Every folder under /catalogs is a
catalogue; its config.json and eight section documents are loaded, merged
and resolved into one typed aggregate. A catalogue with any required
document missing or malformed is skipped.

Content structure:

  content/
  ├── config.json                  # Site-wide branding (optional, partial)
  └── catalogs/
      ├── index.json               # Fallback list: { \"catalogs\": [...] }
      └── qx-1/
          ├── config.json          # meta + section navigation
          ├── hero/
          │   ├── content.json
          │   ├── slider.json      # Explicit slides and settings (optional)
          │   ├── hero_00.jpg      # Discovered slides: hero_00, hero_01, ...
          │   └── hero_01.jpg
          ├── overview/content.json
          ├── gallery/content.json
          ├── variants/content.json
          ├── dimensions/content.json
          ├── materials/content.json
          ├── features/content.json
          └── assembly/content.json

--source accepts a directory or an http(s) origin.

Run 'catalog-press gen-config' to generate a documented catalog-press.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory or http(s) origin
    #[arg(long, default_value = ".", global = true)]
    source: String,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Loader config file [default: ./catalog-press.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalogues that load completely
    List,
    /// Print one resolved catalogue as JSON
    Show {
        /// Catalogue folder name
        id: String,
    },
    /// Load every catalogue and report which ones fail
    Check,
    /// Render the index and every catalogue page
    Build,
    /// Print a stock catalog-press.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let loader_config = load_loader_config(cli.config.as_ref())?;
    init_thread_pool(&loader_config.processing);
    let source = open_source(&cli.source, &loader_config);
    let loader = CatalogLoader::new(source.as_ref(), &loader_config);
    tracing::info!(source = %source.describe(), "content source");

    match cli.command {
        Command::List => {
            let summaries = list_catalog_summaries(&loader, &loader_config.content);
            output::print_list(&summaries);
        }
        Command::Show { id } => {
            let catalog_id = match CatalogId::parse(&id) {
                Ok(catalog_id) => catalog_id,
                Err(err) => {
                    eprintln!("{err}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            match loader.load_catalog(&catalog_id) {
                Some(catalog) => output::print_catalog(&catalog)?,
                None => {
                    eprintln!("catalogue '{id}' could not be loaded (run with -v for details)");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Check => {
            let ids = list_catalog_ids(source.as_ref(), &loader_config.content);
            let results = loader.load_many(&ids);
            output::print_check(&results);
            if results.iter().any(|(_, catalog)| catalog.is_none()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Build => {
            let global = get_global_config(source.as_ref(), &loader_config.content.global_config);
            let ids = list_catalog_ids(source.as_ref(), &loader_config.content);
            let catalogs: Vec<_> = loader
                .load_many(&ids)
                .into_iter()
                .filter_map(|(id, catalog)| {
                    if catalog.is_none() {
                        tracing::warn!(catalog = %id, "skipping catalogue that failed to load");
                    }
                    catalog
                })
                .collect();
            let assets = source.local_root().map(|root| AssetSource {
                content_root: root,
                catalog_root: &loader_config.content.catalog_root,
            });
            let report = generate::generate(&catalogs, &global, assets, &cli.output)?;
            output::print_build(&report, &cli.output);
        }
        // Printed before the content source was opened.
        Command::GenConfig => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr. Verbosity flags pick the level unless `RUST_LOG` is set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// An explicit `--config` must exist; the implicit one is optional.
fn load_loader_config(path: Option<&PathBuf>) -> Result<LoaderConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(format!("config file not found: {}", path.display()).into());
            }
            Ok(config::load_config(path)?)
        }
        None => Ok(config::load_config(std::path::Path::new(CONFIG_FILE_NAME))?),
    }
}

fn open_source(location: &str, config: &LoaderConfig) -> Box<dyn ContentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location, config))
    } else {
        Box::new(DirSource::new(location))
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
