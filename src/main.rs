use clap::{Parser, Subcommand};
use docs_kit::{config, fences, naming, notebook, output, summary, toctree, viewport};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docs-kit")]
#[command(about = "Utilities for documentation source trees")]
#[command(long_about = "\
Utilities for documentation source trees

Builds SUMMARY.md outlines and cleans up markdown sources before publishing.

Summary structure:

  docs/
  ├── README.md                 # Root page (front matter: title)
  ├── getting-started/          # Chapter: README.md front matter required
  │   ├── README.md             # title: Getting Started, nav_order: 1
  │   ├── install.md            # title: Installation, nav_order: 2
  │   └── quickstart.md         # title: Quickstart, nav_order: 1
  └── guide/
      ├── README.md             # title: Guide, nav_order: 2
      └── configuration.md

Front matter keys:
  title         Display name (falls back to the first # heading)
  nav_order     Sort key among siblings; pages without one go last
  has_children  Informational only

Run 'docs-kit gen-config' to print a documented docs-kit.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log every file decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate SUMMARY.md from front matter
    Summary {
        /// Documentation root folder
        #[arg(default_value = "docs")]
        folder: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a toctree index into a markdown outline
    Toctree {
        /// Index file, with or without the .md extension
        index: PathBuf,
        /// Directory links are made relative to
        #[arg(long, default_value = ".")]
        base: PathBuf,
    },
    /// Add a language tag to bare code fences
    Fences {
        /// Directory containing markdown files
        directory: PathBuf,
    },
    /// Convert Jupyter notebooks to markdown
    Notebooks {
        /// Directory containing notebooks
        input_dir: PathBuf,
        /// Where to write markdown files (defaults to the input directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Replace spaces with dashes in markdown file names
    Dashes {
        /// Root directory to process
        #[arg(default_value = "docs")]
        directory: PathBuf,
    },
    /// Enable pinch zoom in HTML viewport meta tags
    Zoom {
        /// Directory containing HTML files
        directory: PathBuf,
    },
    /// Print a stock docs-kit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Summary { folder, output } => {
            let text = summary::generate_summary(&folder, &config.summary)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => println!("{}", text),
            }
        }
        Command::Toctree { index, base } => {
            let text = toctree::toctree_to_summary(&index, &base, config.toctree.max_depth)?;
            println!("{}", text);
        }
        Command::Fences { directory } => {
            let report = fences::tag_fences_in_dir(&directory, &config.fences)?;
            output::print_fence_output(&report, &directory);
        }
        Command::Notebooks {
            input_dir,
            output_dir,
        } => {
            let converted =
                notebook::convert_notebooks(&input_dir, output_dir.as_deref(), &config.notebooks)?;
            output::print_notebook_output(&converted, &input_dir);
        }
        Command::Dashes { directory } => {
            let renames = naming::replace_spaces_with_dashes(&directory)?;
            output::print_rename_output(&renames, &directory);
        }
        Command::Zoom { directory } => {
            let report = viewport::enable_finger_zoom(&directory)?;
            output::print_zoom_output(&report, &directory);
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays clean for generated markdown.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
