//! vis-options CLI
//!
//! Entry point for the `vis-options` command-line tool.

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vis_options::config::load_options_file;
use vis_options::{merge, ConfigTree, EffectiveOptions, OptionsError, Preset};

#[derive(Parser)]
#[command(name = "vis-options")]
#[command(about = "Graph visualization option presets with deep-merge overrides", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in presets
    Presets {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print a built-in preset as JSON
    Show {
        /// Preset name (see `presets`)
        preset: String,
    },

    /// Merge a preset with option files and assignments
    Merge {
        /// Base preset
        #[arg(long, short = 'p', default_value = "directed", conflicts_with = "bare")]
        preset: String,

        /// Start from an empty tree instead of a preset
        #[arg(long)]
        bare: bool,

        /// Options file (.json or .toml); repeatable, later files win
        #[arg(long = "options", short = 'f', value_name = "FILE")]
        options: Vec<PathBuf>,

        /// Override a single option, e.g. `nodes.font.size=14`; repeatable
        #[arg(long = "set", short = 's', value_name = "PATH=VALUE")]
        set: Vec<String>,

        /// Print the full effective options document with provenance
        #[arg(long)]
        effective: bool,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Merge two option files directly, the second taking precedence
    MergeFiles {
        /// Base options file
        original: PathBuf,

        /// Options file whose values win on conflict
        overlay: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Presets { json } => run_presets(json),
        Commands::Show { preset } => run_show(&preset),
        Commands::Merge {
            preset,
            bare,
            options,
            set,
            effective,
            output,
        } => run_merge(&preset, bare, &options, &set, effective, output.as_deref()),
        Commands::MergeFiles { original, overlay } => run_merge_files(&original, &overlay),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run_presets(json_output: bool) -> Result<(), OptionsError> {
    if json_output {
        let output: Vec<serde_json::Value> = Preset::ALL
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name(),
                    "description": p.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Built-in presets:\n");
        for preset in Preset::ALL {
            let marker = if preset == Preset::default() { " (default)" } else { "" };
            println!("  {}{}", preset.name(), marker);
            println!("    {}", preset.description());
        }
    }
    Ok(())
}

fn run_show(name: &str) -> Result<(), OptionsError> {
    let preset: Preset = name.parse()?;
    print_tree(&preset.to_tree())
}

fn run_merge(
    preset_name: &str,
    bare: bool,
    files: &[PathBuf],
    assignments: &[String],
    effective: bool,
    output: Option<&Path>,
) -> Result<(), OptionsError> {
    let preset = if bare { None } else { Some(preset_name.parse::<Preset>()?) };
    let built = EffectiveOptions::build(preset, files, assignments)?;

    match (effective, output) {
        (true, Some(path)) => built.write_to_file(path),
        (true, None) => {
            println!("{}", built.to_json()?);
            Ok(())
        }
        (false, Some(path)) => {
            let json = serde_json::to_string_pretty(&built.options)?;
            std::fs::write(path, json).map_err(|source| OptionsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote merged options");
            Ok(())
        }
        (false, None) => print_tree(&built.options),
    }
}

fn run_merge_files(original: &Path, overlay: &Path) -> Result<(), OptionsError> {
    let original = load_options_file(original)?;
    let overlay = load_options_file(overlay)?;
    let merged = merge(&original.tree, &overlay.tree)?;
    print_tree(&merged)
}

fn print_tree(tree: &ConfigTree) -> Result<(), OptionsError> {
    println!("{}", serde_json::to_string_pretty(tree)?);
    Ok(())
}
