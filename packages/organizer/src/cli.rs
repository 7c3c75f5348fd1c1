//! Command-line interface for the organizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::load_engine_config;
use crate::error::{OrganizerError, Result};
use crate::intake::{load_catalog, load_extraction};
use crate::run::organize_extraction;
use crate::yaml::{write_output, OutputFormat};

/// CourseMap Organizer - Serialize extracted catalog tables into degree
/// requirement codes.
#[derive(Parser)]
#[command(name = "coursemap-organizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Organize an extraction file into serialized degree requirements.
    Organize {
        /// Extraction JSON produced by the table extractor.
        extraction: PathBuf,

        /// Known-course catalog JSON (enables wildcard expansion).
        #[arg(short = 'k', long)]
        catalog: Option<PathBuf>,

        /// Engine configuration YAML (per-school patterns and cutoffs).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize {
            extraction,
            catalog,
            config,
            output,
            format,
        } => organize_command(
            &extraction,
            catalog.as_deref(),
            config.as_deref(),
            output.as_deref(),
            format,
        ),
    }
}

/// Execute the organize command.
fn organize_command(
    extraction_path: &std::path::Path,
    catalog_path: Option<&std::path::Path>,
    config_path: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    // Validate the output directory before doing any work.
    let output_dir = output.unwrap_or_else(|| std::path::Path::new("."));
    if !output_dir.is_dir() {
        return Err(OrganizerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }

    let engine_config = load_engine_config(config_path)?;
    let extraction = load_extraction(extraction_path)?;
    let catalog = load_catalog(catalog_path)?;

    println!(
        "{} {} ({} degree pages)",
        style("Organizing").bold(),
        style(&extraction.school).cyan(),
        extraction.pages.len()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Classifying and collapsing tables...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let organized = match organize_extraction(&extraction, &catalog, &engine_config) {
        Ok(organized) => organized,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing output...");
    let (degrees_path, groups_path) = match write_output(&organized, output_dir, format) {
        Ok(paths) => paths,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let parsed = organized.stats.total_requirements - organized.stats.unknown;
    println!(
        "  {} degree tables serialized, {} course groups",
        style(organized.degrees.len()).green(),
        organized.groups.len()
    );
    println!(
        "  {} of {} requirements parsed ({:.1}%)",
        parsed,
        organized.stats.total_requirements,
        100.0 * (1.0 - organized.stats.unknown_ratio())
    );
    if !organized.failures.is_empty() {
        println!(
            "  {} unresolved table(s)",
            style(organized.failures.len()).yellow().bold()
        );
        for failure in &organized.failures {
            println!("    {} {}", style(&failure.degree).yellow(), failure.error);
        }
    }

    println!();
    println!(
        "{} {} and {}",
        style("Saved to:").green().bold(),
        degrees_path.display(),
        groups_path.display()
    );

    Ok(())
}
