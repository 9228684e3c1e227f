//! glossex CLI - glossary extraction tool

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use glossex::{load_document, render, GlossaryPipeline, JsonFormat, MarkerSet, PipelineOptions};

#[derive(Parser)]
#[command(name = "glossex")]
#[command(version)]
#[command(about = "Extract glossary sections from regulatory PDFs to JSON", long_about = None)]
struct Cli {
    /// Input document (PDF or pages JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct PipelineArgs {
    /// Marker set JSON file (cover, stamp, section keywords)
    #[arg(long, value_name = "FILE", env = "GLOSSEX_MARKERS")]
    markers: Option<PathBuf>,

    /// Keep the first page even if it looks like a cover page
    #[arg(long)]
    keep_cover: bool,

    /// Leave document-control stamps in the text
    #[arg(long)]
    keep_stamps: bool,

    /// Do not cut the document at the administrative section
    #[arg(long)]
    no_truncate: bool,
}

impl PipelineArgs {
    fn build(&self) -> Result<GlossaryPipeline, Box<dyn std::error::Error>> {
        let mut options = PipelineOptions::new();

        if let Some(path) = &self.markers {
            let markers = MarkerSet::from_json_reader(File::open(path)?)?;
            options = options.with_markers(markers);
        }
        if self.keep_cover {
            options = options.keep_cover();
        }
        if self.keep_stamps {
            options = options.keep_stamps();
        }
        if self.no_truncate {
            options = options.without_truncation();
        }

        Ok(GlossaryPipeline::new(options)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the glossary as JSON
    Extract {
        /// Input document (PDF or pages JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Extract glossaries from many documents in parallel
    Batch {
        /// Input documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (one <name>.json per input)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print the normalized paragraphs
    #[command(alias = "para")]
    Paragraphs {
        /// Input document (PDF or pages JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print the isolated glossary section
    Section {
        /// Input document (PDF or pages JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show per-stage statistics
    Info {
        /// Input document (PDF or pages JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            pipeline,
        }) => cmd_extract(&input, output.as_deref(), compact, &pipeline),
        Some(Commands::Batch {
            inputs,
            output,
            compact,
            pipeline,
        }) => cmd_batch(&inputs, &output, compact, &pipeline),
        Some(Commands::Paragraphs { input, pipeline }) => cmd_paragraphs(&input, &pipeline),
        Some(Commands::Section { input, pipeline }) => cmd_section(&input, &pipeline),
        Some(Commands::Info {
            input,
            json,
            pipeline,
        }) => cmd_info(&input, json, &pipeline),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, None, false, &PipelineArgs::default())
            } else {
                println!("{}", "Usage: glossex <FILE>".yellow());
                println!("       glossex --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build()?;
    let doc = load_document(input)?;
    let entries = pipeline.extract(&doc);

    if entries.is_empty() {
        log::warn!("no glossary section found in {}", input.display());
    }

    let format = json_format(compact);
    if let Some(path) = output {
        render::save_json(&entries, format, path)?;
        println!(
            "{} {} ({} entries)",
            "Saved to".green(),
            path.display(),
            entries.len()
        );
    } else {
        println!("{}", render::to_json(&entries, format)?);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    compact: bool,
    args: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build()?;
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message(format!("Loading {} documents...", inputs.len()));
    let mut loaded = Vec::with_capacity(inputs.len());
    let mut documents = Vec::with_capacity(inputs.len());
    let mut failed = Vec::new();
    for input in inputs {
        match load_document(input) {
            Ok(doc) => {
                loaded.push(input);
                documents.push(doc);
            }
            Err(e) => failed.push((input, e)),
        }
    }
    pb.inc(1);

    pb.set_message("Extracting glossaries...");
    let results = pipeline.extract_batch(&documents);
    pb.inc(1);

    pb.set_message("Writing JSON...");
    let format = json_format(compact);
    let mut written = Vec::with_capacity(results.len());
    for (input, entries) in loaded.iter().zip(&results) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let path = output_dir.join(format!("{}.json", stem));
        render::save_json(entries, format, &path)?;
        written.push((path, entries.len()));
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (path, count) in &written {
        println!("  {} {} ({} entries)", "├─".dimmed(), path.display(), count);
    }
    for (input, e) in &failed {
        println!("  {} {}: {}", "✗".red(), input.display(), e);
    }

    if !failed.is_empty() {
        return Err(format!("{} of {} documents failed", failed.len(), inputs.len()).into());
    }
    Ok(())
}

fn cmd_paragraphs(input: &Path, args: &PipelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build()?;
    let doc = load_document(input)?;

    for (i, paragraph) in pipeline.paragraphs(&doc).iter().enumerate() {
        println!("{} {}", format!("{:>4}", i + 1).dimmed(), paragraph);
    }
    Ok(())
}

fn cmd_section(input: &Path, args: &PipelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build()?;
    let doc = load_document(input)?;
    let section = pipeline.section(&pipeline.paragraphs(&doc));

    if section.is_empty() {
        println!("{}", "No glossary section found".yellow());
        return Ok(());
    }
    for line in &section {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_info(input: &Path, json: bool, args: &PipelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build()?;
    let doc = load_document(input)?;
    let report = pipeline.run(&doc).report;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), report.pages_in);
    println!(
        "{}: {}",
        "Cover page".bold(),
        if report.cover_dropped { "dropped" } else { "none" }
    );

    println!();
    println!("{}", "Pipeline Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), report.blocks_in);
    println!("{}: {}", "Stamp blocks removed".bold(), report.blocks_scrubbed);
    println!("{}: {}", "Paragraphs".bold(), report.paragraphs);
    println!("{}: {}", "Glossary paragraphs".bold(), report.section_paragraphs);
    println!("{}: {}", "Entries".bold(), report.entries);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "glossex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Glossary extraction tool for regulatory PDFs");
    println!();
    println!("License: MIT");
}
