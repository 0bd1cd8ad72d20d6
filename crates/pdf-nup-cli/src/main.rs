mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdf_nup::{ImpositionStatistics, LayoutConfig, PageSource, PdfSources};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "N-up and booklet imposition for PDFs and images", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile N pages onto each output sheet
    Nup {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Arrange pages for saddle-stitch binding
    Booklet {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Check the structure of a PDF file
    Validate {
        /// PDF file to check
        file: PathBuf,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Tiles per sheet side (2, 4, 6, 8, 9, 12 or 16)
    n: usize,

    /// Layout descriptor, e.g. "p:A4P, border:on, g:on, ma:10, bgcol:#beded9"
    #[arg(default_value = "")]
    descriptor: String,

    /// Input file(s) - can specify multiple
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long, required_unless_present = "stats_only")]
    output: Option<PathBuf>,

    /// Page selection, e.g. "1-8,even" (1-based, repeatable)
    #[arg(short, long)]
    pages: Vec<String>,

    /// Inputs are PNG/JPEG images rather than PDFs
    #[arg(long)]
    images: bool,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

fn print_statistics(stats: &ImpositionStatistics) {
    println!("Imposition Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank pages added: {}", stats.blank_pages_added);
}

async fn run_job(job: JobArgs, config: LayoutConfig) -> Result<()> {
    if job.stats_only {
        let available = if job.images {
            job.input.len()
        } else {
            let documents = pdf_nup::load_multiple_pdfs(&job.input).await?;
            PdfSources::new(documents).page_count()
        };
        let selected = pdf_nup::resolve_page_selection(&job.pages, available)?;
        let stats = pdf_nup::calculate_statistics(selected.len(), &config)?;
        print_statistics(&stats);
        return Ok(());
    }

    let output = job.output.context("--output is required")?;
    let stats = match config.mode() {
        pdf_nup::ImposeMode::NUp => {
            pdf_nup::nup_file(&job.input, &output, &config, &job.pages).await?
        }
        pdf_nup::ImposeMode::Booklet => {
            pdf_nup::booklet_file(&job.input, &output, &config, &job.pages).await?
        }
    };
    print_statistics(&stats);
    println!("Imposed → {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Nup { job } => {
            let config = if job.images {
                LayoutConfig::image_nup(job.n, &job.descriptor)
            } else {
                LayoutConfig::pdf_nup(job.n, &job.descriptor)
            }
            .with_context(|| format!("invalid layout {:?}", job.descriptor))?;
            run_job(job, config).await?;
        }

        Commands::Booklet { job } => {
            let config = if job.images {
                LayoutConfig::image_booklet(job.n, &job.descriptor)
            } else {
                LayoutConfig::pdf_booklet(job.n, &job.descriptor)
            }
            .with_context(|| format!("invalid layout {:?}", job.descriptor))?;
            run_job(job, config).await?;
        }

        Commands::Validate { file } => {
            let pages = pdf_nup::validate_file(&file)
                .await
                .with_context(|| format!("{} failed validation", file.display()))?;
            println!("{}: valid, {} pages", file.display(), pages);
        }
    }

    Ok(())
}
