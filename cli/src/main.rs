//! pdf-reflow CLI - page layout reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_reflow::{
    render, DocumentModel, JsonFormat, JsonPageSource, LayoutOptions, PageSource, Reflow,
};

#[derive(Parser)]
#[command(name = "pdf-reflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct reflowable documents from interpreted PDF pages", long_about = None)]
struct Cli {
    /// Input page dump (JSON array of pages)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a plain-text preview instead of JSON
    #[arg(long)]
    text: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags mapped onto `LayoutOptions`.
#[derive(Args, Clone, Debug, Default)]
struct LayoutArgs {
    /// Do not extract images
    #[arg(long, global = true)]
    no_images: bool,

    /// Do not detect headings from font sizes
    #[arg(long, global = true)]
    no_smart_headings: bool,

    /// Bind annotations to paragraphs as comments
    #[arg(long, global = true)]
    comments: bool,

    /// Reconstruct images only
    #[arg(long, global = true)]
    images_only: bool,

    /// Skip unreadable pages instead of failing
    #[arg(long, global = true, env = "PDF_REFLOW_LENIENT")]
    lenient: bool,

    /// Process pages on a single thread
    #[arg(long, global = true)]
    sequential: bool,
}

impl LayoutArgs {
    fn options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new()
            .with_images(!self.no_images)
            .with_smart_headings(!self.no_smart_headings)
            .with_comments(self.comments);
        if self.images_only {
            options = options.images_only();
        }
        if self.lenient {
            options = options.lenient();
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show page and content statistics
    Info {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write extracted images as PNG files
    Extract {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.layout.options();

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Extract { input, output }) => cmd_extract(&input, output.as_deref(), options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_reflow(&input, cli.output.as_deref(), cli.text, cli.compact, options)
            } else {
                println!("{}", "Usage: pdf-reflow <FILE> [-o OUTPUT]".yellow());
                println!("       pdf-reflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Reconstruct a page dump, returning the document and the dump's page count.
fn load(
    input: &Path,
    options: &LayoutOptions,
) -> Result<(DocumentModel, u32), Box<dyn std::error::Error>> {
    let source = JsonPageSource::from_path(input)?;
    log::debug!("Loaded {} page entries from {}", source.page_count(), input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Reconstructing {} pages...", source.page_count()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = Reflow::new().with_options(options.clone()).read_source(&source);
    pb.finish_and_clear();

    let doc = result?.document;
    if !doc.skipped_pages.is_empty() {
        eprintln!(
            "{} skipped unreadable pages {:?}",
            "Warning:".yellow().bold(),
            doc.skipped_pages
        );
    }
    Ok((doc, source.page_count()))
}

fn render_output(doc: &DocumentModel, text: bool, compact: bool) -> pdf_reflow::Result<String> {
    if text {
        return render::to_text(doc);
    }
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    render::to_json(doc, format)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_reflow(
    input: &Path,
    output: Option<&Path>,
    text: bool,
    compact: bool,
    options: LayoutOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, _) = load(input, &options)?;
    let content = render_output(&doc, text, compact)?;
    write_output(&content, output)
}

fn cmd_info(input: &Path, options: LayoutOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, page_count) = load(input, &options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), page_count);
    if !doc.skipped_pages.is_empty() {
        println!("{}: {:?}", "Skipped".bold(), doc.skipped_pages);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let paragraphs = doc.paragraphs().count();
    let headings = doc.paragraphs().filter(|p| p.is_heading()).count();
    let list_items = doc.paragraphs().filter(|p| p.is_list_item()).count();
    let words: usize = doc.plain_text().split_whitespace().count();

    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Headings".bold(), headings);
    println!("{}: {}", "List items".bold(), list_items);
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Images".bold(), doc.images().count());
    println!("{}: {}", "Comments".bold(), doc.comments.len());

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    options: LayoutOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, _) = load(input, &options.with_images(true))?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let count = write_images(&doc, &output_dir)?;

    println!("\n{} {} images extracted", "Done!".green().bold(), count);

    Ok(())
}

fn write_images(doc: &DocumentModel, output_dir: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(output_dir)?;

    let mut count = 0;
    for (i, image) in doc.images().enumerate() {
        let filename = format!("image_{:03}.png", i + 1);
        fs::write(output_dir.join(&filename), &image.data)?;
        println!("{} {}", "Extracted".green(), filename);
        count += 1;
    }
    Ok(count)
}

fn cmd_version() {
    println!("{} {}", "pdf-reflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Page layout reconstruction tool");
    println!();
    println!("License: MIT");
}
