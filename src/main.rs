//! quire - assemble an mdBook project into a single document

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

use quire::cache::Cache;
use quire::export::{
    DEFAULT_CONTENT_WIDTH, DEFAULT_FONT_SIZE, Exporter, HtmlConfig, HtmlExporter, MarkdownConfig,
    MarkdownExporter,
};
use quire::sanitize::sanitize_filename_for_format;
use quire::vendor::VendorDir;
use quire::{Book, Result};

#[derive(Parser)]
#[command(name = "quire")]
#[command(version, about = "Assemble an mdBook project into a single document", long_about = None)]
#[command(after_help = "EXAMPLES:
    quire my-book book.md                Combine chapters into one Markdown file
    quire my-book out/ -f html           Write out/<Title>.html
    quire -i --json my-book              Show book metadata as JSON
    quire notes.md notes.html -f html    Wrap a single Markdown file")]
struct Cli {
    /// Project directory containing src/SUMMARY.md, or a single Markdown file
    #[arg(value_name = "PROJECT")]
    project: PathBuf,

    /// Output file or directory (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Show book metadata without converting
    #[arg(short, long)]
    info: bool,

    /// Print metadata as JSON (with --info)
    #[arg(long, requires = "info")]
    json: bool,

    /// Normalize bullet lists in Markdown output
    #[arg(long)]
    tight_lists: bool,

    /// Override the book title
    #[arg(long)]
    title: Option<String>,

    /// Base font size for HTML output (e.g. 16px, 1.2rem)
    #[arg(long, default_value = DEFAULT_FONT_SIZE)]
    font_size: String,

    /// Maximum content width for HTML output (e.g. 800px, 90%)
    #[arg(long, default_value = DEFAULT_CONTENT_WIDTH)]
    content_width: String,

    /// Directory holding vendored scripts
    #[arg(long, value_name = "DIR")]
    vendor_dir: Option<PathBuf>,

    /// Vendored script to inline into HTML output (repeatable)
    #[arg(long = "script", value_name = "NAME", requires = "vendor_dir")]
    scripts: Vec<String>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Html,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let result = if cli.info {
        show_info(&cli)
    } else {
        convert(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn load_book(cli: &Cli) -> Result<Book> {
    let mut book = if cli.project.is_file() {
        Book::from_markdown_file(&cli.project)?
    } else {
        Book::open(&cli.project)?
    };
    if let Some(title) = &cli.title {
        book.config_mut().title = title.clone();
    }
    Ok(book)
}

fn show_info(cli: &Cli) -> Result<()> {
    let book = load_book(cli)?;
    let config = book.config();

    if cli.json {
        let warnings: Vec<String> = book.warnings().iter().map(ToString::to_string).collect();
        let info = serde_json::json!({
            "root": book.root(),
            "config": config,
            "chapters": book.chapters(),
            "navigation": book.navigation(),
            "warnings": warnings,
        });
        let text = serde_json::to_string_pretty(&info).map_err(io::Error::from)?;
        println!("{text}");
        return Ok(());
    }

    println!("Project: {}", book.root().display());
    println!("Title: {}", config.title);
    if !config.authors.is_empty() {
        println!("Authors: {}", config.authors.join(", "));
    }
    println!("Language: {}", config.language);
    if let Some(desc) = &config.description {
        let desc = desc.trim();
        match desc.char_indices().nth(200) {
            Some((end, _)) => println!("Description: {}...", &desc[..end]),
            None => println!("Description: {desc}"),
        }
    }
    println!("Chapters: {}", book.navigation().len());
    println!(
        "Drafts: {}",
        book.chapters().iter().filter(|c| c.is_draft()).count()
    );
    for warning in book.warnings() {
        println!("Warning: {warning}");
    }

    Ok(())
}

fn convert(cli: &Cli) -> Result<()> {
    let book = load_book(cli)?;

    match cli.format {
        Format::Markdown => {
            let exporter = MarkdownExporter::with_config(MarkdownConfig {
                tight_lists: cli.tight_lists,
            });
            write_output(cli, &book, &exporter)
        }
        Format::Html => {
            let mut config = HtmlConfig::default()
                .with_font_size(&cli.font_size)
                .with_content_width(&cli.content_width);

            if let Some(dir) = &cli.vendor_dir {
                let vendor = VendorDir::new(dir);
                let mut cache = Cache::new();
                for name in &cli.scripts {
                    config = config.with_script(vendor.load_script(name, &mut cache)?);
                }
            }

            write_output(cli, &book, &HtmlExporter::with_config(config))
        }
    }
}

fn write_output<E: Exporter>(cli: &Cli, book: &Book, exporter: &E) -> Result<()> {
    let Some(output) = &cli.output else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        exporter.export(book, &mut writer)?;
        writer.flush()?;
        return Ok(());
    };

    let path = output_path(output, book.title(), exporter.extension());
    debug!(path = %path.display(), "writing output");

    let mut writer = BufWriter::new(File::create(&path)?);
    exporter.export(book, &mut writer)?;
    writer.flush()?;

    if !cli.quiet {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// An existing directory gets a file named after the book title.
fn output_path(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() {
        output.join(sanitize_filename_for_format(title, extension))
    } else {
        output.to_path_buf()
    }
}
