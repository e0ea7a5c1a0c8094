//! CLI tool for turning slide decks and PDFs into index records.

mod deck;
mod thumbnail;

use anyhow::{Context, Result};
use clap::Parser;
use deck::SniffingDeckReader;
use pagechunk_core::{
    ChunkOptions, Chunker, DocumentFormat, Error, LogProgress, NoProgress, PageLayout,
    PageLayoutOutput, PageWindow, Progress, Record, SimpleTokenizer, Source, DEFAULT_TO_PAGE,
    DEFAULT_ZOOM,
};
use pagechunk_pdf::PdfiumLayout;
use std::cell::OnceCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use thumbnail::BlankThumbnailRenderer;

/// Split a PPT, PPTX or PDF file into page-aligned records.
#[derive(Parser, Debug)]
#[command(name = "pagechunk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document (.ppt, .pptx or .pdf)
    input: PathBuf,

    /// First page or slide to process (0-based)
    #[arg(short, long, default_value_t = 0)]
    from_page: usize,

    /// Stop before this page (PDF only; decks always run to the end)
    #[arg(short, long, default_value_t = DEFAULT_TO_PAGE)]
    to_page: usize,

    /// Render zoom for PDF pages
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    zoom: f32,

    /// Print records as JSON (images base64-encoded)
    #[arg(short, long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Binds pdfium on first use, so decks never need the library.
#[derive(Default)]
struct DeferredPdfLayout {
    inner: OnceCell<PdfiumLayout>,
}

impl PageLayout for DeferredPdfLayout {
    fn analyze(
        &self,
        source: &Source,
        window: PageWindow,
        zoom: f32,
    ) -> pagechunk_core::Result<PageLayoutOutput> {
        let layout = match self.inner.get() {
            Some(layout) => layout,
            None => {
                let layout = PdfiumLayout::new()?;
                self.inner.get_or_init(|| layout)
            }
        };
        layout.analyze(source, window, zoom)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let records = process_file(&args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &records).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for record in &records {
            write_record(&mut out, record)?;
        }
    }

    Ok(())
}

/// Chunk the input file into records.
fn process_file(args: &Args) -> Result<Vec<Record>> {
    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let format = detect_format(&args.input)?;
    if args.verbose {
        eprintln!("Processing: {} ({:?})", args.input.display(), format);
    }

    let chunker = Chunker::new(
        SniffingDeckReader::new(),
        BlankThumbnailRenderer::new(SniffingDeckReader::new()),
        DeferredPdfLayout::default(),
        SimpleTokenizer::new(),
    )
    .with_options(ChunkOptions::new().with_zoom(args.zoom));

    let window = PageWindow::new(args.from_page, args.to_page);
    let source = Source::path(&args.input);
    let mut progress: Box<dyn Progress> = if args.verbose {
        Box::new(LogProgress)
    } else {
        Box::new(NoProgress)
    };

    let records = chunker
        .chunk_source(filename, format, &source, window, progress.as_mut())
        .with_context(|| format!("Failed to chunk {}", args.input.display()))?;

    if args.verbose {
        eprintln!("  Produced {} records", records.len());
    }

    Ok(records)
}

/// Format from the file extension alone. Anything else is rejected
/// before the file is opened.
fn detect_format(path: &Path) -> pagechunk_core::Result<DocumentFormat> {
    path.to_str()
        .and_then(DocumentFormat::from_filename)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
}

fn write_record(out: &mut impl Write, record: &Record) -> Result<()> {
    writeln!(
        out,
        "=== {} [{}] ({} byte image{}) ===",
        record.doc_name,
        record.page_index,
        record.image.len(),
        if record.is_english { ", english" } else { "" }
    )?;
    writeln!(out, "{}", record.content)?;
    writeln!(out, "tokens: {}", record.content_tokens)?;
    if let Some(small) = &record.content_small_tokens {
        writeln!(out, "fine tokens: {}", small)?;
    }
    writeln!(out)?;
    Ok(())
}
