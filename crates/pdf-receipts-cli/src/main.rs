mod logger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pdf_receipts::{PageLayout, ReceiptOptions, constants::DEFAULT_INPUT_DIR};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "receipts2pdf",
    about = "Lay out scanned receipts four to an A4 page, captioned by receipt number",
    version
)]
struct Cli {
    /// Directory containing receipt images (jpg, jpeg, png, bmp, gif)
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Output PDF file [default: receipts_<YYYY-MM-DD>.pdf]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout options as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Caption font (TrueType), tried before the built-in candidates
    #[arg(long)]
    font: Vec<PathBuf>,

    /// Resolution images are resampled to
    #[arg(long)]
    dpi: Option<f32>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Print the page plan and statistics only, don't generate PDF
    #[arg(long)]
    plan: bool,

    /// Log per-image layout details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for pdf_receipts::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

async fn load_options(cli: &Cli) -> Result<ReceiptOptions> {
    let mut options = match &cli.config {
        Some(path) => ReceiptOptions::load(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => ReceiptOptions::default(),
    };

    if !cli.font.is_empty() {
        let mut fonts = cli.font.clone();
        fonts.append(&mut options.bold_fonts);
        options.bold_fonts = fonts;
    }
    if let Some(dpi) = cli.dpi {
        options.image_dpi = dpi;
    }
    if let Some(paper) = cli.paper {
        options.paper_size = paper.into();
    }

    options.validate()?;
    Ok(options)
}

fn print_plan(layouts: &[PageLayout]) {
    for (index, page) in layouts.iter().enumerate() {
        println!("Page {}:", index + 1);
        for placement in &page.placements {
            let cols = if placement.col_span > 1 {
                format!("cols {}-{}", placement.col, placement.col + placement.col_span - 1)
            } else {
                format!("col {}", placement.col)
            };
            println!(
                "  row {}, {:<8} {:<20} {}",
                placement.row, cols, placement.item.caption, placement.item.file_name
            );
        }
    }

    let stats = pdf_receipts::calculate_statistics(layouts);
    println!("Packing Statistics:");
    println!("  Images: {}", stats.images);
    println!("  Pages: {}", stats.pages);
    println!("  Landscape: {}", stats.landscape);
    println!("  Portrait: {}", stats.portrait);
    println!("  Empty cells: {}", stats.empty_cells);
    println!("  Underfilled pages: {}", stats.underfilled_pages);
    println!("  Pages closed by overflow: {}", stats.overflow_pages);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::StderrLogger::new(level).init()?;

    let options = load_options(&cli).await?;

    if cli.plan {
        let (_, layouts) = pdf_receipts::plan(&cli.input).await?;
        print_plan(&layouts);
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(pdf_receipts::default_output_path);
    let summary = pdf_receipts::convert(&cli.input, &output, &options).await?;

    match summary.output {
        Some(path) => println!("PDF generated: {}", path.display()),
        None => println!(
            "No images found in {}; nothing to do",
            cli.input.display()
        ),
    }

    Ok(())
}
