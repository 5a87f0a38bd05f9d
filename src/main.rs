use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use image::ImageFormat;
use pdfcompare::sheet::{self, SheetOptions};
use pdfcompare::{compare, CompareOptions, Comparison, Document, RenderOptions, DEFAULT_MAX_PIXELS};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

/// Render two PDFs page by page and write the pages side by side.
///
/// Exits with 0 if everything compared is identical, 1 if anything differs and 2 on error.
#[derive(Debug, Parser)]
#[command(name = "pdfcompare", about, version)]
struct Cli {
    /// First PDF, or a directory of PDFs
    #[arg(value_name = "LEFT")]
    left: PathBuf,

    /// Second PDF, or a directory with the same layout as LEFT
    #[arg(value_name = "RIGHT")]
    right: PathBuf,

    /// Directory the side-by-side pages are written to
    #[arg(short, long, default_value = "pdfcompare-out")]
    out: PathBuf,

    /// Render scale relative to the page size (1.0 renders at 72 dpi)
    #[arg(long, env = "PDFCOMPARE_SCALE", default_value_t = 2.0)]
    scale: f32,

    /// Refuse to render pages with more pixels than this
    #[arg(long, env = "PDFCOMPARE_MAX_PIXELS", default_value_t = DEFAULT_MAX_PIXELS)]
    max_pixels: u64,

    /// Frame width as a fraction of the shorter page side (0 disables frames)
    #[arg(long, default_value_t = 1.0 / 50.0)]
    border: f32,

    /// Render the two documents one after the other
    #[arg(long)]
    sequential: bool,
}

struct Settings {
    compare: CompareOptions,
    sheet: SheetOptions,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether everything compared was identical.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let settings = Settings {
        compare: CompareOptions {
            render: RenderOptions {
                scale: cli.scale,
                max_pixels: cli.max_pixels,
            },
            parallel: !cli.sequential,
            ..Default::default()
        },
        sheet: SheetOptions {
            border: cli.border,
            ..Default::default()
        },
    };
    settings.compare.render.validate()?;
    settings.sheet.validate()?;

    match (cli.left.is_dir(), cli.right.is_dir()) {
        (true, true) => compare_dirs(&cli.left, &cli.right, &cli.out, &settings),
        (false, false) => compare_files(&cli.left, &cli.right, &cli.out, "page", &settings),
        _ => bail!(
            "cannot compare a directory with a file ({} vs {})",
            cli.left.display(),
            cli.right.display()
        ),
    }
}

fn compare_files(
    left: &Path,
    right: &Path,
    out_dir: &Path,
    prefix: &str,
    settings: &Settings,
) -> anyhow::Result<bool> {
    let left_doc =
        Document::open(left).with_context(|| format!("unable to read {}", left.display()))?;
    let right_doc =
        Document::open(right).with_context(|| format!("unable to read {}", right.display()))?;

    let comparison = compare(&left_doc, &right_doc, &settings.compare).with_context(|| {
        format!(
            "unable to compare {} and {}",
            left.display(),
            right.display()
        )
    })?;

    let pairs = match comparison {
        Comparison::Identical { fingerprint } => {
            println!(
                "{} and {} are identical ({})",
                left.display(),
                right.display(),
                fingerprint
            );
            return Ok(true);
        }
        Comparison::Different { pairs, .. } => pairs,
    };

    println!(
        "{} and {} differ, {} pages",
        left.display(),
        right.display(),
        pairs.len()
    );

    fs::create_dir_all(out_dir)
        .with_context(|| format!("unable to create {}", out_dir.display()))?;
    for pair in &pairs {
        let composed = sheet::compose(pair, &settings.sheet)?;
        let path = out_dir.join(format!("{}-{}.png", prefix, pair.page_number()));
        composed
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("unable to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
    }

    Ok(false)
}

fn compare_dirs(
    left_root: &Path,
    right_root: &Path,
    out_root: &Path,
    settings: &Settings,
) -> anyhow::Result<bool> {
    let files: Vec<_> = WalkDir::new(left_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name().to_string_lossy().ends_with(".pdf"))
        .collect();

    if files.is_empty() {
        log::warn!("no PDF files found under {}", left_root.display());
    }

    let results: Vec<anyhow::Result<bool>> = files
        .par_iter()
        .map(|entry| {
            let left = entry.path();
            let relative = left.strip_prefix(left_root)?;
            let right = right_root.join(relative);

            if !right.is_file() {
                log::warn!("{} has no counterpart in {}", left.display(), right_root.display());
                println!("{} is missing", right.display());
                return Ok(false);
            }

            let out_dir = match relative.parent() {
                Some(parent) => out_root.join(parent),
                None => out_root.to_path_buf(),
            };
            let stem = relative
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            compare_files(left, &right, &out_dir, &stem, settings)
        })
        .collect();

    let mut all_identical = true;
    for result in results {
        all_identical &= result?;
    }

    Ok(all_identical)
}
