//! Extract document outlines from layout dumps
//!
//! Writes `{"title": ..., "outline": [...]}` JSON for each input.
//!
//! Usage:
//!   extract_outline <input>                          (writes <stem>.json beside the input)
//!   extract_outline <input> <start> <end> <output>   (pages start..end, 0-based, end exclusive)
//!   extract_outline --count <input>
//!   extract_outline --input-dir <dir> --output-dir <dir>
//!
//! Options:
//!   --chunks <n>      split the document into n page ranges processed in parallel
//!   --config <file>   JSON file overriding the heuristic configuration
//!
//! Set `RUST_LOG=debug` for per-pass diagnostics.

use pdf_outliner::{DocumentOutline, LayoutDocument, LayoutSource, OutlineConfig, OutlineExtractor};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Default)]
struct CliArgs {
    positional: Vec<String>,
    count: bool,
    chunks: Option<usize>,
    config: Option<PathBuf>,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl CliArgs {
    fn from_args() -> CliResult<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut parsed = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--count" => {
                    parsed.count = true;
                },
                "--chunks" => {
                    i += 1;
                    let value = args.get(i).ok_or("--chunks requires a value")?;
                    parsed.chunks = Some(value.parse()?);
                },
                "--config" => {
                    i += 1;
                    parsed.config = Some(PathBuf::from(args.get(i).ok_or("--config requires a path")?));
                },
                "--input-dir" => {
                    i += 1;
                    parsed.input_dir =
                        Some(PathBuf::from(args.get(i).ok_or("--input-dir requires a path")?));
                },
                "--output-dir" => {
                    i += 1;
                    parsed.output_dir =
                        Some(PathBuf::from(args.get(i).ok_or("--output-dir requires a path")?));
                },
                other => parsed.positional.push(other.to_string()),
            }
            i += 1;
        }

        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  extract_outline <input> [--chunks <n>] [--config <file>]");
    eprintln!("  extract_outline <input> <start> <end> <output>");
    eprintln!("  extract_outline --count <input>");
    eprintln!("  extract_outline --input-dir <dir> --output-dir <dir>");
}

/// Output path for single-file mode: `<stem>.json` beside the input, or
/// `<stem>.outline.json` when that would overwrite a JSON input.
fn default_output_path(input: &Path) -> PathBuf {
    let output = input.with_extension("json");
    if output == input {
        input.with_extension("outline.json")
    } else {
        output
    }
}

fn is_layout_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("json") | Some("txt")
    )
}

fn extract(extractor: &OutlineExtractor, input: &Path, chunks: Option<usize>) -> DocumentOutline {
    match chunks {
        Some(n) if n > 1 => {
            let name = input.to_string_lossy();
            match LayoutDocument::open(input) {
                Ok(doc) => extractor.extract_chunked(&doc, &name, n),
                Err(e) => {
                    log::warn!("{}", e);
                    DocumentOutline::fallback(&name)
                },
            }
        },
        _ => extractor.extract_file(input),
    }
}

fn write_outline(outline: &DocumentOutline, output: &Path) -> CliResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, outline.to_json_pretty()?)?;
    Ok(())
}

fn run_batch(
    extractor: &OutlineExtractor,
    input_dir: &Path,
    output_dir: &Path,
    chunks: Option<usize>,
) -> CliResult<()> {
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_layout_file(p))
        .collect();
    inputs.sort();

    println!("Found {} layout files in {}", inputs.len(), input_dir.display());

    let start = Instant::now();
    for input in &inputs {
        let file_start = Instant::now();
        let outline = extract(extractor, input, chunks);
        let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
        let output = output_dir.join(format!("{}.json", stem));

        match write_outline(&outline, &output) {
            Ok(()) => log::info!(
                "{} -> {} ({} headings, {:.2?})",
                input.display(),
                output.display(),
                outline.outline.len(),
                file_start.elapsed()
            ),
            Err(e) => eprintln!("Error writing {}: {}", output.display(), e),
        }
    }

    println!("Processed {} files in {:.2?}", inputs.len(), start.elapsed());
    Ok(())
}

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::from_args()?;
    let config = match &args.config {
        Some(path) => OutlineConfig::from_json_file(path)?,
        None => OutlineConfig::default(),
    };
    let extractor = OutlineExtractor::with_config(config);

    if let (Some(input_dir), Some(output_dir)) = (&args.input_dir, &args.output_dir) {
        return run_batch(&extractor, input_dir, output_dir, args.chunks);
    }

    match args.positional.as_slice() {
        [input] if args.count => {
            let doc = LayoutDocument::open(input)?;
            println!("{}", doc.page_count());
        },
        [input] => {
            let input = Path::new(input);
            let output = default_output_path(input);
            let outline = extract(&extractor, input, args.chunks);
            write_outline(&outline, &output)?;
            println!("Wrote {} ({} headings)", output.display(), outline.outline.len());
        },
        [input, start, end, output] => {
            let (start, end): (usize, usize) = (start.parse()?, end.parse()?);
            let doc = LayoutDocument::open(input)?;
            let outline = extractor.extract_range(&doc, start..end, input)?;
            write_outline(&outline, Path::new(output))?;
            println!(
                "Wrote {} (pages {}..{}, {} headings)",
                output,
                start,
                end,
                outline.outline.len()
            );
        },
        _ => {
            print_usage();
            std::process::exit(2);
        },
    }

    Ok(())
}
