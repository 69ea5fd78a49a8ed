use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use text_watermark::{
    default_output_path, load_watermark_text, process_directory, process_file, Error, Position,
    WatermarkFont, WatermarkSpec, DEFAULT_OPACITY,
};

#[derive(Parser)]
#[command(
    name = "text-watermark",
    about = "Overlay watermark text onto an image",
    version,
    after_help = "Simple usage: text-watermark photo.jpg  (reads watermark.txt, writes photo_watermark.jpg)\n\n\
                  Point at a directory to watermark every PNG/JPEG in it (requires -o <output_dir>)."
)]
struct Cli {
    /// Input image file, or a directory for batch mode
    image: String,

    /// Plain-text file holding the watermark string
    #[arg(short, long, default_value = "watermark.txt")]
    watermark: String,

    /// Custom outline font file (default: embedded DejaVu Sans)
    #[arg(short, long)]
    font: Option<String>,

    /// Corner the text anchors to
    #[arg(short, long, default_value = "bottom-right")]
    position: Position,

    /// Output file (default: {name}_watermark.{ext}); output directory in batch mode
    #[arg(short, long)]
    output: Option<String>,

    /// Glyph alpha, 0 (invisible) to 255 (opaque)
    #[arg(long, default_value_t = DEFAULT_OPACITY)]
    opacity: u8,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let input_path = Path::new(&cli.image);
    if !input_path.exists() {
        eprintln!("Error: {}", Error::ImageNotFound(input_path.to_path_buf()));
        process::exit(1);
    }

    let watermark_path = Path::new(&cli.watermark);
    if !watermark_path.is_file() && !cli.quiet {
        eprintln!("Warning: watermark file not found: {}", cli.watermark);
    }
    let text = match load_watermark_text(watermark_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if text.is_empty() {
        eprintln!("Error: {}", Error::WatermarkMissing(watermark_path.to_path_buf()));
        process::exit(1);
    }

    let font = match &cli.font {
        Some(p) => match WatermarkFont::from_path(Path::new(p)) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => WatermarkFont::default_font(),
    };

    let spec = WatermarkSpec {
        text,
        position: cli.position,
        opacity: cli.opacity,
    };

    if input_path.is_dir() {
        let Some(output_dir) = cli.output.as_deref() else {
            eprintln!("Error: output directory is required for batch processing");
            eprintln!("Usage: text-watermark <input_dir> -o <output_dir>");
            process::exit(1);
        };

        let results = process_directory(input_path, Path::new(output_dir), &spec, &font);

        let mut success_count = 0u32;
        let mut fail_count = 0u32;
        for r in &results {
            let filename = r.path.file_name().map_or_else(
                || r.path.display().to_string(),
                |f| f.to_string_lossy().to_string(),
            );
            if r.success {
                success_count += 1;
                if !cli.quiet {
                    eprintln!("[OK] {filename}: {}", r.message);
                }
            } else {
                fail_count += 1;
                eprintln!("[FAIL] {filename}: {}", r.message);
            }
        }

        if !cli.quiet {
            eprintln!();
            eprint!("[Summary] Watermarked: {success_count}");
            if fail_count > 0 {
                eprint!(", Failed: {fail_count}");
            }
            eprintln!(" (Total: {})", results.len());
        }

        if fail_count > 0 {
            process::exit(1);
        }
    } else {
        let output_path = cli
            .output
            .as_ref()
            .map_or_else(|| default_output_path(input_path), PathBuf::from);

        if let Err(e) = process_file(input_path, &output_path, &spec, &font) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
        if !cli.quiet {
            eprintln!("[OK] watermarked image saved as {}", output_path.display());
        }
    }
}
