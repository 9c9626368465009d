//! Convert a font between the psf, psf.gz and asm representations.
//!
//! Usage: cargo run -p psf_font --bin psfconv <input> <output>
//!
//! Both formats are detected from the file extensions.

use std::path::Path;
use std::process::ExitCode;

use psf_font::{FontError, FontFormat, Result};

fn detect_format(path: &Path) -> Result<FontFormat> {
    FontFormat::from_path(path).ok_or_else(|| FontError::UnknownFileFormat { path: path.to_path_buf() })
}

fn convert(input: &Path, output: &Path) -> Result<()> {
    let input_format = detect_format(input)?;
    let output_format = detect_format(output)?;

    println!(
        "Converting: {} ({}) -> {} ({})",
        input.display(),
        input_format,
        output.display(),
        output_format
    );

    let font = input_format.import(input)?;
    let (width, height) = font.glyph_size();
    println!("  {} glyphs, {}x{} pixels", font.len(), width, height);

    output_format.export(&font, output)?;
    println!("  Wrote: {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: psfconv <input.(asm|psf|psf.gz)> <output.(asm|psf|psf.gz)>");
        return ExitCode::FAILURE;
    }

    match convert(Path::new(&args[1]), Path::new(&args[2])) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undetectable_formats_are_errors() {
        // both paths are rejected before any file is touched
        let err = convert(Path::new("font.txt"), Path::new("font.psf")).unwrap_err();
        assert!(matches!(err, FontError::UnknownFileFormat { .. }));

        let err = convert(Path::new("font.psf"), Path::new("out.txt")).unwrap_err();
        assert!(matches!(err, FontError::UnknownFileFormat { .. }));
    }
}
