//! Command handler: read the bitmap, render it, and route the output.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::args::Args;
use super::settings::Settings;
use crate::ascii;
use crate::bitmap::{self, DecodeError};
use crate::config::{Config, ConfigError};

/// Errors that end a run. `main` prints them and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Path {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("File {} already exists", .0.display())]
    OutputExists(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Run with parsed arguments, printing to stdout.
pub fn run(args: &Args) -> Result<(), RunError> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_file(&args.input, args.output.as_deref(), &settings, &mut out)
}

/// Decode `input` and write its ASCII art to `output`, or to `console` if no
/// output path is given. The header dump and status messages always go to
/// `console`.
pub fn render_file(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
    console: &mut impl Write,
) -> Result<(), RunError> {
    check_input(input)?;
    if let Some(path) = output {
        if path.exists() {
            return Err(RunError::OutputExists(path.to_path_buf()));
        }
    }

    log::info!("Reading {}", input.display());
    let bytes = std::fs::read(input).map_err(|e| io_error(input, e))?;

    // The dump goes out before validation so rejected files still show it
    let raw = bitmap::read_header(&bytes)?;
    if settings.header {
        writeln!(console, "{}", raw).map_err(|e| io_error(Path::new("<stdout>"), e))?;
    }
    let desc = raw.validate()?;

    let pixels = bitmap::decode_pixels(&bytes, &desc)?;
    let art = ascii::render(&pixels, &settings.ramp, settings.invert);
    log::info!("Rendered {}x{} characters", art.width(), art.height());
    let data = ascii::serialize(&art);

    match output {
        Some(path) => {
            write_new_file(path, &data)?;
            writeln!(console, "Wrote ASCII art to {}", path.display())
                .map_err(|e| io_error(Path::new("<stdout>"), e))?;
        }
        None => {
            console
                .write_all(&data)
                .and_then(|_| console.flush())
                .map_err(|e| io_error(Path::new("<stdout>"), e))?;
        }
    }

    Ok(())
}

fn check_input(input: &Path) -> Result<(), RunError> {
    let metadata = match std::fs::metadata(input) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RunError::InputNotFound(input.to_path_buf()))
        }
        Err(e) => return Err(io_error(input, e)),
    };
    if !metadata.is_file() {
        return Err(RunError::NotAFile(input.to_path_buf()));
    }
    Ok(())
}

/// Create `path` and write `data`, refusing to replace an existing file.
fn write_new_file(path: &Path, data: &[u8]) -> Result<(), RunError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                RunError::OutputExists(path.to_path_buf())
            } else {
                io_error(path, e)
            }
        })?;
    file.write_all(data).map_err(|e| io_error(path, e))?;
    log::info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> RunError {
    RunError::Io {
        path: path.to_path_buf(),
        source,
    }
}
