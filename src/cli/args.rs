//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use crate::ascii::CharacterRamp;

/// Render an uncompressed 24-bit bitmap as ASCII art
#[derive(Parser, Debug)]
#[command(name = "bitmap-ascii")]
#[command(version, about = "Render 24-bit BMP images as ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Print to the terminal
    bitmap-ascii photo.bmp

    # Custom ramp, inverted for light terminals
    bitmap-ascii photo.bmp -c \"[#,+,-,.]\" -i

    # Show the header and write the art to a file
    bitmap-ascii photo.bmp -H -o photo.txt")]
pub struct Args {
    /// Bitmap image to render
    pub input: PathBuf,

    /// Write the art to this file instead of the terminal (must not exist)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Character ramp, darkest first: [char,char,...]
    #[arg(short = 'c', long, value_parser = parse_ramp)]
    pub charset: Option<CharacterRamp>,

    /// Print the bitmap header values
    #[arg(short = 'H', long)]
    pub header: bool,

    /// Don't print the header, even if the config enables it
    #[arg(long, conflicts_with = "header")]
    pub no_header: bool,

    /// Invert brightness (for light terminals)
    #[arg(short, long)]
    pub invert: bool,

    /// Don't invert brightness, even if the config enables it
    #[arg(long, conflicts_with = "invert")]
    pub no_invert: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse a `[c,c,...]` ramp argument
fn parse_ramp(s: &str) -> Result<CharacterRamp, String> {
    CharacterRamp::parse(s).map_err(|e| e.to_string())
}
