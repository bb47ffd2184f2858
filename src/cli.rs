// Command line interface module
// Handles parsing of command line arguments and stdin input

use crate::autoplay::{DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS};
use crate::error::BannerError;
use crate::image_loader::PageSource;
use crate::style::{BannerStyle, Color};
use anyhow::{bail, Result};
use clap::Parser;
use log::debug;
use std::io::{self, Read};
use std::path::PathBuf;

/// rbanner - A rotating image banner for Wayland
#[derive(Parser, Debug)]
#[command(name = "rbanner")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Images to show, in order (one more can be piped through stdin)
    #[arg(value_name = "IMAGES")]
    pub images: Vec<PathBuf>,

    /// Autoplay delay in milliseconds (500 - 10000)
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MS, value_parser = parse_delay)]
    pub delay: u64,

    /// Do not rotate pages automatically
    #[arg(long, default_value = "false")]
    pub no_autoplay: bool,

    /// Color of the selected indicator (#rrggbb)
    #[arg(long, value_name = "COLOR")]
    pub front_color: Option<Color>,

    /// Color of the other indicators (#rrggbb)
    #[arg(long, value_name = "COLOR")]
    pub back_color: Option<Color>,

    /// Opacity of the window (0.0 - 1.0)
    #[arg(short, long, default_value = "1.0", value_parser = parse_opacity)]
    pub opacity: f32,

    /// Initial X position of the window
    #[arg(short = 'x', long)]
    pub pos_x: Option<i32>,

    /// Initial Y position of the window
    #[arg(short = 'y', long)]
    pub pos_y: Option<i32>,
}

/// Parsed arguments with resolved page sources
#[derive(Debug)]
pub struct ParsedArgs {
    pub sources: Vec<PageSource>,
    pub delay_ms: u64,
    pub autoplay: bool,
    pub style: BannerStyle,
    pub opacity: f32,
    pub pos_x: Option<i32>,
    pub pos_y: Option<i32>,
}

/// Parse opacity value and ensure it's within valid range
fn parse_opacity(s: &str) -> Result<f32, String> {
    let opacity: f32 = s.parse().map_err(|_| "Invalid opacity value")?;
    if !(0.0..=1.0).contains(&opacity) {
        return Err("Opacity must be between 0.0 and 1.0".to_string());
    }
    Ok(opacity)
}

/// Parse the autoplay delay and ensure it's within the accepted range
fn parse_delay(s: &str) -> Result<u64, BannerError> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|_| BannerError::InvalidDelay(s.to_string()))?;
    if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&value) {
        return Err(BannerError::DelayOutOfRange {
            value,
            min: MIN_INTERVAL_MS,
            max: MAX_INTERVAL_MS,
        });
    }
    Ok(value)
}

/// Check if stdin has data available (is a pipe)
fn stdin_has_data() -> bool {
    !atty::is(atty::Stream::Stdin)
}

/// Read image data from stdin
fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}

impl Args {
    /// Resolve sources and style; `stdin` is what was read from a non-terminal stdin
    fn resolve(self, stdin: Option<Vec<u8>>) -> Result<ParsedArgs> {
        let stdin = match stdin {
            Some(data) if data.is_empty() => {
                if self.images.is_empty() {
                    bail!("No data received from stdin");
                }
                debug!("Stdin is empty, using the {} image argument(s) only", self.images.len());
                None
            }
            other => other,
        };

        let mut sources: Vec<PageSource> = self.images.into_iter().map(PageSource::File).collect();
        if let Some(data) = stdin {
            sources.push(PageSource::Bytes(data));
        }

        if sources.is_empty() {
            bail!("No images provided. Please provide image paths or pipe image data to stdin.\n\
                   Usage: rbanner <IMAGES>... [OPTIONS]\n\
                   Or:    cat image.png | rbanner [IMAGES]... [OPTIONS]");
        }

        let mut style = BannerStyle::default();
        if let Some(color) = self.front_color {
            style.set_indicator_front_color(color);
        }
        if let Some(color) = self.back_color {
            style.set_indicator_back_color(color);
        }

        Ok(ParsedArgs {
            sources,
            delay_ms: self.delay,
            autoplay: !self.no_autoplay,
            style,
            opacity: self.opacity,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
        })
    }
}

/// Parse command line arguments and handle stdin input
pub fn parse_args() -> Result<ParsedArgs> {
    let args = Args::parse();

    let stdin = if stdin_has_data() {
        Some(read_stdin()?)
    } else {
        None
    };

    args.resolve(stdin)
}
