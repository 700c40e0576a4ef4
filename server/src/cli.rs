//! Command-line interface definitions.

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Parse and validate a scale factor (positive, finite)
fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("Scale must be a positive number, got {}", s));
    }
    Ok(scale)
}

/// Parse an HTTP route, which must be an absolute path
fn parse_route(s: &str) -> Result<String, String> {
    if !s.starts_with('/') || s.contains(char::is_whitespace) || s.contains('?') {
        return Err(format!("Route must be an absolute path like /ascii-art, got '{}'", s));
    }
    Ok(s.to_string())
}

/// asciify: render images as ASCII art text
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version, about = "Render images as ASCII art text")]
#[command(after_help = "EXAMPLES:
    # Print a picture at half resolution
    asciify render photo.jpg

    # Several pictures at a quarter resolution
    asciify render --scale 0.25 a.png b.jpg

    # Serve a picture on http://127.0.0.1:8080/ascii-art
    asciify serve --image photo.jpg

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=debug) to change verbosity.")]
pub struct Cli {
    /// Config file (defaults to ./asciify.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the ASCII art of an image over HTTP
    Serve(ServeArgs),
    /// Print the ASCII art of one or more images
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Path the art is served at
    #[arg(long, value_parser = parse_route)]
    pub route: Option<String>,

    /// Image to render for every request
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fraction of the source resolution to render
    #[arg(long, value_parser = parse_scale)]
    pub scale: Option<f64>,

    /// Per-request render timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl ServeArgs {
    /// Override config file values with the flags that were given
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(route) = &self.route {
            config.server.route = route.clone();
        }
        if let Some(image) = &self.image {
            config.art.image = Some(image.clone());
        }
        if let Some(scale) = self.scale {
            config.art.scale = scale;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.server.render_timeout_ms = timeout_ms;
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Fraction of the source resolution to render
    #[arg(long, value_parser = parse_scale)]
    pub scale: Option<f64>,

    /// Images to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}
