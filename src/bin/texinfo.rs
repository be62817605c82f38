//! Prints the layout of an ASTC or KTX texture file.
//!
//! ```bash
//! texinfo textures/skybox.ktx --keys
//! RUST_LOG=debug texinfo atlas.astc --strict-astc
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use texcontainer::{CubemapImageSize, ParseOptions, TextureDescriptor, ZeroMipPolicy};

/// Inspect ASTC and KTX texture containers
#[derive(Parser)]
#[command(name = "texinfo")]
#[command(version)]
struct Cli {
    /// Texture file to inspect
    file: PathBuf,

    /// How a KTX mipmap count of zero is treated
    #[arg(long, value_enum, default_value_t = ZeroMips::One)]
    zero_mips: ZeroMips,

    /// Treat imageSize of non-array cubemaps as the size of one face
    #[arg(long)]
    per_face_cubemap: bool,

    /// Require the ASTC payload to hold every declared block
    #[arg(long)]
    strict_astc: bool,

    /// Print the KTX key/value metadata
    #[arg(long)]
    keys: bool,

    /// Print every block of the layout
    #[arg(long)]
    blocks: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum ZeroMips {
    One,
    Flag,
    Reject,
}

impl From<ZeroMips> for ZeroMipPolicy {
    fn from(value: ZeroMips) -> Self {
        match value {
            ZeroMips::One => ZeroMipPolicy::NormalizeToOne,
            ZeroMips::Flag => ZeroMipPolicy::FlagForGeneration,
            ZeroMips::Reject => ZeroMipPolicy::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let data = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let cubemap_image_size = if cli.per_face_cubemap {
        CubemapImageSize::PerFace
    } else {
        CubemapImageSize::WholeLevel
    };
    let options = ParseOptions::default()
        .with_zero_mip_policy(cli.zero_mips.into())
        .with_cubemap_image_size(cubemap_image_size)
        .with_strict_astc_payload(cli.strict_astc);

    let tex = TextureDescriptor::from_bytes_with(&data, &options)
        .with_context(|| format!("Failed to parse {}", cli.file.display()))?;

    println!("{}: {}", cli.file.display(), tex.container().name());
    println!(
        "  size:     {}x{}x{}",
        tex.width(),
        tex.height(),
        tex.depth()
    );
    println!(
        "  layers:   {}  faces: {}  levels: {}{}",
        tex.array_layers(),
        tex.faces(),
        tex.mip_levels(),
        if tex.generate_mipmaps() { " (generate)" } else { "" }
    );
    print!("  format:   {:?}", tex.pixel_format());
    if let Some(dim) = tex.block_dim() {
        print!(" ({dim} blocks{})", if tex.srgb() { ", sRGB" } else { "" });
    }
    println!();
    if let Some(gl) = tex.gl_format() {
        println!(
            "  gl:       internal {:#06X}, base {:#06X}, type {:#06X}, format {:#06X}",
            gl.glInternalFormat, gl.glBaseInternalFormat, gl.glType, gl.glFormat
        );
    }
    if let Some(bytes_per_row) = tex.bytes_per_row() {
        println!("  row:      {bytes_per_row} bytes");
    }

    for level in 0..tex.mip_levels() {
        let blocks = tex.level_blocks(level);
        let (w, h, d) = tex.level_extent(level).unwrap_or((1, 1, 1));
        let bytes: u64 = blocks.iter().map(|b| b.byte_length).sum();
        println!(
            "  level {level}: {w}x{h}x{d}, {} blocks, {bytes} bytes",
            blocks.len()
        );
        if cli.blocks {
            for block in blocks {
                println!(
                    "    layer {} face {}: offset {} length {}",
                    block.array_layer, block.face, block.byte_offset, block.byte_length
                );
            }
        }
    }

    if cli.keys {
        for pair in tex.key_value_pairs(&data) {
            let pair = pair.context("Failed to decode key/value metadata")?;
            let value = pair.value.strip_suffix(&[0u8]).unwrap_or(pair.value);
            match std::str::from_utf8(value) {
                Ok(text) => println!("  {} = {text}", pair.key),
                Err(_) => println!("  {} = <{} bytes>", pair.key, pair.value.len()),
            }
        }
    }

    Ok(())
}
