use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use huffarc::{CompressedData, HuffmanCodec};

/// Huffman file compression
///
/// Exactly one of -c or -x is required. FILE is the file being compressed
/// with -c, or where the decompressed data is written with -x.
#[derive(Parser, Debug)]
#[command(name = "huffarc", version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["create", "extract"])))]
struct Cli {
    /// Create an archive from FILE
    #[arg(short = 'c', long)]
    create: bool,

    /// Extract the archive into FILE
    #[arg(short = 'x', long)]
    extract: bool,

    /// Archive path
    #[arg(short = 'f', long, default_value = "archive.huf")]
    archive: PathBuf,

    /// Print the code tree
    #[arg(long)]
    tree: bool,

    /// Log pipeline stages
    #[arg(short, long)]
    verbose: bool,

    /// Input with -c, output with -x
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.create {
        create(&cli)
    } else {
        extract(&cli)
    }
}

fn create(cli: &Cli) -> Result<()> {
    let data = fs::read(&cli.file).context(format!("reading {}", cli.file.display()))?;

    let codec = HuffmanCodec::from_bytes(&data).context("building code tree")?;
    if cli.tree {
        println!("{}", codec.tree());
    }
    let archive = codec
        .compress(&data)
        .context("encoding input")?
        .serialize()
        .context("serializing archive")?;

    fs::write(&cli.archive, &archive)
        .context(format!("writing {}", cli.archive.display()))?;
    info!(
        input = data.len(),
        archive = archive.len(),
        "created {}",
        cli.archive.display()
    );
    Ok(())
}

fn extract(cli: &Cli) -> Result<()> {
    let bytes = fs::read(&cli.archive).context(format!("reading {}", cli.archive.display()))?;

    let compressed = CompressedData::deserialize(&bytes).context("parsing archive")?;
    let codec = HuffmanCodec::new(compressed.histogram).context("rebuilding code tree")?;
    if cli.tree {
        println!("{}", codec.tree());
    }
    let data = codec
        .decode(&compressed.payload)
        .into_result()
        .context("decoding payload")?;

    fs::write(&cli.file, &data).context(format!("writing {}", cli.file.display()))?;
    info!(
        archive = bytes.len(),
        output = data.len(),
        "extracted {}",
        cli.file.display()
    );
    Ok(())
}
