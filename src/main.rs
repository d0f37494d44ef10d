//! Huffman text compressor.
//!
//! ```bash
//! huffman encode notes.txt                      # writes notes.txt.huf
//! huffman decode --source notes.txt notes.txt.huf -o notes.out.txt
//! huffman stats notes.txt --tree
//! ```

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use huffman_coding::io::{ByteStore, FsStore};
use huffman_coding::{CodecConfig, HuffmanCoding};

#[derive(Parser, Debug)]
#[command(name = "huffman")]
#[command(version)]
#[command(about = "Huffman coding for 7-bit text files", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a text file into packed bits
    Encode {
        input: String,

        /// Output path, defaults to the input path plus the encoded extension
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decode packed bits using the tree of the original text
    Decode {
        /// Text the encoded file was produced from
        #[arg(long)]
        source: String,

        encoded: String,

        /// Output path, defaults to stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Fail on an incomplete trailing code
        #[arg(long)]
        strict: bool,
    },

    /// Print code table and size figures for a text file
    Stats {
        input: String,

        /// Also print the tree
        #[arg(long)]
        tree: bool,
    },
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CodecConfig::load_from_file(path)?,
        None => CodecConfig::from_env()?,
    };

    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut store = FsStore::default();

    match args.command {
        Command::Encode { input, output } => {
            let output = output.unwrap_or_else(|| format!("{input}.{}", config.encoded_extension));
            let data = store.read_bytes(&input)?;
            let coding = HuffmanCoding::from_symbols(&data)?;
            let bytes = coding.encode_to_store(&data, &mut store, &output)?;
            info!("{} -> {}: {} bytes -> {} bytes", input, output, data.len(), bytes);
        }
        Command::Decode { source, encoded, output, strict } => {
            let mut coding = HuffmanCoding::from_store(&store, &source)?.with_config(&config);
            if strict {
                coding = coding.strict(true);
            }
            let mut decoded = Vec::new();
            coding.decode_from_store(&store, &encoded, &mut decoded)?;
            match output {
                Some(path) => store.write_bytes(&path, &decoded)?,
                None => io::stdout().lock().write_all(&decoded)?,
            }
        }
        Command::Stats { input, tree } => {
            let data = store.read_bytes(&input)?;
            let coding = HuffmanCoding::from_symbols(&data)?;
            let stats = coding.stats(&data)?;

            let mut out = io::stdout().lock();
            writeln!(out, "symbols:         {}", stats.symbols)?;
            writeln!(out, "distinct:        {}", stats.distinct)?;
            writeln!(out, "bits per symbol: {:.4}", stats.expected_length)?;
            writeln!(out, "encoded bits:    {}", stats.encoded_bits)?;
            writeln!(out, "packed bytes:    {} ({:.1}%)", stats.packed_bytes, stats.ratio() * 100.0)?;
            writeln!(out)?;
            for (symbol, code) in coding.codes().iter() {
                writeln!(out, "{:>6}  {code}", format!("{:?}", symbol as char))?;
            }
            if tree {
                writeln!(out)?;
                write!(out, "{}", coding.tree())?;
            }
        }
    }

    Ok(())
}
