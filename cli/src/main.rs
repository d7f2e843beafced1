use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docz::demo::math_module;
use docz::{compress, decompress, write_document, CompressionLevel, DoczError};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "dz")]
#[command(about = "Print a JSON document, or round-trip text through zlib", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the `math` module description and print it as JSON
    Mkjson {
        /// Indent the output instead of printing it on one line
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compress a NUL-terminated string, print the bytes, then restore it
    Zlib {
        /// Text to compress (a NUL terminator is appended)
        #[arg(short, long, default_value = "Hello, zlib compression!")]
        text: String,

        /// fast, default, best, or 0-9
        #[arg(short, long, default_value = "default")]
        level: CompressionLevel,

        /// Size of both the compressed and the uncompressed buffer
        #[arg(short, long, default_value_t = 100)]
        capacity: usize,
    },
}

fn main() -> Result<(), DoczError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Mkjson { pretty } => {
            let module = math_module()?;
            write_document(&module, pretty, &mut out)?;
            module.destroy();
            Ok(())
        }

        Commands::Zlib { text, level, capacity } => {
            tracing::debug!(%level, capacity, "running zlib demo");

            // Keep the terminator so the restored buffer is a complete C string
            let mut input = text.into_bytes();
            input.push(0);
            writeln!(out, "text_len = {}", input.len())?;

            let mut compressed = vec![0u8; capacity];
            let compressed_size = compress(&input, &mut compressed, level)?;
            writeln!(out, "Compressed size: {}", compressed_size)?;

            let bytes: Vec<String> = compressed[..compressed_size]
                .iter()
                .map(|b| b.to_string())
                .collect();
            writeln!(out, "{}", bytes.join(" "))?;

            let mut uncompressed = vec![0u8; capacity];
            let uncompressed_size =
                decompress(&compressed[..compressed_size], &mut uncompressed)?;

            // Stop at the terminator, as printf("%s") would
            let data = uncompressed[..uncompressed_size]
                .split(|&b| b == 0)
                .next()
                .unwrap_or_default();
            writeln!(out, "Uncompressed data: {}", String::from_utf8_lossy(data))?;
            writeln!(out, "Uncompressed size: {}", uncompressed_size)?;
            Ok(())
        }
    }
}
