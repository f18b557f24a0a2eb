use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vnd_symbol_client::{decode_description, encode_description, TransactionDescription};

#[derive(Parser)]
#[command(name = "vnd-symbol", about = "Build and inspect Symbol transaction payloads")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON transaction description into wire bytes.
    Encode {
        /// Path to the description document.
        description: PathBuf,

        /// Also write the raw bytes to this file.
        #[arg(long)]
        raw: Option<PathBuf>,
    },
    /// Decode wire bytes back into a JSON transaction description.
    Decode {
        /// Hex-encoded wire bytes.
        #[arg(long)]
        hex: Option<String>,

        /// Path to a file holding the raw wire bytes.
        #[arg(long)]
        raw: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "debug")]
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Encode { description, raw } => {
            let text = std::fs::read_to_string(&description)?;
            let description = TransactionDescription::from_json(&text)?;
            let bytes = encode_description(&description)?;
            log::debug!("encoded {} bytes", bytes.len());
            if let Some(path) = raw {
                std::fs::write(&path, &bytes)?;
            }
            println!("{}", hex::encode(&bytes));
        }
        Command::Decode { hex, raw } => {
            let bytes = match (hex, raw) {
                (Some(hex), None) => hex::decode(hex.trim())?,
                (None, Some(path)) => std::fs::read(&path)?,
                _ => return Err("pass exactly one of --hex or --raw".into()),
            };
            let description = decode_description(&bytes)?;
            println!("{}", description.to_json_pretty()?);
        }
    }
    Ok(())
}
