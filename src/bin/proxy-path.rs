use clap::{Parser, Subcommand};
use std::process::ExitCode;

use cors_proxy::{decode, encode, PROXY_PREFIX};

#[derive(Parser)]
#[command(name = "proxy-path")]
#[command(about = "Build and inspect /cors-proxy/ paths", long_about = None)]
struct Cli {
    /// Prefix printed paths with this origin (e.g. http://localhost:9000)
    #[arg(short, long)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a remote URL into a proxied path
    Encode { url: String },
    /// Show the destination a proxied path resolves to
    Decode { path: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { url } => {
            let path = encode(&url);
            match cli.origin {
                Some(origin) => println!("{}{}", origin.trim_end_matches('/'), path),
                None => println!("{}", path),
            }
            ExitCode::SUCCESS
        }
        Commands::Decode { path } => {
            // Accept full URLs pasted from the browser as well as bare paths.
            let target = path
                .find(PROXY_PREFIX)
                .map(|i| &path[i..])
                .unwrap_or(&path);
            match decode(target) {
                Ok(url) => {
                    println!("{}", url);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
