use clap::Parser;
use client::network::Client;
use log::info;
use shared::DEFAULT_PORT;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short, long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
    server: String,

    /// Mark symbol to play as (prompted when omitted)
    #[arg(short, long)]
    mark: Option<char>,

    /// Display color other players see (prompted when omitted)
    #[arg(short, long)]
    color: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mark = match args.mark {
        Some(mark) => mark,
        None => prompt("Pick a mark symbol (single character): ")?
            .chars()
            .next()
            .ok_or("a mark symbol is required")?,
    };
    let color = match args.color {
        Some(color) => color,
        None => prompt("Pick a display color: ")?,
    };

    info!("Connecting to {}", args.server);
    let mut client = Client::connect(&args.server, mark, color).await?;
    client.run().await?;

    Ok(())
}

/// One blocking line of input before the async connection exists.
fn prompt(question: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", question);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
