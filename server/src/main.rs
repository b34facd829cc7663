use clap::Parser;
use log::{info, LevelFilter};
use server::recovery::RecoveryController;
use shared::DEFAULT_PORT;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the listening socket to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of players a session waits for before play starts
    #[arg(short = 'n', long, default_value = "2")]
    players: usize,

    /// Enable debug-level diagnostics (RUST_LOG overrides this)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if args.players < 2 {
        return Err("a session needs at least 2 players".into());
    }

    let address = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&address).await?;
    info!(
        "Server listening on {} for {}-player sessions",
        address, args.players
    );

    RecoveryController::new(listener, args.players)
        .run_forever()
        .await;

    Ok(())
}
