use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = pubrelay::cli::Cli::parse();
    if let Err(e) = pubrelay::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
