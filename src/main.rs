use clap::Parser;

use imoveis_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = imoveis_cli::app::run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
