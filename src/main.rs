use clap::Parser;
use fight_station_translator::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let service = cli::bootstrap(cli.locale)?;

    match cli.command {
        Command::Translate(args) => cli::translate::run(&service, args).await,
        Command::Batch(args) => cli::translate::run_batch(&service, args).await,
        Command::Detect(args) => cli::detect::run(&service, args).await,
        Command::Needs(args) => cli::detect::run_needs(&service, args).await,
        Command::ClearCache => cli::cache::run_clear(&service).await,
        Command::Stats => cli::cache::run_stats(&service).await,
    }
}
