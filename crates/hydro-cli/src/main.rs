use clap::Parser;

#[derive(Parser)]
#[command(name = "hydro", version, about = "Basin monitoring data toolkit")]
struct Cli {
    #[command(subcommand)]
    command: hydro_cli::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Observability
    hydro_obs::init("hydro-cli");

    // Config
    let cfg = hydro_config::AppConfig::load().unwrap_or_default();

    let cli = Cli::parse();
    hydro_cli::run(cli.command, &cfg).await
}
