use clap::Parser;
use colored::Colorize;

use shortly::cli::Cli;
use shortly::config::{get_config, init_config_from};
use shortly::runtime::modes::{self, Mode};
use shortly::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref());

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let _guard = init_logging(&get_config().logging)?;
            if let Err(e) = modes::run_server().await {
                eprintln!("{} {:#}", "Server error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        Mode::Cli => {
            let Some(cmd) = cli.command else {
                unreachable!("detect_mode returns Cli only for a subcommand")
            };
            if let Err(e) = modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
