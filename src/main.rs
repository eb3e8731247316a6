use clap::Parser;
use std::process::ExitCode;
use strawpoll::browser::SystemOpener;
use strawpoll::cli::{self, Cli, Command};
use strawpoll::logging;
use strawpoll::polls::PollClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli::resolve_config(&cli.global)?;
    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Get { id, percent, json } => {
            let client = PollClient::from_config(&config.client)?;
            cli::handle_get(&client, &id, percent, json).await
        }
        Command::Create {
            title,
            options,
            single,
            strict,
            captcha,
            dupcheck,
            json,
        } => {
            let client = PollClient::from_config(&config.client)?;
            let request = cli::create_request(title, options, single, strict, captcha, dupcheck);
            cli::handle_create(&client, &request, json).await
        }
        Command::Open { id, results } => cli::handle_open(&SystemOpener, &id, results),
        Command::Version => {
            cli::handle_version();
            Ok(())
        }
    }
}
