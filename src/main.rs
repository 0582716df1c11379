use clap::Parser;
use prodrec::app::{commands::run_command, console};
use prodrec::config::cli::Command;
use prodrec::utils::error::{ClientError, ErrorSeverity};
use prodrec::utils::{logger, validation::Validate};
use prodrec::{ApiClient, AppShell, CliConfig};
use tokio::io::BufReader;

fn exit_with(e: &ClientError) -> ! {
    tracing::error!(
        "❌ {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(3);
        }
    };
    let settings = cli.settings(file.as_ref());

    if cli.log_json || settings.json_logs {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }

    tracing::info!("Starting prodrec");
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = cli.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let client = match ApiClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };

    match cli.command.as_ref().unwrap_or(&Command::Shell) {
        Command::Shell => {
            let mut shell = AppShell::new(client);
            let mut stdout = tokio::io::stdout();
            if let Err(e) = console::run(&mut shell, BufReader::new(tokio::io::stdin()), &mut stdout).await {
                exit_with(&e);
            }
        }
        command => match run_command(&client, command).await {
            Ok(output) => print!("{}", output),
            Err(e) => exit_with(&e),
        },
    }

    Ok(())
}
