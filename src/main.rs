use clap::Parser;
use conecta_funerarias::config::cli::{Command, RutCommand, SendArgs};
use conecta_funerarias::core::rut;
use conecta_funerarias::utils::{logger, validation::Validate};
use conecta_funerarias::{BatchMailer, CliConfig, ConectaError, SendOutcome, TomlConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    let outcome = match config.command {
        Command::Rut(action) => {
            run_rut(action);
            Ok(())
        }
        Command::Send(args) => run_send(args).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run_rut(action: RutCommand) {
    match action {
        RutCommand::Validate { rut: input } => {
            if rut::validate(&input) {
                println!("✅ {} is valid", rut::format(&input));
            } else {
                println!("❌ {} is not a valid RUT", input);
                std::process::exit(1);
            }
        }
        RutCommand::Format { rut: input } => println!("{}", rut::format(&input)),
        RutCommand::Clean { rut: input } => println!("{}", rut::clean(&input)),
        RutCommand::Check { digits } => println!("{}", rut::compute_check(digits)),
    }
}

async fn run_send(args: SendArgs) -> Result<(), ConectaError> {
    args.validate()?;

    let recipients = args.read_recipients()?;
    let html = args.read_html()?;

    let mailer = match &args.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            tracing::info!("📄 Using provider settings from {}", path);
            BatchMailer::from_config(&file_config)?
        }
        None => BatchMailer::from_config(&args)?,
    };

    let report = mailer.send_batch(&recipients, &args.subject, &html).await?;

    println!(
        "📧 {} sent, {} failed ({} batches)",
        report.sent, report.failed, report.batches
    );
    for failure in report.failures() {
        if let SendOutcome::Failure { error } = &failure.outcome {
            println!("   ✗ {}: {}", failure.recipient, error);
        }
    }

    Ok(())
}
