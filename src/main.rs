use clap::Parser;
use job_salary_stats::core::report::{render_json, render_table};
use job_salary_stats::utils::error::ErrorSeverity;
use job_salary_stats::utils::logger;
use job_salary_stats::{CliConfig, OutputFormat, StatsEngine, StatsError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Values from a local .env file never override the real environment.
    let dotenv_path = dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    match cli.format {
        OutputFormat::Table => logger::init_cli_logger(cli.verbose),
        OutputFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting job-salary-stats");
    if let Some(path) = &dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let engine = match cli.to_app_config().and_then(StatsEngine::new) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };

    match cli.format {
        OutputFormat::Table => {
            // Each table is printed as soon as its service is done.
            for service in engine.services() {
                match engine.collect(*service).await {
                    Ok(report) => println!("{}", render_table(&report)),
                    Err(e) => fail(&e),
                }
            }
        }
        OutputFormat::Json => match engine.run().await {
            Ok(reports) => match render_json(&reports) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&e),
            },
            Err(e) => fail(&e),
        },
    }

    tracing::info!("✅ Statistics collected");
    Ok(())
}

fn fail(e: &StatsError) -> ! {
    tracing::error!(
        "❌ Collection failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
