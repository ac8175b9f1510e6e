use clap::Parser;
use student_records::utils::error::ErrorSeverity;
use student_records::utils::{logger, validation::Validate};
use student_records::{CliConfig, JsonDocumentStore, LocalStorage, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting student-records");
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.base_path());
    let mut session = Session::new(JsonDocumentStore::new(storage));

    if let Some(data_file) = config.data_file() {
        match session.open(data_file).await {
            Ok(text) => println!("{}", text),
            Err(e) => {
                tracing::warn!("Could not open {}: {}", data_file, e);
                println!("{}", e.user_friendly_message());
            }
        }
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    if let Err(e) = session.run(stdin, &mut stdout, config.prompt()).await {
        tracing::error!(
            "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
