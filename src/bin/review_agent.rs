use clap::Parser;
use std::sync::Arc;
use travel_agents::adapters::http::{bind, review_routes, serve};
use travel_agents::core::prompt::ReviewPrompt;
use travel_agents::utils::error::ErrorSeverity;
use travel_agents::utils::{logger, validation::Validate};
use travel_agents::{ChatCompletionsGateway, ReviewService, ServiceArgs, ServiceSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServiceArgs::parse();

    // 初始化日誌
    logger::init_service_logger(args.verbose, args.json_logs);

    tracing::info!("🚀 Starting review agent");

    let settings = match ServiceSettings::review_defaults().load(args.config.as_deref(), args.bind) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "✅ Using model {} at {}",
        settings.gateway.model,
        settings.gateway.base_url
    );

    let prompt = settings
        .prompt
        .clone()
        .map(ReviewPrompt::new)
        .unwrap_or_default();
    let gateway = ChatCompletionsGateway::new(settings.gateway.clone());
    let service = Arc::new(ReviewService::new(gateway, prompt));

    let result = match bind(&settings.bind).await {
        Ok(listener) => serve(listener, review_routes(service)).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Review agent stopped: {} (Category: {:?}, Severity: {:?})",
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
        std::process::exit(exit_code);
    }

    Ok(())
}
