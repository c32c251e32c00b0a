use clap::Parser;
use std::sync::Arc;
use travel_agents::adapters::http::{bind, optimization_routes, serve};
use travel_agents::core::prompt::OptimizationPrompt;
use travel_agents::utils::error::ErrorSeverity;
use travel_agents::utils::{logger, validation::Validate};
use travel_agents::{ChatCompletionsGateway, OptimizationService, ServiceArgs, ServiceSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServiceArgs::parse();

    // 初始化日誌
    logger::init_service_logger(args.verbose, args.json_logs);

    tracing::info!("🚀 Starting optimization agent");

    let settings = match ServiceSettings::optimization_defaults().load(args.config.as_deref(), args.bind) {
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
        "✅ Using model {} at {} (temperature {:?})",
        settings.gateway.model,
        settings.gateway.base_url,
        settings.gateway.temperature
    );

    let prompt = settings
        .prompt
        .clone()
        .map(OptimizationPrompt::new)
        .unwrap_or_default();
    let gateway = ChatCompletionsGateway::new(settings.gateway.clone());
    let service = Arc::new(OptimizationService::new(gateway, prompt));

    let result = match bind(&settings.bind).await {
        Ok(listener) => serve(listener, optimization_routes(service)).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Optimization agent stopped: {} (Category: {:?}, Severity: {:?})",
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
