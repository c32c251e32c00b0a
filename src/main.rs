use clap::Parser;
use travel_agents::core::orchestrator::DEFAULT_PLAN;
use travel_agents::utils::{logger, validation::Validate};
use travel_agents::{render_report, ClientArgs, OrchestratorClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting travel-agents client");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 驗證配置
    if let Err(e) = args.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let plan = match &args.plan_file {
        Some(path) => match tokio::fs::read_to_string(path).await {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("❌ Failed to read plan file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is readable");
                std::process::exit(1);
            }
        },
        None => DEFAULT_PLAN.to_string(),
    };

    let (budget, days) = (args.budget, args.days);
    let client = OrchestratorClient::new(args);

    // 服務失敗時會換成替代結果，這裡一定有東西可以印
    let report = client.run(&plan, budget, days).await;

    if report.review_degraded || report.optimization_degraded {
        tracing::warn!("⚠️ Some steps used placeholder results");
    }

    print!("{}", render_report(&report));
    Ok(())
}
