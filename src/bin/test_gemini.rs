use anyhow::Result;
use leader_power::catalog::Catalog;
use leader_power::clients::GeminiClient;
use leader_power::config::Config;
use leader_power::report::{ReportOutcome, request_report};
use leader_power::scoring::{ScoreState, category_totals};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("leader_power=debug")
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(None)?;
    let client = GeminiClient::from_config(&config);
    if !client.has_api_key() {
        anyhow::bail!("GEMINI_API_KEY is not set");
    }

    let catalog = Catalog::builtin();
    let totals = category_totals(&ScoreState::new(catalog), catalog);
    let prompt = leader_power::report::build_prompt(&totals, catalog);

    let outcome = request_report(&client, &prompt, &config.report.generation_params()).await;
    match &outcome {
        ReportOutcome::Generated(_) => println!("status: generated"),
        ReportOutcome::Empty => println!("status: empty"),
        ReportOutcome::Unavailable => println!("status: unavailable (see stderr)"),
    }
    println!("{}", outcome.text());

    Ok(())
}
