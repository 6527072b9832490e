#![allow(unused_imports)]
use anyhow::Result;
use leader_power::clients::traits::ReportModel;
use leader_power::clients::{GeminiClient, GenerationParams};

#[tokio::test]
#[cfg(feature = "live_gemini")]
async fn test_gemini_client_generate() -> Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt::try_init();

    if std::env::var("RUN_GEMINI_TESTS").is_err() {
        eprintln!("Skipping Gemini integration test - set RUN_GEMINI_TESTS=1 to run");
        return Ok(());
    }

    let client = GeminiClient::from_env();
    let params = GenerationParams {
        max_output_tokens: 64,
        thinking_budget: None,
        ..GenerationParams::default()
    };
    let text = client
        .generate("Give me a one-word answer. The word should be 'test'.", &params)
        .await?;

    assert!(text.to_lowercase().contains("test"));
    println!("Response: {}", text);

    Ok(())
}
