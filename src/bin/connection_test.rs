//! Asks every provider the same question to check credentials and connectivity.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tri_llm::{GenerateOptions, Message, ProviderConfig, ProviderKind};

#[derive(Debug, Parser)]
#[command(about = "Check connectivity to each configured LLM provider")]
struct Args {
    /// Providers to query, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "gemini,openai,claude")]
    providers: Vec<ProviderKind>,

    /// Question sent to every provider.
    #[arg(long, default_value = "What is the capital of Gujarat, India?")]
    question: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let messages = [Message::user(args.question.as_str())];
    println!("Starting LLM provider connection tests...");

    for kind in args.providers {
        let provider = kind
            .create(ProviderConfig::default())
            .with_context(|| format!("failed to create {kind} provider"))?;
        let reply = provider
            .generate_response(&messages, GenerateOptions::default())
            .await
            .with_context(|| format!("{kind} request failed"))?;
        println!("{kind} ({}) response: {reply}", provider.model_name());
    }

    println!("=== Test Complete ===");
    Ok(())
}
