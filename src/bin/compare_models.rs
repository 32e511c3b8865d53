//! Has a random model pose a question, lets every model answer it, then asks a
//! random judge to rank the answers.

use anyhow::{Context, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tri_llm::{GenerateOptions, Message, ProviderConfig, ProviderKind};

const QUESTION_PROMPT: &str = "Please come up with a challenging, nuanced question that I can ask \
a number of LLMs to evaluate their intelligence. Answer only with the question, no explanation.";

#[derive(Debug, Parser)]
#[command(about = "Let several LLMs answer the same question and rank each other")]
struct Args {
    /// Competing providers, comma separated. Competitor numbers follow this order.
    #[arg(long, value_delimiter = ',', default_value = "gemini,openai,claude")]
    models: Vec<ProviderKind>,

    /// Seed for picking the question author and the judge.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Ranking {
    results: Vec<Value>,
}

/// Sends a single user turn to a fresh provider of `kind`.
async fn ask(kind: ProviderKind, content: &str) -> anyhow::Result<String> {
    let provider = kind
        .create(ProviderConfig::default())
        .with_context(|| format!("failed to create {kind} provider"))?;
    info!(provider = %kind, model = provider.model_name(), "asking");
    provider
        .generate_response(&[Message::user(content)], GenerateOptions::default())
        .await
        .with_context(|| format!("{kind} request failed"))
}

fn judge_prompt(question: &str, answers: &[String]) -> anyhow::Result<String> {
    let count = answers.len();
    let answers = serde_json::to_string(answers)?;
    Ok(format!(
        "You are judging a competition between {count} competitors.\n\
         Each model has been given this question:\n\n\
         {question}\n\n\
         Your job is to evaluate each response for clarity and strength of argument, \
         and rank them in order of best to worst.\n\
         Respond with JSON, and only JSON, with the following format:\n\
         {{\"results\": [\"best competitor number\", \"second best competitor number\", \"third best competitor number\", ...]}}\n\n\
         Here are the responses from each competitor as a JSON list, in competitor order:\n\n\
         {answers}\n\n\
         Now respond with the JSON with the ranked order of the competitors, nothing else. \
         Do not include markdown formatting or code blocks.",
    ))
}

/// Parses the judge's reply into zero-based competitor indices, best first.
fn parse_ranking(reply: &str, competitors: usize) -> anyhow::Result<Vec<usize>> {
    let trimmed = reply.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    let ranking: Ranking =
        serde_json::from_str(trimmed.trim()).context("judge did not reply with a JSON ranking")?;

    ranking
        .results
        .iter()
        .map(|entry| {
            let number = match entry {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            };
            match number {
                Some(n) if n >= 1 && (n as usize) <= competitors => Ok(n as usize - 1),
                _ => bail!("invalid competitor number in ranking: {entry}"),
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.models.is_empty() {
        bail!("at least one model is required");
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let author = *args.models.choose(&mut rng).context("no models")?;
    println!("Random model picked to write the question: {author}\n");
    let question = ask(author, QUESTION_PROMPT).await?;
    println!("Question for evaluation:\n{question}");

    let mut answers = Vec::with_capacity(args.models.len());
    for &kind in &args.models {
        answers.push(ask(kind, &question).await?);
    }
    for (kind, answer) in args.models.iter().zip(&answers) {
        println!("\n\nResponse from {kind}:\n{answer}");
    }

    let judge = *args.models.choose(&mut rng).context("no models")?;
    println!("\nRandom model picked to judge: {judge}\n");
    let reply = ask(judge, &judge_prompt(&question, &answers)?).await?;

    for (rank, index) in parse_ranking(&reply, args.models.len())?.into_iter().enumerate() {
        println!("Rank {}: {}", rank + 1, args.models[index]);
    }
    Ok(())
}
