//! Qscreen: Q-Chat-10 toddler screening scorer.
//!
//! Main entry point: loads the trained model, scores one session read
//! from a JSON responses document, and prints the outcome as JSON for the
//! presentation collaborator.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qscreen::adapters::load_model;
use qscreen::domain::Screening;
use qscreen::{ScreeningService, SurveyResponses};

fn main() -> Result<()> {
    // Initialize logging. Logs go to stderr so stdout stays clean for the
    // outcome document.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let model_path = std::env::var("QSCREEN_MODEL")
        .unwrap_or_else(|_| "models/qchat_model.json".to_string());
    let model = load_model(Path::new(&model_path))
        .with_context(|| format!("Error loading model from {model_path}"))?;

    let service = ScreeningService::new(Arc::new(model));

    // Responses come from the file named by the first argument, or stdin.
    let responses: SurveyResponses = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Error reading responses from {path}"))?;
            serde_json::from_str(&content).context("Invalid responses document")?
        }
        None => serde_json::from_reader(std::io::stdin()).context("Invalid responses document")?,
    };

    let screening = Screening::new(service.screen(&responses));
    println!("{}", serde_json::to_string_pretty(&screening)?);

    Ok(())
}
