use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use oralscan::config::{Cli, Command, ModelArgs, PredictArgs, ServeArgs};
use oralscan::server::{self, AppState};
use oralscan::Classifier;

fn load_classifier(args: &ModelArgs) -> anyhow::Result<Classifier> {
    let start_time = Instant::now();
    let manager = args.model_manager();
    let model_path = manager
        .ensure_model_ready(args.model_sha256.as_deref())
        .context("Model artifact is not usable")?;

    info!("Building classifier...");
    let classifier = Classifier::builder()
        .with_runtime_config(args.runtime_config())
        .with_model(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?
        .build()?;

    let info = classifier.info();
    info!(
        "=== Classifier ready: {} classes {:?} (took {:.2?}) ===",
        info.num_classes,
        info.class_labels,
        start_time.elapsed()
    );
    Ok(classifier)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let classifier = Arc::new(load_classifier(&args.model)?);
    let addr = args.bind_address();
    server::serve(AppState::new(classifier), &addr, args.max_body_bytes)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}

fn run_predict(args: PredictArgs) -> anyhow::Result<()> {
    let classifier = load_classifier(&args.model)?;

    let start_time = Instant::now();
    let prediction = classifier
        .classify_file(&args.image)
        .with_context(|| format!("Failed to process image {}", args.image.display()))?;
    info!("Classification took {:.2?}", start_time.elapsed());

    println!("Predicted class: {}", prediction.label);
    println!("Confidence: {:.4}", prediction.confidence);
    println!("Class probabilities:");
    for (label, probability) in classifier.labels.iter().zip(&prediction.probabilities) {
        println!("  {}: {:.1}%", label, probability * 100.0);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    oralscan::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_server(args).await,
        Command::Predict(args) => tokio::task::spawn_blocking(move || run_predict(args)).await?,
    }
}
