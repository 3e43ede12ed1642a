//! Serve command - run the HTTP service.

use analyst::Analyst;
use colored::Colorize;
use tracing::info;

use crate::cli::LlmProviderChoice;
use crate::config::Settings;
use crate::server::{app, state::AppState};

use super::build_provider;

pub fn run(
    mut settings: Settings,
    host: String,
    port: u16,
    llm: Option<LlmProviderChoice>,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(llm) = llm {
        settings.llm = llm;
    }
    if model.is_some() {
        settings.llm_model = model;
    }

    let mut analyst = Analyst::new();
    if let Some(provider) = build_provider(
        settings.llm,
        settings.llm_model.clone(),
        settings.llm_timeout_secs,
    )? {
        analyst = analyst.with_shared_llm(provider);
    }

    info!(
        environment = %settings.environment,
        llm = %settings.llm,
        max_datasets = settings.max_datasets,
        "starting service"
    );

    println!();
    println!(
        "{} {}",
        "Starting analyst service at".cyan().bold(),
        format!("http://{}:{}", host, port).white().bold()
    );
    println!();
    println!("  Environment: {}", settings.environment);
    println!("  Suggestions: {}", analyst.llm_name().unwrap_or("rules only"));
    println!("  CORS:        {}", settings.cors_origins.join(", "));
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());

    let state = AppState::new(analyst, settings);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
