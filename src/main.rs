//! CivitAI Downloader - CLI entry point.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use civitai_downloader::{
    api::CivitaiApi,
    cli::Args,
    config::{can_prompt, prompt_for_config, validate_config, Config},
    download::process_parents,
    error::{exit_codes, Error, Result},
    fs::ensure_dir,
    logging::init_logging,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_summary,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tokio::select! {
        result = run(args) => match result {
            Ok(true) => ExitCode::from(exit_codes::SUCCESS),
            Ok(false) => ExitCode::from(exit_codes::FAILURE),
            Err(e) => {
                tracing::error!("{}", e);
                print_error(&format!("{}", e));
                if e.is_config_error() {
                    print_info("Check the configuration file (see --config) or pass --api-key");
                }
                ExitCode::from(exit_codes::FAILURE)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Download interrupted by user");
            print_warning("Download interrupted by user");
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

/// Run the downloader; `Ok(false)` when at least one parent failed.
async fn run(args: Args) -> Result<bool> {
    let config_path = args.config_path();
    let config = load_config(&args, &config_path)?;

    init_logging(&config);
    print_banner();
    tracing::info!("Starting CivitAI Downloader");
    tracing::debug!("Using config file: {}", config_path.display());

    validate_config(&config)?;
    let targets = args.parents();
    let options = args.run_options();

    ensure_dir(&config.download_dir)?;

    let labels: Vec<String> = targets
        .iter()
        .map(|target| match target {
            Ok(parent) => parent.to_string(),
            Err(Error::InvalidId { kind, input }) => format!("{} '{}' (invalid)", kind, input),
            Err(e) => e.to_string(),
        })
        .collect();
    print_config_summary(
        &labels,
        &config.download_dir.display().to_string(),
        options.dry_run,
        !options.skip_metadata,
    );
    tracing::debug!("Using API key: {}", config.masked_api_key());

    let api = CivitaiApi::new(&config)?;
    let started = Instant::now();
    let summary = process_parents(&api, &config, targets, options).await;

    let elapsed = started.elapsed();
    tracing::info!("Download completed in {:.2} seconds", elapsed.as_secs_f64());
    print_run_summary(&summary, elapsed);

    Ok(summary.all_succeeded())
}

/// Load the config file, prompting on first run, then apply CLI overrides.
fn load_config(args: &Args, path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        Config::load(path)?
    } else {
        Config::default()
    };

    let needs_key = config.api_key.trim().is_empty() && args.api_key.is_none();
    if needs_key {
        if !can_prompt() {
            return Err(Error::MissingConfig(format!(
                "api_key (set it in {} or via CIVITAI_API_KEY)",
                path.display()
            )));
        }
        if !path.exists() {
            print_info("No configuration file found. Setting up initial configuration...");
        }
        prompt_for_config(&mut config)?;
        config.save(path)?;
        print_success(&format!("Configuration saved to {}", path.display()));
    }

    args.merge_into_config(&mut config);
    Ok(config)
}
