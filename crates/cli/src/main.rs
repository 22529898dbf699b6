mod args;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fileconv_core::{
    create_report_system, load_config_or_default, validate_config, Config, ConversionRegistry,
    ConversionWorker, ConverterKind, ConverterSet, Extension,
    FileSessionReporter, SessionReporter, StagingArea, WorkerEvent,
};

use args::Args;
use ui::Progress;

/// Buffer size for the session report channel
const REPORT_BUFFER_SIZE: usize = 64;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        eprintln!("{} {:#}", console::style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Runs a blocking prompt off the async worker threads.
async fn prompt<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(f)
        .await
        .context("Prompt task failed")?;
    Ok(answer?)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; quiet by default so it does not fight the progress bar
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_settings(&args)?;
    info!("Session logs go to {:?}", config.log.dir);

    // An inconsistent built-in table is a programming error; refuse to start
    let registry = Arc::new(
        ConversionRegistry::with_defaults().context("Invalid built-in conversion table")?,
    );

    let staging = stage_files(&args, &config).await?;
    let Some(media_type) = staging.media_type() else {
        bail!("No files to convert");
    };

    let target = choose_target(&args, &registry, &staging).await?;

    let converters = Arc::new(ConverterSet::new(config.converter.clone()));
    let converter = converters.get(ConverterKind::for_media_type(media_type));
    if let Err(e) = converter.validate().await {
        warn!("{} is not ready: {}", converter.name(), e);
        eprintln!("{} {}", console::style("⚠").yellow(), e);
    }

    // Session log
    let reporter = Arc::new(FileSessionReporter::new(&config.log.dir));
    let log_path = reporter.log_path().to_path_buf();
    let (report_handle, report_writer) = create_report_system(
        Arc::clone(&reporter) as Arc<dyn SessionReporter>,
        REPORT_BUFFER_SIZE,
    );
    let writer_handle = tokio::spawn(report_writer.run());

    let total = staging.len();
    let mut handle = ConversionWorker::new(Arc::clone(&registry), converters)
        .with_report(report_handle.clone())
        .with_event_buffer(config.ui.event_buffer)
        .start(staging.into_files(), target.clone());

    let progress = Progress::new(total, &target);

    let canceller = handle.canceller();
    let ctrl_c_progress = progress.clone();
    let ctrl_c = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            ctrl_c_progress.println("Cancelling after the current file...");
            canceller.cancel();
        }
    });

    let fixed_decision = config.ui.decision_policy.fixed_decision();

    while let Some(event) = handle.next_event().await {
        match event {
            WorkerEvent::Started { total, .. } => debug!("Worker started with {} file(s)", total),
            WorkerEvent::ItemStarted { path, .. } => progress.item_started(&path),
            WorkerEvent::Warning { message, .. } => progress.warning(&message),
            WorkerEvent::DecisionRequired(request) => {
                if let Some(decision) = fixed_decision {
                    request.respond(decision);
                    continue;
                }
                let asking = progress.clone();
                let answer = tokio::task::spawn_blocking(move || {
                    let answer = asking.ask(&request);
                    (request, answer)
                })
                .await
                .context("Prompt task failed")?;
                match answer {
                    (request, Ok(decision)) => {
                        request.respond(decision);
                    }
                    (_request, Err(e)) => {
                        // Cancel first so the dropped request is not read as keep
                        warn!("Prompt aborted: {}", e);
                        handle.cancel();
                    }
                }
            }
            WorkerEvent::ItemFinished { path, outcome, .. } => {
                progress.item_finished(&path, &outcome)
            }
            WorkerEvent::Finished { summary } => {
                progress.finish();
                println!();
                println!("{}", ui::summary_line(&summary));
            }
        }
    }

    let summary = handle.wait().await.context("Conversion worker failed")?;
    ctrl_c.abort();
    info!("Session finished: {}", summary);

    // Drop every report handle so the writer drains and exits
    drop(report_handle);
    if let Err(e) = writer_handle.await {
        error!("Report writer task failed: {}", e);
    }

    if log_path.exists() {
        println!("Log saved to: {}", log_path.display());
    }

    Ok(())
}

/// Config file plus command-line overrides.
fn load_settings(args: &Args) -> Result<Config> {
    let mut config = load_config_or_default(args.config.as_deref()).with_context(|| {
        format!(
            "Failed to load config from {:?}",
            args.config.as_deref().unwrap_or(Path::new("<defaults>"))
        )
    })?;

    if let Some(dir) = &args.log_dir {
        config.log.dir = dir.clone();
    }
    if let Some(policy) = args.decision_policy() {
        config.ui.decision_policy = policy;
    }

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

/// Stages command-line files and lets the user pick from listed directories.
async fn stage_files(args: &Args, config: &Config) -> Result<StagingArea> {
    let inputs: Vec<PathBuf> = if args.paths.is_empty() {
        let start = match &config.ui.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };
        vec![start]
    } else {
        args.paths.clone()
    };

    let mut staging = StagingArea::new().with_output_dir(config.converter.output_dir.clone());
    for input in inputs {
        let picked = if input.is_dir() {
            let candidates = ui::list_directory(&input, config.ui.show_hidden)
                .with_context(|| format!("Failed to list {}", input.display()))?;
            if candidates.is_empty() {
                ui::print_rejected(&input, &"no files in directory");
                continue;
            }
            let dir = input.clone();
            prompt(move || ui::pick_files(&dir, &candidates)).await?
        } else {
            vec![input]
        };

        for path in picked {
            if let Err(e) = staging.stage(&path) {
                ui::print_rejected(&path, &e);
            }
        }
    }

    Ok(staging)
}

/// Target from `--target`, or asked among the targets the staged files share.
async fn choose_target(
    args: &Args,
    registry: &ConversionRegistry,
    staging: &StagingArea,
) -> Result<Extension> {
    let sources = staging.extensions();
    let targets = registry.valid_targets_for_all(&sources);

    if let Some(target) = &args.target {
        let target = Extension::new(target);
        if !targets.contains(&target) {
            let offered: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
            bail!(
                "Cannot convert the selected files to .{} (available: {})",
                target,
                if offered.is_empty() {
                    "none".to_string()
                } else {
                    offered.join(", ")
                }
            );
        }
        return Ok(target);
    }

    if targets.is_empty() {
        let names: Vec<String> = sources.iter().map(|s| format!(".{}", s)).collect();
        bail!("No conversions available for {}", names.join(", "));
    }

    prompt(move || ui::pick_target(&targets)).await
}
