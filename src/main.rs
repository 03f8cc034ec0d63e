//! texfast CLI - fast LaTeX compilation with a precompiled preamble
//!
//! Usage: texfast [OPTIONS] FILE[.tex]
//!
//! Splits the source into preamble and body, dumps the preamble into a
//! format once, then recompiles only the body each time the source changes.

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

mod cli;
mod ui;

use cli::Cli;
use texfast::application::{cleanup, BuildCoordinator, ChangeDispatcher, Session, WatchUseCase};
use texfast::config::Config;
use texfast::domain::ports::{EventSink, PipelineEvent, ProcessRunner};
use texfast::domain::value_objects::Distro;
use texfast::infrastructure::{probe_version, JsonEventSink, LocalFs, SystemProcessRunner};
use texfast::TexfastError;
use ui::console::ConsoleEventSink;
use ui::terminal::detect_capabilities;
use ui::views::config_warning::render_config_warning;
use ui::views::version::render_version;

static TRACING_INIT: Once = Once::new();

/// Developer diagnostics, only when `TEXFAST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("TEXFAST_LOG").is_ok() {
            let filter = EnvFilter::from_env("TEXFAST_LOG");
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let source_dir = cli
        .file
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (config, warnings) = Config::load_layered(source_dir, cli.config.as_deref())?;
    let config = cli.apply_to(config);
    let runner = Arc::new(SystemProcessRunner::new());

    if cli.version {
        let banner = probe_version(runner.as_ref(), &config.compiler_program());
        let distro = banner
            .as_deref()
            .map(Distro::from_version_line)
            .unwrap_or_default();
        print!(
            "{}",
            render_version(env!("CARGO_PKG_VERSION"), distro, banner.as_deref())
        );
        return Ok(ExitCode::SUCCESS);
    }

    let file = cli
        .file
        .clone()
        .ok_or_else(|| TexfastError::config("missing source file, see --help"))?;

    let sink: Arc<dyn EventSink> = if cli.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(
            config.info,
            detect_capabilities().supports_color,
        ))
    };
    for warning in &warnings {
        sink.on_event(PipelineEvent::warning(render_config_warning(warning)));
    }

    let compiler = config.compiler_program();
    let banner = probe_version(runner.as_ref(), &compiler).ok_or_else(|| {
        TexfastError::config(format!(
            "can't find {} (is a TeX distribution installed?)",
            compiler.display()
        ))
    })?;
    let distro = Distro::from_version_line(&banner);
    if distro == Distro::Unknown {
        sink.on_event(PipelineEvent::warning(format!(
            "Unknown {} version: {banner}",
            compiler.display()
        )));
    }
    tracing::debug!(%distro, banner = %banner, "compiler detected");

    let session = Arc::new(Session::new(config, &file, distro)?);
    let config = session.config();
    let coordinator = Arc::new(BuildCoordinator::new(
        Arc::clone(&session),
        Arc::clone(&runner),
        LocalFs::new(),
        Arc::clone(&sink),
    ));

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        let runner = Arc::clone(&runner);
        let kill = config.watch.kill_on_exit;
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            if kill {
                runner.terminate();
            }
        })
        .context("Error setting Ctrl+C handler")?;
    }

    let mut failed = false;
    if let Err(err) = coordinator.startup(config.compiles_at_start, &running) {
        sink.on_event(PipelineEvent::error(err.to_string()));
        // Ctrl+C during startup is a shutdown, not a failure.
        failed = running.load(Ordering::SeqCst) && err.fatal_before_watch();
    }

    if !failed && config.watch.enabled && running.load(Ordering::SeqCst) {
        let dispatcher = ChangeDispatcher::new(
            Arc::clone(&coordinator),
            Arc::clone(&sink),
            Duration::from_millis(config.watch.debounce_ms),
        );
        let watch = WatchUseCase::new(&session.names().source_path());
        let result = watch.start(Arc::clone(&running), &dispatcher, sink.as_ref());
        dispatcher.shutdown(config.watch.kill_on_exit);
        if let Err(err) = result {
            sink.on_event(PipelineEvent::error(err.to_string()));
            failed = true;
        }
    }

    cleanup(&session, &LocalFs::new(), sink.as_ref());

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
