//! `scenario` - migrate hint documents and page through hints

use std::backtrace::BacktraceStatus;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ArgMatches;
use hints_core::migrate::{migrate_all, migrate_one, FsScenarioLocator, MigrationContext};
use hints_core::navigator::{next_hint, show_hint, show_hints, NavigatorContext};
use hints_core::{OutputSink, ToolConfig, WriterSink, YamlCodec};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    let dev = std::env::var_os(cli::DEV_ENV).is_some();
    let matches = cli::command(dev).get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    setup_logging(level);

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Uncaught panic: {info}");
        tracing::error!("{}", std::backtrace::Backtrace::force_capture());
    }));

    match run(&matches, &WriterSink::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Uncaught error: {err:#}");
            let backtrace = err.backtrace();
            if backtrace.status() == BacktraceStatus::Captured {
                tracing::error!("{backtrace}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Install the fmt subscriber on stderr; `RUST_LOG` wins over `--log-level`
///
/// Hints and notices go through the stdout sink, not through this filter.
fn setup_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(matches: &ArgMatches, sink: &dyn OutputSink) -> Result<()> {
    let Some((name, args)) = matches.subcommand() else {
        return Ok(());
    };
    let config = cli::resolve_config(args)?;
    tracing::debug!(?config, "Resolved configuration");

    match name {
        "migrate" => migrate(args, &config, sink),
        "show-hints" => {
            show_hints(&navigator_context(&config, sink), task(args)?)
                .context("show-hints failed")?;
            Ok(())
        }
        "next-hint" => {
            next_hint(&navigator_context(&config, sink), task(args)?)
                .context("next-hint failed")?;
            Ok(())
        }
        "show-hint" => {
            let index = *args
                .get_one::<usize>("index")
                .context("--index is required")?;
            show_hint(&navigator_context(&config, sink), task(args)?, index)
                .context("show-hint failed")?;
            Ok(())
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
}

fn task(args: &ArgMatches) -> Result<&str> {
    args.get_one::<String>("task")
        .map(String::as_str)
        .context("--task is required")
}

fn navigator_context<'a>(
    config: &'a ToolConfig,
    sink: &'a dyn OutputSink,
) -> NavigatorContext<'a> {
    NavigatorContext {
        codec: &YamlCodec,
        sink,
        tasks_path: &config.tasks_path,
        progress_path: &config.progress_path,
    }
}

fn migrate(args: &ArgMatches, config: &ToolConfig, sink: &dyn OutputSink) -> Result<()> {
    let ctx = MigrationContext {
        codec: &YamlCodec,
        locator: &FsScenarioLocator,
        sink,
    };

    if args.get_flag("all") {
        let report = migrate_all(&ctx, &config.scenarios_root).with_context(|| {
            format!(
                "migration under {} failed",
                config.scenarios_root.display()
            )
        })?;
        sink.info(&format!(
            "Migrated {} scenarios, {} already current",
            report.migrated(),
            report.already_current()
        ));
    } else {
        let name = args
            .get_one::<String>("name")
            .context("either --name or --all is required")?;
        let path = config.scenario_hints_path(name);
        migrate_one(&ctx, &path).with_context(|| format!("migration of {name} failed"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: &str = "\
tasks:
  task1:
    sort-order: 1
    hints:
    - text: Check the pod logs
    - text: Look at the service account
";

    fn run_with(args: &[&str]) -> (Result<()>, String) {
        let matches = cli::command(false)
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        let sink = WriterSink::new(Vec::new());
        let result = run(&matches, &sink);
        (result, String::from_utf8(sink.into_inner()).unwrap())
    }

    #[test]
    fn next_hint_is_printed_when_logging_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = dir.path().join("tasks.yaml");
        let progress = dir.path().join("progress.yaml");
        std::fs::write(&tasks, TASKS).unwrap();

        let (result, out) = run_with(&[
            "scenario",
            "--log-level",
            "warn",
            "next-hint",
            "--task",
            "task1",
            "--tasks-file",
            tasks.to_str().unwrap(),
            "--progress-file",
            progress.to_str().unwrap(),
        ]);

        result.unwrap();
        assert_eq!(out, "Check the pod logs\n");
        assert_eq!(std::fs::read_to_string(&progress).unwrap(), "task1: 0\n");
    }

    #[test]
    fn fatal_error_lists_each_cause_once() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = dir.path().join("missing.yaml");

        let (result, out) = run_with(&[
            "scenario",
            "show-hints",
            "--task",
            "task1",
            "--tasks-file",
            tasks.to_str().unwrap(),
            "--progress-file",
            dir.path().join("progress.yaml").to_str().unwrap(),
        ]);

        let message = format!("{:#}", result.unwrap_err());
        assert!(
            message.starts_with(&format!(
                "show-hints failed: cannot load task document: io error on {}: ",
                tasks.display()
            )),
            "{message}"
        );
        assert_eq!(message.matches("io error on").count(), 1, "{message}");
        assert_eq!(message.matches("os error").count(), 1, "{message}");
        assert!(out.is_empty());
    }
}
