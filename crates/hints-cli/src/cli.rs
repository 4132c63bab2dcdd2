//! Command-line surface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use hints_core::ToolConfig;

/// Set to show developer commands in help output
pub(crate) const DEV_ENV: &str = "SCENARIO_TOOL_DEV";

fn task_arg() -> Arg {
    Arg::new("task")
        .long("task")
        .short('t')
        .required(true)
        .value_name("TASK")
        .help("The task to show hints for")
}

/// Build the `scenario` command
///
/// `migrate` is hidden from help unless `dev` is set; it is always accepted.
pub(crate) fn command(dev: bool) -> Command {
    Command::new("scenario")
        .version(hints_core::VERSION)
        .about("Helper to interact with the current scenario")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .env("SCENARIO_TOOL_CONFIG")
                .value_parser(value_parser!(PathBuf))
                .help("YAML file with tool settings"),
        )
        .arg(
            Arg::new("tasks-file")
                .long("tasks-file")
                .global(true)
                .env("SCENARIO_TASKS_FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Task document of the running scenario"),
        )
        .arg(
            Arg::new("progress-file")
                .long("progress-file")
                .global(true)
                .env("SCENARIO_PROGRESS_FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Where hint progress is stored"),
        )
        .arg(
            Arg::new("scenarios-dir")
                .long("scenarios-dir")
                .global(true)
                .env("SCENARIOS_DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding one subdirectory per scenario"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .help("Log level when RUST_LOG is not set"),
        )
        .subcommand(
            Command::new("show-hints")
                .about("Shows any and all hints already seen for the given task")
                .arg(task_arg()),
        )
        .subcommand(
            Command::new("next-hint")
                .about("Shows the next hint for the given task")
                .arg(task_arg()),
        )
        .subcommand(
            Command::new("show-hint")
                .about("Shows one hint of the given task by position")
                .arg(task_arg())
                .arg(
                    Arg::new("index")
                        .long("index")
                        .short('i')
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Zero-based hint position"),
                ),
        )
        .subcommand(
            Command::new("migrate")
                .about("Helper for (mass) migration of scenario hints.yaml files")
                .hide(!dev)
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .value_name("SCENARIO")
                        .help("The name of the scenario to migrate"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .short('a')
                        .action(ArgAction::SetTrue)
                        .help("Migrate every scenario"),
                )
                .group(
                    ArgGroup::new("target")
                        .args(["name", "all"])
                        .required(true),
                ),
        )
}

/// Layer config file, environment and flags over the defaults
pub(crate) fn resolve_config(args: &ArgMatches) -> Result<ToolConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ToolConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ToolConfig::default(),
    };

    if let Some(path) = args.get_one::<PathBuf>("tasks-file") {
        config = config.with_tasks_path(path);
    }
    if let Some(path) = args.get_one::<PathBuf>("progress-file") {
        config = config.with_progress_path(path);
    }
    if let Some(path) = args.get_one::<PathBuf>("scenarios-dir") {
        config = config.with_scenarios_root(path);
    }

    Ok(config)
}
