use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::commands::{self, Command, HELP_TEXT};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::provider;
use crate::router::{Effect, Event, EventRouter};
use crate::runner::{LoadResult, Options, RecordSource, Runner};
use crate::state::{AppState, LOADING_MESSAGE};
use crate::utils::{self, format_bool};

fn print_banner() {
    const BANNER: &str = r#"
         _         __  __     _ _
     ___| |_ __ _ / _|/ _| __| (_)_ __
    / __| __/ _` | |_| |_ / _` | | '__|
    \__ \ || (_| |  _|  _| (_| | | |
    |___/\__\__,_|_| |_|  \__,_|_|_|

       v0.1.0 - employee directory
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn log_error(message: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        message.bold().white()
    );
}

fn log_warn(message: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "WRN".bold().yellow(),
        "]".bold().white(),
        message.bold().white()
    );
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');
    if let Some(long_about) = cmd.get_long_about().or(cmd.get_about()) {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }
    out.push_str(&format!("\nUsage: {} [OPTIONS]\n\n", cmd.get_name()));

    let args = cmd.get_arguments().filter(|a| !a.is_hide_set());
    let grouped = args.group_by(|a| a.get_help_heading().unwrap_or("Options").to_string());
    for (heading, group) in &grouped {
        out.push_str(&heading);
        out.push_str(":\n");
        for arg in group {
            let mut parts: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }
            for alias in arg.get_visible_aliases().unwrap_or_default() {
                parts.push(format!("--{alias}"));
            }
            let mut flags = parts.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push_str(&format!(" <{value_name}>"));
            }
            out.push_str(&format!("  {flags}\n"));
            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str(&format!("          {}\n", help.trim()));
                }
            }
            out.push('\n');
        }
    }
    out
}

#[derive(Clone, Debug)]
struct RunConfig {
    runner: Runner,
    output: Option<String>,
    output_format: Option<OutputFormat>,
    no_color: bool,
    verbose: u8,
    commands: Vec<Command>,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .unwrap_or_else(|| provider::DEFAULT_ENDPOINT.to_string());
    let results = args
        .results
        .or(cfg.results)
        .unwrap_or(provider::DEFAULT_RESULTS);
    let nationalities_raw = args
        .nationalities
        .or(cfg.nationalities)
        .unwrap_or_else(|| provider::DEFAULT_NATIONALITIES.join(","));
    let nationalities = utils::parse_nationalities_csv(&nationalities_raw)
        .map_err(|e| format!("invalid nationalities '{nationalities_raw}': {e}"))?;
    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(10);
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let source = match args.from_file.or(cfg.from_file) {
        Some(path) => RecordSource::FilePath(config::expand_tilde_string(path.trim())),
        None => RecordSource::Remote,
    };

    let runner = Runner::new(Options {
        endpoint,
        results,
        nationalities,
        source,
        timeout_seconds,
        proxy,
    })
    .map_err(|e| e.to_string())?;

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(p.trim()));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw)
                .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        ),
        None => None,
    };

    let raw_commands = if args.command.is_empty() {
        cfg.commands.unwrap_or_default()
    } else {
        args.command
    };
    let mut commands = Vec::new();
    for raw in raw_commands.iter() {
        if let Some(cmd) =
            commands::parse_command(raw).map_err(|e| format!("invalid command '{raw}': {e}"))?
        {
            commands.push(cmd);
        }
    }

    Ok(RunConfig {
        runner,
        output,
        output_format,
        no_color,
        verbose: args.verbose,
        commands,
    })
}

fn output_format_for(path: &str, explicit: Option<OutputFormat>) -> OutputFormat {
    explicit
        .or_else(|| output::infer_format_from_path(path))
        .unwrap_or(OutputFormat::Text)
}

async fn write_page(state: &AppState, path: &str, format: OutputFormat) -> Result<(), String> {
    let rendered = output::render(state, format);
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file {path}: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|e| format!("failed to write output file {path}: {e}"))?;
    outfile
        .flush()
        .await
        .map_err(|e| format!("failed to write output file {path}: {e}"))?;
    Ok(())
}

async fn load_records(runner: &Runner) -> Option<LoadResult> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::with_template(":: {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(LOADING_MESSAGE);

    match runner.run().await {
        Ok(loaded) => {
            pb.finish_and_clear();
            Some(loaded)
        }
        Err(e) => {
            pb.abandon_with_message(LOADING_MESSAGE);
            log_error(&e.to_string());
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn apply_events(router: &mut EventRouter, cmd: &Command) -> Result<Vec<Effect>, String> {
    let events = cmd.to_events(router.state())?;
    let mut effects = Vec::with_capacity(events.len());
    for event in events {
        effects.push(router.dispatch(event).map_err(|e| e.to_string())?);
    }
    Ok(effects)
}

fn print_gallery(state: &AppState) {
    print!("{}", output::format_gallery(state));
}

fn print_modal(state: &AppState) {
    if let Some(modal) = output::format_modal(state) {
        print!("{}", modal);
    }
}

fn print_effect(state: &AppState, effect: &Effect, verbose: u8) {
    if verbose >= 2 {
        println!("{}", format!("{:?}", effect).dimmed());
    }
    match effect {
        Effect::ModalOpened { .. } => print_modal(state),
        Effect::Navigated { direction, key } => {
            format_kv_line("Modal", &format!("{} -> {}", direction.label(), key));
            print_modal(state);
        }
        Effect::ModalClosed => format_kv_line("Modal", "closed"),
        Effect::Searched { query, outcome } => {
            format_kv_line("Search", &format!("query={:?} result={:?}", query, outcome));
            print_gallery(state);
        }
        Effect::RecordsLoaded { count } => {
            format_kv_line("Loaded", &format!("records={count}"));
            print_gallery(state);
        }
        Effect::InputChanged | Effect::Ignored => {}
    }
}

async fn run_command(router: &mut EventRouter, cmd: &Command, run: &RunConfig) -> Result<Flow, String> {
    match cmd {
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => println!("{}", HELP_TEXT),
        Command::List => print_gallery(router.state()),
        Command::Show => {
            print_gallery(router.state());
            print_modal(router.state());
        }
        Command::Export(path) => {
            let path = config::expand_tilde_string(path);
            let format = output_format_for(&path, run.output_format);
            write_page(router.state(), &path, format).await?;
            format_kv_line("Export", &path);
        }
        _ => {
            for effect in apply_events(router, cmd)? {
                print_effect(router.state(), &effect, run.verbose);
            }
        }
    }
    Ok(Flow::Continue)
}

async fn run_session(router: &mut EventRouter, run: &RunConfig) -> Result<(), String> {
    if !run.commands.is_empty() {
        for cmd in run.commands.iter() {
            println!("{} {:?}", ">".bold().green(), cmd);
            match run_command(router, cmd, run).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => log_error(&e),
            }
        }
        return Ok(());
    }

    println!("Type 'help' for commands.");
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        print!("{} ", ">".bold().green());
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read stdin: {e}")),
        };
        let cmd = match commands::parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                log_error(&e);
                continue;
            }
        };
        match run_command(router, &cmd, run).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => log_error(&e),
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    let options = run.runner.options();
    match &options.source {
        RecordSource::FilePath(path) => format_kv_line("Source", &format!("file={path}")),
        RecordSource::Remote => format_kv_line(
            "Source",
            &format!(
                "results={} nat={} timeout={}s proxy={}",
                options.results,
                options.nationalities.iter().join(","),
                options.timeout_seconds,
                if options.proxy.is_some() { "on" } else { "off" },
            ),
        ),
    }
    if run.verbose >= 1 {
        format_kv_line("Request", &run.runner.origin().map_err(|e| e.to_string())?);
    }
    format_kv_line(
        "Session",
        &format!(
            "scripted={} output={}",
            format_bool(!run.commands.is_empty()),
            run.output.as_deref().unwrap_or("none")
        ),
    );
    println!();

    let mut router = EventRouter::new(AppState::new());
    match load_records(&run.runner).await {
        Some(loaded) => {
            if run.verbose >= 1 {
                format_kv_line(
                    "Fetched",
                    &format!("{} in {}ms", loaded.origin, loaded.elapsed.as_millis()),
                );
            }
            let effect = router
                .dispatch(Event::RecordsLoaded(loaded.records))
                .map_err(|e| e.to_string())?;
            print_effect(router.state(), &effect, run.verbose);
            println!();
            run_session(&mut router, &run).await?;
        }
        None => log_warn("no records loaded, skipping session"),
    }

    if let Some(path) = run.output.as_deref() {
        let format = output_format_for(path, run.output_format);
        write_page(router.state(), path, format).await?;
        format_kv_line("Output", path);
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let config_path = match args.config.as_deref() {
        Some(p) => Some(config::expand_tilde(p)),
        None => config::default_config_path(),
    };

    if args.init_config {
        let path = config_path.ok_or_else(|| "could not determine config path".to_string())?;
        if config::ensure_default_config_file(&path)? {
            format_kv_line("Config", &format!("written {}", path.display()));
        } else {
            format_kv_line("Config", &format!("exists {}", path.display()));
        }
        return Ok(());
    }

    let cfg = match config_path.as_ref() {
        Some(path) => config::load_config(path, args.config.is_none())?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
