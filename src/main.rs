use anyhow::{Context, Result};
use calcpad::calculator::{
    CalcResult, Command, EngineState, ExpressionEngine, NumberFormatter, NumberLocale,
    evaluate_expression,
};
use calcpad::config::Config;
use calcpad::display::DisplayState;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calcpad", version, about = "A keypad calculator with live preview")]
struct Cli {
    /// Locale used for digit grouping (e.g. en-US, de-DE, none)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the display as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one expression and print the formatted result
    Eval {
        /// Expression, using ASCII operators or keypad glyphs
        expression: String,
    },
    /// Feed a sequence of keys to a fresh calculator
    Keys {
        /// Key names such as `1`, `*`, `paren`, `Backspace`, `Enter`
        keys: Vec<String>,
    },
    /// Interactive session reading keys from stdin (default)
    Repl,
}

/// JSON form of the screen, with the engine state alongside.
#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(flatten)]
    display: &'a DisplayState,
    state: EngineState,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_default()?,
    };
    init_logging(&config.log_level);

    let formatter = build_formatter(&cli, &config)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Eval { expression } => run_eval(&expression, &formatter),
        Commands::Keys { keys } => {
            let mut engine = ExpressionEngine::with_formatter(formatter);
            for key in &keys {
                feed_line(&mut engine, key);
            }
            print_display(&engine, cli.json)
        }
        Commands::Repl => run_repl(ExpressionEngine::with_formatter(formatter), cli.json),
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_formatter(cli: &Cli, config: &Config) -> Result<NumberFormatter> {
    let mut config = config.clone();
    if let Some(tag) = &cli.locale {
        NumberLocale::from_tag(tag).with_context(|| format!("unknown locale '{tag}'"))?;
        config.locale = tag.clone();
    }
    Ok(config.formatter()?)
}

fn run_eval(expression: &str, formatter: &NumberFormatter) -> Result<()> {
    match evaluate_expression(expression, formatter) {
        CalcResult::Success { display_result, .. } => {
            println!("{display_result}");
            Ok(())
        }
        CalcResult::Error { error, .. } => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

/// Apply one line of input: a named key, or a run of single-character keys.
fn feed_line(engine: &mut ExpressionEngine, line: &str) {
    let line = line.trim();
    if let Some(command) = Command::from_key(line) {
        engine.dispatch(command);
        return;
    }
    for c in line.chars().filter(|c| !c.is_whitespace()) {
        match Command::from_char(c) {
            Some(command) => {
                engine.dispatch(command);
            }
            None => tracing::debug!(key = %c, "ignored key"),
        }
    }
}

fn run_repl(mut engine: ExpressionEngine, json: bool) -> Result<()> {
    println!("Type keys such as '(3+4)*5', or 'Enter', 'Backspace', 'Escape', 'paren'.");
    println!("Type 'quit' to exit.");
    print_display(&engine, json)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read stdin")? == 0 {
            break;
        }
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        feed_line(&mut engine, &line);
        print_display(&engine, json)?;
    }

    Ok(())
}

fn print_display(engine: &ExpressionEngine, json: bool) -> Result<()> {
    let display = engine.display();
    if json {
        let snapshot = Snapshot {
            display: &display,
            state: engine.state(),
        };
        let text = serde_json::to_string(&snapshot).context("failed to serialize display")?;
        println!("{text}");
    } else {
        println!("{display}");
    }
    if display.is_error() {
        let history = &display.history;
        tracing::warn!(expression = %history, "evaluation failed");
    }
    Ok(())
}
