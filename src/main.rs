//! keymenu CLI
//!
//! Keyboard-navigable terminal menus: run the demo tree, describe its
//! screens, or ask a single yes/no question.

mod screens;

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use tracing::info;

use keymenu::config::{Config, load_config};
use keymenu::logging;
use keymenu::report::describe;
use keymenu::tui::confirm::{self, Answer, ConfirmSpec, DEFAULT_PROMPT};
use keymenu::tui::run;
use keymenu::types::OutputFormat;

use screens::{Screen, main_menu, screen_by_name};

#[derive(Parser)]
#[command(name = "keymenu")]
#[command(about = "Keyboard-navigable terminal menus with nested screens")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/keymenu/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the demo menu tree
    Run {
        /// Dispatch this key (or navigation word) before the first frame
        #[arg(long)]
        select: Option<String>,
    },

    /// Print a screen's resolved options
    Describe {
        /// Screen of the demo tree
        #[arg(long, value_enum, default_value = "main")]
        screen: Screen,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Ask one yes/no question (exit status 0 yes, 1 no, 2 exit)
    Confirm {
        /// Prompt text
        #[arg(long)]
        prompt: Option<String>,

        /// Tokens accepted as yes, in addition to the defaults
        #[arg(long = "yes", value_name = "TOKEN", num_args = 1..)]
        yes: Vec<String>,

        /// Tokens accepted as no, in addition to the defaults
        #[arg(long = "no", value_name = "TOKEN", num_args = 1..)]
        no: Vec<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Exit status for a "no" answer.
const EXIT_NO: u8 = 1;

/// Exit status when the user asked to exit from a confirmation.
const EXIT_REQUESTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    if let Err(e) = logging::init(level, &config.log_file) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Run { select } => cmd_run(config, select.as_deref()),
        Commands::Describe { screen, format } => cmd_describe(config, screen, format.into()),
        Commands::Confirm { prompt, yes, no } => cmd_confirm(prompt.as_deref(), &yes, &no),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_run(config: Config, select: Option<&str>) -> Result<ExitCode, String> {
    let node_name = config.node_name.clone();
    let width = config.width;
    let root = main_menu(Rc::new(config));

    run::run(root, select, &node_name, width).map_err(|e| e.to_string())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_describe(config: Config, screen: Screen, format: OutputFormat) -> Result<ExitCode, String> {
    let (definition, parent) = screen_by_name(screen, Rc::new(config));
    let text = describe(definition, parent, format).map_err(|e| e.to_string())?;
    print!("{}", text);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_confirm(prompt: Option<&str>, yes: &[String], no: &[String]) -> Result<ExitCode, String> {
    let spec = ConfirmSpec::merge(yes, no);
    let answer = confirm::ask(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
        prompt.unwrap_or(DEFAULT_PROMPT),
        &spec,
    )
    .map_err(|e| e.to_string())?;

    info!(?answer, "confirmation answered");
    Ok(match answer {
        Answer::Yes => ExitCode::SUCCESS,
        Answer::No => ExitCode::from(EXIT_NO),
        Answer::Exit => ExitCode::from(EXIT_REQUESTED),
    })
}
