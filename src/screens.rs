//! Demo menu tree driven by the `run` and `describe` subcommands.
//!
//! Actions here run in cooked mode between key reads, so they use plain
//! line I/O on stdout/stdin.

use std::io::{self, Write};
use std::rc::Rc;

use tracing::{info, warn};

use keymenu::config::Config;
use keymenu::platform::{default_config_path, detect_width};
use keymenu::tui::confirm::{self, Answer, ConfirmSpec, DEFAULT_PROMPT};
use keymenu::types::{Flow, MenuDefinition};

pub const MAIN_MENU: &str = "Main Menu";

/// Root of the demo tree.
pub fn main_menu(config: Rc<Config>) -> MenuDefinition {
    let info_config = Rc::clone(&config);
    let settings_config = Rc::clone(&config);
    MenuDefinition::new(MAIN_MENU)
        .option("1", "System info", move || system_info(&info_config))
        .option("T", "Tools", || Flow::Push(tools_menu()))
        .option("S", "Settings", move || {
            Flow::Push(settings_menu(Rc::clone(&settings_config)))
        })
}

pub fn tools_menu() -> MenuDefinition {
    MenuDefinition::new("Tools")
        .option("1", "Echo a line", echo_line)
        .option("2", "Guarded action", guarded_action)
        .option("N", "Nested tools", || Flow::Push(tools_menu()))
        .unbound("9", "Coming soon")
}

pub fn settings_menu(config: Rc<Config>) -> MenuDefinition {
    let shown = Rc::clone(&config);
    MenuDefinition::new("Settings")
        .option("1", "Show configuration", move || show_configuration(&shown))
        .option("2", "Show paths", move || show_paths(&config))
}

/// Screens `describe` can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Screen {
    Main,
    Tools,
    Settings,
}

/// A screen of the demo tree and the name of its parent, if any.
pub fn screen_by_name(screen: Screen, config: Rc<Config>) -> (MenuDefinition, Option<&'static str>) {
    match screen {
        Screen::Main => (main_menu(config), None),
        Screen::Tools => (tools_menu(), Some(MAIN_MENU)),
        Screen::Settings => (settings_menu(config), Some(MAIN_MENU)),
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

fn system_info(config: &Config) -> Flow {
    println!("keymenu {}", env!("CARGO_PKG_VERSION"));
    println!("  node:     {}", config.node_name);
    println!("  os:       {}", std::env::consts::OS);
    println!("  columns:  {}", detect_width().columns());
    pause();
    Flow::Stay
}

fn echo_line() -> Flow {
    print!("[?] Type something: ");
    let line = io::stdout()
        .flush()
        .and_then(|_| confirm::read_line(&mut io::stdin().lock()));
    match line {
        Ok(Some(text)) => println!("[+] You typed: {}", text.trim_end()),
        Ok(None) => println!(),
        Err(e) => warn!(error = %e, "could not read line"),
    }
    pause();
    Flow::Stay
}

fn guarded_action() -> Flow {
    let mut out = io::stdout();
    let answer = confirm::ask(
        &mut io::stdin().lock(),
        &mut out,
        DEFAULT_PROMPT,
        &ConfirmSpec::default(),
    );

    match answer {
        Ok(Answer::Yes) => {
            info!("guarded action confirmed");
            println!("[+] Done.");
        }
        Ok(Answer::No) => println!("[-] Cancelled."),
        Ok(Answer::Exit) => return Flow::Exit,
        Err(e) => {
            warn!(error = %e, "confirmation failed");
            return Flow::Stay;
        }
    }
    pause();
    Flow::Stay
}

fn show_configuration(config: &Config) -> Flow {
    println!("node_name = {:?}", config.node_name);
    match config.width {
        Some(width) => println!("width     = {width}"),
        None => println!("width     = (terminal)"),
    }
    println!("log_file  = {:?}", config.log_file.display().to_string());
    println!("log_level = {:?}", config.log_level);
    pause();
    Flow::Stay
}

fn show_paths(config: &Config) -> Flow {
    let source = config
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let default = default_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("config in use:   {source}");
    println!("default config:  {default}");
    println!("log file:        {}", config.log_file.display());
    pause();
    Flow::Stay
}

fn pause() {
    if let Err(e) = confirm::wait_for_enter(&mut io::stdin().lock(), &mut io::stdout()) {
        warn!(error = %e, "could not wait for enter");
    }
}

// ============================================================================
// TESTS
// ============================================================================
