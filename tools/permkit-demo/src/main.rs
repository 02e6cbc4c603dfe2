//! Terminal permission settings screen.
//!
//! Renders the camera and notification switches and drives a
//! `PermissionCoordinator` from typed commands, either against the platform
//! permission API or an in-memory simulation.

mod simulated;
mod terminal;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use owo_colors::OwoColorize;
use permkit_coordinator::{CoordinatorConfig, PermissionCoordinator};
use permkit_lifecycle::{AppLifecycle, AppState};
use permkit_permission::{Capability, PermissionBackend, PermissionStatus, SystemBackend};

use simulated::SimulatedBackend;
use terminal::TerminalAlerts;

#[derive(Parser)]
#[command(name = "permkit-demo")]
#[command(about = "Terminal permission settings screen", long_about = None)]
struct Cli {
    /// Use an in-memory backend instead of the platform permission API
    #[arg(long)]
    simulate: bool,
    /// JSON file overriding alert texts and notification options
    #[arg(long)]
    config: Option<PathBuf>,
}

enum Command {
    Toggle(Capability),
    Lifecycle(AppState),
    State,
    Set(Capability, PermissionStatus),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["camera" | "notification"] => Command::Toggle(words[0].parse()?),
        ["foreground"] => Command::Lifecycle(AppState::Active),
        ["background"] => Command::Lifecycle(AppState::Background),
        ["state"] => Command::State,
        ["set", capability, status] => {
            Command::Set(capability.parse()?, PermissionStatus::from_raw(status))
        }
        ["help"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        _ => bail!("unknown command `{}`, type `help`", line.trim()),
    };
    Ok(command)
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  camera | notification        toggle a switch");
    println!("  foreground | background      simulate app lifecycle");
    println!("  set <capability> <status>    change a status in the OS (--simulate)");
    println!("  state                        show the screen again");
    println!("  quit");
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoordinatorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CoordinatorConfig::default(),
    };

    if cli.simulate {
        let backend = SimulatedBackend::new();
        run_screen(backend.clone(), Some(backend), config)
    } else {
        run_screen(SystemBackend::new(), None, config)
    }
}

fn run_screen<B>(
    backend: B,
    simulated: Option<SimulatedBackend>,
    config: CoordinatorConfig,
) -> Result<()>
where
    B: PermissionBackend + 'static,
{
    let coordinator = PermissionCoordinator::builder(backend, TerminalAlerts)
        .config(config)
        .build();
    let lifecycle = AppLifecycle::new();
    let mut pool = LocalPool::new();

    let _screen = coordinator.subscribe(terminal::render);

    let driver = coordinator.clone();
    let notifier = lifecycle.clone();
    pool.spawner()
        .spawn_local(async move { driver.run(&notifier).await })
        .context("failed to start lifecycle task")?;
    pool.run_until_stalled();

    print_help();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Toggle(capability)) => {
                let outcome = pool.run_until(coordinator.toggle(capability));
                log::debug!("{capability} toggle: {outcome:?}");
            }
            Ok(Command::Lifecycle(state)) => {
                lifecycle.transition(state);
                pool.run_until_stalled();
            }
            Ok(Command::State) => terminal::render(&coordinator.state()),
            Ok(Command::Set(capability, status)) => match &simulated {
                Some(backend) => backend.set(capability, status),
                None => println!("{}", "`set` needs --simulate".yellow()),
            },
            Ok(Command::Help) => print_help(),
            Ok(Command::Quit) => break,
            Err(err) => println!("{}", err.to_string().yellow()),
        }
    }

    lifecycle.close();
    pool.run_until_stalled();
    Ok(())
}
