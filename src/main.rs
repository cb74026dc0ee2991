use std::io::{self, BufRead, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use mate_replay::app::DemoApp;
use mate_replay::board::CozyRules;
use mate_replay::config::DemoConfig;
use mate_replay::playback::{Playback, PlaybackState};
use mate_replay::render::TextRenderer;
use mate_replay::scenario::{builtin_scenarios, find_scenario, load_scenarios, Scenario};
use mate_replay::timer::TimerQueue;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay scripted chess checkmates move by move", long_about = None)]
struct Args {
    /// Scenario to load at start, by name or 1-based index
    #[arg(long)]
    scenario: Option<String>,

    /// JSON file with a list of scenarios (replaces the built-ins)
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Delay between autoplay moves in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Play the selected scenario to the end and exit
    #[arg(long, default_value_t = false)]
    auto: bool,

    /// Draw pieces as letters instead of Unicode glyphs
    #[arg(long, default_value_t = false)]
    ascii: bool,

    /// List available scenarios and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

type App = DemoApp<CozyRules, TimerQueue, TextRenderer<Stdout>>;

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Load(String),
    Step,
    Play(Option<Duration>),
    Stop,
    Reset,
    Board,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() { return None; }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let cmd = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "load" | "l" if !rest.is_empty() => Command::Load(rest.to_string()),
        "step" | "s" | "n" => Command::Step,
        "play" | "p" => match rest.parse::<u64>() {
            Ok(ms) => Command::Play(Some(Duration::from_millis(ms))),
            Err(_) if rest.is_empty() => Command::Play(None),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "stop" => Command::Stop,
        "reset" | "r" => Command::Reset,
        "board" | "b" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(cmd)
}

fn print_scenarios(scenarios: &[Scenario]) {
    for (i, s) in scenarios.iter().enumerate() {
        println!("{:>2}. {} ({} moves{})", i + 1, s.name, s.moves.len(), if s.fen.is_some() { ", custom position" } else { "" });
    }
}

fn print_help() {
    println!("Commands: list | load <name|n> | step | play [ms] | stop | reset | board | help | quit");
}

/// Bring the timer clock up to wall time and deliver due ticks.
fn dispatch_due(app: &mut App, started: Instant) -> io::Result<()> {
    let due = app.playback_mut().scheduler_mut().advance_to(started.elapsed());
    for id in due { app.on_tick(id)?; }
    Ok(())
}

fn time_until_next(app: &App, started: Instant) -> Option<Duration> {
    app.playback().scheduler().next_due().map(|due| due.saturating_sub(started.elapsed()))
}

fn drain_autoplay(app: &mut App, started: Instant) -> io::Result<()> {
    while app.playback().is_running() {
        if let Some(wait) = time_until_next(app, started) { thread::sleep(wait); }
        dispatch_due(app, started)?;
    }
    Ok(())
}

fn run_interactive(app: &mut App, scenarios: &[Scenario], started: Instant) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() { break; }
        }
    });

    print_help();
    loop {
        let msg = match time_until_next(app, started) {
            Some(wait) => rx.recv_timeout(wait),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        dispatch_due(app, started)?;
        let line = match msg {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                // stdin closed: let a running autoplay finish before exiting
                drain_autoplay(app, started)?;
                break;
            }
        };
        let Some(cmd) = parse_command(&line) else { continue };
        debug!("command {:?}", cmd);
        match cmd {
            Command::List => print_scenarios(scenarios),
            Command::Load(key) => match find_scenario(scenarios, &key) {
                Ok(s) => app.start_scenario(s)?,
                Err(e) => println!("{}", e),
            },
            Command::Step => app.step()?,
            Command::Play(interval) => app.play(interval)?,
            Command::Stop => app.stop()?,
            Command::Reset => app.reset()?,
            Command::Board => app.redraw()?,
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(text) => println!("Unknown command: {} (try 'help')", text),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = DemoConfig::from_env().with_overrides(args.interval_ms, args.ascii, args.scenarios.clone());

    let scenarios = match &cfg.scenario_file {
        Some(path) => load_scenarios(path).with_context(|| format!("loading scenarios from {}", path.display()))?,
        None => builtin_scenarios(),
    };
    if args.list {
        print_scenarios(&scenarios);
        return Ok(());
    }

    let started = Instant::now();
    let playback = Playback::new(CozyRules, TimerQueue::new());
    let mut app = DemoApp::new(playback, TextRenderer::new(io::stdout(), cfg.ascii), cfg.interval);

    match &args.scenario {
        Some(key) => {
            let scenario = find_scenario(&scenarios, key)?;
            app.start_scenario(scenario)?;
        }
        None => app.redraw()?,
    }

    if args.auto {
        if app.playback().state() == PlaybackState::Idle {
            anyhow::bail!("--auto needs a loadable --scenario");
        }
        dispatch_due(&mut app, started)?;
        app.play(None)?;
        drain_autoplay(&mut app, started)?;
        return Ok(());
    }
    run_interactive(&mut app, &scenarios, started)
}
