use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_lab::game::{GameConfig, GameEngine};
use snake_lab::policy::{DecisionPolicy, GreedyPolicy, RandomPolicy};
use snake_lab::render::DisplayMode;
use snake_lab::session::GameSession;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_lab")]
#[command(version, about = "Run one snake game with a scripted policy")]
struct Cli {
    /// Field width
    #[arg(long, default_value = "16")]
    width: usize,

    /// Field height
    #[arg(long, default_value = "16")]
    height: usize,

    /// Display backend
    #[arg(long, default_value = "none")]
    display: Display,

    /// Decision policy
    #[arg(long, default_value = "greedy")]
    policy: Policy,

    /// Run name (defaults to game_<n>)
    #[arg(long)]
    name: Option<String>,

    /// Directory to write the per-run CSV log under
    #[arg(long)]
    storage: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Display {
    /// No output
    None,
    /// Terminal UI
    Terminal,
}

impl From<Display> for DisplayMode {
    fn from(display: Display) -> Self {
        match display {
            Display::None => DisplayMode::None,
            Display::Terminal => DisplayMode::Terminal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Chase the apple, avoiding walls and the snake's body
    Greedy,
    /// Pick uniformly among safe moves
    Random,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::new(cli.width, cli.height);
    let engine = GameEngine::new(config);

    let policy: Box<dyn DecisionPolicy> = match cli.policy {
        Policy::Greedy => Box::new(GreedyPolicy::new()),
        Policy::Random => Box::new(RandomPolicy::new()),
    };

    let renderer = DisplayMode::from(cli.display).renderer()?;

    let mut session = GameSession::new(Box::new(engine), policy, renderer);
    let points = session.start_new_game(cli.name.as_deref(), cli.storage.as_deref())?;

    // Restore the terminal before the final report
    drop(session);
    println!("Points: {points}");

    Ok(())
}
