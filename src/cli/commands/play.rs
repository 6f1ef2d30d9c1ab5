//! Play command - interactive human-vs-agent session

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    Error,
    adapters::MsgPackRepository,
    cli::parse_player,
    game::{GameEnvironment, GameOutcome, Player, Variant},
    pipeline::{ProgressObserver, TrainingConfig, TrainingLoop, TrainingMode},
    ports::AgentRepository,
    q_learning::{AgentParams, LoadStatus, SavedAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the agent")]
pub struct PlayArgs {
    /// Game variant (tictactoe, five-in-a-row)
    #[arg(long, short = 'v', default_value = "tictactoe")]
    pub variant: String,

    /// Saved agent to load and update (defaults to kinrow_<variant>.mpk)
    #[arg(long)]
    pub agent: Option<PathBuf>,

    /// Episodes of pre-training when no saved agent exists (0 disables)
    #[arg(long, default_value_t = 5000)]
    pub train_episodes: usize,

    /// Mark the human plays (`x` or `o`); X moves first
    #[arg(long, default_value = "x")]
    pub human_player: String,

    /// Random seed for pre-training
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip saving the agent when the session ends
    #[arg(long, default_value_t = false)]
    pub no_save: bool,
}

fn default_agent_path(variant: Variant) -> PathBuf {
    PathBuf::from(format!("kinrow_{}.mpk", variant.label()))
}

/// Parse a human move: either a single linear index or a `row col` pair.
fn parse_move(input: &str, side: usize) -> Option<usize> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    match tokens.as_slice() {
        [index] => index.parse::<usize>().ok(),
        [row, col] => {
            let row = row.parse::<usize>().ok()?;
            let col = col.parse::<usize>().ok()?;
            Some(row * side + col)
        }
        _ => None,
    }
}

fn announce(outcome: GameOutcome, machine: Player) {
    match outcome {
        GameOutcome::Win(winner) if winner == machine => println!("The agent wins!"),
        GameOutcome::Win(_) => println!("You win!"),
        GameOutcome::Draw => println!("It's a draw."),
        GameOutcome::Ongoing => {}
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let variant: Variant = args.variant.parse()?;
    let human = parse_player(&args.human_player)?;
    let machine = human.opponent();
    let path = args.agent.unwrap_or_else(|| default_agent_path(variant));

    let repo = MsgPackRepository::new();
    let params = AgentParams {
        seed: args.seed,
        ..AgentParams::default()
    };

    let (mut agent, status) = SavedAgent::load_or_default(&repo, &path, variant, params)?;
    match status {
        LoadStatus::Loaded => println!(
            "Loaded agent from {} ({} states)",
            path.display(),
            agent.q_table().state_count()
        ),
        LoadStatus::NotFound => println!("No saved agent at {}; starting fresh", path.display()),
        LoadStatus::Corrupt => println!(
            "Saved agent at {} is unreadable; starting fresh",
            path.display()
        ),
    }

    if status != LoadStatus::Loaded && args.train_episodes > 0 {
        println!("Pre-training for {} episodes...", args.train_episodes);
        let config = TrainingConfig {
            variant,
            episodes: args.train_episodes,
            mode: TrainingMode::VsRandom,
            agent_player: machine,
            seed: args.seed,
            ..TrainingConfig::default()
        };
        TrainingLoop::new(config)
            .with_observer(Box::new(ProgressObserver::new(machine)))
            .run(&mut agent)?;
    }

    println!(
        "You are {human}, the agent is {machine}. Enter moves as 'row col' or a cell index; 'q' quits."
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut env = GameEnvironment::new(variant);

    'session: loop {
        println!("\n{env}");

        if env.to_move() == human {
            print!("your move> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                break 'session;
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("q") {
                break 'session;
            }
            let Some(mv) = parse_move(input, variant.side()) else {
                println!("Could not parse '{input}'; expected 'row col' or an index.");
                continue;
            };
            match env.step(mv) {
                Ok(_) => {}
                Err(err @ (Error::IllegalMove { .. } | Error::OutOfBounds { .. })) => {
                    println!("{err}");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            let legal = env.legal_moves();
            let state = env.state_key();
            let action = agent.choose_action(env.board(), machine, &legal)?;
            let step = env.step(action)?;
            let next_legal = env.legal_moves();
            agent.learn(state, action, step.reward, &step.state, &next_legal);

            let (row, col) = env.board().coords(action);
            println!("agent plays {row} {col}");
        }

        if env.is_terminal() {
            println!("\n{env}");
            announce(env.outcome(), machine);

            print!("play again? [y/N] ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                break 'session;
            };
            if line.trim().eq_ignore_ascii_case("y") {
                env.reset();
            } else {
                break 'session;
            }
        }
    }

    if !args.no_save {
        repo.save(&SavedAgent::from_agent(&agent), &path)
            .with_context(|| format!("failed to save agent to {}", path.display()))?;
        println!("Saved agent to {}", path.display());
    }

    Ok(())
}
