//! Composable training observers

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{GameOutcome, Player},
    ports::Observer,
};

/// Progress bar observer showing episode counts and the running W/D/L tally
/// from the agent's perspective.
pub struct ProgressObserver {
    agent_player: Player,
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new(agent_player: Player) -> Self {
        Self {
            agent_player,
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, _moves: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(winner) if winner == self.agent_player => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Ongoing => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Aggregated metrics from a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_episode_length: f64,
}

/// Metrics observer tracking outcomes and episode lengths.
pub struct MetricsObserver {
    agent_player: Player,
    wins: usize,
    draws: usize,
    losses: usize,
    episodes: usize,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    pub fn new(agent_player: Player) -> Self {
        Self {
            agent_player,
            wins: 0,
            draws: 0,
            losses: 0,
            episodes: 0,
            episode_lengths: Vec::new(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.episodes as f64
        }
    }

    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let rate = |count: usize| {
            if self.episodes == 0 {
                0.0
            } else {
                count as f64 / self.episodes as f64
            }
        };
        MetricsSummary {
            episodes: self.episodes,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: rate(self.wins),
            draw_rate: rate(self.draws),
            loss_rate: rate(self.losses),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, moves: usize) -> Result<()> {
        self.episodes += 1;
        self.episode_lengths.push(moves);
        match outcome {
            GameOutcome::Win(winner) if winner == self.agent_player => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Ongoing => {}
        }
        Ok(())
    }
}
