//! One hand of self-play: the betting loop, per-seat trajectories and the
//! terminal payoff.

use flopbot_engine::betting::{BettingState, InfoStateKey};
use flopbot_engine::errors::GameError;
use flopbot_engine::player::{Action, Seat};
use serde::Serialize;

/// A decision one seat made and what it cost at the time.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub key: InfoStateKey,
    pub action: Action,
    pub reward: f64,
}

/// Ordered steps of one seat within one episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<Step>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: InfoStateKey, action: Action, reward: f64) {
        self.steps.push(Step {
            key,
            action,
            reward,
        });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn rewards(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.reward).collect()
    }

    /// Net chips for the seat over the episode.
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().map(|s| s.reward).sum()
    }

    /// Adds `amount` to the reward of the final step. Returns false if the
    /// trajectory is empty.
    pub fn add_to_last(&mut self, amount: f64) -> bool {
        match self.steps.last_mut() {
            Some(step) => {
                step.reward += amount;
                true
            }
            None => false,
        }
    }
}

/// How a settled hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpisodeOutcome {
    pub pot: u32,
    /// Seat that folded, if any.
    pub folded: Option<Seat>,
    /// Seat that took the pot. `None` means the pot was split.
    pub winner: Option<Seat>,
}

impl EpisodeOutcome {
    pub fn is_split(&self) -> bool {
        self.winner.is_none()
    }

    pub fn is_showdown(&self) -> bool {
        self.folded.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Episode {
    trajectories: [Trajectory; 2],
}

impl Episode {
    pub fn trajectory(&self, seat: Seat) -> &Trajectory {
        &self.trajectories[seat.index()]
    }

    /// Credits the terminal payoff to the last step of the winning seat(s).
    ///
    /// After a fold the other seat collects the pot. Otherwise the hands are
    /// compared and the winner collects it, or each seat gets half on a tie.
    pub fn settle(&mut self, state: &BettingState) -> Result<EpisodeOutcome, GameError> {
        if !state.is_terminal() {
            return Err(GameError::HandNotTerminal);
        }
        let pot = state.pot();
        let amount = f64::from(pot);

        if let Some(folded) = state.folded() {
            let winner = folded.other();
            self.credit(winner, amount)?;
            return Ok(EpisodeOutcome {
                pot,
                folded: Some(folded),
                winner: Some(winner),
            });
        }

        let winner = match state.resolve_winner()? {
            1 => Some(Seat::Player),
            -1 => Some(Seat::Opponent),
            _ => None,
        };
        match winner {
            Some(seat) => self.credit(seat, amount)?,
            None => {
                self.credit(Seat::Player, amount / 2.0)?;
                self.credit(Seat::Opponent, amount / 2.0)?;
            }
        }
        Ok(EpisodeOutcome {
            pot,
            folded: None,
            winner,
        })
    }

    fn credit(&mut self, seat: Seat, amount: f64) -> Result<(), GameError> {
        if self.trajectories[seat.index()].add_to_last(amount) {
            Ok(())
        } else {
            Err(GameError::InvalidAction(format!(
                "{seat} has no decision to credit the pot to"
            )))
        }
    }
}

/// Runs the betting loop on an already dealt `state` until it is terminal.
///
/// `choose` is asked for an action whenever a seat is to act. Each decision
/// is recorded for that seat with an immediate reward equal to minus the
/// chips it put in. An action outside the legal set aborts the episode with
/// [`GameError::IllegalAction`].
pub fn play_episode<F, E>(state: &mut BettingState, mut choose: F) -> Result<Episode, E>
where
    F: FnMut(Seat, &InfoStateKey) -> Result<Action, E>,
    E: From<GameError>,
{
    let mut episode = Episode::default();
    while let Some(seat) = state.to_act() {
        let key = state.current_state_key(seat)?;
        let action = choose(seat, &key)?;
        let legal = key.legal_actions();
        if !legal.contains(&action) {
            return Err(GameError::IllegalAction { action, legal }.into());
        }
        let reward = -f64::from(state.contribution(action));
        state.apply_action(action)?;
        episode.trajectories[seat.index()].push(key, action, reward);
    }
    Ok(episode)
}
