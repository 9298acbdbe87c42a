//! End-of-run record handed to the UI when a level ends

use serde::Serialize;

use super::state::{GameState, LevelOutcome};

/// What the end-of-run button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextAction {
    /// Go to the next level, keeping reached planets
    AdvanceLevel,
    /// Back to level 1 with a clean slate
    Restart,
}

impl NextAction {
    pub fn label(&self) -> &'static str {
        match self {
            NextAction::AdvanceLevel => "Next Level",
            NextAction::Restart => "Restart",
        }
    }
}

/// Reached/not-reached line for one planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanetStatus {
    /// 1-based planet number
    pub number: u32,
    pub reached: bool,
}

impl std::fmt::Display for PlanetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.reached { "Reached" } else { "Not Reached" };
        write!(f, "Planet {}: {}", self.number, status)
    }
}

/// Snapshot of a finished level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndOfRun {
    pub outcome: LevelOutcome,
    pub level: u32,
    pub score: u32,
    pub time_secs: u32,
    /// Per-planet list, only filled in on a win
    pub planets: Vec<PlanetStatus>,
    pub next_action: NextAction,
}

impl EndOfRun {
    pub fn from_state(state: &GameState, outcome: LevelOutcome) -> Self {
        let planets = match outcome {
            LevelOutcome::Won => state
                .planets
                .iter()
                .zip(1..)
                .map(|(planet, number)| PlanetStatus {
                    number,
                    reached: planet.reached,
                })
                .collect(),
            LevelOutcome::Lost => Vec::new(),
        };

        let next_action = if outcome == LevelOutcome::Won && state.has_next_level() {
            NextAction::AdvanceLevel
        } else {
            NextAction::Restart
        };

        Self {
            outcome,
            level: state.level,
            score: state.score(),
            time_secs: state.time_secs,
            planets,
            next_action,
        }
    }

    pub fn result_text(&self) -> &'static str {
        self.outcome.result_text()
    }
}
