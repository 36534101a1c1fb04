//! Score, experience and levels.

use bevy::prelude::*;

use crate::plugins::bus::events::{CollectExperienceEvent, NextLevelEvent, ScoreEvent};
use crate::plugins::bus::{EventBus, Published};

use super::{Player, Progress};

/// Experience that must be exceeded to leave `level`.
pub fn experience_threshold(level: u32) -> f64 {
    1000.0 * 1.8f64.powi(level as i32)
}

impl Progress {
    /// Take one level if experience is past the current threshold. Returns the new level.
    pub fn try_level_up(&mut self) -> Option<u32> {
        if f64::from(self.experience) > experience_threshold(self.level) {
            self.level += 1;
            Some(self.level)
        } else {
            None
        }
    }
}

/// Score is shared: every player gets it.
pub fn on_score(In(score): In<Published<ScoreEvent>>, mut q_progress: Query<&mut Progress>) -> Result {
    for mut progress in &mut q_progress {
        progress.score = progress.score.saturating_add(score.score);
    }
    Ok(())
}

pub fn on_collect_experience(
    In(collect): In<Published<CollectExperienceEvent>>,
    mut bus: ResMut<EventBus>,
    mut q_player: Query<(&Player, &mut Progress)>,
) -> Result {
    for (player, mut progress) in &mut q_player {
        if player.id != collect.player_id {
            continue;
        }
        progress.experience = progress.experience.saturating_add(collect.amount);
        while let Some(level) = progress.try_level_up() {
            info!("player {} reached level {level}", player.id);
            bus.publish(NextLevelEvent { level });
        }
    }
    Ok(())
}
