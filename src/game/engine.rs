//! The progression state machine.
//!
//! A [`ProgressionEngine`] owns one player's [`PlayerState`] plus the level
//! catalog and exposes the two player-facing operations: starting a level and
//! completing the current task. Level completion, level-up checks, and
//! achievement evaluation happen internally at the right boundaries.
//!
//! Per level the machine is forward-only: Locked → Unlocked → Active(task 0,
//! 1, ..) → Completed. There is no retry or undo of a completed task. All
//! operations run synchronously to completion; the engine performs no I/O.

use log::{debug, info};

use super::achievement;
use super::catalog::LevelCatalog;
use super::errors::GameError;
use super::types::{LevelCompleteResult, PlayerState, PlayerStats, TaskAdvance, TaskDefinition};

/// Flat coin bonus for every completed task.
pub const TASK_COIN_BONUS: u32 = 10;
/// Flat XP bonus for completing a level, on top of task rewards.
pub const LEVEL_XP_BONUS: u32 = 50;
/// Flat coin bonus for completing a level.
pub const LEVEL_COIN_BONUS: u32 = 25;

/// XP required to advance from `level` to the next player level.
pub fn xp_threshold(level: u32) -> u32 {
    level * 100
}

/// Owns the player state and drives all mutations. One engine per session;
/// no process-wide singleton.
pub struct ProgressionEngine {
    catalog: LevelCatalog,
    state: PlayerState,
    /// Id of the level currently being played, if any. Cleared on completion
    /// so a level can never complete twice per run.
    active: Option<u8>,
}

impl ProgressionEngine {
    pub fn new(catalog: LevelCatalog) -> Self {
        Self {
            catalog,
            state: PlayerState::new(),
            active: None,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn active_level(&self) -> Option<u8> {
        self.active
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            player_level: self.state.player_level,
            player_xp: self.state.player_xp,
            player_coins: self.state.player_coins,
            frontier: self.state.current_level_index,
        }
    }

    /// Start playing `level_id`. Any level at or below the frontier may be
    /// started (or replayed); levels beyond it are rejected. Resets the task
    /// counter and returns the level's first task.
    pub fn start_level(&mut self, level_id: u8) -> Result<TaskDefinition, GameError> {
        if level_id > self.state.current_level_index {
            return Err(GameError::LevelLocked {
                requested: level_id,
                frontier: self.state.current_level_index,
            });
        }
        let level = self.catalog.level_by_id(level_id)?;
        let first = level.tasks.first().cloned().ok_or(GameError::NoActiveTask)?;
        debug!("level {} ({}) started", level_id, level.title);

        self.state.completed_tasks_in_level = 0;
        self.state.touch();
        self.active = Some(level_id);
        Ok(first)
    }

    /// Complete the task the player is currently on. Applies the task's XP
    /// reward and the flat coin bonus, then either advances to the next task
    /// or finishes the level when the last task was completed.
    pub fn complete_current_task(&mut self) -> Result<TaskAdvance, GameError> {
        let Some(level_id) = self.active else {
            return Err(GameError::NoActiveTask);
        };
        let (task, total) = {
            let level = self.catalog.level_by_id(level_id)?;
            let index = self.state.completed_tasks_in_level as usize;
            match level.tasks.get(index) {
                Some(task) => (task.clone(), level.task_count()),
                None => return Err(GameError::NoActiveTask),
            }
        };

        self.state.player_xp += task.xp_reward;
        self.state.player_coins += TASK_COIN_BONUS;
        self.state.completed_tasks_in_level += 1;
        self.state.touch();
        debug!(
            "task complete: {} (+{} xp, +{} coins)",
            task.title, task.xp_reward, TASK_COIN_BONUS
        );
        Self::check_level_up(&mut self.state);

        if self.state.completed_tasks_in_level == total {
            let result = self.complete_level(level_id);
            return Ok(TaskAdvance::LevelComplete(result));
        }

        let next = {
            let level = self.catalog.level_by_id(level_id)?;
            level.tasks[self.state.completed_tasks_in_level as usize].clone()
        };
        Ok(TaskAdvance::Next {
            task: next,
            progress: self.state.completed_tasks_in_level as f32 / total as f32,
        })
    }

    /// Finish the active level: grant the completion bonus, advance the
    /// frontier (never past the catalog's last level), re-check level-ups,
    /// and evaluate achievements. Runs at most once per started level; the
    /// active marker is cleared here.
    fn complete_level(&mut self, level_id: u8) -> LevelCompleteResult {
        self.active = None;

        self.state.player_xp += LEVEL_XP_BONUS;
        self.state.player_coins += LEVEL_COIN_BONUS;

        let unlocked_level = if self.state.current_level_index < self.catalog.max_level_id() {
            self.state.current_level_index += 1;
            Some(self.state.current_level_index)
        } else {
            None
        };

        let levels_gained = Self::check_level_up(&mut self.state);
        let new_achievements = achievement::evaluate(&mut self.state);
        self.state.touch();

        info!(
            "level {} complete (+{} xp, +{} coins)",
            level_id, LEVEL_XP_BONUS, LEVEL_COIN_BONUS
        );
        for id in &new_achievements {
            info!("achievement unlocked: {}", id.name());
        }

        LevelCompleteResult {
            level_id,
            xp_gained: LEVEL_XP_BONUS,
            coins_gained: LEVEL_COIN_BONUS,
            unlocked_level,
            levels_gained,
            new_achievements,
            stats: self.stats(),
        }
    }

    /// Consume XP into player levels. Loops: one award can cross several
    /// thresholds, and the counter must end below the current requirement.
    fn check_level_up(state: &mut PlayerState) -> u32 {
        let mut gained = 0;
        while state.player_xp >= xp_threshold(state.player_level) {
            state.player_xp -= xp_threshold(state.player_level);
            state.player_level += 1;
            gained += 1;
        }
        if gained > 0 {
            info!("level up! player is now level {}", state.player_level);
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::achievement::AchievementId;
    use crate::game::types::{LevelDefinition, TaskDefinition, STARTING_COINS};

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(LevelCatalog::standard())
    }

    #[test]
    fn locked_levels_are_rejected() {
        let mut engine = engine();
        let err = engine.start_level(3).unwrap_err();
        assert!(matches!(
            err,
            GameError::LevelLocked {
                requested: 3,
                frontier: 1
            }
        ));
    }

    #[test]
    fn unknown_levels_are_rejected_even_below_frontier() {
        let mut engine = ProgressionEngine::new(LevelCatalog::new(vec![LevelDefinition::new(
            2,
            "Only Level Two",
            "🍳",
        )
        .with_task(TaskDefinition::new("Cook", "Cook something", "🍳", 10))]));
        // Frontier starts at 1, but no level 1 exists in this catalog.
        assert!(matches!(
            engine.start_level(1),
            Err(GameError::UnknownLevel(1))
        ));
    }

    #[test]
    fn complete_without_active_level_fails() {
        let mut engine = engine();
        assert!(matches!(
            engine.complete_current_task(),
            Err(GameError::NoActiveTask)
        ));
    }

    #[test]
    fn first_level_scenario_matches_expected_numbers() {
        let mut engine = engine();
        let first = engine.start_level(1).unwrap();
        assert_eq!(first.title, "Prepare Pizza Dough");

        let advance = engine.complete_current_task().unwrap();
        match advance {
            TaskAdvance::Next { task, progress } => {
                assert_eq!(task.title, "Add Toppings");
                assert!((progress - 1.0 / 3.0).abs() < f32::EPSILON);
            }
            other => panic!("expected next task, got {other:?}"),
        }
        engine.complete_current_task().unwrap();

        let advance = engine.complete_current_task().unwrap();
        let TaskAdvance::LevelComplete(result) = advance else {
            panic!("expected level completion");
        };

        // 20 + 25 + 30 task XP + 50 bonus = 125; one threshold of 100 consumed.
        assert_eq!(result.level_id, 1);
        assert_eq!(result.unlocked_level, Some(2));
        assert_eq!(result.levels_gained, 1);
        let state = engine.state();
        assert_eq!(state.player_level, 2);
        assert_eq!(state.player_xp, 25);
        assert_eq!(state.player_coins, STARTING_COINS + 30 + 25);
        assert_eq!(state.current_level_index, 2);
        assert_eq!(
            state.achievements,
            vec![AchievementId::FirstSteps, AchievementId::PizzaPro]
        );
        assert!(!state.has_achievement(AchievementId::SpeedChef));
    }

    #[test]
    fn level_completes_exactly_once() {
        let mut engine = engine();
        engine.start_level(1).unwrap();
        engine.complete_current_task().unwrap();
        engine.complete_current_task().unwrap();
        let advance = engine.complete_current_task().unwrap();
        assert!(matches!(advance, TaskAdvance::LevelComplete(_)));

        // The boundary was crossed; without a new start_level there is
        // nothing left to complete.
        assert!(matches!(
            engine.complete_current_task(),
            Err(GameError::NoActiveTask)
        ));
    }

    #[test]
    fn one_award_can_cross_several_thresholds() {
        let mut engine = ProgressionEngine::new(LevelCatalog::new(vec![LevelDefinition::new(
            1,
            "Test Kitchen",
            "🧪",
        )
        .with_task(TaskDefinition::new(
            "Feast",
            "An enormous single sitting",
            "⚡",
            350,
        ))]));

        engine.start_level(1).unwrap();
        let advance = engine.complete_current_task().unwrap();
        let TaskAdvance::LevelComplete(_) = advance else {
            panic!("single-task level should complete");
        };

        // 350 task XP: 100 (level 1) + 200 (level 2) consumed, 50 remain;
        // the +50 bonus then sits at 100, below level 3's threshold of 300.
        let state = engine.state();
        assert_eq!(state.player_level, 3);
        assert_eq!(state.player_xp, 100);
        assert!(state.player_xp < xp_threshold(state.player_level));
    }

    #[test]
    fn frontier_stops_at_last_catalog_level() {
        let mut engine = ProgressionEngine::new(LevelCatalog::new(vec![LevelDefinition::new(
            1,
            "Solo",
            "🍽️",
        )
        .with_task(TaskDefinition::new("Plate", "Plate the dish", "🍽️", 5))]));

        engine.start_level(1).unwrap();
        let TaskAdvance::LevelComplete(result) = engine.complete_current_task().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(result.unlocked_level, None);
        assert_eq!(engine.state().current_level_index, 1);
    }

    #[test]
    fn replaying_an_earlier_level_keeps_the_frontier() {
        let mut engine = engine();
        engine.start_level(1).unwrap();
        for _ in 0..3 {
            engine.complete_current_task().unwrap();
        }
        assert_eq!(engine.state().current_level_index, 2);

        // Replay level 1; the frontier must not move backwards.
        engine.start_level(1).unwrap();
        assert_eq!(engine.state().current_level_index, 2);
        assert_eq!(engine.state().completed_tasks_in_level, 0);
        assert_eq!(engine.active_level(), Some(1));
    }

    #[test]
    fn xp_counter_stays_below_threshold_throughout() {
        let mut engine = engine();
        for level_id in 1..=4 {
            engine.start_level(level_id).unwrap();
            loop {
                let state = engine.state();
                assert!(state.player_xp < xp_threshold(state.player_level));
                match engine.complete_current_task().unwrap() {
                    TaskAdvance::Next { .. } => continue,
                    TaskAdvance::LevelComplete(_) => break,
                }
            }
        }
        let state = engine.state();
        assert!(state.player_xp < xp_threshold(state.player_level));
    }
}
