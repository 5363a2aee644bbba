use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::achievement::AchievementId;

pub const PLAYER_STATE_SCHEMA_VERSION: u8 = 1;

/// Coins every fresh player starts with.
pub const STARTING_COINS: u32 = 100;

/// Mutable per-player progression state. Created fresh at session start,
/// mutated only through the [`ProgressionEngine`](super::engine::ProgressionEngine),
/// and discarded at logout. This is also the serialized snapshot format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    /// Highest unlocked level id (the frontier). Starts at 1.
    pub current_level_index: u8,
    /// Player character level. Starts at 1.
    pub player_level: u32,
    /// Running XP counter. Always below the current level's threshold after
    /// any XP-apply step; level-ups subtract their threshold.
    pub player_xp: u32,
    pub player_coins: u32,
    /// Tasks completed so far in the most recently started level.
    pub completed_tasks_in_level: u32,
    /// Earned achievements, in unlock order. Set semantics: no duplicates.
    #[serde(default)]
    pub achievements: Vec<AchievementId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl PlayerState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            current_level_index: 1,
            player_level: 1,
            player_xp: 0,
            player_coins: STARTING_COINS,
            completed_tasks_in_level: 0,
            achievements: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: PLAYER_STATE_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// One atomic unit of progress within a level. Immutable catalog data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDefinition {
    pub title: String,
    pub description: String,
    pub icon: String,
    /// XP granted on completion. Always positive.
    pub xp_reward: u32,
}

impl TaskDefinition {
    pub fn new(title: &str, description: &str, icon: &str, xp_reward: u32) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            xp_reward,
        }
    }
}

/// A themed set of ordered tasks. Immutable catalog data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelDefinition {
    pub id: u8,
    pub title: String,
    pub icon: String,
    pub tasks: Vec<TaskDefinition>,
}

impl LevelDefinition {
    pub fn new(id: u8, title: &str, icon: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            icon: icon.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: TaskDefinition) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn task_count(&self) -> u32 {
        self.tasks.len() as u32
    }
}

/// Read-only snapshot of the player's headline numbers, for rendering and
/// the status tooling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    pub player_level: u32,
    pub player_xp: u32,
    pub player_coins: u32,
    /// Highest unlocked level id.
    pub frontier: u8,
}

/// Outcome of completing a task: either the level continues with the next
/// task, or the task was the last one and the level completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TaskAdvance {
    Next {
        task: TaskDefinition,
        /// Completed tasks over total tasks, in `[0, 1]`.
        progress: f32,
    },
    LevelComplete(LevelCompleteResult),
}

/// Structured result of a level completion, for the presentation layer to
/// render. The engine itself renders nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelCompleteResult {
    pub level_id: u8,
    /// Flat completion bonus XP (on top of per-task rewards already applied).
    pub xp_gained: u32,
    /// Flat completion bonus coins.
    pub coins_gained: u32,
    /// Newly unlocked level id, if the frontier advanced.
    pub unlocked_level: Option<u8>,
    /// Player levels gained by the completion bonus itself.
    pub levels_gained: u32,
    /// Achievements that unlocked during this completion, in declared order.
    pub new_achievements: Vec<AchievementId>,
    pub stats: PlayerStats,
}
