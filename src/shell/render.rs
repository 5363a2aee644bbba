//! Player-facing text rendering for the terminal shell.
//!
//! Pure functions from engine results to short strings; nothing here touches
//! game state. Kept separate so the shell loop stays about control flow.

use crate::game::{
    xp_threshold, AchievementId, LevelCatalog, LevelCompleteResult, PlayerState, PlayerStats,
    TaskDefinition,
};

const PROGRESS_BAR_WIDTH: usize = 10;

/// The level selection list with lock markers.
pub fn format_level_list(catalog: &LevelCatalog, frontier: u8) -> String {
    let mut out = String::new();
    for level in catalog.levels() {
        let status = if level.id <= frontier {
            "UNLOCKED"
        } else {
            "LOCKED"
        };
        out.push_str(&format!(
            "  {} Level {}: {} [{}]\n",
            level.icon, level.id, level.title, status
        ));
    }
    out
}

/// The active task card.
pub fn format_task_card(task: &TaskDefinition) -> String {
    format!(
        "{} {}\n   {}\n   Reward: {} XP",
        task.icon, task.title, task.description, task.xp_reward
    )
}

/// Level progress as a bar plus percentage, `progress` in `[0, 1]`.
pub fn format_progress(progress: f32) -> String {
    let clamped = progress.clamp(0.0, 1.0);
    let filled = (clamped * PROGRESS_BAR_WIDTH as f32).round() as usize;
    let bar: String = "=".repeat(filled) + &" ".repeat(PROGRESS_BAR_WIDTH - filled);
    format!("[{}] {}%", bar, (clamped * 100.0).round() as u32)
}

/// One-line player stats.
pub fn format_stats(stats: &PlayerStats) -> String {
    format!(
        "Level {} | {} / {} XP | {} coins",
        stats.player_level,
        stats.player_xp,
        xp_threshold(stats.player_level),
        stats.player_coins
    )
}

/// Level completion summary: bonus, unlock, level-ups, achievements.
pub fn format_level_complete(result: &LevelCompleteResult) -> String {
    let mut out = format!(
        "🎉 Level {} complete! +{} XP, +{} coins\n",
        result.level_id, result.xp_gained, result.coins_gained
    );
    if let Some(next) = result.unlocked_level {
        out.push_str(&format!("🔓 Level {} unlocked!\n", next));
    }
    if result.levels_gained > 0 {
        out.push_str(&format!(
            "⭐ Level up! You are now Level {}!\n",
            result.stats.player_level
        ));
    }
    for id in &result.new_achievements {
        out.push_str(&format!("🏆 Achievement Unlocked: {}!\n", id.name()));
    }
    out.push_str(&format_stats(&result.stats));
    out
}

/// The achievement list with lock markers, in declared order.
pub fn format_achievement_list(state: &PlayerState) -> String {
    let mut out = String::new();
    for id in AchievementId::ALL {
        let marker = if state.has_achievement(id) {
            "✅"
        } else {
            "🔒"
        };
        out.push_str(&format!("  {} {} - {}\n", marker, id.name(), id.description()));
    }
    out
}
