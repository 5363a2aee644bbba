//! Static level and task data for the SwiftFood career.
//!
//! The catalog is read-only: levels are defined at build time and exposed in
//! stable ascending id order so the engine can advance the frontier by
//! walking to the next id.

use super::errors::GameError;
use super::types::{LevelDefinition, TaskDefinition};

/// Read-only lookup over the ordered level definitions.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Build a catalog from arbitrary definitions (sorted by id). Tests use
    /// this to exercise the engine against small custom careers.
    pub fn new(mut levels: Vec<LevelDefinition>) -> Self {
        levels.sort_by_key(|level| level.id);
        Self { levels }
    }

    /// The shipped four-level SwiftFood career.
    pub fn standard() -> Self {
        Self::new(standard_levels())
    }

    pub fn level_by_id(&self, id: u8) -> Result<&LevelDefinition, GameError> {
        self.levels
            .iter()
            .find(|level| level.id == id)
            .ok_or(GameError::UnknownLevel(id))
    }

    /// Level ids in ascending order.
    pub fn level_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.levels.iter().map(|level| level.id)
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    /// Highest defined level id; the frontier never advances past it.
    pub fn max_level_id(&self) -> u8 {
        self.levels.last().map(|level| level.id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn standard_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition::new(1, "Pizza Master", "🍕")
            .with_task(TaskDefinition::new(
                "Prepare Pizza Dough",
                "Mix flour, water, and yeast to create the perfect pizza base",
                "🍕",
                20,
            ))
            .with_task(TaskDefinition::new(
                "Add Toppings",
                "Spread sauce and add your favorite toppings",
                "🧀",
                25,
            ))
            .with_task(TaskDefinition::new(
                "Bake to Perfection",
                "Cook the pizza at the right temperature for the perfect crust",
                "🔥",
                30,
            )),
        LevelDefinition::new(2, "Burger Builder", "🍔")
            .with_task(TaskDefinition::new(
                "Form the Patty",
                "Shape ground beef into a perfect burger patty",
                "🥩",
                25,
            ))
            .with_task(TaskDefinition::new(
                "Grill the Patty",
                "Cook the patty to your preferred doneness",
                "🔥",
                30,
            ))
            .with_task(TaskDefinition::new(
                "Assemble the Burger",
                "Layer lettuce, tomato, cheese, and condiments",
                "🍔",
                35,
            )),
        LevelDefinition::new(3, "Noodle Ninja", "🍜")
            .with_task(TaskDefinition::new(
                "Boil the Noodles",
                "Cook noodles to al dente perfection",
                "🍜",
                30,
            ))
            .with_task(TaskDefinition::new(
                "Prepare the Sauce",
                "Create a flavorful sauce with vegetables and spices",
                "🥬",
                35,
            ))
            .with_task(TaskDefinition::new(
                "Combine and Serve",
                "Mix noodles with sauce and garnish with herbs",
                "🌿",
                40,
            )),
        LevelDefinition::new(4, "Dessert Wizard", "🍰")
            .with_task(TaskDefinition::new(
                "Mix the Batter",
                "Combine flour, sugar, eggs, and butter for the perfect cake",
                "🥚",
                35,
            ))
            .with_task(TaskDefinition::new(
                "Bake the Cake",
                "Bake at the right temperature for a fluffy texture",
                "🔥",
                40,
            ))
            .with_task(TaskDefinition::new(
                "Decorate with Style",
                "Add frosting, sprinkles, and creative decorations",
                "🎨",
                45,
            )),
    ]
}
