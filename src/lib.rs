//! # SwiftFood - Cooking Career Mini-Game
//!
//! SwiftFood is a single-player, terminal-based progression game. Players work
//! through four themed cooking levels (pizza, burgers, noodles, dessert), each
//! a short sequence of tasks that grant XP and coins. Completing a level
//! unlocks the next one and may unlock achievements.
//!
//! ## Features
//!
//! - **Progression Core**: Synchronous level/task state machine with XP
//!   thresholds, coin rewards, and achievement evaluation.
//! - **Login Gate**: Pluggable authentication seam with an open provider that
//!   accepts any credentials (plus guest logins), so a real provider can be
//!   dropped in later without touching the game core.
//! - **Save Snapshots**: Sled-backed, fire-and-forget player snapshots.
//!   Sessions always start fresh; snapshots exist for inspection and tooling.
//! - **Terminal Shell**: Line-oriented play loop with periodic autosave,
//!   built on Tokio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swiftfood::config::Config;
//! use swiftfood::shell::GameShell;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load("config.toml").await?;
//!
//!     // Create and run the interactive shell
//!     let mut shell = GameShell::new(config)?;
//!     shell.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Progression core: catalog, engine, achievements, save store
//! - [`shell`] - Terminal front end: login gate, sessions, rendering
//! - [`config`] - Configuration management and validation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Game Shell    │ ← Login gate, command loop, rendering
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Progression    │ ← Levels, tasks, XP, achievements
//! │    Engine       │
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Save Store    │ ← Sled-backed snapshots
//! └─────────────────┘
//! ```
//!
//! The engine never performs I/O of its own: the shell feeds it commands and
//! forwards its structured results to the renderer and the save store.

pub mod config;
pub mod game;
pub mod logutil;
pub mod shell;
