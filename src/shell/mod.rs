//! Terminal front end: login gate, command loop, autosave scheduling.
//!
//! The shell owns the configuration, the save store, and the auth provider.
//! It turns lines of player input into engine calls and engine results into
//! rendered text. Engine errors are local, recoverable conditions: they are
//! printed and play continues.

pub mod auth;
pub mod render;
pub mod session;

pub use auth::{guest, AuthError, AuthProvider, Authed, OpenAuth};
pub use session::Session;

use std::io::Write as _;
use std::time::Duration;

use anyhow::Result;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::Config;
use crate::game::{SaveStore, TaskAdvance};
use crate::logutil::escape_log;

type InputLines = Lines<BufReader<Stdin>>;

/// What the command dispatcher decided about the session.
enum Dispatch {
    Continue,
    Logout,
    Quit,
}

pub struct GameShell {
    config: Config,
    store: SaveStore,
    auth: Box<dyn AuthProvider + Send + Sync>,
}

impl GameShell {
    pub fn new(config: Config) -> Result<Self> {
        let store = SaveStore::open(&config.storage.data_dir)?;
        Ok(Self {
            config,
            store,
            auth: Box::new(OpenAuth),
        })
    }

    /// Swap the login gate's credential check.
    pub fn with_auth(mut self, auth: Box<dyn AuthProvider + Send + Sync>) -> Self {
        self.auth = auth;
        self
    }

    /// Run the shell until the player quits: login gate, then the play loop;
    /// logout returns to the gate.
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", self.config.game.welcome_message);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let Some(user) = self.login_gate(&mut lines).await? else {
                break;
            };
            let quit = self.play(user, &mut lines).await?;
            if quit {
                break;
            }
        }
        println!("Thanks for playing!");
        Ok(())
    }

    /// The fake login gate. Returns `None` when the player quits before
    /// logging in. Any credentials pass; see [`auth`].
    async fn login_gate(&self, lines: &mut InputLines) -> Result<Option<Authed>> {
        loop {
            prompt("login, register, guest, or quit? ");
            let Some(line) = lines.next_line().await? else {
                return Ok(None);
            };
            let choice = line.trim().to_lowercase();
            let attempt = match choice.as_str() {
                "login" | "l" => self.login_form(lines).await?,
                "register" | "r" => self.register_form(lines).await?,
                "guest" | "g" => Some(guest()),
                "quit" | "q" | "exit" => return Ok(None),
                "" => continue,
                other => {
                    println!("Unknown choice: {}", other);
                    continue;
                }
            };
            let Some(user) = attempt else {
                continue;
            };

            // The original game shows a spinner here; the delay is pure
            // presentation and never reaches the progression core.
            println!("Processing...");
            tokio::time::sleep(Duration::from_millis(self.config.game.login_delay_ms)).await;

            info!(
                "login successful for {} (session {})",
                escape_log(&user.username),
                user.session_id
            );
            println!("Login successful! Welcome, {}.", user.username);
            return Ok(Some(user));
        }
    }

    async fn login_form(&self, lines: &mut InputLines) -> Result<Option<Authed>> {
        prompt("Username: ");
        let Some(username) = lines.next_line().await? else {
            return Ok(None);
        };
        let password =
            tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: ")).await??;

        match self.auth.authenticate(&username, &password) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                println!("{}", e);
                Ok(None)
            }
        }
    }

    async fn register_form(&self, lines: &mut InputLines) -> Result<Option<Authed>> {
        prompt("Username: ");
        let Some(username) = lines.next_line().await? else {
            return Ok(None);
        };
        prompt("Email: ");
        let Some(email) = lines.next_line().await? else {
            return Ok(None);
        };
        let password =
            tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: ")).await??;
        let confirm =
            tokio::task::spawn_blocking(|| rpassword::prompt_password("Confirm password: "))
                .await??;

        match self.auth.register(&username, &email, &password, &confirm) {
            Ok(user) => {
                println!("Registration successful!");
                Ok(Some(user))
            }
            Err(e) => {
                println!("{}", e);
                Ok(None)
            }
        }
    }

    /// The play loop for one session. Returns `true` when the player wants to
    /// quit the program, `false` on logout back to the gate.
    async fn play(&self, user: Authed, lines: &mut InputLines) -> Result<bool> {
        let mut session = Session::begin(user, &self.store);
        println!();
        println!(
            "{}",
            render::format_level_list(
                session.engine.catalog(),
                session.engine.state().current_level_index
            )
        );
        println!("Type 'help' for commands.");

        let mut autosave =
            tokio::time::interval(Duration::from_secs(self.config.game.autosave_interval_secs));
        // An interval fires immediately once; consume that tick so the first
        // real autosave lands one full interval into the session.
        autosave.tick().await;

        loop {
            prompt("> ");
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        session.logout(&self.store);
                        return Ok(true);
                    };
                    session.touch();
                    match self.dispatch(&mut session, line.trim()) {
                        Dispatch::Continue => {}
                        Dispatch::Logout => {
                            session.logout(&self.store);
                            println!("Logged out.");
                            return Ok(false);
                        }
                        Dispatch::Quit => {
                            session.logout(&self.store);
                            return Ok(true);
                        }
                    }
                }
                _ = autosave.tick() => {
                    session.autosave(&self.store);
                }
            }
        }
    }

    fn dispatch(&self, session: &mut Session, input: &str) -> Dispatch {
        debug!("command: {}", escape_log(input));
        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd.to_lowercase().as_str() {
            "levels" | "l" => {
                print!(
                    "{}",
                    render::format_level_list(
                        session.engine.catalog(),
                        session.engine.state().current_level_index
                    )
                );
            }
            "start" | "s" => match arg.parse::<u8>() {
                Ok(level_id) => match session.engine.start_level(level_id) {
                    Ok(task) => {
                        println!("{}", render::format_task_card(&task));
                    }
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: start <level number>"),
            },
            "done" | "d" => match session.engine.complete_current_task() {
                Ok(TaskAdvance::Next { task, progress }) => {
                    println!("Task complete! {}", render::format_progress(progress));
                    println!("{}", render::format_task_card(&task));
                }
                Ok(TaskAdvance::LevelComplete(result)) => {
                    println!("{}", render::format_level_complete(&result));
                }
                Err(e) => println!("{}", e),
            },
            "stats" => println!("{}", render::format_stats(&session.engine.stats())),
            "achievements" | "a" => {
                print!("{}", render::format_achievement_list(session.engine.state()));
            }
            "help" | "h" | "?" => {
                println!("Commands:");
                println!("  levels         show the level list");
                println!("  start <n>      start (or replay) an unlocked level");
                println!("  done           complete the current task");
                println!("  stats          show level, XP, and coins");
                println!("  achievements   show achievement progress");
                println!("  logout         end the session");
                println!("  quit           leave the game");
            }
            "logout" => return Dispatch::Logout,
            "quit" | "q" | "exit" => return Dispatch::Quit,
            "" => {}
            other => println!("Unknown command: {} (type 'help')", other),
        }
        Dispatch::Continue
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}
