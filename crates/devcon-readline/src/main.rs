mod render;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use devcon_application::{SessionController, SessionDeps};
use devcon_core::DevconError;
use devcon_core::store::KeyValueStore;
use devcon_infrastructure::logging::LOG_FILE_NAME;
use devcon_infrastructure::{
    ChatHistoryRepository, ConfigService, DevconPaths, FileKeyValueStore, LogTarget,
    MemoryKeyValueStore, UserMemoryRepository, init_logging,
};
use devcon_interaction::HttpChatBackend;

use crate::render::{TerminalNotifier, TerminalRenderer};

const COMMANDS: [&str; 4] = ["/clear", "/status", "/help", "/quit"];

/// rustyline helper that completes, hints and highlights slash commands.
#[derive(Clone)]
struct ChatHelper {
    commands: Vec<String>,
}

impl ChatHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ChatHelper {}

/// Picks the file store under the data directory, or an in-memory one when
/// no home directory can be resolved.
fn open_store(paths: &DevconPaths, quota_bytes: usize) -> Arc<dyn KeyValueStore> {
    match paths.store_dir() {
        Ok(dir) => Arc::new(FileKeyValueStore::new(dir, quota_bytes)),
        Err(err) => {
            tracing::warn!(error = %err, "No data directory; conversation will not be kept");
            Arc::new(MemoryKeyValueStore::with_quota(quota_bytes))
        }
    }
}

fn print_help() {
    println!("{}", "Ask anything about coding, development, or tech concepts.".bright_black());
    println!("{}", "  /clear   start a new conversation".bright_black());
    println!("{}", "  /status  show whether the DEVCON AI server is awake".bright_black());
    println!("{}", "  /quit    leave (history is kept for next time)".bright_black());
    println!();
}

/// Interactive DEVCON AI chat.
///
/// Loads the previous conversation, probes the backend in the background
/// and then reads questions until the user quits. Input is not accepted
/// while an answer is pending.
#[tokio::main]
async fn main() -> Result<()> {
    let paths = DevconPaths::from_env();
    match paths.logs_dir() {
        Ok(dir) => init_logging(LogTarget::File(dir.join(LOG_FILE_NAME))),
        Err(_) => init_logging(LogTarget::Stderr),
    }

    let config = ConfigService::new(paths.clone()).get_config();
    tracing::info!(backend = %config.backend_url, "Starting devcon-chat");

    let store = open_store(&paths, config.storage_quota_bytes);
    let deps = SessionDeps {
        backend: Arc::new(HttpChatBackend::new(&config)?),
        history: ChatHistoryRepository::new(store.clone()),
        memory: UserMemoryRepository::new(store),
        notifier: Arc::new(TerminalNotifier),
    };
    let controller = SessionController::new(deps, &config);
    let mut views = controller.subscribe();

    // The probe finishes on its own; nothing waits for it.
    let _probe = controller.mount().await?;

    println!("{}", "=== DEVCON AI ===".bright_magenta().bold());
    print_help();

    let mut renderer = TerminalRenderer::new();
    renderer.render(&views.borrow_and_update());

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "/quit" | "quit" | "exit" => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            "/help" => {
                print_help();
                continue;
            }
            "/status" => {
                let view = controller.view().await;
                println!("{}", format!("Backend: {}", view.availability).bright_black());
                continue;
            }
            "/clear" => {
                controller.clear().await?;
                renderer.render(&views.borrow_and_update());
                continue;
            }
            _ => {}
        }

        let _ = rl.add_history_entry(&line);

        let reply = match controller.submit(trimmed).await {
            Ok(reply) => reply,
            Err(DevconError::EmptyInput) => continue,
            Err(err) => {
                eprintln!("{}", format!("Error: {}", err).red());
                continue;
            }
        };
        renderer.render(&views.borrow_and_update());

        if let Err(err) = reply.await {
            tracing::error!(error = %err, "Reply task failed");
        }
        renderer.render(&views.borrow_and_update());
    }

    controller.unmount();
    Ok(())
}
