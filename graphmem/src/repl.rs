//! Line-oriented chat loop.
//!
//! Protocol:
//! - Lines starting with `#` are front-end commands (quit, user, relations, graph, help)
//! - All other lines are chat turns
//! - Replies go to stdout, logs to stderr

use crate::config::ChatConfig;
use graphmem_core::{
    ChatSession, GroqSynthesizer, HttpParser, MemoryService, Relation, SharedFactGraph,
};
use groq::Groq;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

const NOTHING_TO_SHOW: &str = "Nothing to show.";

/// What the loop does after a `#` command.
#[derive(Debug, PartialEq, Eq)]
pub enum Control {
    Continue(String),
    Quit,
}

/// Build a chat session from the configuration.
pub fn build_session(config: &ChatConfig) -> Result<ChatSession, Box<dyn std::error::Error>> {
    let parser = HttpParser::new(config.parser_url.clone())?;
    let service = MemoryService::new(SharedFactGraph::new(), Arc::new(parser));
    let mut chat = ChatSession::new(service, config.user_id.clone());

    match &config.api_key {
        Some(key) => {
            let synthesizer = GroqSynthesizer::new(Groq::new(key.clone())?).with_model(&config.model);
            info!(model = %config.model, "answers will be synthesized");
            chat = chat.with_synthesizer(Arc::new(synthesizer));
        }
        None => warn!("GROQ_API_KEY not set; answering with stored facts only"),
    }

    Ok(chat)
}

/// Run the chat loop until `#quit` or end of input.
pub async fn run_repl(mut chat: ChatSession) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Graph Memory ===");
    println!("User: {}", chat.user_id());
    println!();
    println!("{}", help_text());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };
        let line = line.trim();

        if let Some(command) = line.strip_prefix('#') {
            match run_command(&mut chat, command) {
                Control::Continue(output) => println!("{output}"),
                Control::Quit => {
                    println!("Goodbye!");
                    break;
                }
            }
            stdout.flush().ok();
            continue;
        }

        match chat.respond(line).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                println!("[ERROR] {e}");
            }
        }
        stdout.flush().ok();
    }

    Ok(())
}

/// Handle a `#` command (without the `#`).
pub fn run_command(chat: &mut ChatSession, command: &str) -> Control {
    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.first().copied() {
        Some("quit") | Some("exit") => Control::Quit,
        Some("user") => match parts.get(1) {
            Some(user) => {
                chat.set_user(*user);
                Control::Continue(format!("[USER] Now talking to {user}"))
            }
            None => Control::Continue(format!("[USER] {}", chat.user_id())),
        },
        Some("relations") => {
            let mut labels: Vec<String> = chat
                .graph()
                .list_relations(chat.user_id())
                .iter()
                .map(Relation::to_string)
                .collect();
            if labels.is_empty() {
                return Control::Continue(NOTHING_TO_SHOW.to_string());
            }
            labels.sort();
            Control::Continue(labels.join(", "))
        }
        Some("graph") => {
            let subgraph = chat.graph().user_subgraph(chat.user_id());
            if subgraph.is_empty() {
                return Control::Continue(NOTHING_TO_SHOW.to_string());
            }
            match serde_json::to_string_pretty(&subgraph) {
                Ok(json) => Control::Continue(json),
                Err(e) => Control::Continue(format!("[ERROR] Could not render graph: {e}")),
            }
        }
        Some("help") => Control::Continue(help_text()),
        _ => Control::Continue("[ERROR] Unknown command. Type #help for help.".to_string()),
    }
}

fn help_text() -> String {
    [
        "Commands:",
        "  #quit            - Exit",
        "  #user <id>       - Switch user (no id: show current user)",
        "  #relations       - List your stored relations",
        "  #graph           - Show your facts as JSON",
        "  #help            - Show this help",
        "  remember: RELATION entity",
        "  recall: RELATION",
        "  (anything else is a statement or a question)",
    ]
    .join("\n")
}
