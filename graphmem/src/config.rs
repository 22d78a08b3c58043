//! Front-end configuration from the environment and command line.

use graphmem_core::answer::DEFAULT_ANSWER_MODEL;
use graphmem_core::parser::DEFAULT_PARSER_URL;

pub const DEFAULT_USER: &str = "user_1";

/// Settings for one chat front-end run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// User whose facts are read and written.
    pub user_id: String,
    /// Endpoint of the sentence annotation service.
    pub parser_url: String,
    /// Groq API key. Without one, answers are built from stored facts only.
    pub api_key: Option<String>,
    /// Model used for answer synthesis.
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER.to_string(),
            parser_url: DEFAULT_PARSER_URL.to_string(),
            api_key: None,
            model: DEFAULT_ANSWER_MODEL.to_string(),
        }
    }
}

impl ChatConfig {
    /// Read `GRAPHMEM_USER`, `GRAPHMEM_PARSER_URL`, `GROQ_API_KEY` and
    /// `GRAPHMEM_MODEL`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(user) = lookup("GRAPHMEM_USER") {
            config = config.with_user(user);
        }
        if let Some(url) = lookup("GRAPHMEM_PARSER_URL") {
            config = config.with_parser_url(url);
        }
        if let Some(model) = lookup("GRAPHMEM_MODEL") {
            config = config.with_model(model);
        }
        config.api_key = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty());
        config
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_parser_url(mut self, url: impl Into<String>) -> Self {
        self.parser_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Apply `--user`, `--parser-url` and `--model` flags on top of `config`.
pub fn parse_config_from_args(args: &[String], mut config: ChatConfig) -> ChatConfig {
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--user" => {
                if let Some(user) = args.get(i + 1) {
                    config = config.with_user(user.clone());
                    i += 1;
                }
            }
            "--parser-url" => {
                if let Some(url) = args.get(i + 1) {
                    config = config.with_parser_url(url.clone());
                    i += 1;
                }
            }
            "--model" => {
                if let Some(model) = args.get(i + 1) {
                    config = config.with_model(model.clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}
