//! Graph memory chat front end.
//!
//! Tell it facts about yourself, ask about them later:
//!
//! ```bash
//! cargo run -p graphmem -- --user alice --parser-url http://127.0.0.1:8080/parse
//! ```

mod config;
mod repl;

use config::{parse_config_from_args, ChatConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = parse_config_from_args(&args, ChatConfig::from_env());
    tracing::info!(user = %config.user_id, parser = %config.parser_url, "starting");

    let chat = repl::build_session(&config)?;
    repl::run_repl(chat).await
}

/// Logs go to stderr so stdout stays the chat transcript.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_help() {
    println!("graphmem - remembers facts you tell it");
    println!();
    println!("USAGE:");
    println!("  graphmem [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --user <ID>           User id (env GRAPHMEM_USER, default: user_1)");
    println!("  --parser-url <URL>    Sentence parser endpoint (env GRAPHMEM_PARSER_URL)");
    println!("  --model <NAME>        Answer model (env GRAPHMEM_MODEL)");
    println!();
    println!("ENVIRONMENT:");
    println!("  GROQ_API_KEY          Enables LLM-phrased answers");
    println!("  RUST_LOG              Log filter (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("  graphmem                               # Defaults");
    println!("  graphmem --user alice --model llama-3.1-8b-instant");
}
