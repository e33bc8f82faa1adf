pub mod agent;
pub mod models;
pub mod cli;
pub mod history;
pub mod responder;
pub mod terminal;

use agent::ChatAgent;
use cli::Args;
use history::initialize_history_store;
use log::info;
use responder::new_responder;
use std::error::Error;
use std::time::Duration;
use tokio::io::BufReader;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Agent ID: {}", args.agent_id);
    info!("History Store Type: {}", args.history_type);
    info!("History Directory: {}", args.history_dir);
    info!("History Store Host: {}", args.history_host);
    info!("Reply Delay: {}ms", args.reply_delay_ms);
    info!("-------------------------");

    let store = initialize_history_store(&args)?;
    let responder = new_responder(Duration::from_millis(args.reply_delay_ms));
    let mut agent = ChatAgent::open(&args.agent_id, store, responder).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    terminal::run_session(&mut agent, stdin, tokio::io::stdout()).await?;

    Ok(())
}
