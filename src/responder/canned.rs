use async_trait::async_trait;
use log::debug;
use std::error::Error as StdError;
use std::time::Duration;
use super::ReplyGenerator;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

const ECHO_PREFIX_CHARS: usize = 30;

const SWAP_REPLY: &str =
    "I can help you swap tokens using the 1inch protocol. What tokens would you like to exchange? For example, I can help you swap ETH for USDC.";

const PRICE_REPLY: &str =
    "Based on the latest data, ETH is currently trading at $3,245.67. Would you like me to check any other token prices?";

const GAS_REPLY: &str =
    "Current gas prices on Ethereum:\n- Low: 25 gwei (~$2.50)\n- Average: 35 gwei (~$3.50)\n- High: 50 gwei (~$5.00)\n\nWould you like me to estimate gas costs for a specific transaction?";

const CODE_REPLY: &str =
    "Here's an example of how to interact with the 1inch API using JavaScript:\n\n```javascript\nasync function getQuote(fromToken, toToken, amount) {\n  const response = await fetch(\n    `https://api.1inch.io/v5.0/1/quote?fromTokenAddress=${fromToken}&toTokenAddress=${toToken}&amount=${amount}`\n  );\n  return await response.json();\n}\n```\n\nYou can use this to get price quotes before executing a swap.";

/// Checked in order, first hit wins.
const INTENTS: &[(&[&str], &str)] = &[
    (&["swap", "exchange"], SWAP_REPLY),
    (&["price", "worth"], PRICE_REPLY),
    (&["gas", "fee"], GAS_REPLY),
    (&["code", "example"], CODE_REPLY),
];

pub fn simulated_response(user_message: &str) -> String {
    let lower = user_message.to_lowercase();
    for (keywords, reply) in INTENTS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return reply.to_string();
        }
    }

    let prefix: String = user_message.chars().take(ECHO_PREFIX_CHARS).collect();
    format!(
        "I understand you're asking about {}... How can I assist you with that using my DeFi tools?",
        prefix
    )
}

pub struct CannedResponder {
    delay: Duration,
}

impl CannedResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl ReplyGenerator for CannedResponder {
    async fn respond(&self, prompt: &str) -> Result<String, Box<dyn StdError + Send + Sync>> {
        debug!("Simulating reply after {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(simulated_response(prompt))
    }
}
