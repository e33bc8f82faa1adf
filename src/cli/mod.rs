use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Agent identifier; each agent keeps its own conversation.
    #[arg(long, env = "AGENT_ID", default_value = "1")]
    pub agent_id: String,

    // --- History Store Args ---
    /// History chat store type (file, redis, memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "file")]
    pub history_type: String,

    /// Directory holding one JSON file per conversation (file store).
    #[arg(long, env = "HISTORY_DIR", default_value = ".chat-history")]
    pub history_dir: String,

    /// History chat store host endpoint (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "HISTORY_HOST", default_value = "redis://127.0.0.1:6379")]
    pub history_host: String,

    /// Prefix for Redis history keys.
    #[arg(long, env = "HISTORY_REDIS_PREFIX", default_value = "")]
    pub history_redis_prefix: String,

    // --- Responder Args ---
    /// Artificial delay before a reply, in milliseconds.
    #[arg(long, env = "REPLY_DELAY_MS", default_value = "1500")]
    pub reply_delay_ms: u64,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "defi-chat",
            "--agent-id",
            "99",
            "--history-type",
            "memory",
            "--reply-delay-ms",
            "0",
        ]);
        assert_eq!(args.agent_id, "99");
        assert_eq!(args.history_type, "memory");
        assert_eq!(args.reply_delay_ms, 0);
    }
}
