use crate::agent::ChatAgent;
use crate::history::format_transcript;
use log::{ error, info };
use std::error::Error;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt };

#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    History,
    Quit,
    Chat(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Empty,
        "/history" => Input::History,
        "/quit" | "/exit" => Input::Quit,
        text => Input::Chat(text),
    }
}

/// Drives one chat session until `/quit` or end of input.
pub async fn run_session<R, W>(
    agent: &mut ChatAgent,
    reader: R,
    mut writer: W
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin
{
    writer.write_all(format!("Agent #{}\n\n", agent.agent_id()).as_bytes()).await?;
    writer.write_all(format_transcript(agent.conversation()).as_bytes()).await?;
    writer.write_all(b"\nType a message, /history to reprint, /quit to leave.\n").await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(b"You: ").await?;
        writer.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                break;
            }
        };

        match parse_input(&line) {
            Input::Empty => {
                continue;
            }
            Input::Quit => {
                break;
            }
            Input::History => {
                writer.write_all(format_transcript(agent.conversation()).as_bytes()).await?;
            }
            Input::Chat(text) => {
                writer.write_all(b"Assistant: ...\n").await?;
                writer.flush().await?;
                match agent.send_message(text).await {
                    Ok(reply) => {
                        writer.write_all(format!("Assistant: {}\n", reply.content).as_bytes()).await?;
                    }
                    Err(e) => {
                        error!("Failed to send message for agent {}: {}", agent.agent_id(), e);
                        writer.write_all(format!("Error: {}\n", e).as_bytes()).await?;
                    }
                }
            }
        }
    }

    writer.write_all(b"\nGoodbye!\n").await?;
    writer.flush().await?;
    info!("Session for agent {} closed", agent.agent_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{ ConversationStore, MemoryStore };
    use crate::responder::canned::CannedResponder;
    use crate::models::chat::Role;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn commands_are_recognised() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("/history\n"), Input::History);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("  swap ETH "), Input::Chat("swap ETH"));
    }

    #[tokio::test(start_paused = true)]
    async fn session_transcript() {
        let store = ConversationStore::new(Arc::new(MemoryStore::default()));
        let responder = Arc::new(CannedResponder::new(Duration::from_millis(1500)));
        let mut agent = ChatAgent::open("5", store, responder).await.unwrap();

        let input: &[u8] = b"\nwhat's the price of ETH\n/history\n/quit\nnever sent\n";
        let mut output = Vec::new();
        run_session(&mut agent, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Agent #5\n"));
        assert!(text.contains("Assistant: Based on the latest data, ETH is currently trading at $3,245.67."));
        assert!(text.contains("User: what's the price of ETH\n"));
        assert!(text.ends_with("Goodbye!\n"));

        let roles: Vec<Role> = agent.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    }
}
