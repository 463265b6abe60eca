use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod serve;

use crate::ai::prompt::Persona;
use crate::core::init_tracing;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,

        /// Instruction persona and request settings to use
        #[arg(long, value_enum, default_value = "grounded")]
        persona: Persona,
    },
    /// Start a chat session in the terminal
    Chat {
        /// Instruction persona and request settings to use
        #[arg(long, value_enum, default_value = "grounded")]
        persona: Persona,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve {
            host,
            port,
            persona,
        }) => {
            // axum logs rejections from built-in extractors with the `axum::rejection`
            // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
            init_tracing(&format!(
                "{}=debug,tower_http=debug,axum::rejection=trace",
                env!("CARGO_CRATE_NAME")
            ));
            serve::run(host, port, persona).await?;
        }
        Some(Command::Chat { persona }) => {
            // Keep the terminal quiet unless something is wrong
            init_tracing(&format!("{}=warn", env!("CARGO_CRATE_NAME")));
            chat::run(persona).await?;
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_serve_with_persona() {
        let cli = Cli::try_parse_from(["casebrief", "serve", "--port", "8080", "--persona", "briefing"])
            .unwrap();
        match cli.command {
            Some(Command::Serve { host, port, persona }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, "8080");
                assert_eq!(persona, Persona::Briefing);
            }
            _ => panic!("Expected serve command"),
        }
    }

    #[test]
    fn test_chat_defaults_to_grounded() {
        let cli = Cli::try_parse_from(["casebrief", "chat"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Chat {
                persona: Persona::Grounded
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_persona() {
        assert!(Cli::try_parse_from(["casebrief", "chat", "--persona", "pirate"]).is_err());
    }
}
