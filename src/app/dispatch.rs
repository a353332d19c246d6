use crate::app::status::render_status;
use crate::cli::{Cli, Commands};
use crate::client::HttpAssistantClient;
use crate::config::Config;
use crate::session::{
    ChatSession, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, TurnOutcome,
};
use crate::ui::{repl, style as ui};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

/// Token storage for this run: the state file, or memory with `--ephemeral`.
pub fn open_store(config: &Config, ephemeral: bool) -> Arc<dyn KeyValueStore> {
    if ephemeral {
        debug!("using in-memory token storage");
        Arc::new(MemoryKeyValueStore::new())
    } else {
        Arc::new(FileKeyValueStore::new(config.state_file()))
    }
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
        config.validate().context("invalid --endpoint")?;
    }

    let store = open_store(&config, cli.ephemeral);
    info!(endpoint = %config.endpoint, "starting humanic");

    match cli.command_or_default() {
        Commands::Chat => {
            let client = HttpAssistantClient::from_config(&config);
            let mut session = ChatSession::from_config(&config, store);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            repl::run(
                &mut session,
                &client,
                &config.assistant_name,
                stdin,
                &mut stdout,
            )
            .await
        }

        Commands::Tui => run_tui(&config, store),

        Commands::Send { message } => {
            let client = HttpAssistantClient::from_config(&config);
            let mut session = ChatSession::from_config(&config, store);
            send_once(&mut session, &client, &config.assistant_name, &message).await
        }

        Commands::Reset { yes } => {
            if !yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt("Forget the current conversation?")
                    .default(false)
                    .interact()
                    .context("confirmation prompt failed")?;
                if !confirmed {
                    println!("{}", ui::dim("Nothing changed."));
                    return Ok(());
                }
            }
            ChatSession::from_config(&config, store).reset();
            println!("{} Conversation cleared.", ui::success("✓"));
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config, store.as_ref(), cli.ephemeral));
            Ok(())
        }
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let client = Arc::new(HttpAssistantClient::from_config(config));
    let mut session = ChatSession::from_config(config, store);
    crate::ui::tui::run_chat_tui(&mut session, client, &config.assistant_name)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &Config, _store: Arc<dyn KeyValueStore>) -> Result<()> {
    bail!("this build has no full-screen view; rebuild with `--features tui`")
}

/// One exchange, printed to stdout. Failures become the process error.
pub async fn send_once(
    session: &mut ChatSession,
    client: &dyn crate::client::AssistantClient,
    assistant_name: &str,
    message: &str,
) -> Result<()> {
    let Some(outcome) = session.submit_user_turn(client, message).await else {
        bail!("message must not be empty");
    };

    match outcome {
        TurnOutcome::Replied(_) => {
            if let Some(reply) = session.transcript().last() {
                print!("{}", repl::format_message(reply, assistant_name));
            }
            Ok(())
        }
        TurnOutcome::Failed(e) => Err(anyhow::Error::new(e).context(
            session
                .last_error()
                .unwrap_or(crate::error::GENERIC_FAILURE_MESSAGE),
        )),
        TurnOutcome::Discarded => bail!("reply was superseded"),
    }
}
