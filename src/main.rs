use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use mentor::config::Config;
use mentor::session::ChatSession;
use mentor::store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Load .env from the binary's directory first (the process may start
    // with any CWD). Falls back to dotenvy's default CWD search.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            } else {
                dotenvy::dotenv().ok();
            }
        } else {
            dotenvy::dotenv().ok();
        }
    } else {
        dotenvy::dotenv().ok();
    }

    tracing::info!("mentor starting");

    let config = Config::load()?;
    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::new(config, store)?;

    if let Some(welcome) = session.greeting().await {
        println!("{welcome}\n");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        let reply = session.send(message).await;
        println!("\n{reply}\n");
    }

    tracing::info!("mentor shutting down");
    Ok(())
}
