//! Binary entrypoint for the Wildtree CLI.
//!
//! Commands:
//! - `start [--user-id <id>] [--name <name>]` - run the bot with a console transport on stdin/stdout
//! - `init` - create a starter `config.toml`
//! - `status [--json]` - print a summary of the user store
//!
//! See the library crate docs for module-level details: `wildtree::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use wildtree::bot::{BotServer, InboundCommand};
use wildtree::config::Config;
use wildtree::tree::TreeStore;

#[derive(Parser)]
#[command(name = "wildtree")]
#[command(about = "A virtual tree companion bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot with a console transport: stdin lines in, replies on stdout
    Start {
        /// User identifier to act as
        #[arg(short, long, default_value_t = 1)]
        user_id: u64,

        /// Display name shown in the profile card (defaults to $USER)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Initialize a new bot configuration
    Init,
    /// Show a summary of the user store
    Status {
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(serde::Serialize)]
struct StatusSummary {
    data_dir: String,
    users: usize,
    user_ids: Vec<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes the default later)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    if !matches!(cli.command, Commands::Init) {
        init_logging(&pre_config, cli.verbose);
    }

    match cli.command {
        Commands::Start { user_id, name } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            info!("Starting Wildtree v{}", env!("CARGO_PKG_VERSION"));
            run_console(config, user_id, name).await
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote starter configuration to {}", cli.config);
            println!("Edit it, then run: wildtree start");
            Ok(())
        }
        Commands::Status { json } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            let store = TreeStore::open(&config.storage.data_dir)?;
            let mut user_ids = store.list_user_ids()?;
            user_ids.sort_unstable();
            let summary = StatusSummary {
                data_dir: config.storage.data_dir.clone(),
                users: store.user_count()?,
                user_ids,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Data dir: {}", summary.data_dir);
                println!("Users:    {}", summary.users);
                if !summary.user_ids.is_empty() {
                    let rendered: Vec<String> =
                        summary.user_ids.iter().map(|id| id.to_string()).collect();
                    println!("IDs:      {}", rendered.join(", "));
                }
            }
            Ok(())
        }
    }
}

/// Drive the bot server with a minimal console transport: each stdin line is
/// one inbound command from the chosen user, replies print to stdout. EOF or
/// `quit` ends the session.
async fn run_console(config: Config, user_id: u64, name: Option<String>) -> Result<()> {
    let display_name = name
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "friend".to_string());

    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    let server = BotServer::new(&config, inbound_rx, outbound_tx)?;
    let server_task = tokio::spawn(server.run());

    let printer = tokio::spawn(async move {
        while let Some(reply) = outbound_rx.recv().await {
            println!("{}\n", reply.text);
        }
    });

    info!("console session as user {} ({})", user_id, display_name);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let sent = inbound_tx.send(InboundCommand {
            user_id,
            display_name: display_name.clone(),
            text: line,
        });
        if sent.is_err() {
            break;
        }
    }

    drop(inbound_tx);
    server_task.await??;
    printer.await?;
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity wins; otherwise the config's level, otherwise info.
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.as_deref())
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    if let Some(file) = config.as_ref().and_then(|c| c.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let sink = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Echo to the console only when stdout is a terminal; under a
            // service manager the file is the single destination.
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |_fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = sink.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    println!("{}", line);
                }
                Ok(())
            });
        }
    }

    let _ = builder.try_init();
}
