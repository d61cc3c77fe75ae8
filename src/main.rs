use clap::{Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::services::FridgeService;
use domain::traits::{Bot, FridgeStore};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::line::LineAdapter;
use infrastructure::config::Config;
use infrastructure::http;
use infrastructure::storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "fridge-bot")]
#[command(about = "A LINE webhook bot for tracking fridge inventory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("fridge-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using environment", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting fridge-bot: {}", config.bot.name);

    let store = JsonFileStore::new(&config.storage.path);
    let service = Arc::new(FridgeService::new(store));

    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Some(credentials) = config.line_credentials() {
        // Run the LINE webhook server
        let host: IpAddr = config
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let addr = SocketAddr::new(host, config.server.port);

        let state = http::AppState {
            service,
            bot: Arc::new(LineAdapter::new(credentials.channel_access_token)),
            channel_secret: credentials.channel_secret,
        };

        rt.block_on(async {
            if let Err(e) = state.bot.start().await {
                tracing::error!("Failed to start bot: {}", e);
                return;
            }
            if let Err(e) = http::serve(addr, state).await {
                tracing::error!("Webhook server failed: {}", e);
            }
        });
    } else {
        // Run console bot (dev mode)
        tracing::warn!("LINE credentials not configured, running console adapter");
        rt.block_on(async {
            let bot = ConsoleAdapter::new();
            run_console_bot(bot, service).await;
        });
    }
}

async fn run_console_bot<S: FridgeStore>(bot: ConsoleAdapter, service: Arc<FridgeService<S>>) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: {} ({})", info.name, info.platform);

    // Main loop (for console mode)
    loop {
        let Some(input) = bot.read_line("> ").await else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        match service.handle(&input).await {
            Ok(reply) => {
                let _ = bot.reply("console", &reply).await;
            }
            Err(e) => {
                let _ = bot.reply("console", &format!("Error: {}", e)).await;
            }
        }
    }
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
