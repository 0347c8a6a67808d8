use clap::Parser;
use log::LevelFilter;
use portosync::application::tools::GetPortfolioArgs;
use portosync::cli::commands::{Cli, Commands};
use portosync::config::AppConfig;
use portosync::infrastructure::mcp::server::McpServer;
use portosync::Portosync;
use simple_logger::SimpleLogger;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("portosync {}", portosync::VERSION);
        return;
    }

    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Warn).env().init() {
        eprintln!("Error initializing logger: {e}");
        std::process::exit(1);
    }

    let app = match AppConfig::from_env().and_then(|config| {
        for account in &config.accounts {
            log::info!("Loaded KSEI account: {}", account.name);
        }
        Portosync::new(&config)
    }) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing portosync: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(Arc::new(app), cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: Arc<Portosync>, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::McpStdio => {
            McpServer::new(app).run_stdio().await?;
        }
        Commands::Portfolio { accounts } => {
            let result = app
                .get_portfolio(&GetPortfolioArgs {
                    account_names: accounts,
                })
                .await?;
            eprintln!("{}", result.text);
            println!("{}", serde_json::to_string_pretty(&result.structured)?);
        }
        Commands::Accounts => {
            let result = app.list_account_names();
            eprintln!("{}", result.text);
            println!("{}", serde_json::to_string_pretty(&result.structured)?);
        }
        Commands::Version => println!("portosync {}", portosync::VERSION),
    }
    Ok(())
}
