use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "portosync", about = "Consolidated KSEI portfolio across accounts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve get_portfolio and list_account_names over stdio (JSON-RPC)
    McpStdio,
    /// Fetch the consolidated portfolio once and print it as JSON
    Portfolio {
        /// Account to include (repeatable); all accounts when omitted
        #[arg(long = "account")]
        accounts: Vec<String>,
    },
    /// List configured account names
    Accounts,
    /// Print version
    Version,
}
