use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seed_config::SeedConfig;
use seed_tools::{
    context::{read_config, SeedContext},
    nft::{deploy_store, mint_tokens, DEFAULT_MINT_METHOD},
    seed::Seeder,
    subcommand::workflow::WorkflowCommand,
    trace,
};
use seed_types::AccountId;
use serde::Serialize;

/// Seed a NEAR testnet with NFT marketplace activity.
#[derive(Parser)]
#[clap(name = "seed-testnet", version)]
struct Cli {
    /// The config file path, testnet defaults when omitted
    #[clap(short = 'c', long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full seeding script (default)
    Seed {
        /// Env file receiving the block range, overrides the config
        #[clap(long)]
        env_path: Option<PathBuf>,
    },
    /// Print the current final block height
    BlockHeight,
    /// Mint test tokens on the store
    Mint {
        #[clap(long)]
        account: AccountId,
        #[clap(long, default_value = "1")]
        count: u64,
        /// Defaults to the configured store
        #[clap(long)]
        contract: Option<AccountId>,
        #[clap(long, default_value = DEFAULT_MINT_METHOD)]
        method: String,
    },
    /// Deploy a new store through the store factory
    DeployStore {
        #[clap(long)]
        owner: AccountId,
        #[clap(long)]
        name: String,
    },
    /// Run a single workflow
    #[clap(subcommand)]
    Workflow(WorkflowCommand),
    /// Generate an example config file
    GenerateExampleConfig {
        #[clap(short = 'o', long, default_value = "./seed.example.toml")]
        output_path: PathBuf,
    },
}

impl Command {
    fn failure_message(&self) -> &'static str {
        match self {
            Command::Seed { .. } => "Failed to seed testnet accounts",
            _ => "Command failed",
        }
    }
}

fn generate_example_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SeedConfig::default())?;
    fs::write(path, content)
        .with_context(|| format!("write example config to {}", path.display()))?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_command(config: SeedConfig, command: Command) -> Result<()> {
    let ctx = SeedContext::build(config)?;
    match command {
        Command::Seed { env_path } => {
            let env_path = env_path.unwrap_or_else(|| ctx.config.run.env_path.clone());
            let seeder = Seeder {
                config: &ctx.config,
                caller: &ctx.caller,
                heights: ctx.rpc.as_ref(),
                accounts: &ctx.accounts,
            };
            let report = seeder.run(&env_path).await?;
            tracing::info!("Seeding completed successfully");
            print_json(&report)?;
        }
        Command::BlockHeight => {
            let height = ctx.rpc.final_block_height().await?;
            println!("{}", height);
        }
        Command::Mint {
            account,
            count,
            contract,
            method,
        } => {
            let owner = ctx.accounts.load(&account).await?;
            let contract = contract.unwrap_or_else(|| ctx.config.contracts.store.clone());
            let token_ids = mint_tokens(&ctx.caller, &owner, count, &contract, &method).await?;
            print_json(&token_ids)?;
        }
        Command::DeployStore { owner, name } => {
            let owner = ctx.accounts.load(&owner).await?;
            let result = deploy_store(
                &ctx.caller,
                &owner,
                &ctx.config.contracts.store_factory,
                &name,
            )
            .await?;
            print_json(&result)?;
        }
        Command::Workflow(workflow) => {
            let result = workflow.run(&ctx).await?;
            print_json(&result)?;
        }
        Command::GenerateExampleConfig { output_path } => {
            generate_example_config(&output_path)?;
            println!("Example config written to {}", output_path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = trace::init() {
        eprintln!("init tracing: {:#}", err);
        std::process::exit(1);
    }

    let command = cli.command.unwrap_or(Command::Seed { env_path: None });
    let failure_message = command.failure_message();
    let result = match cli.config.map(read_config).transpose() {
        Ok(config) => run_command(config.unwrap_or_default(), command).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        tracing::error!("{}", failure_message);
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}
