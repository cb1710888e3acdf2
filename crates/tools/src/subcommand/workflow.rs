use anyhow::Result;
use clap::Parser;
use seed_types::AccountId;

use crate::{
    context::SeedContext,
    workflows::{
        auction_list_offer_take, list_then_transfer_to_invalidate, paras_list_and_sale,
        simple_burn, simple_list_and_sale, simple_transfer, Workflow, WorkflowResult,
        DEFAULT_BURN_METHOD,
    },
};

pub const COMMAND_WORKFLOW: &str = "workflow";

/// Run a single marketplace workflow.
#[derive(Parser, Debug)]
#[clap(name = COMMAND_WORKFLOW)]
pub enum WorkflowCommand {
    /// Transfer a store token.
    Transfer {
        #[clap(long)]
        from: AccountId,
        #[clap(long)]
        to: AccountId,
        #[clap(long)]
        token_id: String,
    },
    /// List a store token on the market and buy it.
    ListAndSale {
        #[clap(long)]
        lister: AccountId,
        #[clap(long)]
        buyer: AccountId,
        #[clap(long)]
        token_id: String,
    },
    /// Burn store tokens.
    Burn {
        #[clap(long)]
        owner: AccountId,
        /// Token to burn, repeatable
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
        #[clap(long, default_value = DEFAULT_BURN_METHOD)]
        method: String,
    },
    /// List a store token, then transfer it away.
    ListThenTransfer {
        #[clap(long)]
        lister: AccountId,
        #[clap(long)]
        receiver: AccountId,
        #[clap(long)]
        token_id: String,
    },
    /// List a Paras token on the market and buy it.
    ParasListAndSale {
        #[clap(long)]
        lister: AccountId,
        #[clap(long)]
        buyer: AccountId,
        #[clap(long)]
        token_id: String,
    },
    /// List a store token on the auction market, make two offers, take one.
    Auction {
        #[clap(long)]
        lister: AccountId,
        #[clap(long)]
        buyer: AccountId,
        #[clap(long)]
        first_bidder: AccountId,
        #[clap(long)]
        token_id: String,
    },
}

impl WorkflowCommand {
    async fn plan(&self, ctx: &SeedContext) -> Result<Workflow> {
        let contracts = &ctx.config.contracts;
        let accounts = &ctx.accounts;
        let workflow = match self {
            WorkflowCommand::Transfer { from, to, token_id } => {
                simple_transfer(contracts, &accounts.load(from).await?, to, token_id)?
            }
            WorkflowCommand::ListAndSale {
                lister,
                buyer,
                token_id,
            } => simple_list_and_sale(
                contracts,
                &accounts.load(lister).await?,
                &accounts.load(buyer).await?,
                token_id,
            )?,
            WorkflowCommand::Burn {
                owner,
                token_ids,
                method,
            } => simple_burn(contracts, &accounts.load(owner).await?, token_ids, method)?,
            WorkflowCommand::ListThenTransfer {
                lister,
                receiver,
                token_id,
            } => list_then_transfer_to_invalidate(
                contracts,
                &accounts.load(lister).await?,
                receiver,
                token_id,
            )?,
            WorkflowCommand::ParasListAndSale {
                lister,
                buyer,
                token_id,
            } => paras_list_and_sale(
                contracts,
                &accounts.load(lister).await?,
                &accounts.load(buyer).await?,
                token_id,
            )?,
            WorkflowCommand::Auction {
                lister,
                buyer,
                first_bidder,
                token_id,
            } => auction_list_offer_take(
                contracts,
                &accounts.load(lister).await?,
                &accounts.load(buyer).await?,
                &accounts.load(first_bidder).await?,
                token_id,
            )?,
        };
        Ok(workflow)
    }

    pub async fn run(self, ctx: &SeedContext) -> Result<WorkflowResult> {
        let workflow = self.plan(ctx).await?;
        tracing::info!(
            "Running workflow {} with {} steps",
            workflow.name(),
            workflow.steps().len()
        );
        workflow.run(&ctx.caller).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_burn() {
        let command = WorkflowCommand::parse_from([
            "workflow",
            "burn",
            "--owner",
            "mb_alice.testnet",
            "--token-id",
            "1",
            "--token-id",
            "2",
        ]);
        match command {
            WorkflowCommand::Burn {
                owner,
                token_ids,
                method,
            } => {
                assert_eq!(owner.as_str(), "mb_alice.testnet");
                assert_eq!(token_ids, vec!["1", "2"]);
                assert_eq!(method, DEFAULT_BURN_METHOD);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_reject_invalid_account() {
        assert!(WorkflowCommand::try_parse_from([
            "workflow",
            "transfer",
            "--from",
            "Alice",
            "--to",
            "mb_bob.testnet",
            "--token-id",
            "1",
        ])
        .is_err());
    }
}
