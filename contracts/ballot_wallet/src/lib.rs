#![no_std]

mod ballot;
mod errors;
mod events;
mod target;
mod types;
mod wallet;

pub use crate::errors::BallotError;
pub use crate::events::{ProposalCreated, ProposalExecuted, ProposalExpired, ProposalRejected, VoteCast};
pub use crate::target::{ExecutionTarget, ExecutionTargetClient};
pub use crate::types::{BallotConfig, DispatchStatus, Proposal, ProposalState, Tally};
pub use crate::wallet::{BallotWallet, BallotWalletClient};
