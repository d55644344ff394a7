use soroban_sdk::{contract, contractimpl, log, Address, Bytes, Env, Map, Vec};

use crate::ballot;
use crate::errors::BallotError;
use crate::events::{
    payload_digest, ProposalCreated, ProposalExecuted, ProposalExpired, ProposalRejected,
    VoteCast,
};
use crate::target;
use crate::types::{BallotConfig, DataKey, DispatchStatus, Proposal, ProposalState, Tally};

#[contract]
pub struct BallotWallet;

#[contractimpl]
impl BallotWallet {
    pub fn initialize(
        env: Env,
        execution_target: Option<Address>,
        threshold: u32,
        timeout_seconds: u64,
        voters: Vec<Address>,
    ) -> Result<(), BallotError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(BallotError::AlreadyInitialized);
        }

        if voters.is_empty() || threshold == 0 || threshold > voters.len() {
            return Err(BallotError::InvalidConfig);
        }

        // Every proposal must have a bounded lifetime.
        if timeout_seconds == 0 {
            return Err(BallotError::InvalidConfig);
        }

        for i in 0..voters.len() {
            for j in (i + 1)..voters.len() {
                if voters.get_unchecked(i) == voters.get_unchecked(j) {
                    return Err(BallotError::InvalidConfig);
                }
            }
        }

        for voter in voters.iter() {
            env.storage().instance().set(&DataKey::Voter(voter), &true);
        }

        let config = BallotConfig {
            execution_target,
            threshold,
            timeout_seconds,
            voters,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::ProposalCount, &0u64);
        env.storage().instance().set(&DataKey::Initialized, &true);

        log!(
            &env,
            "ballot wallet initialized: threshold {} of {}, timeout {}s",
            threshold,
            config.voters.len(),
            timeout_seconds
        );
        Ok(())
    }

    /// Opens a proposal against the wallet's bound execution target.
    pub fn submit_proposal(env: Env, proposer: Address, payload: Bytes) -> Result<u64, BallotError> {
        let config = Self::load_config(&env)?;
        let target = config
            .execution_target
            .clone()
            .ok_or(BallotError::TargetNotBound)?;
        Self::open_proposal(&env, &config, proposer, target, payload)
    }

    /// Opens a proposal against `target`. Only for wallets deployed without a
    /// bound execution target.
    pub fn submit_targeted_proposal(
        env: Env,
        proposer: Address,
        target: Address,
        payload: Bytes,
    ) -> Result<u64, BallotError> {
        let config = Self::load_config(&env)?;
        if config.execution_target.is_some() {
            return Err(BallotError::TargetAlreadyBound);
        }
        Self::open_proposal(&env, &config, proposer, target, payload)
    }

    /// Records `voter`'s vote, replacing any earlier one, and settles the
    /// proposal if the vote decides it. Returns the resulting state.
    pub fn cast_vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        approve: bool,
    ) -> Result<ProposalState, BallotError> {
        let config = Self::load_config(&env)?;
        voter.require_auth();
        Self::require_voter(&env, &voter)?;

        let mut proposal = Self::load_proposal(&env, proposal_id)?;
        let now = env.ledger().timestamp();
        if ballot::effective_state(&proposal, now) != ProposalState::Open {
            return Err(BallotError::ProposalClosed);
        }

        proposal.votes.set(voter.clone(), approve);
        VoteCast {
            id: proposal_id,
            voter: voter.clone(),
            approve,
        }
        .publish(&env);

        let tally = ballot::tally(&proposal, config.threshold, config.voters.len());
        proposal.state = ballot::evaluate(&tally);

        match proposal.state {
            ProposalState::Executed => {
                // Written terminal before the call so the target cannot observe an
                // open proposal.
                Self::save_proposal(&env, &proposal);

                let success = target::dispatch(&env, &proposal.target, &proposal.payload);
                proposal.dispatch = if success {
                    DispatchStatus::Succeeded
                } else {
                    DispatchStatus::Failed
                };
                Self::save_proposal(&env, &proposal);

                log!(&env, "proposal {} executed, dispatch ok: {}", proposal_id, success);
                ProposalExecuted {
                    id: proposal_id,
                    voter,
                    target: proposal.target.clone(),
                    success,
                }
                .publish(&env);
            }
            ProposalState::Rejected => {
                Self::save_proposal(&env, &proposal);
                log!(&env, "proposal {} rejected", proposal_id);
                ProposalRejected {
                    id: proposal_id,
                    voter,
                }
                .publish(&env);
            }
            _ => Self::save_proposal(&env, &proposal),
        }

        Ok(proposal.state)
    }

    /// Writes the `Expired` transition for a lapsed proposal. Anyone may call
    /// it. Proposals that have not lapsed are left untouched.
    pub fn expire_proposal(env: Env, proposal_id: u64) -> Result<ProposalState, BallotError> {
        Self::require_initialized(&env)?;
        let mut proposal = Self::load_proposal(&env, proposal_id)?;
        let now = env.ledger().timestamp();

        if !proposal.state.is_terminal() && ballot::is_lapsed(&proposal, now) {
            proposal.state = ProposalState::Expired;
            Self::save_proposal(&env, &proposal);

            log!(&env, "proposal {} expired", proposal_id);
            ProposalExpired {
                id: proposal_id,
                proposer: proposal.proposer.clone(),
            }
            .publish(&env);
        }

        Ok(proposal.state)
    }

    /// Returns the proposal with its state as of the current ledger time.
    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, BallotError> {
        Self::require_initialized(&env)?;
        let mut proposal = Self::load_proposal(&env, proposal_id)?;
        proposal.state = ballot::effective_state(&proposal, env.ledger().timestamp());
        Ok(proposal)
    }

    pub fn get_state(env: Env, proposal_id: u64) -> Result<ProposalState, BallotError> {
        Self::require_initialized(&env)?;
        let proposal = Self::load_proposal(&env, proposal_id)?;
        Ok(ballot::effective_state(&proposal, env.ledger().timestamp()))
    }

    pub fn get_tally(env: Env, proposal_id: u64) -> Result<Tally, BallotError> {
        let config = Self::load_config(&env)?;
        let proposal = Self::load_proposal(&env, proposal_id)?;
        Ok(ballot::tally(&proposal, config.threshold, config.voters.len()))
    }

    pub fn time_remaining(env: Env, proposal_id: u64) -> Result<u64, BallotError> {
        Self::require_initialized(&env)?;
        let proposal = Self::load_proposal(&env, proposal_id)?;
        Ok(ballot::time_remaining(&proposal, env.ledger().timestamp()))
    }

    /// `Ok` once an executed proposal's payload reached the target.
    pub fn dispatch_result(env: Env, proposal_id: u64) -> Result<(), BallotError> {
        Self::require_initialized(&env)?;
        let proposal = Self::load_proposal(&env, proposal_id)?;
        match (proposal.state, proposal.dispatch) {
            (ProposalState::Executed, DispatchStatus::Succeeded) => Ok(()),
            (ProposalState::Executed, DispatchStatus::Failed) => {
                Err(BallotError::ExecutionDispatchFailed)
            }
            _ => Err(BallotError::NotExecuted),
        }
    }

    pub fn get_roster(env: Env) -> Result<Vec<Address>, BallotError> {
        Ok(Self::load_config(&env)?.voters)
    }

    pub fn get_threshold(env: Env) -> Result<u32, BallotError> {
        Ok(Self::load_config(&env)?.threshold)
    }

    pub fn get_timeout(env: Env) -> Result<u64, BallotError> {
        Ok(Self::load_config(&env)?.timeout_seconds)
    }

    pub fn get_execution_target(env: Env) -> Result<Option<Address>, BallotError> {
        Ok(Self::load_config(&env)?.execution_target)
    }

    pub fn is_voter(env: Env, voter: Address) -> bool {
        env.storage().instance().has(&DataKey::Voter(voter))
    }

    pub fn proposal_count(env: Env) -> Result<u64, BallotError> {
        Self::require_initialized(&env)?;
        Ok(env
            .storage()
            .instance()
            .get(&DataKey::ProposalCount)
            .unwrap_or(0u64))
    }

    fn open_proposal(
        env: &Env,
        config: &BallotConfig,
        proposer: Address,
        target: Address,
        payload: Bytes,
    ) -> Result<u64, BallotError> {
        proposer.require_auth();
        Self::require_voter(env, &proposer)?;

        let current_count: u64 = env
            .storage()
            .instance()
            .get(&DataKey::ProposalCount)
            .unwrap_or(0u64);
        let proposal_id = current_count + 1;
        env.storage().instance().set(&DataKey::ProposalCount, &proposal_id);

        let created_at = env.ledger().timestamp();
        let proposal = Proposal {
            id: proposal_id,
            proposer: proposer.clone(),
            target,
            payload,
            created_at,
            expires_at: created_at.saturating_add(config.timeout_seconds),
            votes: Map::new(env),
            state: ProposalState::Open,
            dispatch: DispatchStatus::Pending,
        };
        Self::save_proposal(env, &proposal);

        ProposalCreated {
            id: proposal_id,
            proposer,
            payload_digest: payload_digest(env, &proposal.payload),
        }
        .publish(env);

        Ok(proposal_id)
    }

    fn require_initialized(env: &Env) -> Result<(), BallotError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(BallotError::NotInitialized);
        }
        Ok(())
    }

    fn require_voter(env: &Env, voter: &Address) -> Result<(), BallotError> {
        if !env.storage().instance().has(&DataKey::Voter(voter.clone())) {
            return Err(BallotError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<BallotConfig, BallotError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(BallotError::NotInitialized)
    }

    fn load_proposal(env: &Env, proposal_id: u64) -> Result<Proposal, BallotError> {
        env.storage()
            .instance()
            .get(&DataKey::Proposal(proposal_id))
            .ok_or(BallotError::NotFound)
    }

    fn save_proposal(env: &Env, proposal: &Proposal) {
        env.storage()
            .instance()
            .set(&DataKey::Proposal(proposal.id), proposal);
    }
}
