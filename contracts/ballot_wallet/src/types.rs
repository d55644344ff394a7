use soroban_sdk::{contracttype, Address, Bytes, Map, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Config,
    Voter(Address),
    ProposalCount,
    Proposal(u64),
}

/// Wallet configuration, fixed by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotConfig {
    /// Contract that receives approved payloads. `None` for wallets that bind a
    /// target per proposal.
    pub execution_target: Option<Address>,
    pub threshold: u32,
    pub timeout_seconds: u64,
    pub voters: Vec<Address>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalState {
    Open,
    Executed,
    Expired,
    Rejected,
}

impl ProposalState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProposalState::Open)
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchStatus {
    Pending,
    Succeeded,
    Failed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub target: Address,
    pub payload: Bytes,
    pub created_at: u64,
    pub expires_at: u64,
    /// Latest vote per voter, `true` for approve.
    pub votes: Map<Address, bool>,
    pub state: ProposalState,
    pub dispatch: DispatchStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tally {
    pub approvals: u32,
    pub rejections: u32,
    pub cast: u32,
    pub threshold: u32,
    pub roster_size: u32,
}
