use soroban_sdk::{contractevent, Address, Bytes, BytesN, Env};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreated {
    #[topic]
    pub id: u64,
    pub proposer: Address,
    pub payload_digest: BytesN<32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    #[topic]
    pub id: u64,
    pub voter: Address,
    pub approve: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExecuted {
    #[topic]
    pub id: u64,
    /// Voter whose approval reached the threshold.
    pub voter: Address,
    pub target: Address,
    pub success: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRejected {
    #[topic]
    pub id: u64,
    /// Last voter to respond.
    pub voter: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExpired {
    #[topic]
    pub id: u64,
    pub proposer: Address,
}

pub fn payload_digest(env: &Env, payload: &Bytes) -> BytesN<32> {
    env.crypto().sha256(payload).to_bytes()
}
