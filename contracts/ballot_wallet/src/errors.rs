use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BallotError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,
    Unauthorized = 4,
    NotFound = 5,
    ProposalClosed = 6,
    ExecutionDispatchFailed = 7,
    TargetNotBound = 8,
    TargetAlreadyBound = 9,
    NotExecuted = 10,
}
