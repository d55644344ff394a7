//! Proposal lifecycle rules.
//!
//! Nothing here touches storage: the wallet loads a proposal, asks these helpers
//! what it looks like at the current ledger time, and writes the result back.

use crate::types::{Proposal, ProposalState, Tally};

/// A proposal has lapsed once the ledger time is strictly past its deadline.
pub fn is_lapsed(proposal: &Proposal, now: u64) -> bool {
    now > proposal.expires_at
}

/// State as observed at `now`. An open proposal past its deadline reads as
/// `Expired` even before the transition is written.
pub fn effective_state(proposal: &Proposal, now: u64) -> ProposalState {
    if !proposal.state.is_terminal() && is_lapsed(proposal, now) {
        ProposalState::Expired
    } else {
        proposal.state
    }
}

pub fn tally(proposal: &Proposal, threshold: u32, roster_size: u32) -> Tally {
    let mut approvals = 0u32;
    let mut rejections = 0u32;
    for (_, approved) in proposal.votes.iter() {
        if approved {
            approvals += 1;
        } else {
            rejections += 1;
        }
    }

    Tally {
        approvals,
        rejections,
        cast: approvals + rejections,
        threshold,
        roster_size,
    }
}

/// Outcome of an open proposal after a vote has been recorded.
///
/// Quorum wins over rejection: with every voter in and enough approvals the
/// proposal executes.
pub fn evaluate(tally: &Tally) -> ProposalState {
    if tally.approvals >= tally.threshold {
        ProposalState::Executed
    } else if tally.cast >= tally.roster_size {
        ProposalState::Rejected
    } else {
        ProposalState::Open
    }
}

/// Ledger seconds, the current one included, at which a vote is still
/// accepted. The deadline second itself counts, so this is 1 at `expires_at`
/// and 0 once the proposal is no longer open.
pub fn time_remaining(proposal: &Proposal, now: u64) -> u64 {
    match effective_state(proposal, now) {
        ProposalState::Open => (proposal.expires_at - now).saturating_add(1),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(approvals: u32, rejections: u32) -> Tally {
        Tally {
            approvals,
            rejections,
            cast: approvals + rejections,
            threshold: 2,
            roster_size: 3,
        }
    }

    #[test]
    fn test_evaluate_stays_open_below_threshold() {
        assert_eq!(evaluate(&tally_of(0, 0)), ProposalState::Open);
        assert_eq!(evaluate(&tally_of(1, 0)), ProposalState::Open);
        assert_eq!(evaluate(&tally_of(1, 1)), ProposalState::Open);
    }

    #[test]
    fn test_evaluate_executes_at_threshold() {
        assert_eq!(evaluate(&tally_of(2, 0)), ProposalState::Executed);
        assert_eq!(evaluate(&tally_of(2, 1)), ProposalState::Executed);
    }

    #[test]
    fn test_evaluate_rejects_when_roster_exhausted() {
        assert_eq!(evaluate(&tally_of(0, 3)), ProposalState::Rejected);
        assert_eq!(evaluate(&tally_of(1, 2)), ProposalState::Rejected);
    }

    #[test]
    fn test_only_open_is_not_terminal() {
        assert!(!ProposalState::Open.is_terminal());
        assert!(ProposalState::Executed.is_terminal());
        assert!(ProposalState::Expired.is_terminal());
        assert!(ProposalState::Rejected.is_terminal());
    }
}
