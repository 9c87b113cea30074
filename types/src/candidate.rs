//! Candidate identity and registry entry types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contract-assigned candidate identifier.
///
/// Ids are 1-based, dense and contiguous: after `n` successful
/// registrations the registry holds exactly the ids `1..=n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(u32);

impl CandidateId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the contract's append-only candidate registry.
///
/// `vote_count` only grows, and only through a successful vote transaction;
/// candidates are never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_id_ordering() {
        assert!(CandidateId::new(1) < CandidateId::new(2));
    }

    #[test]
    fn candidate_serde_roundtrip() {
        let c = Candidate {
            id: CandidateId::new(3),
            name: "Ada".into(),
            party: "Indep".into(),
            vote_count: 7,
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
