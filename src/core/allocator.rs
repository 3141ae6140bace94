//! Even, order-preserving distribution of contact records across agents.
//!
//! Records are cut into one contiguous slice per agent. With `N` records and
//! `M` agents every slice holds `N / M` or `N / M + 1` records, and the first
//! `N % M` agents in roster order receive the larger slices. Which agent gets
//! the extra record is visible to users, so the order must never change.

use serde::{Deserialize, Serialize};

use crate::core::model::{Agent, ContactRecord};
use crate::core::DashboardError;
use crate::util::serde::AgentId;

/// Records assigned to a single agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentShare {
    /// Receiving agent.
    pub agent_id: AgentId,
    /// Contiguous slice of the input, in input order.
    pub records: Vec<ContactRecord>,
}

/// Partition of an upload across agents, iterated in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    shares: Vec<AgentShare>,
}

impl Allocation {
    /// Records assigned to `agent_id`, if the agent took part.
    pub fn get(&self, agent_id: &AgentId) -> Option<&[ContactRecord]> {
        self.shares
            .iter()
            .find(|s| &s.agent_id == agent_id)
            .map(|s| s.records.as_slice())
    }

    /// Shares in roster order.
    pub fn shares(&self) -> &[AgentShare] {
        &self.shares
    }

    /// Consume into shares in roster order.
    pub fn into_shares(self) -> Vec<AgentShare> {
        self.shares
    }

    /// Number of agents in the partition.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    /// True when no agent took part (never produced by [`allocate`]).
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of all share sizes.
    pub fn total_records(&self) -> usize {
        self.shares.iter().map(|s| s.records.len()).sum()
    }
}

/// Share size for each of `agent_count` agents when dividing `total` records.
///
/// Shared by [`allocate`] and the distribution preview so both always agree.
pub fn share_sizes(total: usize, agent_count: usize) -> Result<Vec<usize>, DashboardError> {
    if agent_count == 0 {
        return Err(DashboardError::NoRecipients);
    }
    let base = total / agent_count;
    let extra = total % agent_count;
    Ok((0..agent_count)
        .map(|k| if k < extra { base + 1 } else { base })
        .collect())
}

/// Split `records` into one contiguous share per agent, in `agents` order.
///
/// Fails with [`DashboardError::NoRecipients`] when `agents` is empty. An
/// empty `records` list yields an empty share for every agent.
pub fn allocate(
    records: Vec<ContactRecord>,
    agents: &[Agent],
) -> Result<Allocation, DashboardError> {
    let sizes = share_sizes(records.len(), agents.len())?;
    let total = records.len();
    let mut remaining = records.into_iter();
    let mut cursor = 0usize;

    let shares: Vec<AgentShare> = agents
        .iter()
        .zip(sizes)
        .map(|(agent, size)| {
            cursor += size;
            AgentShare {
                agent_id: agent.id,
                records: remaining.by_ref().take(size).collect(),
            }
        })
        .collect();

    debug_assert_eq!(cursor, total);
    debug_assert!(remaining.next().is_none());
    Ok(Allocation { shares })
}
