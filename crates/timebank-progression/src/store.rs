//! The persistence port for user progression counters.
//!
//! The document store holding user records is an external collaborator;
//! this module defines the narrow contract the engine needs from it:
//! load a user's counters, and atomically apply the deltas produced by
//! a completion event. Concurrent completions for the same user must be
//! serialized by the implementation (the production adapter uses a
//! transactional increment; [`MemoryStore`] holds a write lock).
//!
//! Counters are monotone: the engine only ever adds non-negative deltas,
//! and no code path decrements `experience_points` or
//! `services_completed`.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use timebank_types::UserId;

use crate::error::ProgressionError;

/// Completion records retained per user for streak and weekly-window
/// derivation. Older history lives in the document store only.
const RECENT_HISTORY_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One retained completion, the minimum needed for context derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// When the service was completed.
    pub completed_at: DateTime<Utc>,
    /// The rating the requester gave.
    pub rating: u8,
}

/// A user's persisted progression counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// The user these counters belong to.
    pub user_id: UserId,
    /// Cumulative experience points; never decreases.
    pub experience_points: u64,
    /// Cumulative completed services; never decreases.
    pub services_completed: u32,
    /// Current time-credit balance.
    pub credit_balance: u64,
    /// Cached display level, refreshed on every applied delta.
    ///
    /// Brand-new records carry level 0 until their first completion;
    /// the reward lookups treat an absent level as "no bonus".
    pub level: u32,
    /// Most recent completions, newest last.
    pub recent_completions: Vec<CompletionRecord>,
}

impl ProgressRecord {
    /// A zeroed record for a user with no history.
    pub const fn fresh(user_id: UserId) -> Self {
        Self {
            user_id,
            experience_points: 0,
            services_completed: 0,
            credit_balance: 0,
            level: 0,
            recent_completions: Vec::new(),
        }
    }
}

/// The deltas a completion event adds to a record.
///
/// All quantities are non-negative; applying a delta can only grow the
/// counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressDelta {
    /// Experience points to add.
    pub experience: u64,
    /// Credits to add to the balance.
    pub credits: u64,
    /// The recomputed level after the experience is applied.
    pub level: u32,
    /// The completion to append to the retained history.
    pub completion: CompletionRecord,
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// The persistence operations the progression service needs.
///
/// Implementations must serialize concurrent `apply` calls for the same
/// user; lost counter updates are not recoverable downstream.
pub trait ProgressionStore: Send + Sync {
    /// Load a user's record, or a fresh zeroed record for an unknown
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::Store`] if the backing store fails.
    fn load(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<ProgressRecord, ProgressionError>> + Send;

    /// Atomically apply a completion delta and return the updated
    /// record.
    ///
    /// Increments `experience_points` and `credit_balance` by the delta
    /// amounts, `services_completed` by one, refreshes the cached level,
    /// and appends the completion to the retained history.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::Store`] if the backing store fails.
    fn apply(
        &self,
        user: UserId,
        delta: ProgressDelta,
    ) -> impl Future<Output = Result<ProgressRecord, ProgressionError>> + Send;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// An in-memory [`ProgressionStore`] for tests and local runs.
///
/// A single [`RwLock`] over the whole map serializes writers, which
/// satisfies the per-user atomicity requirement trivially.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<UserId, ProgressRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing record (test setup).
    pub async fn insert(&self, record: ProgressRecord) {
        let mut records = self.records.write().await;
        records.insert(record.user_id, record);
    }
}

impl ProgressionStore for MemoryStore {
    async fn load(&self, user: UserId) -> Result<ProgressRecord, ProgressionError> {
        let records = self.records.read().await;
        Ok(records
            .get(&user)
            .cloned()
            .unwrap_or_else(|| ProgressRecord::fresh(user)))
    }

    async fn apply(
        &self,
        user: UserId,
        delta: ProgressDelta,
    ) -> Result<ProgressRecord, ProgressionError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user)
            .or_insert_with(|| ProgressRecord::fresh(user));

        record.experience_points = record.experience_points.saturating_add(delta.experience);
        record.credit_balance = record.credit_balance.saturating_add(delta.credits);
        record.services_completed = record.services_completed.saturating_add(1);
        record.level = delta.level;
        record.recent_completions.push(delta.completion);
        if record.recent_completions.len() > RECENT_HISTORY_LIMIT {
            let excess = record
                .recent_completions
                .len()
                .saturating_sub(RECENT_HISTORY_LIMIT);
            record.recent_completions.drain(..excess);
        }

        Ok(record.clone())
    }
}
