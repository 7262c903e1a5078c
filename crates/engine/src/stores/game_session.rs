//! Decisions game runtime state.
//!
//! One `GameSession` holds the scenario queue, the recency memory and the
//! achievement tracker. It lives for the process (nothing is persisted) and
//! is injected into handlers rather than kept in a global, so tests get an
//! isolated session each.
//!
//! Progress is per process: two engine instances behind a load balancer
//! would each count their own choices.

use std::collections::VecDeque;

use tokio::sync::{Mutex, MutexGuard};

use fincoach_domain::{
    AchievementCategory, AchievementProgress, AchievementTable, AchievementTracker,
    RecencyMemory, Scenario,
};

/// FIFO of generated scenarios awaiting delivery.
#[derive(Default)]
pub struct ScenarioQueue {
    inner: Mutex<VecDeque<Scenario>>,
}

impl ScenarioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch to the tail, preserving order, and take the head in
    /// one critical section.
    pub async fn push_batch_and_pop(&self, batch: Vec<Scenario>) -> Option<Scenario> {
        let mut queue = self.inner.lock().await;
        queue.extend(batch);
        queue.pop_front()
    }

    /// Remove and return the head.
    pub async fn pop(&self) -> Option<Scenario> {
        self.inner.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

/// Process-lifetime state of the decisions game.
pub struct GameSession {
    queue: ScenarioQueue,
    recency: Mutex<RecencyMemory>,
    achievements: Mutex<AchievementTracker>,
    // Held for the whole of a refill so only one batch is generated at a time.
    refill: Mutex<()>,
}

impl GameSession {
    pub fn new(recency_capacity: usize, table: AchievementTable) -> Self {
        Self {
            queue: ScenarioQueue::new(),
            recency: Mutex::new(RecencyMemory::new(recency_capacity)),
            achievements: Mutex::new(AchievementTracker::new(table)),
            refill: Mutex::new(()),
        }
    }

    pub fn queue(&self) -> &ScenarioQueue {
        &self.queue
    }

    /// Recently generated titles, oldest first.
    pub async fn recent_titles(&self) -> Vec<String> {
        self.recency.lock().await.snapshot()
    }

    pub async fn remember_titles<'a>(&self, titles: impl IntoIterator<Item = &'a str>) {
        let mut recency = self.recency.lock().await;
        for title in titles {
            recency.remember(title);
        }
    }

    /// Count a choice; returns the newly unlocked tier names and the
    /// progress right after this choice.
    pub async fn record_choice(
        &self,
        category: AchievementCategory,
    ) -> (Vec<String>, AchievementProgress) {
        let mut tracker = self.achievements.lock().await;
        let unlocked = tracker.record_choice(category);
        (unlocked, tracker.progress())
    }

    pub async fn progress(&self) -> AchievementProgress {
        self.achievements.lock().await.progress()
    }

    /// Wait for exclusive refill rights.
    pub async fn lock_refill(&self) -> MutexGuard<'_, ()> {
        self.refill.lock().await
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(RecencyMemory::DEFAULT_CAPACITY, AchievementTable::default())
    }
}
