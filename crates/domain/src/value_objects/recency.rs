//! Bounded memory of recently served scenario titles.
//!
//! The titles are fed back into the next generation prompt as an
//! "avoid these" list. Oldest titles are evicted first once the buffer
//! is full. Duplicates are kept: if the model repeats itself the repeat
//! is remembered too.

use std::collections::VecDeque;

/// FIFO buffer of the last `capacity` scenario titles.
///
/// # Examples
///
/// ```
/// use fincoach_domain::RecencyMemory;
///
/// let mut memory = RecencyMemory::new(2);
/// memory.remember("Rent increase");
/// memory.remember("Lottery win");
/// memory.remember("Broken phone");
///
/// assert_eq!(memory.snapshot(), vec!["Lottery win", "Broken phone"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyMemory {
    capacity: usize,
    titles: VecDeque<String>,
}

impl RecencyMemory {
    /// Default number of titles retained.
    pub const DEFAULT_CAPACITY: usize = 15;

    /// Create an empty memory. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            titles: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a title, evicting from the head until within capacity.
    pub fn remember(&mut self, title: impl Into<String>) {
        self.titles.push_back(title.into());
        while self.titles.len() > self.capacity {
            self.titles.pop_front();
        }
    }

    /// Titles oldest-first.
    pub fn snapshot(&self) -> Vec<String> {
        self.titles.iter().cloned().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl Default for RecencyMemory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
