use std::collections::VecDeque;

/// Rolling history of usage samples, oldest first — backs the line chart.
///
/// Capacity is fixed at construction; pushing past it evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples:  VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if over capacity.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Current contents in insertion order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(30)
    }
}
