use std::collections::VecDeque;

/// How many recent velocities are retained per tracked point
pub const HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO of recent velocities; oldest at the front, most recent at the back.
#[derive(Debug, Clone)]
pub struct VelocityHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl VelocityHistory {
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("Velocity history capacity must be above 0");
        }
        VelocityHistory {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a velocity, evicting the oldest entry if already at capacity
    pub fn push(&mut self, velocity: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(velocity);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    /// True only if there is at least one entry and none exceeds the threshold in magnitude
    pub fn all_within(&self, threshold: f64) -> bool {
        !self.values.is_empty() && !self.values.iter().any(|v| v.abs() > threshold)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for VelocityHistory {
    fn default() -> Self {
        VelocityHistory::new(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut history = VelocityHistory::default();
        for i in 0..11 {
            history.push(i as f64);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(!history.iter().any(|v| *v == 0.));
        assert_eq!(history.iter().next().copied(), Some(1.));
        assert_eq!(history.latest(), Some(10.));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut history = VelocityHistory::new(3);
        for i in 0..50 {
            history.push(i as f64);
            assert!(history.len() <= 3);
        }
        let kept: Vec<f64> = history.iter().copied().collect();
        assert_eq!(kept, vec![47., 48., 49.]);
    }

    #[test]
    fn test_all_within() {
        let mut history = VelocityHistory::default();
        assert!(!history.all_within(1000.)); // empty is never "within"
        history.push(-200.);
        history.push(150.);
        assert!(history.all_within(200.)); // boundary counts as slow
        assert!(!history.all_within(199.9));
    }
}
