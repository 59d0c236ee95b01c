use std::cmp::Ordering;

/// A partial plan waiting in the work set.
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub cost: f64,
    /// Insertion counter; equal costs are popped first-in, first-out.
    pub sequence: u64,
    pub node: usize,
    /// Edge indices traversed so far, in order.
    pub hops: Vec<usize>,
}

// Reversed so `BinaryHeap` pops the cheapest, oldest candidate first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}
