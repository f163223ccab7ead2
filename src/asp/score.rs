use serde::Serialize;
use std::{cmp::Ordering, fmt::Display, hash::Hash};

/// The score of an optimal model, as a lexicographically ordered cost vector.
///
/// The first component is the fit score (the number of mismatches or added influences),
/// the second one, if any, is the repair score.
/// Missing components are considered null, so that scores from queries with different numbers of priority levels can be compared.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Score {
    costs: Vec<i64>,
}

impl Score {
    /// Builds a score from the costs reported by the solver, highest priority first.
    pub fn new(costs: Vec<i64>) -> Self {
        Self { costs }
    }

    /// Builds a score with a fit component and a repair component.
    pub fn with_fit_and_repairs(fit: i64, repairs: i64) -> Self {
        Self {
            costs: vec![fit, repairs],
        }
    }

    /// Returns the fit component.
    pub fn fit(&self) -> i64 {
        self.costs.first().copied().unwrap_or_default()
    }

    /// Returns the repair component.
    pub fn repairs(&self) -> i64 {
        self.costs.get(1).copied().unwrap_or_default()
    }

    /// Returns the raw costs, as reported by the solver.
    pub fn costs(&self) -> &[i64] {
        &self.costs
    }

    /// Returns `true` iff every component is null.
    pub fn is_zero(&self) -> bool {
        self.costs.iter().all(|c| *c == 0)
    }

    fn key(&self) -> (i64, i64) {
        (self.fit(), self.repairs())
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Score {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.fit(), self.repairs())
    }
}
