use super::EditSet;
use crate::{asp::Score, encodings::EDGE_ADDITION_WEIGHT, graph::NodeId};
use anyhow::Result;
use log::{debug, info};
use std::collections::BTreeSet;

/// The queries the greedy repair search needs to explore edit sets.
///
/// Scores are (fit, repairs) pairs, where the repair component accounts for the added edges.
pub trait RepairOracle {
    /// Computes the optimal score of the instance extended by the edit set.
    fn score(&self, edits: &EditSet) -> Result<Score>;

    /// Computes the optimal score reachable by adding a single trial edge to the extended instance,
    /// and returns it together with the nodes this edge may end in to reach it.
    fn best_edge_targets(&self, edits: &EditSet) -> Result<(Score, Vec<NodeId>)>;

    /// Computes the best edges ending in a given node to add to the extended instance,
    /// and returns the resulting edit sets with their scores.
    fn best_edge_sources(&self, edits: &EditSet, target: &NodeId) -> Result<Vec<(EditSet, Score)>>;
}

/// An edit set and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The edit set.
    pub edits: EditSet,
    /// Its score.
    pub score: Score,
}

impl Candidate {
    /// Returns `false` if no edge addition can improve this candidate.
    ///
    /// A candidate with a null fit is not extended once the weight of its added edges reaches its repair score minus one.
    fn can_improve(&self) -> bool {
        let added_weight = EDGE_ADDITION_WEIGHT * self.edits.len() as i64;
        self.score.fit() != 0 || added_weight < self.score.repairs() - 1
    }

    /// Returns `true` if the score is lower than the one of this candidate in at least one of its components.
    fn is_improved_by(&self, score: &Score) -> bool {
        score.fit() < self.score.fit() || score.repairs() < self.score.repairs()
    }
}

/// The result of a greedy repair search: the best score and the edit sets reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyRepairResult {
    /// The best score found.
    pub score: Score,
    /// The edit sets reaching this score, which cannot be improved by adding an edge.
    pub edit_sets: Vec<EditSet>,
}

/// A best-first search over sets of added edges, adding one edge at a time.
///
/// Each explored edit set is extended by the edges leading to the best score reachable with one more edge,
/// as long as this score improves the fit or the repair score of the edit set.
/// The edit sets which cannot be extended this way and reach the best score found are the result of the search.
/// An edit set is never explored twice.
///
/// The number of explored edit sets may be exponential in the number of nodes.
pub struct GreedyRepairSearch<'a> {
    oracle: &'a dyn RepairOracle,
}

impl<'a> GreedyRepairSearch<'a> {
    /// Builds a search relying on the given oracle.
    pub fn new(oracle: &'a dyn RepairOracle) -> Self {
        Self { oracle }
    }

    /// Runs the search.
    pub fn run(&self) -> Result<GreedyRepairResult> {
        let empty = EditSet::default();
        let mut best = self.oracle.score(&empty)?;
        info!("initial repair score is {}", best);
        let mut frontier = vec![Candidate {
            edits: empty.clone(),
            score: best.clone(),
        }];
        let mut seen = BTreeSet::from([empty]);
        let mut terminals: Vec<Candidate> = vec![];
        let mut n_explored = 0;
        while let Some(candidate) = frontier.pop() {
            n_explored += 1;
            debug!(
                "exploring {} with score {} ({} left)",
                candidate.edits,
                candidate.score,
                frontier.len()
            );
            let successors = if candidate.can_improve() {
                self.expand(&candidate)?
            } else {
                vec![]
            };
            if successors.is_empty() {
                if candidate.score == best && !terminals.contains(&candidate) {
                    terminals.push(candidate);
                }
                continue;
            }
            for successor in successors {
                if successor.score < best {
                    info!("new best repair score is {}", successor.score);
                    best = successor.score.clone();
                }
                if seen.insert(successor.edits.clone()) {
                    frontier.push(successor);
                }
            }
        }
        info!("explored {} edit sets", n_explored);
        let edit_sets = terminals
            .into_iter()
            .filter(|c| c.score == best)
            .map(|c| c.edits)
            .collect();
        Ok(GreedyRepairResult {
            score: best,
            edit_sets,
        })
    }

    /// Computes the candidates obtained by adding one of the best edges to a candidate.
    ///
    /// The result is empty if no single edge improves the fit or the repair score of the candidate.
    pub fn expand(&self, candidate: &Candidate) -> Result<Vec<Candidate>> {
        let (trial_score, targets) = self.oracle.best_edge_targets(&candidate.edits)?;
        if !candidate.is_improved_by(&trial_score) {
            return Ok(vec![]);
        }
        let mut successors: Vec<Candidate> = vec![];
        for target in targets.iter() {
            for (edits, score) in self.oracle.best_edge_sources(&candidate.edits, target)? {
                let successor = Candidate { edits, score };
                if candidate.is_improved_by(&successor.score) && !successors.contains(&successor) {
                    successors.push(successor);
                }
            }
        }
        Ok(successors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::EdgeSign, repair::Edit};

    /// Node A is the input, and B and C must be reached from A through added edges.
    struct ReachabilityOracle;

    const NODES: [&str; 3] = ["A", "B", "C"];

    impl ReachabilityOracle {
        fn all_edges() -> Vec<Edit> {
            let mut edges = vec![];
            for u in NODES {
                for v in NODES {
                    if u != v {
                        edges.push(Edit::new(NodeId::or(u), NodeId::or(v), EdgeSign::Plus));
                    }
                }
            }
            edges
        }

        fn score_of(edits: &EditSet) -> Score {
            let mut reached = BTreeSet::from([NodeId::or("A")]);
            loop {
                let n = reached.len();
                for e in edits.iter() {
                    if reached.contains(&e.source) {
                        reached.insert(e.target.clone());
                    }
                }
                if reached.len() == n {
                    break;
                }
            }
            Score::with_fit_and_repairs(
                (NODES.len() - reached.len()) as i64,
                EDGE_ADDITION_WEIGHT * edits.len() as i64,
            )
        }

        fn best_extensions(edits: &EditSet) -> Vec<(Edit, Score)> {
            let extensions = Self::all_edges()
                .into_iter()
                .filter(|e| !edits.iter().any(|f| f == e))
                .map(|e| {
                    let score = Self::score_of(&edits.with(vec![e.clone()]));
                    (e, score)
                })
                .collect::<Vec<_>>();
            let best = extensions.iter().map(|(_, s)| s.clone()).min();
            extensions
                .into_iter()
                .filter(|(_, s)| Some(s) == best.as_ref())
                .collect()
        }
    }

    impl RepairOracle for ReachabilityOracle {
        fn score(&self, edits: &EditSet) -> Result<Score> {
            Ok(Self::score_of(edits))
        }

        fn best_edge_targets(&self, edits: &EditSet) -> Result<(Score, Vec<NodeId>)> {
            let extensions = Self::best_extensions(edits);
            let score = extensions[0].1.clone();
            let targets = extensions
                .into_iter()
                .map(|(e, _)| e.target)
                .collect::<BTreeSet<_>>();
            Ok((score, targets.into_iter().collect()))
        }

        fn best_edge_sources(
            &self,
            edits: &EditSet,
            target: &NodeId,
        ) -> Result<Vec<(EditSet, Score)>> {
            let extensions = Self::all_edges()
                .into_iter()
                .filter(|e| &e.target == target && !edits.iter().any(|f| f == e))
                .map(|e| {
                    let extended = edits.with(vec![e]);
                    let score = Self::score_of(&extended);
                    (extended, score)
                })
                .collect::<Vec<_>>();
            let best = extensions.iter().map(|(_, s)| s.clone()).min();
            Ok(extensions
                .into_iter()
                .filter(|(_, s)| Some(s) == best.as_ref())
                .collect())
        }
    }

    fn brute_force(max_size: usize) -> (Score, BTreeSet<EditSet>) {
        let edges = ReachabilityOracle::all_edges();
        let mut sets = vec![EditSet::default()];
        for e in edges.iter() {
            let mut extended = sets
                .iter()
                .filter(|s| s.len() < max_size)
                .map(|s| s.with(vec![e.clone()]))
                .collect::<Vec<_>>();
            sets.append(&mut extended);
        }
        let best = sets
            .iter()
            .map(ReachabilityOracle::score_of)
            .min()
            .unwrap();
        let optimal = sets
            .into_iter()
            .filter(|s| ReachabilityOracle::score_of(s) == best)
            .collect();
        (best, optimal)
    }

    #[test]
    fn test_search_matches_brute_force() {
        let oracle = ReachabilityOracle;
        let result = GreedyRepairSearch::new(&oracle).run().unwrap();
        let (best, optimal) = brute_force(2);
        assert_eq!(Score::with_fit_and_repairs(0, 2 * EDGE_ADDITION_WEIGHT), best);
        assert_eq!(best, result.score);
        assert_eq!(3, optimal.len());
        assert_eq!(
            optimal,
            result.edit_sets.iter().cloned().collect::<BTreeSet<_>>()
        );
        assert_eq!(optimal.len(), result.edit_sets.len());
    }

    #[test]
    fn test_expand_empty_set() {
        let oracle = ReachabilityOracle;
        let search = GreedyRepairSearch::new(&oracle);
        let candidate = Candidate {
            edits: EditSet::default(),
            score: Score::with_fit_and_repairs(2, 0),
        };
        let successors = search.expand(&candidate).unwrap();
        assert_eq!(2, successors.len());
        assert!(successors.iter().all(|c| c.edits.len() == 1
            && c.edits.iter().all(|e| e.source == NodeId::or("A"))
            && c.score == Score::with_fit_and_repairs(1, EDGE_ADDITION_WEIGHT)));
    }

    #[test]
    fn test_expand_without_improvement() {
        let oracle = ReachabilityOracle;
        let search = GreedyRepairSearch::new(&oracle);
        let edits: EditSet = vec![
            Edit::new(NodeId::or("A"), NodeId::or("B"), EdgeSign::Plus),
            Edit::new(NodeId::or("A"), NodeId::or("C"), EdgeSign::Plus),
        ]
        .into_iter()
        .collect();
        let candidate = Candidate {
            score: ReachabilityOracle::score_of(&edits),
            edits,
        };
        assert!(search.expand(&candidate).unwrap().is_empty());
    }

    struct ConsistentOracle;

    impl RepairOracle for ConsistentOracle {
        fn score(&self, _edits: &EditSet) -> Result<Score> {
            Ok(Score::with_fit_and_repairs(0, 0))
        }

        fn best_edge_targets(&self, _edits: &EditSet) -> Result<(Score, Vec<NodeId>)> {
            panic!("a consistent instance must not be expanded")
        }

        fn best_edge_sources(
            &self,
            _edits: &EditSet,
            _target: &NodeId,
        ) -> Result<Vec<(EditSet, Score)>> {
            panic!("a consistent instance must not be expanded")
        }
    }

    #[test]
    fn test_consistent_instance() {
        let oracle = ConsistentOracle;
        let result = GreedyRepairSearch::new(&oracle).run().unwrap();
        assert!(result.score.is_zero());
        assert_eq!(vec![EditSet::default()], result.edit_sets);
    }

    #[test]
    fn test_can_improve() {
        let candidate = |fit, repairs, n_edits: usize| Candidate {
            edits: (0..n_edits)
                .map(|i| Edit::new(NodeId::or("A"), NodeId::or(&i.to_string()), EdgeSign::Plus))
                .collect(),
            score: Score::with_fit_and_repairs(fit, repairs),
        };
        assert!(candidate(1, 0, 0).can_improve());
        assert!(candidate(1, 2, 1).can_improve());
        assert!(!candidate(0, 0, 0).can_improve());
        assert!(!candidate(0, 1, 0).can_improve());
        assert!(candidate(0, 2, 0).can_improve());
        assert!(!candidate(0, 3, 1).can_improve());
        assert!(candidate(0, 4, 1).can_improve());
        assert!(!candidate(0, 5, 2).can_improve());
        assert!(candidate(0, 6, 2).can_improve());
    }

    #[test]
    fn test_is_improved_by() {
        let candidate = Candidate {
            edits: EditSet::default(),
            score: Score::with_fit_and_repairs(2, 3),
        };
        assert!(candidate.is_improved_by(&Score::with_fit_and_repairs(1, 3)));
        assert!(candidate.is_improved_by(&Score::with_fit_and_repairs(2, 2)));
        assert!(candidate.is_improved_by(&Score::with_fit_and_repairs(3, 1)));
        assert!(candidate.is_improved_by(&Score::with_fit_and_repairs(1, 5)));
        assert!(!candidate.is_improved_by(&Score::with_fit_and_repairs(2, 3)));
        assert!(!candidate.is_improved_by(&Score::with_fit_and_repairs(2, 4)));
        assert!(!candidate.is_improved_by(&Score::with_fit_and_repairs(3, 3)));
    }

    /// Answers with a fixed trial score and fixed successors, whatever the edit set.
    struct ScriptedOracle {
        trial_score: Score,
        sources: Vec<(EditSet, Score)>,
    }

    impl RepairOracle for ScriptedOracle {
        fn score(&self, _edits: &EditSet) -> Result<Score> {
            unreachable!()
        }

        fn best_edge_targets(&self, _edits: &EditSet) -> Result<(Score, Vec<NodeId>)> {
            Ok((self.trial_score.clone(), vec![NodeId::or("B")]))
        }

        fn best_edge_sources(
            &self,
            _edits: &EditSet,
            _target: &NodeId,
        ) -> Result<Vec<(EditSet, Score)>> {
            Ok(self.sources.clone())
        }
    }

    fn single_edit(source: &str) -> EditSet {
        vec![Edit::new(NodeId::or(source), NodeId::or("B"), EdgeSign::Plus)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_expand_on_lower_repairs_only() {
        let oracle = ScriptedOracle {
            trial_score: Score::with_fit_and_repairs(3, 2),
            sources: vec![
                (single_edit("A"), Score::with_fit_and_repairs(3, 2)),
                (single_edit("C"), Score::with_fit_and_repairs(2, 3)),
                (single_edit("D"), Score::with_fit_and_repairs(2, 4)),
            ],
        };
        let candidate = Candidate {
            edits: EditSet::default(),
            score: Score::with_fit_and_repairs(2, 3),
        };
        let successors = GreedyRepairSearch::new(&oracle).expand(&candidate).unwrap();
        assert_eq!(1, successors.len());
        assert_eq!(single_edit("A"), successors[0].edits);
    }

    #[test]
    fn test_expand_stops_on_equal_trial_score() {
        let oracle = ScriptedOracle {
            trial_score: Score::with_fit_and_repairs(2, 3),
            sources: vec![(single_edit("A"), Score::with_fit_and_repairs(1, 3))],
        };
        let candidate = Candidate {
            edits: EditSet::default(),
            score: Score::with_fit_and_repairs(2, 3),
        };
        assert!(GreedyRepairSearch::new(&oracle)
            .expand(&candidate)
            .unwrap()
            .is_empty());
    }
}
