use crate::{
    asp::{Model, Term},
    graph::{Behavior, NodeId},
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// The kind of predictions to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    /// Behaviors shared by all optimal labelings.
    Strong,
    /// Behaviors of at least one optimal labeling.
    Weak,
}

/// A predicted behavior of a node in a profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Prediction {
    /// The profile.
    pub profile: String,
    /// The node.
    pub node: NodeId,
    /// The behavior.
    pub behavior: Behavior,
}

impl TryFrom<&Term> for Prediction {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match (t.name(), t.arguments()) {
            (Some("pred"), [e, v, b]) => Ok(Prediction {
                profile: e
                    .as_str()
                    .ok_or_else(|| anyhow!(r#"invalid profile name "{}""#, e))?
                    .to_string(),
                node: NodeId::try_from(v)?,
                behavior: Behavior::try_from(b)?,
            }),
            _ => Err(anyhow!(r#"unexpected atom "{}""#, t)),
        }
    }
}

/// The number of predictions for each behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PredictionStatistics {
    pub plus: usize,
    pub minus: usize,
    pub zero: usize,
    pub not_plus: usize,
    pub not_minus: usize,
    pub change: usize,
}

/// A set of predictions, without the weak ones implied by a strong one.
///
/// A `+` prediction hides `notMinus` and `CHANGE`,
/// a `-` prediction hides `notPlus` and `CHANGE`,
/// and a `0` prediction hides `notPlus` and `notMinus`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Predictions(BTreeSet<Prediction>);

impl Predictions {
    /// Reads the predictions of a model.
    pub fn try_from_model(model: &Model) -> Result<Self> {
        let all = model
            .atoms_of("pred", 3)
            .map(Prediction::try_from)
            .collect::<Result<BTreeSet<Prediction>>>()?;
        let implied = |p: &Prediction| {
            let hidden_by = |b: Behavior| {
                all.contains(&Prediction {
                    profile: p.profile.clone(),
                    node: p.node.clone(),
                    behavior: b,
                })
            };
            match p.behavior {
                Behavior::NotMinus => hidden_by(Behavior::Plus) || hidden_by(Behavior::Zero),
                Behavior::NotPlus => hidden_by(Behavior::Minus) || hidden_by(Behavior::Zero),
                Behavior::Change => hidden_by(Behavior::Plus) || hidden_by(Behavior::Minus),
                _ => false,
            }
        };
        Ok(Predictions(
            all.iter().filter(|p| !implied(p)).cloned().collect(),
        ))
    }

    /// Iterates over the predictions.
    pub fn iter(&self) -> impl Iterator<Item = &Prediction> + '_ {
        self.0.iter()
    }

    /// Returns the predictions with the given behavior.
    pub fn with_behavior(&self, behavior: Behavior) -> impl Iterator<Item = &Prediction> + '_ {
        self.0.iter().filter(move |p| p.behavior == behavior)
    }

    /// Returns the number of predictions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is no prediction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts the predictions for each behavior.
    pub fn statistics(&self) -> PredictionStatistics {
        let mut stats = PredictionStatistics::default();
        for p in self.0.iter() {
            match p.behavior {
                Behavior::Plus => stats.plus += 1,
                Behavior::Minus => stats.minus += 1,
                Behavior::Zero => stats.zero += 1,
                Behavior::NotPlus => stats.not_plus += 1,
                Behavior::NotMinus => stats.not_minus += 1,
                Behavior::Change => stats.change += 1,
            }
        }
        stats
    }
}
