use super::programs;
use strum_macros::{EnumIter, IntoStaticStr};

/// The weight of an added edge in the repair objective.
pub const EDGE_ADDITION_WEIGHT: i64 = 2;

/// A rule module, i.e. a piece of logic program selectable for a query.
///
/// Modules are combined by the configurator and the query engine;
/// their text is opaque to the rest of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Module {
    /// Domains, labels of nodes and edges, influences.
    SignCons,
    /// Variations must be explained by a predecessor.
    BwdProp,
    /// Each node holds a single label.
    OneState,
    /// Absence of variation must be explained.
    FwdProp,
    /// Variations must be founded in an input.
    Foundedness,
    /// Variations must be explained by an elementary path from an input.
    ElemPath,
    /// Variations must be explained by a path from an input.
    SomePath,
    /// Mismatches between observations and labels.
    ErrorMeasure,
    /// Minimizes the weighted mismatches.
    MinWeightedError,
    /// Observed inputs keep their observed variation.
    KeepInputs,
    /// Observed nodes keep their observed variation.
    KeepObservations,
    /// Allows new influences on non-input nodes.
    AddInfluences,
    /// Minimizes the number of new influences.
    MinAddedInfluences,
    /// Allows the removal of signed edges.
    RemoveEdges,
    /// Allows the addition of signed edges between OR nodes.
    AddEdges,
    /// Allows the sign flip of signed edges.
    FlipEdges,
    /// Minimizes the weighted repairs.
    MinWeightedRepairs,
    /// Probes the best target for a new edge.
    BestOneEdge,
    /// Looks for the best sources of new edges with known targets.
    BestEdgeStart,
    /// Shows the targets of the trial edge.
    ShowAddEdgeEnd,
    /// Shows the labels of OR nodes.
    ShowLabels,
    /// Shows the node sign flips.
    ShowErrors,
    /// Shows removed edges, added edges and new influences.
    ShowRepairs,
    /// Shows flipped edges.
    ShowFlips,
    /// Predictions, for labelings with a single label per node.
    Predictions,
    /// Predictions, for labelings with possibly several labels per node.
    PredictionsDepmat,
    /// Minimal inconsistent cores.
    Mics,
    /// Minimal inconsistent cores, when absence of variation must be explained.
    MicsFwdProp,
    /// Contradictory observations.
    ContradictoryObs,
    /// Nodes without regulator.
    GuessInputs,
}

impl Module {
    /// Returns the name of the module.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Returns the text of the module.
    pub fn program(&self) -> &'static str {
        match self {
            Module::SignCons => programs::SIGN_CONS,
            Module::BwdProp => programs::BWD_PROP,
            Module::OneState => programs::ONE_STATE,
            Module::FwdProp => programs::FWD_PROP,
            Module::Foundedness => programs::FOUNDEDNESS,
            Module::ElemPath => programs::ELEM_PATH,
            Module::SomePath => programs::SOME_PATH,
            Module::ErrorMeasure => programs::ERROR_MEASURE,
            Module::MinWeightedError => programs::MIN_WEIGHTED_ERROR,
            Module::KeepInputs => programs::KEEP_INPUTS,
            Module::KeepObservations => programs::KEEP_OBSERVATIONS,
            Module::AddInfluences => programs::ADD_INFLUENCES,
            Module::MinAddedInfluences => programs::MIN_ADDED_INFLUENCES,
            Module::RemoveEdges => programs::REMOVE_EDGES,
            Module::AddEdges => programs::ADD_EDGES,
            Module::FlipEdges => programs::FLIP_EDGES,
            Module::MinWeightedRepairs => programs::MIN_WEIGHTED_REPAIRS,
            Module::BestOneEdge => programs::BEST_ONE_EDGE,
            Module::BestEdgeStart => programs::BEST_EDGE_START,
            Module::ShowAddEdgeEnd => programs::SHOW_ADD_EDGE_END,
            Module::ShowLabels => programs::SHOW_LABELS,
            Module::ShowErrors => programs::SHOW_ERRORS,
            Module::ShowRepairs => programs::SHOW_REPAIRS,
            Module::ShowFlips => programs::SHOW_FLIPS,
            Module::Predictions => programs::PREDICTIONS,
            Module::PredictionsDepmat => programs::PREDICTIONS_DEPMAT,
            Module::Mics => programs::MICS,
            Module::MicsFwdProp => programs::MICS_FWD_PROP,
            Module::ContradictoryObs => programs::CONTRADICTORY_OBS,
            Module::GuessInputs => programs::GUESS_INPUTS,
        }
    }
}
