use super::{Contradiction, Labeling, Mic, PredictionMode, Predictions, RepairSet};
use crate::{
    asp::{AspSolverFactory, DefaultAspSolverFactory, Model, Program, Score, SolveMode, SolvingResult},
    encodings::{
        greedy_repair_modules_for, modules_for, repair_modules_for, ConsistencyConfig, Module,
        Objective, RepairMode, Setting,
    },
    graph::{Fact, FactSet, Instance},
};
use anyhow::{anyhow, Context, Result};
use log::debug;

/// The object answering consistency and repair queries on instances.
///
/// Each query builds a program from the rule modules selected by the configuration and the facts of the instance,
/// and gives it to a new solver built by the solver factory.
/// Queries relying on an optimum first compute it, and then enumerate the models reaching this optimum.
///
/// # Example
///
/// ```no_run
/// # use iggy::encodings::{ConsistencyConfig, Objective, Setting};
/// # use iggy::graph::{EdgeSign, Network, NodeId, Observation, Profile};
/// # use iggy::query::QueryEngine;
/// let mut network = Network::default();
/// network.add_edge(NodeId::or("A"), NodeId::or("B"), Some(EdgeSign::Plus));
/// let mut profile = Profile::new("p");
/// profile.add_observation(NodeId::or("A"), Observation::Plus);
/// profile.add_observation(NodeId::or("B"), Observation::Minus);
/// let engine = QueryEngine::default();
/// assert!(engine.detect_contradictions(&profile.to_facts()).unwrap().is_empty());
/// let instance = network.to_facts().union(&profile.to_facts());
/// let config = ConsistencyConfig::new(Setting::default(), Objective::Scenfit);
/// assert!(!engine.score(&instance, &config).unwrap().is_zero());
/// ```
pub struct QueryEngine {
    solver_factory: Box<dyn AspSolverFactory>,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new_with_solver_factory(Box::new(DefaultAspSolverFactory))
    }
}

impl QueryEngine {
    /// Builds a query engine using the solvers built by the provided factory.
    pub fn new_with_solver_factory(solver_factory: Box<dyn AspSolverFactory>) -> Self {
        Self { solver_factory }
    }

    /// Solves a program, returning its models.
    ///
    /// An unsatisfiable program has no models; an unknown result is an error.
    pub(crate) fn solve(
        &self,
        modules: Vec<Module>,
        facts: &FactSet,
        mode: &SolveMode,
    ) -> Result<Vec<Model>> {
        let program = Program::new(modules, facts.clone());
        let mut solver = self.solver_factory.new_solver();
        match solver.solve(&program, mode)? {
            SolvingResult::Satisfiable(models) => Ok(models),
            SolvingResult::Unsatisfiable => Ok(vec![]),
            SolvingResult::Unknown => Err(anyhow!("the solver gave no answer")),
        }
    }

    /// Solves a program which must have exactly one model under the given mode.
    pub(crate) fn solve_single(
        &self,
        modules: Vec<Module>,
        facts: &FactSet,
        mode: &SolveMode,
    ) -> Result<Model> {
        let mut models = self.solve(modules, facts, mode)?;
        match models.len() {
            1 => Ok(models.remove(0)),
            0 => Err(anyhow!("the solver found no model where one must exist")),
            n => Err(anyhow!(
                "the solver found {} models where exactly one is expected",
                n
            )),
        }
    }

    /// Detects the contradictory observations of a set of profiles.
    ///
    /// This query must be done before any other one: analyses are meaningless on contradictory observations.
    pub fn detect_contradictions(&self, profiles: &FactSet) -> Result<Vec<Contradiction>> {
        let model = self
            .solve_single(vec![Module::ContradictoryObs], profiles, &SolveMode::FirstModel)
            .context("while detecting contradictory observations")?;
        model
            .atoms_of("contradiction", 3)
            .map(Contradiction::try_from)
            .collect()
    }

    /// Computes the inputs of a network, that is the declared inputs and the nodes without regulators.
    pub fn infer_inputs(&self, network: &FactSet) -> Result<FactSet> {
        let model = self
            .solve_single(vec![Module::GuessInputs], network, &SolveMode::FirstModel)
            .context("while computing the inputs of the network")?;
        model
            .atoms_of("input", 1)
            .map(Fact::try_from)
            .collect::<Result<FactSet>>()
    }

    /// Computes the optimal score of an instance under a configuration.
    ///
    /// A zero score means the instance is consistent.
    pub fn score(&self, instance: &Instance, config: &ConsistencyConfig) -> Result<Score> {
        let model = self
            .solve_single(modules_for(config), instance, &SolveMode::Optimum)
            .context("while computing the optimal score")?;
        debug!("optimal score is {}", model.score());
        Ok(model.score().clone())
    }

    /// Enumerates up to `n` optimal labelings (0 for all of them).
    pub fn enumerate_labelings(
        &self,
        instance: &Instance,
        config: &ConsistencyConfig,
        n: usize,
    ) -> Result<Vec<Labeling>> {
        let bound = self.score(instance, config)?;
        let mut modules = modules_for(config);
        modules.push(Module::ShowLabels);
        modules.push(match config.objective {
            Objective::Scenfit => Module::ShowErrors,
            Objective::Mcos => Module::ShowRepairs,
        });
        let mode = SolveMode::OptimalModels {
            n,
            bound: Some(bound),
        };
        self.solve(modules, instance, &mode)
            .context("while enumerating optimal labelings")?
            .iter()
            .map(Labeling::try_from_model)
            .collect()
    }

    /// Computes the predictions of the optimal labelings.
    ///
    /// Strong predictions are the behaviors shared by all the optimal labelings,
    /// while weak predictions are the behaviors of at least one of them.
    pub fn predict(
        &self,
        instance: &Instance,
        config: &ConsistencyConfig,
        prediction_mode: PredictionMode,
    ) -> Result<Predictions> {
        let bound = Some(self.score(instance, config)?);
        let mut modules = modules_for(config);
        modules.push(if config.setting.one_state() {
            Module::Predictions
        } else {
            Module::PredictionsDepmat
        });
        let mode = match prediction_mode {
            PredictionMode::Strong => SolveMode::CautiousOptimal { bound },
            PredictionMode::Weak => SolveMode::BraveOptimal { bound },
        };
        let model = self
            .solve_single(modules, instance, &mode)
            .context("while computing predictions")?;
        Predictions::try_from_model(&model)
    }

    /// Enumerates the minimal inconsistent cores of an instance.
    ///
    /// The same core may be returned more than once; see [remove_duplicate_mics](crate::query::remove_duplicate_mics).
    pub fn enumerate_minimal_inconsistent_cores(
        &self,
        instance: &Instance,
        config: &ConsistencyConfig,
    ) -> Result<Vec<Mic>> {
        let mut modules = vec![Module::Mics];
        if config.setting.fwd_propagation() {
            modules.push(Module::MicsFwdProp);
        }
        self.solve(modules, instance, &SolveMode::SubsetMinimal)
            .context("while enumerating minimal inconsistent cores")?
            .iter()
            .map(|m| Mic::try_from_model(m, instance))
            .collect()
    }

    /// Computes the optimal (fit, repairs) score reachable by repairing the network with the given mode.
    ///
    /// Adding edges under elementary path semantics is rejected before any solver call;
    /// the greedy repair search handles this case.
    pub fn optimal_repair_score(
        &self,
        instance: &Instance,
        setting: &Setting,
        mode: RepairMode,
    ) -> Result<Score> {
        let modules = repair_modules_for(setting, mode)?;
        let model = self
            .solve_single(modules, instance, &SolveMode::Optimum)
            .context("while computing the optimal repair score")?;
        debug!("optimal repair score is {}", model.score());
        Ok(model.score().clone())
    }

    /// Computes the optimal repair score, and enumerates up to `n` repair sets reaching it (0 for all of them).
    pub fn enumerate_repairs(
        &self,
        instance: &Instance,
        setting: &Setting,
        mode: RepairMode,
        n: usize,
    ) -> Result<(Score, Vec<RepairSet>)> {
        let bound = self.optimal_repair_score(instance, setting, mode)?;
        let mut modules = repair_modules_for(setting, mode)?;
        modules.push(mode.show_module());
        let solve_mode = SolveMode::OptimalModels {
            n,
            bound: Some(bound.clone()),
        };
        let repairs = self
            .solve(modules, instance, &solve_mode)
            .context("while enumerating optimal repairs")?
            .iter()
            .map(|m| RepairSet::from_atoms(m.atoms()))
            .collect::<Result<Vec<RepairSet>>>()?;
        Ok((bound, repairs))
    }

    /// Enumerates up to `n` repair sets (0 for all of them) of an instance extended by added edges,
    /// under elementary path semantics.
    ///
    /// The added edges are `addedge` facts, as computed by the greedy repair search, and `bound` is their score.
    /// The repair sets include the added edges and the edges removed in the models.
    pub fn enumerate_repairs_with_edges(
        &self,
        instance: &Instance,
        setting: &Setting,
        added_edges: &FactSet,
        bound: &Score,
        n: usize,
    ) -> Result<Vec<RepairSet>> {
        let mut modules = greedy_repair_modules_for(setting)?;
        modules.push(Module::ShowRepairs);
        let mode = SolveMode::OptimalModels {
            n,
            bound: Some(bound.clone()),
        };
        self.solve(modules, &instance.union(added_edges), &mode)
            .context("while enumerating repairs with added edges")?
            .iter()
            .map(|m| RepairSet::from_atoms(m.atoms()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        asp::{mock_solver::MockSolverFactory, Term},
        graph::{EdgeSign, Network, NodeId, Observation, Profile},
        query::{remove_duplicate_mics, RepairOp},
    };

    fn engine(factory: &MockSolverFactory) -> QueryEngine {
        QueryEngine::new_with_solver_factory(Box::new(factory.clone()))
    }

    fn scenfit() -> ConsistencyConfig {
        ConsistencyConfig::new(Setting::default(), Objective::Scenfit)
    }

    #[test]
    fn test_detect_contradictions() {
        let factory = MockSolverFactory::default();
        factory.push_model(
            &[r#"contradiction("p",or("X"),r3)"#],
            Score::default(),
        );
        let contradictions = engine(&factory)
            .detect_contradictions(&FactSet::default())
            .unwrap();
        assert_eq!(1, contradictions.len());
        assert_eq!(NodeId::or("X"), contradictions[0].node);
        assert_eq!(vec![Module::ContradictoryObs], factory.call_modules(0));
        assert_eq!(SolveMode::FirstModel, factory.call_mode(0));
    }

    #[test]
    fn test_detect_no_contradiction() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::default());
        assert!(engine(&factory)
            .detect_contradictions(&FactSet::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_detect_contradictions_without_model() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Unsatisfiable);
        assert!(engine(&factory)
            .detect_contradictions(&FactSet::default())
            .is_err());
    }

    #[test]
    fn test_unknown_result() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Unknown);
        assert!(engine(&factory)
            .score(&FactSet::default(), &scenfit())
            .is_err());
    }

    #[test]
    fn test_infer_inputs() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[r#"input(or("A"))"#], Score::default());
        let inputs = engine(&factory).infer_inputs(&FactSet::default()).unwrap();
        assert!(inputs.contains(&Fact::Input(NodeId::or("A"))));
        assert_eq!(1, inputs.len());
    }

    #[test]
    fn test_score() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::with_fit_and_repairs(3, 0));
        let score = engine(&factory)
            .score(&FactSet::default(), &scenfit())
            .unwrap();
        assert_eq!(3, score.fit());
        assert_eq!(modules_for(&scenfit()), factory.call_modules(0));
        assert_eq!(SolveMode::Optimum, factory.call_mode(0));
    }

    #[test]
    fn test_enumerate_labelings() {
        let factory = MockSolverFactory::default();
        let score = Score::with_fit_and_repairs(1, 0);
        factory.push_model(&[], score.clone());
        factory.push_result(SolvingResult::Satisfiable(vec![]));
        engine(&factory)
            .enumerate_labelings(&FactSet::default(), &scenfit(), 5)
            .unwrap();
        assert_eq!(2, factory.n_calls());
        assert_eq!(
            SolveMode::OptimalModels {
                n: 5,
                bound: Some(score)
            },
            factory.call_mode(1)
        );
        let modules = factory.call_modules(1);
        assert!(modules.contains(&Module::ShowLabels));
        assert!(modules.contains(&Module::ShowErrors));
    }

    #[test]
    fn test_mcos_labelings_show_new_influences() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::with_fit_and_repairs(1, 0));
        factory.push_model(
            &[
                r#"vlabel("p",or("A"),1)"#,
                r#"new_influence("p",or("A"),1)"#,
            ],
            Score::with_fit_and_repairs(1, 0),
        );
        let config = ConsistencyConfig::new(Setting::default(), Objective::Mcos);
        let labelings = engine(&factory)
            .enumerate_labelings(&FactSet::default(), &config, 0)
            .unwrap();
        assert!(factory.call_modules(1).contains(&Module::ShowRepairs));
        assert_eq!(
            Some(&RepairOp::NewInfluence(
                "p".to_string(),
                NodeId::or("A"),
                EdgeSign::Plus
            )),
            labelings[0].repairs().iter().next()
        );
    }

    #[test]
    fn test_predict() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::default());
        factory.push_model(&[r#"pred("p",or("B"),-1)"#], Score::default());
        let predictions = engine(&factory)
            .predict(&FactSet::default(), &scenfit(), PredictionMode::Strong)
            .unwrap();
        assert_eq!(1, predictions.len());
        assert!(factory.call_modules(1).contains(&Module::Predictions));
        assert_eq!(
            SolveMode::CautiousOptimal {
                bound: Some(Score::default())
            },
            factory.call_mode(1)
        );
    }

    #[test]
    fn test_predict_depmat() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::default());
        factory.push_model(&[], Score::default());
        let config = ConsistencyConfig::new(Setting::elementary_path(), Objective::Mcos);
        engine(&factory)
            .predict(&FactSet::default(), &config, PredictionMode::Weak)
            .unwrap();
        assert!(factory.call_modules(1).contains(&Module::PredictionsDepmat));
        assert!(matches!(
            factory.call_mode(1),
            SolveMode::BraveOptimal { .. }
        ));
    }

    #[test]
    fn test_mics() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Satisfiable(vec![
            Model::new(
                vec![crate::asp::Term::parse(r#"active(or("C"))"#).unwrap()],
                Score::default(),
            ),
            Model::new(vec![], Score::default()),
        ]));
        let mics = engine(&factory)
            .enumerate_minimal_inconsistent_cores(&FactSet::default(), &scenfit())
            .unwrap();
        assert_eq!(2, mics.len());
        assert_eq!(
            vec![Module::Mics, Module::MicsFwdProp],
            factory.call_modules(0)
        );
        assert_eq!(SolveMode::SubsetMinimal, factory.call_mode(0));
    }

    #[test]
    fn test_no_mics_when_consistent() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Unsatisfiable);
        let setting = Setting::default().without_fwd_propagation();
        let config = ConsistencyConfig::new(setting, Objective::Scenfit);
        assert!(engine(&factory)
            .enumerate_minimal_inconsistent_cores(&FactSet::default(), &config)
            .unwrap()
            .is_empty());
        assert_eq!(vec![Module::Mics], factory.call_modules(0));
    }

    #[test]
    fn test_optgraph_with_elementary_paths_is_rejected() {
        let factory = MockSolverFactory::default();
        assert!(engine(&factory)
            .optimal_repair_score(
                &FactSet::default(),
                &Setting::elementary_path(),
                RepairMode::OptGraph
            )
            .is_err());
        assert_eq!(0, factory.n_calls());
    }

    #[test]
    fn test_enumerate_repairs() {
        let factory = MockSolverFactory::default();
        let score = Score::with_fit_and_repairs(0, 1);
        factory.push_model(&[], score.clone());
        factory.push_model(&[r#"flip(or("B"),or("C"),-1)"#], score.clone());
        let (bound, repairs) = engine(&factory)
            .enumerate_repairs(
                &FactSet::default(),
                &Setting::default(),
                RepairMode::FlipEdges,
                0,
            )
            .unwrap();
        assert_eq!(score, bound);
        assert_eq!(1, repairs.len());
        assert_eq!(
            Some(&RepairOp::FlipEdge(
                NodeId::or("B"),
                NodeId::or("C"),
                EdgeSign::Minus
            )),
            repairs[0].iter().next()
        );
        let modules = factory.call_modules(1);
        assert!(modules.contains(&Module::FlipEdges));
        assert_eq!(Some(&Module::ShowFlips), modules.last());
    }

    #[test]
    fn test_enumerate_repairs_with_edges() {
        let factory = MockSolverFactory::default();
        factory.push_model(
            &[r#"addedge(or("A"),or("C"),1)"#],
            Score::with_fit_and_repairs(0, 2),
        );
        let edges: FactSet = vec![Fact::AddEdge(
            NodeId::or("A"),
            NodeId::or("C"),
            EdgeSign::Plus,
        )]
        .into_iter()
        .collect();
        let repairs = engine(&factory)
            .enumerate_repairs_with_edges(
                &FactSet::default(),
                &Setting::elementary_path(),
                &edges,
                &Score::with_fit_and_repairs(0, 2),
                1,
            )
            .unwrap();
        assert_eq!(1, repairs.len());
        assert!(factory.call_program(0).facts().contains(&Fact::AddEdge(
            NodeId::or("A"),
            NodeId::or("C"),
            EdgeSign::Plus
        )));
    }

    /// A -> B (+), B -> C (-), with A, B and C observed increasing.
    fn chain_instance() -> Instance {
        let mut network = Network::default();
        network.add_edge(NodeId::or("A"), NodeId::or("B"), Some(EdgeSign::Plus));
        network.add_edge(NodeId::or("B"), NodeId::or("C"), Some(EdgeSign::Minus));
        network.add_input(NodeId::or("A"));
        let mut profile = Profile::new("p");
        for n in ["A", "B", "C"] {
            profile.add_observation(NodeId::or(n), Observation::Plus);
        }
        network.to_facts().union(&profile.to_facts())
    }

    fn core_model(nodes: &[&str]) -> Model {
        let atoms = nodes
            .iter()
            .map(|n| Term::parse(&format!(r#"active(or("{}"))"#, n)).unwrap())
            .collect();
        Model::new(atoms, Score::default())
    }

    #[test]
    fn test_chain_mic() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Satisfiable(vec![core_model(&["B", "C"])]));
        let instance = chain_instance();
        let mics = engine(&factory)
            .enumerate_minimal_inconsistent_cores(&instance, &scenfit())
            .unwrap();
        assert_eq!(1, mics.len());
        let edges = mics[0]
            .edges()
            .map(|(u, v, s)| (u.clone(), v.clone(), s.iter().copied().collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                (NodeId::or("A"), NodeId::or("B"), vec![EdgeSign::Plus]),
                (NodeId::or("B"), NodeId::or("C"), vec![EdgeSign::Minus]),
            ],
            edges
        );
        let observations = mics[0]
            .observations()
            .map(|(_, n, o)| (n.clone(), *o))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                (NodeId::or("B"), Observation::Plus),
                (NodeId::or("C"), Observation::Plus),
            ],
            observations
        );
        assert_eq!(&instance, factory.call_program(0).facts());
    }

    #[test]
    fn test_chain_repair() {
        let factory = MockSolverFactory::default();
        let score = Score::with_fit_and_repairs(0, 1);
        factory.push_model(&[], score.clone());
        factory.push_model(&[r#"flip(or("B"),or("C"),-1)"#], score.clone());
        let (bound, repairs) = engine(&factory)
            .enumerate_repairs(&chain_instance(), &Setting::default(), RepairMode::FlipEdges, 0)
            .unwrap();
        assert_eq!(score, bound);
        assert_eq!(
            vec![&RepairOp::FlipEdge(
                NodeId::or("B"),
                NodeId::or("C"),
                EdgeSign::Minus
            )],
            repairs[0].iter().collect::<Vec<_>>()
        );
        assert_eq!(
            SolveMode::OptimalModels {
                n: 0,
                bound: Some(score)
            },
            factory.call_mode(1)
        );
    }

    #[test]
    fn test_duplicate_mics_are_removed() {
        let factory = MockSolverFactory::default();
        factory.push_result(SolvingResult::Satisfiable(vec![
            core_model(&["B", "C"]),
            core_model(&["C", "B"]),
            core_model(&["C"]),
        ]));
        let mics = engine(&factory)
            .enumerate_minimal_inconsistent_cores(&chain_instance(), &scenfit())
            .unwrap();
        assert_eq!(3, mics.len());
        let mics = remove_duplicate_mics(mics);
        assert_eq!(2, mics.len());
        assert_eq!(
            vec![&NodeId::or("B"), &NodeId::or("C")],
            mics[0].nodes().collect::<Vec<_>>()
        );
        assert_eq!(vec![&NodeId::or("C")], mics[1].nodes().collect::<Vec<_>>());
    }

    #[test]
    fn test_more_profiles_extend_the_program() {
        let factory = MockSolverFactory::default();
        factory.push_model(&[], Score::with_fit_and_repairs(1, 0));
        factory.push_model(&[], Score::with_fit_and_repairs(2, 0));
        let engine = engine(&factory);
        let instance = chain_instance();
        let mut other = Profile::new("q");
        other.add_observation(NodeId::or("C"), Observation::Minus);
        let extended = instance.union(&other.to_facts());
        let score = engine.score(&instance, &scenfit()).unwrap();
        let extended_score = engine.score(&extended, &scenfit()).unwrap();
        assert!(extended_score >= score);
        assert_eq!(factory.call_modules(0), factory.call_modules(1));
        let facts = factory.call_program(1).facts().clone();
        assert!(factory
            .call_program(0)
            .facts()
            .iter()
            .all(|f| facts.contains(f)));
        assert!(facts.len() > factory.call_program(0).facts().len());
    }
}
