use super::{Model, Score, SolveMode, SolvingResult, Term};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// The JSON document written by clingo with `--outf=2`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ClingoOutput {
    result: String,
    #[serde(default)]
    call: Vec<Call>,
    #[serde(default)]
    models: Option<ModelsSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Call {
    #[serde(default)]
    witnesses: Vec<Witness>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Witness {
    #[serde(default)]
    value: Vec<String>,
    #[serde(default)]
    costs: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ModelsSummary {
    #[serde(default)]
    optimal: Option<usize>,
}

impl ClingoOutput {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("while parsing the output of the solver")
    }

    /// Translates the output into a solving result, keeping the witnesses relevant for the mode.
    ///
    /// `cost_offset` is removed from each cost.
    pub(crate) fn into_solving_result(
        self,
        mode: &SolveMode,
        cost_offset: i64,
    ) -> Result<SolvingResult> {
        match self.result.as_str() {
            "UNSATISFIABLE" => return Ok(SolvingResult::Unsatisfiable),
            "UNKNOWN" => return Ok(SolvingResult::Unknown),
            "SATISFIABLE" | "OPTIMUM FOUND" => {}
            r => return Err(anyhow!(r#"unexpected solver result "{}""#, r)),
        }
        let n_optimal = self.models.as_ref().and_then(|m| m.optimal);
        let mut witnesses = self
            .call
            .into_iter()
            .flat_map(|c| c.witnesses.into_iter())
            .collect::<Vec<Witness>>();
        let n_kept = match mode {
            SolveMode::FirstModel | SolveMode::SubsetMinimal => witnesses.len(),
            SolveMode::Optimum
            | SolveMode::CautiousOptimal { .. }
            | SolveMode::BraveOptimal { .. } => 1,
            SolveMode::OptimalModels { .. } => n_optimal.unwrap_or(witnesses.len()),
        };
        let kept = witnesses.split_off(witnesses.len().saturating_sub(n_kept));
        let models = kept
            .into_iter()
            .map(|w| {
                let atoms = w
                    .value
                    .iter()
                    .map(|a| Term::parse(a))
                    .collect::<Result<Vec<Term>>>()?;
                let costs = w.costs.iter().map(|c| c - cost_offset).collect();
                Ok(Model::new(atoms, Score::new(costs)))
            })
            .collect::<Result<Vec<Model>>>()?;
        Ok(SolvingResult::Satisfiable(models))
    }
}
