use anyhow::Result;
use iggy::{
    asp::Score,
    encodings::{Objective, RepairMode, Setting},
    graph::{NetworkStatistics, NodeId, ObservationStatistics},
    query::{Labeling, Mic, PredictionStatistics, Predictions, RepairSet},
};
use serde::Serialize;
use std::io::Write;

/// The statistics of an observation file.
#[derive(Serialize)]
pub(crate) struct ObservationReport {
    pub(crate) file: String,
    pub(crate) statistics: ObservationStatistics,
}

/// The content of a check report.
#[derive(Serialize)]
pub(crate) struct CheckReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) network_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) network_statistics: Option<NetworkStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<ObservationReport>,
}

/// The content of a consistency check report.
#[derive(Serialize)]
pub(crate) struct ConsistencyReport {
    pub(crate) setting: Setting,
    pub(crate) objective: Objective,
    pub(crate) network_file: String,
    pub(crate) network_statistics: NetworkStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<ObservationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) computed_inputs: Option<Vec<NodeId>>,
    pub(crate) score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) mics: Option<Vec<Mic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) labelings: Option<Vec<Labeling>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) labeling_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) predictions: Option<Predictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) prediction_statistics: Option<PredictionStatistics>,
}

/// The content of a graph repair report.
#[derive(Serialize)]
pub(crate) struct RepairReport {
    pub(crate) setting: Setting,
    pub(crate) repair_mode: RepairMode,
    pub(crate) network_file: String,
    pub(crate) network_statistics: NetworkStatistics,
    pub(crate) observations: Vec<ObservationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) computed_inputs: Option<Vec<NodeId>>,
    pub(crate) score: Score,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) repairs: Option<Vec<RepairSet>>,
}

/// Writes a report, either as a JSON document or as a Markdown-like text.
pub(crate) trait ReportWriter<R> {
    fn write_report(&self, out: &mut dyn Write, report: &R) -> Result<()>;
}

#[derive(Default)]
pub(crate) struct JsonReportWriter;

impl<R> ReportWriter<R> for JsonReportWriter
where
    R: Serialize,
{
    fn write_report(&self, out: &mut dyn Write, report: &R) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct TextReportWriter;

impl TextReportWriter {
    fn write_setting(&self, out: &mut dyn Write, setting: &Setting) -> Result<()> {
        writeln!(out, "\n## Settings\n")?;
        write!(out, "{}", setting)?;
        Ok(())
    }

    fn write_network(
        &self,
        out: &mut dyn Write,
        file: &str,
        stats: &NetworkStatistics,
    ) -> Result<()> {
        writeln!(out, "\nNetwork file: {}", file)?;
        writeln!(out, "\n## Network statistics\n")?;
        writeln!(out, "- OR nodes (species): {}", stats.or_nodes)?;
        writeln!(out, "- AND nodes (complex regulation): {}", stats.and_nodes)?;
        writeln!(out, "- Auxiliary nodes: {}", stats.aux_nodes)?;
        writeln!(out, "- Activations: {}", stats.activations)?;
        writeln!(out, "- Inhibitions: {}", stats.inhibitions)?;
        writeln!(out, "- Unknowns: {}", stats.unknowns)?;
        writeln!(out, "- Dual: {}", stats.duals)?;
        Ok(())
    }

    fn write_observations(&self, out: &mut dyn Write, obs: &ObservationReport) -> Result<()> {
        let stats = &obs.statistics;
        writeln!(out, "\nObservation file: {}", obs.file)?;
        writeln!(out, "\n## Observations statistics\n")?;
        writeln!(out, "- Observed model nodes:   {}", stats.observed)?;
        writeln!(out, "- Unobserved model nodes: {}", stats.unobserved)?;
        writeln!(out, "- Observed not in model:  {}", stats.not_in_model)?;
        writeln!(out, "- Inputs:                 {}", stats.inputs)?;
        writeln!(out, "- MIN:                    {}", stats.min)?;
        writeln!(out, "- MAX:                    {}", stats.max)?;
        writeln!(out, "- Observations:           {}", stats.observations)?;
        writeln!(out, "  - +:                    {}", stats.plus)?;
        writeln!(out, "  - -:                    {}", stats.minus)?;
        writeln!(out, "  - 0:                    {}", stats.zero)?;
        writeln!(out, "  - notPlus:              {}", stats.not_plus)?;
        writeln!(out, "  - notMinus:             {}", stats.not_minus)?;
        Ok(())
    }

    fn write_inputs(&self, out: &mut dyn Write, inputs: &[NodeId]) -> Result<()> {
        writeln!(out, "\n## Computed input nodes: {}\n", inputs.len())?;
        for i in inputs {
            writeln!(out, "- {}", i)?;
        }
        Ok(())
    }

    fn write_repair_sets(&self, out: &mut dyn Write, repairs: &[RepairSet]) -> Result<()> {
        for (i, r) in repairs.iter().enumerate() {
            writeln!(out, "\n{}. Repair set:", i + 1)?;
            for op in r.iter() {
                writeln!(out, "  - {}", op)?;
            }
        }
        Ok(())
    }
}

impl ReportWriter<CheckReport> for TextReportWriter {
    fn write_report(&self, out: &mut dyn Write, report: &CheckReport) -> Result<()> {
        writeln!(out, "# Check Report")?;
        if let (Some(file), Some(stats)) = (&report.network_file, &report.network_statistics) {
            self.write_network(out, file, stats)?;
        }
        if let Some(obs) = &report.observations {
            self.write_observations(out, obs)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl ReportWriter<ConsistencyReport> for TextReportWriter {
    fn write_report(&self, out: &mut dyn Write, report: &ConsistencyReport) -> Result<()> {
        writeln!(out, "# Iggy Report")?;
        self.write_setting(out, &report.setting)?;
        self.write_network(out, &report.network_file, &report.network_statistics)?;
        if let Some(obs) = &report.observations {
            self.write_observations(out, obs)?;
        }
        if let Some(inputs) = &report.computed_inputs {
            self.write_inputs(out, inputs)?;
        }
        writeln!(out, "\n## Consistency results\n")?;
        let objective = match report.objective {
            Objective::Scenfit => "scenfit",
            Objective::Mcos => "mcos",
        };
        writeln!(out, "{}: {}", objective, report.score)?;
        if let Some(count) = report.labeling_count {
            writeln!(out, "optimal labelings: {}", count)?;
        }
        if let Some(mics) = &report.mics {
            writeln!(out, "\n## Minimal inconsistent cores\n")?;
            for (i, mic) in mics.iter().enumerate() {
                let nodes = mic.nodes().map(|n| n.to_string()).collect::<Vec<String>>();
                writeln!(out, "- mic {}: {}", i + 1, nodes.join(" "))?;
            }
        }
        if let Some(labelings) = &report.labelings {
            writeln!(out, "\n## Labelings\n")?;
            for (i, labeling) in labelings.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "- Labeling {}:", i + 1)?;
                for (_, node, sign) in labeling.labels() {
                    writeln!(out, "  {} = {}", node, sign)?;
                }
                writeln!(out, "\n  Repair set:")?;
                for op in labeling.repairs().iter() {
                    writeln!(out, "  - {}", op)?;
                }
            }
        }
        if let Some(predictions) = &report.predictions {
            writeln!(out, "\n## Predictions\n")?;
            for p in predictions.iter() {
                writeln!(out, "{} = {}", p.node, p.behavior)?;
            }
        }
        if let Some(stats) = &report.prediction_statistics {
            writeln!(out, "\n## Prediction statistics\n")?;
            writeln!(out, "- predicted +        : {}", stats.plus)?;
            writeln!(out, "- predicted -        : {}", stats.minus)?;
            writeln!(out, "- predicted 0        : {}", stats.zero)?;
            writeln!(out, "- predicted notPlus  : {}", stats.not_plus)?;
            writeln!(out, "- predicted notMinus : {}", stats.not_minus)?;
            writeln!(out, "- predicted CHANGE   : {}", stats.change)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl ReportWriter<RepairReport> for TextReportWriter {
    fn write_report(&self, out: &mut dyn Write, report: &RepairReport) -> Result<()> {
        writeln!(out, "# Optgraph Report")?;
        self.write_network(out, &report.network_file, &report.network_statistics)?;
        writeln!(out, "\n## Observations\n")?;
        for obs in report.observations.iter() {
            writeln!(out, "- {}", obs.file)?;
        }
        self.write_setting(out, &report.setting)?;
        if let Some(inputs) = &report.computed_inputs {
            self.write_inputs(out, inputs)?;
        }
        writeln!(out, "\n## Consistency results\n")?;
        let (fit, repairs) = (report.score.fit(), report.score.repairs());
        match report.repair_mode {
            RepairMode::RemoveEdges => writeln!(
                out,
                "The network and data can reach a scenfit of {} with {} removed edges.",
                fit, repairs
            )?,
            RepairMode::OptGraph => writeln!(
                out,
                "The network and data can reach a scenfit of {} with repairs of score {}.",
                fit, repairs
            )?,
            RepairMode::FlipEdges => writeln!(
                out,
                "The network and data can reach a scenfit of {} with {} flipped edges.",
                fit, repairs
            )?,
        }
        if let Some(repairs) = &report.repairs {
            self.write_repair_sets(out, repairs)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::writable_string::WritableString;
    use iggy::{
        graph::EdgeSign,
        query::RepairOp,
    };

    fn repair_report() -> RepairReport {
        RepairReport {
            setting: Setting::default(),
            repair_mode: RepairMode::FlipEdges,
            network_file: "net.sif".to_string(),
            network_statistics: NetworkStatistics::default(),
            observations: vec![ObservationReport {
                file: "obs/p1.txt".to_string(),
                statistics: ObservationStatistics::default(),
            }],
            computed_inputs: None,
            score: Score::with_fit_and_repairs(0, 1),
            repairs: Some(vec![vec![RepairOp::FlipEdge(
                NodeId::or("B"),
                NodeId::or("C"),
                EdgeSign::Minus,
            )]
            .into_iter()
            .collect()]),
        }
    }

    fn consistency_report() -> ConsistencyReport {
        ConsistencyReport {
            setting: Setting::default(),
            objective: Objective::Mcos,
            network_file: "net.sif".to_string(),
            network_statistics: NetworkStatistics::default(),
            observations: None,
            computed_inputs: None,
            score: 1,
            mics: None,
            labelings: None,
            labeling_count: Some(3),
            predictions: None,
            prediction_statistics: None,
        }
    }

    #[test]
    fn test_text_labeling_count() {
        let mut out = WritableString::default();
        TextReportWriter::default()
            .write_report(&mut out, &consistency_report())
            .unwrap();
        let text = out.to_string();
        assert!(text.contains("mcos: 1\noptimal labelings: 3\n"));
        assert!(!text.contains("## Labelings"));
    }

    #[test]
    fn test_json_labeling_count() {
        let mut out = WritableString::default();
        JsonReportWriter::default()
            .write_report(&mut out, &consistency_report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.to_string()).unwrap();
        assert_eq!(3, value["labeling_count"]);
        assert!(value.get("labelings").is_none());
    }

    #[test]
    fn test_text_repair_report() {
        let mut out = WritableString::default();
        TextReportWriter::default()
            .write_report(&mut out, &repair_report())
            .unwrap();
        let text = out.to_string();
        assert!(text.starts_with("# Optgraph Report"));
        assert!(text.contains("- obs/p1.txt"));
        assert!(text.contains("scenfit of 0 with 1 flipped edges"));
        assert!(text.contains("1. Repair set:\n  - flip edge: B -> C (- to +)"));
    }

    #[test]
    fn test_json_repair_report() {
        let mut out = WritableString::default();
        JsonReportWriter::default()
            .write_report(&mut out, &repair_report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.to_string()).unwrap();
        assert_eq!("flip_edges", value["repair_mode"]);
        assert_eq!(1, value["repairs"][0].as_array().unwrap().len());
        assert!(value.get("computed_inputs").is_none());
    }
}
