use super::{
    cli_manager::logging_level_cli_arg,
    command::Command,
    common,
    report::{ObservationReport, RepairReport},
};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use iggy::{
    asp::Score,
    encodings::{RepairMode, Setting},
    graph::{Fact, FactSet, Instance, Network, Profile},
    query::{QueryEngine, RepairSet},
    repair::{EditSet, GreedyRepairSearch, SolverRepairOracle},
};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

const CMD_NAME: &str = "graph-repair";

const ARG_AUTO_INPUTS: &str = "AUTO_INPUTS";
const ARG_REPAIR_MODE: &str = "REPAIR_MODE";
const ARG_SHOW_REPAIRS: &str = "SHOW_REPAIRS";

pub(crate) struct GraphRepairCommand;

impl GraphRepairCommand {
    pub(crate) fn new() -> Self {
        GraphRepairCommand
    }
}

impl<'a> Command<'a> for GraphRepairCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Computes minimal repairs making a network consistent with a set of observation profiles")
            .setting(AppSettings::DisableVersion)
            .arg(common::network_arg(true))
            .arg(common::observations_arg(
                "the directory containing the observation files",
                true,
            ))
            .args(&common::setting_args())
            .arg(
                Arg::with_name(ARG_AUTO_INPUTS)
                    .long("auto-inputs")
                    .help("declare nodes without regulators as inputs"),
            )
            .arg(
                Arg::with_name(ARG_REPAIR_MODE)
                    .long("repair-mode")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&["remove", "optgraph", "flip"])
                    .default_value("remove")
                    .help("the allowed repairs: remove edges, add or remove edges, flip edge signs"),
            )
            .arg(
                Arg::with_name(ARG_SHOW_REPAIRS)
                    .long("show-repairs")
                    .empty_values(false)
                    .multiple(false)
                    .value_name("N")
                    .help("show up to N optimal repair sets (0 for all of them)"),
            )
            .arg(common::json_arg())
            .args(&common::solver_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let network_file = arg_matches.value_of(common::ARG_NETWORK).unwrap();
        let observations_dir = arg_matches.value_of(common::ARG_OBSERVATIONS).unwrap();
        let setting = common::read_setting(arg_matches)?;
        let repair_mode = RepairMode::from_str(arg_matches.value_of(ARG_REPAIR_MODE).unwrap())
            .context("while reading the repair mode")?;
        let n_repairs = arg_matches
            .value_of(ARG_SHOW_REPAIRS)
            .map(|n| {
                n.parse::<usize>()
                    .context("while parsing the number of repair sets to show")
            })
            .transpose()?;
        let engine = common::create_query_engine(arg_matches)?;
        let network = common::read_network(Path::new(network_file))?;
        let profiles = read_profiles(&engine, Path::new(observations_dir))?;
        let mut network_facts = network.to_facts();
        let computed_inputs = if arg_matches.is_present(ARG_AUTO_INPUTS) {
            let inputs = engine.infer_inputs(&network_facts)?;
            info!("computed {} input node(s)", inputs.len());
            network_facts = network_facts.union(&inputs);
            Some(
                inputs
                    .iter()
                    .filter_map(|f| match f {
                        Fact::Input(n) => Some(n.clone()),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            None
        };
        let instance = profiles
            .iter()
            .fold(network_facts, |acc, p| acc.union(&p.to_facts()));
        let (score, repairs) = if repair_mode == RepairMode::OptGraph
            && setting.uses_elementary_paths()
        {
            greedy_repairs(&engine, &instance, &setting, n_repairs)?
        } else {
            exact_repairs(&engine, &instance, &setting, repair_mode, n_repairs)?
        };
        let report = RepairReport {
            setting,
            repair_mode,
            network_file: network_file.to_string(),
            network_statistics: network.statistics(),
            observations: observation_reports(&profiles, &network),
            computed_inputs,
            score,
            repairs,
        };
        common::write_report(arg_matches, &report)
    }
}

/// Reads the profiles of a directory, in file name order.
///
/// All the files are checked for contradictions before an error is returned.
fn read_profiles(engine: &QueryEngine, dir: &Path) -> Result<Vec<Profile>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!(r#"while reading directory "{}""#, dir.display()))?
        .map(|e| e.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()
        .with_context(|| format!(r#"while reading directory "{}""#, dir.display()))?;
    paths.retain(|p| p.is_file());
    paths.sort_unstable();
    if paths.is_empty() {
        return Err(anyhow!(r#"no observation file in "{}""#, dir.display()));
    }
    let mut profiles = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();
    for path in paths.iter() {
        let profile = common::read_profile(path)?;
        let contradictions = common::check_profile(engine, &profile)?;
        if contradictions.is_empty() {
            profiles.push(profile);
        } else {
            errors.push(
                common::contradictions_error(&path.to_string_lossy(), &contradictions)
                    .to_string(),
            );
        }
    }
    if !errors.is_empty() {
        return Err(anyhow!("{}", errors.join("\n")));
    }
    Ok(profiles)
}

fn observation_reports(profiles: &[Profile], network: &Network) -> Vec<ObservationReport> {
    profiles
        .iter()
        .map(|p| ObservationReport {
            file: p.name().to_string(),
            statistics: p.statistics(network),
        })
        .collect()
}

fn exact_repairs(
    engine: &QueryEngine,
    instance: &Instance,
    setting: &Setting,
    mode: RepairMode,
    n_repairs: Option<usize>,
) -> Result<(Score, Option<Vec<RepairSet>>)> {
    let score = engine.optimal_repair_score(instance, setting, mode)?;
    info!("the optimal repair score is {}", score);
    match n_repairs {
        Some(n) if score.repairs() > 0 => {
            let (_, repairs) = engine.enumerate_repairs(instance, setting, mode, n)?;
            Ok((score, Some(repairs)))
        }
        _ => Ok((score, None)),
    }
}

fn greedy_repairs(
    engine: &QueryEngine,
    instance: &Instance,
    setting: &Setting,
    n_repairs: Option<usize>,
) -> Result<(Score, Option<Vec<RepairSet>>)> {
    info!("adding edges under elementary path semantics; using the greedy repair search");
    let oracle = SolverRepairOracle::new(engine, instance, setting)?;
    let result = GreedyRepairSearch::new(&oracle).run()?;
    info!(
        "the greedy search found {} edit set(s) of score {}",
        result.edit_sets.len(),
        result.score
    );
    let n = match n_repairs {
        Some(n) => n,
        None => return Ok((result.score, None)),
    };
    let repairs = collect_repairs(&result.edit_sets, n, |edits, remaining| {
        let added_edges: FactSet = edits.to_facts();
        let with_edges = engine.enumerate_repairs_with_edges(
            instance,
            setting,
            &added_edges,
            &result.score,
            remaining,
        )?;
        if with_edges.is_empty() {
            warn!("no repair set reaches the score {} with the edges {}", result.score, edits);
        }
        Ok(with_edges)
    })?;
    Ok((result.score, Some(repairs)))
}

/// Collects the repair sets of the edit sets, up to `n` of them in total (0 for all of them).
///
/// The enumeration function receives the number of repair sets still expected, or 0 if there is no limit.
fn collect_repairs<F>(edit_sets: &[EditSet], n: usize, mut enumerate: F) -> Result<Vec<RepairSet>>
where
    F: FnMut(&EditSet, usize) -> Result<Vec<RepairSet>>,
{
    let mut repairs = Vec::new();
    for edits in edit_sets.iter() {
        let remaining = if n == 0 {
            0
        } else if repairs.len() < n {
            n - repairs.len()
        } else {
            break;
        };
        let mut found = enumerate(edits, remaining)?;
        if n > 0 {
            found.truncate(remaining);
        }
        repairs.append(&mut found);
    }
    Ok(repairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iggy::{
        asp::Term,
        graph::{EdgeSign, NodeId},
        repair::Edit,
    };

    fn edit_sets() -> Vec<EditSet> {
        ["A", "B", "C"]
            .iter()
            .map(|u| {
                vec![Edit::new(NodeId::or(u), NodeId::or("D"), EdgeSign::Plus)]
                    .into_iter()
                    .collect()
            })
            .collect()
    }

    fn repair_sets(k: usize) -> Vec<RepairSet> {
        (0..k)
            .map(|i| {
                let atom = Term::parse(&format!(r#"remedge(or("N{}"),or("D"),1)"#, i)).unwrap();
                RepairSet::from_atoms(vec![&atom]).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_collect_repairs_up_to_n() {
        let mut requested = vec![];
        let repairs = collect_repairs(&edit_sets(), 3, |_, remaining| {
            requested.push(remaining);
            Ok(repair_sets(2))
        })
        .unwrap();
        assert_eq!(3, repairs.len());
        assert_eq!(vec![3, 1], requested);
    }

    #[test]
    fn test_collect_repairs_truncates() {
        let repairs = collect_repairs(&edit_sets(), 1, |_, _| Ok(repair_sets(4))).unwrap();
        assert_eq!(1, repairs.len());
    }

    #[test]
    fn test_collect_all_repairs() {
        let mut requested = vec![];
        let repairs = collect_repairs(&edit_sets(), 0, |_, remaining| {
            requested.push(remaining);
            Ok(repair_sets(2))
        })
        .unwrap();
        assert_eq!(6, repairs.len());
        assert_eq!(vec![0, 0, 0], requested);
    }

    #[test]
    fn test_collect_repairs_skips_empty_enumerations() {
        let mut calls = 0;
        let repairs = collect_repairs(&edit_sets(), 2, |_, _| {
            calls += 1;
            Ok(if calls == 1 { vec![] } else { repair_sets(1) })
        })
        .unwrap();
        assert_eq!(2, repairs.len());
        assert_eq!(3, calls);
    }
}
