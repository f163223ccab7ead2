use super::{
    cli_manager::logging_level_cli_arg,
    command::Command,
    common,
    report::{ConsistencyReport, ObservationReport},
};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use iggy::{
    encodings::{ConsistencyConfig, Objective},
    graph::{Fact, Instance},
    query::{remove_duplicate_mics, PredictionMode},
};
use log::info;
use std::path::Path;

const CMD_NAME: &str = "consistency-check";

const ARG_SCENFIT: &str = "SCENFIT";
const ARG_AUTO_INPUTS: &str = "AUTO_INPUTS";
const ARG_MICS: &str = "MICS";
const ARG_SHOW_LABELINGS: &str = "SHOW_LABELINGS";
const ARG_COUNT_LABELINGS: &str = "COUNT_LABELINGS";
const ARG_SHOW_PREDICTIONS: &str = "SHOW_PREDICTIONS";

pub(crate) struct ConsistencyCheckCommand;

impl ConsistencyCheckCommand {
    pub(crate) fn new() -> Self {
        ConsistencyCheckCommand
    }
}

impl<'a> Command<'a> for ConsistencyCheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Confronts a network with an observation profile, and computes labelings and predictions")
            .setting(AppSettings::DisableVersion)
            .arg(common::network_arg(true))
            .arg(common::observations_arg(
                "the file containing the observations",
                true,
            ))
            .args(&common::setting_args())
            .arg(
                Arg::with_name(ARG_SCENFIT)
                    .long("scenfit")
                    .help("use the scenfit objective instead of mcos"),
            )
            .arg(
                Arg::with_name(ARG_AUTO_INPUTS)
                    .long("auto-inputs")
                    .help("declare nodes without regulators as inputs"),
            )
            .arg(
                Arg::with_name(ARG_MICS)
                    .long("mics")
                    .help("compute the minimal inconsistent cores"),
            )
            .arg(
                Arg::with_name(ARG_SHOW_LABELINGS)
                    .long("show-labelings")
                    .empty_values(false)
                    .multiple(false)
                    .value_name("N")
                    .help("show up to N optimal labelings (0 for all of them)"),
            )
            .arg(
                Arg::with_name(ARG_COUNT_LABELINGS)
                    .long("count-labelings")
                    .empty_values(false)
                    .multiple(false)
                    .value_name("N")
                    .help("count up to N optimal labelings (0 for all of them) without showing them"),
            )
            .arg(
                Arg::with_name(ARG_SHOW_PREDICTIONS)
                    .long("show-predictions")
                    .help("show the predictions shared by all the optimal labelings"),
            )
            .arg(common::json_arg())
            .args(&common::solver_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let network_file = arg_matches.value_of(common::ARG_NETWORK).unwrap();
        let observations_file = arg_matches.value_of(common::ARG_OBSERVATIONS).unwrap();
        let setting = common::read_setting(arg_matches)?;
        let objective = if arg_matches.is_present(ARG_SCENFIT) {
            Objective::Scenfit
        } else {
            Objective::Mcos
        };
        let config = ConsistencyConfig::new(setting, objective);
        let n_labelings = arg_matches
            .value_of(ARG_SHOW_LABELINGS)
            .map(|n| {
                n.parse::<usize>()
                    .context("while parsing the number of labelings to show")
            })
            .transpose()?;
        let n_counted_labelings = arg_matches
            .value_of(ARG_COUNT_LABELINGS)
            .map(|n| {
                n.parse::<usize>()
                    .context("while parsing the number of labelings to count")
            })
            .transpose()?;
        let engine = common::create_query_engine(arg_matches)?;
        let network = common::read_network(Path::new(network_file))?;
        let profile = common::read_profile(Path::new(observations_file))?;
        let contradictions = common::check_profile(&engine, &profile)?;
        if !contradictions.is_empty() {
            return Err(common::contradictions_error(
                observations_file,
                &contradictions,
            ));
        }
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
        let instance: Instance = network_facts.union(&profile.to_facts());
        let score = engine.score(&instance, &config)?.fit();
        if score == 0 {
            info!("the network and the observations are consistent");
        } else {
            info!("the network and the observations are inconsistent");
        }
        let mics = if arg_matches.is_present(ARG_MICS) && score > 0 {
            let mics = engine.enumerate_minimal_inconsistent_cores(&instance, &config)?;
            Some(remove_duplicate_mics(mics))
        } else {
            None
        };
        let labelings = n_labelings
            .map(|n| engine.enumerate_labelings(&instance, &config, n))
            .transpose()?;
        let labeling_count = n_counted_labelings
            .map(|n| {
                engine
                    .enumerate_labelings(&instance, &config, n)
                    .map(|l| l.len())
            })
            .transpose()?;
        if let Some(count) = labeling_count {
            info!("counted {} optimal labeling(s)", count);
        }
        let predictions = if arg_matches.is_present(ARG_SHOW_PREDICTIONS) {
            Some(engine.predict(&instance, &config, PredictionMode::Strong)?)
        } else {
            None
        };
        let report = ConsistencyReport {
            setting,
            objective,
            network_file: network_file.to_string(),
            network_statistics: network.statistics(),
            observations: Some(ObservationReport {
                file: observations_file.to_string(),
                statistics: profile.statistics(&network),
            }),
            computed_inputs,
            score,
            mics,
            labelings,
            labeling_count,
            prediction_statistics: predictions.as_ref().map(|p| p.statistics()),
            predictions,
        };
        common::write_report(arg_matches, &report)
    }
}
