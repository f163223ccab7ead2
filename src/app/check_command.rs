use super::{
    cli_manager::logging_level_cli_arg,
    command::Command,
    common,
    report::{CheckReport, ObservationReport},
};
use anyhow::Result;
use clap::{App, AppSettings, ArgGroup, ArgMatches, SubCommand};
use iggy::graph::Network;
use std::path::Path;

const CMD_NAME: &str = "check";

const GROUP_INPUTS: &str = "INPUTS";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks network and observation files for errors and displays their statistics")
            .setting(AppSettings::DisableVersion)
            .arg(common::network_arg(false))
            .arg(common::observations_arg(
                "the file containing the observations",
                false,
            ))
            .group(
                ArgGroup::with_name(GROUP_INPUTS)
                    .args(&[common::ARG_NETWORK, common::ARG_OBSERVATIONS])
                    .multiple(true)
                    .required(true),
            )
            .arg(common::json_arg())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let network_file = arg_matches.value_of(common::ARG_NETWORK);
        let network = network_file
            .map(|f| common::read_network(Path::new(f)))
            .transpose()?;
        let observations = arg_matches
            .value_of(common::ARG_OBSERVATIONS)
            .map(|f| -> Result<ObservationReport> {
                let profile = common::read_profile(Path::new(f))?;
                let statistics = match &network {
                    Some(n) => profile.statistics(n),
                    None => profile.statistics(&Network::default()),
                };
                Ok(ObservationReport {
                    file: f.to_string(),
                    statistics,
                })
            })
            .transpose()?;
        let report = CheckReport {
            network_file: network_file.map(|f| f.to_string()),
            network_statistics: network.as_ref().map(|n| n.statistics()),
            observations,
        };
        common::write_report(arg_matches, &report)
    }
}
