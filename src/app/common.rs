use super::{
    app_helper::AppHelper,
    command::Command,
    report::{JsonReportWriter, ReportWriter, TextReportWriter},
    AuthorsCommand, CheckCommand, ConsistencyCheckCommand, GraphRepairCommand,
};
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use iggy::{
    asp::{
        AspSolverFactory, ExternalAspSolverFactory, Program, SolveMode, SolvingListener,
        SolvingResult, DEFAULT_SOLVER_PROGRAM,
    },
    encodings::Setting,
    graph::{Network, Profile},
    io::{InstanceReader, NetworkReader, ProfileReader},
    query::QueryEngine,
};
use log::{info, warn};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Iggy confronts signed influence graphs with observations of changes between two states, \
        detects inconsistencies, predicts unobserved behaviors and repairs networks.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ConsistencyCheckCommand::new()),
        Box::new(GraphRepairCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_NETWORK: &str = "NETWORK";

pub(crate) fn network_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name(ARG_NETWORK)
        .short("n")
        .long("network")
        .empty_values(false)
        .multiple(false)
        .help("the file containing the influence graph")
        .required(required)
}

pub(crate) const ARG_OBSERVATIONS: &str = "OBSERVATIONS";

pub(crate) fn observations_arg(help: &'static str, required: bool) -> Arg<'static, 'static> {
    Arg::with_name(ARG_OBSERVATIONS)
        .short("o")
        .long("observations")
        .empty_values(false)
        .multiple(false)
        .help(help)
        .required(required)
}

const ARG_JSON: &str = "JSON";

pub(crate) fn json_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_JSON)
        .long("json")
        .help("write the report as a JSON document")
}

/// Writes a report on the standard output, in the format selected by the user.
pub(crate) fn write_report<R>(arg_matches: &ArgMatches<'_>, report: &R) -> Result<()>
where
    R: Serialize,
    TextReportWriter: ReportWriter<R>,
{
    let mut out = std::io::stdout();
    if arg_matches.is_present(ARG_JSON) {
        JsonReportWriter::default().write_report(&mut out, report)
    } else {
        TextReportWriter::default().write_report(&mut out, report)
    }
}

const ARG_FWD_PROPAGATION_OFF: &str = "FWD_PROPAGATION_OFF";
const ARG_FOUNDED_CONSTRAINTS_OFF: &str = "FOUNDED_CONSTRAINTS_OFF";
const ARG_ELEMPATH: &str = "ELEMPATH";
const ARG_SOMEPATH: &str = "SOMEPATH";
const ARG_DEPMAT: &str = "DEPMAT";

pub(crate) fn setting_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_FWD_PROPAGATION_OFF)
            .long("fwd-propagation-off")
            .conflicts_with(ARG_DEPMAT)
            .help("disable forward propagation constraints"),
        Arg::with_name(ARG_FOUNDED_CONSTRAINTS_OFF)
            .long("founded-constraints-off")
            .conflicts_with(ARG_DEPMAT)
            .help("disable foundedness constraints"),
        Arg::with_name(ARG_ELEMPATH)
            .long("elempath")
            .conflicts_with(ARG_SOMEPATH)
            .help("every change must be explained by an elementary path from an input"),
        Arg::with_name(ARG_SOMEPATH)
            .long("somepath")
            .help("every change must be explained by a path from an input"),
        Arg::with_name(ARG_DEPMAT)
            .long("depmat")
            .conflicts_with(ARG_SOMEPATH)
            .help("combine multiple states, a change must be explained by an elementary path from an input"),
    ]
}

pub(crate) fn read_setting(arg_matches: &ArgMatches<'_>) -> Result<Setting> {
    if arg_matches.is_present(ARG_DEPMAT) {
        return Ok(Setting::elementary_path());
    }
    Setting::new(
        true,
        !arg_matches.is_present(ARG_FWD_PROPAGATION_OFF),
        !arg_matches.is_present(ARG_FOUNDED_CONSTRAINTS_OFF),
        arg_matches.is_present(ARG_ELEMPATH),
        arg_matches.is_present(ARG_SOMEPATH),
    )
    .context("while reading the consistency requirements")
}

pub(crate) fn read_file_path<T>(file_path: &Path, reader: &mut dyn InstanceReader<T>) -> Result<T> {
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    read_file_path_with(file_path, &|r| reader.read(r))
}

pub(crate) fn read_file_path_with<F, R>(file_path: &Path, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!(r#"while opening file "{}""#, file_path.display()))?,
    );
    (reader)(&mut file_reader).with_context(|| format!(r#"while reading file "{}""#, file_path.display()))
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &Path) -> Result<PathBuf> {
    fs::canonicalize(file_path)
        .with_context(|| format!(r#"while opening file "{}""#, file_path.display()))
}

pub(crate) fn read_network(file_path: &Path) -> Result<Network> {
    let network = read_file_path(file_path, &mut NetworkReader::default())?;
    info!(
        "the network has {} node(s) and {} edge(s)",
        network.n_nodes(),
        network.n_edges(),
    );
    Ok(network)
}

/// Reads a profile, named after its file path.
pub(crate) fn read_profile(file_path: &Path) -> Result<Profile> {
    let name = file_path.to_string_lossy();
    let profile = read_file_path(file_path, &mut ProfileReader::new(&name))?;
    info!(
        "the profile {} has {} observation(s)",
        profile.name(),
        profile.observations().count()
    );
    Ok(profile)
}

/// Checks a profile for contradictory observations, and returns the contradictions as messages.
pub(crate) fn check_profile(engine: &QueryEngine, profile: &Profile) -> Result<Vec<String>> {
    let contradictions = engine.detect_contradictions(&profile.to_facts())?;
    if contradictions.is_empty() {
        info!("no contradictory observations in {}", profile.name());
    } else {
        warn!(
            "{} contradictory observation(s) in {}",
            contradictions.len(),
            profile.name()
        );
    }
    Ok(contradictions.iter().map(|c| c.to_string()).collect())
}

pub(crate) fn contradictions_error(profile_name: &str, messages: &[String]) -> anyhow::Error {
    anyhow!(
        "contradictory observations in {}; please correct them:\n- {}",
        profile_name,
        messages.join("\n- ")
    )
}

const ARG_CLINGO: &str = "CLINGO";
const ARG_CLINGO_OPTIONS: &str = "CLINGO_OPTIONS";

pub(crate) fn solver_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_CLINGO)
            .long("clingo")
            .empty_values(false)
            .multiple(false)
            .help("a path to the clingo program to use instead of the one in the PATH")
            .required(false),
        Arg::with_name(ARG_CLINGO_OPTIONS)
            .long("clingo-opt")
            .empty_values(false)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
            .help("an option to give to clingo")
            .required(false),
    ]
}

pub(crate) fn create_query_engine(arg_matches: &ArgMatches<'_>) -> Result<QueryEngine> {
    Ok(QueryEngine::new_with_solver_factory(
        create_solver_factory(arg_matches)?,
    ))
}

fn create_solver_factory(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn AspSolverFactory>> {
    let options = arg_matches
        .values_of(ARG_CLINGO_OPTIONS)
        .map(|v| v.map(|o| o.to_string()).collect::<Vec<String>>())
        .unwrap_or_default();
    let program = match arg_matches.value_of(ARG_CLINGO) {
        Some(s) => {
            let path = canonicalize_file_path(Path::new(s))?;
            path.to_str()
                .ok_or_else(|| anyhow!("the path to clingo is not valid UTF-8"))?
                .to_string()
        }
        None => DEFAULT_SOLVER_PROGRAM.to_string(),
    };
    info!("using {:?} with options {:?} as ASP solver", program, options);
    let mut factory = ExternalAspSolverFactory::new(program, options);
    factory.add_solver_listener(Box::new(|| {
        Box::<AspSolvingLogger>::default() as Box<dyn SolvingListener>
    }));
    Ok(Box::new(factory))
}

#[derive(Default)]
struct AspSolvingLogger;

impl SolvingListener for AspSolvingLogger {
    fn solving_start(&self, program: &Program, mode: &SolveMode) {
        info!(
            "launching ASP solver on {} rule module(s) and {} fact(s), looking for {}",
            program.modules().len(),
            program.facts().len(),
            mode
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        match result {
            SolvingResult::Satisfiable(models) => {
                info!("ASP solver ended with {} model(s)", models.len())
            }
            SolvingResult::Unsatisfiable => info!("ASP solver ended with result UNSAT"),
            SolvingResult::Unknown => info!("ASP solver ended with result UNKNOWN"),
        }
    }
}
