use super::{
    clingo_output::ClingoOutput, AspSolver, Program, Score, SolveMode, SolvingListener,
    SolvingResult,
};
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::{
    io::{BufWriter, Write},
    path::Path,
    process::Command,
};
use tempfile::TempPath;

// Each optimization level gets one extra unit of cost so that clingo always reports it,
// even when no other element of the level is involved.
const COST_LEVELS: &str = "#minimize{ 1@2,cost_level; 1@1,cost_level }.";
const COST_OFFSET: i64 = 1;

// clingo exit codes: unknown, satisfiable, exhausted and both.
const SUCCESS_EXIT_CODES: [i32; 4] = [0, 10, 20, 30];

/// An answer set solver which execution is made by a system command.
///
/// The system command is composed by an executable program, and a potential list of CLI arguments.
/// The program must accept clingo options and write clingo JSON output.
/// The logic program is given through a temporary file, removed after the call whatever its outcome.
pub struct ExternalAspSolver {
    program: String,
    options: Vec<String>,
    listeners: Vec<Box<dyn SolvingListener>>,
}

impl ExternalAspSolver {
    /// Builds a new external solver.
    ///
    /// The `program` argument is the path from a directory in execution path to the software to execute.
    /// The `options` parameter is the CLI options to provide to the software under execution, before the ones set by this crate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use iggy::asp::{AspSolver, ExternalAspSolver, Program, SolveMode};
    /// # use iggy::encodings::Module;
    /// # use iggy::graph::FactSet;
    /// let mut solver = ExternalAspSolver::new(
    ///     "/usr/bin/clingo".to_string(),
    ///     vec!["--parallel-mode=2".to_string()],
    /// );
    /// let program = Program::new(vec![Module::GuessInputs], FactSet::default());
    /// let result = solver.solve(&program, &SolveMode::FirstModel).unwrap();
    /// assert_eq!(1, result.unwrap_models().len());
    /// ```
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            program,
            options,
            listeners: vec![],
        }
    }

    fn exec_solver(&self, program: &Program, mode: &SolveMode) -> Result<SolvingResult> {
        let is_optimization = mode_args(mode).iter().any(|a| a.starts_with("--opt-mode"));
        let program_file = ProgramFile::create(program, is_optimization)?;
        let mut args = self.options.clone();
        args.append(&mut mode_args(mode));
        args.push("--outf=2".to_string());
        debug!("running {} with arguments {:?}", self.program, args);
        let output = Command::new(&self.program)
            .args(&args)
            .arg(program_file.path())
            .output()
            .with_context(|| format!(r#"while launching the solver "{}""#, self.program))?;
        match output.status.code() {
            Some(c) if SUCCESS_EXIT_CODES.contains(&c) => {}
            status => {
                return Err(anyhow!(
                    "the solver exited with status {:?}: {}",
                    status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ))
            }
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let offset = if is_optimization { COST_OFFSET } else { 0 };
        ClingoOutput::parse(&stdout)?.into_solving_result(mode, offset)
    }
}

impl AspSolver for ExternalAspSolver {
    fn solve(&mut self, program: &Program, mode: &SolveMode) -> Result<SolvingResult> {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(program, mode));
        let result = self.exec_solver(program, mode)?;
        self.listeners.iter().for_each(|l| l.solving_end(&result));
        Ok(result)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }
}

fn mode_args(mode: &SolveMode) -> Vec<String> {
    let opt_mode = |name: &str, bound: &Option<Score>| match bound {
        Some(b) => format!(
            "--opt-mode={},{},{}",
            name,
            b.fit() + COST_OFFSET,
            b.repairs() + COST_OFFSET
        ),
        None => format!("--opt-mode={}", name),
    };
    match mode {
        SolveMode::FirstModel => vec!["1".to_string()],
        SolveMode::Optimum => vec![
            "--opt-strategy=5".to_string(),
            "--opt-mode=opt".to_string(),
        ],
        SolveMode::OptimalModels { n, bound } => vec![
            n.to_string(),
            "--opt-strategy=5".to_string(),
            opt_mode("optN", bound),
            "--project".to_string(),
        ],
        SolveMode::CautiousOptimal { bound } => vec![
            "0".to_string(),
            "--opt-strategy=5".to_string(),
            opt_mode("optN", bound),
            "--enum-mode=cautious".to_string(),
        ],
        SolveMode::BraveOptimal { bound } => vec![
            "0".to_string(),
            "--opt-strategy=5".to_string(),
            opt_mode("optN", bound),
            "--enum-mode=brave".to_string(),
        ],
        SolveMode::SubsetMinimal => vec![
            "0".to_string(),
            "--dom-mod=5,16".to_string(),
            "--heu=Domain".to_string(),
            "--enum-mode=domRec".to_string(),
        ],
    }
}

/// A temporary file holding a program, removed when dropped.
struct ProgramFile {
    path: Option<TempPath>,
}

impl ProgramFile {
    fn create(program: &Program, with_cost_levels: bool) -> Result<Self> {
        let context = "while writing the program to a temporary file";
        let (file, path) = tempfile::Builder::new()
            .prefix("iggy-")
            .suffix(".lp")
            .tempfile()
            .context(context)?
            .into_parts();
        let program_file = ProgramFile { path: Some(path) };
        let mut writer = BufWriter::new(file);
        program.write_to(&mut writer).context(context)?;
        if with_cost_levels {
            writeln!(writer, "{}", COST_LEVELS).context(context)?;
        }
        writer.flush().context(context)?;
        Ok(program_file)
    }

    fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for ProgramFile {
    fn drop(&mut self) {
        if let Some(p) = self.path.take() {
            let display = p.display().to_string();
            if let Err(e) = p.close() {
                warn!("cannot remove temporary file {}: {}", display, e);
            }
        }
    }
}
