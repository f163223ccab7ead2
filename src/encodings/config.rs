use super::Module;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Display;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The consistency semantics, as a set of requirements.
///
/// Path-based semantics (elementary path or some path) combine multiple states and need
/// both forward propagation and founded constraints: building such a setting always enables them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Setting {
    os: bool,
    fp: bool,
    fc: bool,
    ep: bool,
    sp: bool,
}

impl Default for Setting {
    /// One state, forward propagation and founded constraints.
    fn default() -> Self {
        Self {
            os: true,
            fp: true,
            fc: true,
            ep: false,
            sp: false,
        }
    }
}

impl Setting {
    /// Builds a setting from its flags.
    ///
    /// The elementary path (`ep`) and some path (`sp`) requirements are exclusive.
    /// If one of them is set, the one-state requirement is dropped while forward propagation and founded constraints are enabled.
    ///
    /// # Example
    ///
    /// ```
    /// # use iggy::encodings::Setting;
    /// let s = Setting::new(true, false, false, true, false).unwrap();
    /// assert!(!s.one_state());
    /// assert!(s.fwd_propagation() && s.founded_constraints());
    /// assert!(Setting::new(true, true, true, true, true).is_err());
    /// ```
    pub fn new(os: bool, fp: bool, fc: bool, ep: bool, sp: bool) -> Result<Self> {
        if ep && sp {
            return Err(anyhow!(
                "elementary path and some path requirements cannot be set together"
            ));
        }
        if ep || sp {
            return Ok(Self {
                os: false,
                fp: true,
                fc: true,
                ep,
                sp,
            });
        }
        Ok(Self {
            os,
            fp,
            fc,
            ep,
            sp,
        })
    }

    /// The elementary path setting (also known as dependency matrix).
    pub fn elementary_path() -> Self {
        Self {
            os: false,
            fp: true,
            fc: true,
            ep: true,
            sp: false,
        }
    }

    /// The some path setting.
    pub fn some_path() -> Self {
        Self {
            os: false,
            fp: true,
            fc: true,
            ep: false,
            sp: true,
        }
    }

    /// Returns a copy of this setting with forward propagation disabled.
    ///
    /// Path-based settings keep it enabled.
    pub fn without_fwd_propagation(self) -> Self {
        Self {
            fp: self.is_path_based(),
            ..self
        }
    }

    /// Returns a copy of this setting with founded constraints disabled.
    ///
    /// Path-based settings keep them enabled.
    pub fn without_founded_constraints(self) -> Self {
        Self {
            fc: self.is_path_based(),
            ..self
        }
    }

    /// Returns `true` iff each node holds a single label.
    pub fn one_state(&self) -> bool {
        self.os
    }

    /// Returns `true` iff an absence of variation must be explained.
    pub fn fwd_propagation(&self) -> bool {
        self.fp
    }

    /// Returns `true` iff every variation must be founded in an input.
    pub fn founded_constraints(&self) -> bool {
        self.fc
    }

    /// Returns `true` iff variations must be explained by elementary paths.
    pub fn uses_elementary_paths(&self) -> bool {
        self.ep
    }

    /// Returns `true` iff variations must be explained by paths.
    pub fn uses_some_paths(&self) -> bool {
        self.sp
    }

    fn is_path_based(&self) -> bool {
        self.ep || self.sp
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.os {
            writeln!(f, " + Dependency matrix combines multiple states.")?;
        }
        if self.ep {
            writeln!(
                f,
                " + An elementary path from an input must exist to explain changes."
            )?;
        }
        if self.sp {
            writeln!(f, " + A path from an input must exist to explain changes.")?;
        }
        writeln!(
            f,
            " + All observed changes must be explained by a predecessor."
        )?;
        if self.fp {
            writeln!(f, " + 0-change must be explained.")?;
        }
        if self.fc {
            writeln!(f, " + All observed changes must be explained by an input.")?;
        }
        Ok(())
    }
}

/// The objective of a consistency query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Minimizes the weighted mismatches, keeping the observed inputs.
    Scenfit,
    /// Minimizes the new influences needed to explain all observations.
    Mcos,
}

/// A setting together with an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsistencyConfig {
    /// The consistency semantics.
    pub setting: Setting,
    /// The objective.
    pub objective: Objective,
}

impl ConsistencyConfig {
    /// Builds a configuration.
    pub fn new(setting: Setting, objective: Objective) -> Self {
        Self { setting, objective }
    }
}

/// Returns the ordered list of modules needed to score an instance under a configuration.
///
/// # Example
///
/// ```
/// # use iggy::encodings::{modules_for, ConsistencyConfig, Module, Objective, Setting};
/// let config = ConsistencyConfig::new(Setting::default(), Objective::Scenfit);
/// let modules = modules_for(&config);
/// assert_eq!(Module::SignCons, modules[0]);
/// assert!(modules.contains(&Module::OneState));
/// ```
pub fn modules_for(config: &ConsistencyConfig) -> Vec<Module> {
    let s = &config.setting;
    let mut modules = vec![Module::SignCons, Module::BwdProp];
    if s.os {
        modules.push(Module::OneState);
    }
    if s.fp {
        modules.push(Module::FwdProp);
    }
    if s.fc {
        modules.push(Module::Foundedness);
    }
    if s.ep {
        modules.push(Module::ElemPath);
    }
    if s.sp {
        modules.push(Module::SomePath);
    }
    match config.objective {
        Objective::Scenfit => modules.append(&mut vec![
            Module::ErrorMeasure,
            Module::MinWeightedError,
            Module::KeepInputs,
        ]),
        Objective::Mcos => modules.append(&mut vec![
            Module::AddInfluences,
            Module::MinAddedInfluences,
            Module::KeepObservations,
        ]),
    }
    modules
}

/// The kind of edits allowed to repair a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairMode {
    /// Signed edges may be removed.
    #[strum(serialize = "remove")]
    RemoveEdges,
    /// Signed edges may be removed, and new signed edges may be added.
    #[strum(serialize = "optgraph")]
    OptGraph,
    /// The sign of edges may be flipped.
    #[strum(serialize = "flip")]
    FlipEdges,
}

impl RepairMode {
    /// Returns the name of the repair mode, as expected by the command line.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Returns the module showing the repairs of this mode.
    pub fn show_module(&self) -> Module {
        match self {
            RepairMode::RemoveEdges | RepairMode::OptGraph => Module::ShowRepairs,
            RepairMode::FlipEdges => Module::ShowFlips,
        }
    }
}

/// Returns the ordered list of modules needed to compute the optimal repairs of an instance.
///
/// Repairs are always evaluated against the scenfit objective.
/// Adding edges under the elementary path semantics cannot be done by a single optimization:
/// this combination is rejected, and the greedy repair search must be used instead.
///
/// # Example
///
/// ```
/// # use iggy::encodings::{repair_modules_for, Module, RepairMode, Setting};
/// let modules = repair_modules_for(&Setting::default(), RepairMode::FlipEdges).unwrap();
/// assert!(modules.contains(&Module::FlipEdges));
/// assert!(repair_modules_for(&Setting::elementary_path(), RepairMode::OptGraph).is_err());
/// ```
pub fn repair_modules_for(setting: &Setting, mode: RepairMode) -> Result<Vec<Module>> {
    if mode == RepairMode::OptGraph && setting.ep {
        return Err(anyhow!(
            "the exact add/remove optimizer cannot be used with elementary paths; use the greedy repair search instead"
        ));
    }
    let mut modules = modules_for(&ConsistencyConfig::new(*setting, Objective::Scenfit));
    match mode {
        RepairMode::RemoveEdges => modules.push(Module::RemoveEdges),
        RepairMode::OptGraph => modules.append(&mut vec![Module::RemoveEdges, Module::AddEdges]),
        RepairMode::FlipEdges => modules.push(Module::FlipEdges),
    }
    modules.push(Module::MinWeightedRepairs);
    Ok(modules)
}

/// Returns the ordered list of modules used by the greedy repair search to score an instance and its edits.
///
/// The greedy search only applies to the elementary path semantics.
pub fn greedy_repair_modules_for(setting: &Setting) -> Result<Vec<Module>> {
    if !setting.ep {
        return Err(anyhow!(
            "the greedy repair search only applies to the elementary path semantics"
        ));
    }
    let mut modules = modules_for(&ConsistencyConfig::new(*setting, Objective::Scenfit));
    modules.append(&mut vec![Module::RemoveEdges, Module::MinWeightedRepairs]);
    Ok(modules)
}
