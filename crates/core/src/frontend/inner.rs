//! General front end.
//!
//! Takes the parsed (but not yet defaulted) options, resolves them into a
//! [`SimulationConfig`], and runs the two stages:
//!
//! 1. **Simulate:** `obj/mcsim-ca-xbar` with the full argument list and the SystemC run
//!    environment. Standard output is echoed and always written to
//!    `OUTPUT_Execution_Report.log`.
//! 2. **Estimate energy:** `obj/energy_estimator <output dir> <resources>`, only after the
//!    simulator succeeded. Standard output is written to `OUTPUT_Energy.log`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::constants::{ENERGY_LOG, EXECUTION_REPORT_LOG};
use crate::common::{Result, RunnerError};
use crate::config::{
    ApplicationSource, CrossbarConfig, DefaultsConfig, InstallLayout, SchedulingStrategy, Topology,
    XbarPolicy,
};
use crate::frontend::check_modes_requirement;
use crate::params::{Frequency, MappingStrategy};
use crate::sim::environment::{EnvMap, RunEnvironment};
use crate::sim::invocation::{ProcessInvocation, ProcessRunner, Tool};
use crate::sim::pipeline::{LogPolicy, Pipeline, Stage};

/// Options as given on the command line. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InnerOptions {
    /// Application source, at most one.
    pub application: Option<ApplicationSource>,
    /// Validated mapping strategy.
    pub mapping: Option<MappingStrategy>,
    /// Core frequency.
    pub frequency: Option<Frequency>,
    /// Application iterations.
    pub iterations: Option<u32>,
    /// Grid rows.
    pub rows: Option<u32>,
    /// Grid columns.
    pub cols: Option<u32>,
    /// Scheduling policy.
    pub scheduling: Option<SchedulingStrategy>,
    /// Crossbar overrides.
    pub crossbar: CrossbarOptions,
    /// Simulation end time in nanoseconds.
    pub end_time_ns: Option<u64>,
    /// Output directory.
    pub output_dir: Option<PathBuf>,
    /// Treat successive runnables of a task as dependent.
    pub syntax_dependency: bool,
    /// Run periodic runnables only once.
    pub no_periodicity: bool,
    /// Seed timing distributions from the clock instead of a constant.
    pub random_seed: bool,
    /// Print command lines before running them.
    pub verbose: bool,
}

/// Crossbar options as given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossbarOptions {
    /// Arbitration policy.
    pub policy: Option<XbarPolicy>,
    /// FIFO depth.
    pub fifo_size: Option<u32>,
    /// Local read latency.
    pub local_read_latency: Option<u32>,
    /// Local write latency.
    pub local_write_latency: Option<u32>,
    /// Remote read latency.
    pub remote_read_latency: Option<u32>,
    /// Remote write latency.
    pub remote_write_latency: Option<u32>,
}

impl CrossbarOptions {
    /// Fills every unset field from `defaults`.
    pub fn resolve(self, defaults: &CrossbarConfig) -> CrossbarConfig {
        CrossbarConfig {
            policy: self.policy.unwrap_or(defaults.policy),
            fifo_size: self.fifo_size.unwrap_or(defaults.fifo_size),
            local_read_latency: self
                .local_read_latency
                .unwrap_or(defaults.local_read_latency),
            local_write_latency: self
                .local_write_latency
                .unwrap_or(defaults.local_write_latency),
            remote_read_latency: self
                .remote_read_latency
                .unwrap_or(defaults.remote_read_latency),
            remote_write_latency: self
                .remote_write_latency
                .unwrap_or(defaults.remote_write_latency),
        }
    }
}

/// Fully resolved parameters of one simulator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Application source.
    pub application: ApplicationSource,
    /// Grid shape and iterations.
    pub topology: Topology,
    /// Core frequency.
    pub frequency: Frequency,
    /// Scheduling policy.
    pub scheduling: SchedulingStrategy,
    /// Mapping strategy and its companion.
    pub mapping: MappingStrategy,
    /// Crossbar parameters.
    pub crossbar: CrossbarConfig,
    /// Simulation end time in nanoseconds.
    pub end_time_ns: Option<u64>,
    /// Absolute output directory.
    pub output_dir: PathBuf,
    /// Treat successive runnables of a task as dependent.
    pub syntax_dependency: bool,
    /// Run periodic runnables only once.
    pub no_periodicity: bool,
    /// Seed timing distributions from the clock.
    pub random_seed: bool,
    /// Print command lines before running them.
    pub verbose: bool,
}

impl SimulationConfig {
    /// Resolves `options` against `defaults`.
    ///
    /// # Errors
    ///
    /// [`RunnerError::InvalidArgument`] when a `StaticModes` mapping is requested without a
    /// modes-switching file, or when a numeric parameter that must be positive is zero.
    pub fn resolve(
        options: &InnerOptions,
        defaults: &DefaultsConfig,
        layout: &InstallLayout,
    ) -> Result<Self> {
        let mapping = options
            .mapping
            .clone()
            .unwrap_or_else(|| defaults.mapping.clone());
        check_modes_requirement(mapping.requires_modes_file(), options.application.as_ref())?;

        let topology = Topology {
            rows: positive("rows", options.rows.unwrap_or(defaults.topology.rows))?,
            cols: positive("cols", options.cols.unwrap_or(defaults.topology.cols))?,
            iterations: positive(
                "iterations",
                options.iterations.unwrap_or(defaults.topology.iterations),
            )?,
        };
        let crossbar = options.crossbar.resolve(&defaults.crossbar);
        let _ = positive("crossbar FIFO size", crossbar.fifo_size)?;
        if options.end_time_ns == Some(0) {
            return Err(RunnerError::invalid("simulation end time must be a positive integer"));
        }

        let output_dir = options
            .output_dir
            .clone()
            .or_else(|| defaults.output_dir.clone())
            .unwrap_or_else(|| layout.default_output_dir());

        let config = Self {
            application: options
                .application
                .clone()
                .unwrap_or(ApplicationSource::Named(defaults.application)),
            topology,
            frequency: options
                .frequency
                .clone()
                .unwrap_or_else(|| defaults.frequency.clone()),
            scheduling: options.scheduling.unwrap_or(defaults.scheduling),
            mapping,
            crossbar,
            end_time_ns: options.end_time_ns,
            output_dir: absolute(&output_dir)?,
            syntax_dependency: options.syntax_dependency,
            no_periodicity: options.no_periodicity,
            random_seed: options.random_seed,
            verbose: options.verbose,
        };
        tracing::debug!(?config, "resolved simulation parameters");
        Ok(config)
    }

    /// Creates the output directory and its parents if missing.
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| RunnerError::io(&self.output_dir, e))
    }

    /// Invocation of the cycle-accurate simulator.
    pub fn simulator_invocation(
        &self,
        layout: &InstallLayout,
        environment: RunEnvironment,
    ) -> ProcessInvocation {
        let xbar = &self.crossbar;
        let mut invocation = ProcessInvocation::new(layout.simulator())
            .arg("-i")
            .arg(self.topology.iterations.to_string())
            .arg("-m")
            .args(self.mapping.tokens())
            .arg("-freq")
            .arg(self.frequency.hertz().to_string())
            .arg("-o")
            .arg(&self.output_dir)
            .arg("-s")
            .arg(self.scheduling.as_str())
            .arg("-x")
            .arg(self.topology.rows.to_string())
            .arg("-y")
            .arg(self.topology.cols.to_string())
            .arg("-policy")
            .arg(xbar.policy.as_str())
            .arg("-bsize")
            .arg(xbar.fifo_size.to_string())
            .arg("-lrc")
            .arg(xbar.local_read_latency.to_string())
            .arg("-lwc")
            .arg(xbar.local_write_latency.to_string())
            .arg("-rrc")
            .arg(xbar.remote_read_latency.to_string())
            .arg("-rwc")
            .arg(xbar.remote_write_latency.to_string());

        invocation = match &self.application {
            ApplicationSource::Modes(file) => invocation.arg("-f").arg(file),
            ApplicationSource::Custom(file) => invocation.arg("-a").arg(file),
            ApplicationSource::Named(app) => invocation.arg("-a").arg(layout.application_file(*app)),
        };
        if self.syntax_dependency {
            invocation = invocation.arg("-d");
        }
        if self.no_periodicity {
            invocation = invocation.arg("-np");
        }
        if self.random_seed {
            invocation = invocation.arg("-r");
        }
        if let Some(end) = self.end_time_ns {
            invocation = invocation.arg("-simuEnd").arg(end.to_string());
        }
        invocation.with_environment(environment)
    }

    /// Invocation of the energy estimator over this run's output directory.
    pub fn estimator_invocation(&self, layout: &InstallLayout) -> ProcessInvocation {
        ProcessInvocation::new(layout.estimator())
            .arg(&self.output_dir)
            .arg(layout.estimator_resources())
    }

    /// Path of the simulator report log.
    pub fn execution_report_log(&self) -> PathBuf {
        self.output_dir.join(EXECUTION_REPORT_LOG)
    }

    /// Path of the energy log.
    pub fn energy_log(&self) -> PathBuf {
        self.output_dir.join(ENERGY_LOG)
    }

    /// The simulate-then-estimate pipeline for this configuration.
    pub fn pipeline<'r, R: ProcessRunner + ?Sized>(
        &self,
        layout: &InstallLayout,
        environment: RunEnvironment,
        runner: &'r R,
    ) -> Pipeline<'r, R> {
        Pipeline::new(runner, self.verbose)
            .stage(
                Stage::new(Tool::Simulator, self.simulator_invocation(layout, environment))
                    .echo_stdout()
                    .log_to(self.execution_report_log(), LogPolicy::Always),
            )
            .stage(
                Stage::new(Tool::EnergyEstimator, self.estimator_invocation(layout))
                    .log_to(self.energy_log(), LogPolicy::OnSuccess),
            )
    }
}

/// The general front end: defaults table plus install layout.
#[derive(Debug, Clone)]
pub struct InnerFrontEnd {
    defaults: DefaultsConfig,
    layout: InstallLayout,
}

impl InnerFrontEnd {
    /// Front end resolving against `defaults` inside `layout`.
    pub const fn new(defaults: DefaultsConfig, layout: InstallLayout) -> Self {
        Self { defaults, layout }
    }

    /// Defaults table.
    pub const fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    /// Install layout.
    pub const fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Resolves, prepares, and runs both stages.
    ///
    /// Argument and environment problems are reported before any process starts. The energy
    /// estimator only runs after the simulator exited successfully.
    pub fn run<R, W>(
        &self,
        options: &InnerOptions,
        caller: &EnvMap,
        runner: &R,
        console: &mut W,
    ) -> Result<()>
    where
        R: ProcessRunner + ?Sized,
        W: Write + ?Sized,
    {
        let config = SimulationConfig::resolve(options, &self.defaults, &self.layout)?;
        config.prepare_output_dir()?;
        let environment = RunEnvironment::from_caller(caller)?;
        let _ = config
            .pipeline(&self.layout, environment, runner)
            .run(console)?;
        tracing::info!(output = %config.output_dir.display(), "simulation and energy estimation complete");
        Ok(())
    }
}

fn positive(what: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(RunnerError::invalid(format!("{what} must be a positive integer")));
    }
    Ok(value)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| RunnerError::io(path, e))
}
