//! Fixed 3-core front end.
//!
//! Exposes the reduced parameter surface of the 3-core platform (rows=3, cols=2, one
//! iteration) and forwards everything to the general front end, run as a subprocess. Mapping
//! names are translated through [`TriCoreMapping::to_inner`]. The frequency is forwarded in
//! the spelling it was given; the general front end converts it to hertz.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::common::constants::INNER_FRONT_END_BINARY;
use crate::common::{Result, RunnerError};
use crate::config::{ApplicationSource, DefaultsConfig, InstallLayout, SchedulingStrategy, Topology};
use crate::frontend::check_modes_requirement;
use crate::frontend::inner::CrossbarOptions;
use crate::params::{Frequency, TriCoreMapping};
use crate::sim::environment::{EnvMap, RunEnvironment};
use crate::sim::invocation::{ProcessInvocation, ProcessRunner, Tool};
use crate::sim::pipeline::{Pipeline, Stage};

/// Options of the 3-core front end as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriCoreOptions {
    /// Application source, at most one.
    pub application: Option<ApplicationSource>,
    /// Validated 3-core mapping strategy.
    pub mapping: Option<TriCoreMapping>,
    /// Core frequency.
    pub frequency: Option<Frequency>,
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
    /// Seed timing distributions from the clock.
    pub random_seed: bool,
    /// Print the forwarded command line and make the general front end verbose too.
    pub verbose: bool,
}

/// The 3-core front end.
#[derive(Debug, Clone)]
pub struct TriCoreFrontEnd {
    defaults: DefaultsConfig,
    layout: InstallLayout,
    inner_program: PathBuf,
}

impl TriCoreFrontEnd {
    /// Front end forwarding to the general front end at `inner_program`.
    pub const fn new(defaults: DefaultsConfig, layout: InstallLayout, inner_program: PathBuf) -> Self {
        Self {
            defaults,
            layout,
            inner_program,
        }
    }

    /// The general front end installed next to the running executable.
    pub fn sibling_inner_program() -> Result<PathBuf> {
        let exe = std::env::current_exe().map_err(|e| {
            RunnerError::configuration(format!("cannot locate the running executable: {e}"))
        })?;
        let name = format!("{INNER_FRONT_END_BINARY}{}", std::env::consts::EXE_SUFFIX);
        Ok(exe.with_file_name(name))
    }

    /// Arguments for the general front end, in the order it documents them.
    ///
    /// # Errors
    ///
    /// [`RunnerError::InvalidArgument`] when `StaticModes` is requested without a
    /// modes-switching file.
    pub fn inner_arguments(&self, options: &TriCoreOptions) -> Result<Vec<OsString>> {
        let mapping = options.mapping.clone().unwrap_or_default();
        check_modes_requirement(mapping.requires_modes_file(), options.application.as_ref())?;

        let topology = Topology::TRICORE;
        let xbar = options.crossbar.resolve(&self.defaults.crossbar);
        let frequency = options.frequency.as_ref().unwrap_or(&self.defaults.frequency);
        let output_dir = options
            .output_dir
            .clone()
            .or_else(|| self.defaults.output_dir.clone())
            .unwrap_or_else(|| self.layout.default_output_dir());

        let scheduling = options.scheduling.unwrap_or(self.defaults.scheduling);
        let mut args: Vec<OsString> = Vec::new();
        push_option(&mut args, "-x", topology.rows.to_string());
        push_option(&mut args, "-y", topology.cols.to_string());
        push_option(&mut args, "-s", scheduling.as_str());
        push_option(&mut args, "-f", frequency.as_str());
        push_option(&mut args, "-i", topology.iterations.to_string());
        push_option(&mut args, "-o", output_dir);
        push_option(&mut args, "-xbp", xbar.policy.as_str());
        push_option(&mut args, "-xbfs", xbar.fifo_size.to_string());
        push_option(&mut args, "-xblrl", xbar.local_read_latency.to_string());
        push_option(&mut args, "-xblwl", xbar.local_write_latency.to_string());
        push_option(&mut args, "-xbrrl", xbar.remote_read_latency.to_string());
        push_option(&mut args, "-xbrwl", xbar.remote_write_latency.to_string());

        match options
            .application
            .clone()
            .unwrap_or(ApplicationSource::Named(self.defaults.application))
        {
            ApplicationSource::Modes(file) => push_option(&mut args, "-mf", file),
            ApplicationSource::Named(app) => push_option(&mut args, "-da", app.as_str()),
            ApplicationSource::Custom(file) => push_option(&mut args, "-ca", file),
        }

        let flags = [
            (options.verbose, "-v"),
            (options.syntax_dependency, "-d"),
            (options.random_seed, "-r"),
            (options.no_periodicity, "-np"),
        ];
        args.extend(
            flags
                .into_iter()
                .filter(|(set, _)| *set)
                .map(|(_, flag)| OsString::from(flag)),
        );
        if let Some(end) = options.end_time_ns {
            push_option(&mut args, "-e", end.to_string());
        }

        args.push("-m".into());
        args.extend(mapping.to_inner().tokens().into_iter().map(OsString::from));
        tracing::debug!(?args, "translated 3-core options");
        Ok(args)
    }

    /// Invocation of the general front end with `environment`.
    pub fn inner_invocation(
        &self,
        options: &TriCoreOptions,
        environment: RunEnvironment,
    ) -> Result<ProcessInvocation> {
        let args = self.inner_arguments(options)?;
        Ok(self.invocation_with(args, environment))
    }

    /// Validates, builds the environment, and runs the general front end.
    ///
    /// Its standard output is echoed; on failure its standard error is echoed followed by
    /// the failure notice.
    pub fn run<R, W>(
        &self,
        options: &TriCoreOptions,
        caller: &EnvMap,
        runner: &R,
        console: &mut W,
    ) -> Result<()>
    where
        R: ProcessRunner + ?Sized,
        W: Write + ?Sized,
    {
        let args = self.inner_arguments(options)?;
        let environment = RunEnvironment::from_caller(caller)?;
        let invocation = self.invocation_with(args, environment);
        let _ = Pipeline::new(runner, options.verbose)
            .stage(Stage::new(Tool::InnerFrontEnd, invocation).echo_stdout())
            .run(console)?;
        Ok(())
    }

    fn invocation_with(&self, args: Vec<OsString>, environment: RunEnvironment) -> ProcessInvocation {
        ProcessInvocation::new(&self.inner_program)
            .args(args)
            .with_environment(environment)
    }
}

fn push_option(args: &mut Vec<OsString>, flag: &str, value: impl Into<OsString>) {
    args.push(flag.into());
    args.push(value.into());
}
