//! Command-line arguments of both front ends.
//!
//! The flags keep the historical single-dash spellings (`-da`, `-np`, `-xbfs`, ...). Clap
//! only knows single-character short flags, so multi-letter ones are rewritten to their long
//! form by [`normalize_legacy_flags`] before parsing. Compound values (mapping strategy,
//! frequency) are validated by the core library, not by clap. A repeated flag replaces its
//! earlier occurrence.

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Args, Parser};
use xbarsim_core::Result;
use xbarsim_core::config::{ApplicationSource, DefaultApplication, SchedulingStrategy, XbarPolicy};
use xbarsim_core::frontend::inner::{CrossbarOptions, InnerOptions};
use xbarsim_core::frontend::tricore::TriCoreOptions;
use xbarsim_core::params::{Frequency, MappingCatalog, MappingStrategy, TriCoreMapping};

/// Multi-letter single-dash flags and the long flag each one stands for.
pub const LEGACY_FLAGS: [(&str, &str); 10] = [
    ("-da", "--def_application"),
    ("-ca", "--custom_application"),
    ("-mf", "--modes_file"),
    ("-np", "--no_periodicity"),
    ("-xbp", "--xbarPolicy"),
    ("-xbfs", "--xbarFifoSize"),
    ("-xblrl", "--xbarLocalReadLatency"),
    ("-xblwl", "--xbarLocalWriteLatency"),
    ("-xbrrl", "--xbarRemoteReadLatency"),
    ("-xbrwl", "--xbarRemoteWriteLatency"),
];

/// Rewrites legacy multi-letter flags to their long spelling.
///
/// Only whole tokens are rewritten, and nothing after a `--` separator.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    for arg in args.into_iter().map(Into::into) {
        if passthrough {
            normalized.push(arg);
            continue;
        }
        if arg.to_str() == Some("--") {
            passthrough = true;
        }
        let long = arg
            .to_str()
            .and_then(|s| LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == s))
            .map(|(_, long)| OsString::from(*long));
        normalized.push(long.unwrap_or(arg));
    }
    normalized
}

/// Parses `argv` (program name first) into `C` after normalizing legacy flags.
pub fn parse<C, I, T>(argv: I) -> std::result::Result<C, clap::Error>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    C::try_parse_from(normalize_legacy_flags(argv))
}

/// Application source; the three options are mutually exclusive.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(id = "application", multiple = false)]
pub struct ApplicationArgs {
    /// [-da] Bundled application to simulate: DC or CSE
    #[arg(long = "def_application", value_name = "NAME", value_parser = DefaultApplication::from_str)]
    pub def_application: Option<DefaultApplication>,

    /// [-ca] Custom application file (.amxmi) to simulate
    #[arg(long = "custom_application", value_name = "FILE")]
    pub custom_application: Option<PathBuf>,

    /// [-mf] Modes switching file to simulate
    #[arg(long = "modes_file", value_name = "FILE")]
    pub modes_file: Option<PathBuf>,
}

impl ApplicationArgs {
    /// The selected source, if any.
    pub fn into_source(self) -> Option<ApplicationSource> {
        self.modes_file
            .map(ApplicationSource::Modes)
            .or_else(|| self.custom_application.map(ApplicationSource::Custom))
            .or_else(|| self.def_application.map(ApplicationSource::Named))
    }
}

/// Crossbar parameters.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossbarArgs {
    /// [-xbp] Crossbar arbitration policy: Full, RoundRobin or Priority
    #[arg(long = "xbarPolicy", value_name = "POLICY", value_parser = XbarPolicy::from_str)]
    pub policy: Option<XbarPolicy>,

    /// [-xbfs] Crossbar FIFO size
    #[arg(long = "xbarFifoSize", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub fifo_size: Option<u32>,

    /// [-xblrl] Latency of a local read
    #[arg(long = "xbarLocalReadLatency", value_name = "CYCLES")]
    pub local_read_latency: Option<u32>,

    /// [-xblwl] Latency of a local write
    #[arg(long = "xbarLocalWriteLatency", value_name = "CYCLES")]
    pub local_write_latency: Option<u32>,

    /// [-xbrrl] Latency of a remote read
    #[arg(long = "xbarRemoteReadLatency", value_name = "CYCLES")]
    pub remote_read_latency: Option<u32>,

    /// [-xbrwl] Latency of a remote write
    #[arg(long = "xbarRemoteWriteLatency", value_name = "CYCLES")]
    pub remote_write_latency: Option<u32>,
}

impl From<CrossbarArgs> for CrossbarOptions {
    fn from(args: CrossbarArgs) -> Self {
        Self {
            policy: args.policy,
            fifo_size: args.fifo_size,
            local_read_latency: args.local_read_latency,
            local_write_latency: args.local_write_latency,
            remote_read_latency: args.remote_read_latency,
            remote_write_latency: args.remote_write_latency,
        }
    }
}

/// Options shared by both front ends.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Consider successive runnables in a task's call graph as dependent
    #[arg(short = 'd', long = "syntax_dependency")]
    pub syntax_dependency: bool,

    #[command(flatten)]
    pub application: ApplicationArgs,

    /// End time of the simulation in nanoseconds
    #[arg(short = 'e', long = "simuEnd", value_name = "NS", value_parser = clap::value_parser!(u64).range(1..))]
    pub simu_end: Option<u64>,

    /// Frequency of every core, e.g. 400MHz or 1GHz
    #[arg(short = 'f', long = "freq", value_name = "FREQ", value_parser = Frequency::parse)]
    pub freq: Option<Frequency>,

    /// Mapping strategy, followed by its mapping file (Static*) or seed (Randomfixed)
    #[arg(short = 'm', long = "mapping_strategy", action = ArgAction::Set, num_args = 1..=2, value_names = ["STRATEGY", "ARG"])]
    pub mapping_strategy: Option<Vec<String>>,

    /// [-np] Run periodic runnables only once
    #[arg(long = "no_periodicity")]
    pub no_periodicity: bool,

    /// Absolute path of the folder where simulation results are written
    #[arg(short = 'o', long = "output_folder", value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// Seed instruction timing distributions from the clock instead of a constant
    #[arg(short = 'r', long = "random")]
    pub random: bool,

    /// Scheduling strategy used by cores: fcfs or prio
    #[arg(short = 's', long = "scheduling_strategy", value_name = "STRATEGY", value_parser = SchedulingStrategy::from_str)]
    pub scheduling_strategy: Option<SchedulingStrategy>,

    /// Print command lines before running them
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(flatten)]
    pub crossbar: CrossbarArgs,
}

/// General front end: arbitrary grid, every crossbar knob.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "simulate",
    version,
    args_override_self = true,
    about = "Run the crossbar many-core simulator and its energy estimator",
    long_about = "Run the crossbar many-core simulator, then estimate energy over its output.\n\nRequires SYSTEMC_HOME; XERCES_HOME is added to the library path when set.\nTool locations are taken from XBARSIM_ROOT, or the directory of this executable.\n\nExamples:\n  simulate -x 4 -y 4 -f 400MHz -m ZigZag\n  simulate -ca app.amxmi -m Static mapping.xml -xbp RoundRobin"
)]
pub struct InnerCli {
    #[command(flatten)]
    pub run: RunArgs,

    /// Number of application iterations
    #[arg(short = 'i', long = "iterations", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Number of rows in the platform
    #[arg(short = 'x', long = "rows", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: Option<u32>,

    /// Number of columns in the platform
    #[arg(short = 'y', long = "cols", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: Option<u32>,

    /// JSON file overriding built-in defaults
    #[arg(long = "defaults", value_name = "FILE")]
    pub defaults: Option<PathBuf>,
}

impl InnerCli {
    /// Validates the mapping tokens and converts into front-end options.
    pub fn into_options(self) -> Result<InnerOptions> {
        let run = self.run;
        let mapping = run
            .mapping_strategy
            .as_deref()
            .map(|tokens| MappingStrategy::from_tokens(MappingCatalog::Inner, tokens))
            .transpose()?;
        Ok(InnerOptions {
            application: run.application.into_source(),
            mapping,
            frequency: run.freq,
            iterations: self.iterations,
            rows: self.rows,
            cols: self.cols,
            scheduling: run.scheduling_strategy,
            crossbar: run.crossbar.into(),
            end_time_ns: run.simu_end,
            output_dir: run.output_folder,
            syntax_dependency: run.syntax_dependency,
            no_periodicity: run.no_periodicity,
            random_seed: run.random,
            verbose: run.verbose,
        })
    }
}

/// 3-core front end: fixed 3x2 grid, one iteration.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "simulate-tricore",
    version,
    args_override_self = true,
    about = "Run the crossbar simulator on the fixed 3-core platform",
    long_about = "Run the crossbar simulator on the fixed 3-core platform (3x2 grid, one iteration).\n\nMapping strategies: ZigZag (default), Static <file>, StaticModes <file> (needs -mf).\nRequires SYSTEMC_HOME; the general front end `simulate` must sit next to this executable."
)]
pub struct TriCoreCli {
    #[command(flatten)]
    pub run: RunArgs,

    /// JSON file overriding built-in defaults (the 3x2 topology stays fixed)
    #[arg(long = "defaults", value_name = "FILE")]
    pub defaults: Option<PathBuf>,
}

impl TriCoreCli {
    /// Validates the mapping tokens and converts into front-end options.
    pub fn into_options(self) -> Result<TriCoreOptions> {
        let run = self.run;
        let mapping = run
            .mapping_strategy
            .as_deref()
            .map(TriCoreMapping::from_tokens)
            .transpose()?;
        Ok(TriCoreOptions {
            application: run.application.into_source(),
            mapping,
            frequency: run.freq,
            scheduling: run.scheduling_strategy,
            crossbar: run.crossbar.into(),
            end_time_ns: run.simu_end,
            output_dir: run.output_folder,
            syntax_dependency: run.syntax_dependency,
            no_periodicity: run.no_periodicity,
            random_seed: run.random,
            verbose: run.verbose,
        })
    }
}
