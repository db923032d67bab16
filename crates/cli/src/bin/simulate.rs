//! General front end: `simulate`.
//!
//! Resolves the parameters, runs the crossbar simulator, then the energy estimator over its
//! output directory.

use std::io::{self, Write};

use xbarsim_cli::args::{self, InnerCli};
use xbarsim_core::config::InstallLayout;
use xbarsim_core::frontend::inner::InnerFrontEnd;
use xbarsim_core::sim::{SystemRunner, caller_environment};
use xbarsim_core::{DefaultsConfig, Result};

fn main() {
    xbarsim_cli::init_logging();
    let cli = match args::parse::<InnerCli, _, _>(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => xbarsim_cli::exit_on_usage_error(&err),
    };
    let mut stdout = io::stdout().lock();
    let result = run(cli, &mut stdout);
    let _ = stdout.flush();
    xbarsim_cli::exit_on_error(result);
}

fn run(cli: InnerCli, console: &mut impl Write) -> Result<()> {
    let caller = caller_environment();
    let defaults = match &cli.defaults {
        Some(path) => DefaultsConfig::inner().with_overrides_from(path)?,
        None => DefaultsConfig::inner(),
    };
    let options = cli.into_options()?;
    let layout = InstallLayout::locate(&caller)?;
    InnerFrontEnd::new(defaults, layout).run(&options, &caller, &SystemRunner, console)
}
