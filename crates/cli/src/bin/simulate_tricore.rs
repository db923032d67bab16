//! Fixed 3-core front end: `simulate-tricore`.
//!
//! Runs the general front end installed next to this executable on a 3x2 grid.

use std::io::{self, Write};

use xbarsim_cli::args::{self, TriCoreCli};
use xbarsim_core::config::InstallLayout;
use xbarsim_core::frontend::tricore::TriCoreFrontEnd;
use xbarsim_core::sim::{SystemRunner, caller_environment};
use xbarsim_core::{DefaultsConfig, Result};

fn main() {
    xbarsim_cli::init_logging();
    let cli = match args::parse::<TriCoreCli, _, _>(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => xbarsim_cli::exit_on_usage_error(&err),
    };
    let mut stdout = io::stdout().lock();
    let result = run(cli, &mut stdout);
    let _ = stdout.flush();
    xbarsim_cli::exit_on_error(result);
}

fn run(cli: TriCoreCli, console: &mut impl Write) -> Result<()> {
    let defaults = match &cli.defaults {
        Some(path) => DefaultsConfig::tricore().with_overrides_from(path)?,
        None => DefaultsConfig::tricore(),
    };
    let options = cli.into_options()?;
    let caller = caller_environment();
    let layout = InstallLayout::locate(&caller)?;
    let inner_program = TriCoreFrontEnd::sibling_inner_program()?;
    TriCoreFrontEnd::new(defaults, layout, inner_program).run(
        &options,
        &caller,
        &SystemRunner,
        console,
    )
}
