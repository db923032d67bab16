//! Global Front-End Constants.
//!
//! This module defines the fixed names the front ends agree on with the outside world. It includes:
//! 1. **Environment Keys:** Variables read from the caller and written for the simulator.
//! 2. **Install Layout:** Paths of the external tools and resources relative to the install root.
//! 3. **Artifacts:** Names of the log files persisted into the output directory.

/// Variable holding the SystemC installation directory. Required.
pub const SYSTEMC_HOME: &str = "SYSTEMC_HOME";

/// Variable holding the Xerces-C installation directory. Optional.
pub const XERCES_HOME: &str = "XERCES_HOME";

/// Shared-library search path consulted by the dynamic loader.
pub const LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Separator between entries of [`LIBRARY_PATH`].
pub const LIBRARY_PATH_SEPARATOR: &str = ":";

/// SystemC variable controlling the copyright banner printed at start-up.
pub const COPYRIGHT_BANNER: &str = "SC_COPYRIGHT_MESSAGE";

/// Value of [`COPYRIGHT_BANNER`] that suppresses the banner.
pub const COPYRIGHT_BANNER_DISABLED: &str = "DISABLE";

/// Substring identifying the architecture library directory under `SYSTEMC_HOME`
/// (e.g. `lib-linux64`).
pub const SYSTEMC_LIB_MARKER: &str = "lib-";

/// Library directory below `XERCES_HOME`.
pub const XERCES_LIB_DIR: &str = "lib";

/// Variable overriding the install root. When unset, the directory of the running
/// executable is used.
pub const INSTALL_ROOT: &str = "XBARSIM_ROOT";

/// Cycle-accurate simulator binary, relative to the install root.
pub const SIMULATOR_BINARY: &str = "obj/mcsim-ca-xbar";

/// Energy estimator binary, relative to the install root.
pub const ESTIMATOR_BINARY: &str = "obj/energy_estimator";

/// Resource directory handed to the energy estimator, relative to the install root.
pub const ESTIMATOR_RESOURCES: &str = "src/energy_estimator/";

/// Name of the default output directory under the install root.
pub const OUTPUT_DIR_NAME: &str = "OUTPUT_FILES";

/// Capture of the simulator's standard output.
pub const EXECUTION_REPORT_LOG: &str = "OUTPUT_Execution_Report.log";

/// Capture of the energy estimator's standard output.
pub const ENERGY_LOG: &str = "OUTPUT_Energy.log";

/// File name of the general front-end executable, looked up next to the 3-core front end.
pub const INNER_FRONT_END_BINARY: &str = "simulate";

/// Status every front end exits with on failure (255 on Unix).
pub const FAILURE_EXIT_STATUS: i32 = -1;
