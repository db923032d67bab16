//! # 3-Core Front-End Tests
//!
//! Translation of the reduced 3-core options into a general front-end command line, and the
//! single forwarding stage.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use xbarsim_core::config::{ApplicationSource, DefaultApplication, DefaultsConfig, XbarPolicy};
use xbarsim_core::frontend::inner::CrossbarOptions;
use xbarsim_core::frontend::tricore::{TriCoreFrontEnd, TriCoreOptions};
use xbarsim_core::params::{Frequency, TriCoreMapping};
use xbarsim_core::sim::{Tool, ToolOutcome};
use xbarsim_core::RunnerError;

use crate::common::harness::{TestInstall, env_map};
use crate::common::mocks::runner::{MockRunner, ScriptedRunner};

const INNER: &str = "/opt/xbar/bin/simulate";

fn front_end(install: &TestInstall) -> TriCoreFrontEnd {
    TriCoreFrontEnd::new(
        DefaultsConfig::tricore(),
        install.layout(),
        PathBuf::from(INNER),
    )
}

fn arguments(install: &TestInstall, options: &TriCoreOptions) -> Vec<String> {
    front_end(install)
        .inner_arguments(options)
        .unwrap()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn test_default_translation() {
    let install = TestInstall::new();
    let output = install.root().join("OUTPUT_FILES");
    let output = output.to_string_lossy();
    assert_eq!(
        arguments(&install, &TriCoreOptions::default()),
        strings(&[
            "-x", "3", "-y", "2", "-s", "fcfs", "-f", "1GHz", "-i", "1", "-o", &output, "-xbp",
            "Full", "-xbfs", "2", "-xblrl", "2", "-xblwl", "2", "-xbrrl", "2", "-xbrwl", "2",
            "-da", "DC", "-m", "3Core",
        ])
    );
}

#[test]
fn test_full_translation() {
    let install = TestInstall::new();
    let options = TriCoreOptions {
        application: Some(ApplicationSource::Custom("car.amxmi".into())),
        mapping: Some(TriCoreMapping::Static {
            file: "tri_map.xml".into(),
        }),
        frequency: Some(Frequency::parse("0400MHz").unwrap()),
        scheduling: Some("prio".parse().unwrap()),
        crossbar: CrossbarOptions {
            policy: Some(XbarPolicy::Priority),
            fifo_size: Some(8),
            local_read_latency: Some(1),
            local_write_latency: Some(0),
            remote_read_latency: Some(6),
            remote_write_latency: Some(9),
        },
        end_time_ns: Some(100_000),
        output_dir: Some(PathBuf::from("/data/out")),
        syntax_dependency: true,
        no_periodicity: true,
        random_seed: true,
        verbose: true,
    };
    assert_eq!(
        arguments(&install, &options),
        strings(&[
            "-x",
            "3",
            "-y",
            "2",
            "-s",
            "prio",
            "-f",
            "0400MHz",
            "-i",
            "1",
            "-o",
            "/data/out",
            "-xbp",
            "Priority",
            "-xbfs",
            "8",
            "-xblrl",
            "1",
            "-xblwl",
            "0",
            "-xbrrl",
            "6",
            "-xbrwl",
            "9",
            "-ca",
            "car.amxmi",
            "-v",
            "-d",
            "-r",
            "-np",
            "-e",
            "100000",
            "-m",
            "StaticTriCore",
            "tri_map.xml",
        ])
    );
}

#[test]
fn test_control_system_engine() {
    let install = TestInstall::new();
    let options = TriCoreOptions {
        application: Some(ApplicationSource::Named(
            DefaultApplication::ControlSystemEngine,
        )),
        ..TriCoreOptions::default()
    };
    let args = arguments(&install, &options);
    let da = args.iter().position(|a| a == "-da").unwrap();
    assert_eq!(args[da + 1], "CSE");
}

#[test]
fn test_static_modes_forwarded_with_modes_file() {
    let install = TestInstall::new();
    let options = TriCoreOptions {
        application: Some(ApplicationSource::Modes("modes.xml".into())),
        mapping: Some(TriCoreMapping::StaticModes {
            file: "modes_map.xml".into(),
        }),
        ..TriCoreOptions::default()
    };
    let args = arguments(&install, &options);
    assert!(args.windows(2).any(|w| w == ["-mf", "modes.xml"]), "{args:?}");
    assert_eq!(
        &args[args.len() - 3..],
        &strings(&["-m", "StaticModes", "modes_map.xml"])[..]
    );
}

#[test]
fn test_static_modes_without_modes_file() {
    let install = TestInstall::new();
    let options = TriCoreOptions {
        mapping: Some(TriCoreMapping::StaticModes {
            file: "modes_map.xml".into(),
        }),
        ..TriCoreOptions::default()
    };
    let err = front_end(&install).inner_arguments(&options).unwrap_err();
    assert!(matches!(err, RunnerError::InvalidArgument(_)), "{err:?}");

    let mut runner = MockRunner::new();
    runner.expect_run().never();
    let err = front_end(&install)
        .run(
            &options,
            &install.caller_env(),
            &runner,
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
    assert!(err.is_pre_launch());
}

#[test]
fn test_missing_systemc_home_launches_nothing() {
    let install = TestInstall::new();
    let mut runner = MockRunner::new();
    runner.expect_run().never();
    let err = front_end(&install)
        .run(
            &TriCoreOptions::default(),
            &env_map(&[("PATH", "/bin")]),
            &runner,
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
    assert!(matches!(err, RunnerError::Configuration(_)), "{err:?}");
}

#[test]
fn test_run_forwards_to_inner_front_end() {
    let install = TestInstall::new();
    let runner = ScriptedRunner::new([ToolOutcome::success("inner says hi\n")]);
    let mut console: Vec<u8> = Vec::new();
    front_end(&install)
        .run(
            &TriCoreOptions::default(),
            &install.caller_env(),
            &runner,
            &mut console,
        )
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program(), Path::new(INNER));
    assert_eq!(
        calls[0].arguments(),
        front_end(&install)
            .inner_arguments(&TriCoreOptions::default())
            .unwrap()
            .as_slice()
    );
    let env = calls[0].environment().unwrap();
    assert_eq!(env.library_path(), Some(install.systemc_lib().as_os_str()));
    assert_eq!(String::from_utf8(console).unwrap(), "inner says hi\n");
}

#[test]
fn test_run_failure_notice() {
    let install = TestInstall::new();
    let runner = ScriptedRunner::new([ToolOutcome::failure(255, "", "simulator crashed\n")]);
    let mut console: Vec<u8> = Vec::new();
    let err = front_end(&install)
        .run(
            &TriCoreOptions::default(),
            &install.caller_env(),
            &runner,
            &mut console,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RunnerError::ToolFailure {
            tool: Tool::InnerFrontEnd,
            ..
        }
    ));
    assert_eq!(
        String::from_utf8(console).unwrap(),
        "simulator crashed\nsimulation FAILED\n"
    );
}

#[test]
fn test_verbose_prints_forwarded_command() {
    let install = TestInstall::new();
    let runner = ScriptedRunner::succeeding();
    let options = TriCoreOptions {
        verbose: true,
        ..TriCoreOptions::default()
    };
    let mut console: Vec<u8> = Vec::new();
    front_end(&install)
        .run(&options, &install.caller_env(), &runner, &mut console)
        .unwrap();
    let console = String::from_utf8(console).unwrap();
    assert!(console.starts_with(INNER), "{console}");
    assert!(console.contains(" -v "), "{console}");
}

#[test]
fn test_sibling_inner_program() {
    let program = TriCoreFrontEnd::sibling_inner_program().unwrap();
    let exe = std::env::current_exe().unwrap();
    assert_eq!(program.parent(), exe.parent());
    assert_eq!(
        program.file_name().unwrap().to_string_lossy(),
        format!("simulate{}", std::env::consts::EXE_SUFFIX)
    );
}
