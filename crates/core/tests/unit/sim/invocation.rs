//! # Invocation Tests

use std::ffi::OsStr;
use std::path::Path;

use pretty_assertions::assert_eq;
use xbarsim_core::sim::{ProcessInvocation, ProcessRunner, RunEnvironment, Tool, ToolOutcome};
use xbarsim_core::RunnerError;

use crate::common::harness::env_map;
use crate::common::mocks::runner::MockRunner;

#[test]
fn test_arguments_keep_order() {
    let invocation = ProcessInvocation::new("/opt/xbar/obj/mcsim-ca-xbar")
        .arg("-i")
        .arg("1")
        .args(["-m", "Static", "map.xml"]);
    assert_eq!(invocation.program(), Path::new("/opt/xbar/obj/mcsim-ca-xbar"));
    assert_eq!(
        invocation.arguments_lossy(),
        vec!["-i", "1", "-m", "Static", "map.xml"]
    );
    assert_eq!(
        invocation.command_line(),
        "/opt/xbar/obj/mcsim-ca-xbar -i 1 -m Static map.xml"
    );
    assert_eq!(invocation.to_string(), invocation.command_line());
}

#[test]
fn test_inherits_environment_by_default() {
    let invocation = ProcessInvocation::new("tool");
    assert!(invocation.environment().is_none());
    assert_eq!(invocation.to_command().get_envs().count(), 0);
}

#[test]
fn test_explicit_environment_reaches_command() {
    let env = RunEnvironment::resolve(&env_map(&[("SYSTEMC_HOME", "/opt/systemc")]), &[])
        .unwrap();
    let invocation = ProcessInvocation::new("tool").arg("x").with_environment(env);
    let command = invocation.to_command();
    assert_eq!(command.get_program(), OsStr::new("tool"));
    assert_eq!(command.get_args().collect::<Vec<_>>(), vec![OsStr::new("x")]);
    let banner = command
        .get_envs()
        .find(|(key, _)| *key == OsStr::new("SC_COPYRIGHT_MESSAGE"))
        .and_then(|(_, value)| value);
    assert_eq!(banner, Some(OsStr::new("DISABLE")));
}

#[test]
fn test_failure_notices() {
    assert_eq!(Tool::Simulator.failure_notice(), "simulation FAILED");
    assert_eq!(Tool::InnerFrontEnd.failure_notice(), "simulation FAILED");
    assert_eq!(
        Tool::EnergyEstimator.failure_notice(),
        "Energy estimation FAILED"
    );
}

#[test]
fn test_outcome_success() {
    assert!(ToolOutcome::success("ok").succeeded());
    assert!(!ToolOutcome::failure(1, "", "boom").succeeded());
    let killed = ToolOutcome {
        exit_code: None,
        ..ToolOutcome::default()
    };
    assert!(!killed.succeeded());
}

#[test]
fn test_tool_failure_message() {
    let err = RunnerError::ToolFailure {
        tool: Tool::Simulator,
        exit_code: Some(3),
        stderr: String::new(),
    };
    assert_eq!(err.to_string(), "simulator exited with status 3");
    assert_eq!(err.exit_status(), -1);
    assert!(!err.is_pre_launch());

    let killed = RunnerError::ToolFailure {
        tool: Tool::EnergyEstimator,
        exit_code: None,
        stderr: String::new(),
    };
    assert!(killed.to_string().contains("terminated by signal"), "{killed}");
}

#[test]
fn test_runner_seam_receives_invocation() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|invocation| invocation.arguments_lossy() == ["--version"])
        .times(1)
        .returning(|_| Ok(ToolOutcome::success("1.0\n")));

    let outcome = runner
        .run(&ProcessInvocation::new("tool").arg("--version"))
        .unwrap();
    assert_eq!(outcome.stdout, "1.0\n");
}
