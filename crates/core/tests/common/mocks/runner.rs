use std::cell::RefCell;
use std::collections::VecDeque;

use mockall::mock;
use xbarsim_core::sim::{ProcessInvocation, ProcessRunner, ToolOutcome};

mock! {
    pub Runner {}
    impl ProcessRunner for Runner {
        fn run(&self, invocation: &ProcessInvocation) -> xbarsim_core::Result<ToolOutcome>;
    }
}

/// Runner replaying scripted outcomes in order and recording every invocation.
///
/// Once the script is exhausted every further call succeeds with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    outcomes: RefCell<VecDeque<ToolOutcome>>,
    calls: RefCell<Vec<ProcessInvocation>>,
}

impl ScriptedRunner {
    pub fn new(outcomes: impl IntoIterator<Item = ToolOutcome>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Runner whose every process succeeds silently.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Invocations received so far, in order.
    pub fn calls(&self) -> Vec<ProcessInvocation> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &ProcessInvocation) -> xbarsim_core::Result<ToolOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ToolOutcome::success("")))
    }
}
