//! Test doubles shared by the unit tests of this crate

use crate::error::BootstrapError;
use crate::invoker::{BootstrapRequest, PlatformClient};
use crate::model::{CloudDescriptor, CloudTopology};
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};

pub fn topology(clouds: &[(&str, &[&str])]) -> CloudTopology {
    clouds
        .iter()
        .map(|(name, regions)| (name.to_string(), CloudDescriptor::new(regions.iter().copied())))
        .collect()
}

#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

/// Collects every event emitted while installed as the default subscriber
#[derive(Clone, Default)]
pub struct RecordingSubscriber {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl RecordingSubscriber {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().expect("lock").clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .map(|event| event.message)
            .collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages(level).len()
    }
}

impl Subscriber for RecordingSubscriber {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _: &Id, _: &Record<'_>) {}

    fn record_follows_from(&self, _: &Id, _: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().expect("lock").push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
        });
    }

    fn enter(&self, _: &Id) {}

    fn exit(&self, _: &Id) {}
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

/// A call made against [`RecordingClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    Bootstrap {
        controller: String,
        config: String,
        cloud: String,
        region: String,
        log_dir: PathBuf,
    },
    WaitForStarted(String),
    KillController(String),
}

/// Which step of [`RecordingClient`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Never,
    Bootstrap,
    WaitForStarted,
    KillController,
    BootstrapAndTeardown,
}

/// Platform client that records calls and fails on demand
pub struct RecordingClient {
    fail_at: FailAt,
    calls: RefCell<Vec<ClientCall>>,
}

impl RecordingClient {
    pub fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.borrow().clone()
    }

    pub fn bootstrapped_regions(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ClientCall::Bootstrap { config, region, .. } => {
                    Some((config.clone(), region.clone()))
                }
                _ => None,
            })
            .collect()
    }

    fn outcome(&self, step: FailAt, command: &str) -> Result<(), BootstrapError> {
        let fails = self.fail_at == step
            || (self.fail_at == FailAt::BootstrapAndTeardown
                && matches!(step, FailAt::Bootstrap | FailAt::KillController));
        if fails {
            Err(BootstrapError::CommandFailed {
                command: command.to_string(),
                status: Some(1),
                stderr: "test".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl PlatformClient for RecordingClient {
    fn bootstrap(&self, request: &BootstrapRequest<'_>) -> Result<(), BootstrapError> {
        self.calls.borrow_mut().push(ClientCall::Bootstrap {
            controller: request.controller.to_string(),
            config: request.config.to_string(),
            cloud: request.cloud.to_string(),
            region: request.region.to_string(),
            log_dir: request.log_dir.to_path_buf(),
        });
        self.outcome(FailAt::Bootstrap, "juju bootstrap")
    }

    fn wait_for_started(&self, controller: &str, _log_dir: &Path) -> Result<(), BootstrapError> {
        self.calls
            .borrow_mut()
            .push(ClientCall::WaitForStarted(controller.to_string()));
        self.outcome(FailAt::WaitForStarted, "juju show-controller")
    }

    fn kill_controller(&self, controller: &str, _log_dir: &Path) -> Result<(), BootstrapError> {
        self.calls
            .borrow_mut()
            .push(ClientCall::KillController(controller.to_string()));
        self.outcome(FailAt::KillController, "juju kill-controller")
    }
}
