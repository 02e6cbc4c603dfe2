#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use permkit_coordinator::{Diagnostic, DiagnosticsSink};
use permkit_dialog::{AlertPresenter, Dialog, DialogError};
use permkit_permission::{
    Capability, NotificationOptions, PermissionBackend, PermissionError, PermissionStatus,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Check(Capability),
    Request(Capability, NotificationOptions),
    OpenSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Check,
    Request,
}

#[derive(Default)]
struct FakeOs {
    statuses: HashMap<Capability, PermissionStatus>,
    request_results: HashMap<Capability, VecDeque<Result<PermissionStatus, PermissionError>>>,
    failing_checks: HashMap<Capability, PermissionError>,
    open_settings_error: Option<PermissionError>,
    gates: HashMap<(Op, Capability), VecDeque<oneshot::Receiver<()>>>,
    calls: Vec<Call>,
}

/// Scripted stand-in for the OS permission API.
///
/// Checks report the current OS status. Requests return the next scripted
/// result (which also becomes the OS status) or, with nothing scripted, the
/// current OS status unchanged.
#[derive(Clone, Default)]
pub struct FakeBackend {
    os: Arc<Mutex<FakeOs>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(camera: PermissionStatus, notification: PermissionStatus) -> Self {
        let backend = Self::new();
        backend.set_os_status(Capability::Camera, camera);
        backend.set_os_status(Capability::Notification, notification);
        backend
    }

    /// Change the status as if the user edited it in the OS settings app.
    pub fn set_os_status(&self, capability: Capability, status: PermissionStatus) {
        self.os.lock().unwrap().statuses.insert(capability, status);
    }

    pub fn script_request(
        &self,
        capability: Capability,
        result: Result<PermissionStatus, PermissionError>,
    ) {
        self.os
            .lock()
            .unwrap()
            .request_results
            .entry(capability)
            .or_default()
            .push_back(result);
    }

    pub fn fail_checks(&self, capability: Capability, error: PermissionError) {
        self.os
            .lock()
            .unwrap()
            .failing_checks
            .insert(capability, error);
    }

    pub fn fail_open_settings(&self, error: PermissionError) {
        self.os.lock().unwrap().open_settings_error = Some(error);
    }

    /// Hold the next `op` on `capability` until the returned sender fires.
    pub fn gate(&self, op: Op, capability: Capability) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.os
            .lock()
            .unwrap()
            .gates
            .entry((op, capability))
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.os.lock().unwrap().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    async fn pass_gate(&self, op: Op, capability: Capability) {
        let gate = self
            .os
            .lock()
            .unwrap()
            .gates
            .get_mut(&(op, capability))
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

impl PermissionBackend for FakeBackend {
    async fn check(&self, capability: Capability) -> Result<PermissionStatus, PermissionError> {
        self.os.lock().unwrap().calls.push(Call::Check(capability));
        self.pass_gate(Op::Check, capability).await;

        let os = self.os.lock().unwrap();
        if let Some(error) = os.failing_checks.get(&capability) {
            return Err(error.clone());
        }
        Ok(os.statuses.get(&capability).copied().unwrap_or_default())
    }

    async fn request(
        &self,
        capability: Capability,
        options: NotificationOptions,
    ) -> Result<PermissionStatus, PermissionError> {
        self.os
            .lock()
            .unwrap()
            .calls
            .push(Call::Request(capability, options));
        self.pass_gate(Op::Request, capability).await;

        let mut os = self.os.lock().unwrap();
        let scripted = os
            .request_results
            .get_mut(&capability)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(Ok(status)) => {
                os.statuses.insert(capability, status);
                Ok(status)
            }
            Some(Err(error)) => Err(error),
            None => Ok(os.statuses.get(&capability).copied().unwrap_or_default()),
        }
    }

    async fn open_settings(&self) -> Result<(), PermissionError> {
        let mut os = self.os.lock().unwrap();
        os.calls.push(Call::OpenSettings);
        os.open_settings_error.clone().map_or(Ok(()), Err)
    }
}

/// Records every dialog and answers with a fixed response.
#[derive(Clone)]
pub struct RecordingAlerts {
    shown: Arc<Mutex<Vec<Dialog>>>,
    response: Arc<Mutex<Result<usize, DialogError>>>,
}

impl RecordingAlerts {
    /// Answers "Cancel" (the first action).
    pub fn new() -> Self {
        Self::answering(Ok(0))
    }

    pub fn answering(response: Result<usize, DialogError>) -> Self {
        Self {
            shown: Arc::default(),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub fn shown(&self) -> Vec<Dialog> {
        self.shown.lock().unwrap().clone()
    }
}

impl AlertPresenter for RecordingAlerts {
    async fn present(&self, dialog: &Dialog) -> Result<usize, DialogError> {
        self.shown.lock().unwrap().push(dialog.clone());
        self.response.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn recorded(&self) -> Vec<Diagnostic> {
        self.recorded.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        self.recorded.lock().unwrap().push(diagnostic);
    }
}
