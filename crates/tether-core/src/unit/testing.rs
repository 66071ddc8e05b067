//! テスト用のユニットと Presenter

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::lifecycle::{Lifecycle, LifecycleExt};
use super::parameterized::Parameterized;
use crate::domain::{Bundle, LifecyclePhase, PlatformError, UnitError};
use crate::ports::Presenter;

/// 受け取った通知と Bundle を記録するユニット
#[derive(Default)]
pub struct RecordingUnit {
    phases: Mutex<Vec<LifecyclePhase>>,
    calls: Mutex<Vec<&'static str>>,
    state: Mutex<Bundle>,
    started: Mutex<bool>,
    initialized: Mutex<usize>,
}

impl RecordingUnit {
    pub fn phases(&self) -> Vec<LifecyclePhase> {
        self.phases.lock().unwrap().clone()
    }

    /// 状態フックと start / initialize の呼び出し順
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn state(&self) -> Bundle {
        self.state.lock().unwrap().clone()
    }

    pub fn started(&self) -> bool {
        *self.started.lock().unwrap()
    }

    pub fn initialized(&self) -> usize {
        *self.initialized.lock().unwrap()
    }

    fn call(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn record(&self, phase: LifecyclePhase) {
        self.phases.lock().unwrap().push(phase);
    }
}

#[async_trait]
impl Lifecycle for RecordingUnit {
    fn view_created(&self) {
        self.record(LifecyclePhase::Created);
    }

    fn view_appearing(&self) {
        self.record(LifecyclePhase::Appearing);
    }

    fn view_appeared(&self) {
        self.record(LifecyclePhase::Appeared);
    }

    fn view_disappearing(&self) {
        self.record(LifecyclePhase::Disappearing);
    }

    fn view_disappeared(&self) {
        self.record(LifecyclePhase::Disappeared);
    }

    fn view_destroy(&self) {
        self.record(LifecyclePhase::Destroyed);
    }

    fn init_from_bundle(&self, parameters: &Bundle) {
        self.call("init_from_bundle");
        let mut state = self.state.lock().unwrap();
        for (k, v) in parameters.iter() {
            state.insert(k, v);
        }
    }

    fn reload_from_bundle(&self, state: &Bundle) {
        self.call("reload_from_bundle");
        *self.state.lock().unwrap() = state.clone();
    }

    fn save_state_to_bundle(&self, bundle: &mut Bundle) {
        for (k, v) in self.state.lock().unwrap().iter() {
            bundle.insert(k, v);
        }
    }

    fn start(&self) {
        self.call("start");
        *self.started.lock().unwrap() = true;
    }

    async fn initialize(&self) -> Result<(), UnitError> {
        self.call("initialize");
        *self.initialized.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileParameter {
    pub x: i32,
}

/// 型付き initializer に渡されたパラメータを記録するユニット
#[derive(Default)]
pub struct ProfileUnit {
    received: Mutex<Vec<ProfileParameter>>,
    failure: Option<String>,
}

impl ProfileUnit {
    pub fn failing(message: &str) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn received(&self) -> Vec<ProfileParameter> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Lifecycle for ProfileUnit {}

#[async_trait]
impl Parameterized for ProfileUnit {
    type Parameter = ProfileParameter;

    async fn initialize_with(&self, parameter: ProfileParameter) -> Result<(), UnitError> {
        self.received.lock().unwrap().push(parameter);
        match &self.failure {
            Some(message) => Err(UnitError::initialize(message.clone())),
            None => Ok(()),
        }
    }
}

/// 返事をしない Presenter（close の途中で future を落とすテスト用）
pub struct PendingPresenter;

#[async_trait]
impl Presenter for PendingPresenter {
    async fn request_close(&self, _unit: &dyn Lifecycle) -> Result<bool, PlatformError> {
        std::future::pending().await
    }
}

/// 最初の teardown 要求だけを受理する Presenter
///
/// どの要求も `delay` だけ待ってから答える。2 回目以降は「既に閉じている」ので `Ok(false)`。
pub struct AcceptOncePresenter {
    delay: Duration,
    accepted: AtomicBool,
    requests: AtomicUsize,
}

impl AcceptOncePresenter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            accepted: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn close_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Presenter for AcceptOncePresenter {
    async fn request_close(&self, unit: &dyn Lifecycle) -> Result<bool, PlatformError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.accepted.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }
        for phase in LifecyclePhase::DISMISS {
            unit.notify(phase);
        }
        Ok(true)
    }
}
