//! Host - ユニットを読み込み、結果を待つホスト側の入口
//!
//! # 読み込み順序
//! 1. パラメータ文字列のデコードと型付き initializer
//! 2. `init(bundle)` → `reload_state(saved)`（保存状態がある場合）
//! 3. `start()`
//! 4. `initialize().await`
//!
//! 表示フェーズの通知は Presenter の実装が送ります。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::{Bundle, Resolution, UnitError};
use crate::ports::Presenter;
use crate::unit::{CompletionChannel, Lifecycle, LifecycleExt, ParameterLoader, Parameterized, ResultUnit};

/// Host は HostBuilder が組み立てる
pub struct Host {
    loader: ParameterLoader,
    presenter: Arc<dyn Presenter>,
}

/// LoadRequest はユニットを読み込むときの入力
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    pub parameter: Option<String>,
    pub bundle: Bundle,
    pub saved_state: Option<Bundle>,
}

impl LoadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, text: impl Into<String>) -> Self {
        self.parameter = Some(text.into());
        self
    }

    pub fn with_bundle(mut self, bundle: Bundle) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn with_saved_state(mut self, state: Bundle) -> Self {
        self.saved_state = Some(state);
        self
    }
}

/// PendingResult はホストが持つ result チャネルとキャンセル信号
pub struct PendingResult<T> {
    channel: CompletionChannel<T>,
    cancel: CancellationToken,
}

impl<T> PendingResult<T> {
    /// キャンセル信号を発火する（ユニット側で teardown が要求される）
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_resolved(&self) -> bool {
        self.channel.is_resolved()
    }
}

impl<T: Clone> PendingResult<T> {
    pub async fn wait(&self) -> Resolution<T> {
        self.channel.wait().await
    }
}

impl Host {
    pub(crate) fn new(loader: ParameterLoader, presenter: Arc<dyn Presenter>) -> Self {
        Self { loader, presenter }
    }

    pub fn loader(&self) -> &ParameterLoader {
        &self.loader
    }

    /// このホストの Presenter を使う ResultUnit を作る
    pub fn result_unit<U, T>(&self, inner: U) -> Arc<ResultUnit<U, T>> {
        Arc::new(ResultUnit::new(inner, Arc::clone(&self.presenter)))
    }

    /// パラメータ付きユニットを読み込む
    pub async fn load<U>(&self, unit: &U, request: &LoadRequest) -> Result<(), UnitError>
    where
        U: Parameterized + ?Sized,
    {
        self.loader.init(unit, request.parameter.as_deref()).await?;
        self.load_unit(unit, request).await
    }

    /// パラメータを持たないユニットを読み込む（`request.parameter` は無視する）
    pub async fn load_unit<U>(&self, unit: &U, request: &LoadRequest) -> Result<(), UnitError>
    where
        U: Lifecycle + ?Sized,
    {
        unit.init(&request.bundle);
        if let Some(saved) = &request.saved_state {
            unit.reload_state(saved);
        }
        unit.start();
        unit.initialize().await?;
        tracing::debug!("unit loaded");
        Ok(())
    }

    /// 新しいチャネルとキャンセル信号をユニットに結びつける
    pub fn open_for_result<U, T>(
        &self,
        unit: &Arc<ResultUnit<U, T>>,
    ) -> Result<PendingResult<T>, UnitError>
    where
        U: Lifecycle + 'static,
        T: Send + Sync + 'static,
    {
        let channel = CompletionChannel::new();
        let cancel = CancellationToken::new();
        unit.bind(channel.clone(), cancel.clone())?;
        Ok(PendingResult { channel, cancel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HostBuilder;
    use crate::domain::LifecyclePhase;
    use crate::impls::InMemoryPresenter;
    use crate::unit::testing::{ProfileParameter, ProfileUnit, RecordingUnit};
    use std::time::Duration;

    fn host(presenter: Arc<InMemoryPresenter>) -> Host {
        HostBuilder::new()
            .with_json()
            .unwrap()
            .presenter(presenter)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn load_runs_state_hooks_then_start_and_initialize() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = RecordingUnit::default();
        let request = LoadRequest::new()
            .with_bundle([("id", "7")].into_iter().collect())
            .with_saved_state([("draft", "hi")].into_iter().collect());

        host.load_unit(&unit, &request).await.unwrap();

        let state = unit.state();
        assert_eq!(state.get("draft"), Some("hi"));
        assert!(!state.contains_key("id"), "saved state replaces init bundle");
        assert!(unit.started());
        assert_eq!(unit.initialized(), 1);
        assert_eq!(
            unit.calls(),
            vec!["init_from_bundle", "reload_from_bundle", "start", "initialize"]
        );
    }

    #[tokio::test]
    async fn load_without_saved_state_skips_reload() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = RecordingUnit::default();

        host.load_unit(&unit, &LoadRequest::new()).await.unwrap();

        assert_eq!(unit.calls(), vec!["init_from_bundle", "start", "initialize"]);
    }

    #[tokio::test]
    async fn load_decodes_parameter() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = ProfileUnit::default();

        host.load(&unit, &LoadRequest::new().with_parameter(r#"{"x":5}"#))
            .await
            .unwrap();

        assert_eq!(unit.received(), vec![ProfileParameter { x: 5 }]);
    }

    #[tokio::test]
    async fn load_stops_on_decode_error() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = host.result_unit::<RecordingUnitWithParam, u8>(RecordingUnitWithParam::default());

        let err = host
            .load(unit.as_ref(), &LoadRequest::new().with_parameter("oops"))
            .await
            .unwrap_err();

        assert!(matches!(err, UnitError::Decode(_)));
        assert!(!unit.inner().0.started());
    }

    #[tokio::test]
    async fn open_for_result_and_complete() {
        let presenter = Arc::new(InMemoryPresenter::new());
        let host = host(presenter.clone());
        let unit = host.result_unit::<RecordingUnit, String>(RecordingUnit::default());
        presenter.present(unit.as_ref());

        let pending = host.open_for_result(&unit).unwrap();
        assert!(unit.close("done".to_string()).await);

        assert_eq!(pending.wait().await, Resolution::Completed("done".to_string()));
        assert_eq!(
            presenter.sent(),
            LifecyclePhase::PRESENT
                .into_iter()
                .chain(LifecyclePhase::DISMISS)
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn open_for_result_and_cancel() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = host.result_unit::<RecordingUnit, String>(RecordingUnit::default());

        let pending = host.open_for_result(&unit).unwrap();
        pending.cancel();

        let resolution = tokio::time::timeout(Duration::from_secs(1), pending.wait())
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Cancelled);
        assert!(pending.is_resolved());
    }

    #[tokio::test]
    async fn open_for_result_twice_is_rejected() {
        let host = host(Arc::new(InMemoryPresenter::new()));
        let unit = host.result_unit::<RecordingUnit, String>(RecordingUnit::default());

        let _pending = host.open_for_result(&unit).unwrap();
        assert!(matches!(
            host.open_for_result(&unit),
            Err(UnitError::AlreadyBound)
        ));
    }

    /// RecordingUnit に空の型付き initializer を足したもの
    #[derive(Default)]
    struct RecordingUnitWithParam(RecordingUnit);

    #[async_trait::async_trait]
    impl Lifecycle for RecordingUnitWithParam {
        fn start(&self) {
            self.0.start();
        }
    }

    #[async_trait::async_trait]
    impl Parameterized for RecordingUnitWithParam {
        type Parameter = ProfileParameter;

        async fn initialize_with(&self, _parameter: ProfileParameter) -> Result<(), UnitError> {
            Ok(())
        }
    }
}
