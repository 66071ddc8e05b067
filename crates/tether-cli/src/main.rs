use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tether_core::app::{HostBuilder, LoadRequest};
use tether_core::domain::{Resolution, UnitError};
use tether_core::impls::InMemoryPresenter;
use tether_core::unit::{Lifecycle, Parameterized};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct PickColor {
    title: String,
    options: Vec<String>,
}

/// 色を 1 つ選んで返すユニット
#[derive(Default)]
struct ColorPicker {
    options: Mutex<Vec<String>>,
}

impl ColorPicker {
    fn first_option(&self) -> Option<String> {
        self.options.lock().ok()?.first().cloned()
    }
}

#[async_trait]
impl Lifecycle for ColorPicker {
    fn view_appeared(&self) {
        info!("color picker on screen");
    }

    fn view_destroy(&self) {
        info!("color picker destroyed");
    }
}

#[async_trait]
impl Parameterized for ColorPicker {
    type Parameter = PickColor;

    async fn initialize_with(&self, parameter: PickColor) -> Result<(), UnitError> {
        info!(title = %parameter.title, options = parameter.options.len(), "picker initialized");
        let mut options = self
            .options
            .lock()
            .map_err(|e| UnitError::initialize(e.to_string()))?;
        *options = parameter.options;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // (A) Deserializer と Presenter をホストに組み込む
    let presenter = Arc::new(InMemoryPresenter::new());
    let host = HostBuilder::new()
        .with_json()?
        .expect_capabilities(&["converter.json"])
        .presenter(presenter.clone())
        .build()?;

    let request = LoadRequest::new().with_parameter(
        serde_json::json!({ "title": "Accent", "options": ["teal", "amber"] }).to_string(),
    );

    // (B) 1 つ目: ユーザーが色を選んで閉じる
    let picker = host.result_unit::<ColorPicker, String>(ColorPicker::default());
    host.load(picker.as_ref(), &request).await?;
    presenter.present(picker.as_ref());
    let pending = host.open_for_result(&picker)?;

    let user = tokio::spawn({
        let picker = picker.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if let Some(choice) = picker.inner().first_option() {
                picker.close(choice).await;
            }
        }
    });
    report("first picker", pending.wait().await);
    user.await?;

    // (C) 2 つ目: ホストがキャンセルする
    let picker = host.result_unit::<ColorPicker, String>(ColorPicker::default());
    host.load(picker.as_ref(), &request).await?;
    presenter.present(picker.as_ref());
    let pending = host.open_for_result(&picker)?;
    pending.cancel();
    report("second picker", pending.wait().await);

    info!(close_requests = presenter.close_requests(), "done");
    Ok(())
}

fn report(label: &str, resolution: Resolution<String>) {
    if let Resolution::Failed(e) = &resolution {
        tracing::error!(label, error = %e, "picker failed");
        return;
    }
    match resolution.into_result() {
        Some(color) => info!(label, %color, "result received"),
        None => info!(label, "picker cancelled"),
    }
}
