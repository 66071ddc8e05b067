//! ParameterizedResultUnit - パラメータを受け取り、結果を返すユニット
//!
//! ResultUnit の close プロトコルはそのまま使い、型付き initializer だけを inner に委譲します。
//! デコードは ParameterLoader が行うので、ここに追加のロジックはありません。

use async_trait::async_trait;

use super::parameterized::Parameterized;
use super::result::ResultUnit;
use crate::domain::UnitError;

/// inner が Parameterized な ResultUnit
pub type ParameterizedResultUnit<U, T> = ResultUnit<U, T>;

#[async_trait]
impl<U, T> Parameterized for ResultUnit<U, T>
where
    U: Parameterized,
    T: Send + Sync,
{
    type Parameter = U::Parameter;

    async fn initialize_with(&self, parameter: U::Parameter) -> Result<(), UnitError> {
        self.inner().initialize_with(parameter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Capability, Resolution};
    use crate::impls::{InMemoryPresenter, JsonDeserializer, ServiceRegistry};
    use crate::unit::testing::{ProfileParameter, ProfileUnit};
    use crate::unit::{CompletionChannel, ParameterLoader};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn decodes_parameter_and_returns_result() {
        let mut registry = ServiceRegistry::new();
        registry
            .register(Capability::json_converter(), Arc::new(JsonDeserializer))
            .unwrap();
        let loader = ParameterLoader::new(Arc::new(registry));

        let unit = Arc::new(ParameterizedResultUnit::<ProfileUnit, u32>::new(
            ProfileUnit::default(),
            Arc::new(InMemoryPresenter::new()),
        ));
        let channel = CompletionChannel::new();
        unit.bind(channel.clone(), CancellationToken::new()).unwrap();

        loader.init(unit.as_ref(), Some(r#"{"x":41}"#)).await.unwrap();
        assert_eq!(unit.inner().received(), vec![ProfileParameter { x: 41 }]);

        assert!(unit.close(42).await);
        assert_eq!(channel.wait().await, Resolution::Completed(42));
    }

    #[tokio::test]
    async fn empty_parameter_skips_inner_initializer() {
        let loader = ParameterLoader::new(Arc::new(ServiceRegistry::new()));
        let unit = ParameterizedResultUnit::<ProfileUnit, u32>::new(
            ProfileUnit::default(),
            Arc::new(InMemoryPresenter::new()),
        );

        loader.init(&unit, Some("")).await.unwrap();
        assert!(unit.inner().received().is_empty());
    }
}
