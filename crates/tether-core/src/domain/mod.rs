//! Domain model (bundle, capabilities, phases, resolutions, errors).
//!
//! このモジュールは実行環境を仮定しません。
//! ホスト・ユニット・ポートの間でやり取りされる「形」だけを定義します。

pub mod bundle;
pub mod capability;
pub mod errors;
pub mod phase;
pub mod resolution;

pub use self::bundle::Bundle;
pub use self::capability::Capability;
pub use self::errors::{DecodeError, PlatformError, UnitError};
pub use self::phase::{CloseState, LifecyclePhase};
pub use self::resolution::Resolution;
