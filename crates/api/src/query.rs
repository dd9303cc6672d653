//! Shared query parameter types and body helpers for API handlers.

use serde::{Deserialize, Deserializer};

/// Query parameters for `GET /notifications`.
///
/// Values are clamped with `clamp_limit` / `clamp_offset` before use.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Deserialize a present field into `Some`, including an explicit `null`.
///
/// Combined with `#[serde(default)]` this tells an absent field (`None`)
/// apart from a `null` one (`Some(None)` or `Some(Value::Null)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
