//! Success envelope shared by every non-auth endpoint.

use serde::Serialize;

/// Wraps a payload as `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
