use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
///
/// Both members default to empty so that any JSON object answers the probe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthRes {
    /// The response a running API gives.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
            message: "API está funcionando".into(),
        }
    }
}
