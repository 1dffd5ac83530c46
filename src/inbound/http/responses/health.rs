use serde::Serialize;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Health
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct HealthResponse {
    data: HealthData,
    #[serde(rename = "type")]
    object_type: &'static str,
}

#[derive(Serialize)]
pub struct HealthData {
    status: String,
    version: &'static str,
}

pub fn health_response() -> HealthResponse {
    HealthResponse {
        data: HealthData {
            status: "OK".to_string(),
            version: env!("CARGO_PKG_VERSION"),
        },
        object_type: "health",
    }
}
