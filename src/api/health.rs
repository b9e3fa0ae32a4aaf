use poem_openapi::{payload::Json, Object, OpenApi};

#[derive(Object, Debug)]
pub struct HealthResponse {
    pub status: String,
}

pub struct HealthApi;

#[OpenApi]
impl HealthApi {
    /// Liveness probe
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
        })
    }
}
