use crate::client::PlanClient;

/// Shared per-process state. Holds no mutable data; every request reads
/// fresh from the plan service.
#[derive(Clone)]
pub struct AppState {
    pub client: PlanClient,
}

impl AppState {
    pub fn new(client: PlanClient) -> Self {
        Self { client }
    }
}
