use axum::extract::FromRef;

use crate::generation::{GenerationGate, GenerationService};
use crate::user::{JwtKeys, UserStore};
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedUserStore = Arc<dyn UserStore>;
pub type GuardedJwtKeys = Arc<JwtKeys>;
pub type GuardedGenerationService = Arc<GenerationService>;
pub type GuardedGenerationGate = Arc<GenerationGate>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub user_store: GuardedUserStore,
    pub jwt_keys: GuardedJwtKeys,
    pub generation: GuardedGenerationService,
    pub gate: GuardedGenerationGate,
}

impl FromRef<ServerState> for GuardedUserStore {
    fn from_ref(input: &ServerState) -> Self {
        input.user_store.clone()
    }
}

impl FromRef<ServerState> for GuardedJwtKeys {
    fn from_ref(input: &ServerState) -> Self {
        input.jwt_keys.clone()
    }
}

impl FromRef<ServerState> for GuardedGenerationService {
    fn from_ref(input: &ServerState) -> Self {
        input.generation.clone()
    }
}

impl FromRef<ServerState> for GuardedGenerationGate {
    fn from_ref(input: &ServerState) -> Self {
        input.gate.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
