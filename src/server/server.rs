use anyhow::Result;
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error};

use crate::generation::{
    GateRejection, GenerationGate, GenerationResult, GenerationService,
};
use crate::optimizer::Platform;
use crate::user::{JwtKeys, PasswordCredentials, UserInfo, UserStore};
use tower_http::services::ServeDir;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::http_layers::{limit_by_ip, log_requests, IpRateLimiter};
use super::session::Session;
use super::state::*;
use super::ServerConfig;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub session_email: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct CredentialsBody {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
struct GenerateBody {
    pub title: String,
    pub platform: String,
}

#[derive(Serialize)]
struct AuthSuccessResponse {
    success: bool,
    message: String,
    token: String,
    user: UserInfo,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
        }),
    )
        .into_response()
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        session_email: session.map(|s| s.email),
    };
    Json(stats)
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

async fn register(
    State(state): State<ServerState>,
    Json(body): Json<CredentialsBody>,
) -> Response {
    if state.config.disable_registration {
        return error_response(StatusCode::FORBIDDEN, "Registration is disabled");
    }

    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Email and password are required");
    }
    if !is_valid_email(email) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please provide a valid email address",
        );
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Password must be at least 6 characters long",
        );
    }

    match state.user_store.get_user_by_email(email) {
        Ok(Some(_)) => {
            return error_response(StatusCode::CONFLICT, "User with this email already exists")
        }
        Ok(None) => {}
        Err(err) => {
            error!("User lookup failed during registration: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }

    let credentials = match PasswordCredentials::from_password(&body.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            error!("Password hashing failed: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let user_id = match state.user_store.create_user(email, credentials) {
        Ok(id) => id,
        Err(err) => {
            error!("User insert failed: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let token = match state.jwt_keys.issue(user_id, email) {
        Ok(token) => token,
        Err(err) => {
            error!("Token issuance failed: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    debug!("Registered user {} with id {}", email, user_id);
    (
        StatusCode::CREATED,
        Json(AuthSuccessResponse {
            success: true,
            message: "User registered successfully".to_string(),
            token,
            user: UserInfo {
                id: user_id,
                email: email.to_string(),
            },
        }),
    )
        .into_response()
}

async fn login(State(state): State<ServerState>, Json(body): Json<CredentialsBody>) -> Response {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Email and password are required");
    }

    let user = match state.user_store.get_user_by_email(email) {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Login failed: no user for {}", email);
            return error_response(StatusCode::UNAUTHORIZED, "Invalid email or password");
        }
        Err(err) => {
            error!("User lookup failed during login: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    match user.credentials.verify(&body.password) {
        Ok(true) => {}
        Ok(false) => {
            debug!("Login failed: bad password for {}", email);
            return error_response(StatusCode::UNAUTHORIZED, "Invalid email or password");
        }
        Err(err) => {
            error!("Password verification failed: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }

    let token = match state.jwt_keys.issue(user.id, &user.email) {
        Ok(token) => token,
        Err(err) => {
            error!("Token issuance failed: {}", err);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let cookie_value = HeaderValue::from_str(&format!(
        "session_token={}; Path=/; HttpOnly",
        token
    ))
    .expect("session cookie value");

    let body = AuthSuccessResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&user),
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie_value);
    response
}

async fn generate(
    session: Session,
    State(state): State<ServerState>,
    Json(body): Json<GenerateBody>,
) -> Response {
    if body.platform.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Please select a platform");
    }
    let platform: Platform = body.platform.parse().unwrap_or(Platform::Other);

    let _permit = match state.gate.begin(session.user_id) {
        Ok(permit) => permit,
        Err(GateRejection::Busy) => {
            return error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "A generation is already in progress",
            )
        }
        Err(GateRejection::Throttled) => {
            return error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "Please wait before generating again",
            )
        }
    };

    match state.generation.generate(&body.title, platform).await {
        Ok(result) => Json(GenerateResponse::from(result)).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

#[derive(Serialize)]
struct GenerateResponse {
    success: bool,
    #[serde(flatten)]
    result: GenerationResult,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl ServerState {
    fn new(
        config: ServerConfig,
        user_store: Arc<dyn UserStore>,
        jwt_keys: Arc<JwtKeys>,
        generation: Arc<GenerationService>,
    ) -> ServerState {
        let gate = Arc::new(GenerationGate::new(config.generation_min_interval));
        ServerState {
            config,
            start_time: Instant::now(),
            user_store,
            jwt_keys,
            generation,
            gate,
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    user_store: Arc<dyn UserStore>,
    jwt_keys: Arc<JwtKeys>,
    generation: Arc<GenerationService>,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), user_store, jwt_keys, generation);
    let auth_limiter = Arc::new(IpRateLimiter::default());

    let auth_routes: Router = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(middleware::from_fn_with_state(auth_limiter, limit_by_ip))
        .with_state(state.clone());

    let api_routes: Router = Router::new()
        .route("/generate", post(generate))
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes);

    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    user_store: Arc<dyn UserStore>,
    jwt_keys: Arc<JwtKeys>,
    generation: Arc<GenerationService>,
    config: ServerConfig,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, user_store, jwt_keys, generation)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?)
}
