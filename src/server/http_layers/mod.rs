mod rate_limit;
mod requests_logging;

pub use rate_limit::{limit_by_ip, IpRateLimiter, AUTH_REQUESTS_PER_WINDOW, AUTH_WINDOW};
pub use requests_logging::{log_requests, RequestsLoggingLevel};
