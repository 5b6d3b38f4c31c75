//! Build-time configuration.
//!
//! Every value can be overridden through an environment variable at compile
//! time (`API_BASE_URL=https://api.example.com trunk build`); otherwise the
//! embedded default applies.

use chrono::Duration;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/atendimentos";

/// localStorage key holding the serialized session
pub const SESSION_STORAGE_KEY: &str = "auth_session";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_CEP_LOOKUP_URL: &str = "https://viacep.com.br/ws";
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 30;

fn non_empty_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn parse_minutes(value: Option<&str>) -> Option<i64> {
    value?.trim().parse::<i64>().ok().filter(|m| *m > 0)
}

pub fn api_base_url() -> &'static str {
    non_empty_or(option_env!("API_BASE_URL"), DEFAULT_API_BASE_URL)
}

pub fn cep_lookup_url() -> &'static str {
    non_empty_or(option_env!("CEP_LOOKUP_URL"), DEFAULT_CEP_LOOKUP_URL)
}

/// Footer line printed on exported reports
pub fn company_footer() -> Option<&'static str> {
    option_env!("COMPANY_FOOTER")
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Inactivity window after which the session is dropped
pub fn session_idle_window() -> Duration {
    let minutes =
        parse_minutes(option_env!("SESSION_IDLE_MINUTES")).unwrap_or(DEFAULT_SESSION_IDLE_MINUTES);
    Duration::minutes(minutes)
}
