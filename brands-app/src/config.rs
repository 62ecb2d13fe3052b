use brands_core::AuthorityPrecedence;
use error_stack::{IntoReport, Report, ResultExt};
use repositories::neo4j::Credentials;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ENV: &str = "local";
const DEFAULT_CONCEPTS_API_URL: &str = "http://localhost:8080";
const DEFAULT_NEO_URL: &str = "http://localhost:7474/db/neo4j";
const DEFAULT_CACHE_DURATION: &str = "1h";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    Invalid(&'static str),
    #[error("{0} must be set together with {1}")]
    Incomplete(&'static str, &'static str),
}

pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

#[derive(Debug, Clone)]
pub enum Backend {
    ConceptsApi {
        url: String,
    },
    Neo4j {
        url: String,
        credentials: Option<Credentials>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub env: String,
    pub backend: Backend,
    pub cache_duration: Duration,
    pub authority_precedence: AuthorityPrecedence,
    pub metrics_enabled: bool,
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("BRANDS_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .change_context(ConfigError::Invalid("BRANDS_PORT"))
                .attach_with(|| format!("'{port}' is not a port number"))?,
            None => DEFAULT_PORT,
        };

        let cache_duration = lookup("CACHE_DURATION").unwrap_or_else(|| DEFAULT_CACHE_DURATION.to_string());
        let cache_duration = parse_duration(&cache_duration)
            .ok_or_else(|| ConfigError::Invalid("CACHE_DURATION").into_report())
            .attach_with(|| format!("'{cache_duration}' is not a duration such as 1h or 2h45m"))?;

        let authority_precedence = lookup("BRANDS_AUTHORITY_PRECEDENCE")
            .map(|v| v.parse().unwrap_or_else(|never| match never {}))
            .unwrap_or_default();

        let metrics_enabled = match lookup("BRANDS_METRICS") {
            Some(v) => v
                .trim()
                .parse()
                .change_context(ConfigError::Invalid("BRANDS_METRICS"))
                .attach_with(|| format!("'{v}' is neither true nor false"))?,
            None => true,
        };

        Ok(Self {
            port,
            env: lookup("BRANDS_ENV").unwrap_or_else(|| DEFAULT_ENV.to_string()),
            backend: backend(&lookup)?,
            cache_duration,
            authority_precedence,
            metrics_enabled,
        })
    }
}

fn backend<F>(lookup: &F) -> ConfigResult<Backend>
where
    F: Fn(&str) -> Option<String>,
{
    let name = lookup("BRANDS_BACKEND").unwrap_or_else(|| "concepts-api".to_string());
    match name.trim() {
        "concepts-api" => Ok(Backend::ConceptsApi {
            url: lookup("CONCEPTS_API_URL").unwrap_or_else(|| DEFAULT_CONCEPTS_API_URL.to_string()),
        }),
        "neo4j" => {
            let credentials = match (lookup("NEO_USER"), lookup("NEO_PASSWORD")) {
                (Some(user), Some(password)) => Some(Credentials::new(user, password)),
                (None, None) => None,
                (Some(_), None) => {
                    return Err(ConfigError::Incomplete("NEO_USER", "NEO_PASSWORD").into_report());
                }
                (None, Some(_)) => {
                    return Err(ConfigError::Incomplete("NEO_PASSWORD", "NEO_USER").into_report());
                }
            };
            Ok(Backend::Neo4j {
                url: lookup("NEO_URL").unwrap_or_else(|| DEFAULT_NEO_URL.to_string()),
                credentials,
            })
        }
        other => Err(ConfigError::Invalid("BRANDS_BACKEND").into_report())
            .attach_with(|| format!("'{other}' is not one of concepts-api, neo4j")),
    }
}

/// Parses durations written the way `2h45m`, `90s` or `1.5h` are, i.e. a sequence of
/// decimal numbers each followed by one of `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
/// A bare `0` is the only number allowed without a unit.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let mut rest = raw.trim();
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let mut nanos = 0f64;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
        if number_end == 0 {
            return None;
        }
        let value: f64 = rest[..number_end].parse().ok()?;
        rest = &rest[number_end..];

        let unit_end = rest.find(is_numeric).unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        nanos += value * nanos_per_unit;
        rest = &rest[unit_end..];
    }

    Some(Duration::from_nanos(nanos.round() as u64))
}
