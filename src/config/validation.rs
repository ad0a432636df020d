//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, timeouts and log filters
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("observability.metrics_address must differ from listener.bind_address")]
    MetricsAddressInUse,

    #[error("observability.log_level {0:?} is not a valid filter")]
    LogLevel(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("render.title must not be empty")]
    EmptyTitle,
}

pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let bind = config.listener.bind_address.parse::<SocketAddr>();
    if bind.is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let obs = &config.observability;
    if obs.metrics_enabled {
        match obs.metrics_address.parse::<SocketAddr>() {
            Ok(metrics) if bind.as_ref().map(|b| *b == metrics).unwrap_or(false) => {
                errors.push(ValidationError::MetricsAddressInUse);
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::MetricsAddress(obs.metrics_address.clone())),
        }
    }

    if EnvFilter::try_new(&obs.log_level).is_err() {
        errors.push(ValidationError::LogLevel(obs.log_level.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.render.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&SiteConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = SiteConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.render.title = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::ZeroTimeout,
                ValidationError::EmptyTitle,
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = SiteConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nope".into())])
        );

        config.observability.metrics_address = config.listener.bind_address.clone();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddressInUse])
        );
    }
}
