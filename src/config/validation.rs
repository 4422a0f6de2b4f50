//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - MIME patterns must be `type/subtype`
//! - Validate value ranges (timeouts > 0, parseable addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::security::mime::MimePattern;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("proxy.allowed_mime_types: '{0}' must have the format 'leftPart/rightPart' where rightPart may be '*'")]
    MimePattern(String),

    #[error("{field}: '{value}' is not a valid socket address")]
    Address { field: &'static str, value: String },

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.fetch_secs ({fetch}) must be lower than timeouts.request_secs ({request})")]
    FetchExceedsRequest { fetch: u64, request: u64 },

    #[error("observability.log_format: '{0}' is not one of 'pretty', 'json'")]
    LogFormat(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for pattern in &config.proxy.allowed_mime_types {
        if pattern.parse::<MimePattern>().is_err() {
            errors.push(ValidationError::MimePattern(pattern.clone()));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let timeouts = &config.timeouts;
    for (name, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("fetch_secs", timeouts.fetch_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }
    if timeouts.fetch_secs >= timeouts.request_secs && timeouts.request_secs > 0 {
        errors.push(ValidationError::FetchExceedsRequest {
            fetch: timeouts.fetch_secs,
            request: timeouts.request_secs,
        });
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::LogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
