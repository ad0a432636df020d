//! Command bodies behind the `nested-router` binary.
//!
//! # Design Decisions
//! - Commands return their output and exit code instead of printing, so the
//!   binary stays a thin clap shell
//! - Command-line overrides go through the same validation as the file

use crate::config::validation::validate_config;
use crate::config::{ConfigError, SiteConfig};
use crate::render::{PageStatus, Renderer};
use crate::routing::RouteTreeError;

/// Error type for the offline commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid route tree: {0}")]
    Routes(#[from] RouteTreeError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output of a command plus the process exit code it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

/// Apply `serve --bind` and revalidate the result.
pub fn apply_bind_override(
    mut config: SiteConfig,
    bind: Option<String>,
) -> Result<SiteConfig, ConfigError> {
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Render one path. Exits with 1 when no route matched.
pub fn render_page(
    config: &SiteConfig,
    path: &str,
    fragment: bool,
) -> Result<CommandOutput, CommandError> {
    let renderer = Renderer::for_site(config.routing.case_sensitive)?;
    let page = renderer.render_path(path);
    let stdout = if fragment {
        format!("{}\n", page.to_html(&config.render))
    } else {
        page.to_document(&config.render)
    };

    let exit_code = match page.status {
        PageStatus::Found => 0,
        PageStatus::NotFound => {
            tracing::warn!(path = %path, "No route matched");
            1
        }
    };
    Ok(CommandOutput { stdout, exit_code })
}

/// List the route tree as indented text or JSON.
pub fn list_routes(config: &SiteConfig, json: bool) -> Result<CommandOutput, CommandError> {
    let renderer = Renderer::for_site(config.routing.case_sensitive)?;
    let routes = renderer.tree().summaries();

    let mut stdout = String::new();
    if json {
        stdout.push_str(&serde_json::to_string_pretty(&routes)?);
        stdout.push('\n');
    } else {
        for r in routes {
            stdout.push_str(&format!(
                "{:indent$}{:<28} {:<10} {:?}\n",
                "",
                r.id.as_str(),
                r.path,
                r.kind,
                indent = r.depth * 2
            ));
        }
    }
    Ok(CommandOutput {
        stdout,
        exit_code: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn test_render_unknown_path_exits_1() {
        let out = render_page(&SiteConfig::default(), "/settings/payment", false).unwrap();
        assert_eq!(out.exit_code, 1);
        assert!(out.stdout.contains("Not Found"));
    }

    #[test]
    fn test_render_payment_fragment() {
        let out = render_page(&SiteConfig::default(), "/payment", true).unwrap();
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("Hello \"/settings/payment\"!"));
        assert!(!out.stdout.contains("<!doctype html>"));

        let out = render_page(&SiteConfig::default(), "/payment", false).unwrap();
        assert!(out.stdout.starts_with("<!doctype html>"));
    }

    #[test]
    fn test_routes_json_lists_nested_leaves() {
        let out = list_routes(&SiteConfig::default(), true).unwrap();
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("\"/_settingsLayout/payment\""));

        let routes: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
        assert_eq!(routes.as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn test_routes_text_indents_by_depth() {
        let out = list_routes(&SiteConfig::default(), false).unwrap();
        assert!(out.stdout.lines().next().unwrap().starts_with("__root__"));
        assert!(out.stdout.contains("\n    /_settingsLayout/payment"));
    }

    #[test]
    fn test_bind_override_is_validated() {
        let config = apply_bind_override(SiteConfig::default(), Some("0.0.0.0:8080".into())).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");

        match apply_bind_override(SiteConfig::default(), Some("not-an-address".into())) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::BindAddress("not-an-address".into())]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let mut metrics_on = SiteConfig::default();
        metrics_on.observability.metrics_enabled = true;
        let clash = metrics_on.observability.metrics_address.clone();
        match apply_bind_override(metrics_on, Some(clash)) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::MetricsAddressInUse));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_override_keeps_config() {
        let config = apply_bind_override(SiteConfig::default(), None).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
