use std::collections::HashMap;
use std::env;
use anyhow::{Context, Result};

use crate::csp;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The mode the console is deployed in ("off-cluster" for local development).
    pub k8s_mode: String,
    /// Additional CSP sources requested by console plugins, keyed by directive.
    pub plugins_csp: HashMap<String, String>,
    /// The endpoint CSP violation reports are sent to, empty when unset.
    pub csp_reporting_endpoint: String,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let k8s_mode = env::var("K8S_MODE").unwrap_or_else(|_| "in-cluster".to_string());

        let plugins_csp = match env::var("CONSOLE_PLUGINS_CSP") {
            Ok(raw) if !raw.is_empty() => parse_plugins_csp(&raw)?,
            _ => HashMap::new(),
        };

        let config = Self {
            k8s_mode,
            plugins_csp,
            csp_reporting_endpoint: env::var("CSP_REPORTING_ENDPOINT").unwrap_or_default(),
        };
        tracing::debug!(
            "✅ Console security configuration loaded ({} plugin CSP entries)",
            config.plugins_csp.len()
        );

        Ok(config)
    }

    /// Assembles the CSP directives for this configuration.
    ///
    /// # Arguments
    ///
    /// * `index_page_script_nonce` - The per-render nonce embedded into script-src.
    ///
    /// # Returns
    ///
    /// A `Result` containing the ordered directive strings.
    pub fn csp_directives(&self, index_page_script_nonce: &str) -> crate::error::Result<Vec<String>> {
        csp::build_csp_directives(
            &self.k8s_mode,
            &self.plugins_csp,
            index_page_script_nonce,
            &self.csp_reporting_endpoint,
        )
    }
}

/// Parses the plugin CSP configuration from its `key1=value1,key2=value2`
/// flag format into a directive-to-sources map.
///
/// # Arguments
///
/// * `raw` - The raw configuration string.
///
/// # Returns
///
/// A `Result` containing the parsed map.
pub fn parse_plugins_csp(raw: &str) -> Result<HashMap<String, String>> {
    let mut plugins_csp = HashMap::new();

    for pair in raw.split(',') {
        let (directive, sources) = pair
            .split_once('=')
            .with_context(|| format!("Invalid plugin CSP entry (expected key=value): {}", pair))?;

        let directive = directive.trim();
        if !csp::is_plugin_directive(directive) {
            anyhow::bail!("Invalid CSP directive: {}", directive);
        }

        plugins_csp.insert(directive.to_string(), sources.trim().to_string());
    }

    Ok(plugins_csp)
}
