use std::collections::HashMap;

use crate::error::{AppError, Result};

const BASE_URI: &str = "base-uri";
const DEFAULT_SRC: &str = "default-src";
const IMG_SRC: &str = "img-src";
const FONT_SRC: &str = "font-src";
const SCRIPT_SRC: &str = "script-src";
const STYLE_SRC: &str = "style-src";
const OBJECT_SRC: &str = "object-src";
const CONNECT_SRC: &str = "connect-src";
const CONSOLE_DOT: &str = "console.redhat.com";
const HTTP_LOCALHOST: &str = "http://localhost:8080";
const WS_LOCALHOST: &str = "ws://localhost:8080";
const SELF: &str = "'self'";
const DATA: &str = "data:";
const UNSAFE_EVAL: &str = "'unsafe-eval'";
const UNSAFE_INLINE: &str = "'unsafe-inline'";

/// The mode value that marks the console as running outside the cluster,
/// typically for local development against a local backend.
pub const K8S_MODE_OFF_CLUSTER: &str = "off-cluster";

/// The report-only header the assembled directives are served under.
pub const CSP_REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";

/// The enforcing variant of the CSP header.
pub const CSP_ENFORCING_HEADER: &str = "Content-Security-Policy";

/// The directives console plugins are allowed to extend with their own
/// sources.
const PLUGIN_DIRECTIVES: [&str; 6] = [
    DEFAULT_SRC,
    IMG_SRC,
    FONT_SRC,
    SCRIPT_SRC,
    STYLE_SRC,
    CONNECT_SRC,
];

/// Returns whether console plugins may supply additional sources for the
/// given directive.
pub fn is_plugin_directive(directive: &str) -> bool {
    PLUGIN_DIRECTIVES.contains(&directive)
}

/// Builds the complete set of directives for the Content-Security-Policy
/// header from the deployment mode, the plugin-supplied sources, and the
/// per-render script nonce.
///
/// The constructed directives include the default sources and the supplied
/// plugin configuration. Plugin source fragments are appended verbatim; no
/// deduplication or URL validation is performed.
///
/// # Arguments
///
/// * `k8s_mode` - The deployment mode; only `"off-cluster"` changes behavior.
/// * `plugins_csp` - Additional sources requested by plugins, keyed by directive.
/// * `index_page_script_nonce` - The per-render nonce embedded into script-src.
/// * `csp_reporting_endpoint` - Optional endpoint violation reports are sent to.
///
/// # Returns
///
/// A `Result` containing the ordered directive strings, intended to be joined
/// with `"; "` to form the literal header value.
pub fn build_csp_directives(
    k8s_mode: &str,
    plugins_csp: &HashMap<String, String>,
    index_page_script_nonce: &str,
    csp_reporting_endpoint: &str,
) -> Result<Vec<String>> {
    let nonce = format!("'nonce-{}'", index_page_script_nonce);

    // The default sources are the sources that are allowed for all directives.
    // When running on-cluster, the default sources are just 'self' and
    // 'console.redhat.com'. When running off-cluster, 'http://localhost:8080'
    // and 'ws://localhost:8080' are appended to the default sources. Image
    // source, font source, and style source only use 'self' and
    // 'http://localhost:8080'.
    let mut base_uri_directive = vec![BASE_URI, SELF];
    let mut default_src_directive = vec![DEFAULT_SRC, SELF, CONSOLE_DOT];
    let mut img_src_directive = vec![IMG_SRC, SELF];
    let mut font_src_directive = vec![FONT_SRC, SELF];
    let mut script_src_directive = vec![SCRIPT_SRC, SELF, CONSOLE_DOT];
    let mut style_src_directive = vec![STYLE_SRC, SELF];
    let mut object_src_directive = vec![OBJECT_SRC, SELF];
    let mut connect_src_directive = vec![CONNECT_SRC, SELF, CONSOLE_DOT];

    if k8s_mode == K8S_MODE_OFF_CLUSTER {
        base_uri_directive.extend([HTTP_LOCALHOST, WS_LOCALHOST]);
        default_src_directive.extend([HTTP_LOCALHOST, WS_LOCALHOST]);
        img_src_directive.push(HTTP_LOCALHOST);
        font_src_directive.push(HTTP_LOCALHOST);
        script_src_directive.extend([HTTP_LOCALHOST, WS_LOCALHOST]);
        style_src_directive.push(HTTP_LOCALHOST);
        object_src_directive.push(HTTP_LOCALHOST);
        connect_src_directive.push(HTTP_LOCALHOST);
    }

    // Plugin sources are appended to the directive they were configured for.
    // Only the directives in PLUGIN_DIRECTIVES may be extended by plugins.
    for (directive, sources) in plugins_csp {
        match directive.as_str() {
            DEFAULT_SRC => default_src_directive.push(sources),
            IMG_SRC => img_src_directive.push(sources),
            FONT_SRC => font_src_directive.push(sources),
            SCRIPT_SRC => script_src_directive.push(sources),
            STYLE_SRC => style_src_directive.push(sources),
            CONNECT_SRC => connect_src_directive.push(sources),
            _ => {
                tracing::error!("❌ Invalid CSP directive: {}", directive);
                return Err(AppError::InvalidDirective(directive.clone()));
            }
        }
    }

    img_src_directive.push(DATA);
    font_src_directive.push(DATA);
    script_src_directive.extend([UNSAFE_EVAL, nonce.as_str()]);
    style_src_directive.push(UNSAFE_INLINE);

    // Each directive is joined into a "<directive-type> <sources>" string,
    // in a fixed order so the header value is deterministic.
    let mut result_directives = vec![
        base_uri_directive.join(" "),
        default_src_directive.join(" "),
        img_src_directive.join(" "),
        font_src_directive.join(" "),
        script_src_directive.join(" "),
        style_src_directive.join(" "),
        connect_src_directive.join(" "),
        object_src_directive.join(" "),
        "frame-src 'none'".to_string(),
        "frame-ancestors 'none'".to_string(),
    ];

    // Support using a client provided CSP reporting endpoint for testing purposes.
    if !csp_reporting_endpoint.is_empty() {
        result_directives.push(format!("report-uri {}", csp_reporting_endpoint));
    }

    Ok(result_directives)
}

/// Builds the literal value of the CSP header.
///
/// # Arguments
///
/// * `k8s_mode` - The deployment mode; only `"off-cluster"` changes behavior.
/// * `plugins_csp` - Additional sources requested by plugins, keyed by directive.
/// * `index_page_script_nonce` - The per-render nonce embedded into script-src.
/// * `csp_reporting_endpoint` - Optional endpoint violation reports are sent to.
///
/// # Returns
///
/// A `Result` containing the directives joined with `"; "`, ready to be set
/// as the value of the `Content-Security-Policy-Report-Only` header.
pub fn csp_header_value(
    k8s_mode: &str,
    plugins_csp: &HashMap<String, String>,
    index_page_script_nonce: &str,
    csp_reporting_endpoint: &str,
) -> Result<String> {
    let directives = build_csp_directives(
        k8s_mode,
        plugins_csp,
        index_page_script_nonce,
        csp_reporting_endpoint,
    )?;

    Ok(directives.join("; "))
}
