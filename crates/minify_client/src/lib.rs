// crates/minify_client/src/lib.rs

//! Remote JavaScript minification.
//!
//! The only implementation talking to the network is [`ClosureCompiler`],
//! which posts the code to the Closure Compiler web service and returns the
//! response body verbatim. An empty body counts as a failed compilation.
//! There are no retries.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, info};

/// Public Closure Compiler web service.
pub const DEFAULT_ENDPOINT: &str = "https://closure-compiler.appspot.com/compile";

/// Turns JavaScript source into (hopefully) smaller JavaScript source.
pub trait Minifier {
    fn minify(&self, source: &str) -> Result<String>;
}

/// Client for a Closure Compiler compatible endpoint.
pub struct ClosureCompiler {
    endpoint: String,
    client: Client,
}

impl ClosureCompiler {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hype_power_pack/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Form fields of a compile request for `source`.
    pub fn form_fields(source: &str) -> Vec<(&'static str, &str)> {
        vec![
            ("js_code", source),
            ("compilation_level", "SIMPLE_OPTIMIZATIONS"),
            ("output_format", "text"),
            ("output_info", "compiled_code"),
        ]
    }
}

impl Minifier for ClosureCompiler {
    fn minify(&self, source: &str) -> Result<String> {
        info!(endpoint = %self.endpoint, bytes = source.len(), "minifying helper code");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&Self::form_fields(source))
            .send()
            .with_context(|| format!("Failed to reach minification service {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "Minification service {} answered with status {}",
                self.endpoint,
                status
            ));
        }
        let minified = response
            .text()
            .context("Failed to read minification response")?;
        // The service answers 200 with an empty body when compilation fails.
        if minified.trim().is_empty() {
            return Err(anyhow!(
                "Minification service {} returned no compiled code",
                self.endpoint
            ));
        }
        debug!(bytes = minified.len(), "received minified code");
        Ok(minified)
    }
}
