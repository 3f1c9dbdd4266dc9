//! Output formatters for client results
//!
//! Provides text and JSON output formats.

use serde_json::Value;
use std::str::FromStr;

use crate::k8s::{ClusterSize, Target};

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn json(&self, value: &impl serde::Serialize) -> String {
        match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value).unwrap_or_default(),
            _ => serde_json::to_string(value).unwrap_or_default(),
        }
    }

    /// Format a cluster size reading
    pub fn format_cluster_size(&self, size: &ClusterSize) -> String {
        match self.format {
            OutputFormat::Text => format!("nodes: {}\ncores: {}", size.nodes, size.cores),
            _ => self.json(size),
        }
    }

    /// Format a resolved target
    pub fn format_target(&self, target: &Target) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "kind:         {}\ngroupVersion: {}\nname:         {}\nnamespace:    {}",
                target.kind(),
                target.group_version(),
                target.name(),
                target.namespace()
            ),
            _ => self.json(&serde_json::json!({
                "kind": target.kind(),
                "groupVersion": target.group_version(),
                "name": target.name(),
                "namespace": target.namespace(),
            })),
        }
    }

    /// Format a patch document; text output is pretty JSON
    pub fn format_patch(&self, patch: &Value) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(patch).unwrap_or_default(),
            _ => serde_json::to_string_pretty(patch).unwrap_or_default(),
        }
    }
}
