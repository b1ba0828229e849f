//! binding_options: bindingconfig.json parsing and parser options.
//!
//! Every field is optional in the file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The name of the configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "bindingconfig.json";

/// Default nesting bound of the parser.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 100;

/// Largest accepted nesting bound. Deeper limits can exhaust the stack of
/// a default-sized thread.
pub const MAX_RECURSION_DEPTH_LIMIT: u32 = 1000;

/// The bindingconfig.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BindingConfig {
    pub parser: ParserOptions,
    pub output: OutputOptions,
}

/// Options consumed by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Nesting depth beyond which an error placeholder is produced instead
    /// of recursing further.
    pub max_recursion_depth: u32,
    /// Which grammar entry point to parse with.
    pub mode: ParseMode,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            mode: ParseMode::default(),
        }
    }
}

/// Grammar entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseMode {
    /// A single expression; trailing tokens are left unread.
    Expression,
    /// Expressions until the end of input, with recovery.
    #[default]
    MultiExpression,
    /// `Namespace.Type[, Assembly]`.
    DirectiveTypeName,
    /// `Alias = Namespace.Type` or a type name.
    DirectiveValue,
}

/// How the CLI reports results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Print the syntax tree.
    pub tree: bool,
    /// Print the token stream.
    pub tokens: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("parser.maxRecursionDepth must be at least 1")]
    ZeroRecursionDepth,
    #[error("parser.maxRecursionDepth is {0}, the maximum is {max}", max = MAX_RECURSION_DEPTH_LIMIT)]
    RecursionDepthTooLarge(u32),
}

/// Parse a bindingconfig.json file from a string.
pub fn parse_config(content: &str) -> Result<BindingConfig, ConfigError> {
    let config: BindingConfig = serde_json::from_str(content)?;
    match config.parser.max_recursion_depth {
        0 => Err(ConfigError::ZeroRecursionDepth),
        depth if depth > MAX_RECURSION_DEPTH_LIMIT => Err(ConfigError::RecursionDepthTooLarge(depth)),
        _ => Ok(config),
    }
}

/// Parse a bindingconfig.json file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<BindingConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}
