//! Deep assign options and their loaders.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::MergeError;

/// Option names as they appear in option documents and on the command line.
pub const OPTION_NAMES: &[&str] = &["nonEnum", "symbols", "descriptors", "proto"];

/// Switches for [`deep_assign`](super::deep_assign). All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AssignOptions {
    /// Copy properties regardless of their enumerable flag.
    pub non_enum: bool,

    /// Also copy symbol-keyed own properties.
    pub symbols: bool,

    /// Copy full descriptors (accessors, writable, configurable) instead of
    /// resolved values.
    pub descriptors: bool,

    /// Also merge the source prototype's own properties into the target's
    /// prototype (one level only).
    pub proto: bool,
}

impl AssignOptions {
    /// Every option switched on.
    pub fn all() -> Self {
        Self {
            non_enum: true,
            symbols: true,
            descriptors: true,
            proto: true,
        }
    }

    pub fn with_non_enum(mut self, on: bool) -> Self {
        self.non_enum = on;
        self
    }

    pub fn with_symbols(mut self, on: bool) -> Self {
        self.symbols = on;
        self
    }

    pub fn with_descriptors(mut self, on: bool) -> Self {
        self.descriptors = on;
        self
    }

    pub fn with_proto(mut self, on: bool) -> Self {
        self.proto = on;
        self
    }

    /// Same options with the prototype hop disabled.
    pub fn without_proto(self) -> Self {
        self.with_proto(false)
    }

    /// Parse from a JSON options document such as `{"nonEnum": true}`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, MergeError> {
        serde_json::from_value(value).map_err(|e| MergeError::InvalidConfiguration(e.to_string()))
    }

    /// Parse from a TOML options document such as `nonEnum = true`.
    pub fn from_toml_str(contents: &str) -> Result<Self, MergeError> {
        toml::from_str(contents).map_err(|e| {
            MergeError::InvalidConfiguration(format!("TOML parse error: {}", e))
        })
    }

    /// Load from a file; `.json` files are read as JSON, anything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, MergeError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            MergeError::InvalidConfiguration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
                MergeError::InvalidConfiguration(format!("JSON parse error: {}", e))
            })?;
            Self::from_json(value)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Switch on each named option. Blank names are ignored.
    pub fn from_names<I, S>(names: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for name in names {
            match name.as_ref().trim() {
                "" => {}
                "nonEnum" => options.non_enum = true,
                "symbols" => options.symbols = true,
                "descriptors" => options.descriptors = true,
                "proto" => options.proto = true,
                unknown => {
                    return Err(MergeError::InvalidConfiguration(format!(
                        "unknown option `{}`, expected one of: {}",
                        unknown,
                        OPTION_NAMES.join(", ")
                    )))
                }
            }
        }
        Ok(options)
    }
}

/// Comma-separated option names, e.g. `nonEnum,symbols`.
impl FromStr for AssignOptions {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_names(s.split(','))
    }
}
