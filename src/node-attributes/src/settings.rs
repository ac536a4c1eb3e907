// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

/// Enables or disables the automatic discovery of node attributes.
///
/// Defaults to `true` when not set.
pub const AUTO_ATTRIBUTES_SETTING: &str = "cloud.node.auto_attributes";

/// The environment variable consulted by [Settings::from_env] for
/// [AUTO_ATTRIBUTES_SETTING].
pub const AUTO_ATTRIBUTES_ENV_VAR: &str = "CLOUD_NODE_AUTO_ATTRIBUTES";

/// An immutable set of string settings.
///
/// The clustering subsystem typically owns the configuration and hands a
/// snapshot to the attribute providers. Values are stored as strings and
/// interpreted on lookup.
///
/// ```
/// # use google_cloud_node_attributes::settings::{AUTO_ATTRIBUTES_SETTING, Settings};
/// let settings = Settings::builder()
///     .put(AUTO_ATTRIBUTES_SETTING, "false")
///     .build();
/// assert!(!settings.get_as_bool(AUTO_ATTRIBUTES_SETTING, true));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Returns a builder to create [Settings].
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Creates settings from the process environment.
    ///
    /// Only [AUTO_ATTRIBUTES_ENV_VAR] is consulted. Unset variables leave the
    /// corresponding setting unset, so lookups return their defaults.
    pub fn from_env() -> Self {
        std::env::var(AUTO_ATTRIBUTES_ENV_VAR)
            .into_iter()
            .fold(Self::builder(), |b, v| b.put(AUTO_ATTRIBUTES_SETTING, v))
            .build()
    }

    /// Returns the raw value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of `key` interpreted as a boolean.
    ///
    /// Recognizes `true`/`false`, `on`/`off`, `yes`/`no`, and `1`/`0`,
    /// ignoring case and surrounding whitespace. Returns `default` if the key
    /// is not set, or if the value is not recognized.
    pub fn get_as_bool(&self, key: &str, default: bool) -> bool {
        let Some(value) = self.get(key) else {
            return default;
        };
        match parse_bool(value) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    "cannot parse setting {key}={value:?} as a boolean, using default {default}"
                );
                default
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// A builder for [Settings].
#[derive(Debug, Default)]
pub struct Builder {
    values: HashMap<String, String>,
}

impl Builder {
    /// Sets `key` to `value`, replacing any previous value.
    pub fn put<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the [Settings] with the configured values.
    pub fn build(self) -> Settings {
        Settings {
            values: self.values,
        }
    }
}
