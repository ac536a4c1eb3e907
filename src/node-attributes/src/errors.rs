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

use http::StatusCode;

/// Represents an error querying the metadata service.
///
/// The attribute providers never return these errors from
/// `build_attributes()`. They are logged and the provider degrades to "no
/// attribute". Applications diagnosing a missing zone can call
/// [GceNodeAttributes::zone][crate::attributes::GceNodeAttributes::zone] to
/// get the error.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MetadataError {
    /// The request could not be sent, or the response could not be read.
    ///
    /// This includes connection errors, DNS failures, and timeouts.
    #[error("cannot reach the metadata service at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The metadata service returned a non-success status code.
    #[error("the metadata service at {url} returned status {status}, body=<{body}>")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The metadata service returned an empty zone.
    #[error("no zone returned from {url}")]
    EmptyZone { url: String },
}

impl MetadataError {
    pub(crate) fn transport<S: Into<String>>(url: S, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Returns `true` if the request timed out, either while connecting or
    /// while waiting for the response.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    /// Returns `true` if the metadata service responded, but the response
    /// did not contain a zone.
    pub fn is_empty_zone(&self) -> bool {
        matches!(self, Self::EmptyZone { .. })
    }
}
