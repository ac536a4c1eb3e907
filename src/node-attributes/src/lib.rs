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

//! Google Cloud Client Libraries for Rust - Compute Engine Node Attributes
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases. We welcome feedback about the
//! APIs, documentation, missing features, bugs, etc.
//!
//! Clustered applications running on [Google Compute Engine (GCE)][gce-link]
//! often spread replicas across [zones] to survive the loss of a single data
//! center. This crate discovers the zone of the current VM using the
//! [Metadata Service] and exposes it as a custom node attribute
//! (`gce_zone`), ready to be attached to the node by a clustering
//! subsystem.
//!
//! Zone discovery is best-effort: a missing or unreachable metadata service
//! never produces an error, it produces no attribute.
//!
//! The lookup is `async` and must run inside a [tokio] runtime.
//!
//! ```no_run
//! # use google_cloud_node_attributes::attributes::GceNodeAttributes;
//! # use google_cloud_node_attributes::settings::Settings;
//! # async fn sample() {
//! let provider = GceNodeAttributes::new(Settings::from_env());
//! if let Some(attributes) = provider.build_attributes().await {
//!     for (name, value) in &attributes {
//!         println!("{name} = {value}");
//!     }
//! }
//! # }
//! ```
//!
//! [gce-link]: https://cloud.google.com/products/compute
//! [Metadata Service]: https://cloud.google.com/compute/docs/metadata/overview
//! [tokio]: https://docs.rs/tokio
//! [zones]: https://cloud.google.com/compute/docs/regions-zones

/// Custom node attributes backed by the metadata service.
pub mod attributes;

/// Errors returned by the metadata service client.
pub mod errors;

/// Key/value settings consulted by the attribute providers.
pub mod settings;

pub(crate) mod mds;

/// A `Result` alias where the `Err` case is
/// `google_cloud_node_attributes::errors::MetadataError`.
pub(crate) type Result<T> = std::result::Result<T, crate::errors::MetadataError>;
