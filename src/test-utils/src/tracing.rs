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

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Prints the tracing events of the current thread to the test output.
///
/// The filter is read from `RUST_LOG`. Without it, only warnings and errors
/// are shown, or all events at `DEBUG` and above with the
/// `log-integration-tests` feature.
pub fn enable_tracing() -> ::tracing::subscriber::DefaultGuard {
    #[cfg(feature = "log-integration-tests")]
    let default_directive = LevelFilter::DEBUG.into();
    #[cfg(not(feature = "log-integration-tests"))]
    let default_directive = LevelFilter::WARN.into();
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_test_writer()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
