// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for flowmap tools (session, config, prefs).
//! Keeps front ends thin and framework-agnostic.

pub mod config;
pub mod config_port;
pub mod prefs;
pub mod render_port;
pub mod session;

pub use session::EditorSession;
