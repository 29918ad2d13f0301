// Copyright 2017 Dmytro Milinevskyi <dmilinevskyi@gmail.com>

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![warn(missing_docs)]

//! # Levlog - four-channel leveled logging
//!
//! There are four fixed log levels: `INFO`, `WARN`, `ERROR` and `DEBUG`.
//!
//! Each level is either off or bound to its own sink. By default
//! `INFO` goes to the standard output, `WARN` and `ERROR` go to the standard
//! error and `DEBUG` is off.
//!
//! Every line has the following layout:
//!
//! ```ignore
//! [<project> ][<LEVEL>]: YYYY/MM/DD HH:MM:SS [<file>:<line> ]<message>
//! ```
//!
//! The `<file>:<line>` annotation is enabled per level and reports the code
//! that invoked the logging function or macro.
//!
//! The free functions ([info](fn.info.html), [warn](fn.warn.html), etc.) take a
//! printf-style template, see the [printf](printf/index.html) module for the
//! supported directives.
//!
//! The macros come in two flavours: [info](macro.info.html) and friends use the
//! Rust formatting syntax while [infof](macro.infof.html) and friends use
//! the printf syntax.
//!
//! Disabled levels cost a single atomic load, the message is not formatted.
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! levlog = "0.1"
//! ```
//!
//! # Example
//!
//! ```rust
//! #[macro_use]
//! extern crate levlog;
//! use levlog as ll;
//!
//! fn main() {
//!     ll::init().expect("invalid LEVLOG spec");
//!
//!     ll::set_project_name("demo");
//!     ll::toggle_line_number_printing(false, true, true, true);
//!
//!     ll::info("%s is up on port %d", &["service".into(), 8080.into()]);
//!     warn!("{} retries left", 3);
//!     failf!("%q not found", "config.json");
//!     debug!("I'm invisible");
//! }
//! ```
//!
//! The process-wide registry may be configured from the `LEVLOG` environment
//! variable, see the [spec](spec/index.html) module for the format.
//!
//! Independent [Registry](registry/struct.Registry.html) instances
//! may be created as well.

#[macro_use]
extern crate lazy_static;

#[macro_use]
mod macros;

/// Printf-style formatter.
#[macro_use]
pub mod printf;
#[doc(inline)]
pub use printf::{sprintf, Value};

/// Definition of the log levels.
pub mod levels;
#[doc(inline)]
pub use levels::{LogLevel, LEVELS};

/// Log destinations.
pub mod sinks;
#[doc(inline)]
pub use sinks::Sink;

/// Call-site resolution.
pub mod location;
#[doc(inline)]
pub use location::{CallSite, Locator};

/// Definition of the log record entry.
pub mod record;

/// Logging configuration spec.
pub mod spec;
#[doc(inline)]
pub use spec::{Config, ParseError};

/// The logger core.
pub mod registry;
#[doc(inline)]
pub use registry::Registry;

mod global;
#[doc(inline)]
pub use global::{
    init, configure, registry, reset, ENV_SPEC,
    info, warn, fail, debug,
    set_project_name, toggle_logging, toggle_line_number_printing,
    set_log_writer, filter_source, no_logging,
    toggle_level, toggle_info, toggle_warn, toggle_error, toggle_debug,
};
