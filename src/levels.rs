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

use std::fmt;
use std::str::FromStr;

use sinks::Sink;

/// Log levels, each one backed by its own logger slot.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum LogLevel {
    /// Informational messages, stdout by default.
    INFO,
    /// Warnings, stderr by default.
    WARN,
    /// Failures, stderr by default.
    ERROR,
    /// Debug messages, disabled by default.
    DEBUG,
}

/// All the levels in slot order.
pub const LEVELS: [LogLevel; 4] = [
    LogLevel::INFO,
    LogLevel::WARN,
    LogLevel::ERROR,
    LogLevel::DEBUG,
];

impl LogLevel {
    /// Position of the level's slot.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            LogLevel::INFO => 0,
            LogLevel::WARN => 1,
            LogLevel::ERROR => 2,
            LogLevel::DEBUG => 3,
        }
    }

    #[inline(always)]
    #[doc(hidden)]
    pub fn mask(self) -> usize {
        1 << self.index()
    }

    /// The sink a level is bound to when it's turned on without an explicit one.
    pub fn default_sink(self) -> Sink {
        match self {
            LogLevel::INFO | LogLevel::DEBUG => Sink::stdout(),
            LogLevel::WARN | LogLevel::ERROR => Sink::stderr(),
        }
    }

    /// Whether the level is active in a freshly created registry.
    pub fn active_by_default(self) -> bool {
        self != LogLevel::DEBUG
    }
}

impl fmt::Display for LogLevel {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LogLevel::INFO => write!(f, "INFO"),
            LogLevel::WARN => write!(f, "WARN"),
            LogLevel::ERROR => write!(f, "ERROR"),
            LogLevel::DEBUG => write!(f, "DEBUG"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(level: &str) -> Result<LogLevel, ()> {
        match level.trim().to_lowercase().as_str() {
            "info" => Ok(LogLevel::INFO),
            "warn" | "warning" => Ok(LogLevel::WARN),
            "error" | "fail" => Ok(LogLevel::ERROR),
            "debug" => Ok(LogLevel::DEBUG),
            _ => Err(()),
        }
    }
}
