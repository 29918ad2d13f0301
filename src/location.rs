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
use std::panic::Location;

/// Source position of a log call.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CallSite {
    /// Path to the source file.
    pub file: &'static str,
    /// Line number.
    pub line: u32,
}

impl CallSite {
    /// Creates a call site.
    pub fn new(file: &'static str, line: u32) -> Self {
        CallSite {
            file: file,
            line: line,
        }
    }
}

impl<'a> From<&'a Location<'static>> for CallSite {
    #[inline]
    fn from(location: &'a Location<'static>) -> CallSite {
        CallSite::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves the call site reported in annotated log lines.
///
/// The emission functions are `#[track_caller]`, so `caller` is the
/// location of the code that invoked them (or the log macro).
///
/// Any `Fn(&'static Location<'static>) -> CallSite` is a locator.
pub trait Locator: Send + Sync {
    /// Maps the direct caller location into the reported call site.
    fn locate(&self, caller: &'static Location<'static>) -> CallSite;
}

impl<F> Locator for F where F: Fn(&'static Location<'static>) -> CallSite + Send + Sync {
    #[inline]
    fn locate(&self, caller: &'static Location<'static>) -> CallSite {
        self(caller)
    }
}

/// Reports the direct caller as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct Caller;

impl Locator for Caller {
    #[inline(always)]
    fn locate(&self, caller: &'static Location<'static>) -> CallSite {
        caller.into()
    }
}

/// Reports the same call site for every log call.
#[derive(Clone, Copy, Debug)]
pub struct Fixed(pub CallSite);

impl Fixed {
    /// Creates a locator that always reports `file:line`.
    pub fn new(file: &'static str, line: u32) -> Self {
        Fixed(CallSite::new(file, line))
    }
}

impl Locator for Fixed {
    fn locate(&self, _: &'static Location<'static>) -> CallSite {
        self.0
    }
}
