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

extern crate chrono;
use self::chrono::prelude::*;

extern crate time;

use std::fmt::Write;

use location::CallSite;

const PREALLOC: usize = 128;

/// Layout of the date and time in the log line.
pub const TS_FORMAT: &'static str = "%Y/%m/%d %H:%M:%S";

/// A single log emission.
#[derive(Clone, Copy, Debug)]
pub struct Record {
    /// Call site, present if line annotation is on for the level.
    pub site: Option<CallSite>,
    /// Timestamp.
    pub ts: time::Timespec,
}

impl Record {
    /// Creates a record stamped with the current time.
    #[inline(always)]
    pub fn new(site: Option<CallSite>) -> Self {
        Record::with_ts(site, time::get_time())
    }

    /// Creates a record with the given timestamp.
    pub fn with_ts(site: Option<CallSite>, ts: time::Timespec) -> Self {
        Record {
            site: site,
            ts: ts,
        }
    }

    /// Returns timestamp in the local timezone.
    pub fn ts_local(&self) -> DateTime<Local> {
        match DateTime::from_timestamp(self.ts.sec, self.ts.nsec as u32) {
            Some(ts) => ts.with_timezone(&Local),
            None => Local::now(),
        }
    }

    /// Renders the log line.
    ///
    /// The layout is `<prefix><date> <time> [<file>:<line> ]<message>`,
    /// terminated by a newline unless the message already ends with one.
    pub fn render<F>(&self, prefix: &str, message: F) -> String where F: FnOnce(&mut String) {
        let mut line = String::with_capacity(PREALLOC);
        line.push_str(prefix);
        let _ = write!(line, "{} ", self.ts_local().format(TS_FORMAT));
        if let Some(ref site) = self.site {
            let _ = write!(line, "{} ", site);
        }
        message(&mut line);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}
