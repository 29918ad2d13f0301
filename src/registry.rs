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

extern crate parking_lot;
use self::parking_lot::RwLock;

use std::fmt;
use std::fmt::Write;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};

use levels::{LogLevel, LEVELS};
use location::{Caller, Locator};
use printf::{self, Value};
use record::Record;
use sinks::Sink;
use spec::{self, Config, ParseError};

struct Slot {
    prefix: String,
    sink: Option<Sink>,
    lines: bool,
}

struct State {
    project: String,
    slots: [Slot; 4],
    filters: Vec<String>,
}

#[inline]
fn prefix(project: &str, level: LogLevel) -> String {
    format!("{} [{}]: ", project, level)
}

impl State {
    fn new() -> Self {
        let slot = |level: LogLevel| Slot {
            prefix: prefix("", level),
            sink: if level.active_by_default() { Some(level.default_sink()) } else { None },
            lines: false,
        };
        State {
            project: String::new(),
            slots: [
                slot(LogLevel::INFO),
                slot(LogLevel::WARN),
                slot(LogLevel::ERROR),
                slot(LogLevel::DEBUG),
            ],
            filters: Vec::new(),
        }
    }

    fn mask(&self) -> usize {
        LEVELS.iter()
            .filter(|level| self.slots[level.index()].sink.is_some())
            .fold(0, |mask, level| mask | level.mask())
    }

    fn set_project(&mut self, name: &str) {
        self.project = name.to_string();
        for level in LEVELS.iter() {
            self.slots[level.index()].prefix = prefix(name, *level);
        }
    }

    fn toggle(&mut self, level: LogLevel, on: bool, sink: Option<Sink>) {
        self.slots[level.index()].sink = if on {
            Some(sink.unwrap_or_else(|| level.default_sink()))
        } else {
            None
        };
    }

    fn filtered(&self, file: &str) -> bool {
        self.filters.iter().any(|suffix| file.ends_with(suffix.as_str()))
    }
}

/// Set of the four level slots.
///
/// Each level is either active, i.e. bound to a [Sink](../sinks/struct.Sink.html),
/// or disabled, in which case its logs are dropped.
///
/// A fresh registry has `INFO` bound to stdout, `WARN` and `ERROR` bound
/// to stderr, `DEBUG` disabled, an empty project name and no line annotation.
///
/// All the methods take `&self` so a registry may be shared between threads.
///
/// # Example
///
/// ```rust
/// extern crate levlog;
/// use levlog::{Registry, LogLevel, Sink};
/// use levlog::sinks::buffer::Buffer;
///
/// fn main() {
///     let out = Buffer::new();
///     let registry = Registry::new();
///     registry.set_project_name("demo");
///     registry.set_log_writer(Sink::new(out.clone()));
///
///     registry.info("build %s ok", &["v1".into()]);
///     registry.debug("invisible", &[]);
///
///     assert!(out.contents().starts_with("demo [INFO]: "));
///     assert!(out.contents().ends_with(" build v1 ok\n"));
///     assert!(!registry.is_enabled(LogLevel::DEBUG));
/// }
/// ```
pub struct Registry {
    state: RwLock<State>,
    active: AtomicUsize,
    locator: Box<dyn Locator>,
}

impl Registry {
    /// Creates a registry in the default state.
    pub fn new() -> Self {
        Self::with_locator(Caller)
    }

    /// Creates a registry that resolves the annotated call sites with `locator`.
    pub fn with_locator<L>(locator: L) -> Self where L: Locator + 'static {
        let state = State::new();
        Registry {
            active: AtomicUsize::new(state.mask()),
            state: RwLock::new(state),
            locator: Box::new(locator),
        }
    }

    fn update<F>(&self, f: F) where F: FnOnce(&mut State) {
        let mut state = self.state.write();
        f(&mut state);
        self.active.store(state.mask(), Ordering::Release);
    }

    /// Restores the default state.
    pub fn reset(&self) {
        self.update(|state| *state = State::new());
    }

    /// Sets the project name and recomputes the prefixes of all the levels.
    ///
    /// The prefix of a level is `"<name> [<LEVEL>]: "`.
    pub fn set_project_name(&self, name: &str) {
        self.update(|state| state.set_project(name));
    }

    /// Turns a level on or off.
    ///
    /// When turned on the level is bound to `sink` or to the
    /// level's [default](../levels/enum.LogLevel.html#method.default_sink) sink.
    pub fn toggle_level(&self, level: LogLevel, on: bool, sink: Option<Sink>) {
        self.update(|state| state.toggle(level, on, sink));
    }

    /// Turns `INFO` on or off.
    pub fn toggle_info(&self, on: bool, sink: Option<Sink>) {
        self.toggle_level(LogLevel::INFO, on, sink);
    }

    /// Turns `WARN` on or off.
    pub fn toggle_warn(&self, on: bool, sink: Option<Sink>) {
        self.toggle_level(LogLevel::WARN, on, sink);
    }

    /// Turns `ERROR` on or off.
    pub fn toggle_error(&self, on: bool, sink: Option<Sink>) {
        self.toggle_level(LogLevel::ERROR, on, sink);
    }

    /// Turns `DEBUG` on or off.
    pub fn toggle_debug(&self, on: bool, sink: Option<Sink>) {
        self.toggle_level(LogLevel::DEBUG, on, sink);
    }

    /// Turns every level on or off, the levels turned on use their default sinks.
    pub fn toggle_logging(&self, info: bool, warn: bool, fail: bool, debug: bool) {
        self.update(|state| {
            for (level, on) in LEVELS.iter().zip([info, warn, fail, debug].iter()) {
                state.toggle(*level, *on, None);
            }
        });
    }

    /// Binds all the active levels to `sink`, disabled levels stay disabled.
    pub fn set_log_writer(&self, sink: Sink) {
        self.update(|state| {
            for slot in state.slots.iter_mut().filter(|slot| slot.sink.is_some()) {
                slot.sink = Some(sink.clone());
            }
        });
    }

    /// Enables or disables call-site annotation per level.
    pub fn toggle_line_number_printing(&self, info: bool, warn: bool, fail: bool, debug: bool) {
        self.update(|state| {
            for (level, on) in LEVELS.iter().zip([info, warn, fail, debug].iter()) {
                state.slots[level.index()].lines = *on;
            }
        });
    }

    /// Drops annotated logs coming from the sources which path ends with `suffix`.
    pub fn filter_source(&self, suffix: &str) {
        self.update(|state| state.filters.push(suffix.to_string()));
    }

    /// Disables all the levels.
    pub fn no_logging(&self) {
        self.update(|state| {
            for slot in state.slots.iter_mut() {
                slot.sink = None;
            }
        });
    }

    /// Applies parsed [configuration](../spec/struct.Config.html).
    pub fn apply(&self, config: &Config) {
        self.update(|state| {
            if let Some(ref project) = config.project {
                state.set_project(project);
            }
            if let Some(levels) = config.levels {
                for level in LEVELS.iter() {
                    state.toggle(*level, levels[level.index()], None);
                }
            }
            if let Some(lines) = config.lines {
                for level in LEVELS.iter() {
                    state.slots[level.index()].lines = lines[level.index()];
                }
            }
            state.filters.extend(config.filters.iter().cloned());
        });
    }

    /// Parses the [spec](../spec/index.html) and applies it.
    ///
    /// The registry is left untouched if the spec is invalid.
    pub fn configure(&self, spec: &str) -> Result<(), ParseError> {
        let config = spec::parse(spec)?;
        self.apply(&config);
        Ok(())
    }

    /// Checks whether the level is active.
    #[inline(always)]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.active.load(Ordering::Acquire) & level.mask() != 0
    }

    /// Current prefix of the level.
    pub fn prefix(&self, level: LogLevel) -> String {
        self.state.read().slots[level.index()].prefix.clone()
    }

    /// Sink the level is bound to.
    pub fn sink(&self, level: LogLevel) -> Option<Sink> {
        self.state.read().slots[level.index()].sink.clone()
    }

    /// Checks whether the logs of the level are annotated with the call site.
    pub fn line_numbers(&self, level: LogLevel) -> bool {
        self.state.read().slots[level.index()].lines
    }

    /// Current project name.
    pub fn project_name(&self) -> String {
        self.state.read().project.clone()
    }

    /// Filtered source suffixes in the order they were added.
    pub fn filters(&self) -> Vec<String> {
        self.state.read().filters.clone()
    }

    // Formats and writes the line unless the level is disabled
    // or the call site is filtered out. The message is rendered
    // after the state lock is released since it may run user code.
    fn emit<F>(&self, level: LogLevel, caller: &'static Location<'static>, message: F)
        where F: FnOnce(&mut String)
    {
        let (prefix, sink, site) = {
            let state = self.state.read();
            let slot = &state.slots[level.index()];
            let sink = match slot.sink {
                Some(ref sink) => sink.clone(),
                None => return,
            };
            let site = if slot.lines {
                let site = self.locator.locate(caller);
                if state.filtered(site.file) {
                    return;
                }
                Some(site)
            } else {
                None
            };
            (slot.prefix.clone(), sink, site)
        };
        let line = Record::new(site).render(&prefix, message);
        sink.emit(line.as_bytes());
    }

    /// Logs a message formatted by the Rust formatting machinery.
    ///
    /// This is what the [info](../macro.info.html) family of macros expands to.
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments) {
        if self.is_enabled(level) {
            self.emit(level, Location::caller(), |line| {
                let _ = line.write_fmt(args);
            });
        }
    }

    /// Logs a message formatted by the [printf](../printf/index.html) formatter.
    #[track_caller]
    pub fn logf(&self, level: LogLevel, msg: &str, args: &[Value]) {
        if !self.is_enabled(level) {
            return;
        }
        #[cfg(feature = "strict-args")]
        debug_assert_eq!(printf::count_directives(msg), args.len(),
                         "argument count mismatch for {:?}", msg);
        self.emit(level, Location::caller(), |line| printf::format_into(line, msg, args));
    }

    /// Logs at `INFO` level.
    #[track_caller]
    pub fn info(&self, msg: &str, args: &[Value]) {
        self.logf(LogLevel::INFO, msg, args);
    }

    /// Logs at `WARN` level.
    #[track_caller]
    pub fn warn(&self, msg: &str, args: &[Value]) {
        self.logf(LogLevel::WARN, msg, args);
    }

    /// Logs at `ERROR` level.
    #[track_caller]
    pub fn fail(&self, msg: &str, args: &[Value]) {
        self.logf(LogLevel::ERROR, msg, args);
    }

    /// Logs at `DEBUG` level.
    #[track_caller]
    pub fn debug(&self, msg: &str, args: &[Value]) {
        self.logf(LogLevel::DEBUG, msg, args);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Registry")
            .field("project", &state.project)
            .field("active", &self.active.load(Ordering::Relaxed))
            .field("filters", &state.filters)
            .finish()
    }
}
