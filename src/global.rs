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

use std::env;

use levels::LogLevel;
use printf::Value;
use registry::Registry;
use sinks::Sink;
use spec::ParseError;

/// Environment variable holding the logging [spec](spec/index.html).
pub const ENV_SPEC: &'static str = "LEVLOG";

lazy_static! {
    static ref ROOT: Registry = Registry::new();
}

/// The process-wide registry used by the free functions and the macros.
#[inline(always)]
pub fn registry() -> &'static Registry {
    &ROOT
}

/// Applies the spec from the `LEVLOG` environment variable if it's set.
///
/// # Example
///
/// ```rust
/// extern crate levlog;
///
/// fn main() {
///     levlog::init().expect("invalid LEVLOG spec");
///     levlog::info("%s is up", &["service".into()]);
/// }
/// ```
pub fn init() -> Result<(), ParseError> {
    match env::var(ENV_SPEC) {
        Ok(spec) => configure(&spec),
        Err(_) => Ok(()),
    }
}

/// Parses the [spec](spec/index.html) and applies it to the process-wide registry.
pub fn configure(spec: &str) -> Result<(), ParseError> {
    ROOT.configure(spec)
}

/// Restores the default state of the process-wide registry.
pub fn reset() {
    ROOT.reset();
}

/// Sets the project name prepended to every level prefix.
pub fn set_project_name(name: &str) {
    ROOT.set_project_name(name);
}

/// Turns every level on (with its default sink) or off.
pub fn toggle_logging(info: bool, warn: bool, fail: bool, debug: bool) {
    ROOT.toggle_logging(info, warn, fail, debug);
}

/// Enables or disables call-site annotation per level.
pub fn toggle_line_number_printing(info: bool, warn: bool, fail: bool, debug: bool) {
    ROOT.toggle_line_number_printing(info, warn, fail, debug);
}

/// Binds all the active levels to `sink`.
pub fn set_log_writer(sink: Sink) {
    ROOT.set_log_writer(sink);
}

/// Drops annotated logs from the sources which path ends with `suffix`.
pub fn filter_source(suffix: &str) {
    ROOT.filter_source(suffix);
}

/// Disables all the levels.
pub fn no_logging() {
    ROOT.no_logging();
}

/// Turns a level on or off.
pub fn toggle_level(level: LogLevel, on: bool, sink: Option<Sink>) {
    ROOT.toggle_level(level, on, sink);
}

/// Turns `INFO` on or off.
pub fn toggle_info(on: bool, sink: Option<Sink>) {
    ROOT.toggle_info(on, sink);
}

/// Turns `WARN` on or off.
pub fn toggle_warn(on: bool, sink: Option<Sink>) {
    ROOT.toggle_warn(on, sink);
}

/// Turns `ERROR` on or off.
pub fn toggle_error(on: bool, sink: Option<Sink>) {
    ROOT.toggle_error(on, sink);
}

/// Turns `DEBUG` on or off.
pub fn toggle_debug(on: bool, sink: Option<Sink>) {
    ROOT.toggle_debug(on, sink);
}

/// Logs at `INFO` level.
#[track_caller]
pub fn info(msg: &str, args: &[Value]) {
    ROOT.info(msg, args);
}

/// Logs at `WARN` level.
#[track_caller]
pub fn warn(msg: &str, args: &[Value]) {
    ROOT.warn(msg, args);
}

/// Logs at `ERROR` level.
#[track_caller]
pub fn fail(msg: &str, args: &[Value]) {
    ROOT.fail(msg, args);
}

/// Logs at `DEBUG` level.
#[track_caller]
pub fn debug(msg: &str, args: &[Value]) {
    ROOT.debug(msg, args);
}

#[cfg(test)]
mod tests {
    extern crate parking_lot;
    use self::parking_lot::Mutex;

    use super::*;

    use std::env;

    use levels::LEVELS;
    use location::CallSite;
    use sinks::buffer::Buffer;

    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }

    // NOTE: the tests share the process-wide registry and must not run in //
    fn run_test<T>(test: T) where T: FnOnce(Buffer) {
        let _lock = LOCK.lock();
        reset();
        let out = Buffer::new();
        set_log_writer(Sink::new(out.clone()));
        test(out);
        reset();
    }

    fn strip_ts(line: &str, prefix: &str) -> String {
        assert!(line.starts_with(prefix), "{:?}", line);
        line[prefix.len() + 20..].to_string()
    }

    #[test]
    fn test_global_defaults() {
        let _lock = LOCK.lock();
        reset();
        assert!(registry().sink(LogLevel::INFO).unwrap().same(&Sink::stdout()));
        assert!(registry().sink(LogLevel::ERROR).unwrap().same(&Sink::stderr()));
        assert!(!registry().is_enabled(LogLevel::DEBUG));
    }

    #[test]
    fn test_global_info() {
        run_test(|out| {
            info("build %s ok", &["v1".into()]);
            assert_eq!(strip_ts(&out.contents(), " [INFO]: "), "build v1 ok\n");
        });
    }

    #[test]
    fn test_global_debug() {
        run_test(|out| {
            toggle_debug(true, None);
            assert!(registry().sink(LogLevel::DEBUG).unwrap().same(&Sink::stdout()));
            toggle_debug(true, Some(Sink::new(out.clone())));
            debug("x=%d", &[5.into()]);
            assert_eq!(strip_ts(&out.contents(), " [DEBUG]: "), "x=5\n");
        });
    }

    #[test]
    fn test_global_no_logging() {
        run_test(|out| {
            toggle_debug(true, Some(Sink::new(out.clone())));
            no_logging();
            info("i", &[]);
            warn("w", &[]);
            fail("e", &[]);
            debug("d", &[]);
            info!("i");
            warn!("w");
            error!("e");
            debug!("d");
            infof!("%s", "i");
            assert!(out.is_empty());
            for level in LEVELS.iter() {
                assert!(!registry().is_enabled(*level));
            }
        });
    }

    #[test]
    fn test_global_line_numbers() {
        run_test(|out| {
            toggle_line_number_printing(true, false, false, false);

            let line = line!() + 1;
            info("hi", &[]);
            assert_eq!(strip_ts(&out.contents(), " [INFO]: "), format!("{} hi\n", CallSite::new(file!(), line)));

            out.clear();
            let line = line!() + 1;
            info!("{} {}", "hi", 2);
            assert_eq!(strip_ts(&out.contents(), " [INFO]: "), format!("{}:{} hi 2\n", file!(), line));

            out.clear();
            let line = line!() + 1;
            infof!("%s %d", "hi", 3);
            assert_eq!(strip_ts(&out.contents(), " [INFO]: "), format!("{}:{} hi 3\n", file!(), line));
        });
    }

    #[test]
    fn test_global_filter_source() {
        run_test(|out| {
            toggle_line_number_printing(true, false, false, false);
            filter_source("global.rs");
            info("hi", &[]);
            info!("hi");
            assert!(out.is_empty());

            warn("not annotated", &[]);
            assert_eq!(strip_ts(&out.contents(), " [WARN]: "), "not annotated\n");
        });
    }

    #[test]
    fn test_global_project_name() {
        run_test(|out| {
            set_project_name("svc");
            set_project_name("svc");
            toggle_warn(false, None);
            warn!("hidden");
            error!("code {}", 42);
            failf!("code %d", 43);
            let contents = out.contents();
            let lines: Vec<_> = contents.lines().collect();
            assert_eq!(lines.len(), 2);
            assert_eq!(strip_ts(lines[0], "svc [ERROR]: "), "code 42");
            assert_eq!(strip_ts(lines[1], "svc [ERROR]: "), "code 43");
        });
    }

    #[test]
    fn test_global_toggle() {
        run_test(|out| {
            toggle_logging(false, false, false, false);
            toggle_level(LogLevel::WARN, true, Some(Sink::new(out.clone())));
            toggle_info(true, None);
            toggle_error(false, None);
            assert!(registry().is_enabled(LogLevel::INFO));
            assert!(registry().is_enabled(LogLevel::WARN));
            assert!(!registry().is_enabled(LogLevel::ERROR));
            warnf!("w%d", 1);
            warn!("w{}", 2);
            assert_eq!(out.contents().lines().count(), 2);
        });
    }

    #[test]
    fn test_global_init() {
        run_test(|_| {
            env::set_var(ENV_SPEC, "project=env,debug:lines");
            let result = init();
            env::remove_var(ENV_SPEC);
            assert_eq!(result, Ok(()));
            assert_eq!(registry().project_name(), "env");
            assert!(registry().is_enabled(LogLevel::DEBUG));
            assert!(!registry().is_enabled(LogLevel::INFO));
            assert!(registry().line_numbers(LogLevel::DEBUG));

            assert_eq!(init(), Ok(()));
            assert_eq!(configure("debug:"), Err(ParseError::Spec));
        });
    }
}
