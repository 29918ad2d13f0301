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

/// The main log entry for the Rust formatting syntax.
///
/// Emits a log record for the given [level](levels/enum.LogLevel.html)
/// if the level is active.
///
/// The message is formatted only if it's going to be emitted.
///
/// By default the process-wide [registry](fn.registry.html) is used,
/// another one may be given with the `in <registry>;` form.
///
/// If line annotation is enabled for the level the location of the macro
/// invocation is reported.
///
/// # Example
///
/// ```rust
/// #[macro_use]
/// extern crate levlog;
/// use levlog as ll;
///
/// use levlog::sinks::buffer::Buffer;
///
/// fn main() {
///     let out = Buffer::new();
///     let registry = ll::Registry::new();
///     registry.set_log_writer(ll::Sink::new(out.clone()));
///
///     log!(in registry; ll::LogLevel::WARN => ">{}<", "levlog");
///     log!(in registry; ll::LogLevel::DEBUG => "I'm invisible");
///
///     assert!(out.contents().ends_with(" >levlog<\n"));
///
///     log!(ll::LogLevel::INFO => "to stdout");
/// }
/// ```
#[macro_export]
macro_rules! log {
    (in $registry:expr; $level:expr => $($arg:tt)+) => {{
        $registry.log($level, format_args!($($arg)+))
    }};

    ($level:expr => $($arg:tt)+) => {{
        $crate::registry().log($level, format_args!($($arg)+))
    }};
}

/// Produces log record for the `info` level.
///
/// See the [log](macro.log.html) macro for the details.
#[macro_export]
macro_rules! info {
    (in $registry:expr; $($arg:tt)+) => {
        log!(in $registry; $crate::LogLevel::INFO => $($arg)+)
    };
    ($($arg:tt)+) => {
        log!($crate::LogLevel::INFO => $($arg)+)
    };
}

/// Produces log record for the `warn` level.
///
/// See the [log](macro.log.html) macro for the details.
#[macro_export]
macro_rules! warn {
    (in $registry:expr; $($arg:tt)+) => {
        log!(in $registry; $crate::LogLevel::WARN => $($arg)+)
    };
    ($($arg:tt)+) => {
        log!($crate::LogLevel::WARN => $($arg)+)
    };
}

/// Produces log record for the `error` level.
///
/// See the [log](macro.log.html) macro for the details.
#[macro_export]
macro_rules! error {
    (in $registry:expr; $($arg:tt)+) => {
        log!(in $registry; $crate::LogLevel::ERROR => $($arg)+)
    };
    ($($arg:tt)+) => {
        log!($crate::LogLevel::ERROR => $($arg)+)
    };
}

/// Produces log record for the `debug` level.
///
/// See the [log](macro.log.html) macro for the details.
#[macro_export]
macro_rules! debug {
    (in $registry:expr; $($arg:tt)+) => {
        log!(in $registry; $crate::LogLevel::DEBUG => $($arg)+)
    };
    ($($arg:tt)+) => {
        log!($crate::LogLevel::DEBUG => $($arg)+)
    };
}

/// The main log entry for the printf syntax.
///
/// The arguments are converted into [Value](printf/enum.Value.html)s
/// and formatted by the [printf](printf/index.html) formatter.
///
/// # Example
///
/// ```rust
/// #[macro_use]
/// extern crate levlog;
/// use levlog as ll;
///
/// use levlog::sinks::buffer::Buffer;
///
/// fn main() {
///     let out = Buffer::new();
///     let registry = ll::Registry::new();
///     registry.set_log_writer(ll::Sink::new(out.clone()));
///
///     logf!(in registry; ll::LogLevel::ERROR => "%s failed after %d attempts", "job", 3);
///
///     assert!(out.contents().ends_with(" job failed after 3 attempts\n"));
/// }
/// ```
#[macro_export]
macro_rules! logf {
    (in $registry:expr; $level:expr => $template:expr) => {{
        $registry.logf($level, $template, &[])
    }};

    (in $registry:expr; $level:expr => $template:expr, $($arg:expr),+ $(,)*) => {{
        $registry.logf($level, $template, &[$($crate::printf::Value::from($arg)),+])
    }};

    ($level:expr => $($arg:tt)+) => {
        logf!(in $crate::registry(); $level => $($arg)+)
    };
}

/// Produces printf-style log record for the `info` level.
///
/// See the [logf](macro.logf.html) macro for the details.
#[macro_export]
macro_rules! infof {
    (in $registry:expr; $($arg:tt)+) => {
        logf!(in $registry; $crate::LogLevel::INFO => $($arg)+)
    };
    ($($arg:tt)+) => {
        logf!($crate::LogLevel::INFO => $($arg)+)
    };
}

/// Produces printf-style log record for the `warn` level.
///
/// See the [logf](macro.logf.html) macro for the details.
#[macro_export]
macro_rules! warnf {
    (in $registry:expr; $($arg:tt)+) => {
        logf!(in $registry; $crate::LogLevel::WARN => $($arg)+)
    };
    ($($arg:tt)+) => {
        logf!($crate::LogLevel::WARN => $($arg)+)
    };
}

/// Produces printf-style log record for the `error` level.
///
/// See the [logf](macro.logf.html) macro for the details.
#[macro_export]
macro_rules! failf {
    (in $registry:expr; $($arg:tt)+) => {
        logf!(in $registry; $crate::LogLevel::ERROR => $($arg)+)
    };
    ($($arg:tt)+) => {
        logf!($crate::LogLevel::ERROR => $($arg)+)
    };
}

/// Produces printf-style log record for the `debug` level.
///
/// See the [logf](macro.logf.html) macro for the details.
#[macro_export]
macro_rules! debugf {
    (in $registry:expr; $($arg:tt)+) => {
        logf!(in $registry; $crate::LogLevel::DEBUG => $($arg)+)
    };
    ($($arg:tt)+) => {
        logf!($crate::LogLevel::DEBUG => $($arg)+)
    };
}
