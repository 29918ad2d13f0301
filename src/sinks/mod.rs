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
use self::parking_lot::Mutex;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

lazy_static! {
    static ref STDOUT: Sink = Sink::new(io::stdout());
    static ref STDERR: Sink = Sink::new(io::stderr());
}

/// Shared log destination.
///
/// A sink wraps any `io::Write` behind a lock so that each log line
/// lands in one piece even if several levels (or threads) share it.
///
/// Cloning a sink yields another handle to the same destination.
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Wraps a writer into a sink.
    pub fn new<W>(writer: W) -> Self where W: Write + Send + 'static {
        Sink {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// The process-wide standard output sink.
    pub fn stdout() -> Self {
        STDOUT.clone()
    }

    /// The process-wide standard error sink.
    pub fn stderr() -> Self {
        STDERR.clone()
    }

    /// Checks whether both handles refer to the same destination.
    #[inline]
    pub fn same(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    /// Pushes a complete log line into the destination.
    ///
    /// Write failures are dropped: logging never reports back to the caller.
    pub fn emit(&self, line: &[u8]) {
        let mut writer = self.writer.lock();
        let _ = writer.write_all(line);
        let _ = writer.flush();
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.same(&STDOUT) {
            write!(f, "Sink(stdout)")
        } else if self.same(&STDERR) {
            write!(f, "Sink(stderr)")
        } else {
            write!(f, "Sink({:p})", Arc::as_ptr(&self.writer))
        }
    }
}

/// In-memory sink.
pub mod buffer;
/// File sink.
pub mod file;

#[cfg(test)]
mod tests {
    use super::*;
    use super::buffer::Buffer;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct Broken(Arc<AtomicUsize>);

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    #[test]
    fn test_sink_identity() {
        assert!(Sink::stdout().same(&Sink::stdout()));
        assert!(Sink::stderr().same(&Sink::stderr()));
        assert!(!Sink::stdout().same(&Sink::stderr()));

        let buf = Buffer::new();
        let sink = Sink::new(buf.clone());
        assert!(sink.same(&sink.clone()));
        assert!(!sink.same(&Sink::new(buf)));

        assert_eq!(format!("{:?}", Sink::stdout()), "Sink(stdout)");
        assert_eq!(format!("{:?}", Sink::stderr()), "Sink(stderr)");
    }

    #[test]
    fn test_sink_broken() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let sink = Sink::new(Broken(attempts.clone()));
        sink.emit(b"lost\n");
        sink.clone().emit(b"lost again\n");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_sink_whole_lines() {
        let buf = Buffer::new();
        let sink = Sink::new(buf.clone());
        let line = format!("{}\n", "x".repeat(512));

        let mut threads = Vec::new();
        for _ in 0..8 {
            let sink = sink.clone();
            let line = line.clone();
            threads.push(thread::spawn(move || {
                for _ in 0..50 {
                    sink.emit(line.as_bytes());
                }
            }));
        }
        for th in threads {
            th.join().unwrap();
        }

        let contents = buf.contents();
        assert_eq!(contents.lines().count(), 400);
        assert!(contents.lines().all(|l| l.len() == 512));
    }
}
