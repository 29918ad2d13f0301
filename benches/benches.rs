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

#[macro_use]
extern crate bencher;

#[macro_use]
extern crate levlog;

mod llb {
    use bencher::Bencher;
    use levlog as ll;

    use std::io;
    use std::thread;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    const THREADS_QTY: usize = 4;
    const FILTERS_QTY: usize = 10;

    struct LThreads {
        threads: Vec<thread::JoinHandle<()>>,
        stop: Arc<AtomicBool>,
    }

    impl LThreads {
        fn new(f: Arc<dyn Fn() + Sync + Send>) -> Self {
            let mut threads = Vec::new();
            let stop = Arc::new(AtomicBool::new(false));
            for _ in 0..THREADS_QTY {
                let stop = stop.clone();
                let f = f.clone();
                threads.push(thread::spawn(move || {
                    while !stop.load(Ordering::Acquire) {
                        thread::yield_now();
                        f();
                    }
                }));
            }
            LThreads {
                threads: threads,
                stop: stop,
            }
        }

        fn join(&mut self) {
            self.stop.store(true, Ordering::Release);
            for t in self.threads.drain(..) {
                t.join().unwrap();
            }
        }
    }

    impl Drop for LThreads {
        fn drop(&mut self) {
            self.join();
        }
    }

    macro_rules! jail {
        ($b:ident, $body:expr) => {
            reset();
            $b.iter(|| { $body; });
        };
        ($b:ident, $pre:expr, $body:expr) => {
            reset();
            $pre;
            $b.iter(|| { $body; });
        };
    }

    macro_rules! tjail {
        ($b:ident, $body:expr) => {
            reset();
            let t = LThreads::new(Arc::new(|| { $body; }));
            $b.iter(|| { $body; });
            drop(t);
        };
        ($b:ident, $pre:expr, $body:expr) => {
            reset();
            $pre;
            let t = LThreads::new(Arc::new(|| { $body; }));
            $b.iter(|| { $body; });
            drop(t);
        };
    }

    macro_rules! doutput {
        () => { debug!("{:?} -> {}", thread::current().id(), "test") }
    }

    macro_rules! ioutput {
        () => { info!("{:?} -> {}", thread::current().id(), "test") }
    }

    macro_rules! foutput {
        () => { ll::info("%v -> %s", &[ll::Value::display(&42), "test".into()]) }
    }

    fn reset() {
        ll::reset();
    }

    fn drop_output() {
        ll::set_log_writer(ll::Sink::new(io::sink()));
    }

    fn annotate_and_filter() {
        ll::toggle_line_number_printing(true, true, true, true);
        for idx in 0..FILTERS_QTY {
            ll::filter_source(&format!("foo/bar/qux{}.rs", idx));
        }
    }

    // No output, single thread
    fn bench_no_output_single_thread(b: &mut Bencher) {
        jail!(
            b,
            doutput!()
        );
    }

    fn bench_no_output_printf_single_thread(b: &mut Bencher) {
        jail!(
            b,
            ll::debug("%d -> %s", &[42.into(), "test".into()])
        );
    }

    // No output, multi thread
    fn bench_no_output_multi_thread(b: &mut Bencher) {
        tjail!(
            b,
            doutput!()
        );
    }

    // Drop output, single thread
    fn bench_output_drop_single_thread(b: &mut Bencher) {
        jail!(
            b,
            drop_output(),
            ioutput!()
        );
    }

    fn bench_output_drop_printf_single_thread(b: &mut Bencher) {
        jail!(
            b,
            drop_output(),
            foutput!()
        );
    }

    fn bench_output_drop_annotated_single_thread(b: &mut Bencher) {
        jail!(
            b,
            {
                drop_output();
                annotate_and_filter();
            },
            ioutput!()
        );
    }

    // Drop output, multi thread
    fn bench_output_drop_multi_thread(b: &mut Bencher) {
        tjail!(
            b,
            drop_output(),
            ioutput!()
        );
    }

    fn bench_output_drop_annotated_multi_thread(b: &mut Bencher) {
        tjail!(
            b,
            {
                drop_output();
                annotate_and_filter();
            },
            ioutput!()
        );
    }

    fn bench_stub(_: &mut Bencher) {
    }

    benchmark_group!(
        benches,

        bench_no_output_single_thread,
        bench_no_output_printf_single_thread,

        bench_output_drop_single_thread,
        bench_output_drop_printf_single_thread,
        bench_output_drop_annotated_single_thread,

        bench_no_output_multi_thread,

        bench_output_drop_multi_thread,
        bench_output_drop_annotated_multi_thread,

        bench_stub
    );
}
benchmark_main!(llb::benches);
