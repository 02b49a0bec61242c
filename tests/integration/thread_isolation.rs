//! Integration tests for thread scoping of context stacks

use blame_context::{Context, ContextFrame, ContextSnapshot, Deferred};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Worker(usize);

#[test]
fn test_concurrent_threads_never_see_each_others_frames() {
    const WORKERS: usize = 4;
    const ROUNDS: usize = 200;
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|id| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for round in 0..ROUNDS {
                    let snapshot = ContextSnapshot::from(vec![
                        ContextFrame::new(Worker(id)),
                        ContextFrame::new(round),
                    ]);
                    Context::BLAME.run_with_context(&snapshot, || {
                        let seen = Context::BLAME.current();
                        assert_eq!(seen, snapshot);
                        assert!(seen
                            .iter()
                            .filter_map(|f| f.downcast_ref::<Worker>())
                            .all(|w| *w == Worker(id)));
                        thread::yield_now();
                    });
                }
                Context::BLAME.depth()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
}

#[test]
fn test_new_thread_starts_with_empty_stack() {
    Context::BLAME.act("main thread work", || {
        let depth = thread::spawn(|| Context::BLAME.depth()).join().unwrap();
        assert_eq!(depth, 0);
        assert_eq!(Context::BLAME.depth(), 1);
    });
}

#[test]
fn test_deferred_executed_on_another_thread_replays_there() {
    let deferred = Context::BLAME.act("scheduled on main", || {
        Deferred::capture(|| Context::BLAME.current())
    });

    let chain = thread::spawn(move || {
        let chain = deferred.run();
        assert_eq!(Context::BLAME.depth(), 0);
        chain
    })
    .join()
    .unwrap();

    assert_eq!(chain, ContextSnapshot::from(vec![ContextFrame::from("scheduled on main")]));
}
