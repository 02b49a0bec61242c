//! Property-based tests for stack balance and nesting order

use blame_context::{Context, ContextFrame, ContextSnapshot};
use proptest::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(Debug, Clone)]
struct Level {
    frames: Vec<u16>,
    faults: bool,
}

fn level() -> impl Strategy<Value = Level> {
    (prop::collection::vec(any::<u16>(), 0..4), any::<bool>())
        .prop_map(|(frames, faults)| Level { frames, faults })
}

fn snapshot_of(frames: &[u16]) -> ContextSnapshot {
    frames.iter().copied().map(ContextFrame::new).collect()
}

/// Runs `levels` as nested replays; returns the stack seen by each level.
fn run_nested(ctx: Context, levels: &[Level], seen: &mut Vec<ContextSnapshot>) {
    let Some((first, rest)) = levels.split_first() else {
        return;
    };
    ctx.run_with_context(&snapshot_of(&first.frames), || {
        seen.push(ctx.current());
        let before_inner = ctx.current();
        let inner = catch_unwind(AssertUnwindSafe(|| run_nested(ctx, rest, seen)));
        assert_eq!(ctx.current(), before_inner);
        if first.faults || inner.is_err() {
            panic!("level fault");
        }
    });
}

/// Every nested replay, faulting or not, leaves the stack as it found it.
#[test]
fn test_nested_replay_is_balanced_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let ctx = Context::named("property-balance");

    runner
        .run(
            &(prop::collection::vec(any::<u16>(), 0..3), prop::collection::vec(level(), 0..6)),
            |(base, levels)| {
                let base = snapshot_of(&base);
                ctx.push_all(&base);

                let mut seen = Vec::new();
                let _ = catch_unwind(AssertUnwindSafe(|| run_nested(ctx, &levels, &mut seen)));

                prop_assert_eq!(ctx.current(), base.clone());
                ctx.pop_count(base.len()).unwrap();
                prop_assert_eq!(ctx.depth(), 0);

                // Level i sees the base followed by every enclosing snapshot.
                prop_assert_eq!(seen.len(), levels.len());
                let mut expected: Vec<ContextFrame> = base.frames().to_vec();
                for (level, observed) in levels.iter().zip(&seen) {
                    expected.extend(snapshot_of(&level.frames).iter().cloned());
                    prop_assert_eq!(observed.frames(), expected.as_slice());
                }
                Ok(())
            },
        )
        .unwrap();
}
