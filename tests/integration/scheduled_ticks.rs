//! Integration tests wiring the hooks into a small tick loop.
//!
//! The loop below stands in for a host simulation: it owns a queue of
//! scheduled block updates, calls the schedule-time hook when queueing and the
//! execute-time hook when an update comes due, and announces each finished
//! tick on a lifecycle bus.

use blame_context::{
    hooks, Context, ContextCarrier, ContextFrame, ContextSlot, ContextSnapshot, LifecycleBus,
    LifecycleEvent,
};
use parking_lot::Mutex;
use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BlockPos(i32, i32, i32);

#[derive(Debug)]
struct ScheduledUpdate {
    due: u64,
    seq: u64,
    pos: BlockPos,
    context: ContextSlot,
}

impl ContextCarrier for ScheduledUpdate {
    fn context(&self) -> Option<&ContextSnapshot> {
        self.context.context()
    }

    fn set_context(&mut self, snapshot: ContextSnapshot) {
        self.context.set_context(snapshot);
    }
}

impl PartialEq for ScheduledUpdate {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl Eq for ScheduledUpdate {}

impl PartialOrd for ScheduledUpdate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledUpdate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Default)]
struct World {
    tick: u64,
    next_seq: Cell<u64>,
    queue: RefCell<BinaryHeap<Reverse<ScheduledUpdate>>>,
    log: RefCell<Vec<(BlockPos, ContextSnapshot)>>,
}

impl World {
    fn schedule(&self, pos: BlockPos, delay: u64) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let mut update = ScheduledUpdate {
            due: self.tick + delay,
            seq,
            pos,
            context: ContextSlot::new(),
        };
        hooks::on_schedule(&mut update);
        self.queue.borrow_mut().push(Reverse(update));
    }

    fn run_tick(&mut self, bus: &LifecycleBus, on_update: impl Fn(&World, BlockPos)) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.peek() {
                    Some(Reverse(update)) if update.due <= self.tick => queue.pop(),
                    _ => None,
                }
            };
            let Some(Reverse(update)) = next else { break };

            let world: &World = self;
            hooks::on_execute(&update, || {
                let frame = ContextFrame::new(update.pos);
                Context::BLAME.act(frame, || {
                    world.log.borrow_mut().push((update.pos, hooks::blame()));
                    on_update(world, update.pos);
                });
            });
        }
        bus.tick_completed(self.tick).unwrap();
        self.tick += 1;
    }
}

#[test]
fn test_chained_updates_accumulate_blame() {
    let bus = LifecycleBus::new();
    let mut world = World::default();

    Context::BLAME.act("player placed lever", || world.schedule(BlockPos(0, 0, 0), 1));

    // Each update schedules its neighbour one tick later, up to x = 2.
    let spread = |world: &World, pos: BlockPos| {
        if pos.0 < 2 {
            world.schedule(BlockPos(pos.0 + 1, pos.1, pos.2), 1);
        }
    };
    for _ in 0..4 {
        world.run_tick(&bus, spread);
    }

    let log = world.log.borrow();
    assert_eq!(log.len(), 3);

    let (pos, chain) = &log[2];
    assert_eq!(*pos, BlockPos(2, 0, 0));
    let expected: ContextSnapshot = vec![
        ContextFrame::from("player placed lever"),
        ContextFrame::new(BlockPos(0, 0, 0)),
        ContextFrame::new(BlockPos(1, 0, 0)),
        ContextFrame::new(BlockPos(2, 0, 0)),
    ]
    .into();
    assert_eq!(*chain, expected);
    assert!(hooks::blame().is_empty());
}

#[test]
fn test_tick_listener_sees_clean_stack() {
    let bus = LifecycleBus::new();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    bus.subscribe(move |event: &LifecycleEvent| {
        let LifecycleEvent::TickCompleted { tick } = *event;
        sink.lock().push((tick, Context::BLAME.depth()));
        Ok(())
    });

    let mut world = World::default();
    Context::BLAME.act("dispenser fired", || world.schedule(BlockPos(5, 64, 5), 0));
    world.run_tick(&bus, |_, _| {});
    world.run_tick(&bus, |_, _| {});

    assert_eq!(*observed.lock(), vec![(0, 0), (1, 0)]);
    assert_eq!(world.log.borrow().len(), 1);
}

#[test]
fn test_crash_report_reads_chain_during_panic() {
    let bus = LifecycleBus::new();
    let mut world = World::default();
    Context::BLAME.act("lava flow", || world.schedule(BlockPos(1, 2, 3), 0));

    let report = Arc::new(Mutex::new(None));
    let reporter = Arc::clone(&report);
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        world.run_tick(&bus, |_, _| {
            *reporter.lock() = Some(hooks::blame());
            panic!("fluid tick crashed");
        });
    }));

    assert!(outcome.is_err());
    let chain = report.lock().clone().unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.frames()[0], ContextFrame::from("lava flow"));
    assert!(hooks::blame().is_empty());
}
