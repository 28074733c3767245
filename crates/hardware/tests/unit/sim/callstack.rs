//! Call Stack Unit Tests.

use pretty_assertions::assert_eq;
use rvlab_core::asm::assemble;
use rvlab_core::common::constants::MAX_CALL_DEPTH;
use rvlab_core::core::ExecutionObserver;
use rvlab_core::sim::callstack::ENTRY_FRAME;
use rvlab_core::sim::{CallStack, Frame, RunOutcome, Simulator};

const NESTED: &str = "\
jal x1, foo
jal x0, end
foo:
addi x5, x0, 1
jal x6, bar
jalr x0, 0(x1)
bar:
addi x7, x0, 2
jalr x0, 0(x6)
end:
addi x8, x0, 3
";

fn frame(label: &str, line: usize) -> Frame {
    Frame {
        label: label.to_string(),
        line,
    }
}

#[test]
fn load_starts_with_entry_frame() {
    let mut sim = Simulator::new();
    let _ = sim.load(NESTED).unwrap();
    assert_eq!(sim.call_stack().frames(), &[frame(ENTRY_FRAME, 1)]);
}

#[test]
fn nested_calls_push_labelled_frames() {
    let mut sim = Simulator::new();
    let _ = sim.load(NESTED).unwrap();
    assert!(sim.set_breakpoint(9));
    assert_eq!(sim.run(None).unwrap(), RunOutcome::Breakpoint { line: 9 });

    assert_eq!(
        sim.call_stack().frames(),
        &[frame("main", 1), frame("foo", 5), frame("bar", 8)]
    );
    assert_eq!(
        sim.call_stack().to_string(),
        "Call Stack:\nmain:1\nfoo:5\nbar:8\n"
    );
}

#[test]
fn returns_pop_frames() {
    let mut sim = Simulator::new();
    let _ = sim.load(NESTED).unwrap();
    assert!(sim.set_breakpoint(11));
    assert_eq!(sim.run(None).unwrap(), RunOutcome::Breakpoint { line: 11 });
    assert_eq!(sim.call_stack().frames(), &[frame("main", 2)]);
}

#[test]
fn finished_program_has_empty_stack() {
    let mut sim = Simulator::new();
    let _ = sim.load(NESTED).unwrap();
    assert_eq!(sim.run(None).unwrap(), RunOutcome::Finished);
    assert!(sim.call_stack().is_empty());
    assert_eq!(
        sim.call_stack().to_string(),
        "Call Stack:\nEmpty Call Stack: Execution complete\n"
    );
}

#[test]
fn stepping_off_the_end_empties_stack() {
    let mut sim = Simulator::new();
    let _ = sim.load("addi x1, x0, 1\n").unwrap();
    assert_eq!(sim.call_stack().depth(), 1);
    let _ = sim.step().unwrap();
    assert!(sim.call_stack().is_empty());
}

#[test]
fn unlabelled_target_is_named_by_address() {
    let mut sim = Simulator::new();
    let src = "addi x9, x0, 8\njalr x1, 0(x9)\naddi x5, x0, 1\n";
    let _ = sim.load(src).unwrap();
    let _ = sim.step().unwrap();
    let _ = sim.step().unwrap();
    assert_eq!(sim.call_stack().frames().last(), Some(&frame("0x8", 3)));
}

#[test]
fn shared_address_uses_smallest_label() {
    let src = "jal x1, zeta\nzeta:\nalpha:\naddi x5, x0, 1\n";
    let mut sim = Simulator::new();
    let _ = sim.load(src).unwrap();
    let _ = sim.step().unwrap();
    assert_eq!(sim.call_stack().frames()[1].label, "alpha");
}

#[test]
fn calls_past_max_depth_are_counted_not_recorded() {
    let program = assemble("addi x1, x0, 1\n").unwrap();
    let mut stack = CallStack::new();
    stack.reset(&program);

    // The entry frame counts towards the limit.
    let extra = 10;
    for _ in 0..(MAX_CALL_DEPTH - 1) + extra {
        stack.on_call(0, 0);
    }
    assert_eq!(stack.depth(), MAX_CALL_DEPTH);

    // One return per dropped call, plus one that pops a real frame.
    for _ in 0..=extra {
        stack.on_return(4);
    }
    assert_eq!(stack.depth(), MAX_CALL_DEPTH - 1);
}

#[test]
fn return_never_pops_entry_frame() {
    let program = assemble("addi x1, x0, 1\n").unwrap();
    let mut stack = CallStack::new();
    stack.reset(&program);
    stack.on_return(0);
    assert_eq!(stack.frames(), &[frame(ENTRY_FRAME, 1)]);

    stack.clear();
    assert!(stack.is_empty());
}
