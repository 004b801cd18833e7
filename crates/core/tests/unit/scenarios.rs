//! End-to-end pipeline scenarios.
//!
//! Each test drives a short program through fetch, issue, execute,
//! writeback, and commit, and checks the committed architectural state.

use crate::common::builder::{self, InstructionBuilder};
use crate::common::harness::TestContext;
use rv32sim_core::config::Config;
use rv32sim_core::isa::decode;
use rv32sim_core::sim::ExitReason;
use rv32sim_core::Core;

#[test]
fn test_single_addi() {
    // ADDI x1, x0, 5 (0x00500093)
    let mut ctx = TestContext::new(&[0x00500093]);
    ctx.run_to_end();

    assert_eq!(ctx.reg(1), 5);
    assert_eq!(ctx.sim.core.retired_instrs, 1);
    for reg in 0..32 {
        assert!(!ctx.sim.core.rat().exists(reg));
    }
}

#[test]
fn test_dependent_chain() {
    // Each instruction consumes the previous result off the broadcast.
    let program = [
        builder::addi(1, 0, 1),
        builder::addi(2, 1, 2),
        builder::addi(3, 2, 3),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(1), 1);
    assert_eq!(ctx.reg(2), 3);
    assert_eq!(ctx.reg(3), 6);
    assert_eq!(ctx.sim.core.retired_instrs, 3);
}

#[test]
fn test_lui() {
    let mut ctx = TestContext::new(&[builder::lui(5, 0x12345)]);
    ctx.run_to_end();
    assert_eq!(ctx.reg(5), 0x1234_5000);
}

#[test]
fn test_auipc() {
    let mut config = Config::default();
    config.general.start_pc = 0x100;
    let mut ctx = TestContext::with_config(config, &[builder::auipc(6, 0x1)]);
    ctx.run_to_end();
    assert_eq!(ctx.reg(6), 0x1100);
}

#[test]
fn test_jal_links_and_redirects() {
    let mut config = Config::default();
    config.general.start_pc = 0x200;
    // 0x200: JAL x1, +8   -> link 0x204, continue at 0x208
    // 0x204: ADDI x9, x0, 1   (skipped)
    // 0x208: ADDI x2, x0, 7
    let program = [
        builder::jal(1, 8),
        builder::addi(9, 0, 1),
        builder::addi(2, 0, 7),
        builder::ecall(),
    ];
    let mut ctx = TestContext::with_config(config, &program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(1), 0x204);
    assert_eq!(ctx.reg(2), 7);
    assert_eq!(ctx.reg(9), 0);
}

#[test]
fn test_ecall_exits() {
    // Nothing after the exit instruction retires.
    let program = [builder::ecall(), builder::addi(1, 0, 9)];
    let mut ctx = TestContext::new(&program);
    let reason = ctx.run_to_end();

    assert_eq!(reason, ExitReason::Exited);
    assert!(ctx.sim.core.exited);
    assert_eq!(ctx.sim.core.retired_instrs, 1);
    assert_eq!(ctx.reg(1), 0);
}

#[test]
fn test_rat_guard_on_commit() {
    // Two back-to-back writers of x1. When the first commits, the RAT
    // still names the second in-flight writer and must not be cleared.
    let mut core = Core::new(&Config::default());
    core.enqueue(decode(builder::addi(1, 0, 1), 0, 0).unwrap());
    core.enqueue(decode(builder::addi(1, 0, 2), 4, 1).unwrap());

    // Run until the first writer has retired and no further.
    let mut guard = 0;
    while core.retired_instrs == 0 {
        core.do_cycle();
        guard += 1;
        assert!(guard < 20, "first writer never retired");
    }
    assert_eq!(core.retired_instrs, 1);
    // The second writer went to ROB slot 1 and still owns the mapping.
    assert_eq!(core.rat().get(1), Some(1));

    while core.retired_instrs < 2 {
        core.do_cycle();
        guard += 1;
        assert!(guard < 40, "second writer never retired");
    }
    assert!(!core.rat().exists(1));
    assert_eq!(core.reg(1), 2);
}

#[test]
fn test_branch_taken_skips() {
    // BEQ x0, x0, +8 skips the poison instruction.
    let program = [
        InstructionBuilder::new().beq(0, 0, 8).encode(),
        builder::addi(9, 0, 1),
        builder::addi(2, 0, 5),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(9), 0);
    assert_eq!(ctx.reg(2), 5);
}

#[test]
fn test_branch_not_taken_falls_through() {
    let program = [
        InstructionBuilder::new().bne(0, 0, 8).encode(),
        builder::addi(9, 0, 1),
        builder::addi(2, 0, 5),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(9), 1);
    assert_eq!(ctx.reg(2), 5);
}

#[test]
fn test_jalr_indirect() {
    // x1 = 0x10; JALR x2, x1, 0 jumps to 0x10 and links 0x8.
    let program = [
        builder::addi(1, 0, 0x10),
        InstructionBuilder::new().jalr(2, 1, 0).encode(),
        builder::addi(9, 0, 1), // 0x8, skipped
        builder::addi(9, 0, 2), // 0xc, skipped
        builder::addi(3, 0, 3), // 0x10
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(2), 0x8);
    assert_eq!(ctx.reg(9), 0);
    assert_eq!(ctx.reg(3), 3);
}

#[test]
fn test_csr_readback() {
    // CSRRW x1, 0x340, x2 writes x2 and returns the old value; a second
    // CSRRS reads it back.
    let program = [
        builder::addi(2, 0, 0x55),
        InstructionBuilder::new().csrrw(1, 0x340, 2).encode(),
        InstructionBuilder::new().csrrs(3, 0x340, 0).encode(),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(1), 0); // CSR was empty before the write
    assert_eq!(ctx.reg(3), 0x55);
    assert_eq!(ctx.sim.core.csrs().read(0x340), 0x55);
}
