//! Hazard and resource-pressure tests.

use crate::common::builder::{self, InstructionBuilder};
use crate::common::harness::TestContext;
use rv32sim_core::config::Config;

#[test]
fn test_x0_writes_are_discarded() {
    // Both the direct write and the dependent read see a hard zero.
    let program = [
        builder::addi(0, 0, 5),
        builder::add(1, 0, 0),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(0), 0);
    assert_eq!(ctx.reg(1), 0);
    assert_eq!(ctx.sim.core.retired_instrs, 3);
}

#[test]
fn test_raw_chain_through_tiny_backend() {
    // One reservation station and a two-entry reorder buffer force
    // structural stalls; results must still be exact and in order.
    let mut config = Config::default();
    config.pipeline.rs_count = 1;
    config.pipeline.rob_capacity = 2;

    let program = [
        builder::addi(1, 0, 1),
        builder::addi(2, 1, 2),
        builder::addi(3, 2, 3),
        builder::addi(4, 3, 4),
        builder::ecall(),
    ];
    let mut ctx = TestContext::with_config(config, &program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(1), 1);
    assert_eq!(ctx.reg(2), 3);
    assert_eq!(ctx.reg(3), 6);
    assert_eq!(ctx.reg(4), 10);
}

#[test]
fn test_store_load_ordering() {
    // The load must not slip past the older store to the same address.
    let program = [
        builder::addi(1, 0, 42),
        builder::sw(0, 1, 0x40),
        builder::lw(2, 0, 0x40),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(2), 42);
    assert_eq!(ctx.sim.core.memory().read_u32(0x40), 42);
}

#[test]
fn test_stores_commit_in_program_order() {
    // Two stores to the same word; the younger one must win.
    let program = [
        builder::addi(1, 0, 1),
        builder::addi(2, 0, 2),
        builder::sw(0, 1, 0x40),
        builder::sw(0, 2, 0x40),
        builder::lw(3, 0, 0x40),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(3), 2);
}

#[test]
fn test_independent_ops_retire_one_per_cycle() {
    // In-order single commit: the retired counter never jumps by more
    // than one per cycle.
    let program = [
        builder::addi(1, 0, 1),
        builder::addi(2, 0, 2),
        builder::addi(3, 0, 3),
        builder::addi(4, 0, 4),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);

    let mut last_retired = 0;
    for _ in 0..100 {
        if ctx.sim.tick().is_err() || ctx.sim.core.exited {
            break;
        }
        let retired = ctx.sim.core.retired_instrs;
        assert!(retired - last_retired <= 1);
        assert!(retired <= ctx.sim.fetched_instrs());
        last_retired = retired;
    }
    assert_eq!(ctx.sim.core.retired_instrs, 5);
}

#[test]
fn test_wide_independent_program() {
    // Saturate the backend with independent work; every result must land.
    let mut program: Vec<u32> = (1..=12).map(|i| builder::addi(i, 0, i as i32)).collect();
    program.push(builder::ecall());

    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    for i in 1..=12u32 {
        assert_eq!(ctx.reg(i as usize), i);
    }
}

#[test]
fn test_shift_and_compare_ops() {
    let program = [
        builder::addi(1, 0, -8),
        InstructionBuilder::new().srai(2, 1, 2).encode(), // -8 >> 2 = -2
        InstructionBuilder::new().slli(3, 1, 1).encode(), // -8 << 1 = -16
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(2) as i32, -2);
    assert_eq!(ctx.reg(3) as i32, -16);
}

#[test]
fn test_rat_points_at_live_writers() {
    // Every cycle, a mapped register must name a live reorder-buffer entry
    // that writes that register.
    let program = [
        builder::addi(1, 0, 1),
        builder::addi(2, 1, 2),
        builder::addi(1, 2, 3),
        builder::add(3, 1, 2),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);

    for _ in 0..100 {
        if ctx.sim.tick().is_err() || ctx.sim.core.exited {
            break;
        }
        let core = &ctx.sim.core;
        for reg in 0..32 {
            if let Some(rob_index) = core.rat().get(reg) {
                let entry = core
                    .rob()
                    .get(rob_index)
                    .expect("RAT names a freed reorder-buffer slot");
                assert!(entry.instr.exe_flags.use_rd());
                assert_eq!(entry.instr.rd, reg);
            }
        }
    }
    assert_eq!(ctx.reg(3), 9);
}

#[test]
fn test_sub_and_reg_reg() {
    let program = [
        builder::addi(1, 0, 10),
        builder::addi(2, 0, 3),
        InstructionBuilder::new().sub(3, 1, 2).encode(),
        builder::add(4, 3, 2),
        builder::ecall(),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.run_to_end();

    assert_eq!(ctx.reg(3), 7);
    assert_eq!(ctx.reg(4), 10);
}
