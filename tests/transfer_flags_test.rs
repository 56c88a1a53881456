//! Tests for the register transfers and the flag set/clear instructions.

use emu6502::status::flags;
use emu6502::{Bus, Cpu, CycleCounter, FlatMemory};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<CycleCounter, FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = Cpu::new(CycleCounter::new(), memory);
    cpu.reset();
    cpu
}

fn flag(cpu: &Cpu<CycleCounter, FlatMemory>, mask: u8) -> bool {
    cpu.p() & mask != 0
}

// ========== Transfers ==========

#[test]
fn test_tax_and_txa() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80);
    cpu.bus_mut().load(0x8000, &[0xAA, 0xA9, 0x00, 0x8A]); // TAX; LDA #0; TXA

    cpu.cycle().unwrap();
    assert_eq!(cpu.x(), 0x80);
    assert!(flag(&cpu, flags::N));
    assert_eq!(cpu.clock().cycles(), 2);

    cpu.cycle().unwrap();
    cpu.cycle().unwrap();
    assert_eq!(cpu.a(), 0x80);
}

#[test]
fn test_tay_and_tya() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x00);
    cpu.bus_mut().load(0x8000, &[0xA8, 0x98]); // TAY; TYA

    cpu.cycle().unwrap();
    assert_eq!(cpu.y(), 0x00);
    assert!(flag(&cpu, flags::Z));

    cpu.cycle().unwrap();
    assert_eq!(cpu.a(), 0x00);
}

#[test]
fn test_tsx_reads_stack_pointer() {
    let mut cpu = setup_cpu();
    cpu.set_s(0x42);
    cpu.bus_mut().write(0x8000, 0xBA); // TSX

    cpu.cycle().unwrap();

    assert_eq!(cpu.x(), 0x42);
    assert!(!flag(&cpu, flags::N));
    assert!(!flag(&cpu, flags::Z));
}

#[test]
fn test_txs_does_not_touch_flags() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x00); // a zero transfer into S must not set Z
    let before = cpu.p();
    cpu.bus_mut().write(0x8000, 0x9A); // TXS

    cpu.cycle().unwrap();

    assert_eq!(cpu.s(), 0x00);
    assert_eq!(cpu.p(), before);
}

// ========== Flag Instructions ==========

#[test]
fn test_sec_and_clc() {
    let mut cpu = setup_cpu();
    cpu.bus_mut().load(0x8000, &[0x38, 0x18]); // SEC; CLC

    cpu.cycle().unwrap();
    assert!(flag(&cpu, flags::C));

    cpu.cycle().unwrap();
    assert!(!flag(&cpu, flags::C));
    assert_eq!(cpu.clock().cycles(), 4); // 2 + 2
}

#[test]
fn test_sed_and_cld() {
    let mut cpu = setup_cpu();
    cpu.bus_mut().load(0x8000, &[0xF8, 0xD8]); // SED; CLD

    cpu.cycle().unwrap();
    assert!(flag(&cpu, flags::D));

    cpu.cycle().unwrap();
    assert!(!flag(&cpu, flags::D));
}

#[test]
fn test_sei_and_cli() {
    let mut cpu = setup_cpu();
    cpu.bus_mut().load(0x8000, &[0x78, 0x58]); // SEI; CLI

    cpu.cycle().unwrap();
    assert!(flag(&cpu, flags::I));

    cpu.cycle().unwrap();
    assert!(!flag(&cpu, flags::I));
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu();
    cpu.set_p(flags::V);
    cpu.bus_mut().write(0x8000, 0xB8); // CLV

    cpu.cycle().unwrap();

    assert!(!flag(&cpu, flags::V));
}

#[test]
fn test_flag_clear_keeps_break_bits() {
    let mut cpu = setup_cpu();
    cpu.bus_mut().load(0x8000, &[0x18, 0xD8, 0x58, 0xB8]); // CLC CLD CLI CLV

    for _ in 0..4 {
        cpu.cycle().unwrap();
        assert_eq!(cpu.p() & (flags::B | flags::B2), flags::B | flags::B2);
    }
}
