//! Fuzz target: execute arbitrary memory images for a bounded number of
//! instructions and check the externally observable invariants.

#![no_main]

use emu6502::status::flags;
use emu6502::{Bus, Cpu, CycleCounter, FlatMemory};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, data);

    // Keep the entry point inside the fuzzed region when possible.
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x00);

    let mut cpu = Cpu::new(CycleCounter::new(), memory);
    cpu.reset();

    for _ in 0..1000 {
        let cycles_before = cpu.clock().cycles();

        match cpu.cycle() {
            Ok(()) => {
                // Every executed instruction charges at least one cycle.
                assert!(cpu.clock().cycles() > cycles_before);
            }
            // Arbitrary bytes routinely hit unimplemented opcodes; an
            // error is a valid outcome, not a crash.
            Err(_) => break,
        }

        // The observable status register always carries the forced bits.
        assert_eq!(
            cpu.p() & (flags::B | flags::B2),
            flags::B | flags::B2
        );
    }
});
