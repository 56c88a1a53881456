//! # 6502 / 65C02 CPU Emulator Core
//!
//! An instruction-level emulator for the MOS 6502 and its CMOS descendant,
//! the WDC 65C02. One [`Cpu::cycle`] call executes one machine instruction,
//! charging its cycle cost to a caller-supplied [`Clock`] sink and touching
//! memory through a caller-supplied [`Bus`].
//!
//! The crate is a reusable core for systems that emulate 8-bit machines:
//! the embedder owns the memory map, peripherals, and timing, while the CPU
//! owns registers, flags, and instruction semantics.
//!
//! ## Quick Start
//!
//! ```rust
//! use emu6502::{Bus, Cpu, CycleCounter, FlatMemory};
//!
//! // 64KB of RAM with the reset vector pointing at 0x8000.
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//!
//! // LDA #$01; ADC #$41
//! memory.load(0x8000, &[0xA9, 0x01, 0x69, 0x41]);
//!
//! let mut cpu = Cpu::new(CycleCounter::new(), memory);
//! cpu.cycle().unwrap(); // services power-on reset, then LDA
//! cpu.cycle().unwrap();
//!
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.clock().cycles(), 4);
//! ```
//!
//! ## Architecture
//!
//! - **Pluggable seams**: clock sink and bus are generic parameters, so both
//!   calls monomorphize and inline into the dispatch loop
//! - **Two variants**: the default build is the NMOS 6502; the `cmos` cargo
//!   feature selects the 65C02 instruction set and cycle table
//! - **Deferred stores**: memory writes stage during decode and drain at
//!   instruction end, approximating real store timing for bus observers
//! - **Conformance-oriented**: cycle accounting includes page-crossing and
//!   branch penalties, BCD arithmetic, and the zero-page wraparound quirks
//!   exercised by the published functional test suites
//!
//! ## Modules
//!
//! - `cpu` - CPU state, interrupt sequencing, and the execution loop
//! - `clock` - the cycle-sink trait and a counter implementation
//! - `memory` - the bus trait and a flat 64KB implementation
//! - `status` - the processor status register and flag algebra
//! - `cycles` - per-variant base cycle tables

pub mod clock;
pub mod cpu;
pub mod cycles;
pub mod memory;
pub mod status;

// Internal helpers for the execution core.
mod addressing;
mod alu;
mod dispatch;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use clock::{Clock, CycleCounter};
pub use cpu::{Cpu, Exception};
pub use memory::{Bus, FlatMemory};
pub use status::Status;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The fetched opcode is not part of this variant's instruction set.
    ///
    /// Carries the opcode byte and the address it was fetched from. Unknown
    /// opcodes are deliberately fatal rather than treated as NOPs: silently
    /// skipping them would mask bugs in the program being emulated.
    UnhandledInstruction {
        /// The unrecognized opcode byte.
        opcode: u8,
        /// The address the opcode was fetched from.
        pc: u16,
    },
}

impl std::fmt::Display for CpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CpuError::UnhandledInstruction { opcode, pc } => {
                write!(f, "unhandled instruction 0x{opcode:02X} at 0x{pc:04X}")
            }
        }
    }
}

impl std::error::Error for CpuError {}
