//! WebAssembly bindings for the CPU core.
//!
//! Provides a JavaScript-callable emulator wrapping the CPU with flat
//! memory and a cycle counter, enabling browser-based execution of 6502
//! machine code.

use crate::{Bus, Cpu, CycleCounter, FlatMemory};
use wasm_bindgen::prelude::*;

/// A self-contained 6502 machine: CPU, 64KB RAM, and a cycle counter.
#[wasm_bindgen]
pub struct Emulator {
    cpu: Cpu<CycleCounter, FlatMemory>,
}

#[wasm_bindgen]
impl Emulator {
    /// Creates an emulator with zeroed memory and a pending power-on reset.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Emulator {
        Emulator {
            cpu: Cpu::new(CycleCounter::new(), FlatMemory::new()),
        }
    }

    /// Copies a program image into memory at `origin`.
    pub fn load_program(&mut self, origin: u16, bytes: &[u8]) {
        self.cpu.bus_mut().load(origin, bytes);
    }

    /// Points the reset vector at `entry` and resets the CPU.
    pub fn boot(&mut self, entry: u16) {
        self.cpu.bus_mut().write(0xFFFC, entry as u8);
        self.cpu.bus_mut().write(0xFFFD, (entry >> 8) as u8);
        self.cpu.reset();
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.cpu
            .cycle()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Executes instructions until at least `budget` cycles have elapsed or
    /// an unhandled instruction stops execution.
    pub fn run_cycles(&mut self, budget: u64) -> Result<u64, JsValue> {
        let start = self.cpu.clock().cycles();
        while self.cpu.clock().cycles() - start < budget {
            self.step()?;
        }
        Ok(self.cpu.clock().cycles() - start)
    }

    /// Requests a maskable interrupt.
    pub fn irq(&mut self) {
        self.cpu.irq();
    }

    /// Requests a non-maskable interrupt.
    pub fn nmi(&mut self) {
        self.cpu.nmi();
    }

    /// Reads a byte of memory.
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.bus().read(addr)
    }

    /// Writes a byte of memory.
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.bus_mut().write(addr, value);
    }

    // Register getters for state inspection panels.

    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    pub fn sp(&self) -> u8 {
        self.cpu.s()
    }

    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    pub fn status(&self) -> u8 {
        self.cpu.p()
    }

    pub fn cycles(&self) -> u64 {
        self.cpu.clock().cycles()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
