//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the processor state
//! and the instruction-level execution loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next instruction
//! - **Stack pointer** (S): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status register** (P): packed NV-BDIZC byte, see [`crate::status`]
//! - **Exception slot**: at most one pending RESET/NMI/IRQ poke
//! - **Pending writes**: stores staged during the current instruction
//!
//! ## Execution Model
//!
//! One [`cycle`](Cpu::cycle) call services any pending exception and then
//! executes exactly one instruction. The instruction's cycle cost — base
//! count plus page-crossing and branch penalties — is reported to the clock
//! sink as a single bulk add, after which the staged memory writes drain in
//! order, one cycle each. Real hardware performs most stores late in the
//! instruction; deferring them approximates that timing without modeling
//! individual T-states.

use crate::cycles::CYCLES;
use crate::status::{flags, Status};
use crate::{Bus, Clock, CpuError};

/// NMI vector address (low byte; high byte at +1).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// A pending external event, serviced at the top of the next
/// [`cycle`](Cpu::cycle) call.
///
/// Set by the embedder through [`Cpu::reset`] (implicitly at power-on),
/// [`Cpu::irq`], and [`Cpu::nmi`]. Concurrent pokes are last-writer-wins;
/// there is no queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    /// Nothing pending.
    None,
    /// Power-on or embedder-requested reset.
    Reset,
    /// Non-maskable interrupt.
    Nmi,
    /// Maskable interrupt request; serviced only while the I flag is clear.
    Irq,
    /// Set transiently while the BRK instruction builds its frame.
    Brk,
}

/// 6502 CPU state and execution context.
///
/// Generic over the clock sink and bus so both calls monomorphize and
/// inline into the dispatch hot path. The CPU owns its clock and bus;
/// [`bus_mut`](Cpu::bus_mut) and [`clock_mut`](Cpu::clock_mut) hand them
/// back to the embedder between instructions.
///
/// All architectural state lives in the instance, so multiple CPUs can
/// coexist (lockstep comparison harnesses, multi-processor boards).
///
/// # Examples
///
/// ```
/// use emu6502::{Bus, Cpu, CycleCounter, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0xFFFC, 0x00); // reset vector -> 0x8000
/// mem.write(0xFFFD, 0x80);
/// mem.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = Cpu::new(CycleCounter::new(), mem);
///
/// // The first cycle() services the power-on reset, then runs LDA.
/// cpu.cycle().unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.clock().cycles(), 2);
/// ```
pub struct Cpu<C: Clock, B: Bus> {
    pub(crate) clk: C,
    pub(crate) bus: B,

    /// Accumulator
    pub(crate) a: u8,
    /// X index register
    pub(crate) x: u8,
    /// Y index register
    pub(crate) y: u8,
    /// Stack pointer (0x0100 + s gives the full stack address)
    pub(crate) s: u8,
    /// Processor status register
    pub(crate) p: Status,
    /// Program counter
    pub(crate) pc: u16,

    /// Pending external event, consumed at the top of `cycle()`.
    pub(crate) exception: Exception,

    /// Stores staged during the current instruction, drained at its end.
    /// Empty whenever `cycle()` is not on the call stack.
    pub(crate) writes: Vec<(u16, u8)>,

    /// Page-crossing and branch penalty cycles for the current instruction.
    pub(crate) penalty: u32,
}

impl<C: Clock, B: Bus> Cpu<C, B> {
    /// Creates a CPU in the power-on state.
    ///
    /// Registers are zeroed, S = 0xFD, P has the interrupt-disable flag set,
    /// and a RESET exception is pending — the bus is not touched until the
    /// first [`cycle`](Cpu::cycle) (or an explicit [`reset`](Cpu::reset))
    /// loads PC from the reset vector.
    pub fn new(clk: C, bus: B) -> Self {
        Self {
            clk,
            bus,
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            p: Status::default(),
            pc: 0,
            exception: Exception::Reset,
            writes: Vec::new(),
            penalty: 0,
        }
    }

    /// Resets the CPU: S = 0xFD, PC loaded from the reset vector at
    /// 0xFFFC/D. No stack frame is pushed and A/X/Y/P are left untouched.
    pub fn reset(&mut self) {
        self.s = 0xFD;
        self.pc = self.read_vector(RESET_VECTOR);
        self.exception = Exception::None;
    }

    /// Requests a maskable interrupt, serviced at the top of the next
    /// [`cycle`](Cpu::cycle) if the I flag is clear.
    pub fn irq(&mut self) {
        self.exception = Exception::Irq;
    }

    /// Requests a non-maskable interrupt, serviced at the top of the next
    /// [`cycle`](Cpu::cycle).
    pub fn nmi(&mut self) {
        self.exception = Exception::Nmi;
    }

    /// Services any pending exception, then executes exactly one
    /// instruction.
    ///
    /// Cycle accounting per instruction: one bulk
    /// [`add_cpu_cycles`](Clock::add_cpu_cycles) of
    /// `base + penalties - staged_write_count`, then one single-cycle add
    /// per staged write as it reaches the bus.
    ///
    /// # Errors
    ///
    /// Returns [`CpuError::UnhandledInstruction`] for an opcode outside the
    /// variant's instruction set. The CPU is left with PC past the offending
    /// opcode and nothing staged; the embedder decides whether to halt.
    pub fn cycle(&mut self) -> Result<(), CpuError> {
        match self.exception {
            Exception::Reset => self.reset(),
            Exception::Nmi => self.enter_nmi(),
            Exception::Irq => self.enter_irq(),
            Exception::None | Exception::Brk => {}
        }

        self.penalty = 0;
        let at = self.pc;
        let opcode = self.read_pc_inc();

        if let Err(e) = self.execute(opcode, at) {
            self.writes.clear();
            self.penalty = 0;
            return Err(e);
        }

        self.finish(opcode);
        Ok(())
    }

    /// Sets the program counter directly. Debug/testing hook; a running
    /// system only moves PC through instructions and vectors.
    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr;
    }

    // ========== Register Accessors ==========

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the stack pointer. The full stack address is 0x0100 + S.
    pub fn s(&self) -> u8 {
        self.s
    }

    /// Returns the packed status byte (NV-BDIZC). Bits B and B2 always read
    /// as 1.
    pub fn p(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the exception that the next [`cycle`](Cpu::cycle) will
    /// service.
    pub fn pending_exception(&self) -> Exception {
        self.exception
    }

    // ========== Register Setters (for testing) ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the stack pointer.
    pub fn set_s(&mut self, value: u8) {
        self.s = value;
    }

    /// Sets the status register. Bits B and B2 are forced on, as PLP would.
    pub fn set_p(&mut self, value: u8) {
        self.p.set_bits(value);
    }

    // ========== Clock and Bus Access ==========

    /// Returns a reference to the clock sink.
    pub fn clock(&self) -> &C {
        &self.clk
    }

    /// Returns a mutable reference to the clock sink.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clk
    }

    /// Returns a reference to the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Returns a mutable reference to the bus.
    ///
    /// This is how tests and embedders write to memory between
    /// instructions.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    // ========== Fetch, Stack, and Write Staging ==========

    /// Fetches the byte at PC and increments PC.
    pub(crate) fn read_pc_inc(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Stages a push of `value`. S moves now; the bus write lands when the
    /// instruction's writes drain.
    pub(crate) fn stack_push(&mut self, value: u8) {
        self.store(0x0100 | u16::from(self.s), value);
        self.s = self.s.wrapping_sub(1);
    }

    /// Pulls a byte from the stack.
    pub(crate) fn stack_pull(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.bus.read(0x0100 | u16::from(self.s))
    }

    /// Stages a memory write for the end-of-instruction drain.
    pub(crate) fn store(&mut self, addr: u16, value: u8) {
        self.writes.push((addr, value));
    }

    /// Reads a 16-bit little-endian vector.
    pub(crate) fn read_vector(&mut self, addr: u16) -> u16 {
        let low = u16::from(self.bus.read(addr));
        let high = u16::from(self.bus.read(addr.wrapping_add(1)));
        low | high << 8
    }

    // ========== Interrupt Entry ==========

    /// Pushes the interrupt frame (PC high, PC low, then P with B clear) and
    /// vectors through `vector`.
    fn enter_interrupt(&mut self, vector: u16) {
        self.stack_push((self.pc >> 8) as u8);
        self.stack_push(self.pc as u8);
        self.stack_push((self.p.bits() | flags::B2) & !flags::B);
        self.pc = self.read_vector(vector);
        self.exception = Exception::None;
    }

    fn enter_nmi(&mut self) {
        self.enter_interrupt(NMI_VECTOR);
    }

    /// Services a pending IRQ. While the I flag is set the request stays
    /// pending, to be taken once software clears the mask.
    fn enter_irq(&mut self) {
        if self.p.is_set(flags::I) {
            return;
        }
        self.enter_interrupt(IRQ_VECTOR);
    }

    // ========== Cycle Accounting and Write Drain ==========

    /// Charges the instruction's cycles to the clock and drains staged
    /// writes in insertion order, one cycle each.
    fn finish(&mut self, opcode: u8) {
        let base = u32::from(CYCLES[opcode as usize]);
        assert!(
            base > 0,
            "cycle table entry for dispatched opcode ${opcode:02X} is zero"
        );

        let staged = self.writes.len() as u32;
        self.clk
            .add_cpu_cycles((base + self.penalty).saturating_sub(staged));

        for i in 0..self.writes.len() {
            let (addr, value) = self.writes[i];
            self.clk.add_cpu_cycles(1);
            self.bus.write(addr, value);
        }
        self.writes.clear();
        self.penalty = 0;
    }
}
