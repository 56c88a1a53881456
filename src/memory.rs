//! # Bus Abstraction
//!
//! The CPU touches the outside world one byte at a time through the `Bus`
//! trait. What sits behind it is the embedder's business: plain RAM, a
//! cartridge mapper, memory-mapped peripheral registers, or a tracing
//! wrapper that records every access for a comparison harness. The crate
//! ships [`FlatMemory`], a 64KB RAM suitable for tests and for the
//! functional-test images that occupy the whole address space.
//!
//! Two hardware facts shape the trait:
//!
//! - A 6502 bus transaction cannot fail. A read of an unmapped address
//!   returns whatever happens to float on the bus, and a write into ROM
//!   simply does nothing. There is no error channel, so the trait has none
//!   either.
//! - Reads performed during indirect address computation are real bus reads
//!   and are never elided; on hardware they are observable and some
//!   peripherals depend on them.

/// Byte-wide bus with a 16-bit address space, as seen from the CPU.
///
/// Implementations of this trait provide the memory backend for the CPU.
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use emu6502::{Bus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// // Write a value
/// mem.write(0x1234, 0x42);
///
/// // Read it back
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing a Custom Bus
///
/// ```
/// use emu6502::Bus;
///
/// struct DevBoard {
///     ram: Vec<u8>,       // 48KB RAM at 0x0000-0xBFFF
///     rom: [u8; 0x4000],  // 16KB ROM at 0xC000-0xFFFF, holds the vectors
/// }
///
/// impl Bus for DevBoard {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0x0000..=0xBFFF => self.ram[addr as usize],
///             _ => self.rom[(addr - 0xC000) as usize],
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if let 0x0000..=0xBFFF = addr {
///             self.ram[addr as usize] = value;
///         }
///         // stores aimed at ROM die quietly, as on the real bus
///     }
/// }
/// ```
pub trait Bus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic. If the address is unmapped or invalid,
    /// implementations may return garbage data (matching 6502 hardware
    /// behavior).
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. If the address is read-only or
    /// unmapped, implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are mapped to a single contiguous
/// RAM array initialized to 0x00.
///
/// Useful for:
/// - Testing and development
/// - Functional-test ROM images, which occupy the full address space
/// - Simple programs that don't need ROM/RAM distinction
///
/// # Examples
///
/// ```
/// use emu6502::{Bus, Cpu, CycleCounter, FlatMemory};
///
/// // Create memory and set up the reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
///
/// let mut cpu = Cpu::new(CycleCounter::new(), memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `origin`, wrapping at the top
    /// of the address space.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{Bus, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0400, &[0xA9, 0x42]); // LDA #$42
    /// assert_eq!(mem.read(0x0400), 0xA9);
    /// assert_eq!(mem.read(0x0401), 0x42);
    /// ```
    pub fn load(&mut self, origin: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            let addr = origin.wrapping_add(offset as u16);
            self.data[addr as usize] = byte;
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
