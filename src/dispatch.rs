//! # Opcode Dispatch
//!
//! The 256-arm switch that decodes one opcode byte into addressing work,
//! ALU work, and staged writes. Base cycle costs live in the separate
//! [`crate::cycles`] table indexed by the same byte; this module only adds
//! the dynamic penalties (page crossings, taken branches).
//!
//! The default build dispatches the canonical NMOS 6502 set; the `cmos`
//! feature adds the 65C02 extension opcodes and the CMOS behavior changes
//! (BRK clears D, JMP (abs) loses the page-wrap bug, ASL/LSR abs,X pick up
//! a crossing penalty against their re-timed base cost).

use crate::addressing::page_crossed;
use crate::cpu::{Exception, IRQ_VECTOR};
use crate::status::flags;
use crate::{Bus, Clock, Cpu, CpuError};

impl<C: Clock, B: Bus> Cpu<C, B> {
    /// Decodes and executes `opcode`, fetched from `at`.
    ///
    /// PC already points at the first operand byte. Registers and flags are
    /// updated in place; memory writes are staged for the end-of-instruction
    /// drain.
    pub(crate) fn execute(&mut self, opcode: u8, at: u16) -> Result<(), CpuError> {
        match opcode {
            // ========== Interrupts and Subroutines ==========
            0x00 => {
                // BRK: return address is two past the opcode byte.
                self.exception = Exception::Brk;
                let ret = self.pc.wrapping_add(1);
                self.stack_push((ret >> 8) as u8);
                self.stack_push(ret as u8);
                self.stack_push(self.p.bits() | flags::B2 | flags::B);
                self.p.set(flags::I);
                if cfg!(feature = "cmos") {
                    self.p.clear(flags::D);
                }
                self.pc = self.read_vector(IRQ_VECTOR);
                self.exception = Exception::None;
            }

            0x20 => {
                // JSR: pushes return-address-minus-1 before the operand fetch.
                let ret = self.pc.wrapping_add(1);
                self.stack_push((ret >> 8) as u8);
                self.stack_push(ret as u8);
                self.pc = self.abs();
            }

            0x40 => {
                // RTI
                let p = self.stack_pull();
                self.p.set_bits(p);
                let low = u16::from(self.stack_pull());
                let high = u16::from(self.stack_pull());
                self.pc = low | high << 8;
            }

            0x60 => {
                // RTS: resumes past the address JSR pushed.
                let low = u16::from(self.stack_pull());
                let high = u16::from(self.stack_pull());
                self.pc = (low | high << 8).wrapping_add(1);
            }

            // ========== Jumps ==========
            0x4C => {
                // JMP abs
                self.pc = self.abs();
            }

            0x6C => {
                // JMP (abs). The NMOS part fetches the pointer high byte
                // from the start of the same page when the low byte is 0xFF.
                let ptr = self.abs();
                let low = u16::from(self.bus.read(ptr));
                let high_addr = if cfg!(feature = "cmos") || ptr & 0x00FF != 0x00FF {
                    ptr.wrapping_add(1)
                } else {
                    ptr & 0xFF00
                };
                let high = u16::from(self.bus.read(high_addr));
                self.pc = low | high << 8;
            }

            // ========== Branches ==========
            0x10 => {
                // BPL
                let taken = !self.p.is_set(flags::N);
                self.branch(taken);
            }
            0x30 => {
                // BMI
                let taken = self.p.is_set(flags::N);
                self.branch(taken);
            }
            0x50 => {
                // BVC
                let taken = !self.p.is_set(flags::V);
                self.branch(taken);
            }
            0x70 => {
                // BVS
                let taken = self.p.is_set(flags::V);
                self.branch(taken);
            }
            0x90 => {
                // BCC
                let taken = !self.p.is_set(flags::C);
                self.branch(taken);
            }
            0xB0 => {
                // BCS
                let taken = self.p.is_set(flags::C);
                self.branch(taken);
            }
            0xD0 => {
                // BNE
                let taken = !self.p.is_set(flags::Z);
                self.branch(taken);
            }
            0xF0 => {
                // BEQ
                let taken = self.p.is_set(flags::Z);
                self.branch(taken);
            }

            // ========== Flag Operations ==========
            0x18 => self.p.clear(flags::C), // CLC
            0x38 => self.p.set(flags::C),   // SEC
            0x58 => self.p.clear(flags::I), // CLI
            0x78 => self.p.set(flags::I),   // SEI
            0xB8 => self.p.clear(flags::V), // CLV
            0xD8 => self.p.clear(flags::D), // CLD
            0xF8 => self.p.set(flags::D),   // SED

            // ========== Transfers ==========
            0xAA => {
                // TAX
                self.x = self.a;
                self.p.set_nz(self.x);
            }
            0x8A => {
                // TXA
                self.a = self.x;
                self.p.set_nz(self.a);
            }
            0xA8 => {
                // TAY
                self.y = self.a;
                self.p.set_nz(self.y);
            }
            0x98 => {
                // TYA
                self.a = self.y;
                self.p.set_nz(self.a);
            }
            0xBA => {
                // TSX
                self.x = self.s;
                self.p.set_nz(self.x);
            }
            0x9A => {
                // TXS: the one transfer that leaves the flags alone.
                self.s = self.x;
            }

            // ========== Stack ==========
            0x48 => {
                // PHA
                let a = self.a;
                self.stack_push(a);
            }
            0x08 => {
                // PHP: software pushes carry B set.
                let p = self.p.bits() | flags::B2 | flags::B;
                self.stack_push(p);
            }
            0x68 => {
                // PLA
                let m = self.stack_pull();
                self.a = m;
                self.p.set_nz(m);
            }
            0x28 => {
                // PLP
                let p = self.stack_pull();
                self.p.set_bits(p);
            }

            // ========== Loads ==========
            0xA9 => {
                // LDA #imm
                let m = self.read_pc_inc();
                self.a = m;
                self.p.set_nz(m);
            }
            0xA5 => {
                // LDA zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.a = m;
                self.p.set_nz(m);
            }
            0xB5 => {
                // LDA zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.a = m;
                self.p.set_nz(m);
            }
            0xAD => {
                // LDA abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.a = m;
                self.p.set_nz(m);
            }
            0xBD => {
                // LDA abs,X
                let m = self.abs_indexed_read(self.x);
                self.a = m;
                self.p.set_nz(m);
            }
            0xB9 => {
                // LDA abs,Y
                let m = self.abs_indexed_read(self.y);
                self.a = m;
                self.p.set_nz(m);
            }
            0xA1 => {
                // LDA (zp,X)
                let addr = self.ind_x();
                let m = self.bus.read(addr);
                self.a = m;
                self.p.set_nz(m);
            }
            0xB1 => {
                // LDA (zp),Y
                let m = self.ind_y_read();
                self.a = m;
                self.p.set_nz(m);
            }

            0xA2 => {
                // LDX #imm
                let m = self.read_pc_inc();
                self.x = m;
                self.p.set_nz(m);
            }
            0xA6 => {
                // LDX zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.x = m;
                self.p.set_nz(m);
            }
            0xB6 => {
                // LDX zp,Y
                let addr = self.zp_indexed(self.y);
                let m = self.bus.read(addr);
                self.x = m;
                self.p.set_nz(m);
            }
            0xAE => {
                // LDX abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.x = m;
                self.p.set_nz(m);
            }
            0xBE => {
                // LDX abs,Y
                let m = self.abs_indexed_read(self.y);
                self.x = m;
                self.p.set_nz(m);
            }

            0xA0 => {
                // LDY #imm
                let m = self.read_pc_inc();
                self.y = m;
                self.p.set_nz(m);
            }
            0xA4 => {
                // LDY zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.y = m;
                self.p.set_nz(m);
            }
            0xB4 => {
                // LDY zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.y = m;
                self.p.set_nz(m);
            }
            0xAC => {
                // LDY abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.y = m;
                self.p.set_nz(m);
            }
            0xBC => {
                // LDY abs,X
                let m = self.abs_indexed_read(self.x);
                self.y = m;
                self.p.set_nz(m);
            }

            // ========== Stores ==========
            // Stores never take the crossing penalty; the dummy cycle is in
            // the base count.
            0x85 => {
                // STA zp
                let addr = self.zp();
                self.store(addr, self.a);
            }
            0x95 => {
                // STA zp,X
                let addr = self.zp_indexed(self.x);
                self.store(addr, self.a);
            }
            0x8D => {
                // STA abs
                let addr = self.abs();
                self.store(addr, self.a);
            }
            0x9D => {
                // STA abs,X
                let (addr, _) = self.abs_indexed(self.x);
                self.store(addr, self.a);
            }
            0x99 => {
                // STA abs,Y
                let (addr, _) = self.abs_indexed(self.y);
                self.store(addr, self.a);
            }
            0x81 => {
                // STA (zp,X)
                let addr = self.ind_x();
                self.store(addr, self.a);
            }
            0x91 => {
                // STA (zp),Y
                let (addr, _) = self.ind_y();
                self.store(addr, self.a);
            }

            0x86 => {
                // STX zp
                let addr = self.zp();
                self.store(addr, self.x);
            }
            0x96 => {
                // STX zp,Y
                let addr = self.zp_indexed(self.y);
                self.store(addr, self.x);
            }
            0x8E => {
                // STX abs
                let addr = self.abs();
                self.store(addr, self.x);
            }

            0x84 => {
                // STY zp
                let addr = self.zp();
                self.store(addr, self.y);
            }
            0x94 => {
                // STY zp,X
                let addr = self.zp_indexed(self.x);
                self.store(addr, self.y);
            }
            0x8C => {
                // STY abs
                let addr = self.abs();
                self.store(addr, self.y);
            }

            // ========== Arithmetic ==========
            0x69 => {
                // ADC #imm
                let m = self.read_pc_inc();
                self.adc(m);
            }
            0x65 => {
                // ADC zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.adc(m);
            }
            0x75 => {
                // ADC zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.adc(m);
            }
            0x6D => {
                // ADC abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.adc(m);
            }
            0x7D => {
                // ADC abs,X
                let m = self.abs_indexed_read(self.x);
                self.adc(m);
            }
            0x79 => {
                // ADC abs,Y
                let m = self.abs_indexed_read(self.y);
                self.adc(m);
            }
            0x61 => {
                // ADC (zp,X)
                let addr = self.ind_x();
                let m = self.bus.read(addr);
                self.adc(m);
            }
            0x71 => {
                // ADC (zp),Y
                let m = self.ind_y_read();
                self.adc(m);
            }

            0xE9 => {
                // SBC #imm
                let m = self.read_pc_inc();
                self.sbc(m);
            }
            0xE5 => {
                // SBC zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.sbc(m);
            }
            0xF5 => {
                // SBC zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.sbc(m);
            }
            0xED => {
                // SBC abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.sbc(m);
            }
            0xFD => {
                // SBC abs,X
                let m = self.abs_indexed_read(self.x);
                self.sbc(m);
            }
            0xF9 => {
                // SBC abs,Y
                let m = self.abs_indexed_read(self.y);
                self.sbc(m);
            }
            0xE1 => {
                // SBC (zp,X)
                let addr = self.ind_x();
                let m = self.bus.read(addr);
                self.sbc(m);
            }
            0xF1 => {
                // SBC (zp),Y
                let m = self.ind_y_read();
                self.sbc(m);
            }

            // ========== Compares ==========
            0xC9 => {
                // CMP #imm
                let m = self.read_pc_inc();
                self.compare(self.a, m);
            }
            0xC5 => {
                // CMP zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.compare(self.a, m);
            }
            0xD5 => {
                // CMP zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.compare(self.a, m);
            }
            0xCD => {
                // CMP abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.compare(self.a, m);
            }
            0xDD => {
                // CMP abs,X
                let m = self.abs_indexed_read(self.x);
                self.compare(self.a, m);
            }
            0xD9 => {
                // CMP abs,Y
                let m = self.abs_indexed_read(self.y);
                self.compare(self.a, m);
            }
            0xC1 => {
                // CMP (zp,X)
                let addr = self.ind_x();
                let m = self.bus.read(addr);
                self.compare(self.a, m);
            }
            0xD1 => {
                // CMP (zp),Y
                let m = self.ind_y_read();
                self.compare(self.a, m);
            }

            0xE0 => {
                // CPX #imm
                let m = self.read_pc_inc();
                self.compare(self.x, m);
            }
            0xE4 => {
                // CPX zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.compare(self.x, m);
            }
            0xEC => {
                // CPX abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.compare(self.x, m);
            }

            0xC0 => {
                // CPY #imm
                let m = self.read_pc_inc();
                self.compare(self.y, m);
            }
            0xC4 => {
                // CPY zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.compare(self.y, m);
            }
            0xCC => {
                // CPY abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.compare(self.y, m);
            }

            // ========== Logical ==========
            0x29 => {
                // AND #imm
                let m = self.read_pc_inc();
                self.a &= m;
                self.p.set_nz(self.a);
            }
            0x25 => {
                // AND zp
                let addr = self.zp();
                self.a &= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x35 => {
                // AND zp,X
                let addr = self.zp_indexed(self.x);
                self.a &= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x2D => {
                // AND abs
                let addr = self.abs();
                self.a &= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x3D => {
                // AND abs,X
                let m = self.abs_indexed_read(self.x);
                self.a &= m;
                self.p.set_nz(self.a);
            }
            0x39 => {
                // AND abs,Y
                let m = self.abs_indexed_read(self.y);
                self.a &= m;
                self.p.set_nz(self.a);
            }
            0x21 => {
                // AND (zp,X)
                let addr = self.ind_x();
                self.a &= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x31 => {
                // AND (zp),Y
                let m = self.ind_y_read();
                self.a &= m;
                self.p.set_nz(self.a);
            }

            0x09 => {
                // ORA #imm
                let m = self.read_pc_inc();
                self.a |= m;
                self.p.set_nz(self.a);
            }
            0x05 => {
                // ORA zp
                let addr = self.zp();
                self.a |= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x15 => {
                // ORA zp,X
                let addr = self.zp_indexed(self.x);
                self.a |= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x0D => {
                // ORA abs
                let addr = self.abs();
                self.a |= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x1D => {
                // ORA abs,X
                let m = self.abs_indexed_read(self.x);
                self.a |= m;
                self.p.set_nz(self.a);
            }
            0x19 => {
                // ORA abs,Y
                let m = self.abs_indexed_read(self.y);
                self.a |= m;
                self.p.set_nz(self.a);
            }
            0x01 => {
                // ORA (zp,X)
                let addr = self.ind_x();
                self.a |= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x11 => {
                // ORA (zp),Y
                let m = self.ind_y_read();
                self.a |= m;
                self.p.set_nz(self.a);
            }

            0x49 => {
                // EOR #imm
                let m = self.read_pc_inc();
                self.a ^= m;
                self.p.set_nz(self.a);
            }
            0x45 => {
                // EOR zp
                let addr = self.zp();
                self.a ^= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x55 => {
                // EOR zp,X
                let addr = self.zp_indexed(self.x);
                self.a ^= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x4D => {
                // EOR abs
                let addr = self.abs();
                self.a ^= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x5D => {
                // EOR abs,X
                let m = self.abs_indexed_read(self.x);
                self.a ^= m;
                self.p.set_nz(self.a);
            }
            0x59 => {
                // EOR abs,Y
                let m = self.abs_indexed_read(self.y);
                self.a ^= m;
                self.p.set_nz(self.a);
            }
            0x41 => {
                // EOR (zp,X)
                let addr = self.ind_x();
                self.a ^= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            0x51 => {
                // EOR (zp),Y
                let m = self.ind_y_read();
                self.a ^= m;
                self.p.set_nz(self.a);
            }

            0x24 => {
                // BIT zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.bit(m);
            }
            0x2C => {
                // BIT abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.bit(m);
            }

            // ========== Shifts and Rotates ==========
            0x0A => {
                // ASL A
                self.a = self.asl(self.a);
            }
            0x06 => {
                // ASL zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                let result = self.asl(m);
                self.store(addr, result);
            }
            0x16 => {
                // ASL zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.asl(m);
                self.store(addr, result);
            }
            0x0E => {
                // ASL abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                let result = self.asl(m);
                self.store(addr, result);
            }
            0x1E => {
                // ASL abs,X: re-timed on CMOS, which pays for crossings.
                let (addr, crossed) = self.abs_indexed(self.x);
                if cfg!(feature = "cmos") && crossed {
                    self.penalty += 1;
                }
                let m = self.bus.read(addr);
                let result = self.asl(m);
                self.store(addr, result);
            }

            0x4A => {
                // LSR A
                self.a = self.lsr(self.a);
            }
            0x46 => {
                // LSR zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                let result = self.lsr(m);
                self.store(addr, result);
            }
            0x56 => {
                // LSR zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.lsr(m);
                self.store(addr, result);
            }
            0x4E => {
                // LSR abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                let result = self.lsr(m);
                self.store(addr, result);
            }
            0x5E => {
                // LSR abs,X
                let (addr, crossed) = self.abs_indexed(self.x);
                if cfg!(feature = "cmos") && crossed {
                    self.penalty += 1;
                }
                let m = self.bus.read(addr);
                let result = self.lsr(m);
                self.store(addr, result);
            }

            0x2A => {
                // ROL A
                self.a = self.rol(self.a);
            }
            0x26 => {
                // ROL zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                let result = self.rol(m);
                self.store(addr, result);
            }
            0x36 => {
                // ROL zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.rol(m);
                self.store(addr, result);
            }
            0x2E => {
                // ROL abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                let result = self.rol(m);
                self.store(addr, result);
            }
            0x3E => {
                // ROL abs,X
                let (addr, _) = self.abs_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.rol(m);
                self.store(addr, result);
            }

            0x6A => {
                // ROR A
                self.a = self.ror(self.a);
            }
            0x66 => {
                // ROR zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                let result = self.ror(m);
                self.store(addr, result);
            }
            0x76 => {
                // ROR zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.ror(m);
                self.store(addr, result);
            }
            0x6E => {
                // ROR abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                let result = self.ror(m);
                self.store(addr, result);
            }
            0x7E => {
                // ROR abs,X
                let (addr, _) = self.abs_indexed(self.x);
                let m = self.bus.read(addr);
                let result = self.ror(m);
                self.store(addr, result);
            }

            // ========== Increment / Decrement ==========
            0xE6 => {
                // INC zp
                let addr = self.zp();
                let m = self.bus.read(addr).wrapping_add(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xF6 => {
                // INC zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr).wrapping_add(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xEE => {
                // INC abs
                let addr = self.abs();
                let m = self.bus.read(addr).wrapping_add(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xFE => {
                // INC abs,X
                let (addr, _) = self.abs_indexed(self.x);
                let m = self.bus.read(addr).wrapping_add(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }

            0xC6 => {
                // DEC zp
                let addr = self.zp();
                let m = self.bus.read(addr).wrapping_sub(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xD6 => {
                // DEC zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr).wrapping_sub(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xCE => {
                // DEC abs
                let addr = self.abs();
                let m = self.bus.read(addr).wrapping_sub(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }
            0xDE => {
                // DEC abs,X
                let (addr, _) = self.abs_indexed(self.x);
                let m = self.bus.read(addr).wrapping_sub(1);
                self.p.set_nz(m);
                self.store(addr, m);
            }

            0xE8 => {
                // INX
                self.x = self.x.wrapping_add(1);
                self.p.set_nz(self.x);
            }
            0xC8 => {
                // INY
                self.y = self.y.wrapping_add(1);
                self.p.set_nz(self.y);
            }
            0xCA => {
                // DEX
                self.x = self.x.wrapping_sub(1);
                self.p.set_nz(self.x);
            }
            0x88 => {
                // DEY
                self.y = self.y.wrapping_sub(1);
                self.p.set_nz(self.y);
            }

            0xEA => {} // NOP

            // ========== 65C02 Extensions ==========
            #[cfg(feature = "cmos")]
            0x0F | 0x1F | 0x2F | 0x3F | 0x4F | 0x5F | 0x6F | 0x7F => {
                // BBRn zp,rel
                self.branch_on_bit(opcode, false);
            }
            #[cfg(feature = "cmos")]
            0x8F | 0x9F | 0xAF | 0xBF | 0xCF | 0xDF | 0xEF | 0xFF => {
                // BBSn zp,rel
                self.branch_on_bit(opcode, true);
            }

            #[cfg(feature = "cmos")]
            0x80 => {
                // BRA
                self.branch(true);
            }

            #[cfg(feature = "cmos")]
            0x5A => {
                // PHY
                let y = self.y;
                self.stack_push(y);
            }
            #[cfg(feature = "cmos")]
            0xDA => {
                // PHX
                let x = self.x;
                self.stack_push(x);
            }
            #[cfg(feature = "cmos")]
            0x7A => {
                // PLY
                let m = self.stack_pull();
                self.y = m;
                self.p.set_nz(m);
            }
            #[cfg(feature = "cmos")]
            0xFA => {
                // PLX
                let m = self.stack_pull();
                self.x = m;
                self.p.set_nz(m);
            }

            #[cfg(feature = "cmos")]
            0x64 => {
                // STZ zp
                let addr = self.zp();
                self.store(addr, 0x00);
            }
            #[cfg(feature = "cmos")]
            0x74 => {
                // STZ zp,X
                let addr = self.zp_indexed(self.x);
                self.store(addr, 0x00);
            }
            #[cfg(feature = "cmos")]
            0x9C => {
                // STZ abs
                let addr = self.abs();
                self.store(addr, 0x00);
            }
            #[cfg(feature = "cmos")]
            0x9E => {
                // STZ abs,X
                let (addr, _) = self.abs_indexed(self.x);
                self.store(addr, 0x00);
            }

            #[cfg(feature = "cmos")]
            0xB2 => {
                // LDA (zp)
                let addr = self.zp_ind();
                let m = self.bus.read(addr);
                self.a = m;
                self.p.set_nz(m);
            }
            #[cfg(feature = "cmos")]
            0x92 => {
                // STA (zp)
                let addr = self.zp_ind();
                self.store(addr, self.a);
            }
            #[cfg(feature = "cmos")]
            0x72 => {
                // ADC (zp)
                let addr = self.zp_ind();
                let m = self.bus.read(addr);
                self.adc(m);
            }
            #[cfg(feature = "cmos")]
            0xF2 => {
                // SBC (zp)
                let addr = self.zp_ind();
                let m = self.bus.read(addr);
                self.sbc(m);
            }
            #[cfg(feature = "cmos")]
            0xD2 => {
                // CMP (zp)
                let addr = self.zp_ind();
                let m = self.bus.read(addr);
                self.compare(self.a, m);
            }
            #[cfg(feature = "cmos")]
            0x12 => {
                // ORA (zp)
                let addr = self.zp_ind();
                self.a |= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            #[cfg(feature = "cmos")]
            0x32 => {
                // AND (zp)
                let addr = self.zp_ind();
                self.a &= self.bus.read(addr);
                self.p.set_nz(self.a);
            }
            #[cfg(feature = "cmos")]
            0x52 => {
                // EOR (zp)
                let addr = self.zp_ind();
                self.a ^= self.bus.read(addr);
                self.p.set_nz(self.a);
            }

            #[cfg(feature = "cmos")]
            0x04 => {
                // TSB zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.p.change(flags::Z, m & self.a == 0);
                self.store(addr, m | self.a);
            }
            #[cfg(feature = "cmos")]
            0x0C => {
                // TSB abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.p.change(flags::Z, m & self.a == 0);
                self.store(addr, m | self.a);
            }
            #[cfg(feature = "cmos")]
            0x14 => {
                // TRB zp
                let addr = self.zp();
                let m = self.bus.read(addr);
                self.p.change(flags::Z, m & self.a == 0);
                self.store(addr, m & !self.a);
            }
            #[cfg(feature = "cmos")]
            0x1C => {
                // TRB abs
                let addr = self.abs();
                let m = self.bus.read(addr);
                self.p.change(flags::Z, m & self.a == 0);
                self.store(addr, m & !self.a);
            }

            #[cfg(feature = "cmos")]
            0x1A => {
                // INC A
                self.a = self.a.wrapping_add(1);
                self.p.set_nz(self.a);
            }
            #[cfg(feature = "cmos")]
            0x3A => {
                // DEC A
                self.a = self.a.wrapping_sub(1);
                self.p.set_nz(self.a);
            }

            #[cfg(feature = "cmos")]
            0x7C => {
                // JMP (abs,X)
                let (ptr, _) = self.abs_indexed(self.x);
                let low = u16::from(self.bus.read(ptr));
                let high = u16::from(self.bus.read(ptr.wrapping_add(1)));
                self.pc = low | high << 8;
            }

            #[cfg(feature = "cmos")]
            0x89 => {
                // BIT #imm updates Z only.
                let m = self.read_pc_inc();
                self.p.change(flags::Z, self.a & m == 0);
            }
            #[cfg(feature = "cmos")]
            0x34 => {
                // BIT zp,X
                let addr = self.zp_indexed(self.x);
                let m = self.bus.read(addr);
                self.bit(m);
            }
            #[cfg(feature = "cmos")]
            0x3C => {
                // BIT abs,X
                let m = self.abs_indexed_read(self.x);
                self.bit(m);
            }

            // The 65C02 defines fixed-cost NOPs in the remaining columns.
            #[cfg(feature = "cmos")]
            0x02 | 0x22 | 0x42 | 0x62 | 0x82 | 0xC2 | 0xE2 => {
                // two-byte NOP, 2 cycles
                let _ = self.read_pc_inc();
            }
            #[cfg(feature = "cmos")]
            0x03 | 0x13 | 0x23 | 0x33 | 0x43 | 0x53 | 0x63 | 0x73 | 0x83 | 0x93 | 0xA3 | 0xB3
            | 0xC3 | 0xD3 | 0xE3 | 0xF3 => {
                // one-byte NOP, 1 cycle
            }
            #[cfg(feature = "cmos")]
            0x0B | 0x1B | 0x2B | 0x3B | 0x4B | 0x5B | 0x6B | 0x7B | 0x8B | 0x9B | 0xAB | 0xBB
            | 0xCB | 0xDB | 0xEB | 0xFB => {
                // one-byte NOP, 1 cycle
            }
            #[cfg(feature = "cmos")]
            0x44 => {
                // two-byte NOP, 3 cycles
                let _ = self.read_pc_inc();
            }
            #[cfg(feature = "cmos")]
            0x54 | 0xD4 | 0xF4 => {
                // two-byte NOP, 4 cycles
                let _ = self.read_pc_inc();
            }
            #[cfg(feature = "cmos")]
            0x5C => {
                // three-byte NOP, 8 cycles
                let _ = self.read_pc_inc();
                let _ = self.read_pc_inc();
            }
            #[cfg(feature = "cmos")]
            0xDC | 0xFC => {
                // three-byte NOP, 4 cycles
                let _ = self.read_pc_inc();
                let _ = self.read_pc_inc();
            }

            _ => {
                return Err(CpuError::UnhandledInstruction { opcode, pc: at });
            }
        }

        Ok(())
    }

    /// Common tail of the eight conditional branches (and BRA): fetch the
    /// displacement, then take the branch for +1 cycle, +1 more if the
    /// target lies in a different page than the post-operand PC.
    fn branch(&mut self, condition: bool) {
        let rel = self.read_pc_inc() as i8;
        if condition {
            self.penalty += 1;
            let target = self.pc.wrapping_add_signed(i16::from(rel));
            if page_crossed(self.pc, target) {
                self.penalty += 1;
            }
            self.pc = target;
        }
    }

    /// BBRn/BBSn: test bit `n` (from the opcode's high nibble) of a
    /// zero-page byte and branch on clear/set. A taken branch into another
    /// page costs one extra cycle.
    #[cfg(feature = "cmos")]
    fn branch_on_bit(&mut self, opcode: u8, branch_if_set: bool) {
        let bit = opcode >> 4 & 0x07;
        let addr = self.zp();
        let m = self.bus.read(addr);
        let rel = self.read_pc_inc() as i8;
        if (m >> bit & 1 != 0) == branch_if_set {
            let target = self.pc.wrapping_add_signed(i16::from(rel));
            if page_crossed(self.pc, target) {
                self.penalty += 1;
            }
            self.pc = target;
        }
    }
}
