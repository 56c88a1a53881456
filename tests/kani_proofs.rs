//! Kani formal verification proofs for the CPU core.
//!
//! These proofs use bounded model checking to verify addressing and status
//! invariants for ALL possible inputs.
//!
//! To run these proofs, install Kani and run:
//! ```
//! cargo kani --tests
//! ```
//!
//! They are ignored by the regular test harness.

// Allow the `kani` cfg which is set by the Kani verifier
#![allow(unexpected_cfgs)]

#[cfg(kani)]
mod kani_proofs {
    use emu6502::status::{flags, Status};

    // ========== Stack Address Proofs ==========

    /// Proof: the stack address is always inside page 1 for any S.
    #[kani::proof]
    fn proof_stack_address_always_in_stack_page() {
        let s: u8 = kani::any();
        let stack_addr: u16 = 0x0100 | (s as u16);

        kani::assert(
            (0x0100..=0x01FF).contains(&stack_addr),
            "stack address must be in 0x0100-0x01FF",
        );
    }

    /// Proof: pushes wrap modulo 256 without leaving page 1.
    #[kani::proof]
    fn proof_stack_pointer_wraps_within_page_one() {
        let s: u8 = kani::any();
        let after_push = s.wrapping_sub(1);
        let stack_addr: u16 = 0x0100 | (after_push as u16);

        kani::assert(stack_addr >> 8 == 0x01, "stack stays in page 1");
    }

    // ========== Zero-Page Wrap Proofs ==========

    /// Proof: a zero-page pointer's high-byte fetch never leaves page 0.
    #[kani::proof]
    fn proof_zero_page_pointer_high_fetch_wraps() {
        let zp: u8 = kani::any();
        let high_addr = u16::from(zp.wrapping_add(1));

        kani::assert(high_addr <= 0x00FF, "high byte fetch stays in page 0");
    }

    /// Proof: zero-page indexing never escapes page 0.
    #[kani::proof]
    fn proof_zero_page_indexing_wraps() {
        let base: u8 = kani::any();
        let index: u8 = kani::any();
        let addr = u16::from(base.wrapping_add(index));

        kani::assert(addr <= 0x00FF, "zp,X / zp,Y stays in page 0");
    }

    // ========== Status Register Proofs ==========

    /// Proof: clearing any flag combination leaves B and B2 set.
    #[kani::proof]
    fn proof_clear_preserves_break_bits() {
        let initial: u8 = kani::any();
        let mask: u8 = kani::any();

        let mut p = Status::default();
        p.set_bits(initial);
        p.clear(mask);

        kani::assert(
            p.bits() & (flags::B | flags::B2) == flags::B | flags::B2,
            "B and B2 survive every clear",
        );
    }

    /// Proof: set_nz leaves exactly one of N/Z set for nonzero negatives,
    /// and Z alone for zero.
    #[kani::proof]
    fn proof_set_nz_consistent() {
        let value: u8 = kani::any();

        let mut p = Status::default();
        p.set_nz(value);

        kani::assert(p.is_set(flags::Z) == (value == 0), "Z tracks == 0");
        kani::assert(
            p.is_set(flags::N) == (value & 0x80 != 0),
            "N tracks bit 7",
        );
    }
}
