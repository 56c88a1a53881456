//! # Base Cycle Tables
//!
//! One 256-entry table of base cycle counts per variant, indexed by opcode
//! byte. Page-crossing and branch penalties are added dynamically by the
//! dispatcher; the values here are the published minimum costs.
//!
//! Entries for opcodes the dispatcher does not handle are never consulted.
//! The dispatcher asserts that every opcode it does handle has a positive
//! entry, so a zero here for a dispatched opcode is an internal bug, not a
//! runtime condition.

/// Base cycle counts for the NMOS 6502 instruction set.
#[cfg(not(feature = "cmos"))]
pub const CYCLES: [u8; 256] = [
    //         0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    /* 0x0_ */ 7, 6, 2, 1, 3, 3, 5, 0, 3, 2, 2, 1, 6, 4, 6, 5,
    /* 0x1_ */ 2, 5, 5, 1, 5, 4, 6, 0, 2, 4, 2, 1, 6, 4, 7, 5,
    /* 0x2_ */ 6, 6, 2, 1, 3, 3, 5, 0, 4, 2, 2, 1, 4, 4, 6, 5,
    /* 0x3_ */ 2, 5, 0, 1, 0, 4, 6, 0, 2, 4, 2, 1, 0, 4, 7, 5,
    /* 0x4_ */ 6, 6, 2, 1, 3, 3, 5, 0, 3, 2, 2, 1, 3, 4, 6, 5,
    /* 0x5_ */ 2, 5, 0, 1, 4, 4, 6, 0, 2, 4, 3, 1, 8, 4, 7, 5,
    /* 0x6_ */ 6, 6, 2, 1, 3, 3, 5, 0, 4, 2, 2, 1, 5, 4, 6, 5,
    /* 0x7_ */ 2, 5, 5, 1, 0, 4, 6, 0, 2, 4, 4, 1, 6, 4, 7, 5,
    /* 0x8_ */ 2, 6, 2, 1, 3, 3, 3, 0, 2, 2, 2, 1, 4, 4, 4, 5,
    /* 0x9_ */ 2, 6, 5, 1, 4, 4, 4, 0, 2, 5, 2, 1, 4, 5, 5, 5,
    /* 0xA_ */ 2, 6, 2, 1, 3, 3, 3, 0, 2, 2, 2, 1, 4, 4, 4, 5,
    /* 0xB_ */ 2, 5, 5, 1, 4, 4, 4, 0, 2, 4, 2, 1, 4, 4, 4, 5,
    /* 0xC_ */ 2, 6, 2, 1, 3, 3, 5, 0, 2, 2, 2, 1, 4, 4, 3, 5,
    /* 0xD_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 3, 1, 4, 4, 7, 5,
    /* 0xE_ */ 2, 6, 2, 1, 3, 3, 5, 0, 2, 2, 2, 2, 4, 4, 6, 5,
    /* 0xF_ */ 2, 5, 0, 1, 4, 4, 6, 0, 2, 4, 4, 1, 4, 4, 7, 5,
];

/// Base cycle counts for the 65C02 instruction set.
///
/// Differs from the NMOS table where the CMOS part re-timed instructions
/// (ASL/LSR abs,X drop to 6 plus a crossing penalty) and where the
/// extension opcodes (BBR/BBS, STZ, TRB/TSB, the `(zp)` forms, the fixed
/// multi-byte NOPs) fill former illegal slots.
#[cfg(feature = "cmos")]
pub const CYCLES: [u8; 256] = [
    //         0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    /* 0x0_ */ 7, 6, 2, 1, 5, 3, 5, 0, 3, 2, 2, 1, 6, 4, 6, 5,
    /* 0x1_ */ 2, 5, 5, 1, 5, 4, 6, 0, 2, 4, 2, 1, 6, 4, 6, 5,
    /* 0x2_ */ 6, 6, 2, 1, 3, 3, 5, 0, 4, 2, 2, 1, 4, 4, 6, 5,
    /* 0x3_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 2, 1, 4, 4, 6, 5,
    /* 0x4_ */ 6, 6, 2, 1, 3, 3, 5, 0, 3, 2, 2, 1, 3, 4, 6, 5,
    /* 0x5_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 3, 1, 8, 4, 6, 5,
    /* 0x6_ */ 6, 6, 2, 1, 3, 3, 5, 0, 4, 2, 2, 1, 5, 4, 6, 5,
    /* 0x7_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 4, 1, 6, 4, 6, 5,
    /* 0x8_ */ 2, 6, 2, 1, 3, 3, 3, 0, 2, 2, 2, 1, 4, 4, 4, 5,
    /* 0x9_ */ 2, 6, 5, 1, 4, 4, 4, 0, 2, 5, 2, 1, 4, 5, 6, 5,
    /* 0xA_ */ 2, 6, 2, 1, 3, 3, 3, 0, 2, 2, 2, 1, 4, 4, 4, 5,
    /* 0xB_ */ 2, 5, 5, 1, 4, 4, 4, 0, 2, 4, 2, 1, 4, 4, 4, 5,
    /* 0xC_ */ 2, 6, 2, 1, 3, 3, 5, 0, 2, 2, 2, 1, 4, 4, 3, 5,
    /* 0xD_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 3, 1, 4, 4, 7, 5,
    /* 0xE_ */ 2, 6, 2, 1, 3, 3, 5, 0, 2, 2, 2, 2, 4, 4, 6, 5,
    /* 0xF_ */ 2, 5, 5, 1, 4, 4, 6, 0, 2, 4, 4, 1, 4, 4, 7, 5,
];
