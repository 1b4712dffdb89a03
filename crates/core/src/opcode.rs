//! The slice of the EVM instruction set the rewriting engine needs to recognise.
//!
//! Only opcodes that drive a scanning decision get their own variant: the jump family,
//! instruction-boundary terminators, the context-free "independent" environment reads, the
//! LOG family that marks the start of compiler metadata, and `PUSH(n)` so immediates can be
//! stepped over. Everything else is carried as `Other(u8)`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumeration of EVM opcodes with their byte values and immediate data sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    STOP,           // 0x00
    ADDRESS,        // 0x30
    ORIGIN,         // 0x32
    CODESIZE,       // 0x38
    GASPRICE,       // 0x3a
    RETURNDATASIZE, // 0x3d
    TIMESTAMP,      // 0x42
    NUMBER,         // 0x43
    DIFFICULTY,     // 0x44
    GASLIMIT,       // 0x45
    CHAINID,        // 0x46
    JUMP,           // 0x56
    JUMPI,          // 0x57
    JUMPDEST,       // 0x5b
    PUSH(u8),       // 0x60–0x7f (PUSH1 to PUSH32)
    LOG(u8),        // 0xa0–0xa4 (LOG0 to LOG4)
    RETURN,         // 0xf3
    REVERT,         // 0xfd
    INVALID,        // 0xfe
    SELFDESTRUCT,   // 0xff
    Other(u8),
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::STOP => write!(f, "STOP"),
            Self::ADDRESS => write!(f, "ADDRESS"),
            Self::ORIGIN => write!(f, "ORIGIN"),
            Self::CODESIZE => write!(f, "CODESIZE"),
            Self::GASPRICE => write!(f, "GASPRICE"),
            Self::RETURNDATASIZE => write!(f, "RETURNDATASIZE"),
            Self::TIMESTAMP => write!(f, "TIMESTAMP"),
            Self::NUMBER => write!(f, "NUMBER"),
            Self::DIFFICULTY => write!(f, "DIFFICULTY"),
            Self::GASLIMIT => write!(f, "GASLIMIT"),
            Self::CHAINID => write!(f, "CHAINID"),
            Self::JUMP => write!(f, "JUMP"),
            Self::JUMPI => write!(f, "JUMPI"),
            Self::JUMPDEST => write!(f, "JUMPDEST"),
            Self::PUSH(n) => write!(f, "PUSH{n}"),
            Self::LOG(n) => write!(f, "LOG{n}"),
            Self::RETURN => write!(f, "RETURN"),
            Self::REVERT => write!(f, "REVERT"),
            Self::INVALID => write!(f, "INVALID"),
            Self::SELFDESTRUCT => write!(f, "SELFDESTRUCT"),
            Self::Other(byte) => write!(f, "UNKNOWN_0x{byte:02x}"),
        }
    }
}

impl Opcode {
    /// Parses a raw byte into an `Opcode` and its immediate data size.
    ///
    /// # Examples
    /// ```
    /// use bosc_core::opcode::Opcode;
    ///
    /// assert_eq!(Opcode::parse(0x60), (Opcode::PUSH(1), 1));
    /// assert_eq!(Opcode::parse(0x56), (Opcode::JUMP, 0));
    /// ```
    pub const fn parse(byte: u8) -> (Self, usize) {
        match byte {
            0x00 => (Self::STOP, 0),
            0x30 => (Self::ADDRESS, 0),
            0x32 => (Self::ORIGIN, 0),
            0x38 => (Self::CODESIZE, 0),
            0x3a => (Self::GASPRICE, 0),
            0x3d => (Self::RETURNDATASIZE, 0),
            0x42 => (Self::TIMESTAMP, 0),
            0x43 => (Self::NUMBER, 0),
            0x44 => (Self::DIFFICULTY, 0),
            0x45 => (Self::GASLIMIT, 0),
            0x46 => (Self::CHAINID, 0),
            0x56 => (Self::JUMP, 0),
            0x57 => (Self::JUMPI, 0),
            0x5b => (Self::JUMPDEST, 0),
            0x60..=0x7f => {
                let n = byte - 0x5f;
                (Self::PUSH(n), n as usize)
            }
            0xa0..=0xa4 => (Self::LOG(byte - 0xa0), 0),
            0xf3 => (Self::RETURN, 0),
            0xfd => (Self::REVERT, 0),
            0xfe => (Self::INVALID, 0),
            0xff => (Self::SELFDESTRUCT, 0),
            other => (Self::Other(other), 0),
        }
    }

    /// Converts the opcode to its byte representation.
    pub const fn to_byte(&self) -> u8 {
        match self {
            Self::STOP => 0x00,
            Self::ADDRESS => 0x30,
            Self::ORIGIN => 0x32,
            Self::CODESIZE => 0x38,
            Self::GASPRICE => 0x3a,
            Self::RETURNDATASIZE => 0x3d,
            Self::TIMESTAMP => 0x42,
            Self::NUMBER => 0x43,
            Self::DIFFICULTY => 0x44,
            Self::GASLIMIT => 0x45,
            Self::CHAINID => 0x46,
            Self::JUMP => 0x56,
            Self::JUMPI => 0x57,
            Self::JUMPDEST => 0x5b,
            Self::PUSH(n) => 0x5f + *n,
            Self::LOG(n) => 0xa0 + *n,
            Self::RETURN => 0xf3,
            Self::REVERT => 0xfd,
            Self::INVALID => 0xfe,
            Self::SELFDESTRUCT => 0xff,
            Self::Other(byte) => *byte,
        }
    }

    /// Returns true for `JUMP` and `JUMPI`.
    pub const fn is_jump(&self) -> bool {
        matches!(self, Self::JUMP | Self::JUMPI)
    }

    /// Opcodes before which new code may be spliced without landing inside an immediate.
    ///
    /// Jump destinations, terminators, and a handful of operand-free opcodes.
    pub const fn is_insertion_boundary(&self) -> bool {
        matches!(
            self,
            Self::JUMPDEST
                | Self::RETURN
                | Self::REVERT
                | Self::INVALID
                | Self::RETURNDATASIZE
                | Self::SELFDESTRUCT
                | Self::STOP
                | Self::ORIGIN
        )
    }

    /// Context-free environment reads with no stack inputs; any two can trade places.
    pub const fn is_independent(&self) -> bool {
        matches!(
            self,
            Self::CODESIZE
                | Self::GASPRICE
                | Self::ADDRESS
                | Self::TIMESTAMP
                | Self::NUMBER
                | Self::DIFFICULTY
                | Self::GASLIMIT
                | Self::CHAINID
        )
    }

    /// `LOG1`..`LOG4`, whose first occurrence past the runtime start marks the auxdata.
    pub const fn is_auxdata_marker(&self) -> bool {
        matches!(self, Self::LOG(1..=4))
    }
}
