//! Byte-order classification and conversion utilities.
//!
//! The classifier works through a fixed priority list of environment signals
//! and only falls back to inspecting memory layout when no signal settles the
//! question. Conversion helpers (byte swapping, network order) are built on
//! the classified native order.

use crate::arch::CpuArchitecture;
use serde::Serialize;

/// Byte ordering of multi-byte values in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Unknown,
    LittleEndian,
    BigEndian,
    MixedEndian,
}

impl ByteOrder {
    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian",
            ByteOrder::BigEndian => "Big Endian",
            ByteOrder::MixedEndian => "Mixed Endian",
            ByteOrder::Unknown => "Unknown",
        }
    }
}

/// A `__BYTE_ORDER__`-style signal: the observed value together with the two
/// named constants it is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTriplet {
    pub value: u32,
    pub little: u32,
    pub big: u32,
}

/// Raw inputs to the byte-order classifier.
///
/// `little_flag`/`big_flag` stand for any explicit endianness variant signal
/// the environment provides (an `ARMEL`/`ARMEB`-style flag or the target
/// endianness fact the compiler guarantees).
#[derive(Debug, Clone, Default)]
pub struct ByteOrderSignals {
    pub order_macro: Option<OrderTriplet>,
    pub bsd_order_macro: Option<OrderTriplet>,
    pub windows_family: bool,
    pub little_flag: bool,
    pub big_flag: bool,
    pub architecture: CpuArchitecture,
}

impl ByteOrderSignals {
    /// Signals for the build target, from facts the compiler guarantees.
    pub fn from_build_target() -> Self {
        Self {
            order_macro: None,
            bsd_order_macro: None,
            windows_family: cfg!(windows),
            little_flag: cfg!(target_endian = "little"),
            big_flag: cfg!(target_endian = "big"),
            architecture: crate::arch::cpu_architecture(),
        }
    }
}

/// Classifies byte order from environment signals, first match wins.
///
/// Priority: named-constant triplet, BSD-style triplet, the Windows shortcut
/// (little-endian on every architecture it supports), explicit little/big
/// flags, then architectures whose byte order is implied a priori. Bi-endian
/// families without an explicit flag fall through to the memory probe.
pub fn classify_byte_order(signals: &ByteOrderSignals) -> ByteOrder {
    if let Some(triplet) = signals.order_macro {
        return decode_triplet(triplet);
    }
    if let Some(triplet) = signals.bsd_order_macro {
        return decode_triplet(triplet);
    }
    if signals.windows_family {
        return ByteOrder::LittleEndian;
    }
    if signals.little_flag {
        return ByteOrder::LittleEndian;
    }
    if signals.big_flag {
        return ByteOrder::BigEndian;
    }
    match signals.architecture {
        CpuArchitecture::X86
        | CpuArchitecture::X86_64
        | CpuArchitecture::ArmV8_64
        | CpuArchitecture::RiscV32
        | CpuArchitecture::RiscV64 => ByteOrder::LittleEndian,
        CpuArchitecture::Sparc | CpuArchitecture::Sparc64 => ByteOrder::BigEndian,
        _ => probe_byte_order(),
    }
}

fn decode_triplet(triplet: OrderTriplet) -> ByteOrder {
    if triplet.value == triplet.little {
        ByteOrder::LittleEndian
    } else if triplet.value == triplet.big {
        ByteOrder::BigEndian
    } else {
        ByteOrder::MixedEndian
    }
}

/// Infers byte order from the memory layout of a known pattern.
///
/// Writes `0x01020304` and inspects the first byte of its in-memory
/// representation. A leading `0x01` means the most significant byte comes
/// first (big-endian), a leading `0x04` the least significant (little-endian).
/// Anything else is classified as mixed rather than treated as an error.
pub fn probe_byte_order() -> ByteOrder {
    let pattern: u32 = 0x0102_0304;
    match pattern.to_ne_bytes()[0] {
        0x01 => ByteOrder::BigEndian,
        0x04 => ByteOrder::LittleEndian,
        _ => ByteOrder::MixedEndian,
    }
}

/// Byte order of the build target.
pub fn byte_order() -> ByteOrder {
    classify_byte_order(&ByteOrderSignals::from_build_target())
}

/// Classified byte order plus the two derived flags, ready for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EndiannessInfo {
    pub byte_order: ByteOrder,
    pub is_little_endian: bool,
    pub is_big_endian: bool,
}

impl EndiannessInfo {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            is_little_endian: byte_order == ByteOrder::LittleEndian,
            is_big_endian: byte_order == ByteOrder::BigEndian,
        }
    }

    pub fn is_native_order(&self, order: ByteOrder) -> bool {
        self.byte_order == order
    }

    /// Whether data in `target_order` needs swapping to match the native
    /// order. Unknown on either side conservatively reports no swap.
    pub fn needs_byte_swap(&self, target_order: ByteOrder) -> bool {
        if self.byte_order == ByteOrder::Unknown || target_order == ByteOrder::Unknown {
            return false;
        }
        self.byte_order != target_order
    }
}

/// Endianness of the build target.
pub fn endianness_info() -> EndiannessInfo {
    EndiannessInfo::new(byte_order())
}

pub fn byte_swap16(value: u16) -> u16 {
    value.swap_bytes()
}

pub fn byte_swap32(value: u32) -> u32 {
    value.swap_bytes()
}

pub fn byte_swap64(value: u64) -> u64 {
    value.swap_bytes()
}

/// Unsigned integers whose byte order can be reversed.
pub trait ByteSwap: Copy {
    fn swap_byte_order(self) -> Self;
}

impl ByteSwap for u16 {
    fn swap_byte_order(self) -> Self {
        self.swap_bytes()
    }
}

impl ByteSwap for u32 {
    fn swap_byte_order(self) -> Self {
        self.swap_bytes()
    }
}

impl ByteSwap for u64 {
    fn swap_byte_order(self) -> Self {
        self.swap_bytes()
    }
}

/// Unknown orders are treated as compatible so that conversion degrades to a
/// no-op instead of corrupting data on exotic targets.
pub fn are_byte_orders_compatible(a: ByteOrder, b: ByteOrder) -> bool {
    if a == ByteOrder::Unknown || b == ByteOrder::Unknown {
        return true;
    }
    a == b
}

/// Reorders `value` from one byte order to another; a no-op when the orders
/// are compatible.
pub fn convert_byte_order<T: ByteSwap>(value: T, from_order: ByteOrder, to_order: ByteOrder) -> T {
    if are_byte_orders_compatible(from_order, to_order) {
        value
    } else {
        value.swap_byte_order()
    }
}

/// Converts from host byte order to network byte order (big-endian).
pub fn host_to_network<T: ByteSwap>(value: T) -> T {
    if byte_order() == ByteOrder::LittleEndian {
        value.swap_byte_order()
    } else {
        // big-endian or unknown hosts pass through unchanged
        value
    }
}

/// Converts from network byte order (big-endian) to host byte order.
pub fn network_to_host<T: ByteSwap>(value: T) -> T {
    if byte_order() == ByteOrder::LittleEndian {
        value.swap_byte_order()
    } else {
        value
    }
}
