//! CPU architecture classification from the build target triple.
//!
//! The classifier is an ordered rule list over the architecture component of
//! the triple. Order matters: 64-bit signals are matched before their looser
//! 32-bit counterparts, and AArch64 before the generic ARM prefix, because
//! the specific spellings also satisfy the general ones.

use crate::endian::ByteOrder;
use serde::Serialize;

/// CPU architecture families and variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuArchitecture {
    #[default]
    Unknown,
    X86,
    X86_64,
    ArmV6,
    ArmV7,
    ArmV8_32,
    ArmV8_64,
    Mips,
    Mips64,
    Powerpc,
    Powerpc64,
    RiscV32,
    RiscV64,
    Sparc,
    Sparc64,
}

/// Classifies the architecture component of a target triple.
///
/// Accepts either a bare architecture string (`"armv7"`) or a full triple
/// (`"armv7-unknown-linux-gnueabihf"`). Within 32-bit ARM the sub-version is
/// taken from the prefix; a generic `arm`/`thumb` spelling without one
/// defaults to v7, which is the documented policy for toolchains that leave
/// the sub-version implicit.
pub fn classify_target_arch(triple: &str) -> CpuArchitecture {
    let arch = triple.split('-').next().unwrap_or("");

    if arch.starts_with("x86_64") || arch.starts_with("amd64") {
        return CpuArchitecture::X86_64;
    }
    if is_x86_32(arch) {
        return CpuArchitecture::X86;
    }
    if arch.starts_with("aarch64") || arch.starts_with("arm64") {
        return CpuArchitecture::ArmV8_64;
    }
    if arch.starts_with("arm") || arch.starts_with("thumb") {
        return classify_arm_32(arch);
    }
    if arch.starts_with("mips64") {
        return CpuArchitecture::Mips64;
    }
    if arch.starts_with("mips") {
        return CpuArchitecture::Mips;
    }
    if arch.starts_with("powerpc64") || arch.starts_with("ppc64") {
        return CpuArchitecture::Powerpc64;
    }
    if arch.starts_with("powerpc") || arch.starts_with("ppc") {
        return CpuArchitecture::Powerpc;
    }
    if arch.starts_with("riscv64") {
        return CpuArchitecture::RiscV64;
    }
    if arch.starts_with("riscv32") {
        return CpuArchitecture::RiscV32;
    }
    if arch.starts_with("sparc64") || arch.starts_with("sparcv9") {
        return CpuArchitecture::Sparc64;
    }
    if arch.starts_with("sparc") {
        return CpuArchitecture::Sparc;
    }
    CpuArchitecture::Unknown
}

fn is_x86_32(arch: &str) -> bool {
    matches!(arch, "i386" | "i486" | "i586" | "i686" | "x86")
}

fn classify_arm_32(arch: &str) -> CpuArchitecture {
    let version = arch
        .strip_prefix("armv")
        .or_else(|| arch.strip_prefix("armebv"))
        .or_else(|| arch.strip_prefix("thumbv"));
    match version.and_then(|v| v.chars().next()) {
        Some('8') => CpuArchitecture::ArmV8_32,
        Some('7') => CpuArchitecture::ArmV7,
        Some('6') => CpuArchitecture::ArmV6,
        // generic ARM signal without a usable sub-version
        _ => CpuArchitecture::ArmV7,
    }
}

/// Pointer width in bits implied by the architecture tag.
///
/// Unknown architectures fall back to the width of the pointers this build
/// actually uses, the one place the classifier consults the implementation
/// instead of the tag.
pub fn pointer_size_bits(arch: CpuArchitecture) -> u32 {
    match arch {
        CpuArchitecture::X86_64
        | CpuArchitecture::ArmV8_64
        | CpuArchitecture::Mips64
        | CpuArchitecture::Powerpc64
        | CpuArchitecture::RiscV64
        | CpuArchitecture::Sparc64 => 64,
        CpuArchitecture::X86
        | CpuArchitecture::ArmV6
        | CpuArchitecture::ArmV7
        | CpuArchitecture::ArmV8_32
        | CpuArchitecture::Mips
        | CpuArchitecture::Powerpc
        | CpuArchitecture::RiscV32
        | CpuArchitecture::Sparc => 32,
        CpuArchitecture::Unknown => usize::BITS,
    }
}

/// Typical cache line size in bytes for the architecture.
pub fn cache_line_size(arch: CpuArchitecture) -> usize {
    match arch {
        CpuArchitecture::X86 | CpuArchitecture::X86_64 => 64,
        CpuArchitecture::ArmV6 | CpuArchitecture::ArmV7 => 32,
        CpuArchitecture::ArmV8_32 | CpuArchitecture::ArmV8_64 => 64,
        CpuArchitecture::Powerpc | CpuArchitecture::Powerpc64 => 128,
        // safe default for everything else, including unknown
        _ => 64,
    }
}

pub fn arch_name(arch: CpuArchitecture) -> &'static str {
    match arch {
        CpuArchitecture::X86 => "x86",
        CpuArchitecture::X86_64 => "x86_64",
        CpuArchitecture::ArmV6 => "ARM v6",
        CpuArchitecture::ArmV7 => "ARM v7",
        CpuArchitecture::ArmV8_32 => "ARM v8 (32-bit)",
        CpuArchitecture::ArmV8_64 => "ARM v8 (64-bit)",
        CpuArchitecture::Mips => "MIPS",
        CpuArchitecture::Mips64 => "MIPS64",
        CpuArchitecture::Powerpc => "PowerPC",
        CpuArchitecture::Powerpc64 => "PowerPC64",
        CpuArchitecture::RiscV32 => "RISC-V 32",
        CpuArchitecture::RiscV64 => "RISC-V 64",
        CpuArchitecture::Sparc => "SPARC",
        CpuArchitecture::Sparc64 => "SPARC64",
        CpuArchitecture::Unknown => "Unknown",
    }
}

/// Architecture tag plus everything derived from it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArchitectureInfo {
    pub architecture: CpuArchitecture,
    pub byte_order: ByteOrder,
    pub pointer_size_bits: u32,
    pub cache_line_size: usize,
    pub arch_name: &'static str,
}

impl ArchitectureInfo {
    pub fn new(architecture: CpuArchitecture, byte_order: ByteOrder) -> Self {
        Self {
            architecture,
            byte_order,
            pointer_size_bits: pointer_size_bits(architecture),
            cache_line_size: cache_line_size(architecture),
            arch_name: arch_name(architecture),
        }
    }

    pub fn is_64bit(&self) -> bool {
        self.pointer_size_bits == 64
    }

    pub fn is_32bit(&self) -> bool {
        self.pointer_size_bits == 32
    }

    pub fn is_little_endian(&self) -> bool {
        self.byte_order == ByteOrder::LittleEndian
    }

    /// x86 and modern ARM cores handle unaligned loads efficiently; everything
    /// else is excluded by this static allow-list.
    pub fn supports_unaligned_access(&self) -> bool {
        matches!(
            self.architecture,
            CpuArchitecture::X86
                | CpuArchitecture::X86_64
                | CpuArchitecture::ArmV7
                | CpuArchitecture::ArmV8_32
                | CpuArchitecture::ArmV8_64
        )
    }

    pub fn has_simd_support(&self) -> bool {
        matches!(
            self.architecture,
            CpuArchitecture::X86
                | CpuArchitecture::X86_64
                | CpuArchitecture::ArmV7
                | CpuArchitecture::ArmV8_32
                | CpuArchitecture::ArmV8_64
        )
    }

    /// Advanced vector extensions beyond baseline SIMD (AVX class, SVE, RVV).
    pub fn has_vector_instructions(&self) -> bool {
        matches!(
            self.architecture,
            CpuArchitecture::X86_64 | CpuArchitecture::ArmV8_64 | CpuArchitecture::RiscV64
        )
    }

    pub fn supports_cache_line_alignment(&self) -> bool {
        self.cache_line_size > 0
    }

    pub fn is_arm(&self) -> bool {
        matches!(
            self.architecture,
            CpuArchitecture::ArmV6
                | CpuArchitecture::ArmV7
                | CpuArchitecture::ArmV8_32
                | CpuArchitecture::ArmV8_64
        )
    }

    pub fn is_x86(&self) -> bool {
        matches!(
            self.architecture,
            CpuArchitecture::X86 | CpuArchitecture::X86_64
        )
    }
}

/// Architecture of the build target.
pub fn cpu_architecture() -> CpuArchitecture {
    classify_target_arch(crate::TARGET_TRIPLE)
}

/// Architecture info for the build target.
pub fn architecture_info() -> ArchitectureInfo {
    ArchitectureInfo::new(cpu_architecture(), crate::endian::byte_order())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_triples() {
        let cases = [
            ("x86_64-unknown-linux-gnu", CpuArchitecture::X86_64),
            ("x86_64-pc-windows-msvc", CpuArchitecture::X86_64),
            ("amd64-unknown-freebsd", CpuArchitecture::X86_64),
            ("i686-pc-windows-gnu", CpuArchitecture::X86),
            ("i586-unknown-linux-musl", CpuArchitecture::X86),
            ("aarch64-apple-darwin", CpuArchitecture::ArmV8_64),
            ("arm64-apple-ios", CpuArchitecture::ArmV8_64),
            ("aarch64_be-unknown-linux-gnu", CpuArchitecture::ArmV8_64),
            ("armv7-unknown-linux-gnueabihf", CpuArchitecture::ArmV7),
            ("armv6-unknown-netbsd-eabihf", CpuArchitecture::ArmV6),
            ("thumbv8m.main-none-eabi", CpuArchitecture::ArmV8_32),
            ("mips-unknown-linux-gnu", CpuArchitecture::Mips),
            ("mipsel-unknown-linux-gnu", CpuArchitecture::Mips),
            ("mips64-unknown-linux-gnuabi64", CpuArchitecture::Mips64),
            ("mips64el-unknown-linux-gnuabi64", CpuArchitecture::Mips64),
            ("powerpc-unknown-linux-gnu", CpuArchitecture::Powerpc),
            ("powerpc64le-unknown-linux-gnu", CpuArchitecture::Powerpc64),
            ("riscv32imac-unknown-none-elf", CpuArchitecture::RiscV32),
            ("riscv64gc-unknown-linux-gnu", CpuArchitecture::RiscV64),
            ("sparc-unknown-linux-gnu", CpuArchitecture::Sparc),
            ("sparcv9-sun-solaris", CpuArchitecture::Sparc64),
            ("sparc64-unknown-openbsd", CpuArchitecture::Sparc64),
            ("wasm32-unknown-unknown", CpuArchitecture::Unknown),
            ("s390x-unknown-linux-gnu", CpuArchitecture::Unknown),
            ("", CpuArchitecture::Unknown),
        ];
        for (triple, expected) in cases {
            assert_eq!(classify_target_arch(triple), expected, "triple {triple}");
        }
    }

    #[test]
    fn test_specific_signals_win_over_general_ones() {
        // the 64-bit spellings also begin like their 32-bit counterparts
        assert_eq!(classify_target_arch("x86_64"), CpuArchitecture::X86_64);
        assert_eq!(classify_target_arch("mips64"), CpuArchitecture::Mips64);
        assert_eq!(
            classify_target_arch("powerpc64"),
            CpuArchitecture::Powerpc64
        );
        assert_eq!(classify_target_arch("sparc64"), CpuArchitecture::Sparc64);
        assert_eq!(classify_target_arch("aarch64"), CpuArchitecture::ArmV8_64);
    }

    #[test]
    fn test_generic_arm_defaults_to_v7() {
        assert_eq!(classify_target_arch("arm-linux-androideabi"), CpuArchitecture::ArmV7);
        assert_eq!(classify_target_arch("armv5te-unknown-linux-gnueabi"), CpuArchitecture::ArmV7);
    }

    #[test]
    fn test_pointer_size_table() {
        assert_eq!(pointer_size_bits(CpuArchitecture::X86_64), 64);
        assert_eq!(pointer_size_bits(CpuArchitecture::RiscV64), 64);
        assert_eq!(pointer_size_bits(CpuArchitecture::Sparc64), 64);
        assert_eq!(pointer_size_bits(CpuArchitecture::X86), 32);
        assert_eq!(pointer_size_bits(CpuArchitecture::ArmV7), 32);
        assert_eq!(pointer_size_bits(CpuArchitecture::Unknown), usize::BITS);
    }

    #[test]
    fn test_cache_line_table() {
        assert_eq!(cache_line_size(CpuArchitecture::X86_64), 64);
        assert_eq!(cache_line_size(CpuArchitecture::ArmV6), 32);
        assert_eq!(cache_line_size(CpuArchitecture::ArmV7), 32);
        assert_eq!(cache_line_size(CpuArchitecture::ArmV8_64), 64);
        assert_eq!(cache_line_size(CpuArchitecture::Powerpc), 128);
        assert_eq!(cache_line_size(CpuArchitecture::Powerpc64), 128);
        assert_eq!(cache_line_size(CpuArchitecture::Unknown), 64);
        assert_eq!(cache_line_size(CpuArchitecture::Sparc), 64);
    }

    #[test]
    fn test_info_bitness_is_exclusive() {
        for arch in [
            CpuArchitecture::Unknown,
            CpuArchitecture::X86,
            CpuArchitecture::X86_64,
            CpuArchitecture::ArmV8_32,
            CpuArchitecture::Mips64,
        ] {
            let info = ArchitectureInfo::new(arch, ByteOrder::LittleEndian);
            assert_ne!(info.is_64bit(), info.is_32bit());
            assert!(info.pointer_size_bits == 32 || info.pointer_size_bits == 64);
        }
    }

    #[test]
    fn test_simd_and_unaligned_allow_list() {
        let allowed = [
            CpuArchitecture::X86,
            CpuArchitecture::X86_64,
            CpuArchitecture::ArmV7,
            CpuArchitecture::ArmV8_32,
            CpuArchitecture::ArmV8_64,
        ];
        for arch in allowed {
            let info = ArchitectureInfo::new(arch, ByteOrder::LittleEndian);
            assert!(info.has_simd_support());
            assert!(info.supports_unaligned_access());
        }
        for arch in [
            CpuArchitecture::ArmV6,
            CpuArchitecture::Mips,
            CpuArchitecture::Sparc64,
            CpuArchitecture::Unknown,
        ] {
            let info = ArchitectureInfo::new(arch, ByteOrder::BigEndian);
            assert!(!info.has_simd_support());
            assert!(!info.supports_unaligned_access());
        }
    }

    #[test]
    fn test_vector_instruction_allow_list() {
        for (arch, expected) in [
            (CpuArchitecture::X86_64, true),
            (CpuArchitecture::ArmV8_64, true),
            (CpuArchitecture::RiscV64, true),
            (CpuArchitecture::X86, false),
            (CpuArchitecture::ArmV7, false),
            (CpuArchitecture::Unknown, false),
        ] {
            let info = ArchitectureInfo::new(arch, ByteOrder::LittleEndian);
            assert_eq!(info.has_vector_instructions(), expected);
        }
    }

    #[test]
    fn test_family_membership() {
        let info = ArchitectureInfo::new(CpuArchitecture::ArmV8_64, ByteOrder::LittleEndian);
        assert!(info.is_arm());
        assert!(!info.is_x86());
        let info = ArchitectureInfo::new(CpuArchitecture::X86, ByteOrder::LittleEndian);
        assert!(info.is_x86());
        assert!(!info.is_arm());
    }

    #[test]
    fn test_native_detection_matches_cfg() {
        let arch = cpu_architecture();
        if cfg!(target_arch = "x86_64") {
            assert_eq!(arch, CpuArchitecture::X86_64);
        } else if cfg!(target_arch = "x86") {
            assert_eq!(arch, CpuArchitecture::X86);
        } else if cfg!(target_arch = "aarch64") {
            assert_eq!(arch, CpuArchitecture::ArmV8_64);
        }
        // pointer width for a classified architecture matches the build
        if arch != CpuArchitecture::Unknown {
            assert_eq!(pointer_size_bits(arch), usize::BITS);
        }
    }
}
