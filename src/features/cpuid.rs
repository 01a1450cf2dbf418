//! Hardware capability probe for the CPU this process runs on.
//!
//! On x86 the queries go through CPUID with a fixed leaf/register/bit table,
//! guarded by the maximum leaf the processor reports. Other families answer
//! from what the build target guarantees. The probe never fails, it only
//! answers false.

use crate::features::RuntimeFeature;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CpuidRegister {
    Ebx,
    Ecx,
    Edx,
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
struct CpuidQuery {
    leaf: u32,
    subleaf: u32,
    register: CpuidRegister,
    bit: u32,
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const fn query_for(feature: RuntimeFeature) -> Option<CpuidQuery> {
    use CpuidRegister::{Ebx, Ecx, Edx};
    let (leaf, subleaf, register, bit) = match feature {
        RuntimeFeature::Sse => (1, 0, Edx, 25),
        RuntimeFeature::Sse2 => (1, 0, Edx, 26),
        RuntimeFeature::Sse3 => (1, 0, Ecx, 0),
        RuntimeFeature::Sse4_1 => (1, 0, Ecx, 19),
        RuntimeFeature::Sse4_2 => (1, 0, Ecx, 20),
        RuntimeFeature::Avx => (1, 0, Ecx, 28),
        RuntimeFeature::Avx2 => (7, 0, Ebx, 5),
        RuntimeFeature::Avx512f => (7, 0, Ebx, 16),
        RuntimeFeature::HardwareAes => (1, 0, Ecx, 25),
        RuntimeFeature::HardwareRandom => (1, 0, Ecx, 30),
        RuntimeFeature::Neon => return None,
    };
    Some(CpuidQuery {
        leaf,
        subleaf,
        register,
        bit,
    })
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn check_cpu_bit(query: &CpuidQuery) -> bool {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{__cpuid, __cpuid_count};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{__cpuid, __cpuid_count};

    // SAFETY: CPUID is always available on the x86 targets Rust supports
    let max_leaf = unsafe { __cpuid(0) }.eax;
    if query.leaf > max_leaf {
        return false;
    }
    // SAFETY: the leaf is within the range reported by leaf 0
    let result = unsafe { __cpuid_count(query.leaf, query.subleaf) };
    let register = match query.register {
        CpuidRegister::Ebx => result.ebx,
        CpuidRegister::Ecx => result.ecx,
        CpuidRegister::Edx => result.edx,
    };
    register & (1 << query.bit) != 0
}

/// Whether the running CPU supports `feature`.
pub fn probe_runtime_feature(feature: RuntimeFeature) -> bool {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        match query_for(feature) {
            Some(query) => check_cpu_bit(&query),
            None => false,
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        match feature {
            // NEON is part of the AArch64 baseline
            RuntimeFeature::Neon => true,
            RuntimeFeature::HardwareAes => cfg!(target_feature = "aes"),
            _ => false,
        }
    }
    #[cfg(target_arch = "arm")]
    {
        matches!(feature, RuntimeFeature::Neon) && cfg!(target_feature = "neon")
    }
    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm"
    )))]
    {
        let _ = feature;
        false
    }
}
