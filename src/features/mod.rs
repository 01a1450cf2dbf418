//! Language and hardware feature detection.
//!
//! The language group is read off the probed toolchain's macro set, the
//! runtime group off the CPU the process runs on. The two meet in
//! [`FeatureSet`].

mod cpuid;

pub use cpuid::probe_runtime_feature;

use crate::compiler::{MacroSet, probe};
use serde::Serialize;
use std::sync::OnceLock;

/// Build-time determined capabilities of the native toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageFeature {
    Exceptions,
    Rtti,
    Threads,
    AtomicOperations,
    InlineAssembly,
    VectorIntrinsics,
    StackProtection,
    AddressSanitizer,
    ThreadSanitizer,
    MemorySanitizer,
    UndefinedBehaviorSanitizer,
}

impl LanguageFeature {
    pub const ALL: [LanguageFeature; 11] = [
        LanguageFeature::Exceptions,
        LanguageFeature::Rtti,
        LanguageFeature::Threads,
        LanguageFeature::AtomicOperations,
        LanguageFeature::InlineAssembly,
        LanguageFeature::VectorIntrinsics,
        LanguageFeature::StackProtection,
        LanguageFeature::AddressSanitizer,
        LanguageFeature::ThreadSanitizer,
        LanguageFeature::MemorySanitizer,
        LanguageFeature::UndefinedBehaviorSanitizer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LanguageFeature::Exceptions => "exceptions",
            LanguageFeature::Rtti => "rtti",
            LanguageFeature::Threads => "threads",
            LanguageFeature::AtomicOperations => "atomic operations",
            LanguageFeature::InlineAssembly => "inline assembly",
            LanguageFeature::VectorIntrinsics => "vector intrinsics",
            LanguageFeature::StackProtection => "stack protection",
            LanguageFeature::AddressSanitizer => "address sanitizer",
            LanguageFeature::ThreadSanitizer => "thread sanitizer",
            LanguageFeature::MemorySanitizer => "memory sanitizer",
            LanguageFeature::UndefinedBehaviorSanitizer => "undefined behavior sanitizer",
        }
    }
}

/// Hardware capabilities that only the running CPU can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeFeature {
    Sse,
    Sse2,
    Sse3,
    Sse4_1,
    Sse4_2,
    Avx,
    Avx2,
    Avx512f,
    Neon,
    HardwareAes,
    HardwareRandom,
}

impl RuntimeFeature {
    pub const ALL: [RuntimeFeature; 11] = [
        RuntimeFeature::Sse,
        RuntimeFeature::Sse2,
        RuntimeFeature::Sse3,
        RuntimeFeature::Sse4_1,
        RuntimeFeature::Sse4_2,
        RuntimeFeature::Avx,
        RuntimeFeature::Avx2,
        RuntimeFeature::Avx512f,
        RuntimeFeature::Neon,
        RuntimeFeature::HardwareAes,
        RuntimeFeature::HardwareRandom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuntimeFeature::Sse => "sse",
            RuntimeFeature::Sse2 => "sse2",
            RuntimeFeature::Sse3 => "sse3",
            RuntimeFeature::Sse4_1 => "sse4.1",
            RuntimeFeature::Sse4_2 => "sse4.2",
            RuntimeFeature::Avx => "avx",
            RuntimeFeature::Avx2 => "avx2",
            RuntimeFeature::Avx512f => "avx512f",
            RuntimeFeature::Neon => "neon",
            RuntimeFeature::HardwareAes => "hardware aes",
            RuntimeFeature::HardwareRandom => "hardware random",
        }
    }
}

pub fn detect_exceptions(macros: &MacroSet) -> bool {
    macros.is_defined("__cpp_exceptions")
        || macros.is_defined("__EXCEPTIONS")
        || macros.is_defined("_CPPUNWIND")
}

/// RTTI leaves no positive trace on every toolchain. An identified GNU or
/// MSVC compiler without any of the markers reads as disabled, an
/// unidentified one as enabled.
pub fn detect_rtti(macros: &MacroSet) -> bool {
    if macros.is_defined("__cpp_rtti")
        || macros.is_defined("__GXX_RTTI")
        || macros.is_defined("_CPPRTTI")
    {
        return true;
    }
    !(macros.is_defined("__GNUC__") || macros.is_defined("_MSC_VER"))
}

pub fn detect_threads(macros: &MacroSet) -> bool {
    if macros.is_defined("__STDCPP_THREADS__") {
        return macros.int_value("__STDCPP_THREADS__").unwrap_or(0) == 1;
    }
    macros.is_defined("_REENTRANT") || macros.is_defined("_MT")
}

/// Atomics ship with every standard library this crate can meet.
pub fn detect_atomic_operations() -> bool {
    true
}

pub fn detect_inline_assembly(macros: &MacroSet) -> bool {
    if macros.is_defined("__GNUC__") || macros.is_defined("__clang__") {
        return true;
    }
    macros.is_defined("_MSC_VER")
        && (macros.is_defined("_M_IX86") || macros.is_defined("_M_X64"))
}

pub fn detect_vector_intrinsics(macros: &MacroSet) -> bool {
    let x86 = macros.is_defined("__x86_64__")
        || macros.is_defined("__i386__")
        || macros.is_defined("_M_X64")
        || macros.is_defined("_M_IX86");
    let arm = macros.is_defined("__ARM_NEON") || macros.is_defined("__aarch64__");
    x86 || arm
}

pub fn detect_stack_protection(macros: &MacroSet) -> bool {
    macros.is_defined("__STACK_CHK_FAIL")
        || macros.is_defined("__SSP__")
        || macros.is_defined("__SSP_ALL__")
        || macros.int_value("_FORTIFY_SOURCE").unwrap_or(0) > 0
}

/// The full capability picture: language side and runtime side together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureSet {
    pub has_exceptions: bool,
    pub has_rtti: bool,
    pub has_threads: bool,
    pub has_atomic_operations: bool,
    pub has_inline_assembly: bool,
    pub has_vector_intrinsics: bool,
    pub has_stack_protection: bool,
    pub has_address_sanitizer: bool,
    pub has_thread_sanitizer: bool,
    pub has_memory_sanitizer: bool,
    pub has_undefined_behavior_sanitizer: bool,

    pub has_sse: bool,
    pub has_sse2: bool,
    pub has_sse3: bool,
    pub has_sse4_1: bool,
    pub has_sse4_2: bool,
    pub has_avx: bool,
    pub has_avx2: bool,
    pub has_avx512f: bool,
    pub has_neon: bool,
    pub has_hardware_aes: bool,
    pub has_hardware_random: bool,
}

impl FeatureSet {
    /// Language side from toolchain macros. The runtime group stays false
    /// until [`FeatureSet::with_runtime_probe`] fills it in.
    pub fn from_macros(macros: &MacroSet) -> Self {
        Self {
            has_exceptions: detect_exceptions(macros),
            has_rtti: detect_rtti(macros),
            has_threads: detect_threads(macros),
            has_atomic_operations: detect_atomic_operations(),
            has_inline_assembly: detect_inline_assembly(macros),
            has_vector_intrinsics: detect_vector_intrinsics(macros),
            has_stack_protection: detect_stack_protection(macros),
            has_address_sanitizer: macros.is_defined("__SANITIZE_ADDRESS__"),
            has_thread_sanitizer: macros.is_defined("__SANITIZE_THREAD__"),
            has_memory_sanitizer: macros.is_defined("__SANITIZE_MEMORY__"),
            has_undefined_behavior_sanitizer: macros.is_defined("__SANITIZE_UNDEFINED__"),
            ..Self::default()
        }
    }

    pub fn with_runtime_probe(mut self) -> Self {
        self.has_sse = probe_runtime_feature(RuntimeFeature::Sse);
        self.has_sse2 = probe_runtime_feature(RuntimeFeature::Sse2);
        self.has_sse3 = probe_runtime_feature(RuntimeFeature::Sse3);
        self.has_sse4_1 = probe_runtime_feature(RuntimeFeature::Sse4_1);
        self.has_sse4_2 = probe_runtime_feature(RuntimeFeature::Sse4_2);
        self.has_avx = probe_runtime_feature(RuntimeFeature::Avx);
        self.has_avx2 = probe_runtime_feature(RuntimeFeature::Avx2);
        self.has_avx512f = probe_runtime_feature(RuntimeFeature::Avx512f);
        self.has_neon = probe_runtime_feature(RuntimeFeature::Neon);
        self.has_hardware_aes = probe_runtime_feature(RuntimeFeature::HardwareAes);
        self.has_hardware_random = probe_runtime_feature(RuntimeFeature::HardwareRandom);
        self
    }

    pub fn has_language_feature(&self, feature: LanguageFeature) -> bool {
        match feature {
            LanguageFeature::Exceptions => self.has_exceptions,
            LanguageFeature::Rtti => self.has_rtti,
            LanguageFeature::Threads => self.has_threads,
            LanguageFeature::AtomicOperations => self.has_atomic_operations,
            LanguageFeature::InlineAssembly => self.has_inline_assembly,
            LanguageFeature::VectorIntrinsics => self.has_vector_intrinsics,
            LanguageFeature::StackProtection => self.has_stack_protection,
            LanguageFeature::AddressSanitizer => self.has_address_sanitizer,
            LanguageFeature::ThreadSanitizer => self.has_thread_sanitizer,
            LanguageFeature::MemorySanitizer => self.has_memory_sanitizer,
            LanguageFeature::UndefinedBehaviorSanitizer => self.has_undefined_behavior_sanitizer,
        }
    }

    pub fn has_runtime_feature(&self, feature: RuntimeFeature) -> bool {
        match feature {
            RuntimeFeature::Sse => self.has_sse,
            RuntimeFeature::Sse2 => self.has_sse2,
            RuntimeFeature::Sse3 => self.has_sse3,
            RuntimeFeature::Sse4_1 => self.has_sse4_1,
            RuntimeFeature::Sse4_2 => self.has_sse4_2,
            RuntimeFeature::Avx => self.has_avx,
            RuntimeFeature::Avx2 => self.has_avx2,
            RuntimeFeature::Avx512f => self.has_avx512f,
            RuntimeFeature::Neon => self.has_neon,
            RuntimeFeature::HardwareAes => self.has_hardware_aes,
            RuntimeFeature::HardwareRandom => self.has_hardware_random,
        }
    }
}

static FEATURES: OnceLock<FeatureSet> = OnceLock::new();

/// Feature set for this process: language side from the probed toolchain,
/// runtime side from the host CPU. Probed once.
pub fn feature_set() -> FeatureSet {
    *FEATURES
        .get_or_init(|| FeatureSet::from_macros(probe::native_macro_set()).with_runtime_probe())
}
