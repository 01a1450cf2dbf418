//! Aggregated detection report.
//!
//! Pulls every classifier together into one [`PlatformReport`] value that can
//! be rendered as the sectioned text report or serialized as JSON. The text
//! layout is fixed: six sections, two-space indented rows with the value
//! column starting at offset 23, and `Yes`/`No` for booleans.

use crate::arch::{self, ArchitectureInfo};
use crate::compiler::{CompilerInfo, MacroSet, probe};
use crate::endian::{self, EndiannessInfo};
use crate::features::FeatureSet;
use crate::os::{
    self, PlatformInfo, has_posix_api, has_win32_api, supports_case_sensitive_filesystem,
};
use crate::standard::{self, CxxStandardInfo, StandardFeature};
use serde::Serialize;

/// Standard-feature verdicts resolved against one macro set, kept alongside
/// the classified standard so the report does not need the macro set again.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StandardFeatureFlags {
    pub structured_bindings: bool,
    pub if_constexpr: bool,
    pub concepts: bool,
    pub coroutines: bool,
    pub modules: bool,
    pub ranges: bool,
}

impl StandardFeatureFlags {
    pub fn from_macros(macros: &MacroSet) -> Self {
        Self {
            structured_bindings: standard::has_standard_feature(
                macros,
                StandardFeature::StructuredBindings,
            ),
            if_constexpr: standard::has_standard_feature(macros, StandardFeature::IfConstexpr),
            concepts: standard::has_standard_feature(macros, StandardFeature::Concepts),
            coroutines: standard::has_standard_feature(macros, StandardFeature::Coroutines),
            modules: standard::has_standard_feature(macros, StandardFeature::Modules),
            ranges: standard::has_standard_feature(macros, StandardFeature::Ranges),
        }
    }
}

/// Everything the detectors know, in one place.
///
/// The toolchain side (compiler, standard, language features) comes from the
/// given macro set; the platform, architecture and runtime sides describe the
/// machine this process runs on.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformReport {
    pub compiler: CompilerInfo,
    pub platform: PlatformInfo,
    pub architecture: ArchitectureInfo,
    pub standard: CxxStandardInfo,
    pub standard_features: StandardFeatureFlags,
    pub features: FeatureSet,
    pub endianness: EndiannessInfo,
}

impl PlatformReport {
    pub fn from_macros(macros: &MacroSet) -> Self {
        Self {
            compiler: CompilerInfo::from_macros(macros),
            platform: os::platform_info(),
            architecture: arch::architecture_info(),
            standard: CxxStandardInfo::from_macros(macros),
            standard_features: StandardFeatureFlags::from_macros(macros),
            features: FeatureSet::from_macros(macros).with_runtime_probe(),
            endianness: endian::endianness_info(),
        }
    }

    /// Renders the full sectioned text report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Landas Platform Detection Report v{}\n",
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&"=".repeat(60));
        out.push_str("\n\n");

        push_section(&mut out, "COMPILER INFORMATION:");
        push_row(&mut out, "Type", self.compiler.name);
        push_row(&mut out, "Version", self.compiler.version);
        push_row(&mut out, "Builtin Attributes", yes_no(self.compiler.has_builtin_attribute));
        push_row(&mut out, "Inline Assembly", yes_no(self.compiler.has_inline_assembly));
        push_row(&mut out, "Color Diagnostics", yes_no(self.compiler.has_color_diagnostics));
        push_row(&mut out, "GCC Compatible", yes_no(self.compiler.is_gcc_compatible()));
        push_row(&mut out, "Clang Compatible", yes_no(self.compiler.is_clang_compatible()));
        out.push('\n');

        push_section(&mut out, "PLATFORM INFORMATION:");
        push_row(&mut out, "Operating System", self.platform.os_name);
        push_row(&mut out, "Kernel Family", self.platform.kernel_family);
        push_row(&mut out, "Environment Type", self.platform.environment.name());
        push_row(&mut out, "POSIX API", yes_no(has_posix_api(self.platform.os)));
        push_row(&mut out, "Windows API", yes_no(has_win32_api(self.platform.os)));
        push_row(
            &mut out,
            "Case Sensitive FS",
            yes_no(supports_case_sensitive_filesystem(self.platform.os)),
        );
        out.push('\n');

        push_section(&mut out, "ARCHITECTURE INFORMATION:");
        push_row(&mut out, "CPU Architecture", self.architecture.arch_name);
        push_row(
            &mut out,
            "Pointer Size",
            format!("{} bits", self.architecture.pointer_size_bits),
        );
        push_row(&mut out, "Byte Order", self.architecture.byte_order.name());
        push_row(
            &mut out,
            "Cache Line Size",
            format!("{} bytes", self.architecture.cache_line_size),
        );
        push_row(
            &mut out,
            "Unaligned Access",
            yes_no(self.architecture.supports_unaligned_access()),
        );
        push_row(&mut out, "SIMD Support", yes_no(self.architecture.has_simd_support()));
        out.push('\n');

        push_section(&mut out, "C++ STANDARD INFORMATION:");
        push_row(&mut out, "Standard Version", self.standard.standard_name);
        push_row(&mut out, "Version Macro", self.standard.version_macro);
        push_row(
            &mut out,
            "Structured Bindings",
            yes_no(self.standard_features.structured_bindings),
        );
        push_row(&mut out, "If Constexpr", yes_no(self.standard_features.if_constexpr));
        push_row(&mut out, "Concepts", yes_no(self.standard_features.concepts));
        push_row(&mut out, "Coroutines", yes_no(self.standard_features.coroutines));
        push_row(&mut out, "Modules", yes_no(self.standard_features.modules));
        push_row(&mut out, "Ranges", yes_no(self.standard_features.ranges));
        out.push('\n');

        push_section(&mut out, "FEATURE AVAILABILITY:");
        push_row(&mut out, "Exceptions", yes_no(self.features.has_exceptions));
        push_row(&mut out, "RTTI", yes_no(self.features.has_rtti));
        push_row(&mut out, "Threads", yes_no(self.features.has_threads));
        push_row(&mut out, "Atomic Operations", yes_no(self.features.has_atomic_operations));
        push_row(&mut out, "Inline Assembly", yes_no(self.features.has_inline_assembly));
        push_row(&mut out, "SSE Support", yes_no(self.features.has_sse));
        push_row(&mut out, "AVX Support", yes_no(self.features.has_avx));
        push_row(&mut out, "NEON Support", yes_no(self.features.has_neon));
        out.push('\n');

        push_section(&mut out, "ENDIANNESS INFORMATION:");
        push_row(&mut out, "Byte Order", self.endianness.byte_order.name());
        push_row(&mut out, "Little Endian", yes_no(self.endianness.is_little_endian));
        push_row(&mut out, "Big Endian", yes_no(self.endianness.is_big_endian));
        out.push('\n');

        push_section(&mut out, "DEBUG INFORMATION:");
        push_row(&mut out, "Debug Build", yes_no(is_debug_build()));
        push_row(&mut out, "Release Build", yes_no(is_release_build()));
        out.push('\n');

        out.push_str(&"=".repeat(60));
        out.push('\n');
        out.push_str(&format!(
            "Report generated by landas v{}\n",
            env!("CARGO_PKG_VERSION")
        ));
        out
    }

    /// One-line summary, e.g. `gcc 13.2 on Linux x86_64 (64-bit)`.
    pub fn brief_summary(&self) -> String {
        format!(
            "{} {}.{} on {} {} ({}-bit)",
            self.compiler.name,
            self.compiler.version.major,
            self.compiler.version.minor,
            self.platform.os_name,
            self.architecture.arch_name,
            self.architecture.pointer_size_bits
        )
    }
}

fn push_section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len() + 4));
    out.push('\n');
}

fn push_row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let label = format!("{label}:");
    out.push_str(&format!("  {label:<21}{value}\n"));
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Report for the natively probed toolchain and the host machine.
pub fn platform_report() -> PlatformReport {
    PlatformReport::from_macros(probe::native_macro_set())
}

/// Whether this binary was compiled with debug assertions.
pub fn is_debug_build() -> bool {
    cfg!(debug_assertions)
}

pub fn is_release_build() -> bool {
    !is_debug_build()
}
