//! C/C++ toolchain classification: vendor, version, and capability facts.
//!
//! Vendors impersonate each other's identity macros, so classification is an
//! ordered disambiguation chain, not a lookup: Intel compilers also emit
//! GCC- or Clang-style signals and are checked first, Clang emits the GCC
//! signal and is checked before it, and MinGW is a nested reclassification
//! inside the GCC branch.

mod macros;
pub mod probe;

pub use macros::{MacroSet, MacroValue};

use crate::error::{LandasError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Toolchain vendors distinguishable from predefined macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerType {
    #[default]
    Unknown,
    Gcc,
    Clang,
    Msvc,
    IntelClassic,
    IntelLlvm,
    Mingw,
}

impl CompilerType {
    pub fn name(self) -> &'static str {
        match self {
            CompilerType::Gcc => "gcc",
            CompilerType::Clang => "clang",
            CompilerType::Msvc => "msvc",
            CompilerType::IntelClassic => "intel_classic",
            CompilerType::IntelLlvm => "intel_llvm",
            CompilerType::Mingw => "mingw",
            CompilerType::Unknown => "unknown",
        }
    }
}

/// Classifies the vendor from a macro set. The chain order is load-bearing.
pub fn classify_compiler(macros: &MacroSet) -> CompilerType {
    // Intel first: both Intel families define GCC- or Clang-style macros too
    if macros.is_defined("__INTEL_COMPILER")
        || macros.is_defined("__ICL")
        || macros.is_defined("__ICC")
        || macros.is_defined("__INTEL_LLVM_COMPILER")
    {
        if macros.is_defined("__clang__") {
            CompilerType::IntelLlvm
        } else {
            CompilerType::IntelClassic
        }
    } else if macros.is_defined("__clang__") {
        // before GCC: Clang defines __GNUC__ for compatibility
        CompilerType::Clang
    } else if macros.is_defined("__GNUC__") {
        if macros.is_defined("__MINGW32__") || macros.is_defined("__MINGW64__") {
            CompilerType::Mingw
        } else {
            CompilerType::Gcc
        }
    } else if macros.is_defined("_MSC_VER") {
        CompilerType::Msvc
    } else {
        CompilerType::Unknown
    }
}

/// Three-component toolchain version, ordered lexicographically.
///
/// The default value (0, 0, 0) means "version unknown" and orders below any
/// real release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct CompilerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl CompilerVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for CompilerVersion {
    type Err = LandasError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        let mut component = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(text) => text
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| LandasError::InvalidVersionFormat(s.to_string())),
                None if required => Err(LandasError::InvalidVersionFormat(s.to_string())),
                None => Ok(0),
            }
        };
        let major = component(true)?;
        let minor = component(false)?;
        let patch = component(false)?;
        Ok(Self::new(major, minor, patch))
    }
}

/// Decodes the version from vendor-specific macros.
///
/// The chain mirrors the classification order: an Intel version macro wins
/// over the Clang components it also publishes, which win over the GCC
/// components Clang publishes in turn. GCC's patchlevel defaults to zero when
/// absent. MSVC's combined `_MSC_VER` is mapped through the known release
/// boundaries, each boundary contributing a minor generation and an offset
/// patch; values below every boundary fall back to a digit split.
pub fn decode_compiler_version(macros: &MacroSet) -> CompilerVersion {
    if let Some(value) = macros.int_value("__INTEL_COMPILER") {
        // Intel's combined VVRR format
        return CompilerVersion::new(
            (value / 100) as u32,
            ((value % 100) / 10) as u32,
            (value % 10) as u32,
        );
    }
    if macros.is_defined("__clang__") {
        return CompilerVersion::new(
            macros.int_value("__clang_major__").unwrap_or(0) as u32,
            macros.int_value("__clang_minor__").unwrap_or(0) as u32,
            macros.int_value("__clang_patchlevel__").unwrap_or(0) as u32,
        );
    }
    if let Some(major) = macros.int_value("__GNUC__") {
        return CompilerVersion::new(
            major as u32,
            macros.int_value("__GNUC_MINOR__").unwrap_or(0) as u32,
            macros.int_value("__GNUC_PATCHLEVEL__").unwrap_or(0) as u32,
        );
    }
    if let Some(value) = macros.int_value("_MSC_VER") {
        return decode_msvc_version(value);
    }
    CompilerVersion::default()
}

fn decode_msvc_version(msc_ver: i64) -> CompilerVersion {
    let boundaries = [
        (1940, 19, 4), // Visual Studio 2022 17.10+
        (1930, 19, 3), // Visual Studio 2022 17.0-17.9
        (1920, 19, 2), // Visual Studio 2019
        (1910, 19, 1), // Visual Studio 2017
        (1900, 19, 0), // Visual Studio 2015
    ];
    for (boundary, major, minor) in boundaries {
        if msc_ver >= boundary {
            return CompilerVersion::new(major, minor, (msc_ver - boundary) as u32);
        }
    }
    CompilerVersion::new(
        (msc_ver / 100) as u32,
        ((msc_ver % 100) / 10) as u32,
        (msc_ver % 10) as u32,
    )
}

/// Whether the vendor supports `__has_builtin`-style attribute probing.
pub fn has_builtin_attribute(compiler: CompilerType) -> bool {
    matches!(
        compiler,
        CompilerType::Gcc | CompilerType::Clang | CompilerType::Mingw | CompilerType::IntelLlvm
    )
}

/// Whether the vendor accepts GNU-style inline assembly.
pub fn supports_inline_assembly(compiler: CompilerType) -> bool {
    matches!(
        compiler,
        CompilerType::Gcc
            | CompilerType::Clang
            | CompilerType::Mingw
            | CompilerType::IntelClassic
            | CompilerType::IntelLlvm
    )
}

/// Whether the vendor emits colored diagnostics.
pub fn has_color_diagnostics(compiler: CompilerType) -> bool {
    matches!(
        compiler,
        CompilerType::Gcc | CompilerType::Clang | CompilerType::Mingw | CompilerType::IntelLlvm
    )
}

/// Classified vendor, decoded version, and the derived capability facts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompilerInfo {
    pub compiler: CompilerType,
    pub version: CompilerVersion,
    pub name: &'static str,
    pub has_builtin_attribute: bool,
    pub has_inline_assembly: bool,
    pub has_color_diagnostics: bool,
}

impl CompilerInfo {
    pub fn from_macros(macros: &MacroSet) -> Self {
        let compiler = classify_compiler(macros);
        Self {
            compiler,
            version: decode_compiler_version(macros),
            name: compiler.name(),
            has_builtin_attribute: has_builtin_attribute(compiler),
            has_inline_assembly: supports_inline_assembly(compiler),
            has_color_diagnostics: has_color_diagnostics(compiler),
        }
    }

    pub fn is_at_least(&self, major: u32, minor: u32) -> bool {
        self.version >= CompilerVersion::new(major, minor, 0)
    }

    /// GCC-compatible vendors: gcc itself, MinGW, and classic Intel, which
    /// tracks GCC's dialect and builtins.
    pub fn is_gcc_compatible(&self) -> bool {
        matches!(
            self.compiler,
            CompilerType::Gcc | CompilerType::Mingw | CompilerType::IntelClassic
        )
    }

    pub fn is_clang_compatible(&self) -> bool {
        matches!(self.compiler, CompilerType::Clang | CompilerType::IntelLlvm)
    }
}

/// Toolchain info for the natively probed compiler; unknown when no
/// toolchain could be probed.
pub fn compiler_info() -> CompilerInfo {
    CompilerInfo::from_macros(probe::native_macro_set())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcc_macros(major: i64, minor: i64, patch: i64) -> MacroSet {
        let mut set = MacroSet::new();
        set.define_int("__GNUC__", major);
        set.define_int("__GNUC_MINOR__", minor);
        set.define_int("__GNUC_PATCHLEVEL__", patch);
        set
    }

    fn clang_macros(major: i64, minor: i64, patch: i64) -> MacroSet {
        let mut set = gcc_macros(4, 2, 1);
        set.define_int("__clang__", 1);
        set.define_int("__clang_major__", major);
        set.define_int("__clang_minor__", minor);
        set.define_int("__clang_patchlevel__", patch);
        set
    }

    #[test]
    fn test_classify_plain_gcc() {
        assert_eq!(classify_compiler(&gcc_macros(13, 2, 0)), CompilerType::Gcc);
    }

    #[test]
    fn test_clang_wins_over_gcc_signal() {
        // Clang publishes __GNUC__ for compatibility
        assert_eq!(
            classify_compiler(&clang_macros(17, 0, 6)),
            CompilerType::Clang
        );
    }

    #[test]
    fn test_intel_wins_over_clang_and_gcc_signals() {
        let mut set = clang_macros(17, 0, 0);
        set.define_int("__INTEL_LLVM_COMPILER", 20240_200);
        assert_eq!(classify_compiler(&set), CompilerType::IntelLlvm);

        let mut set = gcc_macros(13, 0, 0);
        set.define_int("__INTEL_COMPILER", 2021);
        assert_eq!(classify_compiler(&set), CompilerType::IntelClassic);
    }

    #[test]
    fn test_mingw_reclassified_within_gcc_branch() {
        let mut set = gcc_macros(12, 1, 0);
        set.define_int("__MINGW32__", 1);
        assert_eq!(classify_compiler(&set), CompilerType::Mingw);

        let mut set = gcc_macros(12, 1, 0);
        set.define_int("__MINGW64__", 1);
        assert_eq!(classify_compiler(&set), CompilerType::Mingw);
    }

    #[test]
    fn test_msvc_and_unknown() {
        let mut set = MacroSet::new();
        set.define_int("_MSC_VER", 1938);
        assert_eq!(classify_compiler(&set), CompilerType::Msvc);
        assert_eq!(classify_compiler(&MacroSet::new()), CompilerType::Unknown);
    }

    #[test]
    fn test_decode_gcc_version() {
        assert_eq!(
            decode_compiler_version(&gcc_macros(13, 2, 1)),
            CompilerVersion::new(13, 2, 1)
        );
        // patchlevel defaults to zero when the toolchain omits it
        let mut set = MacroSet::new();
        set.define_int("__GNUC__", 9);
        set.define_int("__GNUC_MINOR__", 5);
        assert_eq!(decode_compiler_version(&set), CompilerVersion::new(9, 5, 0));
    }

    #[test]
    fn test_decode_clang_version_ignores_gcc_compat_components() {
        assert_eq!(
            decode_compiler_version(&clang_macros(17, 0, 6)),
            CompilerVersion::new(17, 0, 6)
        );
    }

    #[test]
    fn test_decode_intel_vvrr() {
        let mut set = gcc_macros(13, 0, 0);
        set.define_int("__INTEL_COMPILER", 1910);
        assert_eq!(decode_compiler_version(&set), CompilerVersion::new(19, 1, 0));
        set.define_int("__INTEL_COMPILER", 2021);
        assert_eq!(decode_compiler_version(&set), CompilerVersion::new(20, 2, 1));
    }

    #[test]
    fn test_decode_intel_llvm_uses_clang_components() {
        // icpx publishes __INTEL_LLVM_COMPILER but no __INTEL_COMPILER
        let mut set = clang_macros(17, 0, 0);
        set.define_int("__INTEL_LLVM_COMPILER", 20240_200);
        assert_eq!(decode_compiler_version(&set), CompilerVersion::new(17, 0, 0));
    }

    #[test]
    fn test_decode_msvc_release_boundaries() {
        let cases = [
            (1941, CompilerVersion::new(19, 4, 1)),
            (1940, CompilerVersion::new(19, 4, 0)),
            (1938, CompilerVersion::new(19, 3, 8)),
            (1930, CompilerVersion::new(19, 3, 0)),
            (1929, CompilerVersion::new(19, 2, 9)),
            (1920, CompilerVersion::new(19, 2, 0)),
            (1916, CompilerVersion::new(19, 1, 6)),
            (1910, CompilerVersion::new(19, 1, 0)),
            (1900, CompilerVersion::new(19, 0, 0)),
            // below every boundary: generic digit split
            (1800, CompilerVersion::new(18, 0, 0)),
            (1599, CompilerVersion::new(15, 9, 9)),
        ];
        for (msc_ver, expected) in cases {
            let mut set = MacroSet::new();
            set.define_int("_MSC_VER", msc_ver);
            assert_eq!(decode_compiler_version(&set), expected, "_MSC_VER {msc_ver}");
        }
    }

    #[test]
    fn test_unknown_vendor_decodes_zero() {
        assert_eq!(
            decode_compiler_version(&MacroSet::new()),
            CompilerVersion::default()
        );
    }

    #[test]
    fn test_version_ordering_is_total() {
        let a = CompilerVersion::new(9, 5, 2);
        let b = CompilerVersion::new(10, 2, 0);
        let c = CompilerVersion::new(10, 2, 1);
        assert!(a < b && b < c && a < c);
        assert!(c > b && b > a);
        assert_eq!(c, CompilerVersion::new(10, 2, 1));
        assert!(c >= b && a <= b);
        // exactly one of <, ==, > holds
        for (x, y) in [(a, b), (b, c), (a, c), (a, a)] {
            let relations = [x < y, x == y, x > y].iter().filter(|&&r| r).count();
            assert_eq!(relations, 1);
        }
        // the zero sentinel orders below anything real
        assert!(CompilerVersion::default() < CompilerVersion::new(0, 0, 1));
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!(
            "19.38.33134".parse::<CompilerVersion>().unwrap(),
            CompilerVersion::new(19, 38, 33134)
        );
        assert_eq!(
            "13.2".parse::<CompilerVersion>().unwrap(),
            CompilerVersion::new(13, 2, 0)
        );
        assert!("".parse::<CompilerVersion>().is_err());
        assert!("x.y".parse::<CompilerVersion>().is_err());
    }

    #[test]
    fn test_capability_allow_lists() {
        assert!(has_builtin_attribute(CompilerType::Gcc));
        assert!(has_builtin_attribute(CompilerType::IntelLlvm));
        assert!(!has_builtin_attribute(CompilerType::IntelClassic));
        assert!(!has_builtin_attribute(CompilerType::Msvc));

        assert!(supports_inline_assembly(CompilerType::IntelClassic));
        assert!(supports_inline_assembly(CompilerType::Mingw));
        assert!(!supports_inline_assembly(CompilerType::Msvc));
        assert!(!supports_inline_assembly(CompilerType::Unknown));

        assert!(has_color_diagnostics(CompilerType::Clang));
        assert!(!has_color_diagnostics(CompilerType::IntelClassic));
    }

    #[test]
    fn test_compiler_info_compatibility_groups() {
        let gcc = CompilerInfo::from_macros(&gcc_macros(11, 2, 0));
        assert!(gcc.is_gcc_compatible());
        assert!(!gcc.is_clang_compatible());
        assert_eq!(gcc.name, "gcc");
        assert!(gcc.is_at_least(7, 0));
        assert!(gcc.is_at_least(11, 2));
        assert!(!gcc.is_at_least(11, 3));

        let clang = CompilerInfo::from_macros(&clang_macros(16, 0, 0));
        assert!(clang.is_clang_compatible());
        assert!(!clang.is_gcc_compatible());

        let mut intel = gcc_macros(13, 0, 0);
        intel.define_int("__INTEL_COMPILER", 1900);
        let intel = CompilerInfo::from_macros(&intel);
        assert!(intel.is_gcc_compatible());
        assert!(!intel.is_clang_compatible());
    }
}
