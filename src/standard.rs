//! C++ language-standard classification.
//!
//! The toolchain announces its language level through `__cplusplus`, except
//! MSVC, which freezes `__cplusplus` at its historical value and publishes
//! the real level as `_MSVC_LANG`. Individual features are announced through
//! feature-test macros with the standard level as fallback.

use crate::compiler::{MacroSet, probe};
use serde::Serialize;

/// Known C++ standards, valued by their version-macro thresholds so that
/// comparing variants compares the standards themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CxxStandard {
    #[default]
    Unknown = -1,
    /// C++98 through C++14.
    Pre17 = 0,
    Cxx17 = 201703,
    Cxx20 = 202002,
    Cxx23 = 202302,
    Cxx26 = 202600,
}

impl CxxStandard {
    pub fn name(self) -> &'static str {
        match self {
            CxxStandard::Cxx17 => "C++17",
            CxxStandard::Cxx20 => "C++20",
            CxxStandard::Cxx23 => "C++23",
            CxxStandard::Cxx26 => "C++26",
            CxxStandard::Pre17 => "Pre-C++17",
            CxxStandard::Unknown => "Unknown",
        }
    }

    /// The version-macro threshold this standard corresponds to.
    pub fn version_value(self) -> i64 {
        self as i64
    }

    pub fn from_version_value(value: i64) -> Self {
        if value >= 202600 {
            CxxStandard::Cxx26
        } else if value >= 202302 {
            CxxStandard::Cxx23
        } else if value >= 202002 {
            CxxStandard::Cxx20
        } else if value >= 201703 {
            CxxStandard::Cxx17
        } else if value >= 199711 {
            CxxStandard::Pre17
        } else {
            CxxStandard::Unknown
        }
    }
}

/// The raw language-level value, `_MSVC_LANG` preferred over `__cplusplus`
/// when both are present. Zero when neither is defined.
pub fn version_macro_value(macros: &MacroSet) -> i64 {
    macros
        .int_value("_MSVC_LANG")
        .or_else(|| macros.int_value("__cplusplus"))
        .unwrap_or(0)
}

pub fn classify_standard(macros: &MacroSet) -> CxxStandard {
    CxxStandard::from_version_value(version_macro_value(macros))
}

/// Classified standard plus the raw macro value it came from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CxxStandardInfo {
    pub standard: CxxStandard,
    pub version_macro: i64,
    pub standard_name: &'static str,
}

impl CxxStandardInfo {
    pub fn from_macros(macros: &MacroSet) -> Self {
        let standard = classify_standard(macros);
        Self {
            standard,
            version_macro: version_macro_value(macros),
            standard_name: standard.name(),
        }
    }

    pub fn is_at_least(&self, other: CxxStandard) -> bool {
        self.standard >= other
    }

    pub fn is_exactly(&self, other: CxxStandard) -> bool {
        self.standard == other
    }
}

/// Language and library features announced by feature-test macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardFeature {
    StructuredBindings,
    IfConstexpr,
    FoldExpressions,
    InlineVariables,
    Concepts,
    Coroutines,
    Modules,
    Ranges,
    Consteval,
    Constinit,
    DesignatedInitializers,
    ThreeWayComparison,
}

struct FeatureTest {
    /// Feature-test macro names; the first one defined decides.
    macros: &'static [&'static str],
    min_value: i64,
    /// Standard that implies the feature when no macro is defined. `None`
    /// means the macro is the only accepted evidence.
    baseline: Option<CxxStandard>,
}

impl StandardFeature {
    pub const ALL: [StandardFeature; 12] = [
        StandardFeature::StructuredBindings,
        StandardFeature::IfConstexpr,
        StandardFeature::FoldExpressions,
        StandardFeature::InlineVariables,
        StandardFeature::Concepts,
        StandardFeature::Coroutines,
        StandardFeature::Modules,
        StandardFeature::Ranges,
        StandardFeature::Consteval,
        StandardFeature::Constinit,
        StandardFeature::DesignatedInitializers,
        StandardFeature::ThreeWayComparison,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StandardFeature::StructuredBindings => "structured bindings",
            StandardFeature::IfConstexpr => "if constexpr",
            StandardFeature::FoldExpressions => "fold expressions",
            StandardFeature::InlineVariables => "inline variables",
            StandardFeature::Concepts => "concepts",
            StandardFeature::Coroutines => "coroutines",
            StandardFeature::Modules => "modules",
            StandardFeature::Ranges => "ranges",
            StandardFeature::Consteval => "consteval",
            StandardFeature::Constinit => "constinit",
            StandardFeature::DesignatedInitializers => "designated initializers",
            StandardFeature::ThreeWayComparison => "three-way comparison",
        }
    }

    fn test(self) -> FeatureTest {
        match self {
            StandardFeature::StructuredBindings => FeatureTest {
                macros: &["__cpp_structured_bindings"],
                min_value: 201606,
                baseline: Some(CxxStandard::Cxx17),
            },
            StandardFeature::IfConstexpr => FeatureTest {
                macros: &["__cpp_if_constexpr"],
                min_value: 201606,
                baseline: Some(CxxStandard::Cxx17),
            },
            StandardFeature::FoldExpressions => FeatureTest {
                macros: &["__cpp_fold_expressions"],
                min_value: 201603,
                baseline: Some(CxxStandard::Cxx17),
            },
            StandardFeature::InlineVariables => FeatureTest {
                macros: &["__cpp_inline_variables"],
                min_value: 201606,
                baseline: Some(CxxStandard::Cxx17),
            },
            StandardFeature::Concepts => FeatureTest {
                macros: &["__cpp_concepts"],
                min_value: 201907,
                baseline: Some(CxxStandard::Cxx20),
            },
            StandardFeature::Coroutines => FeatureTest {
                macros: &["__cpp_impl_coroutine", "__cpp_coroutines"],
                min_value: 201902,
                baseline: Some(CxxStandard::Cxx20),
            },
            // Modules support varies too much between compilers claiming
            // C++20; only the macro counts.
            StandardFeature::Modules => FeatureTest {
                macros: &["__cpp_modules"],
                min_value: 201907,
                baseline: None,
            },
            StandardFeature::Ranges => FeatureTest {
                macros: &["__cpp_lib_ranges"],
                min_value: 201911,
                baseline: Some(CxxStandard::Cxx20),
            },
            StandardFeature::Consteval => FeatureTest {
                macros: &["__cpp_consteval"],
                min_value: 201811,
                baseline: Some(CxxStandard::Cxx20),
            },
            StandardFeature::Constinit => FeatureTest {
                macros: &["__cpp_constinit"],
                min_value: 201907,
                baseline: Some(CxxStandard::Cxx20),
            },
            StandardFeature::DesignatedInitializers => FeatureTest {
                macros: &["__cpp_designated_initializers"],
                min_value: 201707,
                baseline: Some(CxxStandard::Cxx20),
            },
            StandardFeature::ThreeWayComparison => FeatureTest {
                macros: &["__cpp_impl_three_way_comparison"],
                min_value: 201907,
                baseline: Some(CxxStandard::Cxx20),
            },
        }
    }
}

/// Whether the toolchain behind `macros` supports the feature. A defined
/// feature-test macro decides by itself; only when no macro is present does
/// the classified standard level answer.
pub fn has_standard_feature(macros: &MacroSet, feature: StandardFeature) -> bool {
    let test = feature.test();
    for name in test.macros {
        if macros.is_defined(name) {
            return macros.int_value(name).unwrap_or(0) >= test.min_value;
        }
    }
    match test.baseline {
        Some(baseline) => classify_standard(macros) >= baseline,
        None => false,
    }
}

/// Standard info for the natively probed toolchain.
pub fn cxx_standard_info() -> CxxStandardInfo {
    CxxStandardInfo::from_macros(probe::native_macro_set())
}

pub fn cxx_standard() -> CxxStandard {
    cxx_standard_info().standard
}

pub fn is_cxx17_or_later() -> bool {
    cxx_standard() >= CxxStandard::Cxx17
}

pub fn is_cxx20_or_later() -> bool {
    cxx_standard() >= CxxStandard::Cxx20
}

pub fn is_cxx23_or_later() -> bool {
    cxx_standard() >= CxxStandard::Cxx23
}
