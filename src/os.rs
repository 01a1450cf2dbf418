//! Operating system and environment classification from the target triple.

use serde::Serialize;

/// Operating system families selectable from build-time signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingSystem {
    #[default]
    Unknown,
    Windows,
    Linux,
    Macos,
    Freebsd,
    Openbsd,
    Netbsd,
    Android,
    Ios,
}

/// Broad deployment environment implied by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    Unknown,
    Desktop,
    Server,
    Embedded,
    Mobile,
}

impl EnvironmentType {
    pub fn name(self) -> &'static str {
        match self {
            EnvironmentType::Desktop => "Desktop",
            EnvironmentType::Server => "Server",
            EnvironmentType::Embedded => "Embedded",
            EnvironmentType::Mobile => "Mobile",
            EnvironmentType::Unknown => "Unknown",
        }
    }
}

/// Classifies the operating system from a target triple.
///
/// Ordered rules: Android is matched before Linux because Android triples
/// carry both spellings (`*-linux-android*`), and iOS before the Apple
/// desktop spelling for the same reason on `apple` triples.
pub fn classify_operating_system(triple: &str) -> OperatingSystem {
    if triple.contains("android") {
        return OperatingSystem::Android;
    }
    if triple.contains("-ios") {
        return OperatingSystem::Ios;
    }
    if triple.contains("windows") || triple.contains("cygwin") {
        return OperatingSystem::Windows;
    }
    if triple.contains("-darwin") {
        return OperatingSystem::Macos;
    }
    if triple.contains("-linux") {
        return OperatingSystem::Linux;
    }
    if triple.contains("freebsd") {
        return OperatingSystem::Freebsd;
    }
    if triple.contains("openbsd") {
        return OperatingSystem::Openbsd;
    }
    if triple.contains("netbsd") {
        return OperatingSystem::Netbsd;
    }
    OperatingSystem::Unknown
}

/// Maps an operating system to its typical deployment environment.
pub fn environment_type(os: OperatingSystem) -> EnvironmentType {
    match os {
        OperatingSystem::Android | OperatingSystem::Ios => EnvironmentType::Mobile,
        OperatingSystem::Windows | OperatingSystem::Macos => EnvironmentType::Desktop,
        OperatingSystem::Linux
        | OperatingSystem::Freebsd
        | OperatingSystem::Openbsd
        | OperatingSystem::Netbsd => EnvironmentType::Server,
        OperatingSystem::Unknown => EnvironmentType::Unknown,
    }
}

/// Operating system plus the derived naming and kernel-family facts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlatformInfo {
    pub os: OperatingSystem,
    pub environment: EnvironmentType,
    pub os_name: &'static str,
    pub kernel_family: &'static str,
}

impl PlatformInfo {
    pub fn new(os: OperatingSystem, environment: EnvironmentType) -> Self {
        let (os_name, kernel_family) = match os {
            OperatingSystem::Windows => ("Windows", "nt"),
            OperatingSystem::Linux => ("Linux", "posix"),
            OperatingSystem::Macos => ("macOS", "unix"),
            OperatingSystem::Freebsd => ("FreeBSD", "unix"),
            OperatingSystem::Openbsd => ("OpenBSD", "unix"),
            OperatingSystem::Netbsd => ("NetBSD", "unix"),
            OperatingSystem::Android => ("Android", "posix"),
            OperatingSystem::Ios => ("iOS", "unix"),
            OperatingSystem::Unknown => ("Unknown", "unknown"),
        };
        Self {
            os,
            environment,
            os_name,
            kernel_family,
        }
    }

    /// Classifies a full triple, including the bare-metal case: an explicit
    /// `none` OS component is reported as an embedded environment.
    pub fn from_triple(triple: &str) -> Self {
        let os = classify_operating_system(triple);
        let environment = if os == OperatingSystem::Unknown && triple.contains("-none") {
            EnvironmentType::Embedded
        } else {
            environment_type(os)
        };
        Self::new(os, environment)
    }

    pub fn is_posix(&self) -> bool {
        self.kernel_family == "posix" || self.kernel_family == "unix"
    }

    pub fn is_unix(&self) -> bool {
        matches!(
            self.os,
            OperatingSystem::Linux
                | OperatingSystem::Macos
                | OperatingSystem::Freebsd
                | OperatingSystem::Openbsd
                | OperatingSystem::Netbsd
                | OperatingSystem::Android
        )
    }

    pub fn is_windows(&self) -> bool {
        self.os == OperatingSystem::Windows
    }
}

/// Whether the operating system exposes POSIX APIs.
pub fn has_posix_api(os: OperatingSystem) -> bool {
    matches!(
        os,
        OperatingSystem::Linux
            | OperatingSystem::Macos
            | OperatingSystem::Ios
            | OperatingSystem::Freebsd
            | OperatingSystem::Openbsd
            | OperatingSystem::Netbsd
            | OperatingSystem::Android
    )
}

/// Whether the operating system exposes the Win32 API.
pub fn has_win32_api(os: OperatingSystem) -> bool {
    os == OperatingSystem::Windows
}

/// Whether the default filesystem is case sensitive.
///
/// Windows and the Apple platforms default to case-insensitive filesystems
/// even though both can be configured otherwise; unknown platforms default to
/// case sensitive.
pub fn supports_case_sensitive_filesystem(os: OperatingSystem) -> bool {
    !matches!(
        os,
        OperatingSystem::Windows | OperatingSystem::Macos | OperatingSystem::Ios
    )
}

/// Platform info for the build target.
pub fn platform_info() -> PlatformInfo {
    PlatformInfo::from_triple(crate::TARGET_TRIPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_triples() {
        let cases = [
            ("x86_64-pc-windows-msvc", OperatingSystem::Windows),
            ("i686-pc-windows-gnu", OperatingSystem::Windows),
            ("x86_64-pc-cygwin", OperatingSystem::Windows),
            ("x86_64-unknown-linux-gnu", OperatingSystem::Linux),
            ("aarch64-apple-darwin", OperatingSystem::Macos),
            ("aarch64-apple-ios", OperatingSystem::Ios),
            ("aarch64-linux-android", OperatingSystem::Android),
            ("armv7-linux-androideabi", OperatingSystem::Android),
            ("x86_64-unknown-freebsd", OperatingSystem::Freebsd),
            ("x86_64-unknown-openbsd", OperatingSystem::Openbsd),
            ("armv6-unknown-netbsd-eabihf", OperatingSystem::Netbsd),
            ("wasm32-unknown-unknown", OperatingSystem::Unknown),
        ];
        for (triple, expected) in cases {
            assert_eq!(classify_operating_system(triple), expected, "triple {triple}");
        }
    }

    #[test]
    fn test_android_wins_over_linux() {
        // Android triples also contain the linux spelling
        assert_eq!(
            classify_operating_system("aarch64-linux-android"),
            OperatingSystem::Android
        );
    }

    #[test]
    fn test_environment_mapping() {
        assert_eq!(environment_type(OperatingSystem::Android), EnvironmentType::Mobile);
        assert_eq!(environment_type(OperatingSystem::Ios), EnvironmentType::Mobile);
        assert_eq!(environment_type(OperatingSystem::Windows), EnvironmentType::Desktop);
        assert_eq!(environment_type(OperatingSystem::Macos), EnvironmentType::Desktop);
        assert_eq!(environment_type(OperatingSystem::Linux), EnvironmentType::Server);
        assert_eq!(environment_type(OperatingSystem::Freebsd), EnvironmentType::Server);
        assert_eq!(environment_type(OperatingSystem::Unknown), EnvironmentType::Unknown);
    }

    #[test]
    fn test_bare_metal_is_embedded() {
        let info = PlatformInfo::from_triple("thumbv7em-none-eabihf");
        assert_eq!(info.os, OperatingSystem::Unknown);
        assert_eq!(info.environment, EnvironmentType::Embedded);
    }

    #[test]
    fn test_kernel_families() {
        assert_eq!(PlatformInfo::from_triple("x86_64-pc-windows-msvc").kernel_family, "nt");
        assert_eq!(PlatformInfo::from_triple("x86_64-unknown-linux-gnu").kernel_family, "posix");
        assert_eq!(PlatformInfo::from_triple("aarch64-apple-darwin").kernel_family, "unix");
    }

    #[test]
    fn test_posix_and_unix_predicates() {
        let linux = PlatformInfo::from_triple("x86_64-unknown-linux-gnu");
        assert!(linux.is_posix());
        assert!(linux.is_unix());
        assert!(!linux.is_windows());

        let windows = PlatformInfo::from_triple("x86_64-pc-windows-msvc");
        assert!(!windows.is_posix());
        assert!(!windows.is_unix());
        assert!(windows.is_windows());

        // iOS exposes POSIX APIs but is not grouped with the unix systems
        let ios = PlatformInfo::from_triple("aarch64-apple-ios");
        assert!(ios.is_posix());
        assert!(!ios.is_unix());
        assert!(has_posix_api(ios.os));
    }

    #[test]
    fn test_case_sensitivity_defaults() {
        assert!(!supports_case_sensitive_filesystem(OperatingSystem::Windows));
        assert!(!supports_case_sensitive_filesystem(OperatingSystem::Macos));
        assert!(!supports_case_sensitive_filesystem(OperatingSystem::Ios));
        assert!(supports_case_sensitive_filesystem(OperatingSystem::Linux));
        assert!(supports_case_sensitive_filesystem(OperatingSystem::Unknown));
    }

    #[test]
    fn test_native_detection_matches_cfg() {
        let info = platform_info();
        if cfg!(target_os = "linux") {
            assert_eq!(info.os, OperatingSystem::Linux);
        } else if cfg!(target_os = "macos") {
            assert_eq!(info.os, OperatingSystem::Macos);
        } else if cfg!(target_os = "windows") {
            assert_eq!(info.os, OperatingSystem::Windows);
        }
    }
}
