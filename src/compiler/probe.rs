//! Native toolchain capture.
//!
//! Locates the C/C++ compiler that sits next to this build and dumps its
//! predefined macros. GNU-style drivers support a direct dump mode; MSVC's
//! `cl` does not, so its startup banner is parsed and the version macros are
//! synthesized from it.

use crate::compiler::macros::MacroSet;
use crate::error::{LandasError, Result};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

/// Driver names searched on PATH when nothing is configured, in order.
const GNU_CANDIDATES: &[&str] = &["c++", "g++", "clang++", "cc", "gcc", "clang"];
const MSVC_CANDIDATES: &[&str] = &["cl"];

/// Environment variables consulted for an explicit toolchain, in order.
const ENV_OVERRIDES: &[&str] = &["CXX", "CC"];

const BANNER_MARKER: &str = "Compiler Version ";

/// A resolved compiler command plus any arguments carried in the override
/// value itself, e.g. `CXX="ccache g++"` or `CXX="clang++ --target=..."`.
#[derive(Debug, Clone)]
pub struct ToolchainSelection {
    pub command: PathBuf,
    pub args: Vec<String>,
}

/// A completed probe: which command answered and what it defines.
#[derive(Debug, Clone)]
pub struct ToolchainDump {
    pub command: PathBuf,
    pub macros: MacroSet,
}

fn default_candidates() -> &'static [&'static str] {
    if crate::TARGET_TRIPLE.ends_with("-msvc") {
        MSVC_CANDIDATES
    } else {
        GNU_CANDIDATES
    }
}

fn selection_from_words(requested: &str) -> Result<ToolchainSelection> {
    let mut words = requested.split_whitespace();
    let name = words.next().ok_or_else(|| LandasError::ToolchainNotFound {
        searched: requested.to_string(),
    })?;
    let command = which::which(name).map_err(|_| LandasError::ToolchainNotFound {
        searched: name.to_string(),
    })?;
    Ok(ToolchainSelection {
        command,
        args: words.map(str::to_string).collect(),
    })
}

/// Resolves the compiler to probe: explicit override first, then `CXX`/`CC`
/// from the environment, then the PATH candidates for the current target.
pub fn locate_toolchain(configured: Option<&str>) -> Result<ToolchainSelection> {
    if let Some(requested) = configured {
        return selection_from_words(requested);
    }
    for var in ENV_OVERRIDES {
        if let Ok(value) = env::var(var)
            && !value.trim().is_empty()
        {
            return selection_from_words(&value);
        }
    }
    for name in default_candidates() {
        if let Ok(command) = which::which(name) {
            return Ok(ToolchainSelection {
                command,
                args: Vec::new(),
            });
        }
    }
    Err(LandasError::ToolchainNotFound {
        searched: default_candidates().join(", "),
    })
}

fn is_msvc_driver(command: &Path) -> bool {
    command
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case("cl"))
}

fn run_preprocessor(
    selection: &ToolchainSelection,
    extra_args: &[String],
    source: Option<&Path>,
) -> Result<Output> {
    let mut command = Command::new(&selection.command);
    command
        .args(&selection.args)
        .args(extra_args)
        .args(["-x", "c++", "-E", "-dM"]);
    match source {
        Some(path) => {
            command.arg(path);
        }
        None => {
            command.arg("-").stdin(Stdio::null());
        }
    }
    command.output().map_err(|e| {
        LandasError::ToolchainProbe(format!(
            "failed to run {}: {e}",
            selection.command.display()
        ))
    })
}

fn dump_macro_listing(selection: &ToolchainSelection, extra_args: &[String]) -> Result<MacroSet> {
    let output = run_preprocessor(selection, extra_args, None)?;
    if output.status.success() {
        let macros = MacroSet::parse_dump(&String::from_utf8_lossy(&output.stdout));
        if !macros.is_empty() {
            return Ok(macros);
        }
    }

    // Some drivers refuse to read the translation unit from stdin; retry
    // against an empty source file.
    let source = tempfile::Builder::new().suffix(".cpp").tempfile()?;
    let output = run_preprocessor(selection, extra_args, Some(source.path()))?;
    if !output.status.success() {
        return Err(LandasError::ToolchainProbe(format!(
            "{} exited with {}: {}",
            selection.command.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    let macros = MacroSet::parse_dump(&String::from_utf8_lossy(&output.stdout));
    if macros.is_empty() {
        return Err(LandasError::UnrecognizedOutput(format!(
            "{} produced no macro definitions",
            selection.command.display()
        )));
    }
    Ok(macros)
}

/// Rebuilds the version macros from a `cl` startup banner line such as
/// "Microsoft (R) C/C++ Optimizing Compiler Version 19.38.33134 for x64".
/// The banner says nothing about the language level, so no standard macros
/// are synthesized.
fn parse_cl_banner(text: &str) -> Result<MacroSet> {
    let line = text
        .lines()
        .find(|line| line.contains(BANNER_MARKER))
        .ok_or_else(|| {
            LandasError::UnrecognizedOutput("no compiler version banner".to_string())
        })?;
    let (_, tail) = line
        .split_once(BANNER_MARKER)
        .ok_or_else(|| LandasError::UnrecognizedOutput(line.to_string()))?;
    let (version_text, target) = match tail.split_once(" for ") {
        Some((version_text, target)) => (version_text.trim(), Some(target.trim())),
        None => (tail.trim(), None),
    };
    let version: crate::compiler::CompilerVersion = version_text.parse()?;

    let mut macros = MacroSet::new();
    macros.define_int(
        "_MSC_VER",
        i64::from(version.major) * 100 + i64::from(version.minor),
    );
    macros.define_int(
        "_MSC_FULL_VER",
        i64::from(version.major) * 10_000_000
            + i64::from(version.minor) * 100_000
            + i64::from(version.patch),
    );
    match target {
        Some("x64") => {
            macros.define_int("_M_X64", 100);
            macros.define_int("_M_AMD64", 100);
        }
        Some("x86") => macros.define_int("_M_IX86", 600),
        Some("ARM64" | "arm64") => macros.define_int("_M_ARM64", 1),
        Some("ARM" | "arm") => macros.define_int("_M_ARM", 7),
        _ => {}
    }
    Ok(macros)
}

fn dump_msvc_macros(selection: &ToolchainSelection) -> Result<MacroSet> {
    // cl has no macro dump mode; its banner goes to stderr
    let output = Command::new(&selection.command)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            LandasError::ToolchainProbe(format!(
                "failed to run {}: {e}",
                selection.command.display()
            ))
        })?;
    parse_cl_banner(&String::from_utf8_lossy(&output.stderr))
}

/// Runs the probe against an explicitly selected or discovered toolchain.
pub fn capture(configured: Option<&str>, extra_args: &[String]) -> Result<ToolchainDump> {
    let selection = locate_toolchain(configured)?;
    let macros = if is_msvc_driver(&selection.command) {
        dump_msvc_macros(&selection)?
    } else {
        dump_macro_listing(&selection, extra_args)?
    };
    Ok(ToolchainDump {
        command: selection.command,
        macros,
    })
}

static NATIVE_MACROS: OnceLock<MacroSet> = OnceLock::new();

/// Predefined macros of the toolchain next to this build, probed once per
/// process. When no toolchain answers the set stays empty and every
/// classifier downstream reports its unknown value.
pub fn native_macro_set() -> &'static MacroSet {
    NATIVE_MACROS.get_or_init(|| match capture(None, &[]) {
        Ok(dump) => {
            debug!(
                "probed {} ({} macros)",
                dump.command.display(),
                dump.macros.len()
            );
            dump.macros
        }
        Err(e) => {
            debug!("toolchain probe skipped: {e}");
            MacroSet::new()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompilerType, classify_compiler, decode_compiler_version};
    use serial_test::serial;

    const X64_BANNER: &str = "Microsoft (R) C/C++ Optimizing Compiler Version 19.38.33134 for x64\n\
                              Copyright (C) Microsoft Corporation.  All rights reserved.\n\n\
                              usage: cl [ option... ] filename... [ /link linkoption... ]\n";

    #[test]
    fn test_parse_cl_banner_x64() {
        let macros = parse_cl_banner(X64_BANNER).unwrap();
        assert_eq!(macros.int_value("_MSC_VER"), Some(1938));
        assert_eq!(macros.int_value("_MSC_FULL_VER"), Some(193833134));
        assert!(macros.is_defined("_M_X64"));
        assert!(macros.is_defined("_M_AMD64"));
        assert!(!macros.is_defined("_M_IX86"));

        assert_eq!(classify_compiler(&macros), CompilerType::Msvc);
        let version = decode_compiler_version(&macros);
        assert_eq!((version.major, version.minor, version.patch), (19, 3, 8));
    }

    #[test]
    fn test_parse_cl_banner_x86_and_arm64() {
        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.29.30154 for x86\n";
        let macros = parse_cl_banner(banner).unwrap();
        assert_eq!(macros.int_value("_MSC_VER"), Some(1929));
        assert!(macros.is_defined("_M_IX86"));
        assert!(!macros.is_defined("_M_X64"));

        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.40.33811 for ARM64\n";
        let macros = parse_cl_banner(banner).unwrap();
        assert_eq!(macros.int_value("_MSC_VER"), Some(1940));
        assert!(macros.is_defined("_M_ARM64"));
    }

    #[test]
    fn test_parse_cl_banner_rejects_unrelated_output() {
        assert!(parse_cl_banner("").is_err());
        assert!(parse_cl_banner("cl: command not found").is_err());
        assert!(
            parse_cl_banner("Microsoft (R) C/C++ Optimizing Compiler Version beta for x64")
                .is_err()
        );
    }

    #[test]
    fn test_is_msvc_driver() {
        assert!(is_msvc_driver(Path::new("cl")));
        assert!(is_msvc_driver(Path::new(
            "C:\\tools\\msvc\\bin\\Hostx64\\x64\\cl.exe"
        )));
        assert!(!is_msvc_driver(Path::new("/usr/bin/g++")));
        assert!(!is_msvc_driver(Path::new("clang-cl")));
    }

    #[test]
    fn test_selection_splits_override_words() {
        // a word-splitting override keeps trailing tokens as arguments
        let err = selection_from_words("landas-missing-compiler -m32");
        assert!(matches!(err, Err(LandasError::ToolchainNotFound { .. })));
        assert!(selection_from_words("  ").is_err());
    }

    #[test]
    #[serial]
    fn test_env_override_wins_over_candidates() {
        let original_cxx = env::var("CXX").ok();
        let original_cc = env::var("CC").ok();
        unsafe {
            env::set_var("CXX", "landas-missing-compiler");
            env::remove_var("CC");
        }

        let result = locate_toolchain(None);
        assert!(matches!(
            result,
            Err(LandasError::ToolchainNotFound { .. })
        ));

        unsafe {
            match original_cxx {
                Some(val) => env::set_var("CXX", val),
                None => env::remove_var("CXX"),
            }
            if let Some(val) = original_cc {
                env::set_var("CC", val);
            }
        }
    }

    #[test]
    #[serial]
    fn test_configured_override_wins_over_env() {
        let original_cxx = env::var("CXX").ok();
        unsafe {
            env::set_var("CXX", "landas-env-compiler");
        }

        // the configured name is resolved, not the env var
        let result = locate_toolchain(Some("landas-config-compiler"));
        match result {
            Err(LandasError::ToolchainNotFound { searched }) => {
                assert_eq!(searched, "landas-config-compiler");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        unsafe {
            match original_cxx {
                Some(val) => env::set_var("CXX", val),
                None => env::remove_var("CXX"),
            }
        }
    }

    #[cfg(feature = "integration_tests")]
    #[test]
    #[serial]
    fn test_capture_real_toolchain() {
        // requires a C++ compiler on PATH
        let dump = capture(None, &[]).unwrap();
        assert!(!dump.macros.is_empty());
        assert_ne!(classify_compiler(&dump.macros), CompilerType::Unknown);
    }
}
