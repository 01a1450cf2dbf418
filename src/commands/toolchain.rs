// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::compiler::{CompilerInfo, probe};
use crate::config::LandasConfig;
use crate::error::Result;
use crate::standard::CxxStandardInfo;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct ToolchainOutput {
    command: String,
    compiler: CompilerInfo,
    standard: CxxStandardInfo,
    macro_count: usize,
}

pub struct ToolchainCommand<'a> {
    config: &'a LandasConfig,
}

impl<'a> ToolchainCommand<'a> {
    pub fn new(config: &'a LandasConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Probes the toolchain and reports what answered. Unlike the display
    /// commands this one propagates probe failures, so a missing compiler
    /// surfaces as an error with its exit code.
    pub fn execute(&self, json: bool) -> Result<()> {
        let toolchain = &self.config.toolchain;
        let dump = probe::capture(toolchain.cxx.as_deref(), &toolchain.args)?;

        let compiler = CompilerInfo::from_macros(&dump.macros);
        let standard = CxxStandardInfo::from_macros(&dump.macros);

        if json {
            let output = ToolchainOutput {
                command: dump.command.display().to_string(),
                compiler,
                standard,
                macro_count: dump.macros.len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!(
            "{} Probed {}",
            "✓".green(),
            dump.command.display().to_string().bold()
        );
        println!("  Compiler:  {} {}", compiler.name, compiler.version);
        println!(
            "  Standard:  {} (macro value {})",
            standard.standard_name, standard.version_macro
        );
        println!("  Macros:    {} defined", dump.macros.len());

        Ok(())
    }
}
