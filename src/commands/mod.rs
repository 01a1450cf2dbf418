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

pub mod features;
pub mod report;
pub mod toolchain;

use crate::compiler::MacroSet;
use crate::compiler::probe;
use crate::config::LandasConfig;
use log::debug;

/// Macro set the display commands classify against: the configured toolchain
/// when the config names one, otherwise the memoized native probe. A failed
/// probe degrades to the empty set so these commands still render.
pub(crate) fn resolve_macros(config: &LandasConfig) -> MacroSet {
    let toolchain = &config.toolchain;
    if toolchain.cxx.is_some() || !toolchain.args.is_empty() {
        match probe::capture(toolchain.cxx.as_deref(), &toolchain.args) {
            Ok(dump) => return dump.macros,
            Err(e) => debug!("configured toolchain probe failed: {e}"),
        }
    }
    probe::native_macro_set().clone()
}
