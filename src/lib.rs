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

pub mod arch;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod endian;
pub mod error;
pub mod features;
pub mod init;
pub mod logging;
pub mod os;
pub mod report;
pub mod standard;

/// Target triple this build was produced for, captured by the build script.
/// The triple-based classifiers all start from this value.
pub const TARGET_TRIPLE: &str = env!("LANDAS_TARGET_TRIPLE");
