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

use crate::error::LandasError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a LandasError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a LandasError) -> Self {
        let (suggestion, details) = match error {
            LandasError::ToolchainNotFound { searched } => {
                let suggestion = Some(
                    "Install a C/C++ compiler, or point the CXX environment variable (or the \
                     [toolchain] cxx setting in config.toml) at one."
                        .to_string(),
                );
                let details = Some(format!("Searched for: {searched}"));
                (suggestion, details)
            }
            LandasError::ToolchainProbe(msg) => {
                let suggestion = Some(
                    "Run with -vv to see which compiler was invoked and how it failed.".to_string(),
                );
                let details = Some(format!("Probe failed: {msg}"));
                (suggestion, details)
            }
            LandasError::UnrecognizedOutput(msg) => {
                let suggestion = Some(
                    "Select a GCC-, Clang- or MSVC-family compiler explicitly via CXX or the \
                     [toolchain] cxx setting."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            LandasError::InvalidVersionFormat(msg) => {
                let suggestion = Some(
                    "Version format should be '<major>[.<minor>[.<patch>]]' (e.g., '13.2' or \
                     '19.38.33134')."
                        .to_string(),
                );
                let details = Some(format!("Invalid format: {msg}"));
                (suggestion, details)
            }
            LandasError::ConfigFile(msg) => {
                let suggestion = Some(
                    "Check the syntax of config.toml in your landas home directory.".to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            LandasError::InvalidConfig(msg) => {
                let suggestion = Some("Fix the reported setting and try again.".to_string());
                let details = Some(msg.clone());
                (suggestion, details)
            }
            LandasError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Try running with sudo or check file permissions.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
