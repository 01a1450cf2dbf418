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

use crate::config::LandasConfig;
use crate::error::Result;
use crate::report::PlatformReport;

pub struct ReportCommand<'a> {
    config: &'a LandasConfig,
}

impl<'a> ReportCommand<'a> {
    pub fn new(config: &'a LandasConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, brief: bool, json: bool) -> Result<()> {
        let macros = super::resolve_macros(self.config);
        let report = PlatformReport::from_macros(&macros);

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if brief {
            println!("{}", report.brief_summary());
        } else {
            print!("{}", report.render_text());
        }

        Ok(())
    }
}
