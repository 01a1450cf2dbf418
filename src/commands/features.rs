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
use crate::features::{FeatureSet, LanguageFeature, RuntimeFeature};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

pub struct FeaturesCommand<'a> {
    config: &'a LandasConfig,
}

impl<'a> FeaturesCommand<'a> {
    pub fn new(config: &'a LandasConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, language_only: bool, runtime_only: bool, json: bool) -> Result<()> {
        let macros = super::resolve_macros(self.config);
        let features = FeatureSet::from_macros(&macros).with_runtime_probe();

        if json {
            println!("{}", serde_json::to_string_pretty(&features)?);
            return Ok(());
        }

        println!("{}", "Detected features:".bold());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Feature", "Group", "Available"]);

        let mut available = 0;
        let mut total = 0;

        if !runtime_only {
            for feature in LanguageFeature::ALL {
                let on = features.has_language_feature(feature);
                table.add_row(vec![
                    feature.name().to_string(),
                    "Language".to_string(),
                    mark(on),
                ]);
                available += usize::from(on);
                total += 1;
            }
        }
        if !language_only {
            for feature in RuntimeFeature::ALL {
                let on = features.has_runtime_feature(feature);
                table.add_row(vec![
                    feature.name().to_string(),
                    "Runtime".to_string(),
                    mark(on),
                ]);
                available += usize::from(on);
                total += 1;
            }
        }

        println!("{table}");
        println!();
        println!("Total: {available} of {total} available");

        Ok(())
    }
}

fn mark(available: bool) -> String {
    if available {
        "✓ Yes".green().to_string()
    } else {
        "✗ No".red().to_string()
    }
}
