//! Predefined-macro tables: the raw signal set toolchain classification
//! works from.
//!
//! A `MacroSet` is either parsed from a preprocessor macro dump, synthesized
//! from other probe output, or built by hand in tests. Classifiers only ever
//! ask two questions of it: is a name defined, and what integer does it carry.

use std::collections::BTreeMap;

/// Value carried by one predefined macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroValue {
    /// Defined with no replacement text.
    Defined,
    /// Defined to an integer literal.
    Int(i64),
    /// Defined to anything else, kept verbatim.
    Text(String),
}

/// A toolchain's predefined macros, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroSet {
    entries: BTreeMap<String, MacroValue>,
}

impl MacroSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str) {
        self.entries.insert(name.to_string(), MacroValue::Defined);
    }

    pub fn define_int(&mut self, name: &str, value: i64) {
        self.entries.insert(name.to_string(), MacroValue::Int(value));
    }

    pub fn define_text(&mut self, name: &str, value: &str) {
        self.entries
            .insert(name.to_string(), MacroValue::Text(value.to_string()));
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Integer value of a macro, `None` when absent or non-numeric.
    pub fn int_value(&self, name: &str) -> Option<i64> {
        match self.entries.get(name) {
            Some(MacroValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&MacroValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses `#define NAME VALUE` lines as produced by a GNU-style `-dM -E`
    /// macro dump.
    ///
    /// Function-like macros are skipped; they are never classification
    /// signals. Malformed lines are ignored rather than treated as errors so
    /// that a partially unexpected dump still yields every usable signal.
    pub fn parse_dump(output: &str) -> Self {
        let mut set = MacroSet::new();
        for line in output.lines() {
            let Some(rest) = line.trim_start().strip_prefix("#define ") else {
                continue;
            };
            let rest = rest.trim();
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() || name.contains('(') {
                continue;
            }
            if value.is_empty() {
                set.define(name);
            } else if let Some(int) = parse_int_literal(value) {
                set.define_int(name, int);
            } else {
                set.define_text(name, value);
            }
        }
        set
    }
}

/// Parses a C integer literal, tolerating the usual suffixes (`201703L`,
/// `1U`) and hexadecimal spellings.
fn parse_int_literal(text: &str) -> Option<i64> {
    let trimmed = text.trim().trim_end_matches(['u', 'U', 'l', 'L']);
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    trimmed.parse::<i64>().ok()
}
