/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::sync::Arc;

/// One item value as accepted by the Zabbix trapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    host: Arc<str>,
    key: String,
    value: String,
}

impl Sample {
    pub fn new(host: Arc<str>, key: String, value: String) -> Self {
        Sample { host, key, value }
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// zabbix_sender input file line format: `<host> <key> <value>`
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.host, self.key, self.value)
    }
}

/// Build an item key in the form `<type><suffix>[<name>]`.
pub fn format_key(r#type: &str, suffix: &str, name: &str) -> String {
    let mut key = String::with_capacity(r#type.len() + suffix.len() + name.len() + 2);
    key.push_str(r#type);
    key.push_str(suffix);
    key.push('[');
    key.push_str(name);
    key.push(']');
    key
}
