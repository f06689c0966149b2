/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;

use zbx_types::TimeUnit;

use crate::{AllMetrics, MetricFilter};

#[cfg(feature = "yaml")]
mod yaml;

pub const DEFAULT_REPORTER_NAME: &str = "zabbix-reporter";
const DEFAULT_EMIT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct ReporterConfig {
    name: String,
    host_name: Option<String>,
    prefix: String,
    rate_unit: TimeUnit,
    duration_unit: TimeUnit,
    filter: Arc<dyn MetricFilter>,
    replace_percent_sign: String,
    emit_interval: Duration,
}

impl ReporterConfig {
    pub fn builder() -> ReporterConfigBuilder {
        ReporterConfigBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured host name, the reporter detects one if this is not set.
    #[inline]
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    /// Reserved, not applied to item keys.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn rate_unit(&self) -> TimeUnit {
        self.rate_unit
    }

    #[inline]
    pub fn duration_unit(&self) -> TimeUnit {
        self.duration_unit
    }

    #[inline]
    pub fn filter(&self) -> &Arc<dyn MetricFilter> {
        &self.filter
    }

    /// Reserved, not applied to item keys.
    #[inline]
    pub fn replace_percent_sign(&self) -> &str {
        &self.replace_percent_sign
    }

    #[inline]
    pub fn emit_interval(&self) -> Duration {
        self.emit_interval
    }
}

impl fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("name", &self.name)
            .field("host_name", &self.host_name)
            .field("prefix", &self.prefix)
            .field("rate_unit", &self.rate_unit)
            .field("duration_unit", &self.duration_unit)
            .field("replace_percent_sign", &self.replace_percent_sign)
            .field("emit_interval", &self.emit_interval)
            .finish_non_exhaustive()
    }
}

pub struct ReporterConfigBuilder {
    name: String,
    host_name: Option<String>,
    prefix: String,
    rate_unit: TimeUnit,
    duration_unit: TimeUnit,
    filter: Arc<dyn MetricFilter>,
    replace_percent_sign: String,
    emit_interval: Duration,
}

impl Default for ReporterConfigBuilder {
    fn default() -> Self {
        ReporterConfigBuilder {
            name: DEFAULT_REPORTER_NAME.to_string(),
            host_name: None,
            prefix: String::new(),
            rate_unit: TimeUnit::Seconds,
            duration_unit: TimeUnit::Milliseconds,
            filter: Arc::new(AllMetrics),
            replace_percent_sign: String::new(),
            emit_interval: DEFAULT_EMIT_INTERVAL,
        }
    }
}

impl ReporterConfigBuilder {
    pub fn with_name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_host_name<T: Into<String>>(mut self, host_name: T) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    pub fn with_prefix<T: Into<String>>(mut self, prefix: T) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_rate_unit(mut self, unit: TimeUnit) -> Self {
        self.rate_unit = unit;
        self
    }

    pub fn with_duration_unit(mut self, unit: TimeUnit) -> Self {
        self.duration_unit = unit;
        self
    }

    pub fn with_filter<F: MetricFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_replace_percent_sign<T: Into<String>>(mut self, replace: T) -> Self {
        self.replace_percent_sign = replace.into();
        self
    }

    pub fn with_emit_interval(mut self, interval: Duration) -> Self {
        self.emit_interval = interval;
        self
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("reporter name is empty"));
        }
        if let Some(host) = &self.host_name {
            if host.is_empty() {
                return Err(anyhow!("host name is empty"));
            }
        }
        if self.emit_interval.is_zero() {
            return Err(anyhow!("emit interval should not be zero"));
        }
        Ok(())
    }

    pub fn build(self) -> anyhow::Result<ReporterConfig> {
        self.check()?;
        Ok(ReporterConfig {
            name: self.name,
            host_name: self.host_name,
            prefix: self.prefix,
            rate_unit: self.rate_unit,
            duration_unit: self.duration_unit,
            filter: self.filter,
            replace_percent_sign: self.replace_percent_sign,
            emit_interval: self.emit_interval,
        })
    }
}
