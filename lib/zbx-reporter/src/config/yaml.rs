/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use yaml_rust::{Yaml, yaml};

use zbx_types::TimeUnit;

use super::ReporterConfigBuilder;
use crate::RegexMetricFilter;

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

/// Calls `f` with the normalized key of every entry.
fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    table.iter().try_for_each(|(k, v)| {
        let Yaml::String(key) = k else {
            return Err(anyhow!("reporter config key should be a string"));
        };
        f(&normalize_key(key), v).context(format!("invalid value for key {key}"))
    })
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for 'string' should be 'string', 'integer' or 'real'"
        )),
    }
}

fn as_time_unit(v: &Yaml) -> anyhow::Result<TimeUnit> {
    if let Yaml::String(s) = v {
        TimeUnit::from_str(s)
    } else {
        Err(anyhow!("yaml value type for 'time unit' should be 'string'"))
    }
}

fn secs_f64_duration(secs: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| anyhow!("invalid duration {secs}: {e}"))
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(value) => match humanize_rs::duration::parse(value) {
            Ok(v) => Ok(v),
            Err(ParseError::MissingUnit) => {
                if let Ok(u) = u64::from_str(value) {
                    Ok(Duration::from_secs(u))
                } else {
                    let f = f64::from_str(value).map_err(|_| anyhow!("invalid duration string"))?;
                    secs_f64_duration(f)
                }
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(value) => {
            let u = u64::try_from(*value).map_err(|_| anyhow!("negative duration value"))?;
            Ok(Duration::from_secs(u))
        }
        Yaml::Real(s) => {
            let f = f64::from_str(s).map_err(|e| anyhow!("invalid real value {s}: {e}"))?;
            secs_f64_duration(f)
        }
        _ => Err(anyhow!(
            "yaml value type for duration should be 'string', 'integer' or 'real'"
        )),
    }
}

fn foreach_pattern<F>(v: &Yaml, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str) -> anyhow::Result<()>,
{
    match v {
        Yaml::String(s) => f(s),
        Yaml::Array(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let Yaml::String(s) = v else {
                    return Err(anyhow!("invalid pattern value for #{i}, should be 'string'"));
                };
                f(s).context(format!("invalid pattern value for #{i}"))?;
            }
            Ok(())
        }
        _ => Err(anyhow!(
            "yaml value type for pattern list should be 'string' or 'array'"
        )),
    }
}

impl ReporterConfigBuilder {
    /// Load reporter settings from a yaml map.
    ///
    /// `include` and `exclude` hold regex patterns of metric names, the resulting
    /// name filter replaces the default one if any pattern is set.
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!("yaml value type for reporter config should be 'map'"));
        };

        let mut builder = ReporterConfigBuilder::default();
        let mut filter = RegexMetricFilter::default();

        foreach_kv(map, |k, v| match k {
            "name" => {
                builder.name = as_string(v)?;
                Ok(())
            }
            "host_name" | "hostname" | "host" => {
                builder.host_name = Some(as_string(v)?);
                Ok(())
            }
            "prefix" => {
                builder.prefix = as_string(v)?;
                Ok(())
            }
            "rate_unit" => {
                builder.rate_unit = as_time_unit(v)?;
                Ok(())
            }
            "duration_unit" => {
                builder.duration_unit = as_time_unit(v)?;
                Ok(())
            }
            "replace_percent_sign" => {
                builder.replace_percent_sign = as_string(v)?;
                Ok(())
            }
            "emit_interval" | "interval" => {
                builder.emit_interval = as_duration(v)?;
                Ok(())
            }
            "include" => foreach_pattern(v, |p| filter.add_include(p)),
            "exclude" => foreach_pattern(v, |p| filter.add_exclude(p)),
            _ => Err(anyhow!("invalid key {k}")),
        })?;

        if !filter.is_empty() {
            builder = builder.with_filter(filter);
        }
        builder.check()?;
        Ok(builder)
    }
}
