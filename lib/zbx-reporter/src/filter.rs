/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::anyhow;
use regex::Regex;

use zbx_types::MetricRef;

/// Selects the metrics that take part in a report.
pub trait MetricFilter: Send + Sync {
    fn matches(&self, name: &str, metric: &MetricRef<'_>) -> bool;
}

impl<F> MetricFilter for F
where
    F: Fn(&str, &MetricRef<'_>) -> bool + Send + Sync,
{
    fn matches(&self, name: &str, metric: &MetricRef<'_>) -> bool {
        self(name, metric)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AllMetrics;

impl MetricFilter for AllMetrics {
    fn matches(&self, _name: &str, _metric: &MetricRef<'_>) -> bool {
        true
    }
}

/// Name based filter. Exclude rules win, and an empty include list matches every name.
#[derive(Clone, Debug, Default)]
pub struct RegexMetricFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl RegexMetricFilter {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn add_include(&mut self, pattern: &str) -> anyhow::Result<()> {
        let re = Regex::new(pattern).map_err(|e| anyhow!("invalid regex {pattern}: {e}"))?;
        self.include.push(re);
        Ok(())
    }

    pub fn add_exclude(&mut self, pattern: &str) -> anyhow::Result<()> {
        let re = Regex::new(pattern).map_err(|e| anyhow!("invalid regex {pattern}: {e}"))?;
        self.exclude.push(re);
        Ok(())
    }

    pub fn name_matches(&self, name: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(name))
    }
}

impl MetricFilter for RegexMetricFilter {
    fn matches(&self, name: &str, _metric: &MetricRef<'_>) -> bool {
        self.name_matches(name)
    }
}
