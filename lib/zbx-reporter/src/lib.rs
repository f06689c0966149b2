/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod sample;
pub use sample::{Sample, format_key};

mod encode;
pub use encode::SampleEncoder;

mod lld;
pub use lld::{DiscoveryDocument, DiscoveryFamily, DiscoveryNames};

mod sender;
pub use sender::{SendError, SenderResult, ZabbixSender};

mod filter;
pub use filter::{AllMetrics, MetricFilter, RegexMetricFilter};

mod source;
pub use source::MetricsSource;

mod host;
pub use host::local_hostname;

mod config;
pub use config::{DEFAULT_REPORTER_NAME, ReporterConfig, ReporterConfigBuilder};

mod reporter;
pub use reporter::{CycleResults, EncodedCycle, ReportOutcome, ScheduledReporter, ZabbixReporter};

#[cfg(test)]
mod testing;
