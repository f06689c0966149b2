/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::slice;
use std::sync::Arc;

use slog::{Logger, slog_debug, slog_error, slog_info, slog_o, slog_warn};

use zbx_types::MetricsSnapshot;

use crate::encode::{HISTOGRAM_SAMPLES, METER_SAMPLES, TIMER_SAMPLES};
use crate::{
    DiscoveryFamily, DiscoveryNames, MetricsSource, ReporterConfig, Sample, SampleEncoder,
    SendError, SenderResult, ZabbixSender, local_hostname,
};

mod runtime;
pub use runtime::ScheduledReporter;

/// All samples of one report cycle.
#[derive(Clone, Debug)]
pub struct EncodedCycle {
    samples: Vec<Sample>,
    discovery: Vec<(DiscoveryFamily, Sample)>,
}

impl EncodedCycle {
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn discovery(&self) -> &[(DiscoveryFamily, Sample)] {
        &self.discovery
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleResults {
    pub metrics: SenderResult,
    pub discovery: Vec<(DiscoveryFamily, SenderResult)>,
}

impl CycleResults {
    pub fn success(&self) -> bool {
        self.metrics.success() && self.discovery.iter().all(|(_, r)| r.success())
    }

    pub fn discovery_result(&self, family: DiscoveryFamily) -> Option<&SenderResult> {
        self.discovery
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, r)| r)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    Accepted(CycleResults),
    Rejected(CycleResults),
    /// The transport failed, the remaining sends of the cycle were skipped.
    Aborted { completed_sends: usize },
}

impl ReportOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ReportOutcome::Accepted(_))
    }
}

pub struct ZabbixReporter {
    config: ReporterConfig,
    encoder: SampleEncoder,
    sender: Arc<dyn ZabbixSender>,
    logger: Logger,
}

impl ZabbixReporter {
    pub fn new(config: ReporterConfig, sender: Arc<dyn ZabbixSender>, logger: &Logger) -> Self {
        let (host, detected): (Arc<str>, bool) = match config.host_name() {
            Some(host) => (Arc::from(host), false),
            None => (Arc::from(local_hostname()), true),
        };
        let logger = logger.new(slog_o!(
            "reporter" => config.name().to_string(),
            "host" => host.to_string(),
        ));
        if detected {
            slog_info!(logger, "detected host name {}", host);
        }

        let encoder = SampleEncoder::new(host, config.rate_unit(), config.duration_unit());

        ZabbixReporter {
            config,
            encoder,
            sender,
            logger,
        }
    }

    #[inline]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    #[inline]
    pub fn host(&self) -> &str {
        self.encoder.host()
    }

    /// Expand every metric of the snapshot and build the discovery documents.
    pub fn encode(&self, snapshot: &MetricsSnapshot) -> EncodedCycle {
        let capacity = snapshot.gauges.len()
            + snapshot.counters.len()
            + snapshot.histograms.len() * HISTOGRAM_SAMPLES
            + snapshot.meters.len() * METER_SAMPLES
            + snapshot.timers.len() * TIMER_SAMPLES;
        let mut samples = Vec::with_capacity(capacity);
        let mut names = DiscoveryNames::new();

        for (name, value) in &snapshot.gauges {
            self.encoder.encode_gauge(name, value, &mut samples);
            names.add_gauge(name);
        }
        for (name, count) in &snapshot.counters {
            self.encoder.encode_counter(name, *count, &mut samples);
            names.add_counter(name);
        }
        for (name, h) in &snapshot.histograms {
            self.encoder.encode_histogram(name, h, &mut samples);
            names.add_histogram(name);
        }
        for (name, m) in &snapshot.meters {
            self.encoder.encode_meter(name, m, &mut samples);
            names.add_meter(name);
        }
        for (name, t) in &snapshot.timers {
            self.encoder.encode_timer(name, t, &mut samples);
            names.add_timer(name);
        }

        let discovery = names
            .documents()
            .into_iter()
            .map(|doc| (doc.family(), doc.to_sample(self.encoder.host())))
            .collect();

        EncodedCycle { samples, discovery }
    }

    /// Read the source, drop filtered metrics and report the rest.
    pub async fn report_source<M>(&self, source: &M) -> ReportOutcome
    where
        M: MetricsSource + ?Sized,
    {
        let mut snapshot = source.snapshot();
        let filter = self.config.filter();
        snapshot.retain(|name, metric| filter.matches(name, &metric));
        self.report(&snapshot).await
    }

    /// Run one report cycle: the metric samples are sent as one batch, then each
    /// discovery document on its own. Failures are logged and never returned as errors.
    pub async fn report(&self, snapshot: &MetricsSnapshot) -> ReportOutcome {
        let cycle = self.encode(snapshot);

        let metrics = match self.sender.send(&cycle.samples).await {
            Ok(r) => r,
            Err(e) => return self.abort(e, 0),
        };

        let mut discovery = Vec::with_capacity(cycle.discovery.len());
        for (family, sample) in &cycle.discovery {
            match self.sender.send(slice::from_ref(sample)).await {
                Ok(r) => discovery.push((*family, r)),
                Err(e) => return self.abort(e, 1 + discovery.len()),
            }
        }

        let results = CycleResults { metrics, discovery };
        if results.success() {
            slog_debug!(self.logger, "report metrics to zabbix success";
                "samples" => cycle.samples.len(),
                "result" => %results.metrics,
            );
            ReportOutcome::Accepted(results)
        } else {
            slog_warn!(self.logger, "report APIs list & metrics to zabbix not success";
                "samples" => cycle.samples.len(),
                "result" => %results.metrics,
                "api_list" => results.discovery_result(DiscoveryFamily::Api).map(|r| r.to_string()),
                "counters_list" => results.discovery_result(DiscoveryFamily::Counters).map(|r| r.to_string()),
                "meters_list" => results.discovery_result(DiscoveryFamily::Meters).map(|r| r.to_string()),
                "timers_list" => results.discovery_result(DiscoveryFamily::Timers).map(|r| r.to_string()),
            );
            ReportOutcome::Rejected(results)
        }
    }

    fn abort(&self, e: SendError, completed_sends: usize) -> ReportOutcome {
        slog_error!(self.logger, "report APIs list & metrics to zabbix error: {}", e;
            "completed_sends" => completed_sends,
        );
        ReportOutcome::Aborted { completed_sends }
    }
}
