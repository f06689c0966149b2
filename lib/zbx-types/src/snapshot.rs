/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;

use super::GaugeValue;

/// Statistical summary of a distribution at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HistogramSnapshot {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub stddev: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
}

/// Event count with moving average rates, all rates are in events per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeterSnapshot {
    pub count: i64,
    pub mean_rate: f64,
    pub one_minute_rate: f64,
    pub five_minute_rate: f64,
    pub fifteen_minute_rate: f64,
}

/// A meter of timed events plus the distribution of their durations in nanoseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerSnapshot {
    pub meter: MeterSnapshot,
    pub durations: HistogramSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Counter,
    Histogram,
    Meter,
    Timer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricRef<'a> {
    Gauge(&'a GaugeValue),
    Counter(i64),
    Histogram(&'a HistogramSnapshot),
    Meter(&'a MeterSnapshot),
    Timer(&'a TimerSnapshot),
}

impl MetricRef<'_> {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricRef::Gauge(_) => MetricKind::Gauge,
            MetricRef::Counter(_) => MetricKind::Counter,
            MetricRef::Histogram(_) => MetricKind::Histogram,
            MetricRef::Meter(_) => MetricKind::Meter,
            MetricRef::Timer(_) => MetricKind::Timer,
        }
    }
}

/// Point in time view of a metrics registry, every kind ordered by metric name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub gauges: BTreeMap<String, GaugeValue>,
    pub counters: BTreeMap<String, i64>,
    pub histograms: BTreeMap<String, HistogramSnapshot>,
    pub meters: BTreeMap<String, MeterSnapshot>,
    pub timers: BTreeMap<String, TimerSnapshot>,
}

impl MetricsSnapshot {
    pub fn len(&self) -> usize {
        self.gauges.len()
            + self.counters.len()
            + self.histograms.len()
            + self.meters.len()
            + self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert_gauge<T: Into<GaugeValue>>(&mut self, name: impl Into<String>, value: T) {
        self.gauges.insert(name.into(), value.into());
    }

    pub fn insert_counter(&mut self, name: impl Into<String>, count: i64) {
        self.counters.insert(name.into(), count);
    }

    pub fn insert_histogram(&mut self, name: impl Into<String>, snapshot: HistogramSnapshot) {
        self.histograms.insert(name.into(), snapshot);
    }

    pub fn insert_meter(&mut self, name: impl Into<String>, snapshot: MeterSnapshot) {
        self.meters.insert(name.into(), snapshot);
    }

    pub fn insert_timer(&mut self, name: impl Into<String>, snapshot: TimerSnapshot) {
        self.timers.insert(name.into(), snapshot);
    }

    /// Keeps only the metrics for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, MetricRef<'_>) -> bool,
    {
        self.gauges.retain(|k, v| f(k, MetricRef::Gauge(&*v)));
        self.counters.retain(|k, v| f(k, MetricRef::Counter(*v)));
        self.histograms.retain(|k, v| f(k, MetricRef::Histogram(&*v)));
        self.meters.retain(|k, v| f(k, MetricRef::Meter(&*v)));
        self.timers.retain(|k, v| f(k, MetricRef::Timer(&*v)));
    }
}
