/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use zbx_types::{
    DurationConverter, GaugeValue, HistogramSnapshot, MeterSnapshot, MetricRef, RateConverter,
    TimeUnit, TimerSnapshot,
};

use crate::{Sample, format_key};

const TYPE_GAUGE: &str = "gauge";
const TYPE_COUNTERS: &str = "counters";
const TYPE_HISTOGRAMS: &str = "histograms";
const TYPE_METERS: &str = "meters";
const TYPE_TIMERS: &str = "timers";

pub(crate) const HISTOGRAM_SAMPLES: usize = 10;
pub(crate) const METER_SAMPLES: usize = 5;
pub(crate) const TIMER_SAMPLES: usize = METER_SAMPLES + HISTOGRAM_SAMPLES;

fn int_text(v: i64) -> String {
    itoa::Buffer::new().format(v).to_string()
}

fn float_text(v: f64) -> String {
    ryu::Buffer::new().format(v).to_string()
}

/// Expands metrics into Zabbix trapper samples.
#[derive(Clone, Debug)]
pub struct SampleEncoder {
    host: Arc<str>,
    rate: RateConverter,
    duration: DurationConverter,
}

impl SampleEncoder {
    pub fn new(host: Arc<str>, rate_unit: TimeUnit, duration_unit: TimeUnit) -> Self {
        SampleEncoder {
            host,
            rate: RateConverter::new(rate_unit),
            duration: DurationConverter::new(duration_unit),
        }
    }

    #[inline]
    pub fn host(&self) -> &Arc<str> {
        &self.host
    }

    fn sample(&self, r#type: &str, suffix: &str, name: &str, value: String) -> Sample {
        Sample::new(self.host.clone(), format_key(r#type, suffix, name), value)
    }

    pub fn encode(&self, name: &str, metric: MetricRef<'_>, samples: &mut Vec<Sample>) {
        match metric {
            MetricRef::Gauge(v) => self.encode_gauge(name, v, samples),
            MetricRef::Counter(c) => self.encode_counter(name, c, samples),
            MetricRef::Histogram(h) => self.encode_histogram(name, h, samples),
            MetricRef::Meter(m) => self.encode_meter(name, m, samples),
            MetricRef::Timer(t) => self.encode_timer(name, t, samples),
        }
    }

    pub fn encode_gauge(&self, name: &str, value: &GaugeValue, samples: &mut Vec<Sample>) {
        samples.push(self.sample(TYPE_GAUGE, "", name, value.to_string()));
    }

    pub fn encode_counter(&self, name: &str, count: i64, samples: &mut Vec<Sample>) {
        samples.push(self.sample(TYPE_COUNTERS, ".count", name, int_text(count)));
    }

    /// Only part of the histogram values go through the duration conversion,
    /// `.min` and `.max` are sent as integers and `.p95` and `.p99` as raw doubles.
    /// Existing item prototypes depend on these units.
    pub fn encode_histogram(&self, name: &str, h: &HistogramSnapshot, samples: &mut Vec<Sample>) {
        let d = |v: f64| float_text(self.duration.convert(v));
        let mut add = |suffix: &str, value: String| {
            samples.push(self.sample(TYPE_HISTOGRAMS, suffix, name, value));
        };

        add(".min", int_text(h.min));
        add(".max", int_text(h.max));
        add(".mean", d(h.mean));
        add(".stddev", d(h.stddev));
        add(".median", d(h.median));
        add(".p75", d(h.p75));
        add(".p95", float_text(h.p95));
        add(".p98", d(h.p98));
        add(".p99", float_text(h.p99));
        add(".p999", d(h.p999));
    }

    pub fn encode_meter(&self, name: &str, m: &MeterSnapshot, samples: &mut Vec<Sample>) {
        let r = |v: f64| float_text(self.rate.convert(v));
        let mut add = |suffix: &str, value: String| {
            samples.push(self.sample(TYPE_METERS, suffix, name, value));
        };

        add(".count", int_text(m.count));
        add(".meanRate", r(m.mean_rate));
        add(".1-minuteRate", r(m.one_minute_rate));
        add(".5-minuteRate", r(m.five_minute_rate));
        add(".15-minuteRate", r(m.fifteen_minute_rate));
    }

    /// The rates are sent as a meter with the same name, then every duration
    /// value is converted to the duration unit.
    pub fn encode_timer(&self, name: &str, t: &TimerSnapshot, samples: &mut Vec<Sample>) {
        self.encode_meter(name, &t.meter, samples);

        let h = &t.durations;
        let d = |v: f64| float_text(self.duration.convert(v));
        let mut add = |suffix: &str, value: String| {
            samples.push(self.sample(TYPE_TIMERS, suffix, name, value));
        };

        add(".min", d(h.min as f64));
        add(".max", d(h.max as f64));
        add(".mean", d(h.mean));
        add(".stddev", d(h.stddev));
        add(".median", d(h.median));
        add(".p75", d(h.p75));
        add(".p95", d(h.p95));
        add(".p98", d(h.p98));
        add(".p99", d(h.p99));
        add(".p999", d(h.p999));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> SampleEncoder {
        SampleEncoder::new(Arc::from("app-01"), TimeUnit::Seconds, TimeUnit::Milliseconds)
    }

    fn pairs(samples: &[Sample]) -> Vec<(&str, &str)> {
        samples.iter().map(|s| (s.key(), s.value())).collect()
    }

    fn histogram() -> HistogramSnapshot {
        HistogramSnapshot {
            min: 1_000_000,
            max: 9_000_000,
            mean: 2_000_000.0,
            stddev: 500_000.0,
            median: 1_500_000.0,
            p75: 3_000_000.0,
            p95: 4_000_000.0,
            p98: 5_000_000.0,
            p99: 6_000_000.0,
            p999: 8_000_000.0,
        }
    }

    fn meter() -> MeterSnapshot {
        MeterSnapshot {
            count: 120,
            mean_rate: 2.0,
            one_minute_rate: 1.5,
            five_minute_rate: 0.5,
            fifteen_minute_rate: 0.25,
        }
    }

    #[test]
    fn gauge() {
        let e = encoder();
        let mut samples = Vec::new();
        e.encode_gauge("jvm.threads.count", &GaugeValue::from(37u32), &mut samples);
        e.encode_gauge("jvm.load", &GaugeValue::from(0.75f64), &mut samples);
        e.encode_gauge("jvm.state", &GaugeValue::from("RUNNABLE"), &mut samples);
        assert_eq!(
            pairs(&samples),
            [
                ("gauge[jvm.threads.count]", "37"),
                ("gauge[jvm.load]", "0.75"),
                ("gauge[jvm.state]", "RUNNABLE"),
            ]
        );
        assert!(samples.iter().all(|s| s.host() == "app-01"));
    }

    #[test]
    fn counter() {
        let e = encoder();
        let mut samples = Vec::new();
        e.encode_counter("svc.activeRequests", -3, &mut samples);
        assert_eq!(pairs(&samples), [("counters.count[svc.activeRequests]", "-3")]);
    }

    #[test]
    fn histogram_mixed_conversion() {
        let e = encoder();
        let mut samples = Vec::new();
        e.encode_histogram("svc.payload", &histogram(), &mut samples);
        assert_eq!(samples.len(), HISTOGRAM_SAMPLES);
        assert_eq!(
            pairs(&samples),
            [
                ("histograms.min[svc.payload]", "1000000"),
                ("histograms.max[svc.payload]", "9000000"),
                ("histograms.mean[svc.payload]", "2.0"),
                ("histograms.stddev[svc.payload]", "0.5"),
                ("histograms.median[svc.payload]", "1.5"),
                ("histograms.p75[svc.payload]", "3.0"),
                ("histograms.p95[svc.payload]", "4000000.0"),
                ("histograms.p98[svc.payload]", "5.0"),
                ("histograms.p99[svc.payload]", "6000000.0"),
                ("histograms.p999[svc.payload]", "8.0"),
            ]
        );
    }

    #[test]
    fn histogram_identity_conversion() {
        let e = SampleEncoder::new(Arc::from("h"), TimeUnit::Seconds, TimeUnit::Nanoseconds);
        let mut samples = Vec::new();
        e.encode_histogram("sizes", &histogram(), &mut samples);
        assert_eq!(samples[2].value(), "2000000.0");
        assert_eq!(samples[6].value(), "4000000.0");
    }

    #[test]
    fn meter_rates() {
        let e = SampleEncoder::new(Arc::from("h"), TimeUnit::Minutes, TimeUnit::Milliseconds);
        let mut samples = Vec::new();
        e.encode_meter("svc.responseCodes.ok", &meter(), &mut samples);
        assert_eq!(
            pairs(&samples),
            [
                ("meters.count[svc.responseCodes.ok]", "120"),
                ("meters.meanRate[svc.responseCodes.ok]", "120.0"),
                ("meters.1-minuteRate[svc.responseCodes.ok]", "90.0"),
                ("meters.5-minuteRate[svc.responseCodes.ok]", "30.0"),
                ("meters.15-minuteRate[svc.responseCodes.ok]", "15.0"),
            ]
        );
    }

    #[test]
    fn timer_uniform_conversion() {
        let e = encoder();
        let t = TimerSnapshot {
            meter: meter(),
            durations: histogram(),
        };
        let mut samples = Vec::new();
        e.encode_timer("svc.requests", &t, &mut samples);
        assert_eq!(samples.len(), TIMER_SAMPLES);

        let meters = &samples[..METER_SAMPLES];
        assert!(meters.iter().all(|s| s.key().starts_with("meters.")));
        assert_eq!(meters[1].value(), "2.0");

        assert_eq!(
            pairs(&samples[METER_SAMPLES..]),
            [
                ("timers.min[svc.requests]", "1.0"),
                ("timers.max[svc.requests]", "9.0"),
                ("timers.mean[svc.requests]", "2.0"),
                ("timers.stddev[svc.requests]", "0.5"),
                ("timers.median[svc.requests]", "1.5"),
                ("timers.p75[svc.requests]", "3.0"),
                ("timers.p95[svc.requests]", "4.0"),
                ("timers.p98[svc.requests]", "5.0"),
                ("timers.p99[svc.requests]", "6.0"),
                ("timers.p999[svc.requests]", "8.0"),
            ]
        );
    }

    #[test]
    fn encode_dispatch() {
        let e = encoder();
        let mut samples = Vec::new();
        e.encode("c", MetricRef::Counter(1), &mut samples);
        e.encode("m", MetricRef::Meter(&meter()), &mut samples);
        e.encode("t", MetricRef::Timer(&TimerSnapshot::default()), &mut samples);
        assert_eq!(samples.len(), 1 + METER_SAMPLES + TIMER_SAMPLES);
        assert_eq!(samples[0].key(), "counters.count[c]");
    }
}
