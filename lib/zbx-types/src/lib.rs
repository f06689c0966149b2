/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod unit;
pub use unit::{DurationConverter, RateConverter, TimeUnit};

mod value;
pub use value::GaugeValue;

mod snapshot;
pub use snapshot::{
    HistogramSnapshot, MeterSnapshot, MetricKind, MetricRef, MetricsSnapshot, TimerSnapshot,
};
