/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub const fn as_nanos(&self) -> u64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 3600 * 1_000_000_000,
            TimeUnit::Days => 86400 * 1_000_000_000,
        }
    }

    pub fn as_secs_f64(&self) -> f64 {
        match self {
            TimeUnit::Nanoseconds | TimeUnit::Microseconds | TimeUnit::Milliseconds => {
                self.as_nanos() as f64 / 1_000_000_000.0
            }
            _ => (self.as_nanos() / 1_000_000_000) as f64,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ns" | "nanos" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "micros" | "microsecond" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "millis" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            _ => Err(anyhow!("unknown time unit {s}")),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts per-second rates into events per `unit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateConverter {
    unit: TimeUnit,
    factor: f64,
}

impl RateConverter {
    pub fn new(unit: TimeUnit) -> Self {
        RateConverter {
            unit,
            factor: unit.as_secs_f64(),
        }
    }

    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    #[inline]
    pub fn convert(&self, rate: f64) -> f64 {
        rate * self.factor
    }
}

/// Converts nanosecond durations into `unit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationConverter {
    unit: TimeUnit,
    divisor: f64,
}

impl DurationConverter {
    pub fn new(unit: TimeUnit) -> Self {
        DurationConverter {
            unit,
            divisor: unit.as_nanos() as f64,
        }
    }

    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    #[inline]
    pub fn convert(&self, nanos: f64) -> f64 {
        nanos / self.divisor
    }
}
