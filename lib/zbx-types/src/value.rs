/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

/// The current reading of a gauge.
///
/// Gauges may hold any type, the collector only ever sees its text form.
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeValue {
    Signed(i64),
    Unsigned(u64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Text(String),
}

impl fmt::Display for GaugeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaugeValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            GaugeValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            GaugeValue::Float(v) => f.write_str(ryu::Buffer::new().format(*v)),
            GaugeValue::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
            GaugeValue::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            GaugeValue::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from {
    ($t:ty, $variant:ident, $as:ty) => {
        impl From<$t> for GaugeValue {
            fn from(v: $t) -> Self {
                GaugeValue::$variant(v as $as)
            }
        }
    };
}

impl_from!(i8, Signed, i64);
impl_from!(i16, Signed, i64);
impl_from!(i32, Signed, i64);
impl_from!(i64, Signed, i64);
impl_from!(isize, Signed, i64);
impl_from!(u8, Unsigned, u64);
impl_from!(u16, Unsigned, u64);
impl_from!(u32, Unsigned, u64);
impl_from!(u64, Unsigned, u64);
impl_from!(usize, Unsigned, u64);
impl_from!(f32, Float, f32);
impl_from!(f64, Double, f64);

impl From<bool> for GaugeValue {
    fn from(v: bool) -> Self {
        GaugeValue::Boolean(v)
    }
}

impl From<String> for GaugeValue {
    fn from(v: String) -> Self {
        GaugeValue::Text(v)
    }
}

impl From<&str> for GaugeValue {
    fn from(v: &str) -> Self {
        GaugeValue::Text(v.to_string())
    }
}
