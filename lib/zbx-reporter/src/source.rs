/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use zbx_types::MetricsSnapshot;

/// A metrics registry which can be read at every report cycle.
pub trait MetricsSource: Send + Sync {
    fn snapshot(&self) -> MetricsSnapshot;
}

impl<F> MetricsSource for F
where
    F: Fn() -> MetricsSnapshot + Send + Sync,
{
    fn snapshot(&self) -> MetricsSnapshot {
        self()
    }
}
