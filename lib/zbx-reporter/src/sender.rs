/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::Sample;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("io failed: {0:?}")]
    Io(#[from] io::Error),
    #[error("invalid response: {0}")]
    Protocol(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Trapper response for one sent batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SenderResult {
    pub processed: u32,
    pub failed: u32,
    pub total: u32,
    pub spent: Duration,
}

impl SenderResult {
    pub fn new(processed: u32, failed: u32, total: u32, spent: Duration) -> Self {
        SenderResult {
            processed,
            failed,
            total,
            spent,
        }
    }

    /// A result with every one of `total` values processed.
    pub fn accepted(total: u32) -> Self {
        SenderResult::new(total, 0, total, Duration::ZERO)
    }

    pub fn success(&self) -> bool {
        self.failed == 0 && self.processed == self.total
    }
}

impl fmt::Display for SenderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed: {}; failed: {}; total: {}; seconds spent: {:.6}",
            self.processed,
            self.failed,
            self.total,
            self.spent.as_secs_f64()
        )
    }
}

/// The transport to a Zabbix server or proxy.
#[async_trait]
pub trait ZabbixSender: Send + Sync {
    async fn send(&self, samples: &[Sample]) -> Result<SenderResult, SendError>;
}

#[async_trait]
impl<T: ZabbixSender + ?Sized> ZabbixSender for Arc<T> {
    async fn send(&self, samples: &[Sample]) -> Result<SenderResult, SendError> {
        self.as_ref().send(samples).await
    }
}
