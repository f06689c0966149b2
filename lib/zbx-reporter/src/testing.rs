/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slog::{Drain, KV, Key, Level, Logger, Never, OwnedKVList, Record, Serializer, slog_o};

use crate::{Sample, SendError, SenderResult, ZabbixSender};

/// Keeps every sent batch, replies with the queued results first and
/// accepts everything once the queue is empty.
#[derive(Default)]
pub(crate) struct RecordingSender {
    calls: Mutex<Vec<Vec<Sample>>>,
    results: Mutex<VecDeque<Result<SenderResult, SendError>>>,
}

impl RecordingSender {
    pub(crate) fn push_result(&self, r: Result<SenderResult, SendError>) {
        self.results.lock().unwrap().push_back(r);
    }

    pub(crate) fn calls(&self) -> Vec<Vec<Sample>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZabbixSender for RecordingSender {
    async fn send(&self, samples: &[Sample]) -> Result<SenderResult, SendError> {
        self.calls.lock().unwrap().push(samples.to_vec());
        let queued = self.results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(SenderResult::accepted(samples.len() as u32)))
    }
}

#[derive(Default)]
struct KvCollector(Vec<(String, String)>);

impl Serializer for KvCollector {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments<'_>) -> slog::Result {
        self.0.push((key.to_string(), val.to_string()));
        Ok(())
    }
}

struct CapturedRecord {
    level: Level,
    msg: String,
    owned: Vec<(String, String)>,
}

#[derive(Clone, Default)]
pub(crate) struct CaptureDrain {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl CaptureDrain {
    pub(crate) fn logger(&self) -> Logger {
        Logger::root(self.clone(), slog_o!())
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        let records = self.records.lock().unwrap();
        records.iter().filter(|r| r.level == level).count()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        let records = self.records.lock().unwrap();
        records.iter().map(|r| r.msg.clone()).collect()
    }

    /// The logger context values of every record.
    pub(crate) fn owned_values(&self) -> Vec<Vec<(String, String)>> {
        let records = self.records.lock().unwrap();
        records.iter().map(|r| r.owned.clone()).collect()
    }
}

impl Drain for CaptureDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<(), Never> {
        let mut kv = KvCollector::default();
        let _ = values.serialize(record, &mut kv);
        let mut records = self.records.lock().unwrap();
        records.push(CapturedRecord {
            level: record.level(),
            msg: record.msg().to_string(),
            owned: kv.0,
        });
        Ok(())
    }
}
