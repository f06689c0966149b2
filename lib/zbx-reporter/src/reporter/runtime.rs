/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::ZabbixReporter;
use crate::MetricsSource;

/// Handle of a reporter running on its emit interval.
///
/// Dropping the handle also stops the loop, without waiting for it.
pub struct ScheduledReporter {
    quit_sender: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ScheduledReporter {
    /// Stop reporting and wait for the running cycle, if any, to finish.
    pub async fn stop(self) {
        let _ = self.quit_sender.send(());
        if let Err(e) = self.handle.await {
            warn!("zabbix reporter task join failed: {e}");
        }
    }
}

impl ZabbixReporter {
    /// Spawn a tokio task which reports `source` every emit interval.
    ///
    /// The first cycle runs one interval after the start. Cycles never overlap,
    /// a late cycle delays the following ones.
    pub fn spawn<M>(self, source: M) -> ScheduledReporter
    where
        M: MetricsSource + 'static,
    {
        let (quit_sender, quit_receiver) = oneshot::channel();
        let handle = tokio::spawn(self.into_running(source, quit_receiver));
        ScheduledReporter {
            quit_sender,
            handle,
        }
    }

    async fn into_running<M>(self, source: M, mut quit: oneshot::Receiver<()>)
    where
        M: MetricsSource,
    {
        let period = self.config.emit_interval();
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "zabbix reporter {} started, host: {}, rate unit: {}, duration unit: {}",
            self.config.name(),
            self.host(),
            self.config.rate_unit().as_str(),
            self.config.duration_unit().as_str()
        );
        loop {
            tokio::select! {
                biased;

                _ = &mut quit => break,
                _ = interval.tick() => {
                    let outcome = self.report_source(&source).await;
                    debug!(
                        "zabbix reporter {}: cycle accepted: {}",
                        self.config.name(),
                        outcome.is_accepted()
                    );
                }
            }
        }
        info!("zabbix reporter {} stopped", self.config.name());
    }
}
