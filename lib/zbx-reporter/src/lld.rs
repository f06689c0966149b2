/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use ahash::AHashSet;
use serde_json::{Map, Value};

use crate::Sample;

/// The low level discovery rules fed by the reporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscoveryFamily {
    Api,
    Counters,
    Timers,
    Meters,
}

impl DiscoveryFamily {
    pub const fn macro_name(&self) -> &'static str {
        match self {
            DiscoveryFamily::Api => "{#APINAME}",
            DiscoveryFamily::Counters => "{#CAPINAME}",
            DiscoveryFamily::Timers => "{#TAPINAME}",
            DiscoveryFamily::Meters => "{#MAPINAME}",
        }
    }

    pub const fn item_key(&self) -> &'static str {
        match self {
            DiscoveryFamily::Api => "dropwizard.lld.key",
            DiscoveryFamily::Counters => "dropwizard.lld.key.counters",
            DiscoveryFamily::Timers => "dropwizard.lld.key.timers",
            DiscoveryFamily::Meters => "dropwizard.lld.key.meters",
        }
    }

    pub fn accept(&self, name: &str) -> bool {
        match self {
            DiscoveryFamily::Api => name.contains("jvm.") || name.contains(".activeRequests"),
            DiscoveryFamily::Counters => name.contains(".activeRequests"),
            DiscoveryFamily::Timers => name.contains(".requests"),
            DiscoveryFamily::Meters => name.contains(".responseCodes."),
        }
    }
}

/// The discovered metric names of one family.
#[derive(Clone, Debug)]
pub struct DiscoveryDocument {
    family: DiscoveryFamily,
    names: Vec<String>,
    seen: AHashSet<String>,
}

impl DiscoveryDocument {
    pub fn new(family: DiscoveryFamily) -> Self {
        DiscoveryDocument {
            family,
            names: Vec::new(),
            seen: AHashSet::new(),
        }
    }

    pub fn collect<'a, I>(family: DiscoveryFamily, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut doc = DiscoveryDocument::new(family);
        for name in names {
            doc.push(name);
        }
        doc
    }

    #[inline]
    pub fn family(&self) -> DiscoveryFamily {
        self.family
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Add the name if the family accepts it and it is not already present.
    pub fn push(&mut self, name: &str) -> bool {
        if !self.family.accept(name) || self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    pub fn to_json(&self) -> Value {
        let data = self
            .names
            .iter()
            .map(|name| {
                let mut entry = Map::with_capacity(1);
                entry.insert(
                    self.family.macro_name().to_string(),
                    Value::String(name.clone()),
                );
                Value::Object(entry)
            })
            .collect();

        let mut map = Map::with_capacity(1);
        map.insert("data".to_string(), Value::Array(data));
        Value::Object(map)
    }

    pub fn to_sample(&self, host: &Arc<str>) -> Sample {
        Sample::new(
            host.clone(),
            self.family.item_key().to_string(),
            self.to_json().to_string(),
        )
    }
}

/// Collects the names of every metric kind during one report cycle.
#[derive(Clone, Debug)]
pub struct DiscoveryNames {
    api: DiscoveryDocument,
    counters: DiscoveryDocument,
    timers: DiscoveryDocument,
    meters: DiscoveryDocument,
}

impl Default for DiscoveryNames {
    fn default() -> Self {
        DiscoveryNames::new()
    }
}

impl DiscoveryNames {
    pub fn new() -> Self {
        DiscoveryNames {
            api: DiscoveryDocument::new(DiscoveryFamily::Api),
            counters: DiscoveryDocument::new(DiscoveryFamily::Counters),
            timers: DiscoveryDocument::new(DiscoveryFamily::Timers),
            meters: DiscoveryDocument::new(DiscoveryFamily::Meters),
        }
    }

    pub fn add_gauge(&mut self, name: &str) {
        self.api.push(name);
    }

    pub fn add_counter(&mut self, name: &str) {
        self.api.push(name);
        self.counters.push(name);
    }

    pub fn add_histogram(&mut self, name: &str) {
        self.api.push(name);
    }

    pub fn add_meter(&mut self, name: &str) {
        self.meters.push(name);
    }

    pub fn add_timer(&mut self, name: &str) {
        self.timers.push(name);
    }

    /// The documents in the order they are sent.
    pub fn documents(&self) -> [&DiscoveryDocument; 4] {
        [&self.api, &self.counters, &self.meters, &self.timers]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = [
        "jvm.memory",
        "svc.activeRequests",
        "svc.requests",
        "svc.responseCodes.200",
    ];

    fn selected(family: DiscoveryFamily) -> Vec<String> {
        DiscoveryDocument::collect(family, NAMES).names().to_vec()
    }

    #[test]
    fn family_filter() {
        assert_eq!(
            selected(DiscoveryFamily::Api),
            ["jvm.memory", "svc.activeRequests"]
        );
        assert_eq!(
            selected(DiscoveryFamily::Counters),
            ["svc.activeRequests"]
        );
        assert_eq!(selected(DiscoveryFamily::Timers), ["svc.requests"]);
        assert_eq!(
            selected(DiscoveryFamily::Meters),
            ["svc.responseCodes.200"]
        );
    }

    #[test]
    fn json_document() {
        let doc = DiscoveryDocument::collect(DiscoveryFamily::Api, NAMES);
        assert_eq!(
            doc.to_json().to_string(),
            r#"{"data":[{"{#APINAME}":"jvm.memory"},{"{#APINAME}":"svc.activeRequests"}]}"#
        );

        let doc = DiscoveryDocument::collect(DiscoveryFamily::Meters, NAMES);
        assert_eq!(
            doc.to_json().to_string(),
            r#"{"data":[{"{#MAPINAME}":"svc.responseCodes.200"}]}"#
        );
    }

    #[test]
    fn empty_document() {
        let doc = DiscoveryDocument::collect(DiscoveryFamily::Timers, ["jvm.gc", "db.pool"]);
        assert!(doc.names().is_empty());
        assert_eq!(doc.to_json().to_string(), r#"{"data":[]}"#);

        let doc = DiscoveryDocument::new(DiscoveryFamily::Counters);
        assert_eq!(doc.to_json().to_string(), r#"{"data":[]}"#);
    }

    #[test]
    fn escaped_name() {
        let doc = DiscoveryDocument::collect(DiscoveryFamily::Timers, [r#"api."get".requests"#]);
        let json = doc.to_json().to_string();
        assert_eq!(json, r#"{"data":[{"{#TAPINAME}":"api.\"get\".requests"}]}"#);
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc.to_json());
    }

    #[test]
    fn duplicate_names() {
        let mut doc = DiscoveryDocument::new(DiscoveryFamily::Api);
        assert!(doc.push("jvm.threads"));
        assert!(!doc.push("jvm.threads"));
        assert!(!doc.push("db.pool"));
        assert_eq!(doc.names(), ["jvm.threads"]);
    }

    #[test]
    fn sample_keys() {
        let host: Arc<str> = Arc::from("app-01");
        let keys: Vec<String> = [
            DiscoveryFamily::Api,
            DiscoveryFamily::Counters,
            DiscoveryFamily::Timers,
            DiscoveryFamily::Meters,
        ]
        .into_iter()
        .map(|f| DiscoveryDocument::new(f).to_sample(&host).key().to_string())
        .collect();
        assert_eq!(
            keys,
            [
                "dropwizard.lld.key",
                "dropwizard.lld.key.counters",
                "dropwizard.lld.key.timers",
                "dropwizard.lld.key.meters",
            ]
        );
    }

    #[test]
    fn names_by_kind() {
        let mut names = DiscoveryNames::new();
        names.add_gauge("jvm.memory");
        names.add_counter("svc.activeRequests");
        names.add_histogram("jvm.gc.pause");
        names.add_timer("svc.requests");
        names.add_meter("svc.responseCodes.200");
        names.add_meter("svc.requests");

        let [api, counters, meters, timers] = names.documents();
        assert_eq!(api.family(), DiscoveryFamily::Api);
        assert_eq!(
            api.names(),
            ["jvm.memory", "svc.activeRequests", "jvm.gc.pause"]
        );
        assert_eq!(counters.names(), ["svc.activeRequests"]);
        assert_eq!(meters.names(), ["svc.responseCodes.200"]);
        assert_eq!(timers.names(), ["svc.requests"]);
    }
}
