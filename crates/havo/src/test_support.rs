//! Test doubles shared by the engine, scheduler and router tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use havo_core::{
    account::{self, AccountError, ApiKeyStore},
    cache::{self, Cache, CacheError},
    weather::{self, WeatherError, WeatherProvider},
};
use serde_json::json;

use crate::engine::{EngineConfig, WeatherEngine};

/// Builds a provider response body shaped like weatherapi.com's.
pub fn weather_body(name: &str, country: &str, temp_c: f64, wind_kph: f64, cloud: i32) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "location": {
            "name": name,
            "region": "",
            "country": country,
            "lat": 41.3167,
            "lon": 69.25,
            "tz_id": "UTC"
        },
        "current": {
            "temp_c": temp_c,
            "wind_kph": wind_kph,
            "cloud": cloud,
            "humidity": 40
        }
    }))
    .unwrap()
}

#[derive(Clone)]
enum StubReply {
    Body(Vec<u8>),
    Fail(WeatherError),
}

/// Provider answering from a fixed table. Unknown queries are `NotFound`.
#[derive(Default)]
pub struct StubProvider {
    replies: HashMap<String, StubReply>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider knowing `tashkent`, `new york` and `london`.
    pub fn with_known_locations() -> Self {
        Self::new()
            .with_location("tashkent", weather_body("Tashkent", "Uzbekistan", 22.0, 11.2, 0))
            .with_location(
                "new york",
                weather_body("New York", "United States of America", 8.3, 25.9, 75),
            )
            .with_location("london", weather_body("London", "United Kingdom", 12.0, 15.1, 100))
    }

    pub fn with_location(mut self, query: &str, body: Vec<u8>) -> Self {
        self.replies
            .insert(query.to_lowercase(), StubReply::Body(body));
        self
    }

    pub fn with_failure(mut self, query: &str, error: WeatherError) -> Self {
        self.replies
            .insert(query.to_lowercase(), StubReply::Fail(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, query: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.as_str() == query)
            .count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(&self, query: &str) -> weather::Result<Vec<u8>> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.replies.get(&query.to_lowercase()) {
            Some(StubReply::Body(body)) => Ok(body.clone()),
            Some(StubReply::Fail(err)) => Err(err.clone()),
            None => Err(WeatherError::NotFound),
        }
    }
}

/// In-memory cache that counts calls and can be told to fail.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Option<Instant>)>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    flushes: AtomicUsize,
    fail_gets: AtomicBool,
    fail_sets: AtomicBool,
    fail_flush: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_flush(&self, fail: bool) {
        self.fail_flush.store(fail, Ordering::SeqCst);
    }

    /// Stores bytes directly, bypassing the counters.
    pub fn insert_raw(&self, key: &str, value: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), None));
    }

    /// Reads bytes directly, ignoring expiry and the counters.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cache for RecordingCache {
    async fn get(&self, key: &str) -> cache::Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("connection refused".to_string()));
        }
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).and_then(|(value, expires_at)| match expires_at {
            Some(at) if Instant::now() >= *at => None,
            _ => Some(value.clone()),
        }))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> cache::Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(CacheError::OperationFailed("READONLY replica".to_string()));
        }
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), expires_at));
        Ok(())
    }

    async fn flush_all(&self) -> cache::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush.load(Ordering::SeqCst) {
            return Err(CacheError::OperationFailed("FLUSHDB failed".to_string()));
        }
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// Account store accepting a fixed set of keys, or always giving one answer.
#[derive(Default)]
pub struct StubKeyStore {
    keys: HashSet<String>,
    answer: Option<account::Result<bool>>,
    calls: AtomicUsize,
}

impl StubKeyStore {
    pub fn with_keys(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn answering(answer: account::Result<bool>) -> Self {
        Self {
            answer: Some(answer),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyStore for StubKeyStore {
    async fn check_api_key(&self, api_key: &str) -> account::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(answer) = &self.answer {
            return answer.clone();
        }
        if self.keys.contains(api_key) {
            Ok(true)
        } else {
            Err(AccountError::ApiKeyNotFound)
        }
    }
}

/// Engine settings suited to tests: short timeouts and no refresh throttle.
pub fn test_engine_config() -> EngineConfig {
    EngineConfig {
        ttl: Duration::from_secs(1_800),
        cache_timeout: Duration::from_millis(200),
        provider_timeout: Duration::from_millis(500),
        refresh_throttle: Duration::ZERO,
        bulk_concurrency: 4,
        coalesce_fetches: true,
        write_failure_threshold: 3,
        roster: &["Tashkent", "London", "Atlantis"],
    }
}

pub fn engine_with(
    cache: &Arc<RecordingCache>,
    provider: &Arc<StubProvider>,
    config: EngineConfig,
) -> WeatherEngine {
    WeatherEngine::new(cache.clone(), provider.clone(), config)
}
