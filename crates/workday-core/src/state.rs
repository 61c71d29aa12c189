//! Refreshable state holder.
//!
//! Holds the parsed state of an externally-derived source behind an
//! `RwLock<Arc<T>>`:
//!
//! - **Read**: the lock is held only long enough to clone the `Arc`, so a
//!   classification query works on a complete snapshot and readers never
//!   wait on each other.
//! - **Write**: new content is parsed before the lock is taken; the write
//!   lock covers the pointer swap only.
//! - **Refresh**: fetch-parse-swap runs under an async gate, so two refreshes
//!   of the same source never overlap and the last completed one wins.
//! - **Failure**: a failed fetch or parse leaves the current snapshot in place.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::SourceError;
use crate::origin::ContentOrigin;

type ParseFn<T> = dyn Fn(&str) -> Result<T, String> + Send + Sync;

pub struct RefreshableState<T> {
    current: Arc<RwLock<Arc<T>>>,
    parse: Arc<ParseFn<T>>,
    gate: Arc<tokio::sync::Mutex<()>>,
    generation: Arc<AtomicU64>,
    label: Arc<str>,
}

impl<T> Clone for RefreshableState<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            parse: Arc::clone(&self.parse),
            gate: Arc::clone(&self.gate),
            generation: Arc::clone(&self.generation),
            label: Arc::clone(&self.label),
        }
    }
}

impl<T: Send + Sync + 'static> RefreshableState<T> {
    /// Parses `content` into the initial state. There is nothing to fall
    /// back on yet, so a parse failure is returned.
    pub fn from_content<P, E>(
        label: impl Into<String>,
        content: &str,
        parse: P,
    ) -> Result<Self, SourceError>
    where
        P: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Display,
    {
        let label: Arc<str> = Arc::from(label.into());
        let parse: Arc<ParseFn<T>> =
            Arc::new(move |raw: &str| parse(raw).map_err(|error| error.to_string()));
        let initial = parse(content).map_err(|error| parse_error(&label, &error))?;

        Ok(Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
            parse,
            gate: Arc::new(tokio::sync::Mutex::new(())),
            generation: Arc::new(AtomicU64::new(0)),
            label,
        })
    }

    /// Current state. Never blocks on I/O.
    pub fn snapshot(&self) -> Arc<T> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Parses `content` and, on success, swaps it in as the current state.
    pub fn replace_with(&self, content: &str) -> Result<(), SourceError> {
        let next = (self.parse)(content).map_err(|error| parse_error(&self.label, &error))?;
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
        drop(guard);
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Fetches from `origin` and applies the result. The previous state is
    /// retained when either step fails; the error is logged and returned.
    pub async fn refresh(&self, origin: &dyn ContentOrigin) -> Result<(), SourceError> {
        let _serialized = self.gate.lock().await;

        let outcome = match origin.fetch().await {
            Ok(content) => self.replace_with(&content),
            Err(error) => Err(error),
        };

        match &outcome {
            Ok(()) => tracing::debug!(
                source = %self.label,
                generation = self.generation(),
                "refreshed source state"
            ),
            Err(error) => tracing::warn!(
                source = %self.label,
                error = %error,
                "refresh failed; keeping previous state"
            ),
        }

        outcome
    }

    /// Re-reads `origin` and swaps the result in only if it differs from
    /// `seen`. Returns whether the state was replaced.
    pub async fn refresh_if_changed(
        &self,
        origin: &dyn ContentOrigin,
        seen: &str,
    ) -> Result<bool, SourceError> {
        let _serialized = self.gate.lock().await;

        let content = origin.fetch().await?;
        if content == seen {
            return Ok(false);
        }
        self.replace_with(&content)?;
        tracing::debug!(
            source = %self.label,
            generation = self.generation(),
            "content changed since initial load"
        );
        Ok(true)
    }

    /// Number of successful replacements since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn parse_error(label: &str, detail: &str) -> SourceError {
    SourceError::parse(format!("failed to parse content from {label}: {detail}"))
}
