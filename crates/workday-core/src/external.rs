//! Externally-derived source: a caller-supplied parse/check pair over
//! content fetched from a string, a file or an HTTP endpoint.

use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use time::Date;

use crate::error::SourceError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::origin::{ContentOrigin, FileOrigin, HttpOrigin, LiteralOrigin};
use crate::source::{DayKind, WorkingDaySource};
use crate::state::RefreshableState;
use crate::trigger::{RefreshTask, RefreshTrigger};

type CheckFn<T> = dyn Fn(Date, &T) -> bool + Send + Sync;

/// Source whose state is parsed from external content.
///
/// The check function answers "is this date non-working?" against the
/// current state snapshot. Queries never touch the origin; only the
/// refresh task does.
pub struct ExternalSource<T> {
    state: RefreshableState<T>,
    check: Arc<CheckFn<T>>,
    origin: Arc<dyn ContentOrigin>,
    task: Mutex<Option<RefreshTask>>,
}

impl<T: Send + Sync + 'static> ExternalSource<T> {
    /// Parses literal content once. The result never refreshes.
    pub fn from_content<P, E, C>(content: &str, parse: P, check: C) -> Result<Self, SourceError>
    where
        P: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Display,
        C: Fn(Date, &T) -> bool + Send + Sync + 'static,
    {
        let origin = LiteralOrigin::new(content);
        let state = RefreshableState::from_content(origin.describe(), content, parse)?;
        Ok(Self {
            state,
            check: Arc::new(check),
            origin: Arc::new(origin),
            task: Mutex::new(None),
        })
    }

    /// Reads and parses the file now, then re-reads it on every change.
    pub async fn from_file<P, E, C>(
        path: impl AsRef<Path>,
        parse: P,
        check: C,
    ) -> Result<Self, SourceError>
    where
        P: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Display,
        C: Fn(Date, &T) -> bool + Send + Sync + 'static,
    {
        let origin = FileOrigin::new(path)?;
        let trigger = RefreshTrigger::FileChange(origin.path().to_path_buf());
        Self::with_origin(Arc::new(origin), trigger, parse, check).await
    }

    /// Issues the request now, then again every `refresh_every`.
    pub async fn from_http<P, E, C>(
        client: Arc<dyn HttpClient>,
        request: HttpRequest,
        parse: P,
        check: C,
        refresh_every: Duration,
    ) -> Result<Self, SourceError>
    where
        P: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Display,
        C: Fn(Date, &T) -> bool + Send + Sync + 'static,
    {
        let origin = HttpOrigin::new(client, request)?;
        Self::with_origin(
            Arc::new(origin),
            RefreshTrigger::Interval(refresh_every),
            parse,
            check,
        )
        .await
    }

    /// General constructor: initial fetch-and-parse from `origin` (errors
    /// propagate), then background refreshes according to `trigger`.
    ///
    /// A file is read once more after its watcher is registered, so a write
    /// landing between the first read and the registration is not lost.
    pub async fn with_origin<P, E, C>(
        origin: Arc<dyn ContentOrigin>,
        trigger: RefreshTrigger,
        parse: P,
        check: C,
    ) -> Result<Self, SourceError>
    where
        P: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Display,
        C: Fn(Date, &T) -> bool + Send + Sync + 'static,
    {
        let initial = origin.fetch().await?;
        let state = RefreshableState::from_content(origin.describe(), &initial, parse)?;
        let task = RefreshTask::spawn(state.clone(), Arc::clone(&origin), &trigger)?;

        if matches!(trigger, RefreshTrigger::FileChange(_)) {
            if let Err(error) = state.refresh_if_changed(origin.as_ref(), &initial).await {
                tracing::warn!(
                    source = %state.label(),
                    error = %error,
                    "re-read after watch registration failed; keeping initial state"
                );
            }
        }

        Ok(Self {
            state,
            check: Arc::new(check),
            origin,
            task: Mutex::new(task),
        })
    }

    /// Re-fetches immediately through the same routine the background
    /// trigger uses. On error the previous state is kept.
    pub async fn refresh_now(&self) -> Result<(), SourceError> {
        self.state.refresh(self.origin.as_ref()).await
    }

    /// Stops background refreshing and releases the watcher/timer. The
    /// last state stays queryable.
    pub fn stop_refresh(&self) {
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if task.is_some() {
            tracing::info!(source = %self.state.label(), "stopped background refresh");
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(RefreshTask::is_running)
    }

    /// Successful state replacements since construction.
    pub fn generation(&self) -> u64 {
        self.state.generation()
    }

    pub fn snapshot(&self) -> Arc<T> {
        self.state.snapshot()
    }
}

impl<T: Send + Sync + 'static> WorkingDaySource for ExternalSource<T> {
    fn classify(&self, date: Date) -> DayKind {
        let state = self.state.snapshot();
        DayKind::from_non_working((self.check)(date, &state))
    }

    fn describe(&self) -> String {
        self.origin.describe()
    }
}
