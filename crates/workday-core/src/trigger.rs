//! Background refresh triggers.
//!
//! Both the periodic timer and the file watcher funnel into
//! [`RefreshableState::refresh`]; the trigger only decides *when*.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::SourceError;
use crate::origin::ContentOrigin;
use crate::state::RefreshableState;

/// When an externally-derived source re-fetches its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Never refreshed in the background.
    Manual,
    /// Re-fetched every period; the first refresh happens one period after
    /// construction.
    Interval(Duration),
    /// Re-fetched whenever the file at this path is created or modified.
    FileChange(PathBuf),
}

/// Owns the background task (and watcher, if any) driving refreshes.
/// Dropping it stops both.
pub struct RefreshTask {
    handle: JoinHandle<()>,
    _watcher: Option<RecommendedWatcher>,
}

impl RefreshTask {
    /// Starts the refresh loop for `trigger`. Must run inside a tokio runtime
    /// unless the trigger is [`RefreshTrigger::Manual`].
    pub fn spawn<T: Send + Sync + 'static>(
        state: RefreshableState<T>,
        origin: Arc<dyn ContentOrigin>,
        trigger: &RefreshTrigger,
    ) -> Result<Option<Self>, SourceError> {
        match trigger {
            RefreshTrigger::Manual => Ok(None),
            RefreshTrigger::Interval(period) => {
                if period.is_zero() {
                    return Err(SourceError::invalid_configuration(
                        "refresh interval must be greater than zero",
                    ));
                }
                let first_tick = Instant::now().checked_add(*period).ok_or_else(|| {
                    SourceError::invalid_configuration(format!(
                        "refresh interval {period:?} is too large"
                    ))
                })?;
                Ok(Some(Self::spawn_interval(state, origin, first_tick, *period)))
            }
            RefreshTrigger::FileChange(path) => {
                Self::spawn_file_watch(state, origin, path).map(Some)
            }
        }
    }

    fn spawn_interval<T: Send + Sync + 'static>(
        state: RefreshableState<T>,
        origin: Arc<dyn ContentOrigin>,
        first_tick: Instant,
        period: Duration,
    ) -> Self {
        tracing::info!(source = %state.label(), ?period, "starting periodic refresh");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let _ = state.refresh(origin.as_ref()).await;
            }
        });

        Self {
            handle,
            _watcher: None,
        }
    }

    fn spawn_file_watch<T: Send + Sync + 'static>(
        state: RefreshableState<T>,
        origin: Arc<dyn ContentOrigin>,
        path: &Path,
    ) -> Result<Self, SourceError> {
        let (directory, file_name) = split_watch_target(path)?;
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let target = file_name.clone();
        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| match result {
                Ok(event) if touches_file(&event, &target) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(error) => tracing::warn!(error = %error, "file watcher error"),
            },
            notify::Config::default(),
        )
        .map_err(|error| {
            SourceError::internal(format!("failed to create file watcher: {error}"))
        })?;

        // The parent directory is watched so that editors replacing the file
        // via rename keep triggering events.
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|error| {
                SourceError::invalid_configuration(format!(
                    "failed to watch '{}': {error}",
                    directory.display()
                ))
            })?;

        tracing::info!(source = %state.label(), "watching file for changes");
        let handle = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Collapse a burst of events into one re-read.
                while rx.try_recv().is_ok() {}
                let _ = state.refresh(origin.as_ref()).await;
            }
        });

        Ok(Self {
            handle,
            _watcher: Some(watcher),
        })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn split_watch_target(path: &Path) -> Result<(PathBuf, OsString), SourceError> {
    let file_name = path.file_name().map(OsString::from).ok_or_else(|| {
        SourceError::invalid_configuration(format!(
            "'{}' does not name a file to watch",
            path.display()
        ))
    })?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}

fn touches_file(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()))
}
