//! Sidecar-style collector that watches one log file for writes.
//!
//! The collector never reads the file. It registers a single non-recursive
//! watch and reports every write notification the OS delivers. The notify
//! backend thread forwards events and errors into two unbounded channels, and
//! one task multiplexes them until a shutdown signal arrives:
//!
//! - write events are reported at info level
//! - other event kinds (open, close, metadata, rename...) are dropped silently
//! - backend errors are reported at error level and the loop keeps going
//!
//! Dropping the collector releases the watch registration.

use std::future::Future;
use std::path::{Path, PathBuf};

use async_channel::{Receiver, Sender};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to create file watcher: {0}")]
    CreateWatcher(#[source] notify::Error),

    #[error("Failed to watch {path}: {source}")]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// A write observed on a watched path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteEvent {
    pub path: PathBuf,
    pub kind: EventKind,
}

/// Destination for what the watch loop observes.
pub trait Reporter: Send + Sync {
    fn write_observed(&self, event: &WriteEvent);
    fn watch_error(&self, error: &notify::Error);
}

/// Reports through the diagnostic log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn write_observed(&self, event: &WriteEvent) {
        tracing::info!(path = %event.path.display(), op = ?event.kind, "File modified");
    }

    fn watch_error(&self, error: &notify::Error) {
        tracing::error!(error = %error, "File watch error");
    }
}

/// Why the watch loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A shutdown signal arrived
    Signal(&'static str),
    /// The notification source went away
    SourceClosed,
}

/// Whether an event kind counts as a write to the file's contents.
///
/// Backends that cannot tell what changed report `Modify(Any)`, which is
/// treated as a write too.
pub fn is_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}

/// A live watch registration on one path.
pub struct Collector {
    path: PathBuf,
    watcher: RecommendedWatcher,
    events: Receiver<Event>,
    errors: Receiver<notify::Error>,
}

impl Collector {
    /// Create the watcher and register `path`. The path must already exist.
    pub fn watch(path: impl Into<PathBuf>) -> Result<Self, CollectorError> {
        let path = path.into();
        let (events_tx, events) = async_channel::unbounded();
        let (errors_tx, errors) = async_channel::unbounded();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            forward(res, &events_tx, &errors_tx)
        })
        .map_err(CollectorError::CreateWatcher)?;

        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|source| CollectorError::Register {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            watcher,
            events,
            errors,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Report events until `shutdown` resolves, then release the registration.
    pub async fn run<R, F>(self, reporter: &R, shutdown: F) -> Termination
    where
        R: Reporter + ?Sized,
        F: Future<Output = &'static str>,
    {
        let Self {
            path,
            watcher,
            events,
            errors,
        } = self;

        let termination = watch_loop(&events, &errors, reporter, shutdown).await;

        drop(watcher);
        tracing::info!(path = %path.display(), ?termination, "Watch registration released");
        termination
    }
}

/// Runs on the notify backend thread.
fn forward(res: notify::Result<Event>, events: &Sender<Event>, errors: &Sender<notify::Error>) {
    // Sends only fail once the collector has been dropped
    match res {
        Ok(event) => {
            let _ = events.try_send(event);
        }
        Err(error) => {
            let _ = errors.try_send(error);
        }
    }
}

/// Multiplex the event and error channels until shutdown.
///
/// Neither channel has priority. Errors never end the loop; only `shutdown`
/// resolving or a closed channel does.
pub async fn watch_loop<R, F>(
    events: &Receiver<Event>,
    errors: &Receiver<notify::Error>,
    reporter: &R,
    shutdown: F,
) -> Termination
where
    R: Reporter + ?Sized,
    F: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => report_writes(&event, reporter),
                Err(_) => return Termination::SourceClosed,
            },
            error = errors.recv() => match error {
                Ok(error) => reporter.watch_error(&error),
                Err(_) => return Termination::SourceClosed,
            },
            signal = &mut shutdown => return Termination::Signal(signal),
        }
    }
}

fn report_writes<R: Reporter + ?Sized>(event: &Event, reporter: &R) {
    if !is_write(&event.kind) {
        return;
    }
    for path in &event.paths {
        reporter.write_observed(&WriteEvent {
            path: path.clone(),
            kind: event.kind,
        });
    }
}
