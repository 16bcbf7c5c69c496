use crate::diagnostics::Diagnostics;
use crate::error::{MutexFileError, Result};
use crate::locks::WorkerId;
use crate::resource::{AppendFile, Resource};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Thread (\d+) has the Mutex\.$").unwrap());

/// Upper bound for a full two-worker run in tests.
pub(crate) const RUN_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Read the resource back as the writer id of each line, in append order.
///
/// Panics on any line that is not a worker message.
pub(crate) fn read_writers(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read '{}': {}", path.display(), e));

    content
        .lines()
        .map(|line| {
            let caps = LINE_PATTERN
                .captures(line)
                .unwrap_or_else(|| panic!("unexpected line in resource: {:?}", line));
            caps[1].to_string()
        })
        .collect()
}

/// Collapse consecutive lines by the same writer into `(writer, count)` blocks.
pub(crate) fn blocks(writers: &[String]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = Vec::new();
    for writer in writers {
        match out.last_mut() {
            Some((last, count)) if last == writer => *count += 1,
            _ => out.push((writer.clone(), 1)),
        }
    }
    out
}

/// Run `f` on its own thread and fail the test if it doesn't finish in time.
pub(crate) fn finishes_within<T, F>(timeout: Duration, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });

    match rx.recv_timeout(timeout) {
        Ok(value) => value,
        Err(mpsc::RecvTimeoutError::Timeout) => panic!("did not finish within {:?}", timeout),
        Err(mpsc::RecvTimeoutError::Disconnected) => panic!("runner thread panicked"),
    }
}

/// Appends to a real file, but fails the `fail_on`-th append (1-based) made
/// by the first worker that writes. Later workers are unaffected.
pub(crate) struct FaultyResource {
    inner: AppendFile,
    fail_on: usize,
    state: Mutex<(Option<WorkerId>, usize)>,
}

impl FaultyResource {
    pub(crate) fn new(inner: AppendFile, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            state: Mutex::new((None, 0)),
        }
    }
}

impl Resource for FaultyResource {
    fn append_line(&self, line: &str) -> Result<()> {
        let caller = WorkerId::current();
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let target = *state.0.get_or_insert(caller);
            if target == caller {
                state.1 += 1;
                if state.1 == self.fail_on {
                    return Err(MutexFileError::ResourceWrite {
                        path: self.inner.path().to_path_buf(),
                        source: std::io::Error::other("injected failure"),
                    });
                }
            }
        }
        self.inner.append_line(line)
    }
}

/// Panics on the first append made by the first worker that writes.
pub(crate) struct PanickingResource {
    inner: AppendFile,
    victim: Mutex<Option<WorkerId>>,
}

impl PanickingResource {
    pub(crate) fn new(inner: AppendFile) -> Self {
        Self {
            inner,
            victim: Mutex::new(None),
        }
    }
}

impl Resource for PanickingResource {
    fn append_line(&self, line: &str) -> Result<()> {
        let caller = WorkerId::current();
        let victim = *self
            .victim
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(caller);
        if victim == caller {
            panic!("resource blew up under Thread {}", caller);
        }
        self.inner.append_line(line)
    }
}

/// Records every report instead of printing it.
#[derive(Default)]
pub(crate) struct CapturingDiagnostics {
    reports: Mutex<Vec<(WorkerId, String)>>,
}

impl CapturingDiagnostics {
    pub(crate) fn reports(&self) -> Vec<(WorkerId, String)> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Diagnostics for CapturingDiagnostics {
    fn worker_failed(&self, worker: WorkerId, error: &MutexFileError) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((worker, error.to_string()));
    }
}
