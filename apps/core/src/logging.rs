use std::any::Any;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "medsearch.log";
const ARCHIVE_PREFIX: &str = "medsearch-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;
const FILTER_ENV: &str = "MEDSEARCH_LOG";

static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Routes `tracing` output to `medsearch.log` in `log_dir`, rotating it while
/// the process runs. The level filter comes from `MEDSEARCH_LOG` and defaults
/// to `info`.
pub fn init(log_dir: &Path) -> Result<(), io::Error> {
    let writer = RotatingWriter::open(log_dir, MAX_LOG_BYTES, MAX_ARCHIVES)?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    if installed.is_err() {
        tracing::debug!(log_dir = %log_dir.display(), "tracing subscriber already installed");
    }

    install_panic_hook();
    Ok(())
}

#[derive(Clone)]
pub struct RotatingWriter {
    inner: Arc<Mutex<LogFile>>,
}

struct LogFile {
    dir: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    max_archives: usize,
    rotations: u32,
}

impl RotatingWriter {
    pub fn open(log_dir: &Path, max_bytes: u64, max_archives: usize) -> Result<Self, io::Error> {
        fs::create_dir_all(log_dir)?;
        let (file, written) = open_current(log_dir)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(LogFile {
                dir: log_dir.to_path_buf(),
                file,
                written,
                max_bytes,
                max_archives,
                rotations: 0,
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LogFile> {
        // A panic mid-write leaves the file usable; keep logging.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<'a> MakeWriter<'a> for RotatingWriter {
    type Writer = LogLine<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogLine(self.lock())
    }
}

pub struct LogLine<'a>(MutexGuard<'a, LogFile>);

impl Write for LogLine<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.file.flush()
    }
}

impl LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.rotations += 1;
        let archived = self.dir.join(format!(
            "{ARCHIVE_PREFIX}{:013}-{:04}.log",
            now_millis(),
            self.rotations
        ));
        fs::rename(log_file_path(&self.dir), archived)?;
        let (file, written) = open_current(&self.dir)?;
        self.file = file;
        self.written = written;
        prune_archives(&self.dir, self.max_archives)
    }
}

fn open_current(log_dir: &Path) -> io::Result<(File, u64)> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(log_dir))?;
    let written = file.metadata()?.len();
    Ok((file, written))
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

fn prune_archives(log_dir: &Path, keep: usize) -> io::Result<()> {
    let mut archives: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    if archives.len() <= keep {
        return Ok(());
    }

    archives.sort();
    let excess = archives.len() - keep;
    for stale in archives.drain(..excess) {
        if let Err(err) = fs::remove_file(&stale) {
            tracing::warn!(path = %stale.display(), error = %err, "could not prune log archive");
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|at| format!("{}:{}", at.file(), at.line()))
                .unwrap_or_else(|| "unknown".to_string());
            tracing::error!(%location, payload = panic_message(info.payload()), "panic");
            previous(info);
        }));
    });
}
