//! Leap-second table.
//!
//! The table is an ascending list of the raw TAI instants at which a leap
//! second occurs. It is read from a flat sequence of 8-byte big-endian
//! instants with no header, the format of the `leapsecs.dat` file distributed
//! with libtai.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::{unpack, LoadError, TAI_PACKED_LEN};

/// Default location of the leap-second file.
pub const DEFAULT_LEAPSECS_PATH: &str = "/etc/leapsecs.dat";

/// Environment variable overriding [`DEFAULT_LEAPSECS_PATH`] for
/// [`FileSource::default`].
pub const LEAPSECS_PATH_ENV: &str = "TAI_CALENDAR_LEAPSECS";

/// A source of leap-second table bytes.
///
/// Implementors return the whole content of the source at each call.
pub trait ByteSource {
    /// Reads the whole content of the source.
    fn read_bytes(&mut self) -> Result<Vec<u8>, LoadError>;
}

impl ByteSource for Vec<u8> {
    fn read_bytes(&mut self) -> Result<Vec<u8>, LoadError> {
        Ok(self.clone())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_bytes(&mut self) -> Result<Vec<u8>, LoadError> {
        (**self).read_bytes()
    }
}

/// A byte source reading a file, opened anew at each read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading the specified file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    /// Reads the file named by the `TAI_CALENDAR_LEAPSECS` environment
    /// variable if set, or `/etc/leapsecs.dat` otherwise.
    fn default() -> Self {
        match std::env::var_os(LEAPSECS_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_LEAPSECS_PATH),
        }
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&mut self) -> Result<Vec<u8>, LoadError> {
        let file = File::open(&self.path)?;
        let expected =
            usize::try_from(file.metadata()?.len()).map_err(|_| LoadError::OutOfMemory)?;

        read_sized(file, expected)
    }
}

/// Reads exactly `expected` bytes, failing if the reader ends early.
fn read_sized<R: Read>(reader: R, expected: usize) -> Result<Vec<u8>, LoadError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(expected)
        .map_err(|_| LoadError::OutOfMemory)?;
    reader.take(expected as u64).read_to_end(&mut buf)?;

    if buf.len() != expected {
        return Err(LoadError::ShortRead {
            expected,
            actual: buf.len(),
        });
    }

    Ok(buf)
}

/// A byte source draining an arbitrary reader.
///
/// The reader is read to its end at each call, so a second read of a
/// non-rewindable reader yields an empty stream.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a source draining the specified reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_bytes(&mut self) -> Result<Vec<u8>, LoadError> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;

        Ok(buf)
    }
}

/// A table of leap seconds, shareable between threads.
///
/// The table is loaded lazily from its byte source the first time it is
/// queried while empty. Once non-empty, it is never implicitly reloaded,
/// though it may be replaced explicitly with [`load`](Self::load) or
/// [`load_from`](Self::load_from). Readers always observe either the previous
/// or the new list as a whole.
///
/// # Examples
///
/// ```
/// use tai_calendar::{pack, LeapSecondTable};
///
/// let bytes: Vec<u8> = [100u64, 200, 300].iter().flat_map(|&t| pack(t)).collect();
/// let table = LeapSecondTable::with_source(bytes);
///
/// assert_eq!(table.count_before(250), Ok(2));
/// assert_eq!(table.is_leap_instant(200), Ok(true));
///
/// let mut tai = 250;
/// assert_eq!(table.sub_leap_seconds(&mut tai), Ok(2));
/// assert_eq!(tai, 248);
/// ```
pub struct LeapSecondTable {
    entries: RwLock<Arc<[u64]>>,
    source: Mutex<Box<dyn ByteSource + Send>>,
}

impl LeapSecondTable {
    /// Creates an empty table loading from [`FileSource::default`].
    pub fn new() -> Self {
        Self::with_source(FileSource::default())
    }

    /// Creates an empty table loading from the specified source.
    pub fn with_source<S: ByteSource + Send + 'static>(source: S) -> Self {
        Self {
            entries: RwLock::new(Arc::from(Vec::new())),
            source: Mutex::new(Box::new(source)),
        }
    }

    /// Creates a table holding the specified instants.
    ///
    /// The instants must be in strictly ascending order. The table has no
    /// byte source, so it stays empty if created with no instants.
    pub fn from_entries(entries: impl IntoIterator<Item = u64>) -> Result<Self, LoadError> {
        let entries = entries.into_iter().collect::<Vec<_>>();
        check_sorted(&entries)?;

        let table = Self::with_source(Vec::new());
        table.replace(entries);

        Ok(table)
    }

    /// Replaces the table with the instants decoded from a byte buffer.
    ///
    /// The buffer length must be a multiple of 8 and the instants must be in
    /// strictly ascending order. Returns the number of instants loaded. On
    /// error, the table is left unchanged.
    pub fn load(&self, bytes: &[u8]) -> Result<usize, LoadError> {
        let entries = decode(bytes).map_err(|err| {
            _debug!(error = %err, "leap-second table rejected");
            err
        })?;
        let count = entries.len();
        self.replace(entries);

        Ok(count)
    }

    /// Replaces the table with the content of a byte source.
    ///
    /// See [`load`](Self::load).
    pub fn load_from<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<usize, LoadError> {
        let bytes = source.read_bytes().map_err(|err| {
            _debug!(error = %err, "leap-second source could not be read");
            err
        })?;
        _debug!(len = bytes.len(), "leap-second source read");

        self.load(&bytes)
    }

    /// Loads the table from its byte source if it is empty.
    ///
    /// Returns the number of instants in the table. A non-empty table is
    /// returned as is, and concurrent callers never load it more than once.
    /// If the table is filled by an explicit [`load`](Self::load) while the
    /// source is being read, the explicitly loaded instants are kept.
    pub fn ensure_loaded(&self) -> Result<usize, LoadError> {
        let count = self.len();
        if count != 0 {
            return Ok(count);
        }

        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);

        // Another thread may have completed the load while we were waiting.
        let count = self.len();
        if count != 0 {
            _debug!(count, "leap-second table already loaded");
            return Ok(count);
        }

        let bytes = source.read_bytes().map_err(|err| {
            _debug!(error = %err, "leap-second source could not be read");
            err
        })?;
        let entries = decode(&bytes).map_err(|err| {
            _debug!(error = %err, "leap-second table rejected");
            err
        })?;

        let mut current = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !current.is_empty() {
            _debug!(count = current.len(), "leap-second table loaded concurrently");
            return Ok(current.len());
        }
        *current = Arc::from(entries);
        _debug!(count = current.len(), "leap-second table loaded");

        Ok(current.len())
    }

    /// Returns the number of instants currently in the table, without
    /// loading it.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` if the table is currently empty, without loading it.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the instants currently in the table, without loading it.
    pub fn entries(&self) -> Arc<[u64]> {
        self.snapshot()
    }

    /// Returns the number of leap seconds strictly before the instant.
    ///
    /// Loads the table first if it is empty.
    pub fn count_before(&self, tai: u64) -> Result<usize, LoadError> {
        let entries = self.loaded()?;

        Ok(entries.partition_point(|&leap| leap < tai))
    }

    /// Returns `true` if the instant is a leap second.
    ///
    /// Loads the table first if it is empty.
    pub fn is_leap_instant(&self, tai: u64) -> Result<bool, LoadError> {
        let entries = self.loaded()?;

        Ok(entries.binary_search(&tai).is_ok())
    }

    /// Subtracts from the instant the number of leap seconds strictly before
    /// it, and returns that number.
    ///
    /// Loads the table first if it is empty. The instant is left unchanged on
    /// error.
    pub fn sub_leap_seconds(&self, tai: &mut u64) -> Result<u64, LoadError> {
        let entries = self.loaded()?;
        let count = entries.partition_point(|&leap| leap < *tai) as u64;
        *tai = tai.wrapping_sub(count);

        Ok(count)
    }

    /// Adds to the instant the number of leap seconds strictly before it, and
    /// returns that number.
    ///
    /// A leap second equal to the instant itself contributes no adjustment.
    /// Loads the table first if it is empty. The instant is left unchanged on
    /// error.
    pub fn add_leap_seconds(&self, tai: &mut u64) -> Result<u64, LoadError> {
        let entries = self.loaded()?;
        let count = entries.partition_point(|&leap| leap < *tai) as u64;
        *tai = tai.wrapping_add(count);

        Ok(count)
    }

    fn loaded(&self) -> Result<Arc<[u64]>, LoadError> {
        self.ensure_loaded()?;

        Ok(self.snapshot())
    }

    fn snapshot(&self) -> Arc<[u64]> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, entries: Vec<u64>) {
        let count = entries.len();
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = Arc::from(entries);
        _debug!(count, "leap-second table replaced");
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LeapSecondTable {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("LeapSecondTable")
            .field("entries", &self.snapshot())
            .finish_non_exhaustive()
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<u64>, LoadError> {
    if bytes.len() % TAI_PACKED_LEN != 0 {
        return Err(LoadError::MisalignedLength(bytes.len()));
    }

    let mut entries = Vec::new();
    entries
        .try_reserve_exact(bytes.len() / TAI_PACKED_LEN)
        .map_err(|_| LoadError::OutOfMemory)?;

    for chunk in bytes.chunks_exact(TAI_PACKED_LEN) {
        let mut packed = [0; TAI_PACKED_LEN];
        packed.copy_from_slice(chunk);
        entries.push(unpack(&packed));
    }
    check_sorted(&entries)?;

    Ok(entries)
}

fn check_sorted(entries: &[u64]) -> Result<(), LoadError> {
    match entries.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(LoadError::Unsorted { index: index + 1 }),
        None => Ok(()),
    }
}
