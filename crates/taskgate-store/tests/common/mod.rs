use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskgate_store::{Result, ServerState, StateRepository, StoreError};

/// Repository double that counts reads and writes, delegating to an inner
/// repository
pub struct CountingRepository {
    inner: Box<dyn StateRepository>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl CountingRepository {
    #[allow(dead_code)]
    pub fn wrap(inner: Box<dyn StateRepository>) -> (Self, Counters) {
        let reads = Arc::new(AtomicUsize::new(0));
        let writes = Arc::new(AtomicUsize::new(0));
        let counters = Counters {
            reads: Arc::clone(&reads),
            writes: Arc::clone(&writes),
        };
        (
            Self {
                inner,
                reads,
                writes,
            },
            counters,
        )
    }
}

/// Handle the test keeps to observe a wrapped repository's traffic
pub struct Counters {
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl Counters {
    #[allow(dead_code)]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StateRepository for CountingRepository {
    fn read(&self, server_id: &str) -> Result<Option<ServerState>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(server_id)
    }

    fn write(&self, server_id: &str, state: &ServerState) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(server_id, state)
    }
}

/// Repository double whose durable writes always fail
///
/// Reads report no snapshot, as on a host whose state directory is gone.
pub struct FailingWriteRepository;

impl StateRepository for FailingWriteRepository {
    fn read(&self, _server_id: &str) -> Result<Option<ServerState>> {
        Ok(None)
    }

    fn write(&self, _server_id: &str, _state: &ServerState) -> Result<()> {
        Err(StoreError::Io {
            op: "write_state",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }
}
