use std::{
    cell::RefCell,
    collections::HashMap,
    ops::Deref,
    rc::{Rc, Weak},
};

const MIN_SIZE_CLASS: usize = 64;
const MAX_POOLED_PER_CLASS: usize = 64;

/// Pool of reusable byte buffers, keyed by power-of-two size class.
///
/// Buffers are handed out as [`PooledBuffer`]s which return themselves to the
/// pool when dropped, so every exit path (consumption, stale discard, eviction,
/// failed apply) releases its storage. The pool is single-threaded: ingestion
/// and flushing both run on the simulation tick thread.
#[derive(Clone, Default)]
pub struct BufferPool {
    inner: Rc<RefCell<PoolInner>>,
}

#[derive(Default)]
struct PoolInner {
    free: HashMap<usize, Vec<Vec<u8>>>,
    outstanding: usize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires an empty buffer able to hold at least `len` bytes
    pub fn acquire(&self, len: usize) -> PooledBuffer {
        let class = size_class(len);
        let mut inner = self.inner.borrow_mut();
        let bytes = inner
            .free
            .get_mut(&class)
            .and_then(Vec::pop)
            .unwrap_or_else(|| Vec::with_capacity(class));
        inner.outstanding += 1;

        PooledBuffer {
            bytes,
            pool: Rc::downgrade(&self.inner),
        }
    }

    /// Acquires a buffer holding a copy of `bytes`
    pub fn acquire_from(&self, bytes: &[u8]) -> PooledBuffer {
        let mut buffer = self.acquire(bytes.len());
        buffer.bytes.extend_from_slice(bytes);
        buffer
    }

    /// Buffers currently resting in the pool
    pub fn available(&self) -> usize {
        self.inner.borrow().free.values().map(Vec::len).sum()
    }

    /// Buffers handed out and not yet returned
    pub fn outstanding(&self) -> usize {
        self.inner.borrow().outstanding
    }
}

impl PoolInner {
    fn release(&mut self, mut bytes: Vec<u8>) {
        self.outstanding = self.outstanding.saturating_sub(1);
        bytes.clear();
        let class = size_class(bytes.capacity());
        // a buffer that grew past its class is filed under the class it can fully serve
        let class = if class > bytes.capacity() { class / 2 } else { class };
        let list = self.free.entry(class).or_default();
        if list.len() < MAX_POOLED_PER_CLASS {
            list.push(bytes);
        }
    }
}

fn size_class(len: usize) -> usize {
    len.max(MIN_SIZE_CLASS).next_power_of_two()
}

/// Byte buffer borrowed from a [`BufferPool`]
pub struct PooledBuffer {
    bytes: Vec<u8>,
    pool: Weak<RefCell<PoolInner>>,
}

impl PooledBuffer {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.upgrade() {
            let bytes = std::mem::take(&mut self.bytes);
            pool.borrow_mut().release(bytes);
        }
    }
}
