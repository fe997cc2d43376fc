//! Push buffer command emission
//!
//! Commands are a method header followed by `count` data words written to
//! consecutive method addresses. The buffer is append-only; when a method
//! does not fit in the remaining space the current batch is kicked and the
//! method starts a new one.

use nc_core::PushBufError;

use crate::state::Engine;

const METHOD_MASK: u32 = 0x1FFC;
const SUBCHANNEL_SHIFT: u32 = 13;
const SUBCHANNEL_MASK: u32 = 0x7;
const COUNT_SHIFT: u32 = 18;

/// Largest data word count of a single method header
pub const MAX_METHOD_COUNT: u32 = 0x7FF;

/// Encode an incrementing method header
pub const fn method_header(subchannel: u8, method: u32, count: u32) -> u32 {
    (count << COUNT_SHIFT)
        | (((subchannel as u32) & SUBCHANNEL_MASK) << SUBCHANNEL_SHIFT)
        | (method & METHOD_MASK)
}

/// Decoded method header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodHeader {
    pub subchannel: u8,
    pub method: u32,
    pub count: u32,
}

impl MethodHeader {
    pub fn decode(word: u32) -> Self {
        Self {
            subchannel: ((word >> SUBCHANNEL_SHIFT) & SUBCHANNEL_MASK) as u8,
            method: word & METHOD_MASK,
            count: (word >> COUNT_SHIFT) & MAX_METHOD_COUNT,
        }
    }
}

/// Sink for GPU methods
pub trait PushBuffer {
    /// Start a method of `count` data words on `engine`'s subchannel
    fn begin_method(&mut self, engine: &Engine, method: u32, count: u32) -> Result<(), PushBufError>;

    /// Write the next data word of the current method
    fn out(&mut self, data: u32) -> Result<(), PushBufError>;
}

/// In-memory push buffer with a fixed batch size
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    words: Vec<u32>,
    capacity: usize,
    /// Data words still owed to the current method
    pending: u32,
    submitted: Vec<Vec<u32>>,
    trace: bool,
}

impl CommandBuffer {
    /// Create a buffer holding at most `capacity` words per batch
    pub fn new(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
            capacity,
            pending: 0,
            submitted: Vec::new(),
            trace: false,
        }
    }

    /// Log every method header at trace level
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Words of the current, not yet submitted batch
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Batches submitted so far
    pub fn submitted(&self) -> &[Vec<u32>] {
        &self.submitted
    }

    /// Remaining space in the current batch
    pub fn free_words(&self) -> usize {
        self.capacity - self.words.len()
    }

    /// Submit the current batch
    pub fn kick(&mut self) {
        if self.words.is_empty() {
            return;
        }
        tracing::debug!("Push buffer: kicking {} words", self.words.len());
        let batch = std::mem::replace(&mut self.words, Vec::with_capacity(self.capacity));
        self.submitted.push(batch);
    }

    /// Kick the current batch and return every submitted batch
    pub fn finish(mut self) -> Vec<Vec<u32>> {
        self.kick();
        self.submitted
    }
}

impl PushBuffer for CommandBuffer {
    fn begin_method(&mut self, engine: &Engine, method: u32, count: u32) -> Result<(), PushBufError> {
        if self.pending != 0 {
            return Err(PushBufError::UnexpectedData {
                expected: self.pending,
            });
        }
        if count == 0 || count > MAX_METHOD_COUNT {
            return Err(PushBufError::InvalidCount(count));
        }

        let needed = count as usize + 1;
        if needed > self.capacity {
            return Err(PushBufError::Overflow {
                needed,
                capacity: self.capacity,
            });
        }
        if needed > self.free_words() {
            self.kick();
        }

        if self.trace {
            tracing::trace!(
                "Push buffer: subc {} method 0x{:04X} x{}",
                engine.subchannel,
                method,
                count
            );
        }
        self.words.push(method_header(engine.subchannel, method, count));
        self.pending = count;
        Ok(())
    }

    fn out(&mut self, data: u32) -> Result<(), PushBufError> {
        if self.pending == 0 {
            return Err(PushBufError::UnexpectedData { expected: 0 });
        }
        self.words.push(data);
        self.pending -= 1;
        Ok(())
    }
}
