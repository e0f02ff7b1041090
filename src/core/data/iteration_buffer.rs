use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationBufferError {
    LengthMismatch {
        width: u32,
        height: u32,
        len: usize,
    },
}

impl fmt::Display for IterationBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { width, height, len } => {
                write!(
                    f,
                    "iteration buffer of {} counts does not cover {}x{} pixels",
                    len, width, height
                )
            }
        }
    }
}

impl Error for IterationBufferError {}

/// One completed computation: an iteration count per pixel, row-major,
/// top row first. Immutable once handed to the presentation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationBuffer {
    width: u32,
    height: u32,
    counts: Vec<u32>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, counts: Vec<u32>) -> Result<Self, IterationBufferError> {
        if counts.len() != (width as usize) * (height as usize) {
            return Err(IterationBufferError::LengthMismatch {
                width,
                height,
                len: counts.len(),
            });
        }

        Ok(Self {
            width,
            height,
            counts,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Count at row `row`, column `col`.
    #[must_use]
    pub fn at(&self, row: u32, col: u32) -> u32 {
        self.counts[(row as usize) * (self.width as usize) + col as usize]
    }
}
