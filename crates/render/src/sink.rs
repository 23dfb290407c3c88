//! The `DisplaySink` capability and its error type.

use std::fmt;
use std::io;

use crate::color::{Rgb, Rgb565};

/// Result of presenting a frame on a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentStatus {
    Continue,
    /// The sink was asked to close (e.g. its window or terminal).
    QuitRequested,
}

#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    /// The backing device or surface could not be brought up.
    Unavailable(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "I/O error: {}", e),
            SinkError::Unavailable(why) => write!(f, "unavailable: {}", why),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        SinkError::Io(e)
    }
}

/// A physical or virtual render target.
///
/// Coordinates are panel pixels. Implementations clip rectangles that run
/// past their edges; a rectangle starting outside is dropped.
pub trait DisplaySink {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565)
        -> Result<(), SinkError>;

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError>;

    /// Push buffered drawing to the target. Sinks that write straight to
    /// hardware have nothing to do here.
    fn present(&mut self) -> Result<PresentStatus, SinkError> {
        Ok(PresentStatus::Continue)
    }

    /// Read back a rendered pixel, for sinks that keep their own surface.
    fn read_pixel(&self, _x: u16, _y: u16) -> Option<Rgb> {
        None
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> Result<(), SinkError> {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError> {
        (**self).fill_screen(color)
    }

    fn present(&mut self) -> Result<PresentStatus, SinkError> {
        (**self).present()
    }

    fn read_pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        (**self).read_pixel(x, y)
    }
}
