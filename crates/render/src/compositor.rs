//! Compositor: fans every logical draw call out to all registered sinks.
//!
//! Sinks receive identical arguments in registration order. A sink that
//! fails to come up is left out from the start; a sink that errors later is
//! evicted and the remaining sinks carry on. Both cases are logged once.

use log::{info, warn};

use crate::color::Rgb565;
use crate::sink::{DisplaySink, PresentStatus, SinkError};

/// Pixel geometry shared by all sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width_px: u16,
    pub height_px: u16,
    pub cell_size: u16,
}

impl Layout {
    pub fn new(width_px: u16, height_px: u16, cell_size: u16) -> Self {
        Self {
            width_px,
            height_px,
            cell_size,
        }
    }

    /// Grid columns that fit in the panel
    pub fn grid_width(&self) -> u16 {
        self.width_px / self.cell_size
    }

    /// Grid rows that fit in the panel
    pub fn grid_height(&self) -> u16 {
        self.height_px / self.cell_size
    }
}

impl Default for Layout {
    fn default() -> Self {
        use pi_snake_types::{CELL_SIZE, PANEL_HEIGHT, PANEL_WIDTH};
        Self::new(PANEL_WIDTH, PANEL_HEIGHT, CELL_SIZE)
    }
}

/// A sink that could not be used, with the reason.
#[derive(Debug)]
pub struct DegradedSink {
    pub name: String,
    pub error: SinkError,
}

pub struct Compositor {
    layout: Layout,
    sinks: Vec<Box<dyn DisplaySink>>,
    degraded: Vec<DegradedSink>,
}

impl Compositor {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            sinks: Vec::new(),
            degraded: Vec::new(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Register a sink. Appends to the end of the fan-out order.
    pub fn register(&mut self, sink: Box<dyn DisplaySink>) {
        info!("display sink '{}' attached", sink.name());
        self.sinks.push(sink);
    }

    /// Register the outcome of bringing a sink up.
    ///
    /// Failures are recorded and logged; the compositor keeps working with
    /// whatever sinks it already has. Returns whether the sink was attached.
    pub fn attach<S>(&mut self, name: &str, sink: Result<S, SinkError>) -> bool
    where
        S: DisplaySink + 'static,
    {
        match sink {
            Ok(sink) => {
                self.register(Box::new(sink));
                true
            }
            Err(error) => {
                warn!("display sink '{}' unavailable, continuing without it: {}", name, error);
                self.degraded.push(DegradedSink {
                    name: name.to_string(),
                    error,
                });
                false
            }
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sinks(&self) -> impl Iterator<Item = &dyn DisplaySink> + '_ {
        self.sinks.iter().map(|s| &**s as &dyn DisplaySink)
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Sinks that failed at startup or were evicted later.
    pub fn degraded(&self) -> &[DegradedSink] {
        &self.degraded
    }

    /// Fill one grid cell on every sink. Cells outside the grid are ignored.
    pub fn draw_cell(&mut self, gx: u16, gy: u16, color: Rgb565) {
        if gx >= self.layout.grid_width() || gy >= self.layout.grid_height() {
            return;
        }
        let cs = self.layout.cell_size;
        self.fill_rect(gx * cs, gy * cs, cs, cs, color);
    }

    /// Fill the whole panel on every sink.
    pub fn fill_all(&mut self, color: Rgb565) {
        self.fan_out(|sink| sink.fill_screen(color));
    }

    /// Pixel-space rectangle on every sink (used by text and overlays).
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) {
        self.fan_out(|sink| sink.fill_rect(x, y, w, h, color));
    }

    /// Present buffered sinks. Reports a quit request from any sink.
    pub fn present(&mut self) -> PresentStatus {
        let mut status = PresentStatus::Continue;
        self.fan_out(|sink| {
            if sink.present()? == PresentStatus::QuitRequested {
                status = PresentStatus::QuitRequested;
            }
            Ok(())
        });
        status
    }

    fn fan_out(&mut self, mut op: impl FnMut(&mut dyn DisplaySink) -> Result<(), SinkError>) {
        let mut i = 0;
        while i < self.sinks.len() {
            match op(&mut *self.sinks[i]) {
                Ok(()) => i += 1,
                Err(error) => {
                    let sink = self.sinks.remove(i);
                    warn!(
                        "display sink '{}' failed and was dropped ({} left): {}",
                        sink.name(),
                        self.sinks.len(),
                        error
                    );
                    self.degraded.push(DegradedSink {
                        name: sink.name().to_string(),
                        error,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySink;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect(u16, u16, u16, u16, Rgb565),
        Screen(Rgb565),
        Present,
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, Op)>>>,
        fail_after: Option<usize>,
        calls: usize,
        quit: bool,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<(&'static str, Op)>>>) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                fail_after: None,
                calls: 0,
                quit: false,
            }
        }

        fn record(&mut self, op: Op) -> Result<(), SinkError> {
            self.calls += 1;
            if let Some(limit) = self.fail_after {
                if self.calls > limit {
                    return Err(SinkError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone")));
                }
            }
            self.log.borrow_mut().push((self.name, op));
            Ok(())
        }
    }

    impl DisplaySink for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn fill_rect(
            &mut self,
            x: u16,
            y: u16,
            w: u16,
            h: u16,
            color: Rgb565,
        ) -> Result<(), SinkError> {
            self.record(Op::Rect(x, y, w, h, color))
        }

        fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError> {
            self.record(Op::Screen(color))
        }

        fn present(&mut self) -> Result<PresentStatus, SinkError> {
            self.record(Op::Present)?;
            Ok(if self.quit {
                PresentStatus::QuitRequested
            } else {
                PresentStatus::Continue
            })
        }
    }

    fn layout() -> Layout {
        Layout::new(240, 240, 10)
    }

    #[test]
    fn test_draw_cell_converts_to_pixels_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Compositor::new(layout());
        c.register(Box::new(Recorder::new("a", &log)));
        c.register(Box::new(Recorder::new("b", &log)));

        c.draw_cell(3, 4, Rgb565::GREEN);

        let expected = Op::Rect(30, 40, 10, 10, Rgb565::GREEN);
        assert_eq!(
            *log.borrow(),
            vec![("a", expected.clone()), ("b", expected)]
        );
    }

    #[test]
    fn test_out_of_bounds_cell_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Compositor::new(layout());
        c.register(Box::new(Recorder::new("a", &log)));

        c.draw_cell(24, 0, Rgb565::RED);
        c.draw_cell(0, 24, Rgb565::RED);
        c.draw_cell(u16::MAX, u16::MAX, Rgb565::RED);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_fill_all_reaches_every_sink() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Compositor::new(layout());
        c.register(Box::new(Recorder::new("a", &log)));
        c.register(Box::new(Recorder::new("b", &log)));

        c.fill_all(Rgb565::BLUE);

        assert_eq!(
            *log.borrow(),
            vec![("a", Op::Screen(Rgb565::BLUE)), ("b", Op::Screen(Rgb565::BLUE))]
        );
    }

    #[test]
    fn test_failed_attach_is_recorded() {
        let mut c = Compositor::new(layout());
        let attached = c.attach::<MemorySink>(
            "panel",
            Err(SinkError::Unavailable("no spi device".to_string())),
        );
        assert!(!attached);
        assert_eq!(c.sink_count(), 0);
        assert_eq!(c.degraded().len(), 1);
        assert_eq!(c.degraded()[0].name, "panel");

        assert!(c.attach("mirror", Ok(MemorySink::new("mirror", 240, 240))));
        assert_eq!(c.sink_names(), vec!["mirror"]);
    }

    #[test]
    fn test_failing_sink_is_evicted_others_continue() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Compositor::new(layout());
        let mut flaky = Recorder::new("flaky", &log);
        flaky.fail_after = Some(1);
        c.register(Box::new(flaky));
        c.register(Box::new(Recorder::new("steady", &log)));

        c.draw_cell(0, 1, Rgb565::GREEN);
        c.draw_cell(0, 2, Rgb565::GREEN);
        c.draw_cell(0, 3, Rgb565::GREEN);

        assert_eq!(c.sink_names(), vec!["steady"]);
        assert_eq!(c.degraded().len(), 1);
        let steady_ops = log.borrow().iter().filter(|(n, _)| *n == "steady").count();
        assert_eq!(steady_ops, 3);
    }

    #[test]
    fn test_present_reports_quit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Compositor::new(layout());
        c.register(Box::new(Recorder::new("a", &log)));
        assert_eq!(c.present(), PresentStatus::Continue);

        let mut closing = Recorder::new("b", &log);
        closing.quit = true;
        c.register(Box::new(closing));
        assert_eq!(c.present(), PresentStatus::QuitRequested);
        assert_eq!(log.borrow().iter().filter(|(_, op)| *op == Op::Present).count(), 3);
    }
}
