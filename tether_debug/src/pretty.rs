// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use tether_core::geometry::IntRect;
use tether_core::time::{HostTime, Timebase};
use tether_core::trace::{
    BeginFrameRequestEvent, CompositeEvent, DemandDrawEvent, DrawPath, DrawResultEvent,
    LifecycleEvent, LifecycleKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ticks_to_us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.ticks_to_us(t.ticks())
    }
}

fn path_name(path: DrawPath) -> &'static str {
    match path {
        DrawPath::Hardware => "hw",
        DrawPath::Software => "sw",
    }
}

fn lifecycle_name(kind: LifecycleKind) -> &'static str {
    match kind {
        LifecycleKind::Bound => "bound",
        LifecycleKind::HwDrawInitialized => "hw-initialized",
        LifecycleKind::HwDrawReleased => "hw-released",
        LifecycleKind::GpuContextLost => "context-lost",
        LifecycleKind::Destroyed => "destroyed",
    }
}

fn rect(r: IntRect) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.width, r.height)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_demand_draw(&mut self, e: &DemandDrawEvent) {
        let [tx, ty, _] = e.transform.translation();
        let _ = writeln!(
            self.writer,
            "[draw:{}] view={} size={}x{} clip={} translate=({tx},{ty}) at {:.1}µs",
            path_name(e.path),
            e.routing_id.0,
            e.surface_size.width,
            e.surface_size.height,
            rect(e.clip),
            self.host_us(e.timestamp),
        );
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        let begin_frame = match e.begin_frame {
            Some(t) => format!("{:.1}µs", self.host_us(t)),
            None => "-".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[composite] view={} damage={} begin_frame={begin_frame}",
            e.routing_id.0,
            rect(e.damage),
        );
    }

    fn on_draw_result(&mut self, e: &DrawResultEvent) {
        let result = if e.completed { "done" } else { "pending" };
        let _ = writeln!(
            self.writer,
            "[result:{}] view={} {result} in {:.1}µs",
            path_name(e.path),
            e.routing_id.0,
            self.ticks_to_us(e.elapsed.ticks()),
        );
    }

    fn on_begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        let state = if e.enabled { "on" } else { "off" };
        let _ = writeln!(
            self.writer,
            "[begin-frame] view={} {state}",
            e.routing_id.0,
        );
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(
            self.writer,
            "[lifecycle] view={} {} at {:.1}µs",
            e.routing_id.0,
            lifecycle_name(e.kind),
            self.host_us(e.timestamp),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::geometry::IntSize;
    use tether_core::routing::RoutingId;
    use tether_core::time::Duration;
    use tether_core::transform::Transform3d;

    fn sink() -> PrettyPrintSink<Vec<u8>> {
        PrettyPrintSink::with_writer(Vec::new(), Timebase::NANOS)
    }

    fn text(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_demand_draw() {
        let mut sink = sink();
        sink.on_demand_draw(&DemandDrawEvent {
            routing_id: RoutingId(2),
            path: DrawPath::Hardware,
            surface_size: IntSize::new(400, 300),
            clip: IntRect::new(10, 20, 100, 50),
            transform: Transform3d::from_translation(-10.0, -20.0, 0.0),
            timestamp: HostTime(1_000_000),
        });
        let output = text(sink);
        assert!(output.starts_with("[draw:hw] view=2"), "got: {output}");
        assert!(output.contains("clip=10,20 100x50"), "got: {output}");
        assert!(output.contains("translate=(-10,-20)"), "got: {output}");
    }

    #[test]
    fn pretty_print_pending_software_result() {
        let mut sink = sink();
        sink.on_draw_result(&DrawResultEvent {
            routing_id: RoutingId(2),
            path: DrawPath::Software,
            completed: false,
            timestamp: HostTime(5_000),
            elapsed: Duration(2_500),
        });
        let output = text(sink);
        assert!(output.contains("[result:sw]"), "got: {output}");
        assert!(output.contains("pending in 2.5µs"), "got: {output}");
    }

    #[test]
    fn pretty_print_lifecycle() {
        let mut sink = sink();
        sink.on_lifecycle(&LifecycleEvent {
            routing_id: RoutingId(9),
            kind: LifecycleKind::GpuContextLost,
            timestamp: HostTime(0),
        });
        assert!(text(sink).contains("view=9 context-lost"));
    }
}
