// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//! Each demand draw becomes a duration slice on the view's track (one `pid`
//! per routing id) with composites and lifecycle changes as instants.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use tether_core::geometry::IntRect;
use tether_core::time::Timebase;
use tether_core::trace::DrawPath;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::DemandDraw(e) => {
                let [tx, ty, tz] = e.transform.translation();
                events.push(json!({
                    "ph": "B",
                    "name": draw_name(e.path),
                    "cat": "DemandDraw",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": e.routing_id.0,
                    "tid": 0,
                    "args": {
                        "surface_size": [e.surface_size.width, e.surface_size.height],
                        "clip": rect_json(e.clip),
                        "translation": [tx, ty, tz],
                    }
                }));
            }
            RecordedEvent::DrawResult(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": draw_name(e.path),
                    "cat": "DemandDraw",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": e.routing_id.0,
                    "tid": 0,
                    "args": {
                        "completed": e.completed,
                        "elapsed_us": ticks_to_us(e.elapsed.ticks(), timebase),
                    }
                }));
            }
            RecordedEvent::Composite(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Composite",
                    "cat": "DemandDraw",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": e.routing_id.0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "damage": rect_json(e.damage),
                        "begin_frame_us": e.begin_frame.map(|t| ticks_to_us(t.ticks(), timebase)),
                    }
                }));
            }
            RecordedEvent::BeginFrameRequest(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "BeginFrameRequest",
                    "cat": "Surface",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": e.routing_id.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "enabled": e.enabled,
                    }
                }));
            }
            RecordedEvent::Lifecycle(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.kind),
                    "cat": "Surface",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": e.routing_id.0,
                    "tid": 0,
                    "s": "p",
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn draw_name(path: DrawPath) -> &'static str {
    match path {
        DrawPath::Hardware => "DemandDrawHw",
        DrawPath::Software => "DemandDrawSw",
    }
}

fn rect_json(r: IntRect) -> Value {
    json!([r.x, r.y, r.width, r.height])
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use tether_core::geometry::IntSize;
    use tether_core::routing::RoutingId;
    use tether_core::time::{Duration, HostTime};
    use tether_core::trace::{
        CompositeEvent, DemandDrawEvent, DrawResultEvent, LifecycleEvent, LifecycleKind,
        TraceSink,
    };
    use tether_core::transform::Transform3d;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_demand_draw(&DemandDrawEvent {
            routing_id: RoutingId(7),
            path: DrawPath::Hardware,
            surface_size: IntSize::new(400, 300),
            clip: IntRect::new(10, 20, 100, 50),
            transform: Transform3d::from_translation(-10.0, -20.0, 0.0),
            timestamp: HostTime(1_000_000),
        });
        rec.on_composite(&CompositeEvent {
            routing_id: RoutingId(7),
            damage: IntRect::new(0, 0, 100, 50),
            begin_frame: None,
            timestamp: HostTime(1_000_400),
        });
        rec.on_draw_result(&DrawResultEvent {
            routing_id: RoutingId(7),
            path: DrawPath::Hardware,
            completed: true,
            timestamp: HostTime(1_000_500),
            elapsed: Duration(500),
        });
        rec.on_lifecycle(&LifecycleEvent {
            routing_id: RoutingId(7),
            kind: LifecycleKind::Destroyed,
            timestamp: HostTime(2_000_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        // The draw is a begin/end pair on the view's track.
        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "DemandDrawHw");
        assert_eq!(parsed[0]["pid"], 7);
        assert_eq!(parsed[0]["ts"], 1000.0);
        assert_eq!(parsed[0]["args"]["translation"][0], -10.0);

        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["name"], "Composite");
        assert!(parsed[1]["args"]["begin_frame_us"].is_null());

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["name"], "DemandDrawHw");
        assert_eq!(parsed[2]["args"]["completed"], true);

        assert_eq!(parsed[3]["name"], "Destroyed");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
