// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use tether_core::geometry::{IntRect, IntSize};
use tether_core::routing::RoutingId;
use tether_core::time::{Duration, HostTime};
use tether_core::trace::{
    BeginFrameRequestEvent, CompositeEvent, DemandDrawEvent, DrawPath, DrawResultEvent,
    LifecycleEvent, LifecycleKind, TraceSink,
};
use tether_core::transform::Transform3d;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_DEMAND_DRAW: u8 = 1;
const TAG_COMPOSITE: u8 = 2;
const TAG_DRAW_RESULT: u8 = 3;
const TAG_BEGIN_FRAME_REQUEST: u8 = 4;
const TAG_LIFECYCLE: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_size(&mut self, s: IntSize) {
        self.write_u32(s.width);
        self.write_u32(s.height);
    }

    fn write_rect(&mut self, r: IntRect) {
        self.write_i32(r.x);
        self.write_i32(r.y);
        self.write_u32(r.width);
        self.write_u32(r.height);
    }

    fn write_transform(&mut self, t: &Transform3d) {
        for i in 0..4 {
            for v in t.col(i) {
                self.write_f64(v);
            }
        }
    }

    fn write_path(&mut self, p: DrawPath) {
        self.write_u8(match p {
            DrawPath::Hardware => 0,
            DrawPath::Software => 1,
        });
    }

    fn write_lifecycle(&mut self, k: LifecycleKind) {
        self.write_u8(match k {
            LifecycleKind::Bound => 0,
            LifecycleKind::HwDrawInitialized => 1,
            LifecycleKind::HwDrawReleased => 2,
            LifecycleKind::GpuContextLost => 3,
            LifecycleKind::Destroyed => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_demand_draw(&mut self, e: &DemandDrawEvent) {
        self.write_u8(TAG_DEMAND_DRAW);
        self.write_i32(e.routing_id.0);
        self.write_path(e.path);
        self.write_size(e.surface_size);
        self.write_rect(e.clip);
        self.write_transform(&e.transform);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        self.write_u8(TAG_COMPOSITE);
        self.write_i32(e.routing_id.0);
        self.write_rect(e.damage);
        self.write_option_u64(e.begin_frame.map(HostTime::ticks));
        self.write_u64(e.timestamp.ticks());
    }

    fn on_draw_result(&mut self, e: &DrawResultEvent) {
        self.write_u8(TAG_DRAW_RESULT);
        self.write_i32(e.routing_id.0);
        self.write_path(e.path);
        self.write_bool(e.completed);
        self.write_u64(e.timestamp.ticks());
        self.write_u64(e.elapsed.ticks());
    }

    fn on_begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        self.write_u8(TAG_BEGIN_FRAME_REQUEST);
        self.write_i32(e.routing_id.0);
        self.write_bool(e.enabled);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_LIFECYCLE);
        self.write_i32(e.routing_id.0);
        self.write_lifecycle(e.kind);
        self.write_u64(e.timestamp.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`DemandDrawEvent`].
    DemandDraw(DemandDrawEvent),
    /// A [`CompositeEvent`].
    Composite(CompositeEvent),
    /// A [`DrawResultEvent`].
    DrawResult(DrawResultEvent),
    /// A [`BeginFrameRequestEvent`].
    BeginFrameRequest(BeginFrameRequestEvent),
    /// A [`LifecycleEvent`].
    Lifecycle(LifecycleEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_size(&mut self) -> Option<IntSize> {
        Some(IntSize::new(self.read_u32()?, self.read_u32()?))
    }

    fn read_rect(&mut self) -> Option<IntRect> {
        Some(IntRect::new(
            self.read_i32()?,
            self.read_i32()?,
            self.read_u32()?,
            self.read_u32()?,
        ))
    }

    fn read_col(&mut self) -> Option<[f64; 4]> {
        Some([
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ])
    }

    fn read_transform(&mut self) -> Option<Transform3d> {
        Some(Transform3d::from_cols(
            self.read_col()?,
            self.read_col()?,
            self.read_col()?,
            self.read_col()?,
        ))
    }

    fn read_path(&mut self) -> Option<DrawPath> {
        Some(match self.read_u8()? {
            0 => DrawPath::Hardware,
            _ => DrawPath::Software,
        })
    }

    fn read_lifecycle(&mut self) -> Option<LifecycleKind> {
        Some(match self.read_u8()? {
            0 => LifecycleKind::Bound,
            1 => LifecycleKind::HwDrawInitialized,
            2 => LifecycleKind::HwDrawReleased,
            3 => LifecycleKind::GpuContextLost,
            _ => LifecycleKind::Destroyed,
        })
    }

    fn decode_demand_draw(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DemandDraw(DemandDrawEvent {
            routing_id: RoutingId(self.read_i32()?),
            path: self.read_path()?,
            surface_size: self.read_size()?,
            clip: self.read_rect()?,
            transform: self.read_transform()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_composite(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Composite(CompositeEvent {
            routing_id: RoutingId(self.read_i32()?),
            damage: self.read_rect()?,
            begin_frame: self.read_option_u64()?.map(HostTime),
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_draw_result(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DrawResult(DrawResultEvent {
            routing_id: RoutingId(self.read_i32()?),
            path: self.read_path()?,
            completed: self.read_bool()?,
            timestamp: HostTime(self.read_u64()?),
            elapsed: Duration(self.read_u64()?),
        }))
    }

    fn decode_begin_frame_request(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BeginFrameRequest(BeginFrameRequestEvent {
            routing_id: RoutingId(self.read_i32()?),
            enabled: self.read_bool()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Lifecycle(LifecycleEvent {
            routing_id: RoutingId(self.read_i32()?),
            kind: self.read_lifecycle()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_DEMAND_DRAW => self.decode_demand_draw(),
            TAG_COMPOSITE => self.decode_composite(),
            TAG_DRAW_RESULT => self.decode_draw_result(),
            TAG_BEGIN_FRAME_REQUEST => self.decode_begin_frame_request(),
            TAG_LIFECYCLE => self.decode_lifecycle(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draw() -> DemandDrawEvent {
        DemandDrawEvent {
            routing_id: RoutingId(-4),
            path: DrawPath::Software,
            surface_size: IntSize::new(320, 240),
            clip: IntRect::new(-10, 20, 100, 50),
            transform: Transform3d::from_scale(2.0, 0.5, 1.0).post_translate(10.0, -20.0, 0.0),
            timestamp: HostTime(1_000_000),
        }
    }

    #[test]
    fn demand_draw_keeps_geometry_exactly() {
        let mut rec = RecorderSink::new();
        let orig = sample_draw();
        rec.on_demand_draw(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::DemandDraw(e) => {
                assert_eq!(e.routing_id, orig.routing_id);
                assert_eq!(e.path, orig.path);
                assert_eq!(e.surface_size, orig.surface_size);
                assert_eq!(e.clip, orig.clip);
                assert_eq!(e.transform, orig.transform);
                assert_eq!(e.timestamp, orig.timestamp);
            }
            other => panic!("expected DemandDraw, got {other:?}"),
        }
    }

    #[test]
    fn draw_sequence_decodes_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_demand_draw(&sample_draw());
        rec.on_composite(&CompositeEvent {
            routing_id: RoutingId(-4),
            damage: IntRect::new(0, 0, 100, 50),
            begin_frame: Some(HostTime(1_000_500)),
            timestamp: HostTime(1_000_900),
        });
        rec.on_draw_result(&DrawResultEvent {
            routing_id: RoutingId(-4),
            path: DrawPath::Software,
            completed: true,
            timestamp: HostTime(1_001_000),
            elapsed: Duration(1_000),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        match &events[1] {
            RecordedEvent::Composite(e) => {
                assert_eq!(e.damage, IntRect::new(0, 0, 100, 50));
                assert_eq!(e.begin_frame, Some(HostTime(1_000_500)));
            }
            other => panic!("expected Composite, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::DrawResult(e) => {
                assert!(e.completed);
                assert_eq!(e.elapsed, Duration(1_000));
            }
            other => panic!("expected DrawResult, got {other:?}"),
        }
    }

    #[test]
    fn lifecycle_and_begin_frame_request() {
        let mut rec = RecorderSink::new();
        rec.on_begin_frame_request(&BeginFrameRequestEvent {
            routing_id: RoutingId(1),
            enabled: false,
            timestamp: HostTime(10),
        });
        rec.on_lifecycle(&LifecycleEvent {
            routing_id: RoutingId(1),
            kind: LifecycleKind::HwDrawReleased,
            timestamp: HostTime(20),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(matches!(
            events[0],
            RecordedEvent::BeginFrameRequest(BeginFrameRequestEvent { enabled: false, .. })
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::Lifecycle(LifecycleEvent {
                kind: LifecycleKind::HwDrawReleased,
                ..
            })
        ));
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_demand_draw(&sample_draw());
        rec.on_lifecycle(&LifecycleEvent {
            routing_id: RoutingId(1),
            kind: LifecycleKind::Destroyed,
            timestamp: HostTime(20),
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        assert_eq!(decode(&[0xff, 1, 2, 3]).count(), 0);
    }
}
