// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a scripted compositing engine through both demand-draw paths.
//!
//! Software draws raster into a `tiny-skia` pixmap that plays the host's
//! canvas; the last frame is written to `raster_demo.png`. Hardware draws run
//! against a headless GPU platform that loses its context after a few frames,
//! after which the host releases and re-initializes it. Frame-level events go
//! to a [`PrettyPrintSink`] and a [`RecorderSink`], and the recording is
//! exported as `raster_demo_trace.json`.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see the surface's own logging.

mod canvas;
mod engine;
mod host;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use kurbo::Affine;
use tether_core::canvas::Rgba8;
use tether_core::geometry::{IntRect, IntSize};
use tether_core::routing::RoutingId;
use tether_core::transform::Transform3d;
use tether_debug::pretty::PrettyPrintSink;
use tether_debug::recorder::RecorderSink;
use tether_debug::shared::{SharedSink, Tee};
use tether_surface::{DelegateRegistry, SynchronousOutputSurface, ThreadChecker};
use tracing_subscriber::EnvFilter;

use crate::canvas::PixmapCanvas;
use crate::engine::ScriptedEngine;
use crate::host::{HeadlessPlatform, LoggingDelegate};

const VIEW: RoutingId = RoutingId(1);
const CANVAS_SIZE: IntSize = IntSize::new(256, 256);
const SOFTWARE_FRAMES: usize = 4;
const HARDWARE_FRAMES: usize = 6;
/// Flushes before the headless context reports loss.
const LOSE_CONTEXT_AFTER: u64 = 3;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let timebase = tether_surface::time::timebase();
    let recorder = SharedSink::new(RecorderSink::new());
    let sink = Tee(PrettyPrintSink::stderr(timebase), recorder.clone());

    let registry = Arc::new(DelegateRegistry::new());
    let delegate = Arc::new(LoggingDelegate::default());
    registry.register(VIEW, Arc::clone(&delegate) as _);

    let mut surface = SynchronousOutputSurface::new(
        VIEW,
        Arc::clone(&registry),
        Box::new(HeadlessPlatform::new(Some(LOSE_CONTEXT_AFTER))),
    )
    .with_thread_checker(ThreadChecker::bound_to(std::thread::current().id()))
    .with_trace_sink(Box::new(sink));

    surface.bind_to_client(Box::new(ScriptedEngine::new()))?;

    // -- software path -----------------------------------------------------
    let mut canvas = PixmapCanvas::new(CANVAS_SIZE).ok_or("canvas size is empty")?;
    canvas.set_clip(IntRect::new(16, 16, 224, 224));
    canvas.set_matrix(Affine::translate((8.0, 8.0)));
    for frame in 0..SOFTWARE_FRAMES {
        canvas.clear(Rgba8::new(0, 0, 0, 0xff));
        let finished = surface.demand_draw_sw(&mut canvas);
        tracing::info!(frame, finished, "software demand draw");
    }
    canvas.pixmap().save_png("raster_demo.png")?;
    println!("Wrote raster_demo.png");

    // -- hardware path -----------------------------------------------------
    surface.initialize_hw_draw()?;
    let clip = IntRect::new(10, 20, 100, 50);
    for frame in 0..HARDWARE_FRAMES {
        let swapped = surface.demand_draw_hw(CANVAS_SIZE, &Transform3d::IDENTITY, clip);
        tracing::info!(frame, swapped, "hardware demand draw");

        if delegate.contexts_lost.swap(0, Ordering::Relaxed) > 0 {
            // Recovery is the host's call: start over with a fresh context.
            surface.release_hw_draw();
            surface.initialize_hw_draw()?;
        }
    }
    assert!(
        !delegate.continuous.load(Ordering::Relaxed),
        "the engine stops asking for begin-frames once its slide ends"
    );

    drop(surface);

    // -- export Chrome trace -----------------------------------------------
    let path = "raster_demo_trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    tether_debug::chrome::export(recorder.lock().as_bytes(), timebase, &mut writer)?;
    println!("Wrote {path}");

    Ok(())
}
