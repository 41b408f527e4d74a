// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stand-in compositing engine.
//!
//! It owns a handful of solid layers and one that slides a little on every
//! begin-frame, so consecutive software draws produce visibly different
//! frames. The slide is a short animation: the engine asks for begin-frames
//! on its first redraw and stops asking once the layer has arrived.

use tether_core::canvas::Rgba8;
use tether_core::geometry::IntRect;
use tether_core::latency::LatencyInfo;
use tether_core::time::HostTime;
use tether_core::transform::Transform3d;
use tether_surface::{FrameOutput, OutputSurfaceClient, SoftwareFrameData};

const BACKGROUND: Rgba8 = Rgba8::new(0x1e, 0x1e, 0x2e, 0xff);
const PANEL: Rgba8 = Rgba8::new(0x31, 0x32, 0x44, 0xff);
const ACCENT: Rgba8 = Rgba8::new(0xf3, 0x8b, 0xa8, 0xff);
const SLIDE_STEP: f64 = 12.0;
const SLIDE_FRAMES: u32 = 3;

struct Layer {
    rect: kurbo::Rect,
    color: Rgba8,
}

pub(crate) struct ScriptedEngine {
    layers: Vec<Layer>,
    offset: f64,
    slides: u32,
    animating: bool,
    frame: u64,
    transform: Transform3d,
}

impl ScriptedEngine {
    pub(crate) fn new() -> Self {
        Self {
            layers: vec![
                Layer {
                    rect: kurbo::Rect::new(0.0, 0.0, 256.0, 256.0),
                    color: BACKGROUND,
                },
                Layer {
                    rect: kurbo::Rect::new(24.0, 24.0, 232.0, 120.0),
                    color: PANEL,
                },
            ],
            offset: 0.0,
            slides: 0,
            animating: false,
            frame: 0,
            transform: Transform3d::IDENTITY,
        }
    }

    fn accent(&self) -> Layer {
        Layer {
            rect: kurbo::Rect::new(32.0, 140.0, 96.0, 204.0) + kurbo::Vec2::new(self.offset, 0.0),
            color: ACCENT,
        }
    }

    fn raster(&mut self, damage: IntRect, output: &mut FrameOutput<'_>) {
        let accent = self.accent();
        let Some(device) = output.software_device() else {
            return;
        };
        let canvas = device.begin_paint(damage);
        for layer in self.layers.iter().chain(std::iter::once(&accent)) {
            canvas.fill_rect(layer.rect, layer.color);
        }
        self.frame += 1;
        device.end_paint(&SoftwareFrameData {
            id: self.frame,
            size: damage.size(),
            damage_rect: damage,
        });
    }
}

impl OutputSurfaceClient for ScriptedEngine {
    fn set_external_draw_constraints(&mut self, transform: &Transform3d, clip: IntRect) {
        tracing::debug!(?clip, translation = ?transform.translation(), "engine constraints");
        self.transform = *transform;
    }

    fn set_needs_redraw_rect(&mut self, damage: IntRect, output: &mut FrameOutput<'_>) {
        if !self.animating && self.slides < SLIDE_FRAMES {
            self.animating = true;
            output.set_needs_begin_frame(true);
        }
        if output.forced_draw_to_software_device() {
            self.raster(damage, output);
        } else {
            // GL draws against `self.transform` would be issued here.
            tracing::trace!(translation = ?self.transform.translation(), "hardware draw");
            self.frame += 1;
            output.swap_buffers(&LatencyInfo::new(self.frame));
        }
    }

    fn begin_frame(&mut self, frame_time: HostTime, output: &mut FrameOutput<'_>) {
        self.offset += SLIDE_STEP;
        self.slides += 1;
        tracing::debug!(?frame_time, offset = self.offset, "engine begin-frame");
        if self.slides >= SLIDE_FRAMES {
            self.animating = false;
            output.set_needs_begin_frame(false);
        }
    }
}
