use std::time::{ Duration, Instant };

use crate::{
    data::prelude::*,
    renderer::{ paint, GridPalette, RenderBackend },
};

use super::layout::{ self, GridGeometry };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTick {
    pub index: u64,
    pub elapsed: Duration,
}

impl FrameTick {
    pub fn new(index: u64, elapsed: Duration) -> Self {
        Self { index, elapsed }
    }
}

/// Frame counter owned by whoever drives the loop.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let elapsed = self.last.map(|last| now - last).unwrap_or_default();
        self.last = Some(now);

        let tick = FrameTick::new(self.index, elapsed);
        self.index += 1;
        tick
    }
}

/// Coalesces any number of changes between frames into at most one layout.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    geometry: GridGeometry,
    viewport: Option<ScreenSize>,
    redraws: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn need_redraw(&self, settings: &Settings, view: &DirtyFlag<ViewTransform>) -> bool {
        view.is_dirty() || settings.is_changed()
    }

    /// Per-frame hook. Redraws when something changed or the viewport was
    /// resized since the last layout; returns whether it did.
    pub fn on_frame<R: RenderBackend + ?Sized>(
        &mut self,
        tick: FrameTick,
        settings: &mut Settings,
        view: &mut DirtyFlag<ViewTransform>,
        viewport: ScreenSize,
        renderer: &mut R,
        palette: &GridPalette,
    ) -> bool {
        let resized = self.viewport != Some(viewport);
        if !resized && !self.need_redraw(settings, view) {
            return false;
        }

        log::trace!("frame {} ({:?}): redraw", tick.index, tick.elapsed);
        self.redraw(settings, view, viewport, renderer, palette);
        true
    }

    /// Lays out from scratch, replaces what the backend shows and consumes
    /// both change flags.
    pub fn redraw<R: RenderBackend + ?Sized>(
        &mut self,
        settings: &mut Settings,
        view: &mut DirtyFlag<ViewTransform>,
        viewport: ScreenSize,
        renderer: &mut R,
        palette: &GridPalette,
    ) -> &GridGeometry {
        let style = settings.style();
        let transform = *view.read();

        self.geometry = layout::layout(&transform, viewport, &style);
        paint(renderer, &self.geometry, &transform, viewport, &style, palette);

        settings.clear_changed();
        view.clean_flag();
        self.viewport = Some(viewport);
        self.redraws += 1;

        log::debug!(
            "grid redraw #{}: {} segments, {} labels, viewport {}x{}",
            self.redraws,
            self.geometry.segments.len(),
            self.geometry.labels.len(),
            viewport.width,
            viewport.height,
        );

        &self.geometry
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}
