use winit::event::*;

use crate::{
    data::prelude::*,
    renderer::{ GridPalette, RenderBackend },
};

mod controller;
pub use controller::{ Buttons, Controller, ControllerConfig, Modifiers, PointerEvent, WheelEvent };

pub mod layout;
pub use layout::{ AxisLabel, GridGeometry };

mod scheduler;
pub use scheduler::{ FrameClock, FrameTick, RedrawScheduler };

/// One pannable, zoomable reference grid and the backend it draws into.
pub struct GridView<R: RenderBackend> {
    settings: Settings,
    view: DirtyFlag<ViewTransform>,
    viewport: ScreenSize,
    ctrl: Controller,
    scheduler: RedrawScheduler,
    pub palette: GridPalette,
    renderer: R,
}

impl<R: RenderBackend> GridView<R> {
    pub fn new(settings: Settings, renderer: R) -> Self {
        Self {
            settings,
            view: DirtyFlag::new(ViewTransform::identity()),
            viewport: ScreenSize::zero(),
            ctrl: Controller::default(),
            scheduler: RedrawScheduler::new(),
            palette: GridPalette::default(),
            renderer,
        }
    }

    pub fn with_controller(mut self, config: ControllerConfig) -> Self {
        self.ctrl = Controller::new(config);
        self
    }

    /// Takes the initial viewport and performs the first layout.
    pub fn init(&mut self, viewport: ScreenSize) {
        log::info!("grid init {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.redraw();
    }

    /// Forces a layout regardless of change flags.
    pub fn redraw(&mut self) -> &GridGeometry {
        self.scheduler.redraw(
            &mut self.settings,
            &mut self.view,
            self.viewport,
            &mut self.renderer,
            &self.palette,
        )
    }

    /// Per-frame hook; returns whether the grid was laid out again.
    pub fn frame(&mut self, tick: FrameTick, viewport: ScreenSize) -> bool {
        self.viewport = viewport;
        self.scheduler.on_frame(
            tick,
            &mut self.settings,
            &mut self.view,
            viewport,
            &mut self.renderer,
            &self.palette,
        )
    }

    pub fn need_redraw(&self) -> bool {
        self.scheduler.need_redraw(&self.settings, &self.view)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn transform(&self) -> &ViewTransform {
        self.view.read()
    }

    /// Replaces the camera; takes effect on the next frame.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        *self.view.write() = transform;
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.scheduler.geometry()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.ctrl.pointer_down(event);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        self.ctrl.pointer_move(event, &mut self.view)
    }

    pub fn wheel(&mut self, event: &WheelEvent) -> bool {
        self.ctrl.wheel(event, &mut self.view)
    }

    pub fn precess(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::Resized(size) = event {
            self.viewport = ScreenSize::new(size.width as _, size.height as _);
        }
        self.ctrl.precess(event, &mut self.view)
    }
}
