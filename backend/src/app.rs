use anyhow::Context;
use winit::{
    event::*,
    event_loop::{ ControlFlow, EventLoop },
    window::Window,
};

use crate::{
    data::prelude::ScreenSize,
    grid_system::{ FrameClock, FrameTick },
};

/// Logging defaults to `info`; override with `RUST_LOG`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[allow(unused)]
pub trait System {
    fn start(&mut self, state: &State) {}
    fn finish(&mut self) {}
    fn update(&mut self, state: &State, tick: FrameTick) {}
    fn render(&mut self, state: &State, view: &wgpu::TextureView) {}
    fn precess(&mut self, event: &winit::event::WindowEvent) -> bool { false }
}

pub struct App<T: 'static> {
    pub state: State,
    pub event_loop: EventLoop<T>,
    clock: FrameClock,
}

impl<T> App<T> {
    pub fn new(event_loop: EventLoop<T>, window: Window) -> anyhow::Result<Self> {
        Ok(Self {
            state: State::new(window)?,
            event_loop,
            clock: FrameClock::new(),
        })
    }

    pub fn run<S: System + 'static>(self, mut system: S) -> ! {
        let (mut state, event_loop, mut clock) = (self.state, self.event_loop, self.clock);

        system.start(&state);

        event_loop.run(move |event, _, control_flow| {
            match event {
                Event::WindowEvent { window_id, ref event }
                    if window_id == state.window.id()
                    && !system.precess(event)
                    => {
                    match event {
                        WindowEvent::CloseRequested => {
                            system.finish();
                            *control_flow = ControlFlow::Exit;
                        },
                        WindowEvent::Resized(physical_size) => state.on_resize(*physical_size),
                        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => state.on_resize(**new_inner_size),
                        _ => {}
                    }
                },
                Event::RedrawRequested(window_id) if window_id == state.window.id() => {
                    match state.clean_screen() {
                        Ok((output, view)) => {
                            system.render(&state, &view);
                            output.present();
                        },
                        // reconfigure when the surface is lost
                        Err(wgpu::SurfaceError::Lost) => state.on_resize(state.size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory, exiting");
                            *control_flow = ControlFlow::Exit;
                        },
                        // outdated, timeout: the next frame sorts it out
                        Err(e) => log::warn!("surface error: {:?}", e),
                    }
                }
                Event::MainEventsCleared => {
                    system.update(&state, clock.tick());
                    state.window.request_redraw();
                }
                _ => {}
            }
        })
    }
}

pub struct State {
    pub window: Window,
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl State {
    pub fn new(window: Window) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(&window) };
        let adapter = pollster::block_on(instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            }
        )).context("no graphics adapter compatible with the window surface")?;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
                label: None,
            },
            None,
        )).context("failed to create the graphics device")?;

        let format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .context("surface reports no supported texture format")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
        };
        if size.width * size.height > 0 {
            surface.configure(&device, &config);
        }
        log::info!("surface {}x{} {:?} on {:?}", size.width, size.height, format, adapter.get_info().backend);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn on_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width * new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Surface size in pixels, as the grid viewport.
    pub fn viewport(&self) -> ScreenSize {
        ScreenSize::new(self.config.width as f32, self.config.height as f32)
    }

    pub fn clean_screen(&self) -> Result<(wgpu::SurfaceTexture, wgpu::TextureView), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Clear Encoder"),
        });

        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        Ok((output, view))
    }
}
