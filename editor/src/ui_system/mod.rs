use backend::{
    app::{
        System,
        App,
        State,
    },
    grid_system::{ FrameTick, GridView },
};

use egui_wgpu::renderer::{
    RenderPass,
    ScreenDescriptor
};

mod grid_panel;
mod painter;

use grid_panel::GridPanel;
use painter::PainterBackend;

pub struct UiSystem {
    state: egui_winit::State,
    ctx: egui::Context,
    rpass: egui_wgpu::renderer::RenderPass,

    grid_panel: GridPanel,

    output_data: Option<(egui::TexturesDelta, Vec<egui::ClippedPrimitive>)>,

    grid: Option<GridView<PainterBackend>>,
}

impl UiSystem {
    pub fn new<T>(app: &App<T>) -> Self {
        Self {
            state: egui_winit::State::new(&app.event_loop),
            ctx: egui::Context::default(),
            rpass: RenderPass::new(
                &app.state.device,
                app.state.config.format,
                1
            ),
            grid_panel: GridPanel::new(),
            output_data: None,
            grid: None,
        }
    }
}

impl System for UiSystem {
    fn start(&mut self, _state: &State) {
        // text is measured through egui, so the first layout waits for the first frame
        self.grid = Some(GridView::new(
            GridPanel::load_current_settings(),
            PainterBackend::new(self.ctx.clone()),
        ));
    }

    fn finish(&mut self) {
        self.grid = None;
    }

    fn precess(&mut self, event: &winit::event::WindowEvent) -> bool {
        use winit::event::*;

        if let Some(grid) = &mut self.grid {
            if self.state.on_event(&self.ctx, event) {
                // a release over a window still has to end the grid's drag
                if let WindowEvent::MouseInput { state: ElementState::Released, .. } = event {
                    grid.precess(event);
                }
                true
            } else if grid.precess(event) {
                true
            } else {
                match event {
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput {
                            virtual_keycode: Some(VirtualKeyCode::F12),
                            state: ElementState::Pressed,
                            ..
                        },
                        ..
                    } => {
                        self.grid_panel.open = !self.grid_panel.open;
                        true
                    },
                    _ => false,
                }
            }
        } else {
            false
        }
    }

    fn update(&mut self, state: &State, tick: FrameTick) {
        if let Some(grid) = &mut self.grid {
            let viewport = state.viewport();
            let grid_panel = &mut self.grid_panel;

            let raw_input = self.state.take_egui_input(&state.window);
            let full_output = self.ctx.run(raw_input, |ctx| {
                grid.renderer_mut().pixels_per_point = ctx.pixels_per_point();
                if tick.index == 0 {
                    grid.init(viewport);
                } else {
                    grid.frame(tick, viewport);
                }

                ctx.layer_painter(egui::LayerId::background())
                    .extend(grid.renderer().shapes());
                grid_panel.ui(ctx, grid);
            });

            let paint_jobs = self.ctx.tessellate(full_output.shapes);

            self.output_data = Some((full_output.textures_delta, paint_jobs));
            self.state.handle_platform_output(&state.window, &self.ctx, full_output.platform_output);
        }
    }

    fn render(&mut self, state: &State, view: &wgpu::TextureView) {
        if let Some((textures_delta, paint_jobs)) = self.output_data.take() {
            let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

            let screen_descriptor = ScreenDescriptor {
                size_in_pixels: [state.config.width, state.config.height],
                pixels_per_point: self.state.pixels_per_point(),
            };
            for (id, ref image_delta) in textures_delta.set {
                self.rpass.update_texture(&state.device, &state.queue, id, image_delta);
            }
            self.rpass.update_buffers(&state.device, &state.queue, &paint_jobs, &screen_descriptor);

            self.rpass.execute(
                &mut encoder,
                view,
                &paint_jobs,
                &screen_descriptor,
                None,
            );
            state.queue.submit(std::iter::once(encoder.finish()));

            for id in &textures_delta.free {
                self.rpass.free_texture(id);
            }
        }
    }
}
