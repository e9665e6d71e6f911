use backend::app::App;
use winit::{
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod ui_system;

fn main() -> anyhow::Result<()> {
    backend::app::init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Grid")
        .with_inner_size(winit::dpi::PhysicalSize {
            width: 1024,
            height: 768,
        })
        .build(&event_loop)?;
    let app = App::new(event_loop, window)?;
    let system = ui_system::UiSystem::new(&app);

    app.run(system)
}
