use std::path::{ Path, PathBuf };

use anyhow::Context;
use json::object;

use backend::{
    data::prelude::*,
    grid_system::GridView,
    renderer::RenderBackend,
    GridError,
};

/// Window for tuning the axis settings of a grid.
pub struct GridPanel {
    pub open: bool,
    status: Option<String>,
}

impl GridPanel {
    const SETTINGS_FILE_NAME: &'static str = "grid.settings.json";

    pub fn new() -> Self {
        Self { open: true, status: None }
    }

    fn settings_path() -> anyhow::Result<PathBuf> {
        Ok(std::env::current_exe()?.with_file_name(Self::SETTINGS_FILE_NAME))
    }

    /// Settings stored next to the executable, or the defaults.
    pub fn load_current_settings() -> Settings {
        match Self::settings_path().and_then(|path| load(&path)) {
            Ok(style) => Settings::new(style),
            Err(e) => {
                log::info!("using default grid settings ({:#})", e);
                Settings::default()
            },
        }
    }

    pub fn ui<R: RenderBackend>(&mut self, ctx: &egui::Context, grid: &mut GridView<R>) {
        let status = &mut self.status;

        egui::Window::new("Grid")
            .open(&mut self.open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Reload").clicked() {
                        *status = Some(match Self::settings_path().and_then(|path| load(&path)) {
                            Ok(style) => {
                                grid.settings_mut().replace(style);
                                "Reloaded".to_string()
                            },
                            Err(e) => format!("Unable to load `{}`: {:#}", Self::SETTINGS_FILE_NAME, e),
                        });
                    }
                    if ui.button("Save").clicked() {
                        let style = grid.settings().style();
                        *status = Some(match Self::settings_path().and_then(|path| save(&style, &path)) {
                            Ok(()) => "Saved".to_string(),
                            Err(e) => format!("Unable to save `{}`: {:#}", Self::SETTINGS_FILE_NAME, e),
                        });
                    }
                    if ui.button("Default").clicked() {
                        grid.settings_mut().replace(AxisStyle::default());
                    }
                });

                ui.separator();

                let settings = grid.settings_mut();
                let mut unit = settings.axis_unit_size();
                let mut font = settings.axis_font_size();
                let mut mark = settings.axis_mark_size();

                ui.horizontal(|ui| {
                    if ui.add(egui::Slider::new(&mut unit, AxisStyle::MIN_AXIS_UNIT_SIZE..=500.0)).changed() {
                        report(status, settings.set_axis_unit_size(unit));
                    }
                    ui.label("Unit size");
                });
                ui.horizontal(|ui| {
                    if ui.add(egui::Slider::new(&mut font, 1.0..=48.0)).changed() {
                        report(status, settings.set_axis_font_size(font));
                    }
                    ui.label("Font size");
                });
                ui.horizontal(|ui| {
                    if ui.add(egui::Slider::new(&mut mark, 0.0..=32.0)).changed() {
                        report(status, settings.set_axis_mark_size(mark));
                    }
                    ui.label("Mark size");
                });

                ui.separator();

                let (sx, sy) = grid.transform().scale_factors();
                let offset = grid.transform().translation();
                ui.label(format!("zoom: {:.3} x {:.3}", sx, sy));
                ui.label(format!("pan: {:.1}, {:.1}", offset.x, offset.y));
                if ui.button("Reset view").clicked() {
                    grid.set_transform(ViewTransform::identity());
                }

                if let Some(status) = status.as_ref() {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
    }
}

fn report(status: &mut Option<String>, result: Result<bool, GridError>) {
    if let Err(e) = result {
        *status = Some(e.to_string());
    }
}

pub fn load(path: &Path) -> anyhow::Result<AxisStyle> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&text)
}

pub fn parse(text: &str) -> anyhow::Result<AxisStyle> {
    let data = json::parse(text)?;
    let number = |name: &str| {
        data[name]
            .as_f32()
            .ok_or_else(|| GridError::InvalidSettingsFile(format!("`{}` must be a number", name)))
    };

    Ok(AxisStyle::new(
        number("axis_unit_size")?,
        number("axis_font_size")?,
        number("axis_mark_size")?,
    )?)
}

pub fn save(style: &AxisStyle, path: &Path) -> anyhow::Result<()> {
    let data = object!{
        axis_unit_size: style.axis_unit_size(),
        axis_font_size: style.axis_font_size(),
        axis_mark_size: style.axis_mark_size()
    };

    std::fs::write(path, data.pretty(4))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
