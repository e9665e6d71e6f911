use super::dirty_flag::DirtyFlag;
use crate::error::{ GridError, Result };

/// Validated axis style. Only constructible through [`AxisStyle::new`] or the
/// [`Settings`] setters, so layout code can rely on a usable unit size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    axis_unit_size: f32,
    axis_font_size: f32,
    axis_mark_size: f32,
}

impl AxisStyle {
    /// Smallest accepted spacing between major gridlines. Keeps the tick loop
    /// bounded by the viewport size.
    pub const MIN_AXIS_UNIT_SIZE: f32 = 0.1;

    pub fn new(axis_unit_size: f32, axis_font_size: f32, axis_mark_size: f32) -> Result<Self> {
        Ok(Self {
            axis_unit_size: check_unit_size(axis_unit_size)?,
            axis_font_size: check_font_size(axis_font_size)?,
            axis_mark_size: check_mark_size(axis_mark_size)?,
        })
    }

    pub fn axis_unit_size(&self) -> f32 {
        self.axis_unit_size
    }

    pub fn axis_font_size(&self) -> f32 {
        self.axis_font_size
    }

    pub fn axis_mark_size(&self) -> f32 {
        self.axis_mark_size
    }

    /// Band along each axis edge reserved for labels and tick marks.
    pub fn margin(&self) -> f32 {
        self.axis_font_size + self.axis_mark_size
    }
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            axis_unit_size: 100.0,
            axis_font_size: 8.0,
            axis_mark_size: 3.0,
        }
    }
}

fn check_unit_size(value: f32) -> Result<f32> {
    if !value.is_finite() {
        Err(invalid("axis_unit_size", value, "must be finite"))
    } else if value < AxisStyle::MIN_AXIS_UNIT_SIZE {
        Err(invalid("axis_unit_size", value, "must be at least 0.1"))
    } else {
        Ok(value)
    }
}

fn check_font_size(value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid("axis_font_size", value, "must be positive"))
    }
}

fn check_mark_size(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid("axis_mark_size", value, "must not be negative"))
    }
}

fn invalid(name: &'static str, value: f32, reason: &'static str) -> GridError {
    log::warn!("rejected {} = {}: {}", name, value, reason);
    GridError::InvalidSetting { name, value, reason }
}

/// Host-tunable axis settings with change tracking.
///
/// Every accepted setter call marks the settings changed, even when the value
/// is the same; the returned `bool` tells whether it actually differed.
/// Rejected values leave both the value and the change flag untouched.
#[derive(Debug, Clone)]
pub struct Settings {
    style: DirtyFlag<AxisStyle>,
}

impl Settings {
    pub fn new(style: AxisStyle) -> Self {
        Self { style: DirtyFlag::new_dirty(style) }
    }

    pub fn style(&self) -> AxisStyle {
        *self.style.read()
    }

    pub fn axis_unit_size(&self) -> f32 {
        self.style.read().axis_unit_size
    }

    pub fn set_axis_unit_size(&mut self, axis_unit_size: f32) -> Result<bool> {
        let value = check_unit_size(axis_unit_size)?;
        let style = AxisStyle { axis_unit_size: value, ..self.style() };
        Ok(self.style.replace(style))
    }

    pub fn axis_font_size(&self) -> f32 {
        self.style.read().axis_font_size
    }

    pub fn set_axis_font_size(&mut self, axis_font_size: f32) -> Result<bool> {
        let value = check_font_size(axis_font_size)?;
        let style = AxisStyle { axis_font_size: value, ..self.style() };
        Ok(self.style.replace(style))
    }

    pub fn axis_mark_size(&self) -> f32 {
        self.style.read().axis_mark_size
    }

    pub fn set_axis_mark_size(&mut self, axis_mark_size: f32) -> Result<bool> {
        let value = check_mark_size(axis_mark_size)?;
        let style = AxisStyle { axis_mark_size: value, ..self.style() };
        Ok(self.style.replace(style))
    }

    pub fn replace(&mut self, style: AxisStyle) -> bool {
        self.style.replace(style)
    }

    pub fn is_changed(&self) -> bool {
        self.style.is_dirty()
    }

    pub fn clear_changed(&mut self) {
        self.style.clean_flag();
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(AxisStyle::default())
    }
}
