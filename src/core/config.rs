//! Run-time configuration objects + fluent builders.

use crate::core::{
    color::SeriesColor,
    constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH},
    error::ConfigError,
};

/// Immutable labelling and sizing handed to the chart renderers.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub show_grid: bool,
}

impl ChartConfig {
    #[inline]
    pub fn builder(title: impl Into<String>) -> ChartConfigBuilder {
        ChartConfigBuilder::new(title.into())
    }
}

#[derive(Debug)]
pub struct ChartConfigBuilder {
    title: String,
    subtitle: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    width: u32,
    height: u32,
    show_grid: bool,
}

impl ChartConfigBuilder {
    fn new(title: String) -> Self {
        Self {
            title,
            subtitle: None,
            x_label: None,
            y_label: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_grid: true,
        }
    }

    #[inline]
    pub fn subtitle(mut self, s: impl Into<String>) -> Self {
        self.subtitle = Some(s.into());
        self
    }
    #[inline]
    pub fn x_label(mut self, s: impl Into<String>) -> Self {
        self.x_label = Some(s.into());
        self
    }
    #[inline]
    pub fn y_label(mut self, s: impl Into<String>) -> Self {
        self.y_label = Some(s.into());
        self
    }
    #[inline]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
    #[inline]
    pub fn grid(mut self, on: bool) -> Self {
        self.show_grid = on;
        self
    }

    pub fn build(self) -> Result<ChartConfig, ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingField("title"));
        }
        if self.width < MIN_IMAGE_WIDTH || self.height < MIN_IMAGE_HEIGHT {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min_w: MIN_IMAGE_WIDTH,
                min_h: MIN_IMAGE_HEIGHT,
            });
        }
        Ok(ChartConfig {
            title: self.title,
            subtitle: self.subtitle,
            x_label: self.x_label.unwrap_or_default(),
            y_label: self.y_label.unwrap_or_default(),
            width: self.width,
            height: self.height,
            show_grid: self.show_grid,
        })
    }
}

/// Parameters for the terminal preview.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub y_min: f64,
    pub y_max: f64,
    pub x_chars: usize,
    pub y_chars: usize,
    pub color: SeriesColor,
}

impl PreviewConfig {
    #[inline]
    pub fn builder(x_chars: usize, y_chars: usize) -> PreviewConfigBuilder {
        PreviewConfigBuilder::new(x_chars, y_chars)
    }
}

/// Fluent builder with zero allocation until `build`.
#[derive(Debug)]
pub struct PreviewConfigBuilder {
    x_chars: usize,
    y_chars: usize,
    title: Option<String>,
    subtitle: Option<String>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    color: Option<SeriesColor>,
}

impl PreviewConfigBuilder {
    pub(crate) fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            title: None,
            subtitle: None,
            y_min: None,
            y_max: None,
            color: None,
        }
    }

    #[inline]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    pub fn subtitle_opt(mut self, s: Option<&str>) -> Self {
        self.subtitle = s.map(str::to_owned);
        self
    }
    #[inline]
    pub fn y_range(mut self, r: std::ops::RangeInclusive<f64>) -> Self {
        self.y_min = Some(*r.start());
        self.y_max = Some(*r.end());
        self
    }
    #[inline]
    pub fn color(mut self, c: SeriesColor) -> Self {
        self.color = Some(c);
        self
    }

    pub fn build(self) -> Result<PreviewConfig, ConfigError> {
        let y_min = self.y_min.ok_or(ConfigError::MissingField("y_min"))?;
        let y_max = self.y_max.ok_or(ConfigError::MissingField("y_max"))?;
        if y_min >= y_max {
            return Err(ConfigError::InvalidRange {
                low: y_min,
                high: y_max,
            });
        }
        Ok(PreviewConfig {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            y_min,
            y_max,
            x_chars: self.x_chars,
            y_chars: self.y_chars,
            color: self.color.unwrap_or_else(|| SeriesColor::cycle(0)),
        })
    }
}
