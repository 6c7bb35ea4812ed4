// Word cloud output configuration: a plain value handed to the renderer.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use image::Rgb;

use crate::config::DEFAULT_FONT_PATH;
use crate::error::CloudError;

/// How words are colored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColorScheme {
    /// Random hue at fixed saturation and lightness per word
    #[default]
    RandomHue,
    /// Random pick from a fixed list
    Palette(Vec<Rgb<u8>>),
    /// Every word the same color
    Single(Rgb<u8>),
}

/// Canvas and typography settings for one rendered cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudSpec {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub color_scheme: ColorScheme,
    /// Most words drawn; the highest-scoring ones win
    pub max_words: usize,
    pub min_font_size: f32,
    /// Size of the top word; defaults to a quarter of the shorter canvas side
    pub max_font_size: Option<f32>,
    /// Padding kept around every word, in pixels
    pub margin: u32,
    pub font_path: PathBuf,
    /// Seeds color choice so the same input renders the same image
    pub seed: u64,
}

impl Default for WordCloudSpec {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Rgb([255, 255, 255]),
            color_scheme: ColorScheme::default(),
            max_words: 50,
            min_font_size: 10.0,
            max_font_size: None,
            margin: 2,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            seed: 42,
        }
    }
}

impl WordCloudSpec {
    pub fn effective_max_font_size(&self) -> f32 {
        let fallback = self.width.min(self.height) as f32 / 4.0;
        self.max_font_size
            .unwrap_or(fallback)
            .max(self.min_font_size)
    }

    /// Reject settings no canvas can satisfy.
    pub fn validate(&self) -> Result<(), CloudError> {
        if self.width == 0 || self.height == 0 {
            return Err(CloudError::Configuration(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_font_size.is_nan() || self.min_font_size <= 0.0 {
            return Err(CloudError::Configuration(format!(
                "min font size must be positive, got {}",
                self.min_font_size
            )));
        }
        Ok(())
    }
}

/// A color given as a name or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub Rgb<u8>);

impl FromStr for Color {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let rgb = match s.as_str() {
            "white" => [255, 255, 255],
            "black" => [0, 0, 0],
            "gray" | "grey" => [128, 128, 128],
            "red" => [255, 0, 0],
            "green" => [0, 128, 0],
            "blue" => [0, 0, 255],
            "navy" => [0, 0, 128],
            hex if hex.len() == 7
                && hex.starts_with('#')
                && hex[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
            {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 2], 16)
                        .map_err(|_| CloudError::Configuration(format!("bad color '{hex}'")))
                };
                [channel(1)?, channel(3)?, channel(5)?]
            }
            other => {
                return Err(CloudError::Configuration(format!(
                    "unknown color '{other}' (use a name like white or #rrggbb)"
                )))
            }
        };
        Ok(Color(Rgb(rgb)))
    }
}

/// `plot-YYYY-MM-DD_HH-MM-SS.png` for the given moment.
///
/// The caller passes the time in, so every invocation gets its own name.
pub fn default_output_path(now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!("plot-{}.png", now.format("%Y-%m-%d_%H-%M-%S")))
}
