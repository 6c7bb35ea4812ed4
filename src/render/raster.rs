// Raster word cloud: size words by score, spiral them into free space, draw
// them with a TrueType font and save the canvas as an image.
//
// Layout is separated from drawing and takes a text-measuring closure, so
// placement can be reasoned about (and tested) without a font file.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::spec::{ColorScheme, WordCloudSpec};
use super::traits::Renderer;
use crate::error::{CloudError, Result};
use crate::text::{select_top, FrequencyTable, SelectionOrder};

/// Font size shrinks by this many pixels per failed placement attempt.
const FONT_STEP: f32 = 2.0;

/// Spiral parameters: angle increment (radians) and radial growth per radian.
const SPIRAL_STEP: f32 = 0.1;
const SPIRAL_GROWTH: f32 = 2.0;

/// A word with its final position (top-left corner), size and color.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb<u8>,
}

impl PlacedWord {
    fn overlaps(&self, x: i32, y: i32, w: u32, h: u32, margin: i32) -> bool {
        x < self.x + self.width as i32 + margin
            && self.x < x + w as i32 + margin
            && y < self.y + self.height as i32 + margin
            && self.y < y + h as i32 + margin
    }
}

/// Draws clouds with `imageproc` onto an `image` canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterRenderer;

impl Renderer for RasterRenderer {
    fn render_frequencies(
        &self,
        table: &FrequencyTable,
        spec: &WordCloudSpec,
        path: &Path,
    ) -> Result<()> {
        if table.is_empty() {
            return Err(CloudError::Render(
                "need at least one word to plot a word cloud".to_string(),
            ));
        }
        spec.validate()?;
        let font = load_font(&spec.font_path)?;

        let placed = layout(table, spec, |word, size| {
            text_size(PxScale::from(size), &font, word)
        });
        if placed.is_empty() {
            return Err(CloudError::Render(format!(
                "no word fits on a {}x{} canvas",
                spec.width, spec.height
            )));
        }

        let canvas = draw(&placed, spec, &font);
        canvas.save(path).map_err(|e| {
            CloudError::Render(format!("failed to write {}: {e}", path.display()))
        })?;

        info!(
            words = placed.len(),
            path = %path.display(),
            "Word cloud saved"
        );
        Ok(())
    }
}

/// Read and parse a TrueType/OpenType font.
pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path).map_err(|e| {
        CloudError::Configuration(format!("cannot read font {}: {e}", path.display()))
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| {
        CloudError::Configuration(format!("invalid font {}: {e}", path.display()))
    })
}

/// Place the words of `table` on the canvas.
///
/// Every word given is tried; `spec.max_words` is not applied here, since
/// [`Renderer::render_text`](super::traits::Renderer::render_text) already
/// truncates to it. Words are handled largest first. Each starts at a size proportional to its
/// score and walks an Archimedean spiral out from the canvas centre until it
/// finds a spot clear of every placed word; if the spiral leaves the canvas
/// the size shrinks and the walk restarts. Words that don't fit even at
/// `min_font_size` are skipped. `measure(word, size)` returns the rendered
/// `(width, height)` in pixels.
pub fn layout<M>(table: &FrequencyTable, spec: &WordCloudSpec, measure: M) -> Vec<PlacedWord>
where
    M: Fn(&str, f32) -> (u32, u32),
{
    let ranked = select_top(table, table.len(), SelectionOrder::HighestFirst);
    let max_score = ranked.max_score();
    if max_score <= 0.0 {
        return Vec::new();
    }

    let min_size = spec.min_font_size;
    let max_size = spec.effective_max_font_size();
    let margin = spec.margin as i32;
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut placed: Vec<PlacedWord> = Vec::new();

    for entry in ranked.iter() {
        let mut size = min_size + (max_size - min_size) * (entry.score / max_score) as f32;

        let spot = loop {
            let (w, h) = measure(&entry.word, size);
            if let Some((x, y)) = find_spot(&placed, spec, w, h, margin) {
                break Some((x, y, w, h));
            }
            if size <= min_size {
                break None;
            }
            size = (size - FONT_STEP).max(min_size);
        };

        match spot {
            Some((x, y, width, height)) => placed.push(PlacedWord {
                word: entry.word.clone(),
                font_size: size,
                x,
                y,
                width,
                height,
                color: pick_color(&spec.color_scheme, &mut rng),
            }),
            None => debug!(word = %entry.word, "No room left for word, skipping"),
        }
    }

    placed
}

/// Walk the spiral from the centre; first free in-bounds position wins.
fn find_spot(
    placed: &[PlacedWord],
    spec: &WordCloudSpec,
    w: u32,
    h: u32,
    margin: i32,
) -> Option<(i32, i32)> {
    if w > spec.width || h > spec.height {
        return None;
    }

    let cx = spec.width as f32 / 2.0;
    let cy = spec.height as f32 / 2.0;
    let max_radius = (cx * cx + cy * cy).sqrt();

    let mut angle: f32 = 0.0;
    loop {
        let radius = SPIRAL_GROWTH * angle;
        if radius > max_radius {
            return None;
        }

        let x = (cx + radius * angle.cos() - w as f32 / 2.0).round() as i32;
        let y = (cy + radius * angle.sin() - h as f32 / 2.0).round() as i32;

        let in_bounds = x >= 0
            && y >= 0
            && x + w as i32 <= spec.width as i32
            && y + h as i32 <= spec.height as i32;

        if in_bounds && !placed.iter().any(|p| p.overlaps(x, y, w, h, margin)) {
            return Some((x, y));
        }

        angle += SPIRAL_STEP;
    }
}

fn pick_color(scheme: &ColorScheme, rng: &mut StdRng) -> Rgb<u8> {
    match scheme {
        ColorScheme::RandomHue => hsl_to_rgb(rng.random_range(0.0..360.0), 0.8, 0.5),
        ColorScheme::Palette(colors) if !colors.is_empty() => {
            colors[rng.random_range(0..colors.len())]
        }
        ColorScheme::Palette(_) => Rgb([0, 0, 0]),
        ColorScheme::Single(color) => *color,
    }
}

/// HSL (hue in degrees, saturation and lightness in 0..=1) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb<u8> {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_byte(r), to_byte(g), to_byte(b)])
}

fn draw(placed: &[PlacedWord], spec: &WordCloudSpec, font: &FontVec) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(spec.width, spec.height, spec.background);
    for word in placed {
        draw_text_mut(
            &mut canvas,
            word.color,
            word.x,
            word.y,
            PxScale::from(word.font_size),
            font,
            &word.word,
        );
    }
    canvas
}
