//! Software raster canvas
//!
//! Rasterizes [`DrawCommand`]s into an `RgbaImage` with source-over alpha
//! blending. Pixels are sampled at their centers.

use std::path::Path;

use image::{Rgba as Pixel, RgbaImage};

use crate::assets::ImageData;
use crate::foundation::math::{Rgba, Vec2};
use crate::render::{DrawCommand, Paint, RenderError, TextLabel};

/// Two-layer drawing surface: a static background and a per-frame overlay
pub struct Canvas {
    width: u32,
    height: u32,
    clear_color: Rgba,
    background: Option<RgbaImage>,
    surface: RgbaImage,
    labels: Vec<TextLabel>,
}

impl Canvas {
    /// Create a blank canvas
    pub fn new(width: u32, height: u32, clear_color: Rgba) -> Self {
        let surface = RgbaImage::from_pixel(width, height, to_pixel(clear_color));
        Self {
            width,
            height,
            clear_color,
            background: None,
            surface,
            labels: Vec::new(),
        }
    }

    /// Load and scale a background image from disk
    pub fn load_background(&mut self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let image = ImageData::from_file(path)?.scaled_to(self.width, self.height)?;
        self.set_background(image);
        Ok(())
    }

    /// Install a background layer (scaled to the canvas if needed)
    pub fn set_background(&mut self, image: RgbaImage) {
        let image = if image.dimensions() == (self.width, self.height) {
            image
        } else {
            image::imageops::resize(&image, self.width, self.height, image::imageops::FilterType::Triangle)
        };
        self.background = Some(image);
        self.clear();
    }

    /// Whether a background layer is installed
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Execute draw commands in order
    pub fn paint(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear => self.clear(),
                DrawCommand::FillCircle { center, radius, paint } => {
                    self.fill_circle(*center, *radius, paint);
                }
                DrawCommand::FillRect { origin, size, paint } => {
                    self.fill_rect(*origin, *size, paint);
                }
                DrawCommand::Text(label) => self.labels.push(label.clone()),
            }
        }
    }

    /// Reset the overlay to the background (or the clear color)
    pub fn clear(&mut self) {
        match &self.background {
            Some(background) => self.surface.clone_from(background),
            None => {
                let pixel = to_pixel(self.clear_color);
                for p in self.surface.pixels_mut() {
                    *p = pixel;
                }
            }
        }
        self.labels.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let radius_sq = radius * radius;
        let (x0, x1) = self.span(center.x - radius, center.x + radius, self.width);
        let (y0, y1) = self.span(center.y - radius, center.y + radius, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if (sample - center).norm_squared() <= radius_sq {
                    self.blend(x, y, paint.color_at(sample));
                }
            }
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        let (x0, x1) = self.span(origin.x, origin.x + size.x, self.width);
        let (y0, y1) = self.span(origin.y, origin.y + size.y, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                self.blend(x, y, paint.color_at(sample));
            }
        }
    }

    /// Pixel index range covering `[lo, hi)` clipped to `0..limit`
    fn span(&self, lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let clip = |v: f32| v.clamp(0.0, limit as f32) as u32;
        (clip(lo.floor()), clip(hi.ceil()))
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let src_a = color.a.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.surface.get_pixel_mut(x, y);
        let dst_a = f32::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let mix = |s: u8, d: u8| {
            ((f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a).round() as u8
        };
        *dst = Pixel([
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Color of the surface at a pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let p = self.surface.get_pixel(x, y);
        Some(Rgba::new(p[0], p[1], p[2], f32::from(p[3]) / 255.0))
    }

    /// Text labels queued since the last clear
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// The rasterized surface
    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Write the surface as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.surface.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} snapshot to {:?}", self.width, self.height, path);
        Ok(())
    }
}

fn to_pixel(color: Rgba) -> Pixel<u8> {
    Pixel([color.r, color.g, color.b, color.alpha_u8()])
}
