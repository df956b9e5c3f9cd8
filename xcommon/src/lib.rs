use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, Rgba32FImage};
use std::path::Path;

pub use image::{DynamicImage, Rgba, RgbaImage};

/// Straight (non premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    pub fn rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Color {
    type Err = anyhow::Error;

    /// Parses `#rrggbb` or `#rrggbbaa`, the leading `#` being optional.
    fn from_str(color: &str) -> Result<Self> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        let is_hex = hex.chars().all(|c| c.is_ascii_hexdigit());
        if !is_hex || (hex.len() != 6 && hex.len() != 8) {
            anyhow::bail!("unsupported color {}", color);
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("unsupported color {}", color))
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?, alpha]))
    }
}

pub struct Scaler {
    img: RgbaImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        Self::new(img)
    }

    pub fn new(img: DynamicImage) -> Result<Self> {
        let img = img.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("expected a non empty image, got {}x{} px", width, height);
        }
        Ok(Self { img })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    /// Renders the source centered on a `size` x `size` canvas filled with
    /// `background`, occupying at most `ratio` of the canvas.
    pub fn icon(&self, size: u32, ratio: f64, background: Color) -> Result<RgbaImage> {
        composite_centered(canvas(size, background), &self.img, ratio)
    }
}

/// Dimensions of `width` x `height` scaled uniformly to fit in `max` x `max`.
///
/// The larger side always becomes exactly `max`, the other one is truncated
/// but never collapses to zero.
pub fn fit_dimensions(width: u32, height: u32, max: u32) -> Result<(u32, u32)> {
    anyhow::ensure!(
        width > 0 && height > 0,
        "invalid image size {}x{}",
        width,
        height
    );
    anyhow::ensure!(max > 0, "invalid target size {}", max);
    let (w, h, m) = (width as u64, height as u64, max as u64);
    let (w, h) = if w >= h {
        (m, h * m / w)
    } else {
        (w * m / h, m)
    };
    Ok((w.max(1) as u32, h.max(1) as u32))
}

/// Resamples with Lanczos3 in premultiplied alpha, so the color of fully
/// transparent pixels never bleeds into visible edges.
pub fn resize_with_aspect(img: &RgbaImage, max: u32) -> Result<RgbaImage> {
    let (width, height) = fit_dimensions(img.width(), img.height(), max)?;
    let premultiplied = Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let a = a.clamp(0.0, 1.0);
        let alpha = to_u8(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
    }))
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Source-over blending of straight alpha pixels.
fn blend(bg: &mut Rgba<u8>, fg: &Rgba<u8>) {
    match fg[3] {
        0 => {}
        255 => *bg = *fg,
        _ => {
            let fa = fg[3] as f32 / 255.0;
            let ba = bg[3] as f32 / 255.0 * (1.0 - fa);
            let alpha = fa + ba;
            let channel = |i: usize| {
                let (f, b) = (fg[i] as f32 / 255.0, bg[i] as f32 / 255.0);
                to_u8((f * fa + b * ba) / alpha)
            };
            let rgb = [channel(0), channel(1), channel(2)];
            // an opaque canvas stays opaque
            let alpha = if bg[3] == 255 { 255 } else { to_u8(alpha) };
            *bg = Rgba([rgb[0], rgb[1], rgb[2], alpha]);
        }
    }
}

pub fn canvas(size: u32, background: Color) -> RgbaImage {
    RgbaImage::from_pixel(size, size, background.rgba())
}

/// Pastes `fg`, scaled to `ratio` of the canvas, in the middle of `canvas`.
///
/// Blending follows the alpha channel of `fg`: fully transparent logo pixels
/// leave the canvas untouched and an opaque canvas stays opaque.
pub fn composite_centered(
    mut canvas: RgbaImage,
    fg: &RgbaImage,
    ratio: f64,
) -> Result<RgbaImage> {
    anyhow::ensure!(
        ratio > 0.0 && ratio <= 1.0,
        "ratio must be in (0, 1], got {}",
        ratio
    );
    let size = canvas.width().min(canvas.height());
    let logo = resize_with_aspect(fg, (size as f64 * ratio) as u32)?;
    let x = (canvas.width() - logo.width()) / 2;
    let y = (canvas.height() - logo.height()) / 2;
    for (dx, dy, pixel) in logo.enumerate_pixels() {
        blend(canvas.get_pixel_mut(x + dx, y + dy), pixel);
    }
    Ok(canvas)
}

/// Clears every pixel outside the ellipse inscribed in the image bounds.
pub fn apply_circle_mask(img: &mut RgbaImage) {
    let rx = img.width() as f64 / 2.0;
    let ry = img.height() as f64 / 2.0;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = (x as f64 + 0.5 - rx) / rx;
        let dy = (y as f64 + 0.5 - ry) / ry;
        if dx * dx + dy * dy > 1.0 {
            pixel[3] = 0;
        }
    }
}

/// Picks the smallest lossless color type for `img`.
pub fn optimize(img: RgbaImage) -> DynamicImage {
    let mut is_grayscale = true;
    let mut is_opaque = true;
    for pixel in img.pixels() {
        if pixel[0] != pixel[1] || pixel[1] != pixel[2] {
            is_grayscale = false;
        }
        if pixel[3] != 255 {
            is_opaque = false;
        }
        if !is_grayscale && !is_opaque {
            break;
        }
    }
    let img = DynamicImage::ImageRgba8(img);
    match (is_grayscale, is_opaque) {
        (true, true) => DynamicImage::ImageLuma8(img.to_luma8()),
        (true, false) => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        (false, true) => DynamicImage::ImageRgb8(img.to_rgb8()),
        (false, false) => img,
    }
}

pub fn write_png<P: AsRef<Path>>(img: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
