//! Texture loading for sprite entities.
//!
//! Textures are looked up by key in the asset directory (`<key>.png`, `.jpg`,
//! `.jpeg` or `.webp`). A texture that cannot be loaded is replaced by a
//! placeholder so a missing asset never stalls the animation. Images larger than
//! the device's texture limit are downscaled before upload.

use crate::error::BackdropError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Finds and decodes the image for `key`.
pub fn load_image(dir: &Path, key: &str) -> Result<image::RgbaImage, BackdropError> {
    let path = EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{key}.{ext}")))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| BackdropError::AssetLoad {
            path: dir.join(key),
            reason: "no png, jpg or webp file with this name".to_string(),
        })?;

    image::open(&path)
        .map(|img| img.to_rgba8())
        .map_err(|err| BackdropError::AssetLoad {
            path,
            reason: err.to_string(),
        })
}

/// Whether an image of `dimensions` fits within `max` texels on both edges.
pub fn fits_limit(dimensions: (u32, u32), max: u32) -> bool {
    dimensions.0 <= max && dimensions.1 <= max
}

/// Shrinks `img` so its longer edge is `max`, keeping the aspect ratio.
pub fn fit_to_limit(img: image::RgbaImage, max: u32) -> image::RgbaImage {
    let (width, height) = img.dimensions();
    if max == 0 || fits_limit((width, height), max) {
        return img;
    }
    let scale = max as f32 / width.max(height) as f32;
    let scaled = |edge: u32| ((edge as f32 * scale).round() as u32).clamp(1, max);
    image::imageops::resize(
        &img,
        scaled(width),
        scaled(height),
        image::imageops::FilterType::Triangle,
    )
}

/// Dim cyan checkerboard shown in place of a missing texture.
pub fn placeholder_image() -> image::RgbaImage {
    let mut fallback = image::RgbaImage::new(64, 64);
    for (x, y, pixel) in fallback.enumerate_pixels_mut() {
        *pixel = if ((x / 8) + (y / 8)) % 2 == 0 {
            image::Rgba([0, 60, 70, 255])
        } else {
            image::Rgba([0, 30, 40, 255])
        };
    }
    fallback
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &image::RgbaImage,
    label: &str,
) -> wgpu::Texture {
    let dimensions = img.dimensions();
    let texture_size = wgpu::Extent3d {
        width: dimensions.0,
        height: dimensions.1,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * dimensions.0),
            rows_per_image: Some(dimensions.1),
        },
        texture_size,
    );

    texture
}

/// Layout of the texture bind group (group 1): texture then sampler.
pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("sprite_texture_bind_group_layout"),
    })
}

/// Loaded textures keyed by asset key, each with its bind group.
pub struct TextureCache {
    dir: PathBuf,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// 1x1 white, bound for untextured sprites.
    blank: wgpu::BindGroup,
    entries: HashMap<String, wgpu::BindGroup>,
    /// Largest texture edge the device accepts.
    max_dimension: u32,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, dir: PathBuf) -> Self {
        let layout = create_bind_group_layout(device);
        // Repeat horizontally so sphere textures wrap as they scroll
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let texture = upload(device, queue, &white, "Blank Texture");
        let blank = Self::bind(device, &layout, &sampler, &texture, "blank");

        Self {
            dir,
            layout,
            sampler,
            blank,
            entries: HashMap::new(),
            max_dimension: device.limits().max_texture_dimension_2d,
        }
    }

    fn bind(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &wgpu::Texture,
        key: &str,
    ) -> wgpu::BindGroup {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some(key),
        })
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Loads `key` on first use. Failures are logged once and cached as the placeholder.
    pub fn ensure(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, key: &str) {
        if self.entries.contains_key(key) {
            return;
        }
        let img = match load_image(&self.dir, key) {
            Ok(img) if !fits_limit(img.dimensions(), self.max_dimension) => {
                tracing::warn!(
                    key,
                    width = img.width(),
                    height = img.height(),
                    max = self.max_dimension,
                    "texture exceeds device limit, downscaling"
                );
                fit_to_limit(img, self.max_dimension)
            }
            Ok(img) => {
                tracing::debug!(key, width = img.width(), height = img.height(), "texture loaded");
                img
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "texture unavailable, using placeholder");
                placeholder_image()
            }
        };
        let texture = upload(device, queue, &img, key);
        let bind_group = Self::bind(device, &self.layout, &self.sampler, &texture, key);
        self.entries.insert(key.to_string(), bind_group);
    }

    /// Bind group for `key`, or the blank texture for `None` and unknown keys.
    pub fn bind_group(&self, key: Option<&str>) -> &wgpu::BindGroup {
        key.and_then(|key| self.entries.get(key))
            .unwrap_or(&self.blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_texture_is_asset_error() {
        let err = load_image(Path::new("/nonexistent"), "earth").unwrap_err();
        match err {
            BackdropError::AssetLoad { path, .. } => assert!(path.ends_with("earth")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_texture_is_asset_error() {
        let dir = std::env::temp_dir().join("cyberfolio-texture-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.png"), b"not a png").unwrap();
        let err = load_image(&dir, "broken").unwrap_err();
        assert!(matches!(err, BackdropError::AssetLoad { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fits_limit() {
        assert!(fits_limit((8192, 4096), 8192));
        assert!(!fits_limit((8193, 10), 8192));
        assert!(!fits_limit((10, 16384), 8192));
    }

    #[test]
    fn test_oversized_image_is_downscaled_to_limit() {
        let img = image::RgbaImage::from_pixel(20, 10, image::Rgba([0, 255, 170, 255]));
        let fitted = fit_to_limit(img, 8);
        assert_eq!(fitted.dimensions(), (8, 4));

        let small = image::RgbaImage::new(6, 3);
        assert_eq!(fit_to_limit(small, 8).dimensions(), (6, 3));
    }

    #[test]
    fn test_placeholder_is_checkered() {
        let img = placeholder_image();
        assert_eq!(img.dimensions(), (64, 64));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(8, 0));
    }
}
