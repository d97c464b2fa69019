use std::path::Path;

use anyhow::Context;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::uniforms::{names, UniformBridge, MAX_TEXTURE_UNITS};

pub const DEFAULT_SKY_PATH: &str = "space_texture_3.jpeg";

/// Bind point of the sky texture in the default shading program
pub const SKY_TEXTURE_UNIT: u32 = 2;

/// Texture bind point N, seen by the shader as `@group(1) @binding(N)` and
/// announced through the `texture<N>` int uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnit(u32);

impl TextureUnit {
    /// Unit the sky texture is bound at
    pub const SKY: Self = Self(SKY_TEXTURE_UNIT);

    pub fn new(index: u32) -> Option<Self> {
        ((index as usize) < MAX_TEXTURE_UNITS).then_some(Self(index))
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn uniform_name(&self) -> String {
        format!("{}{}", names::TEXTURE_PREFIX, self.0)
    }

    pub fn export_to_uniforms(&self, bridge: &mut dyn UniformBridge) {
        bridge.set_int(&self.uniform_name(), self.0 as i32);
    }
}

/// Decode an image file into RGBA8
pub fn decode_rgba(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode texture {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Decode `path`, or fall back to a single black texel when the file is
/// missing or unreadable.
pub fn load_or_blank(path: &Path) -> RgbaImage {
    match decode_rgba(path) {
        Ok(image) => {
            log::info!(
                "Texture loaded: {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            image
        }
        Err(e) => {
            log::error!("texture could not be loaded: {e:#}");
            blank_image()
        }
    }
}

pub fn blank_image() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
}

/// Levels in a full mip chain down to 1x1
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// `image` followed by successive half-size reductions, each side rounded
/// down and never below one texel.
pub fn mip_chain(image: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(image.width(), image.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(image.clone());

    for level in 1..levels {
        let previous = &chain[level - 1];
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let next = imageops::resize(previous, width, height, FilterType::Triangle);
        chain.push(next);
    }

    chain
}

/// GPU copy of a decoded image and its mip chain, bound at a fixed texture
/// unit
pub struct SkyTexture {
    unit: TextureUnit,
    view: wgpu::TextureView,
    _texture: wgpu::Texture,
}

impl SkyTexture {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        unit: TextureUnit,
    ) -> Self {
        let chain = mip_chain(image);
        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Sky Texture"),
            size,
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width()),
                    rows_per_image: Some(mip.height()),
                },
                wgpu::Extent3d {
                    width: mip.width(),
                    height: mip.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            unit,
            view,
            _texture: texture,
        }
    }

    pub fn unit(&self) -> TextureUnit {
        self.unit
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn export_to_uniforms(&self, bridge: &mut dyn UniformBridge) {
        self.unit.export_to_uniforms(bridge);
    }
}

/// Repeat-wrapped trilinear sampler shared by every texture unit
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Texture Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
