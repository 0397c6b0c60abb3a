use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    gallery::item::ItemKey,
};

/// Decoded texture pixels, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Solid-colour texture, handy for placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        let data = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Warm radial gradient drawn when a distortion image cannot be loaded.
    pub fn radial_fallback(width: u32, height: u32) -> Self {
        const INNER: [f64; 3] = [200.0, 169.0, 110.0];
        const OUTER: [f64; 3] = [10.0, 10.0, 10.0];
        let (cx, cy) = (width as f64 * 0.5, height as f64 * 0.5);
        let radius = cx.max(1.0);
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let d = ((x as f64 + 0.5 - cx).hypot(y as f64 + 0.5 - cy) / radius).min(1.0);
                for c in 0..3 {
                    data.push((INNER[c] + (OUTER[c] - INNER[c]) * d).round() as u8);
                }
                data.push(255);
            }
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }
}

pub fn decode_texture(bytes: &[u8]) -> WeaveResult<Texture> {
    let img = image::load_from_memory(bytes).context("decode texture from memory")?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(WeaveError::asset("texture has zero size"));
    }
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Ok(Texture {
        width,
        height,
        rgba8_premul: Arc::new(data),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

/// Load progress of one item's texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextureState {
    #[default]
    Unrequested,
    Loading,
    Ready(Texture),
    Failed,
}

impl TextureState {
    pub fn texture(&self) -> Option<&Texture> {
        match self {
            Self::Ready(t) => Some(t),
            _ => None,
        }
    }
}

/// Completion of a texture request, delivered by the host after the request returned.
#[derive(Debug)]
pub struct TextureEvent {
    pub key: ItemKey,
    pub result: WeaveResult<Texture>,
}

/// Asynchronous texture source.
pub trait TextureLoader {
    /// Start loading `path` for `key`. Completion shows up in a later [`TextureLoader::drain`].
    fn request(&mut self, key: &ItemKey, path: &str);

    /// Take every completion that has arrived since the last call.
    fn drain(&mut self) -> Vec<TextureEvent>;
}

/// Reads and decodes textures from an asset directory.
///
/// Work happens inside `request`; completions are queued so callers observe them on a later
/// tick, like any other loader.
#[derive(Debug)]
pub struct FsTextureLoader {
    root: PathBuf,
    done: VecDeque<TextureEvent>,
}

impl FsTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            done: VecDeque::new(),
        }
    }

    fn load(&self, path: &str) -> WeaveResult<Texture> {
        let full = self.root.join(path);
        let bytes = std::fs::read(&full)
            .with_context(|| format!("read texture '{}'", full.display()))?;
        decode_texture(&bytes)
    }
}

impl TextureLoader for FsTextureLoader {
    fn request(&mut self, key: &ItemKey, path: &str) {
        let result = self.load(path);
        self.done.push_back(TextureEvent {
            key: key.clone(),
            result,
        });
    }

    fn drain(&mut self) -> Vec<TextureEvent> {
        self.done.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/texture.rs"]
mod tests;
