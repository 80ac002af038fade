//! Background texture loading with an all-or-nothing barrier.
//!
//! A body renders only once every texture its variant names has decoded.
//! Decoding happens on a worker thread; the render loop polls without
//! blocking.

use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, TryRecvError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("failed to decode texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to start texture loader: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("texture loader exited without a result")]
    Disconnected,
}

/// RGBA8 pixels keyed by the path the layer spec used.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub path: &'static str,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode one image from disk into tightly packed RGBA8.
pub fn decode_texture(
    asset_dir: &Path,
    path: &'static str,
) -> Result<DecodedTexture, TextureLoadError> {
    let full = asset_dir.join(path);
    let image = image::open(&full)
        .map_err(|source| TextureLoadError::Decode {
            path: full.clone(),
            source,
        })?
        .to_rgba8();
    Ok(DecodedTexture {
        path,
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}

type LoadResult = Result<Vec<DecodedTexture>, TextureLoadError>;

/// Pending load of a full texture set.
pub struct TextureBarrier {
    receiver: Receiver<LoadResult>,
}

impl TextureBarrier {
    /// Start decoding `paths` (relative to `asset_dir`) on a worker thread.
    pub fn spawn(asset_dir: &Path, paths: Vec<&'static str>) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let asset_dir = asset_dir.to_path_buf();

        let spawned = std::thread::Builder::new()
            .name("texture-loader".into())
            .spawn({
                let sender = sender.clone();
                move || {
                    let result = paths
                        .into_iter()
                        .map(|path| decode_texture(&asset_dir, path))
                        .collect::<LoadResult>();
                    // Receiver gone means the body was unmounted.
                    let _ = sender.send(result);
                }
            });

        if let Err(e) = spawned {
            let _ = sender.send(Err(TextureLoadError::Spawn(e)));
        }

        Self { receiver }
    }

    /// `None` while loading; the full set or the first failure once done.
    /// Yields a result exactly once.
    pub fn poll(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TextureLoadError::Disconnected)),
        }
    }

    /// Block until the set resolves.
    #[cfg(test)]
    fn wait(&self) -> LoadResult {
        self.receiver
            .recv()
            .unwrap_or(Err(TextureLoadError::Disconnected))
    }
}
