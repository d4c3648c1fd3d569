use image::{imageops::FilterType, DynamicImage};
use std::fs;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{Error, Result};

/// Decoded grid thumbnail, ready to hand to an iced image handle
#[derive(Clone)]
pub struct Thumbnail {
    pub image_id: i64,
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

// Pixel data is left out so messages stay readable in logs
impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("image_id", &self.image_id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Get the thumbnail cache directory
/// Returns ~/.cache/photo-gallery/thumbnails on Linux
pub fn get_thumbnail_cache_dir() -> Result<PathBuf> {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .ok_or_else(|| Error::Io("could not determine cache directory".to_string()))?;

    path.push("photo-gallery");
    path.push("thumbnails");

    fs::create_dir_all(&path)?;

    Ok(path)
}

/// Get the cached thumbnail path for an image ID, source file and size.
/// The source path is part of the key so an id never serves another file's thumbnail.
pub fn get_thumbnail_path(cache_dir: &Path, image_id: i64, source: &Path, size: u32) -> PathBuf {
    let source_hash = xxh3_64(source.as_os_str().to_string_lossy().as_bytes());
    cache_dir.join(format!("{}-{:016x}-{}.png", image_id, source_hash, size))
}

/// Load (or generate) the thumbnail for an image file
pub async fn load_thumbnail(
    source: PathBuf,
    image_id: i64,
    size: u32,
    cache_dir: Option<PathBuf>,
) -> Result<Thumbnail> {
    // Spawn blocking task for CPU-bound decoding
    tokio::task::spawn_blocking(move || {
        load_thumbnail_blocking(&source, image_id, size, cache_dir.as_deref())
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))?
}

/// Blocking version of thumbnail loading
fn load_thumbnail_blocking(
    source: &Path,
    image_id: i64,
    size: u32,
    cache_dir: Option<&Path>,
) -> Result<Thumbnail> {
    if !source.exists() {
        return Err(Error::Io(format!("image file does not exist: {}", source.display())));
    }

    let cached_path = cache_dir.map(|dir| get_thumbnail_path(dir, image_id, source, size));

    // Reuse the cached thumbnail unless the source changed after it was written
    if let Some(cached) = cached_path.as_deref().filter(|p| is_fresh(p, source)) {
        match image::open(cached) {
            Ok(img) => return Ok(to_thumbnail(image_id, img)),
            Err(e) => tracing::warn!("Ignoring unreadable cached thumbnail {}: {}", cached.display(), e),
        }
    }

    let img = image::open(source)?;
    let thumbnail = img.resize(size, size, FilterType::Lanczos3);

    if let Some(cached) = cached_path {
        match thumbnail.save(&cached) {
            Ok(()) => tracing::debug!("📸 Generated thumbnail: {}", cached.display()),
            Err(e) => tracing::warn!("Could not cache thumbnail {}: {}", cached.display(), e),
        }
    }

    Ok(to_thumbnail(image_id, thumbnail))
}

/// Whether `cached` exists and is at least as new as `source`
fn is_fresh(cached: &Path, source: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();

    match (modified(cached), modified(source)) {
        (Some(cached_time), Some(source_time)) => cached_time >= source_time,
        _ => false,
    }
}

fn to_thumbnail(image_id: i64, img: DynamicImage) -> Thumbnail {
    let rgba = img.to_rgba8();
    Thumbnail {
        image_id,
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Fresh scratch directory under the system temp dir
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("photo-gallery-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("source.png");
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_generates_and_caches_thumbnail() {
        let dir = scratch_dir("thumb-gen");
        let source = write_test_image(&dir, 400, 200);
        let cache = dir.join("cache");
        fs::create_dir_all(&cache).unwrap();

        let thumbnail = load_thumbnail_blocking(&source, 5, 100, Some(&cache)).unwrap();

        assert_eq!(thumbnail.image_id, 5);
        assert_eq!((thumbnail.width, thumbnail.height), (100, 50));
        assert_eq!(thumbnail.pixels.len(), 100 * 50 * 4);
        assert!(get_thumbnail_path(&cache, 5, &source, 100).exists());

        // Second load is served from the cache with identical dimensions
        let cached = load_thumbnail_blocking(&source, 5, 100, Some(&cache)).unwrap();
        assert_eq!((cached.width, cached.height), (100, 50));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_without_cache_dir() {
        let dir = scratch_dir("thumb-nocache");
        let source = write_test_image(&dir, 64, 64);

        let thumbnail = load_thumbnail_blocking(&source, 1, 32, None).unwrap();

        assert_eq!((thumbnail.width, thumbnail.height), (32, 32));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_undecodable_file() {
        let dir = scratch_dir("thumb-bad");
        let source = dir.join("broken.jpg");
        fs::write(&source, b"definitely not a jpeg").unwrap();

        let result = load_thumbnail_blocking(&source, 1, 32, None);

        assert!(matches!(result, Err(Error::Decode(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_same_id_different_source_not_shared() {
        let dir = scratch_dir("thumb-swap");
        let cache = dir.join("cache");
        fs::create_dir_all(&cache).unwrap();

        let red = dir.join("red.png");
        RgbImage::from_pixel(16, 16, Rgb([255, 0, 0])).save(&red).unwrap();
        let blue = dir.join("blue.png");
        RgbImage::from_pixel(16, 16, Rgb([0, 0, 255])).save(&blue).unwrap();

        let first = load_thumbnail_blocking(&red, 1, 8, Some(&cache)).unwrap();
        let second = load_thumbnail_blocking(&blue, 1, 8, Some(&cache)).unwrap();

        assert_eq!(&first.pixels[..4], &[255, 0, 0, 255]);
        assert_eq!(&second.pixels[..4], &[0, 0, 255, 255]);
        assert_ne!(
            get_thumbnail_path(&cache, 1, &red, 8),
            get_thumbnail_path(&cache, 1, &blue, 8)
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = std::env::temp_dir().join("photo-gallery-missing-image.jpg");

        let result = load_thumbnail(source, 1, 32, None).await;

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_debug_omits_pixels() {
        let thumbnail = Thumbnail { image_id: 3, width: 1, height: 1, pixels: vec![1, 2, 3, 4] };
        let debug = format!("{:?}", thumbnail);
        assert!(debug.contains("image_id: 3"));
        assert!(!debug.contains("pixels"));
    }
}
