use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::config::Configuration;
use crate::error::Error;
use crate::events::ImageHandle;

/// Resolves the banner list: the explicit `images` entries when present,
/// otherwise every image under `image-library-path` in path order.
#[instrument(skip(cfg), fields(root = %cfg.image_library_path.display()))]
pub fn discover_images(cfg: &Configuration) -> Result<Vec<ImageHandle>, Error> {
    if !cfg.images.is_empty() {
        debug!(count = cfg.images.len(), "using configured image list");
        return Ok(cfg.images.iter().cloned().map(ImageHandle::from).collect());
    }

    let root = &cfg.image_library_path;
    if !root.is_dir() {
        return Err(Error::BadDir(root.clone()));
    }

    let mut found = Vec::<PathBuf>::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            found.push(entry.into_path());
        }
    }
    if found.is_empty() {
        return Err(Error::EmptyScan(root.clone()));
    }
    found.sort();
    info!(discovered = found.len(), "image scan complete");
    Ok(found.into_iter().map(ImageHandle::from).collect())
}

#[inline]
fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(OsStr::to_str)
            .map(|s| s.to_ascii_lowercase()),
        Some(ref e) if ["jpg", "jpeg", "png", "webp", "gif"].contains(&e.as_str())
    )
}
