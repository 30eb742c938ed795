//! Template loading utilities

use super::{IconTemplate, TemplateLibrary};
use crate::Result;
use crate::utils::image::ImageUtils;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads hero icons from directories. The file stem is the hero name.
pub struct TemplateLoader {
    template_dirs: Vec<PathBuf>,
    supported_extensions: Vec<String>,
}

impl TemplateLoader {
    /// Create new template loader
    pub fn new() -> Self {
        Self {
            template_dirs: Vec::new(),
            supported_extensions: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "bmp".to_string(),
            ],
        }
    }

    /// Add template directory
    pub fn add_template_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.template_dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Load all templates from directories
    pub fn load_all_templates(&self) -> Result<Vec<IconTemplate>> {
        let mut templates = Vec::new();

        for dir in &self.template_dirs {
            if !dir.exists() {
                warn!(dir = %dir.display(), "template directory does not exist, skipping");
                continue;
            }

            let entries = fs::read_dir(dir)
                .with_context(|| format!("Failed to read directory: {:?}", dir))?;

            for entry in entries {
                let entry = entry?;
                let path = entry.path();

                if !self.is_supported(&path) {
                    continue;
                }
                if let Some(stem) = path.file_stem() {
                    let name = stem.to_string_lossy().to_string();
                    templates.push(Self::load_file(name, &path)?);
                }
            }
        }

        debug!(count = templates.len(), "loaded icon templates");
        Ok(templates)
    }

    /// Load every template and validate them as one library
    pub fn load_library(&self) -> Result<TemplateLibrary> {
        let templates = self.load_all_templates()?;
        TemplateLibrary::new(templates).with_context(|| {
            format!("Invalid icon template set in {:?}", self.template_dirs)
        })
    }

    fn load_file(name: String, path: &Path) -> Result<IconTemplate> {
        let image = ImageUtils::load_rgb(path)
            .with_context(|| format!("Failed to load template: {:?}", path))?;

        Ok(IconTemplate::new(name, image))
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.supported_extensions.contains(&ext))
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KillfeedError;
    use image::{Rgb, RgbImage};

    fn write_icon(dir: &Path, file: &str, width: u32, height: u32) -> Result<()> {
        let icon = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 9) as u8, (y * 9) as u8, 40]));
        ImageUtils::save_rgb(&icon, dir.join(file))
    }

    #[test]
    fn test_load_library_from_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_icon(dir.path(), "tracer.png", 12, 8)?;
        write_icon(dir.path(), "Mercy.png", 12, 8)?;
        fs::write(dir.path().join("notes.txt"), "not an icon")?;

        let library = TemplateLoader::new().add_template_dir(dir.path()).load_library()?;
        assert_eq!(library.names(), vec!["Mercy", "tracer"]);
        assert_eq!((library.width(), library.height()), (12, 8));
        Ok(())
    }

    #[test]
    fn test_extensions_match_case_insensitively() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_icon(dir.path(), "reaper.png", 6, 4)?;
        fs::rename(dir.path().join("reaper.png"), dir.path().join("reaper.PNG"))?;

        let templates = TemplateLoader::new().add_template_dir(dir.path()).load_all_templates()?;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "reaper");
        Ok(())
    }

    #[test]
    fn test_mixed_sizes_fail_fast() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_icon(dir.path(), "ana.png", 12, 8)?;
        write_icon(dir.path(), "mei.png", 10, 8)?;

        let err = TemplateLoader::new()
            .add_template_dir(dir.path())
            .load_library()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KillfeedError>(),
            Some(KillfeedError::DimensionMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_empty_library() {
        let err = TemplateLoader::new()
            .add_template_dir("/nonexistent/killfeed/icons")
            .load_library()
            .unwrap_err();
        assert_eq!(err.downcast_ref::<KillfeedError>(), Some(&KillfeedError::EmptyLibrary));
    }
}
