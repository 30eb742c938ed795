//! Icon templates and the library that holds them

pub mod loader;
pub mod matcher;

pub use loader::TemplateLoader;
pub use matcher::TemplateMatcher;

use crate::Result;
use crate::error::KillfeedError;
use image::RgbImage;

/// Reference image of one hero icon
#[derive(Debug, Clone)]
pub struct IconTemplate {
    pub name: String,
    pub image: RgbImage,
}

impl IconTemplate {
    pub fn new(name: impl Into<String>, image: RgbImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Read-only set of icon templates sharing one size.
///
/// Templates are kept sorted by name so every strategy visits them in the
/// same order.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: Vec<IconTemplate>,
    width: u32,
    height: u32,
}

impl TemplateLibrary {
    /// Build a library, failing if it is empty or the sizes disagree.
    pub fn new(mut templates: Vec<IconTemplate>) -> Result<Self> {
        let Some(first) = templates.first() else {
            return Err(KillfeedError::EmptyLibrary.into());
        };
        let (width, height) = first.dimensions();

        if let Some(odd) = templates.iter().find(|t| t.dimensions() != (width, height)) {
            return Err(KillfeedError::dimension_mismatch(
                format!("template '{}'", odd.name),
                (width, height),
                odd.dimensions(),
            )
            .into());
        }

        templates.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            templates,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconTemplate> {
        self.templates.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
    type Item = &'a IconTemplate;
    type IntoIter = std::slice::Iter<'a, IconTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
