//! Where document layouts (page size plus background) come from.
//!
//! Layouts are looked up by name through a [LayoutSource]. The filesystem source searches
//! an ordered list of directories, so an application can shadow the layouts a library
//! ships simply by putting its own directory first.

use crate::image::Image;
use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use crate::{LetterheadError, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// File extensions a layout may have, in order of preference
pub const LAYOUT_EXTENSIONS: [&str; 4] = ["svg", "png", "jpg", "jpeg"];

/// The page every page of a document is cloned from: its size, and the background that
/// is painted beneath everything drawn on it
#[derive(Debug)]
pub struct Layout {
    pub size: PageSize,
    pub background: Option<Image>,
}

impl Layout {
    /// A layout without a background
    pub fn blank(size: PageSize) -> Layout {
        Layout {
            size,
            background: None,
        }
    }

    /// A layout painted with `background`. SVG backgrounds define the page size
    /// themselves; raster backgrounds are stretched over `raster_size`.
    pub fn with_background(background: Image, raster_size: PageSize) -> Layout {
        let size = if background.is_vector() {
            (Pt(background.width), Pt(background.height))
        } else {
            raster_size
        };
        Layout {
            size,
            background: Some(background),
        }
    }
}

/// Resolves layout names to layouts
pub trait LayoutSource {
    /// Load the layout called `name`, failing with [LetterheadError::LayoutNotFound] if
    /// there is no such layout
    fn load(&self, name: &str) -> Result<Layout>;
}

/// Layout names are plain file stems; anything that could walk out of a search
/// directory is never looked up
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        && Path::new(name).components().count() == 1
}

/// Looks layouts up as image files in a list of directories. The first directory that
/// holds `<name>.svg`, `<name>.png`, `<name>.jpg` or `<name>.jpeg` wins, and within a
/// directory extensions are tried in that order.
#[derive(Debug, Clone)]
pub struct LayoutSearchPath {
    dirs: Vec<PathBuf>,
    raster_page_size: PageSize,
}

impl Default for LayoutSearchPath {
    fn default() -> Self {
        LayoutSearchPath::new()
    }
}

impl LayoutSearchPath {
    pub fn new() -> LayoutSearchPath {
        LayoutSearchPath {
            dirs: Vec::new(),
            raster_page_size: pagesize::A4,
        }
    }

    /// Append a directory. Directories added earlier take precedence.
    pub fn with_dir<P: Into<PathBuf>>(mut self, dir: P) -> LayoutSearchPath {
        self.dirs.push(dir.into());
        self
    }

    /// The page size raster layouts are stretched over (A4 unless set)
    pub fn with_raster_page_size(mut self, size: PageSize) -> LayoutSearchPath {
        self.raster_page_size = size;
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The file that `name` resolves to, if any
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if !is_plain_name(name) {
            log::warn!("Refusing to look up layout `{name}`: not a plain name");
            return None;
        }

        self.dirs.iter().find_map(|dir| {
            LAYOUT_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{name}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }
}

impl LayoutSource for LayoutSearchPath {
    fn load(&self, name: &str) -> Result<Layout> {
        let path = self
            .resolve(name)
            .ok_or_else(|| LetterheadError::LayoutNotFound {
                name: name.to_string(),
                searched: self
                    .dirs
                    .iter()
                    .map(|dir| dir.display().to_string())
                    .collect(),
            })?;

        log::debug!("Loading layout `{name}` from {}", path.display());
        let background = Image::new_from_disk(&path)?;
        Ok(Layout::with_background(background, self.raster_page_size))
    }
}

/// Layouts held in memory, mostly for tests and for applications that bundle their
/// layouts into the binary. Backgrounds are kept as encoded bytes and decoded on every
/// load, so each compilation gets its own copy.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLayouts {
    layouts: HashMap<String, (PageSize, Option<Vec<u8>>)>,
}

impl InMemoryLayouts {
    pub fn new() -> InMemoryLayouts {
        InMemoryLayouts::default()
    }

    /// Add a layout without a background
    pub fn add_blank<S: Into<String>>(&mut self, name: S, size: PageSize) -> &mut Self {
        self.layouts.insert(name.into(), (size, None));
        self
    }

    /// Add a layout with an SVG or raster background. For SVG backgrounds, the SVG's own
    /// size replaces `size`.
    pub fn add<S: Into<String>>(
        &mut self,
        name: S,
        size: PageSize,
        background: Vec<u8>,
    ) -> &mut Self {
        self.layouts.insert(name.into(), (size, Some(background)));
        self
    }
}

impl LayoutSource for InMemoryLayouts {
    fn load(&self, name: &str) -> Result<Layout> {
        let (size, background) =
            self.layouts
                .get(name)
                .ok_or_else(|| LetterheadError::LayoutNotFound {
                    name: name.to_string(),
                    searched: vec!["<memory>".to_string()],
                })?;

        match background {
            None => Ok(Layout::blank(*size)),
            Some(bytes) => {
                let image = if looks_like_svg(bytes) {
                    Image::new_svg(bytes)?
                } else {
                    Image::new_raster_from_bytes(bytes.clone())?
                };
                Ok(Layout::with_background(image, *size))
            }
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"<")
}
