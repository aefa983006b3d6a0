use crate::refs::{ObjectReferences, RefType};
use crate::{LetterheadError, Result};
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::collections::HashMap;
use std::path::Path;
use usvg::Tree;

pub enum RasterImageType {
    /// RGB JPEG data, which PDF can display without re-encoding
    DirectlyEmbeddableJpeg(Vec<u8>),
    Image(DynamicImage),
}

pub enum ImageType {
    Raster(RasterImageType),
    SVG(Box<Tree>),
}

/// An image that can be painted onto pages, either as a background layout or as content.
/// `width` and `height` are the intrinsic size: pixels for raster images, user units
/// for SVGs.
pub struct Image {
    pub image: ImageType,
    pub width: f32,
    pub height: f32,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.image {
            ImageType::Raster(RasterImageType::DirectlyEmbeddableJpeg(_)) => "jpeg",
            ImageType::Raster(RasterImageType::Image(_)) => "raster",
            ImageType::SVG(_) => "svg",
        };
        f.debug_struct("Image")
            .field("kind", &kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, treating `.svg` files as vector images and everything
    /// else as raster images
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        if is_svg {
            Self::new_svg(&data)
        } else {
            Self::new_raster_from_bytes(data)
        }
    }

    /// Parse an SVG document
    pub fn new_svg(data: &[u8]) -> Result<Image> {
        let tree = Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();

        Ok(Image {
            width: size.width(),
            height: size.height(),
            image: ImageType::SVG(Box::new(tree)),
        })
    }

    /// Decode a raster image, guessing its format from the data
    pub fn new_raster_from_bytes(data: Vec<u8>) -> Result<Image> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: image.width() as f32,
                height: image.height() as f32,
                image: ImageType::Raster(RasterImageType::DirectlyEmbeddableJpeg(data)),
            }),
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        Image {
            width: image.width() as f32,
            height: image.height() as f32,
            image: ImageType::Raster(RasterImageType::Image(image)),
        }
    }

    /// Whether the image is an SVG, which scales without losing resolution
    pub fn is_vector(&self) -> bool {
        matches!(self.image, ImageType::SVG(_))
    }

    fn encode_raster(raster: &RasterImageType) -> EncodeOutput {
        match raster {
            RasterImageType::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    /// Write the image as an XObject. Raster XObjects and converted SVGs both paint into
    /// the unit square, so pages scale them with the same `cm` operator.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<()> {
        match &self.image {
            ImageType::Raster(raster) => {
                let id = refs.gen(RefType::Image(image_index));
                let encoded = Self::encode_raster(raster);

                let mask_id = encoded
                    .mask
                    .as_ref()
                    .map(|_| refs.gen(RefType::ImageMask(image_index)));

                let mut image = writer.image_xobject(id, &encoded.bytes);
                image.filter(encoded.filter);
                image.width(self.width as i32);
                image.height(self.height as i32);
                image.color_space().device_rgb();
                image.bits_per_component(8);
                if let Some(mask_id) = mask_id {
                    image.s_mask(mask_id);
                }
                image.finish();

                if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
                    let mut s_mask = writer.image_xobject(mask_id, mask);
                    s_mask.filter(Filter::FlateDecode);
                    s_mask.width(self.width as i32);
                    s_mask.height(self.height as i32);
                    s_mask.color_space().device_gray();
                    s_mask.bits_per_component(8);
                }
            }
            ImageType::SVG(tree) => {
                let (chunk, svg_id) =
                    svg2pdf::to_chunk(tree, svg2pdf::ConversionOptions::default())
                        .map_err(|err| LetterheadError::SvgConversion(format!("{err:?}")))?;

                // pull the converted objects into our own id space
                let id = refs.gen(RefType::Image(image_index));
                let mut mapping = HashMap::from([(svg_id, id)]);
                let chunk =
                    chunk.renumber(|old| *mapping.entry(old).or_insert_with(|| refs.anonymous()));
                writer.extend(&chunk);
            }
        }

        Ok(())
    }
}
