//! Camera-to-excerpt pipeline.
//!
//! A [`CaptureSession`] starts from a photographed page, lets the user
//! adjust a crop rectangle, cuts the crop and hands the upright pixels to a
//! [`TextRecognizer`]. The recognized text becomes an [`ExcerptDraft`] the
//! user can edit before committing it to the [`Library`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{BookId, CatalogError, ExcerptId, Library, NewExcerpt};
use crate::config::CaptureConfig;
use crate::decode::{CapturedImage, DecodedImage};
use crate::encode::{encode_image, EncodeError};
use crate::geometry::{CropRegion, Extent, GestureEvent};
use crate::transform::crop_to_region;

/// Failure reported by a text recognizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Text recognition failed: {0}")]
pub struct RecognitionError(pub String);

/// Errors from the capture pipeline.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The page (or its crop) has no usable pixel buffer.
    #[error("Captured image has no pixel buffer")]
    NoPixelBuffer,

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error("Failed to encode capture: {0}")]
    Encode(#[from] EncodeError),
}

/// On-device text recognition.
///
/// Implementations receive upright RGB pixels and return the recognized
/// lines top to bottom.
pub trait TextRecognizer {
    fn recognize(&self, image: &DecodedImage) -> Result<Vec<String>, RecognitionError>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&DecodedImage) -> Result<Vec<String>, RecognitionError>,
{
    fn recognize(&self, image: &DecodedImage) -> Result<Vec<String>, RecognitionError> {
        self(image)
    }
}

/// Where a capture session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureStage {
    /// The crop rectangle is shown over the full page.
    #[default]
    Cropping,
    /// The crop has been cut and is shown in place of the page.
    Cropped,
}

/// One photographed page being turned into an excerpt.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    config: CaptureConfig,
    source: CapturedImage,
    region: CropRegion,
    cropped: Option<CapturedImage>,
}

impl CaptureSession {
    /// Start a session for a page displayed at `displayed`.
    pub fn new(source: CapturedImage, displayed: Extent, config: CaptureConfig) -> Self {
        Self {
            region: CropRegion::new(displayed, config.crop),
            config,
            source,
            cropped: None,
        }
    }

    pub fn stage(&self) -> CaptureStage {
        if self.cropped.is_some() {
            CaptureStage::Cropped
        } else {
            CaptureStage::Cropping
        }
    }

    pub fn source(&self) -> &CapturedImage {
        &self.source
    }

    pub fn region(&self) -> &CropRegion {
        &self.region
    }

    pub fn cropped(&self) -> Option<&CapturedImage> {
        self.cropped.as_ref()
    }

    /// The image currently shown: the crop once cut, otherwise the page.
    pub fn current(&self) -> &CapturedImage {
        self.cropped.as_ref().unwrap_or(&self.source)
    }

    /// Feed a pointer gesture to the crop rectangle.
    ///
    /// Ignored once cropped; the rectangle is hidden then.
    pub fn apply(&mut self, event: GestureEvent) {
        if self.cropped.is_some() {
            log::debug!("Ignoring gesture while cropped");
            return;
        }
        self.region.apply(event);
    }

    /// The displayed extent changed, e.g. after a layout pass.
    pub fn set_displayed_extent(&mut self, displayed: Extent) {
        self.region.set_extent(displayed);
    }

    /// Cut the crop. Returns whether the session moved to `Cropped`.
    ///
    /// On failure the session stays in `Cropping` with the page untouched.
    pub fn confirm_crop(&mut self) -> bool {
        match crop_to_region(&self.source, &self.region) {
            Ok(cropped) => {
                self.cropped = Some(cropped);
                true
            }
            Err(e) => {
                log::warn!("Crop not applied: {e}");
                false
            }
        }
    }

    /// Drop the crop and show the page again. The rectangle keeps its shape.
    pub fn revert(&mut self) {
        self.cropped = None;
    }

    /// Run text recognition over the upright current image.
    ///
    /// Lines are joined with a single space.
    pub fn recognize_text<R>(&self, recognizer: &R) -> Result<String, CaptureError>
    where
        R: TextRecognizer + ?Sized,
    {
        let upright = self.upright()?;
        log::info!(
            "Recognizing text in {}x{} image",
            upright.width,
            upright.height
        );
        let lines = recognizer.recognize(&upright)?;
        Ok(lines.join(" "))
    }

    /// JPEG bytes of the upright current image, for an out-of-process
    /// recognizer or for storage.
    pub fn encode_current(&self) -> Result<Vec<u8>, CaptureError> {
        let upright = self.upright()?;
        Ok(encode_image(&upright, self.config.jpeg_quality)?)
    }

    fn upright(&self) -> Result<DecodedImage, CaptureError> {
        self.current()
            .to_upright()
            .ok_or(CaptureError::NoPixelBuffer)
    }
}

/// Editable form of a recognized excerpt.
///
/// Chapter and page are free text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptDraft {
    pub text: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub page: String,
}

impl ExcerptDraft {
    pub fn from_recognized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn chapter_number(&self) -> Option<i32> {
        parse_number(&self.chapter)
    }

    pub fn page_number(&self) -> Option<i32> {
        parse_number(&self.page)
    }

    pub fn to_new_excerpt(&self) -> NewExcerpt {
        NewExcerpt {
            text: self.text.clone(),
            chapter: self.chapter_number(),
            page: self.page_number(),
        }
    }

    /// Append the draft to a book.
    pub fn commit_to(
        &self,
        library: &mut Library,
        book: BookId,
    ) -> Result<ExcerptId, CatalogError> {
        library.add_excerpt(book, self.to_new_excerpt())
    }
}

fn parse_number(field: &str) -> Option<i32> {
    field.trim().parse().ok()
}
