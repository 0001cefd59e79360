// studio/ - Outfit form state
//
// Owns the selected photo, form fields, in-flight guard, current result
// and the append-only wardrobe. The transport is not here: the host
// takes the request from `begin_submit` and reports back via `complete`.

mod request;
pub mod upload;

pub use request::{Birthday, Gender, Occasion, OutfitRequest};

use crate::config::Config;
use crate::error::GenerateError;

/// A generated outfit: object URL of the returned image plus a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardrobeEntry {
    pub image: String,
    pub description: String,
}

#[derive(Debug)]
pub struct Studio {
    // Form
    image: Option<Vec<u8>>,
    occasion: Occasion,
    gender: Gender,
    birthday: String,
    style: String,
    max_upload_dim: u32,

    // Submission
    closed: bool,
    in_flight: bool,
    pending: Option<(Occasion, Gender)>,
    error: Option<&'static str>,

    // Results
    result: Option<WardrobeEntry>,
    wardrobe: Vec<WardrobeEntry>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Studio {
    pub fn new(config: &Config) -> Self {
        Self {
            image: None,
            occasion: Occasion::default(),
            gender: Gender::default(),
            birthday: String::new(),
            style: config.style.clone(),
            max_upload_dim: config.max_upload_dim,
            closed: false,
            in_flight: false,
            pending: None,
            error: None,
            result: None,
            wardrobe: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Form fields
    // ------------------------------------------------------------------

    pub fn select_image(&mut self, bytes: Vec<u8>) {
        self.image = if bytes.is_empty() { None } else { Some(bytes) };
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn set_occasion(&mut self, occasion: Occasion) {
        self.occasion = occasion;
    }

    pub fn occasion(&self) -> Occasion {
        self.occasion
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn set_birthday(&mut self, birthday: &str) {
        self.birthday = birthday.to_string();
    }

    pub fn set_style(&mut self, style: &str) {
        self.style = style.to_string();
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Validate the form and raise the in-flight guard.
    ///
    /// A rejected submission never issues a request; apart from the
    /// error message, state is untouched. While a request is pending this
    /// returns [`GenerateError::Busy`] without touching anything.
    pub fn begin_submit(&mut self) -> Result<OutfitRequest, GenerateError> {
        if self.closed {
            return Err(GenerateError::Cancelled);
        }
        if self.in_flight {
            return Err(GenerateError::Busy);
        }
        match self.build_request() {
            Ok(req) => {
                self.error = None;
                self.in_flight = true;
                self.pending = Some((self.occasion, self.gender));
                log::info!("outfit request: occasion={} gender={}", req.occasion.as_str(), req.gender.as_str());
                Ok(req)
            }
            Err(e) => {
                log::warn!("outfit request rejected: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn build_request(&self) -> Result<OutfitRequest, GenerateError> {
        let bytes = self.image.as_deref().ok_or(GenerateError::NoImage)?;
        let birthday: Birthday = self.birthday.parse()?;
        let png = upload::prepare(bytes, self.max_upload_dim)?;
        Ok(OutfitRequest::new(self.gender, self.occasion, birthday, &self.style, &png))
    }

    /// Record the outcome of the request started by `begin_submit`.
    ///
    /// `outcome` carries the displayable image reference on success. On
    /// failure the previous result and wardrobe are left as they were.
    /// Once closed, every outcome is dropped with [`GenerateError::Cancelled`].
    pub fn complete(&mut self, outcome: Result<String, GenerateError>) -> Result<&WardrobeEntry, GenerateError> {
        if self.closed {
            self.in_flight = false;
            self.pending = None;
            log::info!("late completion dropped, view is gone");
            return Err(GenerateError::Cancelled);
        }
        if !self.in_flight {
            log::warn!("completion without a pending request ignored");
            return Err(GenerateError::Transport("no request in flight".to_string()));
        }
        self.in_flight = false;
        let (occasion, gender) = self.pending.take().unwrap_or((self.occasion, self.gender));

        match outcome {
            Ok(image) => {
                let entry = WardrobeEntry { image, description: describe(occasion, gender) };
                self.error = None;
                self.result = Some(entry.clone());
                log::info!("outfit generated, wardrobe size {}", self.wardrobe.len() + 1);
                self.wardrobe.push(entry);
                self.wardrobe.last().ok_or(GenerateError::Cancelled)
            }
            Err(e) => {
                log::error!("outfit generation failed: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Stop accepting submissions and completions. Used on unmount.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// User-visible message from the last failed submission.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn result(&self) -> Option<&WardrobeEntry> {
        self.result.as_ref()
    }

    /// Every outfit generated this session, oldest first.
    pub fn wardrobe(&self) -> &[WardrobeEntry] {
        &self.wardrobe
    }
}

fn describe(occasion: Occasion, gender: Gender) -> String {
    match gender {
        Gender::Unspecified => format!("{} look", occasion.label()),
        g => format!("{} look ({})", occasion.label(), g.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn png() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn ready() -> Studio {
        let mut s = Studio::default();
        s.select_image(png());
        s.set_birthday("1995-06-30");
        s
    }

    #[test]
    fn missing_image_is_rejected_locally() {
        let mut s = Studio::default();
        s.set_birthday("1995-06-30");
        let err = s.begin_submit().unwrap_err();
        assert!(matches!(err, GenerateError::NoImage));
        assert!(err.is_user_input());
        assert!(s.error().unwrap().contains("select an image"));
        assert!(!s.in_flight());
        assert!(s.wardrobe().is_empty());
    }

    #[test]
    fn empty_selection_counts_as_none() {
        let mut s = ready();
        s.select_image(Vec::new());
        assert!(!s.has_image());
        assert!(matches!(s.begin_submit(), Err(GenerateError::NoImage)));
    }

    #[test]
    fn undecodable_image_is_rejected_locally() {
        let mut s = ready();
        s.select_image(b"GIF? no".to_vec());
        assert!(matches!(s.begin_submit(), Err(GenerateError::Upload(_))));
        assert!(!s.in_flight());
    }

    #[test]
    fn second_submit_while_pending_is_busy() {
        let mut s = ready();
        s.begin_submit().unwrap();
        assert!(matches!(s.begin_submit(), Err(GenerateError::Busy)));
        assert!(s.in_flight());
        assert_eq!(s.error(), None);
    }

    #[test]
    fn success_appends_once() {
        let mut s = ready();
        s.set_occasion(Occasion::Work);
        let req = s.begin_submit().unwrap();
        assert_eq!(req.occasion, Occasion::Work);
        assert!(!req.image.is_empty());

        let entry = s.complete(Ok("blob:outfit-1".to_string())).unwrap().clone();
        assert_eq!(entry.image, "blob:outfit-1");
        assert_eq!(entry.description, "Workwear look");
        assert_eq!(s.result(), Some(&entry));
        assert_eq!(s.wardrobe().len(), 1);
        assert!(!s.in_flight());
    }

    #[test]
    fn failure_preserves_previous_result() {
        let mut s = ready();
        s.begin_submit().unwrap();
        s.complete(Ok("blob:first".to_string())).unwrap();

        s.begin_submit().unwrap();
        assert!(s.complete(Err(GenerateError::Status(500))).is_err());
        assert_eq!(s.result().unwrap().image, "blob:first");
        assert_eq!(s.wardrobe().len(), 1);
        assert_eq!(s.error(), Some("Outfit generation failed. Please try again."));
        assert!(!s.in_flight());
    }

    #[test]
    fn description_uses_fields_at_submit_time() {
        let mut s = ready();
        s.set_gender(Gender::Female);
        s.set_occasion(Occasion::Date);
        s.begin_submit().unwrap();
        s.set_occasion(Occasion::Work);
        let entry = s.complete(Ok("blob:x".to_string())).unwrap();
        assert_eq!(entry.description, "Date night look (female)");
    }

    #[test]
    fn completion_after_close_lands_nowhere() {
        let mut s = ready();
        s.begin_submit().unwrap();
        s.close();
        assert!(matches!(s.complete(Ok("blob:late".to_string())), Err(GenerateError::Cancelled)));
        assert!(s.wardrobe().is_empty());
        assert_eq!(s.result(), None);
        assert_eq!(s.error(), None);
        assert!(!s.in_flight());
        assert!(matches!(s.begin_submit(), Err(GenerateError::Cancelled)));
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut s = ready();
        assert!(s.complete(Ok("blob:x".to_string())).is_err());
        assert!(s.wardrobe().is_empty());
        assert_eq!(s.error(), None);
    }
}
