//! Photo library access.
//!
//! Authorization is an explicit state machine: every [`AccessState`] has its
//! own handler and the picker is presented at most once, only after access
//! has been granted.

use crate::core::error::AccessError;
use crate::core::types::SourceImage;
use serde::{Deserialize, Serialize};

/// Authorization state of the photo library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// The user allowed access.
    Granted,
    /// The user has not been asked yet.
    NotDetermined,
    /// The user refused access.
    Denied,
    /// Device policy forbids access.
    Restricted,
}

/// What the picker returned.
#[derive(Debug, Clone)]
pub enum PickResult {
    /// The user chose an image. The edited variant is preferred when present.
    Picked {
        edited: Option<SourceImage>,
        original: Option<SourceImage>,
    },
    /// The user dismissed the picker.
    Cancelled,
}

/// Image acquisition collaborator.
///
/// Calls block until the user has answered; the session resumes afterwards.
pub trait PhotoLibrary {
    /// Current authorization state.
    fn authorization_status(&self) -> AccessState;

    /// Ask the user for access and return the resulting state.
    fn request_authorization(&mut self) -> AccessState;

    /// Whether a photo library exists on this device.
    fn is_available(&self) -> bool;

    /// Show the picker and wait for the user.
    fn present_picker(&mut self) -> PickResult;
}

/// Run the authorization state machine, then present the picker once.
///
/// Returns `Ok(None)` when the user cancels or the picker returns no image.
pub fn acquire_image(library: &mut dyn PhotoLibrary) -> Result<Option<SourceImage>, AccessError> {
    match library.authorization_status() {
        AccessState::Granted => present(library),
        AccessState::NotDetermined => on_not_determined(library),
        AccessState::Denied => Err(AccessError::PermissionDenied),
        AccessState::Restricted => Err(AccessError::PermissionRestricted),
    }
}

fn on_not_determined(library: &mut dyn PhotoLibrary) -> Result<Option<SourceImage>, AccessError> {
    match library.request_authorization() {
        AccessState::Granted => present(library),
        state => {
            log::info!("User did not authorize access to the photo library ({:?})", state);
            Err(AccessError::PermissionDenied)
        }
    }
}

fn present(library: &mut dyn PhotoLibrary) -> Result<Option<SourceImage>, AccessError> {
    if !library.is_available() {
        return Err(AccessError::ImageUnavailable);
    }

    match library.present_picker() {
        PickResult::Picked { edited, original } => Ok(edited.or(original)),
        PickResult::Cancelled => {
            log::debug!("Picker cancelled");
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Scripted photo library that counts interactions.
    pub(crate) struct FakeLibrary {
        pub status: AccessState,
        pub answer: AccessState,
        pub available: bool,
        pub pick: PickResult,
        pub requests: usize,
        pub presentations: usize,
    }

    impl FakeLibrary {
        pub(crate) fn new(status: AccessState, pick: PickResult) -> Self {
            Self {
                status,
                answer: AccessState::Granted,
                available: true,
                pick,
                requests: 0,
                presentations: 0,
            }
        }
    }

    impl PhotoLibrary for FakeLibrary {
        fn authorization_status(&self) -> AccessState {
            self.status
        }

        fn request_authorization(&mut self) -> AccessState {
            self.requests += 1;
            self.status = self.answer;
            self.answer
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn present_picker(&mut self) -> PickResult {
            self.presentations += 1;
            self.pick.clone()
        }
    }

    pub(crate) fn solid(width: u32, height: u32, value: u8) -> SourceImage {
        SourceImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255])))
    }

    fn picked(image: SourceImage) -> PickResult {
        PickResult::Picked {
            edited: None,
            original: Some(image),
        }
    }

    #[test]
    fn test_granted_presents_once() {
        let mut library = FakeLibrary::new(AccessState::Granted, picked(solid(2, 2, 9)));
        let image = acquire_image(&mut library).unwrap();
        assert_eq!(image, Some(solid(2, 2, 9)));
        assert_eq!(library.presentations, 1);
        assert_eq!(library.requests, 0);
    }

    #[test]
    fn test_not_determined_then_granted() {
        let mut library = FakeLibrary::new(AccessState::NotDetermined, picked(solid(2, 2, 1)));
        assert!(acquire_image(&mut library).unwrap().is_some());
        assert_eq!(library.requests, 1);
        assert_eq!(library.presentations, 1);
    }

    #[test]
    fn test_not_determined_then_denied() {
        let mut library = FakeLibrary::new(AccessState::NotDetermined, picked(solid(2, 2, 1)));
        library.answer = AccessState::Denied;
        assert_eq!(acquire_image(&mut library), Err(AccessError::PermissionDenied));
        assert_eq!(library.presentations, 0);
    }

    #[test]
    fn test_not_determined_then_restricted_is_denied() {
        let mut library = FakeLibrary::new(AccessState::NotDetermined, picked(solid(2, 2, 1)));
        library.answer = AccessState::Restricted;
        assert_eq!(acquire_image(&mut library), Err(AccessError::PermissionDenied));
        assert_eq!(library.requests, 1);
        assert_eq!(library.presentations, 0);
    }

    #[test]
    fn test_denied_and_restricted_never_present() {
        for (state, expected) in [
            (AccessState::Denied, AccessError::PermissionDenied),
            (AccessState::Restricted, AccessError::PermissionRestricted),
        ] {
            let mut library = FakeLibrary::new(state, picked(solid(1, 1, 0)));
            assert_eq!(acquire_image(&mut library), Err(expected));
            assert_eq!(library.presentations, 0);
            assert_eq!(library.requests, 0);
        }
    }

    #[test]
    fn test_unavailable_library() {
        let mut library = FakeLibrary::new(AccessState::Granted, picked(solid(1, 1, 0)));
        library.available = false;
        assert_eq!(acquire_image(&mut library), Err(AccessError::ImageUnavailable));
        assert_eq!(library.presentations, 0);
    }

    #[test]
    fn test_edited_image_preferred() {
        let pick = PickResult::Picked {
            edited: Some(solid(1, 1, 200)),
            original: Some(solid(1, 1, 10)),
        };
        let mut library = FakeLibrary::new(AccessState::Granted, pick);
        assert_eq!(acquire_image(&mut library).unwrap(), Some(solid(1, 1, 200)));
    }

    #[test]
    fn test_cancel_returns_none() {
        let mut library = FakeLibrary::new(AccessState::Granted, PickResult::Cancelled);
        assert_eq!(acquire_image(&mut library).unwrap(), None);
        assert_eq!(library.presentations, 1);
    }
}
