//! The editing screen: photo library access, the editing session and post
//! submission.

pub mod access;
pub mod post;
pub mod session;

pub use access::{acquire_image, AccessState, PhotoLibrary, PickResult};
pub use post::{validate_post, DirectorySubmitter, PostManifest, PostSubmitter};
pub use session::{ChooseOutcome, DisplaySink, EditingSession};
