//! Media picker boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::wizard::draft::ImageHandle;

/// What the picker hands back: either a local URI or a cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedImage {
    pub canceled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl PickedImage {
    /// `None` when the user canceled or the picker returned no URI.
    pub fn into_handle(self) -> Option<ImageHandle> {
        if self.canceled {
            return None;
        }
        self.uri
            .filter(|u| !u.trim().is_empty())
            .map(ImageHandle::new)
    }
}

#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn pick_image(&self) -> Result<PickedImage, ServiceError>;
}
