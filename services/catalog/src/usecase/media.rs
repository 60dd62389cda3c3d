use crate::domain::repository::MediaGateway;
use crate::domain::types::{AssetKind, MediaAsset, Upload};
use crate::error::CatalogError;

/// Delete a replaced or orphaned asset. A failed delete does not abort the
/// caller's write; it is logged and handed back as a warning message.
pub async fn discard_asset<M: MediaGateway>(
    media: &M,
    asset: &MediaAsset,
    kind: AssetKind,
) -> Option<String> {
    match media.delete(&asset.public_id, kind).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(
                public_id = %asset.public_id,
                kind = kind.label(),
                error = %e,
                "media cleanup failed"
            );
            Some(format!("Could not remove {} from cloud", kind.label()))
        }
    }
}

/// Join warnings from several cleanups into one message.
pub fn merge_warnings(warnings: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    let all: Vec<String> = warnings.into_iter().flatten().collect();
    if all.is_empty() { None } else { Some(all.join("; ")) }
}

// ── UploadTrailer ────────────────────────────────────────────────────────────

pub struct UploadTrailerUseCase<M: MediaGateway> {
    pub media: M,
}

impl<M: MediaGateway> UploadTrailerUseCase<M> {
    pub async fn execute(&self, file: Option<Upload>) -> Result<MediaAsset, CatalogError> {
        let file = file.ok_or_else(|| CatalogError::invalid("Video file is missing!"))?;
        if !file.is_video() {
            return Err(CatalogError::invalid("Only video files are supported!"));
        }
        self.media.upload(&file, AssetKind::Trailer).await
    }
}
