use crate::{LABEL_ZODIAC, Labels};

/// Tag assumed for image references that do not carry one.
const DEFAULT_TAG: &str = "latest";

/// Returns `true` if the image reference names an explicit tag or digest.
///
/// Only the final path segment is inspected, so a registry port
/// (`localhost:5000/app`) is not mistaken for a tag.
pub fn has_tag(reference: &str) -> bool {
    if reference.contains('@') {
        return true;
    }
    let last = reference.rsplit('/').next().unwrap_or(reference);
    last.contains(':')
}

/// Logical image name for a container.
///
/// The Zodiac label wins over the recorded reference; untagged references get `:latest`.
pub fn effective_image_name(labels: &Labels, image: &str) -> String {
    let name = labels.get(LABEL_ZODIAC).unwrap_or(image);
    if has_tag(name) {
        name.to_string()
    } else {
        format!("{name}:{DEFAULT_TAG}")
    }
}
