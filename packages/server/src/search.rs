use std::fmt::Write;

use crate::registry::{Item, photo_path};

/// Render the plain-text search result for an item.
///
/// The `Photo:` line is present only when it was asked for and the item
/// actually has a photo. Lines are separated by `\n` with no trailing newline.
pub fn render_summary(item: &Item, include_photo: bool, origin: &str) -> String {
    let mut out = format!(
        "ID: {}\nName: {}\nDescription: {}",
        item.id, item.name, item.description
    );
    if include_photo && item.photo.is_some() {
        let _ = write!(out, "\nPhoto: {origin}{}", photo_path(item.id));
    }
    out
}
