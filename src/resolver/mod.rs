//! Filename-based ownership resolution for shared Drive folders.
//!
//! The listing key grants read access to every file in the shared folders,
//! and Drive metadata carries no owner field. The only access control this
//! catalog has is the filename convention `<title>_<identifier>.<ext>`: the
//! identifier suffix is parsed back into a pseudo-email and compared against
//! the signed-in user. A name the parser cannot attribute fails closed and
//! never appears in a user-scoped view.
//!
//! Every operation here is a pure, stateless transform over the supplied
//! listing. Absence is encoded in `Option` fields, never in errors.

pub mod models;

#[cfg(test)]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

pub use models::{Classified, DriveFileRecord, Identity, ModelAsset, OwnerIdentifier};

/// File extensions treated as 3D model content.
pub const MODEL_EXTENSIONS: [&str; 4] = ["glb", "obj", "fbx", "gltf"];
/// File extensions treated as thumbnail images.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "svg"];

const DISPLAY_NAME_FALLBACK: &str = "Custom Model";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\d{10,}").unwrap());
static DOTTED_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:\.[A-Za-z]+){1,2}").unwrap());
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\s]+").unwrap());

/// A file's name with the final extension removed, used to pair a model with
/// its thumbnail. Names without a dot (or with only a leading one) come back
/// unchanged.
pub fn base_file_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

fn final_extension(file_name: &str) -> Option<String> {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            Some(file_name[idx + 1..].to_ascii_lowercase())
        }
        _ => None,
    }
}

/// Whether the name carries one of the recognized 3D model extensions.
pub fn is_model_file(file_name: &str) -> bool {
    final_extension(file_name).is_some_and(|ext| MODEL_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the name carries one of the recognized image extensions.
pub fn is_image_file(file_name: &str) -> bool {
    final_extension(file_name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Recovers the owner identifier encoded in a filename suffix.
///
/// Filenames follow `<title>_<identifier>.<ext>`, where the identifier is
/// the uploader's email local part with dots kept as-is or flattened to
/// underscores. Candidate suffixes are tried longest-first: everything after
/// the first `_`, then after the second, and so on. The first candidate
/// longer than 5 characters that still looks like an email local part after
/// folding underscores to dots wins.
///
/// The longest-first order means an underscored title longer than 5
/// characters is absorbed into the handle: `My_Hero_jane_doe.glb` resolves
/// to `Hero.jane.doe`, not `jane.doe`. Stored filenames already depend on
/// this order, so it must not change.
///
/// Returns `None` for names with fewer than two `_`-separated segments or no
/// qualifying suffix; malformed input never panics.
pub fn extract_owner_handle(file_name: &str) -> Option<OwnerIdentifier> {
    let stem = base_file_name(file_name);
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 2 {
        return None;
    }

    for i in 1..parts.len() {
        let candidate = parts[i..].join("_");
        if candidate.len() <= 5 {
            continue;
        }

        let handle = if candidate.contains('.') {
            candidate.clone()
        } else if candidate.contains('_') {
            candidate.replace('_', ".")
        } else {
            candidate.clone()
        };

        if (handle.contains('.') && handle.len() > 5) || handle.len() > 3 {
            return Some(OwnerIdentifier {
                raw_segment: candidate,
                normalized_handle: handle,
            });
        }
    }

    None
}

/// Splits a folder listing into per-model assets, pairing each model with
/// its same-named thumbnail and, for a user-scoped identity, keeping only
/// the files whose extracted owner resolves to that user.
///
/// Files whose owner cannot be extracted never appear in a user-scoped view:
/// with no owner metadata to fall back on, guessing would show someone
/// else's model. The [`Identity::All`] view returns every model without
/// attempting extraction.
///
/// Thumbnails match on exact base-name equality; when several images share a
/// base name the first one in the listing wins. Input order of the model
/// files is preserved.
pub fn classify(files: &[DriveFileRecord], identity: &Identity) -> Classified {
    let image_files: Vec<&DriveFileRecord> =
        files.iter().filter(|f| is_image_file(&f.name)).collect();

    let mut objects = Vec::new();
    for model in files.iter().filter(|f| is_model_file(&f.name)) {
        let owner = match identity {
            Identity::All => None,
            Identity::Email(address) => match extract_owner_handle(&model.name) {
                Some(owner) if owner.pseudo_email() == *address => Some(owner),
                _ => continue,
            },
        };

        let base = base_file_name(&model.name);
        let thumbnail = image_files
            .iter()
            .find(|image| base_file_name(&image.name) == base)
            .map(|image| (*image).clone());

        let display_name = match &owner {
            Some(owner) => clean_title(title_part(base, owner)),
            None => clean_title(base),
        };

        objects.push(ModelAsset {
            id: model.id.clone(),
            source_file: model.clone(),
            display_name,
            thumbnail,
            owner_handle: owner,
        });
    }

    Classified { objects }
}

/// Cosmetic name for a raw filename: extension and identifier debris
/// stripped, separators collapsed, words title-cased. Falls back to
/// `"Custom Model"` rather than returning something empty.
pub fn generate_display_name(file_name: &str) -> String {
    clean_title(base_file_name(file_name))
}

/// Coarse forward matcher: derives the identifier a user's uploads embed
/// (email local part, lowercased, non-alphanumerics flattened to `_`) and
/// keeps the files whose name contains it. Looser than [`classify`]: a short
/// identifier can match unrelated files, so it serves discovery rather than
/// access control.
pub fn filter_user_files(files: &[DriveFileRecord], email: &str) -> Vec<DriveFileRecord> {
    let local_part = email.split('@').next().unwrap_or(email).to_lowercase();
    let identifier: String = local_part
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    files
        .iter()
        .filter(|file| file.name.to_lowercase().contains(&identifier))
        .cloned()
        .collect()
}

/// The stem with the matched owner suffix (and its joining `_`) removed.
fn title_part<'a>(stem: &'a str, owner: &OwnerIdentifier) -> &'a str {
    stem.strip_suffix(owner.raw_segment.as_str())
        .map(|title| title.trim_end_matches('_'))
        .unwrap_or(stem)
}

fn clean_title(stem: &str) -> String {
    let name = EMAIL_PATTERN.replace_all(stem, "");
    let name = TIMESTAMP_PATTERN.replace_all(&name, "");
    let name = DOTTED_NAME_PATTERN.replace_all(&name, "");
    let name = SEPARATOR_RUN.replace_all(&name, " ");
    let name = name.trim();

    if name.len() < 2 {
        return DISPLAY_NAME_FALLBACK.to_string();
    }

    name.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
