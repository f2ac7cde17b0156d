//! System font discovery backed by fontdb.

use fontdb::{Database, FaceInfo, Source};

use super::{Candidates, DeferredFace, Descriptor, Discover, FaceSource};
use crate::error::FontError;

/// Weight at or above which a face counts as bold.
const BOLD_WEIGHT: u16 = 600;

/// Discovery over a fontdb database.
///
/// Candidates are faces whose family matches the descriptor
/// (case-insensitively), filtered by the pinned style name or the
/// bold/italic flags, best match first.
pub struct FontdbDiscovery {
    db: Database,
}

impl FontdbDiscovery {
    /// Scan the system font directories.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Font discovery initialized with {} system faces", db.len());
        Self { db }
    }

    /// Use a pre-populated database.
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Discover for FontdbDiscovery {
    fn discover(&self, descriptor: &Descriptor) -> Result<Candidates<'_>, FontError> {
        let mut matches: Vec<&FaceInfo> = self
            .db
            .faces()
            .filter(|face| family_matches(face, &descriptor.family))
            .filter(|face| style_matches(face, descriptor))
            .collect();
        matches.sort_by_key(|face| score(face, descriptor));

        log::debug!("Discovery for '{}' found {} candidates", descriptor, matches.len());

        let variations = descriptor.variations.clone();
        Ok(Box::new(matches.into_iter().map(move |face| DeferredFace {
            name: display_name(face),
            source: match &face.source {
                Source::Binary(data) => FaceSource::Memory(data.clone()),
                Source::File(path) | Source::SharedFile(path, _) => FaceSource::File(path.clone()),
            },
            index: face.index,
            variations: variations.clone(),
        })))
    }
}

fn family_matches(face: &FaceInfo, family: &str) -> bool {
    face.families
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(family))
}

fn style_matches(face: &FaceInfo, descriptor: &Descriptor) -> bool {
    if let Some(style) = &descriptor.style {
        return face_style_name(face).is_some_and(|name| name == normalize(style));
    }
    if descriptor.bold && face.weight.0 < BOLD_WEIGHT {
        return false;
    }
    if descriptor.italic && face.style == fontdb::Style::Normal {
        return false;
    }
    true
}

/// Lower is better: slant mismatch, then distance from the target weight.
fn score(face: &FaceInfo, descriptor: &Descriptor) -> (bool, u16) {
    let target = if descriptor.bold { 700 } else { 400 };
    let italic = face.style != fontdb::Style::Normal;
    (italic != descriptor.italic, face.weight.0.abs_diff(target))
}

/// The style part of a PostScript name, e.g. `semibolditalic` for
/// `Iosevka-SemiBoldItalic`. A name without a suffix is the regular face.
fn face_style_name(face: &FaceInfo) -> Option<String> {
    if face.post_script_name.is_empty() {
        return None;
    }
    Some(match face.post_script_name.rsplit_once('-') {
        Some((_, style)) => normalize(style),
        None => "regular".to_string(),
    })
}

fn normalize(style: &str) -> String {
    style
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn display_name(face: &FaceInfo) -> String {
    if face.post_script_name.is_empty() {
        face.families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    } else {
        face.post_script_name.clone()
    }
}
