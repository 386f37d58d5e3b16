//! Font discovery for the PDF renderer.
//!
//! `genpdf` needs TrueType files for text metrics. The configured family is
//! searched in order: the configured directory, `assets/fonts` next to the
//! executable, `assets/fonts` in the crate, then the system Liberation font
//! directories. When none of those hold it, the system DejaVu Sans family is
//! used instead. A directory only matches when all four faces are present.

use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};
use tracing::{debug, info};

use crate::errors::ProposalError;

const FACES: [&str; 4] = ["Regular", "Bold", "Italic", "BoldItalic"];

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
];

const FALLBACK_FONT_DIRS: &[&str] = &["/usr/share/fonts/truetype/dejavu", "/usr/share/fonts/dejavu"];

/// DejaVu ships "Oblique" faces and no "-Regular" suffix.
const FALLBACK_FACES: [&str; 4] = [
    "DejaVuSans.ttf",
    "DejaVuSans-Bold.ttf",
    "DejaVuSans-Oblique.ttf",
    "DejaVuSans-BoldOblique.ttf",
];

/// A directory plus the file names of its regular, bold, italic and bold-italic faces.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFiles {
    pub dir: PathBuf,
    pub faces: [String; 4],
}

impl FontFiles {
    fn paths(&self) -> [PathBuf; 4] {
        self.faces.clone().map(|face| self.dir.join(face))
    }

    fn missing(&self) -> Vec<&str> {
        self.faces
            .iter()
            .filter(|face| !self.dir.join(face.as_str()).is_file())
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct FontSource {
    configured_dir: Option<PathBuf>,
    family: String,
}

impl FontSource {
    pub fn new(configured_dir: Option<PathBuf>, family: impl Into<String>) -> Self {
        Self {
            configured_dir,
            family: family.into(),
        }
    }

    fn family_faces(&self) -> [String; 4] {
        FACES.map(|face| format!("{}-{}.ttf", self.family, face))
    }

    fn candidates(&self) -> Vec<FontFiles> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let mut add = |path: PathBuf| {
            if !dirs.contains(&path) {
                dirs.push(path);
            }
        };

        if let Some(dir) = &self.configured_dir {
            add(dir.clone());
        }
        if let Ok(current_exe) = env::current_exe() {
            if let Some(bin_dir) = current_exe.parent() {
                add(bin_dir.join("assets/fonts"));
            }
        }
        add(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));
        for dir in SYSTEM_FONT_DIRS {
            add(PathBuf::from(dir));
        }

        let faces = self.family_faces();
        let mut candidates: Vec<FontFiles> = dirs
            .into_iter()
            .map(|dir| FontFiles {
                dir,
                faces: faces.clone(),
            })
            .collect();
        candidates.extend(FALLBACK_FONT_DIRS.iter().map(|dir| FontFiles {
            dir: PathBuf::from(dir),
            faces: FALLBACK_FACES.map(String::from),
        }));
        candidates
    }

    /// Returns the first candidate holding all four faces, or an error listing
    /// every directory tried and why it was rejected.
    pub fn resolve(&self) -> Result<FontFiles, ProposalError> {
        let mut attempts = Vec::new();

        for candidate in self.candidates() {
            if !candidate.dir.is_dir() {
                attempts.push(format!("{} (directory missing)", candidate.dir.display()));
                continue;
            }
            let missing = candidate.missing();
            if missing.is_empty() {
                debug!("Using fonts from {}", candidate.dir.display());
                return Ok(candidate);
            }
            attempts.push(format!(
                "{} (missing {})",
                candidate.dir.display(),
                missing.join(", ")
            ));
        }

        Err(ProposalError::Render(format!(
            "no directory contains the '{}' font family. Checked: {}. Set PROPOSAL_FONTS_DIR to a directory with {}-Regular/Bold/Italic/BoldItalic.ttf",
            self.family,
            attempts.join("; "),
            self.family
        )))
    }

    pub fn load(&self) -> Result<FontFamily<FontData>, ProposalError> {
        let files = self.resolve()?;
        if files.faces != self.family_faces() {
            info!(
                "Font family '{}' not found, falling back to {}",
                self.family,
                files.dir.display()
            );
        }

        let [regular, bold, italic, bold_italic] = files.paths();
        Ok(FontFamily {
            regular: load_face(&regular)?,
            bold: load_face(&bold)?,
            italic: load_face(&italic)?,
            bold_italic: load_face(&bold_italic)?,
        })
    }
}

fn load_face(path: &Path) -> Result<FontData, ProposalError> {
    FontData::load(path, None).map_err(|err| {
        ProposalError::Render(format!("failed to load font {}: {}", path.display(), err))
    })
}
