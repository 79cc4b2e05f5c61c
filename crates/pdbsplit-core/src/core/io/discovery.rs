use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// An input structure file and the identifier derived from its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InputFile {
    pub id: String,
    pub path: PathBuf,
}

impl InputFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let id = file_id_of(&path)?;
        Some(Self { id, path })
    }
}

/// The file identifier: the file name with its extension stripped.
pub fn file_id_of(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
}

/// Lists the regular files directly inside `dir` whose extension matches `extension`
/// (case-insensitive, without the leading dot), sorted by id.
///
/// Ids are unique: when several files share a stem (`1abc.pdb` and `1abc.PDB`), the first path
/// in sort order is kept and the others are skipped with a warning.
pub fn discover_inputs(dir: &Path, extension: &str) -> io::Result<Vec<InputFile>> {
    let wanted = extension.trim_start_matches('.');
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted));
        if !matches {
            continue;
        }
        if let Some(input) = InputFile::from_path(path) {
            files.push(input);
        }
    }
    files.sort();
    files.dedup_by(|later, kept| {
        let duplicate = later.id == kept.id;
        if duplicate {
            warn!(
                id = %kept.id,
                kept = %kept.path.display(),
                skipped = %later.path.display(),
                "Several input files share one id; processing only the first."
            );
        }
        duplicate
    });
    Ok(files)
}
