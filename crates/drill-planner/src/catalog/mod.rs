//! Drill catalog import and the catalog collaborator boundary.
//!
//! Catalog files are text files carrying a single JSON array of drill records. The file
//! name doubles as the primary skill category for records that omit one, so
//! `first_touch_drills.txt` supplies `first_touch` drills.

mod mapping;
mod normalizer;
mod parser;

pub use normalizer::{normalize_label, normalize_tag};

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::planning::domain::DrillCandidate;

/// Source of the full, current set of candidate drills.
pub trait DrillCatalog: Send + Sync {
    fn all_drills(&self) -> Result<Vec<DrillCandidate>, CatalogError>;
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json {
        source_name: String,
        source: serde_json::Error,
    },
    MissingArray {
        source_name: String,
    },
    Unavailable(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read drill catalog: {}", err),
            CatalogError::Json {
                source_name,
                source,
            } => write!(f, "invalid drill data in {}: {}", source_name, source),
            CatalogError::MissingArray { source_name } => {
                write!(f, "no JSON array of drills found in {}", source_name)
            }
            CatalogError::Unavailable(reason) => {
                write!(f, "drill catalog unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json { source, .. } => Some(source),
            CatalogError::MissingArray { .. } | CatalogError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

pub struct DrillImporter;

impl DrillImporter {
    /// Loads a single catalog file, or every catalog file when `path` is a directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<DrillCandidate>, CatalogError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_path(path)
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DrillCandidate>, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let category = category_from_file_name(path);

        Self::from_reader(file, &source_name, category.as_deref())
    }

    pub fn from_reader<R: Read>(
        mut reader: R,
        source_name: &str,
        file_category: Option<&str>,
    ) -> Result<Vec<DrillCandidate>, CatalogError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let drills: Vec<DrillCandidate> = parser::parse_records(&content, source_name)?
            .into_iter()
            .map(|record| mapping::to_candidate(record, file_category))
            .collect();

        info!(source = source_name, drills = drills.len(), "imported drill catalog file");
        Ok(drills)
    }

    /// Imports every `.txt` and `.json` file in `dir`, in file name order.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<DrillCandidate>, CatalogError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()?;
        files.retain(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| matches!(ext, "txt" | "json"))
        });
        files.sort();

        let mut drills = Vec::new();
        for file in files {
            drills.extend(Self::from_path(&file)?);
        }
        Ok(drills)
    }
}

fn category_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let category = normalize_tag(stem.strip_suffix("_drills").unwrap_or(stem));
    (!category.is_empty()).then_some(category)
}
