use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use common::Language;
use tokio::fs;

use super::{CODE_PLACEHOLDER, ProblemCase, ProblemData, ProblemStore, ProblemStoreError};

/// Problem store backed by a mounted directory:
///
/// ```text
/// {root}/{slug}/full-boilerplate/function.{ext}
/// {root}/{slug}/inputs/{name}
/// {root}/{slug}/outputs/{name}
/// ```
///
/// Inputs and outputs are paired by file name and ordered by numeric file stem.
pub struct FilesystemProblemStore {
    root: PathBuf,
}

impl FilesystemProblemStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn problem_dir(&self, slug: &str) -> Result<PathBuf, ProblemStoreError> {
        let mut components = Path::new(slug).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(slug)),
            _ => Err(ProblemStoreError::NotFound(slug.to_string())),
        }
    }
}

#[async_trait]
impl ProblemStore for FilesystemProblemStore {
    async fn load(
        &self,
        slug: &str,
        language: Language,
    ) -> Result<ProblemData, ProblemStoreError> {
        let dir = self.problem_dir(slug)?;
        if !fs::try_exists(&dir).await? {
            return Err(ProblemStoreError::NotFound(slug.to_string()));
        }

        let template_path = dir
            .join("full-boilerplate")
            .join(format!("function.{}", language.extension()));
        let template = match fs::read_to_string(&template_path).await {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProblemStoreError::MissingTemplate {
                    slug: slug.to_string(),
                    language,
                });
            }
            Err(e) => return Err(e.into()),
        };
        if !template.contains(CODE_PLACEHOLDER) {
            return Err(ProblemStoreError::MissingPlaceholder(slug.to_string()));
        }

        let names = list_case_files(&dir.join("inputs")).await?;
        if names.is_empty() {
            return Err(ProblemStoreError::NoTestCases(slug.to_string()));
        }

        let mut cases = Vec::with_capacity(names.len());
        for name in names {
            let input = fs::read_to_string(dir.join("inputs").join(&name)).await?;
            let expected_output = match fs::read_to_string(dir.join("outputs").join(&name)).await
            {
                Ok(o) => o,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(ProblemStoreError::MissingOutput {
                        slug: slug.to_string(),
                        file: name,
                    });
                }
                Err(e) => return Err(e.into()),
            };
            cases.push(ProblemCase {
                input,
                expected_output,
            });
        }

        Ok(ProblemData { template, cases })
    }
}

/// File names in `dir`, numeric stems first in numeric order, then the rest lexically.
async fn list_case_files(dir: &Path) -> Result<Vec<String>, ProblemStoreError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }

    names.sort_by_key(|name| sort_key(name));
    Ok(names)
}

fn sort_key(name: &str) -> (bool, u64, String) {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    match stem.parse::<u64>() {
        Ok(n) => (false, n, name.to_string()),
        Err(_) => (true, 0, name.to_string()),
    }
}
