use anyhow::anyhow;

use super::*;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub sections: PathBuf,
    pub keywords: PathBuf,
    pub links: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            sections: output_dir.join(SECTIONS_FILE_NAME),
            keywords: output_dir.join(KEYWORDS_FILE_NAME),
            links: output_dir.join(LINKS_FILE_NAME),
        }
    }

    pub fn targets(&self) -> [&Path; 3] {
        [
            self.sections.as_path(),
            self.keywords.as_path(),
            self.links.as_path(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source_file: String,
    pub source_sha256: String,
    pub encoding: String,
}

#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub sections: SectionsFile,
    pub keywords: KeywordsFile,
    pub links: LinksFile,
}

pub fn build_output_files(assembly: Assembly, source: SourceInfo, processed_at: &str) -> OutputFiles {
    let total_sections = assembly.sections.len();
    let total_keywords = assembly.keywords.len();
    let total_connections = assembly.links.len();

    OutputFiles {
        sections: SectionsFile {
            sections: assembly.sections,
            metadata: SectionsMetadata {
                source_file: source.source_file,
                source_sha256: source.source_sha256,
                encoding: source.encoding,
                processed_at: processed_at.to_string(),
                total_sections,
            },
        },
        keywords: KeywordsFile {
            keywords: assembly.keywords,
            metadata: KeywordsMetadata {
                total_keywords,
                processed_at: processed_at.to_string(),
            },
        },
        links: LinksFile {
            connections: assembly.links,
            metadata: LinksMetadata {
                total_connections,
                processed_at: processed_at.to_string(),
            },
        },
    }
}

/// Writes all three outputs or none of them.
///
/// Each file is staged next to its target first. Existing targets are then
/// moved aside, the staged files moved in, and the previous files dropped.
/// Any failure rolls back to the previous outputs and removes staged files.
pub fn write_outputs(
    paths: &OutputPaths,
    files: &OutputFiles,
) -> std::result::Result<(), ExtractError> {
    let targets = paths.targets();

    if let Some(target) = targets.iter().find(|target| target.is_dir()) {
        return Err(write_error(
            target,
            anyhow!("output path is a directory"),
        ));
    }

    let staged = [
        stage(targets[0], &files.sections),
        stage(targets[1], &files.keywords),
        stage(targets[2], &files.links),
    ];
    for (target, result) in targets.iter().zip(staged) {
        if let Err(source) = result {
            discard_staged(&targets);
            return Err(write_error(target, source));
        }
    }

    let mut moved_aside = Vec::<&Path>::new();
    for target in targets {
        if !target.exists() {
            continue;
        }
        if let Err(error) = fs::rename(target, backup_path(target)) {
            restore_previous(&moved_aside);
            discard_staged(&targets);
            return Err(write_error(
                target,
                anyhow::Error::new(error).context("failed to move previous output aside"),
            ));
        }
        moved_aside.push(target);
    }

    let mut placed = Vec::<&Path>::new();
    for target in targets {
        if let Err(error) = fs::rename(staging_path(target), target) {
            for placed_target in &placed {
                let _ = fs::remove_file(placed_target);
            }
            restore_previous(&moved_aside);
            discard_staged(&targets);
            return Err(write_error(
                target,
                anyhow::Error::new(error).context("failed to move staged output into place"),
            ));
        }
        placed.push(target);
    }

    for target in moved_aside {
        if let Err(error) = fs::remove_file(backup_path(target)) {
            warn!(path = %target.display(), error = %error, "failed to remove previous output");
        }
    }

    Ok(())
}

fn write_error(target: &Path, source: anyhow::Error) -> ExtractError {
    ExtractError::Serialization {
        path: target.to_path_buf(),
        source,
    }
}

fn restore_previous(moved_aside: &[&Path]) {
    for target in moved_aside {
        if let Err(error) = fs::rename(backup_path(target), target) {
            warn!(path = %target.display(), error = %error, "failed to restore previous output");
        }
    }
}

fn discard_staged(targets: &[&Path]) {
    for target in targets {
        let _ = fs::remove_file(staging_path(target));
    }
}

fn stage<T: serde::Serialize>(target: &Path, value: &T) -> Result<()> {
    write_json_pretty(&staging_path(target), value)
}
