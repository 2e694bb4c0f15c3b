//! Artifact operations
//!
//! [`ArtifactStore`] is the trusted boundary for the artifact tree: the
//! only component that reads or writes files. Operations validate first,
//! resolve locations second, and touch the filesystem last, so a failure
//! before the final write leaves no trace.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use scribe_document::{normalize, MergeMode, SectionDocument};

use crate::config::{KindConfig, StoreConfig};
use crate::error::{LayoutError, StoreError};
use crate::id::ArtifactId;
use crate::layout::{artifact_rel_path, slugify, SequenceGroup};
use crate::render::{SectionRenderer, PREAMBLE_SECTION};
use crate::scan;

/// Outcome of a successful CREATE
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedArtifact {
    /// Allocated id
    pub id: ArtifactId,
    /// Absolute path of the written file
    pub path: PathBuf,
}

/// Structured result of a RETRIEVE
///
/// Section bodies are the original markdown content as stored, not
/// re-rendered; the caller can serialize the whole struct as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievedArtifact {
    /// Artifact id
    pub id: ArtifactId,
    /// Path the artifact was read from
    pub path: PathBuf,
    /// Unheaded leading content, if any
    pub preamble: Option<String>,
    /// Section key → body, in document order
    pub sections: IndexMap<String, String>,
}

/// One artifact found by a LIST scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRef {
    /// Artifact id
    pub id: ArtifactId,
    /// Filename slug (cosmetic)
    pub slug: String,
    /// Status directory the artifact currently lives under
    pub status: String,
    /// Sequence group, when the artifact is grouped
    pub sequence: Option<SequenceGroup>,
    /// Assignee directory
    pub assignee: String,
    /// Absolute path
    pub path: PathBuf,
}

/// Filesystem-backed store for one project's artifact tree
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    config: StoreConfig,
}

impl ArtifactStore {
    /// Create a store over a project root with explicit configuration
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Project root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create a new artifact
    ///
    /// Validates against the kind's full schema before any filesystem
    /// effect, allocates a fresh id (identical data on a later call never
    /// reuses one), renders the preamble and each configured section
    /// through the normalizer, and writes the serialized document
    /// atomically.
    ///
    /// # Errors
    /// [`StoreError::Validation`] on schema violations,
    /// [`StoreError::UnknownKind`] for unconfigured kinds, and
    /// [`StoreError::Io`] on filesystem failures.
    pub fn create(
        &self,
        kind: &str,
        data: &Map<String, Value>,
        actor: &str,
        renderer: &dyn SectionRenderer,
    ) -> Result<CreatedArtifact, StoreError> {
        let kc = self.kind(kind)?;
        kc.schema.validate(data)?;

        let id = self.allocate_id(kind)?;
        let title = data
            .get(&kc.title_field)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let slug = slugify(title);
        let sequence = sequence_group(kc, data)?;
        let assignee = data
            .get(&kc.assignee_field)
            .and_then(Value::as_str)
            .unwrap_or(actor);

        let rel = artifact_rel_path(&kc.default_status, sequence.as_ref(), assignee, id, &slug);
        let path = self.collection_root(kc).join(rel);

        let render_data = with_id(data, id);
        let mut doc = SectionDocument::new();
        doc.set_preamble(&normalize(
            &renderer.render(kind, PREAMBLE_SECTION, &render_data),
        ));
        for section in &kc.sections {
            let body = normalize(&renderer.render(kind, &section.key, &render_data));
            doc.merge(&section.heading, &body, MergeMode::Replace);
        }

        write_atomic(&path, &doc.serialize())?;
        tracing::info!("created {kind} {id} at {} (actor: {actor})", path.display());
        Ok(CreatedArtifact { id, path })
    }

    /// Update one section of an existing artifact
    ///
    /// Validates against the partial schema for `section_key`, locates the
    /// artifact by id, merges the newly rendered section text, and rewrites
    /// the file atomically in place. Other sections' bodies are
    /// byte-identical afterward, modulo the single-blank-line joins.
    ///
    /// # Errors
    /// [`StoreError::Validation`], [`StoreError::NotFound`] (including a
    /// file that vanished between locate and read),
    /// [`StoreError::AmbiguousId`], and [`StoreError::Io`].
    pub fn update(
        &self,
        kind: &str,
        id: ArtifactId,
        data: &Map<String, Value>,
        section_key: &str,
        mode: MergeMode,
        actor: &str,
        renderer: &dyn SectionRenderer,
    ) -> Result<PathBuf, StoreError> {
        let kc = self.kind(kind)?;
        kc.schema.partial(section_key).validate(data)?;

        let path = self.locate(kind, id)?;
        let text = read_artifact(kind, id, &path)?;
        let mut doc = SectionDocument::parse(&text);

        let render_data = with_id(data, id);
        let body = normalize(&renderer.render(kind, section_key, &render_data));
        doc.merge(kc.section_heading(section_key), &body, mode);

        write_atomic(&path, &doc.serialize())?;
        tracing::info!(
            "updated {kind} {id} section '{section_key}' at {} (actor: {actor})",
            path.display()
        );
        Ok(path)
    }

    /// Retrieve an artifact as structured sections
    ///
    /// # Errors
    /// [`StoreError::NotFound`], [`StoreError::AmbiguousId`], and
    /// [`StoreError::Io`].
    pub fn retrieve(
        &self,
        kind: &str,
        id: ArtifactId,
        actor: &str,
    ) -> Result<RetrievedArtifact, StoreError> {
        let path = self.locate(kind, id)?;
        let text = read_artifact(kind, id, &path)?;
        let doc = SectionDocument::parse(&text);
        tracing::debug!("retrieved {kind} {id} for {actor}");
        Ok(RetrievedArtifact {
            id,
            path,
            preamble: doc.preamble().map(str::to_string),
            sections: doc.to_map(),
        })
    }

    /// Enumerate every artifact of a kind, sorted by id
    ///
    /// Walks the whole collection root; files without a well-formed leading
    /// id token and directories outside the
    /// `status[/S<NN>-<label>]/assignee` shape are passed over.
    ///
    /// # Errors
    /// [`StoreError::UnknownKind`] and [`StoreError::Io`].
    pub fn list(&self, kind: &str) -> Result<Vec<ArtifactRef>, StoreError> {
        let kc = self.kind(kind)?;
        let root = self.collection_root(kc);
        let mut refs = Vec::new();

        for path in scan::markdown_files(&root)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(id) = ArtifactId::from_file_name(name) else {
                continue;
            };
            let Ok(rel) = path.strip_prefix(&root) else {
                continue;
            };
            let comps: Vec<&str> = rel.iter().filter_map(|c| c.to_str()).collect();
            let (status, sequence, assignee) = match comps.as_slice() {
                [status, assignee, _file] => (*status, None, *assignee),
                [status, seq, assignee, _file] => match SequenceGroup::from_segment(seq) {
                    Some(group) => (*status, Some(group), *assignee),
                    None => continue,
                },
                _ => continue,
            };
            let stem = name.strip_suffix(".md").unwrap_or(name);
            let slug = stem
                .strip_prefix(&format!("{id}-"))
                .unwrap_or_default()
                .to_string();
            refs.push(ArtifactRef {
                id,
                slug,
                status: status.to_string(),
                sequence,
                assignee: assignee.to_string(),
                path,
            });
        }

        refs.sort_by_key(|r| r.id);
        Ok(refs)
    }

    /// Allocate the next id for a kind
    ///
    /// Tree-wide: scans every status directory of the kind's collection
    /// root, so artifacts moved between statuses keep the numbering intact.
    /// Returns `T1` for an empty (or not yet created) collection.
    ///
    /// # Errors
    /// [`StoreError::UnknownKind`] and [`StoreError::Io`].
    pub fn allocate_id(&self, kind: &str) -> Result<ArtifactId, StoreError> {
        let kc = self.kind(kind)?;
        let max = scan::markdown_files(&self.collection_root(kc))?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .filter_map(ArtifactId::from_file_name)
            .max();
        let id = max.map_or_else(ArtifactId::first, ArtifactId::next);
        tracing::debug!("allocated {id} for kind {kind}");
        Ok(id)
    }

    /// Find the single file holding an artifact
    ///
    /// Matching is boundary-aware (`T1` never matches `T10-…`). Zero
    /// matches fail; more than one match means a corrupted or hand-edited
    /// tree and fails rather than picking silently.
    ///
    /// # Errors
    /// [`StoreError::NotFound`], [`StoreError::AmbiguousId`],
    /// [`StoreError::UnknownKind`], and [`StoreError::Io`].
    pub fn locate(&self, kind: &str, id: ArtifactId) -> Result<PathBuf, StoreError> {
        let kc = self.kind(kind)?;
        let mut matches: Vec<PathBuf> = scan::markdown_files(&self.collection_root(kc))?
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(ArtifactId::from_file_name)
                    == Some(id)
            })
            .collect();
        match matches.len() {
            0 => Err(StoreError::NotFound {
                kind: kind.to_string(),
                id,
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(StoreError::AmbiguousId { id, matches }),
        }
    }

    fn kind(&self, name: &str) -> Result<&KindConfig, StoreError> {
        self.config
            .kind(name)
            .ok_or_else(|| StoreError::UnknownKind(name.to_string()))
    }

    fn collection_root(&self, kc: &KindConfig) -> PathBuf {
        self.root.join(&kc.collection_dir)
    }
}

/// Build the sequence group from the kind's configured data fields
///
/// Presence is both-or-neither by the time this runs: the schema's
/// dependency group rejected partial submissions during validation.
fn sequence_group(
    kc: &KindConfig,
    data: &Map<String, Value>,
) -> Result<Option<SequenceGroup>, StoreError> {
    let Some(fields) = &kc.sequence else {
        return Ok(None);
    };
    let number = data.get(&fields.number_field).and_then(Value::as_u64);
    let label = data.get(&fields.label_field).and_then(Value::as_str);
    match (number, label) {
        (Some(n), Some(label)) => {
            let n = u32::try_from(n).map_err(|_| LayoutError::InvalidSequenceNumber(n))?;
            Ok(Some(SequenceGroup::new(n, label)?))
        }
        _ => Ok(None),
    }
}

/// Submitted data plus the allocated id, for template consumption
fn with_id(data: &Map<String, Value>, id: ArtifactId) -> Map<String, Value> {
    let mut render_data = data.clone();
    render_data.insert("id".to_string(), Value::String(id.to_string()));
    render_data
}

fn read_artifact(kind: &str, id: ArtifactId, path: &Path) -> Result<String, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
            kind: kind.to_string(),
            id,
        }),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Write a file atomically: temp file in the target directory, fsync, then
/// rename into place
///
/// Intermediate directories are created idempotently first. On any failure
/// the temp file is dropped and removed, so a partial or truncated artifact
/// is never observable; at worst an empty directory remains.
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let parent = path.parent().ok_or_else(|| {
        StoreError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no parent"),
        )
    })?;
    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/T1-x.md");
        write_atomic(&path, "content\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content\n");
    }

    #[test]
    fn write_atomic_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T1-x.md");
        write_atomic(&path, "first\n").unwrap();
        write_atomic(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn write_atomic_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T1-x.md");
        write_atomic(&path, "content\n").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
