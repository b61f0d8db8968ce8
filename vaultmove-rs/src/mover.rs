//! Sequential move phase.
//!
//! Notes are moved one at a time, each preceded by its attachments. Several
//! notes may share an attachment: whichever note comes first moves it and the
//! others find it gone and skip it. Running this phase on a single thread is
//! what makes that existence check safe without locking.

use crate::error::{Result, VaultError};
use crate::note::NoteRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for a move run.
#[derive(Debug, Clone)]
pub struct MoveOptions {
    /// Directory receiving notes and attachments.
    pub destination: PathBuf,
    /// Plan only; touch nothing.
    pub dry_run: bool,
    /// Create the destination if it does not exist.
    pub create_destination: bool,
}

/// What an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Note,
    Attachment,
}

/// What happened to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Moved,
    /// Would be moved (dry run).
    Planned,
    /// Already at the destination.
    InPlace,
    /// Gone before its turn, typically moved with an earlier note.
    SkippedMissing,
    /// The destination already holds a file of that name.
    SkippedConflict,
}

/// One processed item.
#[derive(Debug, Clone, Serialize)]
pub struct MoveItem {
    pub kind: ItemKind,
    pub from: PathBuf,
    pub to: PathBuf,
    pub status: ItemStatus,
}

/// One item that failed to move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveFailure {
    pub kind: ItemKind,
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a move run.
#[derive(Debug, Default, Serialize)]
pub struct MoveReport {
    pub dry_run: bool,
    pub destination: PathBuf,
    pub moved_notes: usize,
    pub moved_attachments: usize,
    pub skipped_missing: usize,
    pub skipped_conflicts: usize,
    pub items: Vec<MoveItem>,
    pub errors: Vec<MoveFailure>,
}

impl MoveReport {
    /// Whether any item failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Move notes and their attachments into the destination.
///
/// Per-item failures are collected in the report and never stop the queue.
/// Only an unusable destination is fatal.
pub fn execute(notes: &[NoteRecord], options: &MoveOptions) -> Result<MoveReport> {
    let destination = prepare_destination(options)?;
    let mut run = Run {
        report: MoveReport {
            dry_run: options.dry_run,
            destination: destination.clone(),
            ..MoveReport::default()
        },
        destination,
        dry_run: options.dry_run,
        gone: HashSet::new(),
        claimed: HashSet::new(),
    };

    for (i, note) in notes.iter().enumerate() {
        for attachment in &note.attachments {
            run.attachment(attachment);
        }
        run.note(note, i + 1);
    }

    let report = run.report;
    info!(
        "moved {} notes and {} attachments ({} errors)",
        report.moved_notes,
        report.moved_attachments,
        report.errors.len()
    );
    Ok(report)
}

fn prepare_destination(options: &MoveOptions) -> Result<PathBuf> {
    let dest = &options.destination;
    if dest.exists() {
        if !dest.is_dir() {
            return Err(VaultError::DestinationInvalid(dest.clone()));
        }
        return Ok(dest.canonicalize()?);
    }
    if !options.create_destination {
        return Err(VaultError::DestinationMissing(dest.clone()));
    }
    if !options.dry_run {
        fs::create_dir_all(dest)?;
        return Ok(dest.canonicalize()?);
    }
    Ok(dest.clone())
}

struct Run {
    report: MoveReport,
    destination: PathBuf,
    dry_run: bool,
    /// Sources already moved (or planned) this run.
    gone: HashSet<PathBuf>,
    /// Destinations already taken this run.
    claimed: HashSet<PathBuf>,
}

impl Run {
    fn attachment(&mut self, source: &Path) {
        if self.gone.contains(source) || !source.exists() {
            debug!("attachment already gone: {}", source.display());
            self.report.skipped_missing += 1;
            self.record(ItemKind::Attachment, source, source, ItemStatus::SkippedMissing);
            return;
        }

        let Some(name) = source.file_name() else {
            return;
        };
        let target = self.destination.join(name);

        if target == source {
            self.record(ItemKind::Attachment, source, &target, ItemStatus::InPlace);
            return;
        }
        if self.is_taken(&target) {
            warn!(
                "not moving {}: {} already exists",
                source.display(),
                target.display()
            );
            self.report.skipped_conflicts += 1;
            self.record(ItemKind::Attachment, source, &target, ItemStatus::SkippedConflict);
            return;
        }

        if self.transfer(ItemKind::Attachment, source, &target) {
            self.report.moved_attachments += 1;
        }
    }

    fn note(&mut self, note: &NoteRecord, position: usize) {
        let Some(name) = note.path.file_name() else {
            return;
        };
        let mut target = self.destination.join(name);

        if target == note.path {
            self.record(ItemKind::Note, &note.path, &target, ItemStatus::InPlace);
            return;
        }
        if self.is_taken(&target) {
            target = self.numbered(&note.path, position);
        }

        if self.transfer(ItemKind::Note, &note.path, &target) {
            self.report.moved_notes += 1;
        }
    }

    /// First free `<stem>_<n><.ext>` in the destination, starting at `n = start`.
    fn numbered(&self, source: &Path, start: usize) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        (start..)
            .map(|n| self.destination.join(format!("{}_{}{}", stem, n, ext)))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_else(|| self.destination.join(format!("{}_{}{}", stem, start, ext)))
    }

    fn is_taken(&self, target: &Path) -> bool {
        self.claimed.contains(target) || (target.exists() && !self.gone.contains(target))
    }

    /// Move or plan one item; returns whether it counts as moved.
    fn transfer(&mut self, kind: ItemKind, source: &Path, target: &Path) -> bool {
        if self.dry_run {
            self.settle(source, target);
            self.record(kind, source, target, ItemStatus::Planned);
            return true;
        }

        match move_file(source, target) {
            Ok(()) => {
                debug!("moved {} -> {}", source.display(), target.display());
                self.settle(source, target);
                self.record(kind, source, target, ItemStatus::Moved);
                true
            }
            Err(e) => {
                let err = VaultError::MoveFailed {
                    path: source.to_path_buf(),
                    source: e,
                };
                warn!("{}", err);
                self.report.errors.push(MoveFailure {
                    kind,
                    path: source.to_path_buf(),
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn settle(&mut self, source: &Path, target: &Path) {
        self.gone.insert(source.to_path_buf());
        self.gone.remove(target);
        self.claimed.insert(target.to_path_buf());
    }

    fn record(&mut self, kind: ItemKind, from: &Path, to: &Path, status: ItemStatus) {
        self.report.items.push(MoveItem {
            kind,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            status,
        });
    }
}

/// Move a file, copying and deleting when a rename would cross filesystems.
pub fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, target)?;
            fs::remove_file(source)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        root: PathBuf,
        dest: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap().join("vault");
        let dest = dir.path().canonicalize().unwrap().join("inbox");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&dest).unwrap();
        Fixture { _dir: dir, root, dest }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn record(path: PathBuf, attachments: Vec<PathBuf>) -> NoteRecord {
        NoteRecord {
            dir: path.parent().unwrap().to_path_buf(),
            size: fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            path,
            content: String::new(),
            matched_tags: BTreeSet::from(["ready".to_string()]),
            attachments,
        }
    }

    fn options(dest: &Path) -> MoveOptions {
        MoveOptions {
            destination: dest.to_path_buf(),
            dry_run: false,
            create_destination: false,
        }
    }

    #[test]
    fn test_moves_note_and_attachment() {
        let f = fixture();
        let note = f.root.join("a/n.md");
        let img = f.root.join("a/img.png");
        write(&note, "#ready ![[img.png]]");
        write(&img, "png");

        let report = execute(&[record(note.clone(), vec![img.clone()])], &options(&f.dest)).unwrap();

        assert_eq!(report.moved_notes, 1);
        assert_eq!(report.moved_attachments, 1);
        assert!(!report.has_errors());
        assert!(!note.exists());
        assert!(!img.exists());
        assert!(f.dest.join("n.md").exists());
        assert!(f.dest.join("img.png").exists());
    }

    #[test]
    fn test_shared_attachment_moved_once() {
        let f = fixture();
        let shared = f.root.join("shared.png");
        let a = f.root.join("a.md");
        let b = f.root.join("b.md");
        write(&shared, "png");
        write(&a, "#ready ![[shared.png]]");
        write(&b, "#ready ![[shared.png]]");

        let notes = vec![
            record(a, vec![shared.clone()]),
            record(b, vec![shared.clone()]),
        ];
        let report = execute(&notes, &options(&f.dest)).unwrap();

        assert_eq!(report.moved_notes, 2);
        assert_eq!(report.moved_attachments, 1);
        assert_eq!(report.skipped_missing, 1);
        assert!(report.errors.is_empty());
        assert!(f.dest.join("shared.png").exists());
    }

    #[test]
    fn test_note_name_collision_gets_suffix() {
        let f = fixture();
        let first = f.root.join("x/note.md");
        let second = f.root.join("y/note.md");
        write(&first, "#ready one");
        write(&second, "#ready two");

        let notes = vec![record(first, vec![]), record(second, vec![])];
        let report = execute(&notes, &options(&f.dest)).unwrap();

        assert_eq!(report.moved_notes, 2);
        assert_eq!(fs::read_to_string(f.dest.join("note.md")).unwrap(), "#ready one");
        assert_eq!(fs::read_to_string(f.dest.join("note_2.md")).unwrap(), "#ready two");
    }

    #[test]
    fn test_suffix_skips_taken_numbers() {
        let f = fixture();
        write(&f.dest.join("note.md"), "old");
        write(&f.dest.join("note_1.md"), "older");
        let note = f.root.join("note.md");
        write(&note, "#ready new");

        let report = execute(&[record(note, vec![])], &options(&f.dest)).unwrap();
        assert_eq!(report.moved_notes, 1);
        assert_eq!(fs::read_to_string(f.dest.join("note_2.md")).unwrap(), "#ready new");
    }

    #[test]
    fn test_attachment_conflict_left_in_place() {
        let f = fixture();
        write(&f.dest.join("img.png"), "other");
        let note = f.root.join("n.md");
        let img = f.root.join("img.png");
        write(&note, "#ready");
        write(&img, "mine");

        let report = execute(&[record(note, vec![img.clone()])], &options(&f.dest)).unwrap();
        assert_eq!(report.skipped_conflicts, 1);
        assert_eq!(report.moved_attachments, 0);
        assert!(img.exists());
        assert_eq!(fs::read_to_string(f.dest.join("img.png")).unwrap(), "other");
    }

    #[test]
    fn test_failure_does_not_abort_queue() {
        let f = fixture();
        let vanished = f.root.join("vanished.md");
        let ok = f.root.join("ok.md");
        write(&ok, "#ready");

        let notes = vec![
            NoteRecord {
                dir: f.root.clone(),
                path: vanished,
                content: String::new(),
                matched_tags: BTreeSet::from(["ready".to_string()]),
                attachments: vec![],
                size: 0,
            },
            record(ok, vec![]),
        ];
        let report = execute(&notes, &options(&f.dest)).unwrap();

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ItemKind::Note);
        assert_eq!(report.moved_notes, 1);
        assert!(f.dest.join("ok.md").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let f = fixture();
        let shared = f.root.join("shared.png");
        let a = f.root.join("a/note.md");
        let b = f.root.join("b/note.md");
        write(&shared, "png");
        write(&a, "#ready");
        write(&b, "#ready");

        let notes = vec![
            record(a.clone(), vec![shared.clone()]),
            record(b.clone(), vec![shared.clone()]),
        ];
        let report = execute(&notes, &MoveOptions { dry_run: true, ..options(&f.dest) }).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.moved_notes, 2);
        assert_eq!(report.moved_attachments, 1);
        assert_eq!(report.skipped_missing, 1);
        let planned: Vec<&PathBuf> = report
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Note)
            .map(|i| &i.to)
            .collect();
        assert_eq!(planned, vec![&f.dest.join("note.md"), &f.dest.join("note_2.md")]);
        assert!(a.exists() && b.exists() && shared.exists());
        assert!(!f.dest.join("note.md").exists());
    }

    #[test]
    fn test_destination_checks() {
        let f = fixture();
        let file = f.root.join("file.txt");
        write(&file, "x");
        assert!(matches!(
            execute(&[], &options(&file)),
            Err(VaultError::DestinationInvalid(_))
        ));

        let missing = f.root.join("new/inbox");
        assert!(matches!(
            execute(&[], &options(&missing)),
            Err(VaultError::DestinationMissing(_))
        ));

        let create = MoveOptions { create_destination: true, ..options(&missing) };
        execute(&[], &create).unwrap();
        assert!(missing.is_dir());
    }

    #[test]
    fn test_note_already_in_destination() {
        let f = fixture();
        let note = f.dest.join("n.md");
        write(&note, "#ready");

        let report = execute(&[record(note.clone(), vec![])], &options(&f.dest)).unwrap();
        assert_eq!(report.moved_notes, 0);
        assert_eq!(report.items[0].status, ItemStatus::InPlace);
        assert!(note.exists());
    }
}
