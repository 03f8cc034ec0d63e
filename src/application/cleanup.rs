//! End-of-run cleanup

use std::path::Path;

use crate::domain::ports::{EventSink, FileSystem, FileVerb, PipelineEvent};
use crate::error::{FsOp, TexfastError};

use super::session::Session;

/// Remove intermediate files. Failures are reported and returned.
///
/// Split files (and the safe-named source copy, when this run made it)
/// are kept in debug mode.
/// Auxiliary files are removed only when the session must clear.
pub fn cleanup<F: FileSystem>(session: &Session, fs: &F, sink: &dyn EventSink) -> Vec<TexfastError> {
    let names = session.names();
    let config = session.config();
    let mut candidates = Vec::new();

    if config.must_clear() {
        candidates.extend(
            config
                .clear
                .aux_extensions
                .iter()
                .map(|ext| ext.trim())
                .filter(|ext| !ext.is_empty())
                .map(|ext| names.out_path(ext)),
        );
    }

    if config.info.is_debug() {
        sink.on_event(PipelineEvent::info(format!(
            "Do not clear {} and {}.",
            names.preamble_file(),
            names.body_file()
        )));
    } else {
        candidates.push(names.in_dir(&names.preamble_file()));
        candidates.push(names.in_dir(&names.body_file()));
        if session.owns_source_copy() {
            candidates.push(names.in_dir(&names.job_source_file()));
        }
    }

    candidates
        .iter()
        .filter_map(|path| remove_if_present(fs, sink, path).err())
        .collect()
}

fn remove_if_present<F: FileSystem>(
    fs: &F,
    sink: &dyn EventSink,
    path: &Path,
) -> Result<(), TexfastError> {
    if !fs.exists(path) {
        return Ok(());
    }
    match fs.remove(path) {
        Ok(()) => {
            sink.on_event(PipelineEvent::FileAction {
                verb: FileVerb::Remove,
                path: path.display().to_string(),
                target: None,
            });
            Ok(())
        }
        Err(e) => {
            let err = TexfastError::fs(FsOp::Cleanup, e);
            sink.on_event(PipelineEvent::error(err.to_string()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{write_source, RecordingSink};
    use crate::config::Config;
    use crate::domain::value_objects::{ClearMode, Distro, InfoLevel};
    use crate::infrastructure::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "x").unwrap();
        }
    }

    #[test]
    fn removes_split_files_and_aux_when_clearing() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "doc.tex", "x");
        let mut config = Config::default();
        config.clear.mode = ClearMode::Yes;
        let session = Session::new(config, &source, Distro::TexLive).unwrap();
        touch(
            dir.path(),
            &["doc.preamble.tex", "doc.body.tex", "doc.aux", "doc.fmt", "doc.pdf"],
        );

        let errors = cleanup(&session, &LocalFs, &RecordingSink::default());

        assert!(errors.is_empty());
        for gone in ["doc.preamble.tex", "doc.body.tex", "doc.aux", "doc.fmt"] {
            assert!(!dir.path().join(gone).exists(), "{gone} should be removed");
        }
        assert!(dir.path().join("doc.pdf").exists());
        assert!(dir.path().join("doc.tex").exists());
    }

    #[test]
    fn keeps_aux_without_clear() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "doc.tex", "x");
        let mut config = Config::default();
        config.clear.mode = ClearMode::No;
        let session = Session::new(config, &source, Distro::TexLive).unwrap();
        touch(dir.path(), &["doc.body.tex", "doc.fmt"]);

        cleanup(&session, &LocalFs, &RecordingSink::default());

        assert!(dir.path().join("doc.fmt").exists());
        assert!(!dir.path().join("doc.body.tex").exists());
    }

    #[test]
    fn debug_keeps_everything() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "doc.tex", "x");
        let mut config = Config::default();
        config.info = InfoLevel::Debug;
        config.clear.mode = ClearMode::Yes;
        let session = Session::new(config, &source, Distro::TexLive).unwrap();
        touch(dir.path(), &["doc.body.tex", "doc.fmt"]);
        let sink = RecordingSink::default();

        cleanup(&session, &LocalFs, &sink);

        assert!(dir.path().join("doc.fmt").exists());
        assert!(dir.path().join("doc.body.tex").exists());
        assert_eq!(sink.messages(), vec!["Do not clear doc.preamble.tex and doc.body.tex."]);
    }

    #[test]
    fn removes_normalized_source_copy_made_by_the_run() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "ma thèse.tex", "x");
        let session = Session::new(Config::default(), &source, Distro::TexLive).unwrap();
        touch(dir.path(), &["mathese.tex"]);
        session.mark_source_copy();

        cleanup(&session, &LocalFs, &RecordingSink::default());

        assert!(!dir.path().join("mathese.tex").exists());
        assert!(dir.path().join("ma thèse.tex").exists());
    }

    #[test]
    fn keeps_unrelated_file_named_like_the_job() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "ma thèse.tex", "x");
        let session = Session::new(Config::default(), &source, Distro::TexLive).unwrap();
        touch(dir.path(), &["mathese.tex"]);

        let errors = cleanup(&session, &LocalFs, &RecordingSink::default());

        assert!(errors.is_empty());
        assert!(dir.path().join("mathese.tex").exists());
    }
}
