//! Write the preamble and body files from the current source.

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::domain::ports::{EventSink, FileSystem, FileVerb, PipelineEvent};
use crate::domain::services::SplitArtifacts;
use crate::error::{FsOp, SplitError, TexfastError, TexfastResult};

use super::session::Session;

/// Editors may truncate the file before writing it back.
pub const READ_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Read the source, retrying once if it is empty or unreadable.
pub fn read_source<F: FileSystem>(fs: &F, path: &Path) -> TexfastResult<Vec<u8>> {
    for attempt in 0..2 {
        match fs.read(path) {
            Ok(content) if !content.is_empty() => return Ok(content),
            Ok(_) => tracing::debug!(attempt, "source is empty"),
            Err(err) => tracing::debug!(attempt, %err, "source unreadable"),
        }
        if attempt == 0 {
            thread::sleep(READ_RETRY_DELAY);
        }
    }
    Err(TexfastError::Split {
        path: path.to_path_buf(),
        source: SplitError::EmptyOrUnreadable {
            path: path.to_path_buf(),
        },
    })
}

/// Split the source into `<job>.preamble.tex` and `<job>.body.tex`.
///
/// Does nothing when the session compiles the whole document.
pub fn split_source<F: FileSystem>(
    session: &Session,
    fs: &F,
    sink: &dyn EventSink,
) -> TexfastResult<Option<SplitArtifacts>> {
    let Some(splitter) = session.splitter() else {
        return Ok(None);
    };
    let names = session.names();
    let source_path = names.source_path();

    let source = read_source(fs, &source_path)?;
    let artifacts = splitter
        .split(&source, names.job())
        .map_err(|source| TexfastError::Split {
            path: source_path.clone(),
            source,
        })?;

    for (file, content) in [
        (names.preamble_file(), &artifacts.preamble),
        (names.body_file(), &artifacts.body),
    ] {
        let path = names.in_dir(&file);
        fs.write(&path, content)
            .map_err(|e| TexfastError::fs(FsOp::WriteSplit, e))?;
        sink.on_event(PipelineEvent::FileAction {
            verb: FileVerb::Create,
            path: path.display().to_string(),
            target: None,
        });
    }

    Ok(Some(artifacts))
}
