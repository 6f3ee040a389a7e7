//! File-backed training: a thin, fallible wrapper around [`Model::train_line`]
//! for corpora that live on disk.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::EngineResult;
use crate::model::Model;

/// Train `model` over every line of the file at `path`. Empty lines are
/// skipped; everything else is handed to [`Model::train_line`] as-is.
///
/// The only failure mode is I/O: the file cannot be opened, or a line cannot
/// be read.
pub fn train_from_file(model: &mut Model, path: &Path) -> EngineResult<()> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines_read = 0u64;
    let mut lines_trained = 0u64;

    for line in reader.lines() {
        let line = line?;
        lines_read += 1;
        if line.is_empty() {
            continue;
        }
        model.train_line(&line);
        lines_trained += 1;
        if lines_trained % 10_000 == 0 {
            debug!(lines_trained, "training in progress");
        }
    }

    info!(
        path = %path.display(),
        lines_read,
        lines_trained,
        vocab_size = model.vocab_size(),
        total_tokens = model.total_tokens(),
        "corpus training complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trains_over_every_nonempty_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "a b c").unwrap();
            writeln!(f).unwrap();
            writeln!(f, "a b d").unwrap();
        }

        let mut model = Model::new(3);
        train_from_file(&mut model, &path).unwrap();

        assert_eq!(model.total_tokens(), 6);
        let a = model.vocab().get("a");
        assert_eq!(model.trie().count(&[a], 1), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut model = Model::new(3);
        let err = train_from_file(&mut model, Path::new("/nonexistent/corpus.txt")).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Io(_)));
    }
}
