//! Binary persistence: little-endian, untagged, four files per model prefix.
//!
//! No magic bytes, no version byte, no checksum — the caller is expected to
//! keep a prefix's four files together and load them at the order they were
//! saved with. Short or truncated reads surface as
//! [`crate::error::EngineError::Io`] via [`std::io::Read::read_exact`]'s own
//! `UnexpectedEof`, rather than silently producing a corrupt model.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::EngineResult;
use crate::model::Model;
use crate::vocab::{TokenId, Vocabulary};

fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn vocab_path(prefix: &Path) -> std::path::PathBuf {
    with_extension(prefix, "vocab")
}

fn uni_path(prefix: &Path) -> std::path::PathBuf {
    with_extension(prefix, "uni")
}

fn bi_path(prefix: &Path) -> std::path::PathBuf {
    with_extension(prefix, "bi")
}

fn tri_path(prefix: &Path) -> std::path::PathBuf {
    with_extension(prefix, "tri")
}

fn with_extension(prefix: &Path, ext: &str) -> std::path::PathBuf {
    let mut os = prefix.as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    std::path::PathBuf::from(os)
}

/// Save `model` to `<prefix>.vocab`, `.uni`, `.bi`, `.tri`.
pub fn save(model: &Model, prefix: &Path) -> EngineResult<()> {
    save_vocab(model.vocab(), &vocab_path(prefix))?;
    save_unigrams(model, &uni_path(prefix))?;
    save_order(model, 2, &bi_path(prefix))?;
    save_order(model, 3, &tri_path(prefix))?;
    Ok(())
}

fn save_vocab(vocab: &Vocabulary, path: &Path) -> EngineResult<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_u32(&mut w, vocab.len() as u32)?;
    for (_, token) in vocab.iter() {
        let bytes = token.as_bytes();
        write_u16(&mut w, bytes.len() as u16)?;
        w.write_all(bytes)?;
    }
    w.flush()?;
    Ok(())
}

fn save_unigrams(model: &Model, path: &Path) -> EngineResult<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let unigrams = model.trie().traverse_order(1);
    write_u64(&mut w, model.total_tokens())?;
    write_u32(&mut w, unigrams.len() as u32)?;
    for (ids, count) in unigrams {
        write_u32(&mut w, ids[0])?;
        write_u32(&mut w, count)?;
    }
    w.flush()?;
    Ok(())
}

fn save_order(model: &Model, order: usize, path: &Path) -> EngineResult<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let ngrams = model.trie().traverse_order(order);
    write_u32(&mut w, ngrams.len() as u32)?;
    for (ids, count) in ngrams {
        for id in ids {
            write_u32(&mut w, id)?;
        }
        write_u32(&mut w, count)?;
    }
    w.flush()?;
    Ok(())
}

/// Load a model from `<prefix>.vocab`, `.uni`, `.bi`, `.tri`.
///
/// `.bi` and `.tri` are each treated as an empty table when absent; `.vocab`
/// and `.uni` must be present.
pub fn load(prefix: &Path, max_n: usize) -> EngineResult<Model> {
    let vocab = load_vocab(&vocab_path(prefix))?;
    let (total_tokens, unigrams) = load_unigrams(&uni_path(prefix))?;

    let mut model = Model::from_parts(vocab, max_n, total_tokens);
    for (id, count) in unigrams {
        model.trie_mut().add_with_count(&[id], 1, count);
    }

    if let Some(bigrams) = load_order(&bi_path(prefix), 2)? {
        for (ids, count) in bigrams {
            model.trie_mut().add_with_count(&ids, 2, count);
        }
    }
    if let Some(trigrams) = load_order(&tri_path(prefix), 3)? {
        for (ids, count) in trigrams {
            model.trie_mut().add_with_count(&ids, 3, count);
        }
    }

    Ok(model)
}

fn load_vocab(path: &Path) -> EngineResult<Vocabulary> {
    let mut r = BufReader::new(File::open(path)?);
    let size = read_u32(&mut r)?;
    let mut tokens = Vec::with_capacity(size as usize);
    for _ in 0..size {
        let len = read_u16(&mut r)?;
        let mut buf = vec![0u8; len as usize];
        r.read_exact(&mut buf)?;
        tokens.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(Vocabulary::from_ordered_tokens(tokens))
}

fn load_unigrams(path: &Path) -> EngineResult<(u64, Vec<(TokenId, u32)>)> {
    let mut r = BufReader::new(File::open(path)?);
    let total_tokens = read_u64(&mut r)?;
    let count = read_u32(&mut r)?;
    let mut unigrams = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let id = read_u32(&mut r)?;
        let c = read_u32(&mut r)?;
        unigrams.push((id, c));
    }
    Ok((total_tokens, unigrams))
}

/// Load a `.bi`/`.tri`-shaped file of fixed-arity n-grams, returning `None`
/// when the file does not exist.
fn load_order(path: &Path, order: usize) -> EngineResult<Option<Vec<(Vec<TokenId>, u32)>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut r = BufReader::new(file);
    let count = read_u32(&mut r)?;
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut ids = Vec::with_capacity(order);
        for _ in 0..order {
            ids.push(read_u32(&mut r)?);
        }
        let c = read_u32(&mut r)?;
        out.push((ids, c));
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn trained_model() -> Model {
        let mut model = Model::new(3);
        model.train_line("a b c");
        model.train_line("a b d");
        model
    }

    #[test]
    fn round_trips_vocab_and_counts() {
        let model = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("m");

        save(&model, &prefix).unwrap();
        let loaded = load(&prefix, 3).unwrap();

        assert_eq!(loaded.vocab().len(), model.vocab().len());
        assert_eq!(loaded.total_tokens(), model.total_tokens());

        let a = model.vocab().get("a");
        let b = model.vocab().get("b");
        let c = model.vocab().get("c");
        let d = model.vocab().get("d");

        assert_eq!(loaded.trie().count(&[a], 1), model.trie().count(&[a], 1));
        assert_eq!(
            loaded.trie().count(&[a, b], 2),
            model.trie().count(&[a, b], 2)
        );
        assert_eq!(
            loaded.trie().count(&[a, b, c], 3),
            model.trie().count(&[a, b, c], 3)
        );
        assert_eq!(
            loaded.trie().count(&[a, b, d], 3),
            model.trie().count(&[a, b, d], 3)
        );
    }

    #[test]
    fn load_tolerates_missing_bi_and_tri() {
        let model = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("m");
        save(&model, &prefix).unwrap();

        std::fs::remove_file(bi_path(&prefix)).unwrap();
        std::fs::remove_file(tri_path(&prefix)).unwrap();

        let loaded = load(&prefix, 3).unwrap();
        assert_eq!(loaded.total_tokens(), model.total_tokens());
        let a = model.vocab().get("a");
        assert_eq!(loaded.trie().count(&[a], 1), model.trie().count(&[a], 1));
        assert_eq!(loaded.trie().count(&[a, a], 2), 0);
    }

    #[test]
    fn load_missing_prefix_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("does-not-exist");
        let err = load(&prefix, 3).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Io(_)));
    }
}
