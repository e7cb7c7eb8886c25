//! Sequential recipe store.
//!
//! A saved book is a magic header followed by one frame per recipe:
//! `[u32 length BE][u32 CRC32 BE][bincode payload]`. Saving writes to a
//! temp file and renames it into place. Loading reads frames until a clean
//! end of stream; a truncated frame or CRC mismatch stops the read with a
//! warning and the recipes read so far are kept.

use crate::error::{RecipeBookError, Result};
use crate::recipe::Recipe;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Magic bytes at the start of every saved book.
const BOOK_MAGIC: &[u8; 4] = b"RBK1";

/// Diagnostics from reading a saved book.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Recipes successfully decoded.
    pub loaded: usize,
    /// Frames with a valid CRC that failed to decode.
    pub skipped: usize,
    /// CRC mismatches encountered (reading stopped).
    pub crc_errors: usize,
    /// Whether the stream ended mid-frame.
    pub truncated: bool,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `recipes` to `path` atomically. Returns the number of recipes written.
pub fn save_recipes<'a, I>(path: &Path, recipes: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temp_path(path);

    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut writer = BufWriter::new(opts.open(&tmp_path)?);

    let written = (|| -> Result<usize> {
        writer.write_all(BOOK_MAGIC)?;
        let mut count = 0;
        for recipe in recipes {
            writer.write_all(&frame_recipe(recipe)?)?;
            count += 1;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(count)
    })();

    let count = match written {
        Ok(count) => count,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };
    drop(writer);
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::info!("Saved {} recipe(s) to {:?}", count, path);
    Ok(count)
}

/// Outcome of reading one frame from a saved book.
#[derive(Debug)]
enum Frame {
    /// Payload whose checksum matched.
    Record(Vec<u8>),
    /// Clean end of stream on a frame boundary.
    End,
    /// Stream ended inside a frame after `got` of `wanted` bytes.
    Truncated { got: usize, wanted: usize },
    /// Payload checksum mismatch.
    Corrupt { stored: u32, computed: u32 },
}

/// Fills as much of `buf` as the stream allows and returns the byte count.
/// A short count means end of stream.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn next_frame<R: Read>(reader: &mut R) -> io::Result<Frame> {
    let mut header = [0u8; 8];
    match read_up_to(reader, &mut header)? {
        0 => return Ok(Frame::End),
        8 => {}
        got => return Ok(Frame::Truncated { got, wanted: 8 }),
    }
    let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let stored = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);

    // sized by the bytes present, not by the header length
    let mut payload = Vec::new();
    let got = reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if got < len {
        return Ok(Frame::Truncated {
            got: 8 + got,
            wanted: 8 + len,
        });
    }
    let computed = crc32fast::hash(&payload);
    if computed != stored {
        return Ok(Frame::Corrupt { stored, computed });
    }
    Ok(Frame::Record(payload))
}

fn check_magic<R: Read>(reader: &mut R, path: &Path) -> Result<()> {
    let mut magic = [0u8; 4];
    if read_up_to(reader, &mut magic)? < magic.len() {
        return Err(RecipeBookError::Persistence(format!(
            "{:?} is too short to be a recipe book",
            path
        )));
    }
    if &magic != BOOK_MAGIC {
        return Err(RecipeBookError::Persistence(format!(
            "{:?} is not a recipe book (bad magic)",
            path
        )));
    }
    Ok(())
}

/// Reads every recipe stored at `path`, in the order they were written.
///
/// Stops at the first truncated or corrupt frame; everything before it is kept.
pub fn load_recipes(path: &Path) -> Result<(Vec<Recipe>, LoadStats)> {
    let mut reader = BufReader::new(File::open(path)?);
    check_magic(&mut reader, path)?;

    let mut recipes = Vec::new();
    let mut stats = LoadStats::default();
    loop {
        let payload = match next_frame(&mut reader)? {
            Frame::Record(payload) => payload,
            Frame::End => break,
            Frame::Truncated { got, wanted } => {
                tracing::warn!(
                    "Recipe book {:?} ends mid-frame ({} of {} bytes), dropping the tail",
                    path,
                    got,
                    wanted
                );
                stats.truncated = true;
                break;
            }
            Frame::Corrupt { stored, computed } => {
                tracing::warn!(
                    "Checksum mismatch in {:?} after {} recipe(s) (stored {:#010x}, computed {:#010x}), dropping the tail",
                    path,
                    recipes.len(),
                    stored,
                    computed
                );
                stats.crc_errors += 1;
                break;
            }
        };
        match bincode::deserialize::<Recipe>(&payload) {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => {
                tracing::warn!("Skipping undecodable recipe in {:?}: {}", path, e);
                stats.skipped += 1;
            }
        }
    }
    stats.loaded = recipes.len();
    Ok((recipes, stats))
}

/// Serialize one recipe into its frame: `[u32 len BE][u32 crc32 BE][bincode payload]`.
fn frame_recipe(recipe: &Recipe) -> Result<Vec<u8>> {
    let bytes = bincode::serialize(recipe)?;
    let len = u32::try_from(bytes.len()).map_err(|_| {
        RecipeBookError::Persistence(format!(
            "recipe '{}' is too large to store ({} bytes)",
            recipe.name(),
            bytes.len()
        ))
    })?;
    let crc = crc32fast::hash(&bytes);

    let mut framed = Vec::with_capacity(8 + bytes.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&crc.to_be_bytes());
    framed.extend_from_slice(&bytes);
    Ok(framed)
}
