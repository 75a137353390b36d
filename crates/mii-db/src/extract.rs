//! Slot walking and record extraction.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use mii_common::BinaryReader;

use crate::{DatabaseKind, Error, Result};

/// A Mii record taken from a database slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMii {
    /// Position among the extracted records (empty slots are not counted).
    pub index: usize,
    /// Output file name, e.g. `WII_PL00003.mii`.
    pub file_name: String,
    /// Slot bytes plus any padding.
    pub data: Vec<u8>,
}

impl ExtractedMii {
    /// Write the record into `dir`, returning the path written.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.data)?;
        Ok(path)
    }
}

/// Iterator over the occupied slots of a database.
///
/// Stops at the first incomplete slot or once the kind's limit has been
/// produced. All-zero slots are skipped and do not count towards the limit.
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    kind: DatabaseKind,
    reader: BinaryReader<'a>,
    produced: usize,
    empty: usize,
}

impl<'a> Slots<'a> {
    /// Create an iterator over the slots of a database image.
    pub fn new(kind: DatabaseKind, data: &'a [u8]) -> Self {
        let mut reader = BinaryReader::new(data);
        if reader.seek(kind.offset()).is_err() {
            debug!("{kind} database is shorter than its header ({} bytes)", data.len());
            reader.seek(data.len()).ok();
        }

        Self {
            kind,
            reader,
            produced: 0,
            empty: 0,
        }
    }

    /// Number of empty slots skipped so far.
    pub fn empty_slots(&self) -> usize {
        self.empty
    }
}

impl Iterator for Slots<'_> {
    type Item = ExtractedMii;

    fn next(&mut self) -> Option<Self::Item> {
        while self.produced < self.kind.limit() {
            let slot = self.reader.read_bytes(self.kind.slot_size()).ok()?;

            if slot.iter().all(|&b| b == 0) {
                self.empty += 1;
                continue;
            }

            let mut data = Vec::with_capacity(self.kind.record_size());
            data.extend_from_slice(slot);
            data.resize(self.kind.record_size(), 0);

            let index = self.produced;
            self.produced += 1;

            return Some(ExtractedMii {
                index,
                file_name: format!("{}{:05}.mii", self.kind.prefix(), index),
                data,
            });
        }
        None
    }
}

/// Extract every occupied slot of a database image.
pub fn extract(kind: DatabaseKind, data: &[u8]) -> Vec<ExtractedMii> {
    let mut slots = Slots::new(kind, data);
    let miis: Vec<ExtractedMii> = slots.by_ref().collect();
    debug!(
        "{kind}: {} records, {} empty slots skipped",
        miis.len(),
        slots.empty_slots()
    );
    miis
}

/// Read a database file and extract every occupied slot.
pub fn extract_from_path<P: AsRef<Path>>(
    kind: DatabaseKind,
    path: P,
) -> Result<Vec<ExtractedMii>> {
    let path = path.as_ref();

    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::DatabaseNotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let miis = extract(kind, &data);
    info!("extracted {} {kind} Miis from {}", miis.len(), path.display());
    Ok(miis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(kind: DatabaseKind, slots: &[Option<u8>], trailing: usize) -> Vec<u8> {
        let mut data = vec![0xEE; kind.offset()];
        for slot in slots {
            let fill = slot.unwrap_or(0);
            data.extend(std::iter::repeat(fill).take(kind.slot_size()));
        }
        data.extend(std::iter::repeat(0xAB).take(trailing));
        data
    }

    #[test]
    fn test_skips_empty_slots() {
        let kind = DatabaseKind::WiiPlaza;
        let data = database(kind, &[Some(1), None, Some(2)], 0);

        let miis = extract(kind, &data);
        assert_eq!(miis.len(), 2);
        assert_eq!(miis[0].file_name, "WII_PL00000.mii");
        assert_eq!(miis[1].file_name, "WII_PL00001.mii");
        assert!(miis[1].data.iter().all(|&b| b == 2));
    }

    #[test]
    fn test_partial_trailing_slot_ignored() {
        let kind = DatabaseKind::N3dsMaker;
        let data = database(kind, &[Some(7)], kind.slot_size() - 1);

        let miis = extract(kind, &data);
        assert_eq!(miis.len(), 1);
        assert_eq!(miis[0].data.len(), 92);
    }

    #[test]
    fn test_parade_records_are_padded() {
        let kind = DatabaseKind::WiiParade;
        let data = database(kind, &[Some(0x33)], 0);

        let miis = extract(kind, &data);
        assert_eq!(miis.len(), 1);
        assert_eq!(miis[0].data.len(), 74);
        assert!(miis[0].data[64..].iter().all(|&b| b == 0));
        assert!(miis[0].file_name.starts_with("WII_PA"));
    }

    #[test]
    fn test_limit_is_respected() {
        let kind = DatabaseKind::WiiPlaza;
        let slots = vec![Some(9); kind.limit() + 5];
        let data = database(kind, &slots, 0);

        assert_eq!(extract(kind, &data).len(), kind.limit());
    }

    #[test]
    fn test_database_shorter_than_header() {
        assert!(extract(DatabaseKind::WiiParade, &[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_missing_database_file() {
        let err =
            extract_from_path(DatabaseKind::WiiUMaker, "/nonexistent/FFL_ODB.dat").unwrap_err();
        assert!(matches!(err, Error::DatabaseNotFound(_)));
        assert_eq!(err.to_string(), "/nonexistent/FFL_ODB.dat not found");
    }
}
