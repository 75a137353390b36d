//! Extraction from database files on disk, decoded back with mii-format.

use std::fs;

use mii_db::{extract_from_path, DatabaseKind};
use mii_format::{decode, LayoutKind};

fn plaza_slot(name: &str) -> Vec<u8> {
    let mut slot = vec![0u8; 74];
    slot[0] = 0x01;
    for (i, unit) in name.encode_utf16().enumerate() {
        slot[0x02 + i * 2..0x04 + i * 2].copy_from_slice(&unit.to_be_bytes());
    }
    slot
}

#[test]
fn extracted_plaza_miis_decode_as_wii_char_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("RFL_DB.dat");

    let mut db = b"RNOD".to_vec();
    db.extend(plaza_slot("Alice"));
    db.extend(vec![0u8; 74]);
    db.extend(plaza_slot("Bob"));
    fs::write(&db_path, &db).unwrap();

    let miis = extract_from_path(DatabaseKind::WiiPlaza, &db_path).unwrap();
    assert_eq!(miis.len(), 2);

    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let mut names = Vec::new();
    for mii in &miis {
        let path = mii.write_to(&out).unwrap();
        let bytes = fs::read(&path).unwrap();
        let record = decode(&bytes).unwrap();
        assert_eq!(record.layout, LayoutKind::RflCharData);
        names.push(record.display_name);
    }

    assert_eq!(names, ["Alice", "Bob"]);
    assert!(out.join("WII_PL00001.mii").exists());
}
