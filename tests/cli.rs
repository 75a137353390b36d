use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// 74-byte Wii character data with the given name and flags word.
fn named_record(name: &str, flags: u16) -> Vec<u8> {
    let mut buffer = vec![0u8; 74];
    buffer[0x00..0x02].copy_from_slice(&flags.to_be_bytes());
    for (i, unit) in name.encode_utf16().enumerate() {
        buffer[0x02 + i * 2..0x04 + i * 2].copy_from_slice(&unit.to_be_bytes());
    }
    buffer
}

/// 74-byte Wii character data named "Mii" wearing yellow.
fn wii_record() -> Vec<u8> {
    named_record("Mii", 0x0200)
}

/// A Wii Plaza database with an empty slot followed by `records`.
fn plaza_database(records: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0u8; 4];
    data.extend(vec![0u8; 74]);
    for record in records {
        data.extend_from_slice(record);
    }
    data
}

fn mii() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("mii"));
    for var in ["MII_INPUT_DIR", "MII_OUTPUT_DIR", "MII_DB_DIR", "MII_RENDER_URL"] {
        cmd.env_remove(var);
    }
    cmd
}

fn populate(dir: &Path) {
    fs::write(dir.join("good.mii"), wii_record()).unwrap();
    fs::write(dir.join("short.mii"), [0u8; 50]).unwrap();
    fs::write(dir.join("notes.txt"), b"ignored").unwrap();
}

#[test]
fn it_lists_layouts_and_databases() {
    mii()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("FFLStoreData"))
        .stdout(predicate::str::contains("RFL_DB.dat"))
        .stdout(predicate::str::contains("WII_PL"));
}

#[test]
fn it_decodes_a_directory_and_reports_failures() {
    let d = tempdir().unwrap();
    populate(d.path());

    mii()
        .args(["decode", "-d", &d.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mii"))
        .stdout(predicate::str::contains("#FFD700"))
        .stdout(predicate::str::contains("Successfully decoded 1/2 files"))
        .stderr(predicate::str::contains("short.mii"))
        .stderr(predicate::str::contains("UnsupportedSize"));
}

#[test]
fn it_writes_csv() {
    let d = tempdir().unwrap();
    populate(d.path());
    let csv = d.path().join("out.csv");

    mii()
        .args([
            "decode",
            "-d",
            &d.path().to_string_lossy(),
            "--csv",
            &csv.to_string_lossy(),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "filename,name,clothes_color,format,size_bytes",
            "good.mii,Mii,#FFD700,RFLCharData,74",
        ]
    );
}

#[test]
fn it_prints_json_lines() {
    let d = tempdir().unwrap();
    let file = d.path().join("good.mii");
    fs::write(&file, wii_record()).unwrap();

    let output = mii()
        .args(["decode", "--json", "-f", &file.to_string_lossy()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let line = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["filename"], "good.mii");
    assert_eq!(value["display_name"], "Mii");
    assert_eq!(value["clothing_color"], "#FFD700");
    assert_eq!(value["integrity"], "Unchecked");
}

#[test]
fn it_extracts_a_database() {
    let d = tempdir().unwrap();
    let db = d.path().join("RFL_DB.dat");
    let out = d.path().join("out");

    fs::write(&db, plaza_database(&[wii_record()])).unwrap();

    mii()
        .args([
            "extract",
            "-t",
            "wii-plaza",
            "-i",
            &db.to_string_lossy(),
            "-o",
            &out.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1"));

    assert_eq!(fs::read(out.join("WII_PL00000.mii")).unwrap(), wii_record());
}

#[test]
fn it_fails_on_a_missing_database() {
    let d = tempdir().unwrap();

    mii()
        .args([
            "extract",
            "-t",
            "3ds-maker",
            "-i",
            &d.path().join("CFL_DB.dat").to_string_lossy(),
            "-o",
            &d.path().to_string_lossy(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn it_builds_render_urls() {
    let d = tempdir().unwrap();
    populate(d.path());

    mii()
        .args([
            "url",
            "-d",
            &d.path().to_string_lossy(),
            "--base-url",
            "https://render.example/image.png",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "good.mii\thttps://render.example/image.png?data=",
        ))
        .stdout(predicate::str::contains("&type=face&width=270"))
        .stdout(predicate::str::contains("short.mii").not());
}

#[test]
fn it_quotes_csv_fields() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("odd.mii"), named_record("A,\"b\"", 0)).unwrap();
    let csv = d.path().join("out.csv");

    mii()
        .args([
            "decode",
            "-d",
            &d.path().to_string_lossy(),
            "--csv",
            &csv.to_string_lossy(),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&csv).unwrap();
    assert_eq!(
        contents.lines().nth(1),
        Some("odd.mii,\"A,\"\"b\"\"\",#FF0000,RFLCharData,74")
    );
}

#[test]
fn it_shows_wii_profiles() {
    let d = tempdir().unwrap();
    populate(d.path());

    mii()
        .args(["profile", "-d", &d.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("good.mii"))
        .stdout(predicate::str::contains("Not set"))
        .stdout(predicate::str::contains("Red"))
        .stdout(predicate::str::contains("Successfully analyzed 1/2 files"))
        .stderr(predicate::str::contains("not a Wii record: 50 bytes"));
}

#[test]
fn it_writes_profile_csv() {
    let d = tempdir().unwrap();
    // female, 3/14, favourite colour Blue, favourite Mii
    let flags: u16 = (1 << 14) | (3 << 10) | (14 << 5) | (5 << 1) | 1;
    fs::write(d.path().join("kate.mii"), named_record("Kate", flags)).unwrap();
    let csv = d.path().join("profiles.csv");

    mii()
        .args([
            "metadata",
            "-d",
            &d.path().to_string_lossy(),
            "--csv",
            &csv.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 rows"));

    let contents = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "filename,mii_name,creator_name,is_girl,gender,birth_month,birth_day,birthday,\
             favorite_color,favorite_color_index,is_favorite,mii_id",
            "kate.mii,Kate,Unknown,true,Female,3,14,3/14,Blue,5,true,00000000",
        ]
    );
}

#[test]
fn it_shows_creation_times() {
    let d = tempdir().unwrap();
    populate(d.path());

    mii()
        .args(["times", "-d", &d.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2006-01-01 00:00:00"))
        .stdout(predicate::str::contains("Wii"))
        .stdout(predicate::str::contains("Successfully analyzed 1/2 files"))
        .stderr(predicate::str::contains("short.mii"));
}

#[test]
fn it_names_extracted_files_after_the_mii() {
    let d = tempdir().unwrap();
    let db = d.path().join("RFL_DB.dat");
    let out = d.path().join("out");
    fs::write(&db, plaza_database(&[named_record("A/b", 0)])).unwrap();

    mii()
        .args([
            "extract",
            "-t",
            "wii-plaza",
            "-i",
            &db.to_string_lossy(),
            "-o",
            &out.to_string_lossy(),
            "--by-name",
        ])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["WII_PL00000_A_b.mii"]);
}

#[test]
fn it_extracts_every_kind_found_in_a_directory() {
    let d = tempdir().unwrap();
    let out = d.path().join("out");
    fs::write(
        d.path().join("RFL_DB.dat"),
        plaza_database(&[wii_record(), named_record("Two", 0)]),
    )
    .unwrap();

    mii()
        .args([
            "extract",
            "--db-dir",
            &d.path().to_string_lossy(),
            "-o",
            &out.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wii Plaza: 2 Miis"))
        .stdout(predicate::str::contains("Total Miis extracted: 2"))
        .stderr(predicate::str::contains("FFL_ODB.dat not found"))
        .stderr(predicate::str::contains("CFL_DB.dat not found"));

    assert!(out.join("WII_PL00000.mii").exists());
    assert!(out.join("WII_PL00001.mii").exists());
}
