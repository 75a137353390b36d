//! Mii CLI - Command-line tool for decoding and extracting Mii records.
//!
//! This is the main entry point for the `mii` command-line application.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use base64::prelude::*;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use mii::prelude::*;

/// Default render service for `mii url`.
const DEFAULT_RENDER_URL: &str = "https://mii-unsecure.ariankordi.net/miis/image.png";

/// Mii - decode, extract and inspect Mii records
#[derive(Parser)]
#[command(name = "mii")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode .mii files and report name, clothing colour and layout
    Decode {
        /// Directory containing .mii files
        #[arg(short, long, env = "MII_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// Decode a single file instead of a directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write results to a CSV file
        #[arg(short, long)]
        csv: Option<PathBuf>,

        /// Print one JSON object per file instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the Wii profile header (gender, birthday, creator, Mii ID)
    #[command(alias = "metadata")]
    Profile {
        /// Directory containing .mii files
        #[arg(short, long, env = "MII_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// Inspect a single file instead of a directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write results to a CSV file instead of printing a table
        #[arg(short, long)]
        csv: Option<PathBuf>,
    },

    /// Show creation times embedded in Mii IDs
    Times {
        /// Directory containing .mii files
        #[arg(short, long, env = "MII_INPUT_DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Extract .mii files from console database dumps
    Extract {
        /// Database kind (wii-plaza, wii-parade, wiiu-maker, 3ds-maker); all when omitted
        #[arg(short = 't', long = "type")]
        kind: Option<DatabaseKind>,

        /// Database file for --type (defaults to the kind's usual file name)
        #[arg(short, long, requires = "kind")]
        input: Option<PathBuf>,

        /// Directory holding the database files when extracting every kind
        #[arg(long, env = "MII_DB_DIR", default_value = ".")]
        db_dir: PathBuf,

        /// Output directory for extracted .mii files
        #[arg(short, long, env = "MII_OUTPUT_DIR", default_value = ".")]
        output: PathBuf,

        /// Append the decoded Mii name to each file name
        #[arg(long)]
        by_name: bool,
    },

    /// Print render-service image URLs for .mii files
    Url {
        /// Directory containing .mii files
        #[arg(short, long, env = "MII_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// A single file instead of a directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Render service endpoint
        #[arg(long, env = "MII_RENDER_URL", default_value = DEFAULT_RENDER_URL)]
        base_url: String,
    },

    /// List supported record layouts and database kinds
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decode {
            dir,
            file,
            csv,
            json,
        } => {
            cmd_decode(&dir, file.as_deref(), csv.as_deref(), json)?;
        }
        Commands::Profile { dir, file, csv } => {
            cmd_profile(&dir, file.as_deref(), csv.as_deref())?;
        }
        Commands::Times { dir } => {
            cmd_times(&dir)?;
        }
        Commands::Extract {
            kind,
            input,
            db_dir,
            output,
            by_name,
        } => {
            cmd_extract(kind, input.as_deref(), &db_dir, &output, by_name)?;
        }
        Commands::Url {
            dir,
            file,
            base_url,
        } => {
            cmd_url(&dir, file.as_deref(), &base_url)?;
        }
        Commands::Info => cmd_info(),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Outcome of decoding one file.
struct FileReport {
    path: PathBuf,
    result: Result<DecodedRecord>,
}

impl FileReport {
    fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonRow<'a> {
    Decoded {
        filename: String,
        #[serde(flatten)]
        record: &'a DecodedRecord,
    },
    Failed {
        filename: String,
        error: String,
    },
}

fn cmd_decode(dir: &Path, file: Option<&Path>, csv: Option<&Path>, json: bool) -> Result<()> {
    let files = input_files(dir, file)?;
    if files.is_empty() {
        println!("No .mii files found in {}", dir.display());
        return Ok(());
    }

    let start = Instant::now();
    let reports = decode_all(&files)?;
    info!("Decoded {} files in {:?}", reports.len(), start.elapsed());

    if json {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for report in &reports {
            let row = match &report.result {
                Ok(record) => JsonRow::Decoded {
                    filename: report.file_name(),
                    record,
                },
                Err(e) => JsonRow::Failed {
                    filename: report.file_name(),
                    error: format!("{:#}", e),
                },
            };
            serde_json::to_writer(&mut out, &row)?;
            writeln!(out)?;
        }
    } else {
        println!(
            "{:<24} {:<12} {:<10} {:<20} {:>6}",
            "Filename", "Name", "Clothes", "Format", "Bytes"
        );
        for report in &reports {
            match &report.result {
                Ok(record) => println!(
                    "{:<24} {:<12} {:<10} {:<20} {:>6}",
                    report.file_name(),
                    record.display_name,
                    record.clothing_color.to_string(),
                    record.layout_name,
                    record.byte_length
                ),
                Err(e) => eprintln!("Error decoding {}: {:#}", report.file_name(), e),
            }
        }
    }

    let decoded = reports.iter().filter(|r| r.result.is_ok()).count();

    if let Some(csv_path) = csv {
        let rows: Vec<RecordRow> = reports.iter().filter_map(RecordRow::from_report).collect();
        save_csv(csv_path, &rows)?;
    }

    if !json {
        println!("\nSuccessfully decoded {}/{} files", decoded, reports.len());
    }

    Ok(())
}

/// Decode files in parallel, keeping input order.
fn decode_all(files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let reports = files
        .par_iter()
        .map(|path| {
            let result = decode_file(path);
            if let Err(e) = &result {
                warn!("{}: {:#}", path.display(), e);
            }
            pb.inc(1);
            FileReport {
                path: path.clone(),
                result,
            }
        })
        .collect();

    pb.finish_and_clear();
    Ok(reports)
}

fn decode_file(path: &Path) -> Result<DecodedRecord> {
    let data = read_record(path)?;
    decode(&data).map_err(|failure| anyhow!("{}: {}", failure.kind(), failure))
}

fn read_record(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// One row of `decode --csv`.
#[derive(Serialize)]
struct RecordRow<'a> {
    filename: String,
    name: &'a str,
    clothes_color: ClothingColor,
    format: &'static str,
    size_bytes: usize,
}

impl<'a> RecordRow<'a> {
    fn from_report(report: &'a FileReport) -> Option<Self> {
        let record = report.result.as_ref().ok()?;
        Some(Self {
            filename: report.file_name(),
            name: &record.display_name,
            clothes_color: record.clothing_color,
            format: record.layout_name,
            size_bytes: record.byte_length,
        })
    }
}

/// One row of `profile --csv`.
#[derive(Serialize)]
struct ProfileRow {
    filename: String,
    mii_name: String,
    creator_name: String,
    is_girl: bool,
    gender: Gender,
    birth_month: u8,
    birth_day: u8,
    birthday: String,
    favorite_color: String,
    favorite_color_index: u8,
    is_favorite: bool,
    mii_id: String,
}

impl ProfileRow {
    fn new(filename: String, profile: &RflProfile) -> Self {
        Self {
            filename,
            mii_name: profile.display_name().to_string(),
            creator_name: profile.display_creator().to_string(),
            is_girl: profile.gender == Gender::Female,
            gender: profile.gender,
            birth_month: profile.birth_month,
            birth_day: profile.birth_day,
            birthday: profile.birthday_label(),
            favorite_color: profile.favorite_color_label(),
            favorite_color_index: profile.favorite_color_index,
            is_favorite: profile.is_favorite,
            mii_id: profile.mii_id_hex(),
        }
    }
}

/// Write rows to a CSV file; the header comes from the row's field names.
fn write_csv<S: Serialize>(path: &Path, rows: &[S]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn save_csv<S: Serialize>(path: &Path, rows: &[S]) -> Result<()> {
    if rows.is_empty() {
        println!("No data to save to CSV");
        return Ok(());
    }
    write_csv(path, rows)?;
    println!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn cmd_profile(dir: &Path, file: Option<&Path>, csv: Option<&Path>) -> Result<()> {
    let files = input_files(dir, file)?;
    if files.is_empty() {
        println!("No .mii files found in {}", dir.display());
        return Ok(());
    }

    let mut rows = Vec::with_capacity(files.len());
    for path in &files {
        let profile = read_record(path).and_then(|data| Ok(RflProfile::parse(&data)?));
        match profile {
            Ok(profile) => rows.push(ProfileRow::new(file_name_of(path), &profile)),
            Err(e) => eprintln!("Error reading {}: {:#}", file_name_of(path), e),
        }
    }

    if let Some(csv_path) = csv {
        save_csv(csv_path, &rows)?;
    } else {
        println!(
            "{:<24} {:<12} {:<12} {:<6} {:<9} {:<12} {:<4} {:<8}",
            "Filename", "Mii Name", "Creator", "Gender", "Birthday", "Favorite", "Fav", "Mii ID"
        );
        for row in &rows {
            println!(
                "{:<24} {:<12} {:<12} {:<6} {:<9} {:<12} {:<4} {:<8}",
                row.filename,
                row.mii_name,
                row.creator_name,
                row.gender.to_string(),
                row.birthday,
                row.favorite_color,
                if row.is_favorite { "Yes" } else { "No" },
                row.mii_id
            );
        }
    }

    println!("\nSuccessfully analyzed {}/{} files", rows.len(), files.len());
    Ok(())
}

fn cmd_times(dir: &Path) -> Result<()> {
    let files = input_files(dir, None)?;
    if files.is_empty() {
        println!("No .mii files found in {}", dir.display());
        return Ok(());
    }

    println!("{:<24} {:<20} {}", "Filename", "Creation Time", "Type");

    let mut ok = 0;
    for path in &files {
        let created = read_record(path).and_then(|data| Ok(creation_time(&data)?));
        match created {
            Ok(created) => {
                println!(
                    "{:<24} {:<20} {}",
                    file_name_of(path),
                    created.to_string(),
                    created.era
                );
                ok += 1;
            }
            Err(e) => eprintln!("Error analyzing {}: {:#}", file_name_of(path), e),
        }
    }

    println!("\nSuccessfully analyzed {}/{} files", ok, files.len());
    Ok(())
}

fn cmd_extract(
    kind: Option<DatabaseKind>,
    input: Option<&Path>,
    db_dir: &Path,
    output: &Path,
    by_name: bool,
) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    if let Some(kind) = kind {
        let source = input.map_or_else(|| PathBuf::from(kind.source()), Path::to_path_buf);
        let written = extract_kind(kind, &source, output, by_name)?;
        println!("Extracted {} {} Miis to {}", written, kind, output.display());
        return Ok(());
    }

    println!("Extracting from all supported database types...");
    let mut total = 0;
    for kind in DatabaseKind::ALL {
        let source = db_dir.join(kind.source());
        match extract_kind(kind, &source, output, by_name) {
            Ok(written) => {
                println!("{}: {} Miis", kind, written);
                total += written;
            }
            Err(e) => warn!("{}: {:#}", kind, e),
        }
    }

    println!("\nTotal Miis extracted: {}", total);
    Ok(())
}

fn extract_kind(kind: DatabaseKind, source: &Path, output: &Path, by_name: bool) -> Result<usize> {
    let miis = extract_from_path(kind, source)?;

    let pb = ProgressBar::new(miis.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );
    pb.set_message(kind.prefix());

    for mii in &miis {
        if by_name {
            let name = decode(&mii.data)
                .map(|record| record.display_name)
                .unwrap_or_default();
            let stem = mii.file_name.trim_end_matches(".mii");
            let path = output.join(format!("{}_{}.mii", stem, sanitize_file_name(&name)));
            fs::write(&path, &mii.data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        } else {
            mii.write_to(output)
                .with_context(|| format!("Failed to write {}", mii.file_name))?;
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(miis.len())
}

fn cmd_url(dir: &Path, file: Option<&Path>, base_url: &str) -> Result<()> {
    let files = input_files(dir, file)?;

    for path in &files {
        let data = match read_record(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading {}: {:#}", file_name_of(path), e);
                continue;
            }
        };

        // Only hand well-formed records to the render service.
        if let Err(failure) = decode(&data) {
            eprintln!("Skipping {}: {}", file_name_of(path), failure);
            continue;
        }

        println!("{}\t{}", file_name_of(path), render_url(base_url, &data));
    }

    Ok(())
}

fn cmd_info() {
    println!("Supported record layouts (resolved by size, first match wins):\n");
    println!(
        "{:<22} {:<18} {:<10} {:<10} {:<9}",
        "Layout", "Sizes", "Name", "Checksum", "Special"
    );
    for layout in Catalog::builtin().layouts() {
        let sizes: Vec<String> = layout.accepted_sizes.iter().map(|s| s.to_string()).collect();
        let name = match layout.name_offset {
            Some(offset) if layout.name_big_endian => format!("{:#04x} BE", offset),
            Some(offset) => format!("{:#04x} LE", offset),
            None => "-".to_string(),
        };
        let checksum = layout
            .checksum_offset
            .map_or_else(|| "-".to_string(), |offset| format!("{:#04x}", offset));

        println!(
            "{:<22} {:<18} {:<10} {:<10} {:<9}",
            layout.name,
            sizes.join(","),
            name,
            checksum,
            if layout.special_case { "yes" } else { "" }
        );
    }

    println!("\nSupported database types:\n");
    println!(
        "{:<16} {:<12} {:<10} {:<10} {:<8}",
        "Type", "Source File", "Mii Size", "Max Count", "Prefix"
    );
    for kind in DatabaseKind::ALL {
        println!(
            "{:<16} {:<12} {:<10} {:<10} {:<8}",
            kind.cli_name(),
            kind.source(),
            format!("{} bytes", kind.record_size()),
            kind.limit(),
            kind.prefix()
        );
    }
}

/// Either the single file, or every `*.mii` in `dir` sorted by name.
fn input_files(dir: &Path, file: Option<&Path>) -> Result<Vec<PathBuf>> {
    if let Some(file) = file {
        if !file.exists() {
            anyhow::bail!("File {} does not exist", file.display());
        }
        return Ok(vec![file.to_path_buf()]);
    }

    if !dir.is_dir() {
        anyhow::bail!("Directory {} does not exist", dir.display());
    }

    let pattern = format!("{}/*.mii", glob::Pattern::escape(&dir.to_string_lossy()));

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .context("Invalid directory pattern")?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect();
    files.sort();

    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build a render-service URL carrying the record as base64.
fn render_url(base_url: &str, data: &[u8]) -> String {
    let encoded = BASE64_STANDARD.encode(data);
    format!(
        "{}?data={}&type=face&width=270",
        base_url,
        urlencoding::encode(&encoded)
    )
}

/// Make a Mii name safe to use inside a file name.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim().trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = [RecordRow {
            filename: "a.mii".to_string(),
            name: "Kid, \"Jr\"",
            clothes_color: ClothingColor::Unknown,
            format: "RFLCharData",
            size_bytes: 74,
        }];

        write_csv(&path, &rows).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "filename,name,clothes_color,format,size_bytes\n\
             a.mii,\"Kid, \"\"Jr\"\"\",Unknown,RFLCharData,74\n"
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Mii"), "Mii");
        assert_eq!(sanitize_file_name("a/b:c*"), "a_b_c_");
        assert_eq!(sanitize_file_name("dots..."), "dots");
        assert_eq!(sanitize_file_name("  "), "unnamed");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
    }

    #[test]
    fn test_render_url_escapes_base64() {
        let url = render_url("https://render.example/image.png", &[0xFB, 0xFF]);
        assert_eq!(url, "https://render.example/image.png?data=%2B%2F8%3D&type=face&width=270");
    }
}
