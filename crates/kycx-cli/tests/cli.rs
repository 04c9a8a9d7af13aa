//! Integration tests for the kycx CLI.

use assert_cmd::Command;
use lopdf::{dictionary, Document, Object, ObjectId};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FORM: &str = "Name: RAM KUMAR SHARMA
Date of Birth AD: 1990-05-12
Gender: M
Citizenship No: 123456
Issue District: Kaski
Father's Name: SHYAM LAL SHARMA
Mother's Name: GITA DEVI SHARMA
";

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kycx"))
}

fn write_form(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, FORM).unwrap();
    path
}

struct Template {
    path: PathBuf,
    name: ObjectId,
    male: ObjectId,
}

fn write_template(dir: &Path) -> Template {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let name = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal("Name In Block Letter"),
        "Rect" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(200), Object::Integer(20)],
    });
    let on = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
    let male = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal("MaleCheck"),
        "Rect" => vec![Object::Integer(0), Object::Integer(30), Object::Integer(10), Object::Integer(40)],
        "AP" => dictionary! { "N" => dictionary! { "On" => on } },
        "AS" => "Off",
    });

    let page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(595), Object::Integer(842)],
        "Annots" => vec![Object::Reference(name), Object::Reference(male)],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page)],
            "Count" => Object::Integer(1),
        }),
    );
    let acroform = doc.add_object(dictionary! {
        "Fields" => vec![Object::Reference(name), Object::Reference(male)],
    });
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform,
    });
    doc.trailer.set("Root", catalog);

    let path = dir.join("template.pdf");
    doc.save(&path).unwrap();
    Template { path, name, male }
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("fields"))
        .stdout(predicate::str::contains("KYC forms"));
}

#[test]
fn test_process_text_file_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_form(&dir, "applicant.txt");

    cli()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"RAM KUMAR SHARMA\""))
        .stdout(predicate::str::contains("\"gender\": \"Male\""))
        .stdout(predicate::str::contains("\"father_name\": \"SHYAM LAL SHARMA\""));
}

#[test]
fn test_process_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_form(&dir, "applicant.txt");
    let output = dir.path().join("applicant.csv");

    cli()
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().split(',').any(|h| h == "citizenship_no"));
    assert!(lines.next().unwrap().contains("123456"));
}

#[test]
fn test_process_text_format_groups_by_category() {
    let dir = TempDir::new().unwrap();
    let input = write_form(&dir, "applicant.txt");

    cli()
        .arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("personal:"))
        .stdout(predicate::str::contains("family_members:"))
        .stdout(predicate::str::contains("Total fields:"));
}

#[test]
fn test_process_missing_file() {
    cli()
        .arg("process")
        .arg("/nonexistent/form.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("form.docx");
    fs::write(&input, FORM).unwrap();

    cli()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_process_fill_requires_template() {
    let dir = TempDir::new().unwrap();
    let input = write_form(&dir, "applicant.txt");

    cli()
        .arg("process")
        .arg(&input)
        .arg("--fill")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No form template given"));
}

#[test]
fn test_process_fill_template() {
    let dir = TempDir::new().unwrap();
    let input = write_form(&dir, "applicant.txt");
    let template = write_template(dir.path());

    cli()
        .arg("process")
        .arg(&input)
        .arg("--fill")
        .arg("--template")
        .arg(&template.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Filled 2 form fields"));

    let filled = Document::load(dir.path().join("applicant_filled.pdf")).unwrap();
    let name = filled.get_dictionary(template.name).unwrap();
    assert_eq!(name.get(b"V").unwrap().as_str().unwrap(), b"RAM KUMAR SHARMA");
    let male = filled.get_dictionary(template.male).unwrap();
    assert_eq!(male.get(b"AS").unwrap().as_name().unwrap(), b"On");
}

#[test]
fn test_fields_lists_catalog() {
    cli()
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("current_address"))
        .stdout(predicate::str::contains("citizenship_no"))
        .stdout(predicate::str::contains("-> Name In Block Letter"));
}

#[test]
fn test_fields_single_category() {
    cli()
        .args(["fields", "--category", "bank_details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bank_account_number"))
        .stdout(predicate::str::contains("citizenship_no").not());
}

#[test]
fn test_fields_unknown_category() {
    cli()
        .args(["fields", "--category", "pets"])
        .assert()
        .failure();
}

#[test]
fn test_fields_of_template() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path());

    cli()
        .arg("fields")
        .arg("--template")
        .arg(&template.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name In Block Letter"))
        .stdout(predicate::str::contains("MaleCheck"))
        .stdout(predicate::str::contains("2 form fields"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    write_form(&dir, "a.txt");
    write_form(&dir, "b.txt");
    fs::write(dir.path().join("blank.txt"), "   \n").unwrap();
    let out = dir.path().join("out");

    cli()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("blank.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status,total_fields"));
    assert!(lines[1].starts_with("a.txt,success,"));
    assert!(lines[1].contains("RAM KUMAR SHARMA"));
    assert!(lines[2].starts_with("b.txt,success,"));
    assert!(lines[3].starts_with("blank.txt,error,"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blank.txt"), "\n").unwrap();

    cli()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.failure_policy", "skip_category"])
        .assert()
        .success();

    cli()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.failure_policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"skip_category\""));
}

#[test]
fn test_config_rejects_unknown_key_and_bad_value() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    cli()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.failure_policy", "ignore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    assert!(!config.exists());
}

#[test]
fn test_config_path_not_created() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
