use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VALE_TEXT: &str = "VALE DE COMPRA
Vale No. V-1024
Fecha: 20/03/2024
Proveedor: REFACCIONES DEL NORTE SA DE CV Domicilio: AV. JUAREZ 123
Departamento: 6ADMINISTRACION   Sucursal: 1MONTERREY
Marca: 2-NISSAN
Total: $ 6,300.00
";

const ORDEN_TEXT: &str = "ORDEN DE PAGO No. 133
Fecha: 15/04/2024
Beneficiario: COMERCIAL OLEKSEI SA DE CV
Total: $ 6,300.00
Importe con letra: SEISMILTRESCIENTOSPESOS00/100M.N.
Concepto: Pago factura 5718 refacciones
";

fn vale() -> Command {
    let mut cmd = Command::cargo_bin("vale").unwrap();
    // Keep the user's real config out of the way
    cmd.env("HOME", "/nonexistent").env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn process_vale_text_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "vale_1024.txt", VALE_TEXT);

    vale()
        .args(["process", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "vale""#))
        .stdout(predicate::str::contains(r#""departamento": "6 ADMINISTRACION""#))
        .stdout(predicate::str::contains(r#""marca": "2 - NISSAN""#))
        .stdout(predicate::str::contains(r#""fecha": "2024-03-20""#))
        .stdout(predicate::str::contains(r#""rfc": null"#));
}

#[test]
fn process_detects_orden() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "orden_133.txt", ORDEN_TEXT);

    vale()
        .args(["process", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "orden""#))
        .stdout(predicate::str::contains(r#""folio": "5718""#))
        .stdout(predicate::str::contains(
            r#""importe_letra": "SEIS MIL TRESCIENTOS PESOS 00/100 M.N.""#,
        ));
}

#[test]
fn process_applies_overrides() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "vale.txt", VALE_TEXT);

    vale()
        .args(["process", &input, "--overrides", r#"{"total": "250.00", "marca": ""}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total": "250.00""#))
        .stdout(predicate::str::contains(r#""marca": "2 - NISSAN""#));
}

#[test]
fn process_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "vale.txt", VALE_TEXT);
    let output = dir.path().join("out.csv");

    vale()
        .args(["process", &input, "-f", "csv", "--kind", "vale", "-o"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("file_name,kind,no_vale,fecha,proveedor"));
    assert!(csv.contains("vale.txt,vale,V-1024,20/03/2024,REFACCIONES DEL NORTE SA DE CV"));
}

#[test]
fn process_missing_input_fails() {
    vale()
        .args(["process", "/nonexistent/vale.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "vale.docx", VALE_TEXT);

    vale()
        .args(["process", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn repair_command() {
    vale()
        .args(["repair", "SEISMILTRESCIENTOS", "MILQUINIENTOSPESOS00/100M.N."])
        .assert()
        .success()
        .stdout("SEIS MIL TRESCIENTOS\nMIL QUINIENTOS PESOS 00/100 M.N.\n");
}

#[test]
fn folio_command() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "orden.txt", "Pago factura 4521 con referencia 73920184");

    vale()
        .args(["folio", &input, "--vendor", "PROVEEDORA DEL VALLE"])
        .assert()
        .success()
        .stdout("4521\n");

    let input = write(dir.path(), "oleksei.txt", ORDEN_TEXT);
    vale()
        .args(["folio", &input])
        .assert()
        .success()
        .stdout("5718\n");

    let input = write(dir.path(), "empty.txt", "sin folio");
    vale().args(["folio", &input]).assert().failure();
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", VALE_TEXT);
    write(dir.path(), "b.txt", ORDEN_TEXT);
    write(dir.path(), "ignored.md", "x");
    let out = dir.path().join("out");
    let pattern = format!("{}/*", dir.path().display());

    vale()
        .args(["batch", &pattern, "-j", "2", "--summary", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(out.join("a.json").exists());
    let b = fs::read_to_string(out.join("b.json")).unwrap();
    assert!(b.contains(r#""kind": "orden""#));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,kind,found,missing,total,processing_time_ms"));
    assert!(summary.contains("a.txt,success,vale"));
    assert!(summary.contains("b.txt,success,orden"));
    assert!(summary.lines().all(|line| line.starts_with("filename") || line.contains(",6300.00,")));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());

    vale()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let path = path.to_str().unwrap();

    vale().args(["config", "init", "-c", path]).assert().success();
    assert!(Path::new(path).exists());

    vale()
        .args(["config", "get", "extraction.repair_max_passes", "-c", path])
        .assert()
        .success()
        .stdout("5\n");

    vale()
        .args(["config", "set", "extraction.repair_max_passes", "3", "-c", path])
        .assert()
        .success();

    vale()
        .args(["config", "get", "extraction.repair_max_passes", "-c", path])
        .assert()
        .success()
        .stdout("3\n");

    vale()
        .args(["config", "set", "extraction.repair_max_passes", "0", "-c", path])
        .assert()
        .failure();

    vale()
        .args(["config", "get", "extraction.nope", "-c", path])
        .assert()
        .failure();
}
