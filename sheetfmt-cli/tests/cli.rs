use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn prints_treeviz_by_default() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("[RED]0.00");

    cmd.assert().success().stdout(
        predicate::str::starts_with("⧉ expression \"[RED]0.00\"")
            .and(predicate::str::contains("● color \"[RED]\""))
            .and(predicate::str::contains("◦ decimal-point \".\"")),
    );
}

#[test]
fn prints_json() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("dd/mm").arg("--format").arg("json");

    cmd.assert().success().stdout(
        predicate::str::contains("\"type\": \"expression\"")
            .and(predicate::str::contains("\"type\": \"date\"")),
    );
}

#[test]
fn prints_kinds_for_a_family() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.args(["h:mm", "--family", "time", "--format", "kinds"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("MINUTE_WITH_LEADING_ZERO").and(
            predicate::str::ends_with("last: MINUTE_WITH_LEADING_ZERO\n"),
        ));
}

#[test]
fn lowercases_on_request() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.args(["DD/MM/YYYY", "--lowercase", "--format", "yaml"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("text: dd/mm/yyyy"));
}

#[test]
fn reports_parse_errors_with_a_caret() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("#,##0 ]");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("position 6").and(predicate::str::contains("\n        ^\n")));
}

#[test]
fn rejects_unknown_format() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.args(["0", "--format", "xml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("format 'xml' not found"));
}

#[test]
fn rejects_unknown_family() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.args(["0", "--family", "currency"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown pattern family 'currency'"));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("treeviz")
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("yaml"))
            .and(predicate::str::contains("kinds")),
    );
}

#[test]
fn reads_context_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[context]\ndecimal_separator = \",\"\n\n[output]\nformat = \"json\""
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("[>1,5]0").arg("--config").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"1.5\""));
}

#[test]
fn rejects_bad_config_symbols() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[context]\nminus_sign = \"--\"").unwrap();

    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.arg("0").arg("--config").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("context.minus_sign must be a single character"));
}

#[test]
fn verbose_logs_to_stderr() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.env_remove("RUST_LOG")
        .args(["0.00", "--family", "number", "--verbose"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("parsing \"0.00\" as number, output treeviz"));
}

#[test]
fn quiet_by_default() {
    let mut cmd = cargo_bin_cmd!("sheetfmt");
    cmd.env_remove("RUST_LOG").arg("0.00");

    cmd.assert().success().stderr(predicate::str::is_empty());
}
