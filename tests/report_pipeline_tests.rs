// Integration tests for the full report pipeline: capture CSV in, rendered
// report out. The fixture statistics are known in advance, so the assertions
// pin the exact numbers each format must print.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/hares_known.csv"
);

fn lepus() -> Command {
    Command::cargo_bin("lepus").unwrap()
}

// ============================================================================
// Text format
// ============================================================================

#[test]
fn test_text_report_dataset_summary() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--charts-dir").arg(charts.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Juvenile snowshoe hare report"))
        .stdout(predicate::str::contains("26 records"))
        .stdout(predicate::str::contains("23 of them juvenile"))
        .stdout(predicate::str::contains("between 1999 and 2001"))
        .stdout(predicate::str::contains(
            "ranged from 5 to 9 (mean 7.67, median 9.00)",
        ));
}

#[test]
fn test_text_report_weight_comparison_values() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--charts-dir").arg(charts.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("30.00 g less than juvenile males"))
        .stdout(predicate::str::contains("(710.00 g vs 740.00 g)"))
        .stdout(predicate::str::contains("4.05% relative to the male mean"))
        .stdout(predicate::str::contains("t(18) = -3.29, p = 0.0041"))
        .stdout(predicate::str::contains("is statistically significant at"))
        .stdout(predicate::str::contains("Cohen's d = -1.47 (large effect)"));
}

#[test]
fn test_text_report_sex_table_values() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--charts-dir").arg(charts.path());

    // female median 707.50, shared sample sd 20.41
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("707.50"))
        .stdout(predicate::str::contains("737.50"))
        .stdout(predicate::str::contains("20.41"));
}

#[test]
fn test_text_report_regression_values() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--charts-dir").arg(charts.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(n = 21)"))
        .stdout(predicate::str::contains("0.11 mm per gram"))
        .stdout(predicate::str::contains("hindfoot = 52.44 + 0.11 x weight"))
        .stdout(predicate::str::contains("79.04% of the variance"))
        .stdout(predicate::str::contains("R^2 = 0.79"))
        .stdout(predicate::str::contains("F(1, 19) = 71.66"))
        .stdout(predicate::str::contains("p = < 0.0001"))
        .stdout(predicate::str::contains("Pearson's r = 0.89"));
}

#[test]
fn test_text_format_writes_all_three_charts() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--charts-dir").arg(charts.path());
    cmd.assert().success();

    for name in [
        "annual_counts.svg",
        "weight_by_sex_site.svg",
        "weight_vs_hindfoot.svg",
    ] {
        let path = charts.path().join(name);
        assert!(path.exists(), "missing figure {name}");
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }
}

#[test]
fn test_stricter_alpha_flips_the_verdict() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--charts-dir")
        .arg(charts.path())
        .arg("--alpha")
        .arg("0.001");

    // p = 0.0041 clears 0.05 but not 0.001
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("is not statistically significant"))
        .stdout(predicate::str::contains("alpha = 0.001"));
}

// ============================================================================
// Markdown format
// ============================================================================

#[test]
fn test_markdown_report_structure() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--format")
        .arg("markdown")
        .arg("--charts-dir")
        .arg(charts.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("# Juvenile snowshoe hare report"))
        .stdout(predicate::str::contains("| year | captures |"))
        .stdout(predicate::str::contains("| 1999 | 9 |"))
        .stdout(predicate::str::contains("| 2001 | 5 |"))
        .stdout(predicate::str::contains("![Annual juvenile captures]("))
        .stdout(predicate::str::contains("annual_counts.svg"))
        .stdout(predicate::str::contains("weight_vs_hindfoot.svg"));
}

#[test]
fn test_markdown_format_writes_charts() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--format")
        .arg("markdown")
        .arg("--charts-dir")
        .arg(charts.path());
    cmd.assert().success();

    assert!(charts.path().join("weight_by_sex_site.svg").exists());
}

// ============================================================================
// HTML format
// ============================================================================

#[test]
fn test_html_report_inlines_figures() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--format")
        .arg("html")
        .arg("--charts-dir")
        .arg(charts.path().join("figs"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<svg"))
        .stdout(predicate::str::contains("</html>"));

    // inlined figures, nothing on disk
    assert!(!charts.path().join("figs").exists());
}

// ============================================================================
// JSON format
// ============================================================================

#[test]
fn test_json_report_values() {
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"format\": \"lepus-report-v1\""))
        .stdout(predicate::str::contains("\"total_observations\": 26"))
        .stdout(predicate::str::contains("\"juvenile_captures\": 23"))
        .stdout(predicate::str::contains("\"captures\": 9"))
        .stdout(predicate::str::contains("\"n_female\": 10"))
        .stdout(predicate::str::contains("\"mean_female_g\": 710.0"))
        .stdout(predicate::str::contains("\"mean_difference_g\": -30.0"))
        .stdout(predicate::str::contains("\"cohens_d\": -1.469"))
        .stdout(predicate::str::contains("-3.2863"))
        .stdout(predicate::str::contains("\"df_residual\": 19"))
        .stdout(predicate::str::contains("0.11047"));
}

#[test]
fn test_json_format_writes_no_charts() {
    let charts = TempDir::new().unwrap();
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--format")
        .arg("json")
        .arg("--charts-dir")
        .arg(charts.path().join("figs"));
    cmd.assert().success();

    assert!(!charts.path().join("figs").exists());
}

// ============================================================================
// Output file
// ============================================================================

#[test]
fn test_out_flag_writes_report_to_file() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.txt");
    let mut cmd = lepus();
    cmd.arg(FIXTURE)
        .arg("--charts-dir")
        .arg(dir.path().join("figures"))
        .arg("-o")
        .arg(&report_path);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Juvenile snowshoe hare report"));
    assert!(report.contains("t(18) = -3.29"));
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = lepus();
    cmd.arg("no_such_file.csv");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"))
        .stderr(predicate::str::contains("no_such_file.csv"));
}

#[test]
fn test_unknown_grid_code_fails_with_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_grid.csv");
    fs::write(
        &path,
        "date,grid,sex,age,weight,hindft\n1/14/1999,bonxyz,f,j,700,132\n",
    )
    .unwrap();

    let mut cmd = lepus();
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("row 1"))
        .stderr(predicate::str::contains("unrecognized trapping grid"));
}

#[test]
fn test_unparseable_date_fails_with_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_date.csv");
    fs::write(
        &path,
        "date,grid,sex,age,weight,hindft\n\
         1/14/1999,bonbs,f,j,700,132\n\
         14/44/1999,bonbs,m,j,730,135\n",
    )
    .unwrap();

    let mut cmd = lepus();
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("row 2"))
        .stderr(predicate::str::contains("date"));
}

#[test]
fn test_missing_required_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_weight.csv");
    fs::write(
        &path,
        "date,grid,sex,age,hindft\n1/14/1999,bonbs,f,j,132\n",
    )
    .unwrap();

    let mut cmd = lepus();
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"))
        .stderr(predicate::str::contains("weight"));
}

#[test]
fn test_adults_only_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adults.csv");
    fs::write(
        &path,
        "date,grid,sex,age,weight,hindft\n\
         1/20/1999,bonrip,f,a,1240,140\n\
         2/2/2000,bonmat,m,a,1310,145\n",
    )
    .unwrap();

    let mut cmd = lepus();
    cmd.arg(&path);
    cmd.assert().failure().stderr(predicate::str::contains(
        "insufficient data for juvenile capture report",
    ));
}

#[test]
fn test_invalid_alpha_is_rejected() {
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--alpha").arg("1.5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("alpha must be strictly between"));
}

#[test]
fn test_invalid_format_is_rejected() {
    let mut cmd = lepus();
    cmd.arg(FIXTURE).arg("--format").arg("yaml");

    cmd.assert().failure().stderr(predicate::str::contains(
        "invalid value 'yaml' for '--format <FORMAT>'",
    ));
}
