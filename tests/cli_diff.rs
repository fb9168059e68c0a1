use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn command_diff_simple() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    let output = cmd
        .arg("diff")
        .arg("tests/delta/simple.delta")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "\
>chr1
SEQ 0\t1\t0\tctg1
DEL 500\t501\t0\t0\t0
GAP 1000\t1001\t0
>ctg1
SEQ 0\t1\t0\tchr1
DEL 500\t501\t0\t0\t0
GAP 1000\t1001\t0
>ctg2
GAP 0\t101\t100
DUP 101\t300\t200
GAP 300\t301\t0
"
    );

    Ok(())
}

#[test]
fn command_diff_complex() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    let output = cmd
        .arg("diff")
        .arg("tests/delta/complex.delta")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout,
        "\
>chrA
SEQ 0\t1\t0\tscf1
INS 800\t851\t50\t0\t50
INV 1500\t1501\t0
SEQ 2000\t2101\t100\tscf2
GAP 3000\t3001\t0
>chrB
SEQ 0\t1\t0\tscf3
JMP 1000\t1001\t0
GAP 2000\t2001\t0
>scf1
SEQ 0\t1\t0\tchrA
DEL 800\t801\t0\t50\t-50
INV 1450\t1501\t50
GAP 2000\t2501\t500
>scf2
SEQ 0\t1\t0\tchrA
GAP 900\t1001\t100
>scf3
SEQ 0\t1\t0\tchrB
JMP 1000\t1001\t0
GAP 2000\t2001\t0
"
    );

    Ok(())
}

#[test]
fn command_diff_ref_qry_only() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg("tests/delta/simple.delta")
        .arg("-r")
        .assert()
        .success()
        .stdout(predicate::str::contains(">chr1"))
        .stdout(predicate::str::contains(">ctg1").not())
        .stdout(predicate::str::contains("DUP").not());

    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg("tests/delta/simple.delta")
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains(">chr1").not())
        .stdout(predicate::str::contains(">ctg2\nGAP 0\t101\t100\nDUP 101\t300\t200\n"));

    Ok(())
}

#[test]
fn command_diff_feature() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    let output = cmd
        .arg("diff")
        .arg("tests/delta/simple.delta")
        .arg("-q")
        .arg("-f")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(!stdout.contains('>'));
    assert_eq!(stdout.matches("{FEA\n").count(), 6);
    assert!(stdout.contains("{FEA\ntyp:A\nclr:101,300\ncom:DUP 101\t300\t200\nsrc:ctg2,CTG\n}\n"));
    assert!(stdout.contains("{FEA\ntyp:A\nclr:0,1\ncom:SEQ 0\t1\t0\tchr1\nsrc:ctg1,CTG\n}\n"));

    Ok(())
}

#[test]
fn command_diff_parallel() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    let single = cmd
        .arg("diff")
        .arg("tests/delta/complex.delta")
        .output()?;

    let mut cmd = cargo_bin_cmd!("dlt");
    let multi = cmd
        .arg("diff")
        .arg("tests/delta/complex.delta")
        .arg("--parallel")
        .arg("4")
        .output()?;

    assert!(multi.status.success());
    assert_eq!(single.stdout, multi.stdout);

    Ok(())
}

#[test]
fn command_diff_stdin_gz_outfile() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::fs::read_to_string("tests/delta/simple.delta")?;

    let mut cmd = cargo_bin_cmd!("dlt");
    let expected = cmd
        .arg("diff")
        .arg("stdin")
        .write_stdin(input.clone())
        .output()?
        .stdout;
    assert!(!expected.is_empty());

    let tempdir = TempDir::new()?;
    let gz_path = tempdir.path().join("simple.delta.gz");
    let out_path = tempdir.path().join("simple.diff");
    {
        let file = std::fs::File::create(&gz_path)?;
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(input.as_bytes())?;
        encoder.finish()?;
    }

    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg(gz_path.to_str().unwrap())
        .arg("-o")
        .arg(out_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read(&out_path)?, expected);

    Ok(())
}

#[test]
fn command_diff_usage_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));

    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg("tests/delta/simple.delta")
        .arg("tests/delta/complex.delta")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_diff_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg("tests/delta/not-exist.delta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));

    let mut cmd = cargo_bin_cmd!("dlt");
    cmd.arg("diff")
        .arg("stdin")
        .write_stdin("ref.fa qry.fa\nNUCMER\n>r1 q1 100 100\n1 50 1 x 0 0 0\n0\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Line 4"));

    Ok(())
}
