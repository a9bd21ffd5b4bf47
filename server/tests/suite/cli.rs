use anyhow::Result;
use assert_cmd::Command;
use clinvar_store::ClinvarStore;
use predicates::str::contains;
use pretty_assertions::assert_eq;

#[test]
fn init_db_creates_an_empty_report_database() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("clinvar.db");

    Command::cargo_bin("clinvar-conflicts")?
        .args(["init-db", "--db"])
        .arg(&db_path)
        .assert()
        .success();

    let store = ClinvarStore::open(&db_path)?;
    assert_eq!(store.max_date()?, None);
    assert!(store.methods()?.is_empty());
    Ok(())
}

#[test]
fn serve_refuses_a_missing_database() -> Result<()> {
    let dir = tempfile::tempdir()?;
    Command::cargo_bin("clinvar-conflicts")?
        .env_remove("CLINVAR_LISTEN")
        .args(["serve", "--db"])
        .arg(dir.path().join("missing.db"))
        .assert()
        .failure()
        .stderr(contains("does not exist"));
    Ok(())
}

#[test]
fn help_lists_subcommands() -> Result<()> {
    Command::cargo_bin("clinvar-conflicts")?
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("serve"))
        .stdout(contains("init-db"));
    Ok(())
}
