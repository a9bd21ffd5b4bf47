use super::support::TestServer;
use anyhow::Result;

#[tokio::test]
async fn landing_page_shows_latest_release() -> Result<()> {
    let server = TestServer::seeded().await?;
    let body = server.page("/").await?;
    assert!(body.contains("01 Feb 2019"));
    Ok(())
}

#[tokio::test]
async fn significance_overview_and_drill_down() -> Result<()> {
    let server = TestServer::seeded().await?;

    let overview = server.page("/conflicting-variants-by-significance").await?;
    for header in ["pathogenic", "uncertain significance", "benign", "Likely pathogenic"] {
        assert!(overview.contains(&format!("<th>{header}</th>")), "{header}");
    }

    let starred = server
        .page("/conflicting-variants-by-significance?min_stars=1")
        .await?;
    assert!(!starred.contains("<th>uncertain significance</th>"));

    let variants = server
        .page("/conflicting-variants-by-significance/pathogenic/benign")
        .await?;
    assert!(variants.contains("RCV000001"));
    assert!(variants.contains("Beta Labs"));
    assert!(!variants.contains("RCV000003"));
    Ok(())
}

#[tokio::test]
async fn submitter_drill_down_levels() -> Result<()> {
    let server = TestServer::seeded().await?;

    let index = server.page("/conflicting-variants-by-submitter").await?;
    assert!(index.contains("Alpha Genetics"));
    assert!(index.contains("Gamma Clinic"));

    let one = server.page("/conflicting-variants-by-submitter/1").await?;
    assert!(one.contains("Conflicts between Alpha Genetics and all other submitters"));
    assert!(one.contains("Beta Labs"));
    assert!(one.contains("clinical testing"));

    let any_other = server.page("/conflicting-variants-by-submitter/1/0").await?;
    assert!(any_other.contains("any other submitter"));

    let unknown = server.page("/conflicting-variants-by-submitter/4").await?;
    assert!(unknown.contains("Conflicts between 4 and"));

    let variants = server
        .page("/conflicting-variants-by-submitter/1/3/Likely%20pathogenic/uncertain%20significance")
        .await?;
    assert!(variants.contains("RCV000003"));
    assert!(variants.contains("RCV000004"));
    Ok(())
}

#[tokio::test]
async fn escaped_slash_in_gene_is_restored() -> Result<()> {
    let server = TestServer::seeded().await?;

    let genes = server.page("/submissions-by-gene").await?;
    assert!(genes.contains("BRCA1%252Ftest"));

    let variants = server.page("/submissions-by-gene/BRCA1%252Ftest").await?;
    assert!(variants.contains("NM_007294.3(BRCA1):c.2T"));
    assert!(!variants.contains("NM_000059.3(BRCA2)"));
    Ok(())
}

#[tokio::test]
async fn submissions_on_one_variant() -> Result<()> {
    let server = TestServer::seeded().await?;

    let body = server.page("/submissions-by-variant/100").await?;
    assert!(body.contains("RCV000001"));
    assert!(body.contains("RCV000002"));
    assert!(body.contains("20 Nov 2018"));

    let filtered = server.page("/submissions-by-variant/100?min_stars=2").await?;
    assert!(filtered.contains("RCV000001"));
    assert!(!filtered.contains("RCV000002"));
    Ok(())
}

#[tokio::test]
async fn significance_term_reports() -> Result<()> {
    let server = TestServer::seeded().await?;

    let index = server.page("/significance-terms").await?;
    assert!(index.contains("drug response"));
    assert!(index.contains("protective"));

    let term = server.page("/significance-terms/pathogenic").await?;
    assert!(term.contains("Alpha Genetics"));

    server.page("/significance-terms/").await?;
    Ok(())
}

#[tokio::test]
async fn method_reports_pivot_by_release() -> Result<()> {
    let server = TestServer::seeded().await?;

    let conflicting = server
        .page("/total-conflicting-submissions-by-method")
        .await?;
    assert!(conflicting.contains("<th>research</th>"));
    assert!(conflicting.contains("01 Jan 2019"));

    let all = server.page("/total-submissions-by-method").await?;
    assert!(all.contains("<th>literature only</th>"));
    Ok(())
}

#[tokio::test]
async fn country_reports() -> Result<()> {
    let server = TestServer::seeded().await?;

    let index = server.page("/total-submissions-by-country").await?;
    assert!(index.contains("United Kingdom"));

    let uk = server
        .page("/total-submissions-by-country/United%20Kingdom")
        .await?;
    assert!(uk.contains("Beta Labs"));
    assert!(!uk.contains("Alpha Genetics"));

    let unknown = server.page("/total-submissions-by-country/").await?;
    assert!(unknown.contains("Gamma Clinic"));
    Ok(())
}
