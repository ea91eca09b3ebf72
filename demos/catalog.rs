use fingrid_opendata::{catalog, fetch_data, FetchOutcome};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    for entry in catalog() {
        println!("{:>4}  {:<40} {}", entry.id, entry.name, entry.description);
    }

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "frequency_RT".to_string());
    let entry = fingrid_opendata::lookup(&name)
        .ok_or_else(|| anyhow::anyhow!("unknown dataset {}", name))?;

    let outcome = fetch_data(
        Some(entry.id),
        Some("2021-01-01T00:00:00+0200"),
        Some("2021-01-01T01:00:00+0200"),
        None,
    )?;
    if let FetchOutcome::Observations(set) = outcome {
        println!("{}", set.as_polars_df()?);
    }

    Ok(())
}
