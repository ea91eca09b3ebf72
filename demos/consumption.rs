use fingrid_opendata::{DateRange, FetchOutcome, FingridApi};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let api = FingridApi::from_env_values()?;
    let events = api.events();

    let now = chrono::Utc::now();
    let range = DateRange::new(now - chrono::Duration::days(2), now);
    println!("range: {:?}", range);

    match events.fetch_range(124, &range, None)? {
        FetchOutcome::Observations(set) => println!("{}", set.as_polars_df()?),
        FetchOutcome::NoData(no_data) => println!("{}", no_data),
    }

    Ok(())
}
