use std::error::Error;

use userfetch::fetcher::{self, FetchOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let options = FetchOptions {
        nationalities: vec!["US".to_string(), "GB".to_string()],
        timeout_seconds: 10,
        ..Default::default()
    };
    let client = fetcher::build_client(&options)?;
    let records = fetcher::fetch_records(&client, &options, 10).await?;

    println!("Fetched: {}", records.len());
    for (i, r) in records.iter().enumerate() {
        println!("{} {} {} {}", i, r.full_name(), r.email, r.location.country);
    }

    Ok(())
}
