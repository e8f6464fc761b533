use std::error::Error;
use std::time::Duration;

use userfetch::controller::{ControllerEvent, FetchController};
use userfetch::fetcher::FetchOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let (mut controller, mut events) = FetchController::new(FetchOptions {
        seed: Some("lobster".to_string()),
        ..Default::default()
    })?;

    // two inputs inside the debounce window; only the second is fetched
    controller.on_input_changed("50", Duration::from_millis(300));
    controller.on_input_changed("5", Duration::from_millis(300));

    loop {
        match events.recv().await {
            Some(ControllerEvent::Loaded(records)) => {
                for r in records.iter() {
                    println!("{} <{}>", r.full_name(), r.email);
                }
                break;
            }
            Some(ControllerEvent::Failed(err)) => {
                eprintln!("fetch failed: {err}");
                break;
            }
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}
