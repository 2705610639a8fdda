use crate::config::Config;
use crate::pins::{DirectorySource, NominatimGeocoder, PinEngine};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;

mod config;
mod errors;
mod pins;
mod responses;
mod router;
mod scan;
mod templates;


fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Bad configuration: {e}");
            std::process::exit(1);
        }
    };

    let geocoder = match NominatimGeocoder::new() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("❌ Geocoder init failed: {e}");
            std::process::exit(1);
        }
    };

    // Background poll loop: scan, diff, geocode new pins.
    let engine = PinEngine::new(
        DirectorySource::new(config.listing_dir.clone()),
        geocoder,
    );
    let board = engine.board();

    let interval = config.poll_interval;
    std::thread::spawn(move || engine.run(interval));

    let state = AppState {
        listing_dir: config.listing_dir.clone(),
        board,
        poll_interval: config.poll_interval,
    };

    println!(
        "Starting server at http://{} (scanning {})",
        config.bind_addr,
        config.listing_dir.display()
    );

    let server = Server::bind(&config.bind_addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
