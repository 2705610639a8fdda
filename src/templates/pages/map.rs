// templates/pages/map.rs

use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};
use std::time::Duration;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const MAP_CSS: &str = "html, body, #map { height: 100%; margin: 0; }";

pub fn map_page(poll_interval: Duration) -> Markup {
    desktop_layout(
        "House Pins",
        html! {
            link rel="stylesheet" href=(LEAFLET_CSS);
            script src=(LEAFLET_JS) {}
            style { (PreEscaped(MAP_CSS)) }
        },
        html! {
            div id="map" {}
            script { (PreEscaped(map_script(poll_interval))) }
        },
    )
}

fn map_script(poll_interval: Duration) -> String {
    format!(
        "const POLL_MS = {};\n{}",
        poll_interval.as_millis(),
        MAP_JS
    )
}

// Thin renderer: all diffing and geocoding happens server-side, the
// page just mirrors the pin set it gets from /api/pins.
const MAP_JS: &str = r#"
const map = L.map('map').setView([48.4284, -123.3656], 13);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

const markers = {};
let fitted = false;

async function syncPins() {
  let payload;
  try {
    const resp = await fetch('/api/pins');
    if (!resp.ok) return;
    payload = await resp.json();
  } catch (e) {
    return; // stale pins beat no pins
  }

  const seen = new Set();
  for (const pin of payload.pins) {
    seen.add(pin.identifier);
    if (markers[pin.identifier]) continue;

    const marker = L.marker([pin.coordinates.lat, pin.coordinates.lon]).addTo(map);
    const link = document.createElement('a');
    link.href = pin.file_reference;
    link.textContent = pin.address;
    marker.bindPopup(link);
    marker.bindTooltip(pin.address);
    markers[pin.identifier] = marker;
  }

  for (const identifier of Object.keys(markers)) {
    if (!seen.has(identifier)) {
      map.removeLayer(markers[identifier]);
      delete markers[identifier];
    }
  }

  const placed = Object.values(markers);
  if (!fitted && placed.length > 0) {
    map.fitBounds(L.featureGroup(placed).getBounds().pad(0.2));
    fitted = true;
  }
}

syncPins();
setInterval(syncPins, POLL_MS);
"#;
