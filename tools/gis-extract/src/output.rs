use anyhow::{Context, Result};
use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use std::path::Path;
use yerevan_transit::{Route, TransitNetwork};

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Write the network document the mobile app bundles as an asset
pub fn write_network_json(network: &TransitNetwork, output_path: &Path) -> Result<()> {
    create_parent_dir(output_path)?;

    let json_string = serde_json::to_string(network).context("Failed to serialize network")?;
    std::fs::write(output_path, &json_string)
        .with_context(|| format!("Failed to write network to {}", output_path.display()))?;

    log::info!(
        "Wrote {} ({:.1} KB)",
        output_path.display(),
        json_string.len() as f64 / 1024.0
    );
    Ok(())
}

/// Stop sequence of a route as a lon/lat line
fn route_line(network: &TransitNetwork, route: &Route) -> LineString<f64> {
    network
        .refs_for(route.id)
        .iter()
        .filter_map(|r| network.stops.iter().find(|s| s.id == r.stop_id))
        .map(|s| Coord {
            x: s.longitude,
            y: s.latitude,
        })
        .collect()
}

fn route_to_feature(network: &TransitNetwork, route: &Route) -> Feature {
    let line = route_line(network, route);

    let mut properties = serde_json::Map::new();
    properties.insert("id".to_string(), serde_json::json!(route.id));
    properties.insert("number".to_string(), serde_json::json!(route.number));
    properties.insert("name".to_string(), serde_json::json!(route.name));
    properties.insert("category".to_string(), serde_json::json!(route.category));
    properties.insert("color".to_string(), serde_json::json!(route.color));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Write every route as a LineString feature for previewing in a GIS viewer
pub fn write_routes_geojson(network: &TransitNetwork, output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} route lines to {}",
        network.routes.len(),
        output_path.display()
    );
    create_parent_dir(output_path)?;

    let features: Vec<Feature> = network
        .routes
        .iter()
        .map(|route| route_to_feature(network, route))
        .collect();

    let feature_collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
