use std::path::PathBuf;

use log::info;

use super::{
    config::RoutingModelConfig,
    environment::{load_hex_index, load_noise_overlay},
    network::load_street_network,
};
use crate::{
    Error,
    model::{EnvironmentalData, RawStreetNetwork, RoutingModel, RoutingModelMeta},
};

/// Creates a routing model based on the provided configuration
///
/// # Errors
///
/// Returns an error if a dataset cannot be read, or if an edge of the
/// resulting graphs has a negative or missing weight
pub fn create_routing_model(config: &RoutingModelConfig) -> Result<RoutingModel, Error> {
    validate_config(config)?;
    config.weights.validate()?;

    info!(
        "Processing street networks: walk {}, bike {}",
        config.walk_network.display(),
        config.bike_network.display()
    );

    // Both networks are parsed in their own threads while the
    // environmental datasets load on this one
    let walk_handle = spawn_network_loader(config.walk_network.clone());
    let bike_handle = spawn_network_loader(config.bike_network.clone());

    let environment = EnvironmentalData {
        vegetation: config
            .vegetation_index
            .as_deref()
            .map(load_hex_index)
            .transpose()?,
        heat: config.heat_index.as_deref().map(load_hex_index).transpose()?,
        noise: config
            .noise_overlay
            .as_deref()
            .map(load_noise_overlay)
            .transpose()?,
    };

    let walk = walk_handle
        .join()
        .map_err(|_| Error::UnrecoverableError("Walk network loading thread panicked"))??;
    let bike = bike_handle
        .join()
        .map_err(|_| Error::UnrecoverableError("Bike network loading thread panicked"))??;

    let model = RoutingModel::from_networks(
        walk,
        bike,
        environment,
        RoutingModelMeta {
            weights: config.weights,
            bounds: config.bounds,
        },
    )?;

    info!("Routing model created successfully");
    // Parsing GeoJSON allocates far more than the final graphs keep, and
    // glibc does not return that memory to the system on its own.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::warn!("Memory trimming failed - continuing anyway");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
    Ok(model)
}

fn spawn_network_loader(
    path: PathBuf,
) -> std::thread::JoinHandle<Result<RawStreetNetwork, Error>> {
    std::thread::spawn(move || {
        let network = load_street_network(&path)?;
        info!(
            "Loaded {}: {} nodes, {} edges",
            path.display(),
            network.node_count(),
            network.edge_count()
        );
        Ok(network)
    })
}

fn validate_config(config: &RoutingModelConfig) -> Result<(), Error> {
    let required = [
        ("Walk network", Some(&config.walk_network)),
        ("Bike network", Some(&config.bike_network)),
        ("Vegetation index", config.vegetation_index.as_ref()),
        ("Heat index", config.heat_index.as_ref()),
        ("Noise overlay", config.noise_overlay.as_ref()),
    ];

    for (name, path) in required {
        if let Some(path) = path
            && !path.exists()
        {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{name} file not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}
