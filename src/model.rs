use std::path::PathBuf;

use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use zelenasled_core::prelude::*;

/// RoutingModel
///
/// Walking and cycling street graphs of one city together with the
/// vegetation, heat and noise datasets used to score candidate routes.
///
/// Example:
///
/// .. code-block:: python
///
///     model = create_routing_model("walk.geojson", "bike.geojson", vegetation_index="ndvi.json")
///     geojson = find_routes(model, (46.05, 14.51), (46.06, 14.52), "walk", "vegetation")
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "RoutingModel", frozen)]
pub struct PyRoutingModel {
    pub(crate) model: RoutingModel,
}

pub(crate) fn parse_mode(mode: &str) -> PyResult<TransportMode> {
    mode.parse()
        .map_err(|e: Error| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyRoutingModel {
    /// Number of street nodes of the ``"walk"`` or ``"bike"`` graph
    pub fn node_count(&self, mode: &str) -> PyResult<usize> {
        Ok(self.model.graphs(parse_mode(mode)?).by_length.node_count())
    }

    /// Number of street segments of the ``"walk"`` or ``"bike"`` graph
    pub fn edge_count(&self, mode: &str) -> PyResult<usize> {
        Ok(self.model.graphs(parse_mode(mode)?).by_length.edge_count())
    }

    /// Names of the loaded environmental datasets
    pub fn datasets(&self) -> Vec<&'static str> {
        let environment = &self.model.environment;
        [
            ("vegetation", environment.vegetation.is_some()),
            ("heat", environment.heat.is_some()),
            ("noise", environment.noise.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, loaded)| loaded.then_some(name))
        .collect()
    }

    fn __repr__(&self) -> String {
        let walk = &self.model.graphs(TransportMode::Walk).by_length;
        let bike = &self.model.graphs(TransportMode::Bike).by_length;
        format!(
            "RoutingModel with walk graph of {} nodes, bike graph of {} nodes and datasets {:?}",
            walk.node_count(),
            bike.node_count(),
            self.datasets()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Create a routing model from street networks and environmental datasets
///
/// Parameters
/// ----------
/// walk_network : str
///     Path to the walking network GeoJSON (nodes with ``osmid``, edges with ``u``, ``v``, ``length``)
/// bike_network : str
///     Path to the cycling network GeoJSON
/// vegetation_index : str, optional
///     H3 vegetation (NDVI) index as JSON ``{cell: value}`` or CSV ``h3,value``
/// heat_index : str, optional
///     H3 heat index in the same formats
/// noise_overlay : str, optional
///     GeoJSON polygons with a ``noise_level`` property
/// length_weight : float, default=1.0
///     Length coefficient of the combined edge cost
/// noise_weight : float, default=1.0
///     Noise coefficient of the combined edge cost
///
/// Returns
/// -------
/// RoutingModel
///
/// Raises
/// ------
/// RuntimeError
///     If a dataset cannot be read or an edge has an invalid weight
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "create_routing_model")]
#[pyo3(signature = (
    walk_network,
    bike_network,
    vegetation_index = None,
    heat_index = None,
    noise_overlay = None,
    length_weight = 1.0,
    noise_weight = 1.0
))]
pub fn py_create_routing_model(
    walk_network: &str,
    bike_network: &str,
    vegetation_index: Option<&str>,
    heat_index: Option<&str>,
    noise_overlay: Option<&str>,
    length_weight: f64,
    noise_weight: f64,
) -> PyResult<PyRoutingModel> {
    let mut config = RoutingModelConfig::new(walk_network, bike_network);
    config.vegetation_index = vegetation_index.map(PathBuf::from);
    config.heat_index = heat_index.map(PathBuf::from);
    config.noise_overlay = noise_overlay.map(PathBuf::from);
    config.weights = CombinedWeights::new(length_weight, noise_weight)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

    let model = zelenasled_core::create_routing_model(&config).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Failed to create routing model: {e}"
        ))
    })?;

    Ok(PyRoutingModel { model })
}
