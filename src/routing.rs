use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use zelenasled_core::prelude::*;

use crate::model::{PyRoutingModel, parse_mode};

fn to_py_err(error: Error) -> PyErr {
    match error.kind() {
        ErrorKind::Input
        | ErrorKind::Unreachable
        | ErrorKind::Coverage
        | ErrorKind::InsufficientCandidates => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(error.to_string())
        }
        ErrorKind::Precondition | ErrorKind::Internal => {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(error.to_string())
        }
    }
}

/// Find up to three routes between two points
///
/// Parameters
/// ----------
/// routing_model : RoutingModel
///     Model created by ``create_routing_model``
/// origin : tuple[float, float]
///     Origin as (lat, lon)
/// destination : tuple[float, float]
///     Destination as (lat, lon)
/// commute_mode : str
///     ``"walk"`` or ``"bike"``
/// routing_mode : str, optional
///     ``None`` for the shortest routes, or one of ``"vegetation"``, ``"heat"``,
///     ``"noise"``, ``"quietest"``
///
/// Returns
/// -------
/// str
///     GeoJSON FeatureCollection with one LineString feature per route
///
/// Raises
/// ------
/// ValueError
///     For invalid input, unreachable destinations or missing environmental coverage
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (routing_model, origin, destination, commute_mode, routing_mode=None))]
pub fn find_routes(
    routing_model: &PyRoutingModel,
    origin: (f64, f64),
    destination: (f64, f64),
    commute_mode: &str,
    routing_mode: Option<&str>,
) -> PyResult<String> {
    let request = RouteRequest::from_lat_lon(
        [origin.0, origin.1],
        [destination.0, destination.1],
        parse_mode(commute_mode)?,
        RoutingCriterion::from_mode(routing_mode).map_err(to_py_err)?,
    );

    find_green_routes(&routing_model.model, &request)
        .and_then(|selection| selection.to_geojson_string())
        .map_err(to_py_err)
}
