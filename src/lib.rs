use pyo3::prelude::*;

use model::{PyRoutingModel, py_create_routing_model};
use routing::find_routes;

pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn zelenasled(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyRoutingModel>()?;
    m.add_function(wrap_pyfunction!(py_create_routing_model, m)?)?;
    m.add_function(wrap_pyfunction!(find_routes, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
