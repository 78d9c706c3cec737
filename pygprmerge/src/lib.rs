use gprmerge_core::io::gpr_parse::parse_gpr;
use gprmerge_core::metabolic_model::gpr::{Gpr, GprError};

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: GprError) -> PyErr {
    match err {
        GprError::MalformedRecord(_) => PyValueError::new_err(err.to_string()),
        GprError::RepresentationInvariant(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

#[pyclass(name = "Gpr")]
struct PyGpr {
    inner: Gpr,
}

#[pymethods]
impl PyGpr {
    /// Parse a GPR rule such as `"(b0978 and b0979) or b0733"`
    #[new]
    fn new(rule: &str) -> PyResult<Self> {
        let inner = parse_gpr(rule).map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(PyGpr { inner })
    }

    #[staticmethod]
    fn no_gene() -> Self {
        PyGpr {
            inner: Gpr::no_gene(),
        }
    }

    #[staticmethod]
    fn spontaneous() -> Self {
        PyGpr {
            inner: Gpr::spontaneous(),
        }
    }

    #[staticmethod]
    fn universal() -> Self {
        PyGpr {
            inner: Gpr::universal(),
        }
    }

    fn merge(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        let inner = self.inner.merge(&other.inner).map_err(to_py_err)?;
        Ok(PyGpr { inner })
    }

    fn reduce(&self) -> PyResult<Self> {
        let inner = self.inner.reduce().map_err(to_py_err)?;
        Ok(PyGpr { inner })
    }

    fn features(&self) -> Vec<String> {
        self.inner.features().iter().cloned().collect()
    }

    fn tag(&self) -> String {
        self.inner.tag().as_str().to_string()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn contains_feature(&self, feature: &str) -> bool {
        self.inner.contains_feature(feature)
    }

    fn to_rule_string(&self) -> String {
        self.inner.to_rule_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Gpr({}, tag={})", self.inner, self.inner.tag())
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGpr>()?;
    Ok(())
}
