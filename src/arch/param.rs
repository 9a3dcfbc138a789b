use ndarray::Array1;

/// A named model parameter's value, either a vector or a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Vector(Array1<f32>),
    Scalar(f32),
}

impl ParamValue {
    pub fn as_vector(&self) -> Option<&Array1<f32>> {
        match self {
            ParamValue::Vector(v) => Some(v),
            ParamValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            ParamValue::Scalar(s) => Some(*s),
            ParamValue::Vector(_) => None,
        }
    }
}
