use ndarray::{Array1, ArrayView1};

/// Traces the line drawn for one iteration, `y = x*w0 + x*w1 + bias`.
///
/// NOTE: this is not the zero set of `w·x + b`, it is the curve the animation has always
/// shown and is kept as is.
///
/// # Arguments
/// * `w` - The weights of the iteration, only the first two are used.
/// * `bias` - The bias of the iteration.
/// * `x_range` - The inclusive range the x values span.
/// * `samples` - The amount of evenly spaced x values.
///
/// # Returns
/// The `(x, y)` points of the line.
pub fn boundary_line(
    w: ArrayView1<f32>,
    bias: f32,
    x_range: (f32, f32),
    samples: usize,
) -> Vec<(f32, f32)> {
    let w0 = w.get(0).copied().unwrap_or_default();
    let w1 = w.get(1).copied().unwrap_or_default();

    Array1::linspace(x_range.0, x_range.1, samples)
        .iter()
        .map(|&x| (x, x * w0 + x * w1 + bias))
        .collect()
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn both_weights_multiply_x() {
        let line = boundary_line(array![1., 2.].view(), 3., (-10., 10.), 3);

        assert_eq!(line, [(-10., -27.), (0., 3.), (10., 33.)]);
    }

    #[test]
    fn endpoints_are_included() {
        let line = boundary_line(array![0., 0.].view(), 1., (-10., 10.), 1000);

        assert_eq!(line.len(), 1000);
        assert_eq!(line[0], (-10., 1.));
        assert!((line[999].0 - 10.).abs() < 1e-4);
        assert_eq!(line[999].1, 1.);
    }
}
