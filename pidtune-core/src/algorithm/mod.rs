mod lowpass;
mod spline;

pub use lowpass::LowPassFilter;
pub use spline::CubicSpline;

/// Return `num` evenly spaced values over `[start, stop]`.
///
/// Both endpoints are included. A single value yields `start`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;

            (0..num)
                .map(|i| {
                    if i == num - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let dense = linspace(0.0, 29.0, 300);
        assert_eq!(dense.len(), 300);
        assert_eq!(dense[0], 0.0);
        assert_eq!(dense[299], 29.0);
        assert!(dense.windows(2).all(|w| w[1] > w[0]));
    }
}
