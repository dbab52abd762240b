use num_traits::Float;
use std::ops::{Add, Mul, Sub};

/// Trait for interpolation between two values
pub trait Interpolator<T, V>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V;
}

/// Keyframes, used to construct (and define) a piecewise interpolator
/// Generic keyframe: maps an input (query) to an output value.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T, V> {
    pub input: T,
    pub output: V,
}

/// Piecewise interpolation between keyframes on the unit domain [0,1].
/// Queries outside of the domain are clamped to the first or last keyframe.
pub struct KeyframeInterpolator<T, V, F>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    queries: Vec<T>,
    values: Vec<V>,
    interpolator: F,
}

impl<T, V, F> KeyframeInterpolator<T, V, F>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    pub fn new(keyframes: Vec<InterpolationKeyframe<T, V>>, interpolator: F) -> Self {
        assert!(keyframes.len() >= 2, "at least two keyframes are required");
        assert!(
            keyframes[0].input == T::zero(),
            "first keyframe input must be 0.0"
        );
        assert!(
            keyframes[keyframes.len() - 1].input == T::one(),
            "last keyframe input must be 1.0"
        );

        for pair in keyframes.windows(2) {
            assert!(
                pair[0].input < pair[1].input,
                "keyframes must be strictly increasing"
            );
        }

        let queries = keyframes.iter().map(|k| k.input).collect();
        let values = keyframes.iter().map(|k| k.output).collect();

        Self {
            queries,
            values,
            interpolator,
        }
    }

    pub fn evaluate(&self, query: T) -> V {
        let last = self.values.len() - 1;
        if query <= T::zero() {
            self.values[0]
        } else if query >= T::one() {
            self.values[last]
        } else {
            let idx_upp = self.queries.partition_point(|q| query >= *q).min(last);
            let idx_low = idx_upp - 1;
            let val_low = self.queries[idx_low];
            let alpha = (query - val_low) / (self.queries[idx_upp] - val_low);
            self.interpolator
                .interpolate(alpha, &self.values[idx_low], &self.values[idx_upp])
        }
    }
}

impl<V, F> KeyframeInterpolator<f32, V, F>
where
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<f32, Output = V>,
    F: Interpolator<f32, V>,
{
    /**
     * Places the values at uniformly spaced queries: `0, 1/(n-1), ..., 1`.
     * This matches a strip of `n` vertices spread evenly across a row.
     */
    pub fn with_uniform_spacing(values: &[V], interpolator: F) -> Self {
        // `i / (n - 1)` is exactly 1.0 for the last vertex
        let scale = values.len().saturating_sub(1).max(1) as f32;
        let keyframes = values
            .iter()
            .enumerate()
            .map(|(i, output)| InterpolationKeyframe {
                input: (i as f32) / scale,
                output: *output,
            })
            .collect();
        Self::new(keyframes, interpolator)
    }
}

/// Linear interpolation: a * (1 - alpha) + b * alpha
#[derive(Default, Clone, Copy, Debug)]
pub struct LinearInterpolator;

impl<T, V> Interpolator<T, V> for LinearInterpolator
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        *a + (*b - *a) * alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_linear_interpolation_between_keyframes() {
        let interpolator = KeyframeInterpolator::new(
            vec![
                InterpolationKeyframe {
                    input: 0.0f32,
                    output: 2.0f32,
                },
                InterpolationKeyframe {
                    input: 0.25,
                    output: 4.0,
                },
                InterpolationKeyframe {
                    input: 1.0,
                    output: 1.0,
                },
            ],
            LinearInterpolator,
        );

        assert_relative_eq!(interpolator.evaluate(0.0), 2.0);
        assert_relative_eq!(interpolator.evaluate(0.125), 3.0);
        assert_relative_eq!(interpolator.evaluate(0.25), 4.0);
        assert_relative_eq!(interpolator.evaluate(0.625), 2.5);
        assert_relative_eq!(interpolator.evaluate(1.0), 1.0);

        // Clamped outside of the domain
        assert_relative_eq!(interpolator.evaluate(-3.0), 2.0);
        assert_relative_eq!(interpolator.evaluate(7.0), 1.0);
    }

    #[test]
    fn test_uniform_spacing_with_vectors() {
        let values = [
            Vector3::new(0.0f32, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 4.0, 0.0),
        ];
        let interpolator = KeyframeInterpolator::with_uniform_spacing(&values, LinearInterpolator);

        let tol = 1e-6;
        assert_relative_eq!(
            interpolator.evaluate(0.25),
            Vector3::new(0.5, 1.0, 1.5),
            epsilon = tol
        );
        assert_relative_eq!(interpolator.evaluate(0.5), values[1], epsilon = tol);
        assert_relative_eq!(
            interpolator.evaluate(0.75),
            Vector3::new(0.5, 3.0, 1.5),
            epsilon = tol
        );
    }

    #[test]
    #[should_panic(expected = "at least two keyframes")]
    fn test_single_keyframe_is_rejected() {
        KeyframeInterpolator::<f32, f32, _>::with_uniform_spacing(&[1.0], LinearInterpolator);
    }
}
