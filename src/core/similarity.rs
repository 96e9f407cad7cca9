//! Vector math for semantic similarity

use ndarray::ArrayView1;

/// Cosine similarity in [-1.0, 1.0].
///
/// Zero-magnitude vectors have no direction, so they score 0.0 against
/// everything, as does any pair whose result is not finite.
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
	let sq_a = dot64(a, a);
	let sq_b = dot64(b, b);

	if sq_a == 0.0 || sq_b == 0.0 {
		return 0.0;
	}

	// sqrt(|a|² · |b|²) keeps cosine(a, a) exactly 1.0
	let score = dot64(a, b) / (sq_a * sq_b).sqrt();
	if score.is_finite() {
		score.clamp(-1.0, 1.0) as f32
	} else {
		0.0
	}
}

/// f32 products cannot overflow or underflow to zero in f64
fn dot64(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f64 {
	a.iter().zip(b.iter()).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum()
}

/// L2-normalized copy; zero vectors are returned unchanged
pub fn normalize(v: &[f32]) -> Vec<f32> {
	let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
	if norm > 0.0 {
		v.iter().map(|x| x / norm).collect()
	} else {
		v.to_vec()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::arr1;

	fn cos(a: &[f32], b: &[f32]) -> f32 {
		cosine_similarity(ArrayView1::from(a), ArrayView1::from(b))
	}

	#[test]
	fn identical_vectors_score_one() {
		assert_eq!(cos(&[0.3, -1.2, 4.0], &[0.3, -1.2, 4.0]), 1.0);
	}

	#[test]
	fn orthogonal_vectors_score_zero() {
		assert!(cos(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
	}

	#[test]
	fn opposite_vectors_score_minus_one() {
		assert!((cos(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
	}

	#[test]
	fn magnitude_does_not_matter() {
		assert!((cos(&[0.5, 0.5, 0.5], &[2.0, 2.0, 2.0]) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn zero_vector_scores_zero() {
		assert_eq!(cos(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
		assert_eq!(cos(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
	}

	#[test]
	fn scores_stay_in_range() {
		let vectors = [
			arr1(&[1.0f32, 2.0, 3.0]),
			arr1(&[-4.0f32, 0.5, 9.0]),
			arr1(&[1e-3f32, -1e3, 7.0]),
			arr1(&[3.0f32, 3.0, 3.0]),
		];
		for a in &vectors {
			for b in &vectors {
				let s = cosine_similarity(a.view(), b.view());
				assert!((-1.0..=1.0).contains(&s), "{s} out of range");
			}
		}
	}

	#[test]
	fn extreme_magnitudes_keep_their_direction() {
		assert_eq!(cos(&[1e-25, 0.0], &[1e-25, 0.0]), 1.0);
		assert_eq!(cos(&[1e20, 0.0], &[1e20, 0.0]), 1.0);
		assert!((cos(&[2e19, 3e19], &[2e19, 3e19]) - 1.0).abs() < 1e-6);
		assert!((cos(&[1e-30, 1e-30], &[1e30, 1e30]) - 1.0).abs() < 1e-6);
		assert!(cos(&[f32::MAX, 0.0], &[0.0, f32::MAX]).abs() < 1e-6);
	}

	#[test]
	fn normalize_produces_unit_length() {
		let v = normalize(&[3.0, 4.0]);
		assert!((v[0] - 0.6).abs() < 1e-6);
		assert!((v[1] - 0.8).abs() < 1e-6);
		assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
	}
}
