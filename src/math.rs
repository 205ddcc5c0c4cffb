/// 3D vector as `[x, y, z]`
pub type Vec3 = [f64; 3];

/// Row-major 3x3 matrix
pub type Mat3 = [[f64; 3]; 3];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation around the X-axis
pub fn rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Rotation around the Y-axis
pub fn rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Rotation around the Z-axis
pub fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn length(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Returns the unit vector pointing along `v`, or `v` itself when it is zero
pub fn normalize(v: &Vec3) -> Vec3 {
    let len = length(v);
    if len == 0.0 {
        return *v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

pub fn scale(v: &Vec3, factor: f64) -> Vec3 {
    [v[0] * factor, v[1] * factor, v[2] * factor]
}

/// Interpolates three values with barycentric weights
pub fn barycentric(a: f64, b: f64, c: f64, w: &[f64; 3]) -> f64 {
    a * w[0] + b * w[1] + c * w[2]
}

/// Lambertian light intensity for a directional light plus an ambient term.
///
/// `light_dir` points from the surface towards the light and must be normalized.
pub fn calculate_light_intensity(normal: &Vec3, light_dir: &Vec3, ambient: f64) -> f64 {
    ambient + dot(normal, light_dir).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: &Vec3, b: &Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn quarter_turns_move_axes() {
        let x = [1.0, 0.0, 0.0];
        assert_close(&multiply_matrix_vector(&rotation_y(FRAC_PI_2), &x), &[0.0, 0.0, -1.0]);
        assert_close(&multiply_matrix_vector(&rotation_z(FRAC_PI_2), &x), &[0.0, 1.0, 0.0]);
        let y = [0.0, 1.0, 0.0];
        assert_close(&multiply_matrix_vector(&rotation_x(FRAC_PI_2), &y), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn combined_rotation_matches_sequential_application() {
        let v = [0.3, -1.2, 2.5];
        let combined = multiply_matrices(&rotation_x(0.4), &rotation_y(1.1));
        let sequential =
            multiply_matrix_vector(&rotation_x(0.4), &multiply_matrix_vector(&rotation_y(1.1), &v));
        assert_close(&multiply_matrix_vector(&combined, &v), &sequential);
        assert!((length(&sequential) - length(&v)).abs() < 1e-9);
    }

    #[test]
    fn edge_function_sign_flips_with_side() {
        let a = [0.0, 0.0];
        let b = [10.0, 0.0];
        assert!(edge_function(&a, &b, &[5.0, 5.0]) < 0.0);
        assert!(edge_function(&a, &b, &[5.0, -5.0]) > 0.0);
        assert_eq!(edge_function(&a, &b, &[3.0, 0.0]), 0.0);
    }

    #[test]
    fn light_never_drops_below_ambient() {
        let light = normalize(&[5.0, 3.0, 5.0]);
        let facing_away = scale(&light, -1.0);
        assert_eq!(calculate_light_intensity(&facing_away, &light, 0.2), 0.2);
        assert!((calculate_light_intensity(&light, &light, 0.2) - 1.2).abs() < 1e-9);
    }
}
