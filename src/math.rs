use glam::Vec3;

/// Compute the unit normal of the triangle `(a, b, c)`, oriented by the
/// winding order of the three corners.
///
/// A degenerate (zero area) triangle has no orientation and produces the
/// zero vector.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Compute the interior angle of a triangle at the corner `apex`, where `p`
/// and `q` are the other two corners.
pub fn angle_at(apex: Vec3, p: Vec3, q: Vec3) -> f32 {
    (p - apex).angle_between(q - apex)
}
