use crate::item::GalleryItem;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// Distance along a normalized ray to the first hit with a sphere.
/// A ray starting inside the sphere hits at `t = 0`.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = oc.dot(ray_dir);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Ray parameter of the hit with a double-sided unit quad (centred, in the
/// local XY plane) stretched to `size` and placed by `transform`.
pub fn ray_quad(ray: &Ray, transform: Mat4, size: Vec2) -> Option<f32> {
    let inv = transform.inverse();
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.direction);
    if d.z.abs() < 1e-8 {
        return None;
    }
    // The direction is not renormalized, so `t` stays a world-space distance.
    let t = -o.z / d.z;
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    (p.x.abs() <= size.x * 0.5 && p.y.abs() <= size.y * 0.5).then_some(t)
}

/// Nearest pickable item hit by `ray`, with its distance.
///
/// Hidden items and items still waiting for their texture are never
/// candidates. Ties are resolved in favour of the lower index.
pub fn pick_nearest<S>(
    items: &[GalleryItem<S>],
    ray: &Ray,
    globe_spin: f32,
) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, item) in items.iter().enumerate() {
        if !item.is_pickable() {
            continue;
        }
        let Some(mesh) = item.mesh.as_ref() else {
            continue;
        };
        let transform = mesh.transform(globe_spin);
        // Cheap reject against the quad's bounding sphere first.
        let bound = mesh.size.length() * 0.5 * mesh.scale;
        let center = transform.transform_point3(Vec3::ZERO);
        if ray_sphere(ray.origin, ray.direction, center, bound).is_none() {
            continue;
        }
        if let Some(t) = ray_quad(ray, transform, mesh.size) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}
