use crate::prelude::*;

use std::fmt;
use std::sync::Arc;

/// Height sampler for a heightfield, world (x, z) -> world y
pub type HeightFn = Arc<dyn Fn(f32, f32) -> f32 + Send + Sync>;

#[derive(Clone)]
pub enum Collider {
    /// Infinite plane through `point`
    Plane {
        point: Point3<f32>,
        normal: Vector3<f32>,
    },
    Cuboid(BoxVolume),
    Sphere {
        center: Point3<f32>,
        radius: f32,
    },
    Heightfield(Heightfield),
}

impl Collider {
    /// Horizontal ground plane at `height`
    pub fn ground(height: f32) -> Self {
        Collider::Plane {
            point: Point3::new(0.0, height, 0.0),
            normal: Vector3::y(),
        }
    }

    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<Intersection> {
        let hit = match self {
            Collider::Plane { point, normal } => ray_plane_intersection(ray, point, normal),
            Collider::Cuboid(volume) => ray_box_intersection(ray, volume),
            Collider::Sphere { center, radius } => ray_sphere_intersection(ray, *center, *radius),
            Collider::Heightfield(field) => field.raycast(ray, max_distance),
        }?;
        (hit.distance <= max_distance).then_some(hit)
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collider::Plane { point, normal } => f
                .debug_struct("Plane")
                .field("point", point)
                .field("normal", normal)
                .finish(),
            Collider::Cuboid(volume) => f.debug_tuple("Cuboid").field(volume).finish(),
            Collider::Sphere { center, radius } => f
                .debug_struct("Sphere")
                .field("center", center)
                .field("radius", radius)
                .finish(),
            Collider::Heightfield(field) => f
                .debug_struct("Heightfield")
                .field("step", &field.step)
                .finish_non_exhaustive(),
        }
    }
}

/// Result of a single collider intersection test
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// The hit point in world space
    pub point: Point3<f32>,
    /// Surface normal at the hit point
    pub normal: Vector3<f32>,
}

pub fn ray_plane_intersection(
    ray: &Ray,
    plane_point: &Point3<f32>,
    plane_normal: &Vector3<f32>,
) -> Option<Intersection> {
    let normal = plane_normal.try_normalize(f32::EPSILON)?;
    let denom = normal.dot(&ray.direction);

    // Parallel to the plane
    if denom.abs() <= 1e-6 {
        return None;
    }

    let t = (plane_point - ray.origin).dot(&normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(Intersection {
        distance: t,
        point: ray.point_at(t),
        normal: if denom < 0.0 { normal } else { -normal },
    })
}

/// Slab test. A ray starting inside the box reports the exit point.
pub fn ray_box_intersection(ray: &Ray, volume: &BoxVolume) -> Option<Intersection> {
    let (min, max) = (volume.min(), volume.max());

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_axis = 0;
    let mut far_axis = 0;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];

        if direction.abs() <= 1e-8 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_near {
            t_near = t0;
            near_axis = axis;
        }
        if t1 < t_far {
            t_far = t1;
            far_axis = axis;
        }
        if t_near > t_far {
            return None;
        }
    }

    let (t, axis) = if t_near >= 0.0 {
        (t_near, near_axis)
    } else if t_far >= 0.0 {
        (t_far, far_axis)
    } else {
        return None; // Box is behind the ray
    };

    let mut normal = Vector3::zeros();
    normal[axis] = -ray.direction[axis].signum();
    if t_near < 0.0 {
        normal = -normal;
    }

    Some(Intersection {
        distance: t,
        point: ray.point_at(t),
        normal,
    })
}

/// Test if a ray intersects a sphere
/// Returns the nearest intersection point (if any)
pub fn ray_sphere_intersection(
    ray: &Ray,
    sphere_center: Point3<f32>,
    sphere_radius: f32,
) -> Option<Intersection> {
    // Vector from ray origin to sphere center
    let oc = ray.origin - sphere_center;

    // Quadratic equation coefficients: at^2 + bt + c = 0
    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.dot(&oc) - sphere_radius * sphere_radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let t1 = (-b - sqrt_discriminant) / (2.0 * a);
    let t2 = (-b + sqrt_discriminant) / (2.0 * a);

    let t = if t1 > 0.0 {
        t1
    } else if t2 > 0.0 {
        t2 // Ray origin is inside sphere, use far intersection
    } else {
        return None;
    };

    let point = ray.point_at(t);
    let normal = (point - sphere_center).normalize();

    Some(Intersection {
        distance: t,
        point,
        normal,
    })
}

/// Terrain described by a height function rather than a mesh
#[derive(Clone)]
pub struct Heightfield {
    sample: HeightFn,
    /// March step for non-vertical rays
    pub step: f32,
}

impl Heightfield {
    pub fn new(sample: impl Fn(f32, f32) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            sample: Arc::new(sample),
            step: 0.5,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(1e-3);
        self
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        (self.sample)(x, z)
    }

    pub fn normal_at(&self, x: f32, z: f32) -> Vector3<f32> {
        const EPS: f32 = 0.05;
        let dx = self.height_at(x + EPS, z) - self.height_at(x - EPS, z);
        let dz = self.height_at(x, z + EPS) - self.height_at(x, z - EPS);
        Vector3::new(-dx, 2.0 * EPS, -dz).normalize()
    }

    fn above(&self, point: &Point3<f32>) -> f32 {
        point.y - self.height_at(point.x, point.z)
    }

    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<Intersection> {
        let start = self.above(&ray.origin);
        if start < 0.0 {
            return None; // Starts underground
        }

        // Vertical rays can be answered without marching
        if ray.direction.x.abs() <= 1e-6 && ray.direction.z.abs() <= 1e-6 {
            if ray.direction.y >= 0.0 {
                return None;
            }
            let t = start / -ray.direction.y;
            let point = ray.point_at(t);
            return Some(Intersection {
                distance: t,
                point: Point3::new(point.x, self.height_at(point.x, point.z), point.z),
                normal: self.normal_at(point.x, point.z),
            });
        }

        let mut previous = 0.0;
        let mut t = 0.0;
        while t < max_distance {
            t = (t + self.step).min(max_distance);
            if self.above(&ray.point_at(t)) <= 0.0 {
                let t = self.bisect(ray, previous, t);
                let point = ray.point_at(t);
                return Some(Intersection {
                    distance: t,
                    point,
                    normal: self.normal_at(point.x, point.z),
                });
            }
            previous = t;
        }
        None
    }

    fn bisect(&self, ray: &Ray, mut outside: f32, mut inside: f32) -> f32 {
        for _ in 0..24 {
            let mid = 0.5 * (outside + inside);
            if self.above(&ray.point_at(mid)) > 0.0 {
                outside = mid;
            } else {
                inside = mid;
            }
        }
        inside
    }
}
