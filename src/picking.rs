use glam::{Mat4, Vec2, Vec3};

pub const DEFAULT_CAMERA_DISTANCE: f32 = 500.0;
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;

const MIN_CAMERA_DISTANCE: f32 = 40.0;
const MAX_CAMERA_DISTANCE: f32 = 5000.0;
const MAX_PITCH: f32 = 1.55;
const ORBIT_SPEED: f32 = 0.006;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// A node's bounding sphere as seen by the resolver.
#[derive(Clone, Copy, Debug)]
pub struct PickTarget<'a> {
    pub id: &'a str,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit<'a> {
    pub id: &'a str,
    pub distance: f32,
}

/// Nearest non-negative hit distance along the ray, or the exit distance
/// when the ray starts inside the sphere.
pub fn ray_sphere_distance(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if ray.direction == Vec3::ZERO || radius <= 0.0 {
        return None;
    }

    let offset = ray.origin - center;
    let b = offset.dot(ray.direction);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if far < 0.0 {
        return None;
    }

    Some(if near >= 0.0 { near } else { far })
}

pub fn pick<'a, I>(ray: &Ray, targets: I) -> Option<PickHit<'a>>
where
    I: IntoIterator<Item = PickTarget<'a>>,
{
    let mut best: Option<PickHit<'a>> = None;
    for target in targets {
        let Some(distance) = ray_sphere_distance(ray, target.center, target.radius) else {
            continue;
        };

        if best.is_none_or(|hit| distance < hit.distance) {
            best = Some(PickHit {
                id: target.id,
                distance,
            });
        }
    }
    best
}

/// Maps a pointer position inside a viewport to normalized device coordinates,
/// x to the right and y up.
pub fn ndc_from_pointer(pointer: Vec2, viewport_origin: Vec2, viewport_size: Vec2) -> Vec2 {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return Vec2::ZERO;
    }

    let local = (pointer - viewport_origin) / viewport_size;
    Vec2::new(local.x * 2.0 - 1.0, -(local.y * 2.0 - 1.0))
}

/// Perspective camera orbiting a target point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV_DEGREES)
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, fov_degrees: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE),
            fov_y: fov_degrees.clamp(10.0, 150.0).to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 10_000.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let direction = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + direction * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World point to NDC; `None` when the point is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let eye = self.eye();
        Ray::new(eye, far_point - eye)
    }

    /// Distance of `world` in front of the eye along the view axis.
    pub fn depth(&self, world: Vec3) -> f32 {
        let eye = self.eye();
        (world - eye).dot((self.target - eye).normalize_or_zero())
    }

    /// The part of a world segment lying in front of the near plane, or `None`
    /// when all of it is behind.
    pub fn clip_segment(&self, start: Vec3, end: Vec3) -> Option<(Vec3, Vec3)> {
        let min_depth = self.near * 2.0;
        let start_depth = self.depth(start);
        let end_depth = self.depth(end);

        match (start_depth > min_depth, end_depth > min_depth) {
            (true, true) => Some((start, end)),
            (false, false) => None,
            (start_in_front, _) => {
                let along = (min_depth - start_depth) / (end_depth - start_depth);
                let crossing = Ray::new(start, end - start).at(along * start.distance(end));
                if start_in_front {
                    Some((start, crossing))
                } else {
                    Some((crossing, end))
                }
            }
        }
    }

    /// On-screen radius in pixels of a sphere of `size` at `world`.
    pub fn screen_radius(&self, world: Vec3, size: f32, viewport_height: f32) -> f32 {
        let depth = self.depth(world);
        if depth <= self.near {
            return 0.0;
        }
        let focal = (viewport_height * 0.5) / (self.fov_y * 0.5).tan();
        size * focal / depth
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_SPEED;
        self.pitch = (self.pitch + drag.y * ORBIT_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * 0.0018).clamp(0.85, 1.15);
        self.distance = (self.distance * factor).clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
    }

    /// Rotates the orbit so `point` sits between the eye and the target.
    pub fn face(&mut self, point: Vec3) {
        let offset = point - self.target;
        let length = offset.length();
        if length <= f32::EPSILON {
            return;
        }
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / length).asin().clamp(-MAX_PITCH, MAX_PITCH);
    }
}
