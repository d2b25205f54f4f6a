use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::Vec3;

/// Resource address without its module path: `module.net.aws_subnet.a` -> `aws_subnet.a`.
pub fn short_name(id: &str) -> &str {
    let mut rest = id;
    while let Some(stripped) = rest.strip_prefix("module.") {
        match stripped.split_once('.') {
            Some((_, tail)) if !tail.is_empty() => rest = tail,
            _ => break,
        }
    }
    rest
}

pub fn stable_pair(key: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Backdrop points scattered through a cube of half-width `extent`. Same
/// output on every call.
pub fn star_field(count: usize, extent: f32) -> Vec<Vec3> {
    (0..count)
        .map(|index| {
            let (x, y) = stable_pair(&format!("star:{index}:xy"));
            let (z, _) = stable_pair(&format!("star:{index}:z"));
            Vec3::new(x, y, z) * extent
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_module_paths() {
        assert_eq!(short_name("aws_vpc.main"), "aws_vpc.main");
        assert_eq!(short_name("module.net.aws_subnet.a"), "aws_subnet.a");
        assert_eq!(short_name("module.a.module.b.data.aws_ami.x"), "data.aws_ami.x");
        assert_eq!(short_name("module.orphan"), "module.orphan");
    }

    #[test]
    fn star_field_is_stable_and_bounded() {
        let first = star_field(32, 1000.0);
        assert_eq!(first, star_field(32, 1000.0));
        assert!(first.iter().all(|star| star.abs().max_element() <= 1000.0));
    }
}
