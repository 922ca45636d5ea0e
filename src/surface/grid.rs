//! Cube-sphere region grid construction.
//!
//! Builds the region set for a surface: one region per pixel of a six-face
//! cube grid, positioned on the unit sphere via an analytical spherification
//! formula, with seam-aware 4-neighbor adjacency across face edges.

use glam::Vec3;

use super::region::{Neighborhood, Region, RegionId};

/// The six faces of the cube grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

const FACES: [Face; 6] = [
    Face::PosX,
    Face::NegX,
    Face::PosY,
    Face::NegY,
    Face::PosZ,
    Face::NegZ,
];

impl Face {
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Down,
    Up,
}

/// Converts UV coordinates on a face to a point on the unit cube surface.
fn face_uv_to_cube(face: Face, u: f32, v: f32) -> Vec3 {
    // Map [0, 1] to [-1, 1]
    let s = u * 2.0 - 1.0;
    let t = v * 2.0 - 1.0;

    match face {
        Face::PosX => Vec3::new(1.0, t, -s),
        Face::NegX => Vec3::new(-1.0, t, s),
        Face::PosY => Vec3::new(s, 1.0, t),
        Face::NegY => Vec3::new(s, -1.0, -t),
        Face::PosZ => Vec3::new(s, t, 1.0),
        Face::NegZ => Vec3::new(-s, t, -1.0),
    }
}

/// Transforms a point on the unit cube surface to the unit sphere.
///
/// The analytical formula gives better area uniformity than plain
/// normalization, reducing distortion at cube corners.
fn spherify_point(cube_pos: Vec3) -> Vec3 {
    let x2 = cube_pos.x * cube_pos.x;
    let y2 = cube_pos.y * cube_pos.y;
    let z2 = cube_pos.z * cube_pos.z;

    Vec3::new(
        cube_pos.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).max(0.0).sqrt(),
    )
}

/// Maps a pixel stepping off the given edge of a face to its continuation on
/// the adjacent face. The transforms follow from the face orientations defined
/// in `face_uv_to_cube`.
fn map_edge(resolution: u32, face: Face, x: u32, y: u32, edge: Edge) -> (Face, u32, u32) {
    debug_assert!(resolution >= 1);
    let r = resolution - 1;

    match (face, edge) {
        (Face::PosX, Edge::Left) => (Face::PosZ, r, y),
        (Face::PosX, Edge::Right) => (Face::NegZ, 0, y),
        (Face::PosX, Edge::Down) => (Face::NegY, r, x),
        (Face::PosX, Edge::Up) => (Face::PosY, r, r - x),

        (Face::NegX, Edge::Left) => (Face::NegZ, r, y),
        (Face::NegX, Edge::Right) => (Face::PosZ, 0, y),
        (Face::NegX, Edge::Down) => (Face::NegY, 0, r - x),
        (Face::NegX, Edge::Up) => (Face::PosY, 0, x),

        (Face::PosY, Edge::Left) => (Face::NegX, y, r),
        (Face::PosY, Edge::Right) => (Face::PosX, r - y, r),
        (Face::PosY, Edge::Down) => (Face::NegZ, r - x, r),
        (Face::PosY, Edge::Up) => (Face::PosZ, x, r),

        (Face::NegY, Edge::Left) => (Face::NegX, r - y, 0),
        (Face::NegY, Edge::Right) => (Face::PosX, y, 0),
        (Face::NegY, Edge::Down) => (Face::PosZ, x, 0),
        (Face::NegY, Edge::Up) => (Face::NegZ, r - x, 0),

        (Face::PosZ, Edge::Left) => (Face::NegX, r, y),
        (Face::PosZ, Edge::Right) => (Face::PosX, 0, y),
        (Face::PosZ, Edge::Down) => (Face::NegY, x, 0),
        (Face::PosZ, Edge::Up) => (Face::PosY, x, r),

        (Face::NegZ, Edge::Left) => (Face::PosX, r, y),
        (Face::NegZ, Edge::Right) => (Face::NegX, 0, y),
        (Face::NegZ, Edge::Down) => (Face::NegY, r - x, r),
        (Face::NegZ, Edge::Up) => (Face::PosY, r - x, 0),
    }
}

/// Returns the cardinal neighbor of a pixel, crossing face seams as needed.
fn neighbor_4(resolution: u32, face: Face, x: u32, y: u32, dx: i32, dy: i32) -> (Face, u32, u32) {
    debug_assert!(x < resolution && y < resolution);
    debug_assert!((dx.abs() + dy.abs()) == 1, "neighbor_4 expects cardinal direction");

    let nx = x as i32 + dx;
    let ny = y as i32 + dy;

    if (0..resolution as i32).contains(&nx) && (0..resolution as i32).contains(&ny) {
        return (face, nx as u32, ny as u32);
    }

    if nx < 0 {
        return map_edge(resolution, face, x, y, Edge::Left);
    }
    if nx >= resolution as i32 {
        return map_edge(resolution, face, x, y, Edge::Right);
    }
    if ny < 0 {
        return map_edge(resolution, face, x, y, Edge::Down);
    }
    debug_assert!(ny >= resolution as i32);
    map_edge(resolution, face, x, y, Edge::Up)
}

fn region_id(resolution: u32, face: Face, x: u32, y: u32) -> RegionId {
    let per_face = (resolution * resolution) as usize;
    face.index() * per_face + (y * resolution + x) as usize
}

/// Builds the full region set for a cube-sphere surface of the given
/// per-face resolution.
///
/// Every region has all four neighbors present; the `None` neighbor slot
/// only occurs on hand-built region graphs.
pub fn build_regions(resolution: u32) -> Vec<Region> {
    let per_face = (resolution * resolution) as usize;
    let mut regions = Vec::with_capacity(per_face * 6);

    for face in FACES {
        for y in 0..resolution {
            for x in 0..resolution {
                let u = (x as f32 + 0.5) / resolution as f32;
                let v = (y as f32 + 0.5) / resolution as f32;
                let position = spherify_point(face_uv_to_cube(face, u, v));

                let mut neighbors: Neighborhood = [None; 4];
                for (slot, (dx, dy)) in [(-1, 0), (1, 0), (0, -1), (0, 1)].into_iter().enumerate() {
                    let (nf, nx, ny) = neighbor_4(resolution, face, x, y, dx, dy);
                    neighbors[slot] = Some(region_id(resolution, nf, nx, ny));
                }

                regions.push(Region::new(region_id(resolution, face, x, y), position, neighbors));
            }
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_count_and_ids() {
        let regions = build_regions(4);
        assert_eq!(regions.len(), 6 * 16);
        for (i, region) in regions.iter().enumerate() {
            assert_eq!(region.id, i);
        }
    }

    #[test]
    fn test_positions_on_unit_sphere() {
        for region in build_regions(8) {
            let len = region.position.length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "region {} has position length {}",
                region.id,
                len
            );
        }
    }

    #[test]
    fn test_adjacency_is_bidirectional() {
        let regions = build_regions(4);
        for region in &regions {
            for neighbor_id in region.neighbors.into_iter().flatten() {
                let back = regions[neighbor_id].neighbors;
                assert!(
                    back.contains(&Some(region.id)),
                    "region {} lists neighbor {} but not vice versa",
                    region.id,
                    neighbor_id
                );
            }
        }
    }

    #[test]
    fn test_neighbors_are_present_and_distinct() {
        for region in build_regions(4) {
            let mut seen = Vec::new();
            for neighbor in region.neighbors {
                let id = neighbor.expect("grid regions have all four neighbors");
                assert_ne!(id, region.id);
                assert!(!seen.contains(&id), "duplicate neighbor on region {}", region.id);
                seen.push(id);
            }
        }
    }

    #[test]
    fn test_neighbors_are_geometrically_close() {
        let regions = build_regions(8);
        for region in &regions {
            for neighbor_id in region.neighbors.into_iter().flatten() {
                let dot = region.position.dot(regions[neighbor_id].position).clamp(-1.0, 1.0);
                let angle = dot.acos();
                assert!(
                    angle < 0.6,
                    "neighbor {} of region {} too far (angle {})",
                    neighbor_id,
                    region.id,
                    angle
                );
            }
        }
    }
}
