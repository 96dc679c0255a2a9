// Ray picking against item quads.

mod common;

use common::entry;
use glam::{Mat4, Quat, Vec2, Vec3};
use globe_core::*;

fn facing_item(index: usize, position: Vec3) -> GalleryItem<usize> {
    let mut item = GalleryItem::from(entry(index, "x"));
    item.mesh = Some(ItemMesh::new(position, Quat::IDENTITY, Vec2::new(0.8, 0.5)));
    item
}

fn camera_ray() -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
}

#[test]
fn ray_sphere_intersection_basic() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!((t.unwrap() - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_intersection_miss() {
    let t = ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_none());
}

#[test]
fn ray_sphere_behind_origin_is_a_miss() {
    let t = ray_sphere(Vec3::ZERO, -Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_none());
}

#[test]
fn ray_sphere_from_inside_hits_immediately() {
    let centre = Vec3::new(0.0, 0.0, 5.0);
    let t = ray_sphere(centre, Vec3::X, centre, 3.0);
    assert_eq!(t, Some(0.0));
}

#[test]
fn ray_quad_hits_centre_at_expected_distance() {
    let t = ray_quad(&camera_ray(), Mat4::IDENTITY, Vec2::new(0.8, 0.5));
    assert!((t.unwrap() - 5.0).abs() < 1e-5);
}

#[test]
fn ray_quad_is_double_sided() {
    let from_behind = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    assert!(ray_quad(&from_behind, Mat4::IDENTITY, Vec2::new(0.8, 0.5)).is_some());
}

#[test]
fn ray_quad_respects_extent_and_scale() {
    let size = Vec2::new(0.8, 0.5);
    let off_edge = Ray::new(Vec3::new(0.5, 0.0, 5.0), -Vec3::Z);
    assert!(ray_quad(&off_edge, Mat4::IDENTITY, size).is_none());
    // Doubling the scale brings the same point inside.
    assert!(ray_quad(&off_edge, Mat4::from_scale(Vec3::splat(2.0)), size).is_some());
}

#[test]
fn ray_parallel_to_quad_misses() {
    let grazing = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
    assert!(ray_quad(&grazing, Mat4::IDENTITY, Vec2::new(0.8, 0.5)).is_none());
}

#[test]
fn nearest_of_two_hits_wins() {
    // Quads at distance 3 and 5 from the camera, listed far-first.
    let items = vec![
        facing_item(0, Vec3::new(0.0, 0.0, 0.0)),
        facing_item(1, Vec3::new(0.0, 0.0, 2.0)),
    ];
    let (index, t) = pick_nearest(&items, &camera_ray(), 0.0).unwrap();
    assert_eq!(index, 1);
    assert!((t - 3.0).abs() < 1e-4);
}

#[test]
fn hidden_items_are_not_candidates() {
    let mut items = vec![
        facing_item(0, Vec3::new(0.0, 0.0, 0.0)),
        facing_item(1, Vec3::new(0.0, 0.0, 2.0)),
    ];
    items[1].visible = false;
    let (index, t) = pick_nearest(&items, &camera_ray(), 0.0).unwrap();
    assert_eq!(index, 0);
    assert!((t - 5.0).abs() < 1e-4);

    items[0].visible = false;
    assert!(pick_nearest(&items, &camera_ray(), 0.0).is_none());
}

#[test]
fn items_without_mesh_are_not_candidates() {
    let mut items = vec![facing_item(0, Vec3::ZERO)];
    items[0].mesh = None;
    assert!(pick_nearest(&items, &camera_ray(), 0.0).is_none());
}

#[test]
fn globe_spin_moves_the_hit_target() {
    // A quad on +X facing outward is edge-on to the camera until the globe
    // turns it toward +Z.
    let position = Vec3::new(2.0, 0.0, 0.0);
    let mut item = GalleryItem::from(entry(0, "x"));
    item.mesh = Some(ItemMesh::new(
        position,
        outward_orientation(position),
        Vec2::new(0.8, 0.5),
    ));
    let items = vec![item];
    assert!(pick_nearest(&items, &camera_ray(), 0.0).is_none());
    let quarter_turn = -std::f32::consts::FRAC_PI_2;
    let (_, t) = pick_nearest(&items, &camera_ray(), quarter_turn).unwrap();
    assert!((t - 3.0).abs() < 1e-3);
}
