// Gallery lifecycle: loading, late textures, filtering, hover.

mod common;

use common::{approx_vec, entry, loaded_gallery, manual_config};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use globe_core::*;

fn settle(gallery: &mut Gallery<usize>) {
    // Re-layout runs for one second; step well past it at ~60 fps.
    for _ in 0..90 {
        gallery.step(1.0 / 60.0);
    }
    assert!(!gallery.is_transitioning());
}

fn anchors(gallery: &Gallery<usize>) -> Vec<Vec3> {
    gallery
        .items()
        .iter()
        .map(|it| it.mesh.as_ref().unwrap().anchor)
        .collect()
}

fn ndc_of(gallery: &Gallery<usize>, index: usize) -> Vec2 {
    let mesh = gallery.item(index).unwrap().mesh.as_ref().unwrap();
    let model = mesh.transform(gallery.rotation().globe);
    let world = model.transform_point3(Vec3::ZERO);
    let clip = gallery.camera().view_projection() * world.extend(1.0);
    clip.xy() / clip.w
}

#[test]
fn five_entries_load_and_follow_the_layout() {
    let entries = (0..5).map(|i| entry(i, "x")).collect();
    let mut gallery = Gallery::new(entries, manual_config(), 1.5);
    assert_eq!(gallery.len(), 5);
    assert!(gallery.items().iter().all(|it| it.mesh.is_none()));

    // Textures resolve out of order.
    for i in [3, 0, 4, 1, 2] {
        gallery.install_mesh(i, 1200, 800).unwrap();
    }
    let expected = fibonacci_sphere(5, SPHERE_RADIUS);
    for (i, item) in gallery.items().iter().enumerate() {
        let mesh = item.mesh.as_ref().unwrap();
        assert!(approx_vec(mesh.position, expected[i]), "item {}", i);
        assert!(approx_vec(mesh.anchor, expected[i]), "item {}", i);
        assert!((mesh.size.x - ITEM_WIDTH).abs() < 1e-6);
        assert!((mesh.size.y - ITEM_WIDTH / 1.5).abs() < 1e-6);
    }
}

#[test]
fn empty_gallery_is_a_no_op() {
    let mut gallery: Gallery<usize> = Gallery::new(Vec::new(), manual_config(), 1.0);
    assert!(gallery.is_empty());
    assert_eq!(gallery.apply_filter("all"), 0);
    let outcome = gallery.step(1.0 / 60.0);
    assert_eq!(outcome, StepOutcome::default());
}

#[test]
fn install_rejects_duplicates_and_bad_input() {
    let mut gallery = loaded_gallery(&["a", "b"], manual_config());
    assert_eq!(
        gallery.install_mesh(0, 10, 10),
        Err(GalleryError::MeshAlreadyInstalled(0))
    );
    assert_eq!(
        gallery.install_mesh(7, 10, 10),
        Err(GalleryError::ItemOutOfRange(7))
    );
    let entries = vec![entry(0, "a")];
    let mut fresh = Gallery::new(entries, manual_config(), 1.0);
    assert_eq!(
        fresh.install_mesh(0, 0, 10),
        Err(GalleryError::InvalidImageSize {
            width: 0,
            height: 10
        })
    );
    assert!(fresh.item(0).unwrap().mesh.is_none());
}

#[test]
fn filter_relayouts_matching_items() {
    let mut gallery = loaded_gallery(&["a", "x", "b", "x", "a"], manual_config());
    assert_eq!(gallery.visible_count(), 5);

    assert_eq!(gallery.apply_filter("x"), 2);
    let visible: Vec<usize> = (0..5)
        .filter(|&i| gallery.item(i).unwrap().visible)
        .collect();
    assert_eq!(visible, vec![1, 3]);

    let expected = fibonacci_sphere(2, SPHERE_RADIUS);
    assert!(approx_vec(gallery.slot(1).unwrap(), expected[0]));
    assert!(approx_vec(gallery.slot(3).unwrap(), expected[1]));

    settle(&mut gallery);
    let mesh1 = gallery.item(1).unwrap().mesh.as_ref().unwrap();
    let mesh3 = gallery.item(3).unwrap().mesh.as_ref().unwrap();
    assert!(approx_vec(mesh1.position, expected[0]));
    assert!(approx_vec(mesh3.position, expected[1]));
    assert!(mesh1.visible && mesh3.visible);
    assert!(!gallery.item(0).unwrap().mesh.as_ref().unwrap().visible);
}

#[test]
fn relayout_glides_instead_of_snapping() {
    let mut gallery = loaded_gallery(&["a", "x", "b", "x"], manual_config());
    // Item 1 moves from its four-item slot up to the north pole.
    let before = gallery.item(1).unwrap().mesh.as_ref().unwrap().anchor;
    gallery.apply_filter("x");
    let target = gallery.slot(1).unwrap();

    gallery.step(0.25);
    let midway = gallery.item(1).unwrap().mesh.as_ref().unwrap().anchor;
    assert!(!approx_vec(midway, before));
    assert!(!approx_vec(midway, target));
    assert!(gallery.is_transitioning());

    settle(&mut gallery);
    assert!(approx_vec(
        gallery.item(1).unwrap().mesh.as_ref().unwrap().anchor,
        target
    ));
}

#[test]
fn filtering_twice_gives_the_same_arrangement() {
    let mut gallery = loaded_gallery(&["a", "x", "b", "x", "x"], manual_config());
    gallery.apply_filter("x");
    settle(&mut gallery);
    let first = anchors(&gallery);

    gallery.apply_filter("x");
    settle(&mut gallery);
    let second = anchors(&gallery);
    for (a, b) in first.iter().zip(second.iter()) {
        assert!(approx_vec(*a, *b));
    }
}

#[test]
fn hidden_items_keep_their_position() {
    let mut gallery = loaded_gallery(&["a", "x", "b"], manual_config());
    let before = gallery.item(0).unwrap().mesh.as_ref().unwrap().anchor;
    gallery.apply_filter("x");
    settle(&mut gallery);
    let after = gallery.item(0).unwrap().mesh.as_ref().unwrap().anchor;
    assert!(approx_vec(before, after));
}

#[test]
fn back_to_all_restores_full_layout() {
    let mut gallery = loaded_gallery(&["a", "x", "b", "x"], manual_config());
    let original = anchors(&gallery);
    gallery.apply_filter("x");
    settle(&mut gallery);
    assert_eq!(gallery.apply_filter("all"), 4);
    settle(&mut gallery);
    for (a, b) in original.iter().zip(anchors(&gallery).iter()) {
        assert!(approx_vec(*a, *b));
    }
}

#[test]
fn late_texture_for_hidden_item_installs_hidden() {
    let entries = vec![entry(0, "a"), entry(1, "x"), entry(2, "x")];
    let mut gallery = Gallery::new(entries, manual_config(), 1.0);
    gallery.apply_filter("x");
    gallery.install_mesh(0, 100, 100).unwrap();
    gallery.install_mesh(2, 100, 100).unwrap();

    let hidden = gallery.item(0).unwrap().mesh.as_ref().unwrap();
    assert!(!hidden.visible);
    // The late visible item lands straight on its filtered slot.
    let late = gallery.item(2).unwrap().mesh.as_ref().unwrap();
    assert!(approx_vec(
        late.position,
        fibonacci_sphere(2, SPHERE_RADIUS)[1]
    ));
}

#[test]
fn picker_never_returns_hidden_items() {
    let mut gallery = loaded_gallery(&["a", "x", "b", "x", "a", "x"], manual_config());
    gallery.apply_filter("x");
    settle(&mut gallery);
    for i in 0..gallery.len() {
        let slot = gallery.item(i).unwrap().mesh.as_ref().unwrap().anchor;
        let world = Mat4::from_rotation_y(gallery.rotation().globe).transform_point3(slot);
        let ray = Ray::new(world * 3.0, -world.normalize());
        if let Some(hit) = gallery.pick_ray(&ray) {
            assert!(gallery.item(hit).unwrap().visible, "hidden {hit}");
        }
    }
}

#[test]
fn hovering_highlights_and_sets_cursor() {
    let mut gallery = loaded_gallery(&["a", "b", "c", "d", "e"], manual_config());
    gallery.step(1.0 / 60.0);
    let ndc = ndc_of(&gallery, 1);

    gallery.set_pointer(Some(ndc));
    let outcome = gallery.step(1.0 / 60.0);
    assert_eq!(outcome.hovered, Some(1));
    assert_eq!(outcome.cursor, Some(Cursor::Pointer));

    let item = gallery.item(1).unwrap();
    let baseline = item.original_scale.unwrap();
    let mesh = item.mesh.as_ref().unwrap();
    assert!((mesh.scale - baseline * HIGHLIGHT_SCALE).abs() < 1e-6);
    assert!((mesh.glow_opacity - HIGHLIGHT_GLOW_OPACITY).abs() < 1e-6);

    // Staying on the same item does not touch the cursor again.
    let outcome = gallery.step(1.0 / 60.0);
    assert_eq!(outcome.cursor, None);

    gallery.set_pointer(None);
    let outcome = gallery.step(1.0 / 60.0);
    assert_eq!(outcome.hovered, None);
    assert_eq!(outcome.cursor, Some(Cursor::Auto));
    let mesh = gallery.item(1).unwrap().mesh.as_ref().unwrap();
    assert!((mesh.scale - baseline).abs() < 1e-6);
    assert_eq!(mesh.glow_opacity, 0.0);
}

#[test]
fn filtering_out_the_hovered_item_restores_it() {
    let mut gallery = loaded_gallery(&["a", "b", "a", "c", "a"], manual_config());
    gallery.step(1.0 / 60.0);
    gallery.set_pointer(Some(ndc_of(&gallery, 1)));
    gallery.step(1.0 / 60.0);
    assert_eq!(gallery.hovered(), Some(1));
    let baseline = gallery.item(1).unwrap().original_scale.unwrap();

    gallery.apply_filter("a");
    let outcome = gallery.step(1.0 / 60.0);
    assert_eq!(outcome.hovered, None);
    assert_eq!(gallery.hovered(), None);
    assert_eq!(outcome.cursor, Some(Cursor::Auto));
    let mesh = gallery.item(1).unwrap().mesh.as_ref().unwrap();
    assert!(!mesh.visible);
    assert!((mesh.scale - baseline).abs() < 1e-6);
    assert_eq!(mesh.glow_opacity, 0.0);
}

#[test]
fn orbit_mode_floats_items_near_the_surface() {
    let mut gallery = loaded_gallery(&["a", "b", "c", "d"], GalleryConfig::default());
    assert!(matches!(gallery.mode(), InteractionMode::Orbit(_)));
    let start_eye = gallery.camera().eye;
    for _ in 0..600 {
        gallery.step(1.0 / 60.0);
        for item in gallery.items() {
            let r = item.mesh.as_ref().unwrap().position.length();
            assert!((r - SPHERE_RADIUS).abs() <= FLOAT_AMPLITUDE + 1e-4);
        }
    }
    // Auto-rotation moved the camera, not the globe.
    assert!(!approx_vec(gallery.camera().eye, start_eye));
    assert_eq!(gallery.rotation().globe, 0.0);
}

#[test]
fn manual_mode_spins_the_globe() {
    let mut gallery = loaded_gallery(&["a", "b"], manual_config());
    assert!(gallery.orbit_mut().is_none());
    for _ in 0..10 {
        gallery.step(1.0 / 60.0);
    }
    assert!((gallery.rotation().globe - 10.0 * ROTATION_SPEED).abs() < 1e-6);
    assert!(approx_vec(
        gallery.camera().eye,
        Vec3::new(0.0, 0.0, CAMERA_Z)
    ));
}
