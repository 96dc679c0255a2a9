use crate::camera::Camera;
use crate::constants::{DEFAULT_JITTER_SEED, RELAYOUT_DURATION_SEC, ROTATION_SPEED, SPHERE_RADIUS};
use crate::error::GalleryError;
use crate::highlight::{Cursor, Highlighter};
use crate::item::{quad_size, GalleryItem, ItemEntry, ItemMesh};
use crate::layout::{fibonacci_sphere, jitter_for, outward_orientation};
use crate::motion::{float_offset, float_step, ShellRotation, Tween};
use crate::orbit::OrbitControls;
use crate::picking::{pick_nearest, Ray};
use glam::{Vec2, Vec3};

/// Tunables for one gallery instance.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub sphere_radius: f32,
    /// Idle rotation per frame, in radians.
    pub rotation_speed: f32,
    /// Use drag-to-orbit controls instead of the manual idle spin.
    pub orbit: bool,
    pub jitter_seed: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            sphere_radius: SPHERE_RADIUS,
            rotation_speed: ROTATION_SPEED,
            orbit: true,
            jitter_seed: DEFAULT_JITTER_SEED,
        }
    }
}

/// How the globe moves between frames. Chosen once at construction.
#[derive(Clone, Debug)]
pub enum InteractionMode {
    /// The shell and every item spin about Y by a fixed angle per frame.
    ManualRotation,
    /// The camera orbits; items float gently along their normals.
    Orbit(OrbitControls),
}

/// What a frame step changed that the host has to reflect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// New cursor for the container, when it changes.
    pub cursor: Option<Cursor>,
    pub hovered: Option<usize>,
}

/// All mutable state of one globe gallery.
pub struct Gallery<S> {
    items: Vec<GalleryItem<S>>,
    // Last layout slot assigned to each item; used when a texture arrives late.
    slots: Vec<Vec3>,
    tweens: Vec<Option<Tween>>,
    config: GalleryConfig,
    mode: InteractionMode,
    camera: Camera,
    rotation: ShellRotation,
    highlighter: Highlighter,
    pointer: Option<Vec2>,
    time_sec: f32,
}

impl<S> Gallery<S> {
    pub fn new(entries: Vec<ItemEntry<S>>, config: GalleryConfig, aspect: f32) -> Self {
        let items: Vec<GalleryItem<S>> = entries.into_iter().map(GalleryItem::from).collect();
        let n = items.len();
        let mode = if config.orbit {
            InteractionMode::Orbit(OrbitControls::default())
        } else {
            InteractionMode::ManualRotation
        };
        let mut gallery = Self {
            items,
            slots: vec![Vec3::ZERO; n],
            tweens: vec![None; n],
            config,
            mode,
            camera: Camera::new(aspect),
            rotation: ShellRotation::default(),
            highlighter: Highlighter::default(),
            pointer: None,
            time_sec: 0.0,
        };
        gallery.relayout_visible();
        gallery
    }

    pub fn items(&self) -> &[GalleryItem<S>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&GalleryItem<S>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|it| it.visible).count()
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    /// Orbit controller, when the gallery runs in orbit mode.
    pub fn orbit_mut(&mut self) -> Option<&mut OrbitControls> {
        match &mut self.mode {
            InteractionMode::Orbit(controls) => Some(controls),
            InteractionMode::ManualRotation => None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    pub fn rotation(&self) -> &ShellRotation {
        &self.rotation
    }

    pub fn hovered(&self) -> Option<usize> {
        self.highlighter.current()
    }

    /// Layout slot currently assigned to item `index`.
    pub fn slot(&self, index: usize) -> Option<Vec3> {
        self.slots.get(index).copied()
    }

    pub fn is_transitioning(&self) -> bool {
        self.tweens.iter().any(Option::is_some)
    }

    /// Latest pointer position in NDC, `None` when the pointer is outside.
    pub fn set_pointer(&mut self, ndc: Option<Vec2>) {
        self.pointer = ndc;
    }

    /// Give item `index` its quad once its image has loaded.
    ///
    /// The quad is placed at the item's current layout slot, faces outward
    /// and takes its visibility from the item.
    pub fn install_mesh(
        &mut self,
        index: usize,
        width: u32,
        height: u32,
    ) -> Result<(), GalleryError> {
        if width == 0 || height == 0 {
            return Err(GalleryError::InvalidImageSize { width, height });
        }
        let slot = self
            .slot(index)
            .ok_or(GalleryError::ItemOutOfRange(index))?;
        let item = &mut self.items[index];
        if item.mesh.is_some() {
            return Err(GalleryError::MeshAlreadyInstalled(index));
        }
        let jitter = jitter_for(self.config.jitter_seed, index);
        let mut mesh = ItemMesh::new(
            slot,
            outward_orientation(slot),
            quad_size(width as f32 / height as f32),
        );
        mesh.roll = jitter.roll;
        mesh.scale = jitter.scale;
        mesh.visible = item.visible;
        item.mesh = Some(mesh);
        log::debug!(
            "[gallery] mesh installed for item {} ({}x{})",
            index,
            width,
            height
        );
        Ok(())
    }

    /// Show only items matching `key` (`"all"` shows everything) and move
    /// the visible ones to a fresh layout. Returns the visible count.
    pub fn apply_filter(&mut self, key: &str) -> usize {
        for (item, tween) in self.items.iter_mut().zip(self.tweens.iter_mut()) {
            item.visible = item.matches_filter(key);
            if let Some(mesh) = item.mesh.as_mut() {
                mesh.visible = item.visible;
            }
            if !item.visible {
                // Hidden items stay wherever they are.
                *tween = None;
            }
        }
        self.relayout_visible();
        let visible = self.visible_count();
        log::debug!("[gallery] filter '{}' -> {} visible", key, visible);
        visible
    }

    /// Reassign layout slots to the visible items, numbered contiguously in
    /// load order. Placed meshes glide to their new slot; hidden items keep
    /// theirs.
    pub fn relayout_visible(&mut self) {
        let visible: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].visible)
            .collect();
        if visible.is_empty() {
            return;
        }
        let positions = fibonacci_sphere(visible.len(), self.config.sphere_radius);
        for (&i, &target) in visible.iter().zip(positions.iter()) {
            self.slots[i] = target;
            if let Some(mesh) = self.items[i].mesh.as_ref() {
                self.tweens[i] = Some(Tween::new(mesh.anchor, target, RELAYOUT_DURATION_SEC));
            }
        }
    }

    /// Item under the current pointer, if any.
    pub fn pick(&self) -> Option<usize> {
        self.pointer.and_then(|ndc| self.pick_at(ndc))
    }

    pub fn pick_at(&self, ndc: Vec2) -> Option<usize> {
        self.pick_ray(&self.camera.ray_from_ndc(ndc))
    }

    pub fn pick_ray(&self, ray: &Ray) -> Option<usize> {
        pick_nearest(&self.items, ray, self.rotation.globe).map(|(i, _)| i)
    }

    /// Advance one frame: spin or orbit, layout transitions, floating, then
    /// hover highlighting against the latest pointer.
    pub fn step(&mut self, dt_sec: f32) -> StepOutcome {
        self.time_sec += dt_sec.max(0.0);
        let speed = self.config.rotation_speed;
        let orbiting = match &mut self.mode {
            InteractionMode::ManualRotation => {
                self.rotation.advance_globe(speed);
                false
            }
            InteractionMode::Orbit(controls) => {
                controls.update(&mut self.camera);
                true
            }
        };
        self.rotation.advance_shells(speed);

        self.advance_transitions(dt_sec);
        for (i, item) in self.items.iter_mut().enumerate() {
            let visible = item.visible;
            let Some(mesh) = item.mesh.as_mut() else {
                continue;
            };
            if orbiting && visible {
                let target = mesh.anchor + mesh.outward() * float_offset(self.time_sec, i);
                mesh.position = float_step(mesh.position, target);
            } else {
                mesh.position = mesh.anchor;
            }
        }

        let hit = self.pick();
        let cursor = self.highlighter.update(&mut self.items, hit);
        StepOutcome {
            cursor,
            hovered: self.highlighter.current(),
        }
    }

    fn advance_transitions(&mut self, dt_sec: f32) {
        for (tween_slot, item) in self.tweens.iter_mut().zip(self.items.iter_mut()) {
            let Some(tween) = tween_slot.as_mut() else {
                continue;
            };
            if let Some(mesh) = item.mesh.as_mut() {
                mesh.anchor = tween.advance(dt_sec);
                mesh.orientation = outward_orientation(mesh.anchor);
            }
            if tween.is_finished() {
                *tween_slot = None;
            }
        }
    }
}
