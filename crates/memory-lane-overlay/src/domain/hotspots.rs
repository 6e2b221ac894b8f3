//! Hotspot listener registry.
//!
//! Each hotspot id maps to at most one binding. Binding an id that is already
//! bound replaces the old binding, and unbinding an unbound id is a no-op, so
//! re-entering a scene any number of times leaves exactly one live binding
//! per hotspot.

use std::collections::BTreeMap;
use std::fmt;

/// Identity of a hotspot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotspotId(String);

impl HotspotId {
    /// Wraps a hotspot id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HotspotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a hotspot lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// On the carousel slide with this index.
    Slide(usize),
    /// On the finale scene.
    Finale,
}

/// What selecting a hotspot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotspotBinding {
    /// The scene the hotspot belongs to.
    pub scene: Scene,
    /// Rich-text info.
    pub info: String,
    /// Optional clue image.
    pub clue_image: Option<String>,
    /// Registry generation at bind time; a rebind always yields a newer one.
    pub generation: u64,
}

/// Registry of live hotspot bindings keyed by hotspot id.
#[derive(Debug, Default)]
pub struct HotspotRegistry {
    bindings: BTreeMap<HotspotId, HotspotBinding>,
    generation: u64,
}

impl HotspotRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id`, replacing any existing binding. Returns whether an older
    /// binding was discarded.
    pub fn bind(
        &mut self,
        id: HotspotId,
        scene: Scene,
        info: impl Into<String>,
        clue_image: Option<String>,
    ) -> bool {
        self.generation += 1;
        let binding = HotspotBinding {
            scene,
            info: info.into(),
            clue_image,
            generation: self.generation,
        };
        self.bindings.insert(id, binding).is_some()
    }

    /// Removes the binding of `id`. Returns whether one existed.
    pub fn unbind(&mut self, id: &HotspotId) -> bool {
        self.bindings.remove(id).is_some()
    }

    /// Removes every binding of `scene`. Returns how many were removed.
    pub fn unbind_scene(&mut self, scene: Scene) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, binding| binding.scene != scene);
        before - self.bindings.len()
    }

    /// Returns the live binding of `id`.
    #[must_use]
    pub fn get(&self, id: &HotspotId) -> Option<&HotspotBinding> {
        self.bindings.get(id)
    }

    /// Returns the ids bound in `scene`, in id order.
    #[must_use]
    pub fn bound_in(&self, scene: Scene) -> Vec<&HotspotId> {
        self.bindings
            .iter()
            .filter(|(_, binding)| binding.scene == scene)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the number of live bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
