use crate::geometry::VertexLayout;

use super::backend::ProgramBackend;
use super::error::ShaderError;
use super::program::{ShaderProgram, build_program};
use super::source::ProgramSources;

/// Default number of program slots.
pub const DEFAULT_CAPACITY: usize = 16;

/// Fixed-capacity, slot-indexed table of shader programs.
///
/// A slot index is the stable identity of a logical program across reloads.
/// Slots are replaced only after the replacement program has been fully built,
/// so a populated slot always holds a valid program.
#[derive(Debug)]
pub struct ProgramRegistry<P> {
    slots: Vec<Option<ShaderProgram<P>>>,
    active: usize,
    count: usize,
    layout: VertexLayout,
}

impl<P> ProgramRegistry<P> {
    /// Creates an empty registry. Every program is validated against `layout`.
    pub fn new(capacity: usize, layout: VertexLayout) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            active: 0,
            count: 0,
            layout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of populated slots. Reloads never change it.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn get(&self, index: usize) -> Option<&ShaderProgram<P>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Program in the active slot, if that slot is populated.
    pub fn active(&self) -> Option<&ShaderProgram<P>> {
        self.get(self.active)
    }

    /// Populated slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ShaderProgram<P>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    /// Builds a program from `sources` and installs it in slot `index`.
    ///
    /// The index is checked before anything else happens. On failure the
    /// slot keeps whatever program it held before.
    pub fn load<B>(
        &mut self,
        backend: &mut B,
        index: usize,
        label: &str,
        sources: ProgramSources,
    ) -> Result<&ShaderProgram<P>, ShaderError>
    where
        B: ProgramBackend<Program = P>,
    {
        self.check_index(index)?;

        let generation = self.slots[index]
            .as_ref()
            .map_or(0, |p| p.generation() + 1);

        let program = build_program(backend, label, &sources, &self.layout, generation)?;

        let slot = &mut self.slots[index];
        if slot.is_none() {
            self.count += 1;
        }

        log::info!(
            "program slot {index} '{label}' loaded (generation {generation}, {} + {})",
            sources.vertex.display(),
            sources.fragment.display()
        );

        Ok(&*slot.insert(program))
    }

    /// Rebuilds slot `index` from the sources it was last loaded from.
    pub fn reload<B>(&mut self, backend: &mut B, index: usize) -> Result<&ShaderProgram<P>, ShaderError>
    where
        B: ProgramBackend<Program = P>,
    {
        self.check_index(index)?;
        let Some(current) = self.slots[index].as_ref() else {
            return Err(ShaderError::EmptySlot { index });
        };
        let label = current.label().to_string();
        let sources = current.sources().clone();
        self.load(backend, index, &label, sources)
    }

    /// Makes slot `index` the active one. Only the bounds are checked.
    pub fn select(&mut self, index: usize) -> Result<(), ShaderError> {
        self.check_index(index)?;
        if self.active != index {
            log::debug!("active program slot {} -> {index}", self.active);
        }
        self.active = index;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ShaderError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ShaderError::SlotOutOfRange {
                index,
                capacity: self.slots.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::fixtures;
    use crate::shader::uniform::SemanticUniform;
    use crate::testing::{RecordingBackend, ShaderDir};

    fn registry() -> ProgramRegistry<u32> {
        ProgramRegistry::new(DEFAULT_CAPACITY, VertexLayout::position_color())
    }

    #[test]
    fn initial_load_populates_slot_zero() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();

        assert_eq!(reg.count(), 1);
        assert_eq!(reg.active_index(), 0);
        let active = reg.active().unwrap();
        assert_eq!(active.label(), "triangle");
        assert_eq!(active.generation(), 0);
        assert_eq!(backend.programs_created(), 1);
    }

    #[test]
    fn out_of_range_is_rejected_before_any_backend_call() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        let err = reg
            .load(&mut backend, DEFAULT_CAPACITY, "x", dir.sources("tri.vert", "tri.frag"))
            .unwrap_err();
        assert!(matches!(
            err,
            ShaderError::SlotOutOfRange { index: DEFAULT_CAPACITY, capacity: DEFAULT_CAPACITY }
        ));
        assert!(reg.select(DEFAULT_CAPACITY + 3).is_err());
        assert_eq!(backend.programs_created(), 0);
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn failed_reload_keeps_previous_program() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        let before = *reg.get(0).unwrap().handle();

        dir.write("tri.frag", fixtures::FRAGMENT_SYNTAX_ERROR);
        let err = reg.reload(&mut backend, 0).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { .. }));

        let slot = reg.get(0).unwrap();
        assert_eq!(*slot.handle(), before);
        assert_eq!(slot.generation(), 0);
        assert_eq!(reg.count(), 1);
        assert_eq!(backend.programs_created(), 1);
    }

    #[test]
    fn successful_reload_replaces_only_that_slot() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "a", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        reg.load(&mut backend, 1, "b", dir.sources("tri.vert", "flat.frag"))
            .unwrap();
        let b_handle = *reg.get(1).unwrap().handle();
        let a_handle = *reg.get(0).unwrap().handle();

        let reloaded = reg.reload(&mut backend, 0).unwrap();
        assert_eq!(reloaded.generation(), 1);
        assert_ne!(*reloaded.handle(), a_handle);

        assert_eq!(*reg.get(1).unwrap().handle(), b_handle);
        assert_eq!(reg.count(), 2);
    }

    #[test]
    fn reload_picks_up_changed_source() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        dir.write("tri.frag", fixtures::FRAGMENT_NO_UNIFORM);

        let err = reg.reload(&mut backend, 0).unwrap_err();
        assert!(matches!(err, ShaderError::UniformResolution { .. }));
    }

    #[test]
    fn uniform_locations_are_stable_until_reload() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        let first = *reg.get(0).unwrap().uniforms();

        dir.write("tri.frag", fixtures::FRAGMENT_SYNTAX_ERROR);
        assert!(reg.reload(&mut backend, 0).is_err());
        assert_eq!(*reg.get(0).unwrap().uniforms(), first);

        dir.write("tri.frag", &fixtures::FRAGMENT.replace("@binding(0)", "@binding(2)"));
        reg.reload(&mut backend, 0).unwrap();
        let moved = *reg.get(0).unwrap().uniforms();
        assert_ne!(moved, first);
        assert_eq!(moved.get(SemanticUniform::PrimaryColor).binding, 2);
    }

    #[test]
    fn reload_of_empty_slot_is_an_error() {
        let mut backend = RecordingBackend::default();
        let mut reg = registry();
        assert!(matches!(
            reg.reload(&mut backend, 3),
            Err(ShaderError::EmptySlot { index: 3 })
        ));
    }

    #[test]
    fn missing_file_is_reported_as_io() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        let err = reg
            .load(&mut backend, 0, "x", dir.sources("tri.vert", "nope.frag"))
            .unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(reg.get(0).is_none());
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn backend_failure_leaves_slot_untouched() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        backend.fail_next_program("device lost");

        let err = reg.reload(&mut backend, 0).unwrap_err();
        assert!(matches!(err, ShaderError::Backend { .. }));
        assert_eq!(reg.get(0).unwrap().generation(), 0);
    }

    #[test]
    fn reload_with_undeclared_binding_never_reaches_backend() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 0, "triangle", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        dir.write("tri.frag", fixtures::FRAGMENT_EXTRA_BINDING);

        let err = reg.reload(&mut backend, 0).unwrap_err();
        assert!(matches!(err, ShaderError::Validate { .. }), "{err}");
        assert_eq!(backend.programs_created(), 1);
        assert_eq!(reg.get(0).unwrap().generation(), 0);
    }

    #[test]
    fn iter_yields_populated_slots_in_order() {
        let dir = ShaderDir::with_defaults();
        let mut backend = RecordingBackend::default();
        let mut reg = registry();

        reg.load(&mut backend, 4, "e", dir.sources("tri.vert", "tri.frag"))
            .unwrap();
        reg.load(&mut backend, 1, "b", dir.sources("tri.vert", "flat.frag"))
            .unwrap();

        let labels: Vec<(usize, &str)> = reg.iter().map(|(i, p)| (i, p.label())).collect();
        assert_eq!(labels, vec![(1, "b"), (4, "e")]);
    }
}
