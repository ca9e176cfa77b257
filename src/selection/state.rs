use crate::selection::archive::Archive;

/// State carried by the evolutionary loop from one generation to the next.
///
/// The loop owns it and lends it to every `assign_fitness` and
/// `select_survivors` call. Only the strength-density strategy keeps an
/// archive; the rank-crowding strategy only advances the generation counter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState<I> {
    archive: Archive<I>,
    generation: usize,
    /// Leading population slots filled with archive copies by the last selection.
    #[cfg_attr(feature = "serde", serde(default))]
    seeded: usize,
}

impl<I> SelectionState<I> {
    pub fn new() -> Self {
        Self {
            archive: Archive::new(),
            generation: 0,
            seeded: 0,
        }
    }

    pub fn archive(&self) -> &Archive<I> {
        &self.archive
    }

    /// Number of completed `select_survivors` calls.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub(crate) fn archive_mut(&mut self) -> &mut Archive<I> {
        &mut self.archive
    }

    pub(crate) fn seeded(&self) -> usize {
        self.seeded
    }

    pub(crate) fn set_seeded(&mut self, seeded: usize) {
        self.seeded = seeded;
    }

    pub(crate) fn advance(&mut self) {
        self.generation += 1;
    }
}

impl<I> Default for SelectionState<I> {
    fn default() -> Self {
        Self::new()
    }
}
