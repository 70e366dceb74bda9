//! Interaction state for one calculator session
//!
//! A [`Session`] holds the selected specialty and semester together with the
//! scores typed for each module of the resulting list. Every selection change
//! runs the same transition handler, which discards all scores, so the score
//! map is always keyed by indices of the current module list.

use crate::core::catalog::Catalog;
use crate::core::engine::{evaluate, SemesterResult};
use crate::core::models::{scores, ModuleDefinition, ScoreBook, ScoreEntry, ScoreField};
use crate::core::report::Theme;
use crate::{debug, warn};

/// What the calculator currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    /// No specialty chosen yet
    NoSpecialty,
    /// Specialty chosen, semester not yet chosen
    NoSemester,
    /// Valid selection, but no modules registered for it
    NoModules,
    /// Live averages for the selected modules
    Ready(SemesterResult),
}

impl SessionView {
    /// Message shown for an empty state, `None` once results are available
    #[must_use]
    pub const fn empty_state_message(&self) -> Option<&'static str> {
        match self {
            Self::NoSpecialty => Some("Select a specialty to get started."),
            Self::NoSemester => Some("Select a semester to display its modules."),
            Self::NoModules => Some("No modules are available for this combination."),
            Self::Ready(_) => None,
        }
    }
}

/// Selections and entered scores of the calculator
#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    specialty: Option<String>,
    semester: Option<String>,
    scores: ScoreBook,
    theme: Theme,
}

impl<'c> Session<'c> {
    /// Create an empty session over a catalog
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            specialty: None,
            semester: None,
            scores: ScoreBook::new(),
            theme: Theme::default(),
        }
    }

    /// Catalog this session reads modules from
    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Selected specialty display name
    #[must_use]
    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    /// Selected semester display name
    #[must_use]
    pub fn semester(&self) -> Option<&str> {
        self.semester.as_deref()
    }

    /// Entered scores keyed by module index
    #[must_use]
    pub const fn scores(&self) -> &ScoreBook {
        &self.scores
    }

    /// Entered scores of one module, if any field was edited
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ScoreEntry> {
        self.scores.get(&index)
    }

    /// Select a specialty (or clear it with `None`).
    ///
    /// The semester is reset to unselected and all scores are discarded.
    pub fn set_specialty(&mut self, specialty: Option<String>) {
        debug!("Specialty changed: {:?} -> {:?}", self.specialty, specialty);
        self.specialty = specialty.filter(|s| !s.is_empty());
        self.semester = None;
        self.on_selection_changed();
    }

    /// Select a semester (or clear it with `None`).
    ///
    /// All scores are discarded, even when the new selection maps to the same
    /// module list.
    ///
    /// # Errors
    /// Returns an error if no specialty is selected.
    pub fn set_semester(&mut self, semester: Option<String>) -> Result<(), String> {
        if self.specialty.is_none() {
            return Err("Select a specialty before choosing a semester".to_string());
        }
        debug!("Semester changed: {:?} -> {:?}", self.semester, semester);
        self.semester = semester.filter(|s| !s.is_empty());
        self.on_selection_changed();
        Ok(())
    }

    /// Transition handler run after every specialty or semester change
    fn on_selection_changed(&mut self) {
        if !self.scores.is_empty() {
            debug!("Discarding scores of {} module(s)", self.scores.len());
        }
        self.scores = ScoreBook::new();
    }

    /// Modules of the current selection, empty when the selection is incomplete or unknown
    #[must_use]
    pub fn modules(&self) -> &'c [ModuleDefinition] {
        match (&self.specialty, &self.semester) {
            (Some(specialty), Some(semester)) => self.catalog.lookup_modules(specialty, semester),
            _ => &[],
        }
    }

    /// Update one score field of one module, leaving everything else untouched.
    ///
    /// The module's entry is created on its first edit. Values outside 0–20
    /// are kept as typed; they are not clamped.
    ///
    /// # Errors
    /// Returns an error if `index` is not a position in the current module list.
    pub fn update_field(
        &mut self,
        index: usize,
        field: ScoreField,
        value: impl Into<String>,
    ) -> Result<(), String> {
        let modules = self.modules();
        let Some(module) = modules.get(index) else {
            return Err(format!(
                "No module at position {} ({} module(s) shown)",
                index + 1,
                modules.len()
            ));
        };

        let value = value.into();
        let numeric = scores::coerce_score(Some(value.as_str()));
        if scores::is_out_of_range(numeric) {
            warn!(
                "{field} score {numeric} for '{}' is outside {}-{}",
                module.name,
                scores::SCORE_MIN,
                scores::SCORE_MAX
            );
        }
        let applies = match field {
            ScoreField::Exam => true,
            ScoreField::Td => module.has_td,
            ScoreField::Tp => module.has_tp,
        };
        if !applies {
            debug!("'{}' has no {field} component; entry kept but unused", module.name);
        }

        self.scores.entry(index).or_default().set(field, value);
        Ok(())
    }

    /// Current theme
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch between light and dark presentation; selections and scores are kept
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Set the presentation theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Derive what the calculator shows from the current state
    #[must_use]
    pub fn view(&self) -> SessionView {
        if self.specialty.is_none() {
            return SessionView::NoSpecialty;
        }
        if self.semester.is_none() {
            return SessionView::NoSemester;
        }
        let modules = self.modules();
        if modules.is_empty() {
            return SessionView::NoModules;
        }
        SessionView::Ready(evaluate(modules, &self.scores))
    }
}
