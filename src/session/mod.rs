use thiserror::Error;

use crate::form::{self, FieldError, FormValues, MessageStyle};
use crate::grid::{self, Grid};
use crate::resolver::{self, Domain, NormalizedRange, ResolveError};
use crate::tabs::{IdGenerator, TabId, TabRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub domain: Domain,
    pub max_cells: u64,
    pub message_style: MessageStyle,
    /// Open every generated table in its own tab.
    pub tabbed: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            domain: resolver::DEFAULT_DOMAIN,
            max_cells: resolver::DEFAULT_MAX_CELLS,
            message_style: MessageStyle::PerField,
            tabbed: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl SubmitError {
    pub fn messages(&self, style: MessageStyle) -> Vec<String> {
        match self {
            SubmitError::Invalid(errors) => form::render_messages(errors, style),
            SubmitError::Resolve(e) => vec![e.to_string()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub range: NormalizedRange,
    pub title: String,
    /// Set when the table was opened in a new tab.
    pub tab: Option<TabId>,
}

/// One user's page: the displayed table, the last error messages and the
/// open tabs. Every method runs to completion before the next starts.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    registry: TabRegistry,
    current: Option<Grid>,
    errors: Vec<String>,
}

impl Session {
    pub fn new(settings: SessionSettings, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            settings,
            registry: TabRegistry::new(ids),
            current: None,
            errors: Vec::new(),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Validates, resolves and materializes `values`. On failure the
    /// messages are recorded and the displayed table and tabs are left as
    /// they were.
    pub fn submit(&mut self, values: &FormValues) -> Result<Submission, SubmitError> {
        match self.try_build(values) {
            Ok((range, grid)) => {
                self.errors.clear();
                let title = range.title();
                let tab = if self.settings.tabbed {
                    Some(self.registry.create(grid.clone(), &title))
                } else {
                    None
                };
                self.current = Some(grid);
                Ok(Submission { range, title, tab })
            }
            Err(e) => {
                self.errors = e.messages(self.settings.message_style);
                Err(e)
            }
        }
    }

    fn try_build(&self, values: &FormValues) -> Result<(NormalizedRange, Grid), SubmitError> {
        let input =
            form::validate_fields(values, self.settings.domain).map_err(SubmitError::Invalid)?;
        let range = resolver::resolve(input, self.settings.domain, self.settings.max_cells)?;
        let grid = grid::materialize(&range);
        Ok((range, grid))
    }

    /// Drops the displayed table and messages. Tabs stay open.
    pub fn clear(&mut self) {
        self.current = None;
        self.errors.clear();
    }

    pub fn close_tab(&mut self, id: &TabId) -> bool {
        self.registry.remove_one(id)
    }

    pub fn close_all(&mut self) -> usize {
        self.registry.remove_all()
    }

    pub fn activate(&mut self, id: &TabId) -> bool {
        self.registry.activate(id)
    }

    pub fn current(&self) -> Option<&Grid> {
        self.current.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Rule;
    use crate::tabs::SequentialIds;

    fn tabbed() -> Session {
        Session::new(
            SessionSettings {
                tabbed: true,
                ..SessionSettings::default()
            },
            Box::new(SequentialIds::new()),
        )
    }

    #[test]
    fn failed_submit_keeps_previous_table_and_tabs() {
        let mut s = tabbed();
        let ok = s.submit(&FormValues::new("1", "3", "1", "3")).unwrap();
        assert_eq!(ok.title, "[1 to 3] x [1 to 3]");
        assert_eq!(ok.tab.as_ref().map(|t| t.as_str()), Some("tab-1"));

        let err = s.submit(&FormValues::new("-50", "50", "-50", "50")).unwrap_err();
        assert!(matches!(err, SubmitError::Resolve(ResolveError::TooLarge { .. })));
        assert_eq!(s.current().map(|g| g.len()), Some(9));
        assert_eq!(s.registry().len(), 2);
        assert_eq!(
            s.errors(),
            &["Table too large (10201 cells). Please reduce the range. Max is 10000".to_string()]
        );
    }

    #[test]
    fn success_clears_old_messages() {
        let mut s = tabbed();
        assert!(s.submit(&FormValues::new("", "1", "1", "1")).is_err());
        assert_eq!(s.errors().len(), 1);
        s.submit(&FormValues::new("1", "1", "1", "1")).unwrap();
        assert!(s.errors().is_empty());
    }

    #[test]
    fn clear_leaves_tabs_alone() {
        let mut s = tabbed();
        s.submit(&FormValues::new("1", "2", "1", "2")).unwrap();
        let _ = s.submit(&FormValues::new("x", "2", "1", "2"));
        s.clear();
        assert!(s.current().is_none());
        assert!(s.errors().is_empty());
        assert_eq!(s.registry().len(), 2);
    }

    #[test]
    fn untabbed_session_registers_nothing() {
        let mut s = Session::new(SessionSettings::default(), Box::new(SequentialIds::new()));
        let ok = s.submit(&FormValues::new("3", "1", "3", "1")).unwrap();
        assert!(ok.tab.is_none());
        assert_eq!(s.registry().len(), 1);
        assert_eq!(ok.title, "[1 to 3] x [1 to 3]");
    }

    #[test]
    fn invalid_fields_surface_as_field_errors() {
        let mut s = tabbed();
        let err = s.submit(&FormValues::new("1", "1", "1", "100")).unwrap_err();
        match err {
            SubmitError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].rule, Rule::Range);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            s.errors(),
            &["Vertical end: Please enter a value between -50 and 50.".to_string()]
        );
    }

    #[test]
    fn close_helpers_delegate_to_registry() {
        let mut s = tabbed();
        let a = s.submit(&FormValues::new("1", "2", "1", "2")).unwrap().tab.unwrap();
        s.submit(&FormValues::new("1", "3", "1", "3")).unwrap();
        s.submit(&FormValues::new("1", "4", "1", "4")).unwrap();
        assert!(s.close_tab(&a));
        assert!(!s.close_tab(&a));
        assert_eq!(s.close_all(), 2);
        assert_eq!(s.close_all(), 0);
        assert!(s.registry().active().is_home());
    }
}
