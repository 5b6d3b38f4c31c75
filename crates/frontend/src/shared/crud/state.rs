use contracts::domain::common::{RecordId, Resource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

/// Which dialog of a list page is open and for which record.
///
/// At most one dialog is open at a time; `selected` is `None` only for the
/// create form.
#[derive(Debug, Clone)]
pub struct CrudPageState<E> {
    pub selected: Option<E>,
    pub is_form_open: bool,
    pub is_view_open: bool,
    pub is_delete_open: bool,
    pub view_mode: ViewMode,
    pub show_inactive: bool,
}

impl<E> Default for CrudPageState<E> {
    fn default() -> Self {
        Self {
            selected: None,
            is_form_open: false,
            is_view_open: false,
            is_delete_open: false,
            view_mode: ViewMode::default(),
            show_inactive: false,
        }
    }
}

impl<E: Resource> CrudPageState<E> {
    pub fn open_create(&mut self) {
        self.close();
        self.is_form_open = true;
    }

    pub fn open_edit(&mut self, item: E) {
        self.close();
        self.selected = Some(item);
        self.is_form_open = true;
    }

    pub fn open_view(&mut self, item: E) {
        self.close();
        self.selected = Some(item);
        self.is_view_open = true;
    }

    pub fn open_delete(&mut self, item: E) {
        self.close();
        self.selected = Some(item);
        self.is_delete_open = true;
    }

    /// "Editar" inside the view dialog
    pub fn edit_from_view(&mut self) {
        if let Some(item) = self.selected.take() {
            self.open_edit(item);
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.is_form_open = false;
        self.is_view_open = false;
        self.is_delete_open = false;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        };
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.selected.as_ref().map(Resource::id)
    }

    pub fn is_any_open(&self) -> bool {
        self.is_form_open || self.is_view_open || self.is_delete_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_position::aggregate::Position;

    fn position(id: RecordId) -> Position {
        Position {
            id,
            name: format!("Cargo {id}"),
            description: None,
            active: true,
            has_active_employees: false,
        }
    }

    #[test]
    fn test_only_one_dialog_open() {
        let mut state = CrudPageState::<Position>::default();
        state.open_view(position(1));
        assert!(state.is_view_open);

        state.open_delete(position(2));
        assert!(!state.is_view_open);
        assert!(state.is_delete_open);
        assert_eq!(state.editing_id(), Some(2));
    }

    #[test]
    fn test_create_has_no_selection() {
        let mut state = CrudPageState::<Position>::default();
        state.open_edit(position(3));
        state.open_create();
        assert!(state.is_form_open);
        assert_eq!(state.editing_id(), None);
    }

    #[test]
    fn test_edit_from_view_keeps_record() {
        let mut state = CrudPageState::<Position>::default();
        state.open_view(position(5));
        state.edit_from_view();
        assert!(state.is_form_open);
        assert!(!state.is_view_open);
        assert_eq!(state.editing_id(), Some(5));

        state.close();
        assert!(!state.is_any_open());
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_view_mode_toggle_survives_close() {
        let mut state = CrudPageState::<Position>::default();
        assert_eq!(state.view_mode, ViewMode::Cards);
        state.toggle_view_mode();
        state.open_create();
        state.close();
        assert_eq!(state.view_mode, ViewMode::Table);
    }
}
