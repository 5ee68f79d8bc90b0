#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    NextView,
    PreviousView,
    Export,
    Copy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Home,
    End,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Toggle,
    Exit,
    /// Cycle the screen's facet filter (role, status).
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    ToggleSelect,
    SelectAll,
    Sort,
    NextColumn,
    PreviousColumn,
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
}
