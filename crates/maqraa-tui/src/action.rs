//! User actions for the TUI application

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Tick event for animations/timers
    Tick,
    /// Render the UI
    Render,
    /// Navigate selection up
    Up,
    /// Navigate selection down
    Down,
    /// Jump to first item
    First,
    /// Jump to last item
    Last,
    /// Open details for the current item
    Select,
    /// Go back / close popup / cancel search
    Back,
    /// Show help popup
    Help,
    /// Switch to the next roster tab
    NextTab,
    /// Switch to the previous roster tab
    PrevTab,
    /// Toggle focus between panels
    ToggleFocus,
    /// Reload the current list from page zero
    Refresh,
    /// Start search mode
    StartSearch,
    /// Append a character to the search query
    SearchInput(char),
    /// Backspace in search
    SearchBackspace,
    /// Apply the current search query
    ApplySearch,
    /// No operation
    None,
}
