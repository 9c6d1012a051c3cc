/// The two lists shown side by side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    All,
    Favorites,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::All => Pane::Favorites,
            Pane::Favorites => Pane::All,
        }
    }
}

/// Everything the presentation layer (keys, media keys) can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Scan the library root again, adding anything new.
    Rescan,
    FocusNext,
    Focus(Pane),
    Select { pane: Pane, index: usize },
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    Play,
    Pause,
    PlayPause,
    Stop,
    /// Load the selected row and start playing it.
    Activate,
    Favorite,
    Unfavorite,
    RemoveFromAll,
    /// Remove the selected row from whichever list is focused.
    RemoveSelected,
    SaveFavorites,
    Quit,
}

/// What the runtime must do after a command was handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    StartScan,
    Quit,
}
