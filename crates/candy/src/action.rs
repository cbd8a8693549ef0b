//! The closed catalog of statement actions.

/// One of the four supported SQL verbs.
///
/// Each action compiles through a fixed template with an ordered slot set:
///
/// | Action | Template |
/// |--------|----------|
/// | `Insert` | ``INSERT INTO `<table>` (<columns>) VALUES (<placeholders>)`` |
/// | `Update` | ``UPDATE `<table>` SET <assignments> <where> <limit>`` |
/// | `Select` | ``SELECT <columns> FROM `<table>` <where> <limit>`` |
/// | `Delete` | ``DELETE FROM `<table>` <where> <limit>`` |
///
/// The catalog is closed: actions outside it are unrepresentable, and
/// [`Action::from_verb`] rejects unrecognized verbs at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Insert,
    Update,
    Select,
    Delete,
}

impl Action {
    /// Every action in the catalog, in declaration order.
    pub const ALL: [Action; 4] = [
        Action::Insert,
        Action::Update,
        Action::Select,
        Action::Delete,
    ];

    /// The SQL verb this action renders.
    pub fn verb(self) -> &'static str {
        match self {
            Action::Insert => "INSERT",
            Action::Update => "UPDATE",
            Action::Select => "SELECT",
            Action::Delete => "DELETE",
        }
    }

    /// Look up an action by verb, case-insensitively.
    ///
    /// Returns `None` for anything outside the catalog.
    pub fn from_verb(verb: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| a.verb().eq_ignore_ascii_case(verb))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}
