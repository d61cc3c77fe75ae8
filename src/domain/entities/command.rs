/// A parsed fridge command.
///
/// The textual protocol has exactly three command forms plus a help
/// fallback; anything that does not match one of the keywords parses
/// to `Help` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FridgeCommand {
    Add {
        name: String,
        quantity: String,
        expiry: String,
    },
    List,
    Delete {
        name: String,
    },
    Help,
}
