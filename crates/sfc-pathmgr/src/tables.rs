//! Datastore key names for service function paths.

/// Top-level container of the path collection document.
pub const PATHS_CONTAINER: &str = "service-function-paths";

/// List of paths inside [`PATHS_CONTAINER`].
pub const PATH_LIST: &str = "service-function-path";

/// Field names on a path and its hops.
pub mod fields {
    /// Path name (list key).
    pub const NAME: &str = "name";

    /// Service index given to the first hop.
    pub const STARTING_INDEX: &str = "starting-index";

    /// Hop list on a path.
    pub const SERVICE_PATH_HOP: &str = "service-path-hop";

    /// Service function visited by a hop.
    pub const SERVICE_FUNCTION_NAME: &str = "service-function-name";

    /// Forwarder a hop goes through.
    pub const SERVICE_FUNCTION_FORWARDER: &str = "service-function-forwarder";
}
