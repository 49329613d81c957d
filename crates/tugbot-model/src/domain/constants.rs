//! Label keys and state names shared by the agent and the runtime clients.
//!
//! Every component refers to container metadata through these constants, so the
//! label contract is defined in exactly one place.

/// Marks the agent's own container. Value `"true"` excludes it from every candidacy check.
pub const LABEL_TUGBOT: &str = "tugbot";

/// Marks a container as a test definition when set to `"true"`.
pub const LABEL_TEST: &str = "tugbot.test";

/// Present (non-empty) only on containers launched by the agent itself.
///
/// The value is the display name of the container the re-run was created from.
pub const LABEL_CREATED_FROM: &str = "tugbot.created.from";

/// Optional stop signal override (e.g. `"SIGINT"`).
pub const LABEL_STOP_SIGNAL: &str = "tugbot.stop-signal";

/// Compatibility override for the logical image name of containers deployed by Zodiac.
pub const LABEL_ZODIAC: &str = "tugbot.zodiac.original-image";

/// Lifecycle state of a container that has finished its previous run.
pub const STATE_EXITED: &str = "exited";
