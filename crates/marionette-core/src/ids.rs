//! Opaque handles for engine-owned entities.

use serde::{Deserialize, Serialize};

/// Handle to a clip loaded into an engine's library. Assigned by the engine
/// in load order; opaque to callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

/// Index of a registered mesh's skin bindings. Dense, in registration order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MeshIndex(pub u32);
