//! Shared constants for toolpath interpretation.

/// Move-type code the slicer reserves for non-depositing travel moves.
pub const TRAVEL_TYPE_CODE: i32 = 7;

/// Number of scalar components per point in a flat coordinate buffer.
pub const COMPONENTS_PER_POINT: usize = 3;

/// Index of the first layer in a toolpath.
pub const FIRST_LAYER_INDEX: usize = 0;
