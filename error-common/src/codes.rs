// Error codes implementation
// Stable, machine-readable codes attached to engine errors

pub mod validation {
    pub const DUPLICATE_CUSTOMER: &str = "VALIDATION_1002";
    pub const NEGATIVE_AMOUNT: &str = "VALIDATION_1003";
}

pub mod input {
    pub const READ_FAILED: &str = "INPUT_2001";
    pub const DECODE_FAILED: &str = "INPUT_2002";
    pub const ENCODE_FAILED: &str = "INPUT_2003";
}

pub mod config {
    pub const LOAD_FAILED: &str = "CONFIG_3001";
    pub const INVALID_VALUE: &str = "CONFIG_3002";
    pub const LOGGER_INIT_FAILED: &str = "CONFIG_3003";
}
