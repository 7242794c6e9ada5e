//! Error code definitions and documentation

/// Syntax/parsing errors (E0xxx)
pub mod syntax {
    pub const UNEXPECTED_TOKEN: &str = "E0001";
    pub const UNTERMINATED_STRING: &str = "E0002";
    pub const INVALID_NUMBER: &str = "E0003";
    pub const MISSING_DELIMITER: &str = "E0004";
    pub const UNEXPECTED_EOF: &str = "E0005";
}

/// Load errors (E1xxx): the submission could not be turned into a
/// shared evaluation environment
pub mod load {
    pub const PARSE_FAILED: &str = "E1001";
    pub const INITIAL_RUN_FAILED: &str = "E1002";
    pub const UNREADABLE_FILE: &str = "E1003";
}

/// Harness/configuration errors (E2xxx): instructor content bugs,
/// never shown to the learner as their own mistake
pub mod harness {
    pub const PROBE_PARSE_FAILED: &str = "E2001";
    pub const PROBE_INJECT_FAILED: &str = "E2002";
    pub const PROBE_NOT_CALLABLE: &str = "E2003";
    pub const PROBE_TAKES_ARGUMENTS: &str = "E2004";
    pub const UNKNOWN_EXERCISE: &str = "E2005";
}

/// Structural analysis findings (E3xxx)
pub mod analysis {
    pub const RULE_FAILED: &str = "E3001";
}

/// Runtime errors (E4xxx)
pub mod runtime {
    pub const UNDEFINED_VARIABLE: &str = "E4001";
    pub const TYPE_MISMATCH: &str = "E4002";
    pub const DIVISION_BY_ZERO: &str = "E4003";
    pub const NOT_CALLABLE: &str = "E4004";
    pub const ARITY_MISMATCH: &str = "E4005";
    pub const UNKNOWN_FUNCTION: &str = "E4006";
    pub const END_OF_INPUT: &str = "E4007";
    pub const RETURN_OUTSIDE_FUNCTION: &str = "E4008";
    pub const BREAK_OUTSIDE_LOOP: &str = "E4009";
    pub const INDEX_OUT_OF_BOUNDS: &str = "E4010";
}
