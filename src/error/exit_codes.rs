use crate::error::LandasError;

pub fn get_exit_code(error: &LandasError) -> i32 {
    match error {
        LandasError::InvalidVersionFormat(_) | LandasError::InvalidConfig(_) => 2,

        LandasError::ToolchainNotFound { .. } => 127, // Standard "command not found" exit code

        _ => 1,
    }
}
