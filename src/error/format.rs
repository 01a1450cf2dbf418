use crate::error::{ErrorContext, LandasError};

pub fn format_error_chain(error: &LandasError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}
