//! Operation lifecycle macros
//!
//! An operation emits one `start` event, then exactly one `end` or
//! `end_error`. Trailing `key = value` fields pass straight through to
//! `tracing`, which is how `request_id` rides along with each event.

/// Log the start of an operation
///
/// ```
/// # use sheetkeep_core::log_op_start;
/// log_op_start!("create");
/// log_op_start!("create", request_id = "req-1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {{
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
            $($($field)+)?
        );
    }};
}

/// Log the successful end of an operation
///
/// ```
/// # use sheetkeep_core::log_op_end;
/// log_op_end!("create", duration_ms = 3, request_id = "req-1");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    }};
}

/// Log a failed operation with the error's kind and stable code
///
/// `$err` is anything convertible into `ExError`.
///
/// ```
/// # use sheetkeep_core::log_op_error;
/// # use sheetkeep_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound).with_entity_id("c1");
/// log_op_error!("get_by_id", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let err: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            $($($field)+)?
        );
    }};
}
