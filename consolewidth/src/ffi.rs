use std::ffi::c_int;

/// C entry point, declared in `include/consolewidth.h`.
#[unsafe(no_mangle)]
pub extern "C" fn get_console_width() -> c_int {
    c_int::from(crate::get_console_width())
}
