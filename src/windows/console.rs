//! Console setup for UTF-8 process names and ANSI redraws

use windows::Win32::System::Console::{
    GetConsoleMode, GetStdHandle, SetConsoleMode, SetConsoleOutputCP, CONSOLE_MODE,
    ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
};

use crate::platform::traits::PlatformResult;

const CP_UTF8: u32 = 65001;

/// Switch stdout to UTF-8 and enable virtual-terminal escape sequences.
///
/// Fails when stdout is not a console (e.g. redirected to a file).
pub fn prepare_console() -> PlatformResult<()> {
    unsafe {
        SetConsoleOutputCP(CP_UTF8)?;
        let stdout = GetStdHandle(STD_OUTPUT_HANDLE)?;
        let mut mode = CONSOLE_MODE::default();
        GetConsoleMode(stdout, &mut mode)?;
        SetConsoleMode(stdout, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING)?;
    }
    Ok(())
}
