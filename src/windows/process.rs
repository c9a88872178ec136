//! Windows process enumeration via Toolhelp32 snapshots

use std::mem::size_of;

use windows::Win32::Foundation::{CloseHandle, E_ACCESSDENIED, E_INVALIDARG, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::ProcessStatus::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};
use windows::Win32::System::Threading::{
    OpenProcess, TerminateProcess, PROCESS_ACCESS_RIGHTS, PROCESS_QUERY_INFORMATION,
    PROCESS_TERMINATE, PROCESS_VM_READ,
};

use crate::platform::traits::{
    PlatformError, PlatformResult, ProcessSnapshot, ProcessSource, SnapshotEntry,
};

/// Exit code reported for processes we terminate
const TERMINATED_EXIT_CODE: u32 = 1;

impl From<windows::core::Error> for PlatformError {
    fn from(e: windows::core::Error) -> Self {
        let code = e.code();
        if code == E_ACCESSDENIED {
            PlatformError::PermissionDenied(e.message().to_string())
        } else if code == E_INVALIDARG {
            // OpenProcess answers ERROR_INVALID_PARAMETER for unknown PIDs
            PlatformError::NotFound(e.message().to_string())
        } else {
            PlatformError::SystemError {
                code: code.0,
                message: e.message().to_string(),
            }
        }
    }
}

/// Closes the wrapped handle on drop.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful Win32 open call and is
        // closed exactly once here.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

fn open_process(access: PROCESS_ACCESS_RIGHTS, pid: u32) -> PlatformResult<OwnedHandle> {
    let handle = unsafe { OpenProcess(access, false, pid)? };
    Ok(OwnedHandle(handle))
}

/// Process source backed by Toolhelp32 and psapi
#[derive(Debug, Default)]
pub struct WindowsProcessSource;

impl WindowsProcessSource {
    pub fn new() -> Self {
        Self
    }
}

pub struct ToolhelpSnapshot {
    handle: OwnedHandle,
    entry: PROCESSENTRY32W,
}

impl ToolhelpSnapshot {
    fn current(&self) -> SnapshotEntry {
        let exe = &self.entry.szExeFile;
        let len = exe.iter().position(|&c| c == 0).unwrap_or(exe.len());
        SnapshotEntry::new(self.entry.th32ProcessID, String::from_utf16_lossy(&exe[..len]))
    }
}

impl ProcessSnapshot for ToolhelpSnapshot {
    fn first_entry(&mut self) -> Option<SnapshotEntry> {
        unsafe { Process32FirstW(self.handle.0, &mut self.entry) }.ok()?;
        Some(self.current())
    }

    fn next_entry(&mut self) -> Option<SnapshotEntry> {
        unsafe { Process32NextW(self.handle.0, &mut self.entry) }.ok()?;
        Some(self.current())
    }
}

impl ProcessSource for WindowsProcessSource {
    type Snapshot = ToolhelpSnapshot;

    fn open_snapshot(&self) -> PlatformResult<ToolhelpSnapshot> {
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? };
        Ok(ToolhelpSnapshot {
            handle: OwnedHandle(handle),
            entry: PROCESSENTRY32W {
                dwSize: size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            },
        })
    }

    fn query_memory(&self, pid: u32) -> PlatformResult<u64> {
        let process = open_process(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, pid)?;

        let cb = size_of::<PROCESS_MEMORY_COUNTERS>() as u32;
        let mut counters = PROCESS_MEMORY_COUNTERS {
            cb,
            ..Default::default()
        };
        unsafe { GetProcessMemoryInfo(process.0, &mut counters, cb)? };

        Ok(counters.WorkingSetSize as u64)
    }

    fn terminate(&self, pid: u32) -> PlatformResult<()> {
        let process = open_process(PROCESS_TERMINATE, pid)?;
        unsafe { TerminateProcess(process.0, TERMINATED_EXIT_CODE)? };
        Ok(())
    }
}
