/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

const FALLBACK_HOSTNAME: &str = "localhost";

#[cfg(unix)]
fn system_hostname() -> String {
    let uname = rustix::system::uname();
    uname.nodename().to_string_lossy().into_owned()
}

#[cfg(windows)]
fn system_hostname() -> String {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;

    use windows_sys::Win32::System::SystemInformation::{
        ComputerNamePhysicalDnsHostname, GetComputerNameExW,
    };

    let mut size = 0u32;
    // first call only reports the buffer size, nul included
    unsafe {
        GetComputerNameExW(ComputerNamePhysicalDnsHostname, std::ptr::null_mut(), &mut size);
    }
    if size == 0 {
        return String::new();
    }

    let mut buffer = vec![0u16; size as usize];
    let ok = unsafe {
        GetComputerNameExW(ComputerNamePhysicalDnsHostname, buffer.as_mut_ptr(), &mut size)
    };
    if ok == 0 {
        return String::new();
    }
    buffer.truncate(size as usize);
    OsString::from_wide(&buffer).to_string_lossy().into_owned()
}

/// The name of this host as seen by the Zabbix server.
pub fn local_hostname() -> String {
    let name = system_hostname();
    if name.is_empty() {
        FALLBACK_HOSTNAME.to_string()
    } else {
        name
    }
}
