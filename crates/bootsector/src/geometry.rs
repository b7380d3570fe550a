/*
  ____                 __               __   _ __
 / __ \__ _____ ____  / /___ ____ _    / /  (_) /
/ /_/ / // / _ `/ _ \/ __/ // /  ' \  / /__/ / _ \
\___\_\_,_/\_,_/_//_/\__/\_,_/_/_/_/ /____/_/_.__/
    Part of the Quantum OS Project

Copyright 2025 Gavin Kellam

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial
portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
*/

use std::fs::File;
use std::io;
use tracing::warn;

/// # Geometry
/// The layout the kernel reports for a block device.
///
/// Only `start` matters to the boot code, the rest is kept so it can be
/// shown in debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub heads: u8,
    pub sectors: u8,
    pub cylinders: u16,
    /// First sector of the partition, relative to the containing disk.
    pub start: u64,
}

impl Geometry {
    /// # Stored Start
    /// The low 32 bits of `start`, which is all the boot sector field can hold.
    pub fn stored_start(&self) -> u32 {
        let low = self.start as u32;

        if u64::from(low) != self.start {
            warn!(
                start = self.start,
                stored = low,
                "partition start does not fit in 32 bits, only the low bits will be stored"
            );
        }

        low
    }
}

#[cfg(target_os = "linux")]
const HDIO_GETGEO: libc::c_ulong = 0x0301;

/// `struct hd_geometry` from `<linux/hdreg.h>`
#[cfg(target_os = "linux")]
#[repr(C)]
#[derive(Clone, Copy, Default)]
struct HdGeometry {
    heads: u8,
    sectors: u8,
    cylinders: u16,
    start: libc::c_ulong,
}

#[cfg(target_os = "linux")]
impl From<HdGeometry> for Geometry {
    fn from(value: HdGeometry) -> Self {
        Self {
            heads: value.heads,
            sectors: value.sectors,
            cylinders: value.cylinders,
            start: u64::from(value.start),
        }
    }
}

/// # Query Geometry
/// Ask the kernel for the geometry of the device behind `file` (`HDIO_GETGEO`).
///
/// Regular files and devices without a geometry fail with the kernel's error
/// (usually `ENOTTY`).
#[cfg(target_os = "linux")]
pub fn query_geometry(file: &File) -> io::Result<Geometry> {
    use std::os::unix::io::AsRawFd;

    let mut raw = HdGeometry::default();
    let ret = unsafe {
        libc::ioctl(
            file.as_raw_fd(),
            HDIO_GETGEO as _,
            &mut raw as *mut HdGeometry,
        )
    };

    if ret < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(raw.into())
}

#[cfg(not(target_os = "linux"))]
pub fn query_geometry(_file: &File) -> io::Result<Geometry> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "HDIO_GETGEO is only available on Linux",
    ))
}
