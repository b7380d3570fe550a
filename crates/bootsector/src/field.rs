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

use crate::device::PartitionDevice;
use crate::error::{ReconcileError, Result};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

/// Byte position of the stored offset field inside the boot sector.
pub const STORED_OFFSET_POSITION: u64 = 506;

/// Width of the stored offset field in bytes.
pub const STORED_OFFSET_LEN: usize = 4;

/// # Read Stored Offset
/// Read the partition offset the boot code currently has configured.
///
/// The field is kept in host byte order, the same order the installed boot
/// code was built for.
pub fn read_stored_offset<Disk: Read + Seek>(disk: &mut Disk) -> Result<u32> {
    let read_err = |source| ReconcileError::Read {
        offset: STORED_OFFSET_POSITION,
        source,
    };

    let mut field = [0u8; STORED_OFFSET_LEN];

    disk.seek(SeekFrom::Start(STORED_OFFSET_POSITION))
        .map_err(read_err)?;
    disk.read_exact(&mut field).map_err(read_err)?;

    let value = u32::from_ne_bytes(field);
    debug!(value, "read stored offset");

    Ok(value)
}

/// # Write Stored Offset
/// Overwrite the stored offset field with `value` and sync it to the device.
pub fn write_stored_offset<Disk: PartitionDevice>(disk: &mut Disk, value: u32) -> Result<()> {
    let write_err = |source| ReconcileError::Write {
        offset: STORED_OFFSET_POSITION,
        source,
    };

    disk.seek(SeekFrom::Start(STORED_OFFSET_POSITION))
        .map_err(write_err)?;
    disk.write_all(&value.to_ne_bytes()).map_err(write_err)?;
    disk.flush().map_err(write_err)?;
    disk.sync().map_err(write_err)?;

    debug!(value, "wrote stored offset");
    Ok(())
}
