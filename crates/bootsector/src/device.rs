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

use crate::error::{ReconcileError, Result};
use crate::geometry::{query_geometry, Geometry};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// # Partition Device
/// A partition the reconciler can patch: a seekable byte stream that can
/// also tell where it starts on its parent disk.
pub trait PartitionDevice: Read + Write + Seek {
    /// Query the device geometry.
    fn geometry(&self) -> io::Result<Geometry>;

    /// Push written data down to the device.
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// # Raw Partition
/// A block special file opened for read and write.
///
/// The handle is closed when this is dropped.
#[derive(Debug)]
pub struct RawPartition {
    file: File,
}

impl RawPartition {
    /// # Open
    /// Open `path` with read/write access.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening partition");

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| ReconcileError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { file })
    }
}

impl PartitionDevice for RawPartition {
    fn geometry(&self) -> io::Result<Geometry> {
        query_geometry(&self.file)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.file.sync_data()
    }
}

impl Read for RawPartition {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for RawPartition {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for RawPartition {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
