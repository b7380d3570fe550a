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

//! In-memory partition used by the unit tests.

use crate::device::PartitionDevice;
use crate::geometry::Geometry;
use std::cell::Cell;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

pub struct MemPartition {
    image: Cursor<Vec<u8>>,
    start: Option<u64>,
    fixed_size: bool,
    pub geometry_queries: Cell<usize>,
    pub reads: usize,
    pub writes: usize,
    pub syncs: usize,
}

impl MemPartition {
    pub fn new(image: Vec<u8>, start: u64) -> Self {
        Self {
            image: Cursor::new(image),
            start: Some(start),
            fixed_size: false,
            geometry_queries: Cell::new(0),
            reads: 0,
            writes: 0,
            syncs: 0,
        }
    }

    /// A device whose geometry query fails like a regular file's does.
    pub fn without_geometry(image: Vec<u8>) -> Self {
        Self {
            start: None,
            ..Self::new(image, 0)
        }
    }

    /// Writes past the end of the image are cut short instead of growing it.
    pub fn fixed_size(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    pub fn set_start(&mut self, start: u64) {
        self.start = Some(start);
    }

    pub fn image(&self) -> &[u8] {
        self.image.get_ref()
    }

    pub fn into_image(self) -> Vec<u8> {
        self.image.into_inner()
    }
}

impl PartitionDevice for MemPartition {
    fn geometry(&self) -> io::Result<Geometry> {
        self.geometry_queries.set(self.geometry_queries.get() + 1);

        self.start
            .map(|start| Geometry {
                start,
                ..Default::default()
            })
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOTTY))
    }

    fn sync(&mut self) -> io::Result<()> {
        self.syncs += 1;
        Ok(())
    }
}

impl Read for MemPartition {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        self.image.read(buf)
    }
}

impl Write for MemPartition {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;

        if !self.fixed_size {
            return self.image.write(buf);
        }

        let len = self.image.get_ref().len() as u64;
        let room = len.saturating_sub(self.image.position()) as usize;
        let amount = room.min(buf.len());
        self.image.write(&buf[..amount])
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemPartition {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.image.seek(pos)
    }
}
