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

//! Keeps the partition offset stored in a boot sector in line with where the
//! kernel says the partition actually starts.
//!
//! The installed boot code reads a 4-byte field at byte 506 of its own
//! partition to find out where it lives on disk. After a partition is created
//! or moved that field has to be rewritten, which is what [`reconcile`] does.
//!
//! Nothing checks that the device is a partition rather than a whole disk, or
//! that byte 506 belongs to compatible boot code. That is up to the caller.

use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

pub mod device;
pub mod error;
pub mod field;
pub mod geometry;

#[cfg(test)]
mod mem;

pub use device::{PartitionDevice, RawPartition};
pub use error::{ReconcileError, Result};
pub use field::{STORED_OFFSET_LEN, STORED_OFFSET_POSITION};
pub use geometry::Geometry;

/// # Options
/// Knobs for a single reconcile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Report what would change without writing anything.
    pub dry_run: bool,
}

/// # Action
/// What a reconcile run ended up doing to the stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The field already matched, nothing was written.
    AlreadyConfigured,
    /// The field was rewritten.
    Configured,
    /// The field differs but this was a dry run.
    WouldConfigure,
}

/// # Outcome
/// The result of a successful reconcile run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Starting sector reported by the kernel.
    pub start: u64,
    /// Value the field held before this run.
    pub previous: u32,
    pub action: Action,
}

// Report lines are informational only, a failed write never stops the run.
macro_rules! report {
    ($report:expr, $($arg:tt)*) => {
        if let Err(err) = writeln!($report, $($arg)*) {
            warn!(%err, "failed to write report line");
        }
    };
}

/// # Reconcile
/// Bring the stored offset field of `disk` in line with its geometry.
///
/// Informational lines go to `report` on a best-effort basis. The field is
/// only written when it differs from the partition start, so running this
/// again on the same partition is a no-op.
pub fn reconcile<Disk: PartitionDevice>(
    disk: &mut Disk,
    report: &mut dyn Write,
    options: Options,
) -> Result<Outcome> {
    let geometry = disk.geometry().map_err(ReconcileError::Geometry)?;
    debug!(?geometry, "queried device geometry");
    report!(
        report,
        "determined partition start (sectors): 0x{:x}",
        geometry.start
    );

    let previous = field::read_stored_offset(disk)?;
    report!(report, "old bootcode configuration:           0x{previous:x}");

    let start = geometry.stored_start();
    let outcome = |action| Outcome {
        start: geometry.start,
        previous,
        action,
    };

    if previous == start {
        report!(report, "bootcode already configured correctly - exiting.");
        return Ok(outcome(Action::AlreadyConfigured));
    }

    if options.dry_run {
        report!(
            report,
            "bootcode would be configured to 0x{start:x} - exiting."
        );
        return Ok(outcome(Action::WouldConfigure));
    }

    field::write_stored_offset(disk, start)?;
    report!(report, "bootcode configured - exiting.");

    Ok(outcome(Action::Configured))
}

/// # Reconcile Path
/// Open the partition at `path` and [`reconcile`] it.
///
/// The device handle is closed before this returns, whether it succeeded or not.
pub fn reconcile_path(path: &Path, report: &mut dyn Write, options: Options) -> Result<Outcome> {
    let mut partition = RawPartition::open(path)?;
    reconcile(&mut partition, report, options)
}
