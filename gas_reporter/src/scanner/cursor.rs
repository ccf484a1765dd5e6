//!
//! The block cursor.
//!

use std::ops::RangeInclusive;

///
/// The block cursor.
///
/// Holds the first blocks of two accounting windows. The deployment window starts right
/// after the last scanned block, so it covers the setup hooks of a test and leaves no gaps.
/// Method calls and the per-test gas total are attributed from the method window start only.
///
/// Both watermarks only move forward, so no block is scanned twice.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockCursor {
    /// The first block of the deployment window.
    deployment_start: u64,
    /// The first block of the method window.
    method_start: u64,
}

impl BlockCursor {
    ///
    /// Creates the cursor with both windows starting at the block.
    ///
    pub fn new(start: u64) -> Self {
        Self {
            deployment_start: start,
            method_start: start,
        }
    }

    ///
    /// Excludes the blocks up to the test start from the method window.
    ///
    pub fn on_test_boundary_before(&mut self, block: u64) {
        self.method_start = self.method_start.max(block + 1);
    }

    ///
    /// Opens the method window after the setup hook which ended at the block.
    ///
    pub fn on_hook_end(&mut self, block: u64) {
        self.method_start = self.method_start.max(block + 1);
    }

    ///
    /// Returns the blocks to scan up to the chain head, if any.
    ///
    pub fn range(&self, head: u64) -> Option<RangeInclusive<u64>> {
        if self.deployment_start > head {
            return None;
        }
        Some(self.deployment_start..=head)
    }

    ///
    /// Whether method calls in the block are attributed.
    ///
    pub fn is_method_window(&self, block: u64) -> bool {
        block >= self.method_start
    }

    ///
    /// Marks the block as scanned.
    ///
    pub fn advance(&mut self, block: u64) {
        self.deployment_start = self.deployment_start.max(block + 1);
    }

    ///
    /// Closes both windows after the block.
    ///
    pub fn finish(&mut self, block: u64) {
        self.advance(block);
        self.method_start = self.method_start.max(block + 1);
    }

    ///
    /// Returns the first block of the deployment window.
    ///
    pub fn deployment_start(&self) -> u64 {
        self.deployment_start
    }

    ///
    /// Returns the first block of the method window.
    ///
    pub fn method_start(&self) -> u64 {
        self.method_start
    }
}
