use crate::extensions::node_extension;

use super::Engine;

impl Engine {
    /// Extended `max_depth` for a node, never past the iteration's limit.
    #[inline(always)]
    pub(super) fn extend(
        &self,
        max_depth: u8,
        in_check: bool,
        single_reply: bool,
        mate_threat: bool,
    ) -> u8 {
        let extension = node_extension(in_check, single_reply, mate_threat);
        if extension > 0 && max_depth < self.extension_limit {
            max_depth + extension
        } else {
            max_depth
        }
    }
}
