//! Human-readable ROB dump for tracing.
//!
//! Each non-empty thread prints two rows: sequence numbers with their flags
//! (`s` squashed, `r` runahead, `c` ready to commit), and instruction addresses
//! aligned underneath. The format is for people, not for parsing.

use tracing::trace;

use super::Rob;
use crate::common::constants::DUMP_LABEL_WIDTH;

impl Rob {
    /// Renders the contents of every thread queue.
    pub fn dump(&self) -> String {
        let mut out = String::new();

        for (tid, list) in self.inst_list.iter().enumerate() {
            if list.is_empty() {
                continue;
            }

            let label = format!("tid:{tid}");
            let mut seq_row = format!("{label:<DUMP_LABEL_WIDTH$}");
            let mut addr_row = " ".repeat(DUMP_LABEL_WIDTH);
            for inst in list {
                seq_row.push_str(&format!(" {:>4}[{:<3}]", inst.seq_num().0, inst.flag_string()));
                addr_row.push_str(&format!(" {:<#9x}", inst.pc()));
            }

            out.push_str(seq_row.trim_end());
            out.push('\n');
            out.push_str(addr_row.trim_end());
            out.push('\n');
        }

        if self.is_empty() {
            out.push_str("ROB is empty\n");
        } else if self.is_full() {
            out.push_str("ROB is full\n");
        }

        out
    }

    /// Emits [`Rob::dump`] line by line at trace level.
    pub fn trace_dump(&self) {
        for line in self.dump().lines() {
            trace!("{line}");
        }
    }
}
