use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{BitWidths, mask};

/// Input event: edge registration and/or query start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMsg {
    pub src: usize,
    pub dst: usize,
    #[serde(default)]
    pub init: bool,
    #[serde(default)]
    pub run: bool,
}

impl EngineMsg {
    pub fn new(src: usize, dst: usize, init: bool, run: bool) -> Self {
        Self {
            src,
            dst,
            init,
            run,
        }
    }

    /// Registers the edge `src -> dst`.
    pub fn edge(src: usize, dst: usize) -> Self {
        Self::new(src, dst, true, false)
    }

    /// Starts a query from `src` looking for `dst`.
    pub fn query(src: usize, dst: usize) -> Self {
        Self::new(src, dst, false, true)
    }

    /// Packs the event as `src | dst | init | run`, most significant first.
    pub fn encode(&self, widths: &BitWidths) -> u64 {
        let node_mask = widths.node_mask();
        ((self.src as u64 & node_mask) << (widths.node + 2))
            | ((self.dst as u64 & node_mask) << 2)
            | (u64::from(self.init) << 1)
            | u64::from(self.run)
    }

    pub fn decode(word: u64, widths: &BitWidths) -> Self {
        let node_mask = widths.node_mask();
        Self {
            src: ((word >> (widths.node + 2)) & node_mask) as usize,
            dst: ((word >> 2) & node_mask) as usize,
            init: (word >> 1) & 1 == 1,
            run: word & 1 == 1,
        }
    }
}

impl fmt::Display for EngineMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.src,
            self.dst,
            u8::from(self.init),
            u8::from(self.run)
        )
    }
}

/// Output event. On the wire only `hops` travels; `found` separates a real
/// discovery from the drain sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    pub hops: u64,
    pub found: bool,
}

impl EngineResult {
    pub fn found(hops: u64) -> Self {
        Self { hops, found: true }
    }

    pub fn unreachable() -> Self {
        Self {
            hops: 0,
            found: false,
        }
    }

    pub fn encode(&self, widths: &BitWidths) -> u64 {
        self.hops & mask(widths.result)
    }

    /// Discovered distances are never zero, so a zero word is the sentinel.
    pub fn decode(word: u64, widths: &BitWidths) -> Self {
        let hops = word & mask(widths.result);
        Self {
            hops,
            found: hops != 0,
        }
    }
}

impl fmt::Display for EngineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(f, "{}", self.hops)
        } else {
            write!(f, "unreachable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout_for_six_entries() {
        let widths = BitWidths::for_entries(6);
        let word = EngineMsg::new(0b101, 0b011, true, false).encode(&widths);
        assert_eq!(word, 0b101_011_1_0);
        assert_eq!(EngineMsg::query(0, 5).encode(&widths), 0b000_101_0_1);
    }

    #[test]
    fn test_decode_masks_fields() {
        let widths = BitWidths::for_entries(4);
        let msg = EngineMsg::decode(0b1111_11_01_1_1, &widths);
        assert_eq!(msg, EngineMsg::new(3, 1, true, true));
    }

    #[test]
    fn test_result_sentinel_decodes_as_not_found() {
        let widths = BitWidths::for_entries(6);
        assert_eq!(EngineResult::decode(0, &widths), EngineResult::unreachable());
        assert_eq!(EngineResult::decode(4, &widths), EngineResult::found(4));
        assert_eq!(EngineResult::found(65).encode(&widths), 1);
    }

    #[test]
    fn test_display_matches_dotted_form() {
        assert_eq!(EngineMsg::query(0, 5).to_string(), "0.5.0.1");
        assert_eq!(EngineResult::unreachable().to_string(), "unreachable");
    }
}
