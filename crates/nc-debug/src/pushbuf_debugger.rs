//! Push buffer debugger for combiner command inspection

use nc_core::PushBufError;
use nc_nv04::methods::{self, NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR};
use nc_nv04::pushbuf::MethodHeader;
use nc_nv04::CombinerWord;
use serde::Serialize;

/// Decoded command entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    /// Subchannel the method was sent on
    pub subchannel: u8,
    /// Method register address
    pub method: u32,
    /// Data value
    pub data: u32,
    /// Human-readable method name
    pub method_name: String,
    /// Decoded description
    pub description: String,
}

/// Push buffer debugger
pub struct PushBufDebugger {
    /// Command history
    command_history: Vec<CommandEntry>,
    /// Maximum command history size
    max_command_history: usize,
}

impl Default for PushBufDebugger {
    fn default() -> Self {
        Self::new()
    }
}

impl PushBufDebugger {
    /// Create a new push buffer debugger
    pub fn new() -> Self {
        Self {
            command_history: Vec::new(),
            max_command_history: 10000,
        }
    }

    /// Record a single method write
    pub fn record_command(&mut self, subchannel: u8, method: u32, data: u32) {
        let entry = CommandEntry {
            subchannel,
            method,
            data,
            method_name: methods::method_name(method),
            description: Self::describe_command(method, data),
        };

        self.command_history.push(entry);

        if self.command_history.len() > self.max_command_history {
            self.command_history.remove(0);
        }
    }

    /// Decode a raw word stream of method headers and data.
    ///
    /// Returns the number of commands recorded. Nothing is recorded if the
    /// stream is malformed.
    pub fn decode_stream(&mut self, words: &[u32]) -> Result<usize, PushBufError> {
        let mut commands = Vec::new();
        let mut pos = 0;

        while pos < words.len() {
            let header = MethodHeader::decode(words[pos]);
            pos += 1;
            if header.count == 0 {
                return Err(PushBufError::InvalidCount(0));
            }

            let remaining = words.len() - pos;
            if (header.count as usize) > remaining {
                return Err(PushBufError::Truncated {
                    expected: header.count,
                    found: remaining,
                });
            }

            for (i, &data) in words[pos..pos + header.count as usize].iter().enumerate() {
                commands.push((header.subchannel, header.method + 4 * i as u32, data));
            }
            pos += header.count as usize;
        }

        let count = commands.len();
        for (subchannel, method, data) in commands {
            self.record_command(subchannel, method, data);
        }
        tracing::debug!("Push buffer debugger: decoded {} commands", count);
        Ok(count)
    }

    /// Get the last `count` commands
    pub fn get_command_history(&self, count: usize) -> &[CommandEntry] {
        let start = self.command_history.len().saturating_sub(count);
        &self.command_history[start..]
    }

    /// Get every recorded command
    pub fn commands(&self) -> &[CommandEntry] {
        &self.command_history
    }

    /// Clear command history
    pub fn clear_history(&mut self) {
        self.command_history.clear();
    }

    /// Describe a command
    fn describe_command(method: u32, data: u32) -> String {
        if let Some((unit, is_alpha)) = methods::combine_register(method) {
            let channel = if is_alpha { "alpha" } else { "color" };
            return format!("Unit {} {}: {}", unit, channel, CombinerWord(data));
        }

        match method {
            NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR => {
                let a = (data >> 24) & 0xFF;
                let r = (data >> 16) & 0xFF;
                let g = (data >> 8) & 0xFF;
                let b = data & 0xFF;
                format!("Combine factor: r={}, g={}, b={}, a={}", r, g, b, a)
            }
            _ => format!("data=0x{:08X}", data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_nv04::pushbuf::method_header;

    #[test]
    fn test_decode_stream() {
        let mut debugger = PushBufDebugger::new();
        let words = [
            method_header(3, 0x0310, 2),
            0x2404_0514,
            0x2404_0514,
            method_header(3, 0x0334, 1),
            0xFF00_00FF,
        ];

        assert_eq!(debugger.decode_stream(&words), Ok(3));
        let history = debugger.commands();
        assert_eq!(history[0].method_name, "COMBINE_ALPHA(0)");
        assert_eq!(history[1].method, 0x0314);
        assert_eq!(history[1].method_name, "COMBINE_COLOR(0)");
        assert_eq!(
            history[1].description,
            "Unit 0 color: TEXTURE0 * (1-ZERO) + ZERO * ZERO [IDENTITY]"
        );
        assert_eq!(history[2].subchannel, 3);
        assert_eq!(
            history[2].description,
            "Combine factor: r=0, g=0, b=255, a=255"
        );
    }

    #[test]
    fn test_truncated_stream_records_nothing() {
        let mut debugger = PushBufDebugger::new();
        let words = [method_header(3, 0x0334, 1), 0, method_header(3, 0x031C, 2), 0];

        assert_eq!(
            debugger.decode_stream(&words),
            Err(PushBufError::Truncated {
                expected: 2,
                found: 1
            })
        );
        assert!(debugger.commands().is_empty());
    }

    #[test]
    fn test_command_history() {
        let mut debugger = PushBufDebugger::new();
        debugger.record_command(3, 0x0100, 0);
        debugger.record_command(3, 0x0334, 0);
        debugger.record_command(3, 0x0400, 7);

        let history = debugger.get_command_history(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].method_name, "COMBINE_FACTOR");
        assert_eq!(history[1].method_name, "UNKNOWN_0x0400");
        assert_eq!(history[1].description, "data=0x00000007");

        debugger.clear_history();
        assert!(debugger.commands().is_empty());
    }

    #[test]
    fn test_entry_serializes() {
        let mut debugger = PushBufDebugger::new();
        debugger.record_command(3, 0x0334, 0x8000_0000);
        let json = serde_json::to_string(&debugger.commands()[0]).unwrap();
        assert!(json.contains("\"method_name\":\"COMBINE_FACTOR\""));
        assert!(json.contains("\"method\":820"));
    }
}
