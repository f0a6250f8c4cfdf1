pub const CPU_FREQ: u32 = 168_000_000;

/// Carriage return ends every framed message.
pub const DEFAULT_TERMINATOR: u8 = 0x0D;

/// 50 payload bytes plus the terminator slot.
pub const DEFAULT_CAPACITY: usize = 50 + 1;

/// Byte clocked out by a master read when the outgoing value is irrelevant.
pub const DUMMY_BYTE: u8 = 0xFF;

/// Widest value handled by the packed-number helpers.
pub const MAX_PACKED_BYTES: usize = 8;

pub const TOGGLE_COMMAND: &str = "TOGGLE";
pub const LED_ON: u64 = 0x1234;
pub const LED_OFF: u64 = 0x4321;
pub const LED_COMMAND_BYTES: usize = 2;
