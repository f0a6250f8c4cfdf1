use crate::constants;

pub const fn convert_us_to_cycles(us: u32) -> u32 {
  us * (constants::CPU_FREQ / 1_000_000)
}

/// `log` backend printing over semihosting, silent without a debugger.
///
/// Semihosting calls halt the core when no debugger is attached, so the
/// logger checks C_DEBUGEN in DHCSR once at init and drops everything if it
/// is clear.
#[cfg(feature = "firmware")]
pub mod debugger {
  use core::sync::atomic::{AtomicBool, Ordering};

  use cortex_m_semihosting::hprintln;
  use log::{LevelFilter, Log, Metadata, Record};

  const DHCSR: usize = 0xE000_EDF0;

  static ENABLED: AtomicBool = AtomicBool::new(false);
  static LOGGER: Debugger = Debugger;

  struct Debugger;

  impl Log for Debugger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
      ENABLED.load(Ordering::Relaxed)
    }

    fn log(&self, record: &Record<'_>) {
      if self.enabled(record.metadata()) {
        hprintln!("[{}] {}", record.level(), record.args()).ok();
      }
    }

    fn flush(&self) {}
  }

  pub fn init(level: LevelFilter) {
    let r = DHCSR as *const u32;
    if unsafe { core::ptr::read_volatile(r) } & 1 == 1 {
      ENABLED.store(true, Ordering::Relaxed);
    }
    if log::set_logger(&LOGGER).is_ok() {
      log::set_max_level(level);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cycles_at_168_mhz() {
    assert_eq!(convert_us_to_cycles(1), 168);
    assert_eq!(convert_us_to_cycles(500_000), 84_000_000);
  }
}
