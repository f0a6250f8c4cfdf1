//! Polling byte transfers over a full duplex SPI peripheral.
//!
//! None of these time out: a peer that never clocks the bus keeps the caller
//! spinning on the status flag forever. Callers needing a bound must impose it
//! externally (watchdog, timer).

use embedded_hal::spi::FullDuplex;
use nb::block;

use crate::constants::DUMMY_BYTE;

/// Writes `out` (which starts the clock in master role), waits for the
/// transfer to complete and returns the byte shifted in.
pub fn transfer_byte<S: FullDuplex<u8>>(spi: &mut S, out: u8) -> Result<u8, S::Error> {
  block!(spi.send(out))?;
  block!(spi.read())
}

/// Waits for a received byte without writing first.
///
/// The clock must already have been generated, by a prior write in master role
/// or by the remote master in slave role.
pub fn read_byte<S: FullDuplex<u8>>(spi: &mut S) -> Result<u8, S::Error> {
  block!(spi.read())
}

/// Clocks out a dummy byte and returns what the slave sent back.
pub fn master_read_byte<S: FullDuplex<u8>>(spi: &mut S) -> Result<u8, S::Error> {
  transfer_byte(spi, DUMMY_BYTE)
}

/// Slave side: waits for the transmit slot, then loads `byte` to be shifted
/// out on the next master driven transfer.
pub fn put_byte<S: FullDuplex<u8>>(spi: &mut S, byte: u8) -> Result<(), S::Error> {
  block!(spi.send(byte))
}
