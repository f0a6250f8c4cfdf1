//! Interrupt driven SPI driver with terminator-delimited message framing.
//!
//! The master side sends whole messages (bytes, text or packed numbers)
//! inside a chip-select window, always followed by a terminator byte. The
//! slave side runs a [`Framer`](spi_drv::framer::Framer) from the SPI receive
//! interrupt and hands complete messages to the foreground loop through a
//! single-slot mailbox drained by [`Exchange`](spi_drv::exchange::Exchange).
//!
//! Hardware is reached through `embedded-hal` traits so the core runs on the
//! host under test. The `firmware` feature adds the STM32F407 adapter and the
//! two example binaries.

#![cfg_attr(not(test), no_std)]

pub mod buffer;
pub mod codec;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod indicator;
pub mod spi_drv;
pub mod util;

#[cfg(feature = "firmware")]
pub mod hw;

#[cfg(test)]
mod mock;

pub use error::{Error, Result, RoleError, WidthError};
