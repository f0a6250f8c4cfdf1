pub mod exchange;
pub mod framer;
pub mod master;
pub mod select;
pub mod slave;
pub mod transfer;

pub use exchange::{Exchange, MaskedFramer};
pub use framer::{FrameEvent, Framer, FramerStats};
pub use master::Master;
pub use select::{with_select, SelectLine, SelectPolarity};
pub use slave::Slave;

/// The receive interrupt enable bit of an SPI peripheral.
///
/// Masking it is how foreground code keeps the framer handler out while it
/// drains a message when no RTIC resource lock is available.
pub trait RxInterrupt {
  fn listen(&mut self);
  fn unlisten(&mut self);
}
